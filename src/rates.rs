//! Daily [`Rates`] table.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
	currency::Currency,
	error::{Error, Result},
};

/// The currency every [`Rates`] value is quoted in.
pub const QUOTE_CURRENCY: &str = "RUB";

/// All currency quotes published for one date.
#[derive(Debug, Hash, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename = "ValCurs")]
pub struct Rates {
	/// The effective date, as published (`DD.MM.YYYY`).
	#[serde(rename = "Date")]
	date: String,
	#[serde(rename = "Valute", default)]
	currencies: Vec<Currency>,
}

impl Rates {
	/// Gets the effective date, as published.
	#[inline] pub fn date(&self) -> &str { &self.date }
	/// Gets the count of currencies.
	#[inline] pub fn len(&self) -> usize { self.currencies.len() }
	/// Gets whether there are no currencies.
	#[inline] pub fn is_empty(&self) -> bool { self.currencies.is_empty() }
	/// Gets a slice of the currencies, in publication order.
	#[inline] pub fn currencies(&self) -> &[Currency] { &self.currencies }
	/// Iterates over the currencies, in publication order.
	#[inline] pub fn iter(&self) -> std::slice::Iter<'_, Currency> { self.currencies.iter() }

	/// Gets the currency with the given alphabetic code, if exists.
	///
	/// The match is exact and case-sensitive.
	pub fn get(&self, char_code: &str) -> Option<&Currency> {
		self.iter().find(|currency| currency.char_code() == char_code)
	}

	/// Gets the currency with the given alphabetic code.
	pub fn currency(&self, char_code: &str) -> Result<&Currency> {
		self.get(char_code).ok_or_else(|| Error::UnknownCurrency(char_code.to_owned()))
	}

	/// Gets the ruble value of a single unit of the given currency.
	///
	/// [`QUOTE_CURRENCY`] is always worth one.
	fn unit_value(&self, char_code: &str) -> Result<Decimal> {
		if char_code == QUOTE_CURRENCY {
			Ok(Decimal::ONE)
		} else {
			self.currency(char_code)?.value_decimal()
		}
	}

	/// Converts an amount between currencies.
	///
	/// Either side may be [`QUOTE_CURRENCY`].
	pub fn convert(&self, amount: Decimal, from: &str, to: &str) -> Result<Decimal> {
		let from_value = self.unit_value(from)?;
		let to_value = self.unit_value(to)?;
		amount
			.checked_mul(from_value)
			.ok_or_else(|| Error::Overflow(amount, from.to_owned()))?
			.checked_div(to_value)
			.ok_or_else(|| Error::ZeroRate(to.to_owned()))
	}

	pub(crate) fn duplicate(&self) -> Option<&Currency> {
		let mut seen = std::collections::HashSet::with_capacity(self.len());
		self.iter().find(|currency| !seen.insert(currency.char_code()))
	}
}

impl<'a> IntoIterator for &'a Rates {
	type Item = &'a Currency;
	type IntoIter = std::slice::Iter<'a, Currency>;

	#[inline] fn into_iter(self) -> Self::IntoIter { self.iter() }
}
