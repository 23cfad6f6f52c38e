//! [`Currency`] records.

use std::num::NonZeroU32;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One currency quote from a daily table.
///
/// The value is the price of [`nominal`](Currency::nominal) units of the currency in rubles, as
/// published: a decimal number with a comma as the fractional separator.
#[derive(Debug, Hash, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Currency {
	/// The central bank's internal identifier, e.g. `R01235`.
	#[serde(rename = "ID")]
	id: String,
	/// The [ISO 4217](https://en.wikipedia.org/wiki/ISO_4217) numeric code.
	#[serde(rename = "NumCode")]
	num_code: u32,
	/// The [ISO 4217](https://en.wikipedia.org/wiki/ISO_4217) alphabetic code.
	#[serde(rename = "CharCode")]
	char_code: String,
	/// How many units of the currency the value is quoted for.
	#[serde(rename = "Nominal")]
	nominal: NonZeroU32,
	#[serde(rename = "Name")]
	name: String,
	#[serde(rename = "Value")]
	value: String,
}

impl Currency {
	/// Gets the central bank's internal identifier.
	#[inline] pub fn id(&self) -> &str { &self.id }
	/// Gets the numeric currency code.
	#[inline] pub const fn num_code(&self) -> u32 { self.num_code }
	/// Gets the alphabetic currency code, e.g. `USD`.
	#[inline] pub fn char_code(&self) -> &str { &self.char_code }
	/// Gets the number of units the value is quoted for.
	#[inline] pub const fn nominal(&self) -> u32 { self.nominal.get() }
	/// Gets the display name.
	#[inline] pub fn name(&self) -> &str { &self.name }
	/// Gets the value exactly as published, with a comma separator.
	#[inline] pub fn value_raw(&self) -> &str { &self.value }

	/// Gets the value with a dot as the decimal separator.
	///
	/// Not adjusted by the nominal.
	pub fn value_string(&self) -> String {
		self.value.replace(',', ".")
	}

	/// Gets the value as [`f64`], not adjusted by the nominal.
	pub fn value_f64_raw(&self) -> Result<f64> {
		let value = self.value_string();
		value.parse().map_err(|source| Error::InvalidFloat { value, source })
	}

	/// Gets the value of a single unit as [`f64`].
	pub fn value_f64(&self) -> Result<f64> {
		Ok(self.value_f64_raw()? / f64::from(self.nominal.get()))
	}

	/// Gets the value as [`Decimal`], not adjusted by the nominal.
	pub fn value_decimal_raw(&self) -> Result<Decimal> {
		let value = self.value_string();
		value.parse().map_err(|source| Error::InvalidDecimal { value, source })
	}

	/// Gets the value of a single unit as [`Decimal`].
	///
	/// Unlike [`value_f64`](Self::value_f64), the division is exact up to [`Decimal`]'s 28
	/// significant digits.
	pub fn value_decimal(&self) -> Result<Decimal> {
		Ok(self.value_decimal_raw()? / Decimal::from(self.nominal.get()))
	}
}

#[cfg(test)]
pub(crate) mod tests {
	use approx::assert_relative_eq;
	use rust_decimal_macros::dec;

	use super::*;

	pub(crate) fn currency(char_code: &str, nominal: u32, value: &str) -> Currency {
		Currency {
			id: format!("R-{char_code}"),
			num_code: 0,
			char_code: char_code.to_owned(),
			nominal: NonZeroU32::new(nominal).unwrap(),
			name: char_code.to_owned(),
			value: value.to_owned(),
		}
	}

	#[test]
	fn test_nominal_adjustment() {
		let currency = currency("JPY", 100, "6430,15");
		assert_eq!(currency.value_string(), "6430.15");
		assert_relative_eq!(currency.value_f64().unwrap(), 64.3015, max_relative = 1e-12);
		assert_eq!(currency.value_decimal().unwrap(), dec!(64.3015));
		assert_relative_eq!(currency.value_f64_raw().unwrap(), 6430.15);
		assert_eq!(currency.value_decimal_raw().unwrap(), dec!(6430.15));
	}

	#[test]
	fn test_idempotent() {
		let currency = currency("KGS", 100, "75,7362");
		assert_eq!(currency.value_f64().unwrap(), currency.value_f64().unwrap());
		assert_eq!(currency.value_decimal().unwrap(), currency.value_decimal().unwrap());
		assert_eq!(currency.value_string(), currency.value_string());
	}

	#[test]
	fn test_decimal_is_exact() {
		let currency = currency("AMD", 100, "15,7302");
		assert_eq!(currency.value_decimal().unwrap(), dec!(0.157302));
	}

	#[test]
	fn test_invalid_value() {
		let currency = currency("USD", 1, "64,30,15");
		match currency.value_f64() {
			Err(Error::InvalidFloat { value, .. }) => assert_eq!(value, "64.30.15"),
			other => panic!("unexpected {other:?}"),
		}
		match currency.value_decimal() {
			Err(Error::InvalidDecimal { value, .. }) => assert_eq!(value, "64.30.15"),
			other => panic!("unexpected {other:?}"),
		}
		assert_eq!(currency.value_string(), "64.30.15");
	}
}
