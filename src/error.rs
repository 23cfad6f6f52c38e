//! [`Error`] type.

use std::num::ParseFloatError;

use crate::fetch::FetchError;

/// An error from the client configuration, the transport, or the response.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// The client is misconfigured.
	#[error("{0}")]
	Configuration(&'static str),
	/// The transport failed to fetch the document.
	#[error("fetch error: {0}")]
	Transport(#[from] FetchError),
	/// The document declares a character encoding other than UTF-8 or windows-1251.
	#[error("unknown charset: {0}")]
	UnsupportedEncoding(String),
	/// The document is not a well-formed daily rates table.
	#[error("failed to parse the response: {0}")]
	Parse(#[from] serde_xml_rs::Error),
	/// A currency value is not a valid floating point number.
	#[error("invalid float value {value:?}: {source}")]
	InvalidFloat {
		/// The normalized value string.
		value: String,
		/// The underlying parse error.
		source: ParseFloatError,
	},
	/// A currency value is not a valid decimal number.
	#[error("invalid decimal value {value:?}: {source}")]
	InvalidDecimal {
		/// The normalized value string.
		value: String,
		/// The underlying parse error.
		source: rust_decimal::Error,
	},
	/// The requested currency is not in the table.
	#[error("unknown currency: {0}")]
	UnknownCurrency(String),
	/// A converted amount does not fit in a [`Decimal`](rust_decimal::Decimal).
	#[error("conversion overflow: {0} {1}")]
	Overflow(rust_decimal::Decimal, String),
	/// A conversion target is quoted at zero.
	#[error("zero rate for currency: {0}")]
	ZeroRate(String),
}

/// [`Result`](std::result::Result) alias with the crate [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;
