//! [Central Bank of Russia](https://www.cbr.ru/eng/) daily exchange rates client.
//!
//! The bank publishes one table of ruble quotes per day as XML, possibly in windows-1251. The
//! [`Client`] fetches a date's table, caches it in memory for the client's lifetime, and
//! extracts a single currency's rate as [`f64`], as [`Decimal`], or as the published string.
//!
//! # Examples
//! ```no_run
//! # use cbr::Client;
//! let client = Client::new();
//! let today = chrono::Local::now();
//! let usd = client.rate_decimal("USD", today)?;
//! let jpy = client.rate_string("JPY", today)?; // quoted per 100 yen
//! println!("USD {usd}, 100 JPY {jpy}");
//! # Ok::<(), cbr::Error>(())
//! ```

#![deny(missing_docs)]

mod cache;
mod client;
pub mod currency;
mod decode;
mod error;
pub mod fetch;
pub mod rates;
pub mod url;

pub use client::{Builder, Client, DEFAULT_BASE_URL};
pub use currency::Currency;
pub use decode::parse;
pub use error::{Error, Result};
pub use fetch::{Fetch, FetchError, HttpFetch, Response};
pub use rates::Rates;
pub use rust_decimal::Decimal;
pub use url::QueryDate;
