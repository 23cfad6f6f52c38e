//! The rates [`Client`].

use std::{fmt, sync::Arc};

use chrono::NaiveDate;
use log::{Level, LevelFilter};
use rust_decimal::Decimal;

use crate::{
	cache::Cache,
	currency::Currency,
	decode,
	error::{Error, Result},
	fetch::{Fetch, HttpFetch},
	rates::Rates,
	url::{self, QueryDate},
};

/// The daily rates endpoint of the Central Bank of Russia, English edition.
pub const DEFAULT_BASE_URL: &str = "http://www.cbr.ru/scripts/XML_daily_eng.asp";

/// Logs through [`log`] under the `cbr` target, if the client's level allows it.
macro_rules! emit {
	($client:expr, $level:expr, $($arg:tt)+) => {
		if $level <= $client.log_level {
			log::log!(target: "cbr", $level, $($arg)+);
		}
	};
}

/// [`Client`] builder.
///
/// # Examples
/// ```
/// # use cbr::Client;
/// let client = Client::builder()
/// 	.base_url("http://mirror.example/XML_daily.asp")
/// 	.use_cache(false)
/// 	.build()
/// 	.unwrap();
/// assert!(!client.use_cache());
/// ```
pub struct Builder {
	base_url: String,
	fetch: Transport,
	use_cache: bool,
	log_level: LevelFilter,
}

/// The [`Builder`]'s transport choice.
enum Transport {
	Http,
	Custom(Box<dyn Fetch>),
	Absent,
}

impl Builder {
	/// Sets the base URL the `date_req` parameter is appended to.
	pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
		self.base_url = base_url.into();
		self
	}

	/// Sets the transport.
	pub fn fetch(mut self, fetch: impl Fetch + 'static) -> Self {
		self.fetch = Transport::Custom(Box::new(fetch));
		self
	}

	/// Removes the transport; every uncached request fails with [`Error::Configuration`].
	pub fn without_fetch(mut self) -> Self {
		self.fetch = Transport::Absent;
		self
	}

	/// Sets whether daily tables are cached.
	pub fn use_cache(mut self, use_cache: bool) -> Self {
		self.use_cache = use_cache;
		self
	}

	/// Sets the client's log verbosity.
	pub fn log_level(mut self, log_level: LevelFilter) -> Self {
		self.log_level = log_level;
		self
	}

	/// Builds the [`Client`].
	///
	/// Fails if the base URL is empty.
	pub fn build(self) -> Result<Client> {
		if self.base_url.is_empty() {
			return Err(Error::Configuration(EMPTY_BASE_URL));
		}
		Ok(self.into_client())
	}

	fn into_client(self) -> Client {
		let fetch: Option<Box<dyn Fetch>> = match self.fetch {
			Transport::Http => Some(Box::new(HttpFetch::default())),
			Transport::Custom(fetch) => Some(fetch),
			Transport::Absent => None,
		};
		Client {
			base_url: self.base_url,
			fetch,
			use_cache: self.use_cache,
			log_level: self.log_level,
			cache: Cache::default(),
		}
	}
}

impl Default for Builder {
	fn default() -> Self {
		Self {
			base_url: DEFAULT_BASE_URL.to_owned(),
			fetch: Transport::Http,
			use_cache: true,
			log_level: LevelFilter::Warn,
		}
	}
}

const EMPTY_BASE_URL: &str = "empty base URL was provided";
const EMPTY_FETCH: &str = "fetch is empty";

/// Daily exchange rates client.
///
/// Rates are quoted in rubles. Each query blocks while its date's table is fetched, unless the
/// table is already cached. The client is [`Sync`] and can be shared between threads.
///
/// Two threads querying the same uncached date at once may both fetch it; the table stored last
/// wins.
///
/// # Examples
/// ```no_run
/// # use cbr::Client;
/// let client = Client::new();
/// let usd = client.rate("USD", chrono::Local::now())?;
/// println!("1 USD = {usd} RUB");
/// # Ok::<(), cbr::Error>(())
/// ```
pub struct Client {
	base_url: String,
	fetch: Option<Box<dyn Fetch>>,
	use_cache: bool,
	log_level: LevelFilter,
	cache: Cache,
}

impl Client {
	/// Creates a new [`Client`] with the default configuration.
	///
	/// Must not be called inside an async runtime; see [`HttpFetch`].
	pub fn new() -> Self {
		Builder::default().into_client()
	}

	/// Creates a new [`Builder`].
	#[inline] pub fn builder() -> Builder { Builder::default() }

	/// Gets the base URL.
	#[inline] pub fn base_url(&self) -> &str { &self.base_url }
	/// Gets whether daily tables are cached.
	#[inline] pub const fn use_cache(&self) -> bool { self.use_cache }
	/// Gets the client's log verbosity.
	#[inline] pub const fn log_level(&self) -> LevelFilter { self.log_level }

	/// Sets an alternative base URL for a compatible API.
	///
	/// An empty URL is rejected and the current one is kept.
	pub fn set_base_url(&mut self, base_url: &str) -> Result<()> {
		if base_url.is_empty() {
			return Err(Error::Configuration(EMPTY_BASE_URL));
		}
		self.base_url = base_url.to_owned();
		Ok(())
	}

	/// Replaces the transport.
	pub fn set_fetch(&mut self, fetch: impl Fetch + 'static) {
		self.fetch = Some(Box::new(fetch));
	}

	/// Sets the client's log verbosity.
	///
	/// The installed [`log`] backend still applies its own filter.
	pub fn set_log_level(&mut self, log_level: LevelFilter) {
		self.log_level = log_level;
	}

	/// Sets whether daily tables are cached.
	///
	/// Disabling the cache keeps its entries; they are served again once it is re-enabled.
	pub fn set_use_cache(&mut self, use_cache: bool) {
		self.use_cache = use_cache;
	}

	/// Gets how many queries were served from the cache.
	#[inline] pub fn cache_hits(&self) -> usize { self.cache.hits() }

	/// Gets the `date_req` keys of the cached tables, in chronological order.
	#[inline] pub fn cached_dates(&self) -> Vec<String> { self.cache.keys() }

	/// Drops every cached table. [`cache_hits`](Self::cache_hits) is not reset.
	#[inline] pub fn clear_cache(&self) { self.cache.clear() }

	/// Gets the rate of a single unit of the currency, in rubles, as [`f64`].
	pub fn rate(&self, currency: &str, date: impl QueryDate) -> Result<f64> {
		let date = date.query_date();
		emit!(self, Level::Debug, "Fetching the currency rate for {currency} at {}", date.format("%d.%m.%Y"));
		self.currency(currency, date)?.value_f64()
	}

	/// Gets the rate of a single unit of the currency, in rubles, as [`Decimal`].
	pub fn rate_decimal(&self, currency: &str, date: impl QueryDate) -> Result<Decimal> {
		let date = date.query_date();
		emit!(self, Level::Debug, "Fetching the currency rate for {currency} at {} in Decimal", date.format("%d.%m.%Y"));
		self.currency(currency, date)?.value_decimal()
	}

	/// Gets the published rate string of the currency, with a dot as the decimal separator.
	///
	/// Not adjusted by the nominal.
	pub fn rate_string(&self, currency: &str, date: impl QueryDate) -> Result<String> {
		let date = date.query_date();
		emit!(self, Level::Debug, "Fetching the currency rate string for {currency} at {}", date.format("%d.%m.%Y"));
		Ok(self.currency(currency, date)?.value_string())
	}

	/// Gets the full record of the currency.
	pub fn currency_info(&self, currency: &str, date: impl QueryDate) -> Result<Currency> {
		let date = date.query_date();
		emit!(self, Level::Debug, "Fetching the currency info for {currency} at {}", date.format("%d.%m.%Y"));
		self.currency(currency, date)
	}

	/// Gets the whole table for the date.
	pub fn rates_on(&self, date: impl QueryDate) -> Result<Arc<Rates>> {
		self.resolve(date.query_date())
	}

	fn currency(&self, currency: &str, date: NaiveDate) -> Result<Currency> {
		self.resolve(date)?.currency(currency).cloned()
	}

	/// Gets the date's table from the cache, or fetches and caches it.
	fn resolve(&self, date: NaiveDate) -> Result<Arc<Rates>> {
		let key = url::date_req(date);

		if self.use_cache {
			if let Some(rates) = self.cache.get(&key) {
				emit!(self, Level::Info, "Got currency data for {key} from cache");
				return Ok(rates);
			}
		}

		let rates = Arc::new(self.request(&key).map_err(|e| {
			emit!(self, Level::Error, "Error getting currencies: {e}");
			e
		})?);
		if self.use_cache {
			self.cache.insert(key, Arc::clone(&rates));
		}
		Ok(rates)
	}

	/// Fetches and parses the table for the `date_req` value.
	fn request(&self, date_req: &str) -> Result<Rates> {
		let url = url::daily(&self.base_url, date_req);
		emit!(self, Level::Debug, "{url}");
		let Some(fetch) = self.fetch.as_deref() else {
			emit!(self, Level::Error, "Empty fetch function provided");
			return Err(Error::Configuration(EMPTY_FETCH));
		};

		let response = fetch.fetch(&url).map_err(|e| {
			emit!(self, Level::Error, "Error fetching URL: {e}");
			Error::Transport(e)
		})?;
		emit!(self, Level::Debug, "Response status code: {}", response.status);
		if !response.is_success() {
			emit!(self, Level::Error, "Request returned abnormal status code: {}", response.status);
		}

		decode::parse(&response.body).map_err(|e| {
			emit!(self, Level::Error, "Error decoding XML: {e}");
			if let Error::Parse(_) = e {
				emit!(self, Level::Debug, "{}", String::from_utf8_lossy(&response.body));
			}
			e
		})
	}
}

impl Default for Client {
	#[inline] fn default() -> Self { Self::new() }
}

impl fmt::Debug for Client {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Client")
			.field("base_url", &self.base_url)
			.field("fetch", &self.fetch.is_some())
			.field("use_cache", &self.use_cache)
			.field("log_level", &self.log_level)
			.field("cache", &self.cache)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::fetch::{FetchError, Response};

	fn offline() -> Client {
		Client::builder().without_fetch().log_level(LevelFilter::Debug).build().unwrap()
	}

	#[test]
	fn test_set_base_url() {
		let mut client = offline();
		match client.set_base_url("") {
			Err(Error::Configuration(message)) => assert_eq!(message, "empty base URL was provided"),
			other => panic!("unexpected {other:?}"),
		}
		assert_eq!(client.base_url(), DEFAULT_BASE_URL);
		client.set_base_url("http://example.com").unwrap();
		assert_eq!(client.base_url(), "http://example.com");
	}

	#[test]
	fn test_build_empty_base_url() {
		assert!(matches!(Client::builder().base_url("").build(), Err(Error::Configuration(_))));
	}

	#[test]
	fn test_empty_fetch() {
		let client = offline();
		let date = NaiveDate::from_ymd_opt(2022, 12, 16).unwrap();
		match client.rate("CNY", date) {
			Err(Error::Configuration(message)) => assert_eq!(message, "fetch is empty"),
			other => panic!("unexpected {other:?}"),
		}
		assert!(client.cached_dates().is_empty());
	}

	#[test]
	fn test_set_fetch() {
		let mut client = offline();
		client.set_fetch(|_: &str| -> Result<Response, FetchError> { Err(FetchError::new("offline")) });
		let date = NaiveDate::from_ymd_opt(2022, 12, 16).unwrap();
		assert!(matches!(client.rate("USD", date), Err(Error::Transport(_))));
	}

	#[test]
	fn test_set_log_level() {
		let mut client = offline();
		assert_eq!(client.log_level(), LevelFilter::Debug);
		client.set_log_level(LevelFilter::Off);
		assert_eq!(client.log_level(), LevelFilter::Off);
	}
}
