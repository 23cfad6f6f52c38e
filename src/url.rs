//! URL building

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};

/// The `date_req` format, which doubles as the cache key.
pub const DATE_REQ_FORMAT: &str = "%d/%m/%Y";

/// A point in time the rates are requested for.
///
/// Only the calendar date matters; the time of day is ignored.
pub trait QueryDate {
	/// Gets the calendar date.
	fn query_date(&self) -> NaiveDate;
}

impl QueryDate for NaiveDate {
	#[inline] fn query_date(&self) -> NaiveDate { *self }
}

impl QueryDate for NaiveDateTime {
	#[inline] fn query_date(&self) -> NaiveDate { self.date() }
}

/// The date in the value's own time zone.
impl<Tz: TimeZone> QueryDate for DateTime<Tz> {
	#[inline] fn query_date(&self) -> NaiveDate { self.date_naive() }
}

impl<T: QueryDate + ?Sized> QueryDate for &T {
	#[inline] fn query_date(&self) -> NaiveDate { (**self).query_date() }
}

/// Formats the `date_req` parameter value.
pub fn date_req(date: NaiveDate) -> String {
	date.format(DATE_REQ_FORMAT).to_string()
}

/// Builds the daily table URL.
///
/// The `date_req` parameter is appended to any query the base URL already has.
pub(crate) fn daily(base_url: &str, date_req: &str) -> String {
	let sep = if base_url.contains('?') { '&' } else { '?' };
	let mut url = String::with_capacity(base_url.len() + "?date_req=".len() + date_req.len());
	url.push_str(base_url);
	url.push(sep);
	url.push_str("date_req=");
	url.push_str(date_req);
	url
}

#[cfg(test)]
mod tests {
	use chrono::{FixedOffset, Utc};

	use super::*;

	#[test]
	fn test_date_req() {
		let date = NaiveDate::from_ymd_opt(2022, 12, 6).unwrap();
		assert_eq!(date_req(date), "06/12/2022");
	}

	#[test]
	fn test_time_of_day_ignored() {
		let morning = NaiveDate::from_ymd_opt(2022, 12, 16).unwrap().and_hms_opt(1, 1, 1).unwrap();
		let evening = NaiveDate::from_ymd_opt(2022, 12, 16).unwrap().and_hms_opt(23, 59, 59).unwrap();
		assert_eq!(morning.query_date(), evening.query_date());
	}

	#[test]
	fn test_time_zone() {
		let utc = Utc.with_ymd_and_hms(2022, 12, 15, 22, 30, 0).unwrap();
		let moscow = utc.with_timezone(&FixedOffset::east_opt(3 * 3600).unwrap());
		assert_eq!(date_req(utc.query_date()), "15/12/2022");
		assert_eq!(date_req(moscow.query_date()), "16/12/2022");
	}

	#[test]
	fn test_daily() {
		assert_eq!(
			daily("http://www.cbr.ru/scripts/XML_daily_eng.asp", "16/12/2022"),
			"http://www.cbr.ru/scripts/XML_daily_eng.asp?date_req=16/12/2022",
		);
		assert_eq!(
			daily("http://mirror.test/daily?lang=en", "16/12/2022"),
			"http://mirror.test/daily?lang=en&date_req=16/12/2022",
		);
	}
}
