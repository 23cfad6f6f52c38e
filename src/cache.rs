//! In-memory [`Cache`] of daily tables.

use std::{
	collections::HashMap,
	sync::{
		atomic::{AtomicUsize, Ordering},
		Arc, Mutex, MutexGuard, PoisonError,
	},
};

use chrono::NaiveDate;

use crate::{rates::Rates, url::DATE_REQ_FORMAT};

/// Daily tables keyed by their `date_req` value, with a hit counter.
///
/// Entries are never evicted. The hit counter only grows.
#[derive(Debug, Default)]
pub(crate) struct Cache {
	entries: Mutex<HashMap<String, Arc<Rates>>>,
	hits: AtomicUsize,
}

impl Cache {
	// Every write is a single whole-table insert, so a poisoned map is still consistent.
	fn entries(&self) -> MutexGuard<'_, HashMap<String, Arc<Rates>>> {
		self.entries.lock().unwrap_or_else(PoisonError::into_inner)
	}

	/// Gets the table for the key, counting a hit if it exists.
	pub(crate) fn get(&self, key: &str) -> Option<Arc<Rates>> {
		let rates = self.entries().get(key).cloned()?;
		self.hits.fetch_add(1, Ordering::Relaxed);
		Some(rates)
	}

	/// Stores the table for the key, replacing any previous one.
	pub(crate) fn insert(&self, key: String, rates: Arc<Rates>) {
		self.entries().insert(key, rates);
	}

	#[inline] pub(crate) fn hits(&self) -> usize { self.hits.load(Ordering::Relaxed) }

	/// Gets the cached keys, in chronological order.
	pub(crate) fn keys(&self) -> Vec<String> {
		let mut keys: Vec<String> = self.entries().keys().cloned().collect();
		keys.sort_by_cached_key(|key| NaiveDate::parse_from_str(key, DATE_REQ_FORMAT).ok());
		keys
	}

	/// Drops every entry. The hit counter is kept.
	pub(crate) fn clear(&self) {
		self.entries().clear();
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_hits() {
		let cache = Cache::default();
		assert!(cache.get("16/12/2022").is_none());
		assert_eq!(cache.hits(), 0);

		cache.insert("16/12/2022".into(), Arc::new(Rates::default()));
		assert!(cache.get("16/12/2022").is_some());
		assert!(cache.get("16/12/2022").is_some());
		assert!(cache.get("24/12/2022").is_none());
		assert_eq!(cache.hits(), 2);
		assert_eq!(cache.keys().len(), 1);
	}

	#[test]
	fn test_shared_table() {
		let cache = Cache::default();
		let rates = Arc::new(Rates::default());
		cache.insert("16/12/2022".into(), Arc::clone(&rates));
		assert!(Arc::ptr_eq(&cache.get("16/12/2022").unwrap(), &rates));
	}

	#[test]
	fn test_clear() {
		let cache = Cache::default();
		cache.insert("24/12/2022".into(), Arc::new(Rates::default()));
		cache.insert("16/12/2022".into(), Arc::new(Rates::default()));
		assert_eq!(cache.keys(), ["16/12/2022", "24/12/2022"]);
		cache.get("16/12/2022");
		cache.clear();
		assert_eq!(cache.keys().len(), 0);
		assert_eq!(cache.hits(), 1);
	}

	#[test]
	fn test_keys_chronological() {
		let cache = Cache::default();
		for key in ["01/01/2023", "16/12/2022", "24/12/2022", "02/01/2023"] {
			cache.insert(key.into(), Arc::new(Rates::default()));
		}
		assert_eq!(cache.keys(), ["16/12/2022", "24/12/2022", "01/01/2023", "02/01/2023"]);
	}
}
