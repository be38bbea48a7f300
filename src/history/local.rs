//! History kept on the device as one JSON array, newest first.

use std::rc::Rc;

use log::warn;

use super::HistoryEntry;
use crate::error::StorageError;
use crate::storage::{HISTORY_KEY, KeyValueStore};

pub struct LocalHistory {
	storage: Rc<dyn KeyValueStore>,
}

impl LocalHistory {
	pub fn new(storage: Rc<dyn KeyValueStore>) -> Self {
		Self { storage }
	}

	/// Stored entries; unreadable data reads as empty.
	pub fn load(&self) -> Vec<HistoryEntry> {
		self.try_load().unwrap_or_else(|e| {
			warn!("web2api: local history unreadable: {}", e);
			Vec::new()
		})
	}

	pub fn prepend(&self, entry: HistoryEntry) {
		let mut entries = self.load();
		entries.insert(0, entry);
		self.store(&entries);
	}

	/// Remove `id`. Unknown ids leave the stored value untouched.
	pub fn remove(&self, id: &str) {
		let mut entries = self.load();
		let before = entries.len();
		entries.retain(|e| e.id != id);
		if entries.len() != before {
			self.store(&entries);
		}
	}

	fn try_load(&self) -> Result<Vec<HistoryEntry>, StorageError> {
		match self.storage.get(HISTORY_KEY)? {
			Some(json) => Ok(serde_json::from_str(&json)?),
			None => Ok(Vec::new()),
		}
	}

	fn store(&self, entries: &[HistoryEntry]) {
		let result = serde_json::to_string(entries)
			.map_err(StorageError::from)
			.and_then(|json| self.storage.set(HISTORY_KEY, &json));
		if let Err(e) = result {
			warn!("web2api: could not write local history: {}", e);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::history::NewHistoryEntry;
	use crate::storage::MemoryStorage;

	#[test]
	fn corrupt_data_reads_as_empty_and_is_replaced() {
		let storage = Rc::new(MemoryStorage::new());
		storage.set(HISTORY_KEY, "{not json").unwrap();
		let local = LocalHistory::new(storage.clone());
		assert!(local.load().is_empty());

		local.prepend(NewHistoryEntry::success("https://a.test", "ep").into_entry());
		assert_eq!(local.load().len(), 1);
	}
}
