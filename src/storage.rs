//! String key/value persistence.
//!
//! The theme flag and the local history fallback both live here. In the
//! browser this is `window.localStorage`; tests use [`MemoryStorage`].

use std::cell::RefCell;
use std::collections::HashMap;

use web_sys::Storage;

use crate::error::StorageError;

/// Storage key for the persisted theme (`"dark"` or `"light"`).
pub const THEME_KEY: &str = "theme";

/// Storage key for the local history fallback (a JSON array, newest first).
pub const HISTORY_KEY: &str = "apiHistory";

/// Minimal string key/value store.
pub trait KeyValueStore {
	fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
	fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// `window.localStorage`, looked up on every call so a blocked store
/// degrades to [`StorageError::Unavailable`] instead of failing at startup.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
	fn local() -> Result<Storage, StorageError> {
		web_sys::window()
			.and_then(|w| w.local_storage().ok().flatten())
			.ok_or(StorageError::Unavailable)
	}
}

impl KeyValueStore for BrowserStorage {
	fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
		Self::local()?
			.get_item(key)
			.map_err(|e| StorageError::Backend(format!("{e:?}")))
	}

	fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
		Self::local()?
			.set_item(key, value)
			.map_err(|e| StorageError::Backend(format!("{e:?}")))
	}
}

/// In-process store, used off-browser and in tests.
#[derive(Debug, Default)]
pub struct MemoryStorage {
	items: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
	pub fn new() -> Self {
		Self::default()
	}
}

impl KeyValueStore for MemoryStorage {
	fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
		Ok(self.items.borrow().get(key).cloned())
	}

	fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
		self.items
			.borrow_mut()
			.insert(key.to_string(), value.to_string());
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn memory_storage_overwrites_per_key() {
		let store = MemoryStorage::new();
		assert_eq!(store.get(THEME_KEY).unwrap(), None);
		store.set(THEME_KEY, "dark").unwrap();
		store.set(THEME_KEY, "light").unwrap();
		assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("light"));
		assert_eq!(store.get(HISTORY_KEY).unwrap(), None);
	}
}
