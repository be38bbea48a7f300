//! Per-user history of generated APIs.
//!
//! [`HistoryStore`] talks to a [`RemoteHistory`] and falls back to
//! [`LocalHistory`] whenever the remote call fails, including when nobody is
//! signed in. The return shapes are identical either way.

mod local;
mod supabase;

use chrono::{DateTime, Utc};
use log::warn;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use local::LocalHistory;
pub use supabase::{Session, SupabaseHistory};

use crate::error::HistoryError;

/// Outcome recorded for a conversion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryStatus {
	Success,
	Error,
	Pending,
}

impl HistoryStatus {
	pub fn label(self) -> &'static str {
		match self {
			HistoryStatus::Success => "success",
			HistoryStatus::Error => "error",
			HistoryStatus::Pending => "pending",
		}
	}
}

/// A stored history row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
	pub id: String,
	pub url: String,
	pub created_at: DateTime<Utc>,
	pub api_endpoint: String,
	pub status: HistoryStatus,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
}

/// A row before it has an id and timestamp.
#[derive(Clone, Debug, PartialEq)]
pub struct NewHistoryEntry {
	pub url: String,
	pub api_endpoint: String,
	pub status: HistoryStatus,
	pub error: Option<String>,
}

impl NewHistoryEntry {
	pub fn success(url: impl Into<String>, api_endpoint: impl Into<String>) -> Self {
		Self {
			url: url.into(),
			api_endpoint: api_endpoint.into(),
			status: HistoryStatus::Success,
			error: None,
		}
	}

	/// Stamp with a fresh id and the current time.
	pub fn into_entry(self) -> HistoryEntry {
		HistoryEntry {
			id: Uuid::new_v4().to_string(),
			url: self.url,
			created_at: Utc::now(),
			api_endpoint: self.api_endpoint,
			status: self.status,
			error: self.error,
		}
	}
}

/// Primary persistence backend.
#[allow(async_fn_in_trait)]
pub trait RemoteHistory {
	async fn insert(&self, entry: &NewHistoryEntry) -> Result<HistoryEntry, HistoryError>;
	/// Entries of the current user, newest first.
	async fn list(&self) -> Result<Vec<HistoryEntry>, HistoryError>;
	async fn delete(&self, id: &str) -> Result<(), HistoryError>;
}

/// History facade with transparent local fallback.
pub struct HistoryStore<R> {
	remote: R,
	local: LocalHistory,
}

impl<R: RemoteHistory> HistoryStore<R> {
	pub fn new(remote: R, local: LocalHistory) -> Self {
		Self { remote, local }
	}

	pub async fn save(&self, entry: NewHistoryEntry) -> HistoryEntry {
		match self.remote.insert(&entry).await {
			Ok(saved) => saved,
			Err(e) => {
				warn!("web2api: saving history remotely failed, keeping it locally: {}", e);
				let saved = entry.into_entry();
				self.local.prepend(saved.clone());
				saved
			}
		}
	}

	pub async fn list(&self) -> Vec<HistoryEntry> {
		match self.remote.list().await {
			Ok(entries) => entries,
			Err(e) => {
				warn!("web2api: listing remote history failed, reading local copy: {}", e);
				self.local.load()
			}
		}
	}

	pub async fn delete(&self, id: &str) {
		if let Err(e) = self.remote.delete(id).await {
			warn!("web2api: deleting remote history failed, deleting locally: {}", e);
			self.local.remove(id);
		}
	}
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;
	use std::rc::Rc;

	use chrono::TimeZone;
	use futures::executor::block_on;

	use super::*;
	use crate::storage::{HISTORY_KEY, KeyValueStore, MemoryStorage};

	/// Remote that is always unreachable.
	struct Offline;

	impl RemoteHistory for Offline {
		async fn insert(&self, _entry: &NewHistoryEntry) -> Result<HistoryEntry, HistoryError> {
			Err(HistoryError::Unauthenticated)
		}

		async fn list(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
			Err(HistoryError::Status(503))
		}

		async fn delete(&self, _id: &str) -> Result<(), HistoryError> {
			Err(HistoryError::Status(503))
		}
	}

	/// Remote that works, backed by a vector.
	#[derive(Default)]
	struct Online {
		rows: RefCell<Vec<HistoryEntry>>,
	}

	impl RemoteHistory for Online {
		async fn insert(&self, entry: &NewHistoryEntry) -> Result<HistoryEntry, HistoryError> {
			let saved = HistoryEntry {
				id: format!("remote-{}", self.rows.borrow().len()),
				..entry.clone().into_entry()
			};
			self.rows.borrow_mut().insert(0, saved.clone());
			Ok(saved)
		}

		async fn list(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
			Ok(self.rows.borrow().clone())
		}

		async fn delete(&self, id: &str) -> Result<(), HistoryError> {
			self.rows.borrow_mut().retain(|e| e.id != id);
			Ok(())
		}
	}

	fn local() -> (Rc<MemoryStorage>, LocalHistory) {
		let storage = Rc::new(MemoryStorage::new());
		(storage.clone(), LocalHistory::new(storage))
	}

	#[test]
	fn offline_save_lands_in_local_store_newest_first() {
		let (_, local) = local();
		let store = HistoryStore::new(Offline, local);

		let first = block_on(store.save(NewHistoryEntry::success("https://a.test", "ep-a")));
		let second = block_on(store.save(NewHistoryEntry::success("https://b.test", "ep-b")));
		assert_ne!(first.id, second.id);

		let listed = block_on(store.list());
		assert_eq!(listed, vec![second, first]);
	}

	#[test]
	fn offline_delete_of_unknown_id_leaves_store_unchanged() {
		let (storage, local) = local();
		let store = HistoryStore::new(Offline, local);
		block_on(store.save(NewHistoryEntry::success("https://a.test", "ep-a")));
		let before = storage.get(HISTORY_KEY).unwrap();

		block_on(store.delete("no-such-id"));
		assert_eq!(storage.get(HISTORY_KEY).unwrap(), before);
		assert_eq!(block_on(store.list()).len(), 1);
	}

	#[test]
	fn offline_delete_removes_entry() {
		let (_, local) = local();
		let store = HistoryStore::new(Offline, local);
		let saved = block_on(store.save(NewHistoryEntry::success("https://a.test", "ep-a")));
		block_on(store.delete(&saved.id));
		assert!(block_on(store.list()).is_empty());
	}

	#[test]
	fn online_store_never_touches_local() {
		let (storage, local) = local();
		let store = HistoryStore::new(Online::default(), local);

		let saved = block_on(store.save(NewHistoryEntry::success("https://a.test", "ep-a")));
		assert_eq!(saved.id, "remote-0");
		assert_eq!(block_on(store.list()), vec![saved.clone()]);
		block_on(store.delete(&saved.id));
		assert!(block_on(store.list()).is_empty());
		assert_eq!(storage.get(HISTORY_KEY).unwrap(), None);
	}

	#[test]
	fn entry_serializes_like_the_web_client() {
		let entry = HistoryEntry {
			id: "abc".into(),
			url: "https://a.test".into(),
			created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
			api_endpoint: "ep".into(),
			status: HistoryStatus::Pending,
			error: None,
		};
		let json = serde_json::to_value(&entry).unwrap();
		assert_eq!(json["apiEndpoint"], "ep");
		assert_eq!(json["status"], "pending");
		assert_eq!(json["createdAt"], "2024-05-01T12:00:00Z");
		assert!(json.get("error").is_none());
	}
}
