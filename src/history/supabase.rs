//! Remote history in a Supabase (PostgREST) `api_history` table.
//!
//! Rows carry `id`, `url`, `api_endpoint`, `status`, `error`, `created_at`
//! and `user_id`. Listing filters by the signed-in user and orders by
//! `created_at` descending.

use chrono::{DateTime, Utc};
use reqwest::{RequestBuilder, Response};
use serde::{Deserialize, Serialize};

use super::{HistoryEntry, HistoryStatus, NewHistoryEntry, RemoteHistory};
use crate::config::AppConfig;
use crate::error::HistoryError;

/// Signed-in user.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
	pub user_id: String,
	pub access_token: String,
}

#[derive(Debug, Deserialize)]
struct HistoryRow {
	id: String,
	url: String,
	api_endpoint: String,
	status: HistoryStatus,
	#[serde(default)]
	error: Option<String>,
	created_at: DateTime<Utc>,
}

impl From<HistoryRow> for HistoryEntry {
	fn from(row: HistoryRow) -> Self {
		HistoryEntry {
			id: row.id,
			url: row.url,
			created_at: row.created_at,
			api_endpoint: row.api_endpoint,
			status: row.status,
			error: row.error,
		}
	}
}

#[derive(Debug, Serialize)]
struct InsertRow<'a> {
	url: &'a str,
	api_endpoint: &'a str,
	status: HistoryStatus,
	error: Option<&'a str>,
	user_id: &'a str,
}

pub struct SupabaseHistory {
	http: reqwest::Client,
	project: Option<(String, String)>,
	session: Option<Session>,
}

impl SupabaseHistory {
	/// `project` is the `(base_url, anon_key)` pair; `None` disables the
	/// remote and every call fails with [`HistoryError::NotConfigured`].
	pub fn new(project: Option<(String, String)>, session: Option<Session>) -> Self {
		Self {
			http: reqwest::Client::new(),
			project: project.map(|(url, key)| (url.trim_end_matches('/').to_string(), key)),
			session,
		}
	}

	pub fn from_config(config: &AppConfig) -> Self {
		let project = config.supabase_url.clone().zip(config.supabase_anon_key.clone());
		let session = config
			.user_id
			.clone()
			.zip(config.access_token.clone())
			.map(|(user_id, access_token)| Session {
				user_id,
				access_token,
			});
		Self::new(project, session)
	}

	fn table_url(&self) -> Result<String, HistoryError> {
		let (base, _) = self.project.as_ref().ok_or(HistoryError::NotConfigured)?;
		Ok(format!("{base}/rest/v1/api_history"))
	}

	/// Attach project key and user token; fails if either is missing.
	fn authorize(&self, rb: RequestBuilder) -> Result<(RequestBuilder, &Session), HistoryError> {
		let (_, key) = self.project.as_ref().ok_or(HistoryError::NotConfigured)?;
		let session = self.session.as_ref().ok_or(HistoryError::Unauthenticated)?;
		Ok((
			rb.header("apikey", key.as_str())
				.header("Authorization", format!("Bearer {}", session.access_token)),
			session,
		))
	}
}

fn check(res: Response) -> Result<Response, HistoryError> {
	if res.status().is_success() {
		Ok(res)
	} else {
		Err(HistoryError::Status(res.status().as_u16()))
	}
}

async fn read_rows(res: Response) -> Result<Vec<HistoryEntry>, HistoryError> {
	let body = check(res)?.text().await?;
	decode_rows(&body)
}

fn decode_rows(body: &str) -> Result<Vec<HistoryEntry>, HistoryError> {
	let rows: Vec<HistoryRow> = serde_json::from_str(body)?;
	Ok(rows.into_iter().map(HistoryEntry::from).collect())
}

impl RemoteHistory for SupabaseHistory {
	async fn insert(&self, entry: &NewHistoryEntry) -> Result<HistoryEntry, HistoryError> {
		let (rb, session) = self.authorize(self.http.post(self.table_url()?))?;
		let row = InsertRow {
			url: &entry.url,
			api_endpoint: &entry.api_endpoint,
			status: entry.status,
			error: entry.error.as_deref(),
			user_id: &session.user_id,
		};
		let res = rb
			.header("Prefer", "return=representation")
			.json(&row)
			.send()
			.await?;
		read_rows(res)
			.await?
			.into_iter()
			.next()
			.ok_or(HistoryError::Empty)
	}

	async fn list(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
		let (rb, session) = self.authorize(self.http.get(self.table_url()?))?;
		let res = rb
			.query(&[
				("select", "*".to_string()),
				("user_id", format!("eq.{}", session.user_id)),
				("order", "created_at.desc".to_string()),
			])
			.send()
			.await?;
		read_rows(res).await
	}

	async fn delete(&self, id: &str) -> Result<(), HistoryError> {
		let (rb, _) = self.authorize(self.http.delete(self.table_url()?))?;
		let res = rb.query(&[("id", format!("eq.{id}"))]).send().await?;
		check(res)?;
		Ok(())
	}
}
