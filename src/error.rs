//! Error types for the fallible boundaries: URL submission, history
//! persistence and browser storage.
//!
//! None of these escape the facades. `ApiClient::generate_api` folds an
//! [`ApiError`] into a failed response and `HistoryStore` masks a
//! [`HistoryError`] with the local fallback.

use thiserror::Error;

/// Failure while validating a URL or talking to the conversion backend.
#[derive(Debug, Error)]
pub enum ApiError {
	/// Nothing was entered.
	#[error("URL required: please enter a website URL")]
	EmptyUrl,
	/// The input does not parse as an absolute URL.
	#[error("Invalid URL: please enter a valid website URL ({0})")]
	InvalidUrl(#[from] url::ParseError),
	/// Parsed, but not something we can fetch.
	#[error("Invalid URL: unsupported scheme `{0}`, use http or https")]
	UnsupportedScheme(String),
	/// Backend answered with a non-2xx status.
	#[error("backend returned HTTP {0}")]
	Status(u16),
	/// Request never completed.
	#[error("could not reach the backend: {0}")]
	Transport(#[from] reqwest::Error),
	/// Backend answered 2xx with a body we could not read.
	#[error("malformed backend response: {0}")]
	Decode(#[from] serde_json::Error),
	/// Backend answered `success: false`.
	#[error("{0}")]
	Rejected(String),
}

impl ApiError {
	/// True for input problems caught before any network round-trip.
	pub fn is_validation(&self) -> bool {
		matches!(
			self,
			ApiError::EmptyUrl | ApiError::InvalidUrl(_) | ApiError::UnsupportedScheme(_)
		)
	}
}

/// Failure of the remote history backend.
#[derive(Debug, Error)]
pub enum HistoryError {
	/// No remote backend configured.
	#[error("remote history is not configured")]
	NotConfigured,
	/// No signed-in user.
	#[error("user is not authenticated")]
	Unauthenticated,
	#[error("history backend returned HTTP {0}")]
	Status(u16),
	#[error("could not reach the history backend: {0}")]
	Transport(#[from] reqwest::Error),
	/// Body of a 2xx reply did not decode as rows.
	#[error("malformed history response: {0}")]
	Decode(#[from] serde_json::Error),
	#[error("history backend returned no data")]
	Empty,
}

/// Failure of a key/value store.
#[derive(Debug, Error)]
pub enum StorageError {
	/// `window.localStorage` is missing or blocked.
	#[error("local storage is unavailable")]
	Unavailable,
	#[error("local storage failed: {0}")]
	Backend(String),
	#[error("stored value is not valid JSON: {0}")]
	Serde(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn validation_errors_are_classified() {
		assert!(ApiError::EmptyUrl.is_validation());
		assert!(ApiError::UnsupportedScheme("ftp".into()).is_validation());
		let parse = url::Url::parse("not a url").unwrap_err();
		assert!(ApiError::InvalidUrl(parse).is_validation());
		assert!(!ApiError::Status(500).is_validation());
		assert!(!ApiError::Rejected("nope".into()).is_validation());
	}

	#[test]
	fn status_message_names_the_code() {
		assert_eq!(ApiError::Status(502).to_string(), "backend returned HTTP 502");
		assert_eq!(
			HistoryError::Status(401).to_string(),
			"history backend returned HTTP 401"
		);
	}
}
