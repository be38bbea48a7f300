//! Website-to-API conversion facade.
//!
//! [`ApiClient::generate_api`] validates the URL, makes one POST to the
//! backend and normalizes whatever happens into an [`ApiResponse`]. It never
//! returns an error: failures come back as `success: false` with a message.
//! [`ApiClient::try_generate`] exposes the typed error for callers that care
//! which class of failure occurred.

mod mock;
mod transport;

use log::{debug, error};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use url::Url;

pub use mock::{MockTransport, endpoint_for};
pub use transport::{Backend, HttpTransport, Transport, TransportResponse};

use crate::config::AppConfig;
use crate::error::ApiError;

/// Normalized result of a conversion request.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
	pub success: bool,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub data: Option<Value>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub documentation: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub api_endpoint: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
}

impl ApiResponse {
	pub fn failure(message: impl Into<String>) -> Self {
		Self {
			success: false,
			error: Some(message.into()),
			..Self::default()
		}
	}
}

/// Wire shape of the backend reply.
#[derive(Debug, Deserialize)]
struct BackendReply {
	success: bool,
	#[serde(default)]
	data: Option<Value>,
	#[serde(default)]
	documentation: Option<String>,
	#[serde(default)]
	api: Option<String>,
	#[serde(default)]
	error: Option<String>,
}

/// Check that `input` is an absolute http(s) URL.
pub fn validate_url(input: &str) -> Result<Url, ApiError> {
	let input = input.trim();
	if input.is_empty() {
		return Err(ApiError::EmptyUrl);
	}
	let url = Url::parse(input)?;
	match url.scheme() {
		"http" | "https" => Ok(url),
		other => Err(ApiError::UnsupportedScheme(other.to_string())),
	}
}

/// Client for the conversion backend.
pub struct ApiClient<T> {
	transport: T,
}

impl ApiClient<Backend> {
	/// Real backend if configured, otherwise the mock.
	pub fn from_config(config: &AppConfig) -> Self {
		let backend = match &config.backend_url {
			Some(url) => Backend::Http(HttpTransport::new(url.clone())),
			None => Backend::Mock(MockTransport::new(config.mock_delay_ms)),
		};
		Self::new(backend)
	}
}

impl<T: Transport> ApiClient<T> {
	pub fn new(transport: T) -> Self {
		Self { transport }
	}

	/// Validate, call the backend once, and decode the reply.
	pub async fn try_generate(&self, url: &str) -> Result<ApiResponse, ApiError> {
		validate_url(url)?;
		// The backend sees the URL as typed, minus surrounding whitespace.
		let reply = self
			.transport
			.post_json(&json!({ "url": url.trim() }))
			.await?;

		if !(200..300).contains(&reply.status) {
			return Err(ApiError::Status(reply.status));
		}

		let reply: BackendReply = serde_json::from_str(&reply.body)?;
		if !reply.success {
			return Err(ApiError::Rejected(
				reply
					.error
					.filter(|e| !e.trim().is_empty())
					.unwrap_or_else(|| "Failed to generate API".to_string()),
			));
		}

		Ok(ApiResponse {
			success: true,
			data: reply.data,
			documentation: reply.documentation,
			api_endpoint: reply.api,
			error: None,
		})
	}

	/// Like [`Self::try_generate`], with every failure folded into the response.
	pub async fn generate_api(&self, url: &str) -> ApiResponse {
		match self.try_generate(url).await {
			Ok(response) => response,
			Err(e) => {
				if e.is_validation() {
					debug!("web2api: rejected input {:?}: {}", url, e);
				} else {
					error!("web2api: API generation failed for {}: {}", url, e);
				}
				ApiResponse::failure(e.to_string())
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use std::cell::{Cell, RefCell};

	use futures::executor::block_on;

	use super::*;

	/// Replies with a canned status and body, counting calls.
	struct Canned {
		status: u16,
		body: String,
		calls: Cell<usize>,
		last_body: RefCell<Option<Value>>,
	}

	impl Canned {
		fn new(status: u16, body: &str) -> Self {
			Self {
				status,
				body: body.to_string(),
				calls: Cell::new(0),
				last_body: RefCell::new(None),
			}
		}
	}

	impl Transport for &Canned {
		async fn post_json(&self, body: &Value) -> Result<TransportResponse, ApiError> {
			self.calls.set(self.calls.get() + 1);
			*self.last_body.borrow_mut() = Some(body.clone());
			Ok(TransportResponse {
				status: self.status,
				body: self.body.clone(),
			})
		}
	}

	#[test]
	fn validation_accepts_http_and_https_only() {
		assert!(validate_url("https://example.com").is_ok());
		assert!(validate_url("  http://example.com/page  ").is_ok());
		assert!(matches!(validate_url(""), Err(ApiError::EmptyUrl)));
		assert!(matches!(validate_url("   "), Err(ApiError::EmptyUrl)));
		assert!(matches!(validate_url("not a url"), Err(ApiError::InvalidUrl(_))));
		assert!(matches!(
			validate_url("ftp://example.com"),
			Err(ApiError::UnsupportedScheme(s)) if s == "ftp"
		));
	}

	#[test]
	fn malformed_url_never_reaches_the_network() {
		let transport = Canned::new(200, r#"{"success":true}"#);
		let client = ApiClient::new(&transport);

		let err = block_on(client.try_generate("not a url")).unwrap_err();
		assert!(err.is_validation());

		let response = block_on(client.generate_api("not a url"));
		assert!(!response.success);
		assert!(response.error.unwrap().starts_with("Invalid URL"));
		assert_eq!(transport.calls.get(), 0);
	}

	#[test]
	fn server_error_becomes_failed_response() {
		let transport = Canned::new(500, "Internal Server Error");
		let client = ApiClient::new(&transport);

		assert!(matches!(
			block_on(client.try_generate("https://example.com")),
			Err(ApiError::Status(500))
		));

		let response = block_on(client.generate_api("https://example.com"));
		assert!(!response.success);
		assert!(!response.error.unwrap_or_default().is_empty());
		assert_eq!(transport.calls.get(), 2);
	}

	#[test]
	fn success_maps_api_field_to_endpoint() {
		let transport = Canned::new(
			200,
			r###"{"success":true,"documentation":"## Docs","api":"https://api.test/v1/x"}"###,
		);
		let client = ApiClient::new(&transport);
		let response = block_on(client.generate_api("https://example.com"));

		assert!(response.success);
		assert_eq!(response.documentation.as_deref(), Some("## Docs"));
		assert_eq!(response.api_endpoint.as_deref(), Some("https://api.test/v1/x"));
		assert_eq!(response.error, None);
		assert_eq!(
			transport.last_body.borrow().as_ref(),
			Some(&json!({ "url": "https://example.com" }))
		);
	}

	#[test]
	fn backend_reported_failure_and_garbage_body() {
		let rejected = Canned::new(200, r#"{"success":false,"error":"site blocked"}"#);
		let response = block_on(ApiClient::new(&rejected).generate_api("https://example.com"));
		assert_eq!(response, ApiResponse::failure("site blocked"));

		let blank = Canned::new(200, r#"{"success":false,"error":"  "}"#);
		let response = block_on(ApiClient::new(&blank).generate_api("https://example.com"));
		assert_eq!(response, ApiResponse::failure("Failed to generate API"));

		let silent = Canned::new(200, r#"{"success":false}"#);
		let response = block_on(ApiClient::new(&silent).generate_api("https://example.com"));
		assert_eq!(response, ApiResponse::failure("Failed to generate API"));

		let garbage = Canned::new(200, "<html>");
		let response = block_on(ApiClient::new(&garbage).generate_api("https://example.com"));
		assert!(!response.success);
		assert!(response.error.unwrap().starts_with("malformed backend response"));
	}

	#[test]
	fn mock_backend_round_trip() {
		let client = ApiClient::new(MockTransport::new(0));
		let response = block_on(client.generate_api("https://example.com"));
		assert!(response.success);
		assert_eq!(
			response.api_endpoint.as_deref(),
			Some("https://api.web2api.com/v1/httpsexamplecom")
		);
		assert!(response.documentation.unwrap().contains("## API Documentation"));
		assert!(response.data.is_some());
	}

	#[test]
	fn backend_receives_the_url_as_typed() {
		let transport = Canned::new(200, r#"{"success":true}"#);
		let client = ApiClient::new(&transport);
		block_on(client.generate_api("  HTTPS://Example.COM  "));
		assert_eq!(
			transport.last_body.borrow().as_ref(),
			Some(&json!({ "url": "HTTPS://Example.COM" }))
		);

		let mock = ApiClient::new(MockTransport::new(0));
		let response = block_on(mock.generate_api("HTTPS://Example.COM"));
		assert_eq!(
			response.api_endpoint.as_deref(),
			Some("https://api.web2api.com/v1/HTTPSExampleCOM")
		);
	}
}
