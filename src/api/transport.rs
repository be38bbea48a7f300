//! How a conversion request reaches a backend.

use serde_json::Value;

use super::mock::MockTransport;
use crate::error::ApiError;

/// Raw reply: status code and body text.
#[derive(Clone, Debug, PartialEq)]
pub struct TransportResponse {
	pub status: u16,
	pub body: String,
}

/// Sends a JSON body to the conversion backend.
#[allow(async_fn_in_trait)]
pub trait Transport {
	async fn post_json(&self, body: &Value) -> Result<TransportResponse, ApiError>;
}

/// `POST <backend>/` over reqwest (fetch, in the browser).
pub struct HttpTransport {
	http: reqwest::Client,
	endpoint: String,
}

impl HttpTransport {
	pub fn new(base_url: String) -> Self {
		let endpoint = format!("{}/", base_url.trim_end_matches('/'));
		Self {
			http: reqwest::Client::new(),
			endpoint,
		}
	}

	pub fn endpoint(&self) -> &str {
		&self.endpoint
	}
}

impl Transport for HttpTransport {
	async fn post_json(&self, body: &Value) -> Result<TransportResponse, ApiError> {
		let res = self.http.post(&self.endpoint).json(body).send().await?;
		let status = res.status().as_u16();
		let body = res.text().await?;
		Ok(TransportResponse { status, body })
	}
}

/// Backend chosen at startup.
pub enum Backend {
	Http(HttpTransport),
	Mock(MockTransport),
}

impl Transport for Backend {
	async fn post_json(&self, body: &Value) -> Result<TransportResponse, ApiError> {
		match self {
			Backend::Http(t) => t.post_json(body).await,
			Backend::Mock(t) => t.post_json(body).await,
		}
	}
}
