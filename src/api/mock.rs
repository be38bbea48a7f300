//! Stand-in backend used when no backend URL is configured.
//!
//! Answers every request with a sample structured payload and Markdown
//! documentation for an endpoint derived from the submitted URL.

use gloo_timers::future::TimeoutFuture;
use serde_json::{Value, json};

use super::transport::{Transport, TransportResponse};
use crate::error::ApiError;

const ENDPOINT_BASE: &str = "https://api.web2api.com/v1/";

/// Generated endpoint for a site: the URL with everything but ASCII
/// letters and digits stripped.
pub fn endpoint_for(url: &str) -> String {
	let slug: String = url.chars().filter(char::is_ascii_alphanumeric).collect();
	format!("{ENDPOINT_BASE}{slug}")
}

pub struct MockTransport {
	delay_ms: u32,
}

impl MockTransport {
	/// `delay_ms` simulates processing time; zero answers immediately.
	pub fn new(delay_ms: u32) -> Self {
		Self { delay_ms }
	}
}

impl Transport for MockTransport {
	async fn post_json(&self, body: &Value) -> Result<TransportResponse, ApiError> {
		if self.delay_ms > 0 {
			TimeoutFuture::new(self.delay_ms).await;
		}
		let url = body.get("url").and_then(Value::as_str).unwrap_or_default();
		let endpoint = endpoint_for(url);
		let data = sample_payload();
		let reply = json!({
			"success": true,
			"data": data,
			"documentation": documentation(&endpoint, &data),
			"api": endpoint,
		});
		Ok(TransportResponse {
			status: 200,
			body: reply.to_string(),
		})
	}
}

fn sample_payload() -> Value {
	json!({
		"title": "Example Website",
		"description": "This is a sample website with various content",
		"meta": {
			"author": "John Doe",
			"keywords": ["web", "api", "generator"],
		},
		"content": {
			"sections": [
				{
					"heading": "Welcome to our site",
					"paragraphs": [
						"This is the first paragraph of content.",
						"This is another paragraph with important information.",
					],
				},
				{
					"heading": "Features",
					"items": [
						"Feature 1: Amazing functionality",
						"Feature 2: Incredible performance",
						"Feature 3: Outstanding design",
					],
				},
			],
			"footer": {
				"copyright": "© 2023 Example",
				"links": [
					{ "text": "Privacy", "url": "/privacy" },
					{ "text": "Terms", "url": "/terms" },
				],
			},
		},
	})
}

fn documentation(endpoint: &str, data: &Value) -> String {
	let example = serde_json::to_string_pretty(data).unwrap_or_default();
	format!(
		"## API Documentation

### Base URL
`{endpoint}`

### Authentication
All API requests require the use of an API key.

### Endpoints

#### GET /
Returns the full structured content of the website.

#### GET /meta
Returns only the metadata of the website.

#### GET /content
Returns only the content sections of the website.

### Example Request
```
curl -X GET \"{endpoint}\" \\
  -H \"Authorization: Bearer YOUR_API_KEY\"
```

### Example Response
```json
{example}
```
"
	)
}
