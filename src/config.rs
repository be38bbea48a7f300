//! Runtime configuration.
//!
//! Read once at startup from a `<script id="app-config" type="application/json">`
//! element. Every field has a default, so a page without the element (or with
//! a partial one) still boots with the mock backend and local-only history.

use log::{info, warn};
use serde::Deserialize;
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

/// Tuning for the particle field.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
	/// Hard cap on particle count; the link scan is O(n²) per frame.
	pub max_particles: usize,
	/// One particle per this many pixels of viewport width.
	pub density_divisor: f64,
	/// Particles closer than this are linked.
	pub link_distance: f64,
	/// Pointer influence radius.
	pub pointer_radius: f64,
	/// Scales the pointer impulse.
	pub pointer_damping: f64,
	/// Distances below this are clamped before the inverse-distance impulse.
	pub pointer_min_distance: f64,
	pub line_width: f64,
	/// Opacity of the whole canvas element.
	pub canvas_opacity: f64,
}

impl Default for FieldConfig {
	fn default() -> Self {
		Self {
			max_particles: 150,
			density_divisor: 10.0,
			link_distance: 150.0,
			pointer_radius: 100.0,
			pointer_damping: 0.2,
			pointer_min_distance: 1.0,
			line_width: 0.5,
			canvas_opacity: 0.7,
		}
	}
}

/// Tuning for the theme toggle effects.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ToggleConfig {
	pub burst_count: usize,
	/// Burst particles are removed after this long.
	pub burst_lifetime_ms: u32,
	pub star_count: usize,
	pub bubble_count: usize,
}

impl Default for ToggleConfig {
	fn default() -> Self {
		Self {
			burst_count: 20,
			burst_lifetime_ms: 1000,
			star_count: 50,
			bubble_count: 15,
		}
	}
}

/// Top-level application configuration.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
	/// Conversion backend. `None` selects the built-in mock.
	pub backend_url: Option<String>,
	/// Artificial latency of the mock backend.
	pub mock_delay_ms: u32,
	pub supabase_url: Option<String>,
	pub supabase_anon_key: Option<String>,
	/// Session of the signed-in user, if any.
	pub access_token: Option<String>,
	pub user_id: Option<String>,
	pub field: FieldConfig,
	pub toggle: ToggleConfig,
}

impl Default for AppConfig {
	fn default() -> Self {
		Self {
			backend_url: None,
			mock_delay_ms: 3000,
			supabase_url: None,
			supabase_anon_key: None,
			access_token: None,
			user_id: None,
			field: FieldConfig::default(),
			toggle: ToggleConfig::default(),
		}
	}
}

impl AppConfig {
	/// Parse configuration JSON. Missing fields take their defaults.
	pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(json)
	}
}

/// Load configuration from the `app-config` script element.
pub fn load_config() -> AppConfig {
	let Some(json_text) = config_script_text() else {
		info!("web2api: no app-config element, using defaults");
		return AppConfig::default();
	};

	match AppConfig::from_json(&json_text) {
		Ok(config) => {
			info!(
				"web2api: config loaded (backend: {}, remote history: {})",
				config.backend_url.as_deref().unwrap_or("mock"),
				config.supabase_url.is_some()
			);
			config
		}
		Err(e) => {
			warn!("web2api: failed to parse app-config, using defaults: {}", e);
			AppConfig::default()
		}
	}
}

fn config_script_text() -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("app-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}
