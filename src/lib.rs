//! web2api: browser front-end that turns a website URL into a generated API.
//!
//! Behind the dashboard sit a canvas particle field and a theme toggle with
//! spark bursts and a stars/bubbles layer, all driven by one theme store.
//! Conversions go through [`api::ApiClient`] and are recorded by
//! [`history::HistoryStore`], which falls back to local storage.

use std::rc::Rc;

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info};

pub mod api;
pub mod components;
pub mod config;
pub mod error;
pub mod history;
pub mod palette;
pub mod storage;
pub mod theme;

pub use components::dashboard::Dashboard;
pub use components::particle_field::{ParticleField, ParticleFieldCanvas};
pub use components::theme_toggle::ThemeToggle;
pub use config::{AppConfig, load_config};
pub use theme::{ThemeContext, ThemeStore, provide_theme, use_theme};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("web2api: logging initialized");
}

/// Main application component.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_config();
	let theme = provide_theme(Rc::new(storage::BrowserStorage));
	let field = config.field.clone();
	let toggle = config.toggle.clone();

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Web2Api" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<ParticleFieldCanvas dark=theme.is_dark config=field />
		<div class="app">
			<header class="app-header theme-transition-item">
				<h1>"Web2Api"</h1>
				<p class="subtitle">"Turn any website into an API."</p>
				<ThemeToggle config=toggle />
			</header>
			<Dashboard config=config />
		</div>
	}
}
