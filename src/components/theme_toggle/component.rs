//! Leptos theme toggle button.
//!
//! Clicking fires a spark burst from the button, then flips the theme. An
//! effect keeps the decorative layer in step with the theme; unmounting removes
//! the layer and flushes any bursts still in flight.

use std::cell::RefCell;
use std::rc::Rc;

use fastrand::Rng;
use leptos::prelude::*;
use log::debug;
use send_wrapper::SendWrapper;
use web_sys::MouseEvent;

use super::burst::{Anchor, spawn_burst};
use super::dom::{DomDisposer, DomOverlay, launch_burst};
use super::layer::DecorativeLayer;
use crate::config::ToggleConfig;
use crate::palette::Palette;
use crate::theme::use_theme;

struct ToggleEffects {
	layer: RefCell<Option<DecorativeLayer<DomOverlay>>>,
	disposer: RefCell<DomDisposer>,
	rng: RefCell<Rng>,
}

impl ToggleEffects {
	fn teardown(&self) {
		if let Some(ref mut layer) = *self.layer.borrow_mut() {
			layer.teardown();
		}
		self.disposer.borrow_mut().flush();
	}
}

/// Button that toggles dark/light mode with a spark burst.
///
/// Requires a theme context (see [`crate::theme::provide_theme`]).
#[component]
pub fn ThemeToggle(#[prop(default = ToggleConfig::default())] config: ToggleConfig) -> impl IntoView {
	let theme = use_theme();
	let is_dark = theme.is_dark;
	let button_ref = NodeRef::<leptos::html::Button>::new();

	let effects = Rc::new(ToggleEffects {
		layer: RefCell::new(DomOverlay::current().map(|host| {
			DecorativeLayer::new(
				host,
				config.star_count,
				config.bubble_count,
				Palette::light().bubbles,
			)
		})),
		disposer: RefCell::new(DomDisposer::default()),
		rng: RefCell::new(Rng::new()),
	});

	let effects_layer = effects.clone();
	Effect::new(move |_| {
		let dark = is_dark.get();
		if let Some(ref mut layer) = *effects_layer.layer.borrow_mut() {
			layer.sync(dark);
		}
	});

	let (effects_click, count, lifetime) =
		(effects.clone(), config.burst_count, config.burst_lifetime_ms);
	let on_click = move |_: MouseEvent| {
		let dark = is_dark.get_untracked();
		if let (Some(button), Some(document)) = (
			button_ref.get_untracked(),
			web_sys::window().and_then(|w| w.document()),
		) {
			let rect = button.get_bounding_client_rect();
			let anchor = Anchor {
				left: rect.left(),
				top: rect.top(),
				width: rect.width(),
				height: rect.height(),
			};
			let particles = spawn_burst(
				&anchor,
				count,
				&Palette::for_theme(dark).burst,
				&mut effects_click.rng.borrow_mut(),
			);
			let mut disposer = effects_click.disposer.borrow_mut();
			launch_burst(&document, &particles, lifetime, &mut disposer);
			debug!(
				"web2api: burst of {} sparks, {} bursts in flight",
				particles.len(),
				disposer.pending()
			);
		}
		theme.toggle();
	};

	let effects_cleanup = SendWrapper::new(effects);
	on_cleanup(move || effects_cleanup.teardown());

	view! {
		<button
			node_ref=button_ref
			class="theme-toggle"
			aria-label="Toggle theme"
			on:click=on_click
		>
			{move || if is_dark.get() { "\u{263E}" } else { "\u{2600}" }}
		</button>
	}
}
