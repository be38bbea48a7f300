//! Browser side of the toggle effects: overlay host and spark elements.

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use super::burst::{BurstParticle, LAUNCH_DELAY_MS};
use super::disposer::{Disposer, PendingBurst, PendingTimer, SparkElement};
use super::layer::{DecorParticle, KEYFRAMES_ID, LayerVariant, OVERLAY_ID, OverlayHost};

const OVERLAY_STYLE: &str = "position: fixed; top: 0; left: 0; width: 100%; height: 100%; \
	 pointer-events: none; z-index: -1; overflow: hidden;";

/// [`OverlayHost`] backed by the live document.
pub struct DomOverlay {
	document: Document,
}

impl DomOverlay {
	pub fn new(document: Document) -> Self {
		Self { document }
	}

	/// Host for the window's document, if there is one.
	pub fn current() -> Option<Self> {
		web_sys::window()?.document().map(Self::new)
	}
}

impl OverlayHost for DomOverlay {
	fn keyframes_installed(&self) -> bool {
		self.document.get_element_by_id(KEYFRAMES_ID).is_some()
	}

	fn install_keyframes(&mut self, css: &str) {
		let (Some(head), Ok(style)) = (self.document.head(), self.document.create_element("style"))
		else {
			return;
		};
		style.set_id(KEYFRAMES_ID);
		style.set_text_content(Some(css));
		let _ = head.append_child(&style);
	}

	fn remove_overlay(&mut self) -> bool {
		match self.document.get_element_by_id(OVERLAY_ID) {
			Some(overlay) => {
				overlay.remove();
				true
			}
			None => false,
		}
	}

	fn mount_overlay(&mut self, variant: LayerVariant, particles: &[DecorParticle]) {
		let (Some(body), Ok(container)) = (self.document.body(), self.document.create_element("div"))
		else {
			return;
		};
		container.set_id(OVERLAY_ID);
		let _ = container.set_attribute("style", OVERLAY_STYLE);
		let _ = container.set_attribute("aria-hidden", "true");
		let _ = container.set_attribute(
			"data-variant",
			match variant {
				LayerVariant::Stars => "stars",
				LayerVariant::Bubbles => "bubbles",
			},
		);

		for particle in particles {
			if let Ok(el) = self.document.create_element("div") {
				let _ = el.set_attribute("class", "decor-particle");
				let _ = el.set_attribute("style", &particle.css());
				let _ = container.append_child(&el);
			}
		}
		let _ = body.append_child(&container);
	}
}

impl SparkElement for Element {
	fn is_attached(&self) -> bool {
		self.is_connected()
	}

	fn detach(&self) {
		self.remove();
	}
}

impl PendingTimer for Timeout {
	fn cancel(self) {
		let _ = Timeout::cancel(self);
	}
}

/// [`Disposer`] over live spark elements and gloo timers.
pub type DomDisposer = Disposer<Element, Timeout>;

/// Append sparks to `<body>` and schedule their two-phase animation and
/// removal after `lifetime_ms`.
pub fn launch_burst(
	document: &Document,
	particles: &[BurstParticle],
	lifetime_ms: u32,
	disposer: &mut DomDisposer,
) {
	let Some(body) = document.body() else {
		return;
	};
	let mut burst = PendingBurst::default();

	for particle in particles {
		let Ok(el) = document.create_element("div") else {
			continue;
		};
		let _ = el.set_attribute("style", &particle.initial_style(lifetime_ms));
		if body.append_child(&el).is_err() {
			continue;
		}

		let html: HtmlElement = el.clone().unchecked_into();
		let transform = particle.final_transform();
		burst.timers.push(Timeout::new(LAUNCH_DELAY_MS, move || {
			let style = html.style();
			let _ = style.set_property("transform", &transform);
			let _ = style.set_property("opacity", "0");
		}));

		let doomed = el.clone();
		burst
			.timers
			.push(Timeout::new(lifetime_ms, move || doomed.remove()));
		burst.elements.push(el);
	}

	disposer.track(burst);
}
