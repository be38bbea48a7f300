//! [`ThemeEnvironment`] for the browser: `matchMedia`, the `dark` class on
//! `<html>`, and the staggered fade of `.theme-transition-item` elements.

use std::cell::RefCell;

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use super::store::ThemeEnvironment;

/// Delay between consecutive items of the staggered transition.
const STAGGER_STEP_MS: u32 = 50;

/// Elements with this class fade out and back in on every theme change.
const TRANSITION_ITEM_SELECTOR: &str = ".theme-transition-item";

#[derive(Default)]
pub struct BrowserTheme {
	/// Timers of the running stagger; replacing them cancels the previous run.
	stagger: RefCell<Vec<Timeout>>,
}

impl BrowserTheme {
	pub fn new() -> Self {
		Self::default()
	}

	fn stagger_items(&self) {
		let Some(document) = web_sys::window().and_then(|w| w.document()) else {
			return;
		};
		let Ok(items) = document.query_selector_all(TRANSITION_ITEM_SELECTOR) else {
			return;
		};

		let mut timers = Vec::with_capacity(items.length() as usize * 2);
		for index in 0..items.length() {
			let Some(el) = items
				.get(index)
				.and_then(|node| node.dyn_into::<HtmlElement>().ok())
			else {
				continue;
			};
			let start = index * STAGGER_STEP_MS;
			let el_in = el.clone();
			timers.push(Timeout::new(start, move || {
				let style = el.style();
				let _ = style.set_property("transition", "transform 0.5s ease, opacity 0.5s ease");
				let _ = style.set_property("transform", "translateY(10px)");
				let _ = style.set_property("opacity", "0");
			}));
			timers.push(Timeout::new(start + STAGGER_STEP_MS, move || {
				let style = el_in.style();
				let _ = style.set_property("transform", "translateY(0)");
				let _ = style.set_property("opacity", "1");
			}));
		}
		*self.stagger.borrow_mut() = timers;
	}
}

impl ThemeEnvironment for BrowserTheme {
	fn prefers_dark(&self) -> Option<bool> {
		web_sys::window()?
			.match_media("(prefers-color-scheme: dark)")
			.ok()
			.flatten()
			.map(|query| query.matches())
	}

	fn apply_root_marker(&self, dark: bool) {
		if let Some(root) = web_sys::window()
			.and_then(|w| w.document())
			.and_then(|d| d.document_element())
		{
			let classes = root.class_list();
			let _ = classes.add_2("transition-colors", "duration-300");
			let _ = classes.toggle_with_force("dark", dark);
		}
		self.stagger_items();
	}
}
