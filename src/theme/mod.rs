//! Theme state shared across the app.
//!
//! [`ThemeStore`] is the injectable source of truth. [`ThemeContext`] bridges
//! it into Leptos: a signal mirrors the flag so components re-render, and
//! `toggle` writes through the store so persistence and the root marker stay
//! in step.

mod browser;
mod store;

use std::rc::Rc;

use leptos::prelude::*;
use send_wrapper::SendWrapper;

pub use browser::BrowserTheme;
pub use store::{SubscriptionId, ThemeEnvironment, ThemeStore};

use crate::storage::KeyValueStore;

/// Theme handle provided through Leptos context.
#[derive(Clone)]
pub struct ThemeContext {
	/// Mirrors [`ThemeStore::is_dark`].
	pub is_dark: RwSignal<bool>,
	store: SendWrapper<Rc<ThemeStore>>,
}

impl ThemeContext {
	pub fn new(store: Rc<ThemeStore>) -> Self {
		let is_dark = RwSignal::new(store.is_dark());
		store.subscribe(move |dark| is_dark.set(dark));
		Self {
			is_dark,
			store: SendWrapper::new(store),
		}
	}

	pub fn toggle(&self) {
		self.store.toggle();
	}
}

/// Build the browser theme store and provide it to descendants.
pub fn provide_theme(storage: Rc<dyn KeyValueStore>) -> ThemeContext {
	let store = Rc::new(ThemeStore::new(storage, Rc::new(BrowserTheme::new())));
	let context = ThemeContext::new(store);
	provide_context(context.clone());
	context
}

/// The theme provided by an ancestor.
///
/// Panics outside of [`provide_theme`], like any missing context.
pub fn use_theme() -> ThemeContext {
	expect_context::<ThemeContext>()
}
