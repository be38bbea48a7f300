//! Dark/light flag with persistence and change notification.
//!
//! The initial value comes from storage, then from the environment's color
//! scheme preference, then defaults to light. After every update the flag,
//! the stored value and the root marker agree.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::{debug, warn};

use crate::storage::{KeyValueStore, THEME_KEY};

const DARK: &str = "dark";
const LIGHT: &str = "light";

/// Host signals the store reads and writes besides storage.
pub trait ThemeEnvironment {
	/// `prefers-color-scheme: dark`, if the host can tell.
	fn prefers_dark(&self) -> Option<bool>;
	/// Reflect the flag on the document root.
	fn apply_root_marker(&self, dark: bool);
}

/// Handle returned by [`ThemeStore::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubscriptionId(usize);

type Listener = Rc<dyn Fn(bool)>;

/// The single source of truth for the theme.
pub struct ThemeStore {
	dark: Cell<bool>,
	storage: Rc<dyn KeyValueStore>,
	env: Rc<dyn ThemeEnvironment>,
	listeners: RefCell<Vec<(SubscriptionId, Listener)>>,
	next_id: Cell<usize>,
}

impl ThemeStore {
	pub fn new(storage: Rc<dyn KeyValueStore>, env: Rc<dyn ThemeEnvironment>) -> Self {
		let dark = initial_flag(storage.as_ref(), env.as_ref());
		let store = Self {
			dark: Cell::new(dark),
			storage,
			env,
			listeners: RefCell::new(Vec::new()),
			next_id: Cell::new(0),
		};
		store.commit(dark);
		store
	}

	pub fn is_dark(&self) -> bool {
		self.dark.get()
	}

	/// Flip the flag. Returns the new value.
	pub fn toggle(&self) -> bool {
		let dark = !self.dark.get();
		self.set_dark(dark);
		dark
	}

	/// Set the flag; listeners hear about it only if it changed.
	pub fn set_dark(&self, dark: bool) {
		let changed = self.dark.replace(dark) != dark;
		self.commit(dark);
		if changed {
			debug!("web2api: theme is now {}", if dark { DARK } else { LIGHT });
			self.notify(dark);
		}
	}

	pub fn subscribe(&self, listener: impl Fn(bool) + 'static) -> SubscriptionId {
		let id = SubscriptionId(self.next_id.get());
		self.next_id.set(id.0 + 1);
		self.listeners.borrow_mut().push((id, Rc::new(listener)));
		id
	}

	pub fn unsubscribe(&self, id: SubscriptionId) {
		self.listeners.borrow_mut().retain(|(sid, _)| *sid != id);
	}

	fn commit(&self, dark: bool) {
		self.env.apply_root_marker(dark);
		if let Err(e) = self.storage.set(THEME_KEY, if dark { DARK } else { LIGHT }) {
			warn!("web2api: could not persist theme: {}", e);
		}
	}

	fn notify(&self, dark: bool) {
		// Listeners may subscribe or unsubscribe while being called.
		let listeners: Vec<Listener> = self
			.listeners
			.borrow()
			.iter()
			.map(|(_, l)| l.clone())
			.collect();
		for listener in listeners {
			listener(dark);
		}
	}
}

fn initial_flag(storage: &dyn KeyValueStore, env: &dyn ThemeEnvironment) -> bool {
	match storage.get(THEME_KEY) {
		Ok(Some(saved)) if !saved.is_empty() => return saved == DARK,
		Ok(_) => {}
		Err(e) => warn!("web2api: could not read stored theme: {}", e),
	}
	env.prefers_dark().unwrap_or(false)
}
