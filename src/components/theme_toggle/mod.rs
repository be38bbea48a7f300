//! Theme toggle button and its cosmetic effects.
//!
//! - A spark burst anchored to the button on every click
//! - A full-window decorative layer: stars when dark, bubbles when light
//!
//! The generators and the layer state machine are plain Rust; only
//! [`dom`] touches the document.

mod component;
pub mod burst;
pub mod disposer;
pub mod dom;
pub mod layer;

pub use component::ThemeToggle;
pub use layer::{DecorativeLayer, LayerState, LayerVariant, OverlayHost};
