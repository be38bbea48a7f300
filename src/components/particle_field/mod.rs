//! Interactive particle background.
//!
//! Renders drifting particles on a full-viewport canvas with:
//! - Particle count derived from viewport width, capped for the O(n²) link scan
//! - Edge reflection that keeps every particle inside the canvas
//! - Proximity links whose alpha fades linearly with distance
//! - A repelling pointer impulse, clamped near zero distance
//!
//! # Example
//!
//! ```ignore
//! use web2api::components::particle_field::ParticleFieldCanvas;
//!
//! let theme = use_theme();
//! view! { <ParticleFieldCanvas dark=theme.is_dark /> }
//! ```

mod component;
pub mod particles;
pub mod render;

pub use component::ParticleFieldCanvas;
pub use particles::{Particle, ParticleField, link_alpha, particle_count};
pub use render::Surface;
