//! UI components.

pub mod dashboard;
pub mod particle_field;
pub mod theme_toggle;
