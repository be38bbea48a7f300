//! Spark burst spawned around the toggle button.

use std::f64::consts::TAU;

use fastrand::Rng;

use crate::palette::{BurstStyle, Color};

/// Delay before a spark starts moving, so it is painted at its origin first.
pub const LAUNCH_DELAY_MS: u32 = 10;

/// Screen rectangle of the control that triggered the burst.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Anchor {
	pub left: f64,
	pub top: f64,
	pub width: f64,
	pub height: f64,
}

impl Anchor {
	pub fn center(&self) -> (f64, f64) {
		(self.left + self.width / 2.0, self.top + self.height / 2.0)
	}
}

/// One short-lived spark.
#[derive(Clone, Debug, PartialEq)]
pub struct BurstParticle {
	/// Spawn position (anchor center).
	pub x: f64,
	pub y: f64,
	pub size: f64,
	pub color: Color,
	pub glow: f64,
	/// Destination relative to the spawn position.
	pub offset_x: f64,
	pub offset_y: f64,
}

impl BurstParticle {
	/// Inline style for the first phase: at the origin, fully opaque.
	pub fn initial_style(&self, lifetime_ms: u32) -> String {
		let color = self.color.to_css();
		format!(
			"position: fixed; border-radius: 50%; width: {size}px; height: {size}px; \
			 background-color: {color}; box-shadow: 0 0 {glow}px {color}; \
			 top: {y}px; left: {x}px; pointer-events: none; z-index: 9999; \
			 opacity: 1; transition: all {lifetime_ms}ms ease-out;",
			size = self.size,
			glow = self.glow,
			x = self.x,
			y = self.y,
		)
	}

	/// `transform` value for the second phase.
	pub fn final_transform(&self) -> String {
		format!("translate({}px, {}px)", self.offset_x, self.offset_y)
	}
}

/// Generate `count` sparks at the anchor center, flying outward at random
/// angles for 50..150 px.
pub fn spawn_burst(
	anchor: &Anchor,
	count: usize,
	style: &BurstStyle,
	rng: &mut Rng,
) -> Vec<BurstParticle> {
	let (x, y) = anchor.center();
	(0..count)
		.map(|_| {
			let angle = rng.f64() * TAU;
			let distance = rng.f64() * 100.0 + 50.0;
			BurstParticle {
				x,
				y,
				size: rng.f64() * 10.0 + 3.0,
				color: style.particle.sample(rng),
				glow: rng.f64() * 10.0 + 5.0,
				offset_x: angle.cos() * distance,
				offset_y: angle.sin() * distance,
			}
		})
		.collect()
}
