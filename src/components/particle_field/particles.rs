//! Particle simulation: seeding, integration, edge reflection, pointer impulse.

use fastrand::Rng;

use crate::config::FieldConfig;
use crate::palette::{Color, FieldStyle};

/// A single drifting particle.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	pub x: f64,
	pub y: f64,
	pub radius: f64,
	pub speed_x: f64,
	pub speed_y: f64,
	pub color: Color,
	/// Multiplier applied on top of `color.a` at draw time.
	pub opacity: f64,
}

/// Number of particles for a viewport of the given width.
pub fn particle_count(width: f64, config: &FieldConfig) -> usize {
	if !(width > 0.0) || config.density_divisor <= 0.0 {
		return 0;
	}
	((width / config.density_divisor).floor() as usize).min(config.max_particles)
}

/// Stroke alpha multiplier for a link of the given length.
///
/// `1 - distance / threshold`, and exactly zero at or beyond the threshold.
pub fn link_alpha(distance: f64, threshold: f64) -> f64 {
	if distance >= threshold || threshold <= 0.0 {
		0.0
	} else {
		1.0 - distance / threshold
	}
}

/// Owns the particle set and the bounds it lives in.
///
/// Particles have no identity beyond their index. Resizing and restyling
/// discard the whole set and seed a new one.
pub struct ParticleField {
	pub particles: Vec<Particle>,
	width: f64,
	height: f64,
	config: FieldConfig,
	style: FieldStyle,
	rng: Rng,
}

impl ParticleField {
	pub fn new(config: FieldConfig, style: FieldStyle, width: f64, height: f64) -> Self {
		Self::with_rng(config, style, width, height, Rng::new())
	}

	pub fn with_rng(
		config: FieldConfig,
		style: FieldStyle,
		width: f64,
		height: f64,
		rng: Rng,
	) -> Self {
		let mut field = Self {
			particles: Vec::new(),
			width: width.max(0.0),
			height: height.max(0.0),
			config,
			style,
			rng,
		};
		field.seed();
		field
	}

	pub fn width(&self) -> f64 {
		self.width
	}

	pub fn height(&self) -> f64 {
		self.height
	}

	pub fn config(&self) -> &FieldConfig {
		&self.config
	}

	pub fn style(&self) -> &FieldStyle {
		&self.style
	}

	/// Replace the particle set with a fresh one sized to the current width.
	pub fn seed(&mut self) {
		let count = particle_count(self.width, &self.config);
		let (width, height) = (self.width, self.height);
		let rng = &mut self.rng;

		self.particles = (0..count)
			.map(|_| Particle {
				x: rng.f64() * width,
				y: rng.f64() * height,
				radius: rng.f64() * 3.0 + 1.0,
				speed_x: (rng.f64() - 0.5) * 0.5,
				speed_y: (rng.f64() - 0.5) * 0.5,
				color: self.style.particle.sample(rng),
				opacity: rng.f64() * 0.5 + 0.2,
			})
			.collect();
	}

	/// New bounds; in-flight particles are discarded and re-seeded.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width.max(0.0);
		self.height = height.max(0.0);
		self.seed();
	}

	/// New colors; re-seeds like the theme flip always has.
	pub fn restyle(&mut self, style: FieldStyle) {
		self.style = style;
		self.seed();
	}

	/// Advance one frame: integrate, then reflect off the edges.
	pub fn step(&mut self) {
		let (width, height) = (self.width, self.height);
		for p in &mut self.particles {
			p.x += p.speed_x;
			p.y += p.speed_y;
			reflect(&mut p.x, &mut p.speed_x, width);
			reflect(&mut p.y, &mut p.speed_y, height);
		}
	}

	/// Nudge every particle near the pointer away from it.
	///
	/// Pointer positions outside the field are ignored. The impulse grows as
	/// `0.5 / distance`, with distance clamped to `pointer_min_distance`.
	pub fn apply_pointer(&mut self, px: f64, py: f64) {
		if !(0.0..=self.width).contains(&px) || !(0.0..=self.height).contains(&py) {
			return;
		}

		let radius = self.config.pointer_radius;
		let damping = self.config.pointer_damping;
		let min_distance = self.config.pointer_min_distance.max(f64::EPSILON);

		for p in &mut self.particles {
			let (dx, dy) = (px - p.x, py - p.y);
			let distance = (dx * dx + dy * dy).sqrt();
			if distance < radius {
				let force = 0.5 / distance.max(min_distance);
				p.speed_x -= dx * force * damping;
				p.speed_y -= dy * force * damping;
			}
		}
	}

	/// Visit each pair closer than the link distance once, `i < j`.
	pub fn for_each_link(&self, mut f: impl FnMut(&Particle, &Particle, f64)) {
		let threshold = self.config.link_distance;
		for (i, a) in self.particles.iter().enumerate() {
			for b in &self.particles[i + 1..] {
				let (dx, dy) = (a.x - b.x, a.y - b.y);
				let alpha = link_alpha((dx * dx + dy * dy).sqrt(), threshold);
				if alpha > 0.0 {
					f(a, b, alpha);
				}
			}
		}
	}
}

/// Mirror an out-of-range coordinate back into `[0, max]` and point its
/// velocity inward.
fn reflect(pos: &mut f64, speed: &mut f64, max: f64) {
	if *pos < 0.0 {
		*pos = -*pos;
		*speed = speed.abs();
	} else if *pos > max {
		*pos = 2.0 * max - *pos;
		*speed = -speed.abs();
	}
	// A single frame can overshoot by more than the field after a hard nudge.
	*pos = pos.clamp(0.0, max);
}
