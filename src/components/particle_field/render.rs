//! Frame rendering for the particle field.
//!
//! Two passes per frame: filled circles for every particle, then proximity
//! links. All drawing goes through [`Surface`]; the browser implementation is
//! `CanvasRenderingContext2d`.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::particles::ParticleField;
use crate::palette::Color;

/// The drawing operations the field needs.
pub trait Surface {
	fn clear(&self, width: f64, height: f64);
	fn fill_circle(&self, x: f64, y: f64, radius: f64, color: &str, alpha: f64);
	fn stroke_line(&self, from: (f64, f64), to: (f64, f64), color: &str, width: f64);
}

impl Surface for CanvasRenderingContext2d {
	fn clear(&self, width: f64, height: f64) {
		self.clear_rect(0.0, 0.0, width, height);
	}

	fn fill_circle(&self, x: f64, y: f64, radius: f64, color: &str, alpha: f64) {
		self.begin_path();
		let _ = self.arc(x, y, radius, 0.0, PI * 2.0);
		self.set_fill_style_str(color);
		self.set_global_alpha(alpha);
		self.fill();
		self.set_global_alpha(1.0);
	}

	fn stroke_line(&self, from: (f64, f64), to: (f64, f64), color: &str, width: f64) {
		self.begin_path();
		self.set_stroke_style_str(color);
		self.set_line_width(width);
		self.move_to(from.0, from.1);
		self.line_to(to.0, to.1);
		self.stroke();
	}
}

/// Renders the current state of the field.
pub fn render(field: &ParticleField, surface: &impl Surface) {
	surface.clear(field.width(), field.height());

	for p in &field.particles {
		surface.fill_circle(p.x, p.y, p.radius, &p.color.to_css(), p.opacity);
	}

	let style = field.style();
	let line_width = field.config().line_width;
	field.for_each_link(|a, b, alpha| {
		let stroke = link_stroke(style.link_color, style.link_alpha, alpha);
		surface.stroke_line((a.x, a.y), (b.x, b.y), &stroke, line_width);
	});
}

fn link_stroke(color: Color, base_alpha: f64, distance_alpha: f64) -> String {
	color.with_alpha(base_alpha * distance_alpha).to_css()
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;

	use fastrand::Rng;

	use super::*;
	use crate::components::particle_field::particles::Particle;
	use crate::config::FieldConfig;
	use crate::palette::Palette;

	#[derive(Debug, PartialEq)]
	enum Op {
		Clear,
		Circle { x: f64, alpha: f64 },
		Line { color: String },
	}

	#[derive(Default)]
	struct Recorder {
		ops: RefCell<Vec<Op>>,
	}

	impl Surface for Recorder {
		fn clear(&self, _width: f64, _height: f64) {
			self.ops.borrow_mut().push(Op::Clear);
		}

		fn fill_circle(&self, x: f64, _y: f64, _radius: f64, _color: &str, alpha: f64) {
			self.ops.borrow_mut().push(Op::Circle { x, alpha });
		}

		fn stroke_line(&self, _from: (f64, f64), _to: (f64, f64), color: &str, _width: f64) {
			self.ops.borrow_mut().push(Op::Line {
				color: color.to_string(),
			});
		}
	}

	fn particle_at(x: f64) -> Particle {
		Particle {
			x,
			y: 10.0,
			radius: 2.0,
			speed_x: 0.0,
			speed_y: 0.0,
			color: Color::rgba(120, 60, 200, 0.7),
			opacity: 0.5,
		}
	}

	#[test]
	fn frame_clears_then_draws_particles_then_links() {
		let mut field = ParticleField::with_rng(
			FieldConfig::default(),
			Palette::dark().field,
			400.0,
			100.0,
			Rng::with_seed(1),
		);
		field.particles = vec![particle_at(0.0), particle_at(75.0), particle_at(390.0)];

		let recorder = Recorder::default();
		render(&field, &recorder);

		let ops = recorder.ops.into_inner();
		assert_eq!(
			ops,
			vec![
				Op::Clear,
				Op::Circle { x: 0.0, alpha: 0.5 },
				Op::Circle { x: 75.0, alpha: 0.5 },
				Op::Circle { x: 390.0, alpha: 0.5 },
				// 0.2 * (1 - 75/150)
				Op::Line {
					color: "rgba(168, 85, 247, 0.1)".into()
				},
			]
		);
	}

	#[test]
	fn light_theme_links_are_fainter() {
		let dark = link_stroke(Palette::dark().field.link_color, 0.2, 0.5);
		let light = link_stroke(Palette::light().field.link_color, 0.1, 0.5);
		assert_eq!(dark, "rgba(168, 85, 247, 0.1)");
		assert_eq!(light, "rgba(168, 85, 247, 0.05)");
	}
}
