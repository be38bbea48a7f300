//! Colors and per-theme visual styles.
//!
//! Every randomized color in the app is drawn from a [`ChannelRange`] triple so
//! the dark and light looks are data, not branches scattered through the
//! renderers.

use fastrand::Rng;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("rgb({}, {}, {})", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// A color channel sampled uniformly from `min..min + spread`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChannelRange {
	pub min: u8,
	pub spread: u8,
}

impl ChannelRange {
	pub const fn new(min: u8, spread: u8) -> Self {
		Self { min, spread }
	}

	pub const fn fixed(value: u8) -> Self {
		Self::new(value, 0)
	}

	pub fn sample(&self, rng: &mut Rng) -> u8 {
		if self.spread == 0 {
			self.min
		} else {
			self.min.saturating_add(rng.u8(0..self.spread))
		}
	}
}

/// Randomized color recipe: one range per channel plus a fixed alpha.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorRecipe {
	pub r: ChannelRange,
	pub g: ChannelRange,
	pub b: ChannelRange,
	pub a: f64,
}

impl ColorRecipe {
	pub fn sample(&self, rng: &mut Rng) -> Color {
		Color::rgba(self.r.sample(rng), self.g.sample(rng), self.b.sample(rng), self.a)
	}
}

/// Colors of the particle field.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldStyle {
	pub particle: ColorRecipe,
	/// Stroke color for proximity links; alpha comes from `link_alpha`.
	pub link_color: Color,
	/// Link alpha at zero distance. Higher in the dark theme.
	pub link_alpha: f64,
}

/// Colors of the toggle burst.
#[derive(Clone, Debug, PartialEq)]
pub struct BurstStyle {
	pub particle: ColorRecipe,
}

/// Colors of the light-theme bubbles.
#[derive(Clone, Debug, PartialEq)]
pub struct BubbleStyle {
	pub colors: Vec<Color>,
}

/// Complete visual palette for one theme.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
	pub name: &'static str,
	pub field: FieldStyle,
	pub burst: BurstStyle,
	pub bubbles: BubbleStyle,
}

const LINK_PURPLE: Color = Color::rgb(168, 85, 247);

impl Palette {
	pub fn for_theme(dark: bool) -> Self {
		if dark { Self::dark() } else { Self::light() }
	}

	/// Violet particles on black, bright links, warm-white sparks.
	pub fn dark() -> Self {
		Self {
			name: "dark",
			field: FieldStyle {
				particle: ColorRecipe {
					r: ChannelRange::new(100, 50),
					g: ChannelRange::new(50, 20),
					b: ChannelRange::new(155, 100),
					a: 0.7,
				},
				link_color: LINK_PURPLE,
				link_alpha: 0.2,
			},
			burst: BurstStyle {
				particle: ColorRecipe {
					r: ChannelRange::fixed(255),
					g: ChannelRange::fixed(255),
					b: ChannelRange::new(155, 100),
					a: 1.0,
				},
			},
			bubbles: BubbleStyle { colors: Vec::new() },
		}
	}

	/// Pink-lilac particles, faint links, indigo sparks, pastel bubbles.
	pub fn light() -> Self {
		Self {
			name: "light",
			field: FieldStyle {
				particle: ColorRecipe {
					r: ChannelRange::new(155, 100),
					g: ChannelRange::new(100, 50),
					b: ChannelRange::new(155, 100),
					a: 0.4,
				},
				link_color: LINK_PURPLE,
				link_alpha: 0.1,
			},
			burst: BurstStyle {
				particle: ColorRecipe {
					r: ChannelRange::new(100, 100),
					g: ChannelRange::fixed(50),
					b: ChannelRange::fixed(255),
					a: 1.0,
				},
			},
			bubbles: BubbleStyle {
				colors: vec![
					Color::rgba(168, 85, 247, 0.25), // Violet
					Color::rgba(99, 102, 241, 0.2),  // Indigo
					Color::rgba(236, 72, 153, 0.2),  // Pink
					Color::rgba(14, 165, 233, 0.2),  // Sky
				],
			},
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn css_output() {
		assert_eq!(Color::rgb(1, 2, 3).to_css(), "rgb(1, 2, 3)");
		assert_eq!(Color::rgba(1, 2, 3, 0.5).to_css(), "rgba(1, 2, 3, 0.5)");
	}

	#[test]
	fn channel_samples_stay_in_range() {
		let mut rng = Rng::with_seed(7);
		let range = ChannelRange::new(155, 100);
		for _ in 0..1000 {
			let v = range.sample(&mut rng);
			assert!((155..255).contains(&v));
		}
		assert_eq!(ChannelRange::fixed(50).sample(&mut rng), 50);
	}

	#[test]
	fn dark_links_are_more_visible() {
		assert!(Palette::dark().field.link_alpha > Palette::light().field.link_alpha);
		assert!(Palette::dark().bubbles.colors.is_empty());
		assert!(!Palette::light().bubbles.colors.is_empty());
	}
}
