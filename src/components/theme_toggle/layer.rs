//! Full-window decorative layer: twinkling stars in the dark theme, floating
//! bubbles in the light one.
//!
//! The layer is a small state machine, `Absent -> Active(variant) -> Absent`.
//! Every sync tears the previous overlay down completely before building the
//! replacement; there is never a blended state. DOM access goes through
//! [`OverlayHost`] so the transitions can be exercised without a browser.

use fastrand::Rng;
use log::info;

use crate::palette::{BubbleStyle, Color};

/// Element id of the overlay container.
pub const OVERLAY_ID: &str = "theme-decor-layer";

/// Element id of the shared keyframes `<style>`.
pub const KEYFRAMES_ID: &str = "star-animation";

/// Keyframes used by both variants; installed once per document.
pub const KEYFRAMES_CSS: &str = "
@keyframes twinkle {
  0% { opacity: 0.3; }
  100% { opacity: 1; }
}
@keyframes float {
  0% { transform: translate(0, 0); }
  50% { transform: translate(12px, -24px); }
  100% { transform: translate(-8px, 0); }
}
";

/// Which overlay is showing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayerVariant {
	Stars,
	Bubbles,
}

impl LayerVariant {
	pub fn for_theme(dark: bool) -> Self {
		if dark { Self::Stars } else { Self::Bubbles }
	}
}

/// Current state of the layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LayerState {
	#[default]
	Absent,
	Active(LayerVariant),
}

/// One star or bubble, positioned in percent of the viewport.
#[derive(Clone, Debug, PartialEq)]
pub struct DecorParticle {
	pub size: f64,
	pub top_pct: f64,
	pub left_pct: f64,
	pub opacity: f64,
	pub color: Color,
	/// Blur radius in px; zero for stars.
	pub blur: f64,
	pub duration_s: f64,
	pub delay_s: f64,
	pub variant: LayerVariant,
}

impl DecorParticle {
	pub fn css(&self) -> String {
		let color = self.color.to_css();
		let common = format!(
			"position: absolute; border-radius: 50%; width: {size}px; height: {size}px; \
			 top: {top}%; left: {left}%; opacity: {opacity}; background-color: {color};",
			size = self.size,
			top = self.top_pct,
			left = self.left_pct,
			opacity = self.opacity,
		);
		match self.variant {
			LayerVariant::Stars => format!(
				"{common} box-shadow: 0 0 10px {color}; \
				 animation: twinkle {:.2}s infinite alternate;",
				self.duration_s
			),
			LayerVariant::Bubbles => format!(
				"{common} filter: blur({}px); \
				 animation: float {:.2}s ease-in-out {:.2}s infinite;",
				self.blur, self.duration_s, self.delay_s
			),
		}
	}
}

/// White twinkling points.
pub fn generate_stars(count: usize, rng: &mut Rng) -> Vec<DecorParticle> {
	(0..count)
		.map(|_| DecorParticle {
			size: rng.f64() * 2.0 + 1.0,
			top_pct: rng.f64() * 100.0,
			left_pct: rng.f64() * 100.0,
			opacity: rng.f64() * 0.5 + 0.3,
			color: Color::rgb(255, 255, 255),
			blur: 0.0,
			duration_s: rng.f64() * 5.0 + 3.0,
			delay_s: 0.0,
			variant: LayerVariant::Stars,
		})
		.collect()
}

/// Soft blurred circles that drift slowly.
pub fn generate_bubbles(count: usize, style: &BubbleStyle, rng: &mut Rng) -> Vec<DecorParticle> {
	if style.colors.is_empty() {
		return Vec::new();
	}
	(0..count)
		.map(|_| DecorParticle {
			size: rng.f64() * 60.0 + 20.0,
			top_pct: rng.f64() * 100.0,
			left_pct: rng.f64() * 100.0,
			opacity: rng.f64() * 0.4 + 0.3,
			color: style.colors[rng.usize(0..style.colors.len())],
			blur: rng.f64() * 6.0 + 2.0,
			duration_s: rng.f64() * 10.0 + 10.0,
			delay_s: rng.f64() * 5.0,
			variant: LayerVariant::Bubbles,
		})
		.collect()
}

/// DOM operations the layer needs.
pub trait OverlayHost {
	fn keyframes_installed(&self) -> bool;
	fn install_keyframes(&mut self, css: &str);
	/// Remove the overlay if present. Returns whether anything was removed.
	fn remove_overlay(&mut self) -> bool;
	fn mount_overlay(&mut self, variant: LayerVariant, particles: &[DecorParticle]);
}

/// Owns the decorative overlay and keeps it in step with the theme.
pub struct DecorativeLayer<H: OverlayHost> {
	host: H,
	state: LayerState,
	star_count: usize,
	bubble_count: usize,
	bubble_style: BubbleStyle,
	rng: Rng,
}

impl<H: OverlayHost> DecorativeLayer<H> {
	pub fn new(host: H, star_count: usize, bubble_count: usize, bubble_style: BubbleStyle) -> Self {
		Self::with_rng(host, star_count, bubble_count, bubble_style, Rng::new())
	}

	pub fn with_rng(
		host: H,
		star_count: usize,
		bubble_count: usize,
		bubble_style: BubbleStyle,
		rng: Rng,
	) -> Self {
		Self {
			host,
			state: LayerState::Absent,
			star_count,
			bubble_count,
			bubble_style,
			rng,
		}
	}

	pub fn state(&self) -> LayerState {
		self.state
	}

	pub fn host(&self) -> &H {
		&self.host
	}

	/// Replace whatever is showing with the overlay for `dark`.
	pub fn sync(&mut self, dark: bool) {
		self.teardown();

		if !self.host.keyframes_installed() {
			self.host.install_keyframes(KEYFRAMES_CSS);
		}

		let variant = LayerVariant::for_theme(dark);
		let particles = match variant {
			LayerVariant::Stars => generate_stars(self.star_count, &mut self.rng),
			LayerVariant::Bubbles => {
				generate_bubbles(self.bubble_count, &self.bubble_style, &mut self.rng)
			}
		};
		self.host.mount_overlay(variant, &particles);
		self.state = LayerState::Active(variant);
		info!("web2api: decorative layer rebuilt as {:?} ({})", variant, particles.len());
	}

	/// Remove the overlay. Idempotent.
	pub fn teardown(&mut self) {
		self.host.remove_overlay();
		self.state = LayerState::Absent;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::palette::Palette;

	#[derive(Default)]
	struct FakeHost {
		keyframes: Vec<String>,
		mounted: Option<(LayerVariant, usize)>,
		mounts: usize,
		removals: usize,
	}

	impl OverlayHost for FakeHost {
		fn keyframes_installed(&self) -> bool {
			!self.keyframes.is_empty()
		}

		fn install_keyframes(&mut self, css: &str) {
			self.keyframes.push(css.to_string());
		}

		fn remove_overlay(&mut self) -> bool {
			match self.mounted.take() {
				Some(_) => {
					self.removals += 1;
					true
				}
				None => false,
			}
		}

		fn mount_overlay(&mut self, variant: LayerVariant, particles: &[DecorParticle]) {
			assert!(self.mounted.is_none(), "mounted over an existing overlay");
			self.mounted = Some((variant, particles.len()));
			self.mounts += 1;
		}
	}

	fn layer() -> DecorativeLayer<FakeHost> {
		DecorativeLayer::with_rng(
			FakeHost::default(),
			50,
			15,
			Palette::light().bubbles,
			Rng::with_seed(4),
		)
	}

	#[test]
	fn starts_absent_and_follows_theme() {
		let mut layer = layer();
		assert_eq!(layer.state(), LayerState::Absent);

		layer.sync(true);
		assert_eq!(layer.state(), LayerState::Active(LayerVariant::Stars));
		assert_eq!(layer.host().mounted, Some((LayerVariant::Stars, 50)));

		layer.sync(false);
		assert_eq!(layer.state(), LayerState::Active(LayerVariant::Bubbles));
		assert_eq!(layer.host().mounted, Some((LayerVariant::Bubbles, 15)));
		assert_eq!(layer.host().removals, 1);
	}

	#[test]
	fn even_number_of_flips_restores_variant() {
		let mut layer = layer();
		layer.sync(true);
		let original = layer.state();
		let mut dark = true;
		for _ in 0..4 {
			dark = !dark;
			layer.sync(dark);
		}
		assert_eq!(layer.state(), original);
		assert_eq!(layer.host().mounts, 5);
	}

	#[test]
	fn keyframes_installed_once() {
		let mut layer = layer();
		layer.sync(true);
		layer.sync(false);
		layer.sync(true);
		assert_eq!(layer.host().keyframes.len(), 1);
		assert!(layer.host().keyframes[0].contains("@keyframes twinkle"));
	}

	#[test]
	fn teardown_is_idempotent() {
		let mut layer = layer();
		layer.sync(false);
		layer.teardown();
		layer.teardown();
		assert_eq!(layer.state(), LayerState::Absent);
		assert_eq!(layer.host().mounted, None);
		assert_eq!(layer.host().removals, 1);
	}

	#[test]
	fn star_and_bubble_ranges() {
		let mut rng = Rng::with_seed(8);
		for star in generate_stars(200, &mut rng) {
			assert!((1.0..3.0).contains(&star.size));
			assert!((0.3..0.8).contains(&star.opacity));
			assert!((3.0..8.0).contains(&star.duration_s));
			assert!(star.css().contains("animation: twinkle"));
		}
		let style = Palette::light().bubbles;
		for bubble in generate_bubbles(200, &style, &mut rng) {
			assert!(style.colors.contains(&bubble.color));
			assert!(bubble.blur >= 2.0);
			assert!(bubble.css().contains("filter: blur("));
		}
		assert!(generate_bubbles(10, &Palette::dark().bubbles, &mut rng).is_empty());
	}
}
