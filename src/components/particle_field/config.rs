//! Tunable constants for the particle field, fixed at construction time.

/// An rgb color with alpha, rendered as a CSS `rgba(...)` string.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Rgba {
	pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn css(&self) -> String {
		format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
	}

	/// Same color with alpha multiplied by `factor`. Used for distance-faded
	/// lines and gradient stops.
	pub fn scale_alpha(&self, factor: f64) -> Self {
		Self {
			a: self.a * factor,
			..*self
		}
	}
}

/// Back-to-front layer colors.
#[derive(Clone, Copy, Debug)]
pub struct Palette {
	pub background: &'static str,
	pub node: &'static str,
	pub node_glow: Rgba,
	pub line: Rgba,
	pub star: Rgba,
}

/// Immutable renderer configuration.
///
/// `pointer_strength` is signed: positive attracts nodes toward the pointer,
/// negative repels. `pointer_force_scale` and `glow_scale` are visual tuning
/// constants carried over as-is; they were arrived at by inspection, not
/// derivation.
#[derive(Clone, Debug)]
pub struct FieldConfig {
	pub node_count: usize,
	pub max_dist: f64,
	pub node_speed: f64,
	pub node_radius: f64,
	pub pointer_radius: f64,
	pub pointer_strength: f64,
	pub pointer_force_scale: f64,
	pub line_width: f64,
	pub glow_scale: f64,
	pub star_count: usize,
	pub palette: Palette,
}

impl Default for FieldConfig {
	fn default() -> Self {
		Self {
			node_count: 80,
			max_dist: 150.0,
			node_speed: 0.3,
			node_radius: 3.0,
			pointer_radius: 200.0,
			pointer_strength: 0.15,
			pointer_force_scale: 30.0,
			line_width: 1.0,
			glow_scale: 3.0,
			star_count: 50,
			palette: Palette {
				background: "#020208",
				node: "#09BAF2",
				node_glow: Rgba::new(9, 186, 242, 0.2),
				line: Rgba::new(9, 186, 242, 0.3),
				star: Rgba::new(255, 255, 255, 0.4),
			},
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn rgba_renders_css() {
		assert_eq!(Rgba::new(9, 186, 242, 0.3).css(), "rgba(9, 186, 242, 0.3)");
		assert_eq!(Rgba::new(255, 255, 255, 1.0).css(), "rgba(255, 255, 255, 1)");
	}

	#[test]
	fn scale_alpha_keeps_channels() {
		let faded = Rgba::new(9, 186, 242, 0.3).scale_alpha(0.5);
		assert_eq!((faded.r, faded.g, faded.b), (9, 186, 242));
		assert!((faded.a - 0.15).abs() < 1e-12);
	}
}
