use super::config::FieldConfig;

/// A drifting point particle.
///
/// `(base_x, base_y)` is the authoritative position advanced by the drift
/// velocity; `(x, y)` is the rendered position, reset to base at the start of
/// every step and then perturbed by pointer force. The perturbation never
/// feeds back into the base, so pointer influence cannot accumulate into
/// drift.
#[derive(Clone, Debug)]
pub struct Node {
	pub x: f64,
	pub y: f64,
	pub base_x: f64,
	pub base_y: f64,
	pub vx: f64,
	pub vy: f64,
	pub radius: f64,
}

/// A static decorative dot layered underneath the nodes.
#[derive(Clone, Debug)]
pub struct Star {
	pub x: f64,
	pub y: f64,
	pub radius: f64,
	pub opacity: f64,
}

/// A pair of nodes close enough to draw a line between, brighter when closer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Connection {
	pub a: usize,
	pub b: usize,
	pub opacity: f64,
}

/// The single owned aggregate behind the renderer: entity collections,
/// pointer sample, and logical surface bounds. Event callbacks and the frame
/// loop mutate it only through these methods.
pub struct ParticleFieldState {
	pub config: FieldConfig,
	pub nodes: Vec<Node>,
	pub stars: Vec<Star>,
	pub pointer: Option<(f64, f64)>,
	pub width: f64,
	pub height: f64,
	pub dpr: f64,
}

fn dist_squared(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
	let (dx, dy) = (x2 - x1, y2 - y1);
	dx * dx + dy * dy
}

impl ParticleFieldState {
	/// `rng` must yield uniform samples in `[0, 1)`; the component passes
	/// `js_sys::Math::random`, tests pass a seeded generator.
	pub fn new(
		config: FieldConfig,
		width: f64,
		height: f64,
		dpr: f64,
		rng: &mut impl FnMut() -> f64,
	) -> Self {
		let mut state = Self {
			config,
			nodes: Vec::new(),
			stars: Vec::new(),
			pointer: None,
			width,
			height,
			dpr,
		};
		state.populate(rng);
		state
	}

	fn populate(&mut self, rng: &mut impl FnMut() -> f64) {
		self.nodes = (0..self.config.node_count)
			.map(|_| {
				let (x, y) = (rng() * self.width, rng() * self.height);
				Node {
					x,
					y,
					base_x: x,
					base_y: y,
					vx: (rng() - 0.5) * self.config.node_speed,
					vy: (rng() - 0.5) * self.config.node_speed,
					radius: self.config.node_radius,
				}
			})
			.collect();
		self.stars = (0..self.config.star_count)
			.map(|_| Star {
				x: rng() * self.width,
				y: rng() * self.height,
				radius: rng() * 0.8 + 0.2,
				opacity: rng() * 0.5 + 0.2,
			})
			.collect();
	}

	pub fn set_pointer(&mut self, x: f64, y: f64) {
		self.pointer = Some((x, y));
	}

	pub fn clear_pointer(&mut self) {
		self.pointer = None;
	}

	/// Update logical bounds after the surface was resized. Entities are
	/// regenerated only when the node set is empty (first sizing); later
	/// resizes keep existing positions untouched, so nodes can drift back in
	/// through edge wrap after a shrink.
	pub fn resize(&mut self, width: f64, height: f64, dpr: f64, rng: &mut impl FnMut() -> f64) {
		self.width = width;
		self.height = height;
		self.dpr = dpr;
		if self.nodes.is_empty() {
			self.populate(rng);
		}
	}

	/// Advance every node by one frame: drift, wrap, then pointer force on
	/// the transient position.
	pub fn step(&mut self) {
		let pointer_radius_sq = self.config.pointer_radius * self.config.pointer_radius;

		for node in &mut self.nodes {
			node.base_x += node.vx;
			node.base_y += node.vy;

			// Torus wrap: snap to the opposite edge, never reflect.
			if node.base_x < 0.0 {
				node.base_x = self.width;
			}
			if node.base_x > self.width {
				node.base_x = 0.0;
			}
			if node.base_y < 0.0 {
				node.base_y = self.height;
			}
			if node.base_y > self.height {
				node.base_y = 0.0;
			}

			node.x = node.base_x;
			node.y = node.base_y;

			if let Some((px, py)) = self.pointer {
				let d_sq = dist_squared(node.x, node.y, px, py);
				if d_sq < pointer_radius_sq {
					let dist = d_sq.sqrt();
					let force =
						(1.0 - dist / self.config.pointer_radius) * self.config.pointer_strength;
					let angle = (py - node.y).atan2(px - node.x);
					node.x += angle.cos() * force * self.config.pointer_force_scale;
					node.y += angle.sin() * force * self.config.pointer_force_scale;
				}
			}
		}
	}

	/// All unordered node pairs within `max_dist` of each other, with
	/// proximity-weighted opacity. O(n²); node counts stay in the low
	/// hundreds.
	pub fn connections(&self) -> Vec<Connection> {
		let max_dist_sq = self.config.max_dist * self.config.max_dist;
		let mut out = Vec::new();

		for i in 0..self.nodes.len() {
			for j in (i + 1)..self.nodes.len() {
				let d_sq = dist_squared(
					self.nodes[i].x,
					self.nodes[i].y,
					self.nodes[j].x,
					self.nodes[j].y,
				);
				if d_sq < max_dist_sq {
					out.push(Connection {
						a: i,
						b: j,
						opacity: 1.0 - d_sq.sqrt() / self.config.max_dist,
					});
				}
			}
		}
		out
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	/// Seeded generator so tests are deterministic (same idea as the sample
	/// data generator on the home page).
	fn seeded_rng(seed: u64) -> impl FnMut() -> f64 {
		let mut x = seed;
		move || {
			x = x
				.wrapping_mul(6364136223846793005)
				.wrapping_add(1442695040888963407);
			(x >> 11) as f64 / (1u64 << 53) as f64
		}
	}

	fn state_with(config: FieldConfig, width: f64, height: f64) -> ParticleFieldState {
		ParticleFieldState::new(config, width, height, 1.0, &mut seeded_rng(7))
	}

	fn still_node(x: f64, y: f64) -> Node {
		Node {
			x,
			y,
			base_x: x,
			base_y: y,
			vx: 0.0,
			vy: 0.0,
			radius: 3.0,
		}
	}

	#[test]
	fn populates_configured_count_within_bounds() {
		for count in [0, 1, 80] {
			let config = FieldConfig {
				node_count: count,
				..FieldConfig::default()
			};
			let state = state_with(config, 640.0, 480.0);
			assert_eq!(state.nodes.len(), count);
			for node in &state.nodes {
				assert!((0.0..=640.0).contains(&node.x));
				assert!((0.0..=480.0).contains(&node.y));
				assert_eq!((node.x, node.y), (node.base_x, node.base_y));
			}
		}
	}

	#[test]
	fn stars_populate_with_bounded_size_and_opacity() {
		let state = state_with(FieldConfig::default(), 640.0, 480.0);
		assert_eq!(state.stars.len(), state.config.star_count);
		for star in &state.stars {
			assert!((0.2..=1.0).contains(&star.radius));
			assert!((0.2..=0.7).contains(&star.opacity));
		}
	}

	#[test]
	fn drift_advances_base_by_velocity() {
		let mut state = state_with(
			FieldConfig {
				node_count: 0,
				..FieldConfig::default()
			},
			640.0,
			480.0,
		);
		let mut node = still_node(100.0, 200.0);
		(node.vx, node.vy) = (0.4, -0.25);
		state.nodes.push(node);

		state.step();
		let node = &state.nodes[0];
		assert!((node.base_x - 100.4).abs() < 1e-12);
		assert!((node.base_y - 199.75).abs() < 1e-12);
	}

	#[test]
	fn base_position_wraps_to_opposite_edge() {
		let mut state = state_with(
			FieldConfig {
				node_count: 0,
				..FieldConfig::default()
			},
			640.0,
			480.0,
		);
		for (x, y, vx, vy) in [
			(639.9, 100.0, 0.5, 0.0),  // off the right
			(0.05, 100.0, -0.5, 0.0),  // off the left
			(100.0, 479.9, 0.0, 0.5),  // off the bottom
			(100.0, 0.05, 0.0, -0.5),  // off the top
		] {
			let mut node = still_node(x, y);
			(node.vx, node.vy) = (vx, vy);
			state.nodes.push(node);
		}

		state.step();
		assert_eq!(state.nodes[0].base_x, 0.0);
		assert_eq!(state.nodes[1].base_x, 640.0);
		assert_eq!(state.nodes[2].base_y, 0.0);
		assert_eq!(state.nodes[3].base_y, 480.0);
	}

	#[test]
	fn no_pointer_leaves_transient_at_base() {
		let mut state = state_with(FieldConfig::default(), 640.0, 480.0);
		state.clear_pointer();
		state.step();
		for node in &state.nodes {
			assert_eq!((node.x, node.y), (node.base_x, node.base_y));
		}
	}

	#[test]
	fn pointer_force_fades_linearly_to_radius() {
		let config = FieldConfig {
			node_count: 0,
			pointer_radius: 200.0,
			pointer_strength: 0.15,
			pointer_force_scale: 30.0,
			..FieldConfig::default()
		};
		let mut state = state_with(config, 1000.0, 1000.0);
		state.set_pointer(500.0, 500.0);
		// Nodes placed at increasing distances left of the pointer.
		let distances = [0.0, 50.0, 100.0, 199.0, 200.0];
		for d in distances {
			state.nodes.push(still_node(500.0 - d, 500.0));
		}

		state.step();
		let displacement: Vec<f64> = state
			.nodes
			.iter()
			.map(|n| dist_squared(n.x, n.y, n.base_x, n.base_y).sqrt())
			.collect();

		// Maximum at distance 0, zero at the radius, monotone in between.
		assert!((displacement[0] - 0.15 * 30.0).abs() < 1e-9);
		assert_eq!(displacement[4], 0.0);
		for pair in displacement.windows(2) {
			assert!(pair[0] >= pair[1]);
		}
		// Attraction pulls the offset nodes toward the pointer.
		assert!(state.nodes[1].x > state.nodes[1].base_x);
	}

	#[test]
	fn negative_strength_repels_from_pointer() {
		let config = FieldConfig {
			node_count: 0,
			pointer_strength: -0.15,
			..FieldConfig::default()
		};
		let mut state = state_with(config, 640.0, 480.0);
		state.nodes.push(still_node(320.0, 240.0));
		state.set_pointer(320.0, 240.0);

		state.step();
		let node = &state.nodes[0];
		assert!(dist_squared(node.x, node.y, 320.0, 240.0) > 0.0);
		// Base is untouched by the force.
		assert_eq!((node.base_x, node.base_y), (320.0, 240.0));
	}

	#[test]
	fn coincident_pair_connects_once_at_full_opacity() {
		let config = FieldConfig {
			node_count: 0,
			..FieldConfig::default()
		};
		let mut state = state_with(config, 640.0, 480.0);
		state.nodes.push(still_node(100.0, 100.0));
		state.nodes.push(still_node(100.0, 100.0));

		let connections = state.connections();
		assert_eq!(connections.len(), 1);
		assert_eq!(connections[0].a, 0);
		assert_eq!(connections[0].b, 1);
		assert_eq!(connections[0].opacity, 1.0);
	}

	#[test]
	fn connection_opacity_fades_with_distance_and_cuts_off() {
		let config = FieldConfig {
			node_count: 0,
			max_dist: 150.0,
			..FieldConfig::default()
		};
		let mut state = state_with(config, 640.0, 480.0);
		state.nodes.push(still_node(0.0, 0.0));
		state.nodes.push(still_node(149.9, 0.0)); // just inside
		state.nodes.push(still_node(0.0, 150.0)); // exactly at the cutoff
		state.nodes.push(still_node(400.0, 400.0)); // far away

		let connections = state.connections();
		assert_eq!(connections.len(), 1);
		assert_eq!((connections[0].a, connections[0].b), (0, 1));
		assert!(connections[0].opacity > 0.0 && connections[0].opacity < 0.001);
	}

	#[test]
	fn each_unordered_pair_appears_at_most_once() {
		let config = FieldConfig {
			node_count: 0,
			max_dist: 150.0,
			..FieldConfig::default()
		};
		let mut state = state_with(config, 640.0, 480.0);
		// Triangle with all sides inside the cutoff.
		state.nodes.push(still_node(0.0, 0.0));
		state.nodes.push(still_node(60.0, 0.0));
		state.nodes.push(still_node(30.0, 50.0));

		let connections = state.connections();
		assert_eq!(connections.len(), 3);
		for c in &connections {
			assert!(c.a < c.b);
		}
	}

	#[test]
	fn tracks_device_pixel_ratio_through_resize() {
		let mut state =
			ParticleFieldState::new(FieldConfig::default(), 640.0, 480.0, 2.0, &mut seeded_rng(7));
		assert_eq!(state.dpr, 2.0);

		// The display can move between monitors with different densities.
		state.resize(640.0, 480.0, 1.5, &mut seeded_rng(7));
		assert_eq!(state.dpr, 1.5);
	}

	#[test]
	fn resize_repopulates_only_when_empty() {
		let config = FieldConfig {
			node_count: 40,
			..FieldConfig::default()
		};
		let mut state = state_with(config, 640.0, 480.0);
		let mut rng = seeded_rng(11);

		// Occupied set: bounds change, entities stay put.
		let before: Vec<(f64, f64)> = state.nodes.iter().map(|n| (n.x, n.y)).collect();
		state.resize(300.0, 200.0, 1.0, &mut rng);
		let after: Vec<(f64, f64)> = state.nodes.iter().map(|n| (n.x, n.y)).collect();
		assert_eq!(before, after);
		assert_eq!((state.width, state.height), (300.0, 200.0));

		// Empty set: repopulated to the configured count inside the new bounds.
		state.nodes.clear();
		state.resize(300.0, 200.0, 1.0, &mut rng);
		assert_eq!(state.nodes.len(), 40);
		for node in &state.nodes {
			assert!((0.0..=300.0).contains(&node.x));
			assert!((0.0..=200.0).contains(&node.y));
		}
	}
}
