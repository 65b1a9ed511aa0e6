use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::ParticleFieldState;

/// Node-painting strategy, chosen once when the component mounts. `Debug`
/// replaces the glow pass with high-contrast magenta markers plus an overlay
/// of the renderer's vitals.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RenderMode {
	#[default]
	Glow,
	Debug,
}

/// Paint one frame, back to front: background, stars, connection lines,
/// nodes.
pub fn render(state: &ParticleFieldState, mode: RenderMode, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(state.config.palette.background);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);

	draw_stars(state, ctx);
	draw_connections(state, ctx);
	match mode {
		RenderMode::Glow => draw_nodes_glow(state, ctx),
		RenderMode::Debug => draw_nodes_debug(state, ctx),
	}
}

fn draw_stars(state: &ParticleFieldState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(&state.config.palette.star.css());
	for star in &state.stars {
		ctx.set_global_alpha(star.opacity);
		ctx.begin_path();
		let _ = ctx.arc(star.x, star.y, star.radius, 0.0, 2.0 * PI);
		ctx.fill();
	}
	ctx.set_global_alpha(1.0);
}

fn draw_connections(state: &ParticleFieldState, ctx: &CanvasRenderingContext2d) {
	ctx.set_line_width(state.config.line_width);
	for connection in state.connections() {
		let (a, b) = (&state.nodes[connection.a], &state.nodes[connection.b]);
		ctx.set_stroke_style_str(
			&state
				.config
				.palette
				.line
				.scale_alpha(connection.opacity)
				.css(),
		);
		ctx.begin_path();
		ctx.move_to(a.x, a.y);
		ctx.line_to(b.x, b.y);
		ctx.stroke();
	}
}

fn draw_nodes_glow(state: &ParticleFieldState, ctx: &CanvasRenderingContext2d) {
	let glow = state.config.palette.node_glow;

	for node in &state.nodes {
		// The whole node layer paints at half opacity.
		ctx.set_global_alpha(0.5);

		let glow_radius = node.radius * state.config.glow_scale;
		let gradient = ctx
			.create_radial_gradient(node.x, node.y, 0.0, node.x, node.y, glow_radius)
			.unwrap();
		gradient.add_color_stop(0.0, &glow.css()).unwrap();
		gradient
			.add_color_stop(0.4, &glow.scale_alpha(0.5).css())
			.unwrap();
		gradient
			.add_color_stop(1.0, &glow.scale_alpha(0.0).css())
			.unwrap();
		ctx.begin_path();
		let _ = ctx.arc(node.x, node.y, glow_radius, 0.0, 2.0 * PI);
		#[allow(deprecated)]
		ctx.set_fill_style(&gradient);
		ctx.fill();

		ctx.set_fill_style_str(state.config.palette.node);
		ctx.begin_path();
		let _ = ctx.arc(node.x, node.y, node.radius, 0.0, 2.0 * PI);
		ctx.fill();

		// Subtle inner glow on top of the core.
		ctx.set_fill_style_str(&glow.css());
		ctx.begin_path();
		let _ = ctx.arc(node.x, node.y, node.radius * 0.7, 0.0, 2.0 * PI);
		ctx.fill();
	}

	// Later phases must not inherit the node layer's opacity.
	ctx.set_global_alpha(1.0);
}

fn draw_nodes_debug(state: &ParticleFieldState, ctx: &CanvasRenderingContext2d) {
	ctx.set_global_alpha(1.0);

	for node in &state.nodes {
		ctx.set_stroke_style_str("#FF00FF");
		ctx.set_line_width(2.0);
		ctx.begin_path();
		let _ = ctx.arc(node.x, node.y, 10.0, 0.0, 2.0 * PI);
		ctx.stroke();

		ctx.set_fill_style_str("#FF00FF");
		ctx.begin_path();
		let _ = ctx.arc(node.x, node.y, 5.0, 0.0, 2.0 * PI);
		ctx.fill();
	}

	ctx.set_fill_style_str("#FF00FF");
	ctx.set_font("16px monospace");
	let _ = ctx.fill_text(&format!("NODES: {}", state.nodes.len()), 10.0, 20.0);
	let _ = ctx.fill_text(
		&format!("CANVAS: {}x{}", state.width.round(), state.height.round()),
		10.0,
		40.0,
	);
	let _ = ctx.fill_text(&format!("DPR: {}", state.dpr), 10.0, 60.0);
}
