use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// Size the canvas backing store to the container bounds scaled by the device
/// pixel ratio, and scale the context so all drawing stays in layout pixels.
/// Returns the logical `(width, height)` the renderer should work in.
///
/// Applied on first mount and again on every resize notification.
pub fn fit_to_container(
	canvas: &HtmlCanvasElement,
	ctx: &CanvasRenderingContext2d,
	bounds: (f64, f64),
	dpr: f64,
) -> (f64, f64) {
	let (width, height) = bounds;
	canvas.set_width((width * dpr) as u32);
	canvas.set_height((height * dpr) as u32);
	let _ = ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
	(width, height)
}
