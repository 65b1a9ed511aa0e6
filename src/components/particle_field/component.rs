use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::error;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

use super::config::FieldConfig;
use super::driver::FrameLoop;
use super::render::{self, RenderMode};
use super::state::ParticleFieldState;
use super::surface;

/// Animated particle-network background canvas.
///
/// Owns its simulation state and frame loop; the host page only supplies the
/// container bounds and pointer/resize events. Pointer tracking is attached
/// to the window because the canvas itself ignores pointer events (it sits
/// behind the page content).
#[component]
pub fn ParticleFieldCanvas(
	#[prop(default = FieldConfig::default())] config: FieldConfig,
	#[prop(default = RenderMode::Glow)] mode: RenderMode,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<ParticleFieldState>>> = Rc::new(RefCell::new(None));
	let frame_loop = FrameLoop::new();
	let pointer_cb: Rc<RefCell<Option<Closure<dyn FnMut(MouseEvent)>>>> =
		Rc::new(RefCell::new(None));
	let leave_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (state_init, loop_init, pointer_cb_init, leave_cb_init, resize_cb_init) = (
		state.clone(),
		frame_loop.clone(),
		pointer_cb.clone(),
		leave_cb.clone(),
		resize_cb.clone(),
	);

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			error!("particle field container missing; renderer not started");
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let window: Window = web_sys::window().unwrap();
		let dpr = window.device_pixel_ratio().max(1.0);

		let ctx: CanvasRenderingContext2d = match canvas.get_context("2d") {
			Ok(Some(ctx)) => ctx.dyn_into().unwrap(),
			_ => {
				error!("2d context unavailable; renderer not started");
				return;
			}
		};

		let bounds = container_bounds(&canvas, &window, fullscreen, width, height);
		let (w, h) = surface::fit_to_container(&canvas, &ctx, bounds, dpr);
		*state_init.borrow_mut() = Some(ParticleFieldState::new(
			config.clone(),
			w,
			h,
			dpr,
			&mut || js_sys::Math::random(),
		));

		let (state_mm, canvas_mm) = (state_init.clone(), canvas.clone());
		*pointer_cb_init.borrow_mut() = Some(Closure::new(move |ev: MouseEvent| {
			let rect = canvas_mm.get_bounding_client_rect();
			if let Some(ref mut s) = *state_mm.borrow_mut() {
				s.set_pointer(
					ev.client_x() as f64 - rect.left(),
					ev.client_y() as f64 - rect.top(),
				);
			}
		}));
		if let Some(ref cb) = *pointer_cb_init.borrow() {
			let _ =
				window.add_event_listener_with_callback("mousemove", cb.as_ref().unchecked_ref());
		}

		let state_ml = state_init.clone();
		*leave_cb_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut s) = *state_ml.borrow_mut() {
				s.clear_pointer();
			}
		}));
		if let Some(ref cb) = *leave_cb_init.borrow() {
			let _ =
				window.add_event_listener_with_callback("mouseleave", cb.as_ref().unchecked_ref());
		}

		let (state_resize, canvas_resize, ctx_resize) =
			(state_init.clone(), canvas.clone(), ctx.clone());
		*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
			let win: Window = web_sys::window().unwrap();
			let bounds = container_bounds(&canvas_resize, &win, fullscreen, width, height);
			let dpr = win.device_pixel_ratio().max(1.0);
			let (nw, nh) = surface::fit_to_container(&canvas_resize, &ctx_resize, bounds, dpr);
			if let Some(ref mut s) = *state_resize.borrow_mut() {
				s.resize(nw, nh, dpr, &mut || js_sys::Math::random());
			}
		}));
		if let Some(ref cb) = *resize_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let state_anim = state_init.clone();
		loop_init.start(move || {
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				s.step();
				render::render(s, mode, &ctx);
			}
		});
	});

	// `on_cleanup` demands `Send + Sync`, but these handles are wasm-only
	// single-threaded types; `SendWrapper` asserts that invariant.
	let cleanup = send_wrapper::SendWrapper::new(move || {
		frame_loop.stop();
		// Detach the window listeners before their closures drop with the
		// component; a stray event after unmount must not reach freed code.
		let window = web_sys::window().unwrap();
		if let Some(cb) = pointer_cb.borrow_mut().take() {
			let _ = window
				.remove_event_listener_with_callback("mousemove", cb.as_ref().unchecked_ref());
		}
		if let Some(cb) = leave_cb.borrow_mut().take() {
			let _ = window
				.remove_event_listener_with_callback("mouseleave", cb.as_ref().unchecked_ref());
		}
		if let Some(cb) = resize_cb.borrow_mut().take() {
			let _ =
				window.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}
	});
	on_cleanup(move || cleanup.take()());

	view! {
		<canvas
			node_ref=canvas_ref
			class="particle-field-canvas"
			style="position: absolute; top: 0; left: 0; width: 100%; height: 100%; pointer-events: none;"
		/>
	}
}

fn container_bounds(
	canvas: &HtmlCanvasElement,
	window: &Window,
	fullscreen: bool,
	width: Option<f64>,
	height: Option<f64>,
) -> (f64, f64) {
	if fullscreen {
		(
			window.inner_width().unwrap().as_f64().unwrap(),
			window.inner_height().unwrap().as_f64().unwrap(),
		)
	} else {
		(
			width.unwrap_or_else(|| {
				canvas
					.parent_element()
					.map(|p| p.client_width() as f64)
					.unwrap_or(800.0)
			}),
			height.unwrap_or_else(|| {
				canvas
					.parent_element()
					.map(|p| p.client_height() as f64)
					.unwrap_or(600.0)
			}),
		)
	}
}
