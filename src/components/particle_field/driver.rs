use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;

/// Running/handle bookkeeping behind the frame loop, kept free of `web_sys`
/// so the transitions can be asserted directly.
///
/// At most one frame handle is pending while running; halting takes it so
/// the caller can cancel, and halting again finds nothing.
#[derive(Clone, Copy, Debug, Default)]
struct LoopState {
	running: bool,
	frame: Option<i32>,
}

impl LoopState {
	/// Stopped → Running. Returns false when already running.
	fn begin(&mut self) -> bool {
		if self.running {
			return false;
		}
		self.running = true;
		true
	}

	fn schedule(&mut self, id: i32) {
		self.frame = Some(id);
	}

	/// A scheduled frame fired, spending its handle. Returns whether the
	/// tick should run.
	fn fire(&mut self) -> bool {
		self.frame = None;
		self.running
	}

	/// Running → Stopped. Yields the pending handle for cancellation, if
	/// any. Idempotent.
	fn halt(&mut self) -> Option<i32> {
		self.running = false;
		self.frame.take()
	}
}

/// A stopped/running state machine over `requestAnimationFrame`.
///
/// No tick runs after `stop` returns. There is no paused state and no
/// throttling beyond the display's refresh cadence.
#[derive(Clone)]
pub struct FrameLoop {
	callback: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
	state: Rc<RefCell<LoopState>>,
}

impl FrameLoop {
	pub fn new() -> Self {
		Self {
			callback: Rc::new(RefCell::new(None)),
			state: Rc::new(RefCell::new(LoopState::default())),
		}
	}

	pub fn is_running(&self) -> bool {
		self.state.borrow().running
	}

	/// Begin running `tick` once per display refresh. No-op when already
	/// running.
	pub fn start(&self, mut tick: impl FnMut() + 'static) {
		if !self.state.borrow_mut().begin() {
			return;
		}

		let (state, callback) = (self.state.clone(), self.callback.clone());
		*self.callback.borrow_mut() = Some(Closure::new(move || {
			if !state.borrow_mut().fire() {
				return;
			}
			tick();
			// A tick may have stopped the loop; only then skip rescheduling.
			if !state.borrow().running {
				return;
			}
			if let Some(ref cb) = *callback.borrow() {
				if let Ok(id) = web_sys::window()
					.unwrap()
					.request_animation_frame(cb.as_ref().unchecked_ref())
				{
					state.borrow_mut().schedule(id);
				}
			}
		}));
		if let Some(ref cb) = *self.callback.borrow() {
			if let Ok(id) = web_sys::window()
				.unwrap()
				.request_animation_frame(cb.as_ref().unchecked_ref())
			{
				self.state.borrow_mut().schedule(id);
			}
		}
	}

	/// Cancel the pending frame and return to stopped. Idempotent.
	pub fn stop(&self) {
		if let Some(id) = self.state.borrow_mut().halt() {
			let _ = web_sys::window().unwrap().cancel_animation_frame(id);
		}
	}
}

impl Default for FrameLoop {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn start_then_stop_leaves_no_pending_frame() {
		let mut state = LoopState::default();
		assert!(state.begin());
		state.schedule(7);

		// The pending handle comes back exactly once, for cancellation.
		assert_eq!(state.halt(), Some(7));
		assert!(!state.running);
		assert_eq!(state.frame, None);

		// A frame that slips through after stop must not tick.
		assert!(!state.fire());
	}

	#[test]
	fn stop_twice_is_equivalent_to_stop_once() {
		let mut state = LoopState::default();
		state.begin();
		state.schedule(3);

		assert_eq!(state.halt(), Some(3));
		assert_eq!(state.halt(), None);
		assert!(!state.running);
	}

	#[test]
	fn begin_is_a_noop_while_running() {
		let mut state = LoopState::default();
		assert!(state.begin());
		assert!(!state.begin());

		// Restartable after a halt.
		state.halt();
		assert!(state.begin());
	}

	#[test]
	fn fired_frame_spends_its_handle() {
		let mut state = LoopState::default();
		state.begin();
		state.schedule(5);

		assert!(state.fire());
		// Nothing left to cancel once the frame ran.
		assert_eq!(state.halt(), None);
	}
}
