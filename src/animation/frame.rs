use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::Window;

struct FrameState {
    window: Window,
    handle: Cell<Option<i32>>,
    callback: RefCell<Option<Closure<dyn FnMut(f64)>>>,
}

impl FrameState {
    fn schedule(&self) {
        if let Some(callback) = self.callback.borrow().as_ref() {
            let handle = self
                .window
                .request_animation_frame(callback.as_ref().unchecked_ref())
                .ok();
            self.handle.set(handle);
        }
    }
}

/// A `requestAnimationFrame` loop. The callback receives the frame time in
/// seconds and returns whether it wants another frame. Dropping the loop
/// cancels any pending frame.
pub struct FrameLoop {
    state: Rc<FrameState>,
}

impl FrameLoop {
    pub fn start(mut on_frame: impl FnMut(f64) -> bool + 'static) -> Option<Self> {
        let window = web_sys::window()?;
        let state = Rc::new(FrameState {
            window,
            handle: Cell::new(None),
            callback: RefCell::new(None),
        });

        let weak = Rc::downgrade(&state);
        let callback = Closure::wrap(Box::new(move |timestamp: f64| {
            let Some(state) = weak.upgrade() else {
                return;
            };
            state.handle.set(None);
            if on_frame(timestamp / 1000.0) {
                state.schedule();
            }
        }) as Box<dyn FnMut(f64)>);

        *state.callback.borrow_mut() = Some(callback);
        state.schedule();
        Some(Self { state })
    }

    pub fn stop(&self) {
        if let Some(handle) = self.state.handle.take() {
            let _ = self.state.window.cancel_animation_frame(handle);
        }
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.stop();
        self.state.callback.borrow_mut().take();
    }
}
