//! requestAnimationFrame as a frame scheduler

use crate::playback::{FrameCallback, FrameHandle, FrameScheduler};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

type Pending = RefCell<HashMap<i32, Closure<dyn FnMut()>>>;
type Retired = RefCell<Vec<Closure<dyn FnMut()>>>;

/// Keeps each pending JS closure alive until it fires or is cancelled.
///
/// A closure that fired cannot be freed while it is still running, so it is
/// parked in `retired` and released when the next frame fires.
pub struct AnimationFrameScheduler {
    window: web_sys::Window,
    pending: Rc<Pending>,
    retired: Rc<Retired>,
}

impl AnimationFrameScheduler {
    pub fn new(window: web_sys::Window) -> Self {
        Self {
            window,
            pending: Rc::new(RefCell::new(HashMap::new())),
            retired: Rc::new(RefCell::new(Vec::new())),
        }
    }
}

fn on_frame(pending: &Weak<Pending>, retired: &Weak<Retired>, id: i32) {
    let (pending, retired) = match (pending.upgrade(), retired.upgrade()) {
        (Some(p), Some(r)) => (p, r),
        _ => return,
    };
    // Closures from earlier frames have finished running
    let finished: Vec<_> = retired.borrow_mut().drain(..).collect();
    drop(finished);

    let fired = pending.borrow_mut().remove(&id);
    if let Some(closure) = fired {
        retired.borrow_mut().push(closure);
    }
}

impl FrameScheduler for AnimationFrameScheduler {
    fn request_frame(&self, callback: FrameCallback) -> FrameHandle {
        let pending = Rc::downgrade(&self.pending);
        let retired = Rc::downgrade(&self.retired);
        let id_slot = Rc::new(RefCell::new(None::<i32>));
        let id_in = Rc::clone(&id_slot);
        let mut callback = Some(callback);

        let closure = Closure::wrap(Box::new(move || {
            if let Some(id) = *id_in.borrow() {
                on_frame(&pending, &retired, id);
            }
            if let Some(callback) = callback.take() {
                callback();
            }
        }) as Box<dyn FnMut()>);

        match self.window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(id) => {
                *id_slot.borrow_mut() = Some(id);
                self.pending.borrow_mut().insert(id, closure);
                FrameHandle(id)
            }
            Err(err) => {
                log::warn!("requestAnimationFrame failed: {:?}", err);
                FrameHandle(-1)
            }
        }
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        if let Some(closure) = self.pending.borrow_mut().remove(&handle.0) {
            let _ = self.window.cancel_animation_frame(handle.0);
            drop(closure);
        }
    }
}

impl Drop for AnimationFrameScheduler {
    fn drop(&mut self) {
        for (id, _) in self.pending.borrow_mut().drain() {
            let _ = self.window.cancel_animation_frame(id);
        }
        // The last fired closure stays parked until here once the loop stops
        self.retired.borrow_mut().clear();
    }
}
