//! Video element as a media source - DOM events and the live clock

use crate::playback::{EventHandler, MediaEvent, MediaSource, SubscriptionId};
use std::cell::{Cell, RefCell};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlVideoElement;

/// `HTMLMediaElement.HAVE_METADATA`
const HAVE_METADATA: u16 = 1;

struct Listener {
    id: SubscriptionId,
    event: MediaEvent,
    closure: Closure<dyn FnMut()>,
}

/// Wraps an `HtmlVideoElement`. Each subscription owns its JS closure
/// until it is unsubscribed or the source is dropped.
pub struct VideoElementSource {
    video: HtmlVideoElement,
    next_id: Cell<u64>,
    listeners: RefCell<Vec<Listener>>,
}

impl VideoElementSource {
    pub fn new(video: HtmlVideoElement) -> Self {
        Self {
            video,
            next_id: Cell::new(0),
            listeners: RefCell::new(Vec::new()),
        }
    }

    fn detach(&self, listener: &Listener) {
        let _ = self.video.remove_event_listener_with_callback(
            listener.event.dom_name(),
            listener.closure.as_ref().unchecked_ref(),
        );
    }
}

impl MediaSource for VideoElementSource {
    fn current_time(&self) -> f64 {
        self.video.current_time()
    }

    fn duration(&self) -> f64 {
        self.video.duration()
    }

    fn natural_size(&self) -> Option<(u32, u32)> {
        if self.video.ready_state() < HAVE_METADATA {
            return None;
        }
        match (self.video.video_width(), self.video.video_height()) {
            (0, _) | (_, 0) => None,
            size => Some(size),
        }
    }

    fn is_paused(&self) -> bool {
        self.video.paused()
    }

    fn subscribe(&self, event: MediaEvent, handler: EventHandler) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);

        let closure = Closure::wrap(handler);
        if let Err(err) = self
            .video
            .add_event_listener_with_callback(event.dom_name(), closure.as_ref().unchecked_ref())
        {
            log::warn!("Failed to listen for '{}': {:?}", event.dom_name(), err);
        }

        self.listeners.borrow_mut().push(Listener { id, event, closure });
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        let removed = {
            let mut listeners = self.listeners.borrow_mut();
            listeners
                .iter()
                .position(|l| l.id == id)
                .map(|pos| listeners.remove(pos))
        };
        if let Some(listener) = removed {
            self.detach(&listener);
        }
    }
}

impl Drop for VideoElementSource {
    fn drop(&mut self) {
        for listener in self.listeners.take() {
            self.detach(&listener);
        }
    }
}
