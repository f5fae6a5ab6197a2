//! In-memory host doubles for native tests

use crate::playback::{
    EventHandler, FrameCallback, FrameHandle, FrameScheduler, MediaEvent, MediaSource,
    SubscriptionId,
};
use crate::renderer::{Color, DrawSurface};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

/// One recorded surface operation
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    Resize(u32, u32),
    Clear,
    LineWidth(f64),
    StrokeColor(Color),
    FillColor(Color),
    Line((f64, f64), (f64, f64)),
    Circle((f64, f64), f64),
    Present,
}

/// Surface that records every call instead of drawing
pub struct RecordingSurface {
    pub width: u32,
    pub height: u32,
    pub calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, calls: Vec::new() }
    }

    pub fn lines(&self) -> Vec<((f64, f64), (f64, f64))> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Line(a, b) => Some((*a, *b)),
                _ => None,
            })
            .collect()
    }

    pub fn circles(&self) -> Vec<((f64, f64), f64)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Circle(p, r) => Some((*p, *r)),
                _ => None,
            })
            .collect()
    }

    pub fn style_calls(&self) -> Vec<DrawCall> {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::LineWidth(_) | DrawCall::StrokeColor(_) | DrawCall::FillColor(_)))
            .cloned()
            .collect()
    }

    /// Number of completed renders
    pub fn renders(&self) -> usize {
        self.calls.iter().filter(|c| **c == DrawCall::Present).count()
    }
}

impl DrawSurface for RecordingSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.calls.push(DrawCall::Resize(width, height));
    }

    fn clear(&mut self) {
        self.calls.push(DrawCall::Clear);
    }

    fn set_line_width(&mut self, width: f64) {
        self.calls.push(DrawCall::LineWidth(width));
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.calls.push(DrawCall::StrokeColor(color));
    }

    fn set_fill_color(&mut self, color: Color) {
        self.calls.push(DrawCall::FillColor(color));
    }

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64)) {
        self.calls.push(DrawCall::Line(from, to));
    }

    fn fill_circle(&mut self, center: (f64, f64), radius: f64) {
        self.calls.push(DrawCall::Circle(center, radius));
    }

    fn present(&mut self) {
        self.calls.push(DrawCall::Present);
    }
}

/// Scripted video player
pub struct FakeMedia {
    pub current_time: Cell<f64>,
    pub duration: Cell<f64>,
    pub natural_size: Cell<Option<(u32, u32)>>,
    pub paused: Cell<bool>,
    next_id: Cell<u64>,
    handlers: RefCell<Vec<(SubscriptionId, MediaEvent, Rc<RefCell<EventHandler>>)>>,
}

impl FakeMedia {
    pub fn new(duration: f64) -> Self {
        Self {
            current_time: Cell::new(0.0),
            duration: Cell::new(duration),
            natural_size: Cell::new(None),
            paused: Cell::new(true),
            next_id: Cell::new(0),
            handlers: RefCell::new(Vec::new()),
        }
    }

    pub fn subscription_count(&self) -> usize {
        self.handlers.borrow().len()
    }

    pub fn subscribed_events(&self) -> Vec<MediaEvent> {
        self.handlers.borrow().iter().map(|(_, e, _)| *e).collect()
    }

    /// Deliver an event to every current subscriber
    pub fn emit(&self, event: MediaEvent) {
        let targets: Vec<_> = self
            .handlers
            .borrow()
            .iter()
            .filter(|(_, e, _)| *e == event)
            .map(|(_, _, h)| Rc::clone(h))
            .collect();
        for handler in targets {
            (handler.borrow_mut())();
        }
    }

    pub fn load_metadata(&self, width: u32, height: u32) {
        self.natural_size.set(Some((width, height)));
        self.emit(MediaEvent::MetadataLoaded);
    }

    pub fn play(&self) {
        self.paused.set(false);
        self.emit(MediaEvent::Play);
    }

    pub fn pause(&self) {
        self.paused.set(true);
        self.emit(MediaEvent::Pause);
    }

    pub fn end(&self) {
        self.current_time.set(self.duration.get());
        self.paused.set(true);
        self.emit(MediaEvent::Pause);
        self.emit(MediaEvent::Ended);
    }

    pub fn seek(&self, time: f64) {
        self.current_time.set(time);
        self.emit(MediaEvent::Seeked);
    }
}

impl MediaSource for FakeMedia {
    fn current_time(&self) -> f64 {
        self.current_time.get()
    }

    fn duration(&self) -> f64 {
        self.duration.get()
    }

    fn natural_size(&self) -> Option<(u32, u32)> {
        self.natural_size.get()
    }

    fn is_paused(&self) -> bool {
        self.paused.get()
    }

    fn subscribe(&self, event: MediaEvent, handler: EventHandler) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.handlers
            .borrow_mut()
            .push((id, event, Rc::new(RefCell::new(handler))));
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.handlers.borrow_mut().retain(|(sid, _, _)| *sid != id);
    }
}

/// Scheduler whose refreshes are fired by hand
#[derive(Default)]
pub struct ManualScheduler {
    next: Cell<i32>,
    queue: RefCell<VecDeque<(FrameHandle, FrameCallback)>>,
    pub requested: Cell<usize>,
    pub cancelled: Cell<usize>,
    /// Simulate a host that cannot retract an already-queued callback
    pub ignore_cancel: Cell<bool>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Fire every callback queued before this refresh. Returns how many ran.
    pub fn tick(&self) -> usize {
        let due: Vec<_> = self.queue.borrow_mut().drain(..).collect();
        let count = due.len();
        for (_, callback) in due {
            callback();
        }
        count
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&self, callback: FrameCallback) -> FrameHandle {
        let handle = FrameHandle(self.next.get());
        self.next.set(handle.0 + 1);
        self.requested.set(self.requested.get() + 1);
        self.queue.borrow_mut().push_back((handle, callback));
        handle
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        if self.ignore_cancel.get() {
            return;
        }
        let mut queue = self.queue.borrow_mut();
        let before = queue.len();
        queue.retain(|(h, _)| *h != handle);
        if queue.len() < before {
            self.cancelled.set(self.cancelled.get() + 1);
        }
    }
}
