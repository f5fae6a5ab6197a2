//! Playback-synchronized overlay controller
//!
//! Keeps the drawn skeleton in step with the video clock. While playing, a
//! redraw loop re-resolves the landmark frame on every display refresh;
//! otherwise the overlay is redrawn once per seek, pause or end.
//!
//! `OverlaySession` is the single resource scope: `open` takes all five
//! event subscriptions, `close` cancels the pending redraw and drops them
//! again. Every callback holds only a `Weak` reference to the session state,
//! so nothing can reach the renderer once the session is closed.

use super::clock::resolve_frame_index;
use super::media::{MediaEvent, MediaSource, SubscriptionId};
use super::scheduler::{FrameScheduler, RedrawLoop};
use crate::pose::LandmarkSequence;
use crate::renderer::{render_skeleton, DrawSurface, SkeletonStyle};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Host collaborators shared by the overlay (WASM is single-threaded)
#[derive(Clone)]
pub struct OverlayHost {
    pub media: Rc<dyn MediaSource>,
    pub surface: Rc<RefCell<dyn DrawSurface>>,
    pub scheduler: Rc<dyn FrameScheduler>,
}

/// Player state as seen by the overlay
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    /// Metadata not loaded yet, nothing is drawn
    Idle,
    /// Ready or paused: redraw on seek only
    Paused,
    /// Redraw loop running
    Playing,
    /// Like paused, last resolved frame stays on screen
    Ended,
}

struct OverlayState {
    this: Weak<RefCell<OverlayState>>,
    host: OverlayHost,
    sequence: LandmarkSequence,
    style: SkeletonStyle,
    playback: PlaybackState,
    /// Surface sized to the video; drawing is suppressed until then
    sized: bool,
    redraw: RedrawLoop,
    rendered: Option<usize>,
}

impl OverlayState {
    /// Catch up with a player that was set up before the session opened
    fn attach(&mut self) {
        self.size_surface();
        if !self.host.media.is_paused() {
            self.playback = PlaybackState::Playing;
            self.start_loop();
        }
    }

    fn on_event(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::MetadataLoaded => self.size_surface(),
            MediaEvent::Play => {
                self.playback = PlaybackState::Playing;
                self.start_loop();
            }
            MediaEvent::Pause => {
                self.stop_loop();
                self.playback = PlaybackState::Paused;
                self.redraw_current();
            }
            MediaEvent::Ended => {
                self.stop_loop();
                self.playback = PlaybackState::Ended;
                self.redraw_current();
            }
            MediaEvent::Seeked => self.redraw_current(),
        }
    }

    fn size_surface(&mut self) {
        let (width, height) = match self.host.media.natural_size() {
            Some(size) => size,
            None => return,
        };
        self.host.surface.borrow_mut().resize(width, height);
        self.sized = true;
        if self.playback == PlaybackState::Idle {
            self.playback = PlaybackState::Paused;
        }
    }

    fn start_loop(&mut self) {
        if let Some(epoch) = self.redraw.activate() {
            self.schedule_cycle(epoch);
        }
    }

    fn stop_loop(&mut self) {
        if let Some(handle) = self.redraw.deactivate() {
            self.host.scheduler.cancel_frame(handle);
        }
    }

    fn schedule_cycle(&mut self, epoch: u64) {
        let this = self.this.clone();
        let handle = self.host.scheduler.request_frame(Box::new(move || {
            if let Some(state) = this.upgrade() {
                if let Ok(mut state) = state.try_borrow_mut() {
                    state.run_cycle(epoch);
                }
            }
        }));
        self.redraw.arm(handle);
    }

    fn run_cycle(&mut self, epoch: u64) {
        if !self.redraw.accept(epoch) {
            return;
        }
        self.redraw_current();
        self.schedule_cycle(epoch);
    }

    /// Resolve the frame for the current playback position and draw it.
    /// Unresolvable positions leave the previous drawing in place.
    fn redraw_current(&mut self) {
        if !self.sized {
            return;
        }
        let media = &self.host.media;
        let index = match resolve_frame_index(media.current_time(), media.duration(), self.sequence.len()) {
            Some(i) => i,
            None => return,
        };

        let mut surface = self.host.surface.borrow_mut();
        render_skeleton(self.sequence.frame(index), &mut *surface, &self.style);
        self.rendered = Some(index);
    }
}

/// One activation of the overlay for one landmark sequence.
///
/// Closing (explicitly or on drop) cancels the pending redraw first, then
/// removes every event subscription.
pub struct OverlaySession {
    state: Option<Rc<RefCell<OverlayState>>>,
    media: Rc<dyn MediaSource>,
    subscriptions: Vec<SubscriptionId>,
}

impl OverlaySession {
    pub fn open(host: OverlayHost, sequence: LandmarkSequence, style: SkeletonStyle) -> Self {
        let media = Rc::clone(&host.media);
        let frames = sequence.len();

        let state = Rc::new_cyclic(|this| {
            RefCell::new(OverlayState {
                this: this.clone(),
                host,
                sequence,
                style,
                playback: PlaybackState::Idle,
                sized: false,
                redraw: RedrawLoop::new(),
                rendered: None,
            })
        });

        let subscriptions = MediaEvent::ALL
            .iter()
            .map(|&event| {
                let weak = Rc::downgrade(&state);
                media.subscribe(
                    event,
                    Box::new(move || {
                        if let Some(state) = weak.upgrade() {
                            if let Ok(mut state) = state.try_borrow_mut() {
                                state.on_event(event);
                            }
                        }
                    }),
                )
            })
            .collect();

        state.borrow_mut().attach();
        log::info!("Overlay session opened ({} landmark frames)", frames);

        Self { state: Some(state), media, subscriptions }
    }

    pub fn close(&mut self) {
        let state = match self.state.take() {
            Some(s) => s,
            None => return,
        };

        // Cancel before disconnect
        state.borrow_mut().stop_loop();
        for id in self.subscriptions.drain(..) {
            self.media.unsubscribe(id);
        }
        drop(state);

        log::info!("Overlay session closed");
    }

    pub fn is_open(&self) -> bool {
        self.state.is_some()
    }

    pub fn playback_state(&self) -> Option<PlaybackState> {
        self.state.as_ref().map(|s| s.borrow().playback)
    }

    /// Index of the last landmark frame drawn
    pub fn rendered_index(&self) -> Option<usize> {
        self.state.as_ref().and_then(|s| s.borrow().rendered)
    }

    pub fn sequence(&self) -> Option<LandmarkSequence> {
        self.state.as_ref().map(|s| s.borrow().sequence.clone())
    }
}

impl Drop for OverlaySession {
    fn drop(&mut self) {
        self.close();
    }
}

/// Owns the overlay for whichever landmark sequence is current.
///
/// Inert until a non-empty sequence is loaded; replacing or clearing the
/// sequence closes the previous session first.
pub struct OverlayController {
    host: OverlayHost,
    style: SkeletonStyle,
    session: Option<OverlaySession>,
}

impl OverlayController {
    pub fn new(host: OverlayHost, style: SkeletonStyle) -> Self {
        Self { host, style, session: None }
    }

    pub fn load(&mut self, sequence: Option<LandmarkSequence>) {
        if let (Some(current), Some(next)) = (self.sequence(), sequence.as_ref()) {
            if current.ptr_eq(next) {
                return;
            }
        }

        self.unload();
        match sequence {
            Some(seq) if !seq.is_empty() => {
                self.session = Some(OverlaySession::open(self.host.clone(), seq, self.style.clone()));
            }
            Some(_) => log::debug!("Empty landmark sequence, overlay stays inert"),
            None => {}
        }
    }

    pub fn unload(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.close();
        }
    }

    pub fn is_active(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.is_open())
    }

    pub fn playback_state(&self) -> Option<PlaybackState> {
        self.session.as_ref().and_then(|s| s.playback_state())
    }

    pub fn rendered_index(&self) -> Option<usize> {
        self.session.as_ref().and_then(|s| s.rendered_index())
    }

    pub fn sequence(&self) -> Option<LandmarkSequence> {
        self.session.as_ref().and_then(|s| s.sequence())
    }
}
