//! Playback module - keeps the skeleton overlay in sync with the video clock
//!
//! Re-exports only. All logic in submodules.

mod clock;
mod controller;
mod media;
mod scheduler;

pub use clock::resolve_frame_index;
pub use controller::{OverlayController, OverlayHost, OverlaySession, PlaybackState};
pub use media::{EventHandler, MediaEvent, MediaSource, SubscriptionId};
pub use scheduler::{FrameCallback, FrameHandle, FrameScheduler, RedrawLoop};
