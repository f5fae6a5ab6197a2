//! Media source contract - the video player seen as a playback clock

/// Player lifecycle notifications the overlay reacts to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MediaEvent {
    MetadataLoaded,
    Play,
    Pause,
    Ended,
    Seeked,
}

impl MediaEvent {
    pub const ALL: [MediaEvent; 5] = [
        MediaEvent::MetadataLoaded,
        MediaEvent::Play,
        MediaEvent::Pause,
        MediaEvent::Ended,
        MediaEvent::Seeked,
    ];

    /// DOM event name on an HTMLMediaElement
    pub fn dom_name(&self) -> &'static str {
        match self {
            MediaEvent::MetadataLoaded => "loadedmetadata",
            MediaEvent::Play => "play",
            MediaEvent::Pause => "pause",
            MediaEvent::Ended => "ended",
            MediaEvent::Seeked => "seeked",
        }
    }
}

/// Token returned by `subscribe`, used to remove the handler again
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Handler invoked on a media event
pub type EventHandler = Box<dyn FnMut()>;

/// A playing video: live clock, natural size and lifecycle events.
///
/// Handlers are invoked from the host event loop, never re-entrantly from
/// inside `subscribe`/`unsubscribe`.
pub trait MediaSource {
    /// Current playback position in seconds
    fn current_time(&self) -> f64;

    /// Total duration in seconds (`NaN` while unknown)
    fn duration(&self) -> f64;

    /// Natural (width, height) of the video, `None` before metadata is loaded
    fn natural_size(&self) -> Option<(u32, u32)>;

    fn is_paused(&self) -> bool;

    fn subscribe(&self, event: MediaEvent, handler: EventHandler) -> SubscriptionId;

    fn unsubscribe(&self, id: SubscriptionId);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dom_names() {
        let names: Vec<&str> = MediaEvent::ALL.iter().map(|e| e.dom_name()).collect();
        assert_eq!(names, ["loadedmetadata", "play", "pause", "ended", "seeked"]);
    }
}
