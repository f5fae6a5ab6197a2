//! Frame-index resolution - maps the playback clock onto landmark samples
//!
//! Samples are assumed evenly spread over the whole video, so the mapping is
//! proportional: sample `i` covers `[i/len, (i+1)/len)` of the duration.

/// Resolve which landmark frame corresponds to the current playback time.
///
/// ```text
/// progress = current_time / duration
/// index    = clamp(floor(progress * len), 0, len - 1)
/// ```
///
/// Returns `None` (skip this draw) for an empty sequence, an unknown or
/// non-positive duration, or an undefined current time.
pub fn resolve_frame_index(current_time: f64, duration: f64, len: usize) -> Option<usize> {
    if len == 0 || !duration.is_finite() || duration <= 0.0 || current_time.is_nan() {
        return None;
    }

    let progress = current_time / duration;
    let raw = (progress * len as f64).floor();

    // At current_time == duration raw == len; the clamp pulls it back in range
    let index = raw.clamp(0.0, (len - 1) as f64);
    Some(index as usize)
}
