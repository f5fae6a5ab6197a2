//! Joint angle calculation using dot product
//!
//! Angle at a middle joint (e.g. elbow) between the segments towards its
//! two neighbours (shoulder and wrist).

/// Calculate the angle at `joint` in degrees (0-180)
///
/// Uses dot product formula: cos(θ) = (v1 · v2) / (|v1| × |v2|)
///
/// - 90° = bent at a right angle
/// - 180° = fully straight
///
/// Returns `None` when a segment is too short to define a direction.
pub fn joint_angle(
    first: (f32, f32),
    joint: (f32, f32),
    last: (f32, f32),
) -> Option<f32> {
    let v1 = (first.0 - joint.0, first.1 - joint.1);
    let v2 = (last.0 - joint.0, last.1 - joint.1);

    let dot = v1.0 * v2.0 + v1.1 * v2.1;

    let mag1 = (v1.0 * v1.0 + v1.1 * v1.1).sqrt();
    let mag2 = (v2.0 * v2.0 + v2.1 * v2.1).sqrt();

    if mag1 < 0.0001 || mag2 < 0.0001 {
        return None;
    }

    let cos_angle = (dot / (mag1 * mag2)).clamp(-1.0, 1.0);
    Some(cos_angle.acos().to_degrees())
}
