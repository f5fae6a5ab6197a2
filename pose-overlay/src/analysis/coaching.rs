//! Coaching feedback derived from a landmark sequence
//!
//! Two checks over the whole clip: how far the hitting (right) arm bends at
//! the elbow, and how much the head moves vertically from start to finish.

use crate::pose::{joint_angle, LandmarkSequence, NOSE, RIGHT_ELBOW, RIGHT_SHOULDER, RIGHT_WRIST};

/// Elbow angles below this are "quite bent"
const BENT_ARM_DEGREES: f32 = 90.0;

/// Vertical nose drift (fraction of frame height) tolerated over the clip
const HEAD_DRIFT_LIMIT: f32 = 0.05;

/// Feedback lines, elbow check first. The head line is only present when
/// the clip has a pose in both its first and last frame.
pub fn coaching_feedback(sequence: &LandmarkSequence) -> Vec<String> {
    let mut feedback = vec![elbow_feedback(sequence)];
    feedback.extend(head_feedback(sequence));
    feedback
}

/// Smallest right-elbow angle over all frames that contain the full arm
pub fn min_elbow_angle(sequence: &LandmarkSequence) -> Option<f32> {
    sequence
        .frames()
        .iter()
        .filter_map(|frame| {
            let shoulder = frame.point(RIGHT_SHOULDER)?;
            let elbow = frame.point(RIGHT_ELBOW)?;
            let wrist = frame.point(RIGHT_WRIST)?;
            joint_angle(shoulder, elbow, wrist)
        })
        .reduce(f32::min)
}

fn elbow_feedback(sequence: &LandmarkSequence) -> String {
    match min_elbow_angle(sequence) {
        Some(angle) if angle < BENT_ARM_DEGREES => format!(
            "Your arm is quite bent. The minimum elbow angle was {}°. Try to keep the arm straighter for more power.",
            angle as i32
        ),
        Some(_) => "Good arm extension! Your elbow angle looks solid.".to_string(),
        None => "Could not determine elbow angle. Make sure your arm is visible.".to_string(),
    }
}

/// Vertical nose movement between the first and last frame
pub fn head_drift(sequence: &LandmarkSequence) -> Option<f32> {
    if sequence.len() < 2 {
        return None;
    }
    let start = sequence.first()?.get(NOSE)?;
    let end = sequence.last()?.get(NOSE)?;
    Some((start.y - end.y).abs())
}

fn head_feedback(sequence: &LandmarkSequence) -> Option<String> {
    let line = if head_drift(sequence)? > HEAD_DRIFT_LIMIT {
        "You are moving your head vertically during the stroke. Try to keep your head still to improve balance and consistency."
    } else {
        "Excellent head stability! Keeping your head still is key."
    };
    Some(line.to_string())
}
