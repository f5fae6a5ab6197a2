//! Skeleton rendering - draws bones and joints for one landmark frame

use super::surface::{Color, DrawSurface};
use crate::error::ConfigError;
use crate::pose::{Landmark, LandmarkFrame, POSE_CONNECTIONS};
use serde::Deserialize;

/// Default drawing policy
mod defaults {
    use super::Color;

    /// Landmarks at or below this confidence are not drawn
    pub const VISIBILITY_THRESHOLD: f32 = 0.5;
    /// Bone lines
    pub const LIME: Color = Color::rgb(0, 255, 0);
    /// Joint markers
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const LINE_WIDTH: f64 = 4.0;
    pub const JOINT_RADIUS: f64 = 5.0;
}

/// Fixed visual policy for one overlay: threshold, colors, sizes
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SkeletonStyle {
    pub visibility_threshold: f32,
    pub bone_color: Color,
    pub joint_color: Color,
    /// Bone stroke width in pixels
    pub line_width: f64,
    /// Joint marker radius in pixels
    pub joint_radius: f64,
}

impl Default for SkeletonStyle {
    fn default() -> Self {
        Self {
            visibility_threshold: defaults::VISIBILITY_THRESHOLD,
            bone_color: defaults::LIME,
            joint_color: defaults::RED,
            line_width: defaults::LINE_WIDTH,
            joint_radius: defaults::JOINT_RADIUS,
        }
    }
}

impl SkeletonStyle {
    pub fn is_visible(&self, landmark: &Landmark) -> bool {
        landmark.visibility > self.visibility_threshold
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.visibility_threshold) {
            return Err(ConfigError::OutOfRange {
                field: "visibility_threshold",
                reason: format!("{} is outside [0, 1]", self.visibility_threshold),
            });
        }
        if !(self.line_width > 0.0) {
            return Err(ConfigError::OutOfRange {
                field: "line_width",
                reason: format!("{} must be positive", self.line_width),
            });
        }
        if !(self.joint_radius > 0.0) {
            return Err(ConfigError::OutOfRange {
                field: "joint_radius",
                reason: format!("{} must be positive", self.joint_radius),
            });
        }
        Ok(())
    }
}

/// Render one landmark frame onto the surface.
///
/// Clears first, then draws every bone whose two endpoints are present and
/// visible, then every visible joint on top. `None` leaves the surface
/// untouched.
pub fn render_skeleton(
    frame: Option<&LandmarkFrame>,
    surface: &mut dyn DrawSurface,
    style: &SkeletonStyle,
) {
    let frame = match frame {
        Some(f) => f,
        None => return,
    };

    let (width, height) = surface.size();
    let (width, height) = (width as f64, height as f64);

    surface.clear();

    surface.set_line_width(style.line_width);
    surface.set_stroke_color(style.bone_color);
    for (start_idx, end_idx) in POSE_CONNECTIONS.iter() {
        let (start, end) = match (frame.get(*start_idx), frame.get(*end_idx)) {
            (Some(s), Some(e)) => (s, e),
            _ => continue,
        };
        if !style.is_visible(start) || !style.is_visible(end) {
            continue;
        }
        surface.stroke_line(start.scaled(width, height), end.scaled(width, height));
    }

    surface.set_fill_color(style.joint_color);
    for landmark in frame.iter().filter(|lm| style.is_visible(lm)) {
        surface.fill_circle(landmark.scaled(width, height), style.joint_radius);
    }

    surface.present();
}
