//! Pose module - landmark data model and skeleton topology
//!
//! Re-exports only. All logic in submodules.

mod angles;
mod connections;
mod landmarks;

pub use angles::joint_angle;
pub use connections::{BoneConnection, POSE_CONNECTIONS};
pub use landmarks::*;
