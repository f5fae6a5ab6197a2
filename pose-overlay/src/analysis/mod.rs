//! Analysis module - the upload/review cycle around the overlay
//!
//! Re-exports only. All logic in submodules.

mod coaching;
mod feedback;
mod response;
mod session;

pub use coaching::{coaching_feedback, head_drift, min_elbow_angle};
pub use feedback::feedback_markup;
pub use response::AnalysisResponse;
pub use session::{AnalysisSession, AnalysisStatus, RequestTicket};
