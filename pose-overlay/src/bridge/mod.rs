//! Bridge module - JS ↔ Rust communication
//!
//! All #[wasm_bindgen] entry points live here.
//! Re-exports only in mod.rs, logic in submodules.

mod animation;
mod app;
mod http;
mod video;

pub use animation::AnimationFrameScheduler;
pub use video::VideoElementSource;

#[cfg(target_arch = "wasm32")]
pub use app::attach_gpu_overlay;
pub use app::{
    analyze_video, attach_overlay, configure, detach_overlay, get_feedback_html, get_frame_count,
    get_rendered_frame, get_status_message, is_analyzing, reset_session,
};
