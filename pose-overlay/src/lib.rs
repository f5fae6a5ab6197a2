//! Pose Overlay - skeleton overlay synchronized with video playback
//!
//! Entry point for WASM module. Only contains:
//! - Module declarations
//! - The wasm start hook
//!
//! The JS entry points live in `bridge`.

pub mod analysis;
pub mod config;
pub mod error;
pub mod playback;
pub mod pose;
pub mod renderer;

mod bridge;
mod logging;
#[cfg(test)]
mod testing;

use wasm_bindgen::prelude::*;

// Re-export wasm_bindgen functions for JS access
#[cfg(target_arch = "wasm32")]
pub use bridge::attach_gpu_overlay;
pub use bridge::{
    analyze_video, attach_overlay, configure, detach_overlay, get_feedback_html, get_frame_count,
    get_rendered_frame, get_status_message, is_analyzing, reset_session,
};
pub use bridge::{AnimationFrameScheduler, VideoElementSource};

/// Called automatically when WASM module loads
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
    logging::init(log::LevelFilter::Info);
    log::info!("✅ Pose overlay ready");
}
