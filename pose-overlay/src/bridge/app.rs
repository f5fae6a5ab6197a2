//! Page-level state and the wasm_bindgen entry points
//!
//! JS owns the DOM and the upload form; everything else lives in `APP`.
//! No borrow of `APP` is held across an await.

use super::animation::AnimationFrameScheduler;
use super::http;
use super::video::VideoElementSource;
use crate::analysis::AnalysisSession;
use crate::config::OverlayConfig;
use crate::error::OverlayError;
use crate::playback::{OverlayController, OverlayHost};
use crate::renderer::{Canvas2dSurface, DrawSurface};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{File, HtmlCanvasElement, HtmlVideoElement};

#[derive(Default)]
struct App {
    config: OverlayConfig,
    analysis: AnalysisSession,
    overlay: Option<OverlayController>,
}

thread_local! {
    static APP: RefCell<App> = RefCell::new(App::default());
}

fn find_element<T: JsCast>(id: &str) -> Result<T, OverlayError> {
    let window = web_sys::window().ok_or(OverlayError::NoWindow)?;
    let document = window.document().ok_or(OverlayError::NoDocument)?;
    document
        .get_element_by_id(id)
        .ok_or_else(|| OverlayError::ElementNotFound(id.to_string()))?
        .dyn_into::<T>()
        .map_err(|_| OverlayError::WrongElementType(id.to_string()))
}

/// Replace the current overlay with one drawing on `surface`, re-loading the
/// last analysis result so a re-attach keeps working
fn install(video: HtmlVideoElement, surface: Rc<RefCell<dyn DrawSurface>>) -> Result<(), OverlayError> {
    let window = web_sys::window().ok_or(OverlayError::NoWindow)?;
    let host = OverlayHost {
        media: Rc::new(VideoElementSource::new(video)),
        surface,
        scheduler: Rc::new(AnimationFrameScheduler::new(window)),
    };

    APP.with(|app| {
        let mut app = app.borrow_mut();
        drop(app.overlay.take());

        let mut controller = OverlayController::new(host, app.config.style.clone());
        controller.load(app.analysis.landmarks().cloned());
        app.overlay = Some(controller);
    });
    Ok(())
}

/// Apply JSON options (endpoint, skeleton style). Takes effect on the next attach.
#[wasm_bindgen]
pub fn configure(options: &str) -> Result<(), JsValue> {
    let config = OverlayConfig::from_json(options)?;
    log::info!("Configured: endpoint {}", config.endpoint);
    APP.with(|app| app.borrow_mut().config = config);
    Ok(())
}

/// Draw the overlay on a canvas with the 2D context
#[wasm_bindgen]
pub fn attach_overlay(video_id: &str, canvas_id: &str) -> Result<(), JsValue> {
    let video: HtmlVideoElement = find_element(video_id)?;
    let canvas: HtmlCanvasElement = find_element(canvas_id)?;
    let surface = Canvas2dSurface::new(canvas)?;
    install(video, Rc::new(RefCell::new(surface)))?;
    log::info!("Overlay attached to #{} (canvas 2d)", video_id);
    Ok(())
}

/// Draw the overlay on a canvas with WebGPU
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub async fn attach_gpu_overlay(video_id: String, canvas_id: String) -> Result<(), JsValue> {
    let video: HtmlVideoElement = find_element(&video_id)?;
    let canvas: HtmlCanvasElement = find_element(&canvas_id)?;
    let surface = crate::renderer::GpuSurface::new(canvas).await?;
    install(video, Rc::new(RefCell::new(surface)))?;
    log::info!("Overlay attached to #{} (webgpu)", video_id);
    Ok(())
}

/// Stop drawing and release the video/canvas. Analysis results are kept.
#[wasm_bindgen]
pub fn detach_overlay() {
    let detached = APP.with(|app| app.borrow_mut().overlay.take());
    if detached.is_some() {
        log::info!("Overlay detached");
    }
}

/// Upload the selected video for analysis and load the result into the overlay
#[wasm_bindgen]
pub async fn analyze_video(file: Option<File>) {
    let begun = APP.with(|app| {
        let mut app = app.borrow_mut();
        let ticket = app.analysis.begin(file.is_some())?;
        if let Some(overlay) = app.overlay.as_mut() {
            overlay.unload();
        }
        Ok::<_, crate::error::AnalysisError>((ticket, app.config.endpoint.clone()))
    });

    let ((ticket, endpoint), file) = match (begun, file) {
        (Ok(begun), Some(file)) => (begun, file),
        _ => {
            log::warn!("Analysis requested without a video file");
            return;
        }
    };

    log::info!("Uploading '{}' ({} bytes) to {}", file.name(), file.size(), endpoint);
    let outcome = http::post_video(&endpoint, &file).await;

    APP.with(|app| {
        let mut app = app.borrow_mut();
        let app = &mut *app;
        if let Some(sequence) = app.analysis.complete(ticket, outcome) {
            if let Some(overlay) = app.overlay.as_mut() {
                overlay.load(Some(sequence));
            }
        }
    });
}

/// Clear results and stop the overlay; a pending analysis is ignored
#[wasm_bindgen]
pub fn reset_session() {
    APP.with(|app| {
        let mut app = app.borrow_mut();
        app.analysis.reset();
        if let Some(overlay) = app.overlay.as_mut() {
            overlay.unload();
        }
    });
}

#[wasm_bindgen]
pub fn get_status_message() -> String {
    APP.with(|app| app.borrow().analysis.status().message())
}

/// Feedback list as HTML; empty when there is no feedback
#[wasm_bindgen]
pub fn get_feedback_html() -> String {
    APP.with(|app| app.borrow().analysis.feedback_html())
}

#[wasm_bindgen]
pub fn is_analyzing() -> bool {
    APP.with(|app| app.borrow().analysis.is_analyzing())
}

/// Frames in the current landmark sequence, 0 when none is loaded
#[wasm_bindgen]
pub fn get_frame_count() -> usize {
    APP.with(|app| app.borrow().analysis.landmarks().map_or(0, |l| l.len()))
}

/// Index of the frame currently drawn, -1 when nothing is drawn
#[wasm_bindgen]
pub fn get_rendered_frame() -> i32 {
    APP.with(|app| {
        app.borrow()
            .overlay
            .as_ref()
            .and_then(|o| o.rendered_index())
            .map_or(-1, |i| i as i32)
    })
}
