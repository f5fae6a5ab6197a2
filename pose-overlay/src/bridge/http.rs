//! Analysis request - multipart POST of the video via fetch

use crate::analysis::AnalysisResponse;
use crate::error::AnalysisError;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FormData, Request, RequestInit, Response};

fn transport(err: JsValue) -> AnalysisError {
    match err.dyn_ref::<js_sys::Error>() {
        Some(js_err) => AnalysisError::Transport(String::from(js_err.message())),
        None => AnalysisError::Transport(format!("{:?}", err)),
    }
}

/// Upload `video` as form field `video` and decode the service's answer
pub async fn post_video(endpoint: &str, video: &File) -> Result<AnalysisResponse, AnalysisError> {
    let form = FormData::new().map_err(transport)?;
    form.append_with_blob_and_filename("video", video, &video.name())
        .map_err(transport)?;

    let init = RequestInit::new();
    init.set_method("POST");
    init.set_body(&form);
    let request = Request::new_with_str_and_init(endpoint, &init).map_err(transport)?;

    let window = web_sys::window().ok_or_else(|| AnalysisError::Transport("No window found".into()))?;
    let response: Response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(transport)?
        .dyn_into()
        .map_err(transport)?;

    let body = JsFuture::from(response.text().map_err(transport)?)
        .await
        .map_err(transport)?
        .as_string()
        .unwrap_or_default();

    AnalysisResponse::from_http(response.status(), &body)
}
