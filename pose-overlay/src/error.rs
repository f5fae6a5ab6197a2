//! Error types
//!
//! The rendering core never fails; these cover the JS-facing setup paths
//! and the analysis exchange.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Errors while wiring the overlay to the page (DOM lookup, canvas, WebGPU)
#[derive(Debug, Error)]
pub enum OverlayError {
    #[error("No window found")]
    NoWindow,
    #[error("No document found")]
    NoDocument,
    #[error("No element with id '{0}' found")]
    ElementNotFound(String),
    #[error("Element '{0}' has the wrong type")]
    WrongElementType(String),
    #[error("2D context unavailable on canvas")]
    ContextUnavailable,
    #[error("Surface creation failed: {0}")]
    SurfaceCreationFailed(String),
    #[error("Failed to find a suitable GPU adapter")]
    NoAdapter,
    #[error("Device creation failed: {0}")]
    DeviceCreationFailed(String),
}

impl From<OverlayError> for JsValue {
    fn from(err: OverlayError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Failures of the video analysis exchange
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// Analysis requested with no file selected
    #[error("No video file selected")]
    NoFileSelected,
    /// Network failure, the request never produced a response
    #[error("Request failed: {0}")]
    Transport(String),
    /// Service answered with an error status
    #[error("Server returned {status}: {message}")]
    Server { status: u16, message: String },
    /// Body could not be decoded
    #[error("Malformed analysis response: {0}")]
    InvalidResponse(String),
}

impl From<serde_json::Error> for AnalysisError {
    fn from(err: serde_json::Error) -> Self {
        AnalysisError::InvalidResponse(err.to_string())
    }
}

/// Rejected configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid color '{0}' (expected #RRGGBB or #RRGGBBAA)")]
    InvalidColor(String),
    #[error("Invalid value for {field}: {reason}")]
    OutOfRange { field: &'static str, reason: String },
}

impl From<ConfigError> for JsValue {
    fn from(err: ConfigError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_error_maps_to_invalid_response() {
        let err: AnalysisError = serde_json::from_str::<serde_json::Value>("{").unwrap_err().into();
        assert!(matches!(err, AnalysisError::InvalidResponse(_)));
    }

    #[test]
    fn test_messages() {
        let err = AnalysisError::Server { status: 400, message: "No video file provided".into() };
        assert_eq!(err.to_string(), "Server returned 400: No video file provided");
        assert_eq!(
            OverlayError::ElementNotFound("pose-canvas".into()).to_string(),
            "No element with id 'pose-canvas' found"
        );
    }
}
