//! Analysis service wire format
//!
//! Success: `{"message": "...", "landmarks": [[{x, y, z, visibility}, ...], ...], "feedback": ["..."]}`
//! Failure: `{"error": "..."}` with a 4xx/5xx status.

use crate::error::AnalysisError;
use crate::pose::LandmarkSequence;
use serde::Deserialize;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct AnalysisResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub landmarks: Option<LandmarkSequence>,
    /// `None` when the field is absent, distinct from an empty list
    #[serde(default)]
    pub feedback: Option<Vec<String>>,
    #[serde(default)]
    pub error: Option<String>,
}

impl AnalysisResponse {
    /// Decode a response body received with the given HTTP status
    pub fn from_http(status: u16, body: &str) -> Result<Self, AnalysisError> {
        if !(200..300).contains(&status) {
            let message = serde_json::from_str::<AnalysisResponse>(body)
                .ok()
                .and_then(|r| r.error)
                .unwrap_or_else(|| format!("HTTP {}", status));
            return Err(AnalysisError::Server { status, message });
        }

        let response: AnalysisResponse = serde_json::from_str(body)?;
        if let Some(message) = &response.error {
            return Err(AnalysisError::Server { status, message: message.clone() });
        }
        Ok(response)
    }

    /// Landmarks if at least one frame holds a detected pose
    pub fn detected_poses(&self) -> Option<&LandmarkSequence> {
        self.landmarks.as_ref().filter(|seq| seq.has_poses())
    }
}
