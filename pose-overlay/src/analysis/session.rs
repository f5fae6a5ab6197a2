//! Analysis session - one upload/review cycle
//!
//! Tracks the request status and the results of the latest successful
//! analysis. Every failure ends up as a status with a user-visible message;
//! nothing here is fatal to the page.

use super::coaching::coaching_feedback;
use super::feedback::feedback_markup;
use super::response::AnalysisResponse;
use crate::error::AnalysisError;
use crate::pose::LandmarkSequence;

#[derive(Clone, Debug, PartialEq)]
pub enum AnalysisStatus {
    Idle,
    /// Analysis requested without a file
    NoFileSelected,
    Analyzing,
    Ready { frames: usize },
    /// Exchange succeeded but no pose was found
    NoPosesDetected,
    Failed(AnalysisError),
}

impl AnalysisStatus {
    /// Message shown to the user
    pub fn message(&self) -> String {
        match self {
            AnalysisStatus::Idle => String::new(),
            AnalysisStatus::NoFileSelected => "Please select a video file first.".to_string(),
            AnalysisStatus::Analyzing => "Analyzing video...".to_string(),
            AnalysisStatus::Ready { frames } => format!("Analysis complete ({} frames).", frames),
            AnalysisStatus::NoPosesDetected => "No poses detected in the video.".to_string(),
            AnalysisStatus::Failed(_) => "Error analyzing video. Please try again.".to_string(),
        }
    }
}

/// Identifies one analysis request; responses to superseded requests are dropped
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RequestTicket(u64);

#[derive(Debug)]
pub struct AnalysisSession {
    status: AnalysisStatus,
    landmarks: Option<LandmarkSequence>,
    feedback: Vec<String>,
    generation: u64,
    in_flight: Option<u64>,
}

impl Default for AnalysisSession {
    fn default() -> Self {
        Self {
            status: AnalysisStatus::Idle,
            landmarks: None,
            feedback: Vec::new(),
            generation: 0,
            in_flight: None,
        }
    }
}

impl AnalysisSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new analysis. Clears previous results.
    ///
    /// Without a file only the status message changes.
    pub fn begin(&mut self, has_file: bool) -> Result<RequestTicket, AnalysisError> {
        if !has_file {
            self.status = AnalysisStatus::NoFileSelected;
            return Err(AnalysisError::NoFileSelected);
        }

        self.generation += 1;
        self.in_flight = Some(self.generation);
        self.landmarks = None;
        self.feedback.clear();
        self.status = AnalysisStatus::Analyzing;
        Ok(RequestTicket(self.generation))
    }

    /// Apply the outcome of a request.
    ///
    /// Returns the sequence to hand to the overlay, only when poses were found.
    pub fn complete(
        &mut self,
        ticket: RequestTicket,
        outcome: Result<AnalysisResponse, AnalysisError>,
    ) -> Option<LandmarkSequence> {
        if self.in_flight != Some(ticket.0) {
            log::debug!("Discarding superseded analysis response #{}", ticket.0);
            return None;
        }
        self.in_flight = None;

        let response = match outcome {
            Ok(r) => r,
            Err(err) => {
                log::error!("Analysis failed: {}", err);
                self.status = AnalysisStatus::Failed(err);
                return None;
            }
        };

        let poses = response.detected_poses().cloned();
        self.feedback = match response.feedback {
            Some(feedback) => feedback,
            // Service sent no feedback field at all: derive it locally
            None => poses.as_ref().map(coaching_feedback).unwrap_or_default(),
        };

        match poses {
            Some(sequence) => {
                log::info!("Analysis complete: {} landmark frames", sequence.len());
                self.status = AnalysisStatus::Ready { frames: sequence.len() };
                self.landmarks = Some(sequence.clone());
                Some(sequence)
            }
            None => {
                log::info!("Analysis complete: no poses detected");
                self.status = AnalysisStatus::NoPosesDetected;
                None
            }
        }
    }

    /// Back to a blank session; any in-flight response will be ignored
    pub fn reset(&mut self) {
        self.in_flight = None;
        self.landmarks = None;
        self.feedback.clear();
        self.status = AnalysisStatus::Idle;
    }

    pub fn status(&self) -> &AnalysisStatus {
        &self.status
    }

    pub fn is_analyzing(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn landmarks(&self) -> Option<&LandmarkSequence> {
        self.landmarks.as_ref()
    }

    pub fn feedback(&self) -> &[String] {
        &self.feedback
    }

    pub fn feedback_html(&self) -> String {
        feedback_markup(&self.feedback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::{Landmark, LandmarkFrame};

    fn response(json: &str) -> Result<AnalysisResponse, AnalysisError> {
        AnalysisResponse::from_http(200, json)
    }

    const TWO_FRAMES: &str = r#"{
        "message": "Analysis successful",
        "landmarks": [[{"x": 0.5, "y": 0.5, "z": 0.0, "visibility": 0.9}], [{"x": 0.6, "y": 0.5, "z": 0.0, "visibility": 0.9}]],
        "feedback": ["Excellent head stability! Keeping your head still is key."]
    }"#;

    #[test]
    fn test_no_file_selected() {
        let mut session = AnalysisSession::new();
        assert_eq!(session.begin(false), Err(AnalysisError::NoFileSelected));
        assert_eq!(session.status(), &AnalysisStatus::NoFileSelected);
        assert!(!session.is_analyzing());
        assert!(!session.status().message().is_empty());
    }

    #[test]
    fn test_no_file_keeps_previous_results() {
        let mut session = AnalysisSession::new();
        let ticket = session.begin(true).unwrap();
        session.complete(ticket, response(TWO_FRAMES));

        let _ = session.begin(false);
        assert_eq!(session.landmarks().map(|l| l.len()), Some(2));
        assert_eq!(session.feedback().len(), 1);
    }

    #[test]
    fn test_success_yields_sequence() {
        let mut session = AnalysisSession::new();
        let ticket = session.begin(true).unwrap();
        assert_eq!(session.status(), &AnalysisStatus::Analyzing);

        let sequence = session.complete(ticket, response(TWO_FRAMES)).unwrap();
        assert_eq!(sequence.len(), 2);
        assert_eq!(session.status(), &AnalysisStatus::Ready { frames: 2 });
        assert!(sequence.ptr_eq(session.landmarks().unwrap()));
        assert!(session.feedback_html().contains("<li>Excellent head stability"));
    }

    #[test]
    fn test_empty_landmarks_is_no_poses_not_error() {
        let mut session = AnalysisSession::new();
        let ticket = session.begin(true).unwrap();
        let activated = session.complete(ticket, response(r#"{"landmarks": [], "feedback": []}"#));

        assert!(activated.is_none());
        assert_eq!(session.status(), &AnalysisStatus::NoPosesDetected);
        assert_eq!(session.status().message(), "No poses detected in the video.");
        assert!(session.landmarks().is_none());
    }

    #[test]
    fn test_missing_landmarks_is_no_poses() {
        let mut session = AnalysisSession::new();
        let ticket = session.begin(true).unwrap();
        assert!(session.complete(ticket, response("{}")).is_none());
        assert_eq!(session.status(), &AnalysisStatus::NoPosesDetected);
    }

    #[test]
    fn test_empty_feedback_renders_nothing() {
        let mut session = AnalysisSession::new();
        let ticket = session.begin(true).unwrap();
        let body = r#"{"landmarks": [[{"x": 0.5, "y": 0.5, "visibility": 0.9}]], "feedback": []}"#;
        assert!(session.complete(ticket, response(body)).is_some());
        assert!(session.feedback().is_empty());
        assert_eq!(session.feedback_html(), "");
    }

    #[test]
    fn test_absent_feedback_falls_back_to_coaching() {
        let mut session = AnalysisSession::new();
        let ticket = session.begin(true).unwrap();
        let body = r#"{"landmarks": [[{"x": 0.5, "y": 0.5, "visibility": 0.9}]]}"#;
        session.complete(ticket, response(body));
        // Single frame: elbow line only, no head movement line
        assert_eq!(session.feedback().len(), 1);
        assert!(session.feedback()[0].starts_with("Could not determine elbow angle"));
    }

    #[test]
    fn test_transport_failure_applies_nothing() {
        let mut session = AnalysisSession::new();
        let ticket = session.begin(true).unwrap();
        let outcome = Err(AnalysisError::Transport("connection refused".into()));

        assert!(session.complete(ticket, outcome).is_none());
        assert!(matches!(session.status(), AnalysisStatus::Failed(AnalysisError::Transport(_))));
        assert_eq!(session.status().message(), "Error analyzing video. Please try again.");
        assert!(session.landmarks().is_none());
        assert!(session.feedback().is_empty());
        assert!(!session.is_analyzing());
    }

    #[test]
    fn test_new_request_clears_previous_results() {
        let mut session = AnalysisSession::new();
        let ticket = session.begin(true).unwrap();
        session.complete(ticket, response(TWO_FRAMES));

        session.begin(true).unwrap();
        assert!(session.landmarks().is_none());
        assert!(session.feedback().is_empty());
    }

    #[test]
    fn test_superseded_response_ignored() {
        let mut session = AnalysisSession::new();
        let first = session.begin(true).unwrap();
        let second = session.begin(true).unwrap();

        assert!(session.complete(first, response(TWO_FRAMES)).is_none());
        assert_eq!(session.status(), &AnalysisStatus::Analyzing);
        assert!(session.complete(second, response(TWO_FRAMES)).is_some());
    }

    #[test]
    fn test_reset_discards_in_flight_response() {
        let mut session = AnalysisSession::new();
        let ticket = session.begin(true).unwrap();
        session.reset();

        assert!(session.complete(ticket, response(TWO_FRAMES)).is_none());
        assert_eq!(session.status(), &AnalysisStatus::Idle);
        assert!(session.landmarks().is_none());
    }

    #[test]
    fn test_all_empty_frames_not_activated() {
        let mut session = AnalysisSession::new();
        let ticket = session.begin(true).unwrap();
        let outcome = Ok(AnalysisResponse {
            landmarks: Some(LandmarkSequence::new(vec![LandmarkFrame::default(); 3])),
            ..Default::default()
        });
        assert!(session.complete(ticket, outcome).is_none());
        assert_eq!(session.status(), &AnalysisStatus::NoPosesDetected);

        let ticket = session.begin(true).unwrap();
        let outcome = Ok(AnalysisResponse {
            landmarks: Some(LandmarkSequence::new(vec![LandmarkFrame::new(vec![Landmark::new(0.1, 0.1, 1.0)])])),
            feedback: Some(vec![]),
            ..Default::default()
        });
        assert!(session.complete(ticket, outcome).is_some());
    }
}
