/// Session state machine for the generation lifecycle
///
/// The session owns everything that changes while the app runs: the current
/// selfie, the selected style, the free-text edits, the generated result,
/// and the request lifecycle (Idle -> Generating -> Succeeded/Failed).
///
/// A monotonically increasing request token guards against stale async
/// results: uploading a new selfie or starting a new generation bumps the
/// token, and a generation response whose token no longer matches is
/// discarded instead of overwriting newer state.

use thiserror::Error;

use super::data::{GeneratedImage, UploadedImage};
use crate::catalog;

/// Where the current generation attempt stands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestState {
    /// Nothing in flight, no result yet
    Idle,
    /// A generation request is in flight
    Generating,
    /// The last generation produced an image
    Succeeded,
    /// The last attempt failed; the message is shown to the user
    Failed(String),
}

/// Validation failures that abort a generation before any network call
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("Please upload an image first.")]
    MissingUpload,
    #[error("Invalid style selected.")]
    UnknownStyle(String),
}

/// All mutable application state for one app run
#[derive(Debug)]
pub struct Session {
    uploaded: Option<UploadedImage>,
    generated: Option<GeneratedImage>,
    state: RequestState,
    /// Id of the currently selected style preset
    pub selected_style: String,
    /// Free-text edit instructions typed by the user
    pub custom_prompt: String,
    /// Token of the most recent upload/generation; stale responses mismatch
    request_token: u64,
}

impl Session {
    pub fn new() -> Self {
        Session {
            uploaded: None,
            generated: None,
            state: RequestState::Idle,
            selected_style: catalog::HEADSHOT_STYLES[0].id.to_string(),
            custom_prompt: String::new(),
            request_token: 0,
        }
    }

    pub fn uploaded(&self) -> Option<&UploadedImage> {
        self.uploaded.as_ref()
    }

    pub fn generated(&self) -> Option<&GeneratedImage> {
        self.generated.as_ref()
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn is_generating(&self) -> bool {
        self.state == RequestState::Generating
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.state {
            RequestState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Record a new selfie upload
    ///
    /// Replaces the previous selfie wholesale and clears the generated
    /// result and any error. Bumping the token here means a generation
    /// still in flight for the previous selfie is discarded on arrival.
    pub fn record_upload(&mut self, image: UploadedImage) {
        self.request_token += 1;
        self.uploaded = Some(image);
        self.generated = None;
        self.state = RequestState::Idle;
    }

    /// Begin a generation attempt, returning the token the response must echo
    ///
    /// Fails with `MissingUpload` when no selfie is present; in that case
    /// nothing changes and the session never enters `Generating`.
    pub fn begin_generation(&mut self) -> Result<u64, ValidationError> {
        if self.uploaded.is_none() {
            return Err(ValidationError::MissingUpload);
        }
        self.request_token += 1;
        self.generated = None;
        self.state = RequestState::Generating;
        Ok(self.request_token)
    }

    /// Apply the outcome of a generation request
    ///
    /// Returns `false` when the token is stale (a newer upload or generation
    /// superseded this request) and the outcome was discarded.
    pub fn finish_generation(
        &mut self,
        token: u64,
        outcome: Result<GeneratedImage, String>,
    ) -> bool {
        if token != self.request_token {
            return false;
        }
        match outcome {
            Ok(image) => {
                self.generated = Some(image);
                self.state = RequestState::Succeeded;
            }
            Err(message) => {
                self.generated = None;
                self.state = RequestState::Failed(message);
            }
        }
        true
    }

    /// Surface a validation failure without touching images or the token
    pub fn reject(&mut self, error: ValidationError) {
        self.state = RequestState::Failed(error.to_string());
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selfie() -> UploadedImage {
        UploadedImage::new(b"selfie bytes".to_vec(), "image/jpeg".to_string())
    }

    fn headshot() -> GeneratedImage {
        GeneratedImage::from_png_bytes(b"png bytes".to_vec())
    }

    #[test]
    fn test_upload_clears_result_and_error() {
        let mut session = Session::new();
        session.record_upload(selfie());
        let token = session.begin_generation().unwrap();
        session.finish_generation(token, Err("rate limited".to_string()));
        assert!(session.error_message().is_some());

        // A fresh upload wipes the error regardless of prior state
        session.record_upload(selfie());
        assert!(session.generated().is_none());
        assert!(session.error_message().is_none());
        assert_eq!(*session.state(), RequestState::Idle);
    }

    #[test]
    fn test_upload_clears_previous_result() {
        let mut session = Session::new();
        session.record_upload(selfie());
        let token = session.begin_generation().unwrap();
        session.finish_generation(token, Ok(headshot()));
        assert!(session.generated().is_some());

        session.record_upload(selfie());
        assert!(session.generated().is_none());
    }

    #[test]
    fn test_generate_without_upload_is_rejected() {
        let mut session = Session::new();
        let result = session.begin_generation();
        assert!(matches!(result, Err(ValidationError::MissingUpload)));
        // No transition to Generating
        assert_eq!(*session.state(), RequestState::Idle);
    }

    #[test]
    fn test_failure_is_retriggerable() {
        let mut session = Session::new();
        session.record_upload(selfie());
        let token = session.begin_generation().unwrap();
        session.finish_generation(token, Err("rate limited".to_string()));
        assert_eq!(
            *session.state(),
            RequestState::Failed("rate limited".to_string())
        );

        // A second attempt is permitted from Failed
        let second = session.begin_generation().unwrap();
        assert!(session.is_generating());
        assert!(second > token);
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut session = Session::new();
        session.record_upload(selfie());
        let stale_token = session.begin_generation().unwrap();

        // User uploads a new selfie while the first request is in flight
        session.record_upload(selfie());

        let applied = session.finish_generation(stale_token, Ok(headshot()));
        assert!(!applied);
        // The newer upload wins: no generated image is shown
        assert!(session.generated().is_none());
        assert_eq!(*session.state(), RequestState::Idle);
    }

    #[test]
    fn test_newer_generation_supersedes_older() {
        let mut session = Session::new();
        session.record_upload(selfie());
        let first = session.begin_generation().unwrap();
        session.finish_generation(first, Err("timeout".to_string()));

        let second = session.begin_generation().unwrap();
        // The retried failure from the first attempt must not clobber the
        // in-flight second attempt
        assert!(!session.finish_generation(first, Err("timeout".to_string())));
        assert!(session.is_generating());

        assert!(session.finish_generation(second, Ok(headshot())));
        assert_eq!(*session.state(), RequestState::Succeeded);
    }

    #[test]
    fn test_begin_generation_clears_prior_outcome() {
        let mut session = Session::new();
        session.record_upload(selfie());
        let token = session.begin_generation().unwrap();
        session.finish_generation(token, Ok(headshot()));

        session.begin_generation().unwrap();
        // Generating implies no stale result or error is displayed
        assert!(session.generated().is_none());
        assert!(session.error_message().is_none());
    }
}
