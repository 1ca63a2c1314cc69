//! Submission of resumes to the analysis service
//!
//! The analysis itself lives in a separate service; this module is the single
//! point of contact with it. A submission is one multipart POST carrying the
//! file under the fixed `resume` field, answered by a JSON body that is either
//! an [`AnalysisResult`] (2xx) or an object with an `error` string (anything
//! else).
//!
//! Failure handling mirrors the submission flow exactly: the body is parsed
//! as JSON before the status is consulted, so an unreadable body is a parse
//! failure even on an error status, and an error status with a readable body
//! surfaces the service's own message. Every failure is eventually shown to
//! the user as one status line with an `Error: ` prefix - see [`status_line`].
//!
//! There are no retries, no timeout and no cancellation. Submitting again
//! simply issues a new independent request; the last response rendered wins.

use crate::analysis::AnalysisResult;
use std::path::Path;
use thiserror::Error;

/// Multipart field name the service expects the file under.
pub const UPLOAD_FIELD: &str = "resume";
/// Upload endpoint path, relative to the service base URL.
pub const UPLOAD_PATH: &str = "/api/upload-resume";
/// Stored-result retrieval path, relative to the service base URL.
pub const RESULTS_PATH: &str = "/api/results";

/// Shown when an error response carries no `error` field of its own.
const FALLBACK_ERROR: &str = "Analysis failed";

/// Everything that can go wrong between "user picked a file" and "we have an
/// [`AnalysisResult`]".
#[derive(Debug, Error)]
pub enum UploadError {
    /// The user submitted without choosing a file. Raised before any request
    /// is made; in GUI mode the caller shows it as a blocking dialog instead.
    #[error("Choose a resume file")]
    NoFileSelected,

    /// The request itself failed (connectivity, DNS, refused connection).
    #[error("{0}")]
    Network(#[from] reqwest::Error),

    /// The service answered with a non-success status. Carries the service's
    /// own message when the body had one.
    #[error("{message}")]
    Api { message: String },

    /// The response body was not valid JSON, or not the expected shape.
    #[error("{0}")]
    Parse(#[from] serde_json::Error),

    /// The selected file could not be read.
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

/// The user-visible status text for a failed submission.
pub fn status_line(err: &UploadError) -> String {
    format!("Error: {err}")
}

/// A stored analysis relayed verbatim from `GET /api/results/{id}`.
#[derive(Debug)]
pub struct StoredResult {
    pub status: u16,
    pub body: String,
}

/// Blocking HTTP client for the analysis service.
pub struct UploadClient {
    http: reqwest::blocking::Client,
    base: String,
}

impl UploadClient {
    /// Build a client for the service at `base` (e.g. `http://localhost:5000`).
    pub fn new(base: impl Into<String>) -> Result<Self, UploadError> {
        // The submission flow has no timeout; reqwest would add one by default.
        let http = reqwest::blocking::Client::builder().timeout(None).build()?;
        Ok(Self {
            http,
            base: normalize_base(base.into()),
        })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Read `path` and submit it under its own filename.
    pub fn upload_file(&self, path: &Path) -> Result<AnalysisResult, UploadError> {
        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_string)
            .ok_or(UploadError::NoFileSelected)?;
        let bytes = std::fs::read(path)?;
        self.upload_bytes(filename, bytes)
    }

    /// Submit one file as the `resume` field of a multipart form.
    pub fn upload_bytes(
        &self,
        filename: String,
        bytes: Vec<u8>,
    ) -> Result<AnalysisResult, UploadError> {
        if filename.is_empty() {
            return Err(UploadError::NoFileSelected);
        }

        let part = reqwest::blocking::multipart::Part::bytes(bytes).file_name(filename);
        let form = reqwest::blocking::multipart::Form::new().part(UPLOAD_FIELD, part);

        let response = self
            .http
            .post(format!("{}{}", self.base, UPLOAD_PATH))
            .multipart(form)
            .send()?;

        let ok = response.status().is_success();
        let body = response.text()?;
        interpret_response(ok, &body)
    }

    /// Relay a stored analysis, preserving the service's status code.
    pub fn fetch_stored(&self, resume_id: i64) -> Result<StoredResult, UploadError> {
        let response = self
            .http
            .get(format!("{}{}/{}", self.base, RESULTS_PATH, resume_id))
            .send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        Ok(StoredResult { status, body })
    }
}

/// Turn status + body into a result or a typed failure.
///
/// The body is parsed first, unconditionally: the service answers errors with
/// JSON too, and a body that isn't JSON at all is its own kind of failure.
pub fn interpret_response(ok: bool, body: &str) -> Result<AnalysisResult, UploadError> {
    let value: serde_json::Value = serde_json::from_str(body)?;

    if !ok {
        let message = value
            .get("error")
            .and_then(|e| e.as_str())
            .unwrap_or(FALLBACK_ERROR)
            .to_string();
        return Err(UploadError::Api { message });
    }

    Ok(serde_json::from_value(value)?)
}

fn normalize_base(mut base: String) -> String {
    while base.ends_with('/') {
        base.pop();
    }
    base
}
