//! Resumatch - Upload resumes, visualize job-role matches
//!
//! Resumatch submits a resume file to a remote analysis service and presents
//! the result: an overall score, the skills found (and missing), and a bar
//! chart of how well the resume matches each known job role.
//!
//! The analysis itself happens on the service side; this crate is the
//! submission-and-rendering half. It packages the file as a multipart upload,
//! interprets the JSON answer, and renders it to the terminal, to an HTML
//! report, or through a small local web UI.
//!
//! # Quick Start
//!
//! ```no_run
//! use resumatch::{ChartAdapter, UploadClient};
//! use std::path::Path;
//!
//! let client = UploadClient::new("http://localhost:5000")?;
//! let result = client.upload_file(Path::new("jane_doe.pdf"))?;
//!
//! println!("Score: {}/100", result.resume_score);
//! for (role, score) in result.ranked_matches(5) {
//!     println!("  {role}: {score}%");
//! }
//!
//! let mut chart = ChartAdapter::new();
//! resumatch::report::generate("report.html", &result, client.base(), &mut chart)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Failure Model
//!
//! Every way a submission can fail is a variant of [`UploadError`]:
//! submitting with no file selected, the request itself failing, the service
//! rejecting the upload (its own message is preserved), or an unreadable
//! response. All of them render as one `Error: `-prefixed status line; none
//! of them are fatal, the user just submits again.
//!
//! # Modules
//!
//! - [`analysis`]: the wire payload and ranking/display helpers
//! - [`client`]: the multipart upload and response interpretation
//! - [`chart`]: the single owned bar-chart instance and its lifecycle
//! - [`report`]: HTML and JSON output
//! - [`serve`]: the local interactive upload UI

pub mod analysis;
pub mod chart;
pub mod client;
pub mod report;
pub mod serve;

pub use analysis::{AnalysisResult, TOP_MATCHES};
pub use chart::{BarChart, ChartAdapter};
pub use client::{status_line, UploadClient, UploadError};
