//! Report generation for analysis results
//!
//! Output formatters for a received analysis:
//!
//! - **HTML**: the full report with the match-score bar chart
//! - **JSON**: machine-readable dump of the payload
//!
//! # Usage
//!
//! ```ignore
//! use resumatch::{chart::ChartAdapter, report};
//!
//! let mut chart = ChartAdapter::new();
//! // Picks the format from the extension
//! report::generate("report.html", &result, "http://localhost:5000", &mut chart)?;
//! report::generate("report.json", &result, "http://localhost:5000", &mut chart)?;
//! ```

pub mod html;
pub mod json;

pub use html::View;

use crate::analysis::AnalysisResult;
use crate::chart::ChartAdapter;
use std::io;
use std::path::Path;

/// Generate a report in the appropriate format based on file extension.
///
/// `link_base` is the analysis service base URL, used for the stored-result
/// link inside the HTML report. Anything that isn't `.json` gets the HTML
/// report, chart included.
pub fn generate<P: AsRef<Path>>(
    path: P,
    result: &AnalysisResult,
    link_base: &str,
    adapter: &mut ChartAdapter,
) -> io::Result<()> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let mut file = std::fs::File::create(path)?;

    match ext.as_str() {
        "json" => json::write(&mut file, result),
        _ => html::write_report(&mut file, result, link_base, adapter),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    // ==========================================================================
    // FORMAT DISPATCH TESTS
    // ==========================================================================

    fn sample_result() -> AnalysisResult {
        AnalysisResult {
            resume_id: 1,
            filename: "cv.pdf".to_string(),
            resume_score: 50.0,
            match_scores: [("Backend".to_string(), 70.0)].into_iter().collect(),
            skills: vec![],
            missing_skills: vec![],
            suggestions: String::new(),
            skill_strengths: BTreeMap::new(),
        }
    }

    #[test]
    fn test_generate_html_by_extension() {
        let dir = std::env::temp_dir().join("resumatch-test-reports");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("dispatch.html");

        let mut adapter = ChartAdapter::new();
        generate(&path, &sample_result(), "http://localhost:5000", &mut adapter).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("<!DOCTYPE html>"));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_generate_json_by_extension() {
        let dir = std::env::temp_dir().join("resumatch-test-reports");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("dispatch.json");

        let mut adapter = ChartAdapter::new();
        generate(&path, &sample_result(), "http://localhost:5000", &mut adapter).unwrap();

        let parsed: AnalysisResult =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed.filename, "cv.pdf");
        // The JSON path never touches the chart
        assert_eq!(adapter.generation(), 0);
        std::fs::remove_file(&path).ok();
    }
}
