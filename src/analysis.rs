//! The analysis payload returned by the resume service
//!
//! The service responds to an upload with a single JSON object describing the
//! resume: an overall score, the skills it detected, the skills it thinks are
//! missing for the best-fitting role, and a role → match-percentage map.
//!
//! This module owns that wire shape plus the small amount of shaping the
//! presentation layers need: ranking the match scores, picking the top role,
//! and joining skill lists for display. The payload is transient - it lives
//! for one render and each new upload fully replaces whatever was shown
//! before. Nothing here is cached or merged across submissions.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// How many entries the ranked "Top matches" list shows.
pub const TOP_MATCHES: usize = 5;

/// One resume analysis, as returned by `POST /api/upload-resume`.
///
/// All fields are expected to be present in a success response; only
/// `skill_strengths` is tolerated absent because older service versions did
/// not send it. Scores are percentages in the 0-100 range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Identifier for the stored copy of this analysis, used to build the
    /// `/api/results/{id}` retrieval link.
    pub resume_id: i64,
    pub filename: String,
    pub resume_score: f64,
    /// Role name → match percentage. Iteration order (and therefore chart
    /// category order) is alphabetical.
    pub match_scores: BTreeMap<String, f64>,
    pub skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub suggestions: String,
    /// Per-skill strength estimates. The service sends these but the report
    /// only surfaces them in verbose terminal output.
    #[serde(default)]
    pub skill_strengths: BTreeMap<String, f64>,
}

impl AnalysisResult {
    /// Match scores sorted descending, truncated to `limit`.
    ///
    /// Ties keep the map's alphabetical iteration order (the sort is stable).
    pub fn ranked_matches(&self, limit: usize) -> Vec<(&str, f64)> {
        let mut entries: Vec<(&str, f64)> = self
            .match_scores
            .iter()
            .map(|(role, score)| (role.as_str(), *score))
            .collect();
        entries.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        entries.truncate(limit);
        entries
    }

    /// The best-matching role, if the service returned any matches.
    pub fn top_role(&self) -> Option<&str> {
        self.ranked_matches(1).first().map(|(role, _)| *role)
    }

    /// Detected skills as display text: comma-joined, or `"None"`.
    pub fn skills_text(&self) -> String {
        join_or_none(&self.skills)
    }

    /// Missing skills (relative to the top role) as display text.
    pub fn missing_skills_text(&self) -> String {
        join_or_none(&self.missing_skills)
    }
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "None".to_string()
    } else {
        items.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==========================================================================
    // WIRE FORMAT TESTS
    // ==========================================================================
    //
    // The service is a separate codebase, so these tests pin the exact JSON
    // shape we accept. A field rename on either side should fail here first.
    // ==========================================================================

    const SAMPLE: &str = r#"{
        "resume_id": 7,
        "filename": "jane_doe.pdf",
        "resume_score": 82,
        "match_scores": {"Backend Engineer": 91.5, "Data Analyst": 64, "DevOps": 71},
        "skills": ["python", "sql", "docker"],
        "missing_skills": ["kubernetes"],
        "suggestions": "Top role: Backend Engineer. Improve measurable achievements.",
        "skill_strengths": {"python": 0.9, "sql": 0.6}
    }"#;

    #[test]
    fn test_deserialize_service_payload() {
        let result: AnalysisResult = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(result.resume_id, 7);
        assert_eq!(result.filename, "jane_doe.pdf");
        assert_eq!(result.resume_score, 82.0);
        assert_eq!(result.match_scores.len(), 3);
        assert_eq!(result.match_scores["Backend Engineer"], 91.5);
        assert_eq!(result.skills, vec!["python", "sql", "docker"]);
        assert_eq!(result.missing_skills, vec!["kubernetes"]);
        assert_eq!(result.skill_strengths["python"], 0.9);
    }

    #[test]
    fn test_skill_strengths_optional() {
        // Older service versions omit skill_strengths entirely
        let json = r#"{
            "resume_id": 1,
            "filename": "a.txt",
            "resume_score": 10,
            "match_scores": {},
            "skills": [],
            "missing_skills": [],
            "suggestions": ""
        }"#;
        let result: AnalysisResult = serde_json::from_str(json).unwrap();
        assert!(result.skill_strengths.is_empty());
    }

    // ==========================================================================
    // RANKING TESTS
    // ==========================================================================
    //
    // The "Top matches" list is sorted descending and truncated to 5; the
    // chart deliberately gets the full unsorted map instead. Ties fall back
    // to alphabetical order.
    // ==========================================================================

    fn result_with_scores(scores: &[(&str, f64)]) -> AnalysisResult {
        AnalysisResult {
            resume_id: 1,
            filename: "resume.pdf".to_string(),
            resume_score: 50.0,
            match_scores: scores
                .iter()
                .map(|(role, score)| (role.to_string(), *score))
                .collect(),
            skills: vec![],
            missing_skills: vec![],
            suggestions: String::new(),
            skill_strengths: BTreeMap::new(),
        }
    }

    #[test]
    fn test_ranked_matches_sorted_descending() {
        let result = result_with_scores(&[("A", 10.0), ("B", 90.0), ("C", 55.0)]);
        let ranked = result.ranked_matches(TOP_MATCHES);
        assert_eq!(ranked, vec![("B", 90.0), ("C", 55.0), ("A", 10.0)]);
    }

    #[test]
    fn test_ranked_matches_truncates_to_limit() {
        let result = result_with_scores(&[
            ("A", 10.0),
            ("B", 20.0),
            ("C", 30.0),
            ("D", 40.0),
            ("E", 50.0),
            ("F", 60.0),
            ("G", 70.0),
        ]);
        let ranked = result.ranked_matches(TOP_MATCHES);
        assert_eq!(ranked.len(), TOP_MATCHES);
        assert_eq!(ranked[0], ("G", 70.0));
        assert_eq!(ranked[4], ("C", 30.0));
    }

    #[test]
    fn test_ranked_matches_fewer_than_limit() {
        let result = result_with_scores(&[("A", 40.0), ("B", 80.0)]);
        assert_eq!(result.ranked_matches(TOP_MATCHES).len(), 2);
    }

    #[test]
    fn test_ranked_matches_ties_stay_alphabetical() {
        let result = result_with_scores(&[("Zeta", 50.0), ("Alpha", 50.0), ("Mid", 50.0)]);
        let ranked = result.ranked_matches(TOP_MATCHES);
        let roles: Vec<&str> = ranked.iter().map(|(role, _)| *role).collect();
        assert_eq!(roles, vec!["Alpha", "Mid", "Zeta"]);
    }

    #[test]
    fn test_top_role() {
        let result = result_with_scores(&[("Backend", 91.0), ("Frontend", 70.0)]);
        assert_eq!(result.top_role(), Some("Backend"));

        let empty = result_with_scores(&[]);
        assert_eq!(empty.top_role(), None);
    }

    // ==========================================================================
    // DISPLAY TEXT TESTS
    // ==========================================================================

    #[test]
    fn test_skills_text_joined_in_order() {
        let mut result = result_with_scores(&[]);
        result.skills = vec!["python".into(), "sql".into(), "docker".into()];
        assert_eq!(result.skills_text(), "python, sql, docker");
    }

    #[test]
    fn test_empty_skills_render_as_none_literal() {
        let result = result_with_scores(&[]);
        assert_eq!(result.skills_text(), "None");
        assert_eq!(result.missing_skills_text(), "None");
    }
}
