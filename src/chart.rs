//! Bar-chart lifecycle for the match-score visualization
//!
//! The report draws one bar chart of role match percentages on a single named
//! canvas. Re-rendering must not stack chart instances on that canvas, so the
//! adapter owns at most one [`BarChart`] at a time and explicitly destroys the
//! previous instance before creating the next. A generation counter makes the
//! replace-not-merge lifecycle visible to callers and tests.
//!
//! The chart itself is drawn by Chart.js in the generated page;
//! [`BarChart::init_script`] emits the bootstrap for it, including the same
//! destroy-prior-instance guard on the browser side.

use std::collections::BTreeMap;

/// Canvas element the chart binds to.
pub const CANVAS_ID: &str = "match-chart";
/// Label of the single data series.
pub const SERIES_LABEL: &str = "Match %";
/// The y axis is pinned to 0-100 regardless of the data.
pub const Y_AXIS_MAX: u32 = 100;

/// One live bar chart bound to a canvas.
///
/// Categories are the map keys in iteration order; values are the matching
/// percentages. The chart always receives the full, unsorted mapping - only
/// the ranked text list is sorted and truncated.
#[derive(Debug)]
pub struct BarChart {
    canvas_id: String,
    labels: Vec<String>,
    values: Vec<f64>,
    generation: u64,
}

impl BarChart {
    pub fn canvas_id(&self) -> &str {
        &self.canvas_id
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Which render created this instance (1 for the first render).
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Chart.js bootstrap for the generated page.
    ///
    /// Destroys any chart already bound to the canvas before creating the new
    /// one, so re-rendering in the browser never leaks an instance either.
    pub fn init_script(&self) -> String {
        format!(
            r#"if (window.matchChart && typeof window.matchChart.destroy === 'function') {{
    window.matchChart.destroy();
}}
window.matchChart = new Chart(document.getElementById('{canvas}'), {{
    type: 'bar',
    data: {{
        labels: {labels},
        datasets: [{{
            label: '{series}',
            data: {values},
            borderWidth: 1
        }}]
    }},
    options: {{
        scales: {{ y: {{ beginAtZero: true, max: {max} }} }}
    }}
}});"#,
            canvas = self.canvas_id,
            labels = json_array(&self.labels),
            series = SERIES_LABEL,
            values = json_array(&self.values),
            max = Y_AXIS_MAX,
        )
    }

    /// Tear the instance down. Consumes the chart: a destroyed chart cannot
    /// be rendered again.
    pub fn destroy(self) {}
}

/// Owns the single chart bound to [`CANVAS_ID`] for the life of the process.
#[derive(Debug, Default)]
pub struct ChartAdapter {
    current: Option<BarChart>,
    generation: u64,
}

impl ChartAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current chart with one drawn from `match_scores`.
    ///
    /// The previous instance, if any, is destroyed first.
    pub fn render(&mut self, match_scores: &BTreeMap<String, f64>) -> &BarChart {
        if let Some(previous) = self.current.take() {
            previous.destroy();
        }

        self.generation += 1;
        let chart = BarChart {
            canvas_id: CANVAS_ID.to_string(),
            labels: match_scores.keys().cloned().collect(),
            values: match_scores.values().copied().collect(),
            generation: self.generation,
        };
        self.current.insert(chart)
    }

    /// The live chart, if anything has been rendered yet.
    pub fn current(&self) -> Option<&BarChart> {
        self.current.as_ref()
    }

    /// How many renders this adapter has performed.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

fn json_array<T: serde::Serialize>(items: &[T]) -> String {
    serde_json::to_string(items).unwrap_or_else(|_| "[]".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==========================================================================
    // CHART LIFECYCLE TESTS
    // ==========================================================================
    //
    // The adapter must never hold two instances: every render beyond the
    // first destroys its predecessor before the replacement exists.
    // ==========================================================================

    fn scores(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
        entries
            .iter()
            .map(|(role, score)| (role.to_string(), *score))
            .collect()
    }

    #[test]
    fn test_first_render_creates_generation_one() {
        let mut adapter = ChartAdapter::new();
        assert!(adapter.current().is_none());

        let chart = adapter.render(&scores(&[("Backend", 80.0)]));
        assert_eq!(chart.generation(), 1);
        assert_eq!(adapter.generation(), 1);
    }

    #[test]
    fn test_rerender_replaces_single_instance() {
        let mut adapter = ChartAdapter::new();
        adapter.render(&scores(&[("Backend", 80.0)]));
        adapter.render(&scores(&[("Frontend", 60.0)]));
        adapter.render(&scores(&[("DevOps", 40.0)]));

        // Three renders, two teardowns, exactly one live instance.
        assert_eq!(adapter.generation(), 3);
        let current = adapter.current().unwrap();
        assert_eq!(current.generation(), 3);
        assert_eq!(current.labels().to_vec(), vec!["DevOps"]);
    }

    #[test]
    fn test_chart_gets_full_map_in_iteration_order() {
        let mut adapter = ChartAdapter::new();
        let chart = adapter.render(&scores(&[
            ("Zeta Role", 10.0),
            ("Alpha Role", 90.0),
            ("Mid Role", 50.0),
        ]));

        // Unsorted by score, unsliced: the map's own (alphabetical) order.
        assert_eq!(
            chart.labels().to_vec(),
            vec!["Alpha Role", "Mid Role", "Zeta Role"]
        );
        assert_eq!(chart.values().to_vec(), vec![90.0, 50.0, 10.0]);
    }

    #[test]
    fn test_empty_scores_still_render() {
        let mut adapter = ChartAdapter::new();
        let chart = adapter.render(&scores(&[]));
        assert!(chart.labels().is_empty());
        assert!(chart.values().is_empty());
    }

    // ==========================================================================
    // BOOTSTRAP SCRIPT TESTS
    // ==========================================================================

    #[test]
    fn test_init_script_pins_chart_configuration() {
        let mut adapter = ChartAdapter::new();
        let script = adapter
            .render(&scores(&[("Backend Engineer", 91.5)]))
            .init_script();

        assert!(script.contains("type: 'bar'"));
        assert!(script.contains("label: 'Match %'"));
        assert!(script.contains("beginAtZero: true"));
        assert!(script.contains("max: 100"));
        assert!(script.contains("getElementById('match-chart')"));
        assert!(script.contains(r#"["Backend Engineer"]"#));
        assert!(script.contains("[91.5]"));
    }

    #[test]
    fn test_init_script_guards_against_stale_instance() {
        let mut adapter = ChartAdapter::new();
        let script = adapter.render(&scores(&[("A", 1.0)])).init_script();
        assert!(script.contains("window.matchChart.destroy()"));
        // The guard must run before the new instance is assigned
        let destroy_at = script.find("destroy()").unwrap();
        let create_at = script.find("new Chart").unwrap();
        assert!(destroy_at < create_at);
    }

    #[test]
    fn test_labels_with_quotes_are_escaped() {
        let mut adapter = ChartAdapter::new();
        let script = adapter
            .render(&scores(&[(r#"QA "Lead""#, 5.0)]))
            .init_script();
        assert!(script.contains(r#"\"Lead\""#));
    }
}
