//! HTML rendering of an analysis
//!
//! Two surfaces share the same results fragment:
//!
//! - [`write_report`]: a standalone report document, written to disk by the
//!   CLI and opened in the browser.
//! - [`render_page`]: the interactive page served in `serve` mode, which adds
//!   the upload form and a status region around the fragment.
//!
//! The fragment shows the filename, the overall score, the five best role
//! matches sorted descending, the skill lists (with a literal `None` when
//! empty), the suggestions text and a link to the stored JSON result. The bar
//! chart is appended after it: a canvas capped at 600px wide plus the chart
//! bootstrap emitted by the adapter. Everything the service sent is escaped
//! before it touches the page.

use crate::analysis::{AnalysisResult, TOP_MATCHES};
use crate::chart::{BarChart, ChartAdapter};
use crate::client::RESULTS_PATH;
use std::io::{self, Write};

/// What the interactive page is currently showing.
///
/// Each submission fully replaces the previous state: a failure hides any
/// earlier results, a success clears any earlier status text.
#[derive(Debug)]
pub enum View {
    /// Nothing submitted yet: status and results both hidden.
    Form,
    /// A submission failed: the status line (already `Error: `-prefixed) is
    /// visible, results stay hidden.
    Failed(String),
    /// A submission succeeded: results visible, status hidden.
    Loaded(AnalysisResult),
}

const STYLE: &str = r#"
        :root {
            --bg: #0d1117;
            --card: #161b22;
            --border: #30363d;
            --text: #e6edf3;
            --dim: #7d8590;
            --accent: #58a6ff;
            --error: #f85149;
        }
        * { box-sizing: border-box; margin: 0; padding: 0; }
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', 'Noto Sans', Helvetica, Arial, sans-serif;
            background: var(--bg);
            color: var(--text);
            line-height: 1.5;
        }
        .container { max-width: 860px; margin: 0 auto; padding: 2rem; }
        .header {
            display: flex;
            align-items: baseline;
            gap: 1rem;
            margin-bottom: 2rem;
            padding-bottom: 1rem;
            border-bottom: 1px solid var(--border);
        }
        .logo {
            font-size: 2rem;
            font-weight: 800;
            background: linear-gradient(135deg, var(--accent), #a371f7);
            -webkit-background-clip: text;
            -webkit-text-fill-color: transparent;
        }
        .subtitle { color: var(--dim); }
        .card {
            background: var(--card);
            border: 1px solid var(--border);
            border-radius: 12px;
            padding: 1.5rem;
            margin-bottom: 1.5rem;
        }
        .card h2 { margin-bottom: 1rem; }
        .card h3 { margin-top: 30px; }
        .card p { margin: 0.5rem 0; }
        .card ul { margin: 0.25rem 0 0.75rem 1.5rem; }
        .status {
            border-left: 3px solid var(--error);
            padding: 0.75rem 1rem;
            margin-bottom: 1.5rem;
            color: var(--error);
            background: var(--card);
        }
        .hidden { display: none; }
        a { color: var(--accent); }
        input[type=file] { color: var(--text); margin-right: 1rem; }
        button {
            background: var(--accent);
            color: #0d1117;
            font-weight: 600;
            border: none;
            border-radius: 6px;
            padding: 0.5rem 1.25rem;
            cursor: pointer;
        }
        canvas { margin-top: 10px; }
"#;

const CHART_CDN: &str = r#"<script src="https://cdn.jsdelivr.net/npm/chart.js"></script>"#;

/// Write a standalone report document for one analysis.
pub fn write_report<W: Write>(
    writer: &mut W,
    result: &AnalysisResult,
    link_base: &str,
    adapter: &mut ChartAdapter,
) -> io::Result<()> {
    let chart = adapter.render(&result.match_scores);
    let fragment = results_fragment(result, link_base, chart);
    let script = chart.init_script();

    write!(
        writer,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Resume Analysis - {title}</title>
    {chart_cdn}
    <style>{style}</style>
</head>
<body>
    <div class="container">
        <div class="header">
            <div class="logo">Resumatch</div>
            <div class="subtitle">resume analysis report</div>
        </div>
        <div class="card">
{fragment}
        </div>
    </div>
    <script>
{script}
    </script>
</body>
</html>
"#,
        title = escape(&result.filename),
        chart_cdn = CHART_CDN,
        style = STYLE,
        fragment = fragment,
        script = script,
    )
}

/// Render the interactive page for `serve` mode.
///
/// The upload form is always present; the status and results regions toggle
/// with the current [`View`].
pub fn render_page(view: &View, link_base: &str, adapter: &mut ChartAdapter) -> String {
    let (status_class, status_text) = match view {
        View::Failed(line) => ("status", escape(line)),
        _ => ("status hidden", String::new()),
    };

    let (results_class, results_html, chart_script) = match view {
        View::Loaded(result) => {
            let chart = adapter.render(&result.match_scores);
            let fragment = results_fragment(result, link_base, chart);
            let script = chart.init_script();
            ("card", fragment, script)
        }
        _ => ("card hidden", String::new(), String::new()),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Resumatch</title>
    {chart_cdn}
    <style>{style}</style>
</head>
<body>
    <div class="container">
        <div class="header">
            <div class="logo">Resumatch</div>
            <div class="subtitle">upload a resume, see how it matches</div>
        </div>
        <div class="card">
            <form id="upload-form" method="post" action="/api/upload-resume" enctype="multipart/form-data">
                <input type="file" id="resume" name="resume" required>
                <button type="submit">Upload &amp; Analyze</button>
            </form>
            <p class="subtitle" style="margin-top: 0.75rem;">Analysis may take a few seconds.</p>
        </div>
        <div id="status" class="{status_class}">{status_text}</div>
        <div id="results" class="{results_class}">
{results_html}
        </div>
    </div>
    <script>
{chart_script}
    </script>
</body>
</html>
"#,
        chart_cdn = CHART_CDN,
        style = STYLE,
        status_class = status_class,
        status_text = status_text,
        results_class = results_class,
        results_html = results_html,
        chart_script = chart_script,
    )
}

/// The results fragment: analysis text first, chart placeholder last.
pub fn results_fragment(result: &AnalysisResult, link_base: &str, chart: &BarChart) -> String {
    let matches: String = result
        .ranked_matches(TOP_MATCHES)
        .iter()
        .map(|(role, score)| format!("            <li>{}: {}%</li>\n", escape(role), score))
        .collect();

    format!(
        r#"        <h2>Analysis: {filename}</h2>
        <p><strong>Resume score:</strong> {score}/100</p>
        <p><strong>Top matches:</strong></p>
        <ul>
{matches}        </ul>
        <p><strong>Skills detected:</strong> {skills}</p>
        <p><strong>Missing skills (for top role):</strong> {missing}</p>
        <p><strong>Suggestions:</strong> {suggestions}</p>
        <p><a href="{link_base}{results_path}/{resume_id}" target="_blank">View stored result (JSON)</a></p>
        <h3>Job match visualization</h3>
        <canvas id="{canvas}" style="max-width: 600px;"></canvas>"#,
        filename = escape(&result.filename),
        score = result.resume_score,
        matches = matches,
        skills = escape(&result.skills_text()),
        missing = escape(&result.missing_skills_text()),
        suggestions = escape(&result.suggestions),
        link_base = escape(link_base),
        results_path = RESULTS_PATH,
        resume_id = result.resume_id,
        canvas = chart.canvas_id(),
    )
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
