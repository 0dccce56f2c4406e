//! Run reporting: an HTML summary for humans and a JSON document for CI.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::ReportSettings;
use crate::result::SuiteResult;

/// Outcome of one scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScenarioStatus {
    /// Scenario passed
    Passed,
    /// Scenario failed
    Failed,
    /// Scenario was filtered out and never ran
    Skipped,
}

impl ScenarioStatus {
    /// Whether the scenario passed
    #[must_use]
    pub const fn is_passed(self) -> bool {
        matches!(self, Self::Passed)
    }

    /// Whether the scenario failed
    #[must_use]
    pub const fn is_failed(self) -> bool {
        matches!(self, Self::Failed)
    }
}

/// One scenario's outcome as it lands in the report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioRecord {
    /// Scenario name
    pub name: String,
    /// Tags the scenario carries
    pub tags: Vec<String>,
    /// Outcome
    pub status: ScenarioStatus,
    /// Wall-clock duration
    pub duration: Duration,
    /// Error message when failed
    pub error: Option<String>,
    /// Failure screenshot, when one was captured
    pub screenshot: Option<PathBuf>,
    /// When the scenario finished
    pub finished_at: DateTime<Utc>,
}

impl ScenarioRecord {
    /// Record a pass
    #[must_use]
    pub fn passed(name: impl Into<String>, tags: &[&str], duration: Duration) -> Self {
        Self {
            name: name.into(),
            tags: tags.iter().map(ToString::to_string).collect(),
            status: ScenarioStatus::Passed,
            duration,
            error: None,
            screenshot: None,
            finished_at: Utc::now(),
        }
    }

    /// Record a failure
    #[must_use]
    pub fn failed(
        name: impl Into<String>,
        tags: &[&str],
        duration: Duration,
        error: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            tags: tags.iter().map(ToString::to_string).collect(),
            status: ScenarioStatus::Failed,
            duration,
            error: Some(error.into()),
            screenshot: None,
            finished_at: Utc::now(),
        }
    }

    /// Record a scenario the tag filter excluded
    #[must_use]
    pub fn skipped(name: impl Into<String>, tags: &[&str]) -> Self {
        Self {
            name: name.into(),
            tags: tags.iter().map(ToString::to_string).collect(),
            status: ScenarioStatus::Skipped,
            duration: Duration::ZERO,
            error: None,
            screenshot: None,
            finished_at: Utc::now(),
        }
    }

    /// Attach a failure screenshot path
    #[must_use]
    pub fn with_screenshot(mut self, path: PathBuf) -> Self {
        self.screenshot = Some(path);
        self
    }
}

/// Collects scenario records and writes the report files
#[derive(Debug)]
pub struct Reporter {
    settings: ReportSettings,
    records: Vec<ScenarioRecord>,
    started_at: DateTime<Utc>,
}

impl Reporter {
    /// Create a reporter for one run
    #[must_use]
    pub fn new(settings: ReportSettings) -> Self {
        Self {
            settings,
            records: Vec::new(),
            started_at: Utc::now(),
        }
    }

    /// Record one scenario outcome
    pub fn record(&mut self, record: ScenarioRecord) {
        self.records.push(record);
    }

    /// Number of passed scenarios
    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.status.is_passed())
            .count()
    }

    /// Number of failed scenarios
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.status.is_failed())
            .count()
    }

    /// Number of skipped scenarios
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.status == ScenarioStatus::Skipped)
            .count()
    }

    /// Number of scenarios that actually ran
    #[must_use]
    pub fn executed_count(&self) -> usize {
        self.records.len() - self.skipped_count()
    }

    /// Pass rate over executed scenarios, 0.0 to 1.0
    #[must_use]
    pub fn pass_rate(&self) -> f64 {
        let executed = self.executed_count();
        if executed == 0 {
            return 1.0;
        }
        self.passed_count() as f64 / executed as f64
    }

    /// Whether no scenario failed
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failed_count() == 0
    }

    /// Summed scenario durations
    #[must_use]
    pub fn total_duration(&self) -> Duration {
        self.records.iter().map(|r| r.duration).sum()
    }

    /// The collected records
    #[must_use]
    pub fn records(&self) -> &[ScenarioRecord] {
        &self.records
    }

    /// One-line run summary
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{}: {}/{} passed ({:.1}%), {} skipped",
            self.settings.name,
            self.passed_count(),
            self.executed_count(),
            self.pass_rate() * 100.0,
            self.skipped_count()
        )
    }

    /// Write `report.html` and `report.json` into the configured directory,
    /// returning the HTML path.
    ///
    /// # Errors
    ///
    /// Filesystem or serialization failure.
    pub fn write(&self) -> SuiteResult<PathBuf> {
        std::fs::create_dir_all(&self.settings.dir)?;
        let html_path = self.settings.dir.join("report.html");
        std::fs::write(&html_path, self.render_html())?;
        self.write_json(&self.settings.dir.join("report.json"))?;
        tracing::info!(path = %html_path.display(), "report written");
        Ok(html_path)
    }

    fn write_json(&self, path: &Path) -> SuiteResult<()> {
        #[derive(Serialize)]
        struct RunReport<'a> {
            name: &'a str,
            started_at: DateTime<Utc>,
            passed: usize,
            failed: usize,
            skipped: usize,
            scenarios: &'a [ScenarioRecord],
        }
        let report = RunReport {
            name: &self.settings.name,
            started_at: self.started_at,
            passed: self.passed_count(),
            failed: self.failed_count(),
            skipped: self.skipped_count(),
            scenarios: &self.records,
        };
        std::fs::write(path, serde_json::to_string_pretty(&report)?)?;
        Ok(())
    }

    /// Render the HTML report content
    #[must_use]
    pub fn render_html(&self) -> String {
        let mut html = String::new();

        html.push_str(&format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>{}</title>
    <style>
        body {{ font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; margin: 20px; }}
        .summary {{ background: #f5f5f5; padding: 20px; border-radius: 8px; margin-bottom: 20px; }}
        .progress-bar {{ background: #ddd; height: 20px; border-radius: 10px; overflow: hidden; }}
        .passed {{ background: #4caf50; height: 100%; }}
        .scenario {{ padding: 10px; margin: 5px 0; border-radius: 4px; }}
        .scenario.pass {{ background: #e8f5e9; border-left: 4px solid #4caf50; }}
        .scenario.fail {{ background: #ffebee; border-left: 4px solid #f44336; }}
        .scenario.skip {{ background: #fff3e0; border-left: 4px solid #ff9800; }}
        .tags {{ color: #757575; font-size: 0.85em; }}
        .error {{ color: #d32f2f; font-family: monospace; white-space: pre-wrap; }}
    </style>
</head>
<body>
"#,
            self.settings.title
        ));

        html.push_str(&format!(
            r#"<div class="summary">
    <h1>{}</h1>
    <h2>Results: {}/{} passed ({:.1}%)</h2>
    <div class="progress-bar">
        <div class="passed" style="width: {:.1}%"></div>
    </div>
    <p>Started {} UTC, ran {:.2}s, {} skipped</p>
</div>
"#,
            self.settings.name,
            self.passed_count(),
            self.executed_count(),
            self.pass_rate() * 100.0,
            self.pass_rate() * 100.0,
            self.started_at.format("%Y-%m-%d %H:%M:%S"),
            self.total_duration().as_secs_f64(),
            self.skipped_count()
        ));

        html.push_str("<h2>Scenarios</h2>\n");
        for record in &self.records {
            let class = match record.status {
                ScenarioStatus::Passed => "pass",
                ScenarioStatus::Failed => "fail",
                ScenarioStatus::Skipped => "skip",
            };
            html.push_str(&format!(
                r#"<div class="scenario {}">
    <strong>{}</strong> - {:?} ({:.2}ms)
    <div class="tags">{}</div>
"#,
                class,
                record.name,
                record.status,
                record.duration.as_secs_f64() * 1000.0,
                record.tags.join(" ")
            ));
            if let Some(error) = &record.error {
                html.push_str(&format!("    <div class=\"error\">{error}</div>\n"));
            }
            if let Some(screenshot) = &record.screenshot {
                html.push_str(&format!(
                    "    <div><a href=\"{}\">failure screenshot</a></div>\n",
                    screenshot.display()
                ));
            }
            html.push_str("</div>\n");
        }

        html.push_str("</body>\n</html>\n");
        html
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn reporter() -> Reporter {
        Reporter::new(ReportSettings::default())
    }

    #[test]
    fn test_counts_and_pass_rate() {
        let mut r = reporter();
        r.record(ScenarioRecord::passed(
            "valid login",
            &["login", "smoke"],
            Duration::from_millis(1200),
        ));
        r.record(ScenarioRecord::failed(
            "locked user",
            &["login"],
            Duration::from_millis(800),
            "banner mismatch",
        ));
        r.record(ScenarioRecord::skipped("sorting", &["products"]));

        assert_eq!(r.passed_count(), 1);
        assert_eq!(r.failed_count(), 1);
        assert_eq!(r.skipped_count(), 1);
        assert_eq!(r.executed_count(), 2);
        assert!((r.pass_rate() - 0.5).abs() < f64::EPSILON);
        assert!(!r.all_passed());
    }

    #[test]
    fn test_empty_run_passes() {
        let r = reporter();
        assert!(r.all_passed());
        assert!((r.pass_rate() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_html_includes_failure_details() {
        let mut r = reporter();
        r.record(
            ScenarioRecord::failed(
                "order happy path",
                &["checkout"],
                Duration::from_millis(500),
                "expected Checkout: Overview",
            )
            .with_screenshot(PathBuf::from("shots/order_happy_path.png")),
        );

        let html = r.render_html();
        assert!(html.contains("order happy path"));
        assert!(html.contains("expected Checkout: Overview"));
        assert!(html.contains("shots/order_happy_path.png"));
        assert!(html.contains("checkout"));
    }

    #[test]
    fn test_write_emits_html_and_json() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = ReportSettings::default();
        settings.dir = dir.path().to_path_buf();
        let mut r = Reporter::new(settings);
        r.record(ScenarioRecord::passed("valid login", &["login"], Duration::ZERO));

        let html_path = r.write().unwrap();
        assert!(html_path.exists());
        let json: serde_json::Value = serde_json::from_str(
            &std::fs::read_to_string(dir.path().join("report.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(json["passed"], 1);
        assert_eq!(json["scenarios"][0]["name"], "valid login");
    }
}
