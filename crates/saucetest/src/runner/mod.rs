//! Scenario execution.
//!
//! The runner owns the lifecycle the suite depends on: one fresh browser
//! session per scenario, a failure screenshot before teardown, and a
//! report at the end. Scenarios run sequentially in declaration order.

mod tags;

pub use tags::TagFilter;

use std::time::Instant;

use futures::future::BoxFuture;

use crate::actions::Actions;
use crate::config::Settings;
use crate::driver::Driver;
use crate::reporter::{Reporter, ScenarioRecord};
use crate::result::SuiteResult;
use crate::screenshot;

/// Everything a scenario body gets to work with
#[derive(Debug)]
pub struct ScenarioContext<D: Driver> {
    /// The session's driver
    pub driver: D,
    /// Suite settings
    pub settings: Settings,
}

impl<D: Driver> ScenarioContext<D> {
    /// Action layer over this session, using the configured element wait
    #[must_use]
    pub fn actions(&self) -> Actions<'_, D> {
        Actions::new(&self.driver, self.settings.element_wait())
            .with_navigation_wait(self.settings.navigation_wait())
    }
}

/// A scenario body: borrows the context for the duration of the run
pub type ScenarioFn<D> = for<'a> fn(&'a ScenarioContext<D>) -> BoxFuture<'a, SuiteResult<()>>;

/// One named, tagged scenario
pub struct Scenario<D: Driver> {
    /// Scenario name as it appears in the report
    pub name: &'static str,
    /// Tags the filter expression selects on
    pub tags: &'static [&'static str],
    /// The body
    pub run: ScenarioFn<D>,
}

impl<D: Driver> std::fmt::Debug for Scenario<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scenario")
            .field("name", &self.name)
            .field("tags", &self.tags)
            .finish_non_exhaustive()
    }
}

/// Builds a fresh driver session for one scenario
pub type SessionFactory<D> = dyn for<'a> Fn(&'a Settings) -> BoxFuture<'a, SuiteResult<D>> + Send + Sync;

/// Sequential scenario runner
pub struct Runner<D: Driver> {
    settings: Settings,
    factory: Box<SessionFactory<D>>,
    filter: TagFilter,
}

impl<D: Driver> std::fmt::Debug for Runner<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runner")
            .field("settings", &self.settings)
            .field("filter", &self.filter)
            .finish_non_exhaustive()
    }
}

impl<D: Driver> Runner<D> {
    /// Create a runner over a session factory
    #[must_use]
    pub fn new(
        settings: Settings,
        factory: impl for<'a> Fn(&'a Settings) -> BoxFuture<'a, SuiteResult<D>> + Send + Sync + 'static,
    ) -> Self {
        Self {
            settings,
            factory: Box::new(factory),
            filter: TagFilter::all(),
        }
    }

    /// Restrict the run to scenarios matching a tag filter
    #[must_use]
    pub fn with_filter(mut self, filter: TagFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Run the scenarios in order, one session each, and write the report.
    ///
    /// A scenario failure is recorded and the run continues; only
    /// infrastructure failures (session launch, report writing) abort.
    ///
    /// # Errors
    ///
    /// Session launch or report write failure.
    pub async fn run(&self, scenarios: &[Scenario<D>]) -> SuiteResult<Reporter> {
        let mut reporter = Reporter::new(self.settings.report.clone());

        for scenario in scenarios {
            if !self.filter.matches(scenario.tags) {
                tracing::debug!(scenario = scenario.name, "filtered out");
                reporter.record(ScenarioRecord::skipped(scenario.name, scenario.tags));
                continue;
            }
            reporter.record(self.run_one(scenario).await?);
        }

        tracing::info!(summary = %reporter.summary(), "run finished");
        reporter.write()?;
        Ok(reporter)
    }

    async fn run_one(&self, scenario: &Scenario<D>) -> SuiteResult<ScenarioRecord> {
        tracing::info!(scenario = scenario.name, tags = ?scenario.tags, "starting");
        let driver = (self.factory)(&self.settings).await?;
        let context = ScenarioContext {
            driver,
            settings: self.settings.clone(),
        };

        let started = Instant::now();
        let outcome = (scenario.run)(&context).await;
        let duration = started.elapsed();

        let record = match outcome {
            Ok(()) => {
                tracing::info!(scenario = scenario.name, ?duration, "passed");
                ScenarioRecord::passed(scenario.name, scenario.tags, duration)
            }
            Err(err) => {
                tracing::error!(scenario = scenario.name, %err, "failed");
                let record =
                    ScenarioRecord::failed(scenario.name, scenario.tags, duration, err.to_string());
                match self.capture_failure(&context, scenario.name).await {
                    Ok(path) => record.with_screenshot(path),
                    Err(shot_err) => {
                        tracing::warn!(%shot_err, "failure screenshot not captured");
                        record
                    }
                }
            }
        };

        if let Err(err) = context.driver.close().await {
            tracing::warn!(%err, "session teardown failed");
        }
        Ok(record)
    }

    async fn capture_failure(
        &self,
        context: &ScenarioContext<D>,
        name: &str,
    ) -> SuiteResult<std::path::PathBuf> {
        let png = context.driver.screenshot().await?;
        screenshot::save(&self.settings.screenshot_dir, name, &png)
    }
}
