//! Bounded condition polling.
//!
//! Every synchronization point in the suite goes through here: poll an
//! observable until it satisfies a condition or a timeout elapses. There are
//! no fixed-duration sleeps anywhere else in the suite.

use crate::driver::{Driver, ElementState};
use crate::locator::Locator;
use crate::result::{SuiteError, SuiteResult};
use std::time::{Duration, Instant};

/// Default timeout for wait operations (10 seconds)
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 10_000;

/// Default polling interval (50ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// Element condition to wait for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    /// Element exists in the DOM
    Present,
    /// Element is rendered
    Visible,
    /// Element is visible and enabled
    Clickable,
}

impl Condition {
    /// Whether a state satisfies this condition
    #[must_use]
    pub const fn is_met_by(self, state: ElementState) -> bool {
        match self {
            Self::Present => state.is_present(),
            Self::Visible => state.is_visible(),
            Self::Clickable => state.is_interactable(),
        }
    }

    /// Description used in timeout errors
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::Present => "present",
            Self::Visible => "visible",
            Self::Clickable => "clickable",
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.describe())
    }
}

/// Options for wait operations
#[derive(Debug, Clone, Copy)]
pub struct WaitOptions {
    /// Give up after this long
    pub timeout: Duration,
    /// Sleep between polls
    pub poll_interval: Duration,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_WAIT_TIMEOUT_MS),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }
}

impl WaitOptions {
    /// Create wait options with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the polling interval
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }
}

/// Poll until the element satisfies the condition.
///
/// # Errors
///
/// [`SuiteError::ElementTimeout`] naming the locator and the unmet condition
/// if the timeout elapses first.
pub async fn for_element<D: Driver>(
    driver: &D,
    locator: &Locator,
    condition: Condition,
    options: WaitOptions,
) -> SuiteResult<()> {
    let start = Instant::now();
    loop {
        let state = driver.state(locator.selector()).await?;
        if condition.is_met_by(state) {
            tracing::trace!(%locator, %condition, elapsed_ms = start.elapsed().as_millis() as u64, "condition met");
            return Ok(());
        }
        if start.elapsed() >= options.timeout {
            return Err(SuiteError::ElementTimeout {
                locator: locator.to_string(),
                condition: condition.describe().to_string(),
                ms: options.timeout.as_millis() as u64,
            });
        }
        tokio::time::sleep(options.poll_interval).await;
    }
}

/// Poll until the current URL contains the fragment.
///
/// # Errors
///
/// [`SuiteError::WrongPage`] with the last observed URL if the timeout
/// elapses first.
pub async fn for_url_containing<D: Driver>(
    driver: &D,
    page_name: &str,
    fragment: &str,
    options: WaitOptions,
) -> SuiteResult<()> {
    let start = Instant::now();
    loop {
        let url = driver.current_url().await?;
        if url.contains(fragment) {
            return Ok(());
        }
        if start.elapsed() >= options.timeout {
            return Err(SuiteError::WrongPage {
                page: page_name.to_string(),
                expected: fragment.to_string(),
                actual: url,
            });
        }
        tokio::time::sleep(options.poll_interval).await;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::driver::{MockDriver, MockElement};
    use crate::locator::Selector;

    fn fast() -> WaitOptions {
        WaitOptions::new()
            .with_timeout(Duration::from_millis(80))
            .with_poll_interval(Duration::from_millis(5))
    }

    #[test]
    fn test_condition_ladder() {
        assert!(Condition::Present.is_met_by(ElementState::Hidden));
        assert!(!Condition::Visible.is_met_by(ElementState::Hidden));
        assert!(Condition::Visible.is_met_by(ElementState::Disabled));
        assert!(!Condition::Clickable.is_met_by(ElementState::Disabled));
        assert!(Condition::Clickable.is_met_by(ElementState::Interactable));
    }

    #[tokio::test]
    async fn test_wait_succeeds_immediately_for_ready_element() {
        let driver = MockDriver::new("about:blank");
        let locator = Locator::new("login button", Selector::id("login-button"));
        driver.with_dom(|dom| dom.put(locator.selector(), MockElement::interactable("Login")));

        wait_for(&driver, &locator).await.unwrap();
    }

    async fn wait_for(driver: &MockDriver, locator: &Locator) -> SuiteResult<()> {
        for_element(driver, locator, Condition::Clickable, fast()).await
    }

    #[tokio::test]
    async fn test_timeout_names_locator_and_condition() {
        let driver = MockDriver::new("about:blank");
        let locator = Locator::new("error banner", Selector::data_test("error"));

        let err = wait_for(&driver, &locator).await.unwrap_err();
        match err {
            SuiteError::ElementTimeout {
                locator: l,
                condition,
                ms,
            } => {
                assert!(l.contains("error banner"));
                assert!(l.contains("data-test=error"));
                assert_eq!(condition, "clickable");
                assert_eq!(ms, 80);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_url_wait_reports_last_observed_url() {
        let driver = MockDriver::new("https://www.saucedemo.com/");

        let err = for_url_containing(&driver, "products page", "inventory.html", fast())
            .await
            .unwrap_err();
        match err {
            SuiteError::WrongPage {
                page,
                expected,
                actual,
            } => {
                assert_eq!(page, "products page");
                assert_eq!(expected, "inventory.html");
                assert_eq!(actual, "https://www.saucedemo.com/");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_url_wait_sees_navigation() {
        let driver = MockDriver::new("https://www.saucedemo.com/inventory.html");
        for_url_containing(&driver, "products page", "inventory.html", fast())
            .await
            .unwrap();
    }
}
