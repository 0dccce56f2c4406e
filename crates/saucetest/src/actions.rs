//! The four primitive page operations, with waiting built in.
//!
//! Every page object is a thin layer over [`Actions`]: wait for an element
//! to reach the right condition, then click, type, read, or select. A failed
//! wait propagates as an error that names the locator and the condition;
//! nothing here retries beyond the poll loop, except the documented
//! two-strategy click fallback.

use crate::driver::Driver;
use crate::locator::Locator;
use crate::result::SuiteResult;
use crate::wait::{self, Condition, WaitOptions};

/// Click strategy for one interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClickPolicy {
    /// One native click; any failure propagates
    #[default]
    Native,
    /// Native click first; if the click itself fails (animation overlap
    /// leaves the element obscured), fall back to a script-driven click.
    /// Bounded at exactly two attempts.
    NativeThenScript,
}

/// Primitive operations against one driver, sharing one wait policy
#[derive(Debug)]
pub struct Actions<'d, D: Driver> {
    driver: &'d D,
    wait: WaitOptions,
    nav_wait: WaitOptions,
}

// derived Clone/Copy would demand D: Copy; the driver is only borrowed
impl<D: Driver> Clone for Actions<'_, D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D: Driver> Copy for Actions<'_, D> {}

impl<'d, D: Driver> Actions<'d, D> {
    /// Create an action layer over a driver. Page-arrival checks use the
    /// same policy unless [`Self::with_navigation_wait`] overrides it.
    #[must_use]
    pub fn new(driver: &'d D, wait: WaitOptions) -> Self {
        Self {
            driver,
            wait,
            nav_wait: wait,
        }
    }

    /// Use a separate wait policy for page-arrival checks
    #[must_use]
    pub const fn with_navigation_wait(mut self, nav_wait: WaitOptions) -> Self {
        self.nav_wait = nav_wait;
        self
    }

    /// The underlying driver
    #[must_use]
    pub fn driver(&self) -> &'d D {
        self.driver
    }

    /// The wait policy in force for element conditions
    #[must_use]
    pub const fn wait_options(&self) -> WaitOptions {
        self.wait
    }

    /// The wait policy in force for page arrival
    #[must_use]
    pub const fn navigation_wait(&self) -> WaitOptions {
        self.nav_wait
    }

    /// Navigate to a URL
    pub async fn goto(&self, url: &str) -> SuiteResult<()> {
        tracing::info!(url, "navigating");
        self.driver.goto(url).await
    }

    /// Current URL
    pub async fn current_url(&self) -> SuiteResult<String> {
        self.driver.current_url().await
    }

    /// Wait until clickable, then click natively
    pub async fn click(&self, locator: &Locator) -> SuiteResult<()> {
        self.click_with(locator, ClickPolicy::Native).await
    }

    /// Wait until clickable, then click per the given policy
    pub async fn click_with(&self, locator: &Locator, policy: ClickPolicy) -> SuiteResult<()> {
        wait::for_element(self.driver, locator, Condition::Clickable, self.wait).await?;
        match self.driver.click(locator.selector()).await {
            Ok(()) => {
                tracing::debug!(%locator, "clicked");
                Ok(())
            }
            Err(err) if policy == ClickPolicy::NativeThenScript => {
                tracing::warn!(%locator, %err, "native click failed, retrying via script");
                self.driver.click_via_script(locator.selector()).await?;
                tracing::debug!(%locator, "clicked via script");
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    /// Wait until visible, then clear the field and type into it
    pub async fn type_text(&self, locator: &Locator, text: &str) -> SuiteResult<()> {
        wait::for_element(self.driver, locator, Condition::Visible, self.wait).await?;
        self.driver.type_text(locator.selector(), text).await?;
        tracing::debug!(%locator, text, "typed");
        Ok(())
    }

    /// Wait until visible, then read the element's text
    pub async fn text(&self, locator: &Locator) -> SuiteResult<String> {
        wait::for_element(self.driver, locator, Condition::Visible, self.wait).await?;
        let text = self.driver.read_text(locator.selector()).await?;
        tracing::debug!(%locator, text, "read text");
        Ok(text)
    }

    /// Texts of every match, without waiting (absent matches read as empty)
    pub async fn texts(&self, locator: &Locator) -> SuiteResult<Vec<String>> {
        self.driver.read_texts(locator.selector()).await
    }

    /// Number of matches, without waiting
    pub async fn count(&self, locator: &Locator) -> SuiteResult<usize> {
        self.driver.count(locator.selector()).await
    }

    /// Wait until visible, then select a dropdown option by visible text
    pub async fn select(&self, locator: &Locator, option: &str) -> SuiteResult<()> {
        wait::for_element(self.driver, locator, Condition::Visible, self.wait).await?;
        self.driver.select_by_text(locator.selector(), option).await?;
        tracing::debug!(%locator, option, "selected");
        Ok(())
    }

    /// Whether the element is visible right now, without waiting
    pub async fn is_displayed(&self, locator: &Locator) -> SuiteResult<bool> {
        let state = self.driver.state(locator.selector()).await?;
        Ok(state.is_visible())
    }
}
