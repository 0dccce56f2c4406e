//! Result and error types for the suite.

use thiserror::Error;

/// Result type for suite operations
pub type SuiteResult<T> = Result<T, SuiteError>;

/// Errors that can occur while driving the storefront
#[derive(Debug, Error)]
pub enum SuiteError {
    /// Configuration file missing a key, unparseable, or holding an invalid value.
    /// Fatal at startup; nothing recovers from a bad config.
    #[error("configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// Browser could not be launched
    #[error("failed to launch browser: {message}")]
    BrowserLaunch {
        /// Error message
        message: String,
    },

    /// Navigation to a URL failed
    #[error("navigation to {url} failed: {message}")]
    Navigation {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// An element did not reach the awaited condition within the timeout
    #[error("timed out after {ms}ms waiting for {locator} to be {condition}")]
    ElementTimeout {
        /// Locator description
        locator: String,
        /// The unmet condition
        condition: String,
        /// Timeout in milliseconds
        ms: u64,
    },

    /// An element interaction (click, type, select) failed
    #[error("interaction with {locator} failed: {message}")]
    Interaction {
        /// Locator description
        locator: String,
        /// Error message
        message: String,
    },

    /// In-page script evaluation failed
    #[error("script evaluation failed: {message}")]
    Script {
        /// Error message
        message: String,
    },

    /// A page transition did not land where it should have
    #[error("expected to arrive on {page} ({expected}), but got {actual}")]
    WrongPage {
        /// Destination page name
        page: String,
        /// Expected URL fragment or title
        expected: String,
        /// Observed URL or title
        actual: String,
    },

    /// A scenario assertion failed
    #[error("assertion failed: {message}")]
    AssertionFailed {
        /// Expected-vs-actual message
        message: String,
    },

    /// Screenshot capture or save failed
    #[error("screenshot failed: {message}")]
    Screenshot {
        /// Error message
        message: String,
    },

    /// Operation attempted on a session that was already quit
    #[error("browser session already closed")]
    SessionClosed,

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SuiteError {
    /// Shorthand for a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Shorthand for an assertion failure
    pub fn assertion(message: impl Into<String>) -> Self {
        Self::AssertionFailed {
            message: message.into(),
        }
    }
}
