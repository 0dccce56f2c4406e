//! Suite configuration.
//!
//! Settings come from three layers, later layers winning: built-in defaults,
//! an optional TOML file, then `SAUCETEST_*` environment variables. The
//! environment override mirrors how the original harness let system
//! properties trump the properties file.

use crate::result::{SuiteError, SuiteResult};
use crate::site;
use crate::wait::WaitOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Report output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// Directory reports are written into
    pub dir: PathBuf,
    /// Report document title
    pub title: String,
    /// Report name shown in the summary header
    pub name: String,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("target/reports"),
            title: "SauceDemo Regression Report".to_string(),
            name: "saucetest".to_string(),
        }
    }
}

/// Suite settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the storefront
    pub base_url: String,
    /// Browser name (chrome, firefox, edge); unrecognized names fall back to chrome
    pub browser: String,
    /// Run the browser headless
    pub headless: bool,
    /// Path to a Chromium-based browser binary; `None` discovers one
    pub browser_binary: Option<PathBuf>,
    /// Username that can log in
    pub valid_username: String,
    /// Password for the valid and locked users
    pub valid_password: String,
    /// Username of the locked-out user
    pub locked_username: String,
    /// Timeout for element-condition waits, in milliseconds
    pub explicit_wait_ms: u64,
    /// Timeout for page-arrival verification, in milliseconds
    pub implicit_wait_ms: u64,
    /// Report settings
    pub report: ReportSettings,
    /// Directory failure screenshots are written into
    pub screenshot_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: site::DEFAULT_BASE_URL.to_string(),
            browser: "chrome".to_string(),
            headless: true,
            browser_binary: None,
            valid_username: "standard_user".to_string(),
            valid_password: "secret_sauce".to_string(),
            locked_username: "locked_out_user".to_string(),
            explicit_wait_ms: 10_000,
            implicit_wait_ms: 5_000,
            report: ReportSettings::default(),
            screenshot_dir: PathBuf::from("target/screenshots"),
        }
    }
}

fn parse_wait_ms(key: &str, value: &str) -> SuiteResult<u64> {
    value
        .parse()
        .map_err(|_| SuiteError::config(format!("{key} must be milliseconds, got '{value}'")))
}

impl Settings {
    /// Load settings: defaults, then the TOML file (if given), then
    /// environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`SuiteError::Config`] if the file cannot be read or parsed,
    /// if an environment override has a non-numeric wait value, or if a
    /// value fails validation.
    pub fn load(path: Option<&Path>) -> SuiteResult<Self> {
        let mut settings = match path {
            Some(p) => {
                let raw = std::fs::read_to_string(p).map_err(|e| {
                    SuiteError::config(format!("cannot read {}: {e}", p.display()))
                })?;
                toml::from_str(&raw).map_err(|e| {
                    SuiteError::config(format!("cannot parse {}: {e}", p.display()))
                })?
            }
            None => Self::default(),
        };
        settings.apply_env_overrides()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Apply `SAUCETEST_*` environment variables on top of the current values
    fn apply_env_overrides(&mut self) -> SuiteResult<()> {
        if let Ok(v) = std::env::var("SAUCETEST_BASE_URL") {
            self.base_url = v;
        }
        if let Ok(v) = std::env::var("SAUCETEST_BROWSER") {
            self.browser = v;
        }
        if let Ok(v) = std::env::var("SAUCETEST_HEADLESS") {
            self.headless = v == "true" || v == "1";
        }
        if let Ok(v) = std::env::var("SAUCETEST_BROWSER_BINARY") {
            self.browser_binary = Some(PathBuf::from(v));
        }
        if let Ok(v) = std::env::var("SAUCETEST_VALID_USERNAME") {
            self.valid_username = v;
        }
        if let Ok(v) = std::env::var("SAUCETEST_VALID_PASSWORD") {
            self.valid_password = v;
        }
        if let Ok(v) = std::env::var("SAUCETEST_LOCKED_USERNAME") {
            self.locked_username = v;
        }
        if let Ok(ms) = std::env::var("SAUCETEST_EXPLICIT_WAIT_MS") {
            self.explicit_wait_ms = parse_wait_ms("SAUCETEST_EXPLICIT_WAIT_MS", &ms)?;
        }
        if let Ok(ms) = std::env::var("SAUCETEST_IMPLICIT_WAIT_MS") {
            self.implicit_wait_ms = parse_wait_ms("SAUCETEST_IMPLICIT_WAIT_MS", &ms)?;
        }
        Ok(())
    }

    fn validate(&self) -> SuiteResult<()> {
        if self.base_url.is_empty() {
            return Err(SuiteError::config("base_url must not be empty"));
        }
        if !self.base_url.starts_with("http") {
            return Err(SuiteError::config(format!(
                "base_url must be an http(s) URL, got '{}'",
                self.base_url
            )));
        }
        if self.explicit_wait_ms == 0 {
            return Err(SuiteError::config("explicit_wait_ms must be positive"));
        }
        Ok(())
    }

    /// Join a page path onto the base URL
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        if self.base_url.ends_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }

    /// Wait policy for element-condition polls
    #[must_use]
    pub fn element_wait(&self) -> WaitOptions {
        WaitOptions::new().with_timeout(Duration::from_millis(self.explicit_wait_ms))
    }

    /// Wait policy for page-arrival verification
    #[must_use]
    pub fn navigation_wait(&self) -> WaitOptions {
        WaitOptions::new().with_timeout(Duration::from_millis(self.implicit_wait_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_point_at_saucedemo() {
        let settings = Settings::default();
        assert_eq!(settings.base_url, "https://www.saucedemo.com/");
        assert_eq!(settings.browser, "chrome");
        assert!(settings.headless);
        assert_eq!(settings.valid_username, "standard_user");
    }

    #[test]
    fn test_url_for_joins_without_double_slash() {
        let settings = Settings::default();
        assert_eq!(
            settings.url_for("inventory.html"),
            "https://www.saucedemo.com/inventory.html"
        );

        let bare = Settings {
            base_url: "http://localhost:7777".to_string(),
            ..Settings::default()
        };
        assert_eq!(bare.url_for("cart.html"), "http://localhost:7777/cart.html");
    }

    #[test]
    fn test_load_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "browser = \"firefox\"\nexplicit_wait_ms = 2000").unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.browser, "firefox");
        assert_eq!(settings.explicit_wait_ms, 2000);
        // untouched keys keep their defaults
        assert_eq!(settings.valid_password, "secret_sauce");
    }

    #[test]
    fn test_load_rejects_garbage() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "this is not toml [").unwrap();

        let err = Settings::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, SuiteError::Config { .. }));
    }

    #[test]
    fn test_non_numeric_wait_override_is_fatal() {
        assert_eq!(parse_wait_ms("SAUCETEST_EXPLICIT_WAIT_MS", "2000").unwrap(), 2000);
        let err = parse_wait_ms("SAUCETEST_EXPLICIT_WAIT_MS", "soon").unwrap_err();
        assert!(matches!(err, SuiteError::Config { .. }));
        assert!(parse_wait_ms("SAUCETEST_IMPLICIT_WAIT_MS", "").is_err());
    }

    #[test]
    fn test_load_missing_file_is_fatal() {
        let err = Settings::load(Some(Path::new("/no/such/suite.toml"))).unwrap_err();
        assert!(matches!(err, SuiteError::Config { .. }));
    }

    #[test]
    fn test_validate_rejects_bad_base_url() {
        let settings = Settings {
            base_url: "saucedemo.com".to_string(),
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_wait_policies_use_configured_timeouts() {
        let settings = Settings {
            explicit_wait_ms: 1234,
            implicit_wait_ms: 567,
            ..Settings::default()
        };
        assert_eq!(settings.element_wait().timeout.as_millis(), 1234);
        assert_eq!(settings.navigation_wait().timeout.as_millis(), 567);
    }
}
