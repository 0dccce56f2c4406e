//! Result-returning checks used inside scenarios.
//!
//! Scenarios propagate these with `?` so a failed check aborts the scenario
//! and its message lands in the report, without panicking the runner.

use std::fmt::Debug;

use crate::result::{SuiteError, SuiteResult};

/// Check helpers for scenario bodies
pub struct Check;

impl Check {
    /// Check two values are equal
    ///
    /// # Errors
    ///
    /// [`SuiteError::AssertionFailed`] when they differ.
    pub fn equals<T: PartialEq + Debug>(context: &str, expected: &T, actual: &T) -> SuiteResult<()> {
        if expected == actual {
            Ok(())
        } else {
            Err(SuiteError::assertion(format!(
                "{context}: expected {expected:?}, got {actual:?}"
            )))
        }
    }

    /// Check a string contains a substring
    ///
    /// # Errors
    ///
    /// [`SuiteError::AssertionFailed`] when the substring is absent.
    pub fn contains(context: &str, haystack: &str, needle: &str) -> SuiteResult<()> {
        if haystack.contains(needle) {
            Ok(())
        } else {
            Err(SuiteError::assertion(format!(
                "{context}: expected '{haystack}' to contain '{needle}'"
            )))
        }
    }

    /// Check a condition holds
    ///
    /// # Errors
    ///
    /// [`SuiteError::AssertionFailed`] with the message when it does not.
    pub fn holds(condition: bool, message: &str) -> SuiteResult<()> {
        if condition {
            Ok(())
        } else {
            Err(SuiteError::assertion(message))
        }
    }

    /// Check a condition does not hold
    ///
    /// # Errors
    ///
    /// [`SuiteError::AssertionFailed`] with the message when it does.
    pub fn does_not_hold(condition: bool, message: &str) -> SuiteResult<()> {
        Self::holds(!condition, message)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_equals_passes_and_fails() {
        assert!(Check::equals("title", &"Products", &"Products").is_ok());
        let err = Check::equals("title", &"Products", &"Your Cart").unwrap_err();
        assert!(err.to_string().contains("expected \"Products\""));
    }

    #[test]
    fn test_contains_reports_both_strings() {
        let err = Check::contains("error banner", "Epic sadface", "locked out").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Epic sadface"));
        assert!(message.contains("locked out"));
    }

    #[test]
    fn test_holds_and_negation() {
        assert!(Check::holds(true, "badge visible").is_ok());
        assert!(Check::does_not_hold(false, "badge visible").is_ok());
        let err = Check::holds(false, "badge visible").unwrap_err();
        assert!(err.to_string().contains("badge visible"));
    }
}
