//! Failure screenshot persistence.

use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::result::{SuiteError, SuiteResult};

/// Turn a scenario name into a filename-safe stem
fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Write PNG bytes under `dir`, named after the scenario and timestamped
/// so reruns never overwrite earlier captures. Returns the written path.
///
/// # Errors
///
/// [`SuiteError::Screenshot`] when the directory or file cannot be written.
pub fn save(dir: &Path, scenario_name: &str, png: &[u8]) -> SuiteResult<PathBuf> {
    std::fs::create_dir_all(dir).map_err(|e| SuiteError::Screenshot {
        message: format!("creating {}: {e}", dir.display()),
    })?;
    let stamp = Utc::now().format("%Y%m%d_%H%M%S");
    let path = dir.join(format!("{}_{stamp}.png", sanitize(scenario_name)));
    std::fs::write(&path, png).map_err(|e| SuiteError::Screenshot {
        message: format!("writing {}: {e}", path.display()),
    })?;
    tracing::debug!(path = %path.display(), "screenshot saved");
    Ok(path)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_keeps_safe_chars() {
        assert_eq!(sanitize("valid login"), "valid_login");
        assert_eq!(sanitize("cart: add/remove"), "cart__add_remove");
        assert_eq!(sanitize("sort_by-price"), "sort_by-price");
    }

    #[test]
    fn test_save_writes_png_named_after_scenario() {
        let dir = tempfile::tempdir().unwrap();
        let path = save(dir.path(), "locked user login", &[0x89, 0x50, 0x4E, 0x47]).unwrap();

        assert!(path.exists());
        let file_name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(file_name.starts_with("locked_user_login_"));
        assert!(file_name.ends_with(".png"));
        assert_eq!(std::fs::read(&path).unwrap(), vec![0x89, 0x50, 0x4E, 0x47]);
    }
}
