//! Test utilities for Aerosuite
//!
//! Temporary storage, a config pointed at it, and small mesh fixtures.

use crate::config::Config;
use std::path::PathBuf;
use tempfile::TempDir;

/// A unit triangle in OBJ form
pub const TRIANGLE_OBJ: &str = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";

/// Create a temporary directory for testing
///
/// # Panics
///
/// Panics if the directory cannot be created
pub fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Write `content` to `name` inside `dir`
///
/// # Panics
///
/// Panics if file creation or writing fails
pub fn create_test_file(dir: &TempDir, name: &str, content: impl AsRef<[u8]>) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write test file");
    path
}

/// Default configuration with model storage inside `dir`
pub fn test_config(dir: &TempDir) -> Config {
    let mut config = Config::default();
    config.storage.path = Some(dir.path().join("models.db"));
    config
}

/// Assert that an error's display text contains `expected`
///
/// # Panics
///
/// Panics if `result` is `Ok` or the message does not match
pub fn assert_error_contains<T: std::fmt::Debug>(result: crate::Result<T>, expected: &str) {
    match result {
        Ok(value) => panic!("Expected error containing '{}', got Ok({:?})", expected, value),
        Err(e) => assert!(
            e.to_string().contains(expected),
            "Expected error containing '{}', got '{}'",
            expected,
            e
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_test_file() {
        let dir = temp_dir();
        let path = create_test_file(&dir, "tri.obj", TRIANGLE_OBJ);
        assert_eq!(std::fs::read_to_string(path).unwrap(), TRIANGLE_OBJ);
    }

    #[test]
    fn test_test_config_uses_temp_storage() {
        let dir = temp_dir();
        let config = test_config(&dir);
        assert!(config
            .storage
            .resolve_path()
            .unwrap()
            .starts_with(dir.path()));
        assert!(config.validate().is_ok());
    }

    #[test]
    #[should_panic(expected = "Expected error containing")]
    fn test_assert_error_contains_ok_panics() {
        assert_error_contains(Ok::<_, anyhow::Error>(1), "boom");
    }
}
