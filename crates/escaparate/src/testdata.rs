//! Expected-data loading.
//!
//! Fixtures are plain JSON files committed next to the suite. The policy is
//! "no data, no assertion": a missing file means the dependent test has
//! nothing to check and should skip, which is distinct from a failure. A
//! file that exists but does not parse is a real error.

use crate::result::{Error, Result};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

/// Load a JSON fixture, or `None` when the file does not exist.
///
/// # Errors
///
/// Returns [`Error::Testdata`] when the file exists but cannot be parsed,
/// and [`Error::Io`] for other read failures.
pub fn load_optional<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<Option<T>> {
    let path = path.as_ref();
    if !path.exists() {
        debug!(path = %path.display(), "expected-data file missing, dependent assertions skip");
        return Ok(None);
    }
    let reader = BufReader::new(File::open(path)?);
    serde_json::from_reader(reader)
        .map(Some)
        .map_err(|e| Error::Testdata {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

/// Load a JSON fixture that must exist.
///
/// # Errors
///
/// Returns [`Error::Testdata`] when the file is missing or unparsable.
pub fn load_required<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    load_optional(path)?.ok_or_else(|| Error::Testdata {
        path: path.to_path_buf(),
        message: "file not found".into(),
    })
}

/// Load a fixture inside a test, skipping the test when the file is absent.
///
/// Expands to an early `return Ok(())` so the surrounding test passes as a
/// no-op; the skip is logged, not failed.
#[macro_export]
macro_rules! require_testdata {
    ($path:expr) => {
        match $crate::testdata::load_optional($path)? {
            Some(data) => data,
            None => {
                eprintln!("skipping: expected-data file {:?} not found", $path);
                return Ok(());
            }
        }
    };
}
