#![allow(dead_code)]

use folio::{GraphicsPath, PathOperation};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub const FOX: &str = "The quick brown fox";

/// Initialise logging once per test binary.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Asserts two floats agree to within `1e-4`, the precision of printed values.
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-4,
        "expected {expected}, got {actual}"
    );
}

/// All operations of a path, across subpaths.
pub fn operations(path: &GraphicsPath) -> Vec<PathOperation> {
    path.operations().cloned().collect()
}
