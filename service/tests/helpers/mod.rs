//! Shared setup for integration tests

#![allow(dead_code)]

use biolink_toolkit::Toolkit;
use biolink_toolkit_core::ToolkitConfig;
use std::path::PathBuf;
use std::sync::Once;
use tracing_subscriber::EnvFilter;

static TRACING: Once = Once::new();

/// Install a test-writer subscriber honouring `RUST_LOG`
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Path of a file under `tests/fixtures`
pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Toolkit over the Biolink-shaped fixture with default configuration
pub fn biolink() -> Toolkit {
    init_tracing();
    Toolkit::from_file(fixture("biolink-model.yaml"), ToolkitConfig::default())
        .expect("fixture schema builds")
}

/// Owned strings for comparing against query results
pub fn strings(names: &[&str]) -> Vec<String> {
    names.iter().map(ToString::to_string).collect()
}
