//! glandgraph-test - regression test harness
//!
//! Every `*_reg.rs` test drives a [`RegParams`], which numbers the
//! individual checks, records failures instead of panicking on the first
//! one, and reports a summary from [`RegParams::cleanup`].
//!
//! # Usage
//!
//! ```ignore
//! use glandgraph_test::RegParams;
//!
//! let mut rp = RegParams::new("proximity");
//! rp.compare_values(1.0, graph.edge_count() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: `display` also writes intermediate images to
//!   `tests/regout` for inspection; anything else only compares.

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

/// Get the path to the workspace root
fn workspace_root() -> String {
    // crates/glandgraph-test -> workspace root
    format!("{}/../..", env!("CARGO_MANIFEST_DIR"))
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}
