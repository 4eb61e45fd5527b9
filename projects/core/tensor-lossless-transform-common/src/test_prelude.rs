//! Common test imports and utilities for tests in the common crate.

// External crates commonly used in tests
pub use rstest::rstest;

// Core functionality from this crate
pub use crate::capability::*;
#[allow(unused_imports)] // Might be unused in some CPU architectures, and that's ok.
pub use crate::cpu_detect::*;
pub use crate::element_width::ElementWidth;
