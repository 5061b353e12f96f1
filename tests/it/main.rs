//! Single test binary entry point.
//!
//! All integration tests compile into one binary to keep link time down.
//!
//! Structure:
//! - helpers: builders, a write-failing store, input event helpers
//! - integration: multi-component workflow tests through `Ideashelf`
//! - unit: single-component tests against the public API

mod helpers;
