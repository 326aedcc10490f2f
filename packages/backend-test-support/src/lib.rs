//! Backend test support utilities
//!
//! Shared by the backend's integration test binaries: one logging setup
//! and unique id helpers.

pub mod logging;
pub mod unique_helpers;
