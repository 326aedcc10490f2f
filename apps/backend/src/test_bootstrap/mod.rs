//! Test-only process setup for the unit test binary.

pub mod logging;
