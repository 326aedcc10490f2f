#![allow(dead_code)]

// tests/support/mod.rs
//
// Test support modules for integration tests.

pub mod harness;
pub mod table;
