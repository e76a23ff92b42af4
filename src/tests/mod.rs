//! Crate-internal test suites.
//!
//! - `mocks`: mockall doubles for the store seam
//! - `unit`: behavior tests per component
//! - `property`: proptest invariants of the generator

mod mocks;
mod property;
mod unit;
