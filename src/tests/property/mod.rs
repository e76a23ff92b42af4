//! Property-based tests for the hero generator
//!
//! ## Test Modules
//!
//! - `hero_generator_props`: invariants of the random combination generator
//!   - `pick_distinct` never returns the same position twice
//!   - `pick_excluding` returns a member when the exclusion is absent
//!   - `pick_excluding` falls back to empty when everything is excluded
//!   - `generate` is deterministic for a fixed seed
//!
//! By default, proptest runs 256 cases per property. This can be configured
//! via the `PROPTEST_CASES` environment variable:
//!
//! ```sh
//! PROPTEST_CASES=1000 cargo test property --release
//! ```
