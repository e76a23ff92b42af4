//! Unit tests per component.

mod file_store_tests;
mod generator_tests;
mod http_store_tests;
