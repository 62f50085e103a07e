//! Unit tests for the formatting module.
//!
//! Pipeline tests use small stub formatters; adapter tests run against a
//! frozen clock so that replaced dates are predictable.

mod catalog_tests;
mod date_time_tests;
mod pipeline_tests;
mod stubs;
