//! Unit tests for the transport module.

mod delayed_send_tests;
mod domain_tests;
