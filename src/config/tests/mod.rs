//! Unit tests for the config module.

mod configuration_service_tests;
