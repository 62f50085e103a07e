//! Unit tests for the history module.
