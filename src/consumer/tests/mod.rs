//! Unit tests for the consumer module.
