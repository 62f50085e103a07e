//! Unit tests for the producer module.
