//! Unit tests for the command module.
//!
//! Tests are organised by layer: registry behaviour, executor dispatch, and
//! the request layer with a mocked access gate.
