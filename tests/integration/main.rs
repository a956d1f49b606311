//! Integration tests for subgist
//!
//! These tests use wiremock to stand in for the remote link source, the
//! conversion service and the Gist API.

mod schedule_tests;
mod server_tests;
