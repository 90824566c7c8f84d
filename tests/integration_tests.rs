//! Integration tests for db-relay.
//!
//! Tests that hit a real server require a running MySQL database.
//! Set the DATABASE_URL environment variable to run them.
//!
//! Run with: `cargo test --test integration_tests`

mod integration;
