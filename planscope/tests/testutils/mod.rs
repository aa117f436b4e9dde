//! Test utilities for planscope integration tests
//!
//! - plan_fixture: canned EXPLAIN documents and a random plan generator

pub mod plan_fixture;
