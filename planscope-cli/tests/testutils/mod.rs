//! Test utilities for planscope CLI tests

pub mod cli_fixture;
