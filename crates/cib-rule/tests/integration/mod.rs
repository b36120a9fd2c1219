//! Integration tests for rule parsing and export

mod concurrency_tests;
mod export_tests;
mod parse_tests;
