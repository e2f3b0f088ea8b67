//! Stream module tests.

mod error_tests;
mod file_tests;
