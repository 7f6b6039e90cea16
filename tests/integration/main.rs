//! Integration tests for diagsift.

mod helpers;

mod analyze_test;
mod cli_test;
mod count_test;
mod reduce_test;
