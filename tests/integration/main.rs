//! Integration test harness

mod sweep_tests;
