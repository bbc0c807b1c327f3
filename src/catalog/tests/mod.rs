//! Tests for catalog loading and the review session

mod session_tests;
