//! Integration test suite for techtree
//!
//! End-to-end tests that run the `techtree` binary against temporary game
//! installations built with [`techtree_cli::test_utils::GameFixture`].
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **common**: fixture content and command helpers
//! - **config**: configuration lookup and error reporting
//! - **cycles**: cycle report output
//! - **generate**: full generation and file fan-out
//! - **stats**: text and JSON statistics
//! - **tree**: single-tree rendering

mod common;

mod config;
mod cycles;
mod generate;
mod stats;
mod tree;
