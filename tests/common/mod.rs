//! Common test utilities and fixtures for codequal integration tests
//!
//! This module provides:
//! - `TestRepo` builder for creating temporary source trees
//! - Python fixtures exercising each metric

#![allow(dead_code)]

pub mod fixtures;
pub mod test_repo;

pub use test_repo::TestRepo;
