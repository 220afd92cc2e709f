//! Core types and trait definitions for the Onbuddy onboarding store.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod account;
pub mod cascade;
pub mod error;
pub mod id;
pub mod org;
pub mod relevance;
pub mod seed;
pub mod store;
pub mod topic;

pub use error::{Error, Result};
