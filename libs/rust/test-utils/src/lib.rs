//! Shared test utilities for the auth gateway services.
//!
//! This crate provides:
//! - Proptest generators for registration and login payloads
//! - Test fixtures with sample users, credentials and signing config

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;

pub use generators::*;
