//! Repair Desk Core - Shared types library.
//!
//! This crate provides common types used across all Repair Desk components:
//! - `server` - HTTP API for submitting and processing repair requests
//! - `cli` - Command-line tools for database setup and admin management
//!
//! # Architecture
//!
//! The core crate contains only types and the repair status state machine -
//! no I/O, no database access, no HTTP. This keeps it lightweight and allows
//! it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and the repair lifecycle

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
