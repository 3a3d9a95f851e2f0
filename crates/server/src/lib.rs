//! Repair Desk server library.
//!
//! This crate provides the HTTP server as a library so the CLI and the
//! integration tests can share its store, services, and router.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
