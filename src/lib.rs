//! fedsql - seeds two demo databases and queries them through a federated
//! SQL engine.
//!
//! This library exposes the core modules for use by the binary and the
//! integration tests.

pub mod cli;
pub mod config;
pub mod db;
pub mod demo;
pub mod error;
pub mod logging;
pub mod render;
pub mod seed;
