//! triarb — triangular arbitrage detection engine
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod config;
pub mod types;
pub mod catalog;
pub mod gateway;
pub mod engine;
