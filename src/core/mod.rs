//! # Core Module
//!
//! Configuration and shared message utilities.

pub mod config;
pub mod response;

pub use config::Config;
pub use response::{chunk_for_message, MESSAGE_LIMIT};
