//! mindwell-cli library root.
//!
//! Re-exports the command and config modules so integration tests can
//! drive them with in-memory input and output.

pub mod commands;
pub mod config;
