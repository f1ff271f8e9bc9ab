//! Shared configuration, error types and logging setup for the kunai workspace.

pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
