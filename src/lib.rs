// ABOUTME: Library root for cloudformer - exposes the orchestration core for testing.
// ABOUTME: The main binary is in main.rs.

pub mod config;
pub mod control;
pub mod deploy;
pub mod error;
pub mod events;
pub mod output;
pub mod status;
pub mod template;
pub mod types;
