//! ffcompose - render declarative media jobs into ffmpeg argument vectors
//!
//! This library crate exposes configuration and job loading for the CLI and
//! for integration testing.

pub mod config;
pub mod job;
