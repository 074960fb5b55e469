//! Hushcut - denoise the audio track of a video file
//!
//! This library crate exposes the pipeline and configuration for the binary
//! and for integration testing.

pub mod config;
pub mod pipeline;
