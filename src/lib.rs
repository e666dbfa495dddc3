//! ascii-backdrop library crate.
//!
//! This module exposes the pipeline components for integration testing.

pub mod canvas;
pub mod config;
pub mod converter;
pub mod font;
pub mod palette;
pub mod pipeline;
pub mod prep;
pub mod resolution;
