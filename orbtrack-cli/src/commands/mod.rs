//! CLI command implementations.

pub mod common;
pub mod config;
pub mod crew;
pub mod track;
