//! # tally-core
//!
//! Core types and error types for tally.
//!
//! This crate provides the data model shared across all tally crates:
//! - Raw Toggl time entries and the projects they reference
//! - Issue references parsed from task descriptions, and the enrichment
//!   fetched for them
//! - Aggregated task records and their projectable fields
//! - The reporting date window
//! - Cross-cutting error types

pub mod entities;
pub mod errors;
pub mod value;
pub mod window;
