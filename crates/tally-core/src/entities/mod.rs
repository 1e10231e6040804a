//! Entity structs for the tally domain.
//!
//! Raw entities ([`RawTimeEntry`], [`Project`]) deserialize straight from the
//! time-tracking API. Derived entities ([`TaskRecord`]) are built by the
//! aggregator and never persisted on their own.

mod enrichment;
mod entry;
mod project;
mod task;

pub use enrichment::{Enrichment, IssueRef};
pub use entry::RawTimeEntry;
pub use project::{Project, ProjectId};
pub use task::{TaskField, TaskRecord};
