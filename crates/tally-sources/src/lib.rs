//! # tally-sources
//!
//! HTTP clients for the services a report is built from:
//! - Toggl (time entries and projects)
//! - Pivotal Tracker (story estimates for `#<id>` tasks)
//!
//! The aggregator only sees the three source traits below, so tests can swap
//! the network for in-memory fakes.

mod error;
mod http;
mod pivotal;
mod toggl;

pub use error::SourceError;
pub use pivotal::{IssueTracker, PivotalClient};
pub use toggl::TogglClient;

use std::future::Future;

use tally_core::entities::{Enrichment, IssueRef, Project, ProjectId, RawTimeEntry};
use tally_core::window::DateWindow;

/// Fetches raw time entries for a date window.
pub trait TimeEntrySource {
    /// All entries starting inside `window`, in API order.
    fn fetch_time_entries(
        &self,
        window: &DateWindow,
    ) -> impl Future<Output = Result<Vec<RawTimeEntry>, SourceError>> + Send;
}

/// Looks up a project by id.
pub trait ProjectSource {
    fn fetch_project(
        &self,
        id: ProjectId,
    ) -> impl Future<Output = Result<Project, SourceError>> + Send;
}

/// Fetches estimate and link metadata for an issue reference.
pub trait EnrichmentSource {
    fn fetch_enrichment(
        &self,
        issue: &IssueRef,
    ) -> impl Future<Output = Result<Enrichment, SourceError>> + Send;
}
