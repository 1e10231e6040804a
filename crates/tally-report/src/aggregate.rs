//! Task aggregation: raw time entries in, one enriched [`TaskRecord`] per
//! distinct description out.
//!
//! Only the project and enrichment lookups suspend. Grouping and reduction
//! are plain synchronous passes over the entry list.

use std::collections::HashMap;

use chrono::TimeZone;
use futures::future::{join_all, try_join_all};
use tally_core::entities::{
    Enrichment, IssueRef, Project, ProjectId, RawTimeEntry, TaskRecord,
};
use tally_sources::{EnrichmentSource, ProjectSource, SourceError};

use crate::error::ReportError;

/// Resolved projects, keyed by id. Built once, then only read.
pub type ProjectMap = HashMap<ProjectId, Project>;

/// Entries sharing one description, in fetch order.
#[derive(Debug)]
pub struct TaskGroup<'a> {
    pub description: &'a str,
    pub entries: Vec<&'a RawTimeEntry>,
}

/// Outcome of one aggregation run.
#[derive(Debug)]
pub struct Aggregation {
    /// One record per task, in first-seen order.
    pub records: Vec<TaskRecord>,
    /// Number of raw entries that went in.
    pub entry_count: usize,
    /// Descriptions of tasks whose enrichment lookup failed.
    pub enrichment_failures: Vec<String>,
}

/// Distinct referenced project ids, in first-seen order. Entries without a
/// project (null or `0` pid) are skipped.
#[must_use]
pub fn distinct_project_ids(entries: &[RawTimeEntry]) -> Vec<ProjectId> {
    let mut ids = Vec::new();
    for id in entries.iter().filter_map(RawTimeEntry::project_id) {
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    ids
}

/// Fetch every project concurrently. The first failure fails the whole
/// resolution; no project is ever substituted.
///
/// # Errors
///
/// Returns [`ReportError::Project`] naming the project that failed.
pub async fn resolve_projects<P: ProjectSource>(
    source: &P,
    ids: &[ProjectId],
) -> Result<ProjectMap, ReportError> {
    let lookups = ids.iter().map(|&id| async move {
        source
            .fetch_project(id)
            .await
            .map(|project| (id, project))
            .map_err(|source| ReportError::Project { id, source })
    });
    let projects = try_join_all(lookups).await?;
    Ok(projects.into_iter().collect())
}

/// Partition entries by exact description, keeping groups in first-seen order
/// and entries within a group in fetch order.
#[must_use]
pub fn group_entries(entries: &[RawTimeEntry]) -> Vec<TaskGroup<'_>> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<TaskGroup<'_>> = Vec::new();

    for entry in entries {
        let description = entry.description.as_str();
        if let Some(&slot) = index.get(description) {
            groups[slot].entries.push(entry);
        } else {
            index.insert(description, groups.len());
            groups.push(TaskGroup {
                description,
                entries: vec![entry],
            });
        }
    }
    groups
}

/// Sum of the group's durations, in hours.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn total_hours(entries: &[&RawTimeEntry]) -> f64 {
    let seconds: i64 = entries.iter().map(|entry| entry.duration).sum();
    seconds as f64 / 3600.0
}

/// Distinct weekday names in first-seen order, joined with `", "`. Days are
/// read in `tz`, the zone the reporting window was resolved in.
#[must_use]
pub fn days_worked<Tz: TimeZone>(entries: &[&RawTimeEntry], tz: &Tz) -> String {
    let mut days: Vec<&'static str> = Vec::new();
    for entry in entries {
        let day = entry.weekday_in(tz);
        if !days.contains(&day) {
            days.push(day);
        }
    }
    days.join(", ")
}

/// Reduce a group to its record, without enrichment.
#[must_use]
pub fn reduce_group<Tz: TimeZone>(
    group: &TaskGroup<'_>,
    projects: &ProjectMap,
    owner: &str,
    tz: &Tz,
) -> TaskRecord {
    let task_type = group
        .entries
        .first()
        .and_then(|entry| entry.project_id())
        .and_then(|id| projects.get(&id))
        .map(|project| project.name.clone());

    TaskRecord {
        name: group.description.to_string(),
        days_worked: days_worked(&group.entries, tz),
        duration: total_hours(&group.entries),
        task_type,
        owner: owner.to_string(),
        estimate: None,
        url: None,
        notes: String::new(),
    }
}

/// Look up enrichment for one task. `None` means the description carries no
/// issue reference and no call was made.
async fn lookup<E: EnrichmentSource>(
    source: &E,
    description: &str,
) -> Option<Result<Enrichment, SourceError>> {
    let issue = IssueRef::from_description(description)?;
    Some(source.fetch_enrichment(&issue).await)
}

/// Run the aggregation over already-fetched entries.
///
/// Projects are resolved first (concurrently, failures fatal). Then every
/// enrichment lookup is issued at once and joined in submission order, so
/// record order never depends on which lookup finishes first. A failed lookup
/// is logged and leaves that task's estimate and url empty.
///
/// Weekday names are evaluated in `tz`.
///
/// # Errors
///
/// Returns [`ReportError::Project`] if any referenced project cannot be
/// fetched.
pub async fn aggregate<P, E, Tz>(
    entries: &[RawTimeEntry],
    projects: &P,
    enrichment: &E,
    owner: &str,
    tz: &Tz,
) -> Result<Aggregation, ReportError>
where
    P: ProjectSource,
    E: EnrichmentSource,
    Tz: TimeZone,
{
    let project_ids = distinct_project_ids(entries);
    let project_map = resolve_projects(projects, &project_ids).await?;
    tracing::debug!(projects = project_map.len(), "projects resolved");

    let groups = group_entries(entries);
    let mut records: Vec<TaskRecord> = groups
        .iter()
        .map(|group| reduce_group(group, &project_map, owner, tz))
        .collect();

    let lookups = groups
        .iter()
        .map(|group| lookup(enrichment, group.description));
    let results = join_all(lookups).await;

    let mut enrichment_failures = Vec::new();
    for (record, result) in records.iter_mut().zip(results) {
        let found = match result {
            None => Enrichment::default(),
            Some(Ok(found)) => found,
            Some(Err(error)) => {
                tracing::warn!(
                    task = %record.name,
                    %error,
                    "issue tracker lookup failed; leaving estimate and url empty"
                );
                enrichment_failures.push(record.name.clone());
                Enrichment::default()
            }
        };
        record.estimate = found.estimate;
        record.url = found.url;
    }

    Ok(Aggregation {
        records,
        entry_count: entries.len(),
        enrichment_failures,
    })
}
