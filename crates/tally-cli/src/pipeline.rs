//! Report pipeline: fetch → aggregate → export.
//!
//! 1. Fetch the window's time entries from Toggl (fatal on failure)
//! 2. Resolve projects and enrich tasks (`tally_report::aggregate`)
//! 3. Serialize the records and write the workbook (`tally_report::export`)
//!
//! Generic over the sources and the encoder so tests can run the whole flow
//! against in-memory fakes.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tally_config::ReportConfig;
use tally_core::window::DateWindow;
use tally_report::{DateSystem, ExportOptions, ExportSummary, WorkbookEncoder};
use tally_sources::{EnrichmentSource, ProjectSource, TimeEntrySource};

use crate::progress::Progress;

/// Everything about the output that is fixed before the run starts.
#[derive(Debug, Clone)]
pub struct ReportPlan {
    pub owner: String,
    pub output: PathBuf,
    pub export: ExportOptions,
}

impl ReportPlan {
    /// Build from the `[report]` section, with an optional `--output` override.
    pub fn from_config(config: &ReportConfig, output: Option<&Path>) -> anyhow::Result<Self> {
        let fields = config
            .task_fields()
            .context("invalid report.fields")?;
        Ok(Self {
            owner: config.owner.clone(),
            output: output.map_or_else(|| PathBuf::from(&config.output_path), Path::to_path_buf),
            export: ExportOptions {
                sheet_name: config.sheet_name.clone(),
                fields,
                dates: if config.date1904 {
                    DateSystem::Excel1904
                } else {
                    DateSystem::Excel1900
                },
            },
        })
    }
}

/// Run one report.
///
/// Returns the export summary even when the file could not be written; the
/// caller decides what that means for the exit code.
pub async fn run<S, E, W>(
    toggl: &S,
    tracker: &E,
    encoder: &W,
    plan: &ReportPlan,
    window: &DateWindow,
) -> anyhow::Result<ExportSummary>
where
    S: TimeEntrySource + ProjectSource,
    E: EnrichmentSource,
    W: WorkbookEncoder,
{
    tracing::debug!(
        since = %window.start_param(),
        until = %window.end_param(),
        "requesting time entries"
    );

    let progress = Progress::spinner("Fetching time entries...");
    let entries = match toggl.fetch_time_entries(window).await {
        Ok(entries) => entries,
        Err(error) => {
            progress.finish_err("Failed to fetch time entries");
            return Err(error).context("failed to fetch time entries from Toggl");
        }
    };
    tracing::info!("received {} entries", entries.len());

    progress.set_message("Resolving projects and issues...");
    // Same zone the window was resolved in, so weekdays match the window.
    let aggregation = match tally_report::aggregate(
        &entries,
        toggl,
        tracker,
        &plan.owner,
        &chrono::Local,
    )
    .await
    {
        Ok(aggregation) => aggregation,
        Err(error) => {
            progress.finish_err("Aggregation failed");
            return Err(error).context("failed to aggregate time entries");
        }
    };
    progress.finish_clear();
    tracing::info!(
        tasks = aggregation.records.len(),
        enrichment_failures = aggregation.enrichment_failures.len(),
        "all tasks processed"
    );

    let summary = tally_report::export(&aggregation.records, &plan.export, encoder, &plan.output);
    if let Some(path) = &summary.written {
        tracing::info!(
            path = %path.display(),
            rows = summary.rows,
            skipped_cells = summary.skipped_cells,
            "file written"
        );
        tracing::info!("all done");
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::{DateTime, TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use tally_core::entities::{Enrichment, IssueRef, Project, ProjectId, RawTimeEntry, TaskField};
    use tally_report::{EncodeError, Workbook, XlsxEncoder};
    use tally_sources::SourceError;

    use super::*;

    struct FakeToggl {
        entries: Option<Vec<RawTimeEntry>>,
        entry_calls: AtomicUsize,
    }

    impl FakeToggl {
        fn with(entries: Vec<RawTimeEntry>) -> Self {
            Self {
                entries: Some(entries),
                entry_calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                entries: None,
                entry_calls: AtomicUsize::new(0),
            }
        }
    }

    impl TimeEntrySource for FakeToggl {
        async fn fetch_time_entries(
            &self,
            _window: &DateWindow,
        ) -> Result<Vec<RawTimeEntry>, SourceError> {
            self.entry_calls.fetch_add(1, Ordering::SeqCst);
            self.entries.clone().ok_or_else(|| SourceError::Api {
                status: 403,
                message: "Forbidden".into(),
            })
        }
    }

    impl ProjectSource for FakeToggl {
        async fn fetch_project(&self, id: ProjectId) -> Result<Project, SourceError> {
            Ok(Project {
                id,
                name: "Website".into(),
            })
        }
    }

    struct FakeTracker;

    impl EnrichmentSource for FakeTracker {
        async fn fetch_enrichment(&self, issue: &IssueRef) -> Result<Enrichment, SourceError> {
            Ok(Enrichment {
                estimate: Some(5.0),
                url: Some(format!("http://x/{issue}")),
            })
        }
    }

    struct BrokenDisk;

    impl WorkbookEncoder for BrokenDisk {
        fn encode(&self, _workbook: &Workbook, _path: &Path) -> Result<(), EncodeError> {
            Err(EncodeError::Io(std::io::Error::other("read-only file system")))
        }
    }

    fn window() -> DateWindow {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        DateWindow::resolve(Some("2024-01-01"), Some("2024-01-08"), &now).unwrap()
    }

    fn entries() -> Vec<RawTimeEntry> {
        vec![
            RawTimeEntry {
                description: "#1 A".into(),
                pid: Some(ProjectId(10)),
                start: DateTime::parse_from_rfc3339("2024-01-01T09:00:00Z").unwrap(),
                duration: 3600,
            },
            RawTimeEntry {
                description: "#1 A".into(),
                pid: Some(ProjectId(10)),
                start: DateTime::parse_from_rfc3339("2024-01-02T09:00:00Z").unwrap(),
                duration: 7200,
            },
        ]
    }

    fn plan(output: PathBuf) -> ReportPlan {
        let config = ReportConfig {
            owner: "Ada".into(),
            ..Default::default()
        };
        ReportPlan::from_config(&config, Some(&output)).unwrap()
    }

    #[test]
    fn plan_uses_configured_output_without_override() {
        let config = ReportConfig {
            owner: "Ada".into(),
            date1904: true,
            ..Default::default()
        };
        let plan = ReportPlan::from_config(&config, None).unwrap();
        assert_eq!(plan.output, PathBuf::from("toggl-export.xlsx"));
        assert_eq!(plan.export.sheet_name, "Toggl Export");
        assert_eq!(plan.export.fields, TaskField::DEFAULT_ORDER.to_vec());
        assert_eq!(plan.export.dates, DateSystem::Excel1904);
    }

    #[test]
    fn plan_rejects_unknown_fields() {
        let config = ReportConfig {
            owner: "Ada".into(),
            fields: vec!["duration".into(), "hours".into()],
            ..Default::default()
        };
        assert!(ReportPlan::from_config(&config, None).is_err());
    }

    #[tokio::test]
    async fn writes_report_for_window() {
        let dir = tempfile::tempdir().unwrap();
        let plan = plan(dir.path().join("report.xlsx"));
        let toggl = FakeToggl::with(entries());

        let summary = run(&toggl, &FakeTracker, &XlsxEncoder, &plan, &window())
            .await
            .unwrap();

        assert_eq!(summary.rows, 1);
        assert_eq!(summary.skipped_cells, 0);
        assert_eq!(summary.written.as_deref(), Some(plan.output.as_path()));
        assert!(plan.output.exists());
        assert_eq!(toggl.entry_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn entry_fetch_failure_is_fatal_and_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let plan = plan(dir.path().join("report.xlsx"));

        let err = run(&FakeToggl::failing(), &FakeTracker, &XlsxEncoder, &plan, &window())
            .await
            .unwrap_err();

        assert!(err.to_string().contains("failed to fetch time entries"));
        assert!(!plan.output.exists());
    }

    #[tokio::test]
    async fn write_failure_is_reported_not_raised() {
        let plan = plan(PathBuf::from("unused.xlsx"));
        let toggl = FakeToggl::with(entries());

        let summary = run(&toggl, &FakeTracker, &BrokenDisk, &plan, &window())
            .await
            .unwrap();

        assert_eq!(summary.written, None);
        assert_eq!(summary.rows, 1);
    }

    #[tokio::test]
    async fn empty_window_still_writes_an_empty_sheet() {
        let dir = tempfile::tempdir().unwrap();
        let plan = plan(dir.path().join("empty.xlsx"));

        let summary = run(
            &FakeToggl::with(Vec::new()),
            &FakeTracker,
            &XlsxEncoder,
            &plan,
            &window(),
        )
        .await
        .unwrap();

        assert_eq!(summary.rows, 0);
        assert_eq!(summary.cells, 0);
        assert!(plan.output.exists());
    }
}
