//! Snapshot processing pipeline with explicit stages.
//!
//! Both commands share the same two stages:
//! 1. **Load**: read and parse the page-source XML into a snapshot
//! 2. **Evaluate**: run the query engine over the snapshot
//!
//! Each stage returns typed results; rendering stays with the binary.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use uisnap_ingest::load_snapshot;
use uisnap_model::{AttributeMap, ConditionSet};
use uisnap_query::{find_elements, max_depth, type_counts};

/// Result of a query run.
#[derive(Debug)]
pub struct QueryReport {
    /// The snapshot file that was queried.
    pub snapshot: PathBuf,
    /// Flat attribute maps of every matching element, in traversal order.
    pub matches: Vec<AttributeMap>,
}

/// Load a snapshot and collect every element matching the conditions.
pub fn execute_query(snapshot_path: &Path, conditions: &ConditionSet) -> Result<QueryReport> {
    let query_span = info_span!("query", snapshot = %snapshot_path.display());
    let _query_guard = query_span.enter();
    let query_start = Instant::now();

    let snapshot = load_snapshot(snapshot_path)
        .with_context(|| format!("load snapshot {}", snapshot_path.display()))?;
    let matches = find_elements(&snapshot, conditions);

    info!(
        snapshot = %snapshot_path.display(),
        condition_count = conditions.len(),
        match_count = matches.len(),
        duration_ms = query_start.elapsed().as_millis(),
        "query complete"
    );
    Ok(QueryReport {
        snapshot: snapshot_path.to_path_buf(),
        matches,
    })
}

/// Aggregate figures for one snapshot.
#[derive(Debug)]
pub struct SnapshotSummary {
    /// The snapshot file that was summarized.
    pub snapshot: PathBuf,
    /// Number of window roots.
    pub root_count: usize,
    /// Total number of elements.
    pub element_count: usize,
    /// Deepest nesting level.
    pub max_depth: usize,
    /// Element counts keyed by `type` attribute value.
    pub type_counts: BTreeMap<String, usize>,
}

/// Load a snapshot and derive its summary figures.
pub fn summarize_snapshot(snapshot_path: &Path) -> Result<SnapshotSummary> {
    let summary_span = info_span!("summary", snapshot = %snapshot_path.display());
    let _summary_guard = summary_span.enter();
    let summary_start = Instant::now();

    let snapshot = load_snapshot(snapshot_path)
        .with_context(|| format!("load snapshot {}", snapshot_path.display()))?;
    let summary = SnapshotSummary {
        snapshot: snapshot_path.to_path_buf(),
        root_count: snapshot.roots.len(),
        element_count: snapshot.element_count(),
        max_depth: max_depth(&snapshot),
        type_counts: type_counts(&snapshot),
    };

    info!(
        snapshot = %snapshot_path.display(),
        root_count = summary.root_count,
        element_count = summary.element_count,
        duration_ms = summary_start.elapsed().as_millis(),
        "summary complete"
    );
    Ok(summary)
}
