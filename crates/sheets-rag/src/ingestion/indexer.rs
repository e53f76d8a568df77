//! Full-replace indexing of Drive spreadsheets into the chunk store
//!
//! One run reads every tab of every candidate spreadsheet through the
//! collaborator traits, trims trailing empty regions, chunks the values,
//! and swaps the store's contents in a single replace at the very end, so
//! readers see the previous generation for the whole duration of the scan.
//! Permission errors skip the affected spreadsheet or tab; any other
//! collaborator failure aborts the run and leaves the store untouched.
//!
//! Runs are not self-serializing: callers that can trigger concurrent
//! reindexes must guard them externally.

use std::fmt;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::a1;
use crate::config::IndexingConfig;
use crate::error::Result;
use crate::ingestion::chunker::{to_chunks, ChunkOptions};
use crate::providers::{DriveProvider, SheetsProvider, SpreadsheetInfo};
use crate::storage::FileStore;
use crate::types::TabMeta;

static SHEET_LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"spreadsheets/d/([A-Za-z0-9_-]+)").expect("sheet link pattern"));

/// Summary of one full reindex run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexSummary {
    /// Spreadsheets in the resolved listing, including permission-skipped ones
    pub sheets_indexed: usize,
    /// Tabs that produced chunks
    pub tabs_indexed: usize,
    /// Total chunks written to the store
    pub chunks_written: usize,
}

impl fmt::Display for IndexSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Reindex complete. Sheets indexed: {}. Tabs indexed: {}. Chunks written: {}.",
            self.sheets_indexed, self.tabs_indexed, self.chunks_written
        )
    }
}

/// Scan values with trailing all-empty rows and columns removed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trimmed {
    /// The bounding-box slice of the input; rows are cut to `cols` but not padded
    pub values: Vec<Vec<String>>,
    pub rows: usize,
    pub cols: usize,
}

/// Slice a scanned matrix down to the bounding box of its non-blank cells.
///
/// Cells containing only whitespace count as blank. A matrix with no
/// content trims to zero rows and columns.
pub fn trim_values(values: &[Vec<String>]) -> Trimmed {
    let mut max_row = None;
    let mut max_col = None;

    for (row_index, row) in values.iter().enumerate() {
        for (col_index, cell) in row.iter().enumerate() {
            if !cell.trim().is_empty() {
                max_row = Some(max_row.map_or(row_index, |max: usize| max.max(row_index)));
                max_col = Some(max_col.map_or(col_index, |max: usize| max.max(col_index)));
            }
        }
    }

    let (Some(max_row), Some(max_col)) = (max_row, max_col) else {
        return Trimmed::default();
    };

    let rows = max_row + 1;
    let cols = max_col + 1;
    let trimmed = values[..rows]
        .iter()
        .map(|row| row.iter().take(cols).cloned().collect())
        .collect();

    Trimmed {
        values: trimmed,
        rows,
        cols,
    }
}

fn clamp_scan(available: usize, maximum: usize) -> usize {
    if maximum == 0 {
        available
    } else {
        available.min(maximum)
    }
}

fn parse_sheet_links(path: &Path) -> Result<Vec<SpreadsheetInfo>> {
    let raw = std::fs::read_to_string(path)?;
    let mut sheets = Vec::new();

    for line in raw.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let Some(captures) = SHEET_LINK_RE.captures(trimmed) else {
            tracing::debug!("ignoring listing line without a spreadsheet link: {}", trimmed);
            continue;
        };
        sheets.push(SpreadsheetInfo {
            id: captures[1].to_string(),
            name: String::new(),
            modified_time: None,
        });
    }

    Ok(sheets)
}

/// Orchestrates Sheets/Drive reads into a full store replacement
pub struct Indexer {
    drive: Arc<dyn DriveProvider>,
    sheets: Arc<dyn SheetsProvider>,
    config: IndexingConfig,
}

impl Indexer {
    pub fn new(
        drive: Arc<dyn DriveProvider>,
        sheets: Arc<dyn SheetsProvider>,
        config: IndexingConfig,
    ) -> Self {
        Self {
            drive,
            sheets,
            config,
        }
    }

    /// Resolve candidate spreadsheets: an explicit sheet-link listing file
    /// takes precedence over the live Drive folder listing.
    async fn resolve_spreadsheets(&self) -> Result<Vec<SpreadsheetInfo>> {
        if let Some(path) = &self.config.sheets_file {
            if path.exists() {
                let listed = parse_sheet_links(path)?;
                if !listed.is_empty() {
                    tracing::info!(
                        "using {} spreadsheets from listing file {}",
                        listed.len(),
                        path.display()
                    );
                    return Ok(listed);
                }
            }
        }

        tracing::info!("listing spreadsheets via {}", self.drive.name());
        self.drive
            .list_spreadsheets(self.config.drive_folder_id.as_deref())
            .await
    }

    /// Reindex every candidate spreadsheet into the store.
    ///
    /// The store's previous contents stay visible until all reads succeed;
    /// only then is the collection cleared and replaced.
    pub async fn index_drive_folder(&self, store: &mut FileStore) -> Result<IndexSummary> {
        let spreadsheets = self.resolve_spreadsheets().await?;
        let mut tabs_indexed = 0;
        let mut all_chunks = Vec::new();

        for sheet in &spreadsheets {
            let tabs = match self.sheets.tabs_and_grid(&sheet.id).await {
                Ok(tabs) => tabs,
                Err(err) if err.is_permission() => {
                    tracing::warn!("skipping spreadsheet {} due to permission error", sheet.id);
                    continue;
                }
                Err(err) => return Err(err),
            };

            for tab in tabs {
                if tab.title.is_empty() {
                    continue;
                }

                let rows_to_scan = clamp_scan(tab.row_count, self.config.max_rows_to_scan);
                let cols_to_scan = clamp_scan(tab.col_count, self.config.max_cols_to_scan);
                if rows_to_scan == 0 || cols_to_scan == 0 {
                    continue;
                }

                let scan_range_a1 = a1::build_range(&tab.title, rows_to_scan, cols_to_scan)?;
                let values = match self.sheets.read_values(&sheet.id, &scan_range_a1).await {
                    Ok(values) => values,
                    Err(err) if err.is_permission() => {
                        tracing::warn!(
                            "skipping tab {} in {} due to permission error",
                            tab.title,
                            sheet.id
                        );
                        self.pause().await;
                        continue;
                    }
                    Err(err) => return Err(err),
                };

                let trimmed = trim_values(&values);
                if trimmed.rows == 0 || trimmed.cols == 0 {
                    self.pause().await;
                    continue;
                }

                // The final range reflects the trimmed bounding box; the
                // requested scan range stays on the chunk for provenance.
                let range_a1 = a1::build_range(&tab.title, trimmed.rows, trimmed.cols)?;
                let meta = TabMeta {
                    spreadsheet_id: sheet.id.clone(),
                    spreadsheet_name: sheet.name.clone(),
                    tab_name: tab.title.clone(),
                    scan_range_a1,
                };
                let options = ChunkOptions {
                    rows_per_chunk: Some(self.config.rows_per_chunk),
                };

                let mut chunks = to_chunks(&trimmed.values, &meta, &options)?;
                for chunk in &mut chunks {
                    chunk.range_a1 = range_a1.clone();
                }

                tracing::debug!(
                    "indexed tab {} in {}: {} chunks",
                    tab.title,
                    sheet.id,
                    chunks.len()
                );
                all_chunks.append(&mut chunks);
                tabs_indexed += 1;
                self.pause().await;
            }
        }

        let chunks_written = all_chunks.len();
        store.clear()?;
        store.upsert_chunks(all_chunks)?;

        let summary = IndexSummary {
            sheets_indexed: spreadsheets.len(),
            tabs_indexed,
            chunks_written,
        };
        tracing::info!("{}", summary);
        Ok(summary)
    }

    /// Alias kept for callers that trigger reindexing by operator command.
    pub async fn run_full_reindex(&self, store: &mut FileStore) -> Result<IndexSummary> {
        self.index_drive_folder(store).await
    }

    async fn pause(&self) {
        if self.config.tab_delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.config.tab_delay_ms)).await;
        }
    }
}
