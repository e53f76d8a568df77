//! Row-window chunking of scanned tab values
//!
//! Data rows are sliced into consecutive fixed-size windows; each window
//! becomes one [`Chunk`] whose text carries the detected header row for
//! context when the chunk is read in isolation. Chunks from one pass are
//! contiguous, non-overlapping, and cover every data row exactly once.

use chrono::{SecondsFormat, Utc};

use crate::a1;
use crate::error::{Error, Result};
use crate::types::{Chunk, TabMeta};

/// Default number of data rows per chunk
pub const DEFAULT_ROWS_PER_CHUNK: usize = 20;

/// Chunking options
#[derive(Debug, Clone, Default)]
pub struct ChunkOptions {
    /// Data rows per chunk; `None` selects [`DEFAULT_ROWS_PER_CHUNK`]
    pub rows_per_chunk: Option<usize>,
}

fn count_non_empty_cells(row: &[String]) -> usize {
    row.iter().filter(|cell| !cell.is_empty()).count()
}

fn format_row_text(row: &[String]) -> String {
    row.join(" | ")
}

/// The first row is a header iff it carries at least two non-empty cells.
pub fn detect_headers(values: &[Vec<String>]) -> Option<&[String]> {
    let first = values.first()?;
    (count_non_empty_cells(first) >= 2).then_some(first.as_slice())
}

fn build_range_a1(
    tab_name: &str,
    start_row: usize,
    end_row: usize,
    col_count: usize,
) -> Result<String> {
    let end_col = a1::col_to_letter(col_count.max(1))?;
    Ok(format!("{tab_name}!A{start_row}:{end_col}{end_row}"))
}

/// Convert one tab's scanned values into an ordered list of chunks.
///
/// Returns an empty list for empty input and never mutates `values`.
pub fn to_chunks(
    values: &[Vec<String>],
    meta: &TabMeta,
    options: &ChunkOptions,
) -> Result<Vec<Chunk>> {
    if meta.spreadsheet_id.is_empty() || meta.tab_name.is_empty() {
        return Err(Error::validation(
            "meta.spreadsheet_id and meta.tab_name are required",
        ));
    }

    let rows_per_chunk = match options.rows_per_chunk {
        None => DEFAULT_ROWS_PER_CHUNK,
        Some(0) => {
            return Err(Error::validation(
                "rows_per_chunk must be a positive integer",
            ))
        }
        Some(n) => n,
    };

    let header_row = detect_headers(values);
    let header_text = header_row.map(|row| format!("Headers: {}", format_row_text(row)));
    let data_start_index = usize::from(header_row.is_some());
    let data_rows = &values[data_start_index..];

    let created_at = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    let mut chunks = Vec::new();

    for (window_index, window) in data_rows.chunks(rows_per_chunk).enumerate() {
        // 1-based spreadsheet row numbers for this window
        let start_row = data_start_index + window_index * rows_per_chunk + 1;
        let end_row = start_row + window.len() - 1;

        let col_count = window
            .iter()
            .map(Vec::len)
            .max()
            .unwrap_or(0)
            .max(header_row.map_or(0, |row| row.len()));

        let mut lines = Vec::with_capacity(window.len() + 1);
        if let Some(header) = &header_text {
            lines.push(header.clone());
        }
        for (row_offset, row) in window.iter().enumerate() {
            lines.push(format!(
                "Row {}: {}",
                start_row + row_offset,
                format_row_text(row)
            ));
        }

        chunks.push(Chunk {
            id: format!(
                "{}|{}|{}-{}",
                meta.spreadsheet_id, meta.tab_name, start_row, end_row
            ),
            spreadsheet_id: meta.spreadsheet_id.clone(),
            spreadsheet_name: meta.spreadsheet_name.clone(),
            tab_name: meta.tab_name.clone(),
            scan_range_a1: meta.scan_range_a1.clone(),
            range_a1: build_range_a1(&meta.tab_name, start_row, end_row, col_count)?,
            text: lines.join("\n"),
            rows: window.to_vec(),
            tokens: None,
            updated_at: created_at.clone(),
        });
    }

    Ok(chunks)
}
