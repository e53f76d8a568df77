//! Sheets metadata and values collaborator

use async_trait::async_trait;

use crate::error::Result;

/// One tab's title and grid dimensions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabGrid {
    /// Tab title
    pub title: String,
    /// Total grid rows
    pub row_count: usize,
    /// Total grid columns
    pub col_count: usize,
}

/// Trait for the Sheets read collaborator.
///
/// Implementations must return an error on failure; the indexer treats
/// permission errors (HTTP 403) as skippable and everything else as fatal
/// for the run.
#[async_trait]
pub trait SheetsProvider: Send + Sync {
    /// List tabs and their grid dimensions for a spreadsheet
    async fn tabs_and_grid(&self, spreadsheet_id: &str) -> Result<Vec<TabGrid>>;

    /// Read cell values for an A1 range
    async fn read_values(&self, spreadsheet_id: &str, range_a1: &str) -> Result<Vec<Vec<String>>>;

    /// Provider name for logging
    fn name(&self) -> &str;
}
