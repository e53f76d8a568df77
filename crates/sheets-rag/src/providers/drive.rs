//! Drive listing collaborator

use async_trait::async_trait;

use crate::error::Result;

/// A spreadsheet visible to the indexer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpreadsheetInfo {
    /// Spreadsheet id
    pub id: String,
    /// Spreadsheet title, empty when unknown
    pub name: String,
    /// Last-modified timestamp reported by the listing, when available
    pub modified_time: Option<String>,
}

/// Trait for the Drive listing collaborator.
///
/// Implementations must return an error on failure; retries and backoff
/// belong behind this trait, not in the indexer.
#[async_trait]
pub trait DriveProvider: Send + Sync {
    /// List spreadsheets, optionally restricted to one folder
    async fn list_spreadsheets(&self, folder_id: Option<&str>) -> Result<Vec<SpreadsheetInfo>>;

    /// Provider name for logging
    fn name(&self) -> &str;
}
