//! Collaborator contracts for the Google Drive and Sheets clients
//!
//! The indexer only sees these traits; real implementations wrap the
//! network clients and own their retry and auth concerns. Failures must
//! surface as [`crate::Error::Api`] so the indexer can classify
//! permission errors.

mod drive;
mod sheets;

pub use drive::{DriveProvider, SpreadsheetInfo};
pub use sheets::{SheetsProvider, TabGrid};
