//! The chunk record and its provenance metadata

use chrono::DateTime;
use serde::{Deserialize, Serialize};

/// Provenance for one tab scan, supplied to the chunker by the indexer
#[derive(Debug, Clone, Default)]
pub struct TabMeta {
    /// Source spreadsheet id (required)
    pub spreadsheet_id: String,
    /// Human-readable spreadsheet title, empty when unknown
    pub spreadsheet_name: String,
    /// Tab title (required)
    pub tab_name: String,
    /// The range that was requested from the source, for provenance
    pub scan_range_a1: String,
}

/// Atomic retrievable unit: one contiguous row range of one spreadsheet tab.
///
/// Persisted as one JSON line per chunk. Wire field names are camelCase,
/// matching the store file format consumed by downstream tooling.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Chunk {
    /// Composite key `spreadsheetId|tabName|startRow-endRow`, unique within
    /// one indexing generation
    pub id: String,
    pub spreadsheet_id: String,
    pub spreadsheet_name: String,
    pub tab_name: String,
    /// Range requested from the source; may include trailing empty cells
    pub scan_range_a1: String,
    /// Tightest range actually containing the chunk's data
    pub range_a1: String,
    /// Newline-joined `Headers:` / `Row N:` lines
    pub text: String,
    /// Raw cell values for this chunk only
    pub rows: Vec<Vec<String>>,
    /// Normalized terms, memoized by the store on first indexing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens: Option<Vec<String>>,
    /// RFC 3339 timestamp set at chunk-creation time
    pub updated_at: String,
}

impl Chunk {
    /// `updated_at` as epoch milliseconds; missing or unparseable is 0.
    pub fn updated_at_ms(&self) -> i64 {
        DateTime::parse_from_rfc3339(&self.updated_at)
            .map(|parsed| parsed.timestamp_millis())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_updated_at_ms_parses_rfc3339() {
        let chunk = Chunk {
            updated_at: "2024-01-01T00:00:00Z".to_string(),
            ..Chunk::default()
        };
        assert_eq!(chunk.updated_at_ms(), 1_704_067_200_000);
    }

    #[test]
    fn test_updated_at_ms_tolerates_garbage() {
        let missing = Chunk::default();
        assert_eq!(missing.updated_at_ms(), 0);

        let garbage = Chunk {
            updated_at: "last tuesday".to_string(),
            ..Chunk::default()
        };
        assert_eq!(garbage.updated_at_ms(), 0);
    }

    #[test]
    fn test_wire_field_names_are_camel_case() {
        let chunk = Chunk {
            id: "S1|Sched|2-3".to_string(),
            spreadsheet_id: "S1".to_string(),
            tab_name: "Sched".to_string(),
            scan_range_a1: "Sched!A1:B100".to_string(),
            range_a1: "Sched!A1:B3".to_string(),
            text: "Row 2: Alice".to_string(),
            updated_at: "2024-01-01T00:00:00Z".to_string(),
            ..Chunk::default()
        };

        let json = serde_json::to_string(&chunk).unwrap();
        assert!(json.contains("\"spreadsheetId\""));
        assert!(json.contains("\"tabName\""));
        assert!(json.contains("\"scanRangeA1\""));
        assert!(json.contains("\"rangeA1\""));
        assert!(json.contains("\"updatedAt\""));
        // Tokens are only written once the store memoizes them.
        assert!(!json.contains("\"tokens\""));
    }

    #[test]
    fn test_partial_records_deserialize_with_defaults() {
        let chunk: Chunk =
            serde_json::from_str(r#"{"id":"1","text":"alpha beta","tabName":"Backlogs"}"#).unwrap();
        assert_eq!(chunk.id, "1");
        assert_eq!(chunk.tab_name, "Backlogs");
        assert!(chunk.spreadsheet_id.is_empty());
        assert!(chunk.rows.is_empty());
        assert!(chunk.tokens.is_none());
    }
}
