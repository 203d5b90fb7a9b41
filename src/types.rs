//! Torrent metadata documents and the paginated search response.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single file inside a torrent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TorrentFile {
    /// Path of the file relative to the torrent root
    pub path: String,
    /// Size in bytes
    pub length: u64,
}

/// Metadata for one torrent, as stored in the document index.
///
/// `file_count` always equals `files.len()` for documents returned by the
/// result mapper. `total_size` is trusted from the store as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TorrentMetadata {
    /// Unique document key
    pub info_hash: String,
    pub name: String,
    pub files: Vec<TorrentFile>,
    pub total_size: u64,
    pub file_count: u64,
    pub create_date: DateTime<Utc>,
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Match count reported by the store; may exceed `results.len()`
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
    pub results: Vec<TorrentMetadata>,
}

impl SearchResponse {
    /// Number of pages needed to show every match at `per_page` results each.
    pub fn page_count(&self) -> u64 {
        if self.per_page == 0 {
            return 0;
        }
        self.total.div_ceil(u64::from(self.per_page))
    }
}

/// Formats a byte count with binary prefixes, e.g. `1.50 KB`.
pub fn format_size(bytes: u64) -> String {
    const UNIT: u64 = 1024;
    const PREFIXES: [char; 6] = ['K', 'M', 'G', 'T', 'P', 'E'];

    if bytes < UNIT {
        return format!("{} B", bytes);
    }

    let mut div = UNIT;
    let mut exp = 0;
    let mut n = bytes / UNIT;
    while n >= UNIT {
        div *= UNIT;
        exp += 1;
        n /= UNIT;
    }

    #[allow(clippy::cast_precision_loss)]
    let value = bytes as f64 / div as f64;
    format!("{:.2} {}B", value, PREFIXES[exp])
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use rstest::rstest;

    #[rstest]
    #[case(0, "0 B")]
    #[case(1023, "1023 B")]
    #[case(1024, "1.00 KB")]
    #[case(1536, "1.50 KB")]
    #[case(5 * 1024 * 1024, "5.00 MB")]
    #[case(3 * 1024 * 1024 * 1024 + 512 * 1024 * 1024, "3.50 GB")]
    #[case(u64::MAX, "16.00 EB")]
    fn test_format_size(#[case] bytes: u64, #[case] expected: &str) {
        check!(format_size(bytes) == expected);
    }

    #[rstest]
    #[case(0, 15, 0)]
    #[case(15, 15, 1)]
    #[case(16, 15, 2)]
    #[case(10, 0, 0)]
    fn test_page_count(#[case] total: u64, #[case] per_page: u32, #[case] expected: u64) {
        let response = SearchResponse {
            total,
            page: 1,
            per_page,
            results: vec![],
        };
        check!(response.page_count() == expected);
    }

    #[test]
    fn test_metadata_document_round_trip() {
        let doc = serde_json::json!({
            "info_hash": "c9e15763f722f23e98a29decdfae341b98d53056",
            "name": "Big Buck Bunny",
            "files": [
                { "path": "bbb.mp4", "length": 276134947 },
                { "path": "poster.jpg", "length": 310380 }
            ],
            "total_size": 276445327,
            "file_count": 2,
            "create_date": "2024-05-01T08:30:00+08:00"
        });

        let metadata: TorrentMetadata = serde_json::from_value(doc).unwrap();
        check!(metadata.files[0].path == "bbb.mp4");
        check!(metadata.files[1].path == "poster.jpg");
        check!(metadata.create_date.to_rfc3339() == "2024-05-01T00:30:00+00:00");

        let encoded = serde_json::to_value(&metadata).unwrap();
        let decoded: TorrentMetadata = serde_json::from_value(encoded).unwrap();
        check!(decoded == metadata);
    }

    #[test]
    fn test_response_serializes_wire_field_names() {
        let response = SearchResponse {
            total: 42,
            page: 3,
            per_page: 15,
            results: vec![],
        };
        let value = serde_json::to_value(&response).unwrap();
        check!(value["total"] == 42);
        check!(value["page"] == 3);
        check!(value["per_page"] == 15);
        check!(value["results"].as_array().is_some_and(Vec::is_empty));
    }
}
