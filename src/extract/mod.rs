//! Text Extraction - document → ordered page records
//!
//! Raw byte-level parsing (PDF rendering, OCR) lives outside this crate.
//! The adapters here consume the text those tools emit:
//! - `PlainTextExtractor`: form-feed separated pages (`pdftotext` output)
//! - `JsonPagesExtractor`: `[{ "page": 1, "content": "..." }, ...]`

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Page separator emitted by `pdftotext` and most text renderers
pub const PAGE_BREAK: char = '\u{000C}';

/// One page of extracted document text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    /// 1-indexed, unique within a document
    #[serde(alias = "page")]
    pub page_number: u32,
    pub content: String,
}

impl PageRecord {
    pub fn new(page_number: u32, content: impl Into<String>) -> Self {
        Self {
            page_number,
            content: content.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed page JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid page number {page_number} at position {position}")]
    InvalidPageNumber { position: usize, page_number: u32 },
}

/// Produces the ordered page sequence for a document
pub trait TextExtractor: Send + Sync {
    fn extract(&self, source: &Path) -> Result<Vec<PageRecord>, ExtractError>;
}

fn read_source(source: &Path) -> Result<String, ExtractError> {
    std::fs::read_to_string(source).map_err(|e| ExtractError::Io {
        path: source.to_path_buf(),
        source: e,
    })
}

/// Form-feed separated UTF-8 text
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextExtractor;

impl PlainTextExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Split already-loaded text into pages
    pub fn split_pages(&self, text: &str) -> Vec<PageRecord> {
        if text.is_empty() {
            return Vec::new();
        }

        let mut segments: Vec<&str> = text.split(PAGE_BREAK).collect();

        // pdftotext terminates every page, including the last one
        if segments.len() > 1 && segments.last().is_some_and(|s| s.trim().is_empty()) {
            segments.pop();
        }

        segments
            .into_iter()
            .enumerate()
            .map(|(i, content)| PageRecord::new(i as u32 + 1, content))
            .collect()
    }
}

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, source: &Path) -> Result<Vec<PageRecord>, ExtractError> {
        let text = read_source(source)?;
        Ok(self.split_pages(&text))
    }
}

/// A JSON page entry: either a full record or a bare string
#[derive(Deserialize)]
#[serde(untagged)]
enum JsonPage {
    Record(PageRecord),
    Text(String),
}

/// JSON array of pages
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonPagesExtractor;

impl JsonPagesExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Parse pages from a JSON string
    ///
    /// Bare strings take the next page number in sequence. Explicit page
    /// numbers must be positive and strictly increasing.
    pub fn parse(&self, json: &str) -> Result<Vec<PageRecord>, ExtractError> {
        let entries: Vec<JsonPage> = serde_json::from_str(json)?;
        let mut pages = Vec::with_capacity(entries.len());
        let mut last = 0u32;

        for (position, entry) in entries.into_iter().enumerate() {
            let page = match entry {
                JsonPage::Record(record) => record,
                JsonPage::Text(content) => {
                    let page_number = last.checked_add(1).ok_or(
                        ExtractError::InvalidPageNumber {
                            position,
                            page_number: last,
                        },
                    )?;
                    PageRecord::new(page_number, content)
                }
            };

            if page.page_number == 0 || page.page_number <= last {
                return Err(ExtractError::InvalidPageNumber {
                    position,
                    page_number: page.page_number,
                });
            }

            last = page.page_number;
            pages.push(page);
        }

        Ok(pages)
    }
}

impl TextExtractor for JsonPagesExtractor {
    fn extract(&self, source: &Path) -> Result<Vec<PageRecord>, ExtractError> {
        let json = read_source(source)?;
        self.parse(&json)
    }
}

/// Extract pages choosing the adapter from the file extension
pub fn extract_pages(source: &Path) -> Result<Vec<PageRecord>, ExtractError> {
    let is_json = source
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        JsonPagesExtractor.extract(source)
    } else {
        PlainTextExtractor.extract(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_split_form_feed_pages() {
        let pages = PlainTextExtractor.split_pages("one\u{000C}two\u{000C}three\u{000C}");
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0], PageRecord::new(1, "one"));
        assert_eq!(pages[2], PageRecord::new(3, "three"));
    }

    #[test]
    fn test_single_page_without_break() {
        let pages = PlainTextExtractor.split_pages("just one page");
        assert_eq!(pages, vec![PageRecord::new(1, "just one page")]);
    }

    #[test]
    fn test_empty_middle_page_kept() {
        let pages = PlainTextExtractor.split_pages("a\u{000C}\u{000C}c");
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[1].content, "");
        assert_eq!(pages[2].page_number, 3);
    }

    #[test]
    fn test_empty_text_has_no_pages() {
        assert!(PlainTextExtractor.split_pages("").is_empty());
    }

    #[test]
    fn test_json_records_and_strings() {
        let pages = JsonPagesExtractor
            .parse(r#"[{"page": 1, "content": "a"}, "b", {"page_number": 5, "content": "c"}]"#)
            .unwrap();
        assert_eq!(pages[1], PageRecord::new(2, "b"));
        assert_eq!(pages[2], PageRecord::new(5, "c"));
    }

    #[test]
    fn test_json_rejects_zero_page() {
        let err = JsonPagesExtractor
            .parse(r#"[{"page": 0, "content": "a"}]"#)
            .unwrap_err();
        assert!(matches!(err, ExtractError::InvalidPageNumber { position: 0, page_number: 0 }));
    }

    #[test]
    fn test_json_rejects_out_of_order_pages() {
        let err = JsonPagesExtractor
            .parse(r#"[{"page": 2, "content": "a"}, {"page": 2, "content": "b"}]"#)
            .unwrap_err();
        assert!(matches!(err, ExtractError::InvalidPageNumber { position: 1, .. }));
    }

    #[test]
    fn test_json_bare_string_after_last_page_number() {
        let err = JsonPagesExtractor
            .parse(r#"[{"page": 4294967295, "content": "a"}, "b"]"#)
            .unwrap_err();
        assert!(matches!(
            err,
            ExtractError::InvalidPageNumber {
                position: 1,
                page_number: u32::MAX
            }
        ));
    }

    #[test]
    fn test_json_malformed() {
        let err = JsonPagesExtractor.parse("{not json").unwrap_err();
        assert!(matches!(err, ExtractError::Json(_)));
    }

    #[test]
    fn test_extract_pages_dispatches_on_extension() {
        let txt = write_temp(".txt", "p1\u{000C}p2");
        let json = write_temp(".json", r#"["p1", "p2", "p3"]"#);

        assert_eq!(extract_pages(txt.path()).unwrap().len(), 2);
        assert_eq!(extract_pages(json.path()).unwrap().len(), 3);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = PlainTextExtractor
            .extract(Path::new("/definitely/not/here.txt"))
            .unwrap_err();
        assert!(matches!(err, ExtractError::Io { .. }));
        assert!(err.to_string().contains("here.txt"));
    }
}
