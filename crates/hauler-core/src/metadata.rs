//! Response metadata handed to caller-supplied callbacks.
//!
//! The transfer engine probes the server and parses the interesting
//! headers into this struct before invoking a task's file-length resolver.
//! The raw name-to-value map is kept alongside the typed fields so
//! resolvers can read non-standard headers.

use std::collections::HashMap;

use crate::naming;

/// Parsed response headers of a probe or first response.
#[derive(Debug, Clone, Default)]
pub struct ResponseMetadata {
    /// All headers, names lowercased; for repeated headers the last wins.
    pub headers: HashMap<String, String>,
    /// Total size in bytes, if `Content-Length` parsed.
    pub content_length: Option<u64>,
    /// True if the server sent `Accept-Ranges: bytes`.
    pub accept_ranges: bool,
    /// `ETag` value if present, quotes stripped.
    pub etag: Option<String>,
    /// `Last-Modified` value if present.
    pub last_modified: Option<String>,
    /// Raw `Content-Disposition` value if present.
    pub content_disposition: Option<String>,
}

impl ResponseMetadata {
    /// Build from raw response lines. Status lines, blank lines, and
    /// unparseable values are skipped; this never fails.
    pub fn from_header_lines(lines: &[String]) -> Self {
        let mut meta = ResponseMetadata::default();
        for line in lines {
            let Some((name, value)) = line.trim().split_once(':') else {
                continue;
            };
            let name = name.trim().to_ascii_lowercase();
            let value = value.trim();
            if name.is_empty() || value.is_empty() {
                continue;
            }
            match name.as_str() {
                "content-length" => meta.content_length = value.parse().ok(),
                "accept-ranges" => meta.accept_ranges = value.eq_ignore_ascii_case("bytes"),
                "etag" => meta.etag = Some(value.trim_matches('"').to_string()),
                "last-modified" => meta.last_modified = Some(value.to_string()),
                "content-disposition" => meta.content_disposition = Some(value.to_string()),
                _ => {}
            }
            meta.headers.insert(name, value.to_string());
        }
        meta
    }

    /// Header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    /// File name the server suggests via Content-Disposition, unsanitized.
    pub fn server_file_name(&self) -> Option<String> {
        self.content_disposition
            .as_deref()
            .and_then(naming::file_name_from_content_disposition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_typed_fields() {
        let meta = ResponseMetadata::from_header_lines(&lines(&[
            "HTTP/1.1 200 OK",
            "Content-Length: 12345",
            "Accept-Ranges: bytes",
            "ETag: \"abc-123\"",
            "Last-Modified: Wed, 21 Oct 2015 07:28:00 GMT",
        ]));
        assert_eq!(meta.content_length, Some(12345));
        assert!(meta.accept_ranges);
        assert_eq!(meta.etag.as_deref(), Some("abc-123"));
        assert_eq!(
            meta.last_modified.as_deref(),
            Some("Wed, 21 Oct 2015 07:28:00 GMT")
        );
    }

    #[test]
    fn keeps_raw_headers_case_insensitively() {
        let meta = ResponseMetadata::from_header_lines(&lines(&[
            "X-Raw-Length: 777",
            "Accept-Ranges: none",
        ]));
        assert_eq!(meta.header("x-raw-length"), Some("777"));
        assert_eq!(meta.header("X-RAW-LENGTH"), Some("777"));
        assert!(!meta.accept_ranges);
    }

    #[test]
    fn garbage_is_skipped_not_fatal() {
        let meta = ResponseMetadata::from_header_lines(&lines(&[
            "",
            "HTTP/1.1 206 Partial Content",
            "Content-Length: not-a-number",
            ": no name",
        ]));
        assert_eq!(meta.content_length, None);
        assert!(meta.header("").is_none());
    }

    #[test]
    fn server_file_name_from_content_disposition() {
        let meta = ResponseMetadata::from_header_lines(&lines(&[
            "Content-Disposition: attachment; filename=\"report.pdf\"",
        ]));
        assert_eq!(meta.server_file_name().as_deref(), Some("report.pdf"));

        let meta = ResponseMetadata::from_header_lines(&lines(&["Content-Length: 10"]));
        assert!(meta.server_file_name().is_none());
    }
}
