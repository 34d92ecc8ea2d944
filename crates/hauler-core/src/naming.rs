//! Deriving the saved-file name for a task.
//!
//! Selection order: the server-supplied name when the task opted into it,
//! then the file name of the explicit destination path, then the last URL
//! path segment, then [`FALLBACK_FILE_NAME`]. Candidates from the network
//! are sanitized for Linux filesystems before use.

use crate::metadata::ResponseMetadata;
use crate::task::DownloadTask;

/// Used when neither the server, the destination path, nor the URL yields
/// a usable name.
pub const FALLBACK_FILE_NAME: &str = "download.bin";

/// Linux NAME_MAX.
const MAX_NAME_BYTES: usize = 255;

/// Last non-empty path segment of `url`, query and fragment excluded.
pub fn file_name_from_url(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let segment = parsed.path_segments()?.filter(|s| !s.is_empty()).last()?;
    if segment == "." || segment == ".." {
        return None;
    }
    Some(segment.to_string())
}

/// File name from a raw `Content-Disposition` value.
///
/// `filename*=UTF-8''...` (RFC 5987, percent-decoded) takes precedence over
/// `filename=` (quoted or token). Returns `None` when neither is present.
pub fn file_name_from_content_disposition(value: &str) -> Option<String> {
    let mut plain: Option<String> = None;
    for param in value.split(';') {
        let Some((name, raw)) = param.split_once('=') else {
            continue;
        };
        let raw = raw.trim();
        match name.trim().to_ascii_lowercase().as_str() {
            "filename*" => {
                let encoded = raw
                    .strip_prefix("UTF-8''")
                    .or_else(|| raw.strip_prefix("utf-8''"));
                if let Some(encoded) = encoded {
                    let decoded = percent_decode(encoded);
                    if !decoded.is_empty() {
                        return Some(decoded);
                    }
                }
            }
            "filename" => {
                let unquoted = unquote(raw);
                if !unquoted.is_empty() {
                    plain = Some(unquoted);
                }
            }
            _ => {}
        }
    }
    plain
}

/// Sanitize a candidate file name for a Linux filesystem: path separators,
/// NUL, control characters, and whitespace become `_` (runs collapse into
/// one), leading/trailing `_` and `.` are trimmed, and the result is capped
/// at NAME_MAX bytes on a char boundary.
pub fn sanitize_file_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        let bad = c == '/' || c == '\\' || c == '\0' || c.is_control() || c == ' ' || c == '\t';
        if !bad {
            out.push(c);
        } else if !out.ends_with('_') {
            out.push('_');
        }
    }
    let trimmed = out.trim_matches(|c| c == '_' || c == '.');

    let mut end = trimmed.len().min(MAX_NAME_BYTES);
    while end > 0 && !trimmed.is_char_boundary(end) {
        end -= 1;
    }
    trimmed[..end].to_string()
}

/// Effective saved-file name for a finished task given the response
/// metadata the engine probed.
pub fn pick_file_name(task: &DownloadTask, meta: &ResponseMetadata) -> String {
    if task.use_server_file_name() {
        if let Some(name) = meta.server_file_name() {
            let name = sanitize_file_name(&name);
            if !name.is_empty() {
                return name;
            }
        }
    }

    // The descriptor validated this path lexically; its last component is a
    // usable file name as-is.
    if let Some(path) = task.dest_path() {
        if let Some(name) = path.rsplit(['/', '\\']).next() {
            return name.to_string();
        }
    }

    if let Some(name) = file_name_from_url(task.url()) {
        let name = sanitize_file_name(&name);
        if !name.is_empty() {
            return name;
        }
    }

    FALLBACK_FILE_NAME.to_string()
}

fn unquote(raw: &str) -> String {
    let Some(inner) = raw
        .strip_prefix('"')
        .and_then(|r| r.strip_suffix('"'))
    else {
        return raw.to_string();
    };
    let mut out = String::with_capacity(inner.len());
    let mut escaped = false;
    for c in inner.chars() {
        if escaped {
            out.push(c);
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else {
            out.push(c);
        }
    }
    if escaped {
        out.push('\\');
    }
    out
}

fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            let pair = (hex_val(bytes[i + 1]), hex_val(bytes[i + 2]));
            if let (Some(high), Some(low)) = pair {
                out.push(high << 4 | low);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_val(b: u8) -> Option<u8> {
    (b as char).to_digit(16).map(|d| d as u8)
}
