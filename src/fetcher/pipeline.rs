use crate::fetcher::types::PageResponse;
use chrono::Utc;
use encoding_rs::Encoding;
use regex::Regex;
use reqwest::StatusCode;
use std::sync::LazyLock;
use tracing::warn;
use url::Url;

/// Bytes scanned for a `<meta>` charset declaration.
const META_SNIFF_BYTES: usize = 4096;

static HEADER_CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;]+)"#).unwrap());

static META_CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<meta\s+[^>]*?charset\s*=\s*["']?([^"'\s/>]+)"#).unwrap());

static META_HTTP_EQUIV_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta\s+[^>]*?http-equiv\s*=\s*["']?content-type["']?[^>]*?content\s*=\s*["']?[^"'>]*?charset\s*=\s*([^"'\s;/>]+)"#).unwrap()
});

pub fn decode_page(
    url_final: Url,
    status: StatusCode,
    content_type: String,
    body: &[u8],
) -> PageResponse {
    let encoding = detect_encoding(&content_type, body);
    let body_utf8 = decode_to_utf8(body, encoding);

    PageResponse {
        url_final,
        status,
        content_type,
        encoding,
        body_utf8,
        fetched_at: Utc::now(),
    }
}

/// Content-Type header, then `<meta>` declarations, then statistical guess.
pub fn detect_encoding(content_type: &str, body: &[u8]) -> &'static Encoding {
    if let Some(encoding) = labelled_encoding(&HEADER_CHARSET_REGEX, content_type) {
        return encoding;
    }

    let head = &body[..body.len().min(META_SNIFF_BYTES)];
    let head_str = String::from_utf8_lossy(head);

    for regex in [&*META_CHARSET_REGEX, &*META_HTTP_EQUIV_REGEX] {
        if let Some(encoding) = labelled_encoding(regex, &head_str) {
            return encoding;
        }
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(head, body.len() <= META_SNIFF_BYTES);
    detector.guess(None, true)
}

fn labelled_encoding(regex: &Regex, haystack: &str) -> Option<&'static Encoding> {
    let label = regex.captures(haystack)?.get(1)?.as_str().to_lowercase();
    Encoding::for_label(label.as_bytes())
}

/// Malformed sequences become U+FFFD; the rest of the page is kept.
fn decode_to_utf8(body: &[u8], encoding: &'static Encoding) -> String {
    let (decoded, used, had_errors) = encoding.decode(body);

    if had_errors {
        warn!(encoding = used.name(), "page contains malformed bytes, replaced");
    }

    decoded.into_owned()
}
