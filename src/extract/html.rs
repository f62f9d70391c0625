//! Pull JSON-LD script bodies out of an HTML document

use crate::extract::blob::RawBlob;
use once_cell::sync::Lazy;
use regex::Regex;

static LD_JSON_SCRIPT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?is)<script\b[^>]*\btype\s*=\s*["']application/ld\+json["'][^>]*>(.*?)</script\s*>"#,
    )
    .unwrap()
});

/// Collect the bodies of all `application/ld+json` script tags, in document order
pub fn script_blobs(html: &str) -> Vec<RawBlob> {
    LD_JSON_SCRIPT_REGEX
        .captures_iter(html)
        .filter_map(|caps| caps.get(1))
        .map(|body| body.as_str().trim())
        .filter(|body| !body.is_empty())
        .map(RawBlob::from)
        .collect()
}
