//! Feed page parsing and image metadata extraction.
//!
//! A listing looks like:
//!
//! ```text
//! { "data": { "after": "t3_xyz" | null,
//!             "children": [ { "data": { "preview": { "images": [
//!                 { "id": "...", "source": { "url": "...", "width": 1920, "height": 1080 } }
//!             ] } } } ] } }
//! ```

use serde_json::Value;
use std::borrow::Cow;

use crate::error::FeedError;
use crate::types::ImageRecord;

/// One parsed page of the feed.
#[derive(Debug, Clone, Default)]
pub struct FeedPage {
    /// Raw post entries, in feed order
    pub posts: Vec<Value>,
    /// Cursor for the next page; `None` once the feed is exhausted
    pub after: Option<String>,
}

impl FeedPage {
    /// Parse a response body fetched from `url`.
    pub fn parse(url: &str, body: &[u8]) -> Result<Self, FeedError> {
        let malformed = |message: String| FeedError::Malformed {
            url: url.to_string(),
            message,
        };

        let value: Value =
            serde_json::from_slice(body).map_err(|e| malformed(format!("invalid JSON: {e}")))?;

        // The random listing answers with [post listing, comment listing].
        let mut listing = match value {
            Value::Array(items) => items
                .into_iter()
                .next()
                .ok_or_else(|| malformed("empty listing array".to_string()))?,
            other => other,
        };

        if let Some(error) = listing.get("error") {
            let message = match listing.get("message").and_then(Value::as_str) {
                Some(text) => format!("{error} {text}"),
                None => error.to_string(),
            };
            return Err(FeedError::Api {
                url: url.to_string(),
                message,
            });
        }

        let posts = match listing.pointer_mut("/data/children").map(Value::take) {
            Some(Value::Array(posts)) => posts,
            Some(_) => return Err(malformed("data.children is not an array".to_string())),
            None => return Err(malformed("missing data.children".to_string())),
        };

        let after = listing
            .pointer("/data/after")
            .and_then(Value::as_str)
            .filter(|cursor| !cursor.is_empty())
            .map(str::to_string);

        Ok(Self { posts, after })
    }

    /// Extract image metadata from every post, in order.
    ///
    /// Posts without the expected preview fields yield `Err` with a short
    /// reason; they are expected on any real feed (text posts, galleries).
    pub fn records(&self) -> impl Iterator<Item = Result<ImageRecord, String>> + '_ {
        self.posts.iter().map(extract_record)
    }
}

/// Pull `id`, `url`, `width` and `height` out of one post.
pub fn extract_record(post: &Value) -> Result<ImageRecord, String> {
    let image = post
        .pointer("/data/preview/images/0")
        .ok_or("no data.preview.images[0]")?;

    let id = image
        .get("id")
        .and_then(Value::as_str)
        .ok_or("preview image has no id")?;
    let url = image
        .pointer("/source/url")
        .and_then(Value::as_str)
        .ok_or_else(|| format!("image {id} has no source.url"))?;
    let width = image
        .pointer("/source/width")
        .and_then(dimension)
        .ok_or_else(|| format!("image {id} has no usable source.width"))?;
    let height = image
        .pointer("/source/height")
        .and_then(dimension)
        .ok_or_else(|| format!("image {id} has no usable source.height"))?;

    Ok(ImageRecord {
        id: id.to_string(),
        url: unescape_html(url).into_owned(),
        width,
        height,
    })
}

/// Dimensions arrive as numbers, occasionally as numeric strings.
fn dimension(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Replace HTML character references (`&amp;`, `&#39;`, `&#x2F;`, ...).
///
/// Unknown or unterminated references are left untouched.
pub fn unescape_html(input: &str) -> Cow<'_, str> {
    if !input.contains('&') {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        rest = &rest[start..];

        let decoded = rest
            .find(';')
            .filter(|&end| end <= 10)
            .and_then(|end| decode_entity(&rest[1..end]).map(|c| (c, end)));

        match decoded {
            Some((c, end)) => {
                out.push(c);
                rest = &rest[end + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let code = name.strip_prefix('#')?;
            let code = match code.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => code.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn post(id: &str, url: &str, width: u32, height: u32) -> Value {
        json!({ "data": { "preview": { "images": [
            { "id": id, "source": { "url": url, "width": width, "height": height } }
        ] } } })
    }

    #[test]
    fn test_parse_reads_children_and_cursor() {
        let body = json!({ "kind": "Listing", "data": {
            "after": "t3_next",
            "children": [post("a", "https://i.redd.it/a.jpg", 10, 5)]
        } });
        let page = FeedPage::parse("u", body.to_string().as_bytes()).unwrap();
        assert_eq!(page.posts.len(), 1);
        assert_eq!(page.after.as_deref(), Some("t3_next"));
    }

    #[test]
    fn test_parse_null_or_empty_cursor_means_exhausted() {
        for after in [Value::Null, json!("")] {
            let body = json!({ "data": { "after": after, "children": [] } });
            let page = FeedPage::parse("u", body.to_string().as_bytes()).unwrap();
            assert!(page.after.is_none());
        }
    }

    #[test]
    fn test_parse_error_payload_is_api_error() {
        let body = br#"{"message": "Not Found", "error": 404}"#;
        let err = FeedPage::parse("https://x/r/nope.json", body).unwrap_err();
        match err {
            FeedError::Api { message, .. } => assert_eq!(message, "404 Not Found"),
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_rejects_non_json_and_missing_children() {
        let err = FeedPage::parse("u", b"<html>").unwrap_err();
        assert!(matches!(err, FeedError::Malformed { .. }));

        let err = FeedPage::parse("u", br#"{"data": {"after": null}}"#).unwrap_err();
        assert!(err.to_string().contains("missing data.children"));
    }

    #[test]
    fn test_parse_random_listing_array_uses_first_listing() {
        let body = json!([
            { "data": { "after": null, "children": [post("r", "https://i.redd.it/r.png", 4, 3)] } },
            { "data": { "after": null, "children": [] } }
        ]);
        let page = FeedPage::parse("u", body.to_string().as_bytes()).unwrap();
        assert_eq!(page.posts.len(), 1);
    }

    #[test]
    fn test_records_skip_malformed_posts() {
        let body = json!({ "data": { "after": null, "children": [
            post("a", "https://i.redd.it/a.jpg", 10, 5),
            { "data": { "title": "text post" } },
            post("b", "https://i.redd.it/b.jpg", 10, 5),
        ] } });
        let page = FeedPage::parse("u", body.to_string().as_bytes()).unwrap();
        let results: Vec<_> = page.records().collect();
        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert_eq!(results[2].as_ref().unwrap().id, "b");
    }

    #[test]
    fn test_extract_unescapes_url_and_reads_string_dimensions() {
        let raw = json!({ "data": { "preview": { "images": [{
            "id": "x1",
            "source": {
                "url": "https://preview.redd.it/x1.jpg?width=1920&amp;s=abc",
                "width": "1920",
                "height": 1080
            }
        }] } } });
        let record = extract_record(&raw).unwrap();
        assert_eq!(record.url, "https://preview.redd.it/x1.jpg?width=1920&s=abc");
        assert_eq!((record.width, record.height), (1920, 1080));
    }

    #[test]
    fn test_extract_reports_missing_dimension() {
        let raw = json!({ "data": { "preview": { "images": [{
            "id": "x1", "source": { "url": "https://i.redd.it/x1.jpg", "width": 10 }
        }] } } });
        let reason = extract_record(&raw).unwrap_err();
        assert!(reason.contains("height"));
    }

    #[test]
    fn test_unescape_html_entities() {
        assert_eq!(unescape_html("a&amp;b"), "a&b");
        assert_eq!(unescape_html("&lt;&gt;&quot;&#39;&#x2F;"), "<>\"'/");
        assert_eq!(unescape_html("fish & chips"), "fish & chips");
        assert_eq!(unescape_html("&bogus;"), "&bogus;");
        assert!(matches!(unescape_html("plain"), Cow::Borrowed("plain")));
    }
}
