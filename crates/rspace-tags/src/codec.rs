//! Flat string encoding of tags for the legacy tag field.
//!
//! # Wire format
//!
//! A tag field is a comma-separated list of per-tag encodings. Each encoding
//! is either the escaped value of a user-defined tag, or four escaped
//! components joined by fixed delimiters:
//!
//! ```text
//! value __RSP_EXTONT_URL_DELIM__ uri __RSP_EXTONT_NAME_DELIM__ vocabulary __RSP_EXTONT_VERSION_DELIM__ version
//! ```
//!
//! # Escaping
//!
//! `/` and `,` inside a component are replaced by [`FORWARD_SLASH_TOKEN`] and
//! [`COMMA_TOKEN`]. Both tokens share the prefix `__rspactags_`; a literal
//! occurrence of that prefix is itself escaped as [`LITERAL_PREFIX_TOKEN`] so
//! that decoding is the exact inverse of encoding for every string. Strings
//! that never contain the prefix encode exactly as the legacy backend expects.

use tracing::warn;

use crate::page::is_sentinel;
use crate::tag::{Source, Tag};

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

/// Separates the value from the URI.
pub const URL_DELIM: &str = "__RSP_EXTONT_URL_DELIM__";
/// Separates the URI from the vocabulary name.
pub const NAME_DELIM: &str = "__RSP_EXTONT_NAME_DELIM__";
/// Separates the vocabulary name from its version.
pub const VERSION_DELIM: &str = "__RSP_EXTONT_VERSION_DELIM__";

/// Stands in for `/`.
pub const FORWARD_SLASH_TOKEN: &str = "__rspactags_forsl__";
/// Stands in for `,`.
pub const COMMA_TOKEN: &str = "__rspactags_comma__";
/// Stands in for a literal [`TOKEN_PREFIX`].
pub const LITERAL_PREFIX_TOKEN: &str = "__rspactags_lit__";

/// Prefix shared by every escape token.
const TOKEN_PREFIX: &str = "__rspactags_";

/// Separator between per-tag encodings.
const TAG_SEPARATOR: char = ',';

const ESCAPES: [(&str, &str); 3] = [
    (FORWARD_SLASH_TOKEN, "/"),
    (COMMA_TOKEN, ","),
    (LITERAL_PREFIX_TOKEN, TOKEN_PREFIX),
];

// ---------------------------------------------------------------------------
// String escaping
// ---------------------------------------------------------------------------

/// Escape the reserved characters of a single component.
#[must_use]
pub fn encode_tag_string(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    loop {
        if let Some(after) = rest.strip_prefix(TOKEN_PREFIX) {
            out.push_str(LITERAL_PREFIX_TOKEN);
            rest = after;
            continue;
        }
        let mut chars = rest.chars();
        let Some(c) = chars.next() else {
            break;
        };
        match c {
            '/' => out.push_str(FORWARD_SLASH_TOKEN),
            ',' => out.push_str(COMMA_TOKEN),
            other => out.push(other),
        }
        rest = chars.as_str();
    }
    out
}

/// Reverse [`encode_tag_string`].
///
/// Total: text that is not a complete escape token is copied through.
#[must_use]
pub fn decode_tag_string(encoded: &str) -> String {
    let mut out = String::with_capacity(encoded.len());
    let mut rest = encoded;
    loop {
        let unescaped = ESCAPES.iter().find_map(|(token, replacement)| {
            rest.strip_prefix(token).map(|after| (after, *replacement))
        });
        if let Some((after, replacement)) = unescaped {
            out.push_str(replacement);
            rest = after;
            continue;
        }
        let mut chars = rest.chars();
        let Some(c) = chars.next() else {
            break;
        };
        out.push(c);
        rest = chars.as_str();
    }
    out
}

// ---------------------------------------------------------------------------
// Tag encoding
// ---------------------------------------------------------------------------

/// Encode a single tag.
///
/// Returns `None` if the tag's metadata is only partially populated: the
/// format has no way to express a tag with, say, a URI but no version.
#[must_use]
pub fn encode_tag(tag: &Tag) -> Option<String> {
    match tag.source() {
        Source::UserDefined => Some(encode_tag_string(&tag.value)),
        Source::Ontology {
            vocabulary,
            uri,
            version,
        } => Some(format!(
            "{}{URL_DELIM}{}{NAME_DELIM}{}{VERSION_DELIM}{}",
            encode_tag_string(&tag.value),
            encode_tag_string(uri),
            encode_tag_string(vocabulary),
            encode_tag_string(version),
        )),
        Source::Partial => {
            warn!(value = %tag.value, "tag has partial ontology metadata, cannot encode");
            None
        }
    }
}

/// Encode a batch of tags into one comma-separated field.
///
/// All or nothing: a single tag with partial metadata fails the whole batch.
#[must_use]
pub fn encode_tags(tags: &[Tag]) -> Option<String> {
    let encoded = tags.iter().map(encode_tag).collect::<Option<Vec<_>>>()?;
    Some(encoded.join(","))
}

// ---------------------------------------------------------------------------
// Tag parsing
// ---------------------------------------------------------------------------

/// Split an encoded string into `(value, uri, vocabulary, version)`.
///
/// Splitting happens before unescaping: a component that starts with token
/// text would otherwise fuse with the trailing `__` of the delimiter before it.
fn split_components(encoded: &str) -> Option<(&str, &str, &str, &str)> {
    let (value, rest) = encoded.split_once(URL_DELIM)?;
    let (uri, rest) = rest.split_once(NAME_DELIM)?;
    let (vocabulary, version) = rest.split_once(VERSION_DELIM)?;
    Some((value, uri, vocabulary, version))
}

/// Parse one encoded tag.
///
/// Strings matching the four-part pattern become ontology tags; anything
/// else becomes a user-defined tag holding the decoded string.
#[must_use]
pub fn parse_encoded_tag(encoded: &str) -> Tag {
    match split_components(encoded) {
        Some((value, uri, vocabulary, version)) => Tag::ontology(
            decode_tag_string(value),
            decode_tag_string(vocabulary),
            decode_tag_string(uri),
            decode_tag_string(version),
        ),
        None => Tag::simple(decode_tag_string(encoded)),
    }
}

/// Parse a page of encoded tags.
///
/// Pagination sentinels and empty strings are dropped; every other string
/// yields exactly one tag. Never fails.
#[must_use]
pub fn parse_encoded_tags<S: AsRef<str>>(encoded: &[S]) -> Vec<Tag> {
    encoded
        .iter()
        .map(AsRef::as_ref)
        .filter(|s| !s.is_empty() && !is_sentinel(s))
        .map(parse_encoded_tag)
        .collect()
}

/// Parse a whole tag field as produced by [`encode_tags`].
#[must_use]
pub fn decode_tags(field: &str) -> Vec<Tag> {
    let parts: Vec<&str> = field.split(TAG_SEPARATOR).collect();
    parse_encoded_tags(&parts)
}
