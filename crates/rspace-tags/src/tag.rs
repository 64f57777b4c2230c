//! Tag records and the transient selection flag used by candidate lists.

use std::fmt;

use rspace_set::{ImmutableSet, Presence, lift3, presence3};
use serde::{Deserialize, Serialize};

/// A tag attached to an inventory record.
///
/// Ontology-sourced tags carry the vocabulary file name, the term URI and the
/// vocabulary version; user-defined tags carry none of them. Tags are never
/// edited in place: replacing one means removing it from its collection and
/// adding the new value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Tag {
    /// The literal tag text.
    pub value: String,
    /// Name of the controlled-vocabulary file the term came from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vocabulary: Option<String>,
    /// URI identifying the term within its vocabulary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    /// Version of the vocabulary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Where a tag's value came from, judged by its metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source<'a> {
    /// Typed by a user; no metadata.
    UserDefined,
    /// Taken from a controlled vocabulary; all metadata present.
    Ontology {
        vocabulary: &'a str,
        uri: &'a str,
        version: &'a str,
    },
    /// Some but not all metadata fields are set.
    Partial,
}

impl Tag {
    /// A user-defined tag with no source metadata.
    #[must_use]
    pub fn simple(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            vocabulary: None,
            uri: None,
            version: None,
        }
    }

    /// A tag taken from a controlled vocabulary.
    #[must_use]
    pub fn ontology(
        value: impl Into<String>,
        vocabulary: impl Into<String>,
        uri: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            value: value.into(),
            vocabulary: Some(vocabulary.into()),
            uri: Some(uri.into()),
            version: Some(version.into()),
        }
    }

    /// Classify the tag by its metadata.
    #[must_use]
    pub fn source(&self) -> Source<'_> {
        let ontology = lift3(
            |vocabulary, uri, version| Source::Ontology {
                vocabulary,
                uri,
                version,
            },
            self.vocabulary.as_deref(),
            self.uri.as_deref(),
            self.version.as_deref(),
        );
        if let Some(source) = ontology {
            return source;
        }
        match presence3(self.vocabulary.as_ref(), self.uri.as_ref(), self.version.as_ref()) {
            Presence::Absent => Source::UserDefined,
            Presence::All | Presence::Partial => Source::Partial,
        }
    }

    /// Returns `true` if all three metadata fields are present.
    #[must_use]
    pub fn has_source_information(&self) -> bool {
        matches!(self.source(), Source::Ontology { .. })
    }

    /// The key two tags are compared by when deciding if they are "the same".
    #[must_use]
    pub fn key(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// Equality predicate for the set algebra's `*_with_eq` operations: tags are
/// the same if their values match, whatever their metadata.
#[must_use]
pub fn same_value(a: &Tag, b: &Tag) -> bool {
    a.key() == b.key()
}

/// A tag in a candidate list, flagged if the user has already chosen it.
///
/// The flag is derived from the current selection and is never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InternalTag {
    pub tag: Tag,
    pub selected: bool,
}

impl InternalTag {
    /// Wrap `tag` with an explicit selection flag.
    #[must_use]
    pub const fn new(tag: Tag, selected: bool) -> Self {
        Self { tag, selected }
    }

    /// Wrap `tag`, marking it selected if `selection` already holds a tag
    /// with the same value.
    #[must_use]
    pub fn against(tag: Tag, selection: &ImmutableSet<Tag>) -> Self {
        let selected = selection.has_with_eq(&tag, same_value);
        Self { tag, selected }
    }
}

impl From<Tag> for InternalTag {
    fn from(tag: Tag) -> Self {
        Self::new(tag, false)
    }
}
