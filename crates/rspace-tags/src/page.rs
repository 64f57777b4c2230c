//! Paginated candidate-tag protocol.
//!
//! The tag endpoint returns `{ "data": [...] }` pages of encoded tags for a
//! cursor (`pos`) and a free-text filter (`tagFilter`). The last page carries
//! one of two sentinel strings in its data list. This module models the
//! request and response shapes and the pure merge of pages into a candidate
//! list; issuing requests, debouncing the filter and discarding stale
//! responses are left to the caller.

use rspace_set::{ImmutableSet, union_with};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::codec::parse_encoded_tags;
use crate::tag::{InternalTag, Tag};

// ---------------------------------------------------------------------------
// Sentinels
// ---------------------------------------------------------------------------

/// Sent when the whole (small) result set fit in a single page.
pub const SMALL_DATASET_SENTINEL: &str = "=========SMALL_DATASET_IN_SINGLE_BLOCK=========";

/// Sent on the final page of a larger result set.
pub const FINAL_DATA_SENTINEL: &str = "=========FINAL_DATA=========";

/// Why pagination stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageEnd {
    /// The entire result set arrived in one page.
    SmallDataset,
    /// This was the last of several pages.
    FinalPage,
}

impl PageEnd {
    /// Recognise a sentinel string.
    #[must_use]
    pub fn from_sentinel(s: &str) -> Option<Self> {
        match s {
            SMALL_DATASET_SENTINEL => Some(Self::SmallDataset),
            FINAL_DATA_SENTINEL => Some(Self::FinalPage),
            _ => None,
        }
    }

    /// The sentinel string for this end state.
    #[must_use]
    pub const fn sentinel(self) -> &'static str {
        match self {
            Self::SmallDataset => SMALL_DATASET_SENTINEL,
            Self::FinalPage => FINAL_DATA_SENTINEL,
        }
    }
}

/// Returns `true` if `s` is either pagination sentinel.
#[must_use]
pub fn is_sentinel(s: &str) -> bool {
    PageEnd::from_sentinel(s).is_some()
}

/// The end state signalled by a page's data, if any.
#[must_use]
pub fn page_end<S: AsRef<str>>(data: &[S]) -> Option<PageEnd> {
    data.iter().find_map(|s| PageEnd::from_sentinel(s.as_ref()))
}

// ---------------------------------------------------------------------------
// Request / response
// ---------------------------------------------------------------------------

/// Errors decoding a page payload.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    /// The body is not a `{ "data": [string] }` object.
    #[error("malformed tag page payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// One page of encoded tags as returned by the tag endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagPage {
    pub data: Vec<String>,
}

impl TagPage {
    /// Decode a response body.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Json`] if the body does not match the page shape.
    pub fn from_json(body: &str) -> Result<Self, PageError> {
        Ok(serde_json::from_str(body)?)
    }

    /// The end state this page signals, if it is the last one.
    #[must_use]
    pub fn end(&self) -> Option<PageEnd> {
        page_end(&self.data)
    }

    /// Returns `true` if another page should be requested.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.end().is_none()
    }

    /// The usable tags on this page, sentinels removed.
    #[must_use]
    pub fn tags(&self) -> Vec<Tag> {
        parse_encoded_tags(&self.data)
    }
}

/// Cursor and filter for the next page request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    pub pos: u32,
    pub tag_filter: String,
}

impl PageRequest {
    /// Request the first page for `filter`. A changed filter always starts
    /// over from here.
    #[must_use]
    pub fn first(filter: impl Into<String>) -> Self {
        Self {
            pos: 0,
            tag_filter: filter.into(),
        }
    }

    /// Request the page after this one, with the same filter.
    #[must_use]
    pub fn next(&self) -> Self {
        Self {
            pos: self.pos.saturating_add(1),
            tag_filter: self.tag_filter.clone(),
        }
    }

    /// Query-string pairs in the names the endpoint expects.
    #[must_use]
    pub fn query_pairs(&self) -> [(&'static str, String); 2] {
        [
            ("pos", self.pos.to_string()),
            ("tagFilter", self.tag_filter.clone()),
        ]
    }
}

// ---------------------------------------------------------------------------
// Candidate merge
// ---------------------------------------------------------------------------

/// Candidate tags accumulated across pages.
///
/// A value type: merging returns a new list. Candidates are unique by tag
/// value; the first page to deliver a value wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Candidates {
    tags: Vec<InternalTag>,
    end: Option<PageEnd>,
}

impl Candidates {
    /// An empty list awaiting its first page.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The candidates in arrival order.
    #[must_use]
    pub fn tags(&self) -> &[InternalTag] {
        &self.tags
    }

    /// How pagination ended, if it has.
    #[must_use]
    pub const fn end(&self) -> Option<PageEnd> {
        self.end
    }

    /// Returns `true` once a sentinel page has been merged.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.end.is_some()
    }

    /// Candidates the user has not selected yet.
    pub fn unselected(&self) -> impl Iterator<Item = &InternalTag> {
        self.tags.iter().filter(|candidate| !candidate.selected)
    }

    /// Merge a page, flagging tags that are already in `selection`.
    ///
    /// Pages arriving after the end of data are ignored.
    #[must_use]
    pub fn merge_page(&self, page: &TagPage, selection: &ImmutableSet<Tag>) -> Self {
        if self.is_exhausted() {
            debug!("ignoring tag page received after end of data");
            return self.clone();
        }

        let known: ImmutableSet<String> =
            self.tags.iter().map(|c| c.tag.value.clone()).collect();
        let incoming: ImmutableSet<Tag> = page.tags().into_iter().collect();
        let unique = union_with(|tag: &Tag| tag.value.clone(), [&incoming]);
        let fresh = unique.subtract_map(|tag| tag.value.clone(), &known);

        let end = page.end();
        if let Some(end) = end {
            debug!(?end, total = self.tags.len() + fresh.len(), "tag pagination finished");
        }

        let mut tags = self.tags.clone();
        tags.extend(
            fresh
                .into_iter()
                .map(|tag| InternalTag::against(tag, selection)),
        );
        Self { tags, end }
    }

    /// Recompute selection flags after the selection changed.
    #[must_use]
    pub fn refresh_selection(&self, selection: &ImmutableSet<Tag>) -> Self {
        Self {
            tags: self
                .tags
                .iter()
                .map(|c| InternalTag::against(c.tag.clone(), selection))
                .collect(),
            end: self.end,
        }
    }
}
