//! Tag validation.
//!
//! Every candidate tag, whether typed by the user or offered from an
//! ontology, is classified into exactly one [`Validity`].
//!
//! Text checks ([`check_tag_string`], [`check_user_input_string`]) run in a
//! fixed order and stop at the first failure:
//!
//! 1. length above the maximum ([`Validity::TooLong`])
//! 2. length below the minimum ([`Validity::TooShort`])
//! 3. forbidden character ([`Validity::InvalidChar`])
//! 4. leading, trailing or doubled space ([`Validity::InvalidWhitespace`])
//!
//! Candidate checks ([`check_internal_tag`], [`check_candidate`]) judge a
//! tag offered from the candidate list by selection and source alone:
//!
//! 1. already in the selection ([`Validity::AlreadySelected`])
//! 2. no ontology metadata while ontologies are enforced
//!    ([`Validity::OntologiesAreEnforced`])
//!
//! A candidate passing both is [`Validity::NoIssuesWithSourceInformation`]
//! if it carries full ontology metadata, and [`Validity::NoIssues`]
//! otherwise. Whether the UI accepts a tag ([`is_allowed`]) and what it says
//! about it ([`help_text`]) are pure functions of the outcome.

use rspace_set::ImmutableSet;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::config::ValidationConfig;
use crate::tag::{InternalTag, Source, Tag};

/// Where offending whitespace sits in a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WhitespacePosition {
    Prefix,
    Suffix,
    Consecutive,
}

/// Outcome of validating a tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Validity {
    TooLong { max: usize },
    TooShort { min: usize },
    InvalidChar { char: char },
    InvalidWhitespace { position: WhitespacePosition },
    AlreadySelected,
    OntologiesAreEnforced,
    NoIssuesWithSourceInformation { version: String, filename: String },
    NoIssues,
}

impl Validity {
    /// Stable identifier for machine consumers.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::TooLong { .. } => "too_long",
            Self::TooShort { .. } => "too_short",
            Self::InvalidChar { .. } => "invalid_char",
            Self::InvalidWhitespace { .. } => "invalid_whitespace",
            Self::AlreadySelected => "already_selected",
            Self::OntologiesAreEnforced => "ontologies_are_enforced",
            Self::NoIssuesWithSourceInformation { .. } => "no_issues_with_source_information",
            Self::NoIssues => "no_issues",
        }
    }

    /// Returns `true` if a tag with this outcome may be added.
    #[must_use]
    pub const fn is_allowed(&self) -> bool {
        matches!(
            self,
            Self::NoIssues | Self::NoIssuesWithSourceInformation { .. }
        )
    }

    /// Explanation to show next to the tag, if any.
    #[must_use]
    pub fn help_text(&self) -> Option<String> {
        let text = match self {
            Self::TooLong { max } => format!("Tags cannot be longer than {max} characters."),
            Self::TooShort { min } => format!("Tags must be at least {min} characters long."),
            Self::InvalidChar { char } => format!("Tags cannot contain the character '{char}'."),
            Self::InvalidWhitespace {
                position: WhitespacePosition::Prefix,
            } => "Tags cannot begin with a space.".to_string(),
            Self::InvalidWhitespace {
                position: WhitespacePosition::Suffix,
            } => "Tags cannot end with a space.".to_string(),
            Self::InvalidWhitespace {
                position: WhitespacePosition::Consecutive,
            } => "Tags cannot contain two consecutive spaces.".to_string(),
            Self::AlreadySelected => "This tag has already been added.".to_string(),
            Self::OntologiesAreEnforced => {
                "Only tags from an ontology file may be used; this tag has no ontology source."
                    .to_string()
            }
            Self::NoIssuesWithSourceInformation { version, filename } => {
                format!("From ontology file {filename}, version {version}.")
            }
            Self::NoIssues => return None,
        };
        Some(text)
    }
}

/// Returns `true` if a tag with this outcome may be added.
#[must_use]
pub const fn is_allowed(validity: &Validity) -> bool {
    validity.is_allowed()
}

/// Explanation to show for a validation outcome.
#[must_use]
pub fn help_text(validity: &Validity) -> Option<String> {
    validity.help_text()
}

/// Per-call options for checks against a selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckOptions {
    /// Accept only tags carrying full ontology metadata.
    pub enforce_ontologies: bool,
}

impl From<&ValidationConfig> for CheckOptions {
    fn from(config: &ValidationConfig) -> Self {
        Self {
            enforce_ontologies: config.enforce_ontologies,
        }
    }
}

// ---------------------------------------------------------------------------
// Validator
// ---------------------------------------------------------------------------

/// Checks tag text under a [`ValidationConfig`].
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    #[must_use]
    pub const fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Check a tag's text, forbidding only the always-forbidden characters.
    #[must_use]
    pub fn check_tag_string(&self, text: &str) -> Validity {
        self.check_text(text, false)
    }

    /// Check text typed by a user. The codec's reserved characters are
    /// rejected too, since typed tags never come with escaped components.
    #[must_use]
    pub fn check_user_input_string(&self, text: &str) -> Validity {
        self.check_text(text, true)
    }

    fn check_text(&self, text: &str, strict: bool) -> Validity {
        let length = text.chars().count();
        if length > self.config.max_length {
            return Validity::TooLong {
                max: self.config.max_length,
            };
        }
        if length < self.config.min_length {
            return Validity::TooShort {
                min: self.config.min_length,
            };
        }

        let offending = text.chars().find(|c| {
            self.config.forbidden_chars.contains(c)
                || (strict && self.config.reserved_chars.contains(c))
        });
        if let Some(char) = offending {
            return Validity::InvalidChar { char };
        }

        if let Some(position) = whitespace_issue(text) {
            return Validity::InvalidWhitespace { position };
        }

        Validity::NoIssues
    }
}

fn whitespace_issue(text: &str) -> Option<WhitespacePosition> {
    if text.starts_with(' ') {
        Some(WhitespacePosition::Prefix)
    } else if text.ends_with(' ') {
        Some(WhitespacePosition::Suffix)
    } else if text.contains("  ") {
        Some(WhitespacePosition::Consecutive)
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Default-config text checks
// ---------------------------------------------------------------------------

/// [`Validator::check_tag_string`] with the default limits.
#[must_use]
pub fn check_tag_string(text: &str) -> Validity {
    Validator::default().check_tag_string(text)
}

/// [`Validator::check_user_input_string`] with the default limits.
#[must_use]
pub fn check_user_input_string(text: &str) -> Validity {
    Validator::default().check_user_input_string(text)
}

// ---------------------------------------------------------------------------
// Candidate checks
// ---------------------------------------------------------------------------

/// Check a candidate from the combobox list.
///
/// Candidates were validated as text when they were created, so only the
/// selection flag and source metadata are judged here.
#[must_use]
pub fn check_internal_tag(candidate: &InternalTag, options: CheckOptions) -> Validity {
    let outcome = classify_internal_tag(candidate, options);
    trace!(value = %candidate.tag.value, outcome = outcome.code(), "checked tag");
    outcome
}

/// Check `tag` against the tags the user has already chosen.
#[must_use]
pub fn check_candidate(tag: &Tag, selection: &ImmutableSet<Tag>, options: CheckOptions) -> Validity {
    check_internal_tag(&InternalTag::against(tag.clone(), selection), options)
}

fn classify_internal_tag(candidate: &InternalTag, options: CheckOptions) -> Validity {
    if candidate.selected {
        return Validity::AlreadySelected;
    }
    match candidate.tag.source() {
        Source::Ontology {
            vocabulary,
            version,
            ..
        } => Validity::NoIssuesWithSourceInformation {
            version: version.to_string(),
            filename: vocabulary.to_string(),
        },
        Source::UserDefined | Source::Partial if options.enforce_ontologies => {
            Validity::OntologiesAreEnforced
        }
        Source::UserDefined | Source::Partial => Validity::NoIssues,
    }
}
