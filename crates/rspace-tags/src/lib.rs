//! rspace-tags library.
//!
//! Tags attached to inventory records, the flat string codec the backend
//! stores them in, the paginated candidate-tag protocol, and the validation
//! rules the tag picker applies before a tag may be added.
//!
//! # Conventions
//!
//! - **Errors**: domain operations are total and never return errors; only
//!   config loading and page decoding use `thiserror` enums.
//! - **Logging**: use `tracing` macros (`debug!`, `warn!`, `trace!`).

pub mod codec;
pub mod config;
pub mod page;
pub mod tag;
pub mod validate;

pub use codec::{
    decode_tag_string, decode_tags, encode_tag, encode_tag_string, encode_tags, parse_encoded_tag,
    parse_encoded_tags,
};
pub use config::{ConfigError, TagsConfig, ValidationConfig, load_config};
pub use page::{Candidates, PageEnd, PageError, PageRequest, TagPage};
pub use tag::{InternalTag, Source, Tag, same_value};
pub use validate::{
    CheckOptions, Validator, Validity, WhitespacePosition, check_candidate, check_internal_tag,
    check_tag_string, check_user_input_string, help_text, is_allowed,
};
