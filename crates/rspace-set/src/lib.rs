//! rspace-set library.
//!
//! A persistent set type with a full set algebra, plus the optional-value
//! combinators shared by the tag crate.
//!
//! # Conventions
//!
//! - **Immutability**: every operation takes `&self` and returns a new set.
//! - **Logging**: use `tracing` macros; the library never installs a subscriber.

pub mod algebra;
pub mod optional;
pub mod set;

pub use algebra::{
    flatten_with_intersection, flatten_with_intersection_with_eq, flatten_with_union, union_with,
};
pub use optional::{Presence, lift2, lift3, presence3};
pub use set::{ImmutableSet, Narrow};
