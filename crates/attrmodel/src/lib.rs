//! The typed-value data model for tender/product attribute matching.
//!
//! # Overview
//!
//! This crate owns:
//! - **Data model**: [`Position`], [`PositionAttribute`], [`ProductCandidate`],
//!   [`ProductAttribute`] — the shapes moving through the pipeline.
//! - **Typed value algebra**: [`TypedValue`], [`Bound`], [`TypeTag`] — the
//!   tagged sum type every comparison dispatches on.
//! - **Parsing**: [`parse_position_attribute`]/[`parse_position_attributes`]
//!   (calls the attribute parser and unit normalizer), and
//!   [`parse_candidate_attribute`]/[`parse_candidate`] (unit normalization
//!   only, since candidates are pre-standardized), plus [`GroupedAttributes`]
//!   which partitions a candidate's parsed attributes by final type tag.
//!
//! None of the parsing entry points return an error: a single attribute
//! that the remote parser can't make sense of is simply dropped, per the
//! failure-isolation design in the error handling section.

pub mod error;
pub mod parse;
pub mod subtype;
pub mod types;

pub use error::AttrModelError;
pub use parse::{parse_candidate, parse_candidate_attribute, parse_position_attribute, parse_position_attributes, GroupedAttributes};
pub use subtype::determine_value_subtype;
pub use types::{Bound, Origin, ParsedAttribute, Position, PositionAttribute, ProductAttribute, ProductCandidate, TypeTag, TypedValue};
