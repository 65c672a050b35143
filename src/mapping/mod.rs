//! Result mapping descriptors.
//!
//! A [`ResultMapping`] describes how one result column, or a nested
//! object/collection, maps onto a target property:
//! - **Scalar**: a column read through a converter
//! - **Nested result map**: columns of the same row mapped by another result map
//! - **Nested query**: a sub-query executed with the column value(s) as parameters
//! - **Composite**: several columns, each mapped by a sub-mapping
//!
//! # Architecture
//!
//! - **Builder**: [`ResultMappingBuilder`] collects settings and validates them in `build()`
//! - **Descriptor**: [`ResultMapping`], immutable once built
//! - **Resolution**: [`MappingResolution`], the late-binding phase for
//!   `foreign_column` and `lazy`
//! - **Columns**: helpers for comma-separated and composite column lists

pub mod builder;
#[doc(inline)]
pub use builder::ResultMappingBuilder;

pub mod columns;

pub mod error;
#[doc(inline)]
pub use error::{MappingError, MappingErrorReason};

pub mod flag;
#[doc(inline)]
pub use flag::ResultFlag;

pub mod resolution;
#[doc(inline)]
pub use resolution::MappingResolution;

pub mod result_mapping;
#[doc(inline)]
pub use result_mapping::ResultMapping;
