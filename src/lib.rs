//! # resultmap
//!
//! Result mapping descriptors for row-to-object mapping: how a result column
//! (or a nested object/collection) maps onto a target property, which
//! converter reads it, and the construction-time rules a mapping must obey.
//!
//! ```
//! use resultmap::{MappingConfiguration, MappingErrorReason, ResultMappingBuilder, TargetType};
//!
//! let configuration = MappingConfiguration::default();
//!
//! let string = TargetType::of::<String>();
//! let name = ResultMappingBuilder::with_target_type(&configuration, "name", "user_name", string)
//!     .build()?;
//! assert_eq!(name.column(), Some("user_name"));
//!
//! let err = ResultMappingBuilder::new(&configuration, "author")
//!     .nested_query_id("selectAuthor")
//!     .nested_result_map_id("AuthorMap")
//!     .build()
//!     .unwrap_err();
//! assert_eq!(err.reason(), &MappingErrorReason::ConflictingNestedMapping);
//! # Ok::<(), resultmap::MappingError>(())
//! ```

pub mod config;
pub mod converter;
pub mod mapping;
#[cfg(feature = "tracing")]
pub mod tracing_helpers;
pub mod types;

pub use config::{MappingConfiguration, MappingContext, MappingSettings};
pub use converter::{
    Converter, ConverterRegistry, NamedConverter, TypeConverter, TypeConverterRegistry,
};
pub use mapping::{
    MappingError, MappingErrorReason, MappingResolution, ResultFlag, ResultMapping,
    ResultMappingBuilder,
};
pub use types::{ColumnType, TargetType};
