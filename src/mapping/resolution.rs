//! Late binding of built result mappings.
//!
//! A few settings are only known after the whole mapping configuration has
//! been read: the foreign column of a mapping that joins an additional
//! result set may be inherited from the referencing mapping, and the lazy
//! flag may be overridden per statement. [`MappingResolution`] is the only
//! way to change them.
//!
//! The resolution phase holds `&mut ResultMapping`, so it has a single
//! writer and ends before the mapping can be read elsewhere. Mappings
//! already shared behind `Arc` can only be resolved via `Arc::get_mut`,
//! which fails while any other handle is alive.
//!
//! # Example
//!
//! ```
//! use resultmap::{MappingConfiguration, ResultMappingBuilder};
//!
//! let configuration = MappingConfiguration::default();
//! let mut mapping = ResultMappingBuilder::new(&configuration, "posts")
//!     .column("id")
//!     .nested_result_map_id("PostMap")
//!     .build()?;
//!
//! mapping.resolution().set_foreign_column("author_id").set_lazy(true);
//!
//! assert_eq!(mapping.foreign_column(), Some("author_id"));
//! assert!(mapping.is_lazy());
//! # Ok::<(), resultmap::MappingError>(())
//! ```

use super::ResultMapping;

#[cfg(feature = "tracing")]
use crate::tracing_helpers;

/// Exclusive handle for updating the late-bound settings of a mapping
pub struct MappingResolution<'a> {
    mapping: &'a mut ResultMapping,
}

impl<'a> MappingResolution<'a> {
    pub(crate) fn new(mapping: &'a mut ResultMapping) -> Self {
        Self { mapping }
    }

    /// Set the column(s) of the additional result set joining back to this mapping
    ///
    /// The column count is not re-validated against `column`.
    pub fn set_foreign_column(&mut self, foreign_column: impl Into<String>) -> &mut Self {
        #[cfg(feature = "tracing")]
        let _span = tracing_helpers::resolve_result_mapping_span(&self.mapping.property).entered();

        let foreign_column = foreign_column.into();
        log::trace!(
            "Binding foreign column '{}' for property '{}'",
            foreign_column,
            self.mapping.property
        );
        self.mapping.foreign_column = Some(foreign_column);
        self
    }

    pub fn clear_foreign_column(&mut self) -> &mut Self {
        self.mapping.foreign_column = None;
        self
    }

    /// Override whether nested resolution is deferred
    pub fn set_lazy(&mut self, lazy: bool) -> &mut Self {
        log::trace!(
            "Binding lazy={} for property '{}'",
            lazy,
            self.mapping.property
        );
        self.mapping.lazy = lazy;
        self
    }

    /// Read access to the mapping being resolved
    pub fn mapping(&self) -> &ResultMapping {
        self.mapping
    }
}
