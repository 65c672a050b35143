//! Builder for [`ResultMapping`] descriptors.
//!
//! Setters only record values; nothing is checked until
//! [`build()`](ResultMappingBuilder::build), so a partially configured
//! builder is always a valid intermediate state.
//!
//! # Example
//!
//! ```
//! use resultmap::{ColumnType, MappingConfiguration, ResultFlag, ResultMappingBuilder, TargetType};
//!
//! let configuration = MappingConfiguration::default();
//!
//! let id_type = TargetType::of::<i64>();
//! let id = ResultMappingBuilder::with_target_type(&configuration, "id", "author_id", id_type)
//!     .column_type(ColumnType::BigInt)
//!     .flag(ResultFlag::Id)
//!     .build()?;
//! assert_eq!(id.converter().map(|c| c.name()), Some("bigint"));
//!
//! let posts = ResultMappingBuilder::new(&configuration, "posts")
//!     .nested_result_map_id("PostMap")
//!     .column_prefix("post_")
//!     .build()?;
//! assert!(posts.converter().is_none());
//! # Ok::<(), resultmap::MappingError>(())
//! ```

use super::columns::{column_count, composite_pairs};
use super::{MappingError, MappingErrorReason, ResultFlag, ResultMapping};
use crate::config::MappingContext;
use crate::converter::Converter;
use crate::types::{ColumnType, TargetType};
use std::collections::BTreeSet;
use std::sync::Arc;

#[cfg(feature = "tracing")]
use crate::tracing_helpers;

/// Accumulates the settings of one result mapping
///
/// Every constructor takes the lazy default from the context's global
/// lazy-loading setting at the time the builder is created. The context is
/// only read, never modified.
pub struct ResultMappingBuilder<'a, C: MappingContext + ?Sized> {
    context: &'a C,
    property: String,
    column: Option<String>,
    target_type: Option<TargetType>,
    column_type: Option<ColumnType>,
    converter: Option<Converter>,
    nested_result_map_id: Option<String>,
    nested_query_id: Option<String>,
    not_null_columns: Option<BTreeSet<String>>,
    column_prefix: Option<String>,
    flags: Vec<ResultFlag>,
    composites: Vec<ResultMapping>,
    result_set: Option<String>,
    foreign_column: Option<String>,
    lazy: bool,
}

impl<'a, C: MappingContext + ?Sized> ResultMappingBuilder<'a, C> {
    /// Start a mapping for `property` with no column or type
    pub fn new(context: &'a C, property: impl Into<String>) -> Self {
        Self {
            context,
            property: property.into(),
            column: None,
            target_type: None,
            column_type: None,
            converter: None,
            nested_result_map_id: None,
            nested_query_id: None,
            not_null_columns: None,
            column_prefix: None,
            flags: Vec::new(),
            composites: Vec::new(),
            result_set: None,
            foreign_column: None,
            lazy: context.is_lazy_loading_enabled(),
        }
    }

    /// Start a mapping reading `column` through an explicit converter
    pub fn with_converter(
        context: &'a C,
        property: impl Into<String>,
        column: impl Into<String>,
        converter: Converter,
    ) -> Self {
        Self::new(context, property)
            .column(column)
            .converter(converter)
    }

    /// Start a mapping reading `column` into a property of `target_type`
    ///
    /// The converter is resolved from the registry when the mapping is built.
    pub fn with_target_type(
        context: &'a C,
        property: impl Into<String>,
        column: impl Into<String>,
        target_type: TargetType,
    ) -> Self {
        Self::new(context, property)
            .column(column)
            .target_type(target_type)
    }

    pub fn column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    pub fn target_type(mut self, target_type: TargetType) -> Self {
        self.target_type = Some(target_type);
        self
    }

    pub fn column_type(mut self, column_type: ColumnType) -> Self {
        self.column_type = Some(column_type);
        self
    }

    pub fn converter(mut self, converter: Converter) -> Self {
        self.converter = Some(converter);
        self
    }

    pub fn nested_result_map_id(mut self, id: impl Into<String>) -> Self {
        self.nested_result_map_id = Some(id.into());
        self
    }

    pub fn nested_query_id(mut self, id: impl Into<String>) -> Self {
        self.nested_query_id = Some(id.into());
        self
    }

    pub fn result_set(mut self, result_set: impl Into<String>) -> Self {
        self.result_set = Some(result_set.into());
        self
    }

    pub fn foreign_column(mut self, foreign_column: impl Into<String>) -> Self {
        self.foreign_column = Some(foreign_column.into());
        self
    }

    pub fn not_null_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.not_null_columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Set `not_null_columns` from a comma-separated attribute like `"id, name"`
    ///
    /// An attribute without any column name leaves the set unset.
    pub fn not_null_column_list(self, columns: &str) -> Self {
        let names: BTreeSet<String> = super::columns::split_columns(columns)
            .map(str::to_string)
            .collect();
        if names.is_empty() {
            self
        } else {
            self.not_null_columns(names)
        }
    }

    pub fn column_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.column_prefix = Some(prefix.into());
        self
    }

    /// Replace all flags
    pub fn flags(mut self, flags: Vec<ResultFlag>) -> Self {
        self.flags = flags;
        self
    }

    /// Append one flag
    pub fn flag(mut self, flag: ResultFlag) -> Self {
        self.flags.push(flag);
        self
    }

    pub fn composites(mut self, composites: Vec<ResultMapping>) -> Self {
        self.composites = composites;
        self
    }

    /// Set the column from an attribute that may list property/column pairs
    ///
    /// For a composite attribute like `"{id=author_id,tenant=tenant_id}"`
    /// one sub-mapping per pair is built with the registry's unknown-type
    /// converter, and the raw attribute is kept as the column. A plain
    /// column name just sets the column.
    ///
    /// # Errors
    ///
    /// Returns `MalformedCompositeColumn` when a property has no column.
    pub fn composite_column(mut self, column: impl Into<String>) -> Result<Self, MappingError> {
        let column = column.into();
        let pairs = composite_pairs(&column).ok_or_else(|| {
            MappingError::new(
                self.property.clone(),
                MappingErrorReason::MalformedCompositeColumn {
                    column: column.clone(),
                },
            )
        })?;

        if !pairs.is_empty() {
            let context = self.context;
            let unknown = context.converter_registry().unknown();
            self.composites = pairs
                .into_iter()
                .map(|(property, sub_column)| {
                    ResultMappingBuilder::with_converter(
                        context,
                        property,
                        sub_column,
                        unknown.clone(),
                    )
                    .build()
                })
                .collect::<Result<Vec<_>, _>>()?;
        }

        self.column = Some(column);
        Ok(self)
    }

    pub fn lazy(mut self, lazy: bool) -> Self {
        self.lazy = lazy;
        self
    }

    /// Finalize the mapping
    ///
    /// Runs in order:
    /// 1. freeze flags and composites into shared read-only slices
    /// 2. resolve a converter from `(target_type, column_type)` when none was given
    /// 3. validate, failing on the first violated rule
    ///
    /// # Errors
    ///
    /// - `ConflictingNestedMapping`: both nested query and nested result map ids are set
    /// - `UnresolvedConverter`: no converter and the mapping is not nested
    /// - `MissingColumn`: no column, no nested result map and no composites
    /// - `ResultSetArityMismatch`: `result_set` is set and the column and
    ///   foreign column counts differ
    pub fn build(mut self) -> Result<ResultMapping, MappingError> {
        #[cfg(feature = "tracing")]
        let _span = tracing_helpers::build_result_mapping_span(&self.property).entered();

        let flags: Arc<[ResultFlag]> = Arc::from(std::mem::take(&mut self.flags));
        let composites: Arc<[ResultMapping]> = Arc::from(std::mem::take(&mut self.composites));
        let converter = self.resolve_converter();

        let mapping = ResultMapping {
            property: self.property,
            column: self.column,
            target_type: self.target_type,
            column_type: self.column_type,
            converter,
            nested_result_map_id: self.nested_result_map_id,
            nested_query_id: self.nested_query_id,
            not_null_columns: self.not_null_columns,
            column_prefix: self.column_prefix,
            flags,
            composites,
            result_set: self.result_set,
            foreign_column: self.foreign_column,
            lazy: self.lazy,
        };

        if let Err(reason) = validate(&mapping) {
            log::debug!(
                "Rejected mapping for property '{}': {:?}",
                mapping.property,
                reason
            );
            return Err(MappingError::new(mapping.property, reason));
        }
        Ok(mapping)
    }

    fn resolve_converter(&self) -> Option<Converter> {
        if self.converter.is_some() {
            return self.converter.clone();
        }
        let target_type = self.target_type.as_ref()?;
        let resolved = self
            .context
            .converter_registry()
            .resolve(target_type, self.column_type);
        match &resolved {
            Some(converter) => log::debug!(
                "Resolved converter '{}' for property '{}' ({}, {:?})",
                converter.name(),
                self.property,
                target_type,
                self.column_type
            ),
            None => log::debug!(
                "No converter registered for property '{}' ({}, {:?})",
                self.property,
                target_type,
                self.column_type
            ),
        }
        resolved
    }
}

/// Check the cross-field rules of a mapping, first failure wins
fn validate(mapping: &ResultMapping) -> Result<(), MappingErrorReason> {
    if mapping.nested_query_id.is_some() && mapping.nested_result_map_id.is_some() {
        return Err(MappingErrorReason::ConflictingNestedMapping);
    }

    if !mapping.is_nested() && mapping.converter.is_none() {
        return Err(MappingErrorReason::UnresolvedConverter);
    }

    // Column is optional only for nested result maps and composites
    if mapping.nested_result_map_id.is_none()
        && mapping.column.is_none()
        && mapping.composites.is_empty()
    {
        return Err(MappingErrorReason::MissingColumn);
    }

    if mapping.result_set.is_some() {
        let columns = mapping.column.as_deref().map_or(0, column_count);
        let foreign_columns = mapping.foreign_column.as_deref().map_or(0, column_count);
        if columns != foreign_columns {
            return Err(MappingErrorReason::ResultSetArityMismatch {
                columns,
                foreign_columns,
            });
        }
    }

    Ok(())
}
