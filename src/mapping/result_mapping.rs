//! The built, immutable result mapping descriptor.

use super::columns::split_columns;
use super::resolution::MappingResolution;
use super::ResultFlag;
use crate::converter::Converter;
use crate::types::{ColumnType, TargetType};
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// How one result column (or nested object/collection) maps onto a target property
///
/// Created by [`ResultMappingBuilder::build()`](super::ResultMappingBuilder::build),
/// which guarantees:
/// - at most one of `nested_query_id` / `nested_result_map_id` is set
/// - a converter is present unless the mapping is nested
/// - `column` is absent only for nested result maps or composite mappings
/// - with a `result_set`, `column` and `foreign_column` list the same number of columns
///
/// The mapping is immutable once built, apart from the late-bound
/// `foreign_column` and `lazy` settings reachable through
/// [`resolution()`](Self::resolution). Flags and composites are frozen
/// into shared slices, so clones are cheap and share them.
///
/// # Equality
///
/// Two mappings are equal when their `property` names are equal. No other
/// field takes part, and hashing follows the same rule. Result maps rely on
/// this to treat mappings as a set keyed by property.
#[derive(Clone)]
pub struct ResultMapping {
    pub(crate) property: String,
    pub(crate) column: Option<String>,
    pub(crate) target_type: Option<TargetType>,
    pub(crate) column_type: Option<ColumnType>,
    pub(crate) converter: Option<Converter>,
    pub(crate) nested_result_map_id: Option<String>,
    pub(crate) nested_query_id: Option<String>,
    pub(crate) not_null_columns: Option<BTreeSet<String>>,
    pub(crate) column_prefix: Option<String>,
    pub(crate) flags: Arc<[ResultFlag]>,
    pub(crate) composites: Arc<[ResultMapping]>,
    pub(crate) result_set: Option<String>,
    pub(crate) foreign_column: Option<String>,
    pub(crate) lazy: bool,
}

impl ResultMapping {
    /// Target property name
    pub fn property(&self) -> &str {
        &self.property
    }

    /// Source column, possibly a comma-separated or composite list
    pub fn column(&self) -> Option<&str> {
        self.column.as_deref()
    }

    pub fn target_type(&self) -> Option<TargetType> {
        self.target_type
    }

    pub fn column_type(&self) -> Option<ColumnType> {
        self.column_type
    }

    /// Explicit or resolved converter; `None` only for nested mappings
    pub fn converter(&self) -> Option<&Converter> {
        self.converter.as_ref()
    }

    pub fn nested_result_map_id(&self) -> Option<&str> {
        self.nested_result_map_id.as_deref()
    }

    pub fn nested_query_id(&self) -> Option<&str> {
        self.nested_query_id.as_deref()
    }

    /// Columns that must be non-null before a nested object is created
    pub fn not_null_columns(&self) -> Option<&BTreeSet<String>> {
        self.not_null_columns.as_ref()
    }

    pub fn column_prefix(&self) -> Option<&str> {
        self.column_prefix.as_deref()
    }

    pub fn flags(&self) -> &[ResultFlag] {
        &self.flags
    }

    pub fn has_flag(&self, flag: ResultFlag) -> bool {
        self.flags.contains(&flag)
    }

    /// Sub-mappings of a composite column, in declaration order
    pub fn composites(&self) -> &[ResultMapping] {
        &self.composites
    }

    pub fn is_composite_result(&self) -> bool {
        !self.composites.is_empty()
    }

    /// Whether the value comes from a nested result map or a nested query
    pub fn is_nested(&self) -> bool {
        self.nested_result_map_id.is_some() || self.nested_query_id.is_some()
    }

    /// Name of the additional result set this mapping reads from
    pub fn result_set(&self) -> Option<&str> {
        self.result_set.as_deref()
    }

    /// Column(s) in the additional result set joining back to `column`
    pub fn foreign_column(&self) -> Option<&str> {
        self.foreign_column.as_deref()
    }

    pub fn is_lazy(&self) -> bool {
        self.lazy
    }

    /// Individual names in `column`, trimmed
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.column.as_deref().into_iter().flat_map(split_columns)
    }

    /// Individual names in `foreign_column`, trimmed
    pub fn foreign_column_names(&self) -> impl Iterator<Item = &str> {
        self.foreign_column
            .as_deref()
            .into_iter()
            .flat_map(split_columns)
    }

    /// Enter the late-binding phase
    ///
    /// Only `foreign_column` and `lazy` can be changed. The exclusive borrow
    /// means no reader can observe the mapping meanwhile; once the mapping
    /// is shared behind an `Arc`, the phase is only reachable through
    /// `Arc::get_mut`.
    pub fn resolution(&mut self) -> MappingResolution<'_> {
        MappingResolution::new(self)
    }
}

impl PartialEq for ResultMapping {
    fn eq(&self, other: &Self) -> bool {
        self.property == other.property
    }
}

impl Eq for ResultMapping {}

impl Hash for ResultMapping {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.property.hash(state);
    }
}

impl fmt::Debug for ResultMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The converter is opaque and left out
        f.debug_struct("ResultMapping")
            .field("property", &self.property)
            .field("column", &self.column)
            .field("target_type", &self.target_type)
            .field("column_type", &self.column_type)
            .field("nested_result_map_id", &self.nested_result_map_id)
            .field("nested_query_id", &self.nested_query_id)
            .field("not_null_columns", &self.not_null_columns)
            .field("column_prefix", &self.column_prefix)
            .field("flags", &self.flags)
            .field("composites", &self.composites)
            .field("result_set", &self.result_set)
            .field("foreign_column", &self.foreign_column)
            .field("lazy", &self.lazy)
            .finish()
    }
}
