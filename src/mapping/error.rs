//! Error types for result mapping construction.

use std::fmt;

/// Why a result mapping was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingErrorReason {
    /// Both a nested query id and a nested result map id were set
    ConflictingNestedMapping,
    /// No converter was given and none could be resolved
    UnresolvedConverter,
    /// No column, no nested result map and no composites
    MissingColumn,
    /// `result_set` is set but the column and foreign column counts differ
    ResultSetArityMismatch {
        columns: usize,
        foreign_columns: usize,
    },
    /// A composite column attribute could not be split into property/column pairs
    MalformedCompositeColumn { column: String },
}

/// Invalid mapping configuration for one property
///
/// Raised by [`ResultMappingBuilder::build()`](super::ResultMappingBuilder::build).
/// Configuration errors are not retryable; the mapping has to be fixed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingError {
    property: String,
    reason: MappingErrorReason,
}

impl MappingError {
    pub fn new(property: impl Into<String>, reason: MappingErrorReason) -> Self {
        Self {
            property: property.into(),
            reason,
        }
    }

    /// The property whose mapping is invalid
    pub fn property(&self) -> &str {
        &self.property
    }

    pub fn reason(&self) -> &MappingErrorReason {
        &self.reason
    }
}

impl fmt::Display for MappingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            MappingErrorReason::ConflictingNestedMapping => write!(
                f,
                "Cannot define both a nested query and a nested result map in property '{}'",
                self.property
            ),
            MappingErrorReason::UnresolvedConverter => {
                write!(f, "No converter found for property '{}'", self.property)
            }
            MappingErrorReason::MissingColumn => write!(
                f,
                "Mapping is missing a column for property '{}'",
                self.property
            ),
            MappingErrorReason::ResultSetArityMismatch {
                columns,
                foreign_columns,
            } => write!(
                f,
                "There should be the same number of columns and foreign columns in property '{}' \
                 (columns: {}, foreign columns: {})",
                self.property, columns, foreign_columns
            ),
            MappingErrorReason::MalformedCompositeColumn { column } => write!(
                f,
                "Composite column '{}' in property '{}' must be a list of property=column pairs",
                column, self.property
            ),
        }
    }
}

impl std::error::Error for MappingError {}
