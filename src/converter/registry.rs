//! Converter registry for resolving converters by target and column type

use super::builtin::{DEFAULTS, UNKNOWN};
use super::Converter;
use crate::types::{ColumnType, TargetType};
use std::collections::HashMap;

/// Resolves converters for result mappings that do not name one explicitly
///
/// Result mapping builders only read from the registry; registration happens
/// while the surrounding configuration is assembled.
pub trait ConverterRegistry {
    /// Resolve a converter for `target`, optionally narrowed by `column_type`
    ///
    /// Returns `None` when nothing suitable is registered.
    fn resolve(&self, target: &TargetType, column_type: Option<ColumnType>) -> Option<Converter>;

    /// Converter that detects the value type when the row is read
    ///
    /// Used for the sub-columns of composite mappings, whose property types
    /// are not declared.
    fn unknown(&self) -> Converter;
}

/// In-memory converter registry
///
/// Converters are registered per target type, either for a specific column
/// type or as the default (`None`) for that target type.
///
/// # Resolution order
///
/// 1. The converter registered for the exact column type
/// 2. The default converter registered without a column type
/// 3. If every registration for the target type is the same converter
///    instance, that sole converter
///
/// # Example
///
/// ```
/// use resultmap::{
///     ColumnType, Converter, ConverterRegistry, NamedConverter, TargetType, TypeConverterRegistry,
/// };
///
/// struct Money;
///
/// let mut registry = TypeConverterRegistry::new();
/// let money = Converter::new(NamedConverter::new("money"));
/// registry.register(TargetType::of::<Money>(), Some(ColumnType::Numeric), money.clone());
///
/// // Only one converter is registered for `Money`, so it is picked for any column type
/// assert_eq!(registry.resolve(&TargetType::of::<Money>(), None), Some(money));
/// ```
#[derive(Debug, Clone)]
pub struct TypeConverterRegistry {
    converters: HashMap<TargetType, HashMap<Option<ColumnType>, Converter>>,
    unknown: Converter,
}

impl Default for TypeConverterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeConverterRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            converters: HashMap::new(),
            unknown: UNKNOWN.clone(),
        }
    }

    /// Create a registry pre-populated with the built-in converters
    pub fn with_defaults() -> Self {
        DEFAULTS.clone()
    }

    /// Register a converter
    ///
    /// A later registration for the same `(target, column_type)` pair
    /// replaces the earlier one, which is returned.
    pub fn register(
        &mut self,
        target: TargetType,
        column_type: Option<ColumnType>,
        converter: Converter,
    ) -> Option<Converter> {
        let replaced = self
            .converters
            .entry(target)
            .or_default()
            .insert(column_type, converter);
        if let Some(ref previous) = replaced {
            log::debug!(
                "Replaced converter '{}' for {} ({})",
                previous.name(),
                target,
                column_type.map_or("any column type", |c| c.as_str())
            );
        }
        replaced
    }

    /// Replace the converter used for undeclared composite sub-columns
    pub fn set_unknown(&mut self, converter: Converter) {
        self.unknown = converter;
    }

    /// Check if any converter is registered for `target`
    pub fn has_converter(&self, target: &TargetType) -> bool {
        self.converters
            .get(target)
            .is_some_and(|by_column| !by_column.is_empty())
    }

    /// Remove every registration for `target`, returning how many were removed
    pub fn unregister(&mut self, target: &TargetType) -> usize {
        self.converters
            .remove(target)
            .map_or(0, |by_column| by_column.len())
    }

    /// The converter all registrations share, if there is exactly one
    fn sole_converter(by_column: &HashMap<Option<ColumnType>, Converter>) -> Option<Converter> {
        let mut converters = by_column.values();
        let first = converters.next()?;
        if converters.all(|c| c.ptr_eq(first)) {
            Some(first.clone())
        } else {
            None
        }
    }
}

impl ConverterRegistry for TypeConverterRegistry {
    fn resolve(&self, target: &TargetType, column_type: Option<ColumnType>) -> Option<Converter> {
        let by_column = self.converters.get(target)?;
        by_column
            .get(&column_type)
            .or_else(|| by_column.get(&None))
            .cloned()
            .or_else(|| Self::sole_converter(by_column))
    }

    fn unknown(&self) -> Converter {
        self.unknown.clone()
    }
}
