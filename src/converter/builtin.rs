//! Built-in converters registered by [`TypeConverterRegistry::with_defaults`].
//!
//! [`TypeConverterRegistry::with_defaults`]: super::TypeConverterRegistry::with_defaults

use super::{Converter, TypeConverter, TypeConverterRegistry};
use crate::types::{ColumnType, TargetType};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use once_cell::sync::Lazy;

/// Name of the converter that defers type detection to row-read time
pub const UNKNOWN_CONVERTER_NAME: &str = "unknown";

/// A converter identified only by its name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedConverter {
    name: String,
}

impl NamedConverter {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl TypeConverter for NamedConverter {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Shared instance of the unknown-type converter
pub(crate) static UNKNOWN: Lazy<Converter> =
    Lazy::new(|| Converter::new(NamedConverter::new(UNKNOWN_CONVERTER_NAME)));

/// The built-in registrations, created once and cloned into each registry
/// so converter handles stay identical across configurations.
pub(crate) static DEFAULTS: Lazy<TypeConverterRegistry> = Lazy::new(builtin_registry);

fn builtin_registry() -> TypeConverterRegistry {
    let mut registry = TypeConverterRegistry::new();

    let boolean = Converter::new(NamedConverter::new("boolean"));
    registry.register(TargetType::of::<bool>(), None, boolean.clone());
    registry.register(
        TargetType::of::<bool>(),
        Some(ColumnType::Boolean),
        boolean.clone(),
    );
    registry.register(TargetType::of::<bool>(), Some(ColumnType::Bit), boolean);

    register_scalar::<i8>(&mut registry, "tinyint", &[ColumnType::TinyInt]);
    register_scalar::<i16>(&mut registry, "smallint", &[ColumnType::SmallInt]);
    register_scalar::<i32>(&mut registry, "integer", &[ColumnType::Integer]);
    register_scalar::<i64>(&mut registry, "bigint", &[ColumnType::BigInt]);
    register_scalar::<f32>(
        &mut registry,
        "real",
        &[ColumnType::Real, ColumnType::Float],
    );
    register_scalar::<f64>(
        &mut registry,
        "double",
        &[ColumnType::Double, ColumnType::Numeric, ColumnType::Decimal],
    );

    let string = Converter::new(NamedConverter::new("string"));
    registry.register(TargetType::of::<String>(), None, string.clone());
    for column_type in [
        ColumnType::Char,
        ColumnType::Varchar,
        ColumnType::LongVarchar,
    ] {
        registry.register(
            TargetType::of::<String>(),
            Some(column_type),
            string.clone(),
        );
    }
    // CLOB columns are read through a streaming reader
    registry.register(
        TargetType::of::<String>(),
        Some(ColumnType::Clob),
        Converter::new(NamedConverter::new("clob")),
    );

    let bytes = Converter::new(NamedConverter::new("bytes"));
    registry.register(TargetType::of::<Vec<u8>>(), None, bytes.clone());
    for column_type in [ColumnType::Binary, ColumnType::VarBinary] {
        registry.register(
            TargetType::of::<Vec<u8>>(),
            Some(column_type),
            bytes.clone(),
        );
    }
    registry.register(
        TargetType::of::<Vec<u8>>(),
        Some(ColumnType::Blob),
        Converter::new(NamedConverter::new("blob")),
    );

    register_scalar::<NaiveDate>(&mut registry, "date", &[ColumnType::Date]);
    register_scalar::<NaiveTime>(&mut registry, "time", &[ColumnType::Time]);
    register_scalar::<NaiveDateTime>(&mut registry, "timestamp", &[ColumnType::Timestamp]);
    register_scalar::<DateTime<Utc>>(
        &mut registry,
        "timestamptz",
        &[ColumnType::TimestampWithTimezone],
    );
    register_scalar::<uuid::Uuid>(&mut registry, "uuid", &[ColumnType::Uuid]);
    register_scalar::<serde_json::Value>(&mut registry, "json", &[ColumnType::Json]);

    registry
}

/// Register one converter for `T`, as the default and for each column type
fn register_scalar<T: 'static>(
    registry: &mut TypeConverterRegistry,
    name: &str,
    column_types: &[ColumnType],
) {
    let converter = Converter::new(NamedConverter::new(name));
    let target = TargetType::of::<T>();
    registry.register(target, None, converter.clone());
    for column_type in column_types {
        registry.register(target, Some(*column_type), converter.clone());
    }
}
