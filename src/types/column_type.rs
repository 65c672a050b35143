//! SQL column types declared on result mappings.
//!
//! A mapping may declare the type of its source column (the `column_type`
//! attribute). Converter resolution uses it to pick between several
//! converters registered for the same target type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// SQL type of a source column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ColumnType {
    Bit,
    TinyInt,
    SmallInt,
    Integer,
    BigInt,
    Float,
    Real,
    Double,
    Numeric,
    Decimal,
    Char,
    Varchar,
    LongVarchar,
    Date,
    Time,
    Timestamp,
    #[serde(rename = "TIMESTAMP_WITH_TIMEZONE")]
    TimestampWithTimezone,
    Binary,
    VarBinary,
    Blob,
    Clob,
    Boolean,
    /// Explicit SQL NULL type
    Null,
    /// Vendor-specific type with no dedicated variant
    Other,
    Uuid,
    Json,
}

impl ColumnType {
    /// Upper-case SQL name of this column type
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Bit => "BIT",
            ColumnType::TinyInt => "TINYINT",
            ColumnType::SmallInt => "SMALLINT",
            ColumnType::Integer => "INTEGER",
            ColumnType::BigInt => "BIGINT",
            ColumnType::Float => "FLOAT",
            ColumnType::Real => "REAL",
            ColumnType::Double => "DOUBLE",
            ColumnType::Numeric => "NUMERIC",
            ColumnType::Decimal => "DECIMAL",
            ColumnType::Char => "CHAR",
            ColumnType::Varchar => "VARCHAR",
            ColumnType::LongVarchar => "LONGVARCHAR",
            ColumnType::Date => "DATE",
            ColumnType::Time => "TIME",
            ColumnType::Timestamp => "TIMESTAMP",
            ColumnType::TimestampWithTimezone => "TIMESTAMP_WITH_TIMEZONE",
            ColumnType::Binary => "BINARY",
            ColumnType::VarBinary => "VARBINARY",
            ColumnType::Blob => "BLOB",
            ColumnType::Clob => "CLOB",
            ColumnType::Boolean => "BOOLEAN",
            ColumnType::Null => "NULL",
            ColumnType::Other => "OTHER",
            ColumnType::Uuid => "UUID",
            ColumnType::Json => "JSON",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a column type name is not recognised
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownColumnType(pub String);

impl fmt::Display for UnknownColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown column type: {}", self.0)
    }
}

impl std::error::Error for UnknownColumnType {}

impl FromStr for ColumnType {
    type Err = UnknownColumnType;

    /// Parse a column type name
    ///
    /// Matching is case-insensitive and accepts the common PostgreSQL
    /// spellings next to the standard SQL names:
    /// - "int" / "int4" → `Integer`
    /// - "int8" → `BigInt`
    /// - "text" → `LongVarchar`
    /// - "bool" → `Boolean`
    /// - `"timestamptz"` → `TimestampWithTimezone`
    /// - "bytea" → `VarBinary`
    /// - "jsonb" → `Json`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        let column_type = match lower.as_str() {
            "bit" => ColumnType::Bit,
            "tinyint" => ColumnType::TinyInt,
            "smallint" | "int2" => ColumnType::SmallInt,
            "integer" | "int" | "int4" => ColumnType::Integer,
            "bigint" | "int8" => ColumnType::BigInt,
            "float" => ColumnType::Float,
            "real" | "float4" => ColumnType::Real,
            "double" | "float8" | "double_precision" => ColumnType::Double,
            "numeric" => ColumnType::Numeric,
            "decimal" => ColumnType::Decimal,
            "char" => ColumnType::Char,
            "varchar" => ColumnType::Varchar,
            "longvarchar" | "text" => ColumnType::LongVarchar,
            "date" => ColumnType::Date,
            "time" | "timetz" => ColumnType::Time,
            "timestamp" | "datetime" => ColumnType::Timestamp,
            "timestamp_with_timezone" | "timestamptz" => ColumnType::TimestampWithTimezone,
            "binary" => ColumnType::Binary,
            "varbinary" | "bytea" => ColumnType::VarBinary,
            "blob" => ColumnType::Blob,
            "clob" => ColumnType::Clob,
            "boolean" | "bool" => ColumnType::Boolean,
            "null" => ColumnType::Null,
            "other" => ColumnType::Other,
            "uuid" => ColumnType::Uuid,
            "json" | "jsonb" => ColumnType::Json,
            _ => return Err(UnknownColumnType(s.to_string())),
        };
        Ok(column_type)
    }
}
