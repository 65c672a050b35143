//! Column and target type references used by result mappings.
//!
//! - [`ColumnType`]: SQL type of the source column
//! - [`TargetType`]: Rust type of the target property

pub mod column_type;
#[doc(inline)]
pub use column_type::{ColumnType, UnknownColumnType};

pub mod target_type;
#[doc(inline)]
pub use target_type::TargetType;
