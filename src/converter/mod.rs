//! Value converters and converter resolution.
//!
//! A converter translates between the raw value of a source column and the
//! type of a target property. Result mappings only hold converters as
//! opaque handles ([`Converter`]); converting values happens at row
//! materialization time, outside this crate.
//!
//! # Architecture
//!
//! - **Handle**: [`Converter`] wraps any [`TypeConverter`] behind an `Arc`
//! - **Registry**: [`ConverterRegistry`] resolves a converter from a target
//!   type and an optional column type; [`TypeConverterRegistry`] is the
//!   in-memory implementation
//! - **Built-ins**: converters for primitives, strings, bytes, `chrono`,
//!   `uuid` and `serde_json` types

use std::fmt;
use std::sync::Arc;

pub mod builtin;
#[doc(inline)]
pub use builtin::{NamedConverter, UNKNOWN_CONVERTER_NAME};

pub mod registry;
#[doc(inline)]
pub use registry::{ConverterRegistry, TypeConverterRegistry};

/// A pluggable component translating column values to property values
pub trait TypeConverter: Send + Sync {
    /// Name used when rendering mappings and logging resolution
    fn name(&self) -> &str;
}

/// Opaque, cheaply clonable converter handle
///
/// Two handles are equal only when they point at the same converter
/// instance.
#[derive(Clone)]
pub struct Converter(Arc<dyn TypeConverter>);

impl Converter {
    pub fn new<T: TypeConverter + 'static>(converter: T) -> Self {
        Self(Arc::new(converter))
    }

    pub fn from_arc(converter: Arc<dyn TypeConverter>) -> Self {
        Self(converter)
    }

    pub fn name(&self) -> &str {
        self.0.name()
    }

    /// Whether both handles point at the same converter instance
    pub fn ptr_eq(&self, other: &Converter) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Converter {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Converter {}

impl fmt::Debug for Converter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Converter").field(&self.name()).finish()
    }
}
