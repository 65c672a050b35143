//! Target property type references.

use std::any::{type_name, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Reference to the declared type of a target property
///
/// Identity is the [`TypeId`]; the type name is carried for display only.
///
/// # Example
///
/// ```
/// use resultmap::TargetType;
///
/// let ty = TargetType::of::<i64>();
/// assert_eq!(ty, TargetType::of::<i64>());
/// assert_ne!(ty, TargetType::of::<i32>());
/// assert_eq!(ty.name(), "i64");
/// ```
#[derive(Clone, Copy)]
pub struct TargetType {
    id: TypeId,
    name: &'static str,
}

impl TargetType {
    /// Reference the Rust type `T`
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified type name, e.g. `chrono::naive::datetime::NaiveDateTime`
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether this references the Rust type `T`
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for TargetType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TargetType {}

impl Hash for TargetType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
