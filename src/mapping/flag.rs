//! Structural markers carried by result mappings.

use serde::{Deserialize, Serialize};

/// Structural role of a mapping within its result map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultFlag {
    /// The mapped column identifies the row (primary key)
    Id,
    /// The mapping feeds a constructor argument rather than a field
    Constructor,
}
