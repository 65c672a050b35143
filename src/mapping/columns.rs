//! Column list helpers for multi-column mappings.
//!
//! Column attributes may name several columns:
//! - a comma-separated list (`"user_id,tenant_id"`), as used by
//!   `column`/`foreign_column` pairs joining an additional result set
//! - a composite list of property/column pairs
//!   (`"{id=user_id,tenant=tenant_id}"`), which expands into one
//!   sub-mapping per pair

/// Number of entries in a comma-separated column list
///
/// Trailing empty entries are not counted, so `"a,b,"` has two entries.
/// A list without any comma is a single entry, even when empty.
///
/// # Example
///
/// ```
/// use resultmap::mapping::columns::column_count;
///
/// assert_eq!(column_count("user_id"), 1);
/// assert_eq!(column_count("user_id,tenant_id"), 2);
/// assert_eq!(column_count("user_id,tenant_id,"), 2);
/// ```
pub fn column_count(columns: &str) -> usize {
    if !columns.contains(',') {
        return 1;
    }
    let mut entries: Vec<&str> = columns.split(',').collect();
    while entries.last().is_some_and(|entry| entry.is_empty()) {
        entries.pop();
    }
    entries.len()
}

/// Split a comma-separated column list into trimmed, non-empty names
pub fn split_columns(columns: &str) -> impl Iterator<Item = &str> {
    columns
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
}

/// Whether a column attribute lists several columns
pub fn is_composite(column: &str) -> bool {
    column.contains('=') || column.contains(',')
}

/// Parse a composite column attribute into `(property, column)` pairs
///
/// Braces, `=`, commas and spaces all separate tokens; tokens are taken
/// two at a time. Returns `None` when a property has no matching column.
/// A non-composite attribute yields no pairs.
///
/// # Example
///
/// ```
/// use resultmap::mapping::columns::composite_pairs;
///
/// let pairs = composite_pairs("{id=author_id, tenant=tenant_id}").unwrap();
/// assert_eq!(pairs, vec![
///     ("id".to_string(), "author_id".to_string()),
///     ("tenant".to_string(), "tenant_id".to_string()),
/// ]);
/// ```
pub fn composite_pairs(column: &str) -> Option<Vec<(String, String)>> {
    if !is_composite(column) {
        return Some(Vec::new());
    }

    let tokens: Vec<&str> = column
        .split(|c: char| matches!(c, '{' | '}' | '=' | ',' | ' '))
        .filter(|token| !token.is_empty())
        .collect();

    if tokens.len() % 2 != 0 {
        return None;
    }

    Some(
        tokens
            .chunks_exact(2)
            .map(|pair| (pair[0].to_string(), pair[1].to_string()))
            .collect(),
    )
}
