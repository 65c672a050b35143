//! Span helpers for the optional `tracing` feature.

use tracing::Span;

/// Span covering one `ResultMappingBuilder::build()` call
pub fn build_result_mapping_span(property: &str) -> Span {
    tracing::debug_span!("resultmap.build", property = %property)
}

/// Span covering a late-binding update of a built mapping
pub fn resolve_result_mapping_span(property: &str) -> Span {
    tracing::trace_span!("resultmap.resolve", property = %property)
}
