//! Integration tests for composite column mappings
//!
//! A composite column lists property/column pairs, e.g. a two-column
//! foreign key passed to a nested query. Each pair becomes a sub-mapping.

use resultmap::converter::UNKNOWN_CONVERTER_NAME;
use resultmap::{
    Converter, MappingConfiguration, MappingErrorReason, NamedConverter, ResultMappingBuilder,
    TypeConverterRegistry,
};

#[test]
fn test_composite_key_for_nested_query() {
    let configuration = MappingConfiguration::default();
    let mapping = ResultMappingBuilder::new(&configuration, "order")
        .nested_query_id("selectOrderByKey")
        .composite_column("{orderId=order_id,tenantId=tenant_id}")
        .unwrap()
        .build()
        .unwrap();

    assert!(mapping.is_composite_result());
    let parts: Vec<(&str, Option<&str>)> = mapping
        .composites()
        .iter()
        .map(|part| (part.property(), part.column()))
        .collect();
    assert_eq!(
        parts,
        vec![
            ("orderId", Some("order_id")),
            ("tenantId", Some("tenant_id")),
        ]
    );
    for part in mapping.composites() {
        assert_eq!(
            part.converter().map(|c| c.name()),
            Some(UNKNOWN_CONVERTER_NAME)
        );
        assert!(!part.is_composite_result());
    }
}

#[test]
fn test_composite_sub_mappings_inherit_lazy_default() {
    let mut configuration = MappingConfiguration::default();
    configuration.set_lazy_loading_enabled(true);

    let mapping = ResultMappingBuilder::new(&configuration, "order")
        .nested_query_id("selectOrderByKey")
        .composite_column("{orderId=order_id}")
        .unwrap()
        .lazy(false)
        .build()
        .unwrap();

    assert!(!mapping.is_lazy());
    assert!(mapping.composites()[0].is_lazy());
}

#[test]
fn test_composite_uses_configured_unknown_converter() {
    let mut registry = TypeConverterRegistry::with_defaults();
    let detect = Converter::new(NamedConverter::new("detect"));
    registry.set_unknown(detect.clone());
    let configuration = MappingConfiguration::with_registry(Default::default(), registry);

    let mapping = ResultMappingBuilder::new(&configuration, "order")
        .nested_query_id("selectOrderByKey")
        .composite_column("{orderId=order_id}")
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(mapping.composites()[0].converter(), Some(&detect));
}

#[test]
fn test_malformed_composite_column() {
    let configuration = MappingConfiguration::default();
    let err = ResultMappingBuilder::new(&configuration, "order")
        .composite_column("{orderId=order_id,tenantId}")
        .err()
        .expect("odd token count must be rejected");

    assert_eq!(
        err.reason(),
        &MappingErrorReason::MalformedCompositeColumn {
            column: "{orderId=order_id,tenantId}".to_string(),
        }
    );
    assert!(err.to_string().contains("'order'"));
}
