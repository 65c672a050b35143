//! Integration tests for ResultMappingBuilder
//!
//! These tests drive the public builder API end to end against a
//! `MappingConfiguration` and against a custom `MappingContext`, covering
//! converter resolution and every validation rule.

use resultmap::mapping::columns::column_count;
use resultmap::{
    ColumnType, Converter, ConverterRegistry, MappingConfiguration, MappingContext,
    MappingErrorReason, MappingSettings, NamedConverter, ResultFlag, ResultMapping,
    ResultMappingBuilder, TargetType, TypeConverterRegistry,
};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

// ============================================================================
// Test Context
// ============================================================================

#[derive(Debug)]
struct Money;

/// Context whose registry only knows `Money`
struct MoneyContext {
    registry: TypeConverterRegistry,
    money: Converter,
}

impl MoneyContext {
    fn new() -> Self {
        let money = Converter::new(NamedConverter::new("money"));
        let mut registry = TypeConverterRegistry::new();
        registry.register(
            TargetType::of::<Money>(),
            Some(ColumnType::Numeric),
            money.clone(),
        );
        Self { registry, money }
    }
}

impl MappingContext for MoneyContext {
    fn is_lazy_loading_enabled(&self) -> bool {
        true
    }

    fn converter_registry(&self) -> &dyn ConverterRegistry {
        &self.registry
    }
}

fn hash_of(mapping: &ResultMapping) -> u64 {
    let mut hasher = DefaultHasher::new();
    mapping.hash(&mut hasher);
    hasher.finish()
}

// ============================================================================
// Converter Resolution
// ============================================================================

#[test]
fn test_registry_converter_is_used() {
    let context = MoneyContext::new();
    let money = TargetType::of::<Money>();
    let mapping = ResultMappingBuilder::with_target_type(&context, "price", "price", money)
        .column_type(ColumnType::Numeric)
        .build()
        .expect("money mapping should build");

    assert_eq!(mapping.converter(), Some(&context.money));
    assert_eq!(mapping.target_type(), Some(TargetType::of::<Money>()));
    assert_eq!(mapping.column_type(), Some(ColumnType::Numeric));
    // Lazy default taken from the context
    assert!(mapping.is_lazy());
}

#[test]
fn test_builtin_converters_through_configuration() {
    let configuration = MappingConfiguration::default();
    let cases = [
        (TargetType::of::<i64>(), Some(ColumnType::BigInt), "bigint"),
        (TargetType::of::<uuid::Uuid>(), None, "uuid"),
        (TargetType::of::<chrono::NaiveDate>(), Some(ColumnType::Date), "date"),
        (TargetType::of::<serde_json::Value>(), Some(ColumnType::Json), "json"),
    ];

    for (target, column_type, expected) in cases {
        let mut builder =
            ResultMappingBuilder::with_target_type(&configuration, "value", "value", target);
        if let Some(column_type) = column_type {
            builder = builder.column_type(column_type);
        }
        let mapping = builder.build().expect("built-in type should resolve");
        assert_eq!(mapping.converter().map(|c| c.name()), Some(expected));
    }
}

#[test]
fn test_custom_converter_registered_on_configuration() {
    let mut configuration = MappingConfiguration::default();
    let target = TargetType::of::<Money>();
    let money = Converter::new(NamedConverter::new("money"));
    configuration.registry_mut().register(target, None, money.clone());

    let mapping = ResultMappingBuilder::with_target_type(&configuration, "price", "price", target)
        .build()
        .unwrap();
    assert_eq!(mapping.converter(), Some(&money));
}

// ============================================================================
// Validation Rules
// ============================================================================

#[test]
fn test_conflicting_nested_mapping_regardless_of_other_fields() {
    let context = MoneyContext::new();
    let variants = [
        ResultMappingBuilder::new(&context, "author"),
        ResultMappingBuilder::new(&context, "author").column("author_id"),
        ResultMappingBuilder::with_converter(
            &context,
            "author",
            "author_id",
            context.money.clone(),
        ),
        ResultMappingBuilder::new(&context, "author")
            .result_set("authors")
            .column("a,b")
            .foreign_column("x"),
    ];

    for builder in variants {
        let err = builder
            .nested_query_id("selectAuthor")
            .nested_result_map_id("AuthorMap")
            .build()
            .unwrap_err();
        assert_eq!(err.reason(), &MappingErrorReason::ConflictingNestedMapping);
        assert_eq!(err.property(), "author");
        assert!(err.to_string().contains("author"));
    }
}

#[test]
fn test_missing_column() {
    let context = MoneyContext::new();
    let err = ResultMappingBuilder::new(&context, "price")
        .converter(context.money.clone())
        .build()
        .unwrap_err();
    assert_eq!(err.reason(), &MappingErrorReason::MissingColumn);
    assert!(err.to_string().contains("price"));
}

#[test]
fn test_unresolved_converter() {
    let configuration = MappingConfiguration::default();
    let money = TargetType::of::<Money>();
    let err = ResultMappingBuilder::with_target_type(&configuration, "price", "price", money)
        .build()
        .unwrap_err();
    assert_eq!(err.reason(), &MappingErrorReason::UnresolvedConverter);
    assert_eq!(err.to_string(), "No converter found for property 'price'");
}

#[test]
fn test_result_set_arity_mismatch() {
    let configuration = MappingConfiguration::default();
    let err = ResultMappingBuilder::new(&configuration, "posts")
        .nested_result_map_id("PostMap")
        .result_set("rs1")
        .column("a,b")
        .foreign_column("x")
        .build()
        .unwrap_err();
    assert_eq!(
        err.reason(),
        &MappingErrorReason::ResultSetArityMismatch {
            columns: 2,
            foreign_columns: 1,
        }
    );
}

#[test]
fn test_nested_result_map_without_column_or_converter() {
    let configuration = MappingConfiguration::default();
    let mapping = ResultMappingBuilder::new(&configuration, "author")
        .nested_result_map_id("AuthorMap")
        .build()
        .expect("nested result maps need no column or converter");

    assert_eq!(mapping.nested_result_map_id(), Some("AuthorMap"));
    assert!(mapping.column().is_none());
    assert!(mapping.converter().is_none());
    assert!(!mapping.is_composite_result());
}

#[test]
fn test_built_mappings_uphold_invariants() {
    let configuration = MappingConfiguration::new(MappingSettings {
        lazy_loading_enabled: true,
    });
    let built: Vec<ResultMapping> = vec![
        ResultMappingBuilder::with_target_type(&configuration, "id", "id", TargetType::of::<i32>())
            .flag(ResultFlag::Id)
            .build(),
        ResultMappingBuilder::new(&configuration, "author")
            .column("author_id")
            .nested_query_id("selectAuthor")
            .build(),
        ResultMappingBuilder::new(&configuration, "posts")
            .nested_result_map_id("PostMap")
            .result_set("posts")
            .column("id")
            .foreign_column("author_id")
            .build(),
        // An empty middle entry still counts toward the arity
        ResultMappingBuilder::new(&configuration, "tags")
            .nested_result_map_id("TagMap")
            .result_set("tags")
            .column("a,,b")
            .foreign_column("x,y,z")
            .build(),
    ]
    .into_iter()
    .collect::<Result<_, _>>()
    .unwrap();

    for mapping in &built {
        assert!(
            !(mapping.nested_query_id().is_some() && mapping.nested_result_map_id().is_some())
        );
        assert!(mapping.converter().is_some() || mapping.is_nested());
        assert!(
            mapping.column().is_some()
                || mapping.nested_result_map_id().is_some()
                || mapping.is_composite_result()
        );
        if mapping.result_set().is_some() {
            assert_eq!(
                mapping.column().map_or(0, column_count),
                mapping.foreign_column().map_or(0, column_count)
            );
        }
        assert!(mapping.is_lazy());
    }
}

// ============================================================================
// Equality, Sharing and Read-only Views
// ============================================================================

#[test]
fn test_equality_quirk_same_property_different_column() {
    // Intentional: equality and hashing only look at the property name
    let configuration = MappingConfiguration::default();
    let string = TargetType::of::<String>();
    let a = ResultMappingBuilder::with_target_type(&configuration, "name", "first_name", string)
        .build()
        .unwrap();
    let b = ResultMappingBuilder::with_target_type(&configuration, "name", "last_name", string)
        .column_type(ColumnType::Varchar)
        .build()
        .unwrap();

    assert_ne!(a.column(), b.column());
    assert_eq!(a, b);
    assert_eq!(hash_of(&a), hash_of(&b));

    let set: HashSet<ResultMapping> = [a, b].into_iter().collect();
    assert_eq!(set.len(), 1);
}

#[test]
fn test_flags_and_composites_are_frozen() {
    let configuration = MappingConfiguration::default();
    let mut flags = vec![ResultFlag::Id];
    let id_type = TargetType::of::<i64>();
    let mapping = ResultMappingBuilder::with_target_type(&configuration, "id", "id", id_type)
        .flags(flags.clone())
        .build()
        .unwrap();

    // The caller's vector is independent of the built mapping
    flags.push(ResultFlag::Constructor);
    assert_eq!(mapping.flags(), &[ResultFlag::Id]);

    // Clones share the same frozen slices
    let copy = mapping.clone();
    assert!(std::ptr::eq(mapping.flags(), copy.flags()));
    assert!(std::ptr::eq(mapping.composites(), copy.composites()));
}

#[test]
fn test_built_mapping_is_shareable_across_threads() {
    let configuration = MappingConfiguration::default();
    let mapping = Arc::new(
        ResultMappingBuilder::with_target_type(&configuration, "id", "id", TargetType::of::<i64>())
            .build()
            .unwrap(),
    );

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let mapping = Arc::clone(&mapping);
            std::thread::spawn(move || mapping.property().to_string())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), "id");
    }
}
