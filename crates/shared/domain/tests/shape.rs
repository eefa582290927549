use prism_domain::schema::{FieldSchema, LogicalType, ModelSchema};
use prism_domain::shape::{FieldSpec, ShapeFlags, ShapeSpec, WILDCARD};

fn sample() -> ShapeSpec {
    ShapeSpec::new(vec![
        FieldSpec::named("key"),
        FieldSpec::named("recipient")
            .with_alias("vendor")
            .with_nested(vec![FieldSpec::named("display_name")]),
    ])
}

#[test]
fn with_flags_shares_field_tree() {
    let spec = sample();
    let flat = spec.with_flags(ShapeFlags::FLAT);

    assert!(flat.shares_fields_with(&spec));
    assert!(flat.is_flat());
    assert!(!flat.is_flat_lists());
    assert_ne!(flat, spec, "flags participate in equality");
    assert_eq!(flat.with_flags(ShapeFlags::empty()), spec);
}

#[test]
fn canonical_payload_includes_flags() {
    let spec = sample().with_flags(ShapeFlags::from_bools(false, true));
    let payload = serde_json::to_value(&spec).expect("serialize");

    assert_eq!(payload["isFlat"], false);
    assert_eq!(payload["isFlatLists"], true);
    assert_eq!(payload["fields"][1]["alias"], "vendor");
    assert_eq!(payload["fields"][1]["nestedFields"][0]["name"], "display_name");
    assert!(payload["fields"][0].get("alias").is_none());
}

#[test]
fn wildcard_helpers() {
    let star = FieldSpec::wildcard();
    assert_eq!(star.name, WILDCARD);
    assert!(star.matches_wildcard());
    assert!(star.alias.is_none());

    let named_star = FieldSpec::named("*");
    assert!(named_star.matches_wildcard(), "a field literally named * is a wildcard");
}

#[test]
fn empty_nested_list_is_not_nesting() {
    let field = FieldSpec::named("recipient").with_nested(Vec::new());
    assert!(field.nested().is_none());
}

#[test]
fn logical_type_round_trips_identifiers() {
    for raw in ["str", "int", "float", "bool", "Decimal", "date", "datetime", "dict", "Any"] {
        let ty = LogicalType::from(raw);
        assert!(ty.is_primitive(), "{raw} should be primitive");
        assert_eq!(ty.to_string(), raw);
    }

    let record = LogicalType::from("RecipientProfile");
    assert_eq!(record.record_name(), Some("RecipientProfile"));
    assert!(!record.is_primitive());
}

#[test]
fn nested_model_name_prefers_explicit_override() {
    let inferred = FieldSchema::new("recipient", "RecipientProfile");
    assert_eq!(inferred.nested_model_name(), Some("RecipientProfile"));

    let explicit = FieldSchema::new("competition_details", "dict").nested_model("CompetitionDetails");
    assert_eq!(explicit.nested_model_name(), Some("CompetitionDetails"));

    let blank = FieldSchema::new("status", "str").nested_model("  ");
    assert_eq!(blank.nested_model_name(), None);
}

#[test]
fn model_schema_keeps_declaration_order() {
    let schema = ModelSchema::new(
        "Thing",
        [
            FieldSchema::new("zeta", "str"),
            FieldSchema::new("alpha", "int"),
            FieldSchema::new("zeta", "Decimal"),
        ],
    );

    let declared: Vec<&str> = schema.fields().iter().map(|f| f.name.as_str()).collect();
    assert_eq!(declared, ["zeta", "alpha"]);
    assert_eq!(schema.field("zeta").map(|f| &f.ty), Some(&LogicalType::Decimal));
    assert_eq!(schema.sorted_field_names(), ["alpha", "zeta"]);
}

#[test]
fn display_renders_canonical_syntax() {
    assert_eq!(sample().to_string(), "key,recipient::vendor(display_name)");

    let spec = ShapeSpec::new(vec![
        FieldSpec::wildcard(),
        FieldSpec::named("tags").with_nested(Vec::new()),
    ]);
    assert_eq!(spec.to_string(), "*,tags()");
}
