//! Property-based tests for the schema export round trip

use proptest::prelude::*;
use serde_json::json;

use membank_templates::{
    ComplexityLevel, FieldOption, FieldType, ShowWhen, Template, TemplateField, ValidationRule,
};

// ============================================================================
// Generators for property-based testing
// ============================================================================

fn arb_field_name() -> impl Strategy<Value = String> {
    "[a-z][a-z_]{2,20}".prop_map(|s| s)
}

fn arb_field_type() -> impl Strategy<Value = FieldType> {
    prop::sample::select(vec![
        FieldType::Text,
        FieldType::MultilineText,
        FieldType::Number,
        FieldType::Boolean,
        FieldType::Select,
        FieldType::MultiSelect,
        FieldType::Date,
        FieldType::Email,
        FieldType::Url,
        FieldType::List,
        FieldType::Map,
    ])
}

fn arb_rule() -> impl Strategy<Value = ValidationRule> {
    prop::sample::select(vec![
        ValidationRule::NonEmptyString,
        ValidationRule::MinLength10,
        ValidationRule::MinLength20,
        ValidationRule::MinLength30,
        ValidationRule::MinLength50,
        ValidationRule::MinLength100,
        ValidationRule::MinLength150,
        ValidationRule::MinLength200,
        ValidationRule::MaxLength500,
        ValidationRule::PositiveInteger,
        ValidationRule::ValidEmail,
        ValidationRule::ValidUrl,
        ValidationRule::NoSpecialChars,
        ValidationRule::Alphanumeric,
    ])
}

fn arb_field() -> impl Strategy<Value = TemplateField> {
    (
        arb_field_name(),
        arb_field_type(),
        any::<bool>(),
        prop::collection::vec(arb_rule(), 0..4),
        prop::collection::vec(("[a-z]{1,8}", "[A-Za-z ]{1,16}"), 0..3),
        prop::option::of(("[a-z_]{3,12}", 1u8..=4)),
    )
        .prop_map(|(name, field_type, required, rules, options, condition)| {
            let mut field = TemplateField::new(name, field_type, "Label", "A generated field");
            if required {
                field = field.required();
            }
            for rule in rules {
                field = field.rule(rule);
            }
            for (value, label) in options {
                field = field.option(FieldOption::new(value, label, "generated option"));
            }
            if let Some((depends_on, level)) = condition {
                field = field.show_when(ShowWhen::new(depends_on, json!(level)));
            }
            field
        })
}

// ============================================================================
// Property: Schema round trip
// ============================================================================

proptest! {
    /// Property: exporting a field's schema and rebuilding a field from it
    /// reproduces the name, required flag, field type, and rule set.
    #[test]
    fn exported_schema_reproduces_field_identity(field in arb_field()) {
        let rebuilt = TemplateField::from_schema(field.schema());

        prop_assert_eq!(&rebuilt.name, &field.name);
        prop_assert_eq!(rebuilt.required, field.required);
        prop_assert_eq!(rebuilt.field_type, field.field_type);
        prop_assert_eq!(&rebuilt.validation_rules, &field.validation_rules);
        prop_assert_eq!(&rebuilt.show_when, &field.show_when);
    }

    /// Property: the schema survives JSON serialization unchanged, so the
    /// round trip holds across the external tooling boundary too.
    #[test]
    fn schema_survives_json_serialization(field in arb_field()) {
        let schema = field.schema();
        let text = serde_json::to_string(&schema).unwrap();
        let parsed = serde_json::from_str(&text).unwrap();
        prop_assert_eq!(schema, parsed);
    }
}

#[test]
fn built_in_level_schemas_round_trip() {
    for level in ComplexityLevel::ALL {
        let template = Template::new(level);
        for field in template.fields() {
            let rebuilt = TemplateField::from_schema(field.schema());
            assert_eq!(&rebuilt, field, "round trip broke for {}", field.name);
        }
    }
}
