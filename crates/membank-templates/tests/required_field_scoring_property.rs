//! Property-based tests for required-field scoring monotonicity

use proptest::prelude::*;
use serde_json::json;

use membank_templates::{ComplexityLevel, Template, TemplateData, TemplateValidator};

// ============================================================================
// Generators for property-based testing
// ============================================================================

fn arb_level() -> impl Strategy<Value = ComplexityLevel> {
    prop::sample::select(ComplexityLevel::ALL.to_vec())
}

fn arb_filler_text() -> impl Strategy<Value = String> {
    // Long enough to clear every minimum-length rule, starts uppercase,
    // carries structure markers, never ends with a period.
    "[A-Z][a-z ]{210,260}[a-z]".prop_map(|s| format!("{s}\n- supporting detail"))
}

fn filled_data(template: &Template, filler: &str) -> TemplateData {
    template
        .required_field_names()
        .into_iter()
        .map(|name| (name.to_string(), json!(filler)))
        .collect()
}

// ============================================================================
// Property: Monotonic required-field scoring
// ============================================================================

proptest! {
    /// Property: for any level template, a data map missing one required
    /// field is invalid and scores strictly lower than the same map with
    /// that field populated with long valid text.
    #[test]
    fn removing_a_required_field_invalidates_and_strictly_lowers_score(
        level in arb_level(),
        filler in arb_filler_text(),
        pick in any::<prop::sample::Index>(),
    ) {
        let template = Template::new(level);
        let complete = filled_data(&template, &filler);
        let required = template.required_field_names();
        let removed = required[pick.index(required.len())].to_string();

        let mut incomplete = complete.clone();
        incomplete.remove(&removed);

        let full = TemplateValidator::validate(&complete, template.fields(), "generic");
        let partial = TemplateValidator::validate(&incomplete, template.fields(), "generic");

        prop_assert!(full.is_valid, "complete data reported errors: {:?}", full.errors);
        prop_assert!(!partial.is_valid);
        prop_assert!(partial.missing_fields.contains(&removed));
        prop_assert!(partial.score < full.score,
            "partial score {} not below full score {}", partial.score, full.score);
    }

    /// Property: a fully populated template never reports missing fields
    /// and its score stays within the 0 to 100 scale.
    #[test]
    fn complete_data_is_bounded_and_has_no_missing_fields(
        level in arb_level(),
        filler in arb_filler_text(),
    ) {
        let template = Template::new(level);
        let complete = filled_data(&template, &filler);
        let result = TemplateValidator::validate(&complete, template.fields(), "generic");

        prop_assert!(result.missing_fields.is_empty());
        prop_assert!(result.score <= result.max_score);
    }
}
