//! Property-based tests for complexity detection determinism

use proptest::prelude::*;

use membank_templates::{ComplexityContext, ComplexityDetector, ComplexityLevel};

// ============================================================================
// Generators for property-based testing
// ============================================================================

fn arb_description() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z ]{0,120}",
        Just("fix login button".to_string()),
        Just("implement a payment integration service".to_string()),
        Just("design a scalable enterprise microservices platform".to_string()),
    ]
}

fn arb_effort() -> impl Strategy<Value = Option<String>> {
    prop::option::of(prop::sample::select(vec![
        "2 hours".to_string(),
        "3 days".to_string(),
        "2 weeks".to_string(),
        "4 months".to_string(),
        "unknown".to_string(),
    ]))
}

fn arb_context() -> impl Strategy<Value = ComplexityContext> {
    (
        arb_effort(),
        prop::collection::vec("[a-z]{3,10}", 0..6),
        prop::option::of(0u32..60),
        prop::option::of(1u32..12),
        prop::option::of(prop::sample::select(vec![
            "urgent".to_string(),
            "asap".to_string(),
            "soon".to_string(),
            "next quarter".to_string(),
        ])),
    )
        .prop_map(
            |(estimated_effort, dependencies, affected_files, team_size, deadline)| {
                ComplexityContext {
                    estimated_effort,
                    dependencies,
                    affected_files,
                    team_size,
                    deadline,
                }
            },
        )
}

// ============================================================================
// Property: Detection determinism
// ============================================================================

proptest! {
    /// Property: for a fixed description and context, repeated analysis
    /// returns the same level, confidence, indicators, and reasoning.
    #[test]
    fn analysis_is_deterministic(
        description in arb_description(),
        context in prop::option::of(arb_context()),
    ) {
        let first = ComplexityDetector::analyze(&description, context.as_ref());
        let second = ComplexityDetector::analyze(&description, context.as_ref());

        prop_assert_eq!(first.level, second.level);
        prop_assert_eq!(first.confidence, second.confidence);
        prop_assert_eq!(first.indicators, second.indicators);
        prop_assert_eq!(first.reasoning, second.reasoning);
    }

    /// Property: the result always lands on a defined level with a
    /// confidence inside the unit interval, for any input.
    #[test]
    fn analysis_is_total_and_bounded(
        description in arb_description(),
        context in prop::option::of(arb_context()),
    ) {
        let result = ComplexityDetector::analyze(&description, context.as_ref());

        prop_assert!((1..=4).contains(&result.level.as_u8()));
        prop_assert!((0.0..=1.0).contains(&result.confidence));
    }

    /// Property: a blank description always defaults to level 1 with zero
    /// confidence, regardless of context.
    #[test]
    fn blank_description_defaults_to_level_one(context in prop::option::of(arb_context())) {
        let result = ComplexityDetector::analyze("   ", context.as_ref());

        prop_assert_eq!(result.level, ComplexityLevel::QuickFix);
        prop_assert_eq!(result.confidence, 0.0);
        prop_assert!(result.indicators.is_empty());
    }
}
