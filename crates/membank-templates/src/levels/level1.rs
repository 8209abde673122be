//! Level 1: quick bug fix. Minimal field set for simple, isolated changes.

use serde_json::json;

use crate::field::{FieldOption, FieldType, TemplateField, ValidationRule};

pub(super) fn fields() -> Vec<TemplateField> {
    vec![
        TemplateField::new(
            "title",
            FieldType::Text,
            "Title",
            "Brief title describing the bug fix",
        )
        .required()
        .rule(ValidationRule::MinLength10)
        .placeholder("e.g., Fix login button not responding"),
        TemplateField::new(
            "description",
            FieldType::MultilineText,
            "Description",
            "Detailed description of the bug and its impact",
        )
        .required()
        .rule(ValidationRule::MinLength50)
        .placeholder("Describe the bug, how to reproduce it, and its impact on users"),
        TemplateField::new(
            "solution",
            FieldType::MultilineText,
            "Solution",
            "Proposed solution or fix for the bug",
        )
        .required()
        .rule(ValidationRule::MinLength20)
        .placeholder(
            "Describe the proposed fix, including any code changes or configuration updates",
        ),
        TemplateField::new(
            "testing_notes",
            FieldType::MultilineText,
            "Testing Notes",
            "Notes on how to test the fix",
        )
        .rule(ValidationRule::MinLength10)
        .placeholder("Steps to verify the fix works correctly"),
        TemplateField::new(
            "priority",
            FieldType::Select,
            "Priority",
            "Priority level for this bug fix",
        )
        .default_value(json!("medium"))
        .option(FieldOption::new("low", "Low", "Can be fixed in next release"))
        .option(FieldOption::new("medium", "Medium", "Should be fixed soon"))
        .option(FieldOption::new("high", "High", "Needs immediate attention"))
        .option(FieldOption::new("critical", "Critical", "Blocks functionality")),
        TemplateField::new(
            "estimated_effort",
            FieldType::Select,
            "Estimated Effort",
            "Estimated time to complete the fix",
        )
        .default_value(json!("1-2 hours"))
        .option(FieldOption::new("15-30min", "15-30 minutes", "Quick fix"))
        .option(FieldOption::new("1-2 hours", "1-2 hours", "Standard fix"))
        .option(FieldOption::new("half day", "Half day", "Complex fix"))
        .option(FieldOption::new("1 day", "1 day", "Very complex fix")),
        TemplateField::new(
            "dependencies",
            FieldType::Text,
            "Dependencies",
            "Any dependencies or prerequisites for this fix",
        )
        .placeholder("e.g., Database migration, external service update, etc.")
        .help_text("Leave empty if no dependencies"),
    ]
}
