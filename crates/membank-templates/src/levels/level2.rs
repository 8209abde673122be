//! Level 2: simple enhancement. Adds requirements, implementation approach,
//! and a testing strategy.

use serde_json::json;

use crate::field::{FieldOption, FieldType, TemplateField, ValidationRule};

pub(super) fn fields() -> Vec<TemplateField> {
    vec![
        TemplateField::new(
            "title",
            FieldType::Text,
            "Title",
            "Clear title describing the enhancement",
        )
        .required()
        .rule(ValidationRule::MinLength10)
        .placeholder("e.g., Add user profile editing functionality"),
        TemplateField::new(
            "description",
            FieldType::MultilineText,
            "Description",
            "Detailed description of the enhancement and its benefits",
        )
        .required()
        .rule(ValidationRule::MinLength50)
        .placeholder("Describe the enhancement, its purpose, and expected benefits"),
        TemplateField::new(
            "requirements",
            FieldType::MultilineText,
            "Requirements",
            "Functional requirements for the enhancement",
        )
        .required()
        .rule(ValidationRule::MinLength30)
        .placeholder("List the functional requirements and specifications")
        .help_text("Use bullet points or numbered lists for clarity"),
        TemplateField::new(
            "implementation",
            FieldType::MultilineText,
            "Implementation",
            "Implementation approach and details",
        )
        .required()
        .rule(ValidationRule::MinLength30)
        .placeholder("Describe how the enhancement will be implemented"),
        TemplateField::new(
            "testing_strategy",
            FieldType::MultilineText,
            "Testing Strategy",
            "Testing approach and validation methods",
        )
        .required()
        .rule(ValidationRule::MinLength20)
        .placeholder(
            "Describe testing approach including unit tests, integration tests, and user testing",
        ),
        TemplateField::new(
            "dependencies",
            FieldType::MultilineText,
            "Dependencies",
            "Dependencies and prerequisites",
        )
        .placeholder("List any dependencies or prerequisites")
        .help_text("Include external libraries, services, or other features required"),
        TemplateField::new(
            "estimated_effort",
            FieldType::Select,
            "Estimated Effort",
            "Estimated time to complete the enhancement",
        )
        .default_value(json!("2-5 days"))
        .option(FieldOption::new("1-2 days", "1-2 days", "Small enhancement"))
        .option(FieldOption::new("2-5 days", "2-5 days", "Medium enhancement"))
        .option(FieldOption::new("1 week", "1 week", "Large enhancement"))
        .option(FieldOption::new("1-2 weeks", "1-2 weeks", "Very large enhancement")),
    ]
}
