//! Level 3: intermediate feature. Adds architecture, phased delivery,
//! acceptance criteria, and a conditional creative-phases field.

use serde_json::json;

use crate::field::{FieldOption, FieldType, ShowWhen, TemplateField, ValidationRule};

pub(super) fn fields() -> Vec<TemplateField> {
    vec![
        TemplateField::new(
            "title",
            FieldType::Text,
            "Title",
            "Clear title describing the feature",
        )
        .required()
        .rule(ValidationRule::MinLength10)
        .placeholder("e.g., Implement user authentication system"),
        TemplateField::new(
            "description",
            FieldType::MultilineText,
            "Description",
            "Comprehensive description of the feature and its purpose",
        )
        .required()
        .rule(ValidationRule::MinLength100)
        .placeholder(
            "Describe the feature, its purpose, and how it fits into the overall system",
        ),
        TemplateField::new(
            "requirements",
            FieldType::MultilineText,
            "Requirements",
            "Detailed functional and non-functional requirements",
        )
        .required()
        .rule(ValidationRule::MinLength50)
        .placeholder("List all requirements including functional, performance, security, etc.")
        .help_text("Use bullet points or numbered lists for clarity"),
        TemplateField::new(
            "architecture",
            FieldType::MultilineText,
            "Architecture",
            "System architecture and design decisions",
        )
        .required()
        .rule(ValidationRule::MinLength100)
        .placeholder("Describe the architecture, components, and design patterns to be used"),
        TemplateField::new(
            "dependencies",
            FieldType::MultilineText,
            "Dependencies",
            "External dependencies and prerequisites",
        )
        .required()
        .placeholder(
            "List all dependencies including libraries, services, database changes, etc.",
        )
        .help_text("Include both technical and business dependencies"),
        TemplateField::new(
            "implementation_phases",
            FieldType::MultilineText,
            "Implementation Phases",
            "Breakdown of implementation into logical phases",
        )
        .required()
        .rule(ValidationRule::MinLength50)
        .placeholder("List implementation phases with clear deliverables")
        .help_text("Use numbered phases with clear milestones"),
        TemplateField::new(
            "testing_strategy",
            FieldType::MultilineText,
            "Testing Strategy",
            "Comprehensive testing approach and strategy",
        )
        .required()
        .rule(ValidationRule::MinLength50)
        .placeholder("Describe unit tests, integration tests, and acceptance criteria"),
        TemplateField::new(
            "acceptance_criteria",
            FieldType::MultilineText,
            "Acceptance Criteria",
            "Clear, testable acceptance criteria",
        )
        .required()
        .rule(ValidationRule::MinLength30)
        .placeholder("Define specific, measurable criteria for feature completion"),
        TemplateField::new(
            "creative_phases",
            FieldType::MultilineText,
            "Creative Phases",
            "Areas requiring creative design decisions",
        )
        .rule(ValidationRule::MinLength20)
        .placeholder("Identify components that need design decisions or creative solutions")
        .show_when(ShowWhen::new("complexity_level", json!(3))),
        TemplateField::new(
            "risk_assessment",
            FieldType::MultilineText,
            "Risk Assessment",
            "Identified risks and mitigation strategies",
        )
        .placeholder("List potential risks and how they will be mitigated")
        .help_text("Include technical, business, and timeline risks"),
        TemplateField::new(
            "performance_considerations",
            FieldType::MultilineText,
            "Performance Considerations",
            "Performance requirements and optimization strategies",
        )
        .placeholder("Describe performance requirements and optimization approaches")
        .help_text("Include response time, throughput, and scalability considerations"),
        TemplateField::new(
            "security_considerations",
            FieldType::MultilineText,
            "Security Considerations",
            "Security requirements and considerations",
        )
        .placeholder("Describe security requirements, threats, and mitigation strategies")
        .help_text("Include authentication, authorization, data protection, etc."),
        TemplateField::new(
            "estimated_effort",
            FieldType::Select,
            "Estimated Effort",
            "Estimated time to complete the feature",
        )
        .default_value(json!("1-2 weeks"))
        .option(FieldOption::new("3-5 days", "3-5 days", "Small feature"))
        .option(FieldOption::new("1-2 weeks", "1-2 weeks", "Medium feature"))
        .option(FieldOption::new("2-4 weeks", "2-4 weeks", "Large feature"))
        .option(FieldOption::new("1+ months", "1+ months", "Very large feature")),
        TemplateField::new(
            "success_metrics",
            FieldType::MultilineText,
            "Success Metrics",
            "Metrics to measure feature success",
        )
        .placeholder("Define measurable success criteria and KPIs")
        .help_text("Include both technical and business metrics"),
    ]
}
