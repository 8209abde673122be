//! Level 4: complex system. Maximum rigor with system design, integration
//! points, and mandatory risk and security analysis.

use serde_json::json;

use crate::field::{FieldOption, FieldType, TemplateField, ValidationRule};

pub(super) fn fields() -> Vec<TemplateField> {
    vec![
        TemplateField::new(
            "title",
            FieldType::Text,
            "Title",
            "Comprehensive title describing the complex system",
        )
        .required()
        .rule(ValidationRule::MinLength10)
        .placeholder("e.g., Enterprise microservices architecture implementation"),
        TemplateField::new(
            "description",
            FieldType::MultilineText,
            "Description",
            "Comprehensive description of the complex system and its scope",
        )
        .required()
        .rule(ValidationRule::MinLength200)
        .placeholder("Describe the system, its scope, and business impact"),
        TemplateField::new(
            "requirements",
            FieldType::MultilineText,
            "Requirements",
            "Comprehensive functional and non-functional requirements",
        )
        .required()
        .rule(ValidationRule::MinLength100)
        .placeholder(
            "List all requirements including functional, performance, security, scalability",
        )
        .help_text("Include both functional and non-functional requirements"),
        TemplateField::new(
            "system_design",
            FieldType::MultilineText,
            "System Design",
            "High-level system design and architecture",
        )
        .required()
        .rule(ValidationRule::MinLength100)
        .placeholder("Describe the overall system architecture and design decisions"),
        TemplateField::new(
            "architecture",
            FieldType::MultilineText,
            "Architecture",
            "Detailed system architecture and component design",
        )
        .required()
        .rule(ValidationRule::MinLength150)
        .placeholder("Describe detailed architecture, components, and design patterns"),
        TemplateField::new(
            "dependencies",
            FieldType::MultilineText,
            "Dependencies",
            "Comprehensive dependencies and prerequisites",
        )
        .required()
        .rule(ValidationRule::MinLength50)
        .placeholder("List all dependencies including infrastructure, services, teams")
        .help_text("Include technical, business, and organizational dependencies"),
        TemplateField::new(
            "implementation_phases",
            FieldType::MultilineText,
            "Implementation Phases",
            "Detailed breakdown of implementation phases",
        )
        .required()
        .rule(ValidationRule::MinLength100)
        .placeholder("Break down implementation into detailed phases with milestones")
        .help_text("Include phases, milestones, and deliverables"),
        TemplateField::new(
            "integration_points",
            FieldType::MultilineText,
            "Integration Points",
            "System integration points and interfaces",
        )
        .required()
        .rule(ValidationRule::MinLength50)
        .placeholder("Describe all integration points and interfaces with other systems"),
        TemplateField::new(
            "performance_considerations",
            FieldType::MultilineText,
            "Performance Considerations",
            "Performance requirements and optimization strategies",
        )
        .required()
        .rule(ValidationRule::MinLength50)
        .placeholder(
            "Describe performance requirements, bottlenecks, and optimization strategies",
        ),
        TemplateField::new(
            "security_analysis",
            FieldType::MultilineText,
            "Security Analysis",
            "Security requirements and threat analysis",
        )
        .required()
        .rule(ValidationRule::MinLength50)
        .placeholder("Analyze security requirements, threats, and mitigation strategies"),
        TemplateField::new(
            "testing_strategy",
            FieldType::MultilineText,
            "Testing Strategy",
            "Comprehensive testing strategy and approach",
        )
        .required()
        .rule(ValidationRule::MinLength100)
        .placeholder(
            "Describe comprehensive testing including unit, integration, system, and acceptance testing",
        ),
        TemplateField::new(
            "risk_assessment",
            FieldType::MultilineText,
            "Risk Assessment",
            "Comprehensive risk assessment and mitigation strategies",
        )
        .required()
        .rule(ValidationRule::MinLength50)
        .placeholder("Identify and assess risks including technical, business, and timeline risks"),
        TemplateField::new(
            "success_metrics",
            FieldType::MultilineText,
            "Success Metrics",
            "Success metrics and KPIs for the system",
        )
        .required()
        .rule(ValidationRule::MinLength30)
        .placeholder("Define measurable success criteria and KPIs"),
        TemplateField::new(
            "estimated_effort",
            FieldType::Select,
            "Estimated Effort",
            "Estimated time to complete the complex system",
        )
        .default_value(json!("2-6 months"))
        .option(FieldOption::new("1-2 months", "1-2 months", "Large system"))
        .option(FieldOption::new("2-6 months", "2-6 months", "Enterprise system"))
        .option(FieldOption::new("6-12 months", "6-12 months", "Very large system"))
        .option(FieldOption::new("1+ year", "1+ year", "Massive system")),
    ]
}
