//! Validation and scoring of filled template data
//!
//! Produces a complete result per call: numeric score, hard errors, advisory
//! warnings and suggestions. Errors always force the verdict to invalid;
//! warnings and suggestions never do. Validation never fails as an operation,
//! so callers can always render feedback.

use serde_json::Value;

use crate::field::{is_blank, TemplateField};
use crate::template::TemplateData;

/// Outcome of validating a data map against a template's fields.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ValidationResult {
    /// True iff `errors` is empty
    pub is_valid: bool,
    /// Weighted composite score, 0 to 100
    pub score: u32,
    /// Upper bound of the score scale
    pub max_score: u32,
    /// Hard failures; any entry forces `is_valid` to false
    pub errors: Vec<String>,
    /// Advisory issues that do not affect validity
    pub warnings: Vec<String>,
    /// Improvement suggestions
    pub suggestions: Vec<String>,
    /// Required fields that failed validation
    pub missing_fields: Vec<String>,
    /// Optional fields that failed validation
    pub incomplete_fields: Vec<String>,
}

/// Outcome of checking structural/format compliance rules.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ComplianceResult {
    /// True iff no rule was violated
    pub compliant: bool,
    /// `max(0, 100 - 20 * violations)`
    pub compliance_score: u32,
    /// Violated rules
    pub violations: Vec<String>,
    /// How to address each violation
    pub recommendations: Vec<String>,
}

const STRUCTURE_MARKERS: [&str; 4] = ["-", "*", "1.", "\u{2022}"];

/// Scores filled template data and checks per-type compliance rules.
pub struct TemplateValidator;

impl TemplateValidator {
    /// Validate a data map against a field set.
    ///
    /// The score is a weighted composite of completeness, quality, structure,
    /// and compliance sub-scores rather than an average of field scores.
    pub fn validate(
        data: &TemplateData,
        fields: &[TemplateField],
        template_type: &str,
    ) -> ValidationResult {
        let mut errors = Vec::new();
        let mut missing_fields = Vec::new();
        let mut incomplete_fields = Vec::new();

        for field in fields {
            if !field.should_show(data) {
                continue;
            }
            if let Err(message) = field.validate_value(data.get(&field.name)) {
                errors.push(format!("{}: {message}", field.label));
                if field.required {
                    missing_fields.push(field.name.clone());
                } else {
                    incomplete_fields.push(field.name.clone());
                }
            }
        }

        errors.extend(Self::template_rule_errors(data, template_type));

        let warnings = Self::warnings(data);
        let suggestions = Self::suggestions(data, template_type);
        let score = Self::weighted_score(data, fields);

        ValidationResult {
            is_valid: errors.is_empty(),
            score,
            max_score: 100,
            errors,
            warnings,
            suggestions,
            missing_fields,
            incomplete_fields,
        }
    }

    /// Quality score for a single field value, 0 to 100.
    pub fn field_score(field: &TemplateField, value: Option<&Value>) -> u32 {
        if is_blank(value) {
            return if field.required { 0 } else { 50 };
        }

        let mut score = 50;
        if let Some(Value::String(s)) = value {
            let len = s.chars().count();
            if len >= 50 {
                score += 30;
            } else if len >= 20 {
                score += 20;
            } else if len >= 10 {
                score += 10;
            }
            if s.contains('\n') || s.contains('-') || s.contains('*') {
                score += 10;
            }
        }
        if field.required {
            score += 10;
        }
        score.min(100)
    }

    /// Check structural/format compliance rules for a template type.
    pub fn check_compliance(data: &TemplateData, template_type: &str) -> ComplianceResult {
        let mut violations = Vec::new();
        let mut recommendations = Vec::new();

        match template_type {
            "spec" => {
                if !Self::user_stories_well_formed(data) {
                    violations.push("User stories should follow standard format".to_string());
                    recommendations.push(
                        "Use format: 'As a [user], I want [goal] so that [benefit]'".to_string(),
                    );
                }
                if is_blank(data.get("acceptance_criteria")) {
                    violations.push("Acceptance criteria must be present".to_string());
                    recommendations.push("Define clear, testable acceptance criteria".to_string());
                }
            }
            "plan" => {
                if let Some(Value::Array(phases)) = data.get("phases") {
                    if !phases.is_empty() && !Self::phases_logically_ordered(phases) {
                        violations
                            .push("Implementation phases should be logically ordered".to_string());
                        recommendations.push(
                            "Order phases: Planning -> Implementation -> Testing -> Deployment"
                                .to_string(),
                        );
                    }
                }
            }
            _ => {}
        }

        let compliance_score = 100_u32.saturating_sub(violations.len() as u32 * 20);

        ComplianceResult {
            compliant: violations.is_empty(),
            compliance_score,
            violations,
            recommendations,
        }
    }

    fn template_rule_errors(data: &TemplateData, template_type: &str) -> Vec<String> {
        let mut errors = Vec::new();

        match template_type {
            "spec" => {
                if is_blank(data.get("title")) {
                    errors.push("Title is required".to_string());
                }
                if text(data, "description").chars().count() < 50 {
                    errors.push("Description must be at least 50 characters long".to_string());
                }
                let requirements = text(data, "requirements");
                if !requirements.is_empty()
                    && !STRUCTURE_MARKERS.iter().any(|m| requirements.contains(m))
                {
                    errors.push(
                        "Requirements should be structured with bullet points or numbering"
                            .to_string(),
                    );
                }
                if is_blank(data.get("acceptance_criteria")) {
                    errors.push("Acceptance criteria must be defined".to_string());
                }
            }
            "plan" => {
                if text(data, "objectives").chars().count() < 20 {
                    errors.push("Objectives must be clear and detailed".to_string());
                }
                if is_blank(data.get("phases")) {
                    errors.push("Implementation phases must be defined".to_string());
                }
                if matches!(data.get("dependencies"), Some(Value::String(s)) if s.is_empty()) {
                    errors.push(
                        "Dependencies should be identified (use 'None' if none)".to_string(),
                    );
                }
            }
            "task" => {
                if is_blank(data.get("title")) {
                    errors.push("Title is required".to_string());
                }
                if text(data, "description").chars().count() < 10 {
                    errors.push("Description must be at least 10 characters long".to_string());
                }
                if is_blank(data.get("acceptance_criteria")) {
                    errors.push("Acceptance criteria must be defined".to_string());
                }
            }
            _ => {}
        }

        errors
    }

    fn warnings(data: &TemplateData) -> Vec<String> {
        let mut warnings = Vec::new();

        for field_name in ["testing_notes", "risks", "assumptions", "constraints"] {
            if is_blank(data.get(field_name)) {
                warnings.push(format!("Consider adding {}", field_name.replace('_', " ")));
            }
        }

        let description = text(data, "description");
        if !description.is_empty() && description.chars().count() < 100 {
            warnings.push("Description could be more detailed".to_string());
        }

        if complexity_level(data) >= 3 {
            if is_blank(data.get("architecture")) {
                warnings.push("Architecture section recommended for complex tasks".to_string());
            }
            if is_blank(data.get("dependencies")) {
                warnings.push("Dependencies should be identified for complex tasks".to_string());
            }
        }

        warnings
    }

    fn suggestions(data: &TemplateData, template_type: &str) -> Vec<String> {
        let mut suggestions = Vec::new();

        match template_type {
            "spec" => {
                if is_blank(data.get("user_stories")) {
                    suggestions.push(
                        "Consider adding user stories for better requirement clarity".to_string(),
                    );
                }
                if is_blank(data.get("non_functional_requirements")) {
                    suggestions.push(
                        "Include non-functional requirements (performance, security, etc.)"
                            .to_string(),
                    );
                }
            }
            "plan" => {
                if is_blank(data.get("risk_assessment")) {
                    suggestions.push("Add risk assessment and mitigation strategies".to_string());
                }
                if is_blank(data.get("success_metrics")) {
                    suggestions.push("Define success metrics and acceptance criteria".to_string());
                }
            }
            "task" => {
                if is_blank(data.get("testing_strategy")) {
                    suggestions.push("Include testing strategy and approach".to_string());
                }
                if is_blank(data.get("rollback_plan")) {
                    suggestions.push("Consider adding rollback plan for complex changes".to_string());
                }
            }
            _ => {}
        }

        if complexity_level(data) >= 3 {
            suggestions.push("Consider breaking down into smaller, manageable tasks".to_string());
            suggestions.push("Add creative phases for complex design decisions".to_string());
        }

        suggestions
    }

    fn weighted_score(data: &TemplateData, fields: &[TemplateField]) -> u32 {
        let completeness = Self::completeness_score(data, fields);
        let quality = Self::quality_score(data);
        let structure = Self::structure_score(data);
        let compliance = Self::compliance_component(data);

        (completeness * 40 + quality * 30 + structure * 20 + compliance * 10) / 100
    }

    fn completeness_score(data: &TemplateData, fields: &[TemplateField]) -> u32 {
        let required: Vec<_> = fields
            .iter()
            .filter(|f| f.required && f.should_show(data))
            .collect();
        if required.is_empty() {
            return 100;
        }
        let filled = required
            .iter()
            .filter(|f| !is_blank(data.get(&f.name)))
            .count();
        (filled * 100 / required.len()) as u32
    }

    fn quality_score(data: &TemplateData) -> u32 {
        let mut satisfied = 0;
        let mut total = 0;

        let description = text(data, "description");
        if !description.is_empty() {
            total += 1;
            if description.chars().count() >= 50 {
                satisfied += 1;
            }
        }

        for field_name in ["requirements", "acceptance_criteria", "phases"] {
            let value = text(data, field_name);
            if !value.is_empty() {
                total += 1;
                if STRUCTURE_MARKERS.iter().any(|m| value.contains(m)) {
                    satisfied += 1;
                }
            }
        }

        if complexity_level(data) >= 3 {
            total += 1;
            if !is_blank(data.get("architecture")) || !is_blank(data.get("dependencies")) {
                satisfied += 1;
            }
        }

        if total == 0 {
            50
        } else {
            (satisfied * 100 / total) as u32
        }
    }

    fn structure_score(data: &TemplateData) -> u32 {
        let mut satisfied = 0;
        let mut total = 0;

        for field_name in ["title", "description", "requirements"] {
            let value = text(data, field_name);
            if !value.is_empty() {
                total += 1;
                let starts_upper = value.chars().next().is_some_and(|c| c.is_uppercase());
                if starts_upper && !value.ends_with('.') {
                    satisfied += 1;
                }
            }
        }

        if let Some(Value::Array(phases)) = data.get("phases") {
            if !phases.is_empty() {
                total += 1;
                if phases.len() > 1 {
                    satisfied += 1;
                }
            }
        }

        if total == 0 {
            50
        } else {
            (satisfied * 100 / total) as u32
        }
    }

    fn compliance_component(data: &TemplateData) -> u32 {
        let mut satisfied = 0;

        if !is_blank(data.get("title")) && !is_blank(data.get("description")) {
            satisfied += 1;
        }
        if !is_blank(data.get("acceptance_criteria")) {
            satisfied += 1;
        }
        if complexity_level(data) >= 2
            && (!is_blank(data.get("dependencies")) || !is_blank(data.get("phases")))
        {
            satisfied += 1;
        }

        satisfied * 100 / 3
    }

    fn user_stories_well_formed(data: &TemplateData) -> bool {
        let user_stories = text(data, "user_stories");
        if user_stories.is_empty() {
            return true;
        }
        user_stories.contains("As a") && user_stories.contains("I want")
    }

    fn phases_logically_ordered(phases: &[Value]) -> bool {
        let expected = ["planning", "implementation", "testing", "deployment"];
        let lowered: Vec<String> = phases
            .iter()
            .map(|p| p.as_str().unwrap_or("").to_lowercase())
            .collect();

        for (idx, stage) in expected.iter().enumerate() {
            if idx < lowered.len() && lowered[idx].contains(stage) {
                continue;
            }
            if lowered.iter().any(|phase| phase.contains(stage)) {
                return false;
            }
        }
        true
    }
}

fn text<'a>(data: &'a TemplateData, field_name: &str) -> &'a str {
    data.get(field_name).and_then(Value::as_str).unwrap_or("")
}

fn complexity_level(data: &TemplateData) -> u64 {
    data.get("complexity_level")
        .and_then(Value::as_u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::complexity::ComplexityLevel;
    use crate::field::{FieldType, TemplateField, ValidationRule};
    use crate::template::Template;

    use super::*;

    fn data(entries: &[(&str, Value)]) -> TemplateData {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn level1_happy_path() -> TemplateData {
        data(&[
            ("title", json!("Fix login button not responding")),
            (
                "description",
                json!("The login button on the landing page ignores clicks for signed-out users"),
            ),
            ("solution", json!("Null-check the handler before binding")),
        ])
    }

    #[test]
    fn level_one_happy_path_is_valid() {
        let template = Template::new(ComplexityLevel::QuickFix);
        let result = TemplateValidator::validate(&level1_happy_path(), template.fields(), "generic");
        assert!(result.is_valid, "errors: {:?}", result.errors);
        assert!(result.missing_fields.is_empty());
    }

    #[test]
    fn under_length_description_names_the_field() {
        let template = Template::new(ComplexityLevel::QuickFix);
        let mut input = level1_happy_path();
        input.insert("description".to_string(), json!("bug"));
        let result = TemplateValidator::validate(&input, template.fields(), "generic");
        assert!(!result.is_valid);
        assert!(result.errors.iter().any(|e| e.contains("Description")));
    }

    #[test]
    fn missing_required_field_invalidates_and_lowers_score() {
        let template = Template::new(ComplexityLevel::QuickFix);
        let mut incomplete = level1_happy_path();
        incomplete.remove("solution");

        let with = TemplateValidator::validate(&level1_happy_path(), template.fields(), "generic");
        let without = TemplateValidator::validate(&incomplete, template.fields(), "generic");

        assert!(!without.is_valid);
        assert!(without.missing_fields.contains(&"solution".to_string()));
        assert!(without.score < with.score);
    }

    #[test]
    fn errors_force_invalid_regardless_of_score() {
        let template = Template::new(ComplexityLevel::QuickFix);
        // Well-filled fields, but the "spec" template type demands acceptance criteria.
        let result = TemplateValidator::validate(&level1_happy_path(), template.fields(), "spec");
        assert!(!result.is_valid);
        assert!(result
            .errors
            .iter()
            .any(|e| e.contains("Acceptance criteria")));
    }

    #[test]
    fn warnings_do_not_affect_validity() {
        let template = Template::new(ComplexityLevel::QuickFix);
        let result = TemplateValidator::validate(&level1_happy_path(), template.fields(), "generic");
        assert!(result.is_valid);
        assert!(!result.warnings.is_empty());
    }

    #[test]
    fn hidden_conditional_fields_are_not_validated() {
        let template = Template::new(ComplexityLevel::IntermediateFeature);
        // creative_phases value is under its 20-char minimum, but the gate
        // is closed so the rule must not run.
        let input = data(&[("creative_phases", json!("short"))]);
        let result = TemplateValidator::validate(&input, template.fields(), "generic");
        assert!(!result
            .errors
            .iter()
            .any(|e| e.contains("Creative Phases")));
    }

    #[test]
    fn field_score_rewards_length_structure_and_requiredness() {
        let required = TemplateField::new("description", FieldType::MultilineText, "Description", "")
            .required()
            .rule(ValidationRule::MinLength50);
        let optional = TemplateField::new("notes", FieldType::MultilineText, "Notes", "");

        assert_eq!(TemplateValidator::field_score(&required, None), 0);
        assert_eq!(TemplateValidator::field_score(&optional, None), 50);

        let long_structured = json!(format!("- {}", "x".repeat(60)));
        assert_eq!(
            TemplateValidator::field_score(&required, Some(&long_structured)),
            100
        );
        let short = json!("short text");
        assert_eq!(TemplateValidator::field_score(&optional, Some(&short)), 60);
    }

    #[test]
    fn score_is_bounded_and_weighted() {
        let template = Template::new(ComplexityLevel::QuickFix);
        let empty = TemplateData::new();
        let empty_result = TemplateValidator::validate(&empty, template.fields(), "generic");
        let full_result =
            TemplateValidator::validate(&level1_happy_path(), template.fields(), "generic");

        assert!(empty_result.score <= 100);
        assert!(full_result.score <= 100);
        assert!(full_result.score > empty_result.score);
    }

    #[test]
    fn compliance_score_drops_twenty_per_violation() {
        let missing_criteria = data(&[("user_stories", json!("As a user, I want speed"))]);
        let result = TemplateValidator::check_compliance(&missing_criteria, "spec");
        assert!(!result.compliant);
        assert_eq!(result.compliance_score, 80);
        assert_eq!(result.violations.len(), 1);
        assert_eq!(result.recommendations.len(), 1);
    }

    #[test]
    fn malformed_user_stories_violate_spec_compliance() {
        let input = data(&[
            ("user_stories", json!("make it faster please")),
            ("acceptance_criteria", json!("- loads under 1s")),
        ]);
        let result = TemplateValidator::check_compliance(&input, "spec");
        assert!(!result.compliant);
        assert_eq!(result.compliance_score, 80);
    }

    #[test]
    fn out_of_order_phases_violate_plan_compliance() {
        let ordered = data(&[(
            "phases",
            json!(["Planning", "Implementation", "Testing", "Deployment"]),
        )]);
        assert!(TemplateValidator::check_compliance(&ordered, "plan").compliant);

        let shuffled = data(&[(
            "phases",
            json!(["Testing", "Planning", "Deployment", "Implementation"]),
        )]);
        assert!(!TemplateValidator::check_compliance(&shuffled, "plan").compliant);
    }

    #[test]
    fn compliance_score_never_goes_negative() {
        let empty = TemplateData::new();
        let result = TemplateValidator::check_compliance(&empty, "spec");
        assert!(result.compliance_score <= 100);
    }
}
