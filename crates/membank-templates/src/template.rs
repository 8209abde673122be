//! Template model: a named collection of fields bound to one complexity level

use serde_json::Value;

use crate::complexity::ComplexityLevel;
use crate::error::{Result, TemplateError};
use crate::field::{is_blank, TemplateField};
use crate::levels::fields_for_level;

/// Form data supplied by a caller, keyed by field name.
pub type TemplateData = serde_json::Map<String, Value>;

/// A named, versionless collection of fields bound to one complexity level.
///
/// Instantiated per generation request; stateless beyond its field
/// definitions. Only rendered content or validation results are persisted,
/// never the template itself.
#[derive(Debug, Clone)]
pub struct Template {
    complexity_level: ComplexityLevel,
    template_type: String,
    fields: Vec<TemplateField>,
}

impl Template {
    /// Build the standard template for a complexity level.
    pub fn new(level: ComplexityLevel) -> Self {
        Self {
            complexity_level: level,
            template_type: level.template_type().to_string(),
            fields: fields_for_level(level),
        }
    }

    /// Build a template from an explicit field set. Fails when two fields
    /// share a name, which indicates a defect in the calling code.
    pub fn from_fields(
        level: ComplexityLevel,
        template_type: impl Into<String>,
        fields: Vec<TemplateField>,
    ) -> Result<Self> {
        for (idx, field) in fields.iter().enumerate() {
            if fields[..idx].iter().any(|other| other.name == field.name) {
                return Err(TemplateError::DuplicateField(field.name.clone()));
            }
        }
        Ok(Self {
            complexity_level: level,
            template_type: template_type.into(),
            fields,
        })
    }

    /// Override the template type label.
    pub fn with_template_type(mut self, template_type: impl Into<String>) -> Self {
        self.template_type = template_type.into();
        self
    }

    /// Complexity level this template is bound to.
    pub fn complexity_level(&self) -> ComplexityLevel {
        self.complexity_level
    }

    /// Template type label.
    pub fn template_type(&self) -> &str {
        &self.template_type
    }

    /// All field definitions in declaration order.
    pub fn fields(&self) -> &[TemplateField] {
        &self.fields
    }

    /// Look up a field definition by name.
    pub fn field(&self, name: &str) -> Option<&TemplateField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Names of unconditionally required fields.
    pub fn required_field_names(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| f.required && f.show_when.is_none())
            .map(|f| f.name.as_str())
            .collect()
    }

    /// Names of unconditional optional fields.
    pub fn optional_field_names(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| !f.required && f.show_when.is_none())
            .map(|f| f.name.as_str())
            .collect()
    }

    /// Names of conditionally visible fields.
    pub fn conditional_field_names(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| f.show_when.is_some())
            .map(|f| f.name.as_str())
            .collect()
    }

    /// Fields visible for the given data snapshot, in declaration order.
    pub fn visible_fields(&self, data: &TemplateData) -> Vec<&TemplateField> {
        self.fields.iter().filter(|f| f.should_show(data)).collect()
    }

    /// Render the template as markdown: a header, then one section per
    /// visible populated field. Absent optional fields are skipped silently.
    /// Pure function of the template and data; identical inputs produce
    /// byte-identical output.
    pub fn render(&self, data: &TemplateData) -> String {
        let mut parts = vec![
            format!(
                "# {} - Level {}",
                self.template_type,
                self.complexity_level.as_u8()
            ),
            String::new(),
        ];

        for field in self.visible_fields(data) {
            let value = data
                .get(&field.name)
                .cloned()
                .or_else(|| field.default_value.clone());
            if let Some(value) = value {
                if is_blank(Some(&value)) {
                    continue;
                }
                parts.push(format!("## {}", field.label));
                parts.push(field.rendered_value(&value));
                parts.push(String::new());
            }
        }

        parts.join("\n")
    }
}
