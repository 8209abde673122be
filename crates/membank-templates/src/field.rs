//! Field model: one configurable, independently validated template attribute

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Supported field value types. Serialized names are stable identifiers used
/// by the schema export contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// Single-line text
    Text,
    /// Multi-line text
    MultilineText,
    /// Numeric value
    Number,
    /// Yes/no value
    Boolean,
    /// Single choice from a fixed option list
    Select,
    /// Multiple choices from a fixed option list
    MultiSelect,
    /// Calendar date
    Date,
    /// Email address
    Email,
    /// Web address
    Url,
    /// Ordered list of values
    List,
    /// Key/value pairs
    Map,
}

/// Named validation rules applied to field values in declaration order.
/// Serialized names are stable identifiers, not enum ordinals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationRule {
    /// Value must be present and non-empty
    Required,
    /// Value must be a non-empty string
    NonEmptyString,
    /// Minimum length of 10 characters
    #[serde(rename = "min_length_10")]
    MinLength10,
    /// Minimum length of 20 characters
    #[serde(rename = "min_length_20")]
    MinLength20,
    /// Minimum length of 30 characters
    #[serde(rename = "min_length_30")]
    MinLength30,
    /// Minimum length of 50 characters
    #[serde(rename = "min_length_50")]
    MinLength50,
    /// Minimum length of 100 characters
    #[serde(rename = "min_length_100")]
    MinLength100,
    /// Minimum length of 150 characters
    #[serde(rename = "min_length_150")]
    MinLength150,
    /// Minimum length of 200 characters
    #[serde(rename = "min_length_200")]
    MinLength200,
    /// Maximum length of 500 characters
    #[serde(rename = "max_length_500")]
    MaxLength500,
    /// Value must be an integer greater than zero
    PositiveInteger,
    /// Value must look like an email address
    ValidEmail,
    /// Value must be an http or https URL
    ValidUrl,
    /// Value must not contain filesystem-hostile characters
    NoSpecialChars,
    /// Value must be alphanumeric plus spaces, hyphens, and underscores
    Alphanumeric,
}

impl ValidationRule {
    fn min_chars(self) -> Option<usize> {
        match self {
            Self::MinLength10 => Some(10),
            Self::MinLength20 => Some(20),
            Self::MinLength30 => Some(30),
            Self::MinLength50 => Some(50),
            Self::MinLength100 => Some(100),
            Self::MinLength150 => Some(150),
            Self::MinLength200 => Some(200),
            _ => None,
        }
    }
}

/// One option of a select or multi-select field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    /// Stored value
    pub value: String,
    /// Human-readable label
    pub label: String,
    /// Optional explanation of the option
    pub description: Option<String>,
}

impl FieldOption {
    /// Build an option from its value, label, and explanation.
    pub fn new(
        value: impl Into<String>,
        label: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            description: Some(description.into()),
        }
    }
}

/// Declarative visibility predicate: the field is shown only while the
/// referenced field currently holds the trigger value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowWhen {
    /// Name of the field whose value gates visibility
    pub depends_on: String,
    /// Value the gating field must hold
    pub equals: Value,
}

impl ShowWhen {
    /// Build a predicate on another field's current value.
    pub fn new(depends_on: impl Into<String>, equals: Value) -> Self {
        Self {
            depends_on: depends_on.into(),
            equals,
        }
    }

    /// Evaluate the predicate against a form data snapshot.
    pub fn is_met(&self, data: &serde_json::Map<String, Value>) -> bool {
        data.get(&self.depends_on) == Some(&self.equals)
    }
}

/// One configurable attribute of a template.
///
/// Created once when a template is assembled and never mutated afterwards.
/// Validation is a pure function of the definition and the supplied value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateField {
    /// Unique identifier within a template
    pub name: String,
    /// Value type
    pub field_type: FieldType,
    /// Human-readable label
    pub label: String,
    /// What the field captures
    pub description: String,
    /// Whether a value must be supplied
    pub required: bool,
    /// Value used when none is supplied
    pub default_value: Option<Value>,
    /// Example text shown to the user
    pub placeholder: String,
    /// Rules applied in declaration order
    pub validation_rules: Vec<ValidationRule>,
    /// Choices for select and multi-select fields
    pub options: Vec<FieldOption>,
    /// Additional guidance text
    pub help_text: String,
    /// Visibility predicate, if the field is conditional
    pub show_when: Option<ShowWhen>,
}

impl TemplateField {
    /// Start a field definition. Builder methods fill in the rest.
    pub fn new(
        name: impl Into<String>,
        field_type: FieldType,
        label: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            field_type,
            label: label.into(),
            description: description.into(),
            required: false,
            default_value: None,
            placeholder: String::new(),
            validation_rules: Vec::new(),
            options: Vec::new(),
            help_text: String::new(),
            show_when: None,
        }
    }

    /// Mark the field required. Always carries the implicit presence rule.
    pub fn required(mut self) -> Self {
        self.required = true;
        if !self.validation_rules.contains(&ValidationRule::Required) {
            self.validation_rules.insert(0, ValidationRule::Required);
        }
        self
    }

    /// Append a validation rule.
    pub fn rule(mut self, rule: ValidationRule) -> Self {
        if !self.validation_rules.contains(&rule) {
            self.validation_rules.push(rule);
        }
        self
    }

    /// Append a select option.
    pub fn option(mut self, option: FieldOption) -> Self {
        self.options.push(option);
        self
    }

    /// Set the default value.
    pub fn default_value(mut self, value: Value) -> Self {
        self.default_value = Some(value);
        self
    }

    /// Set the placeholder text.
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = text.into();
        self
    }

    /// Set the help text.
    pub fn help_text(mut self, text: impl Into<String>) -> Self {
        self.help_text = text.into();
        self
    }

    /// Make the field conditional on another field's value.
    pub fn show_when(mut self, condition: ShowWhen) -> Self {
        self.show_when = Some(condition);
        self
    }

    /// Look up a select option by its stored value.
    pub fn option_by_value(&self, value: &str) -> Option<&FieldOption> {
        self.options.iter().find(|opt| opt.value == value)
    }

    /// Whether this field is visible for the given form data snapshot.
    pub fn should_show(&self, data: &serde_json::Map<String, Value>) -> bool {
        self.show_when.as_ref().map_or(true, |c| c.is_met(data))
    }

    /// Validate a value against this field's rules.
    ///
    /// The implicit presence rule runs first; an absent value on a
    /// non-required field short-circuits to valid. Remaining rules apply in
    /// declaration order and the first failure wins.
    pub fn validate_value(&self, value: Option<&Value>) -> std::result::Result<(), String> {
        if self.validation_rules.contains(&ValidationRule::Required) && is_blank(value) {
            return Err(format!("Field '{}' is required", self.label));
        }

        let value = match value {
            Some(v) if !is_blank(Some(v)) => v,
            _ => return Ok(()),
        };

        for rule in &self.validation_rules {
            if *rule == ValidationRule::Required {
                continue;
            }
            apply_rule(*rule, value)?;
        }

        Ok(())
    }

    /// Human-readable representation of a value for content rendering.
    pub fn rendered_value(&self, value: &Value) -> String {
        match (self.field_type, value) {
            (_, Value::Null) => String::new(),
            (FieldType::Boolean, v) => {
                if v.as_bool().unwrap_or(false) {
                    "Yes".to_string()
                } else {
                    "No".to_string()
                }
            }
            (FieldType::Select | FieldType::MultiSelect, Value::Array(items)) => items
                .iter()
                .map(scalar_string)
                .collect::<Vec<_>>()
                .join(", "),
            (FieldType::Select | FieldType::MultiSelect, v) => {
                let raw = scalar_string(v);
                self.option_by_value(&raw)
                    .map_or(raw, |opt| opt.label.clone())
            }
            (FieldType::List, Value::Array(items)) => items
                .iter()
                .map(|item| format!("- {}", scalar_string(item)))
                .collect::<Vec<_>>()
                .join("\n"),
            (FieldType::Map, Value::Object(entries)) => entries
                .iter()
                .map(|(k, v)| format!("- **{k}**: {}", scalar_string(v)))
                .collect::<Vec<_>>()
                .join("\n"),
            (_, v) => scalar_string(v),
        }
    }

    /// Schema-export representation of this field.
    pub fn schema(&self) -> FieldSchema {
        FieldSchema {
            name: self.name.clone(),
            field_type: self.field_type,
            label: self.label.clone(),
            description: self.description.clone(),
            required: self.required,
            default_value: self.default_value.clone(),
            placeholder: self.placeholder.clone(),
            validation_rules: self.validation_rules.clone(),
            options: self.options.clone(),
            help_text: self.help_text.clone(),
            conditional_show: self.show_when.as_ref().map(|c| c.depends_on.clone()),
            conditional_value: self.show_when.as_ref().map(|c| c.equals.clone()),
        }
    }

    /// Rebuild a field definition from its exported schema.
    pub fn from_schema(schema: FieldSchema) -> Self {
        let show_when = match (schema.conditional_show, schema.conditional_value) {
            (Some(depends_on), Some(equals)) => Some(ShowWhen { depends_on, equals }),
            _ => None,
        };
        let mut validation_rules = schema.validation_rules;
        if schema.required && !validation_rules.contains(&ValidationRule::Required) {
            validation_rules.insert(0, ValidationRule::Required);
        }
        Self {
            name: schema.name,
            field_type: schema.field_type,
            label: schema.label,
            description: schema.description,
            required: schema.required,
            default_value: schema.default_value,
            placeholder: schema.placeholder,
            validation_rules,
            options: schema.options,
            help_text: schema.help_text,
            show_when,
        }
    }
}

/// Serialized field metadata: the contract external tooling depends on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    /// Unique identifier within a template
    pub name: String,
    /// Value type, as a stable string identifier
    pub field_type: FieldType,
    /// Human-readable label
    pub label: String,
    /// What the field captures
    pub description: String,
    /// Whether a value must be supplied
    pub required: bool,
    /// Value used when none is supplied
    pub default_value: Option<Value>,
    /// Example text shown to the user
    pub placeholder: String,
    /// Rule names in declaration order
    pub validation_rules: Vec<ValidationRule>,
    /// Choices for select and multi-select fields
    pub options: Vec<FieldOption>,
    /// Additional guidance text
    pub help_text: String,
    /// Name of the field gating visibility, if conditional
    pub conditional_show: Option<String>,
    /// Value the gating field must hold, if conditional
    pub conditional_value: Option<Value>,
}

/// Whether a value counts as absent for presence checks: missing, null,
/// blank string, empty array, or empty object.
pub(crate) fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(Value::Object(entries)) => entries.is_empty(),
        Some(_) => false,
    }
}

fn scalar_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn apply_rule(rule: ValidationRule, value: &Value) -> std::result::Result<(), String> {
    if let Some(min) = rule.min_chars() {
        if let Value::String(s) = value {
            if s.chars().count() < min {
                return Err(format!("Value must be at least {min} characters long"));
            }
        }
        return Ok(());
    }

    match rule {
        ValidationRule::NonEmptyString => match value {
            Value::String(s) if !s.trim().is_empty() => Ok(()),
            _ => Err("Value must be a non-empty string".to_string()),
        },
        ValidationRule::MaxLength500 => match value {
            Value::String(s) if s.chars().count() > 500 => {
                Err("Value must be no more than 500 characters long".to_string())
            }
            _ => Ok(()),
        },
        ValidationRule::PositiveInteger => match value.as_i64() {
            Some(n) if n > 0 => Ok(()),
            _ => Err("Value must be a positive integer".to_string()),
        },
        ValidationRule::ValidEmail => match value {
            Value::String(s) if s.contains('@') && s.contains('.') => Ok(()),
            Value::String(_) => Err("Value must be a valid email address".to_string()),
            _ => Ok(()),
        },
        ValidationRule::ValidUrl => match value {
            Value::String(s) if s.starts_with("http://") || s.starts_with("https://") => Ok(()),
            Value::String(_) => {
                Err("Value must be a valid URL starting with http:// or https://".to_string())
            }
            _ => Ok(()),
        },
        ValidationRule::NoSpecialChars => match value {
            Value::String(s) if s.chars().any(|c| "<>:\"/\\|?*".contains(c)) => Err(
                "Value cannot contain special characters: < > : \" / \\ | ? *".to_string(),
            ),
            _ => Ok(()),
        },
        ValidationRule::Alphanumeric => match value {
            Value::String(s)
                if !s.chars().all(|c| {
                    c.is_ascii_alphanumeric() || c.is_whitespace() || c == '_' || c == '-'
                }) =>
            {
                Err(
                    "Value must contain only alphanumeric characters, spaces, hyphens, and underscores"
                        .to_string(),
                )
            }
            _ => Ok(()),
        },
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn description_field() -> TemplateField {
        TemplateField::new(
            "description",
            FieldType::MultilineText,
            "Description",
            "Detailed description",
        )
        .required()
        .rule(ValidationRule::MinLength50)
    }

    #[test]
    fn required_field_rejects_absent_value() {
        let field = description_field();
        let err = field.validate_value(None).unwrap_err();
        assert!(err.contains("Description"));
        assert!(err.contains("required"));
    }

    #[test]
    fn required_field_rejects_whitespace_only_string() {
        let field = description_field();
        assert!(field.validate_value(Some(&json!("   "))).is_err());
    }

    #[test]
    fn optional_field_with_absent_value_is_valid() {
        let field = TemplateField::new("notes", FieldType::Text, "Notes", "Optional notes")
            .rule(ValidationRule::MinLength10);
        assert!(field.validate_value(None).is_ok());
        assert!(field.validate_value(Some(&Value::Null)).is_ok());
    }

    #[test]
    fn first_failing_rule_wins() {
        let field = TemplateField::new("title", FieldType::Text, "Title", "Title")
            .rule(ValidationRule::MinLength10)
            .rule(ValidationRule::MaxLength500);
        let err = field.validate_value(Some(&json!("short"))).unwrap_err();
        assert!(err.contains("at least 10"));
    }

    #[test]
    fn min_length_passes_at_threshold() {
        let field = description_field();
        let fifty = "x".repeat(50);
        assert!(field.validate_value(Some(&json!(fifty))).is_ok());
    }

    #[test]
    fn positive_integer_rule() {
        let field = TemplateField::new("count", FieldType::Number, "Count", "A count")
            .rule(ValidationRule::PositiveInteger);
        assert!(field.validate_value(Some(&json!(3))).is_ok());
        assert!(field.validate_value(Some(&json!(-1))).is_err());
        assert!(field.validate_value(Some(&json!("three"))).is_err());
    }

    #[test]
    fn email_and_url_rules() {
        let email = TemplateField::new("contact", FieldType::Email, "Contact", "Email")
            .rule(ValidationRule::ValidEmail);
        assert!(email.validate_value(Some(&json!("dev@example.com"))).is_ok());
        assert!(email.validate_value(Some(&json!("not-an-email"))).is_err());

        let url = TemplateField::new("link", FieldType::Url, "Link", "URL")
            .rule(ValidationRule::ValidUrl);
        assert!(url.validate_value(Some(&json!("https://example.com"))).is_ok());
        assert!(url.validate_value(Some(&json!("example.com"))).is_err());
    }

    #[test]
    fn required_builder_inserts_presence_rule() {
        let field = TemplateField::new("title", FieldType::Text, "Title", "Title").required();
        assert!(field.validation_rules.contains(&ValidationRule::Required));
    }

    #[test]
    fn show_when_gates_visibility() {
        let field = TemplateField::new("creative", FieldType::MultilineText, "Creative", "Gated")
            .show_when(ShowWhen::new("complexity_level", json!(3)));

        let mut data = serde_json::Map::new();
        assert!(!field.should_show(&data));
        data.insert("complexity_level".to_string(), json!(3));
        assert!(field.should_show(&data));
        data.insert("complexity_level".to_string(), json!(2));
        assert!(!field.should_show(&data));
    }

    #[test]
    fn rendered_value_formats_by_field_type() {
        let boolean = TemplateField::new("flag", FieldType::Boolean, "Flag", "");
        assert_eq!(boolean.rendered_value(&json!(true)), "Yes");
        assert_eq!(boolean.rendered_value(&json!(false)), "No");

        let select = TemplateField::new("priority", FieldType::Select, "Priority", "")
            .option(FieldOption::new("high", "High", "Needs immediate attention"));
        assert_eq!(select.rendered_value(&json!("high")), "High");
        assert_eq!(select.rendered_value(&json!("unknown")), "unknown");

        let list = TemplateField::new("steps", FieldType::List, "Steps", "");
        assert_eq!(list.rendered_value(&json!(["one", "two"])), "- one\n- two");

        let map = TemplateField::new("meta", FieldType::Map, "Meta", "");
        assert_eq!(map.rendered_value(&json!({"owner": "core"})), "- **owner**: core");
    }

    #[test]
    fn schema_round_trip_preserves_identity() {
        let field = description_field()
            .placeholder("Describe the bug")
            .help_text("Be specific")
            .show_when(ShowWhen::new("complexity_level", json!(3)));
        let rebuilt = TemplateField::from_schema(field.schema());
        assert_eq!(rebuilt, field);
    }

    #[test]
    fn rule_names_serialize_as_stable_identifiers() {
        assert_eq!(
            serde_json::to_value(ValidationRule::MinLength50).unwrap(),
            json!("min_length_50")
        );
        assert_eq!(
            serde_json::to_value(FieldType::MultilineText).unwrap(),
            json!("multiline_text")
        );
    }
}
