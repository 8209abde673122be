//! Template engine: orchestrates level selection, validation, rendering,
//! and caching

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::fs;
use tracing::debug;

use membank_cache::{generate_key, CacheConfig, TemplateCache};

use crate::complexity::{ComplexityContext, ComplexityDetector, ComplexityLevel, ComplexityResult};
use crate::error::Result;
use crate::field::FieldSchema;
use crate::template::{Template, TemplateData};
use crate::validation::{TemplateValidator, ValidationResult};

/// Exported template schema: the contract external tooling depends on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateSchema {
    /// Complexity level the schema describes
    pub complexity_level: u8,
    /// Template type label
    pub template_type: String,
    /// When the schema was exported
    pub created_at: DateTime<Utc>,
    /// Field metadata keyed by field name
    pub fields: BTreeMap<String, FieldSchema>,
}

/// Static metadata about one template level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateInfo {
    /// Complexity level
    pub complexity_level: u8,
    /// Template type label
    pub template_type: String,
    /// Human-readable template summary
    pub summary: String,
    /// Fixed completion time range
    pub expected_completion_time: String,
    /// What this complexity level entails
    pub complexity_description: String,
    /// Names of unconditionally required fields
    pub required_fields: Vec<String>,
    /// Names of unconditional optional fields
    pub optional_fields: Vec<String>,
    /// Total number of field definitions
    pub total_fields: usize,
}

/// Central orchestrator: selects a level template explicitly or via the
/// detector, validates supplied data, renders content, and caches rendered
/// payloads by a content-derived key.
pub struct TemplateEngine {
    cache: TemplateCache,
}

impl TemplateEngine {
    /// Open an engine with the given cache configuration.
    pub async fn new(config: CacheConfig) -> Result<Self> {
        let cache = TemplateCache::open(config).await?;
        Ok(Self { cache })
    }

    /// The cache behind this engine.
    pub fn cache(&self) -> &TemplateCache {
        &self.cache
    }

    /// Build the template for a complexity level, optionally overriding the
    /// template type label.
    pub fn generate_template(
        &self,
        level: ComplexityLevel,
        template_type: Option<&str>,
    ) -> Template {
        let template = Template::new(level);
        match template_type {
            Some(label) => template.with_template_type(label),
            None => template,
        }
    }

    /// Build the template for a numeric level. Fails with a domain error
    /// naming the level when it is outside 1 to 4.
    pub fn generate_template_for_level(
        &self,
        level: u8,
        template_type: Option<&str>,
    ) -> Result<Template> {
        let level = ComplexityLevel::try_from(level)?;
        Ok(self.generate_template(level, template_type))
    }

    /// Classify a description and build the matching template.
    pub fn detect_complexity_and_generate(
        &self,
        description: &str,
        context: Option<&ComplexityContext>,
    ) -> (Template, ComplexityResult) {
        let analysis = ComplexityDetector::analyze(description, context);
        debug!(
            level = analysis.level.as_u8(),
            confidence = analysis.confidence,
            "complexity detected"
        );
        let template = self.generate_template(analysis.level, None);
        (template, analysis)
    }

    /// Validate supplied data against a template.
    pub fn validate_template_data(
        &self,
        template: &Template,
        data: &TemplateData,
    ) -> ValidationResult {
        TemplateValidator::validate(data, template.fields(), template.template_type())
    }

    /// Render formatted content from a template and data. Pure rendering;
    /// no caching, no I/O.
    pub fn generate_template_content(&self, template: &Template, data: &TemplateData) -> String {
        template.render(data)
    }

    /// Render content through the cache. `description` is the caller's
    /// stable request description; together with level and type it derives
    /// the cache key. Cache failures degrade to a plain render.
    pub async fn render_with_cache(
        &self,
        template: &Template,
        data: &TemplateData,
        description: &str,
    ) -> String {
        let key = generate_key(
            template.complexity_level().as_u8(),
            template.template_type(),
            description,
        );

        if let Some(Value::String(content)) = self.cache.get(&key).await {
            return content;
        }

        let content = template.render(data);
        self.cache
            .put(
                &key,
                Value::String(content.clone()),
                template.complexity_level().as_u8(),
                template.template_type(),
                None,
            )
            .await;
        content
    }

    /// Render a template and write the content to a file, creating parent
    /// directories as needed.
    pub async fn save_template_to_file(
        &self,
        template: &Template,
        data: &TemplateData,
        path: impl AsRef<Path>,
    ) -> Result<()> {
        let path = path.as_ref();
        let content = template.render(data);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(path, content).await?;
        Ok(())
    }

    /// Load previously saved template data from a JSON file.
    pub async fn load_template_from_file(&self, path: impl AsRef<Path>) -> Result<TemplateData> {
        let text = fs::read_to_string(path.as_ref()).await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Export every field's metadata for a level, keyed by field name.
    pub fn export_template_schema(&self, level: ComplexityLevel) -> TemplateSchema {
        let template = Template::new(level);
        TemplateSchema {
            complexity_level: level.as_u8(),
            template_type: template.template_type().to_string(),
            created_at: Utc::now(),
            fields: template
                .fields()
                .iter()
                .map(|f| (f.name.clone(), f.schema()))
                .collect(),
        }
    }

    /// Detailed field metadata for a level, keyed by field name.
    pub fn template_field_info(&self, level: ComplexityLevel) -> BTreeMap<String, FieldSchema> {
        Template::new(level)
            .fields()
            .iter()
            .map(|f| (f.name.clone(), f.schema()))
            .collect()
    }

    /// All supported complexity levels in ascending order.
    pub fn available_levels(&self) -> [ComplexityLevel; 4] {
        ComplexityLevel::ALL
    }

    /// Static metadata about one template level.
    pub fn template_info(&self, level: ComplexityLevel) -> TemplateInfo {
        let template = Template::new(level);
        TemplateInfo {
            complexity_level: level.as_u8(),
            template_type: template.template_type().to_string(),
            summary: level.summary().to_string(),
            expected_completion_time: level.expected_completion_time().to_string(),
            complexity_description: level.complexity_description().to_string(),
            required_fields: template
                .required_field_names()
                .iter()
                .map(|s| s.to_string())
                .collect(),
            optional_fields: template
                .optional_field_names()
                .iter()
                .map(|s| s.to_string())
                .collect(),
            total_fields: template.fields().len(),
        }
    }

    /// Human-readable listing of a level's fields, requiring no data.
    pub fn create_template_preview(&self, level: ComplexityLevel) -> String {
        let template = Template::new(level);
        let mut lines = vec![
            format!(
                "# {} Template - Level {}",
                template.template_type(),
                level.as_u8()
            ),
            String::new(),
            format!("**Summary**: {}", level.summary()),
            String::new(),
            format!(
                "**Expected Completion Time**: {}",
                level.expected_completion_time()
            ),
            String::new(),
            format!(
                "**Complexity Description**: {}",
                level.complexity_description()
            ),
            String::new(),
            "## Required Fields:".to_string(),
            String::new(),
        ];

        for name in template.required_field_names() {
            if let Some(field) = template.field(name) {
                lines.push(format!("- **{}**: {}", field.label, field.description));
            }
        }

        lines.extend([String::new(), "## Optional Fields:".to_string(), String::new()]);
        for name in template.optional_field_names() {
            if let Some(field) = template.field(name) {
                lines.push(format!("- **{}**: {}", field.label, field.description));
            }
        }

        let conditional = template.conditional_field_names();
        if !conditional.is_empty() {
            lines.extend([
                String::new(),
                "## Conditional Fields:".to_string(),
                String::new(),
            ]);
            for name in conditional {
                if let Some(field) = template.field(name) {
                    lines.push(format!(
                        "- **{}**: {} (conditional)",
                        field.label, field.description
                    ));
                }
            }
        }

        lines.join("\n")
    }
}
