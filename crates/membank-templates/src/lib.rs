//! # Membank Templates
//!
//! Memory Bank template subsystem: structured specification templates
//! calibrated to an automatically detected complexity level (1 to 4),
//! field-level validation with weighted quality scoring, and cached
//! content rendering.
//!
//! ## Components
//!
//! - **Field model**: typed, independently validated template attributes
//! - **Complexity detector**: weighted keyword/pattern classification
//! - **Level templates**: four closed field sets of increasing rigor
//! - **Validator**: per-field rules plus a weighted composite score
//! - **Engine**: level selection, rendering, file helpers, and caching

#![warn(missing_docs)]

pub mod complexity;
pub mod engine;
pub mod error;
pub mod field;
pub mod levels;
pub mod template;
pub mod validation;

pub use complexity::{ComplexityContext, ComplexityDetector, ComplexityLevel, ComplexityResult};
pub use engine::{TemplateEngine, TemplateInfo, TemplateSchema};
pub use error::{Result, TemplateError};
pub use field::{FieldOption, FieldSchema, FieldType, ShowWhen, TemplateField, ValidationRule};
pub use levels::fields_for_level;
pub use template::{Template, TemplateData};
pub use validation::{ComplianceResult, TemplateValidator, ValidationResult};
