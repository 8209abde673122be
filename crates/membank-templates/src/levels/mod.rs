//! Per-level field set definitions
//!
//! Each complexity level is a closed set of field definitions assembled at
//! construction time. Higher levels strictly add required fields and raise
//! minimum-length thresholds.

mod level1;
mod level2;
mod level3;
mod level4;

use crate::complexity::ComplexityLevel;
use crate::field::TemplateField;

/// Field definitions for a complexity level, in declaration order.
pub fn fields_for_level(level: ComplexityLevel) -> Vec<TemplateField> {
    match level {
        ComplexityLevel::QuickFix => level1::fields(),
        ComplexityLevel::Enhancement => level2::fields(),
        ComplexityLevel::IntermediateFeature => level3::fields(),
        ComplexityLevel::ComplexSystem => level4::fields(),
    }
}
