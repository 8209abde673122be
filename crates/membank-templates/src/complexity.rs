//! Complexity classification from free-text descriptions
//!
//! Classifies a task description into one of four discrete complexity levels
//! using weighted keyword scoring, pattern matching, length heuristics, and
//! optional structured context. Deterministic: fixed tables, no randomness,
//! no time-dependence.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::TemplateError;

/// Discrete complexity level of a task or feature.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(into = "u8", try_from = "u8")]
pub enum ComplexityLevel {
    /// Level 1: simple, isolated change
    QuickFix = 1,
    /// Level 2: moderate change with planning and testing
    Enhancement = 2,
    /// Level 3: feature requiring architecture and phased delivery
    IntermediateFeature = 3,
    /// Level 4: enterprise-scale system work
    ComplexSystem = 4,
}

impl ComplexityLevel {
    /// All levels in ascending order.
    pub const ALL: [ComplexityLevel; 4] = [
        Self::QuickFix,
        Self::Enhancement,
        Self::IntermediateFeature,
        Self::ComplexSystem,
    ];

    /// Numeric level, 1 to 4.
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Default template type label for this level.
    pub fn template_type(self) -> &'static str {
        match self {
            Self::QuickFix => "Quick Bug Fix",
            Self::Enhancement => "Simple Enhancement",
            Self::IntermediateFeature => "Intermediate Feature",
            Self::ComplexSystem => "Complex System",
        }
    }

    /// Fixed human-readable summary of the level's template.
    pub fn summary(self) -> &'static str {
        match self {
            Self::QuickFix => {
                "Level 1 Template - Quick Bug Fix\n\
                 Minimal complexity template for simple bug fixes and minor issues.\n\
                 Includes: Title, Description, Solution, Testing Notes, Priority, Effort, Dependencies\n\
                 Best for: Single-file changes, configuration updates, minor UI fixes"
            }
            Self::Enhancement => {
                "Level 2 Template - Simple Enhancement\n\
                 Moderate complexity template for enhancements and improvements.\n\
                 Includes: Title, Description, Requirements, Implementation, Testing Strategy, Dependencies, Effort\n\
                 Best for: Feature enhancements, UI improvements, moderate functionality additions"
            }
            Self::IntermediateFeature => {
                "Level 3 Template - Intermediate Feature\n\
                 Comprehensive template for features requiring planning, architecture, and testing.\n\
                 Includes: Title, Description, Requirements, Architecture, Dependencies, \
                 Implementation Phases, Testing Strategy, Acceptance Criteria, Creative Phases, \
                 Risk Assessment, Performance & Security Considerations, Effort, Success Metrics\n\
                 Best for: New features, significant enhancements, integrations"
            }
            Self::ComplexSystem => {
                "Level 4 Template - Complex System\n\
                 Maximum complexity template for enterprise systems and complex architectures.\n\
                 Includes: Title, Description, Requirements, System Design, Architecture, Dependencies, \
                 Implementation Phases, Integration Points, Performance, Security, Testing, Risk Assessment, \
                 Success Metrics, Effort\n\
                 Best for: Enterprise systems, microservices, complex architectures, platform development"
            }
        }
    }

    /// Fixed expected completion time range for this level.
    pub fn expected_completion_time(self) -> &'static str {
        match self {
            Self::QuickFix => "15 minutes to 1 day",
            Self::Enhancement => "1 day to 1 week",
            Self::IntermediateFeature => "3 days to 1 month",
            Self::ComplexSystem => "1 month to 1+ years",
        }
    }

    /// Fixed description of what this complexity level entails.
    pub fn complexity_description(self) -> &'static str {
        match self {
            Self::QuickFix => {
                "Quick Bug Fix - Simple, isolated changes that can be completed quickly. \
                 Minimal planning required, straightforward implementation, basic testing sufficient."
            }
            Self::Enhancement => {
                "Simple Enhancement - Moderate complexity requiring planning and testing. \
                 Standard implementation approach with clear requirements and testing strategy."
            }
            Self::IntermediateFeature => {
                "Intermediate Feature - Moderate complexity requiring comprehensive planning, \
                 architectural considerations, and structured implementation. \
                 May require creative phases for design decisions."
            }
            Self::ComplexSystem => {
                "Complex System - Maximum complexity requiring comprehensive planning, \
                 architecture design, and enterprise-level considerations. \
                 Requires multiple teams, extensive testing, and careful risk management."
            }
        }
    }
}

impl TryFrom<u8> for ComplexityLevel {
    type Error = TemplateError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::QuickFix),
            2 => Ok(Self::Enhancement),
            3 => Ok(Self::IntermediateFeature),
            4 => Ok(Self::ComplexSystem),
            other => Err(TemplateError::UnsupportedLevel(other)),
        }
    }
}

impl From<ComplexityLevel> for u8 {
    fn from(level: ComplexityLevel) -> Self {
        level.as_u8()
    }
}

impl std::fmt::Display for ComplexityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

/// Structured context that refines classification beyond the description.
/// Absent fields contribute nothing to the score.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComplexityContext {
    /// Free-text effort estimate, matched for hours/days/weeks/months
    pub estimated_effort: Option<String>,
    /// Known dependencies of the task
    pub dependencies: Vec<String>,
    /// Number of files expected to change
    pub affected_files: Option<u32>,
    /// Number of people involved
    pub team_size: Option<u32>,
    /// Free-text deadline, matched for urgency markers
    pub deadline: Option<String>,
}

/// Outcome of automatic classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplexityResult {
    /// Winning complexity level
    pub level: ComplexityLevel,
    /// 0.0 to 1.0; zero signals "no description supplied, defaulted"
    pub confidence: f64,
    /// Matched keywords, patterns, and context signals
    pub indicators: Vec<String>,
    /// Human-readable score breakdown
    pub reasoning: String,
}

/// Keyword weights; weight magnitude selects the level bucket.
const KEYWORD_WEIGHTS: &[(&str, f64)] = &[
    ("fix", 1.0),
    ("bug", 1.0),
    ("typo", 0.5),
    ("error", 1.0),
    ("update", 1.0),
    ("change", 1.0),
    ("simple", 0.5),
    ("quick", 0.5),
    ("enhance", 2.0),
    ("improve", 2.0),
    ("add", 2.0),
    ("new", 2.0),
    ("feature", 2.0),
    ("refactor", 2.0),
    ("optimize", 2.0),
    ("implement", 3.0),
    ("develop", 3.0),
    ("create", 3.0),
    ("build", 3.0),
    ("design", 3.0),
    ("integration", 3.0),
    ("api", 3.0),
    ("service", 3.0),
    ("complex", 3.0),
    ("architecture", 4.0),
    ("system", 4.0),
    ("platform", 4.0),
    ("enterprise", 4.0),
    ("scalable", 4.0),
    ("distributed", 4.0),
    ("microservices", 4.0),
    ("infrastructure", 4.0),
    ("critical", 4.0),
];

const PHRASE_PATTERNS: &[&str] = &[
    r"fix\s+\w+",
    r"update\s+\w+",
    r"change\s+\w+",
    r"correct\s+\w+",
    r"typo\s+in",
    r"small\s+\w+",
    r"quick\s+\w+",
    r"add\s+\w+\s+feature",
    r"enhance\s+\w+",
    r"improve\s+\w+",
    r"new\s+\w+",
    r"implement\s+\w+",
    r"create\s+\w+",
    r"implement\s+\w+\s+system",
    r"develop\s+\w+\s+feature",
    r"create\s+\w+\s+architecture",
    r"build\s+\w+\s+integration",
    r"design\s+\w+\s+system",
    r"complex\s+\w+",
    r"advanced\s+\w+",
    r"enterprise\s+\w+",
    r"scalable\s+\w+",
    r"distributed\s+\w+",
    r"microservices\s+\w+",
    r"cloud\s+\w+",
    r"infrastructure\s+\w+",
    r"critical\s+\w+",
    r"platform\s+\w+",
];

const TECHNICAL_TERMS: &[&str] = &[
    "api",
    "database",
    "server",
    "client",
    "framework",
    "library",
    "algorithm",
    "architecture",
    "integration",
    "authentication",
    "authorization",
    "encryption",
    "deployment",
    "configuration",
];

fn compiled_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        PHRASE_PATTERNS
            .iter()
            .filter_map(|pattern| Regex::new(pattern).ok())
            .collect()
    })
}

/// Classifies free-text descriptions into complexity levels.
pub struct ComplexityDetector;

impl ComplexityDetector {
    /// Classification shortcut: level only.
    pub fn detect(description: &str, context: Option<&ComplexityContext>) -> ComplexityLevel {
        Self::analyze(description, context).level
    }

    /// Full analysis with confidence, matched indicators, and a score
    /// breakdown. Never fails; malformed context fields contribute zero.
    pub fn analyze(description: &str, context: Option<&ComplexityContext>) -> ComplexityResult {
        if description.trim().is_empty() {
            return ComplexityResult {
                level: ComplexityLevel::QuickFix,
                confidence: 0.0,
                indicators: Vec::new(),
                reasoning: "No description provided, defaulting to Level 1".to_string(),
            };
        }

        let lower = description.to_lowercase();
        let mut scores = [0.0_f64; 4];
        let mut indicators = Vec::new();

        // Keyword scoring: weight magnitude picks the level bucket.
        for &(keyword, weight) in KEYWORD_WEIGHTS {
            if lower.contains(keyword) {
                scores[bucket_for_weight(weight)] += weight;
                indicators.push(format!("Keyword: '{keyword}'"));
            }
        }

        // Phrase patterns, classified by the matched text itself.
        for regex in compiled_patterns() {
            for matched in regex.find_iter(&lower) {
                let text = matched.as_str();
                if contains_any(text, &["fix", "update", "change"]) {
                    scores[0] += 1.0;
                } else if contains_any(text, &["enhance", "improve", "add"]) {
                    scores[1] += 2.0;
                } else if contains_any(text, &["implement", "develop", "create"]) {
                    scores[2] += 3.0;
                } else if contains_any(text, &["architecture", "system", "platform"]) {
                    scores[3] += 4.0;
                }
                indicators.push(format!("Pattern: '{text}'"));
            }
        }

        // Length heuristic, distributed across levels by magnitude.
        let word_count = description.split_whitespace().count();
        let length_score = (word_count as f64 / 10.0).min(4.0);
        scores[bucket_for_weight(length_score.max(0.1))] += length_score;

        // Technical-term density leans toward level 3.
        let technical_terms = TECHNICAL_TERMS
            .iter()
            .filter(|term| lower.contains(*term))
            .count();
        if technical_terms > 0 {
            scores[2] += (technical_terms as f64 * 0.5).min(2.0);
            indicators.push(format!("Technical terms: {technical_terms}"));
        }

        if let Some(context) = context {
            Self::fold_context(context, &mut scores, &mut indicators);
        }

        let level = winning_level(&scores);
        let confidence = confidence_for(&scores);
        let reasoning = reasoning_for(level, &indicators, &scores);

        ComplexityResult {
            level,
            confidence,
            indicators,
            reasoning,
        }
    }

    fn fold_context(
        context: &ComplexityContext,
        scores: &mut [f64; 4],
        indicators: &mut Vec<String>,
    ) {
        let effort = context
            .estimated_effort
            .as_deref()
            .map(effort_weight)
            .unwrap_or(0.0);
        if effort > 0.0 {
            scores[effort as usize - 1] += effort;
            indicators.push(format!("Estimated effort: {effort}"));
        }

        if !context.dependencies.is_empty() {
            let dependency_score = (context.dependencies.len() as f64 / 2.0).min(3.0);
            scores[1] += dependency_score * 0.5;
            indicators.push(format!("Dependencies: {dependency_score}"));
        }

        if let Some(affected_files) = context.affected_files {
            scores[2] += (affected_files as f64 / 5.0).min(3.0) * 0.3;
        }

        if let Some(team_size) = context.team_size {
            scores[2] += (team_size as f64 / 3.0).min(2.0) * 0.4;
        }

        if let Some(deadline) = context.deadline.as_deref() {
            let lower = deadline.to_lowercase();
            if lower.contains("urgent") || lower.contains("asap") {
                scores[1] += 0.5;
            } else if lower.contains("soon") {
                scores[1] += 0.25;
            }
        }
    }
}

fn effort_weight(effort: &str) -> f64 {
    let lower = effort.to_lowercase();
    if lower.contains("months") {
        4.0
    } else if lower.contains("weeks") {
        3.0
    } else if lower.contains("days") {
        2.0
    } else if lower.contains("hours") {
        1.0
    } else {
        0.0
    }
}

fn bucket_for_weight(weight: f64) -> usize {
    if weight <= 1.0 {
        0
    } else if weight <= 2.0 {
        1
    } else if weight <= 3.0 {
        2
    } else {
        3
    }
}

fn contains_any(text: &str, words: &[&str]) -> bool {
    words.iter().any(|word| text.contains(word))
}

/// Highest score wins; exact ties go to the higher level.
fn winning_level(scores: &[f64; 4]) -> ComplexityLevel {
    let max = scores.iter().cloned().fold(0.0_f64, f64::max);
    if max == 0.0 {
        return ComplexityLevel::QuickFix;
    }
    for level in ComplexityLevel::ALL.iter().rev() {
        if scores[level.as_u8() as usize - 1] == max {
            return *level;
        }
    }
    ComplexityLevel::QuickFix
}

fn confidence_for(scores: &[f64; 4]) -> f64 {
    let total: f64 = scores.iter().sum();
    if total == 0.0 {
        return 0.0;
    }
    let mut sorted = *scores;
    sorted.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
    let max = sorted[0];
    let runner_up = sorted[1];

    let mut confidence = max / total;
    if max > runner_up * 1.5 {
        confidence = (confidence * 1.2).min(1.0);
    }
    confidence
}

fn reasoning_for(level: ComplexityLevel, indicators: &[String], scores: &[f64; 4]) -> String {
    let mut parts = vec![format!(
        "Complexity Level {} detected based on:",
        level.as_u8()
    )];
    for candidate in ComplexityLevel::ALL {
        let score = scores[candidate.as_u8() as usize - 1];
        if score > 0.0 {
            parts.push(format!("  Level {}: {score:.1} points", candidate.as_u8()));
        }
    }
    if !indicators.is_empty() {
        parts.push("Key indicators:".to_string());
        for indicator in indicators.iter().take(5) {
            parts.push(format!("  - {indicator}"));
        }
    }
    parts.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_description_defaults_to_level_one() {
        let result = ComplexityDetector::analyze("", None);
        assert_eq!(result.level, ComplexityLevel::QuickFix);
        assert_eq!(result.confidence, 0.0);
        assert!(result.indicators.is_empty());
        assert!(result.reasoning.contains("defaulting to Level 1"));
    }

    #[test]
    fn enterprise_description_classifies_as_level_four() {
        let result = ComplexityDetector::analyze(
            "Design a scalable enterprise microservices platform with distributed caching",
            None,
        );
        assert_eq!(result.level, ComplexityLevel::ComplexSystem);
        assert!(result.indicators.iter().any(|i| i.contains("enterprise")));
        assert!(result
            .indicators
            .iter()
            .any(|i| i.contains("microservices")));
    }

    #[test]
    fn bug_fix_description_classifies_as_level_one() {
        let result = ComplexityDetector::analyze("Fix typo in error message", None);
        assert_eq!(result.level, ComplexityLevel::QuickFix);
    }

    #[test]
    fn analysis_is_deterministic() {
        let description = "Implement a payment integration service with API authentication";
        let context = ComplexityContext {
            estimated_effort: Some("2 weeks".to_string()),
            dependencies: vec!["payment gateway".to_string(), "auth service".to_string()],
            affected_files: Some(12),
            ..Default::default()
        };
        let first = ComplexityDetector::analyze(description, Some(&context));
        let second = ComplexityDetector::analyze(description, Some(&context));
        assert_eq!(first.level, second.level);
        assert_eq!(first.confidence, second.confidence);
        assert_eq!(first.indicators, second.indicators);
    }

    #[test]
    fn exact_score_tie_prefers_higher_level() {
        assert_eq!(
            winning_level(&[2.0, 0.0, 0.0, 2.0]),
            ComplexityLevel::ComplexSystem
        );
        assert_eq!(
            winning_level(&[0.0, 1.0, 1.0, 0.0]),
            ComplexityLevel::IntermediateFeature
        );
    }

    #[test]
    fn zero_scores_fall_back_to_level_one() {
        assert_eq!(winning_level(&[0.0; 4]), ComplexityLevel::QuickFix);
    }

    #[test]
    fn clear_winner_gets_confidence_boost() {
        let dominated = confidence_for(&[0.5, 0.0, 0.0, 6.0]);
        let contested = confidence_for(&[3.0, 0.0, 0.0, 3.5]);
        assert!(dominated > contested);
        assert!(dominated <= 1.0);
    }

    #[test]
    fn malformed_context_contributes_nothing() {
        let context = ComplexityContext {
            estimated_effort: Some("unknown".to_string()),
            ..Default::default()
        };
        let with = ComplexityDetector::analyze("Fix login bug", Some(&context));
        let without = ComplexityDetector::analyze("Fix login bug", None);
        assert_eq!(with.level, without.level);
        assert_eq!(with.confidence, without.confidence);
    }

    #[test]
    fn effort_context_pushes_toward_matching_level() {
        let context = ComplexityContext {
            estimated_effort: Some("3 months".to_string()),
            ..Default::default()
        };
        let result = ComplexityDetector::analyze("migration work across services", Some(&context));
        assert!(result.indicators.iter().any(|i| i.contains("effort")));
    }

    #[test]
    fn level_round_trips_through_u8() {
        for level in ComplexityLevel::ALL {
            assert_eq!(ComplexityLevel::try_from(level.as_u8()).unwrap(), level);
        }
        assert!(ComplexityLevel::try_from(5).is_err());
        assert!(ComplexityLevel::try_from(0).is_err());
    }
}
