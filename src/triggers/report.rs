//! Analyzer output types.

use indexmap::IndexMap;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// EXTRACTED SQL
// ============================================================================

/// Statement shape recognized in trigger text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum SqlKind {
    Cursor,
    Select,
    FunctionCall,
    ProcedureCall,
    Insert,
    Update,
    Delete,
}

/// A statement found in trigger text. Names are textual, not resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExtractedSql {
    pub kind: SqlKind,
    pub text: String,
    pub tables: Vec<String>,
    pub fields: Vec<String>,
}

// ============================================================================
// BUSINESS RULES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum BusinessRuleType {
    Validation,
    AutoPopulate,
    Calculation,
    Navigation,
    MasterDetail,
    DeleteCheck,
    Custom,
}

impl BusinessRuleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "VALIDATION",
            Self::AutoPopulate => "AUTO_POPULATE",
            Self::Calculation => "CALCULATION",
            Self::Navigation => "NAVIGATION",
            Self::MasterDetail => "MASTER_DETAIL",
            Self::DeleteCheck => "DELETE_CHECK",
            Self::Custom => "CUSTOM",
        }
    }
}

impl std::fmt::Display for BusinessRuleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BusinessRule {
    pub rule_type: BusinessRuleType,
    pub description: String,
    /// Field references as `block.field`.
    pub affected_fields: Vec<String>,
}

impl BusinessRule {
    pub fn new(
        rule_type: BusinessRuleType,
        description: impl Into<String>,
        affected_fields: Vec<String>,
    ) -> Self {
        Self {
            rule_type,
            description: description.into(),
            affected_fields,
        }
    }
}

// ============================================================================
// REPORTS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TriggerLevel {
    Form,
    Block,
}

/// Analysis of one trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TriggerReport {
    /// 1-based, shared across form and block levels.
    pub sequence: usize,
    pub trigger_name: String,
    pub event_description: String,
    pub java_use: String,
    pub platform_location: String,
    pub level: TriggerLevel,
    pub block_name: Option<String>,
    /// Set for triggers attached to an item.
    pub item_name: Option<String>,
    pub decoded_text: String,
    pub sql: Vec<ExtractedSql>,
    pub rules: Vec<BusinessRule>,
    pub summary: String,
}

/// Triggers of one block, its own first, then its items'.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BlockTriggers {
    pub block_name: String,
    pub triggers: Vec<TriggerReport>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TriggerStatistics {
    pub total_count: usize,
    pub form_level_count: usize,
    pub block_level_count: usize,
    /// Trigger count per upper-cased event name, first-seen order.
    pub by_event: IndexMap<String, usize>,
    /// Rule count per rule type name, first-seen order.
    pub by_rule_type: IndexMap<String, usize>,
}

impl TriggerStatistics {
    pub(super) fn collect(form_level: &[TriggerReport], block_level: &[BlockTriggers]) -> Self {
        let mut stats = Self {
            form_level_count: form_level.len(),
            block_level_count: block_level.iter().map(|b| b.triggers.len()).sum(),
            ..Self::default()
        };
        stats.total_count = stats.form_level_count + stats.block_level_count;

        let all = form_level
            .iter()
            .chain(block_level.iter().flat_map(|b| b.triggers.iter()));
        for report in all {
            *stats
                .by_event
                .entry(report.trigger_name.to_ascii_uppercase())
                .or_insert(0) += 1;
            for rule in &report.rules {
                *stats
                    .by_rule_type
                    .entry(rule.rule_type.as_str().to_string())
                    .or_insert(0) += 1;
            }
        }
        stats
    }
}

/// Analyzer output for a whole module.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TriggerSectionReport {
    pub form_level: Vec<TriggerReport>,
    pub block_level: Vec<BlockTriggers>,
    pub statistics: TriggerStatistics,
}

impl TriggerSectionReport {
    /// All reports in sequence order.
    pub fn reports(&self) -> impl Iterator<Item = &TriggerReport> {
        self.form_level
            .iter()
            .chain(self.block_level.iter().flat_map(|b| b.triggers.iter()))
    }
}
