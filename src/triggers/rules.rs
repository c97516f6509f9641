//! Business-rule classification of decoded trigger text.
//!
//! Each detector is independent; a trigger can match several. Detectors
//! run in table order, which is also the order rules and summary phrases
//! are reported in. When nothing matches, a single CUSTOM rule is derived
//! from the trigger's name.

use regex::Regex;
use std::sync::LazyLock;

use super::report::{BusinessRule, BusinessRuleType, ExtractedSql, SqlKind};
use super::sql::{ASSIGN_CALL, BIND_REF, bind_refs, is_builtin_function, normalize_space};

/// Summary for triggers that only restate default behavior.
pub const NO_OP_SUMMARY: &str = "No special handling (default behavior)";

static FAILURE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\braise\s+form_trigger_failure\b|\braise_application_error\s*\(|\b\w*alert\w*\s*\(")
        .unwrap()
});

static MESSAGE_CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)\b(?:\w*alert\w*|message|raise_application_error)\s*\(([^;]*)\)").unwrap()
});

static STRING_LITERAL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"'((?:[^']|'')*)'").unwrap());

static IF_CONDITION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)\b(?:els)?if\s+(.*?)\s+then\b").unwrap());

static ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s):([A-Za-z_][\w$#]*)\.([A-Za-z_][\w$#]*)\s*:=\s*([^;]+);").unwrap()
});

static NAVIGATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(go_block|go_item|go_record|next_block|previous_block|next_item|previous_item|next_record|previous_record|first_record|last_record)\b(?:\s*\(\s*'([^']*)')?")
        .unwrap()
});

static BIND_EQUALITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([\w$#.]+)\s*=\s*:([A-Za-z_][\w$#]*\.[A-Za-z_][\w$#]*)").unwrap()
});

static BIND_EQUALITY_REVERSED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i):([A-Za-z_][\w$#]*\.[A-Za-z_][\w$#]*)\s*=\s*([\w$#.]+)").unwrap()
});

static ROW_COUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)\bselect\s+count\s*\(").unwrap());

/// Inputs shared by every detector.
pub struct RuleInput<'a> {
    pub trigger_name: &'a str,
    pub text: &'a str,
    pub sql: &'a [ExtractedSql],
}

/// One entry of the ordered detector table.
pub struct RuleDetector {
    pub rule_type: BusinessRuleType,
    pub detect: fn(&RuleInput<'_>) -> Vec<BusinessRule>,
}

pub const RULE_DETECTORS: &[RuleDetector] = &[
    RuleDetector {
        rule_type: BusinessRuleType::Validation,
        detect: detect_validation,
    },
    RuleDetector {
        rule_type: BusinessRuleType::AutoPopulate,
        detect: detect_auto_populate,
    },
    RuleDetector {
        rule_type: BusinessRuleType::Calculation,
        detect: detect_calculation,
    },
    RuleDetector {
        rule_type: BusinessRuleType::Navigation,
        detect: detect_navigation,
    },
    RuleDetector {
        rule_type: BusinessRuleType::MasterDetail,
        detect: detect_master_detail,
    },
    RuleDetector {
        rule_type: BusinessRuleType::DeleteCheck,
        detect: detect_delete_check,
    },
];

/// Name fragments that hint at a trigger's purpose, checked in order.
const CUSTOM_DESCRIPTIONS: &[(&str, &str)] = &[
    ("BUTTON", "Button action processing"),
    ("QUERY", "Query processing logic"),
    ("INSERT", "Insert processing logic"),
    ("UPDATE", "Update processing logic"),
    ("DELETE", "Delete processing logic"),
];

const DEFAULT_CUSTOM_DESCRIPTION: &str = "Custom business logic";

/// Classify decoded, non-no-op trigger text. Never returns an empty list.
pub fn classify_rules(trigger_name: &str, text: &str, sql: &[ExtractedSql]) -> Vec<BusinessRule> {
    let input = RuleInput {
        trigger_name,
        text,
        sql,
    };
    let mut rules: Vec<BusinessRule> = RULE_DETECTORS
        .iter()
        .flat_map(|detector| (detector.detect)(&input))
        .collect();

    if rules.is_empty() {
        rules.push(BusinessRule::new(
            BusinessRuleType::Custom,
            custom_description(trigger_name),
            bind_refs(text),
        ));
    }
    rules
}

/// One-line summary of the rules found.
pub fn summarize(rules: &[BusinessRule]) -> String {
    let mut phrases: Vec<String> = Vec::new();
    for detector in RULE_DETECTORS {
        let matching: Vec<&BusinessRule> = rules
            .iter()
            .filter(|r| r.rule_type == detector.rule_type)
            .collect();
        if matching.is_empty() {
            continue;
        }
        let phrase = match detector.rule_type {
            BusinessRuleType::Validation => "validation".to_string(),
            BusinessRuleType::AutoPopulate => {
                let fields: Vec<&str> = matching
                    .iter()
                    .flat_map(|r| r.affected_fields.iter().map(String::as_str))
                    .collect();
                format!("auto-generate ({})", fields.join(","))
            }
            BusinessRuleType::Calculation => "calculation".to_string(),
            BusinessRuleType::Navigation => "navigation".to_string(),
            BusinessRuleType::MasterDetail => "master-detail".to_string(),
            BusinessRuleType::DeleteCheck => "delete-check".to_string(),
            BusinessRuleType::Custom => continue,
        };
        phrases.push(phrase);
    }

    if phrases.is_empty() {
        return rules
            .iter()
            .find(|r| r.rule_type == BusinessRuleType::Custom)
            .map_or_else(|| NO_OP_SUMMARY.to_string(), |r| r.description.clone());
    }
    phrases.join(", ")
}

fn custom_description(trigger_name: &str) -> &'static str {
    let upper = trigger_name.to_ascii_uppercase();
    CUSTOM_DESCRIPTIONS
        .iter()
        .find(|(fragment, _)| upper.contains(fragment))
        .map_or(DEFAULT_CUSTOM_DESCRIPTION, |(_, description)| *description)
}

// ============================================================================
// DETECTORS
// ============================================================================

fn detect_validation(input: &RuleInput<'_>) -> Vec<BusinessRule> {
    let Some(failure) = FAILURE.find(input.text) else {
        return Vec::new();
    };

    // Guarding condition: the last IF before the failure
    let guard = IF_CONDITION.captures_iter(&input.text[..failure.start()]).last();

    // Only a message raised between the guard and the failing statement
    // explains the failure
    let region_start = guard
        .as_ref()
        .and_then(|caps| caps.get(0))
        .map_or(0, |m| m.end());
    let region_end = input.text[failure.start()..]
        .find(';')
        .map_or(input.text.len(), |offset| failure.start() + offset + 1);
    if let Some(message) = alert_message(&input.text[region_start..region_end]) {
        return vec![BusinessRule::new(
            BusinessRuleType::Validation,
            format!("Validation: {message}"),
            Vec::new(),
        )];
    }

    let condition = guard
        .as_ref()
        .and_then(|caps| caps.get(1))
        .map(|m| normalize_space(m.as_str()));

    match condition {
        Some(condition) => {
            let fields = bind_refs(&condition);
            vec![BusinessRule::new(
                BusinessRuleType::Validation,
                format!("Validation when {condition}"),
                fields,
            )]
        }
        None => vec![BusinessRule::new(
            BusinessRuleType::Validation,
            "Input validation",
            Vec::new(),
        )],
    }
}

/// First human-readable string literal passed to an alert or message call
/// within `text`.
fn alert_message(text: &str) -> Option<String> {
    MESSAGE_CALL
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .flat_map(|args| {
            STRING_LITERAL
                .captures_iter(args.as_str())
                .filter_map(|lit| lit.get(1))
                .map(|lit| lit.as_str().replace("''", "'"))
                .collect::<Vec<_>>()
        })
        .find(|literal| is_human_readable(literal))
}

/// Alert names and item names are identifiers; messages are not.
fn is_human_readable(literal: &str) -> bool {
    let trimmed = literal.trim();
    !trimmed.is_empty()
        && trimmed
            .chars()
            .any(|c| c.is_whitespace() || !c.is_ascii() || matches!(c, '!' | '?' | '.'))
}

fn detect_auto_populate(input: &RuleInput<'_>) -> Vec<BusinessRule> {
    ASSIGN_CALL
        .captures_iter(input.text)
        .filter_map(|caps| {
            let (block, field, function) = (caps.get(1)?, caps.get(2)?, caps.get(3)?);
            if is_builtin_function(function.as_str()) {
                return None;
            }
            let target = format!("{}.{}", block.as_str(), field.as_str());
            Some(BusinessRule::new(
                BusinessRuleType::AutoPopulate,
                format!("{target} is populated by {}()", function.as_str()),
                vec![target],
            ))
        })
        .collect()
}

fn detect_calculation(input: &RuleInput<'_>) -> Vec<BusinessRule> {
    ASSIGNMENT
        .captures_iter(input.text)
        .filter_map(|caps| {
            let (block, field, expr) = (caps.get(1)?, caps.get(2)?, caps.get(3)?);
            let bare = STRING_LITERAL.replace_all(expr.as_str(), "''");
            let has_operator = bare.chars().any(|c| matches!(c, '+' | '-' | '*' | '/'));
            if !has_operator || BIND_REF.find_iter(&bare).count() < 2 {
                return None;
            }
            let target = format!("{}.{}", block.as_str(), field.as_str());
            let mut fields = vec![target.clone()];
            fields.extend(bind_refs(&bare).into_iter().filter(|f| *f != target));
            Some(BusinessRule::new(
                BusinessRuleType::Calculation,
                format!("{target} = {}", normalize_space(expr.as_str())),
                fields,
            ))
        })
        .collect()
}

fn detect_navigation(input: &RuleInput<'_>) -> Vec<BusinessRule> {
    let mut targets: Vec<String> = Vec::new();
    let mut calls: Vec<String> = Vec::new();
    for caps in NAVIGATION.captures_iter(input.text) {
        match caps.get(2) {
            Some(target) if !target.as_str().trim().is_empty() => {
                let target = target.as_str().trim().to_string();
                if !targets.contains(&target) {
                    targets.push(target);
                }
            }
            _ => {
                if let Some(call) = caps.get(1) {
                    let call = call.as_str().to_ascii_lowercase();
                    if !calls.contains(&call) {
                        calls.push(call);
                    }
                }
            }
        }
    }

    if targets.is_empty() && calls.is_empty() {
        return Vec::new();
    }
    let description = if targets.is_empty() {
        format!("Navigation ({})", calls.join(", "))
    } else {
        format!("Navigates to {}", targets.join(", "))
    };
    vec![BusinessRule::new(
        BusinessRuleType::Navigation,
        description,
        targets,
    )]
}

fn detect_master_detail(input: &RuleInput<'_>) -> Vec<BusinessRule> {
    input
        .sql
        .iter()
        .filter(|stmt| stmt.kind == SqlKind::Cursor)
        .filter_map(|stmt| {
            let (column, bind) = bind_equality(&stmt.text)?;
            let table = stmt.tables.first().map_or("?", String::as_str);
            Some(BusinessRule::new(
                BusinessRuleType::MasterDetail,
                format!("Loads {table} rows where {column} = :{bind}"),
                bind_refs(&stmt.text),
            ))
        })
        .collect()
}

/// First `column = :block.field` comparison, written either way round.
fn bind_equality(text: &str) -> Option<(&str, &str)> {
    if let Some(caps) = BIND_EQUALITY.captures(text) {
        return Some((caps.get(1)?.as_str(), caps.get(2)?.as_str()));
    }
    let caps = BIND_EQUALITY_REVERSED.captures(text)?;
    Some((caps.get(2)?.as_str(), caps.get(1)?.as_str()))
}

fn detect_delete_check(input: &RuleInput<'_>) -> Vec<BusinessRule> {
    if !input.trigger_name.trim().eq_ignore_ascii_case("PRE-DELETE") || !ROW_COUNT.is_match(input.text)
    {
        return Vec::new();
    }

    let counted = input
        .sql
        .iter()
        .find(|stmt| stmt.kind == SqlKind::Select && ROW_COUNT.is_match(&stmt.text));
    let (tables, fields) = counted.map_or_else(
        || (String::from("dependent tables"), bind_refs(input.text)),
        |stmt| (stmt.tables.join(", "), bind_refs(&stmt.text)),
    );
    vec![BusinessRule::new(
        BusinessRuleType::DeleteCheck,
        format!("Checks for dependent rows in {tables} before delete"),
        fields,
    )]
}
