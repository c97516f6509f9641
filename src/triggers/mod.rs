//! Trigger analyzer: decodes trigger text, extracts SQL-like statements
//! and classifies business-rule intent.
//!
//! ## Per trigger
//!
//! ```text
//! raw text ──decode──► decoded ──no-op?──► fixed summary, no SQL, no rules
//!                         │
//!                         ├──► extract_sql ──► Vec<ExtractedSql>
//!                         ├──► classify_rules ──► Vec<BusinessRule>
//!                         └──► summarize ──► one line
//! ```
//!
//! Form-level triggers are numbered first, then each block's triggers
//! (block triggers before item triggers), from one shared counter
//! starting at 1.

mod decode;
mod events;
mod report;
mod rules;
mod sql;

pub use decode::{decode_entities, is_no_op};
pub use events::{EVENTS, EventDescription, EventInfo, describe_event, lookup_event};
pub use report::{
    BlockTriggers, BusinessRule, BusinessRuleType, ExtractedSql, SqlKind, TriggerLevel,
    TriggerReport, TriggerSectionReport, TriggerStatistics,
};
pub use rules::{NO_OP_SUMMARY, RULE_DETECTORS, RuleDetector, RuleInput, classify_rules, summarize};
pub use sql::{bind_refs, extract_sql, from_tables, is_builtin_function};

use crate::model::{Module, Trigger};

/// Where a trigger is attached.
#[derive(Debug, Clone, Copy)]
struct Owner<'a> {
    level: TriggerLevel,
    block: Option<&'a str>,
    item: Option<&'a str>,
}

impl Owner<'_> {
    const FORM: Self = Owner {
        level: TriggerLevel::Form,
        block: None,
        item: None,
    };
}

/// Analyze every trigger in the module.
pub fn analyze(module: &Module) -> TriggerSectionReport {
    let mut sequence = 0;
    let mut next_sequence = || {
        sequence += 1;
        sequence
    };

    let form_level: Vec<TriggerReport> = module
        .triggers
        .iter()
        .map(|trigger| analyze_trigger(trigger, next_sequence(), Owner::FORM))
        .collect();

    let mut block_level = Vec::new();
    for block in &module.blocks {
        let owner = Owner {
            level: TriggerLevel::Block,
            block: Some(block.name.as_str()),
            item: None,
        };
        let mut reports: Vec<TriggerReport> = block
            .triggers
            .iter()
            .map(|trigger| analyze_trigger(trigger, next_sequence(), owner))
            .collect();
        for item in &block.items {
            let owner = Owner {
                item: Some(item.name.as_str()),
                ..owner
            };
            reports.extend(
                item.triggers
                    .iter()
                    .map(|trigger| analyze_trigger(trigger, next_sequence(), owner)),
            );
        }
        if !reports.is_empty() {
            block_level.push(BlockTriggers {
                block_name: block.name.clone(),
                triggers: reports,
            });
        }
    }

    let statistics = TriggerStatistics::collect(&form_level, &block_level);
    tracing::debug!(
        module = %module.name,
        total = statistics.total_count,
        form_level = statistics.form_level_count,
        block_level = statistics.block_level_count,
        "analyzed triggers"
    );

    TriggerSectionReport {
        form_level,
        block_level,
        statistics,
    }
}

fn analyze_trigger(trigger: &Trigger, sequence: usize, owner: Owner<'_>) -> TriggerReport {
    let decoded_text = decode_entities(trigger.text.as_deref());
    let event = describe_event(&trigger.name);

    let (sql, rules, summary) = if is_no_op(&decoded_text) {
        tracing::trace!(trigger = %trigger.name, "no-op trigger");
        (Vec::new(), Vec::new(), NO_OP_SUMMARY.to_string())
    } else {
        let sql = extract_sql(&decoded_text);
        let rules = classify_rules(&trigger.name, &decoded_text, &sql);
        let summary = summarize(&rules);
        (sql, rules, summary)
    };

    TriggerReport {
        sequence,
        trigger_name: trigger.name.clone(),
        event_description: event.description,
        java_use: event.java_use,
        platform_location: event.location,
        level: owner.level,
        block_name: owner.block.map(str::to_string),
        item_name: owner.item.map(str::to_string),
        decoded_text,
        sql,
        rules,
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Block, Item, ItemKind};

    fn trigger(name: &str, text: &str) -> Trigger {
        Trigger {
            name: name.to_string(),
            text: Some(text.to_string()),
            ..Trigger::default()
        }
    }

    #[test]
    fn test_no_op_trigger_short_circuits() {
        let report = analyze_trigger(&trigger("KEY-COMMIT", "null;"), 1, Owner::FORM);
        assert!(report.rules.is_empty());
        assert!(report.sql.is_empty());
        assert_eq!(report.summary, NO_OP_SUMMARY);
    }

    #[test]
    fn test_encoded_text_is_decoded_before_analysis() {
        let report = analyze_trigger(
            &trigger("WHEN-VALIDATE-ITEM", "IF :b.a &lt; 0 THEN&#10;  raise form_trigger_failure;&#10;END IF;"),
            1,
            Owner::FORM,
        );
        assert_eq!(report.decoded_text, "IF :b.a < 0 THEN\n  raise form_trigger_failure;\nEND IF;");
        assert_eq!(report.rules[0].rule_type, BusinessRuleType::Validation);
    }

    #[test]
    fn test_sequence_and_item_triggers() {
        let mut item = Item::new("QTY", ItemKind::TextItem);
        item.triggers.push(trigger("WHEN-VALIDATE-ITEM", "null;"));
        let module = Module {
            triggers: vec![trigger("PRE-FORM", "null;")],
            blocks: vec![
                Block {
                    name: "B_EMPTY".into(),
                    ..Block::default()
                },
                Block {
                    name: "B_LINE".into(),
                    triggers: vec![trigger("POST-QUERY", "null;")],
                    items: vec![item],
                    ..Block::default()
                },
            ],
            ..Module::default()
        };

        let report = analyze(&module);
        let sequences: Vec<_> = report.reports().map(|r| r.sequence).collect();
        assert_eq!(sequences, vec![1, 2, 3]);
        assert_eq!(report.block_level.len(), 1);
        let line = &report.block_level[0];
        assert_eq!(line.block_name, "B_LINE");
        assert_eq!(line.triggers[1].item_name.as_deref(), Some("QTY"));
        assert_eq!(line.triggers[1].level, TriggerLevel::Block);
        assert_eq!(report.statistics.block_level_count, 2);
    }
}
