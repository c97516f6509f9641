//! Form-level metadata collected alongside the field list.

use indexmap::IndexMap;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::field::{Area, FieldDefinition};
use crate::model::{Module, RecordGroupKind};

/// What downstream generators need to know about the form as a whole.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FormMetadata {
    pub form_name: String,
    pub title: Option<String>,
    /// Source table of the header block.
    pub main_table: Option<String>,
    /// Header tab labels in first-use order.
    pub tabs: Vec<String>,
    /// Detail tables in first-use order.
    pub relationships: Vec<RelationshipInfo>,
    pub header_count: usize,
    pub detail_count: usize,
    pub list_count: usize,
    /// Blocks dropped by naming convention.
    pub skipped_blocks: Vec<String>,
    pub lovs: Vec<LovSummary>,
    pub record_groups: Vec<RecordGroupSummary>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RelationshipInfo {
    pub name: String,
    pub block: String,
    pub field_count: usize,
    pub sub_tabs: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LovSummary {
    pub name: String,
    pub title: Option<String>,
    pub record_group: Option<String>,
    pub columns: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RecordGroupSummary {
    pub name: String,
    pub kind: RecordGroupKind,
    pub query: Option<String>,
    pub columns: Vec<String>,
}

impl FormMetadata {
    pub(super) fn collect(
        module: &Module,
        fields: &[FieldDefinition],
        skipped_blocks: Vec<String>,
    ) -> Self {
        let mut tabs: Vec<String> = Vec::new();
        let mut relationships: IndexMap<&str, RelationshipInfo> = IndexMap::new();
        let (mut header_count, mut detail_count, mut list_count) = (0, 0, 0);

        for field in fields {
            match field.area {
                Area::Header => {
                    header_count += 1;
                    if let Some(tab) = &field.tab_name {
                        if !tabs.contains(tab) {
                            tabs.push(tab.clone());
                        }
                    }
                }
                Area::Detail => {
                    detail_count += 1;
                    if field.relationship.is_empty() {
                        continue;
                    }
                    let info = relationships
                        .entry(field.relationship.as_str())
                        .or_insert_with(|| RelationshipInfo {
                            name: field.relationship.clone(),
                            block: field.block.clone(),
                            ..RelationshipInfo::default()
                        });
                    info.field_count += 1;
                    if let Some(sub_tab) = &field.sub_tab_name {
                        if !info.sub_tabs.contains(sub_tab) {
                            info.sub_tabs.push(sub_tab.clone());
                        }
                    }
                }
                Area::List => list_count += 1,
            }
        }

        Self {
            form_name: module.name.clone(),
            title: module.title.clone(),
            main_table: main_table(module, fields, &skipped_blocks),
            tabs,
            relationships: relationships.into_values().collect(),
            header_count,
            detail_count,
            list_count,
            skipped_blocks,
            lovs: module
                .lovs
                .iter()
                .map(|lov| LovSummary {
                    name: lov.name.clone(),
                    title: lov.title.clone(),
                    record_group: lov.record_group.clone(),
                    columns: lov.mappings.iter().map(|m| m.column.clone()).collect(),
                })
                .collect(),
            record_groups: module
                .record_groups
                .iter()
                .map(|group| RecordGroupSummary {
                    name: group.name.clone(),
                    kind: group.kind,
                    query: group.query.clone(),
                    columns: group.columns.iter().map(|c| c.name.clone()).collect(),
                })
                .collect(),
        }
    }
}

/// Table of the first block contributing header fields, else of the first
/// retained block that has one.
fn main_table(module: &Module, fields: &[FieldDefinition], skipped: &[String]) -> Option<String> {
    let from_header = fields
        .iter()
        .filter(|f| f.area == Area::Header)
        .find_map(|f| module.find_block(&f.block)?.query_source.clone());

    from_header.or_else(|| {
        module
            .blocks
            .iter()
            .filter(|b| !skipped.contains(&b.name))
            .find_map(|b| b.query_source.clone())
    })
}
