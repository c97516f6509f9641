//! Field classifier: [`Module`] → flat list of [`FieldDefinition`]s.
//!
//! ## Pipeline
//!
//! ```text
//! canvases ──► TabIndex (tab labels, tab canvases, visible canvases)
//!
//! for each block (minus toolbar/control/hidden conventions):
//!     pair adjacent items into multipart fields
//!     for each item:
//!         drop: off visible canvases, invisible, merged trailer
//!         area: header | detail (rollup tables dropped)
//!         derive relationship, tab / sub-tab, input mode, max type
//!
//! copy the first N listable fields into the list area (read-only)
//! ```
//!
//! Classification never fails; odd input just yields fewer fields.

mod config;
mod field;
mod max_type;
mod metadata;

pub use config::{BlockPattern, ConverterConfig};
pub use field::{Area, FieldDefinition, FieldKind, InputMode};
pub use max_type::{MAX_TYPE_RULES, MaxType, NameRule, infer_max_type};
pub use metadata::{FormMetadata, LovSummary, RecordGroupSummary, RelationshipInfo};

use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::model::{Block, Item, ItemKind, Module};

/// Converter output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Conversion {
    pub fields: Vec<FieldDefinition>,
    pub metadata: FormMetadata,
}

impl Conversion {
    /// Fields placed in the given area, in output order.
    pub fn fields_in(&self, area: Area) -> impl Iterator<Item = &FieldDefinition> {
        self.fields.iter().filter(move |f| f.area == area)
    }
}

/// Classify a module with the default configuration.
pub fn convert(module: &Module) -> Conversion {
    convert_with(module, &ConverterConfig::default())
}

/// Classify a module.
pub fn convert_with(module: &Module, config: &ConverterConfig) -> Conversion {
    let tabs = TabIndex::build(module, config);
    let mut fields = Vec::new();
    let mut skipped_blocks = Vec::new();

    for block in &module.blocks {
        if config.is_skipped_block(&block.name) {
            tracing::trace!(block = %block.name, "skipping block by naming convention");
            skipped_blocks.push(block.name.clone());
            continue;
        }
        convert_block(block, &tabs, config, &mut fields);
    }

    let list_fields: Vec<_> = fields
        .iter()
        .filter(|f| f.is_listable())
        .take(config.list_field_limit)
        .map(FieldDefinition::to_list_field)
        .collect();
    fields.extend(list_fields);

    let metadata = FormMetadata::collect(module, &fields, skipped_blocks);
    tracing::debug!(
        module = %module.name,
        header = metadata.header_count,
        detail = metadata.detail_count,
        list = metadata.list_count,
        "classified fields"
    );

    Conversion { fields, metadata }
}

fn convert_block(
    block: &Block,
    tabs: &TabIndex,
    config: &ConverterConfig,
    fields: &mut Vec<FieldDefinition>,
) {
    let pairing = Pairing::scan(&block.items);
    let is_rollup = block
        .query_source
        .as_deref()
        .is_some_and(|table| config.is_summary_table(table));

    for (index, item) in block.items.iter().enumerate() {
        if pairing.merged.contains(&index) {
            continue;
        }
        let Some(canvas) = item.canvas.as_deref().filter(|c| tabs.is_visible(c)) else {
            tracing::trace!(block = %block.name, item = %item.name, "item not on a visible canvas");
            continue;
        };
        if !item.visible {
            tracing::trace!(block = %block.name, item = %item.name, "item is hidden");
            continue;
        }

        let area = classify_area(item, canvas, tabs, config);
        if area == Area::Detail && is_rollup {
            tracing::trace!(block = %block.name, item = %item.name, "detail item of summary table dropped");
            continue;
        }

        let description = pairing
            .leaders
            .get(&index)
            .map(|&trailer| block.items[trailer].name.clone());
        fields.push(build_field(block, item, area, description, tabs, config));
    }
}

/// Header: the body canvas, or a tabbed item on a non-default tab canvas.
fn classify_area(item: &Item, canvas: &str, tabs: &TabIndex, config: &ConverterConfig) -> Area {
    if config.is_body_canvas(canvas) {
        return Area::Header;
    }
    if tabs.is_tab_canvas(canvas) && !config.is_default_tab_canvas(canvas) && item.tab_page.is_some()
    {
        return Area::Header;
    }
    Area::Detail
}

fn build_field(
    block: &Block,
    item: &Item,
    area: Area,
    description_field: Option<String>,
    tabs: &TabIndex,
    config: &ConverterConfig,
) -> FieldDefinition {
    let kind = if description_field.is_some() {
        FieldKind::Multipart
    } else {
        FieldKind::for_item(item.kind)
    };
    let relationship = match area {
        Area::Detail => block.query_source.clone().unwrap_or_default(),
        Area::Header | Area::List => String::new(),
    };
    let tab_label = item.tab_page.as_deref().map(|page| tabs.label(page));

    FieldDefinition {
        name: item.name.clone(),
        label: label_for(item),
        kind,
        area,
        input_mode: InputMode::for_flags(item.required, item.enabled),
        relationship,
        tab_name: tab_label.clone().filter(|_| area == Area::Header),
        sub_tab_name: tab_label.filter(|_| area == Area::Detail),
        lov: item.lov.clone(),
        max_length: item.max_length.unwrap_or(config.default_max_length),
        description_field,
        max_type: infer_max_type(&item.name),
        block: block.name.clone(),
    }
}

fn label_for(item: &Item) -> String {
    [item.prompt.as_deref(), item.label.as_deref()]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .unwrap_or(&item.name)
        .to_string()
}

// ============================================================================
// TAB INDEX
// ============================================================================

/// Tab-page labels and canvas roles, keyed by upper-cased name.
struct TabIndex {
    labels: IndexMap<String, String>,
    tab_canvases: FxHashSet<String>,
    visible_canvases: FxHashSet<String>,
}

impl TabIndex {
    fn build(module: &Module, config: &ConverterConfig) -> Self {
        let mut labels = IndexMap::new();
        let mut tab_canvases = FxHashSet::default();

        for canvas in &module.canvases {
            if canvas.tab_pages.is_empty() {
                continue;
            }
            tab_canvases.insert(canvas.name.to_ascii_uppercase());
            for page in &canvas.tab_pages {
                let label = page
                    .label
                    .clone()
                    .filter(|l| !l.trim().is_empty())
                    .unwrap_or_else(|| page.name.clone());
                labels.entry(page.name.to_ascii_uppercase()).or_insert(label);
            }
        }

        let mut visible_canvases: FxHashSet<String> = tab_canvases.clone();
        visible_canvases.insert(config.body_canvas.to_ascii_uppercase());
        visible_canvases.insert(config.tab_canvas.to_ascii_uppercase());

        Self {
            labels,
            tab_canvases,
            visible_canvases,
        }
    }

    fn is_visible(&self, canvas: &str) -> bool {
        self.visible_canvases.contains(&canvas.to_ascii_uppercase())
    }

    fn is_tab_canvas(&self, canvas: &str) -> bool {
        self.tab_canvases.contains(&canvas.to_ascii_uppercase())
    }

    /// Label of a tab page, falling back to its raw name.
    fn label(&self, page: &str) -> String {
        self.labels
            .get(&page.to_ascii_uppercase())
            .cloned()
            .unwrap_or_else(|| page.to_string())
    }
}

// ============================================================================
// MULTIPART PAIRING
// ============================================================================

/// Adjacent code/description item pairs within one block.
#[derive(Debug, Default)]
struct Pairing {
    /// Leader index -> trailer index.
    leaders: FxHashMap<usize, usize>,
    /// Trailer indices, excluded from output.
    merged: FxHashSet<usize>,
}

impl Pairing {
    /// Pairs follow declaration order; a merged trailer never leads a pair.
    fn scan(items: &[Item]) -> Self {
        let mut pairing = Self::default();
        let mut index = 0;
        while index + 1 < items.len() {
            if is_description_half(&items[index], &items[index + 1]) {
                tracing::trace!(
                    code = %items[index].name,
                    description = %items[index + 1].name,
                    "paired multipart field"
                );
                pairing.leaders.insert(index, index + 1);
                pairing.merged.insert(index + 1);
                index += 2;
            } else {
                index += 1;
            }
        }
        pairing
    }
}

fn is_description_half(lead: &Item, next: &Item) -> bool {
    let describes = match next.kind {
        ItemKind::DisplayItem => true,
        ItemKind::TextItem => next.has_empty_prompt(),
        _ => false,
    };
    let same_canvas = match (lead.canvas.as_deref(), next.canvas.as_deref()) {
        (Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
        _ => false,
    };
    lead.kind == ItemKind::TextItem && describes && same_canvas
}
