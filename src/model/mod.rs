//! Immutable Forms module tree produced by the parser.
//!
//! ```text
//! Module
//! ├── blocks: Vec<Block>
//! │   ├── items: Vec<Item>        (each with its own triggers)
//! │   └── triggers: Vec<Trigger>
//! ├── canvases: Vec<Canvas>       (each with tab pages)
//! ├── lovs: Vec<Lov>
//! ├── record_groups: Vec<RecordGroup>
//! └── triggers: Vec<Trigger>      (form level)
//! ```
//!
//! Ownership is by containment only; nothing points back to its owner.

mod item;
mod objects;

pub use item::{Item, ItemKind};
pub use objects::{
    Canvas, CanvasKind, Lov, LovColumnMapping, RecordGroup, RecordGroupColumn, RecordGroupKind,
    TabPage, Trigger, TriggerStyle,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A parsed Forms module.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Module {
    pub name: String,
    pub title: Option<String>,
    pub blocks: Vec<Block>,
    pub canvases: Vec<Canvas>,
    pub lovs: Vec<Lov>,
    pub record_groups: Vec<RecordGroup>,
    /// Form-level triggers.
    pub triggers: Vec<Trigger>,
    /// Raw attributes of the element that carries the module name.
    pub attributes: Vec<(String, String)>,
}

/// A data block: a group of items, usually bound to one table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Block {
    pub name: String,
    /// Query data source (table or view) name.
    pub query_source: Option<String>,
    pub single_record: bool,
    pub where_clause: Option<String>,
    pub order_by: Option<String>,
    pub items: Vec<Item>,
    pub triggers: Vec<Trigger>,
}

impl Module {
    /// Find a block by name (ASCII case-insensitive).
    pub fn find_block(&self, name: &str) -> Option<&Block> {
        self.blocks.iter().find(|b| b.name.eq_ignore_ascii_case(name))
    }

    /// Find a canvas by name (ASCII case-insensitive).
    pub fn find_canvas(&self, name: &str) -> Option<&Canvas> {
        self.canvases.iter().find(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Total number of items across all blocks.
    pub fn item_count(&self) -> usize {
        self.blocks.iter().map(|b| b.items.len()).sum()
    }

    /// Every trigger in the module: form level first, then each block's
    /// own triggers followed by its items' triggers.
    pub fn all_triggers(&self) -> impl Iterator<Item = &Trigger> {
        self.triggers.iter().chain(self.blocks.iter().flat_map(|block| {
            block
                .triggers
                .iter()
                .chain(block.items.iter().flat_map(|item| item.triggers.iter()))
        }))
    }
}

impl Block {
    /// Find an item by name (ASCII case-insensitive).
    pub fn find_item(&self, name: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.name.eq_ignore_ascii_case(name))
    }
}
