//! Canvases, lists of values, record groups and triggers.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// CANVASES
// ============================================================================

/// A drawing surface; tab canvases own tab pages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Canvas {
    pub name: String,
    pub kind: CanvasKind,
    pub tab_pages: Vec<TabPage>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TabPage {
    pub name: String,
    pub label: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CanvasKind {
    #[default]
    Content,
    Stacked,
    Tab,
    HorizontalToolbar,
    VerticalToolbar,
}

impl CanvasKind {
    /// Parse an export spelling; unknown spellings are content canvases.
    pub fn from_export(raw: &str) -> Self {
        let normalized: String = raw
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "stacked" => Self::Stacked,
            "tab" => Self::Tab,
            "horizontaltoolbar" => Self::HorizontalToolbar,
            "verticaltoolbar" => Self::VerticalToolbar,
            _ => Self::Content,
        }
    }
}

// ============================================================================
// LISTS OF VALUES AND RECORD GROUPS
// ============================================================================

/// A list of values popup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Lov {
    pub name: String,
    pub title: Option<String>,
    pub record_group: Option<String>,
    pub mappings: Vec<LovColumnMapping>,
}

/// One LOV column and the item it returns its value into.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LovColumnMapping {
    pub column: String,
    pub return_item: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RecordGroup {
    pub name: String,
    pub kind: RecordGroupKind,
    pub query: Option<String>,
    pub columns: Vec<RecordGroupColumn>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RecordGroupColumn {
    pub name: String,
    pub data_type: Option<String>,
    pub max_length: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RecordGroupKind {
    #[default]
    Query,
    Static,
}

impl RecordGroupKind {
    /// Parse an export spelling. A missing kind is inferred from the
    /// presence of query text.
    pub fn from_export(raw: Option<&str>, has_query: bool) -> Self {
        match raw.map(|r| r.trim().to_ascii_lowercase()).as_deref() {
            Some("static") => Self::Static,
            Some("query") => Self::Query,
            _ if has_query => Self::Query,
            _ => Self::Static,
        }
    }
}

// ============================================================================
// TRIGGERS
// ============================================================================

/// An event handler. The text is kept exactly as exported, entities and all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Trigger {
    /// Event identifier, e.g. `PRE-INSERT`.
    pub name: String,
    pub kind: TriggerStyle,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TriggerStyle {
    #[default]
    PlSql,
    V2,
    Unknown,
}

impl TriggerStyle {
    pub fn from_export(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::PlSql;
        };
        let normalized: String = raw
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "" | "plsql" => Self::PlSql,
            "v2" | "v2trigger" | "v2style" => Self::V2,
            _ => Self::Unknown,
        }
    }
}
