//! Normalized field definitions.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::max_type::MaxType;
use crate::model::ItemKind;

/// One field of the target form.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FieldDefinition {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub area: Area,
    pub input_mode: InputMode,
    /// Source table of a detail field's block; empty for header and list
    /// fields and for blocks without a table.
    pub relationship: String,
    /// Top-level tab (header fields only).
    pub tab_name: Option<String>,
    /// Tab inside a detail table (detail fields only).
    pub sub_tab_name: Option<String>,
    pub lov: Option<String>,
    pub max_length: u32,
    /// Trailing description item of a multipart field.
    pub description_field: Option<String>,
    pub max_type: MaxType,
    /// Source block the field came from.
    pub block: String,
}

impl FieldDefinition {
    /// A read-only copy placed in the list area.
    pub fn to_list_field(&self) -> Self {
        Self {
            area: Area::List,
            input_mode: InputMode::Readonly,
            relationship: String::new(),
            tab_name: None,
            sub_tab_name: None,
            ..self.clone()
        }
    }

    /// True for fields eligible for the list area.
    pub fn is_listable(&self) -> bool {
        !matches!(self.kind, FieldKind::Button | FieldKind::Static)
    }
}

/// Widget of the target form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FieldKind {
    Textbox,
    Checkbox,
    Combobox,
    Static,
    Button,
    /// Code entry plus read-only description.
    Multipart,
}

impl FieldKind {
    /// Widget for a standalone item of the given kind.
    pub fn for_item(kind: ItemKind) -> Self {
        match kind {
            ItemKind::TextItem => Self::Textbox,
            ItemKind::Checkbox => Self::Checkbox,
            ItemKind::ListItem | ItemKind::RadioGroup => Self::Combobox,
            ItemKind::PushButton => Self::Button,
            ItemKind::DisplayItem
            | ItemKind::Image
            | ItemKind::BeanArea
            | ItemKind::Chart
            | ItemKind::UserArea => Self::Static,
        }
    }
}

/// Placement on the target form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Area {
    Header,
    Detail,
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum InputMode {
    Required,
    Readonly,
    Optional,
}

impl InputMode {
    /// Required wins over disabled; everything else is optional.
    pub fn for_flags(required: bool, enabled: bool) -> Self {
        if required {
            Self::Required
        } else if !enabled {
            Self::Readonly
        } else {
            Self::Optional
        }
    }
}
