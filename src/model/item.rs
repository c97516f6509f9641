#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::Trigger;

/// A UI item inside a block.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Item {
    pub name: String,
    pub kind: ItemKind,
    pub prompt: Option<String>,
    pub label: Option<String>,
    pub canvas: Option<String>,
    pub tab_page: Option<String>,
    pub data_type: Option<String>,
    pub max_length: Option<u32>,
    pub required: bool,
    pub enabled: bool,
    pub visible: bool,
    /// Name of the attached list of values.
    pub lov: Option<String>,
    pub hint: Option<String>,
    pub default_value: Option<String>,
    /// Item-level triggers (WHEN-VALIDATE-ITEM and friends).
    pub triggers: Vec<Trigger>,
}

impl Item {
    /// A visible, enabled, optional text item with nothing else set.
    pub fn new(name: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            name: name.into(),
            kind,
            prompt: None,
            label: None,
            canvas: None,
            tab_page: None,
            data_type: None,
            max_length: None,
            required: false,
            enabled: true,
            visible: true,
            lov: None,
            hint: None,
            default_value: None,
            triggers: Vec::new(),
        }
    }

    /// True when the prompt is missing or blank.
    pub fn has_empty_prompt(&self) -> bool {
        self.prompt.as_deref().is_none_or(|p| p.trim().is_empty())
    }

    /// True if the item sits on the named canvas (ASCII case-insensitive).
    pub fn is_on_canvas(&self, canvas: &str) -> bool {
        self.canvas
            .as_deref()
            .is_some_and(|c| c.eq_ignore_ascii_case(canvas))
    }
}

/// The item type as declared in the export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ItemKind {
    #[default]
    TextItem,
    Checkbox,
    ListItem,
    PushButton,
    DisplayItem,
    RadioGroup,
    Image,
    BeanArea,
    Chart,
    UserArea,
}

/// Spellings seen in exports, normalized (lowercase, no spaces,
/// underscores or hyphens).
const ITEM_KIND_ALIASES: &[(&str, ItemKind)] = &[
    ("textitem", ItemKind::TextItem),
    ("text", ItemKind::TextItem),
    ("checkbox", ItemKind::Checkbox),
    ("listitem", ItemKind::ListItem),
    ("list", ItemKind::ListItem),
    ("poplist", ItemKind::ListItem),
    ("tlist", ItemKind::ListItem),
    ("combobox", ItemKind::ListItem),
    ("pushbutton", ItemKind::PushButton),
    ("button", ItemKind::PushButton),
    ("displayitem", ItemKind::DisplayItem),
    ("display", ItemKind::DisplayItem),
    ("radiogroup", ItemKind::RadioGroup),
    ("radio", ItemKind::RadioGroup),
    ("image", ItemKind::Image),
    ("imageitem", ItemKind::Image),
    ("beanarea", ItemKind::BeanArea),
    ("bean", ItemKind::BeanArea),
    ("chart", ItemKind::Chart),
    ("chartitem", ItemKind::Chart),
    ("userarea", ItemKind::UserArea),
    ("vbxcontrol", ItemKind::UserArea),
    ("activexcontrol", ItemKind::UserArea),
    ("olecontainer", ItemKind::UserArea),
    ("hierarchicaltree", ItemKind::UserArea),
    ("sound", ItemKind::UserArea),
];

impl ItemKind {
    /// Parse an export spelling ("Text Item", "TEXT_ITEM", "text-item").
    ///
    /// Returns `None` for spellings that are not recognized.
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized: String = raw
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();
        ITEM_KIND_ALIASES
            .iter()
            .find(|(alias, _)| *alias == normalized)
            .map(|(_, kind)| *kind)
    }

    /// Parse an export spelling, falling back to [`ItemKind::TextItem`].
    pub fn from_export(raw: &str) -> Self {
        Self::parse(raw).unwrap_or_else(|| {
            tracing::warn!(item_type = raw, "unknown item type, treating as text item");
            Self::TextItem
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Text Item", ItemKind::TextItem)]
    #[case("TEXT_ITEM", ItemKind::TextItem)]
    #[case("text item", ItemKind::TextItem)]
    #[case("Check Box", ItemKind::Checkbox)]
    #[case("CHECKBOX", ItemKind::Checkbox)]
    #[case("List Item", ItemKind::ListItem)]
    #[case("Push Button", ItemKind::PushButton)]
    #[case("PUSH_BUTTON", ItemKind::PushButton)]
    #[case("Display Item", ItemKind::DisplayItem)]
    #[case("Radio Group", ItemKind::RadioGroup)]
    #[case("Image", ItemKind::Image)]
    #[case("Bean Area", ItemKind::BeanArea)]
    #[case("Chart Item", ItemKind::Chart)]
    #[case("User Area", ItemKind::UserArea)]
    #[case("ActiveX Control", ItemKind::UserArea)]
    fn test_item_kind_spellings(#[case] raw: &str, #[case] expected: ItemKind) {
        assert_eq!(ItemKind::parse(raw), Some(expected));
    }

    #[test]
    fn test_unknown_item_kind_defaults_to_text() {
        assert_eq!(ItemKind::parse("Hologram"), None);
        assert_eq!(ItemKind::from_export("Hologram"), ItemKind::TextItem);
    }

    #[test]
    fn test_empty_prompt() {
        let mut item = Item::new("CODE", ItemKind::TextItem);
        assert!(item.has_empty_prompt());
        item.prompt = Some("  ".into());
        assert!(item.has_empty_prompt());
        item.prompt = Some("Code".into());
        assert!(!item.has_empty_prompt());
    }
}
