//! Structural parser: FMB XML text → [`Module`] tree.
//!
//! Two document shapes are accepted:
//!
//! ```text
//! <Module Name="ORDERS">          <Module version="...">
//!   <Block .../>                    <FormModule Name="ORDERS">
//!   <Canvas .../>                     <Block .../>
//! </Module>                         </FormModule>
//!                                 </Module>
//! ```
//!
//! When a `FormModule` child exists it is the container for blocks,
//! canvases, LOVs, record groups and triggers. Children are found by local
//! tag name, so namespace prefixes never matter, and every attribute goes
//! through layered resolution.
//!
//! Only malformed XML and a non-`Module` root are fatal. Anything odd
//! inside a block or item falls back to defaults.

use crate::error::{FormsError, Result};
use crate::model::{
    Block, Canvas, CanvasKind, Item, ItemKind, Lov, LovColumnMapping, Module, RecordGroup,
    RecordGroupColumn, RecordGroupKind, TabPage, Trigger, TriggerStyle,
};
use crate::xml::{XmlElement, read_document};

/// Local tag names of the export dialect.
mod tags {
    pub const MODULE: &str = "Module";
    pub const FORM_MODULE: &str = "FormModule";
    pub const BLOCK: &str = "Block";
    pub const ITEM: &str = "Item";
    pub const CANVAS: &str = "Canvas";
    pub const TAB_PAGE: &str = "TabPage";
    pub const LOV: &str = "LOV";
    pub const LOV_COLUMN_MAPPING: &str = "LOVColumnMapping";
    pub const RECORD_GROUP: &str = "RecordGroup";
    pub const RECORD_GROUP_COLUMN: &str = "RecordGroupColumn";
    pub const TRIGGER: &str = "Trigger";
}

/// Parse FMB XML text into a module tree.
pub fn parse(xml: &str) -> Result<Module> {
    let root = read_document(xml)?;
    parse_element(&root)
}

/// Parse FMB XML bytes; the input must be UTF-8.
pub fn parse_bytes(input: &[u8]) -> Result<Module> {
    let text = std::str::from_utf8(input).map_err(|e| FormsError::Utf8(e.to_string()))?;
    parse(text)
}

/// Build a module from an already-read root element.
pub fn parse_element(root: &XmlElement) -> Result<Module> {
    if !root.is_named(tags::MODULE) {
        return Err(FormsError::missing_root(root.local_name()));
    }

    let container = root.child(tags::FORM_MODULE).unwrap_or(root);
    // Name and title live on whichever element carries them
    let carriers = [container, root];
    let named = carriers
        .iter()
        .copied()
        .find(|el| el.attr_non_empty("Name").is_some())
        .unwrap_or(container);
    let title = carriers
        .iter()
        .find_map(|el| el.attr_non_empty("Title"))
        .map(str::to_string);

    let module = Module {
        name: named.attr("Name").unwrap_or_default().to_string(),
        title,
        blocks: container.children_named(tags::BLOCK).map(parse_block).collect(),
        canvases: container.children_named(tags::CANVAS).map(parse_canvas).collect(),
        lovs: container.children_named(tags::LOV).map(parse_lov).collect(),
        record_groups: container
            .children_named(tags::RECORD_GROUP)
            .map(parse_record_group)
            .collect(),
        triggers: parse_triggers(container),
        attributes: named.attributes.clone(),
    };

    tracing::debug!(
        module = %module.name,
        blocks = module.blocks.len(),
        items = module.item_count(),
        canvases = module.canvases.len(),
        lovs = module.lovs.len(),
        record_groups = module.record_groups.len(),
        "parsed forms module"
    );

    Ok(module)
}

// ============================================================================
// ELEMENT PARSERS
// ============================================================================

fn parse_block(el: &XmlElement) -> Block {
    let single_record = el.attr_bool("SingleRecord").unwrap_or_else(|| {
        el.attr_int("RecordsDisplayCount")
            .is_some_and(|count| count <= 1)
    });

    let block = Block {
        name: name_of(el),
        query_source: text(el, "QueryDataSourceName"),
        single_record,
        where_clause: text(el, "WhereClause"),
        order_by: text(el, "OrderByClause"),
        items: el.children_named(tags::ITEM).map(parse_item).collect(),
        triggers: parse_triggers(el),
    };
    tracing::trace!(block = %block.name, items = block.items.len(), "parsed block");
    block
}

fn parse_item(el: &XmlElement) -> Item {
    let kind = el
        .attr_non_empty("ItemType")
        .map_or(ItemKind::TextItem, ItemKind::from_export);

    Item {
        name: name_of(el),
        kind,
        prompt: text(el, "Prompt"),
        label: text(el, "Label"),
        canvas: text(el, "CanvasName"),
        tab_page: text(el, "TabPageName"),
        data_type: text(el, "DataType"),
        max_length: length(el, "MaximumLength"),
        required: el.attr_bool("Required").unwrap_or(false),
        enabled: el.attr_bool("Enabled").unwrap_or(true),
        visible: el.attr_bool("Visible").unwrap_or(true),
        lov: text(el, "LovName"),
        hint: text(el, "Hint"),
        default_value: text(el, "InitializeValue"),
        triggers: parse_triggers(el),
    }
}

fn parse_canvas(el: &XmlElement) -> Canvas {
    Canvas {
        name: name_of(el),
        kind: el
            .attr_non_empty("CanvasType")
            .map_or(CanvasKind::Content, CanvasKind::from_export),
        tab_pages: el
            .children_named(tags::TAB_PAGE)
            .map(|page| TabPage {
                name: name_of(page),
                label: text(page, "Label"),
            })
            .collect(),
    }
}

fn parse_lov(el: &XmlElement) -> Lov {
    Lov {
        name: name_of(el),
        title: text(el, "Title"),
        record_group: text(el, "RecordGroupName"),
        mappings: el
            .children_named(tags::LOV_COLUMN_MAPPING)
            .map(|mapping| LovColumnMapping {
                column: name_of(mapping),
                return_item: text(mapping, "ReturnItem"),
            })
            .collect(),
    }
}

fn parse_record_group(el: &XmlElement) -> RecordGroup {
    let query = text(el, "RecordGroupQuery");
    RecordGroup {
        name: name_of(el),
        kind: RecordGroupKind::from_export(el.attr_non_empty("RecordGroupType"), query.is_some()),
        query,
        columns: el
            .children_named(tags::RECORD_GROUP_COLUMN)
            .map(|column| RecordGroupColumn {
                name: name_of(column),
                data_type: text(column, "ColumnDataType"),
                max_length: length(column, "MaximumLength"),
            })
            .collect(),
    }
}

fn parse_triggers(owner: &XmlElement) -> Vec<Trigger> {
    owner
        .children_named(tags::TRIGGER)
        .map(|el| Trigger {
            name: name_of(el),
            kind: TriggerStyle::from_export(el.attr_non_empty("TriggerStyle")),
            text: text(el, "TriggerText"),
        })
        .collect()
}

// ============================================================================
// ATTRIBUTE HELPERS
// ============================================================================

fn name_of(el: &XmlElement) -> String {
    el.attr("Name").unwrap_or_default().to_string()
}

/// Non-empty attribute value, kept verbatim.
fn text(el: &XmlElement, logical: &str) -> Option<String> {
    el.attr_non_empty(logical).map(str::to_string)
}

/// Positive length attribute.
fn length(el: &XmlElement, logical: &str) -> Option<u32> {
    el.attr_int(logical)
        .filter(|n| *n > 0)
        .and_then(|n| u32::try_from(n).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_module_root() {
        let err = parse(r#"<Form Name="X"/>"#).unwrap_err();
        assert_eq!(err, FormsError::missing_root("Form"));
    }

    #[test]
    fn test_reports_malformed_xml() {
        let err = parse("<Module><Block></Module>").unwrap_err();
        assert!(matches!(err, FormsError::Xml(_)));
    }

    #[test]
    fn test_rejects_invalid_utf8() {
        let err = parse_bytes(&[0x3c, 0xff, 0xfe]).unwrap_err();
        assert!(matches!(err, FormsError::Utf8(_)));
    }

    #[test]
    fn test_item_defaults() {
        let module = parse(r#"<Module Name="M"><Block Name="B"><Item Name="X"/></Block></Module>"#)
            .unwrap();
        let item = &module.blocks[0].items[0];
        assert_eq!(item.kind, ItemKind::TextItem);
        assert!(!item.required);
        assert!(item.enabled);
        assert!(item.visible);
        assert_eq!(item.max_length, None);
        assert_eq!(item.prompt, None);
    }

    #[test]
    fn test_single_record_flag() {
        let xml = r#"<Module Name="M">
            <Block Name="A" RecordsDisplayCount="1"/>
            <Block Name="B" RecordsDisplayCount="10"/>
            <Block Name="C" SingleRecord="true" RecordsDisplayCount="10"/>
            <Block Name="D"/>
        </Module>"#;
        let module = parse(xml).unwrap();
        let flags: Vec<_> = module.blocks.iter().map(|b| b.single_record).collect();
        assert_eq!(flags, vec![true, false, true, false]);
    }

    #[test]
    fn test_negative_length_is_dropped() {
        let xml = r#"<Module Name="M"><Block Name="B"><Item Name="X" MaximumLength="-5"/></Block></Module>"#;
        let module = parse(xml).unwrap();
        assert_eq!(module.blocks[0].items[0].max_length, None);
    }
}
