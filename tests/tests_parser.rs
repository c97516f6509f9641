//! Parser Tests - FMB XML → Module
//!
//! Document shapes, layered attributes and the object kinds hanging off
//! a form module.

use fmb::model::{CanvasKind, ItemKind, RecordGroupKind, TriggerStyle};
use fmb::{FormsError, parse, parse_bytes};
use rstest::rstest;

const WRAPPED: &str = include_str!("fixtures/orders_wrapped.xml");
const BARE: &str = include_str!("fixtures/orders_bare.xml");
const LAYERED: &str = include_str!("fixtures/layered.xml");

#[test]
fn test_document_shapes_are_equivalent() {
    let wrapped = parse(WRAPPED).unwrap();
    let bare = parse(BARE).unwrap();
    assert_eq!(wrapped, bare);
}

#[test]
fn test_module_header() {
    let module = parse(WRAPPED).unwrap();
    assert_eq!(module.name, "ORDERS");
    assert_eq!(module.title.as_deref(), Some("Order Entry"));
    assert_eq!(module.blocks.len(), 2);
    assert_eq!(module.item_count(), 3);
}

#[test]
fn test_blocks_and_items() {
    let module = parse(WRAPPED).unwrap();

    let head = module.find_block("b_head").unwrap();
    assert_eq!(head.query_source.as_deref(), Some("TB_ORDER"));
    assert!(head.single_record);
    assert_eq!(head.triggers.len(), 1);

    let order_no = head.find_item("ORDER_NO").unwrap();
    assert_eq!(order_no.kind, ItemKind::TextItem);
    assert!(order_no.required);
    assert_eq!(order_no.max_length, Some(20));
    assert_eq!(order_no.prompt.as_deref(), Some("Order No"));

    let confirm = head.find_item("CONFIRM_YN").unwrap();
    assert_eq!(confirm.kind, ItemKind::Checkbox);
    assert_eq!(confirm.label.as_deref(), Some("Confirmed"));

    let line = module.find_block("B_LINE").unwrap();
    assert!(!line.single_record);
    let item_cd = &line.items[0];
    assert_eq!(item_cd.tab_page.as_deref(), Some("TP_LINE"));
    assert_eq!(item_cd.triggers.len(), 1);
}

#[test]
fn test_canvases_lovs_and_record_groups() {
    let module = parse(WRAPPED).unwrap();

    let tab = module.find_canvas("CANVAS_TAB").unwrap();
    assert_eq!(tab.kind, CanvasKind::Tab);
    assert_eq!(tab.tab_pages[0].label.as_deref(), Some("Lines"));
    assert_eq!(module.find_canvas("CANVAS_BODY").unwrap().kind, CanvasKind::Content);

    let lov = &module.lovs[0];
    assert_eq!(lov.record_group.as_deref(), Some("RG_ITEM"));
    assert_eq!(lov.mappings[0].return_item.as_deref(), Some("B_LINE.ITEM_CD"));

    let group = &module.record_groups[0];
    assert_eq!(group.kind, RecordGroupKind::Query);
    assert_eq!(group.columns[0].max_length, Some(10));
}

#[test]
fn test_trigger_text_is_unescaped_once() {
    let module = parse(WRAPPED).unwrap();
    let trigger = &module.blocks[1].items[0].triggers[0];
    assert_eq!(trigger.kind, TriggerStyle::PlSql);
    assert_eq!(
        trigger.text.as_deref(),
        Some("IF :b_line.item_cd IS NULL THEN\n  raise form_trigger_failure;\nEND IF;")
    );
}

#[test]
fn test_double_encoded_entities_survive_parsing() {
    let xml = r#"<Module Name="M"><Trigger Name="T" TriggerText="a &amp;lt; b"/></Module>"#;
    let module = parse(xml).unwrap();
    assert_eq!(module.triggers[0].text.as_deref(), Some("a &lt; b"));
}

#[rstest]
#[case("CUST_CD", "Customer")]
#[case("CUST_NM", "Customer Name")]
fn test_layered_prompt(#[case] item: &str, #[case] expected: &str) {
    let module = parse(LAYERED).unwrap();
    let item = module.blocks[0].find_item(item).unwrap();
    assert_eq!(item.prompt.as_deref(), Some(expected));
}

#[test]
fn test_empty_layer_falls_through() {
    let module = parse(LAYERED).unwrap();
    assert!(module.blocks[0].find_item("CUST_NM").unwrap().required);
}

#[rstest]
#[case("CUST_TP", ItemKind::Checkbox)]
#[case("ODD_KIND", ItemKind::TextItem)]
fn test_layered_and_unknown_kinds(#[case] item: &str, #[case] expected: ItemKind) {
    let module = parse(LAYERED).unwrap();
    assert_eq!(module.blocks[0].find_item(item).unwrap().kind, expected);
}

#[rstest]
#[case("")]
#[case("<Module>")]
#[case("<Module></Form>")]
fn test_malformed_documents(#[case] xml: &str) {
    let err = parse(xml).unwrap_err();
    assert!(err.is_malformed(), "{err}");
}

#[test]
fn test_wrong_root() {
    assert_eq!(
        parse("<FormModule Name=\"X\"/>").unwrap_err(),
        FormsError::missing_root("FormModule")
    );
}

#[test]
fn test_parse_bytes_matches_parse() {
    assert_eq!(parse_bytes(BARE.as_bytes()).unwrap(), parse(BARE).unwrap());
}
