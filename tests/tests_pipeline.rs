//! Pipeline Tests - parse → {convert, analyze}, single and batch.

use fmb::convert::Area;
use fmb::{ConverterConfig, FormsError, Pipeline};

const ORDERS: &str = include_str!("fixtures/orders_wrapped.xml");
const BARE: &str = include_str!("fixtures/orders_bare.xml");
const LAYERED: &str = include_str!("fixtures/layered.xml");

#[test]
fn test_run_combines_conversion_and_triggers() {
    let output = Pipeline::new().run(ORDERS).unwrap();
    assert_eq!(output.module.name, "ORDERS");
    assert_eq!(output.conversion.fields_in(Area::Header).count(), 2);
    assert_eq!(output.triggers.statistics.total_count, 3);
}

#[test]
fn test_pipeline_uses_its_config() {
    let config = ConverterConfig::default().with_list_field_limit(1);
    let pipeline = Pipeline::with_config(config);
    assert_eq!(pipeline.config().list_field_limit, 1);

    let output = pipeline.run(ORDERS).unwrap();
    assert_eq!(output.conversion.fields_in(Area::List).count(), 1);
}

#[test]
fn test_batch_preserves_order() {
    let documents = [LAYERED, ORDERS, BARE];
    let results = Pipeline::new().run_batch(&documents);

    let names: Vec<_> = results
        .iter()
        .map(|r| r.as_ref().unwrap().module.name.as_str())
        .collect();
    assert_eq!(names, vec!["LAYERED", "ORDERS", "ORDERS"]);
}

#[test]
fn test_batch_isolates_failures() {
    let documents = vec![
        ORDERS.to_string(),
        "<Module><Block></Module>".to_string(),
        "<Form/>".to_string(),
        LAYERED.to_string(),
    ];
    let results = Pipeline::new().run_batch(&documents);

    assert_eq!(results.len(), 4);
    assert!(results[0].is_ok());
    assert!(matches!(results[1], Err(FormsError::Xml(_))));
    assert!(matches!(results[2], Err(FormsError::MissingRoot { .. })));
    assert!(results[3].is_ok());
}

#[test]
fn test_empty_batch() {
    let documents: [&str; 0] = [];
    assert!(Pipeline::new().run_batch(&documents).is_empty());
}

#[cfg(feature = "serde")]
#[test]
fn test_output_serializes_to_json() {
    let output = Pipeline::new().run(ORDERS).unwrap();
    let json = output.to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["module"]["name"], "ORDERS");
    assert_eq!(value["triggers"]["statistics"]["total_count"], 3);
    assert_eq!(value["triggers"]["block_level"][0]["triggers"][0]["rules"][0]["rule_type"], "AUTO_POPULATE");
}
