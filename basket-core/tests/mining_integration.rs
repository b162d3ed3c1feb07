//! End-to-end tests for the mining pipeline: register a table, run the
//! analyzer, check the itemsets and rules that come back.

use arrow::array::{ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use basket_core::core::{mine_transactions, MarketBasketAnalyzer, MiningParams};
use datafusion::prelude::*;
use std::io::Write;
use std::sync::Arc;

fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
    data.iter()
        .map(|row| row.iter().map(|s| s.to_string()).collect())
        .collect()
}

async fn context_with_purchases(values: Vec<Option<&str>>) -> SessionContext {
    let ctx = SessionContext::new();
    let schema = Arc::new(Schema::new(vec![Field::new(
        "purchases",
        DataType::Utf8,
        true,
    )]));
    let batch =
        RecordBatch::try_new(schema, vec![Arc::new(StringArray::from(values)) as ArrayRef])
            .unwrap();
    ctx.register_batch("data", batch).unwrap();
    ctx
}

#[test]
fn test_known_dataset_produces_expected_itemsets_and_rules() {
    let report = mine_transactions(
        rows(&[
            &["A", "B"],
            &["A", "B", "C"],
            &["A", "C"],
            &["B", "C"],
            &["A", "B", "C"],
        ]),
        MiningParams::new(0.4, 0.5, 3).unwrap(),
    )
    .unwrap();

    assert_eq!(report.transaction_count, 5);

    // Three singletons at 0.8, three pairs at 0.6, one triple at 0.4.
    assert_eq!(report.frequent_itemsets.len(), 7);
    for item in ["A", "B", "C"] {
        let singleton = report.itemset(&[item]).unwrap();
        assert!((singleton.support - 0.8).abs() < 1e-12);
        assert_eq!(singleton.count, 4);
    }
    for pair in [["A", "B"], ["A", "C"], ["B", "C"]] {
        let itemset = report.itemset(&pair).unwrap();
        assert!((itemset.support - 0.6).abs() < 1e-12);
        assert_eq!(itemset.count, 3);
    }
    let triple = report.itemset(&["A", "B", "C"]).unwrap();
    assert!((triple.support - 0.4).abs() < 1e-12);
    assert_eq!(triple.count, 2);

    // {A,B} => {C}: confidence 0.4/0.6, lift against C's 0.8 baseline.
    let ab_c = report
        .rules
        .iter()
        .find(|r| r.antecedent == ["A", "B"] && r.consequent == ["C"])
        .unwrap();
    assert!((ab_c.confidence - 2.0 / 3.0).abs() < 1e-9);
    assert!((ab_c.lift - (2.0 / 3.0) / 0.8).abs() < 1e-9);

    // {C} => {A,B} sits exactly on the 0.5 confidence boundary and is kept.
    let c_ab = report
        .rules
        .iter()
        .find(|r| r.antecedent == ["C"] && r.consequent == ["A", "B"])
        .unwrap();
    assert!((c_ab.confidence - 0.5).abs() < 1e-12);
    assert!((c_ab.lift - 0.5 / 0.6).abs() < 1e-9);

    // Rules come back ordered by descending confidence.
    for pair in report.rules.windows(2) {
        assert!(pair[0].confidence >= pair[1].confidence);
    }
}

#[test]
fn test_empty_transactions_produce_empty_report() {
    let report = mine_transactions(vec![], MiningParams::default()).unwrap();
    assert!(report.frequent_itemsets.is_empty());
    assert!(report.rules.is_empty());
    assert_eq!(report.transaction_count, 0);
}

#[tokio::test]
async fn test_analyzer_with_designated_column() {
    let ctx = context_with_purchases(vec![
        Some("bread, butter"),
        Some("bread, butter, jam"),
        Some("bread, jam"),
        Some("butter, jam"),
        Some("bread, butter, jam"),
        Some("milk"),
        None,
    ])
    .await;

    let analyzer = MarketBasketAnalyzer::builder()
        .transaction_columns(vec!["purchases"])
        .params(MiningParams::new(0.4, 0.5, 3).unwrap())
        .build()
        .unwrap();

    let report = analyzer.run(&ctx).await.unwrap();

    // The single-item and null rows are discarded.
    assert_eq!(report.transaction_count, 5);
    assert_eq!(report.columns, vec!["purchases"]);
    assert_eq!(report.frequent_itemsets.len(), 7);

    let strongest = report.strongest_rule().unwrap();
    assert!(strongest.confidence >= 0.5);
}

#[tokio::test]
async fn test_analyzer_auto_detects_transaction_column() {
    let ctx = SessionContext::new();
    let schema = Arc::new(Schema::new(vec![
        Field::new("customer", DataType::Utf8, true),
        Field::new("basket", DataType::Utf8, true),
    ]));
    let batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(StringArray::from(vec![
                Some("ana"),
                Some("rui"),
                Some("eva"),
                Some("tom"),
            ])) as ArrayRef,
            Arc::new(StringArray::from(vec![
                Some("tea,scones"),
                Some("tea,scones"),
                Some("tea,jam"),
                Some("coffee"),
            ])) as ArrayRef,
        ],
    )
    .unwrap();
    ctx.register_batch("data", batch).unwrap();

    let analyzer = MarketBasketAnalyzer::builder()
        .params(MiningParams::new(0.5, 0.5, 2).unwrap())
        .build()
        .unwrap();

    let report = analyzer.run(&ctx).await.unwrap();
    assert_eq!(report.columns, vec!["basket"]);
    assert_eq!(report.transaction_count, 3);
    assert!(report.itemset(&["scones", "tea"]).is_some());
}

#[tokio::test]
async fn test_analyzer_without_qualifying_column_returns_empty_report() {
    let ctx = context_with_purchases(vec![Some("milk"), Some("bread"), Some("tea")]).await;

    let analyzer = MarketBasketAnalyzer::builder().build().unwrap();
    let report = analyzer.run(&ctx).await.unwrap();

    assert!(report.is_empty());
    assert!(report.columns.is_empty());
    assert_eq!(report.transaction_count, 0);
}

#[tokio::test]
async fn test_analyzer_over_csv_file() {
    let mut file = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile()
        .unwrap();
    writeln!(file, "order_id,items").unwrap();
    writeln!(file, "1,\"bread, butter\"").unwrap();
    writeln!(file, "2,\"bread, butter, jam\"").unwrap();
    writeln!(file, "3,\"bread, jam\"").unwrap();
    writeln!(file, "4,\"butter, jam\"").unwrap();
    file.flush().unwrap();

    let ctx = SessionContext::new();
    ctx.register_csv("data", file.path().to_str().unwrap(), CsvReadOptions::new())
        .await
        .unwrap();

    let analyzer = MarketBasketAnalyzer::builder()
        .transaction_columns(vec!["items"])
        .params(MiningParams::new(0.25, 0.5, 2).unwrap())
        .build()
        .unwrap();

    let report = analyzer.run(&ctx).await.unwrap();
    assert_eq!(report.transaction_count, 4);
    assert!(report.itemset(&["bread", "butter"]).is_some());
}

#[tokio::test]
async fn test_report_serializes_to_json() {
    let ctx = context_with_purchases(vec![
        Some("bread,butter"),
        Some("bread,butter"),
        Some("bread,jam"),
    ])
    .await;

    let analyzer = MarketBasketAnalyzer::builder()
        .transaction_columns(vec!["purchases"])
        .params(MiningParams::new(0.3, 0.5, 2).unwrap())
        .build()
        .unwrap();

    let report = analyzer.run(&ctx).await.unwrap();
    let json = report.to_json_pretty().unwrap();

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["transaction_count"], 3);
    assert!(value["frequent_itemsets"].is_array());
    assert!(value["rules"].is_array());
}

#[test]
fn test_repeated_identical_transactions_strengthen_support() {
    let report = mine_transactions(
        rows(&[&["x", "y"], &["x", "y"], &["x", "y"], &["x", "z"]]),
        MiningParams::new(0.5, 0.5, 2).unwrap(),
    )
    .unwrap();

    let xy = report.itemset(&["x", "y"]).unwrap();
    assert_eq!(xy.count, 3);
    assert!((xy.support - 0.75).abs() < 1e-12);
}
