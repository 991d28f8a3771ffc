//! Record store behaviour against real files

use std::fs;

use crab_invoice::{InvoiceStore, JsonFileStore};
use shared::{Decimal, InvoiceRecord, LineItem};

fn record(order_number: &str, name: &str, price: i64) -> InvoiceRecord {
    let products = vec![LineItem::new("Phone", "356938035643809", 1, Decimal::from(price))];
    InvoiceRecord {
        date: "2024-05-01".to_string(),
        timestamp: "2024-05-01 12:00:00".to_string(),
        platform: "Daraz".to_string(),
        name: name.to_string(),
        order_number: order_number.to_string(),
        contact: "0300-1234567".to_string(),
        address: "Karachi".to_string(),
        advance: Decimal::from(10),
        cod: Decimal::from(price - 10),
        total: shared::money::invoice_total(&products),
        products,
    }
}

#[test]
fn missing_file_loads_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("nope").join("invoices.json"));

    assert!(store.load_all().unwrap().is_empty());
    assert!(!store.path().exists());
}

#[test]
fn append_then_load_keeps_order_and_fields() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("invoices.json"));

    let records = vec![
        record("1", "Ali", 100),
        record("2", "Sara", 250),
        record("3", "Usman", 75),
    ];
    for (i, r) in records.iter().enumerate() {
        store.append(r).unwrap();
        assert_eq!(store.load_all().unwrap(), records[..=i].to_vec());
    }
}

#[test]
fn update_replaces_only_the_match() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("invoices.json"));
    store.append(&record("1", "Ali", 100)).unwrap();
    store.append(&record("2", "Sara", 250)).unwrap();

    let changed = record("2", "Sara Ahmed", 300);
    assert!(store.update_by_key(&changed).unwrap());

    let all = store.load_all().unwrap();
    assert_eq!(all, vec![record("1", "Ali", 100), changed]);
}

#[test]
fn update_without_match_changes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("invoices.json"));
    store.append(&record("1", "Ali", 100)).unwrap();
    let before = store.load_all().unwrap();

    assert!(!store.update_by_key(&record("9", "Ghost", 1)).unwrap());
    assert_eq!(store.load_all().unwrap(), before);
}

#[test]
fn single_product_file_is_upgraded() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("invoices.json");
    fs::write(
        &path,
        r#"[
  {
    "date": "2023-12-30",
    "timestamp": "2023-12-30 18:20:00",
    "platform": "Alfamall",
    "name": "Kalim",
    "order_number": "OLD-1",
    "contact": "",
    "address": "Lahore",
    "advance": 0.0,
    "cod": 300.0,
    "product": "Tablet",
    "imei": "111",
    "qty": 2,
    "price": 150.0
  }
]"#,
    )
    .unwrap();

    let store = JsonFileStore::new(&path);
    let all = store.load_all().unwrap();

    assert_eq!(all.len(), 1);
    assert_eq!(
        all[0].products,
        vec![LineItem::new("Tablet", "111", 2, Decimal::from(150))]
    );
    assert_eq!(all[0].total, Decimal::from(300));

    // Next write stores the current layout
    store.append(&record("NEW-1", "Ali", 100)).unwrap();
    let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw[0]["products"][0]["product"], "Tablet");
    assert!(raw[0].get("product").is_none());
}
