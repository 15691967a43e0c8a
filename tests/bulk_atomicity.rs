use stocktake::error::StocktakeError;
use stocktake::record::InventoryRecord;
use stocktake::store::Store;

fn valid(serial: &str) -> InventoryRecord {
    InventoryRecord {
        serial_number: serial.into(),
        date: "04/05/2025".into(),
        time: "01:00 PM".into(),
        ..Default::default()
    }
}

#[test]
fn a_missing_serial_in_the_middle_persists_nothing() {
    let mut store = Store::open_in_memory().unwrap();
    let mut records: Vec<InventoryRecord> = (0..5).map(|i| valid(&format!("SN{}", i))).collect();
    records[2].serial_number = "   ".into();
    let err = store.bulk_insert(&records).unwrap_err();
    assert!(matches!(err, StocktakeError::Validation(_)));
    assert_eq!(store.total_count().unwrap(), 0);
}

#[test]
fn a_bad_date_in_the_batch_persists_nothing() {
    let mut store = Store::open_in_memory().unwrap();
    let mut records: Vec<InventoryRecord> = (0..3).map(|i| valid(&format!("SN{}", i))).collect();
    records[1].date = "4/5/2025".into(); // unpadded, not the canonical stored form
    let err = store.bulk_insert(&records).unwrap_err();
    assert!(matches!(err, StocktakeError::Validation(_)));
    assert_eq!(store.total_count().unwrap(), 0);
}

#[test]
fn a_clean_batch_lands_in_full() {
    let mut store = Store::open_in_memory().unwrap();
    let records: Vec<InventoryRecord> = (0..40).map(|i| valid(&format!("SN{}", i))).collect();
    assert_eq!(store.bulk_insert(&records).unwrap(), 40);
    assert_eq!(store.total_count().unwrap(), 40);
}

#[test]
fn single_writes_enforce_the_same_validation() {
    let store = Store::open_in_memory().unwrap();
    let mut record = valid("SN1");
    record.time = "13:00".into(); // 24-hour form is import input, not storage
    let err = store.insert(&record).unwrap_err();
    assert!(matches!(err, StocktakeError::Validation(_)));

    let id = store.insert(&valid("SN1")).unwrap();
    let mut replacement = valid("SN1-B");
    replacement.location = "Storage".into();
    assert_eq!(store.update(id, &replacement).unwrap(), 1);
    // full-row replace by identity
    let rows = store
        .query("select serial_number, location from inventory where id = ?", &[&id])
        .unwrap();
    assert_eq!(rows[0][0].text(), "SN1-B");
    assert_eq!(rows[0][1].text(), "Storage");

    assert_eq!(store.delete(id).unwrap(), 1);
    assert_eq!(store.delete(id).unwrap(), 0);
    assert_eq!(store.total_count().unwrap(), 0);
}
