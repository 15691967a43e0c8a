use stocktake::order::temporal_key;
use stocktake::record::InventoryRecord;
use stocktake::store::Store;

fn record(serial: &str, date: &str, time: &str) -> InventoryRecord {
    InventoryRecord {
        serial_number: serial.into(),
        date: date.into(),
        time: time.into(),
        ..Default::default()
    }
}

#[test]
fn twelve_hour_clock_maps_to_sortable_day() {
    // 12:00 AM < 01:00 AM < ... < 11:00 AM < 12:00 PM < ... < 11:00 PM
    let hours = ["12", "01", "02", "03", "04", "05", "06", "07", "08", "09", "10", "11"];
    let mut keys = Vec::new();
    for suffix in ["AM", "PM"] {
        for hour in hours {
            keys.push(temporal_key("04/05/2025", &format!("{}:00 {}", hour, suffix)));
        }
    }
    for pair in keys.windows(2) {
        assert!(pair[0] < pair[1], "expected {} < {}", pair[0], pair[1]);
    }
    assert_eq!(keys[0], "2025-04-05 00:00");
    assert_eq!(keys[12], "2025-04-05 12:00");
    assert_eq!(keys[23], "2025-04-05 23:00");
}

#[test]
fn midday_and_midnight_edge_cases() {
    assert_eq!(temporal_key("04/05/2025", "12:00 AM"), "2025-04-05 00:00");
    assert_eq!(temporal_key("04/05/2025", "12:30 PM"), "2025-04-05 12:30");
    assert_eq!(temporal_key("04/05/2025", "01:00 PM"), "2025-04-05 13:00");
    assert_eq!(temporal_key("04/05/2025", "11:59 PM"), "2025-04-05 23:59");
}

#[test]
fn tolerant_of_padding_and_plain_24_hour_times() {
    assert_eq!(temporal_key("4/5/2025", "9:05 AM"), "2025-04-05 09:05");
    // no suffix at all: the hour passes through unchanged
    assert_eq!(temporal_key("04/05/2025", "13:45"), "2025-04-05 13:45");
    assert_eq!(temporal_key("04/05/2025", "1:00 pm"), "2025-04-05 13:00");
}

#[test]
fn date_dominates_time() {
    assert!(
        temporal_key("01/01/2025", "11:59 PM") < temporal_key("01/02/2025", "12:00 AM")
    );
    assert!(temporal_key("12/31/2024", "11:00 PM") < temporal_key("01/01/2025", "01:00 AM"));
}

#[test]
fn unparseable_input_yields_the_earliest_key() {
    assert_eq!(temporal_key("", ""), "");
    assert_eq!(temporal_key("not a date", "01:00 PM"), "");
    assert_eq!(temporal_key("04/05/2025", "no colon here"), "");
    assert_eq!(temporal_key("04/05/2025", "aa:bb PM"), "");
    // 25 PM would be hour 37; rejected rather than wrapped
    assert_eq!(temporal_key("04/05/2025", "25:00 PM"), "");
    assert_eq!(temporal_key("04/05/2025", "10:75 AM"), "");
}

#[test]
fn malformed_rows_sort_to_the_bottom_of_the_listing() {
    let mut store = Store::open_in_memory().unwrap();
    store
        .bulk_insert(&[
            record("OLD", "01/01/2020", "08:00 AM"),
            record("BROKEN", "12/31/2025", "11:00 PM"),
            record("NEW", "06/15/2025", "02:00 PM"),
        ])
        .unwrap();
    // validation blocks malformed writes, so corrupt the row after the fact
    store
        .execute(
            "update inventory set date = 'sometime', time = 'whenever' where serial_number = 'BROKEN'",
            &[],
        )
        .unwrap();
    let (rows, total) = store.page(1, 10).unwrap();
    assert_eq!(total, 3);
    let serials: Vec<String> = rows.iter().map(|r| r[3].text()).collect();
    assert_eq!(serials, ["NEW", "OLD", "BROKEN"]);
}
