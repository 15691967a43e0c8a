use criterion::{Criterion, black_box, criterion_group, criterion_main};

use stocktake::order::temporal_key;
use stocktake::record::InventoryRecord;
use stocktake::search::{SearchCriteria, search};
use stocktake::store::Store;

fn seeded(count: usize) -> Store {
    let mut store = Store::open_in_memory().unwrap();
    let records: Vec<InventoryRecord> = (0..count)
        .map(|i| InventoryRecord {
            asset_tag: format!("A{}", i % 100),
            serial_number: format!("SN{}", i),
            date: format!("{:02}/{:02}/20{:02}", (i % 12) + 1, (i % 28) + 1, 20 + (i % 6)),
            time: if i % 2 == 0 { "01:00 PM".into() } else { "09:30 AM".into() },
            ..Default::default()
        })
        .collect();
    store.bulk_insert(&records).unwrap();
    store
}

pub fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("temporal key pm", |b| {
        b.iter(|| temporal_key(black_box("04/05/2025"), black_box("01:00 PM")))
    });
    c.bench_function("temporal key malformed", |b| {
        b.iter(|| temporal_key(black_box("not a date"), black_box("whenever")))
    });

    let store = seeded(10_000);
    c.bench_function("page 10k", |b| b.iter(|| store.page(black_box(3), 25).unwrap()));

    let criteria = SearchCriteria {
        asset_tag: Some("A42".into()),
        ..Default::default()
    };
    c.bench_function("search 10k", |b| b.iter(|| search(&store, &criteria).unwrap()));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
