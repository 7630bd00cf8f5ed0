//! Throughput of the normalize -> filter -> aggregate path.

use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::json;

use ppe_compliance_core::pipeline::{build_view, normalize_batch, parse_payload, DataOrigin, LoadContext};
use ppe_compliance_core::{aggregate, DateRange};

const HELMET: &[&str] = &["helmet", "no_helmet", "NH", "HELM", ""];
const GLOVE: &[&str] = &["glove", "no_glove", "Gloves", "ng", "??"];

fn body(n: usize) -> String {
    let base = NaiveDate::from_ymd_opt(2025, 11, 4)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap();
    let records: Vec<_> = (0..n)
        .map(|i| {
            json!({
                "id": i,
                "timestamp": (base - Duration::minutes(i as i64 * 17)).format("%Y-%m-%dT%H:%M:%S").to_string(),
                "helmet_status": HELMET[i % HELMET.len()],
                "gloveStatus": GLOVE[(i / 3) % GLOVE.len()],
            })
        })
        .collect();
    json!({ "records": records }).to_string()
}

fn bench_pipeline(c: &mut Criterion) {
    let body = body(5_000);
    let now = NaiveDate::from_ymd_opt(2025, 11, 4)
        .unwrap()
        .and_hms_opt(18, 0, 0)
        .unwrap();

    c.bench_function("parse_and_normalize_5k", |b| {
        b.iter(|| {
            let ctx = LoadContext::new(DataOrigin::Live);
            let payload = parse_payload(black_box(&body), &ctx.log_context()).unwrap();
            normalize_batch(&ctx, payload)
        })
    });

    let ctx = LoadContext::new(DataOrigin::Live);
    let snapshot = normalize_batch(&ctx, parse_payload(&body, &ctx.log_context()).unwrap());

    c.bench_function("aggregate_5k", |b| {
        b.iter(|| aggregate(black_box(&snapshot.records)))
    });

    c.bench_function("build_view_week_5k", |b| {
        b.iter(|| build_view(black_box(&snapshot), DateRange::Week, now))
    });
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
