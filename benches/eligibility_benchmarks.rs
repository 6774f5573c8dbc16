//! Performance benchmarks for the attendance engine.
//!
//! Covers the pure eligibility decision, aggregation over a month of
//! records, and the full HTTP round trip for `/eligibility`.
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use attendance_engine::api::{AppState, create_router};
use attendance_engine::calculation::{
    assess, evaluate, payroll_report, summarize_period, week_summary,
};
use attendance_engine::config::ConfigLoader;
use attendance_engine::models::{
    AttendanceRecord, AttendanceRules, AttendanceStatus, LocationSample, ScheduledShift,
    ShiftKind,
};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

fn bench_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 12).unwrap()
}

fn at(hour: u32, minute: u32) -> NaiveDateTime {
    bench_date().and_hms_opt(hour, minute, 0).unwrap()
}

/// Creates `count` consecutive daily records, alternating on-time and late.
fn create_records(count: usize) -> Vec<AttendanceRecord> {
    (0..count)
        .map(|i| {
            let date = bench_date() + Duration::days(i as i64);
            let mut record = AttendanceRecord::new("emp_bench_001", date);
            record.check_in_time = NaiveTime::from_hms_opt(9, (i % 2) as u32 * 10, 0);
            record.check_out_time = NaiveTime::from_hms_opt(14 + (i % 4) as u32, 0, 0);
            record.status = if i % 2 == 0 {
                AttendanceStatus::Present
            } else {
                AttendanceStatus::Late
            };
            record.tip = Decimal::new(5000, 0);
            record
        })
        .collect()
}

/// Benchmark: a single eligibility decision inside the check-in window.
fn bench_evaluate(c: &mut Criterion) {
    let rules = AttendanceRules::default();
    let shift = ScheduledShift::canonical("emp_bench_001", bench_date(), ShiftKind::Pagi);
    let location = LocationSample::Fix(rules.office_location);

    c.bench_function("evaluate", |b| {
        b.iter(|| {
            black_box(evaluate(
                black_box(at(8, 45)),
                Some(&shift),
                &rules,
                None,
                &location,
            ))
        })
    });
}

/// Benchmark: an assessment with audit trace, checked in and awaiting check-out.
fn bench_assess(c: &mut Criterion) {
    let rules = AttendanceRules::default();
    let shift = ScheduledShift::canonical("emp_bench_001", bench_date(), ShiftKind::Malam);
    let location = LocationSample::Fix(rules.office_location);
    let mut record = AttendanceRecord::new("emp_bench_001", bench_date());
    record.check_in_time = NaiveTime::from_hms_opt(18, 50, 0);

    c.bench_function("assess", |b| {
        b.iter(|| {
            black_box(assess(
                black_box(at(23, 30)),
                Some(&shift),
                &rules,
                Some(&record),
                &location,
                60,
            ))
        })
    });
}

/// Benchmark: weekly, payroll and period aggregation at growing record counts.
fn bench_aggregation(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregation");

    for count in [7usize, 31, 365] {
        let records = create_records(count);
        let last = bench_date() + Duration::days(count as i64 - 1);
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("week_summary", count), &records, |b, records| {
            b.iter(|| black_box(week_summary(records, bench_date(), Decimal::new(40, 0))))
        });
        group.bench_with_input(BenchmarkId::new("payroll", count), &records, |b, records| {
            b.iter(|| black_box(payroll_report(records, &[], Decimal::new(20000, 0))))
        });
        group.bench_with_input(BenchmarkId::new("period", count), &records, |b, records| {
            b.iter(|| black_box(summarize_period(records, bench_date(), last, Decimal::new(8, 0))))
        });
    }

    group.finish();
}

/// Benchmark: full HTTP round trip for `/eligibility`.
fn bench_eligibility_endpoint(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let config = ConfigLoader::load("./config/default").expect("Failed to load config");
    let router = create_router(AppState::new(config));
    let body = serde_json::json!({
        "now": "2026-01-12T08:45:00",
        "shift": ScheduledShift::canonical("emp_bench_001", bench_date(), ShiftKind::Pagi),
        "location": { "latitude": -7.779071, "longitude": 110.416098 }
    })
    .to_string();

    c.bench_function("eligibility_endpoint", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/eligibility")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

criterion_group!(
    benches,
    bench_evaluate,
    bench_assess,
    bench_aggregation,
    bench_eligibility_endpoint,
);
criterion_main!(benches);
