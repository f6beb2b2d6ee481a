//! Performance benchmarks for the salary engine.
//!
//! Covers the pure calculation path against the in-memory and SQLite stores,
//! and a full request through the router.
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use std::hint::black_box;
use std::sync::Arc;

use axum::{body::Body, http::Request};
use chrono::NaiveDate;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rust_decimal::Decimal;
use tower::ServiceExt;

use salary_engine::api::{AppState, create_router};
use salary_engine::calculation::{CalculationContext, calculate_pay_statement};
use salary_engine::clock::FixedClock;
use salary_engine::config::{ConfigLoader, PayrollRules, SeedData};
use salary_engine::models::{CapabilityGrade, Employee, RoleGrade, WorkRecord, YearMonth};
use salary_engine::store::{InMemoryStore, SqliteStore};

fn load_config() -> ConfigLoader {
    ConfigLoader::load("./config/payroll").expect("Failed to load config")
}

fn business_clock() -> FixedClock {
    FixedClock::on(NaiveDate::from_ymd_opt(2015, 4, 15).unwrap())
}

fn april() -> YearMonth {
    YearMonth::from_yyyymm(201504).unwrap()
}

/// Builds a store with `count` standard-rank employees, each with an April work record.
fn create_batch_store(count: u32) -> InMemoryStore {
    let mut store = InMemoryStore::new()
        .with_role_grade(RoleGrade {
            rank: "R3".to_string(),
            amount: 200_000,
        })
        .with_capability_grade(CapabilityGrade {
            rank: "AS".to_string(),
            amount: 50_000,
        });

    for no in 1..=count {
        store.insert_employee(Employee {
            no,
            name: format!("Employee {}", no),
            join_date: NaiveDate::from_ymd_opt(2013, 4, 1).unwrap(),
            role_rank: "R3".to_string(),
            capability_rank: "AS".to_string(),
            health_insurance_amount: 10_000,
            employee_pension_amount: 20_000,
            income_tax_amount: 5_000,
            inhabitant_tax_amount: 8_000,
            commute_amount: 10_000,
            rent_amount: 5_000,
            overtime_hourly_amount: 2_000,
        });
        store.insert_work_record(WorkRecord {
            employee_no: no,
            year_month: april(),
            overtime_hours: Decimal::from(no % 40),
            late_night_hours: Decimal::new(25, 1),
            holiday_hours: Decimal::ONE,
            holiday_late_night_hours: Decimal::ZERO,
        });
    }

    store
}

/// Benchmark: One pay statement from the in-memory store.
fn bench_single_statement(c: &mut Criterion) {
    let config = load_config();
    let store = InMemoryStore::from_seed(config.seed().unwrap());
    let rules = config.rules().clone();
    let clock = business_clock();

    c.bench_function("single_statement", |b| {
        b.iter(|| {
            let ctx = CalculationContext::load(&store, black_box(1), &clock, &rules).unwrap();
            black_box(calculate_pay_statement(&ctx, april()).unwrap())
        })
    });
}

/// Benchmark: One pay statement from SQLite.
fn bench_sqlite_statement(c: &mut Criterion) {
    let config = load_config();
    let seed: &SeedData = config.seed().unwrap();
    let store = SqliteStore::open_in_memory().unwrap();
    store.seed(seed).unwrap();
    let rules = config.rules().clone();
    let clock = business_clock();

    c.bench_function("sqlite_statement", |b| {
        b.iter(|| {
            let ctx = CalculationContext::load(&store, black_box(1), &clock, &rules).unwrap();
            black_box(calculate_pay_statement(&ctx, april()).unwrap())
        })
    });
}

/// Benchmark: Payroll runs over growing employee counts.
fn bench_payroll_run(c: &mut Criterion) {
    let rules = PayrollRules::default();
    let clock = business_clock();
    let mut group = c.benchmark_group("payroll_run");

    for count in [10u32, 100, 1000] {
        let store = create_batch_store(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("employees", count), &count, |b, &count| {
            b.iter(|| {
                let mut total = 0i64;
                for no in 1..=count {
                    let ctx = CalculationContext::load(&store, no, &clock, &rules).unwrap();
                    total += calculate_pay_statement(&ctx, april()).unwrap().take_home;
                }
                black_box(total)
            })
        });
    }

    group.finish();
}

/// Benchmark: A full POST /calculate through the router.
fn bench_calculate_request(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let config = load_config();
    let store = InMemoryStore::from_seed(config.seed().unwrap());
    let state = AppState::new(
        Arc::new(store),
        config.rules().clone(),
        Arc::new(business_clock()),
    );
    let router = create_router(state);
    let body = serde_json::json!({ "employee_no": 1, "year_month": 201504 }).to_string();

    c.bench_function("calculate_request", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/calculate")
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
    bench_single_statement,
    bench_sqlite_statement,
    bench_payroll_run,
    bench_calculate_request,
);
criterion_main!(benches);
