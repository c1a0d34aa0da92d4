//! Assura ledger benchmarks
//!
//! Covers the hot paths of the registry:
//! - Premium conversion
//! - Policy selection (role check + conversion + append)
//! - Policy reads

use std::sync::Arc;

use assura_common::{Identity, NewPolicy, RoleAuthority};
use assura_ledger::PolicyLedger;
use assura_oracle::{PriceConverter, ReferencePriceFeed};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn ledger_with_policies(count: u64) -> (PolicyLedger, Identity) {
    let admin = Identity::new("admin");
    let roles = Arc::new(RoleAuthority::new(vec![admin.clone()]).unwrap());
    roles.add_user(&admin, admin.clone()).unwrap();
    let ledger = PolicyLedger::with_reference_price(roles, 200_000_000, 8);
    for i in 0..count {
        ledger
            .create_policy(&admin, NewPolicy::new(format!("plan-{}", i)).with_deductible(i))
            .unwrap();
    }
    (ledger, admin)
}

/// Benchmark premium conversion
fn bench_conversion(c: &mut Criterion) {
    let mut group = c.benchmark_group("conversion");
    let converter = PriceConverter::new(Arc::new(ReferencePriceFeed::new(185_012_345_678, 8)));

    for nominal in [1u128, 1_000, 1_000_000_000].iter() {
        group.bench_with_input(BenchmarkId::new("convert", nominal), nominal, |b, &n| {
            b.iter(|| converter.convert(black_box(n)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark policy selection
fn bench_selection(c: &mut Criterion) {
    let mut group = c.benchmark_group("selection");
    let (ledger, admin) = ledger_with_policies(16);

    group.bench_function("select_policy", |b| {
        b.iter(|| {
            ledger
                .select_policy(&admin, &admin, black_box(8), black_box(1000))
                .unwrap()
        });
    });

    group.finish();
}

/// Benchmark policy reads
fn bench_reads(c: &mut Criterion) {
    let mut group = c.benchmark_group("reads");

    for count in [10u64, 100, 1000].iter() {
        let (ledger, _) = ledger_with_policies(*count);
        group.bench_with_input(BenchmarkId::new("view_all", count), count, |b, _| {
            b.iter(|| black_box(ledger.view_all_policies()));
        });
        group.bench_with_input(BenchmarkId::new("view_one", count), count, |b, &n| {
            b.iter(|| ledger.view_policy(black_box(n / 2)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_conversion, bench_selection, bench_reads);
criterion_main!(benches);
