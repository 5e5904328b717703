//! Benchmarks for path handling and table-driven transformation
//!
//! Copyright (c) 2025 Tartan Team
//! Licensed under the Apache-2.0 license

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::{json, Value};
use tartan_core::mapping::builtin::adp_employee_table;
use tartan_core::mapping::{transform_batch, Mapper, MappingTable};
use tartan_core::path::{self, Path};

fn create_employee(i: usize) -> Value {
    json!({
        "id": format!("adp-{}", i),
        "employeeId": format!("EMP-{}", i),
        "firstName": "John",
        "lastName": "Doe",
        "workEmail": format!("employee{}@acmecorp.com", i),
        "manager": "EMP-1023",
        "startDate": "2020-03-15",
        "terminationDate": null,
        "department": {"id": "dept-eng", "name": "Engineering"},
        "employments": [
            {"jobTitle": "Senior Software Engineer", "payRate": 160000, "payPeriod": "YEAR"}
        ],
        "locations": {
            "home": {"city": "Oakland", "state": "CA"},
            "work": {"city": "San Francisco", "state": "CA"}
        }
    })
}

fn bench_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");

    let expressions = vec![
        "employeeId",
        "locations.work",
        "a.b[0].c",
        "payroll.runs[12].lines[3].amount",
    ];

    for expr in &expressions {
        group.bench_with_input(BenchmarkId::new("parse", expr), expr, |b, expr| {
            b.iter(|| black_box(Path::parse(black_box(expr))))
        });
    }

    group.finish();
}

fn bench_accessors(c: &mut Criterion) {
    let mut group = c.benchmark_group("accessors");
    let record = create_employee(1);
    let deep = Path::parse("employments[0].jobTitle").unwrap();
    let missing = Path::parse("locations.remote.city").unwrap();
    let padded = Path::parse("x.y[8].z").unwrap();

    group.bench_function("read_present", |b| {
        b.iter(|| black_box(path::read(black_box(&record), &deep)))
    });

    group.bench_function("read_absent", |b| {
        b.iter(|| black_box(path::read(black_box(&record), &missing)))
    });

    group.bench_function("write_padded", |b| {
        b.iter(|| {
            let mut tree = json!({});
            path::write(&mut tree, &padded, json!(5));
            black_box(tree)
        })
    });

    group.finish();
}

fn bench_compile(c: &mut Criterion) {
    let table = adp_employee_table().unwrap();

    c.bench_function("compile_adp_table", |b| b.iter(|| black_box(table.compile())));
}

fn bench_transform(c: &mut Criterion) {
    let mut group = c.benchmark_group("transform");
    let compiled = adp_employee_table().unwrap().compile();
    let record = create_employee(1);
    let sparse = json!({"employeeId": "EMP-1"});

    group.bench_function("adp_record", |b| {
        let mapper = Mapper::new(&compiled);
        b.iter(|| black_box(mapper.apply(black_box(&record))))
    });

    group.bench_function("adp_sparse_record", |b| {
        let mapper = Mapper::new(&compiled);
        b.iter(|| black_box(mapper.apply(black_box(&sparse))))
    });

    let uncompiled = MappingTable::new().with_entry("a.b[0].c", "x.y[2].z");
    let nested = json!({"a": {"b": [{"c": 5}]}});
    group.bench_function("compile_and_apply", |b| {
        b.iter(|| {
            let compiled = uncompiled.compile();
            black_box(Mapper::new(&compiled).apply_document(black_box(&nested)))
        })
    });

    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch");
    let compiled = adp_employee_table().unwrap().compile();

    for size in [10usize, 100, 1000] {
        let records: Vec<Value> = (0..size).map(create_employee).collect();
        group.bench_with_input(BenchmarkId::new("records", size), &records, |b, records| {
            b.iter(|| black_box(transform_batch(black_box(records), &compiled)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_parsing,
    bench_accessors,
    bench_compile,
    bench_transform,
    bench_batch
);
criterion_main!(benches);
