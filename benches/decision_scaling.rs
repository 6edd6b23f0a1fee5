use std::hint::black_box;
use std::time::Duration;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use xqtype::{LoadedSchema, Type, is_disjoint, is_equal, is_subtype, load_schema_str, parse_type};

fn bench_sequence_length(c: &mut Criterion) {
    let schema = LoadedSchema::predefined();
    let mut group = c.benchmark_group("is_subtype/sequence_length");
    for len in [4usize, 8, 16, 32] {
        let lhs = Type::seq_of((0..len).map(|_| Type::integer()).collect());
        let rhs = Type::plus(Type::numeric());
        group.bench_with_input(BenchmarkId::from_parameter(len), &(lhs, rhs), |b, (lhs, rhs)| {
            b.iter(|| is_subtype(&schema.registry, black_box(lhs), black_box(rhs)).expect("decide"))
        });
    }
    group.finish();
}

fn bench_choice_width(c: &mut Criterion) {
    let schema = LoadedSchema::predefined();
    let mut group = c.benchmark_group("is_equal/choice_width");
    for width in [2usize, 4, 6, 8] {
        let src = build_element_choice(width);
        let lhs = parse_type(&src, &schema.namespaces).expect("parse");
        let rhs = Type::star(Type::choice_of(
            (0..width)
                .rev()
                .map(|i| parse_type(&format!("element e{i} {{ integer }}"), &schema.namespaces).expect("parse"))
                .collect(),
        ));
        group.bench_with_input(BenchmarkId::from_parameter(width), &(lhs, rhs), |b, (lhs, rhs)| {
            b.iter(|| is_equal(&schema.registry, black_box(lhs), black_box(rhs)).expect("decide"))
        });
    }
    group.finish();
}

fn bench_interleave_size(c: &mut Criterion) {
    let schema = LoadedSchema::predefined();
    let mut group = c.benchmark_group("is_disjoint/interleave_size");
    for size in [2usize, 3, 4] {
        let parts: Vec<String> = (0..size).map(|i| format!("element e{i} {{ () }}")).collect();
        let lhs = parse_type(&parts.join(" & "), &schema.namespaces).expect("parse");
        let rhs = parse_type(&format!("({})*", parts.join(" | ")), &schema.namespaces)
            .expect("parse");
        group.bench_with_input(BenchmarkId::from_parameter(size), &(lhs, rhs), |b, (lhs, rhs)| {
            b.iter(|| is_disjoint(&schema.registry, black_box(lhs), black_box(rhs)).expect("decide"))
        });
    }
    group.finish();
}

fn bench_recursive_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("is_subtype/recursive_schema");
    for depth in [2usize, 4, 8] {
        let loaded = load_schema_str(&build_nested_schema(depth)).expect("schema");
        let lhs = parse_type("t0", &loaded.namespaces).expect("parse");
        let rhs = parse_type("element * { item* }*", &loaded.namespaces).expect("parse");
        group.bench_with_input(BenchmarkId::from_parameter(depth), &(lhs, rhs), |b, (lhs, rhs)| {
            b.iter(|| is_subtype(&loaded.registry, black_box(lhs), black_box(rhs)).expect("decide"))
        });
    }
    group.finish();
}

fn build_element_choice(width: usize) -> String {
    let alternatives: Vec<String> = (0..width)
        .map(|i| format!("element e{i} {{ integer }}"))
        .collect();
    format!("({})*", alternatives.join(" | "))
}

/// `t{i} = element e{i} { t{i+1}* }`, closed by a self-recursive list.
fn build_nested_schema(depth: usize) -> String {
    let mut src = String::new();
    for i in 0..depth {
        src.push_str(&format!(
            "[[define]]\nspace = \"type\"\nname = \"t{i}\"\ntype = \"element e{i} {{ t{}* }}\"\n\n",
            i + 1
        ));
    }
    src.push_str(&format!(
        "[[define]]\nspace = \"type\"\nname = \"t{depth}\"\ntype = \"integer, (() | t{depth})\"\n"
    ));
    src
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .sample_size(20)
        .measurement_time(Duration::from_millis(300));
    targets = bench_sequence_length, bench_choice_width, bench_interleave_size, bench_recursive_depth
}
criterion_main!(benches);
