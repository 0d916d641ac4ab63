use criterion::{black_box, criterion_group, criterion_main, Criterion};
use textkit::rhp::{self, ParseOptions};

fn nested_hash_source(depth: usize) -> String {
    let mut s = String::new();
    for i in 0..depth {
        s.push_str(&format!("{{a{i}: "));
    }
    s.push_str("1");
    for _ in 0..depth {
        s.push('}');
    }
    s
}

fn bench_rhp_parse(c: &mut Criterion) {
    let shallow = r#"{:name => "Alice", age: 30, items: [1, 2, 3, 4, 5]}"#;
    let nested = nested_hash_source(50);
    let opts = ParseOptions::default();

    c.bench_function("rhp_parse_shallow_mixed_hash", |b| {
        b.iter(|| rhp::parse(black_box(shallow), black_box(&opts)))
    });

    c.bench_function("rhp_parse_nested_50_deep", |b| {
        b.iter(|| rhp::parse(black_box(&nested), black_box(&opts)))
    });
}

criterion_group!(benches, bench_rhp_parse);
criterion_main!(benches);
