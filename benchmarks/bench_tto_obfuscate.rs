use criterion::{black_box, criterion_group, criterion_main, Criterion};
use textkit::tto::{self, Options};

fn long_thai_passage(repeats: usize) -> String {
    "สวัสดีครับ ยินดีต้อนรับสู่ประเทศไทย ขอบคุณมากครับ ".repeat(repeats)
}

fn bench_tto_obfuscate(c: &mut Criterion) {
    let short = "สวัสดีครับ ยินดีต้อนรับ";
    let long = long_thai_passage(200);
    let opts = Options { random_seed: Some(1), ..Options::default() };

    c.bench_function("tto_obfuscate_short", |b| {
        b.iter(|| tto::obfuscate(black_box(short), black_box(&opts)))
    });

    c.bench_function("tto_obfuscate_long_passage", |b| {
        b.iter(|| tto::obfuscate(black_box(&long), black_box(&opts)))
    });

    c.bench_function("tto_segment_long_passage", |b| {
        b.iter(|| tto::segment_text(black_box(&long)))
    });
}

criterion_group!(benches, bench_tto_obfuscate);
criterion_main!(benches);
