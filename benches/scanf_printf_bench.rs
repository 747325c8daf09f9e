use criterion::{criterion_group, criterion_main, Criterion};
use pathjson::{printf_to_string, scanf, PrintfArg, ScanfArg};

fn bench_printf(c: &mut Criterion) {
    let mut group = c.benchmark_group("printf");
    group.bench_function("object_literal", |b| {
        b.iter(|| {
            let s = printf_to_string(
                std::hint::black_box("{a:%d, b:%Q, c:%B}"),
                &[
                    PrintfArg::Int(42),
                    PrintfArg::Quoted(Some("hello world")),
                    PrintfArg::Bool(true),
                ],
            )
            .unwrap();
            std::hint::black_box(s);
        })
    });
    group.finish();
}

fn bench_scanf(c: &mut Criterion) {
    let mut group = c.benchmark_group("scanf");
    let doc = r#"{"a":1,"b":"hi","c":true,"d":[1,2,3]}"#;
    group.bench_function("object_fields", |b| {
        b.iter(|| {
            let mut i = None;
            let mut s = None;
            let mut flag = false;
            let mut args = [
                ScanfArg::Int(&mut i),
                ScanfArg::Str(&mut s),
                ScanfArg::Bool(&mut flag),
            ];
            let n = scanf(std::hint::black_box(doc), "{a:%d, b:%Q, c:%B}", &mut args).unwrap();
            std::hint::black_box(n);
        })
    });
    group.finish();
}

criterion_group!(benches, bench_printf, bench_scanf);
criterion_main!(benches);
