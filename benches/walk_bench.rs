use criterion::{criterion_group, criterion_main, Criterion};
use pathjson::{walk, WalkOptions};

fn bench_walk(c: &mut Criterion) {
    let mut group = c.benchmark_group("walk");
    let wide_array = format!(
        "[{}]",
        (0..200).map(|i| i.to_string()).collect::<Vec<_>>().join(",")
    );
    let cases: Vec<(&str, &str)> = vec![
        ("scalar", "42"),
        ("flat_object", r#"{"a":1,"b":2,"c":3,"d":4,"e":5}"#),
        (
            "nested",
            r#"{"a":[1,2,{"b":3,"c":[4,5,6]}],"d":{"e":null,"f":true,"g":"text"}}"#,
        ),
        ("wide_array", wide_array.as_str()),
    ];
    let opts = WalkOptions::default();
    for (name, input) in cases {
        group.bench_function(name, |b| {
            b.iter(|| {
                let input = std::hint::black_box(input);
                walk(input, &opts, |_ev| {}).unwrap();
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_walk);
criterion_main!(benches);
