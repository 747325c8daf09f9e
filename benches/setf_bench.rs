use criterion::{criterion_group, criterion_main, Criterion};
use pathjson::sink::VecSink;
use pathjson::{vsetf, Mutation};

fn bench_setf(c: &mut Criterion) {
    let mut group = c.benchmark_group("setf");
    let doc = r#"{"a":1,"b":2,"c":{"d":3,"e":[4,5,6]},"f":"text"}"#;

    group.bench_function("replace_existing_scalar", |b| {
        b.iter(|| {
            let mut sink = VecSink::new();
            vsetf(
                std::hint::black_box(doc),
                ".c.d",
                Mutation::Set { fmt: "99", args: &[] },
                &mut sink,
            )
            .unwrap();
            std::hint::black_box(sink.into_string());
        })
    });

    group.bench_function("insert_new_nested_path", |b| {
        b.iter(|| {
            let mut sink = VecSink::new();
            vsetf(
                std::hint::black_box(doc),
                ".g.h.i",
                Mutation::Set { fmt: "1", args: &[] },
                &mut sink,
            )
            .unwrap();
            std::hint::black_box(sink.into_string());
        })
    });

    group.bench_function("delete_existing", |b| {
        b.iter(|| {
            let mut sink = VecSink::new();
            vsetf(std::hint::black_box(doc), ".b", Mutation::Delete, &mut sink).unwrap();
            std::hint::black_box(sink.into_string());
        })
    });

    group.finish();
}

criterion_group!(benches, bench_setf);
criterion_main!(benches);
