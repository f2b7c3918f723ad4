use chrono::NaiveDate;
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use oddsboard::{
    remove_duplicates, CapturePipeline, DedupOptions, HiddenScoreRecoverer, LineClassifier,
    MemorySink, PipelineOptions, RecordAssembler, Row,
};

const SCREEN: &[&str] = &[
    "mackolik",
    "Quick search",
    "NESINE",
    "Detay  Kadro  Anlatim",
    "Fenerbahce",
    "Galatasaray",
    "A",
    "B",
    "C",
    "1,85",
    "3,20",
    "4,10",
    "1,22",
    "1,15",
    "1,90",
    "ALT/UST 2.5",
    "2,05",
    "1,70",
    "I - O",
    "12:30",
    "%45",
];

fn bench_classify(c: &mut Criterion) {
    let classifier = LineClassifier::default();
    c.bench_function("classify_screen", |b| {
        b.iter(|| classifier.classify_all(black_box(SCREEN)))
    });
}

fn bench_recover(c: &mut Criterion) {
    let recoverer = HiddenScoreRecoverer::default();
    c.bench_function("recover_hidden_score", |b| {
        b.iter(|| recoverer.recover(black_box(SCREEN)))
    });
}

fn bench_assemble(c: &mut Criterion) {
    let assembler = RecordAssembler::default();
    let at = NaiveDate::from_ymd_opt(2024, 5, 19)
        .unwrap()
        .and_hms_opt(20, 45, 0)
        .unwrap();
    c.bench_function("assemble_record", |b| {
        b.iter(|| assembler.assemble(black_box(SCREEN), at))
    });
}

fn bench_pipeline(c: &mut Criterion) {
    let base = NaiveDate::from_ymd_opt(2024, 5, 19)
        .unwrap()
        .and_hms_opt(20, 0, 0)
        .unwrap();
    c.bench_function("pipeline_100_captures", |b| {
        b.iter(|| {
            let mut pipeline = CapturePipeline::new(MemorySink::new(), PipelineOptions::default());
            for i in 0..100 {
                let at = base + chrono::Duration::seconds(i);
                pipeline.process_capture(black_box(SCREEN), at);
            }
            pipeline.into_sink().len()
        })
    });
}

fn bench_cleanup(c: &mut Criterion) {
    let rows: Vec<Row> = (0..2_000)
        .map(|i| {
            vec![
                "Super Lig".to_string(),
                format!("2024-05-{:02}", 1 + i % 28),
                format!("Team {} - Team {}", i % 50, (i + 1) % 50),
                "1.85".to_string(),
            ]
        })
        .collect();
    let options = DedupOptions::default();
    c.bench_function("cleanup_2000_rows", |b| {
        b.iter(|| {
            let mut sink = MemorySink::with_rows(rows.clone());
            remove_duplicates(&mut sink, &options)
        })
    });
}

criterion_group!(
    benches,
    bench_classify,
    bench_recover,
    bench_assemble,
    bench_pipeline,
    bench_cleanup,
);
criterion_main!(benches);
