use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use emotion_stats::{Detection, EmotionClasses, EmotionStatistics};

const LABELS: [&str; 8] = [
    "Anger", "Contempt", "Disgust", "Fear", "Happy", "Neutral", "Sad", "Surprise",
];

fn frames(count: usize) -> Vec<Vec<Detection>> {
    (0..count)
        .map(|i| match i % 4 {
            0 => Vec::new(),
            1 => vec![Detection::new(LABELS[i % LABELS.len()], 0.61)],
            2 => vec![
                Detection::new("Happy", 0.83),
                Detection::new(LABELS[(i * 7) % LABELS.len()], 0.52),
            ],
            _ => vec![Detection::new("Neutral", 0.74)],
        })
        .collect()
}

fn benchmark_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("emotion_statistics_update");
    let input = frames(1024);

    for window in [10usize, 100, 1000].iter() {
        group.bench_with_input(BenchmarkId::new("incremental", window), window, |b, &window| {
            let classes = EmotionClasses::new(LABELS).unwrap();
            let mut stats = EmotionStatistics::with_capacity(classes, window).unwrap();
            let mut i = 0;
            b.iter(|| {
                let snapshot = stats.update(black_box(&input[i % input.len()])).unwrap();
                i += 1;
                black_box(snapshot)
            });
        });

        group.bench_with_input(BenchmarkId::new("recompute", window), window, |b, &window| {
            let classes = EmotionClasses::new(LABELS).unwrap();
            let mut stats = EmotionStatistics::with_capacity(classes, window).unwrap();
            for frame in input.iter().cycle().take(window) {
                stats.update(frame).unwrap();
            }
            b.iter(|| black_box(stats.recompute()));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_update);
criterion_main!(benches);
