use criterion::{Criterion, criterion_group, criterion_main};
use exam_eligibility::classifier::{ClusterCenters, FeatureVector, classify};

fn centers() -> ClusterCenters {
    ClusterCenters::new(vec![
        [3.05, 9.12, 8.64].into(),
        [4.52, 13.48, 13.11].into(),
        [1.61, 5.07, 4.38].into(),
        [3.87, 11.46, 11.02].into(),
    ])
    .expect("benchmark centers are well formed")
}

fn benchmark_classify(c: &mut Criterion) {
    let centers = centers();
    let point = FeatureVector::from([3.5, 10.0, 11.5]);

    c.bench_function("classify_single_point", |b| {
        b.iter(|| classify(std::hint::black_box(&point), &centers));
    });
}

fn benchmark_classify_grid(c: &mut Criterion) {
    let centers = centers();
    // Every half-mark combination of the three model features.
    let grid: Vec<FeatureVector> = (0..=10)
        .flat_map(|a| (0..=30).flat_map(move |t1| (0..=30).map(move |t2| (a, t1, t2))))
        .map(|(a, t1, t2)| {
            FeatureVector::from([f64::from(a) * 0.5, f64::from(t1) * 0.5, f64::from(t2) * 0.5])
        })
        .collect();

    c.bench_function("classify_half_mark_grid", |b| {
        b.iter(|| {
            grid.iter()
                .filter_map(|point| classify(point, &centers).ok())
                .filter(|result| result.label.index() == 1)
                .count()
        });
    });
}

criterion_group!(benches, benchmark_classify, benchmark_classify_grid);
criterion_main!(benches);
