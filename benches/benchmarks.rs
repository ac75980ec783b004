use emdflow::Arbitrary;
use emdflow::emd::*;

criterion::criterion_main!(benches);
criterion::criterion_group! {
    name = benches;
    config = criterion::Criterion::default()
        .without_plots()
        .noise_threshold(3.0)
        .significance_level(0.01)
        .sample_size(10)
        .measurement_time(std::time::Duration::from_secs(1));
    targets =
        building_distance_matrix,
        building_transport_network,
        solving_random_transport,
        solving_large_transport,
}

fn cloud(n: usize) -> Vec<Point> {
    (0..n).map(|_| Point::random()).collect()
}

fn building_distance_matrix(c: &mut criterion::Criterion) {
    let s = cloud(128);
    let t = cloud(128);
    c.bench_function("build a 128x128 distance Matrix", |b| {
        b.iter(|| Matrix::build(&s, &t, euclidean))
    });
}

fn building_transport_network(c: &mut criterion::Criterion) {
    let s = cloud(32);
    let t = cloud(32);
    let matrix = Matrix::build(&s, &t, euclidean).expect("valid points");
    let source = Cloud::new(Side::Source, &s, None);
    let target = Cloud::new(Side::Target, &t, None);
    c.bench_function("build a 32x32 transport Network", |b| {
        b.iter(|| Network::build(&source, &target, &matrix))
    });
}

fn solving_random_transport(c: &mut criterion::Criterion) {
    c.bench_function("solve a random weighted Transport", |b| {
        b.iter_batched(
            || (Sample::random(), Sample::random()),
            |(s, t)| {
                Transport::new(&s.points, &t.points)
                    .source_weights(&s.weights)
                    .target_weights(&t.weights)
                    .solve()
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

fn solving_large_transport(c: &mut criterion::Criterion) {
    let s = cloud(48);
    let t = cloud(64);
    c.bench_function("solve a 48x64 unit-weight Transport", |b| {
        b.iter(|| Transport::new(&s, &t).solve())
    });
}
