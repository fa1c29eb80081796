use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use feature_kdtree::kdtree::{KDArray, KDTree, KDTreeBuilder, KDTreeIndex, SplitMethod};
use feature_kdtree::Point;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

const DIMENSION: usize = 28;

fn random_points(rng: &mut SmallRng, len: usize) -> Vec<Point<f64>> {
    (0..len)
        .map(|i| {
            let coords: Vec<f64> = (0..DIMENSION).map(|_| rng.gen_range(-1.0..1.0)).collect();
            // 100 features per image
            Point::try_new(coords, i / 100).unwrap()
        })
        .collect()
}

fn construct(points: &[Point<f64>], method: SplitMethod) -> KDTree<f64> {
    KDTreeBuilder::new_with_seed(method, 0)
        .try_build(points)
        .unwrap()
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(0);
    let points = random_points(&mut rng, 20_000);
    let queries = random_points(&mut rng, 100);

    c.bench_function("sorted array", |b| {
        b.iter(|| KDArray::try_new(&points).unwrap())
    });

    let mut group = c.benchmark_group("construction");
    for method in [
        SplitMethod::MaxSpread,
        SplitMethod::Random,
        SplitMethod::Incremental,
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(method), &method, |b, &method| {
            b.iter(|| construct(&points, method))
        });
    }
    group.finish();

    let tree = construct(&points, SplitMethod::MaxSpread);
    let mut group = c.benchmark_group("search");
    for k in [1, 5, 20] {
        group.bench_with_input(BenchmarkId::new("knn", k), &k, |b, &k| {
            b.iter(|| {
                for query in &queries {
                    tree.nearest_neighbors(query, k).unwrap();
                }
            })
        });
    }
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
