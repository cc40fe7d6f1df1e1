use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::criterion_group;
use criterion::criterion_main;
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;

use maze::algorithms::Algorithm;
use maze::generator::generate;

fn compare_solvers(c: &mut Criterion) {
    let mut group = c.benchmark_group("Maze Solvers");

    for (rows, cols) in [(21, 21), (51, 51), (101, 151)] {
        for i in 0..3u64 {
            let instance_name = format!("[{rows}x{cols}]:{i}");
            let mut rng = ChaCha8Rng::seed_from_u64(i);
            let Ok(maze) = generate(rows, cols, &mut rng) else {
                continue;
            };

            for algorithm in Algorithm::ALL {
                group.bench_with_input(
                    BenchmarkId::new(algorithm.name(), &instance_name),
                    &maze,
                    |b, m| b.iter(|| algorithm.solve(m)),
                );
            }
        }
    }
    group.finish();
}

fn generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("Maze Generation");

    for (rows, cols) in [(21, 21), (101, 151)] {
        group.bench_function(BenchmarkId::from_parameter(format!("{rows}x{cols}")), |b| {
            let mut rng = ChaCha8Rng::seed_from_u64(0);
            b.iter(|| generate(rows, cols, &mut rng))
        });
    }
    group.finish();
}

criterion_group!(benches, compare_solvers, generation);
criterion_main!(benches);
