use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use gridcrawl::{find_path, generate_dungeon};
use rand::{rngs::StdRng, SeedableRng};

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_dungeon");
    for level in [1_u32, 50, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(level), &level, |b, &level| {
            let mut rng = StdRng::seed_from_u64(7);
            b.iter(|| generate_dungeon(black_box(level), false, &mut rng));
        });
    }
    group.finish();
}

fn bench_find_path(c: &mut Criterion) {
    let level = generate_dungeon(100, false, &mut StdRng::seed_from_u64(7));
    c.bench_function("find_path_to_stairs", |b| {
        b.iter(|| {
            find_path(
                black_box(level.player_start),
                black_box(level.stairs),
                &level.grid,
                &level.enemies,
            )
        })
    });
}

criterion_group!(benches, bench_generate, bench_find_path);
criterion_main!(benches);
