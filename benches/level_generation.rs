use criterion::{black_box, criterion_group, criterion_main, Criterion};
use chem_sort::core::{matches, Catalog, GameSession, LevelGenerator, SimpleRng};

fn bench_generate_level_one(c: &mut Criterion) {
    let catalog = Catalog::builtin().unwrap();
    let generator = LevelGenerator::new(&catalog);
    let mut rng = SimpleRng::new(12345);

    c.bench_function("generate_level_1", |b| {
        b.iter(|| generator.generate(black_box(1), &mut rng).unwrap())
    });
}

fn bench_generate_level_ten(c: &mut Criterion) {
    let catalog = Catalog::builtin().unwrap();
    let generator = LevelGenerator::new(&catalog);
    let mut rng = SimpleRng::new(12345);

    c.bench_function("generate_level_10", |b| {
        b.iter(|| generator.generate(black_box(10), &mut rng).unwrap())
    });
}

fn bench_completed_check(c: &mut Criterion) {
    let catalog = Catalog::builtin().unwrap();
    let puzzle = LevelGenerator::new(&catalog)
        .generate(10, &mut SimpleRng::new(7))
        .unwrap();

    c.bench_function("completed_level_10", |b| b.iter(|| black_box(&puzzle).completed()));
}

fn bench_matches(c: &mut Criterion) {
    let catalog = Catalog::builtin().unwrap();
    let glucose = catalog.compound("C₆H₁₂O₆").unwrap();
    let elements: Vec<_> = glucose
        .elements
        .iter()
        .flat_map(|req| {
            let element = catalog.element(&req.symbol).unwrap().clone();
            std::iter::repeat(element).take(req.count as usize)
        })
        .collect();

    c.bench_function("matches_glucose", |b| {
        b.iter(|| matches(black_box(&elements), black_box(glucose)))
    });
}

fn bench_session_move(c: &mut Criterion) {
    let catalog = Catalog::builtin().unwrap();
    let mut session = GameSession::new(&catalog, 5, SimpleRng::new(12345)).unwrap();
    session.start();
    let last = session.puzzle().containers().len() - 1;

    c.bench_function("session_move_top", |b| {
        b.iter(|| {
            // Re-arm once the budget runs out.
            if session.phase().is_finished() {
                session.reset().unwrap();
                session.start();
            }
            let _ = session.move_top(black_box(last - 1), black_box(last));
            let _ = session.move_top(black_box(last), black_box(last - 1));
        })
    });
}

criterion_group!(
    benches,
    bench_generate_level_one,
    bench_generate_level_ten,
    bench_completed_check,
    bench_matches,
    bench_session_move
);
criterion_main!(benches);
