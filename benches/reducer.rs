use criterion::{black_box, criterion_group, criterion_main, Criterion};
use flipzy::core::{CatalogEntry, GameConfig, GameEvent, GameState};
use flipzy::rules::{deal_board, reduce};

fn catalog(n: usize) -> Vec<CatalogEntry> {
    (0..n)
        .map(|i| CatalogEntry::new(format!("uuid-{i}"), format!("Animal {i}"), format!("img-{i}")))
        .collect()
}

fn loaded(difficulty: usize) -> GameState {
    let config = GameConfig::default().with_initial_difficulty(difficulty);
    reduce(
        &GameState::new(&config),
        &GameEvent::LoadCatalogSucceeded(catalog(20)),
    )
}

fn bench_deal(c: &mut Criterion) {
    let state = loaded(40);
    let mut rng = state.rng.clone();

    c.bench_function("deal_40_cards", |b| {
        b.iter(|| deal_board(black_box(&state.catalog), 40, &mut rng))
    });
}

fn bench_reset(c: &mut Criterion) {
    let state = loaded(40);

    c.bench_function("reset_game_40_cards", |b| {
        b.iter(|| reduce(black_box(&state), &GameEvent::ResetGame))
    });
}

fn bench_flip_resolve(c: &mut Criterion) {
    let state = loaded(40);
    let first = GameEvent::FlipCard(state.board[0].id.clone());
    let second = GameEvent::FlipCard(state.board[1].id.clone());

    c.bench_function("flip_flip_resolve", |b| {
        b.iter(|| {
            let s = reduce(black_box(&state), &first);
            let s = reduce(&s, &second);
            reduce(&s, &GameEvent::resolve_for(&s))
        })
    });
}

fn bench_tick(c: &mut Criterion) {
    let state = reduce(&loaded(40), &GameEvent::StartTimer);
    let tick = GameEvent::tick_for(&state);

    c.bench_function("tick", |b| {
        b.iter(|| reduce(black_box(&state), &tick))
    });
}

criterion_group!(benches, bench_deal, bench_reset, bench_flip_resolve, bench_tick);
criterion_main!(benches);
