use criterion::{black_box, criterion_group, criterion_main, Criterion};
use push_match::core::{
    find_matches, find_scoring_push, resolve_path, Board, BoardConfig, BoardEvent, Effect,
};
use push_match::types::{Cell, PieceId, PushDirection};

fn bench_find_matches(c: &mut Criterion) {
    let board = Board::new(BoardConfig::default().with_seed(12345));

    c.bench_function("find_matches_full_board", |b| {
        b.iter(|| find_matches(black_box(board.grid())))
    });
}

fn bench_resolve_path(c: &mut Criterion) {
    let board = Board::new(BoardConfig::for_level(4, 0).with_seed(12345));
    let grid = board.grid();
    let soft: Vec<PieceId> = grid
        .occupied()
        .filter(|(_, piece)| !piece.hardened)
        .map(|(_, piece)| piece.id)
        .collect();
    let grabbed = soft[0];
    let start = soft[soft.len() - 1];

    c.bench_function("resolve_path_corner_to_corner", |b| {
        b.iter(|| resolve_path(black_box(grid), grabbed, start, PushDirection::Up))
    });
}

fn bench_hint(c: &mut Criterion) {
    let board = Board::new(BoardConfig::default().with_seed(12345));

    c.bench_function("find_scoring_push", |b| {
        b.iter(|| find_scoring_push(black_box(board.grid())))
    });
}

fn bench_full_turn(c: &mut Criterion) {
    c.bench_function("push_and_settle", |b| {
        b.iter(|| {
            let mut board = Board::new(BoardConfig::default().with_seed(777));
            let push = board.grid().get(Cell::new(3, 3));
            let place = board.grid().get(Cell::new(4, 3));
            let (Some(push), Some(place)) = (push, place) else {
                return;
            };
            let _ = board.handle(BoardEvent::RequestPreview {
                place,
                push,
                direction: PushDirection::Right,
            });
            let mut effects = board.handle(BoardEvent::PerformMove).unwrap_or_default();
            while !effects.is_empty() {
                let awaited: Vec<PieceId> = effects
                    .iter()
                    .filter(|e| e.awaits_completion())
                    .filter_map(Effect::piece)
                    .collect();
                effects.clear();
                for piece in awaited {
                    if let Ok(more) = board.handle(BoardEvent::AnimationFinished { piece }) {
                        effects.extend(more);
                    }
                }
            }
            black_box(board.score());
        });
    });
}

criterion_group!(
    benches,
    bench_find_matches,
    bench_resolve_path,
    bench_hint,
    bench_full_turn
);
criterion_main!(benches);
