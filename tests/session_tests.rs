//! Session tests - a board hosted on tokio, driven by the instant presenter

use std::time::Duration;

use push_match::core::{Board, BoardConfig, BoardError, BoardEvent, Effect, Grid, SimpleRng};
use push_match::runtime::{spawn_session, InstantPresenter, Journal, JournalRecord, SessionError};
use push_match::types::{BoardState, Cell, PieceType, PushDirection, BOARD_SIZE};

fn scoring_grid() -> Grid {
    use PieceType::*;
    let top = [Red, Blue, Red, Red, Yellow, Green, Blue, Purple];
    let mut rows = [[Red; BOARD_SIZE as usize]; BOARD_SIZE as usize];
    for (row, kinds) in rows.iter_mut().enumerate() {
        for (col, kind) in kinds.iter_mut().enumerate() {
            *kind = if row == 0 {
                top[col]
            } else {
                PieceType::from_index((col + 2 * row) as u32)
            };
        }
    }
    Grid::from_kinds(rows)
}

#[tokio::test]
async fn test_turn_is_journaled_in_order() {
    let path = std::env::temp_dir().join(format!(
        "push-match-session-{}.jsonl",
        std::process::id()
    ));
    let path_str = path.to_string_lossy().to_string();
    let _ = tokio::fs::remove_file(&path).await;

    let grid = scoring_grid();
    let grabbed = grid.get(Cell::new(1, 0)).unwrap();
    let start = grid.get(Cell::new(0, 0)).unwrap();
    let board = Board::from_grid(grid, &BoardConfig::default(), SimpleRng::new(31));

    let (journal, journal_task) = Journal::open(&path_str).await.unwrap();
    let session = spawn_session(board, 8);
    let handle = session.handle.clone();
    let (presenter, mut settled) =
        InstantPresenter::new(handle.clone(), session.effects, Some(journal));
    let presenter_task = tokio::spawn(presenter.run());

    handle
        .send(BoardEvent::RequestPreview {
            place: grabbed,
            push: start,
            direction: PushDirection::Right,
        })
        .await
        .unwrap();
    handle.send(BoardEvent::PerformMove).await.unwrap();
    tokio::time::timeout(Duration::from_secs(2), settled.recv())
        .await
        .expect("timeout waiting for the board to settle")
        .unwrap();

    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.state, BoardState::Ready);
    assert!(snapshot.score >= 100);

    handle.shutdown().await.unwrap();
    drop(handle);
    session.task.await.unwrap();
    let stats = presenter_task.await.unwrap().unwrap();
    let written = journal_task.await.unwrap().unwrap();
    assert_eq!(written, stats.effects);

    let text = tokio::fs::read_to_string(&path).await.unwrap();
    let records: Vec<JournalRecord> = text
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(records.len() as u64, written);
    for (i, record) in records.iter().enumerate() {
        assert_eq!(record.seq, i as u64);
    }
    assert!(matches!(records[0].effect, Effect::Spawn { rows_above: 0, .. }));
    assert!(records
        .iter()
        .any(|r| r.effect == Effect::PointsAwarded { points: 100 }));

    let _ = tokio::fs::remove_file(&path).await;
}

#[tokio::test]
async fn test_input_while_busy_is_rejected() {
    let grid = scoring_grid();
    let grabbed = grid.get(Cell::new(1, 0)).unwrap();
    let start = grid.get(Cell::new(0, 0)).unwrap();
    let board = Board::from_grid(grid, &BoardConfig::default(), SimpleRng::new(2));

    // No presenter: the board stays paused on the first batch.
    let session = spawn_session(board, 4);
    session
        .handle
        .send(BoardEvent::RequestPreview {
            place: grabbed,
            push: start,
            direction: PushDirection::Right,
        })
        .await
        .unwrap();
    let effects = session.handle.send(BoardEvent::PerformMove).await.unwrap();
    assert!(effects.iter().any(|e| e.awaits_completion()));

    let err = session
        .handle
        .send(BoardEvent::CancelPreview)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        SessionError::Board(BoardError::Busy {
            state: BoardState::Paused
        })
    ));
    assert_eq!(err.code(), "busy");

    session.handle.shutdown().await.unwrap();
    let board = session.task.await.unwrap();
    assert_eq!(board.outstanding(), 2);
}
