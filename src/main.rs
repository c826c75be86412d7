//! Headless push-match runner (default binary).
//!
//! Plays levels on its own: each turn it asks the board for a scoring push
//! (or makes a random one when none exists), lets the instant presenter play
//! the animations, and moves on to the next level after a win. Stops on game
//! over or after `PUSH_MATCH_MAX_TURNS` turns.
//!
//! Logging is controlled with `RUST_LOG` on top of `push_match=info`.

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use push_match::core::types::{Cell, Outcome, PushDirection};
use push_match::core::{Board, BoardEvent, Randomizer, SimpleRng};
use push_match::runtime::{
    spawn_session, InstantPresenter, Journal, SessionConfig, SessionError, SessionHandle,
};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("push_match=info".parse()?))
        .init();

    let config = SessionConfig::from_env();
    tracing::info!(
        level = config.board.level,
        seed = config.board.seed,
        max_turns = config.max_turns,
        "starting headless run"
    );

    let journal = match &config.journal_path {
        Some(path) => Some(Journal::open(path).await?),
        None => None,
    };
    let (journal, journal_task) = match journal {
        Some((journal, task)) => (Some(journal), Some(task)),
        None => (None, None),
    };

    let mut board_config = config.board.clone();
    let mut turns_left = config.max_turns;
    let mut chooser = SimpleRng::new(board_config.seed.wrapping_add(1));

    loop {
        let board = Board::new(board_config.clone());
        let session = spawn_session(board, config.max_pending_commands);
        let handle = session.handle.clone();
        let (presenter, mut settled) =
            InstantPresenter::new(handle.clone(), session.effects, journal.clone());
        let presenter_task = tokio::spawn(presenter.run());

        let outcome = play_level(&handle, &mut settled, &mut chooser, &mut turns_left).await?;

        handle.shutdown().await?;
        drop(handle);
        let board = session.task.await.context("session task panicked")?;
        let stats = presenter_task.await.context("presenter task panicked")??;

        tracing::info!(
            level = board.level(),
            score = board.score(),
            turns = board.turns_taken(),
            hardened = board.hardened_count(),
            acknowledged = stats.acknowledged,
            "level finished"
        );
        println!("{}", board.grid());

        match outcome {
            Some(Outcome::Won) if turns_left > 0 => {
                board_config = board.next_level_config().with_seed(chooser.next_u32());
            }
            Some(Outcome::Won) => {
                println!(
                    "won level {} with {} points; turn limit reached",
                    board.level(),
                    board.score()
                );
                break;
            }
            Some(Outcome::Lost) => {
                println!(
                    "game over on level {} with {} points",
                    board.level(),
                    board.score()
                );
                break;
            }
            None => {
                println!(
                    "stopped on level {} with {} points",
                    board.level(),
                    board.score()
                );
                break;
            }
        }
    }

    drop(journal);
    if let Some(task) = journal_task {
        let written = task.await.context("journal task panicked")??;
        tracing::info!(written, "journal closed");
    }
    Ok(())
}

/// Play turns until the level ends or `turns_left` hits zero
async fn play_level(
    handle: &SessionHandle,
    settled: &mut tokio::sync::mpsc::UnboundedReceiver<()>,
    chooser: &mut SimpleRng,
    turns_left: &mut u32,
) -> Result<Option<Outcome>> {
    while *turns_left > 0 {
        let snapshot = handle.snapshot().await?;
        if let Some(outcome) = snapshot.outcome {
            return Ok(Some(outcome));
        }

        if !request_push(handle, chooser).await? {
            tracing::warn!("no push could be armed, stopping");
            break;
        }
        handle.send(BoardEvent::PerformMove).await?;
        settled.recv().await.context("presenter stopped")?;
        *turns_left -= 1;
    }

    Ok(handle.snapshot().await?.outcome)
}

/// Arm a preview: the hinted push if there is one, otherwise a random one
async fn request_push(handle: &SessionHandle, chooser: &mut SimpleRng) -> Result<bool> {
    if let Some(hint) = handle.hint().await? {
        tracing::debug!(cleared = hint.cleared, "playing hint");
        handle
            .send(BoardEvent::RequestPreview {
                place: hint.place,
                push: hint.push,
                direction: hint.direction,
            })
            .await?;
        return Ok(true);
    }

    // No scoring push: try random neighbour pairs until one resolves.
    let snapshot = handle.snapshot().await?;
    let ids = handle.piece_ids().await?;
    let soft = |cell: Cell| !snapshot.hardened[cell.row as usize][cell.col as usize];
    for _ in 0..256 {
        let cell = chooser.next_cell();
        let direction = PushDirection::CARDINALS[chooser.next_range(4) as usize];
        let Some(next) = cell.step(direction) else {
            continue;
        };
        if !soft(cell) || !soft(next) {
            continue;
        }
        let (Some(push), Some(place)) = (ids[cell.index()], ids[next.index()]) else {
            continue;
        };
        let event = BoardEvent::RequestPreview {
            place,
            push,
            direction,
        };
        match handle.send(event).await {
            Ok(_) => return Ok(true),
            Err(SessionError::Board(err)) if err.is_recoverable() => continue,
            Err(err) => return Err(err.into()),
        }
    }
    Ok(false)
}
