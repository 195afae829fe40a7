//! The transition function.
//!
//! `reduce(state, event)` returns the next state and never mutates its
//! input. A no-op event returns a value equal to the input.
//!
//! ## Board re-initialization
//!
//! A fresh deal happens whenever the catalog arrives, the viewport class
//! changes, difficulty changes, or the game is reset, provided the catalog
//! is non-empty. Events that leave those inputs unchanged never redeal.
//!
//! ## Stale timers
//!
//! `ResolvePendingMatch` and `Tick` carry the generation and deal they were
//! scheduled under. If a reset or a redeal has happened since, they are
//! discarded.

use smallvec::SmallVec;

use super::board::deal_board;
use crate::core::{CardId, CardStatus, GameEvent, GameState, LoadStatus, Viewport};

/// Apply one event.
#[must_use]
pub fn reduce(state: &GameState, event: &GameEvent) -> GameState {
    match event {
        GameEvent::LoadCatalogRequested => {
            let mut next = state.clone();
            next.load_status = LoadStatus::Loading;
            next
        }

        GameEvent::LoadCatalogSucceeded(entries) => {
            let mut next = state.clone();
            next.catalog = entries.iter().cloned().collect();
            next.load_status = LoadStatus::Ready;
            initialize_board(&next)
        }

        GameEvent::LoadCatalogFailed { reason } => {
            tracing::warn!("Catalog load failed: {}", reason);
            let mut next = state.clone();
            next.load_status = LoadStatus::Failed;
            next
        }

        GameEvent::ViewportChanged(viewport) => change_viewport(state, *viewport),

        GameEvent::InitializeBoard => initialize_board(state),

        GameEvent::FlipCard(card_id) => flip_card(state, card_id),

        GameEvent::ResolvePendingMatch { generation, deal } => {
            resolve_pending_match(state, *generation, *deal)
        }

        GameEvent::IncreaseDifficulty => increase_difficulty(state),

        GameEvent::ResetGame => reset_game(state),

        GameEvent::StartTimer => {
            let mut next = state.clone();
            next.timer_running = true;
            next
        }

        GameEvent::StopTimer => {
            let mut next = state.clone();
            next.timer_running = false;
            next
        }

        GameEvent::ResetTimer => {
            let mut next = state.clone();
            next.elapsed_seconds = 0;
            next.timer_running = false;
            next
        }

        GameEvent::Tick { generation, deal } => tick(state, *generation, *deal),
    }
}

/// Deal a fresh board and zero the round counters.
fn initialize_board(state: &GameState) -> GameState {
    if state.catalog.is_empty() {
        tracing::debug!("No catalog entries available to initialize the board");
        return state.clone();
    }

    let mut next = state.clone();
    let card_count = next.playable_card_count();
    next.board = deal_board(&next.catalog, card_count, &mut next.rng);
    next.deal += 1;
    next.matches = 0;
    next.mistakes = 0;
    next.flipped = SmallVec::new();
    next.elapsed_seconds = 0;
    next.timer_running = false;

    tracing::debug!(
        "Dealt {} cards (difficulty {}, generation {}, deal {})",
        next.board.len(),
        next.difficulty,
        next.generation,
        next.deal
    );
    next
}

fn change_viewport(state: &GameState, viewport: Viewport) -> GameState {
    if state.viewport == viewport {
        return state.clone();
    }
    let mut next = state.clone();
    next.viewport = viewport;
    initialize_board(&next)
}

fn flip_card(state: &GameState, card_id: &CardId) -> GameState {
    if state.flipped.len() >= 2 {
        return state.clone();
    }

    let Some(index) = state.card_index(card_id) else {
        tracing::debug!("Ignoring flip of unknown card {}", card_id);
        return state.clone();
    };

    let card = &state.board[index];
    if card.status != CardStatus::Hidden {
        return state.clone();
    }

    let mut next = state.clone();
    next.board.set(index, card.with_status(CardStatus::Flipped));
    next.flipped.push(card_id.clone());
    if !next.timer_running {
        next.timer_running = true;
    }
    next
}

/// True if a timer scheduled under `(generation, deal)` still applies.
fn is_current(state: &GameState, generation: u64, deal: u64) -> bool {
    generation == state.generation && deal == state.deal
}

fn resolve_pending_match(state: &GameState, generation: u64, deal: u64) -> GameState {
    if !is_current(state, generation, deal) {
        tracing::debug!(
            "Discarding match resolution from generation {} deal {} (current {}/{})",
            generation,
            deal,
            state.generation,
            state.deal
        );
        return state.clone();
    }

    if state.flipped.len() != 2 {
        tracing::warn!(
            "Match resolution requested with {} flipped card(s)",
            state.flipped.len()
        );
        return state.clone();
    }

    let first_id = &state.flipped[0];
    let second_id = &state.flipped[1];
    let (Some(first), Some(second)) = (state.card_index(first_id), state.card_index(second_id))
    else {
        tracing::error!(
            "Missing card data during match check ({}, {}); clearing flipped cards",
            first_id,
            second_id
        );
        let mut next = state.clone();
        next.flipped = SmallVec::new();
        return next;
    };

    let is_match = state.board[first].same_face(&state.board[second]);
    let status = if is_match {
        CardStatus::Matched
    } else {
        CardStatus::Hidden
    };

    let mut next = state.clone();
    for index in [first, second] {
        let card = next.board[index].with_status(status);
        next.board.set(index, card);
    }
    next.flipped = SmallVec::new();

    if is_match {
        next.matches += 1;
        if next.is_complete() {
            next.timer_running = false;
            tracing::info!(
                "Game complete: {} matches, {} mistakes, {}s",
                next.matches,
                next.mistakes,
                next.elapsed_seconds
            );
        }
    } else {
        next.mistakes += 1;
    }
    next
}

fn increase_difficulty(state: &GameState) -> GameState {
    let target = (state.difficulty + state.limits.step).min(state.max_difficulty());
    if target == state.difficulty {
        return state.clone();
    }
    let mut next = state.clone();
    next.difficulty = target;
    initialize_board(&next)
}

fn reset_game(state: &GameState) -> GameState {
    let mut next = state.clone();
    next.generation += 1;
    next.elapsed_seconds = 0;
    next.timer_running = false;
    next.matches = 0;
    next.mistakes = 0;
    next.flipped = SmallVec::new();
    initialize_board(&next)
}

fn tick(state: &GameState, generation: u64, deal: u64) -> GameState {
    if !is_current(state, generation, deal) || !state.timer_running {
        return state.clone();
    }
    let mut next = state.clone();
    next.elapsed_seconds += 1;
    next
}
