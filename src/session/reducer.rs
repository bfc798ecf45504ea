//! Inbound message reducer
//!
//! Every broadcast replaces the local state wholesale; there is no merge
//! and no ordering check. If both players act before either broadcast
//! arrives, the later broadcast wins and the other action is lost.
//!
//! The bag is never on the wire, so it is carried over from the local
//! state (or regenerated on reset). Rules travel with the board, so
//! scores agree across the room even when players picked different
//! minimums in the lobby.

use crate::game::{Board, GameConfig, GameState};
use crate::network::protocol::{FlipPayload, Message, SnatchPayload};
use rand::Rng;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Apply one inbound message, producing the next state
pub fn apply(state: &GameState, msg: &Message) -> GameState {
    apply_with_rng(state, msg, &mut rand::rng())
}

/// Apply one inbound message with a specific RNG for the reset bag
pub fn apply_with_rng<R: Rng + ?Sized>(state: &GameState, msg: &Message, rng: &mut R) -> GameState {
    if msg.room() != state.room() {
        debug!(room = state.room(), other = msg.room(), "ignoring message for another room");
        return state.clone();
    }

    match msg {
        Message::ClientConnectReceive(payload) | Message::SnatchReceive(payload) => {
            on_snapshot(state, payload)
        }
        Message::FlipReceive(payload) => on_flip(state, payload),
        Message::ResetReceive { .. } => state.reset_with_rng(rng),
        other => {
            debug!(event = other.event_name(), "not an inbound event");
            state.clone()
        }
    }
}

fn on_flip(state: &GameState, payload: &FlipPayload) -> GameState {
    let board = board_from_views(&payload.tiles, &payload.squares);
    adopt_rules(state.clone(), payload.rules).with_board(board)
}

fn on_snapshot(state: &GameState, payload: &SnatchPayload) -> GameState {
    let board = board_from_views(&payload.tiles, &payload.squares);
    let next = adopt_rules(state.clone(), payload.rules)
        .with_board(board)
        .with_words(payload.p1words.clone(), payload.p2words.clone());

    let scores = next.scores();
    if payload.rules.is_some() && (scores.p1, scores.p2) != (payload.p1score, payload.p2score) {
        warn!(
            room = next.room(),
            sent_p1 = payload.p1score,
            sent_p2 = payload.p2score,
            p1 = scores.p1,
            p2 = scores.p2,
            "snapshot scores disagree with its word lists"
        );
    }
    next
}

fn adopt_rules(state: GameState, rules: Option<GameConfig>) -> GameState {
    match rules {
        Some(rules) if rules != state.config() => {
            debug!(
                room = state.room(),
                min_word_length = rules.min_word_length,
                scoring = %rules.scoring,
                "adopting room rules"
            );
            state.with_config(rules)
        }
        _ => state,
    }
}

/// Trust `tiles` (it carries placement order) unless it disagrees with
/// `squares`, which then wins.
fn board_from_views(tiles: &BTreeMap<char, Vec<usize>>, squares: &BTreeMap<usize, char>) -> Board {
    match Board::from_views(tiles.clone(), squares.clone()) {
        Some(board) => board,
        None => {
            warn!(cells = squares.len(), "inconsistent board views; rebuilding from squares");
            Board::from_squares(squares.clone())
        }
    }
}
