//! Per-room session
//!
//! A `Session` is created when the game view opens and dropped when it
//! closes; dropping it closes the relay connection. Local actions mutate
//! the state first and then broadcast it; inbound broadcasts replace the
//! state through [`reducer::apply`].

pub mod reducer;

use crate::game::state::Placement;
use crate::game::{Dictionary, GameConfig, GameState, PlayerSlot, SnatchOutcome};
use crate::network::{Client, FlipPayload, Message, SnatchPayload};
use rand::Rng;
use std::io;
use thiserror::Error;
use tracing::{debug, info};

/// Errors talking to the relay
#[derive(Debug, Error)]
pub enum SessionError {
    /// Could not reach the relay
    #[error("could not connect to relay at {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: io::Error,
    },
    /// The connection dropped while sending
    #[error("relay connection lost: {0}")]
    Send(#[from] io::Error),
}

/// One player's view of a room
pub struct Session {
    client: Client,
    state: GameState,
    dictionary: Dictionary,
}

impl Session {
    /// Connect to the relay, join `room` and request its snapshot
    pub fn enter(
        server: &str,
        room: &str,
        config: GameConfig,
        dictionary: Dictionary,
    ) -> Result<Self, SessionError> {
        Self::enter_with_rng(server, room, config, dictionary, &mut rand::rng())
    }

    /// Like [`Session::enter`], shuffling the local bag with `rng`
    pub fn enter_with_rng<R: Rng + ?Sized>(
        server: &str,
        room: &str,
        config: GameConfig,
        dictionary: Dictionary,
        rng: &mut R,
    ) -> Result<Self, SessionError> {
        let client = Client::connect(server).map_err(|source| SessionError::Connect {
            addr: server.to_string(),
            source,
        })?;
        client.join(room)?;
        info!(relay = %client.relay_addr(), room, "entered room");

        Ok(Self {
            client,
            state: GameState::new_with_rng(room, config, rng),
            dictionary,
        })
    }

    /// Current local state
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Room identifier
    pub fn room(&self) -> &str {
        self.state.room()
    }

    /// Check if the relay connection is still up
    pub fn is_connected(&self) -> bool {
        self.client.is_connected()
    }

    /// Apply every broadcast that arrived since the last call.
    ///
    /// Returns the number of messages applied.
    pub fn poll(&mut self) -> usize {
        let messages = self.client.poll();
        for msg in &messages {
            debug!(room = self.state.room(), event = msg.event_name(), "inbound");
            self.state = reducer::apply(&self.state, msg);
        }
        messages.len()
    }

    /// Flip a tile and broadcast the board.
    ///
    /// Returns `Ok(None)` (and sends nothing) when the board is full or the
    /// bag is empty.
    pub fn flip(&mut self) -> Result<Option<Placement>, SessionError> {
        let Some(placed) = self.state.flip() else {
            return Ok(None);
        };
        self.client
            .send(&Message::FlipSend(FlipPayload::from_state(&self.state)))?;
        Ok(Some(placed))
    }

    /// Submit a word for `slot` and broadcast the resulting state.
    ///
    /// The snapshot goes out whether or not the word was accepted.
    pub fn submit(&mut self, slot: PlayerSlot, word: &str) -> Result<SnatchOutcome, SessionError> {
        let outcome = self.state.submit(slot, word, &self.dictionary);
        self.client
            .send(&Message::SnatchSend(SnatchPayload::from_state(&self.state)))?;
        Ok(outcome)
    }

    /// Ask the relay to wipe the room for everyone, then wipe it locally.
    ///
    /// Nothing changes if the request cannot be sent.
    pub fn reset(&mut self) -> Result<(), SessionError> {
        self.client.send(&Message::ResetSend {
            room: self.state.room().to_string(),
        })?;
        self.state = self.state.reset_with_rng(&mut rand::rng());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::LetterBag;
    use crate::network::Relay;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::thread;
    use std::time::Duration;

    const SEED: u64 = 11;

    fn start_relay() -> String {
        let mut relay = Relay::bind("127.0.0.1", 0).unwrap();
        let addr = relay.addr().to_string();
        thread::spawn(move || relay.run());
        addr
    }

    fn pump(sessions: &mut [&mut Session]) {
        for _ in 0..8 {
            thread::sleep(Duration::from_millis(30));
            for session in sessions.iter_mut() {
                session.poll();
            }
        }
    }

    /// The first three letters a bag shuffled with `SEED` will deal
    fn first_three() -> String {
        let bag = LetterBag::generate_with_rng(&mut StdRng::seed_from_u64(SEED));
        bag.tiles().iter().rev().take(3).collect()
    }

    fn enter(addr: &str, room: &str, dictionary: Dictionary) -> Session {
        Session::enter_with_rng(
            addr,
            room,
            GameConfig::default(),
            dictionary,
            &mut StdRng::seed_from_u64(SEED),
        )
        .unwrap()
    }

    #[test]
    fn test_enter_unreachable_relay() {
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let err = Session::enter(
            &format!("127.0.0.1:{}", port),
            "1",
            GameConfig::default(),
            Dictionary::default(),
        )
        .err()
        .unwrap();
        assert!(matches!(err, SessionError::Connect { .. }));
    }

    #[test]
    fn test_two_players_share_a_room() {
        let addr = start_relay();
        let word = first_three();
        let dict = Dictionary::from_words([word.as_str()]);

        let mut a = enter(&addr, "300", dict.clone());
        let mut b = enter(&addr, "300", dict);
        pump(&mut [&mut a, &mut b]);

        for _ in 0..3 {
            a.flip().unwrap().unwrap();
        }
        pump(&mut [&mut a, &mut b]);
        assert_eq!(b.state().board(), a.state().board());
        assert_eq!(b.state().board().len(), 3);

        let outcome = b.submit(PlayerSlot::P2, &word).unwrap();
        assert!(outcome.is_accepted());
        pump(&mut [&mut a, &mut b]);

        assert_eq!(a.state().words(PlayerSlot::P2), [word.clone()]);
        assert!(a.state().board().is_empty());
        assert_eq!(a.state().scores(), b.state().scores());
    }

    #[test]
    fn test_players_with_different_minimums_agree_on_scores() {
        let addr = start_relay();
        let word = first_three();
        let dict = Dictionary::from_words([word.as_str()]);

        let mut a = enter(&addr, "304", dict.clone());
        let strict = GameConfig {
            min_word_length: 4,
            scoring: GameConfig::default().scoring,
        };
        let mut b = Session::enter_with_rng(
            &addr,
            "304",
            strict,
            dict,
            &mut StdRng::seed_from_u64(SEED),
        )
        .unwrap();
        pump(&mut [&mut a, &mut b]);
        assert_eq!(b.state().config(), strict);

        for _ in 0..3 {
            a.flip().unwrap().unwrap();
        }
        a.submit(PlayerSlot::P1, &word).unwrap();
        pump(&mut [&mut a, &mut b]);

        assert_eq!(b.state().config(), a.state().config());
        assert_eq!(b.state().scores(), a.state().scores());
        assert_eq!(b.state().words(PlayerSlot::P1), [word]);
    }

    #[test]
    fn test_rejected_submission_still_broadcasts() {
        let addr = start_relay();
        let mut a = enter(&addr, "301", Dictionary::default());
        pump(&mut [&mut a]);

        let outcome = a.submit(PlayerSlot::P1, "ZZZZ").unwrap();
        assert!(!outcome.is_accepted());

        thread::sleep(Duration::from_millis(200));
        assert_eq!(a.poll(), 1);
        assert!(a.state().words(PlayerSlot::P1).is_empty());
    }

    #[test]
    fn test_late_joiner_gets_snapshot() {
        let addr = start_relay();
        let word = first_three();
        let dict = Dictionary::from_words([word.as_str()]);

        let mut a = enter(&addr, "302", dict.clone());
        pump(&mut [&mut a]);
        for _ in 0..3 {
            a.flip().unwrap();
        }
        a.submit(PlayerSlot::P1, &word).unwrap();
        a.flip().unwrap();
        pump(&mut [&mut a]);

        let mut late = enter(&addr, "302", dict);
        pump(&mut [&mut late]);
        assert_eq!(late.state().words(PlayerSlot::P1), [word]);
        assert_eq!(late.state().board(), a.state().board());
    }

    #[test]
    fn test_reset_on_lost_connection_keeps_local_state() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap().to_string();
        thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            drop(stream);
        });

        let mut a = enter(&addr, "305", Dictionary::default());
        a.flip().unwrap().unwrap();
        a.flip().unwrap().unwrap();

        for _ in 0..20 {
            thread::sleep(Duration::from_millis(30));
            a.poll();
            if !a.is_connected() {
                break;
            }
        }
        assert!(!a.is_connected());

        assert!(matches!(a.reset(), Err(SessionError::Send(_))));
        assert_eq!(a.state().board().len(), 2);
    }

    #[test]
    fn test_reset_reaches_everyone() {
        let addr = start_relay();
        let mut a = enter(&addr, "303", Dictionary::default());
        let mut b = enter(&addr, "303", Dictionary::default());
        pump(&mut [&mut a, &mut b]);

        a.flip().unwrap();
        a.flip().unwrap();
        pump(&mut [&mut a, &mut b]);
        assert_eq!(b.state().board().len(), 2);

        b.reset().unwrap();
        pump(&mut [&mut a, &mut b]);
        assert!(a.state().board().is_empty());
        assert!(b.state().board().is_empty());
        assert_eq!(a.state().bag().len(), crate::game::BAG_SIZE);
    }
}
