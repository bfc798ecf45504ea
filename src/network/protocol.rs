//! Network protocol message types
//!
//! Length-prefixed JSON frames over TCP: a 4-byte big-endian length, then
//! `{"event": "<name>", "data": {...}}`.

use crate::game::board::Layout;
use crate::game::{GameConfig, GameState, PlayerSlot};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::{self, Read};

/// Largest frame body accepted from the wire
pub const MAX_FRAME_LEN: usize = 1024 * 1024;

/// Board views after a flip
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlipPayload {
    pub tiles: BTreeMap<char, Vec<usize>>,
    pub squares: BTreeMap<usize, char>,
    #[serde(default)]
    pub rows: Layout,
    pub room: String,
    /// Sender's rules; absent from peers that do not send them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<GameConfig>,
}

impl FlipPayload {
    /// Board views of a local state
    pub fn from_state(state: &GameState) -> Self {
        let board = state.board();
        Self {
            tiles: board.tiles().clone(),
            squares: board.squares().clone(),
            rows: board.layout(),
            room: state.room().to_string(),
            rules: Some(state.config()),
        }
    }
}

/// Full room snapshot: board views, both word lists and scores
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnatchPayload {
    pub tiles: BTreeMap<char, Vec<usize>>,
    pub squares: BTreeMap<usize, char>,
    #[serde(default)]
    pub rows: Layout,
    pub p1words: Vec<String>,
    pub p2words: Vec<String>,
    #[serde(default)]
    pub p1score: u32,
    #[serde(default)]
    pub p2score: u32,
    pub room: String,
    /// Rules the scores were computed under
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<GameConfig>,
}

impl SnatchPayload {
    /// Snapshot of a local state
    pub fn from_state(state: &GameState) -> Self {
        let board = state.board();
        let scores = state.scores();
        Self {
            tiles: board.tiles().clone(),
            squares: board.squares().clone(),
            rows: board.layout(),
            p1words: state.words(PlayerSlot::P1).to_vec(),
            p2words: state.words(PlayerSlot::P2).to_vec(),
            p1score: scores.p1,
            p2score: scores.p2,
            room: state.room().to_string(),
            rules: Some(state.config()),
        }
    }

    /// Snapshot of a room nobody has played in yet
    pub fn empty(room: &str) -> Self {
        Self {
            tiles: BTreeMap::new(),
            squares: BTreeMap::new(),
            rows: crate::game::Board::new().layout(),
            p1words: Vec::new(),
            p2words: Vec::new(),
            p1score: 0,
            p2score: 0,
            room: room.to_string(),
            rules: None,
        }
    }

    /// Take the board views (and rules, if sent) of a flip, keeping words
    /// and scores
    pub fn merge_flip(&mut self, flip: &FlipPayload) {
        self.tiles = flip.tiles.clone();
        self.squares = flip.squares.clone();
        self.rows = flip.rows.clone();
        if flip.rules.is_some() {
            self.rules = flip.rules;
        }
    }
}

/// Messages exchanged with the relay
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum Message {
    /// Enter a room (client -> relay)
    Join { room: String },
    /// Ask for the room's last snapshot (client -> relay)
    GetState { room: String },
    /// Board after a local flip (client -> relay)
    FlipSend(FlipPayload),
    /// Full state after a local submission, accepted or not (client -> relay)
    SnatchSend(SnatchPayload),
    /// Wipe the room (client -> relay)
    ResetSend { room: String },
    /// Snapshot answering `get-state` (relay -> requester)
    ClientConnectReceive(SnatchPayload),
    /// Flip broadcast (relay -> room)
    FlipReceive(FlipPayload),
    /// Submission broadcast (relay -> room)
    SnatchReceive(SnatchPayload),
    /// Wipe broadcast (relay -> room)
    ResetReceive { room: String },
}

impl Message {
    /// Room the message concerns
    pub fn room(&self) -> &str {
        match self {
            Message::Join { room }
            | Message::GetState { room }
            | Message::ResetSend { room }
            | Message::ResetReceive { room } => room,
            Message::FlipSend(p) | Message::FlipReceive(p) => &p.room,
            Message::SnatchSend(p)
            | Message::ClientConnectReceive(p)
            | Message::SnatchReceive(p) => &p.room,
        }
    }

    /// Wire name of the event
    pub fn event_name(&self) -> &'static str {
        match self {
            Message::Join { .. } => "join",
            Message::GetState { .. } => "get-state",
            Message::FlipSend(_) => "flip-send",
            Message::SnatchSend(_) => "snatch-send",
            Message::ResetSend { .. } => "reset-send",
            Message::ClientConnectReceive(_) => "client-connect-receive",
            Message::FlipReceive(_) => "flip-receive",
            Message::SnatchReceive(_) => "snatch-receive",
            Message::ResetReceive { .. } => "reset-receive",
        }
    }

    /// Serialize message to bytes (length-prefixed JSON)
    pub fn to_bytes(&self) -> io::Result<Vec<u8>> {
        let json = serde_json::to_vec(self).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        if json.len() > MAX_FRAME_LEN {
            return Err(io::Error::new(io::ErrorKind::InvalidData, "message too large"));
        }
        let len = json.len() as u32;
        let mut bytes = Vec::with_capacity(4 + json.len());
        bytes.extend_from_slice(&len.to_be_bytes());
        bytes.extend_from_slice(&json);
        Ok(bytes)
    }

    /// Decode one frame body
    pub fn from_json(body: &[u8]) -> io::Result<Self> {
        serde_json::from_slice(body).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

/// Read one frame body without decoding it.
///
/// An error here leaves the stream out of step; a body that later fails
/// to decode does not.
pub fn read_frame<R: Read>(stream: &mut R) -> io::Result<Vec<u8>> {
    let mut len_buf = [0u8; 4];
    stream.read_exact(&mut len_buf)?;
    let len = u32::from_be_bytes(len_buf) as usize;

    if len > MAX_FRAME_LEN {
        return Err(io::Error::new(io::ErrorKind::InvalidData, "message too large"));
    }

    let mut body = vec![0u8; len];
    stream.read_exact(&mut body)?;
    Ok(body)
}
