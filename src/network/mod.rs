//! Networking: room relay and participant connections
//!
//! This module provides:
//! - Length-prefixed JSON protocol for the room events
//! - Threaded TCP peer connections
//! - A TCP server (default port 55333 with auto-increment) and the room
//!   relay built on it
//! - A TCP client for joining a room (via --server HOST:PORT)

pub mod client;
pub mod peer;
pub mod protocol;
pub mod relay;
pub mod server;

pub use client::Client;
pub use protocol::{FlipPayload, Message, SnatchPayload};
pub use relay::Relay;
pub use server::{Server, ServerEvent, DEFAULT_PORT};
