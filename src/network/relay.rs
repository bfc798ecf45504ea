//! Room relay
//!
//! Forwards game events between the members of a room and remembers each
//! room's last snapshot for late joiners. It never checks game rules:
//! whatever a client sends is stored and echoed back to the whole room,
//! sender included.

use super::protocol::{Message, SnatchPayload};
use super::server::{Server, ServerEvent};
use std::collections::HashMap;
use std::io;
use std::net::SocketAddr;
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Relay poll interval
const TICK: Duration = Duration::from_millis(20);

/// A room relay on top of a [`Server`]
pub struct Relay {
    server: Server,
    snapshots: HashMap<String, SnatchPayload>,
}

impl Relay {
    /// Wrap a started server
    pub fn new(server: Server) -> Self {
        Self {
            server,
            snapshots: HashMap::new(),
        }
    }

    /// Bind and start relaying on `host:port` (auto-incrementing the port)
    pub fn bind(host: &str, port: u16) -> io::Result<Self> {
        Ok(Self::new(Server::start_on(host, port)?))
    }

    /// Address the relay listens on
    pub fn addr(&self) -> SocketAddr {
        self.server.addr()
    }

    /// Last snapshot stored for `room`
    #[cfg(test)]
    pub fn snapshot(&self, room: &str) -> Option<&SnatchPayload> {
        self.snapshots.get(room)
    }

    /// Handle everything that arrived since the last call.
    ///
    /// Returns the number of events processed.
    pub fn step(&mut self) -> usize {
        let events = self.server.poll();
        let count = events.len();
        for event in events {
            self.handle(event);
        }
        count
    }

    /// Relay until the listener dies
    pub fn run(&mut self) {
        info!(addr = %self.addr(), "relay listening");
        while self.server.is_running() {
            if self.step() == 0 {
                thread::sleep(TICK);
            }
        }
        warn!("listener stopped; relay exiting");
    }

    fn handle(&mut self, event: ServerEvent) {
        match event {
            ServerEvent::PeerConnected { addr } => {
                debug!(peer = %addr, peers = self.server.peer_count(), "peer connected");
            }
            ServerEvent::PeerDisconnected { addr, room } => {
                info!(peer = %addr, room = room.as_deref().unwrap_or("-"), "peer disconnected");
            }
            ServerEvent::MessageReceived { from, message, .. } => {
                self.relay(from, message);
            }
        }
    }

    fn relay(&mut self, from: SocketAddr, message: Message) {
        match message {
            Message::Join { room } => {
                info!(peer = %from, room = %room, members = self.server.room_size(&room), "joined room");
            }
            Message::GetState { room } => {
                let snapshot = self
                    .snapshots
                    .get(&room)
                    .cloned()
                    .unwrap_or_else(|| SnatchPayload::empty(&room));
                if let Err(e) = self
                    .server
                    .send_to(from, &Message::ClientConnectReceive(snapshot))
                {
                    warn!(peer = %from, room = %room, error = %e, "could not answer get-state");
                }
            }
            Message::FlipSend(payload) => {
                let room = payload.room.clone();
                self.snapshots
                    .entry(room.clone())
                    .or_insert_with(|| SnatchPayload::empty(&room))
                    .merge_flip(&payload);
                self.broadcast(&room, Message::FlipReceive(payload));
            }
            Message::SnatchSend(payload) => {
                let room = payload.room.clone();
                self.snapshots.insert(room.clone(), payload.clone());
                self.broadcast(&room, Message::SnatchReceive(payload));
            }
            Message::ResetSend { room } => {
                self.snapshots.remove(&room);
                info!(peer = %from, room = %room, "room reset");
                self.broadcast(&room, Message::ResetReceive { room: room.clone() });
            }
            other => {
                warn!(peer = %from, event = other.event_name(), "ignoring relay-bound event from client");
            }
        }
    }

    fn broadcast(&self, room: &str, message: Message) {
        let sent = self.server.broadcast_room(room, &message);
        debug!(room, event = message.event_name(), recipients = sent, "broadcast");
    }
}
