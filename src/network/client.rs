//! TCP client: one participant's connection to the relay

use super::peer::Peer;
use super::protocol::Message;
use super::server::DEFAULT_PORT;
use std::io;
use std::net::{SocketAddr, ToSocketAddrs};

/// A room participant connected to a relay
pub struct Client {
    /// Connection to the relay
    peer: Peer,
}

impl Client {
    /// Connect to a relay at the given address
    ///
    /// The address can be:
    /// - "IP:PORT" (e.g., "192.168.1.100:55333")
    /// - "IP" (uses default port 55333)
    /// - "hostname:PORT"
    /// - "hostname" (uses default port)
    pub fn connect(addr: &str) -> io::Result<Self> {
        Self::connect_addr(parse_address(addr)?)
    }

    /// Connect to a relay at the given socket address
    pub fn connect_addr(addr: SocketAddr) -> io::Result<Self> {
        Ok(Client {
            peer: Peer::connect(addr)?,
        })
    }

    /// Join `room` and ask for its current snapshot
    pub fn join(&self, room: &str) -> io::Result<()> {
        self.peer.send(&Message::Join {
            room: room.to_string(),
        })?;
        self.peer.send(&Message::GetState {
            room: room.to_string(),
        })
    }

    /// Send any message to the relay
    pub fn send(&self, msg: &Message) -> io::Result<()> {
        self.peer.send(msg)
    }

    /// Poll for incoming messages from the relay
    pub fn poll(&mut self) -> Vec<Message> {
        self.peer.recv_all()
    }

    /// Check if still connected
    pub fn is_connected(&self) -> bool {
        self.peer.is_alive()
    }

    /// Get the relay's address
    pub fn relay_addr(&self) -> SocketAddr {
        self.peer.addr
    }
}

/// Parse an address string into a SocketAddr
///
/// Handles formats:
/// - "192.168.1.100:55333" -> parse directly
/// - "192.168.1.100" -> add default port
/// - "hostname:55333" -> resolve and use port
/// - "hostname" -> resolve and use default port
pub fn parse_address(addr: &str) -> io::Result<SocketAddr> {
    let with_port = if addr.contains(':') {
        addr.to_string()
    } else {
        format!("{}:{}", addr, DEFAULT_PORT)
    };
    with_port
        .to_socket_addrs()?
        .next()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "could not resolve address"))
}
