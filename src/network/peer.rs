//! Peer connection handling
//!
//! One TCP stream, two threads: a writer draining an outgoing channel of
//! pre-encoded frames and a reader pushing decoded messages into an
//! incoming channel. Dropping the `Peer` shuts the socket down, which ends
//! both threads.

use super::protocol::{read_frame, Message};
use std::io::{self, ErrorKind, Write};
use std::net::{Shutdown, SocketAddr, TcpStream};
use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

/// A connected peer
pub struct Peer {
    /// Peer's address
    pub addr: SocketAddr,
    /// Room the peer joined, once it has
    pub room: Option<String>,
    /// Channel of encoded frames for the writer thread
    tx: Sender<Vec<u8>>,
    /// Channel of decoded messages from the reader thread
    rx: Receiver<Message>,
    /// Handle used to close the socket on drop
    stream: TcpStream,
    /// Whether the connection is still alive
    alive: bool,
}

impl Peer {
    /// Wrap an accepted or connected TCP stream
    pub fn new(stream: TcpStream) -> io::Result<Self> {
        let addr = stream.peer_addr()?;

        stream.set_nonblocking(false)?;
        stream.set_nodelay(true)?;
        stream.set_write_timeout(Some(Duration::from_secs(5)))?;

        let (outgoing_tx, outgoing_rx) = channel::<Vec<u8>>();
        let (incoming_tx, incoming_rx) = channel::<Message>();

        let mut write_stream = stream.try_clone()?;
        let mut read_stream = stream.try_clone()?;

        // Writer thread
        thread::spawn(move || {
            while let Ok(frame) = outgoing_rx.recv() {
                if write_stream.write_all(&frame).and_then(|_| write_stream.flush()).is_err() {
                    break;
                }
            }
        });

        // Reader thread
        thread::spawn(move || loop {
            let body = match read_frame(&mut read_stream) {
                Ok(body) => body,
                Err(e) => {
                    if e.kind() != ErrorKind::UnexpectedEof {
                        debug!(peer = %addr, error = %e, "connection closed");
                    }
                    break;
                }
            };
            match Message::from_json(&body) {
                Ok(msg) => {
                    if incoming_tx.send(msg).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!(peer = %addr, error = %e, "dropping malformed frame");
                }
            }
        });

        Ok(Peer {
            addr,
            room: None,
            tx: outgoing_tx,
            rx: incoming_rx,
            stream,
            alive: true,
        })
    }

    /// Connect to a peer at the given address
    pub fn connect(addr: SocketAddr) -> io::Result<Self> {
        let stream = TcpStream::connect_timeout(&addr, Duration::from_secs(5))?;
        Self::new(stream)
    }

    /// Send a message to this peer
    pub fn send(&self, msg: &Message) -> io::Result<()> {
        self.send_raw(msg.to_bytes()?)
    }

    /// Send an already encoded frame (lets a broadcast encode once).
    ///
    /// Fails once the connection has been seen closed.
    pub fn send_raw(&self, frame: Vec<u8>) -> io::Result<()> {
        if !self.alive {
            return Err(io::Error::new(ErrorKind::BrokenPipe, "peer disconnected"));
        }
        self.tx
            .send(frame)
            .map_err(|_| io::Error::new(ErrorKind::BrokenPipe, "peer disconnected"))
    }

    /// Try to receive a message from this peer (non-blocking)
    pub fn try_recv(&mut self) -> Option<Message> {
        match self.rx.try_recv() {
            Ok(msg) => Some(msg),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.alive = false;
                None
            }
        }
    }

    /// Receive all pending messages from this peer
    pub fn recv_all(&mut self) -> Vec<Message> {
        let mut messages = Vec::new();
        while let Some(msg) = self.try_recv() {
            messages.push(msg);
        }
        messages
    }

    /// Check if the peer connection is still alive
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Record the room this peer joined
    pub fn set_room(&mut self, room: String) {
        self.room = Some(room);
    }

    /// Check if the peer is in `room`
    pub fn in_room(&self, room: &str) -> bool {
        self.room.as_deref() == Some(room)
    }
}

impl Drop for Peer {
    fn drop(&mut self) {
        let _ = self.stream.shutdown(Shutdown::Both);
    }
}
