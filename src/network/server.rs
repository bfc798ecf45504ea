//! TCP server: accepts peers and tracks which room each one joined

use super::peer::Peer;
use super::protocol::Message;
use std::io;
use std::net::{SocketAddr, TcpListener};
use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::thread;
use std::time::Duration;
use tracing::warn;

/// Default relay port
pub const DEFAULT_PORT: u16 = 55333;

/// Maximum port to try when auto-incrementing
const MAX_PORT: u16 = 55433;

/// A server that accepts peer connections
pub struct Server {
    /// Local address the server is bound to
    addr: SocketAddr,
    /// Channel to receive new peer connections
    new_peers_rx: Receiver<Peer>,
    /// Connected peers
    peers: Vec<Peer>,
    /// Running flag
    running: bool,
}

impl Server {
    /// Start on `host`, trying `start_port` and then the ports above it
    pub fn start_on(host: &str, start_port: u16) -> io::Result<Self> {
        let mut port = start_port;
        let listener = loop {
            match TcpListener::bind((host, port)) {
                Ok(l) => break l,
                Err(e) if e.kind() == io::ErrorKind::AddrInUse && port < MAX_PORT => {
                    port += 1;
                }
                Err(e) => return Err(e),
            }
        };

        let addr = listener.local_addr()?;
        listener.set_nonblocking(true)?;

        let (new_peers_tx, new_peers_rx) = channel();

        // Spawn acceptor thread
        thread::spawn(move || {
            accept_loop(listener, new_peers_tx);
        });

        Ok(Server {
            addr,
            new_peers_rx,
            peers: Vec::new(),
            running: true,
        })
    }

    /// Get the address the server is listening on
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Poll for new connections and messages
    pub fn poll(&mut self) -> Vec<ServerEvent> {
        let mut events = Vec::new();

        // Accept new peers
        loop {
            match self.new_peers_rx.try_recv() {
                Ok(peer) => {
                    events.push(ServerEvent::PeerConnected { addr: peer.addr });
                    self.peers.push(peer);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.running = false;
                    break;
                }
            }
        }

        // Collect messages from peers and track disconnections
        let mut disconnected = Vec::new();
        for (i, peer) in self.peers.iter_mut().enumerate() {
            for msg in peer.recv_all() {
                if let Message::Join { ref room } = msg {
                    peer.set_room(room.clone());
                }
                events.push(ServerEvent::MessageReceived {
                    from: peer.addr,
                    room: peer.room.clone(),
                    message: msg,
                });
            }
            if !peer.is_alive() {
                disconnected.push(i);
            }
        }

        // Remove disconnected peers (in reverse order to preserve indices)
        for i in disconnected.into_iter().rev() {
            let peer = self.peers.remove(i);
            events.push(ServerEvent::PeerDisconnected {
                addr: peer.addr,
                room: peer.room.clone(),
            });
        }

        events
    }

    /// Send a message to every peer in `room` (serializes once).
    ///
    /// Returns how many peers it was queued for.
    pub fn broadcast_room(&self, room: &str, msg: &Message) -> usize {
        let bytes = match msg.to_bytes() {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(room, error = %e, "could not encode broadcast");
                return 0;
            }
        };
        self.peers
            .iter()
            .filter(|peer| peer.in_room(room))
            .filter(|peer| peer.send_raw(bytes.clone()).is_ok())
            .count()
    }

    /// Send a message to a specific peer by address
    pub fn send_to(&self, addr: SocketAddr, msg: &Message) -> io::Result<()> {
        let bytes = msg.to_bytes()?;
        for peer in &self.peers {
            if peer.addr == addr {
                return peer.send_raw(bytes);
            }
        }
        Err(io::Error::new(io::ErrorKind::NotFound, "peer not found"))
    }

    /// Get the number of connected peers
    pub fn peer_count(&self) -> usize {
        self.peers.len()
    }

    /// Number of connected peers in `room`
    pub fn room_size(&self, room: &str) -> usize {
        self.peers.iter().filter(|peer| peer.in_room(room)).count()
    }

    /// Check if the server is still running
    pub fn is_running(&self) -> bool {
        self.running
    }
}

/// Events from the server
#[derive(Debug, Clone)]
pub enum ServerEvent {
    /// A new peer connected
    PeerConnected { addr: SocketAddr },
    /// A peer disconnected
    PeerDisconnected {
        addr: SocketAddr,
        room: Option<String>,
    },
    /// A message was received from a peer
    MessageReceived {
        from: SocketAddr,
        room: Option<String>,
        message: Message,
    },
}

fn accept_loop(listener: TcpListener, tx: Sender<Peer>) {
    loop {
        match listener.accept() {
            Ok((stream, _addr)) => {
                if let Ok(peer) = Peer::new(stream) {
                    if tx.send(peer).is_err() {
                        break;
                    }
                }
            }
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => {
                thread::sleep(Duration::from_millis(50));
            }
            Err(_) => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local_server() -> Server {
        Server::start_on("127.0.0.1", 0).unwrap()
    }

    #[test]
    fn test_server_auto_increment_port() {
        let server1 = Server::start_on("127.0.0.1", 55400).unwrap();
        let port1 = server1.addr().port();

        let server2 = Server::start_on("127.0.0.1", port1).unwrap();
        let port2 = server2.addr().port();

        assert_ne!(port1, port2);
        assert!(port2 > port1);
    }

    #[test]
    fn test_server_accepts_connection() {
        let mut server = local_server();
        let _client = Peer::connect(server.addr()).unwrap();

        thread::sleep(Duration::from_millis(150));
        let events = server.poll();

        assert!(events.iter().any(|e| matches!(e, ServerEvent::PeerConnected { .. })));
        assert_eq!(server.peer_count(), 1);
    }

    #[test]
    fn test_join_assigns_room() {
        let mut server = local_server();
        let client = Peer::connect(server.addr()).unwrap();
        client.send(&Message::Join { room: "31".into() }).unwrap();

        thread::sleep(Duration::from_millis(200));
        let events = server.poll();

        assert!(events.iter().any(|e| matches!(
            e,
            ServerEvent::MessageReceived { room: Some(room), message: Message::Join { .. }, .. }
                if room == "31"
        )));
        assert_eq!(server.room_size("31"), 1);
        assert_eq!(server.room_size("32"), 0);
    }

    #[test]
    fn test_broadcast_stays_in_room() {
        let mut server = local_server();
        let mut a = Peer::connect(server.addr()).unwrap();
        let mut b = Peer::connect(server.addr()).unwrap();
        a.send(&Message::Join { room: "1".into() }).unwrap();
        b.send(&Message::Join { room: "2".into() }).unwrap();

        thread::sleep(Duration::from_millis(200));
        server.poll();

        let sent = server.broadcast_room("1", &Message::ResetReceive { room: "1".into() });
        assert_eq!(sent, 1);

        thread::sleep(Duration::from_millis(150));
        assert_eq!(a.recv_all(), vec![Message::ResetReceive { room: "1".into() }]);
        assert!(b.recv_all().is_empty());
    }

    #[test]
    fn test_disconnect_reports_room() {
        let mut server = local_server();
        let client = Peer::connect(server.addr()).unwrap();
        client.send(&Message::Join { room: "9".into() }).unwrap();
        thread::sleep(Duration::from_millis(200));
        server.poll();

        drop(client);
        thread::sleep(Duration::from_millis(200));
        let events = server.poll();

        assert!(events.iter().any(|e| matches!(
            e,
            ServerEvent::PeerDisconnected { room: Some(room), .. } if room == "9"
        )));
        assert_eq!(server.peer_count(), 0);
    }
}
