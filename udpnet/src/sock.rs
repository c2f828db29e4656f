use std::io;
use std::net;

use socket2::{Domain, Protocol, Socket, Type};

/// Receive socket bound to a fixed local port.
pub fn new_rx(port: u16) -> io::Result<Socket> {
    let sock = Socket::new(Domain::ipv4(), Type::dgram(), Some(Protocol::udp()))?;
    sock.set_reuse_address(true)?;
    let local_addr = net::SocketAddr::from(([127, 0, 0, 1], port));
    sock.bind(&local_addr.into())?;
    Ok(sock)
}

/// Send socket on an ephemeral port, able to receive replies addressed to it.
pub fn new_tx() -> io::Result<Socket> {
    let sock = Socket::new(Domain::ipv4(), Type::dgram(), Some(Protocol::udp()))?;
    let local_addr = net::SocketAddr::from(([127, 0, 0, 1], 0));
    sock.bind(&local_addr.into())?;
    Ok(sock)
}
