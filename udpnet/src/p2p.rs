/// ----- POINT-TO-POINT DATAGRAM MODULE -----
/// Typed send/receive of serde-encoded messages over UDP, one message per
/// datagram, plus the plain-text path used for floor deliveries. Payloads
/// are capped at the receive buffer size; there is no acknowledgment,
/// ordering or retransmission on top of what UDP provides.

use std::error;
use std::io;
use std::net;
use std::str;

use crossbeam_channel as cbc;
use cbc::SendError;
use log::warn;
use serde::de::DeserializeOwned;
use socket2::{SockAddr, Socket};

use crate::sock;

pub const RECV_BUFFER_SIZE: usize = 1024;

#[derive(Debug)]
pub enum RecvError {
    IOError(io::Error),
    BadPacket(Box<dyn error::Error + Send + Sync>),
}

impl From<io::Error> for RecvError {
    fn from(e: io::Error) -> Self {
        RecvError::IOError(e)
    }
}

pub enum RxError<T> {
    IOError(io::Error),
    CBCSendError(SendError<T>),
}

impl<T> From<io::Error> for RxError<T> {
    fn from(e: io::Error) -> Self {
        RxError::IOError(e)
    }
}

impl<T> From<SendError<T>> for RxError<T> {
    fn from(e: SendError<T>) -> Self {
        RxError::CBCSendError(e)
    }
}

pub fn send<T: serde::Serialize>(sock: &Socket, data: &T, addr: &SockAddr) -> io::Result<()> {
    let serialized = serde_json::to_string(data).unwrap();
    if serialized.len() > RECV_BUFFER_SIZE {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "datagram of {} bytes exceeds the {} byte limit",
                serialized.len(),
                RECV_BUFFER_SIZE
            ),
        ));
    }
    sock.send_to(serialized.as_bytes(), addr)?;
    Ok(())
}

/// One-shot send from a throwaway socket.
pub fn send_once<T: serde::Serialize>(data: &T, addr: &net::SocketAddr) -> io::Result<()> {
    let sock = sock::new_tx()?;
    send(&sock, data, &(*addr).into())
}

pub fn recv<T: DeserializeOwned>(
    sock: &Socket,
    buf: &mut [u8; RECV_BUFFER_SIZE],
) -> Result<(T, SockAddr), RecvError> {
    let (n, addr) = sock.recv_from(buf)?;
    let msg = str::from_utf8(&buf[..n]).map_err(|e| RecvError::BadPacket(e.into()))?;
    let data = serde_json::from_str::<T>(msg).map_err(|e| RecvError::BadPacket(e.into()))?;
    Ok((data, addr))
}

/// Blocking request/reply round trip on a throwaway socket.
pub fn call<S: serde::Serialize, R: DeserializeOwned>(
    addr: &net::SocketAddr,
    query: &S,
) -> Result<R, RecvError> {
    let sock = sock::new_tx()?;
    send(&sock, query, &(*addr).into())?;
    let mut buf = [0; RECV_BUFFER_SIZE];
    let n = sock.recv(&mut buf)?;
    let msg = str::from_utf8(&buf[..n]).map_err(|e| RecvError::BadPacket(e.into()))?;
    let reply = serde_json::from_str::<R>(msg).map_err(|e| RecvError::BadPacket(e.into()))?;
    Ok(reply)
}

/// Plain-text one-shot send, used for the scheduler-to-floor delivery.
pub fn send_text(text: &str, addr: &net::SocketAddr) -> io::Result<()> {
    let sock = sock::new_tx()?;
    sock.send_to(text.as_bytes(), &(*addr).into())?;
    Ok(())
}

/// Receives plain-text datagrams on `port` and forwards them into `ch`.
pub fn rx_text(port: u16, ch: cbc::Sender<String>) -> Result<(), RxError<String>> {
    let sock = sock::new_rx(port)?;
    let mut buf = [0; RECV_BUFFER_SIZE];
    loop {
        let n = sock.recv(&mut buf)?;
        match str::from_utf8(&buf[..n]) {
            Ok(text) => ch.send(text.to_string())?,
            Err(e) => warn!("discarding non-utf8 delivery datagram: {}", e),
        }
    }
}
