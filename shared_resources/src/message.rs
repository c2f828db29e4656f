use thiserror::Error;

use super::request::{ElevatorRequest, ElevatorResponse, FloorRequest};

pub const PROTOCOL_VERSION: u8 = 1;

/// Every structured datagram on the wire is one of these variants, one
/// envelope per datagram. The scheduler-to-floor delivery is plain text and
/// does not pass through here.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone)]
pub enum Message {
    FloorRequest(FloorRequest),
    ElevatorRequest(ElevatorRequest),
    ElevatorResponse(ElevatorResponse),
    RequestSet(Vec<FloorRequest>),
}

impl Message {
    pub fn variant_name(&self) -> &'static str {
        match self {
            Message::FloorRequest(_) => "FloorRequest",
            Message::ElevatorRequest(_) => "ElevatorRequest",
            Message::ElevatorResponse(_) => "ElevatorResponse",
            Message::RequestSet(_) => "RequestSet",
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone)]
pub struct Envelope {
    version: u8,
    message: Message,
}

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("unsupported protocol version {0}")]
    UnsupportedVersion(u8),
    #[error("unexpected {0} message on this channel")]
    UnexpectedMessage(&'static str),
}

impl Envelope {
    pub fn new(message: Message) -> Self {
        Envelope {
            version: PROTOCOL_VERSION,
            message,
        }
    }

    /// Unwraps the payload, rejecting envelopes from a different protocol
    /// version.
    pub fn open(self) -> Result<Message, ProtocolError> {
        if self.version != PROTOCOL_VERSION {
            return Err(ProtocolError::UnsupportedVersion(self.version));
        }
        Ok(self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direction::Direction;

    #[test]
    fn envelope_round_trip() {
        let request = FloorRequest::new(1, Direction::Up, 5, "14:05:15.0");
        let envelope = Envelope::new(Message::FloorRequest(request.clone()));
        let encoded = serde_json::to_string(&envelope).unwrap();
        let decoded: Envelope = serde_json::from_str(&encoded).unwrap();
        match decoded.open().unwrap() {
            Message::FloorRequest(r) => assert_eq!(r, request),
            other => panic!("wrong variant {}", other.variant_name()),
        }
    }

    #[test]
    fn version_mismatch_is_rejected() {
        let encoded = r#"{"version":99,"message":{"RequestSet":[]}}"#;
        let decoded: Envelope = serde_json::from_str(encoded).unwrap();
        match decoded.open() {
            Err(ProtocolError::UnsupportedVersion(99)) => (),
            other => panic!("expected version error, got {:?}", other),
        }
    }
}
