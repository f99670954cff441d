use bytes::{BufMut, BytesMut};

use crate::error::{FrameError, Result};

/// Encoded header size: kind (1) + schema id (1) + sequence (2).
pub const HEADER_SIZE: usize = 4;

/// Role of a message in an exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MessageKind {
    /// Asks the peer to act; may demand an acknowledging Response.
    Request = 0,
    /// Answers a Request, echoing its sequence number.
    Response = 1,
    /// Signals a failure condition.
    Error = 2,
}

impl MessageKind {
    /// Decode a wire kind byte.
    pub fn from_u8(value: u8) -> Result<Self> {
        match value {
            0 => Ok(MessageKind::Request),
            1 => Ok(MessageKind::Response),
            2 => Ok(MessageKind::Error),
            other => Err(FrameError::UnknownKind(other)),
        }
    }
}

/// Fixed 4-byte message meta: kind, schema id, sequence number.
///
/// Wire order is `kind, schema_id, seq_hi, seq_lo` — the sequence is the
/// one big-endian quantity in the protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub kind: MessageKind,
    pub schema_id: u8,
    pub sequence: u16,
}

impl Header {
    pub fn new(kind: MessageKind, schema_id: u8, sequence: u16) -> Self {
        Self {
            kind,
            schema_id,
            sequence,
        }
    }

    /// Append the encoded header to `dst`.
    pub fn encode(&self, dst: &mut BytesMut) {
        dst.put_u8(self.kind as u8);
        dst.put_u8(self.schema_id);
        dst.put_u16(self.sequence);
    }

    /// Decode a header from the front of `src`.
    pub fn decode(src: &[u8]) -> Result<Self> {
        if src.len() < HEADER_SIZE {
            return Err(FrameError::HeaderTooShort { len: src.len() });
        }
        Ok(Self {
            kind: MessageKind::from_u8(src[0])?,
            schema_id: src[1],
            sequence: u16::from_be_bytes([src[2], src[3]]),
        })
    }
}
