//! Message framing for the wire protocol.
//!
//! A [`Message`] is a 4-byte [`Header`] (kind, schema id, sequence) over
//! a schema-shaped payload buffer. On the wire every message is bracketed
//! by the `"RDS"` preamble and `"END"` sentinel; the payload length is
//! implied by the schema the header names, so the receiver must already
//! hold the matching prototype.

pub mod codec;
pub mod error;
pub mod header;
pub mod message;

pub use codec::{decode_frame, encode_frame, peek_schema_id, FRAME_OVERHEAD, PREAMBLE, SENTINEL};
pub use error::{FrameError, Result};
pub use header::{Header, MessageKind, HEADER_SIZE};
pub use message::Message;
