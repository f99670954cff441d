use std::fmt;

use framelink_schema::{Buffer, Scalar};

use crate::header::{Header, MessageKind};

/// A header plus a payload buffer — the unit the wire carries.
///
/// The header's schema id always equals the buffer's prototype
/// identifier; constructors enforce this by deriving one from the other.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    header: Header,
    buffer: Buffer,
}

impl Message {
    /// Message over a buffer, taking the schema id from its prototype.
    pub fn new(kind: MessageKind, buffer: Buffer, sequence: u16) -> Self {
        let header = Header::new(kind, buffer.prototype().identifier(), sequence);
        Self { header, buffer }
    }

    /// Response to `request`, echoing its sequence number so the peer's
    /// pending-ack table can correlate it.
    pub fn response_to(request: &Message, buffer: Buffer) -> Self {
        Self::new(MessageKind::Response, buffer, request.sequence())
    }

    pub(crate) fn from_parts(header: Header, buffer: Buffer) -> Self {
        Self { header, buffer }
    }

    pub fn kind(&self) -> MessageKind {
        self.header.kind
    }

    pub fn schema_id(&self) -> u8 {
        self.header.schema_id
    }

    pub fn sequence(&self) -> u16 {
        self.header.sequence
    }

    pub fn header(&self) -> Header {
        self.header
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut Buffer {
        &mut self.buffer
    }

    /// Typed read of a payload field.
    pub fn get<T: Scalar>(&self, name: &str) -> framelink_schema::Result<T> {
        self.buffer.get(name)
    }

    /// Typed write of a payload field.
    pub fn set<T: Scalar>(&mut self, name: &str, value: T) -> framelink_schema::Result<()> {
        self.buffer.set(name, value)
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} schema={} seq={} payload=[",
            self.header.kind, self.header.schema_id, self.header.sequence
        )?;
        for (i, byte) in self.buffer.data().iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{byte:02X}")?;
        }
        write!(f, "]")
    }
}
