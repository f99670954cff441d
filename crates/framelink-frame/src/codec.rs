use bytes::{BufMut, BytesMut};
use framelink_schema::{Buffer, Prototype, SchemaError, RESERVED_SCHEMA_ID};

use crate::error::{FrameError, Result};
use crate::header::{Header, HEADER_SIZE};
use crate::message::Message;

/// Frame preamble: "RDS".
pub const PREAMBLE: [u8; 3] = *b"RDS";

/// Frame end sentinel: "END".
pub const SENTINEL: [u8; 3] = *b"END";

/// Fixed bytes surrounding the payload (preamble + header + sentinel).
pub const FRAME_OVERHEAD: usize = PREAMBLE.len() + HEADER_SIZE + SENTINEL.len();

/// Encode a message into the wire format.
///
/// Wire format (total `10 + N` bytes, `N = prototype.size()`):
/// ```text
/// ┌───────────┬──────────────────────────────┬───────────┬───────────┐
/// │ "RDS"     │ kind | schema_id | seq (BE)  │ payload   │ "END"     │
/// │ 3 bytes   │ 1    | 1         | 2         │ N bytes   │ 3 bytes   │
/// └───────────┴──────────────────────────────┴───────────┴───────────┘
/// ```
pub fn encode_frame(message: &Message, dst: &mut BytesMut) {
    dst.reserve(FRAME_OVERHEAD + message.buffer().size());
    dst.put_slice(&PREAMBLE);
    message.header().encode(dst);
    dst.put_slice(message.buffer().data());
    dst.put_slice(&SENTINEL);
}

/// Read the schema id out of a serialized frame without parsing it.
///
/// Returns [`RESERVED_SCHEMA_ID`] when the bytes are too short to hold
/// one, which no registered schema may use, so lookup fails cleanly.
pub fn peek_schema_id(bytes: &[u8]) -> u8 {
    bytes
        .get(PREAMBLE.len() + 1)
        .copied()
        .unwrap_or(RESERVED_SCHEMA_ID)
}

/// Parse a frame against the prototype its schema id named.
///
/// Checks run in a fixed order so corrupt input reports the outermost
/// failure: preamble, sentinel, header, total length, then payload.
pub fn decode_frame(prototype: &Prototype, bytes: &[u8]) -> Result<Message> {
    if prototype.is_unset() {
        return Err(SchemaError::SchemaNotSet.into());
    }
    if bytes.len() <= PREAMBLE.len() {
        return Err(FrameError::TooShort { len: bytes.len() });
    }
    if bytes[..PREAMBLE.len()] != PREAMBLE {
        return Err(FrameError::BadPreamble);
    }
    if bytes[bytes.len() - SENTINEL.len()..] != SENTINEL {
        return Err(FrameError::BadSentinel);
    }

    let header = Header::decode(&bytes[PREAMBLE.len()..])?;

    let expected = FRAME_OVERHEAD + prototype.size();
    if bytes.len() != expected {
        return Err(FrameError::LengthMismatch {
            expected,
            actual: bytes.len(),
        });
    }

    let payload = bytes[PREAMBLE.len() + HEADER_SIZE..bytes.len() - SENTINEL.len()].to_vec();
    let buffer = Buffer::from_bytes(prototype.clone(), payload)?;

    Ok(Message::from_parts(header, buffer))
}

#[cfg(test)]
mod tests {
    use framelink_schema::FieldKind;

    use super::*;
    use crate::header::MessageKind;

    fn one_field_proto() -> Prototype {
        let mut proto = Prototype::new(1);
        proto.add_field("x", FieldKind::U16);
        proto
    }

    fn request_frame() -> (Message, BytesMut) {
        let mut buffer = Buffer::new(one_field_proto());
        buffer.set("x", 0x1234u16).unwrap();
        let message = Message::new(MessageKind::Request, buffer, 0x0007);
        let mut wire = BytesMut::new();
        encode_frame(&message, &mut wire);
        (message, wire)
    }

    #[test]
    fn encode_produces_exact_wire_bytes() {
        let (_, wire) = request_frame();
        assert_eq!(
            wire.as_ref(),
            &[
                0x52, 0x44, 0x53, // "RDS"
                0x00, 0x01, 0x00, 0x07, // Request, schema 1, seq 7
                0x34, 0x12, // x = 0x1234 little-endian
                0x45, 0x4E, 0x44, // "END"
            ]
        );
    }

    #[test]
    fn frame_length_is_overhead_plus_record_size() {
        let (message, wire) = request_frame();
        assert_eq!(wire.len(), FRAME_OVERHEAD + message.buffer().size());
    }

    #[test]
    fn decode_roundtrips_message() {
        let (message, wire) = request_frame();
        let decoded = decode_frame(&one_field_proto(), &wire).unwrap();
        assert_eq!(decoded, message);
        assert_eq!(decoded.get::<u16>("x").unwrap(), 0x1234);
    }

    #[test]
    fn peek_reads_schema_id() {
        let (_, wire) = request_frame();
        assert_eq!(peek_schema_id(&wire), 1);
        assert_eq!(peek_schema_id(&wire[..4]), RESERVED_SCHEMA_ID);
        assert_eq!(peek_schema_id(&[]), RESERVED_SCHEMA_ID);
    }

    #[test]
    fn corrupted_preamble_rejected() {
        let (_, mut wire) = request_frame();
        wire[0] = 0x00;
        let err = decode_frame(&one_field_proto(), &wire).unwrap_err();
        assert!(matches!(err, FrameError::BadPreamble));
    }

    #[test]
    fn corrupted_sentinel_rejected() {
        let (_, mut wire) = request_frame();
        let last = wire.len() - 1;
        wire[last] = 0x00;
        let err = decode_frame(&one_field_proto(), &wire).unwrap_err();
        assert!(matches!(err, FrameError::BadSentinel));
    }

    #[test]
    fn unset_prototype_rejected_before_any_byte_checks() {
        let err = decode_frame(&Prototype::default(), &[]).unwrap_err();
        assert!(matches!(err, FrameError::Schema(SchemaError::SchemaNotSet)));
    }

    #[test]
    fn short_input_rejected() {
        let err = decode_frame(&one_field_proto(), b"RDS").unwrap_err();
        assert!(matches!(err, FrameError::TooShort { len: 3 }));
    }

    #[test]
    fn header_too_short_after_valid_framing() {
        // Preamble and sentinel agree but only three header bytes fit.
        let err = decode_frame(&one_field_proto(), b"RDSEND").unwrap_err();
        assert!(matches!(err, FrameError::HeaderTooShort { len: 3 }));
    }

    #[test]
    fn unknown_kind_rejected() {
        let (_, mut wire) = request_frame();
        wire[3] = 9;
        let err = decode_frame(&one_field_proto(), &wire).unwrap_err();
        assert!(matches!(err, FrameError::UnknownKind(9)));
    }

    #[test]
    fn length_mismatch_names_both_sizes() {
        let (_, wire) = request_frame();
        let mut bigger = Prototype::new(1);
        bigger.add_field("x", FieldKind::U64);
        let err = decode_frame(&bigger, &wire).unwrap_err();
        assert!(matches!(
            err,
            FrameError::LengthMismatch {
                expected: 18,
                actual: 12
            }
        ));
    }

    #[test]
    fn zero_payload_schema_roundtrips() {
        let proto = Prototype::new(2);
        let message = Message::new(MessageKind::Error, Buffer::new(proto.clone()), 99);
        let mut wire = BytesMut::new();
        encode_frame(&message, &mut wire);
        assert_eq!(wire.len(), FRAME_OVERHEAD);
        let decoded = decode_frame(&proto, &wire).unwrap();
        assert_eq!(decoded, message);
    }
}
