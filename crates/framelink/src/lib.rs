//! Schema-driven framed message exchange for embedded controllers and
//! their companion hosts.
//!
//! A peer declares named record schemas ([`Prototype`]), fills instances
//! ([`Buffer`]) with typed scalar fields, and exchanges them as framed
//! [`Message`]s over any byte transport implementing [`ByteChannel`].
//! The [`Exchange`] engine adds request/response correlation with
//! automatic retransmission, and a dispatch registry that routes
//! inbound messages to handlers by `(schema id, kind)`.
//!
//! ```
//! use framelink::{
//!     Buffer, Exchange, ExchangeOptions, FieldKind, LoopbackChannel, Message, MessageKind,
//!     Prototype,
//! };
//!
//! let mut proto = Prototype::new(1);
//! proto.add_field("setpoint", FieldKind::U16);
//!
//! let mut channel = LoopbackChannel::new();
//! let mut engine = Exchange::new(&mut channel, ExchangeOptions::new(|| 0));
//! engine.register_schema(proto.clone());
//! engine.register_callback(1, MessageKind::Request, |message| {
//!     assert_eq!(message.get::<u16>("setpoint").unwrap(), 1500);
//! });
//!
//! let mut buffer = Buffer::new(proto);
//! buffer.set("setpoint", 1500u16).unwrap();
//! engine
//!     .send(&Message::new(MessageKind::Request, buffer, 0), false)
//!     .unwrap();
//!
//! // The loopback is self-wired, so one tick delivers our own request.
//! engine.tick().unwrap();
//! ```

pub use framelink_exchange::{Callback, Exchange, ExchangeError, ExchangeOptions, TimeFn};
pub use framelink_frame::{
    decode_frame, encode_frame, peek_schema_id, FrameError, Header, Message, MessageKind,
    FRAME_OVERHEAD, HEADER_SIZE, PREAMBLE, SENTINEL,
};
pub use framelink_schema::{
    Buffer, Field, FieldKind, Prototype, Scalar, SchemaError, RESERVED_SCHEMA_ID,
};
pub use framelink_transport::{ByteChannel, ChannelError, LoopbackChannel};

/// Fan several `Result`s into one error callback.
///
/// Evaluates every result, joins the non-empty error messages with
/// newlines, and hands the combined string to `on_error` when at least
/// one failed. Returns `true` if anything failed. Handy for
/// batch-validating a run of `set` calls:
///
/// ```
/// use framelink::{check, Buffer, FieldKind, Prototype};
///
/// let mut proto = Prototype::new(1);
/// proto.add_field("a", FieldKind::U8).add_field("b", FieldKind::U16);
/// let mut buffer = Buffer::new(proto);
///
/// let failed = check!(
///     |msg: &str| eprintln!("rejected: {msg}"),
///     buffer.set("a", 1u8),
///     buffer.set("b", 2u16),
/// );
/// assert!(!failed);
/// ```
#[macro_export]
macro_rules! check {
    ($on_error:expr, $($result:expr),+ $(,)?) => {{
        let mut messages: ::std::vec::Vec<::std::string::String> = ::std::vec::Vec::new();
        let mut failed = false;
        $(
            if let Err(err) = &$result {
                failed = true;
                let text = ::std::string::ToString::to_string(err);
                if !text.is_empty() {
                    messages.push(text);
                }
            }
        )+
        if failed {
            ($on_error)(messages.join("\n").as_str());
        }
        failed
    }};
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    fn two_field_buffer() -> Buffer {
        let mut proto = Prototype::new(1);
        proto
            .add_field("small", FieldKind::U8)
            .add_field("wide", FieldKind::U32);
        Buffer::new(proto)
    }

    #[test]
    fn check_passes_when_everything_succeeds() {
        let mut buffer = two_field_buffer();
        let called = RefCell::new(false);

        let failed = check!(
            |_: &str| *called.borrow_mut() = true,
            buffer.set("small", 1u8),
            buffer.set("wide", 2u32),
        );

        assert!(!failed);
        assert!(!*called.borrow());
    }

    #[test]
    fn check_joins_error_messages_with_newlines() {
        let mut buffer = two_field_buffer();
        let captured = RefCell::new(String::new());

        let failed = check!(
            |msg: &str| *captured.borrow_mut() = msg.to_string(),
            buffer.set("small", 1u8),
            buffer.set("missing", 2u32),
            buffer.set("wide", 3u8),
        );

        assert!(failed);
        let joined = captured.borrow();
        let lines: Vec<&str> = joined.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("field not found"));
        assert!(lines[1].contains("width mismatch"));
    }

    #[test]
    fn check_reports_a_single_failure() {
        let buffer = two_field_buffer();
        let captured = RefCell::new(String::new());

        let failed = check!(
            |msg: &str| *captured.borrow_mut() = msg.to_string(),
            buffer.get::<u64>("wide"),
        );

        assert!(failed);
        assert!(captured.borrow().contains("width mismatch"));
    }
}
