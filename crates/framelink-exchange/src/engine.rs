use std::collections::{BTreeMap, HashMap};

use bytes::BytesMut;
use framelink_frame::{codec, Message, MessageKind};
use framelink_schema::{Buffer, Prototype};
use framelink_transport::ByteChannel;
use tracing::{debug, warn};

use crate::error::{ExchangeError, Result};
use crate::options::ExchangeOptions;

/// Handler invoked for each received message of a registered
/// `(schema id, kind)` pair. Handlers see the message by shared
/// reference and run inline on the tick caller's stack.
pub type Callback = Box<dyn FnMut(&Message)>;

/// An outstanding Request awaiting its Response.
#[derive(Debug)]
struct PendingEntry {
    message: Message,
    time_sent: u64,
    retries: u8,
}

/// The reliable-exchange engine.
///
/// Owns the schema registry, the dispatch registry, and the pending-ack
/// table; borrows the channel. The engine has no thread of its own. The
/// host drives it by calling [`tick`](Exchange::tick) from its main
/// loop, and one tick does exactly: read one inbound frame, dispatch
/// it, then sweep the retry timers.
pub struct Exchange<'a, C: ByteChannel> {
    channel: &'a mut C,
    options: ExchangeOptions,
    schemas: HashMap<u8, Prototype>,
    callbacks: HashMap<(u8, MessageKind), Vec<Callback>>,
    pending: BTreeMap<u16, PendingEntry>,
    last_received_ms: u64,
    sequence: u16,
}

impl<'a, C: ByteChannel> Exchange<'a, C> {
    pub fn new(channel: &'a mut C, options: ExchangeOptions) -> Self {
        Self {
            channel,
            options,
            schemas: HashMap::new(),
            callbacks: HashMap::new(),
            pending: BTreeMap::new(),
            last_received_ms: 0,
            sequence: 0,
        }
    }

    /// Register a prototype so inbound frames carrying its id can be
    /// decoded. The reserved id is refused with a warning and the
    /// registry is left unchanged.
    pub fn register_schema(&mut self, prototype: Prototype) -> &mut Self {
        if prototype.is_unset() {
            warn!("refusing to register a prototype with the reserved schema id");
            return self;
        }
        self.schemas.insert(prototype.identifier(), prototype);
        self
    }

    /// Register a handler for messages of `kind` carrying `schema_id`.
    /// Handlers for the same pair run in registration order.
    pub fn register_callback(
        &mut self,
        schema_id: u8,
        kind: MessageKind,
        callback: impl FnMut(&Message) + 'static,
    ) -> &mut Self {
        self.callbacks
            .entry((schema_id, kind))
            .or_default()
            .push(Box::new(callback));
        self
    }

    /// The prototype registered under `id`.
    pub fn lookup_schema(&self, id: u8) -> Result<&Prototype> {
        self.schemas
            .get(&id)
            .ok_or(ExchangeError::SchemaNotFound(id))
    }

    /// Allocate the next sequence number. Wraps at `u16::MAX`; each
    /// engine counts independently.
    pub fn next_sequence(&mut self) -> u16 {
        let seq = self.sequence;
        self.sequence = self.sequence.wrapping_add(1);
        seq
    }

    /// Serialize and send a message.
    ///
    /// A Request sent with `ack_required` enters the pending table and
    /// will be retransmitted until a matching Response arrives or the
    /// retry budget runs out. A Response cannot require an ack (it *is*
    /// the ack); the frame is still sent, with a warning.
    pub fn send(&mut self, message: &Message, ack_required: bool) -> Result<()> {
        let mut wire = BytesMut::new();
        codec::encode_frame(message, &mut wire);
        self.channel.send(&wire)?;

        if ack_required {
            match message.kind() {
                MessageKind::Request => {
                    let now = (self.options.time_fn)();
                    self.pending.insert(
                        message.sequence(),
                        PendingEntry {
                            message: message.clone(),
                            time_sent: now,
                            retries: 0,
                        },
                    );
                }
                MessageKind::Response => {
                    warn!(
                        seq = message.sequence(),
                        "a response cannot require an ack; sent without one"
                    );
                }
                MessageKind::Error => {}
            }
        }

        Ok(())
    }

    /// Build and send an acknowledged Request over `buffer`. Returns the
    /// allocated sequence number for correlating the Response.
    pub fn send_request(&mut self, buffer: Buffer) -> Result<u16> {
        let seq = self.next_sequence();
        let message = Message::new(MessageKind::Request, buffer, seq);
        self.send(&message, true)?;
        Ok(seq)
    }

    /// Read the channel once and dispatch whatever arrived.
    ///
    /// Frames that cannot be decoded (unknown schema id, corrupt
    /// framing, wrong length) are logged and dropped; they never reach
    /// handlers and never surface as errors here.
    pub fn receive_once(&mut self) -> Result<()> {
        let bytes = self.channel.receive()?;
        if bytes.is_empty() {
            return Ok(());
        }

        let schema_id = codec::peek_schema_id(&bytes);
        let prototype = match self.schemas.get(&schema_id) {
            Some(prototype) => prototype.clone(),
            None => {
                warn!(schema_id, "dropping frame for unregistered schema");
                return Ok(());
            }
        };

        let message = match codec::decode_frame(&prototype, &bytes) {
            Ok(message) => message,
            Err(err) => {
                warn!(schema_id, error = %err, "dropping undecodable frame");
                return Ok(());
            }
        };

        self.last_received_ms = (self.options.time_fn)();

        // A Response acknowledges whatever sequence it echoes, whether or
        // not this engine is still waiting on it.
        if message.kind() == MessageKind::Response
            && self.pending.remove(&message.sequence()).is_some()
        {
            debug!(seq = message.sequence(), "response cleared pending request");
        }

        if let Some(callbacks) = self.callbacks.get_mut(&(schema_id, message.kind())) {
            for callback in callbacks.iter_mut() {
                callback(&message);
            }
        }

        Ok(())
    }

    /// One cooperative step: read once, dispatch, sweep retry timers.
    ///
    /// A pending request whose quiet interval has elapsed is resent
    /// while it has retries left; otherwise it is dropped as failed.
    pub fn tick(&mut self) -> Result<()> {
        self.receive_once()?;

        let now = (self.options.time_fn)();
        let timeout = u64::from(self.options.retry_timeout_ms);

        let mut to_resend: Vec<u16> = Vec::new();
        let mut to_drop: Vec<u16> = Vec::new();
        for (&seq, entry) in &self.pending {
            if now.saturating_sub(entry.time_sent) > timeout {
                if entry.retries < self.options.max_retries {
                    to_resend.push(seq);
                } else {
                    to_drop.push(seq);
                }
            }
        }

        for seq in to_drop {
            self.pending.remove(&seq);
            warn!(seq, "request exhausted its retries without an ack");
        }

        for seq in to_resend {
            if let Some(entry) = self.pending.get_mut(&seq) {
                entry.retries += 1;
                entry.time_sent = now;
                let mut wire = BytesMut::new();
                codec::encode_frame(&entry.message, &mut wire);
                self.channel.send(&wire)?;
                debug!(seq, retry = entry.retries, "retransmitted unacknowledged request");
            }
        }

        Ok(())
    }

    /// Milliseconds since the last successfully decoded inbound message.
    pub fn time_since_last_receive(&self) -> u64 {
        (self.options.time_fn)().saturating_sub(self.last_received_ms)
    }

    /// Number of requests still awaiting acknowledgement.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Whether `sequence` is still awaiting acknowledgement.
    pub fn is_pending(&self, sequence: u16) -> bool {
        self.pending.contains_key(&sequence)
    }
}
