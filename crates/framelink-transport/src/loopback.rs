use std::sync::{Arc, Mutex};

use crate::error::{ChannelError, Result};
use crate::traits::ByteChannel;

type SharedBuf = Arc<Mutex<Vec<u8>>>;

/// In-memory byte channel: `send` appends to a buffer, `receive`
/// returns and clears it.
///
/// A channel made with [`new`](LoopbackChannel::new) is self-wired:
/// everything sent comes straight back, which is what single-engine
/// tests want. [`pair`](LoopbackChannel::pair) cross-wires two endpoints
/// so two engines can talk to each other in-process.
#[derive(Debug)]
pub struct LoopbackChannel {
    incoming: SharedBuf,
    outgoing: SharedBuf,
}

impl LoopbackChannel {
    /// Self-wired channel.
    pub fn new() -> Self {
        let shared: SharedBuf = Arc::new(Mutex::new(Vec::new()));
        Self {
            incoming: Arc::clone(&shared),
            outgoing: shared,
        }
    }

    /// Two endpoints wired to each other: what one sends, the other
    /// receives.
    pub fn pair() -> (Self, Self) {
        let a_to_b: SharedBuf = Arc::new(Mutex::new(Vec::new()));
        let b_to_a: SharedBuf = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                incoming: Arc::clone(&b_to_a),
                outgoing: Arc::clone(&a_to_b),
            },
            Self {
                incoming: a_to_b,
                outgoing: b_to_a,
            },
        )
    }
}

impl Default for LoopbackChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl ByteChannel for LoopbackChannel {
    fn send(&mut self, frame: &[u8]) -> Result<()> {
        let mut buf = self.outgoing.lock().map_err(|_| ChannelError::Closed)?;
        buf.extend_from_slice(frame);
        Ok(())
    }

    fn receive(&mut self) -> Result<Vec<u8>> {
        let mut buf = self.incoming.lock().map_err(|_| ChannelError::Closed)?;
        Ok(std::mem::take(&mut *buf))
    }
}
