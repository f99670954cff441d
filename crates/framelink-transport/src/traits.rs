use crate::error::Result;

/// Abstract byte sink/source between the exchange engine and a
/// transport.
///
/// Implementations wrap a concrete byte pipe such as a UART, a TCP
/// stream, or an in-process loopback. Framing is the caller's concern; a
/// channel moves opaque bytes.
pub trait ByteChannel {
    /// Write one serialized frame to the transport.
    fn send(&mut self, frame: &[u8]) -> Result<()>;

    /// Drain any pending bytes without blocking.
    ///
    /// An empty vector means nothing has arrived; it is not an error.
    fn receive(&mut self) -> Result<Vec<u8>>;
}
