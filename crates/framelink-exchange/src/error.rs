use framelink_frame::FrameError;
use framelink_schema::SchemaError;
use framelink_transport::ChannelError;

/// Errors surfaced by the exchange engine.
///
/// Inbound decode failures are not here: the engine logs and drops
/// malformed frames rather than returning them to the tick caller.
#[derive(Debug, thiserror::Error)]
pub enum ExchangeError {
    /// No prototype registered under the given schema id.
    #[error("no schema registered for id {0}")]
    SchemaNotFound(u8),

    /// Channel-level failure while sending or receiving.
    #[error("channel error: {0}")]
    Channel(#[from] ChannelError),

    /// Frame-level failure while encoding or decoding.
    #[error("frame error: {0}")]
    Frame(#[from] FrameError),

    /// Schema-level failure while building a message.
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),
}

pub type Result<T> = std::result::Result<T, ExchangeError>;
