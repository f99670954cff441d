/// Errors that can occur on a byte channel.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    /// An I/O error occurred on the underlying transport.
    #[error("channel I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The channel is no longer usable.
    #[error("channel closed")]
    Closed,
}

pub type Result<T> = std::result::Result<T, ChannelError>;
