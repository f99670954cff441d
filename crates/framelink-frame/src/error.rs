use framelink_schema::SchemaError;

/// Errors that can occur during frame encoding/decoding.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// Not enough bytes to carry even the preamble.
    #[error("frame too short ({len} bytes)")]
    TooShort { len: usize },

    /// The frame does not open with the "RDS" preamble.
    #[error("bad frame preamble (expected \"RDS\")")]
    BadPreamble,

    /// The frame does not close with the "END" sentinel.
    #[error("bad frame sentinel (expected \"END\")")]
    BadSentinel,

    /// The header region holds fewer than four bytes.
    #[error("frame header too short ({len} bytes)")]
    HeaderTooShort { len: usize },

    /// The header carries an undefined message kind.
    #[error("unknown message kind {0}")]
    UnknownKind(u8),

    /// Frame length disagrees with the schema's record size.
    #[error("frame length mismatch: expected {expected} bytes, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Schema-level failure while rebuilding the payload buffer.
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

pub type Result<T> = std::result::Result<T, FrameError>;
