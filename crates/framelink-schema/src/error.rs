/// Errors from schema construction and typed buffer access.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// The prototype carries the reserved "unset" identifier.
    #[error("schema not set (reserved identifier 0x50)")]
    SchemaNotSet,

    /// The named field does not exist in the prototype.
    #[error("field not found: {name}")]
    FieldNotFound { name: String },

    /// A typed accessor's width does not match the field's declared kind.
    #[error("field width mismatch on '{name}': accessor is {actual} bytes, field is {expected}")]
    FieldWidthMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    /// Raw bytes do not match the prototype's record size.
    #[error("buffer size mismatch: expected {expected} bytes, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// A schema stream ended before all declared fields were read.
    #[error("schema stream too short ({len} bytes)")]
    SchemaTooShort { len: usize },

    /// A schema stream carried an undefined field-kind discriminant.
    #[error("unknown field kind {0} in schema stream")]
    UnknownFieldKind(u8),

    /// A schema stream carried a field name that is not valid UTF-8.
    #[error("field name in schema stream is not valid UTF-8")]
    InvalidFieldName,
}

pub type Result<T> = std::result::Result<T, SchemaError>;
