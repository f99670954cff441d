//! Record schemas and typed byte buffers.
//!
//! A [`Prototype`] is the blueprint for a record: named scalar fields
//! with assigned byte offsets, identified by an 8-bit tag. A [`Buffer`]
//! is one concrete instance of a prototype: a flat byte array with
//! width-checked typed access by field name. Prototypes can also be
//! serialized to a compact stream for side-channel schema exchange.

pub mod buffer;
pub mod error;
pub mod field;
pub mod prototype;

pub use buffer::Buffer;
pub use error::{Result, SchemaError};
pub use field::{FieldKind, Scalar};
pub use prototype::{Field, Prototype, RESERVED_SCHEMA_ID};
