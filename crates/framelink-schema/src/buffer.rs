use crate::error::{Result, SchemaError};
use crate::field::Scalar;
use crate::prototype::Prototype;

/// A byte array shaped by one [`Prototype`], with typed get/set by field
/// name.
///
/// The backing store is always exactly `prototype.size()` bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct Buffer {
    prototype: Prototype,
    bytes: Vec<u8>,
}

impl Buffer {
    /// Zero-filled buffer for a prototype.
    pub fn new(prototype: Prototype) -> Self {
        let bytes = vec![0u8; prototype.size()];
        Self { prototype, bytes }
    }

    /// Wrap existing bytes. The prototype must be set and the byte length
    /// must match its record size exactly.
    pub fn from_bytes(prototype: Prototype, bytes: Vec<u8>) -> Result<Self> {
        if prototype.is_unset() {
            return Err(SchemaError::SchemaNotSet);
        }
        if bytes.len() != prototype.size() {
            return Err(SchemaError::SizeMismatch {
                expected: prototype.size(),
                actual: bytes.len(),
            });
        }
        Ok(Self { prototype, bytes })
    }

    /// Typed read of a named field.
    ///
    /// `T`'s width must equal the field's declared width; the kinds
    /// themselves are not compared, so e.g. a `U16` field reads as `i16`.
    pub fn get<T: Scalar>(&self, name: &str) -> Result<T> {
        let field = self.prototype.find_field(name)?;
        if T::WIDTH != field.kind.width() {
            return Err(SchemaError::FieldWidthMismatch {
                name: name.to_string(),
                expected: field.kind.width(),
                actual: T::WIDTH,
            });
        }
        Ok(T::read_from(&self.bytes[field.offset..field.offset + T::WIDTH]))
    }

    /// Typed write of a named field, with the same width rule as [`get`].
    ///
    /// [`get`]: Buffer::get
    pub fn set<T: Scalar>(&mut self, name: &str, value: T) -> Result<()> {
        let field = self.prototype.find_field(name)?;
        if T::WIDTH != field.kind.width() {
            return Err(SchemaError::FieldWidthMismatch {
                name: name.to_string(),
                expected: field.kind.width(),
                actual: T::WIDTH,
            });
        }
        value.write_to(&mut self.bytes[field.offset..field.offset + T::WIDTH]);
        Ok(())
    }

    /// Raw record bytes.
    pub fn data(&self) -> &[u8] {
        &self.bytes
    }

    /// Record size in bytes.
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// The prototype shaping this buffer.
    pub fn prototype(&self) -> &Prototype {
        &self.prototype
    }
}
