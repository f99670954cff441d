use std::collections::BTreeMap;

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{Result, SchemaError};
use crate::field::FieldKind;

/// Schema identifier reserved for "invalid/unset". Never assign it.
pub const RESERVED_SCHEMA_ID: u8 = 0x50;

/// A named field's placement within a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    /// Byte offset from the start of the record.
    pub offset: usize,
    /// Scalar kind, which fixes the field's width.
    pub kind: FieldKind,
}

/// Named record schema: named scalar fields with assigned offsets and an
/// 8-bit identifier carried in every frame.
///
/// Fields iterate in ascending lexicographic name order. That order is
/// load-bearing: serialized schema streams emit fields in it, and the
/// offset a field receives on parse depends on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prototype {
    id: u8,
    size: usize,
    fields: BTreeMap<String, Field>,
}

impl Default for Prototype {
    /// The unset prototype, carrying [`RESERVED_SCHEMA_ID`].
    fn default() -> Self {
        Self::new(RESERVED_SCHEMA_ID)
    }
}

impl Prototype {
    /// Empty schema with the given identifier.
    pub fn new(id: u8) -> Self {
        Self {
            id,
            size: 0,
            fields: BTreeMap::new(),
        }
    }

    /// Append a field.
    ///
    /// Re-adding an existing name removes the old width from the record
    /// and lays the field out again at the tail; other fields keep their
    /// offsets.
    pub fn add_field(&mut self, name: &str, kind: FieldKind) -> &mut Self {
        if let Some(old) = self.fields.remove(name) {
            self.size -= old.kind.width();
        }
        self.fields.insert(
            name.to_string(),
            Field {
                offset: self.size,
                kind,
            },
        );
        self.size += kind.width();
        self
    }

    /// Look up a field's placement by name.
    pub fn find_field(&self, name: &str) -> Result<Field> {
        self.fields
            .get(name)
            .copied()
            .ok_or_else(|| SchemaError::FieldNotFound {
                name: name.to_string(),
            })
    }

    /// Total record size in bytes.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of fields.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// The 8-bit schema identifier.
    pub fn identifier(&self) -> u8 {
        self.id
    }

    /// Whether this is the reserved unset prototype.
    pub fn is_unset(&self) -> bool {
        self.id == RESERVED_SCHEMA_ID
    }

    /// Iterate fields in ascending name order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, Field)> {
        self.fields.iter().map(|(name, field)| (name.as_str(), *field))
    }

    /// Serialize the schema for side-channel exchange.
    ///
    /// Stream layout: `[id][n]` then `n × [name_len][name_bytes][kind]`,
    /// fields in ascending name order. Not used by the message framer.
    pub fn serialize_schema(&self) -> Bytes {
        let body: usize = self.fields.keys().map(|name| name.len() + 2).sum();
        let mut out = BytesMut::with_capacity(2 + body);
        out.put_u8(self.id);
        out.put_u8(self.fields.len() as u8);
        for (name, field) in &self.fields {
            out.put_u8(name.len() as u8);
            out.put_slice(name.as_bytes());
            out.put_u8(field.kind as u8);
        }
        out.freeze()
    }

    /// Parse a schema stream produced by [`serialize_schema`].
    ///
    /// Offsets are assigned in stream order, so both sides agree on
    /// layout as long as both emit fields sorted by name.
    ///
    /// [`serialize_schema`]: Prototype::serialize_schema
    pub fn parse_schema(stream: &[u8]) -> Result<Self> {
        let too_short = || SchemaError::SchemaTooShort { len: stream.len() };

        if stream.len() < 2 {
            return Err(too_short());
        }

        let mut proto = Prototype::new(stream[0]);
        let field_count = stream[1] as usize;
        let mut at = 2usize;

        for _ in 0..field_count {
            let name_len = *stream.get(at).ok_or_else(too_short)? as usize;
            at += 1;

            let name_end = at + name_len;
            // One more byte past the name for the kind.
            if stream.len() <= name_end {
                return Err(too_short());
            }

            let name = std::str::from_utf8(&stream[at..name_end])
                .map_err(|_| SchemaError::InvalidFieldName)?;
            let kind = FieldKind::from_u8(stream[name_end])?;
            proto.add_field(name, kind);
            at = name_end + 1;
        }

        Ok(proto)
    }
}
