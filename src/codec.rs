//! Serialization seam for the serialized transfer path.
//!
//! Values are encoded back-to-back with bincode, which is deterministic and
//! self-delimiting per value: a sequential decode consumes exactly the bytes
//! the matching encode produced, in the same order.

use crate::error::{MusterError, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::io::Cursor;

/// Encode `values` in order into one contiguous byte buffer.
pub(crate) fn encode_values<T: Serialize>(values: &[T]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    for v in values {
        bincode::serialize_into(&mut buf, v)
            .map_err(|e| MusterError::EncodeFailed(e.to_string()))?;
    }
    Ok(buf)
}

/// A decoder positioned at a byte offset within a receive buffer.
pub(crate) struct Decoder<'a> {
    cursor: Cursor<&'a [u8]>,
}

impl<'a> Decoder<'a> {
    /// Position a decoder at `offset` within `buf`.
    pub(crate) fn at(buf: &'a [u8], offset: u64) -> Self {
        let mut cursor = Cursor::new(buf);
        cursor.set_position(offset);
        Self { cursor }
    }

    /// Decode the next value, advancing past the bytes it occupied.
    pub(crate) fn read<T: DeserializeOwned>(&mut self) -> Result<T> {
        bincode::deserialize_from(&mut self.cursor)
            .map_err(|e| MusterError::DecodeFailed(e.to_string()))
    }
}
