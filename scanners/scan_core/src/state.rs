//! Snapshot codec for scanner state.
//!
//! Hosts save a scanner's persistent state after every token and restore it
//! before scanning from an earlier position. Snapshots are small byte
//! strings written into a fixed-size host buffer; all multi-byte integers
//! are little-endian.
//!
//! Two failure classes exist and they are handled differently:
//!
//! - Writing past the buffer ([`StateError::Overflow`]) means the state is
//!   not resumable at this position. The save reports zero bytes.
//! - A snapshot whose length disagrees with its declared structure is a
//!   broken save/restore contract, never bad user input.

use thiserror::Error;

/// Size of the host's snapshot buffer.
pub const SERIALIZATION_BUFFER_SIZE: usize = 1024;

/// Failure while saving or restoring scanner state.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum StateError {
    /// The state does not fit the snapshot buffer.
    #[error("scanner state needs {needed} bytes but the snapshot buffer holds {capacity}")]
    Overflow { needed: usize, capacity: usize },

    /// The snapshot ends before its declared structure does.
    #[error("snapshot truncated: needed {needed} more bytes at offset {offset}, {remaining} left")]
    Truncated {
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    /// The snapshot continues past its declared structure.
    #[error("snapshot has {extra} trailing bytes after offset {offset}")]
    TrailingBytes { offset: usize, extra: usize },

    /// A saved text field is not valid UTF-8.
    #[error("snapshot text at offset {offset} is not valid UTF-8")]
    InvalidUtf8 { offset: usize },

    /// A count does not fit the width it is saved with.
    #[error("{what} count {count} does not fit in {max}")]
    CountTooLarge {
        what: &'static str,
        count: usize,
        max: usize,
    },
}

/// Appends snapshot fields to a fixed-capacity buffer.
#[derive(Debug)]
pub struct StateWriter<'a> {
    buf: &'a mut [u8],
    len: usize,
}

impl<'a> StateWriter<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        StateWriter { buf, len: 0 }
    }

    /// Bytes written so far.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// The bytes written so far.
    pub fn written(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    pub fn put_u8(&mut self, value: u8) -> Result<(), StateError> {
        self.put_bytes(&[value])
    }

    pub fn put_bool(&mut self, value: bool) -> Result<(), StateError> {
        self.put_u8(u8::from(value))
    }

    pub fn put_u16(&mut self, value: u16) -> Result<(), StateError> {
        self.put_bytes(&value.to_le_bytes())
    }

    pub fn put_u32(&mut self, value: u32) -> Result<(), StateError> {
        self.put_bytes(&value.to_le_bytes())
    }

    /// Write a count that must fit in one byte.
    pub fn put_count_u8(&mut self, what: &'static str, count: usize) -> Result<(), StateError> {
        let byte = u8::try_from(count).map_err(|_| StateError::CountTooLarge {
            what,
            count,
            max: u8::MAX as usize,
        })?;
        self.put_u8(byte)
    }

    /// Write a length-prefixed (`u32`) byte string.
    pub fn put_len_prefixed(&mut self, what: &'static str, bytes: &[u8]) -> Result<(), StateError> {
        let len = u32::try_from(bytes.len()).map_err(|_| StateError::CountTooLarge {
            what,
            count: bytes.len(),
            max: u32::MAX as usize,
        })?;
        self.put_u32(len)?;
        self.put_bytes(bytes)
    }

    pub fn put_bytes(&mut self, bytes: &[u8]) -> Result<(), StateError> {
        let end = self.len + bytes.len();
        if end > self.buf.len() {
            return Err(StateError::Overflow {
                needed: end,
                capacity: self.buf.len(),
            });
        }
        self.buf[self.len..end].copy_from_slice(bytes);
        self.len = end;
        Ok(())
    }
}

/// Reads snapshot fields back in the order they were written.
#[derive(Clone, Debug)]
pub struct StateReader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> StateReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        StateReader { bytes, offset: 0 }
    }

    /// Bytes not yet read.
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.offset
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn get_u8(&mut self) -> Result<u8, StateError> {
        Ok(self.take(1)?[0])
    }

    /// Any non-zero byte reads as `true`.
    pub fn get_bool(&mut self) -> Result<bool, StateError> {
        Ok(self.get_u8()? != 0)
    }

    pub fn get_u16(&mut self) -> Result<u16, StateError> {
        let bytes = self.take(2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    pub fn get_u32(&mut self) -> Result<u32, StateError> {
        let bytes = self.take(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Read a length-prefixed (`u32`) byte string.
    pub fn get_len_prefixed(&mut self) -> Result<&'a [u8], StateError> {
        let len = self.get_u32()? as usize;
        self.take(len)
    }

    /// Read a length-prefixed (`u32`) UTF-8 string.
    pub fn get_str(&mut self) -> Result<&'a str, StateError> {
        let offset = self.offset;
        let bytes = self.get_len_prefixed()?;
        std::str::from_utf8(bytes).map_err(|_| StateError::InvalidUtf8 { offset })
    }

    /// Read everything that is left as UTF-8.
    pub fn rest_str(&mut self) -> Result<&'a str, StateError> {
        let offset = self.offset;
        let bytes = self.take(self.remaining())?;
        std::str::from_utf8(bytes).map_err(|_| StateError::InvalidUtf8 { offset })
    }

    pub fn take(&mut self, len: usize) -> Result<&'a [u8], StateError> {
        if len > self.remaining() {
            return Err(StateError::Truncated {
                offset: self.offset,
                needed: len,
                remaining: self.remaining(),
            });
        }
        let bytes = &self.bytes[self.offset..self.offset + len];
        self.offset += len;
        Ok(bytes)
    }

    /// Require that the whole snapshot was consumed.
    pub fn finish(self) -> Result<(), StateError> {
        match self.remaining() {
            0 => Ok(()),
            extra => Err(StateError::TrailingBytes {
                offset: self.offset,
                extra,
            }),
        }
    }
}
