//! Zigzag and LEB128 varint primitives.
//!
//! Signed channel values are zigzag-mapped so small magnitudes of either sign
//! stay short, then written seven bits at a time, low group first, with the
//! high bit marking "more bytes follow".

use crate::constants::MAX_VARINT_LEN;
use crate::error::{MalformedPacket, ProtocolResult};

/// Map a signed value onto an unsigned one: 0, -1, 1, -2, 2 → 0, 1, 2, 3, 4.
#[inline]
pub const fn zigzag_encode(n: i64) -> u64 {
    ((n << 1) ^ (n >> 63)) as u64
}

/// Inverse of [`zigzag_encode`].
#[inline]
pub const fn zigzag_decode(n: u64) -> i64 {
    ((n >> 1) as i64) ^ -((n & 1) as i64)
}

/// Append `value` as an unsigned LEB128 varint.
pub fn write_varint(out: &mut Vec<u8>, mut value: u64) {
    loop {
        let group = (value & 0x7F) as u8;
        value >>= 7;
        if value == 0 {
            out.push(group);
            return;
        }
        out.push(group | 0x80);
    }
}

/// Append `value` zigzag-mapped and varint-encoded.
#[inline]
pub fn write_zigzag(out: &mut Vec<u8>, value: i64) {
    write_varint(out, zigzag_encode(value));
}

/// Forward-only reader over a decoded frame.
#[derive(Debug, Clone)]
pub struct FrameReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> FrameReader<'a> {
    /// Start reading at the beginning of `buf`.
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Current byte offset.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    /// Read one raw byte, or `None` at end of buffer.
    pub fn read_u8(&mut self) -> Option<u8> {
        let byte = self.buf.get(self.pos).copied()?;
        self.pos += 1;
        Some(byte)
    }

    /// Read an unsigned LEB128 varint.
    ///
    /// # Errors
    ///
    /// [`MalformedPacket::TruncatedVarint`] if the buffer ends mid-varint,
    /// [`MalformedPacket::VarintOverflow`] if the continuation bit is still set
    /// after [`MAX_VARINT_LEN`] bytes.
    pub fn read_varint(&mut self) -> ProtocolResult<u64> {
        let start = self.pos;
        let mut value = 0u64;
        for i in 0..MAX_VARINT_LEN {
            let byte = self
                .read_u8()
                .ok_or(MalformedPacket::TruncatedVarint { offset: start })?;
            value |= u64::from(byte & 0x7F) << (7 * i);
            if byte & 0x80 == 0 {
                return Ok(value);
            }
        }
        Err(MalformedPacket::VarintOverflow { offset: start })
    }

    /// Read a zigzag-encoded signed varint.
    ///
    /// # Errors
    ///
    /// Same as [`FrameReader::read_varint`].
    pub fn read_zigzag(&mut self) -> ProtocolResult<i64> {
        self.read_varint().map(zigzag_decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zigzag_small_values() {
        assert_eq!(zigzag_encode(0), 0);
        assert_eq!(zigzag_encode(-1), 1);
        assert_eq!(zigzag_encode(1), 2);
        assert_eq!(zigzag_encode(-2), 3);
        assert_eq!(zigzag_encode(2), 4);
    }

    #[test]
    fn test_zigzag_extremes() {
        assert_eq!(zigzag_encode(i64::MAX), u64::MAX - 1);
        assert_eq!(zigzag_encode(i64::MIN), u64::MAX);
        assert_eq!(zigzag_decode(u64::MAX), i64::MIN);
        assert_eq!(zigzag_decode(u64::MAX - 1), i64::MAX);
    }

    #[test]
    fn test_varint_known_encodings() {
        let mut out = Vec::new();
        write_varint(&mut out, 300);
        assert_eq!(out, vec![0xAC, 0x02]);

        out.clear();
        write_varint(&mut out, 0);
        assert_eq!(out, vec![0x00]);

        out.clear();
        write_varint(&mut out, u64::MAX);
        assert_eq!(out.len(), MAX_VARINT_LEN);
        assert_eq!(out.last().copied(), Some(0x01));
    }

    #[test]
    fn test_reader_truncated() {
        let mut reader = FrameReader::new(&[0x01, 0x80, 0x80]);
        assert_eq!(reader.read_varint(), Ok(1));
        assert_eq!(
            reader.read_varint(),
            Err(MalformedPacket::TruncatedVarint { offset: 1 })
        );
    }

    #[test]
    fn test_reader_overflow() {
        let buf = [0xFFu8; 11];
        let mut reader = FrameReader::new(&buf);
        assert_eq!(
            reader.read_varint(),
            Err(MalformedPacket::VarintOverflow { offset: 0 })
        );
    }

    #[test]
    fn test_reader_position_and_remaining() {
        let mut reader = FrameReader::new(&[0x05, 0xAC, 0x02, 0x09]);
        assert_eq!(reader.read_u8(), Some(5));
        assert_eq!(reader.read_varint(), Ok(300));
        assert_eq!(reader.position(), 3);
        assert_eq!(reader.remaining(), 1);
    }
}
