// Copyright (c) 2025 Mauka MCP Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Little-endian cursor shared by the filter codecs.

/// Raised when a read runs past the end of the input buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TruncatedInput {
    /// Bytes the read required
    pub needed: usize,
    /// Bytes that were left in the buffer
    pub remaining: usize,
}

/// A forward-only reader over an encoded byte buffer.
#[derive(Debug)]
pub(crate) struct WireReader<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> WireReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, position: 0 }
    }

    /// Number of unread bytes.
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.position
    }

    /// Take the next `len` bytes.
    pub fn take(&mut self, len: usize) -> Result<&'a [u8], TruncatedInput> {
        let remaining = self.remaining();
        if len > remaining {
            return Err(TruncatedInput {
                needed: len,
                remaining,
            });
        }
        let slice = &self.bytes[self.position..self.position + len];
        self.position += len;
        Ok(slice)
    }

    /// Take every unread byte.
    pub fn rest(&mut self) -> &'a [u8] {
        let slice = &self.bytes[self.position..];
        self.position = self.bytes.len();
        slice
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N], TruncatedInput> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> Result<u8, TruncatedInput> {
        Ok(self.array::<1>()?[0])
    }

    pub fn read_u32(&mut self) -> Result<u32, TruncatedInput> {
        self.array().map(u32::from_le_bytes)
    }

    pub fn read_u64(&mut self) -> Result<u64, TruncatedInput> {
        self.array().map(u64::from_le_bytes)
    }

    pub fn read_f32(&mut self) -> Result<f32, TruncatedInput> {
        self.array().map(f32::from_le_bytes)
    }

    pub fn read_f64(&mut self) -> Result<f64, TruncatedInput> {
        self.array().map(f64::from_le_bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_little_endian_fields_in_order() {
        let mut bytes = vec![7u8];
        bytes.extend_from_slice(&0x0102_0304u32.to_le_bytes());
        bytes.extend_from_slice(&42u64.to_le_bytes());
        bytes.extend_from_slice(&0.5f32.to_le_bytes());

        let mut reader = WireReader::new(&bytes);
        assert_eq!(reader.read_u8(), Ok(7));
        assert_eq!(reader.read_u32(), Ok(0x0102_0304));
        assert_eq!(reader.read_u64(), Ok(42));
        assert_eq!(reader.read_f32(), Ok(0.5));
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_short_read_reports_what_was_missing() {
        let bytes = [1u8, 2, 3];
        let mut reader = WireReader::new(&bytes);

        assert_eq!(
            reader.read_u64(),
            Err(TruncatedInput {
                needed: 8,
                remaining: 3
            })
        );
        // A failed read consumes nothing
        assert_eq!(reader.rest(), &[1, 2, 3]);
    }
}
