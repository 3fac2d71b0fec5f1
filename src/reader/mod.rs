#![doc = r#"
Cursor over a borrowed byte buffer, plus the primitive reads every
decoder in the crate is built from.

The whole file is available up front, so the reader is nothing more than
a slice and an offset. Decoders consume a prefix by advancing the offset;
nothing is ever copied out of the buffer except the multi-byte integers
assembled here.
"#]

mod error;
pub use error::*;

/// A cursor over a fixed byte buffer.
///
/// Every read either consumes exactly the bytes it returns or fails with
/// an [`UnexpectedEndOfInput`](ReaderErrorKind::UnexpectedEndOfInput)
/// carrying the offset at which the bytes ran out, leaving the cursor
/// where it was.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    buffer: &'a [u8],
    position: usize,
}

impl<'a> Reader<'a> {
    /// Create a reader positioned at the start of `buffer`.
    pub const fn from_byte_slice(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            position: 0,
        }
    }

    /// The current offset into the buffer.
    pub const fn buffer_position(&self) -> usize {
        self.position
    }

    /// Bytes left to consume.
    pub const fn remaining(&self) -> usize {
        self.buffer.len() - self.position
    }

    /// True once every byte has been consumed.
    pub const fn is_empty(&self) -> bool {
        self.position >= self.buffer.len()
    }

    /// Consume and return the next `count` bytes.
    pub fn read_exact(&mut self, count: usize) -> ReadResult<&'a [u8]> {
        if count > self.remaining() {
            return Err(ReaderError::eof(self.position));
        }
        let bytes = &self.buffer[self.position..self.position + count];
        self.position += count;
        Ok(bytes)
    }

    /// Consume a compile-time-sized run of bytes.
    pub fn read_exact_size<const N: usize>(&mut self) -> ReadResult<[u8; N]> {
        let bytes = self.read_exact(N)?;
        // read_exact returned exactly N bytes
        Ok(bytes.try_into().unwrap())
    }

    /// Consume a single byte.
    pub fn read_byte(&mut self) -> ReadResult<u8> {
        let [byte] = self.read_exact_size::<1>()?;
        Ok(byte)
    }

    /// Consume a big-endian 16-bit integer.
    pub fn read_u16_be(&mut self) -> ReadResult<u16> {
        Ok(u16::from_be_bytes(self.read_exact_size()?))
    }

    /// Consume a big-endian 32-bit integer.
    pub fn read_u32_be(&mut self) -> ReadResult<u32> {
        Ok(u32::from_be_bytes(self.read_exact_size()?))
    }

    /// Consume a MIDI variable-length quantity.
    ///
    /// Bytes are read while the continuation bit (0x80) is set, each
    /// contributing its low seven bits to a big-endian accumulator; the
    /// first byte with a clear high bit terminates the quantity and is
    /// included in it.
    ///
    /// Canonical SMF caps a VLQ at four bytes, but longer encodings are
    /// not rejected here; the accumulator wraps past 32 bits. Running off
    /// the end of the buffer before the terminating byte fails with
    /// [`UnexpectedEndOfInput`](ReaderErrorKind::UnexpectedEndOfInput).
    pub fn read_vlq(&mut self) -> ReadResult<u32> {
        let mut quantity: u32 = 0;
        loop {
            let byte = self.read_byte()?;
            quantity = quantity.wrapping_shl(7) | u32::from(byte & 0x7F);
            if byte & 0x80 == 0 {
                return Ok(quantity);
            }
        }
    }
}
