// File: src/codec/reader.rs
// Project: Supernode Client
// Creation date: Wednesday 14 October 2026
// Author: Vincent Berthier <vincent.berthier@posteo.org>
// -----
// Last modified: Wednesday 14 October 2026 @ 12:40:10
// Modified by: Vincent Berthier
// -----
// Copyright (c) 2026 <Vincent Berthier>
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the 'Software'), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED 'AS IS', WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

use borsh::{io, BorshDeserialize};
use tracing::{trace, warn};

use super::{sequence::LengthOverrun, Error, Result};

/// A read that could not be satisfied.
#[derive(Clone, Copy, Debug)]
struct Shortfall {
    offset: usize,
    needed: usize,
    remaining: usize,
}

/// A cursor over a byte buffer that keeps track of its position.
///
/// Borsh values are read through it so that failures report where they happened
/// and how many bytes were missing.
#[derive(Debug)]
pub struct Reader<'a> {
    data: &'a [u8],
    offset: usize,
    shortfall: Option<Shortfall>,
}

impl<'a> Reader<'a> {
    /// Start reading at the beginning of the buffer.
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            offset: 0,
            shortfall: None,
        }
    }

    /// Number of bytes consumed so far.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Number of bytes left.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    /// Consume exactly `len` raw bytes.
    ///
    /// # Errors
    /// If fewer than `len` bytes are left.
    pub fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        let remaining = self.remaining();
        if len > remaining {
            warn!("needed {len} bytes at offset {}, {remaining} left", self.offset);
            return Err(Error::TruncatedInput {
                offset: self.offset,
                needed: len,
                remaining,
            });
        }
        let bytes = &self.data[self.offset..self.offset + len];
        self.offset += len;
        Ok(bytes)
    }

    /// Decode a borsh value at the current position.
    ///
    /// # Errors
    /// If the input runs out before the value is complete, if a length prefix
    /// cannot fit in the remaining bytes, or if the bytes are not a valid value.
    ///
    /// # Example
    /// ```rust
    /// # use supernode_client::codec::{Error, Reader};
    /// let mut reader = Reader::new(&[1, 0, 2, 0, 0, 0]);
    /// assert_eq!(reader.read::<u16>()?, 1);
    /// assert_eq!(reader.read::<u32>()?, 2);
    /// assert!(matches!(reader.read::<u8>(), Err(Error::TruncatedInput { offset: 6, .. })));
    ///
    /// # Ok::<(), Error>(())
    /// ```
    pub fn read<T>(&mut self) -> Result<T>
    where
        T: BorshDeserialize,
    {
        self.shortfall = None;
        let start = self.offset;
        let value = T::deserialize_reader(self).map_err(|err| {
            let err = self.classify(err);
            warn!("failed to decode a value started at offset {start}: {err}");
            err
        })?;
        trace!("decoded {} bytes at offset {start}", self.offset - start);
        Ok(value)
    }

    /// Check that every byte was consumed.
    ///
    /// # Returns
    /// The number of bytes consumed.
    ///
    /// # Errors
    /// If bytes are left over.
    pub fn finish(&self) -> Result<usize> {
        let count = self.remaining();
        if count > 0 {
            warn!("{count} bytes left after offset {}", self.offset);
            return Err(Error::TrailingBytes {
                offset: self.offset,
                count,
            });
        }
        Ok(self.offset)
    }

    fn classify(&self, err: io::Error) -> Error {
        let overrun = err
            .get_ref()
            .and_then(|inner| inner.downcast_ref::<LengthOverrun>());
        match (overrun, self.shortfall) {
            (Some(overrun), Some(shortfall)) => Error::MalformedLengthPrefix {
                offset: shortfall.offset,
                declared: overrun.declared,
                remaining: shortfall.remaining,
            },
            (None, Some(shortfall)) => Error::TruncatedInput {
                offset: shortfall.offset,
                needed: shortfall.needed,
                remaining: shortfall.remaining,
            },
            (Some(overrun), None) => Error::InvalidData {
                offset: self.offset,
                reason: overrun.source.to_string(),
            },
            (None, None) => Error::InvalidData {
                offset: self.offset,
                reason: err.to_string(),
            },
        }
    }
}

impl io::Read for Reader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let remaining = self.remaining();
        if remaining == 0 && !buf.is_empty() {
            self.shortfall = Some(Shortfall {
                offset: self.offset,
                needed: buf.len(),
                remaining,
            });
            return Ok(0);
        }
        let len = buf.len().min(remaining);
        buf[..len].copy_from_slice(&self.data[self.offset..self.offset + len]);
        self.offset += len;
        Ok(len)
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> io::Result<()> {
        let remaining = self.remaining();
        if buf.len() > remaining {
            self.shortfall = Some(Shortfall {
                offset: self.offset,
                needed: buf.len(),
                remaining,
            });
            return Err(io::ErrorKind::UnexpectedEof.into());
        }
        buf.copy_from_slice(&self.data[self.offset..self.offset + buf.len()]);
        self.offset += buf.len();
        Ok(())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use test_log::test;

    use super::*;
    type TestResult = core::result::Result<(), Box<dyn core::error::Error>>;

    #[test]
    fn integers_are_little_endian() -> TestResult {
        // Given
        let data = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];

        // When
        let mut reader = Reader::new(&data);
        let value: u64 = reader.read()?;

        // Then
        assert_eq!(value, 0x0807_0605_0403_0201);
        assert_eq!(reader.finish()?, 8);

        Ok(())
    }

    #[test]
    fn truncated_integer() -> TestResult {
        // Given
        let data = [1, 0, 0, 0, 0, 0, 0, 0, 9, 9];
        let mut reader = Reader::new(&data);
        let _first: u64 = reader.read()?;

        // When
        let res = reader.read::<u64>();

        // Then
        assert!(matches!(
            res,
            Err(Error::TruncatedInput { offset: 8, needed: 8, remaining: 2 })
        ));

        Ok(())
    }

    #[test]
    fn truncated_string() {
        // Given
        let data = [5, 0, 0, 0, b'a', b'b'];

        // When
        let res = Reader::new(&data).read::<String>();

        // Then
        assert!(matches!(res, Err(Error::TruncatedInput { .. })));
    }

    #[test]
    fn invalid_content() {
        // Given
        let data = [2, 0, 0, 0, 0xff, 0xfe];

        // When
        let text = Reader::new(&data).read::<String>();
        let flag = Reader::new(&[3]).read::<bool>();

        // Then
        assert!(matches!(text, Err(Error::InvalidData { .. })));
        assert!(matches!(flag, Err(Error::InvalidData { .. })));
    }

    #[test]
    fn trailing_bytes() -> TestResult {
        // Given
        let mut reader = Reader::new(&[1, 2, 3]);

        // When
        let head = reader.take(1)?;
        let res = reader.finish();

        // Then
        assert_eq!(head, &[1]);
        assert!(matches!(res, Err(Error::TrailingBytes { offset: 1, count: 2 })));

        Ok(())
    }
}
