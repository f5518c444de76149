// File: src/codec/sequence.rs
// Project: Supernode Client
// Creation date: Thursday 15 October 2026
// Author: Vincent Berthier <vincent.berthier@posteo.org>
// -----
// Last modified: Friday 16 October 2026 @ 17:38:23
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

//! Checked reading of length prefixed sequences inside borsh records.
//!
//! Use it on `Vec` fields with `#[borsh(deserialize_with = "crate::codec::sequence::deserialize")]`
//! so that a prefix declaring more elements than the input holds is reported as such,
//! instead of as a plain truncation of whichever element ran out.

use borsh::{
    io::{self, ErrorKind, Read},
    BorshDeserialize,
};
use derive_more::derive::Display;

/// Elements allocated ahead of reading them.
const PREALLOCATED: u32 = 64;

/// The error carried inside the `io::Error` when a sequence overruns the input.
#[derive(Debug, Display)]
#[display("sequence of {declared} elements stopped after {decoded}: {source}")]
pub(crate) struct LengthOverrun {
    pub(crate) declared: u32,
    pub(crate) decoded: u32,
    pub(crate) source: io::Error,
}

impl core::error::Error for LengthOverrun {}

/// Read a `u32` element count followed by that many elements.
///
/// # Errors
/// If an element cannot be read, the error is wrapped with the declared count.
pub fn deserialize<R, T>(reader: &mut R) -> io::Result<Vec<T>>
where
    R: Read,
    T: BorshDeserialize,
{
    let declared = u32::deserialize_reader(reader)?;
    let mut items = Vec::with_capacity(declared.min(PREALLOCATED) as usize);
    for decoded in 0..declared {
        let item = T::deserialize_reader(reader).map_err(|source| {
            io::Error::new(
                ErrorKind::InvalidData,
                LengthOverrun {
                    declared,
                    decoded,
                    source,
                },
            )
        })?;
        items.push(item);
    }
    Ok(items)
}
