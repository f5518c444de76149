// File: src/codec/mod.rs
// Project: Supernode Client
// Creation date: Wednesday 14 October 2026
// Author: Vincent Berthier <vincent.berthier@posteo.org>
// -----
// Last modified: Thursday 15 October 2026 @ 13:40:30
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

//! Values are laid out with borsh: little endian integers, `u32` length
//! prefixes for sequences and strings, no prefix for fixed arrays.

use borsh::{BorshDeserialize, BorshSerialize};

mod discriminator;
mod error;
mod reader;
mod schema;
pub mod sequence;

pub use discriminator::{Discriminator, DISCRIMINATOR_LENGTH};
pub use error::Error;
pub use reader::Reader;
pub use schema::{Field, Schema, Value};

/// Result type of the codec module.
pub type Result<T> = core::result::Result<T, Error>;

/// Encode a borsh value.
///
/// # Errors
/// If the value refuses to serialize.
pub fn to_vec<T>(value: &T) -> Result<Vec<u8>>
where
    T: BorshSerialize + ?Sized,
{
    borsh::to_vec(value).map_err(Error::Serialization)
}

/// Decode a borsh value from the start of a buffer.
///
/// # Returns
/// The value and the number of bytes it took.
///
/// # Errors
/// If the buffer does not start with a valid value.
pub fn decode<T>(bytes: &[u8]) -> Result<(T, usize)>
where
    T: BorshDeserialize,
{
    let mut reader = Reader::new(bytes);
    let value = reader.read()?;
    Ok((value, reader.offset()))
}

/// Decode a borsh value taking the whole buffer.
///
/// # Errors
/// If the buffer is not exactly one valid value.
pub fn decode_exact<T>(bytes: &[u8]) -> Result<T>
where
    T: BorshDeserialize,
{
    let mut reader = Reader::new(bytes);
    let value = reader.read()?;
    reader.finish()?;
    Ok(value)
}
