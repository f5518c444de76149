// File: src/codec/error.rs
// Project: Supernode Client
// Creation date: Thursday 15 October 2026
// Author: Vincent Berthier <vincent.berthier@posteo.org>
// -----
// Last modified: Thursday 15 October 2026 @ 13:28:28
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

use derive_more::derive::{Display, From};

use super::Discriminator;

/// Errors of the binary codec.
#[derive(Debug, Display, From)]
#[display("codec error: {_variant}")]
pub enum Error {
    /// Fewer bytes remain than the value being decoded needs.
    #[display("truncated input at offset {offset}: {needed} more bytes needed, {remaining} left")]
    TruncatedInput {
        /// Where the read was attempted.
        offset: usize,
        /// How many bytes the read needed.
        needed: usize,
        /// How many bytes were left.
        remaining: usize,
    },
    /// A length prefix declares more elements than the remaining bytes can hold.
    #[display("length prefix declares {declared} elements, cannot fit in the {remaining} bytes left at offset {offset}")]
    MalformedLengthPrefix {
        /// Where the sequence stopped fitting.
        offset: usize,
        /// The declared number of elements.
        declared: u32,
        /// The bytes left at that point.
        remaining: usize,
    },
    /// The payload starts with a discriminator nobody knows.
    #[display("unknown discriminator {observed}")]
    UnknownDiscriminator {
        /// The leading bytes of the payload.
        observed: Discriminator,
    },
    /// The payload starts with another type's discriminator.
    #[display("wrong discriminator: wanted {expected}, got {observed}")]
    DiscriminatorMismatch {
        /// The discriminator of the requested type.
        expected: Discriminator,
        /// The leading bytes of the payload.
        observed: Discriminator,
    },
    /// Bytes remain after the last field.
    #[display("{count} trailing bytes after offset {offset}")]
    TrailingBytes {
        /// End of the decoded value.
        offset: usize,
        /// Number of bytes left over.
        count: usize,
    },
    /// A value does not have the shape its schema describes.
    #[display("expected a value of type {expected}, got {actual}")]
    SchemaMismatch {
        /// The type the schema describes.
        expected: String,
        /// The type of the value given.
        actual: &'static str,
    },
    /// The bytes have the right length but not a valid content (bad UTF-8, bool out of range…).
    #[display("invalid data at offset {offset}: {reason}")]
    InvalidData {
        /// Where the invalid value ends.
        offset: usize,
        /// What was wrong.
        reason: String,
    },
    /// A value could not be serialized.
    #[display("while serializing: {_0}")]
    Serialization(std::io::Error),
    /// A log payload is not valid `base64`.
    #[from]
    Base64(base64::DecodeError),
}

impl core::error::Error for Error {}
