// File: src/crypto/error.rs
// Project: Supernode Client
// Creation date: Wednesday 14 October 2026
// Author: Vincent Berthier <vincent.berthier@posteo.org>
// -----
// Last modified: Friday 16 October 2026 @ 09:25:59
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
use ed25519_dalek::SignatureError;

/// Errors of the cryptography module.
#[derive(Debug, Display, From)]
#[display("during a cryptographic operation: {_variant}")]
pub enum Error {
    /// A seed is longer than what the address derivation accepts.
    #[display("seed #{index} is {len} bytes long (32 bytes at most)")]
    SeedTooLong {
        /// Position of the offending seed.
        index: usize,
        /// Its length.
        len: usize,
    },
    /// Tried to use too many seeds to derive an address.
    #[display("{count} seeds given, the derivation accepts 16 including the bump")]
    TooManySeeds {
        /// Number of seeds, bump included.
        count: usize,
    },
    /// The given bump does not push the derived address off the curve.
    #[display("bump {bump} gives an on-curve address for these seeds")]
    InvalidSeeds {
        /// The rejected bump.
        bump: u8,
    },
    /// No bump in `255..=0` gave an off-curve address.
    NoViableBumpFound,
    /// A derivation recipe needs an address as path seed and none was given.
    #[display("the '{recipe}' address needs a path seed")]
    MissingPathSeed {
        /// Name of the derivation recipe.
        recipe: &'static str,
    },
    /// Could not obtain the lock on the random engine used to generate private keys.
    RandomEnginePoisonedLock,
    /// A byte array does not have the length of an address.
    #[display("expected 32 bytes for an address, got {_0}")]
    WrongKeyLength(usize),
    /// Could not decode a string as `base58`
    #[from]
    Bs58Decoding(bs58::decode::Error),
    /// Failed to verify a signature
    #[from]
    Signature(SignatureError),
}

impl core::error::Error for Error {}
