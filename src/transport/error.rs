// File: src/transport/error.rs
// Project: Supernode Client
// Creation date: Monday 12 October 2026
// Author: Vincent Berthier <vincent.berthier@posteo.org>
// -----
// Last modified: Friday 16 October 2026 @ 09:30:49
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

use crate::crypto::Pubkey;

use super::Blockhash;

/// Errors at the transport boundary.
#[derive(Debug, Display, From)]
#[display("transport error: {_variant}")]
pub enum Error {
    /// No credential is available for a signing account.
    #[display("no credential to sign for {key}")]
    MissingCredential {
        /// The account that has to sign.
        key: Pubkey,
    },
    /// The instruction has no signing account, nobody pays for it.
    #[display("the instruction has no signing account")]
    NoSigners,
    /// A block hash does not have the right length.
    #[display("a block hash is 32 bytes long, got {_0}")]
    WrongHashLength(usize),
    /// The submission was made against an outdated block hash.
    #[display("block hash {blockhash} is no longer recent")]
    StaleBlockhash {
        /// The block hash of the submission.
        blockhash: Blockhash,
    },
    /// The signatures do not match the signing accounts.
    #[display("expected {expected} signatures, got {actual}")]
    SignaturesMismatch {
        /// Number of signing accounts.
        expected: usize,
        /// Number of signatures.
        actual: usize,
    },
    /// The other end of the transport is gone.
    #[display("the transport channel is closed")]
    ChannelClosed,
    /// Failed to decode a base58 string.
    #[from]
    Bs58Decoding(bs58::decode::Error),
    /// A signature did not verify.
    #[from]
    Crypto(crate::crypto::Error),
}

impl core::error::Error for Error {}
