// File: src/instruction/error.rs
// Project: Supernode Client
// Creation date: Tuesday 13 October 2026
// Author: Vincent Berthier <vincent.berthier@posteo.org>
// -----
// Last modified: Thursday 15 October 2026 @ 15:41:04
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

use crate::{codec::Discriminator, program::InstructionKind};

/// Errors of the instruction registry.
#[derive(Debug, Display, From)]
#[display("instruction error: {_variant}")]
pub enum Error {
    /// A parameter was left unset.
    #[display("missing parameter {index} ({name})")]
    MissingParam {
        /// Position of the parameter.
        index: usize,
        /// Name of the parameter.
        name: &'static str,
    },
    /// A parameter was given a value of the wrong type.
    #[display("parameter '{name}' must be a {expected}, got a {actual}")]
    ParamTypeMismatch {
        /// Name of the parameter.
        name: &'static str,
        /// Its declared type.
        expected: String,
        /// The type of the given value.
        actual: &'static str,
    },
    /// The instruction has no parameter with this name.
    #[display("{kind} takes no parameter named '{name}'")]
    UnknownParam {
        /// The instruction.
        kind: InstructionKind,
        /// The requested name.
        name: String,
    },
    /// No known instruction is tagged with the payload's discriminator.
    #[display("no instruction is tagged {discriminator}")]
    UnknownInstruction {
        /// The leading bytes of the payload.
        discriminator: Discriminator,
    },
    /// The instruction is known to the program but its layout is not published.
    #[display("the layout of '{name}' is not published")]
    SchemaUnavailable {
        /// Name of the instruction.
        name: &'static str,
    },
    /// An entry of a scanned batch failed to resolve.
    #[display("entry #{position} of the batch: {cause}")]
    Scan {
        /// Position of the entry in the batch.
        position: usize,
        /// Why it failed.
        cause: Box<Error>,
    },
    /// An error of the account slots.
    #[from]
    Account(crate::account::Error),
    /// An error of the binary codec.
    #[from]
    Codec(crate::codec::Error),
    /// An error while deriving an address.
    #[from]
    Crypto(crate::crypto::Error),
}

impl core::error::Error for Error {}
