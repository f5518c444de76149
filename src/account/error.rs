// File: src/account/error.rs
// Project: Supernode Client
// Creation date: Wednesday 14 October 2026
// Author: Vincent Berthier <vincent.berthier@posteo.org>
// -----
// Last modified: Wednesday 14 October 2026 @ 09:46:20
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

use derive_more::derive::Display;

use crate::crypto::Pubkey;

use super::Capability;

/// Errors of the account metadata model.
#[derive(Debug, Display)]
#[display("account error: {_variant}")]
pub enum Error {
    /// An account slot was left empty.
    #[display("missing account slot {index} ({name})")]
    MissingAccount {
        /// Position of the slot.
        index: usize,
        /// Name of the slot.
        name: &'static str,
    },
    /// The account given for a slot lacks a capability the slot requires.
    #[display("account slot {index} ({name}) must be {required}, got {key} as {actual}")]
    CapabilityMismatch {
        /// Position of the slot.
        index: usize,
        /// Name of the slot.
        name: &'static str,
        /// The account set in the slot.
        key: Pubkey,
        /// What the slot requires.
        required: Capability,
        /// What the account carries.
        actual: Capability,
    },
    /// The number of accounts does not match the number of slots.
    #[display("expected {expected} accounts, got {actual}")]
    AccountCountMismatch {
        /// Number of declared slots.
        expected: usize,
        /// Number of accounts given.
        actual: usize,
    },
    /// Tried to access a slot past the end of the list.
    #[display("slot {index} is out of range ({len} slots)")]
    SlotOutOfRange {
        /// Requested position.
        index: usize,
        /// Number of slots.
        len: usize,
    },
    /// No slot has the given name.
    #[display("no account slot named '{_0}'")]
    UnknownSlot(String),
}

impl core::error::Error for Error {}
