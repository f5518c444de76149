// File: src/lib.rs
// Project: Supernode Client
// Creation date: Wednesday 14 October 2026
// Author: Vincent Berthier <vincent.berthier@posteo.org>
// -----
// Last modified: Thursday 15 October 2026 @ 10:13:15
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

//! Client side codec for the supernode staking program.
//!
//! It builds and validates instruction payloads, derives the program's
//! accounts, decodes its accounts and events, and scans transactions for
//! its instructions. Sending is left to a [`transport::Transport`].

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![warn(missing_docs)]

/// Errors that can happen anywhere in the client.
mod error;

/// Account metadata and the positional slots of instructions.
pub mod account;
/// The binary codec shared by instructions, accounts and events.
pub mod codec;
/// Keys, signatures and address derivation.
pub mod crypto;
/// Building, decoding and scanning instructions.
pub mod instruction;
/// Static description of the supernode program.
pub mod program;
/// Accounts and events of the supernode program.
pub mod state;
/// Sending signed instructions.
pub mod transport;

pub use error::Error;
