// File: src/transport/mod.rs
// Project: Supernode Client
// Creation date: Tuesday 13 October 2026
// Author: Vincent Berthier <vincent.berthier@posteo.org>
// -----
// Last modified: Thursday 15 October 2026 @ 17:06:39
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

//! The crate does not talk to a network itself. It relies on three
//! collaborators: a [`Transport`] carrying submissions, a [`FreshnessSource`]
//! giving recent block hashes and a [`CredentialSource`] holding the keys of
//! the signing accounts.

use std::future::Future;

use crate::{
    account::{self, AccountMeta},
    crypto::{Keypair, Pubkey, Signature},
};

mod blockhash;
mod error;
mod loopback;
mod submitter;

pub use blockhash::{Blockhash, BLOCKHASH_LENGTH};
pub use error::Error;
pub use loopback::Loopback;
pub use submitter::Submitter;

/// Result type of the transport module.
pub type Result<T> = core::result::Result<T, Error>;

/// A signed instruction, ready to be sent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Submission {
    /// The program the instruction is sent to.
    pub program_id: Pubkey,
    /// The accounts of the instruction, in slot order.
    pub accounts: Vec<AccountMeta>,
    /// The instruction payload.
    pub data: Vec<u8>,
    /// The freshness token the signatures cover.
    pub blockhash: Blockhash,
    /// One signature per distinct signing account, in order of first appearance.
    pub signatures: Vec<Signature>,
}

impl Submission {
    /// The bytes every signer signs: the block hash then the payload.
    #[must_use]
    pub fn message(blockhash: &Blockhash, data: &[u8]) -> Vec<u8> {
        let mut message = Vec::with_capacity(BLOCKHASH_LENGTH + data.len());
        message.extend_from_slice(blockhash.as_ref());
        message.extend_from_slice(data);
        message
    }

    /// The distinct signing accounts, in the order they sign.
    #[must_use]
    pub fn signers(&self) -> Vec<Pubkey> {
        account::signers(&self.accounts)
    }
}

/// How far a submission went.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Status {
    /// Accepted, not yet executed.
    #[default]
    Pending,
    /// Executed successfully.
    Confirmed,
    /// Executed, and failed.
    Failed,
}

/// The answer of a transport to a submission.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Receipt {
    /// The first signature, identifying the submission.
    pub signature: Signature,
    /// Where the submission stands.
    pub status: Status,
}

/// Carries submissions to the program.
pub trait Transport {
    /// Send a submission.
    ///
    /// # Errors
    /// Whatever the transport fails with. Nothing is retried.
    fn submit(&self, submission: Submission) -> impl Future<Output = Result<Receipt>> + Send;
}

/// Gives the freshness token submissions are signed against.
pub trait FreshnessSource {
    /// The most recent block hash.
    ///
    /// # Errors
    /// If no block hash is available.
    fn recent_blockhash(&self) -> impl Future<Output = Result<Blockhash>> + Send;
}

/// Holds the private keys of signing accounts.
pub trait CredentialSource {
    /// The private key of an account, if held.
    fn credential(&self, key: &Pubkey) -> Option<&Keypair>;
}

impl CredentialSource for [Keypair] {
    fn credential(&self, key: &Pubkey) -> Option<&Keypair> {
        self.iter().find(|keypair| keypair.pubkey() == *key)
    }
}

impl<T> Transport for &T
where
    T: Transport + Sync + ?Sized,
{
    fn submit(&self, submission: Submission) -> impl Future<Output = Result<Receipt>> + Send {
        (**self).submit(submission)
    }
}

impl<F> FreshnessSource for &F
where
    F: FreshnessSource + Sync + ?Sized,
{
    fn recent_blockhash(&self) -> impl Future<Output = Result<Blockhash>> + Send {
        (**self).recent_blockhash()
    }
}
