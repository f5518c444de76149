// File: src/transport/loopback.rs
// Project: Supernode Client
// Creation date: Monday 12 October 2026
// Author: Vincent Berthier <vincent.berthier@posteo.org>
// -----
// Last modified: Thursday 15 October 2026 @ 17:21:35
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

use async_channel::{unbounded, Receiver, Sender};
use tokio::sync::Mutex;
use tracing::{debug, instrument, trace, warn};

use crate::instruction::Entry;

use super::{
    Blockhash, Error, FreshnessSource, Receipt, Result, Status, Submission, Transport,
};

/// An in-process transport.
///
/// It checks submissions the way a validator would (recent block hash,
/// one valid signature per signing account) and queues every accepted one
/// as a scanner [`Entry`].
#[derive(Debug)]
pub struct Loopback {
    blockhash: Mutex<Blockhash>,
    sender: Sender<Entry>,
    receiver: Receiver<Entry>,
}

impl Default for Loopback {
    fn default() -> Self {
        Self::new()
    }
}

impl Loopback {
    /// Create a loopback transport with an empty queue.
    #[must_use]
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self {
            blockhash: Mutex::new(Blockhash::default().next()),
            sender,
            receiver,
        }
    }

    /// Move to the next block: submissions signed before are now stale.
    pub async fn advance(&self) -> Blockhash {
        let mut current = self.blockhash.lock().await;
        *current = current.next();
        debug!("new block hash {}", *current);
        *current
    }

    /// A receiving end of the queue of accepted submissions.
    #[must_use]
    pub fn entries(&self) -> Receiver<Entry> {
        self.receiver.clone()
    }

    /// Take every queued entry, in order of acceptance.
    #[must_use]
    pub fn drain(&self) -> Vec<Entry> {
        let mut entries = Vec::new();
        while let Ok(entry) = self.receiver.try_recv() {
            entries.push(entry);
        }
        trace!("drained {} entries", entries.len());
        entries
    }
}

impl FreshnessSource for Loopback {
    async fn recent_blockhash(&self) -> Result<Blockhash> {
        Ok(*self.blockhash.lock().await)
    }
}

impl Transport for Loopback {
    #[instrument(skip_all, fields(program = %submission.program_id))]
    async fn submit(&self, submission: Submission) -> Result<Receipt> {
        debug!("received submission");
        let current = *self.blockhash.lock().await;
        if submission.blockhash != current {
            warn!("submission signed against {}", submission.blockhash);
            return Err(Error::StaleBlockhash {
                blockhash: submission.blockhash,
            });
        }

        let signers = submission.signers();
        if signers.len() != submission.signatures.len() {
            warn!("signatures do not match the signing accounts");
            return Err(Error::SignaturesMismatch {
                expected: signers.len(),
                actual: submission.signatures.len(),
            });
        }
        let message = Submission::message(&submission.blockhash, &submission.data);
        for (key, signature) in signers.iter().zip(&submission.signatures) {
            trace!("checking signature of {key}");
            signature.verify(key, &message)?;
        }

        let Some(signature) = submission.signatures.first().copied() else {
            warn!("unsigned submission");
            return Err(Error::NoSigners);
        };
        self.sender
            .send(Entry {
                program_id: submission.program_id,
                data: submission.data,
                accounts: submission.accounts,
            })
            .await
            .map_err(|_err| {
                warn!("the loopback queue is closed");
                Error::ChannelClosed
            })?;
        Ok(Receipt {
            signature,
            status: Status::Confirmed,
        })
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use test_log::test;

    use crate::{
        crypto::{self, Keypair},
        program::{instruction as supernode, DEVNET_PROGRAM},
    };

    use super::*;
    type TestResult = core::result::Result<(), Box<dyn core::error::Error>>;

    async fn signed(loopback: &Loopback, signer: &Keypair) -> core::result::Result<Submission, Box<dyn core::error::Error>> {
        let instruction = supernode::update_reward_lock_time(&DEVNET_PROGRAM, signer.pubkey(), 60)?;
        let blockhash = loopback.recent_blockhash().await?;
        let message = Submission::message(&blockhash, instruction.data());
        Ok(Submission {
            program_id: DEVNET_PROGRAM,
            accounts: instruction.accounts().to_vec(),
            data: instruction.data().to_vec(),
            blockhash,
            signatures: vec![signer.sign(message)],
        })
    }

    #[test(tokio::test)]
    async fn accepted_submissions_are_queued() -> TestResult {
        // Given
        let admin = Keypair::generate()?;
        let loopback = Loopback::new();
        let submission = signed(&loopback, &admin).await?;

        // When
        let receipt = loopback.submit(submission.clone()).await?;

        // Then
        assert_eq!(receipt.signature, submission.signatures[0]);
        let entry = loopback.entries().recv().await?;
        assert_eq!(entry.data, submission.data);
        assert_eq!(entry.accounts, submission.accounts);

        Ok(())
    }

    #[test(tokio::test)]
    async fn stale_submissions_are_refused() -> TestResult {
        // Given
        let admin = Keypair::generate()?;
        let loopback = Loopback::new();
        let submission = signed(&loopback, &admin).await?;

        // When
        let fresh = loopback.advance().await;
        let res = loopback.submit(submission.clone()).await;

        // Then
        assert_ne!(fresh, submission.blockhash);
        assert!(matches!(res, Err(Error::StaleBlockhash { .. })));
        assert!(loopback.drain().is_empty());

        Ok(())
    }

    #[test(tokio::test)]
    async fn forged_signatures_are_refused() -> TestResult {
        // Given
        let admin = Keypair::generate()?;
        let forger = Keypair::generate()?;
        let loopback = Loopback::new();
        let mut submission = signed(&loopback, &admin).await?;
        submission.signatures = vec![forger.sign(Submission::message(
            &submission.blockhash,
            &submission.data,
        ))];

        // When
        let res = loopback.submit(submission.clone()).await;
        submission.signatures.clear();
        let unsigned = loopback.submit(submission).await;

        // Then
        assert!(matches!(res, Err(Error::Crypto(crypto::Error::Signature(_)))));
        assert!(matches!(
            unsigned,
            Err(Error::SignaturesMismatch { expected: 1, actual: 0 })
        ));

        Ok(())
    }
}
