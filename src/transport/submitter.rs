// File: src/transport/submitter.rs
// Project: Supernode Client
// Creation date: Tuesday 13 October 2026
// Author: Vincent Berthier <vincent.berthier@posteo.org>
// -----
// Last modified: Tuesday 13 October 2026 @ 16:32:00
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

use tracing::{debug, instrument, warn};

use crate::instruction::Instruction;

use super::{
    CredentialSource, Error, FreshnessSource, Receipt, Result, Submission, Transport,
};

/// Signs built instructions and hands them over to a transport.
#[derive(Debug)]
pub struct Submitter<T, F> {
    transport: T,
    freshness: F,
}

impl<T, F> Submitter<T, F>
where
    T: Transport,
    F: FreshnessSource,
{
    /// Create a submitter.
    ///
    /// # Parameters
    /// * `transport` - Where the submissions go,
    /// * `freshness` - Where the block hashes come from.
    #[must_use]
    pub const fn new(transport: T, freshness: F) -> Self {
        Self {
            transport,
            freshness,
        }
    }

    /// The transport in use.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Sign an instruction with a fresh block hash and send it.
    ///
    /// Every credential is looked up before anything is fetched or sent.
    ///
    /// # Errors
    /// If a signing account has no credential, the instruction has no signer,
    /// or the collaborators fail.
    #[instrument(skip_all, fields(kind = %instruction.kind(), program = %instruction.program()))]
    pub async fn submit<C>(&self, instruction: &Instruction, credentials: &C) -> Result<Receipt>
    where
        C: CredentialSource + ?Sized,
    {
        debug!("submitting instruction");
        let keys = instruction
            .signers()
            .into_iter()
            .map(|key| {
                credentials.credential(&key).ok_or_else(|| {
                    warn!("no credential for {key}");
                    Error::MissingCredential { key }
                })
            })
            .collect::<Result<Vec<_>>>()?;
        if keys.is_empty() {
            warn!("nobody signs the instruction");
            return Err(Error::NoSigners);
        }

        let blockhash = self.freshness.recent_blockhash().await?;
        debug!("signing against {blockhash}");
        let message = Submission::message(&blockhash, instruction.data());
        let signatures = keys.iter().map(|key| key.sign(&message)).collect();

        self.transport
            .submit(Submission {
                program_id: *instruction.program(),
                accounts: instruction.accounts().to_vec(),
                data: instruction.data().to_vec(),
                blockhash,
                signatures,
            })
            .await
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use test_log::test;

    use crate::{
        account::AccountMeta,
        crypto::{Keypair, Pubkey},
        instruction::scan,
        program::{instruction as supernode, InstructionKind, DEVNET_PROGRAM},
        transport::{Loopback, Status},
    };

    use super::*;
    type TestResult = core::result::Result<(), Box<dyn core::error::Error>>;

    #[test(tokio::test)]
    async fn submit_through_the_loopback() -> TestResult {
        // Given
        let admin = Keypair::generate()?;
        let loopback = Loopback::new();
        let submitter = Submitter::new(&loopback, &loopback);
        let instruction = supernode::update_staking_coefficient(&DEVNET_PROGRAM, admin.pubkey(), 4)?;

        // When
        let receipt = submitter.submit(&instruction, &[admin][..]).await?;

        // Then
        assert_eq!(receipt.status, Status::Confirmed);
        let decoded = scan(loopback.drain(), &DEVNET_PROGRAM)?;
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].kind(), InstructionKind::UpdateStakingCoefficient);

        Ok(())
    }

    #[test(tokio::test)]
    async fn admin_acting_as_provider_signs_once() -> TestResult {
        // Given
        let admin = Keypair::generate()?;
        let controller = Keypair::generate()?;
        let accounts = supernode::ProviderAccounts {
            provider: admin.pubkey(),
            controller: controller.pubkey(),
            admin: admin.pubkey(),
            token: Pubkey::from_bytes(&[4; 32]),
            provider_token_account: Pubkey::from_bytes(&[5; 32]),
        };
        let instruction = supernode::stake_device(&DEVNET_PROGRAM, &accounts, 11, 2)?;
        let loopback = Loopback::new();
        let submitter = Submitter::new(&loopback, &loopback);

        // When
        let receipt = submitter
            .submit(&instruction, &[admin, controller][..])
            .await?;

        // Then
        assert_eq!(receipt.status, Status::Confirmed);
        let entries = loopback.drain();
        assert_eq!(entries.len(), 1);
        assert_eq!(scan(entries, &DEVNET_PROGRAM)?[0].kind(), InstructionKind::StakeDevice);

        Ok(())
    }

    #[test(tokio::test)]
    async fn every_signer_needs_a_credential() -> TestResult {
        // Given
        let admin = Keypair::generate()?;
        let stranger = Keypair::generate()?;
        let loopback = Loopback::new();
        let submitter = Submitter::new(&loopback, &loopback);
        let instruction = supernode::update_k_value(&DEVNET_PROGRAM, admin.pubkey(), 1, 2)?;

        // When
        let res = submitter.submit(&instruction, &[stranger][..]).await;

        // Then
        assert!(matches!(res, Err(Error::MissingCredential { key }) if key == admin.pubkey()));
        assert!(loopback.drain().is_empty());

        Ok(())
    }

    #[test(tokio::test)]
    async fn unsigned_instructions_are_refused() -> TestResult {
        // Given
        let loopback = Loopback::new();
        let submitter = Submitter::new(&loopback, &loopback);
        let accounts = vec![AccountMeta::readonly(Pubkey::from_bytes(&[1; 32]))];
        let instruction = Instruction::new(DEVNET_PROGRAM, InstructionKind::Release, accounts, vec![]);
        let no_keys: [Keypair; 0] = [];

        // When
        let res = submitter.submit(&instruction, &no_keys[..]).await;

        // Then
        assert!(matches!(res, Err(Error::NoSigners)));

        Ok(())
    }
}
