// File: src/account/meta.rs
// Project: Supernode Client
// Creation date: Tuesday 13 October 2026
// Author: Vincent Berthier <vincent.berthier@posteo.org>
// -----
// Last modified: Wednesday 14 October 2026 @ 10:17:04
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

use tracing::{debug, instrument, trace};

use crate::crypto::Pubkey;

use super::types::{Capability, Writable};

/// A reference to an account as carried by an instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccountMeta {
    /// The address of the account.
    key: Pubkey,
    /// What the instruction may do with the account.
    capability: Capability,
}

impl AccountMeta {
    /// Create metadata for a signing account.
    ///
    /// # Parameters
    /// * `key` - The public key of the account,
    /// * `writable` - Whether the account is read-only or writable.
    ///
    /// # Returns
    /// Metadata for a signing account
    ///
    /// # Example
    /// ```rust
    /// # use supernode_client::crypto::{Keypair, Error};
    /// # use supernode_client::account::{Writable, AccountMeta};
    /// let key = Keypair::generate()?.pubkey();
    /// let meta = AccountMeta::signing(key, Writable::Yes);
    /// assert!(meta.is_signing());
    /// assert!(meta.is_writable());
    ///
    /// # Ok::<(), Error>(())
    /// ```
    #[must_use]
    pub fn signing(key: Pubkey, writable: Writable) -> Self {
        Self {
            key,
            capability: Capability::new(writable.into(), true),
        }
    }

    /// Create metadata for a non signing account: a user's wallet used as
    /// identification, a derived account or a program.
    ///
    /// # Example
    /// ```rust
    /// # use supernode_client::crypto::Pubkey;
    /// # use supernode_client::account::{Writable, AccountMeta};
    /// let meta = AccountMeta::new(Pubkey::from_bytes(&[3; 32]), Writable::No);
    /// assert!(!meta.is_signing());
    /// assert!(!meta.is_writable());
    /// ```
    #[must_use]
    pub fn new(key: Pubkey, writable: Writable) -> Self {
        Self {
            key,
            capability: Capability::new(writable.into(), false),
        }
    }

    /// Create metadata for a read-only, non signing account.
    #[must_use]
    pub const fn readonly(key: Pubkey) -> Self {
        Self::with_capability(key, Capability::READONLY)
    }

    /// Create metadata carrying exactly the given capability.
    #[must_use]
    pub const fn with_capability(key: Pubkey, capability: Capability) -> Self {
        Self { key, capability }
    }

    /// Merge the metadata of another reference to the same account.
    ///
    /// If one account is writable, the merge will be.
    /// If one account is a signer, the merge will be too.
    ///
    /// # Returns
    /// `false` (and nothing merged) if the two references point to different accounts.
    #[instrument(skip_all, fields(key = %self.key))]
    pub fn merge(&mut self, other: &Self) -> bool {
        if self.key != other.key {
            return false;
        }
        debug!("merging meta accounts");
        self.capability = self.capability.union(other.capability);
        true
    }

    /// Checks whether the account is a signing one or not.
    #[must_use]
    pub const fn is_signing(&self) -> bool {
        self.capability.signer
    }

    /// Checks whether the account is read-only or writable
    #[must_use]
    pub const fn is_writable(&self) -> bool {
        self.capability.writable
    }

    /// The capabilities carried by the reference.
    #[must_use]
    pub const fn capability(&self) -> Capability {
        self.capability
    }

    /// Get the account's public key
    #[must_use]
    pub const fn key(&self) -> &Pubkey {
        &self.key
    }
}

/// The distinct signing accounts of an account list, in order of first appearance.
///
/// Duplicate references are merged first, so an address that appears read-only
/// before it appears as a signer is ordered by its first slot.
#[must_use]
pub fn signers(accounts: &[AccountMeta]) -> Vec<Pubkey> {
    let mut merged: Vec<AccountMeta> = Vec::with_capacity(accounts.len());
    for meta in accounts {
        if !merged.iter_mut().any(|known| known.merge(meta)) {
            merged.push(*meta);
        }
    }
    trace!("{} distinct accounts", merged.len());
    merged
        .iter()
        .filter(|meta| meta.is_signing())
        .map(|meta| *meta.key())
        .collect()
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn merge_upgrades_capabilities() {
        // Given
        let key = Pubkey::from_bytes(&[9; 32]);
        let mut meta1 = AccountMeta::new(key, Writable::Yes);
        let meta2 = AccountMeta::signing(key, Writable::No);

        // When
        let merged = meta1.merge(&meta2);

        // Then
        assert!(merged);
        assert!(meta1.is_writable());
        assert!(meta1.is_signing());
    }

    #[test]
    fn merge_ignores_other_accounts() {
        // Given
        let mut meta1 = AccountMeta::readonly(Pubkey::from_bytes(&[1; 32]));
        let meta2 = AccountMeta::signing(Pubkey::from_bytes(&[2; 32]), Writable::Yes);

        // When
        let merged = meta1.merge(&meta2);

        // Then
        assert!(!merged);
        assert_eq!(meta1.capability(), Capability::READONLY);
    }

    #[test]
    fn signers_follow_first_appearance() {
        // Given
        let provider = Pubkey::from_bytes(&[1; 32]);
        let controller = Pubkey::from_bytes(&[2; 32]);
        let accounts = [
            AccountMeta::readonly(provider),
            AccountMeta::signing(controller, Writable::No),
            AccountMeta::new(controller, Writable::Yes),
            AccountMeta::signing(provider, Writable::Yes),
        ];

        // When
        let signers = signers(&accounts);

        // Then
        assert_eq!(signers, vec![provider, controller]);
    }
}
