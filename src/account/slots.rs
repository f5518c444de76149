// File: src/account/slots.rs
// Project: Supernode Client
// Creation date: Tuesday 13 October 2026
// Author: Vincent Berthier <vincent.berthier@posteo.org>
// -----
// Last modified: Thursday 15 October 2026 @ 17:24:30
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

use tracing::{debug, instrument, trace, warn};

use crate::{crypto::Pubkey, program::Pda};

use super::{AccountMeta, Capability, Error, Result};

/// Static description of one position in an instruction's account list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlotSpec {
    name: &'static str,
    required: Capability,
    default: Option<Pubkey>,
    derivation: Option<Pda>,
}

impl SlotSpec {
    /// A slot the caller has to fill.
    #[must_use]
    pub const fn new(name: &'static str, required: Capability) -> Self {
        Self {
            name,
            required,
            default: None,
            derivation: None,
        }
    }

    /// A read-only slot pre-filled with a well-known address.
    #[must_use]
    pub const fn fixed(name: &'static str, address: Pubkey) -> Self {
        Self {
            name,
            required: Capability::READONLY,
            default: Some(address),
            derivation: None,
        }
    }

    /// A slot whose address can be derived from the program and seeds.
    #[must_use]
    pub const fn derived(name: &'static str, required: Capability, recipe: Pda) -> Self {
        Self {
            name,
            required,
            default: None,
            derivation: Some(recipe),
        }
    }

    /// Name of the slot.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Minimum capability an account needs to fill the slot.
    #[must_use]
    pub const fn required(&self) -> Capability {
        self.required
    }

    /// The well-known address pre-filling the slot, if any.
    #[must_use]
    pub const fn default_address(&self) -> Option<&Pubkey> {
        self.default.as_ref()
    }

    /// The recipe deriving the slot's address, if any.
    #[must_use]
    pub const fn derivation(&self) -> Option<Pda> {
        self.derivation
    }
}

/// A fixed-length, positional list of account slots.
///
/// Slots with a well-known address start filled (read-only, non signing)
/// and can be overridden. Every other slot stays empty until set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccountSlots {
    specs: &'static [SlotSpec],
    accounts: Vec<Option<AccountMeta>>,
}

impl AccountSlots {
    /// Create the slot list of an instruction, pre-filling well-known addresses.
    ///
    /// # Example
    /// ```rust
    /// # use supernode_client::account::{AccountSlots, Capability, SlotSpec};
    /// # use supernode_client::program::SYSTEM_PROGRAM;
    /// static SPECS: [SlotSpec; 2] = [
    ///     SlotSpec::new("admin", Capability::SIGNER),
    ///     SlotSpec::fixed("system_program", SYSTEM_PROGRAM),
    /// ];
    /// let slots = AccountSlots::new(&SPECS);
    /// assert!(slots.get_slot(0).is_none());
    /// assert_eq!(slots.get_slot(1).map(|meta| *meta.key()), Some(SYSTEM_PROGRAM));
    /// ```
    #[must_use]
    pub fn new(specs: &'static [SlotSpec]) -> Self {
        let accounts = specs
            .iter()
            .map(|spec| spec.default.map(AccountMeta::readonly))
            .collect();
        Self { specs, accounts }
    }

    /// Bind an externally resolved account list positionally onto the slots.
    ///
    /// # Errors
    /// If the list does not have exactly one account per slot.
    #[instrument(skip_all)]
    pub fn bind(specs: &'static [SlotSpec], accounts: Vec<AccountMeta>) -> Result<Self> {
        debug!("binding {} accounts onto {} slots", accounts.len(), specs.len());
        if accounts.len() != specs.len() {
            warn!("account list does not match the slots");
            return Err(Error::AccountCountMismatch {
                expected: specs.len(),
                actual: accounts.len(),
            });
        }
        Ok(Self {
            specs,
            accounts: accounts.into_iter().map(Some).collect(),
        })
    }

    /// Number of slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Whether the instruction takes no account at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// The static description of the slots.
    #[must_use]
    pub const fn specs(&self) -> &'static [SlotSpec] {
        self.specs
    }

    /// Set a slot by position. Capabilities are checked at validation time.
    ///
    /// # Errors
    /// If the position is past the last slot.
    pub fn set_slot(&mut self, index: usize, meta: AccountMeta) -> Result<()> {
        let len = self.accounts.len();
        let slot = self.accounts.get_mut(index).ok_or_else(|| {
            warn!("slot {index} is out of range");
            Error::SlotOutOfRange { index, len }
        })?;
        trace!("setting slot {index} to {}", meta.key());
        *slot = Some(meta);
        Ok(())
    }

    /// The account set in a slot, if any.
    #[must_use]
    pub fn get_slot(&self, index: usize) -> Option<&AccountMeta> {
        self.accounts.get(index).and_then(Option::as_ref)
    }

    /// Position of the slot with the given name.
    ///
    /// # Errors
    /// If no slot has this name.
    pub fn position(&self, name: &str) -> Result<usize> {
        self.specs
            .iter()
            .position(|spec| spec.name == name)
            .ok_or_else(|| Error::UnknownSlot(name.to_owned()))
    }

    /// Set a slot by name, giving the account exactly the capability the slot requires.
    ///
    /// # Errors
    /// If no slot has this name.
    pub fn set_account(&mut self, name: &str, key: Pubkey) -> Result<()> {
        let index = self.position(name)?;
        let required = self.specs[index].required;
        self.set_slot(index, AccountMeta::with_capability(key, required))
    }

    /// The account set in the slot with the given name, if any.
    #[must_use]
    pub fn get_account(&self, name: &str) -> Option<&AccountMeta> {
        self.position(name).ok().and_then(|index| self.get_slot(index))
    }

    /// Check every slot in order.
    ///
    /// # Errors
    /// On the first slot that is empty, or whose account lacks a required capability.
    #[instrument(skip_all)]
    pub fn validate(&self) -> Result<()> {
        debug!("validating {} account slots", self.len());
        for (index, (spec, account)) in self.specs.iter().zip(&self.accounts).enumerate() {
            let Some(account) = account else {
                warn!("slot {index} ({}) is empty", spec.name);
                return Err(Error::MissingAccount {
                    index,
                    name: spec.name,
                });
            };
            if !account.capability().covers(spec.required) {
                warn!("slot {index} ({}) lacks a capability", spec.name);
                return Err(Error::CapabilityMismatch {
                    index,
                    name: spec.name,
                    key: *account.key(),
                    required: spec.required,
                    actual: account.capability(),
                });
            }
        }
        Ok(())
    }

    /// The validated, ordered account list.
    ///
    /// # Errors
    /// Same as [`AccountSlots::validate`].
    pub fn to_metas(&self) -> Result<Vec<AccountMeta>> {
        self.validate()?;
        Ok(self.accounts.iter().flatten().copied().collect())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use test_log::test;

    use crate::{account::Writable, program::TOKEN_PROGRAM};

    use super::*;
    type TestResult = core::result::Result<(), Box<dyn core::error::Error>>;

    static SPECS: [SlotSpec; 4] = [
        SlotSpec::derived("supernode", Capability::WRITABLE, Pda::Supernode),
        SlotSpec::new("provider", Capability::READONLY),
        SlotSpec::new("controller", Capability::WRITABLE_SIGNER),
        SlotSpec::fixed("token_program", TOKEN_PROGRAM),
    ];

    fn key(n: u8) -> Pubkey {
        Pubkey::from_bytes(&[n; 32])
    }

    #[test]
    fn well_known_addresses_are_prefilled() {
        // When
        let slots = AccountSlots::new(&SPECS);

        // Then
        assert_eq!(slots.len(), 4);
        assert!(slots.get_slot(0).is_none());
        assert_eq!(slots.get_slot(3), Some(&AccountMeta::readonly(TOKEN_PROGRAM)));
    }

    #[test]
    fn report_first_missing_slot() -> TestResult {
        // Given
        let mut slots = AccountSlots::new(&SPECS);
        slots.set_account("supernode", key(1))?;

        // When
        let res = slots.validate();

        // Then
        assert!(matches!(
            res,
            Err(Error::MissingAccount { index: 1, name: "provider" })
        ));

        Ok(())
    }

    #[test]
    fn capabilities_are_not_upgraded() -> TestResult {
        // Given
        let mut slots = AccountSlots::new(&SPECS);
        slots.set_account("supernode", key(1))?;
        slots.set_account("provider", key(2))?;
        slots.set_slot(2, AccountMeta::signing(key(3), Writable::No))?;

        // When
        let res = slots.to_metas();

        // Then
        assert!(matches!(
            res,
            Err(Error::CapabilityMismatch { index: 2, required, .. }) if required == Capability::WRITABLE_SIGNER
        ));

        Ok(())
    }

    #[test]
    fn extra_capabilities_are_accepted() -> TestResult {
        // Given
        let mut slots = AccountSlots::new(&SPECS);
        slots.set_account("supernode", key(1))?;
        slots.set_slot(1, AccountMeta::signing(key(2), Writable::Yes))?;
        slots.set_account("controller", key(3))?;

        // When
        let metas = slots.to_metas()?;

        // Then
        assert_eq!(metas.len(), 4);
        assert!(metas[1].is_signing());
        assert_eq!(*metas[3].key(), TOKEN_PROGRAM);

        Ok(())
    }

    #[test]
    fn bind_requires_matching_length() {
        // Given
        let accounts = vec![AccountMeta::readonly(key(1)); 3];

        // When
        let res = AccountSlots::bind(&SPECS, accounts);

        // Then
        assert!(matches!(
            res,
            Err(Error::AccountCountMismatch { expected: 4, actual: 3 })
        ));
    }

    #[test]
    fn out_of_range_and_unknown_slots() {
        // Given
        let mut slots = AccountSlots::new(&SPECS);

        // When
        let out_of_range = slots.set_slot(4, AccountMeta::readonly(key(1)));
        let unknown = slots.set_account("admin", key(1));

        // Then
        assert!(matches!(out_of_range, Err(Error::SlotOutOfRange { index: 4, len: 4 })));
        assert!(matches!(unknown, Err(Error::UnknownSlot(name)) if name == "admin"));
    }
}
