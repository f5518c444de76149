// File: src/instruction/instruction.rs
// Project: Supernode Client
// Creation date: Thursday 15 October 2026
// Author: Vincent Berthier <vincent.berthier@posteo.org>
// -----
// Last modified: Thursday 15 October 2026 @ 12:13:48
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

use crate::{
    account::{self, AccountMeta, AccountSlots},
    codec::Value,
    crypto::Pubkey,
    program::InstructionKind,
};

/// A validated instruction: payload bytes and account list, ready to be submitted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instruction {
    /// Public key of the program to run.
    program_id: Pubkey,
    /// The instruction encoded in the payload.
    kind: InstructionKind,
    /// List of accounts expected by the instruction.
    accounts: Vec<AccountMeta>,
    /// Discriminator followed by the parameters.
    data: Vec<u8>,
}

impl Instruction {
    pub(crate) const fn new(
        program_id: Pubkey,
        kind: InstructionKind,
        accounts: Vec<AccountMeta>,
        data: Vec<u8>,
    ) -> Self {
        Self {
            program_id,
            kind,
            accounts,
            data,
        }
    }

    /// Get the instruction's payload
    #[mutants::skip]
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Get the executing program's public key.
    #[must_use]
    pub const fn program(&self) -> &Pubkey {
        &self.program_id
    }

    /// The kind of instruction.
    #[must_use]
    pub const fn kind(&self) -> InstructionKind {
        self.kind
    }

    /// Get the list of accounts expected by the instruction.
    #[must_use]
    pub fn accounts(&self) -> &[AccountMeta] {
        &self.accounts
    }

    /// The distinct signing accounts, in order of first appearance.
    ///
    /// The same address can fill several slots; it only has to sign once.
    #[must_use]
    pub fn signers(&self) -> Vec<Pubkey> {
        account::signers(&self.accounts)
    }
}

/// An instruction rebuilt from a payload and its resolved accounts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedInstruction {
    kind: InstructionKind,
    params: Vec<Value>,
    accounts: AccountSlots,
}

impl DecodedInstruction {
    pub(crate) const fn new(kind: InstructionKind, params: Vec<Value>, accounts: AccountSlots) -> Self {
        Self {
            kind,
            params,
            accounts,
        }
    }

    /// The kind of instruction.
    #[must_use]
    pub const fn kind(&self) -> InstructionKind {
        self.kind
    }

    /// Parameter values, in declaration order.
    #[must_use]
    pub fn params(&self) -> &[Value] {
        &self.params
    }

    /// Value of a parameter by name.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&Value> {
        self.kind
            .spec()
            .param_index(name)
            .and_then(|index| self.params.get(index))
    }

    /// The accounts bound onto the instruction's slots.
    #[must_use]
    pub const fn accounts(&self) -> &AccountSlots {
        &self.accounts
    }

    /// Account bound to a slot by name.
    #[must_use]
    pub fn account(&self, name: &str) -> Option<&AccountMeta> {
        self.accounts.get_account(name)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use test_log::test;

    use crate::account::Writable;

    use super::*;

    #[test]
    fn signers_are_deduplicated() {
        // Given
        let provider = Pubkey::from_bytes(&[1; 32]);
        let admin = Pubkey::from_bytes(&[2; 32]);
        let instruction = Instruction::new(
            Pubkey::from_bytes(&[9; 32]),
            InstructionKind::Releasable,
            vec![
                AccountMeta::new(provider, Writable::No),
                AccountMeta::signing(admin, Writable::No),
                AccountMeta::signing(provider, Writable::Yes),
                AccountMeta::signing(admin, Writable::Yes),
            ],
            Vec::new(),
        );

        // When
        let signers = instruction.signers();

        // Then
        assert_eq!(signers, vec![provider, admin]);
    }
}
