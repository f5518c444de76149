// File: src/instruction/builder.rs
// Project: Supernode Client
// Creation date: Tuesday 13 October 2026
// Author: Vincent Berthier <vincent.berthier@posteo.org>
// -----
// Last modified: Friday 16 October 2026 @ 11:42:20
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

use crate::{
    account::{self, AccountMeta, AccountSlots},
    codec::Value,
    crypto::Pubkey,
    program::{InstructionKind, InstructionSpec},
};

use super::{Error, Instruction, Result};

/// Gathers the parameters and accounts of an instruction before encoding it.
///
/// Nothing is encoded until every parameter and every account slot is set,
/// and every account carries the capabilities its slot requires.
///
/// # Example
/// ```rust
/// # use supernode_client::Error;
/// # use supernode_client::crypto::Pubkey;
/// # use supernode_client::instruction::{registry, InstructionBuilder};
/// # use supernode_client::program::{InstructionKind, DEVNET_PROGRAM};
/// let admin = Pubkey::from_bytes(&[1; 32]);
/// let mut builder = InstructionBuilder::new(InstructionKind::UpdateKValue);
/// builder
///     .set_param("spec_id", 3_u16)?
///     .set_param("val", 1_000_u64)?
///     .set_account("admin", admin)?
///     .derive_addresses(&DEVNET_PROGRAM)?;
/// let instruction = builder.build(DEVNET_PROGRAM)?;
///
/// let decoded = registry::resolve(instruction.data(), instruction.accounts().to_vec())?;
/// assert_eq!(decoded.param("val").and_then(|v| v.as_u64()), Some(1_000));
///
/// # Ok::<(), Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct InstructionBuilder {
    spec: &'static InstructionSpec,
    params: Vec<Option<Value>>,
    accounts: AccountSlots,
}

impl InstructionBuilder {
    /// Start an instruction of the given kind, with well-known program slots pre-filled.
    #[must_use]
    pub fn new(kind: InstructionKind) -> Self {
        let spec = kind.spec();
        Self {
            spec,
            params: vec![None; spec.params().len()],
            accounts: AccountSlots::new(spec.accounts()),
        }
    }

    /// The kind of instruction being built.
    #[must_use]
    pub const fn kind(&self) -> InstructionKind {
        self.spec.kind()
    }

    /// Set a parameter by name.
    ///
    /// # Errors
    /// If the instruction has no such parameter, or the value has the wrong type.
    pub fn set_param<V>(&mut self, name: &str, value: V) -> Result<&mut Self>
    where
        V: Into<Value>,
    {
        let index = self.spec.param_index(name).ok_or_else(|| {
            warn!("{} has no parameter '{name}'", self.kind());
            Error::UnknownParam {
                kind: self.kind(),
                name: name.to_owned(),
            }
        })?;
        let field = &self.spec.params()[index];
        let value = value.into();
        if !field.schema().matches(&value) {
            warn!("wrong type for parameter '{name}'");
            return Err(Error::ParamTypeMismatch {
                name: field.name(),
                expected: field.schema().to_string(),
                actual: value.type_name(),
            });
        }
        trace!("setting parameter '{name}' to {value}");
        self.params[index] = Some(value);
        Ok(self)
    }

    /// Current value of a parameter.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&Value> {
        self.spec
            .param_index(name)
            .and_then(|index| self.params[index].as_ref())
    }

    /// Set an account slot by position, with the capabilities given by the caller.
    ///
    /// # Errors
    /// If the position is past the last slot.
    pub fn set_slot(&mut self, index: usize, meta: AccountMeta) -> Result<&mut Self> {
        self.accounts.set_slot(index, meta)?;
        Ok(self)
    }

    /// Set an account slot by name, with the capabilities the slot requires.
    ///
    /// # Errors
    /// If the instruction has no such slot.
    pub fn set_account(&mut self, name: &str, key: Pubkey) -> Result<&mut Self> {
        self.accounts.set_account(name, key)?;
        Ok(self)
    }

    /// Current content of a slot.
    #[must_use]
    pub fn get_slot(&self, index: usize) -> Option<&AccountMeta> {
        self.accounts.get_slot(index)
    }

    /// Fill every empty slot whose address derives from the program.
    ///
    /// Slots derived from a provider or tenant take the address set in the
    /// `provider` or `tenant` slot. Slots already set are left untouched.
    ///
    /// # Errors
    /// If a needed `provider` or `tenant` slot is empty, or a derivation fails.
    #[instrument(skip_all, fields(kind = %self.kind(), %program))]
    pub fn derive_addresses(&mut self, program: &Pubkey) -> Result<&mut Self> {
        debug!("deriving account addresses");
        for (index, spec) in self.spec.accounts().iter().enumerate() {
            let Some(recipe) = spec.derivation() else {
                continue;
            };
            if self.accounts.get_slot(index).is_some() {
                trace!("slot {index} ({}) already set", spec.name());
                continue;
            }
            let path = match recipe.path() {
                Some(seed) => {
                    let name = seed.slot();
                    let position = self.accounts.position(name)?;
                    let Some(meta) = self.accounts.get_slot(position) else {
                        warn!("slot '{name}' is needed to derive '{}'", spec.name());
                        return Err(account::Error::MissingAccount {
                            index: position,
                            name: self.spec.accounts()[position].name(),
                        }
                        .into());
                    };
                    Some(*meta.key())
                }
                None => None,
            };
            let address = recipe.address(program, path.as_ref())?;
            trace!("slot {index} ({}) derived to {address}", spec.name());
            self.accounts
                .set_slot(index, AccountMeta::with_capability(address, spec.required()))?;
        }
        Ok(self)
    }

    /// Check the instruction is complete: parameters first, in declaration
    /// order, then account slots in slot order.
    ///
    /// # Errors
    /// On the first missing parameter or account, or the first account lacking a capability.
    #[instrument(skip_all, fields(kind = %self.kind()))]
    pub fn validate(&self) -> Result<()> {
        debug!("validating instruction");
        self.check_params()?;
        self.accounts.validate()?;
        Ok(())
    }

    fn check_params(&self) -> Result<()> {
        if let Some((index, field)) = self
            .spec
            .params()
            .iter()
            .enumerate()
            .find(|(index, _)| self.params[*index].is_none())
        {
            warn!("parameter {index} ({}) is not set", field.name());
            return Err(Error::MissingParam {
                index,
                name: field.name(),
            });
        }
        Ok(())
    }

    /// Validate and encode the instruction.
    ///
    /// # Parameters
    /// * `program_id` - The program the instruction is sent to.
    ///
    /// # Returns
    /// The payload (discriminator then parameters) with the ordered account list.
    ///
    /// # Errors
    /// If validation fails. No bytes are produced in that case.
    #[instrument(skip_all, fields(kind = %self.kind(), %program_id))]
    pub fn build(&self, program_id: Pubkey) -> Result<Instruction> {
        self.check_params()?;
        let accounts = self.accounts.to_metas()?;
        debug!("encoding instruction");
        let mut data = self.spec.discriminator().to_bytes().to_vec();
        for (field, value) in self.spec.params().iter().zip(self.params.iter().flatten()) {
            trace!("encoding parameter '{}'", field.name());
            field.schema().encode_into(value, &mut data)?;
        }
        Ok(Instruction::new(program_id, self.kind(), accounts, data))
    }
}
