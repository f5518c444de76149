// File: src/program/instruction.rs
// Project: Supernode Client
// Creation date: Monday 12 October 2026
// Author: Vincent Berthier <vincent.berthier@posteo.org>
// -----
// Last modified: Thursday 15 October 2026 @ 13:56:41
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

//! Ready-made constructors for the common supernode instructions.
//!
//! Every derived account is computed from `program`; the caller supplies the
//! wallets and token accounts.

use crate::{
    account::{AccountMeta, Writable},
    crypto::Pubkey,
    instruction::{Instruction, InstructionBuilder, Result},
};

use super::InstructionKind;

/// The wallets involved when a provider stakes or unstakes a device.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProviderAccounts {
    /// The provider owning the device.
    pub provider: Pubkey,
    /// The wallet acting for the provider. It pays the stake.
    pub controller: Pubkey,
    /// The program administrator, co-signing.
    pub admin: Pubkey,
    /// The token mint.
    pub token: Pubkey,
    /// The provider's token account.
    pub provider_token_account: Pubkey,
}

fn admin_update(
    program: &Pubkey,
    kind: InstructionKind,
    admin: Pubkey,
    param: &str,
    value: u64,
) -> Result<Instruction> {
    let mut builder = InstructionBuilder::new(kind);
    builder
        .set_param(param, value)?
        .set_account("admin", admin)?
        .derive_addresses(program)?;
    builder.build(*program)
}

/// Create the program state and its token accounts.
///
/// # Parameters
/// * `program` - The supernode program,
/// * `admin` - The administrator, paying for the accounts,
/// * `token` - The token mint,
/// * `reward_locked_time` - How long rewards stay locked,
/// * `staking_coefficient` - The initial staking coefficient.
///
/// # Errors
/// If an address cannot be derived.
pub fn initialize(
    program: &Pubkey,
    admin: Pubkey,
    token: Pubkey,
    reward_locked_time: u64,
    staking_coefficient: u64,
) -> Result<Instruction> {
    let mut builder = InstructionBuilder::new(InstructionKind::Initialize);
    builder
        .set_param("reward_locked_time", reward_locked_time)?
        .set_param("staking_coefficient", staking_coefficient)?
        .set_account("token", token)?
        .set_account("admin", admin)?
        .derive_addresses(program)?;
    builder.build(*program)
}

/// Update the k value of a device spec.
///
/// # Errors
/// If an address cannot be derived.
pub fn update_k_value(program: &Pubkey, admin: Pubkey, spec_id: u16, val: u64) -> Result<Instruction> {
    let mut builder = InstructionBuilder::new(InstructionKind::UpdateKValue);
    builder
        .set_param("spec_id", spec_id)?
        .set_param("val", val)?
        .set_account("admin", admin)?
        .derive_addresses(program)?;
    builder.build(*program)
}

/// Update the reward locking time.
///
/// # Errors
/// If an address cannot be derived.
pub fn update_reward_lock_time(program: &Pubkey, admin: Pubkey, new: u64) -> Result<Instruction> {
    admin_update(program, InstructionKind::UpdateRewardLockTime, admin, "new", new)
}

/// Update the staking coefficient.
///
/// # Errors
/// If an address cannot be derived.
pub fn update_staking_coefficient(program: &Pubkey, admin: Pubkey, val: u64) -> Result<Instruction> {
    admin_update(program, InstructionKind::UpdateStakingCoefficient, admin, "val", val)
}

/// Stake a device.
///
/// # Parameters
/// * `program` - The supernode program,
/// * `accounts` - The wallets involved,
/// * `device_id` - The device being staked,
/// * `spec_id` - Its spec.
///
/// # Errors
/// If an address cannot be derived.
pub fn stake_device(
    program: &Pubkey,
    accounts: &ProviderAccounts,
    device_id: u64,
    spec_id: u64,
) -> Result<Instruction> {
    let mut builder = InstructionBuilder::new(InstructionKind::StakeDevice);
    builder
        .set_param("device_id", device_id)?
        .set_param("spec_id", spec_id)?
        .set_account("provider_token_account", accounts.provider_token_account)?
        .set_account("token", accounts.token)?
        .set_account("provider", accounts.provider)?
        .set_account("controller", accounts.controller)?
        .set_account("admin", accounts.admin)?
        .derive_addresses(program)?;
    builder.build(*program)
}

/// Unstake a device, scheduling the vesting of its stake.
///
/// # Errors
/// If an address cannot be derived.
pub fn unstake_device(
    program: &Pubkey,
    accounts: &ProviderAccounts,
    device_id: u64,
) -> Result<Instruction> {
    let mut builder = InstructionBuilder::new(InstructionKind::UnstakeDevice);
    builder
        .set_param("device_id", device_id)?
        .set_account("provider", accounts.provider)?
        .set_account("controller", accounts.controller)?
        .set_account("admin", accounts.admin)?
        .derive_addresses(program)?;
    builder.build(*program)
}

/// Pay rental fees as a tenant.
///
/// The administrator co-signs; the tenant pays and signs.
///
/// # Errors
/// If an address cannot be derived.
pub fn pay_rental_fee(
    program: &Pubkey,
    tenant: Pubkey,
    tenant_token_account: Pubkey,
    token: Pubkey,
    admin: Pubkey,
    amount: u64,
) -> Result<Instruction> {
    let mut builder = InstructionBuilder::new(InstructionKind::PayRentalFee);
    builder
        .set_param("amount", amount)?
        .set_account("tenant_token_account", tenant_token_account)?
        .set_account("token", token)?
        .set_slot(5, AccountMeta::signing(tenant, Writable::Yes))?
        .set_account("admin", admin)?
        .derive_addresses(program)?;
    builder.build(*program)
}
