// File: src/program/kind.rs
// Project: Supernode Client
// Creation date: Monday 12 October 2026
// Author: Vincent Berthier <vincent.berthier@posteo.org>
// -----
// Last modified: Wednesday 14 October 2026 @ 16:07:43
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

use std::{
    collections::HashMap,
    fmt::{self, Display},
    sync::LazyLock,
};

use crate::{
    account::{Capability, SlotSpec},
    codec::{Discriminator, Field, Schema},
};

use super::{Pda, ASSOCIATED_TOKEN_PROGRAM, SYSTEM_PROGRAM, TOKEN_PROGRAM};

/// The instructions of the supernode program with a known layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InstructionKind {
    /// Claim staking rewards.
    ClaimReward,
    /// Create the reward token account.
    InitRewardAccount,
    /// Create the program state and its token accounts.
    Initialize,
    /// Pay rental fees as a tenant.
    PayRentalFee,
    /// Compute the vested tokens that can be released.
    Releasable,
    /// Release vested tokens.
    Release,
    /// Remove an extra controller of a provider.
    RemoveExtraController,
    /// Replace an extra controller of a provider.
    ReplaceExtraController,
    /// Stake a device.
    StakeDevice,
    /// Unstake a device, scheduling the vesting of its stake.
    UnstakeDevice,
    /// Update the k value of a device spec.
    UpdateKValue,
    /// Update the reward locking time.
    UpdateRewardLockTime,
    /// Update the staking coefficient.
    UpdateStakingCoefficient,
    /// Withdraw rental fees as a tenant.
    WithdrawRentalFee,
}

/// Static layout of an instruction: its tag, parameters and account slots.
#[derive(Debug)]
pub struct InstructionSpec {
    kind: InstructionKind,
    name: &'static str,
    discriminator: Discriminator,
    params: &'static [Field],
    accounts: &'static [SlotSpec],
}

impl InstructionSpec {
    /// The kind described.
    #[must_use]
    pub const fn kind(&self) -> InstructionKind {
        self.kind
    }

    /// Snake case name, as hashed into the discriminator.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Tag at the start of the payload.
    #[must_use]
    pub const fn discriminator(&self) -> Discriminator {
        self.discriminator
    }

    /// Parameters, in wire order.
    #[must_use]
    pub const fn params(&self) -> &'static [Field] {
        self.params
    }

    /// Account slots, in wire order.
    #[must_use]
    pub const fn accounts(&self) -> &'static [SlotSpec] {
        self.accounts
    }

    /// Position of a parameter.
    #[must_use]
    pub fn param_index(&self, name: &str) -> Option<usize> {
        self.params.iter().position(|field| field.name() == name)
    }
}

const RO: Capability = Capability::READONLY;
const W: Capability = Capability::WRITABLE;
const S: Capability = Capability::SIGNER;
const WS: Capability = Capability::WRITABLE_SIGNER;

const fn slot(name: &'static str, required: Capability) -> SlotSpec {
    SlotSpec::new(name, required)
}

const fn pda(name: &'static str, required: Capability, recipe: Pda) -> SlotSpec {
    SlotSpec::derived(name, required, recipe)
}

const TOKEN: SlotSpec = SlotSpec::fixed("token_program", TOKEN_PROGRAM);
const SYSTEM: SlotSpec = SlotSpec::fixed("system_program", SYSTEM_PROGRAM);
const ATA: SlotSpec = SlotSpec::fixed("associated_token_program", ASSOCIATED_TOKEN_PROGRAM);

const fn u64_param(name: &'static str) -> Field {
    Field::new(name, Schema::U64)
}

static NO_PARAMS: [Field; 0] = [];
static AMOUNT: [Field; 1] = [u64_param("amount")];
static INITIALIZE_PARAMS: [Field; 2] = [
    u64_param("reward_locked_time"),
    u64_param("staking_coefficient"),
];
static STAKE_DEVICE_PARAMS: [Field; 2] = [u64_param("device_id"), u64_param("spec_id")];
static UNSTAKE_DEVICE_PARAMS: [Field; 1] = [u64_param("device_id")];
static UPDATE_K_VALUE_PARAMS: [Field; 2] = [Field::new("spec_id", Schema::U16), u64_param("val")];
static UPDATE_REWARD_LOCK_TIME_PARAMS: [Field; 1] = [u64_param("new")];
static UPDATE_STAKING_COEFFICIENT_PARAMS: [Field; 1] = [u64_param("val")];

static CLAIM_REWARD_ACCOUNTS: [SlotSpec; 11] = [
    pda("supernode", W, Pda::Supernode),
    pda("supernode_reward_account", W, Pda::SupernodeRewardAccount),
    pda("provider_stake_info", RO, Pda::ProviderStakeInfo),
    slot("provider_token_account", W),
    slot("token", RO),
    slot("provider", RO),
    slot("controller", WS),
    slot("admin", WS),
    TOKEN,
    SYSTEM,
    ATA,
];

static INIT_REWARD_ACCOUNT_ACCOUNTS: [SlotSpec; 7] = [
    pda("supernode", W, Pda::Supernode),
    pda("supernode_reward_account", W, Pda::SupernodeRewardAccount),
    slot("token", RO),
    slot("admin", WS),
    TOKEN,
    SYSTEM,
    ATA,
];

static INITIALIZE_ACCOUNTS: [SlotSpec; 9] = [
    pda("supernode", W, Pda::Supernode),
    pda("supernode_stake_account", W, Pda::SupernodeStakeAccount),
    pda("supernode_vesting_account", W, Pda::SupernodeVestingAccount),
    slot("token", RO),
    pda("supernode_rental_account", W, Pda::SupernodeRentalAccount),
    slot("admin", WS),
    SYSTEM,
    TOKEN,
    ATA,
];

static RENTAL_FEE_ACCOUNTS: [SlotSpec; 10] = [
    pda("supernode", RO, Pda::Supernode),
    pda("supernode_rental_account", W, Pda::SupernodeRentalAccount),
    slot("tenant_token_account", W),
    pda("tenant_info", W, Pda::TenantInfo),
    slot("token", RO),
    slot("tenant", WS),
    slot("admin", S),
    TOKEN,
    SYSTEM,
    ATA,
];

static WITHDRAW_RENTAL_FEE_ACCOUNTS: [SlotSpec; 10] = [
    pda("supernode", W, Pda::Supernode),
    pda("supernode_rental_account", W, Pda::SupernodeRentalAccount),
    slot("tenant_token_account", W),
    pda("tenant_info", W, Pda::TenantInfo),
    slot("token", RO),
    slot("tenant", WS),
    slot("admin", S),
    TOKEN,
    SYSTEM,
    ATA,
];

static RELEASABLE_ACCOUNTS: [SlotSpec; 7] = [
    pda("provider_vesting_info", W, Pda::ProviderVestingInfo),
    pda("provider_stake_info", RO, Pda::ProviderStakeInfo),
    slot("provider", RO),
    slot("controller", WS),
    TOKEN,
    SYSTEM,
    ATA,
];

static RELEASE_ACCOUNTS: [SlotSpec; 12] = [
    pda("supernode", RO, Pda::Supernode),
    // the program signs the release with its token account
    pda("supernode_stake_account", W, Pda::SupernodeTokenAccount),
    pda("provider_stake_info", RO, Pda::ProviderStakeInfo),
    pda("provider_vesting_info", W, Pda::ProviderVestingInfo),
    slot("provider_token_account", W),
    slot("token", RO),
    slot("provider", RO),
    slot("controller", WS),
    slot("admin", S),
    TOKEN,
    SYSTEM,
    ATA,
];

static REMOVE_EXTRA_CONTROLLER_ACCOUNTS: [SlotSpec; 6] = [
    pda("supernode", RO, Pda::Supernode),
    pda("provider_stake_info", W, Pda::ProviderStakeInfo),
    slot("provider", RO),
    slot("operator", S),
    slot("admin", S),
    slot("old_controller", RO),
];

static REPLACE_EXTRA_CONTROLLER_ACCOUNTS: [SlotSpec; 7] = [
    pda("supernode", RO, Pda::Supernode),
    pda("provider_stake_info", W, Pda::ProviderStakeInfo),
    slot("provider", RO),
    slot("operator", S),
    slot("old_controller", RO),
    slot("admin", S),
    slot("new_controller", RO),
];

static STAKE_DEVICE_ACCOUNTS: [SlotSpec; 11] = [
    pda("supernode", RO, Pda::Supernode),
    pda("supernode_stake_account", W, Pda::SupernodeStakeAccount),
    pda("provider_stake_info", W, Pda::ProviderStakeInfo),
    slot("provider_token_account", W),
    slot("token", RO),
    slot("provider", RO),
    slot("controller", WS),
    slot("admin", S),
    TOKEN,
    SYSTEM,
    ATA,
];

static UNSTAKE_DEVICE_ACCOUNTS: [SlotSpec; 11] = [
    pda("supernode", RO, Pda::Supernode),
    pda("supernode_stake_account", W, Pda::SupernodeStakeAccount),
    pda("supernode_vesting_account", W, Pda::SupernodeVestingAccount),
    pda("provider_stake_info", W, Pda::ProviderStakeInfo),
    pda("provider_vesting_info", W, Pda::ProviderVestingInfo),
    slot("provider", RO),
    slot("controller", WS),
    slot("admin", S),
    TOKEN,
    SYSTEM,
    ATA,
];

static ADMIN_UPDATE_ACCOUNTS: [SlotSpec; 5] = [
    pda("supernode", W, Pda::Supernode),
    slot("admin", S),
    TOKEN,
    SYSTEM,
    ATA,
];

/// Layout of every known instruction, in [`InstructionKind`] declaration order.
static INSTRUCTIONS: [InstructionSpec; 14] = [
    InstructionSpec {
        kind: InstructionKind::ClaimReward,
        name: "claim_reward",
        discriminator: Discriminator::new([149, 95, 181, 242, 94, 90, 158, 162]),
        params: &AMOUNT,
        accounts: &CLAIM_REWARD_ACCOUNTS,
    },
    InstructionSpec {
        kind: InstructionKind::InitRewardAccount,
        name: "init_reward_account",
        discriminator: Discriminator::new([206, 38, 8, 106, 162, 1, 134, 90]),
        params: &NO_PARAMS,
        accounts: &INIT_REWARD_ACCOUNT_ACCOUNTS,
    },
    InstructionSpec {
        kind: InstructionKind::Initialize,
        name: "initialize",
        discriminator: Discriminator::new([175, 175, 109, 31, 13, 152, 155, 237]),
        params: &INITIALIZE_PARAMS,
        accounts: &INITIALIZE_ACCOUNTS,
    },
    InstructionSpec {
        kind: InstructionKind::PayRentalFee,
        name: "pay_rental_fee",
        discriminator: Discriminator::new([45, 10, 39, 144, 246, 2, 157, 94]),
        params: &AMOUNT,
        accounts: &RENTAL_FEE_ACCOUNTS,
    },
    InstructionSpec {
        kind: InstructionKind::Releasable,
        name: "releasable",
        discriminator: Discriminator::new([115, 143, 23, 169, 117, 191, 173, 152]),
        params: &NO_PARAMS,
        accounts: &RELEASABLE_ACCOUNTS,
    },
    InstructionSpec {
        kind: InstructionKind::Release,
        name: "release",
        discriminator: Discriminator::new([253, 249, 15, 206, 28, 127, 193, 241]),
        params: &NO_PARAMS,
        accounts: &RELEASE_ACCOUNTS,
    },
    InstructionSpec {
        kind: InstructionKind::RemoveExtraController,
        name: "remove_extra_controller",
        discriminator: Discriminator::new([180, 173, 240, 243, 97, 70, 236, 52]),
        params: &NO_PARAMS,
        accounts: &REMOVE_EXTRA_CONTROLLER_ACCOUNTS,
    },
    InstructionSpec {
        kind: InstructionKind::ReplaceExtraController,
        name: "replace_extra_controller",
        discriminator: Discriminator::new([96, 25, 235, 129, 158, 174, 203, 179]),
        params: &NO_PARAMS,
        accounts: &REPLACE_EXTRA_CONTROLLER_ACCOUNTS,
    },
    InstructionSpec {
        kind: InstructionKind::StakeDevice,
        name: "stake_device",
        discriminator: Discriminator::new([92, 226, 123, 60, 82, 196, 27, 73]),
        params: &STAKE_DEVICE_PARAMS,
        accounts: &STAKE_DEVICE_ACCOUNTS,
    },
    InstructionSpec {
        kind: InstructionKind::UnstakeDevice,
        name: "unstake_device",
        discriminator: Discriminator::new([86, 80, 60, 38, 72, 185, 250, 61]),
        params: &UNSTAKE_DEVICE_PARAMS,
        accounts: &UNSTAKE_DEVICE_ACCOUNTS,
    },
    InstructionSpec {
        kind: InstructionKind::UpdateKValue,
        name: "update_k_value",
        discriminator: Discriminator::new([213, 26, 29, 112, 239, 146, 241, 16]),
        params: &UPDATE_K_VALUE_PARAMS,
        accounts: &ADMIN_UPDATE_ACCOUNTS,
    },
    InstructionSpec {
        kind: InstructionKind::UpdateRewardLockTime,
        name: "update_reward_lock_time",
        discriminator: Discriminator::new([143, 163, 14, 177, 108, 6, 205, 81]),
        params: &UPDATE_REWARD_LOCK_TIME_PARAMS,
        accounts: &ADMIN_UPDATE_ACCOUNTS,
    },
    InstructionSpec {
        kind: InstructionKind::UpdateStakingCoefficient,
        name: "update_staking_coefficient",
        discriminator: Discriminator::new([0, 178, 197, 201, 209, 217, 39, 245]),
        params: &UPDATE_STAKING_COEFFICIENT_PARAMS,
        accounts: &ADMIN_UPDATE_ACCOUNTS,
    },
    InstructionSpec {
        kind: InstructionKind::WithdrawRentalFee,
        name: "withdraw_rental_fee",
        discriminator: Discriminator::new([185, 67, 135, 4, 155, 6, 77, 156]),
        params: &AMOUNT,
        accounts: &WITHDRAW_RENTAL_FEE_ACCOUNTS,
    },
];

/// Instructions the program accepts but whose layout is not published.
static UNDESCRIBED: [(&str, Discriminator); 2] = [
    (
        "add_extra_controller",
        Discriminator::new([212, 217, 0, 188, 6, 34, 34, 97]),
    ),
    (
        "claim_rental_fee",
        Discriminator::new([182, 236, 192, 130, 204, 223, 128, 117]),
    ),
];

static BY_DISCRIMINATOR: LazyLock<HashMap<Discriminator, InstructionKind>> = LazyLock::new(|| {
    INSTRUCTIONS
        .iter()
        .map(|spec| (spec.discriminator, spec.kind))
        .collect()
});

impl InstructionKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 14] = [
        Self::ClaimReward,
        Self::InitRewardAccount,
        Self::Initialize,
        Self::PayRentalFee,
        Self::Releasable,
        Self::Release,
        Self::RemoveExtraController,
        Self::ReplaceExtraController,
        Self::StakeDevice,
        Self::UnstakeDevice,
        Self::UpdateKValue,
        Self::UpdateRewardLockTime,
        Self::UpdateStakingCoefficient,
        Self::WithdrawRentalFee,
    ];

    /// The static layout of the kind.
    #[must_use]
    pub fn spec(self) -> &'static InstructionSpec {
        &INSTRUCTIONS[self as usize]
    }

    /// Tag at the start of the kind's payloads.
    #[must_use]
    pub fn discriminator(self) -> Discriminator {
        self.spec().discriminator
    }

    /// Find the kind tagged with a discriminator.
    ///
    /// # Example
    /// ```rust
    /// # use supernode_client::codec::Discriminator;
    /// # use supernode_client::program::InstructionKind;
    /// let tag = Discriminator::for_instruction("stake_device");
    /// assert_eq!(InstructionKind::from_discriminator(&tag), Some(InstructionKind::StakeDevice));
    /// ```
    #[must_use]
    pub fn from_discriminator(discriminator: &Discriminator) -> Option<Self> {
        BY_DISCRIMINATOR.get(discriminator).copied()
    }
}

/// Name of the instruction tagged with a discriminator whose layout is unknown, if any.
#[must_use]
pub fn undescribed(discriminator: &Discriminator) -> Option<&'static str> {
    UNDESCRIBED
        .iter()
        .find(|(_, tag)| tag == discriminator)
        .map(|(name, _)| *name)
}

#[mutants::skip]
impl Display for InstructionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}
