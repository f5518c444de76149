// File: src/state/accounts.rs
// Project: Supernode Client
// Creation date: Tuesday 13 October 2026
// Author: Vincent Berthier <vincent.berthier@posteo.org>
// -----
// Last modified: Wednesday 14 October 2026 @ 16:09:09
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

use borsh::{BorshDeserialize, BorshSerialize};

use crate::crypto::Pubkey;

/// A device staked by a provider.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct DeviceState {
    /// Lifecycle state of the device.
    pub state: u16,
    /// Spec of the device.
    pub spec_id: u16,
    /// Staking coefficient when the device was staked.
    pub staking_coefficient: u64,
    /// K value of the spec when the device was staked.
    pub kvalue: u64,
}

/// Global parameters of the program.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct Policy {
    /// Decimals of the token.
    pub decimals: u8,
    /// How long rewards stay locked.
    pub reward_locked_time: u64,
    /// The staking coefficient.
    pub staking_coefficient: u64,
    /// K value of every device spec, indexed by spec id.
    #[borsh(deserialize_with = "crate::codec::sequence::deserialize")]
    pub k_values: Vec<u64>,
}

/// An amount vesting on a given day.
#[derive(Clone, Copy, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct Schedule {
    /// Day the amount is released.
    pub day: u16,
    /// Amount released.
    pub amount: u64,
}

/// Devices staked by a provider, and who may act for it.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct ProviderStakeInfo {
    /// Controllers acting for the provider besides itself.
    pub extra_controllers: [Pubkey; 2],
    /// The staked devices.
    #[borsh(deserialize_with = "crate::codec::sequence::deserialize")]
    pub devices: Vec<DeviceState>,
}

/// Tokens of a provider waiting to be released.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct ProviderVestingInfo {
    /// Index past the last used schedule.
    pub end_idx: u8,
    /// Day of the last release.
    pub last_release_day: u16,
    /// Total released so far.
    pub released_amount: u64,
    /// Pending releases.
    #[borsh(deserialize_with = "crate::codec::sequence::deserialize")]
    pub schedules: Vec<Schedule>,
}

/// The global program state.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct SupernodeState {
    /// The administrator.
    pub admin: Pubkey,
    /// The token mint.
    pub token: Pubkey,
    /// Global parameters.
    pub policy: Policy,
}

/// Funds of a tenant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct TenantInfo {
    /// Paid so far.
    pub funds: u64,
    /// Withdrawn so far.
    pub withdrawn: u64,
}

discriminated!(Account:
    ProviderStakeInfo => [200, 104, 62, 31, 28, 110, 31, 45],
    ProviderVestingInfo => [138, 109, 208, 248, 196, 12, 164, 112],
    SupernodeState => [2, 22, 141, 62, 77, 123, 126, 67],
    TenantInfo => [239, 62, 8, 238, 217, 205, 200, 193],
);

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use test_log::test;

    use crate::{
        codec::{self, Discriminator},
        state::{decode_account, encode_account, Discriminated},
    };

    use super::*;
    type TestResult = core::result::Result<(), Box<dyn core::error::Error>>;

    fn key(n: u8) -> Pubkey {
        Pubkey::from_bytes(&[n; 32])
    }

    fn stake_info() -> ProviderStakeInfo {
        ProviderStakeInfo {
            extra_controllers: [key(1), key(2)],
            devices: vec![
                DeviceState {
                    state: 1,
                    spec_id: 2,
                    staking_coefficient: 30,
                    kvalue: 400,
                },
                DeviceState {
                    state: 0,
                    spec_id: 3,
                    staking_coefficient: 31,
                    kvalue: 500,
                },
            ],
        }
    }

    #[test]
    fn discriminators_are_name_hashes() {
        for (name, tag) in [
            (ProviderStakeInfo::NAME, ProviderStakeInfo::DISCRIMINATOR),
            (ProviderVestingInfo::NAME, ProviderVestingInfo::DISCRIMINATOR),
            (SupernodeState::NAME, SupernodeState::DISCRIMINATOR),
            (TenantInfo::NAME, TenantInfo::DISCRIMINATOR),
        ] {
            assert_eq!(tag, Discriminator::for_account(name), "for {name}");
        }
    }

    #[test]
    fn stake_info_layout() -> TestResult {
        // Given
        let info = stake_info();

        // When
        let data = encode_account(&info)?;

        // Then
        // tag, two controllers, count, two devices of 20 bytes
        assert_eq!(data.len(), 8 + 64 + 4 + 40);
        assert_eq!(&data[72..76], &[2, 0, 0, 0]);
        assert_eq!(decode_account::<ProviderStakeInfo>(&data)?, info);

        Ok(())
    }

    #[test]
    fn state_with_policy() -> TestResult {
        // Given
        let state = SupernodeState {
            admin: key(9),
            token: key(8),
            policy: Policy {
                decimals: 6,
                reward_locked_time: 86_400,
                staking_coefficient: 3,
                k_values: vec![10, 20, 30],
            },
        };
        let mut data = encode_account(&state)?;
        // room left in the account
        data.extend_from_slice(&[0; 32]);

        // When
        let decoded = decode_account::<SupernodeState>(&data)?;

        // Then
        assert_eq!(decoded, state);

        Ok(())
    }

    #[test]
    fn wrong_record_type() -> TestResult {
        // Given
        let data = encode_account(&TenantInfo {
            funds: 5,
            withdrawn: 0,
        })?;

        // When
        let res = decode_account::<ProviderVestingInfo>(&data);

        // Then
        assert!(matches!(
            res,
            Err(codec::Error::DiscriminatorMismatch { expected, observed })
                if expected == ProviderVestingInfo::DISCRIMINATOR
                    && observed == TenantInfo::DISCRIMINATOR
        ));

        Ok(())
    }

    #[test]
    fn oversized_device_count() -> TestResult {
        // Given
        let mut data = encode_account(&stake_info())?;
        data[72..76].copy_from_slice(&[0xff, 0xff, 0, 0]);

        // When
        let res = decode_account::<ProviderStakeInfo>(&data);

        // Then
        assert!(matches!(
            res,
            Err(codec::Error::MalformedLengthPrefix { declared: 65_535, .. })
        ));

        Ok(())
    }

    #[test]
    fn truncated_vesting() -> TestResult {
        // Given
        let vesting = ProviderVestingInfo {
            end_idx: 1,
            last_release_day: 12,
            released_amount: 7,
            schedules: vec![Schedule { day: 13, amount: 100 }],
        };
        let data = encode_account(&vesting)?;

        // When
        let res = decode_account::<ProviderVestingInfo>(&data[..20]);

        // Then
        assert!(matches!(
            res,
            Err(codec::Error::TruncatedInput { offset: 19, needed: 4, remaining: 1 })
        ));

        Ok(())
    }
}
