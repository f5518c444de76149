// File: src/state/mod.rs
// Project: Supernode Client
// Creation date: Thursday 15 October 2026
// Author: Vincent Berthier <vincent.berthier@posteo.org>
// -----
// Last modified: Friday 16 October 2026 @ 11:56:25
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

//! Every record starts with its own discriminator. Decoding is typed: the
//! caller names the record it expects and any other tag is rejected.

use borsh::{BorshDeserialize, BorshSerialize};
use tracing::{debug, instrument, warn};

use crate::codec::{self, Discriminator, Reader, Result};

/// A record whose encoding starts with a fixed discriminator.
pub trait Discriminated: BorshSerialize + BorshDeserialize {
    /// Type name, as hashed into the discriminator.
    const NAME: &'static str;
    /// Tag at the start of the encoding.
    const DISCRIMINATOR: Discriminator;
}

/// Marker for the records stored in program accounts.
pub trait Account: Discriminated {}

/// Marker for the records emitted in program logs.
pub trait Event: Discriminated {}

macro_rules! discriminated {
    ($marker:ident: $($record:ident => $tag:expr),+ $(,)?) => {
        $(
            impl $crate::state::Discriminated for $record {
                const NAME: &'static str = stringify!($record);
                const DISCRIMINATOR: $crate::codec::Discriminator = $crate::codec::Discriminator::new($tag);
            }

            impl $crate::state::$marker for $record {}
        )+
    };
}

mod accounts;
mod events;

pub use accounts::{
    DeviceState, Policy, ProviderStakeInfo, ProviderVestingInfo, Schedule, SupernodeState,
    TenantInfo,
};
pub use events::{
    decode_event, encode_event, event_data, AnyEvent, ClaimRentalFeeEvent, DeviceKValueUpdated,
    DeviceStakedEvent, DeviceUnstakeEvent, PayRentalEvent, ProviderControllerChangedEvent,
    RewardClaimedEvent, RewardLockedTimeUpdated, StakingCoefficientUpdated, TokenReleasedEvent,
    VestingScheduledEvent, WithdrawEvent, LOG_PREFIX,
};

/// Read a record after checking it starts with `T`'s discriminator.
fn read_record<T>(reader: &mut Reader<'_>) -> Result<T>
where
    T: Discriminated,
{
    let observed: Discriminator = reader.read()?;
    if observed != T::DISCRIMINATOR {
        warn!("expected a {}, got discriminator {observed}", T::NAME);
        return Err(codec::Error::DiscriminatorMismatch {
            expected: T::DISCRIMINATOR,
            observed,
        });
    }
    reader.read()
}

fn write_record<T>(record: &T) -> Result<Vec<u8>>
where
    T: Discriminated,
{
    let mut data = T::DISCRIMINATOR.to_bytes().to_vec();
    record.serialize(&mut data).map_err(codec::Error::Serialization)?;
    Ok(data)
}

/// Decode the content of a program account.
///
/// Accounts are allocated with room to grow: bytes after the record are ignored.
///
/// # Errors
/// If the data does not start with `T`'s discriminator, or the record is truncated or invalid.
///
/// # Example
/// ```rust
/// # use supernode_client::Error;
/// # use supernode_client::state::{self, TenantInfo};
/// let tenant = TenantInfo { funds: 500, withdrawn: 20 };
/// let mut data = state::encode_account(&tenant)?;
/// data.resize(64, 0);
///
/// assert_eq!(state::decode_account::<TenantInfo>(&data)?, tenant);
/// # Ok::<(), Error>(())
/// ```
#[instrument(skip_all, fields(record = T::NAME, len = data.len()))]
pub fn decode_account<T>(data: &[u8]) -> Result<T>
where
    T: Account,
{
    debug!("decoding account");
    let mut reader = Reader::new(data);
    read_record(&mut reader)
}

/// Encode a program account, discriminator first.
///
/// # Errors
/// If the record refuses to serialize.
pub fn encode_account<T>(record: &T) -> Result<Vec<u8>>
where
    T: Account,
{
    write_record(record)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use test_log::test;

    use super::*;
    type TestResult = core::result::Result<(), Box<dyn core::error::Error>>;

    #[test]
    fn records_are_tagged_first() -> TestResult {
        // Given
        let tenant = TenantInfo {
            funds: 1,
            withdrawn: 2,
        };

        // When
        let data = encode_account(&tenant)?;

        // Then
        assert_eq!(&data[..8], &[239, 62, 8, 238, 217, 205, 200, 193]);
        assert_eq!(&data[8..], &[1, 0, 0, 0, 0, 0, 0, 0, 2, 0, 0, 0, 0, 0, 0, 0]);

        Ok(())
    }

    #[test]
    fn short_account() {
        let res = decode_account::<TenantInfo>(&[239, 62, 8]);

        assert!(matches!(
            res,
            Err(codec::Error::TruncatedInput {
                offset: 0,
                needed: 8,
                remaining: 3
            })
        ));
    }
}
