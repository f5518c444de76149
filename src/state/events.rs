// File: src/state/events.rs
// Project: Supernode Client
// Creation date: Thursday 15 October 2026
// Author: Vincent Berthier <vincent.berthier@posteo.org>
// -----
// Last modified: Thursday 15 October 2026 @ 09:11:50
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

#![expect(missing_docs, reason = "event fields are named after the program's own definitions")]

use base64::{engine::general_purpose, Engine as _};
use borsh::{BorshDeserialize, BorshSerialize};
use tracing::{debug, instrument, trace, warn};

use crate::{
    codec::{self, Discriminator, Reader, Result},
    crypto::Pubkey,
};

use super::{read_record, write_record, Discriminated, Event};

/// Start of the log lines carrying an event.
pub const LOG_PREFIX: &str = "Program data: ";

/// Rental fees claimed by a provider.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct ClaimRentalFeeEvent {
    pub provider: Pubkey,
    pub controller: Pubkey,
    pub amount: u64,
}

/// The k value of a device spec changed.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct DeviceKValueUpdated {
    pub spec_id: u16,
    pub old: u64,
    pub new: u64,
    pub admin: Pubkey,
}

/// A device was staked.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct DeviceStakedEvent {
    pub provider: Pubkey,
    pub device_id: u64,
    pub spec_id: u64,
    pub amount: u64,
}

/// A device was unstaked; its stake now vests in the given account.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct DeviceUnstakeEvent {
    pub provider: Pubkey,
    pub device_id: u64,
    pub amount: u64,
    pub provider_vesting_info_key: Pubkey,
}

/// A tenant paid rental fees.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct PayRentalEvent {
    pub tenant: Pubkey,
    pub amount: u64,
}

/// An extra controller of a provider was added, replaced or removed.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct ProviderControllerChangedEvent {
    pub provider: Pubkey,
    /// What happened to the controller, as spelled by the program.
    pub action: String,
    pub new_controller: Pubkey,
    pub operator: Pubkey,
    pub old_controller: Pubkey,
}

/// Rewards claimed by a provider.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct RewardClaimedEvent {
    pub provider: Pubkey,
    pub amount: u64,
}

/// The reward locking time changed.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct RewardLockedTimeUpdated {
    pub old: u64,
    pub new: u64,
    pub admin: Pubkey,
}

/// The staking coefficient changed.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct StakingCoefficientUpdated {
    pub old: u64,
    pub new: u64,
    pub admin: Pubkey,
}

/// Vested tokens were released to a provider.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct TokenReleasedEvent {
    pub controller: Pubkey,
    pub provider: Pubkey,
    pub amount: u64,
}

/// Tokens of a provider will vest on the given day.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct VestingScheduledEvent {
    pub provider: Pubkey,
    pub day: u16,
    pub amount: u64,
}

/// A tenant withdrew rental fees.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct WithdrawEvent {
    pub tenant: Pubkey,
    pub amount: u64,
}

macro_rules! events {
    ($($event:ident => $tag:expr),+ $(,)?) => {
        discriminated!(Event: $($event => $tag),+);

        /// Any event of the program.
        #[derive(Clone, Debug, PartialEq, Eq)]
        pub enum AnyEvent {
            $(
                #[doc = concat!("A [`", stringify!($event), "`].")]
                $event($event),
            )+
        }

        impl AnyEvent {
            /// Decode an event whatever its type.
            ///
            /// # Errors
            /// If the tag is not one of the program's events, or the record is invalid.
            #[instrument(skip_all, fields(len = data.len()))]
            pub fn decode(data: &[u8]) -> Result<Self> {
                let (observed, _) = Discriminator::split(data)?;
                debug!("decoding event tagged {observed}");
                $(
                    if observed == $event::DISCRIMINATOR {
                        return decode_event::<$event>(data).map(Self::$event);
                    }
                )+
                warn!("no event is tagged {observed}");
                Err(codec::Error::UnknownDiscriminator { observed })
            }

            /// Type name of the event.
            #[must_use]
            pub const fn name(&self) -> &'static str {
                match self {
                    $(Self::$event(_) => $event::NAME,)+
                }
            }

            /// Encode the event, discriminator first.
            ///
            /// # Errors
            /// If the event refuses to serialize.
            pub fn encode(&self) -> Result<Vec<u8>> {
                match self {
                    $(Self::$event(event) => encode_event(event),)+
                }
            }
        }
    };
}

events!(
    ClaimRentalFeeEvent => [233, 172, 46, 252, 236, 68, 236, 26],
    DeviceKValueUpdated => [145, 201, 163, 41, 27, 221, 84, 22],
    DeviceStakedEvent => [167, 219, 80, 186, 13, 21, 172, 123],
    DeviceUnstakeEvent => [219, 57, 57, 40, 225, 213, 205, 161],
    PayRentalEvent => [226, 244, 245, 60, 4, 57, 138, 93],
    ProviderControllerChangedEvent => [216, 183, 242, 141, 71, 46, 230, 182],
    RewardClaimedEvent => [246, 43, 215, 228, 82, 49, 230, 56],
    RewardLockedTimeUpdated => [37, 131, 22, 147, 118, 100, 143, 26],
    StakingCoefficientUpdated => [11, 31, 245, 203, 59, 83, 112, 36],
    TokenReleasedEvent => [166, 215, 137, 155, 84, 0, 149, 214],
    VestingScheduledEvent => [139, 64, 225, 127, 141, 206, 190, 86],
    WithdrawEvent => [22, 9, 133, 26, 160, 44, 71, 192],
);

impl AnyEvent {
    /// Decode the event carried by a log line, if it carries one.
    ///
    /// # Errors
    /// If the line carries an event that does not decode.
    ///
    /// # Example
    /// ```rust
    /// # use supernode_client::Error;
    /// # use supernode_client::crypto::Pubkey;
    /// # use supernode_client::state::{AnyEvent, WithdrawEvent};
    /// let event = AnyEvent::WithdrawEvent(WithdrawEvent { tenant: Pubkey::from_bytes(&[3; 32]), amount: 10 });
    /// let line = event.to_log()?;
    ///
    /// assert_eq!(AnyEvent::from_log(&line)?, Some(event));
    /// assert_eq!(AnyEvent::from_log("Program log: Instruction: Withdraw")?, None);
    /// # Ok::<(), Error>(())
    /// ```
    pub fn from_log(line: &str) -> Result<Option<Self>> {
        event_data(line)?
            .map(|data| Self::decode(&data))
            .transpose()
    }

    /// Format the event the way the program logs it.
    ///
    /// # Errors
    /// If the event refuses to serialize.
    pub fn to_log(&self) -> Result<String> {
        Ok(format!("{LOG_PREFIX}{}", general_purpose::STANDARD.encode(self.encode()?)))
    }
}

/// Extract the raw event bytes of a log line.
///
/// # Returns
/// `None` for lines that carry no event.
///
/// # Errors
/// If the payload is not valid base64.
pub fn event_data(line: &str) -> Result<Option<Vec<u8>>> {
    let Some(payload) = line.trim().strip_prefix(LOG_PREFIX) else {
        trace!("not an event line");
        return Ok(None);
    };
    let data = general_purpose::STANDARD.decode(payload.trim()).map_err(|err| {
        warn!("event payload is not base64: {err}");
        err
    })?;
    Ok(Some(data))
}

/// Decode an event of a known type. The whole buffer must be taken.
///
/// # Errors
/// If the data does not start with `T`'s discriminator, or is not exactly one valid event.
#[instrument(skip_all, fields(record = T::NAME, len = data.len()))]
pub fn decode_event<T>(data: &[u8]) -> Result<T>
where
    T: Event,
{
    debug!("decoding event");
    let mut reader = Reader::new(data);
    let event = read_record(&mut reader)?;
    reader.finish()?;
    Ok(event)
}

/// Encode an event, discriminator first.
///
/// # Errors
/// If the event refuses to serialize.
pub fn encode_event<T>(event: &T) -> Result<Vec<u8>>
where
    T: Event,
{
    write_record(event)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use test_log::test;

    use super::*;
    type TestResult = core::result::Result<(), Box<dyn core::error::Error>>;

    fn key(n: u8) -> Pubkey {
        Pubkey::from_bytes(&[n; 32])
    }

    fn samples() -> Vec<AnyEvent> {
        vec![
            AnyEvent::ClaimRentalFeeEvent(ClaimRentalFeeEvent {
                provider: key(1),
                controller: key(2),
                amount: 3,
            }),
            AnyEvent::DeviceKValueUpdated(DeviceKValueUpdated {
                spec_id: 4,
                old: 5,
                new: 6,
                admin: key(7),
            }),
            AnyEvent::DeviceStakedEvent(DeviceStakedEvent {
                provider: key(1),
                device_id: 8,
                spec_id: 9,
                amount: 10,
            }),
            AnyEvent::DeviceUnstakeEvent(DeviceUnstakeEvent {
                provider: key(1),
                device_id: 8,
                amount: 10,
                provider_vesting_info_key: key(11),
            }),
            AnyEvent::PayRentalEvent(PayRentalEvent {
                tenant: key(12),
                amount: 13,
            }),
            AnyEvent::ProviderControllerChangedEvent(ProviderControllerChangedEvent {
                provider: key(1),
                action: "replace".to_owned(),
                new_controller: key(14),
                operator: key(15),
                old_controller: key(16),
            }),
            AnyEvent::RewardClaimedEvent(RewardClaimedEvent {
                provider: key(1),
                amount: 17,
            }),
            AnyEvent::RewardLockedTimeUpdated(RewardLockedTimeUpdated {
                old: 18,
                new: 19,
                admin: key(7),
            }),
            AnyEvent::StakingCoefficientUpdated(StakingCoefficientUpdated {
                old: 20,
                new: 21,
                admin: key(7),
            }),
            AnyEvent::TokenReleasedEvent(TokenReleasedEvent {
                controller: key(2),
                provider: key(1),
                amount: 22,
            }),
            AnyEvent::VestingScheduledEvent(VestingScheduledEvent {
                provider: key(1),
                day: 23,
                amount: 24,
            }),
            AnyEvent::WithdrawEvent(WithdrawEvent {
                tenant: key(12),
                amount: 25,
            }),
        ]
    }

    #[test]
    fn discriminators_are_name_hashes() -> TestResult {
        for event in samples() {
            let data = event.encode()?;
            assert_eq!(
                &data[..8],
                &Discriminator::for_event(event.name()).to_bytes(),
                "for {}",
                event.name()
            );
        }

        Ok(())
    }

    #[test]
    fn every_event_dispatches_to_its_type() -> TestResult {
        for event in samples() {
            // Given
            let data = event.encode()?;

            // When
            let decoded = AnyEvent::decode(&data)?;

            // Then
            assert_eq!(decoded, event);
        }

        Ok(())
    }

    #[test]
    fn typed_decode_rejects_other_events() -> TestResult {
        // Given
        let data = encode_event(&RewardClaimedEvent {
            provider: key(1),
            amount: 2,
        })?;

        // When
        // same layout, other tag
        let res = decode_event::<PayRentalEvent>(&data);

        // Then
        assert!(matches!(
            res,
            Err(codec::Error::DiscriminatorMismatch { expected, observed })
                if expected == PayRentalEvent::DISCRIMINATOR
                    && observed == RewardClaimedEvent::DISCRIMINATOR
        ));

        Ok(())
    }

    #[test]
    fn unknown_tag() {
        // Given
        let data = [0_u8; 48];

        // When
        let res = AnyEvent::decode(&data);

        // Then
        assert!(matches!(res, Err(codec::Error::UnknownDiscriminator { .. })));
    }

    #[test]
    fn trailing_bytes() -> TestResult {
        // Given
        let mut data = encode_event(&WithdrawEvent {
            tenant: key(1),
            amount: 2,
        })?;
        data.push(0);

        // When
        let res = decode_event::<WithdrawEvent>(&data);

        // Then
        assert!(matches!(
            res,
            Err(codec::Error::TrailingBytes { offset: 48, count: 1 })
        ));

        Ok(())
    }

    #[test]
    fn controller_action_is_length_prefixed() -> TestResult {
        // Given
        let event = ProviderControllerChangedEvent {
            provider: key(1),
            action: "add".to_owned(),
            new_controller: key(2),
            operator: key(3),
            old_controller: key(4),
        };

        // When
        let data = encode_event(&event)?;

        // Then
        assert_eq!(&data[40..47], &[3, 0, 0, 0, b'a', b'd', b'd']);
        assert_eq!(decode_event::<ProviderControllerChangedEvent>(&data)?, event);

        Ok(())
    }

    #[test]
    fn log_lines() -> TestResult {
        // Given
        let event = samples().remove(4);
        let line = event.to_log()?;

        // When
        let parsed = AnyEvent::from_log(&line)?;
        let other = AnyEvent::from_log("Program 11111111111111111111111111111111 success")?;
        let broken = AnyEvent::from_log("Program data: !!!");

        // Then
        assert!(line.starts_with(LOG_PREFIX));
        assert_eq!(parsed, Some(event));
        assert_eq!(other, None);
        assert!(matches!(broken, Err(codec::Error::Base64(_))));

        Ok(())
    }
}
