// File: src/instruction/registry.rs
// Project: Supernode Client
// Creation date: Tuesday 13 October 2026
// Author: Vincent Berthier <vincent.berthier@posteo.org>
// -----
// Last modified: Tuesday 13 October 2026 @ 12:10:31
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

//! Maps payloads back to the instruction they encode.

use tracing::{debug, instrument, trace, warn};

use crate::{
    account::{AccountMeta, AccountSlots},
    codec::{Discriminator, Reader, Value},
    program::{undescribed, InstructionKind},
};

use super::{DecodedInstruction, Error, Result};

/// Find the instruction tagged with a discriminator.
///
/// # Errors
/// If no instruction is tagged with it, or the tagged instruction's layout is not published.
pub fn lookup(discriminator: &Discriminator) -> Result<InstructionKind> {
    if let Some(kind) = InstructionKind::from_discriminator(discriminator) {
        return Ok(kind);
    }
    if let Some(name) = undescribed(discriminator) {
        warn!("layout of '{name}' is not published");
        return Err(Error::SchemaUnavailable { name });
    }
    warn!("unknown discriminator {discriminator}");
    Err(Error::UnknownInstruction {
        discriminator: *discriminator,
    })
}

/// Decode the parameters of a payload.
///
/// # Returns
/// The instruction kind and its parameters, in declaration order.
///
/// # Errors
/// If the payload is not exactly one instruction of a known kind.
#[instrument(skip_all, fields(len = data.len()))]
pub fn decode_payload(data: &[u8]) -> Result<(InstructionKind, Vec<Value>)> {
    debug!("decoding instruction payload");
    let mut reader = Reader::new(data);
    let discriminator: Discriminator = reader.read()?;
    let kind = lookup(&discriminator)?;
    let params = kind
        .spec()
        .params()
        .iter()
        .map(|field| {
            trace!("reading parameter '{}' at {}", field.name(), reader.offset());
            field.schema().read(&mut reader)
        })
        .collect::<crate::codec::Result<Vec<_>>>()?;
    reader.finish()?;
    Ok((kind, params))
}

/// Decode a payload and bind its account list onto the instruction's slots.
///
/// # Errors
/// If the payload does not decode, or the account list does not have one account per slot.
///
/// # Example
/// ```rust
/// # use supernode_client::Error;
/// # use supernode_client::instruction::{self, registry};
/// let data = [149, 95, 181, 242, 94, 90, 158, 162, 1, 2, 3, 4];
/// let res = registry::resolve(&data, vec![]);
/// assert!(matches!(res, Err(instruction::Error::Codec(_))));
/// # Ok::<(), Error>(())
/// ```
#[instrument(skip_all, fields(len = data.len(), accounts = accounts.len()))]
pub fn resolve(data: &[u8], accounts: Vec<AccountMeta>) -> Result<DecodedInstruction> {
    let (kind, params) = decode_payload(data)?;
    debug!("resolving accounts of {kind}");
    let accounts = AccountSlots::bind(kind.spec().accounts(), accounts)?;
    Ok(DecodedInstruction::new(kind, params, accounts))
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use test_log::test;

    use crate::{account, codec, crypto::Pubkey};

    use super::*;
    type TestResult = core::result::Result<(), Box<dyn core::error::Error>>;

    fn payload(kind: InstructionKind, rest: &[u8]) -> Vec<u8> {
        let mut data = kind.discriminator().to_bytes().to_vec();
        data.extend_from_slice(rest);
        data
    }

    #[test]
    fn truncated_parameter() {
        // Given
        let data = payload(InstructionKind::ClaimReward, &[1, 2, 3, 4]);

        // When
        let res = decode_payload(&data);

        // Then
        assert!(matches!(
            res,
            Err(Error::Codec(codec::Error::TruncatedInput {
                offset: 8,
                needed: 8,
                remaining: 4
            }))
        ));
    }

    #[test]
    fn short_discriminator() {
        let res = decode_payload(&[149, 95, 181]);

        assert!(matches!(
            res,
            Err(Error::Codec(codec::Error::TruncatedInput { offset: 0, .. }))
        ));
    }

    #[test]
    fn unknown_and_reserved_tags() {
        // Given
        let unknown = [0_u8; 8];
        let reserved = Discriminator::for_instruction("add_extra_controller").to_bytes();

        // When
        let unknown = decode_payload(&unknown);
        let reserved = decode_payload(&reserved);

        // Then
        assert!(matches!(unknown, Err(Error::UnknownInstruction { .. })));
        assert!(matches!(
            reserved,
            Err(Error::SchemaUnavailable { name: "add_extra_controller" })
        ));
    }

    #[test]
    fn trailing_bytes_are_rejected() {
        // Given
        let data = payload(InstructionKind::Release, &[0]);

        // When
        let res = decode_payload(&data);

        // Then
        assert!(matches!(
            res,
            Err(Error::Codec(codec::Error::TrailingBytes { offset: 8, count: 1 }))
        ));
    }

    #[test]
    fn parameters_in_order() -> TestResult {
        // Given
        let data = payload(InstructionKind::UpdateKValue, &[3, 0, 232, 3, 0, 0, 0, 0, 0, 0]);

        // When
        let (kind, params) = decode_payload(&data)?;

        // Then
        assert_eq!(kind, InstructionKind::UpdateKValue);
        assert_eq!(params, vec![Value::U16(3), Value::U64(1_000)]);

        Ok(())
    }

    #[test]
    fn accounts_are_bound_positionally() -> TestResult {
        // Given
        let data = payload(InstructionKind::UpdateStakingCoefficient, &[5, 0, 0, 0, 0, 0, 0, 0]);
        let accounts: Vec<_> = (0..5_u8)
            .map(|n| AccountMeta::readonly(Pubkey::from_bytes(&[n; 32])))
            .collect();

        // When
        let decoded = resolve(&data, accounts)?;
        let short = resolve(&data, vec![]);

        // Then
        assert_eq!(
            decoded.account("admin").map(|meta| *meta.key()),
            Some(Pubkey::from_bytes(&[1; 32]))
        );
        assert!(matches!(
            short,
            Err(Error::Account(account::Error::AccountCountMismatch {
                expected: 5,
                actual: 0
            }))
        ));

        Ok(())
    }
}
