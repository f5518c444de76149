// File: src/instruction/scanner.rs
// Project: Supernode Client
// Creation date: Monday 12 October 2026
// Author: Vincent Berthier <vincent.berthier@posteo.org>
// -----
// Last modified: Tuesday 13 October 2026 @ 09:16:26
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

use crate::{account::AccountMeta, crypto::Pubkey};

use super::{registry, DecodedInstruction, Error, Result};

/// One instruction of a transaction, as seen by an observer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    /// The program the instruction is sent to.
    pub program_id: Pubkey,
    /// The raw payload.
    pub data: Vec<u8>,
    /// The accounts, resolved in order.
    pub accounts: Vec<AccountMeta>,
}

/// Decode every entry of a batch addressed to `program`, in batch order.
///
/// Entries for other programs are skipped.
///
/// # Errors
/// On the first entry for `program` that fails to resolve. Nothing is returned then.
#[instrument(skip_all, fields(%program))]
pub fn scan<I>(entries: I, program: &Pubkey) -> Result<Vec<DecodedInstruction>>
where
    I: IntoIterator<Item = Entry>,
{
    debug!("scanning batch");
    let mut decoded = Vec::new();
    for (position, entry) in entries.into_iter().enumerate() {
        if entry.program_id != *program {
            trace!("skipping entry #{position} for {}", entry.program_id);
            continue;
        }
        let instruction = registry::resolve(&entry.data, entry.accounts).map_err(|err| {
            warn!("entry #{position} failed to resolve: {err}");
            Error::Scan {
                position,
                cause: Box::new(err),
            }
        })?;
        trace!("entry #{position} is {}", instruction.kind());
        decoded.push(instruction);
    }
    debug!("{} instructions for the program", decoded.len());
    Ok(decoded)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use test_log::test;

    use crate::{
        account::{self, Writable},
        instruction::InstructionBuilder,
        program::{InstructionKind, DEVNET_PROGRAM, SYSTEM_PROGRAM},
    };

    use super::*;
    type TestResult = core::result::Result<(), Box<dyn core::error::Error>>;

    fn key(n: u8) -> Pubkey {
        Pubkey::from_bytes(&[n; 32])
    }

    fn update(coefficient: u64) -> Result<Entry> {
        let mut builder = InstructionBuilder::new(InstructionKind::UpdateStakingCoefficient);
        builder
            .set_param("val", coefficient)?
            .set_account("admin", key(1))?
            .derive_addresses(&DEVNET_PROGRAM)?;
        let instruction = builder.build(DEVNET_PROGRAM)?;
        Ok(Entry {
            program_id: DEVNET_PROGRAM,
            data: instruction.data().to_vec(),
            accounts: instruction.accounts().to_vec(),
        })
    }

    fn transfer() -> Entry {
        Entry {
            program_id: SYSTEM_PROGRAM,
            data: vec![2, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0],
            accounts: vec![
                AccountMeta::signing(key(1), Writable::Yes),
                AccountMeta::new(key(2), Writable::Yes),
            ],
        }
    }

    #[test]
    fn only_program_entries_are_decoded() -> TestResult {
        // Given
        let batch = vec![update(1)?, transfer(), update(2)?, transfer(), update(3)?];

        // When
        let decoded = scan(batch, &DEVNET_PROGRAM)?;

        // Then
        let values: Vec<_> = decoded
            .iter()
            .map(|instruction| instruction.param("val").and_then(|value| value.as_u64()))
            .collect();
        assert_eq!(values, vec![Some(1), Some(2), Some(3)]);

        Ok(())
    }

    #[test]
    fn first_failure_stops_the_scan() -> TestResult {
        // Given
        let mut broken = update(2)?;
        broken.accounts.pop();
        let mut garbage = update(3)?;
        garbage.data.truncate(4);
        let batch = vec![update(1)?, transfer(), broken, garbage];

        // When
        let res = scan(batch, &DEVNET_PROGRAM);

        // Then
        assert!(matches!(
            res,
            Err(Error::Scan { position: 2, ref cause })
                if matches!(**cause, Error::Account(account::Error::AccountCountMismatch { .. }))
        ));

        Ok(())
    }

    #[test]
    fn empty_batch() -> TestResult {
        assert!(scan(vec![transfer()], &DEVNET_PROGRAM)?.is_empty());

        Ok(())
    }
}
