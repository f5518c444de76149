// File: src/transport/blockhash.rs
// Project: Supernode Client
// Creation date: Tuesday 13 October 2026
// Author: Vincent Berthier <vincent.berthier@posteo.org>
// -----
// Last modified: Wednesday 14 October 2026 @ 10:18:07
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
    fmt::{self, Debug, Display},
    str::FromStr,
};

use sha2::{Digest, Sha256};
use tracing::warn;

use super::{Error, Result};

/// Length of a block hash, in bytes.
pub const BLOCKHASH_LENGTH: usize = 32;

/// The freshness token of a submission: a recent block hash.
///
/// Submissions are only accepted while their block hash is recent.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Blockhash([u8; BLOCKHASH_LENGTH]);

impl Blockhash {
    /// Wraps raw bytes.
    #[must_use]
    pub const fn new(bytes: [u8; BLOCKHASH_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Wraps raw bytes of unchecked length.
    ///
    /// # Errors
    /// If `bytes` is not 32 bytes long.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let bytes = bytes.try_into().map_err(|_err| {
            warn!("got a {} bytes block hash", bytes.len());
            Error::WrongHashLength(bytes.len())
        })?;
        Ok(Self(bytes))
    }

    /// The hash following this one.
    #[must_use]
    pub fn next(&self) -> Self {
        let mut bytes = [0; BLOCKHASH_LENGTH];
        bytes.copy_from_slice(&Sha256::digest(self.0));
        Self(bytes)
    }

    /// The raw bytes.
    #[must_use]
    pub const fn to_bytes(&self) -> [u8; BLOCKHASH_LENGTH] {
        self.0
    }
}

#[mutants::skip]
impl Debug for Blockhash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", bs58::encode(self).into_string())
    }
}

#[mutants::skip]
impl Display for Blockhash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

impl FromStr for Blockhash {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let bytes = bs58::decode(s).into_vec()?;
        Self::from_bytes(&bytes)
    }
}

impl AsRef<[u8]> for Blockhash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use test_log::test;

    use super::*;
    type TestResult = core::result::Result<(), Box<dyn core::error::Error>>;

    #[test]
    fn parse_block_hash() -> TestResult {
        // Given
        const VALID: &str = "11111111111111111111111111111111";
        const TOO_LONG: &str =
            "LBAaWVMKZ5gCv1EJvgKwTrLSpnz8uJQ7E3zdhTXaFg4UaiLP9aPK5dmccZK2qKfZjYgc16kzd";

        // When
        let valid: Blockhash = VALID.parse()?;
        let too_long: Result<Blockhash> = TOO_LONG.parse();
        let too_short = Blockhash::from_bytes(&[0; 12]);

        // Then
        assert_eq!(valid, Blockhash::default());
        assert!(matches!(too_long, Err(Error::WrongHashLength(_))));
        assert!(matches!(too_short, Err(Error::WrongHashLength(12))));

        Ok(())
    }

    #[test]
    fn hashes_move_forward() {
        let genesis = Blockhash::default();

        assert_ne!(genesis.next(), genesis);
        assert_eq!(genesis.next(), genesis.next());
    }
}
