// File: src/crypto/seeds.rs
// Project: Supernode Client
// Creation date: Wednesday 14 October 2026
// Author: Vincent Berthier <vincent.berthier@posteo.org>
// -----
// Last modified: Thursday 15 October 2026 @ 13:32:24
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

use std::fmt::{self, Debug};

use sha2::{Digest, Sha256};
use tracing::{debug, instrument, trace, warn};

use super::{pubkey::Pubkey, Error, Result};

/// Maximum length of a single seed.
pub const MAX_SEED_LEN: usize = 32;
/// Maximum number of seeds, the bump included.
pub const MAX_SEEDS: usize = 16;

/// Domain separator appended after the owning program.
const PDA_MARKER: &[u8] = b"ProgramDerivedAddress";

/// The seeds to use to derive an off-curve address owned by a program.
///
/// The derived address is `sha256(seeds ‖ bump ‖ program ‖ "ProgramDerivedAddress")`
/// for the first bump, from 255 down to 0, that lands off the `ed25519` curve.
pub struct Seeds {
    /// Number of seeds.
    n: usize,
    /// `Hasher` fed with the seeds so far.
    hasher: Sha256,
}

impl Seeds {
    /// Create a new `Seeds` object from one or more individual seeds.
    ///
    /// # Parameters
    /// * `seeds` - The seeds (an array of `u8` slices),
    ///
    /// # Errors
    /// If too many seeds where given, or if one of them is longer than 32 bytes.
    ///
    /// # Example
    /// ```rust
    /// # use supernode_client::crypto::{Seeds, Pubkey, Error};
    /// let seeds = Seeds::new(&[b"seed 1", b"seed 2"])?;
    ///
    /// # Ok::<(), Error>(())
    /// ```
    pub fn new<S>(seeds: &[S]) -> Result<Self>
    where
        S: AsRef<[u8]>,
    {
        let mut res = Self {
            n: 0,
            hasher: Sha256::new(),
        };
        res.add(seeds)?;
        Ok(res)
    }

    /// Add new seeds after the existing ones.
    ///
    /// # Parameters
    /// * `seeds` - The seeds (an array of `u8` slices),
    ///
    /// # Errors
    /// If too many seeds where added, or if one of them is longer than 32 bytes.
    /// Nothing is added when an error is returned.
    ///
    /// # Example
    /// ```rust
    /// # use supernode_client::crypto::{Seeds, Keypair, Error};
    /// let mut seeds = Seeds::new(&[b"provider_stake_info"])?;
    /// let provider = Keypair::generate()?.pubkey();
    /// seeds.add(&[&provider])?;
    ///
    /// # Ok::<(), Error>(())
    /// ```
    pub fn add<S>(&mut self, seeds: &[S]) -> Result<()>
    where
        S: AsRef<[u8]>,
    {
        // one more slot is taken by the bump
        let count = self.n + seeds.len() + 1;
        if count > MAX_SEEDS {
            warn!("tried to set too many seeds");
            return Err(Error::TooManySeeds { count });
        }
        if let Some((index, seed)) = seeds
            .iter()
            .enumerate()
            .find(|(_, seed)| seed.as_ref().len() > MAX_SEED_LEN)
        {
            let len = seed.as_ref().len();
            warn!("seed {index} is too long ({len} bytes)");
            return Err(Error::SeedTooLong {
                index: self.n + index,
                len,
            });
        }
        self.n += seeds.len();
        seeds.iter().for_each(|seed| self.hasher.update(seed));

        Ok(())
    }

    fn hash_with_bump(&self, program: &Pubkey, bump: u8) -> Pubkey {
        let mut hasher = self.hasher.clone();
        hasher.update([bump]);
        hasher.update(program);
        hasher.update(PDA_MARKER);
        let bytes: [u8; 32] = hasher.finalize().into();
        Pubkey::from_bytes(&bytes)
    }

    /// Derive the off-curve address of the seeds for a program.
    ///
    /// The bump is searched from 255 downward and the first one giving an
    /// off-curve address is kept. The result only depends on the seeds and
    /// the program.
    ///
    /// # Parameters
    /// * `program` - The program owning the derived address.
    ///
    /// # Returns
    /// A tuple `(Pubkey, u8)` with the derived address and its bump.
    ///
    /// # Errors
    /// If no bump gives an off-curve address.
    ///
    /// # Example
    /// ```rust
    /// # use supernode_client::crypto::{Seeds, Pubkey, Error};
    /// let program = Pubkey::from_bytes(&[1; 32]);
    /// let seeds = Seeds::new(&[b"supernode"])?;
    /// let (key, bump) = seeds.derive(&program)?;
    /// assert!(!key.is_oncurve());
    /// assert_eq!(seeds.derive_with_bump(&program, bump)?, key);
    ///
    /// # Ok::<(), Error>(())
    /// ```
    #[instrument(skip_all, fields(%program))]
    pub fn derive(&self, program: &Pubkey) -> Result<(Pubkey, u8)> {
        debug!("deriving program address");
        for bump in (0..=u8::MAX).rev() {
            trace!("trying with bump {bump}");
            let key = self.hash_with_bump(program, bump);
            if !key.is_oncurve() {
                trace!("resulting key '{key}' is off-curve, returning");
                return Ok((key, bump));
            }
        }
        warn!("no bump gives an off-curve address for these seeds");
        Err(Error::NoViableBumpFound)
    }

    /// Derive the address for a bump known in advance, skipping the search.
    ///
    /// # Errors
    /// If the resulting address is on the curve.
    #[instrument(skip_all, fields(%program, bump))]
    pub fn derive_with_bump(&self, program: &Pubkey, bump: u8) -> Result<Pubkey> {
        debug!("deriving program address with a known bump");
        let key = self.hash_with_bump(program, bump);
        if key.is_oncurve() {
            warn!("bump {bump} gives an on-curve address");
            return Err(Error::InvalidSeeds { bump });
        }
        Ok(key)
    }
}

#[mutants::skip]
impl Debug for Seeds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Seeds {{ n: {} }}", self.n)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use test_log::test;

    use super::*;
    type TestResult = core::result::Result<(), Box<dyn core::error::Error>>;

    fn program() -> core::result::Result<Pubkey, Box<dyn core::error::Error>> {
        Ok("B8YWYgxzsxGDuua6qsXZAvxL3huy5qy9AtL6AEmAVCCM".parse()?)
    }

    #[test]
    fn derive_known_address() -> TestResult {
        // Given
        let seeds = Seeds::new(&[b"supernode"])?;

        // When
        let (key, bump) = seeds.derive(&program()?)?;

        // Then
        assert_eq!(key, "5NPfZdTNFEi18yUtgaPbZkXkbPMsSgwJ21YA1Hax7wUL".parse()?);
        assert_eq!(bump, 254);
        assert!(!key.is_oncurve());

        Ok(())
    }

    #[test]
    fn derive_with_path_seed() -> TestResult {
        // Given
        let provider = Pubkey::from_bytes(&[7; 32]);
        let mut seeds = Seeds::new(&[b"provider_stake_info"])?;
        seeds.add(&[provider])?;

        // When
        let (key, bump) = seeds.derive(&program()?)?;

        // Then
        assert_eq!(key, "G2U95LSfC5rmHoFNJtKz7So2PJHbWpCU2KQFwa5khm7r".parse()?);
        assert_eq!(bump, 254);

        Ok(())
    }

    #[test]
    fn derivation_is_deterministic() -> TestResult {
        // Given
        let program = program()?;
        let seeds = Seeds::new(&[b"supernode"])?;

        // When
        let first = seeds.derive(&program)?;
        let second = Seeds::new(&[b"supernode"])?.derive(&program)?;

        // Then
        assert_eq!(first, second);

        Ok(())
    }

    #[test]
    fn single_byte_change_moves_the_address() -> TestResult {
        // Given
        let program = program()?;
        let mut provider = [7_u8; 32];
        let (reference, _) = Seeds::new(&[b"tenant_info".as_slice(), &provider])?.derive(&program)?;

        // When
        provider[31] = 8;
        let (moved, _) = Seeds::new(&[b"tenant_info".as_slice(), &provider])?.derive(&program)?;

        // Then
        assert_ne!(reference, moved);

        Ok(())
    }

    #[test]
    fn known_bump_must_be_off_curve() -> TestResult {
        // Given
        let program = program()?;
        let seeds = Seeds::new(&[b"supernode"])?;

        // When
        let on_curve = seeds.derive_with_bump(&program, 255);
        let off_curve = seeds.derive_with_bump(&program, 254)?;

        // Then
        assert!(matches!(on_curve, Err(Error::InvalidSeeds { bump: 255 })));
        assert_eq!(off_curve, seeds.derive(&program)?.0);

        Ok(())
    }

    #[test]
    fn prevent_too_many_seeds() -> TestResult {
        // Given
        let mut normal_seeds = Seeds::new(&[[0; 4]; MAX_SEEDS - 1])?;

        // When
        let init_seeds = Seeds::new(&[[0; 4]; MAX_SEEDS]);
        let add_seeds = normal_seeds.add(&[[0_u8; 2]]);

        // Then
        assert!(matches!(init_seeds, Err(Error::TooManySeeds { count: 17 })));
        assert!(matches!(add_seeds, Err(Error::TooManySeeds { count: 17 })));

        Ok(())
    }

    #[test]
    fn prevent_long_seeds() -> TestResult {
        // Given
        let mut seeds = Seeds::new(&[[1_u8; MAX_SEED_LEN]])?;

        // When
        let res = seeds.add(&[[0_u8; 4].as_slice(), &[0_u8; MAX_SEED_LEN + 1]]);

        // Then
        assert!(matches!(res, Err(Error::SeedTooLong { index: 2, len: 33 })));

        Ok(())
    }
}
