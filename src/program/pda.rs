// File: src/program/pda.rs
// Project: Supernode Client
// Creation date: Wednesday 14 October 2026
// Author: Vincent Berthier <vincent.berthier@posteo.org>
// -----
// Last modified: Friday 16 October 2026 @ 11:07:45
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

use std::fmt::{self, Display};

use tracing::{debug, instrument, trace, warn};

use crate::crypto::{self, Error, Pubkey, Seeds};

/// Where the address seed of a derived account comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathSeed {
    /// The instruction's `provider` account.
    Provider,
    /// The instruction's `tenant` account.
    Tenant,
}

impl PathSeed {
    /// Name of the account slot holding the seed.
    #[must_use]
    pub const fn slot(self) -> &'static str {
        match self {
            Self::Provider => "provider",
            Self::Tenant => "tenant",
        }
    }
}

/// The accounts of the program whose address is derived from seeds.
///
/// The seeds are a constant prefix, optionally followed by the address of
/// the provider or tenant the account belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pda {
    /// The global program state.
    Supernode,
    /// Token account holding the stakes.
    SupernodeStakeAccount,
    /// Token account holding the vested tokens.
    SupernodeVestingAccount,
    /// Token account holding the rental fees.
    SupernodeRentalAccount,
    /// Token account holding the rewards.
    SupernodeRewardAccount,
    /// Token account used when releasing vested tokens.
    SupernodeTokenAccount,
    /// Stake information of a provider.
    ProviderStakeInfo,
    /// Vesting information of a provider.
    ProviderVestingInfo,
    /// Funds of a tenant.
    TenantInfo,
}

impl Pda {
    /// Every recipe, in declaration order.
    pub const ALL: [Self; 9] = [
        Self::Supernode,
        Self::SupernodeStakeAccount,
        Self::SupernodeVestingAccount,
        Self::SupernodeRentalAccount,
        Self::SupernodeRewardAccount,
        Self::SupernodeTokenAccount,
        Self::ProviderStakeInfo,
        Self::ProviderVestingInfo,
        Self::TenantInfo,
    ];

    /// The constant seed of the recipe.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Supernode => "supernode",
            Self::SupernodeStakeAccount => "supernode_stake_account",
            Self::SupernodeVestingAccount => "supernode_vesting_account",
            Self::SupernodeRentalAccount => "supernode_rental_account",
            Self::SupernodeRewardAccount => "supernode_reward_account",
            Self::SupernodeTokenAccount => "supernode_token_account",
            Self::ProviderStakeInfo => "provider_stake_info",
            Self::ProviderVestingInfo => "provider_vesting_info",
            Self::TenantInfo => "tenant_info",
        }
    }

    /// The address seed following the prefix, if any.
    #[must_use]
    pub const fn path(self) -> Option<PathSeed> {
        match self {
            Self::ProviderStakeInfo | Self::ProviderVestingInfo => Some(PathSeed::Provider),
            Self::TenantInfo => Some(PathSeed::Tenant),
            _ => None,
        }
    }

    /// Build the seeds of the recipe.
    ///
    /// # Parameters
    /// * `path` - The provider or tenant address, for recipes that need one.
    ///   It is ignored by the others.
    ///
    /// # Errors
    /// If the recipe needs a path seed and none was given.
    pub fn seeds(self, path: Option<&Pubkey>) -> crypto::Result<Seeds> {
        let mut seeds = Seeds::new(&[self.prefix()])?;
        match (self.path(), path) {
            (Some(_), Some(key)) => seeds.add(&[key])?,
            (Some(_), None) => {
                warn!("no path seed given for '{self}'");
                return Err(Error::MissingPathSeed {
                    recipe: self.prefix(),
                });
            }
            (None, Some(_)) => trace!("'{self}' takes no path seed, ignoring it"),
            (None, None) => {}
        }
        Ok(seeds)
    }

    /// Derive the address and bump of the recipe for a program.
    ///
    /// # Errors
    /// If the path seed is missing, or no bump gives an off-curve address.
    ///
    /// # Example
    /// ```rust
    /// # use supernode_client::crypto::{Error, Pubkey};
    /// # use supernode_client::program::{Pda, DEVNET_PROGRAM};
    /// let (supernode, bump) = Pda::Supernode.derive(&DEVNET_PROGRAM, None)?;
    /// assert_eq!(supernode, "5NPfZdTNFEi18yUtgaPbZkXkbPMsSgwJ21YA1Hax7wUL".parse()?);
    /// assert_eq!(bump, 254);
    ///
    /// # Ok::<(), Error>(())
    /// ```
    #[instrument(skip_all, fields(recipe = %self, %program))]
    pub fn derive(self, program: &Pubkey, path: Option<&Pubkey>) -> crypto::Result<(Pubkey, u8)> {
        debug!("deriving account address");
        self.seeds(path)?.derive(program)
    }

    /// Same as [`Pda::derive`], without the bump.
    ///
    /// # Errors
    /// Same as [`Pda::derive`].
    pub fn address(self, program: &Pubkey, path: Option<&Pubkey>) -> crypto::Result<Pubkey> {
        Ok(self.derive(program, path)?.0)
    }
}

#[mutants::skip]
impl Display for Pda {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.prefix())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use test_log::test;

    use crate::program::DEVNET_PROGRAM;

    use super::*;
    type TestResult = core::result::Result<(), Box<dyn core::error::Error>>;

    #[test]
    fn program_wide_addresses() -> TestResult {
        // Given
        let expected = [
            (Pda::Supernode, "5NPfZdTNFEi18yUtgaPbZkXkbPMsSgwJ21YA1Hax7wUL", 254),
            (Pda::SupernodeStakeAccount, "5Ncvh7xM5zArAgGdRfstE8Em7exjHJET2Da9GAWXWmGi", 255),
            (Pda::SupernodeVestingAccount, "AqSTkdnUUmYxWYyfdo26gpbLJEAUnDexRNW3qRmJxiJu", 255),
            (Pda::SupernodeRentalAccount, "948DR3n33nRCJSCBvtgFf62smeyeu2dNsP1A2ZhSEHDZ", 253),
            (Pda::SupernodeRewardAccount, "HoVAb9BNYEX1nR7orUnFGsF7aKXLyrZoSovNHj2yQKyU", 255),
            (Pda::SupernodeTokenAccount, "YMJ2bvpXR5BVm7pDKJSCqrsQPY9T7aNoXcQAmygJQrg", 255),
        ];

        for (recipe, address, bump) in expected {
            // When
            let derived = recipe.derive(&DEVNET_PROGRAM, None)?;

            // Then
            assert_eq!(derived, (address.parse()?, bump), "for {recipe}");
        }

        Ok(())
    }

    #[test]
    fn per_owner_addresses() -> TestResult {
        // Given
        let owner = Pubkey::from_bytes(&[7; 32]);
        let expected = [
            (Pda::ProviderStakeInfo, "G2U95LSfC5rmHoFNJtKz7So2PJHbWpCU2KQFwa5khm7r", 254),
            (Pda::ProviderVestingInfo, "BrsT7C72roDWoQPSzTnopFDixaA6dUWCNEvkt7wowsxi", 255),
            (Pda::TenantInfo, "9Su35MWYM75iiqLxNcm8UnhK7viFh3T9KSAZTmMv8aYE", 254),
        ];

        for (recipe, address, bump) in expected {
            // When
            let derived = recipe.derive(&DEVNET_PROGRAM, Some(&owner))?;

            // Then
            assert_eq!(derived, (address.parse()?, bump), "for {recipe}");
        }

        Ok(())
    }

    #[test]
    fn path_seed_is_required() {
        // When
        let res = Pda::TenantInfo.derive(&DEVNET_PROGRAM, None);

        // Then
        assert!(matches!(
            res,
            Err(Error::MissingPathSeed { recipe: "tenant_info" })
        ));
    }

    #[test]
    fn path_seed_is_ignored_when_unused() -> TestResult {
        // Given
        let owner = Pubkey::from_bytes(&[7; 32]);

        // When
        let with = Pda::Supernode.address(&DEVNET_PROGRAM, Some(&owner))?;
        let without = Pda::Supernode.address(&DEVNET_PROGRAM, None)?;

        // Then
        assert_eq!(with, without);

        Ok(())
    }
}
