// File: src/crypto/pubkey.rs
// Project: Supernode Client
// Creation date: Wednesday 14 October 2026
// Author: Vincent Berthier <vincent.berthier@posteo.org>
// -----
// Last modified: Wednesday 14 October 2026 @ 11:55:45
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
    fmt::{Debug, Display, Formatter},
    str::FromStr,
};

use borsh::{BorshDeserialize, BorshSerialize};
use curve25519_dalek::edwards::CompressedEdwardsY;
use ed25519_dalek::{VerifyingKey, PUBLIC_KEY_LENGTH};
use tracing::{trace, warn};

use super::{Error, Result};

/// A 32 bytes address: a wallet, a program or a derived account.
///
/// On the wire it is the raw 32 bytes, without any length prefix.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, BorshSerialize, BorshDeserialize)]
pub struct Pubkey {
    /// Byte representation of the public key.
    key: [u8; PUBLIC_KEY_LENGTH],
}

impl Pubkey {
    /// Creates a public key from an array of bytes.
    ///
    /// # Parameters
    /// * `bytes` - Byte array of length 32 representing the public key.
    ///
    /// # Returns
    /// The newly created public key.
    ///
    /// # Example
    /// ```rust
    /// # use supernode_client::crypto::Pubkey;
    /// let array = [0_u8; 32];
    /// let pubkey = Pubkey::from_bytes(&array);
    /// ```
    #[must_use]
    pub const fn from_bytes(bytes: &[u8; PUBLIC_KEY_LENGTH]) -> Self {
        Self { key: *bytes }
    }

    /// Creates a public key from a slice, checking its length.
    ///
    /// # Errors
    /// If the slice is not exactly 32 bytes long.
    pub fn try_from_slice(bytes: &[u8]) -> Result<Self> {
        let key: [u8; PUBLIC_KEY_LENGTH] = bytes.try_into().map_err(|_err| {
            warn!("got {} bytes for an address", bytes.len());
            Error::WrongKeyLength(bytes.len())
        })?;
        Ok(Self { key })
    }

    /// The raw bytes of the address.
    #[must_use]
    pub const fn to_bytes(&self) -> [u8; PUBLIC_KEY_LENGTH] {
        self.key
    }

    /// Check if the public key is on or off the `ed25519` curve
    ///
    /// # Returns
    /// `true` if the public key is on the `ed25519` curve, false otherwise.
    ///
    /// # Example
    /// ```rust
    /// # use supernode_client::crypto::{Keypair, Error};
    /// let key = Keypair::generate()?.pubkey();
    /// assert!(key.is_oncurve());
    ///
    /// # Ok::<(), Error>(())
    /// ```
    #[must_use]
    pub fn is_oncurve(&self) -> bool {
        trace!("checking if {self} is on curve");
        CompressedEdwardsY(self.key).decompress().is_some()
    }
}

impl From<VerifyingKey> for Pubkey {
    fn from(value: VerifyingKey) -> Self {
        Self {
            key: value.to_bytes(),
        }
    }
}

impl TryFrom<&Pubkey> for VerifyingKey {
    type Error = Error;

    fn try_from(value: &Pubkey) -> Result<Self> {
        Ok(Self::from_bytes(&value.key)?)
    }
}

impl FromStr for Pubkey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let decoded = bs58::decode(s).into_vec()?;
        Self::try_from_slice(&decoded)
    }
}

#[mutants::skip]
impl Debug for Pubkey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let encoded = bs58::encode(&self.key).into_string();
        write!(f, "{encoded}")
    }
}

#[mutants::skip]
impl Display for Pubkey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let encoded = bs58::encode(&self.key).into_string();
        write!(f, "{encoded}")
    }
}

#[mutants::skip]
impl AsRef<[u8]> for Pubkey {
    fn as_ref(&self) -> &[u8] {
        &self.key
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use test_log::test;

    use super::*;
    type TestResult = core::result::Result<(), Box<dyn core::error::Error>>;

    #[test]
    fn parse_and_display_base58() -> TestResult {
        // Given
        let text = "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA";

        // When
        let key: Pubkey = text.parse()?;

        // Then
        assert_eq!(key.to_bytes()[0], 6);
        assert_eq!(key.to_bytes()[31], 169);
        assert_eq!(key.to_string(), text);

        Ok(())
    }

    #[test]
    fn reject_wrong_lengths() {
        // When
        let short = "3yZe7d".parse::<Pubkey>();
        let slice = Pubkey::try_from_slice(&[1; 31]);

        // Then
        assert!(matches!(short, Err(Error::WrongKeyLength(_))));
        assert!(matches!(slice, Err(Error::WrongKeyLength(31))));
    }

    #[test]
    fn reject_invalid_base58() {
        let res = "not-base58-0OIl".parse::<Pubkey>();

        assert!(matches!(res, Err(Error::Bs58Decoding(_))));
    }

    #[test]
    fn borsh_encoding_is_raw_bytes() -> TestResult {
        // Given
        let key = Pubkey::from_bytes(&[7; 32]);

        // When
        let encoded = borsh::to_vec(&key)?;

        // Then
        assert_eq!(encoded, vec![7; 32]);
        assert_eq!(Pubkey::try_from_slice(&encoded)?, key);

        Ok(())
    }
}
