// File: src/codec/discriminator.rs
// Project: Supernode Client
// Creation date: Thursday 15 October 2026
// Author: Vincent Berthier <vincent.berthier@posteo.org>
// -----
// Last modified: Friday 16 October 2026 @ 11:14:43
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

use std::fmt::{self, Debug, Display};

use borsh::{BorshDeserialize, BorshSerialize};
use sha2::{Digest, Sha256};
use tracing::warn;

use super::{Error, Result};

/// Length of a discriminator, in bytes.
pub const DISCRIMINATOR_LENGTH: usize = 8;

/// The 8 bytes tag at the start of every instruction payload, account and event.
///
/// It is the start of `sha256("<namespace>:<name>")`, with the namespace
/// `global` for instructions, `account` for accounts and `event` for events.
#[derive(Clone, Copy, PartialEq, Eq, Hash, BorshSerialize, BorshDeserialize)]
pub struct Discriminator([u8; DISCRIMINATOR_LENGTH]);

impl Discriminator {
    /// Wraps raw bytes.
    #[must_use]
    pub const fn new(bytes: [u8; DISCRIMINATOR_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Computes the discriminator of an instruction from its snake case name.
    ///
    /// # Example
    /// ```rust
    /// # use supernode_client::codec::Discriminator;
    /// let tag = Discriminator::for_instruction("claim_reward");
    /// assert_eq!(tag.to_bytes(), [149, 95, 181, 242, 94, 90, 158, 162]);
    /// ```
    #[must_use]
    pub fn for_instruction(name: &str) -> Self {
        Self::hashed("global", name)
    }

    /// Computes the discriminator of an account record from its type name.
    #[must_use]
    pub fn for_account(name: &str) -> Self {
        Self::hashed("account", name)
    }

    /// Computes the discriminator of an event record from its type name.
    #[must_use]
    pub fn for_event(name: &str) -> Self {
        Self::hashed("event", name)
    }

    fn hashed(namespace: &str, name: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(namespace);
        hasher.update(":");
        hasher.update(name);
        let hash = hasher.finalize();
        let mut bytes = [0; DISCRIMINATOR_LENGTH];
        bytes.copy_from_slice(&hash[..DISCRIMINATOR_LENGTH]);
        Self(bytes)
    }

    /// Splits the leading discriminator off a payload.
    ///
    /// # Errors
    /// If the payload is shorter than a discriminator.
    pub fn split(data: &[u8]) -> Result<(Self, &[u8])> {
        if data.len() < DISCRIMINATOR_LENGTH {
            warn!("payload of {} bytes cannot hold a discriminator", data.len());
            return Err(Error::TruncatedInput {
                offset: 0,
                needed: DISCRIMINATOR_LENGTH,
                remaining: data.len(),
            });
        }
        let (head, tail) = data.split_at(DISCRIMINATOR_LENGTH);
        let mut bytes = [0; DISCRIMINATOR_LENGTH];
        bytes.copy_from_slice(head);
        Ok((Self(bytes), tail))
    }

    /// Splits the leading discriminator off a payload, checking it is the expected one.
    ///
    /// # Errors
    /// If the payload is too short, or starts with another discriminator.
    pub fn strip<'a>(&self, data: &'a [u8]) -> Result<&'a [u8]> {
        let (observed, tail) = Self::split(data)?;
        if observed != *self {
            warn!("expected discriminator {self}, got {observed}");
            return Err(Error::DiscriminatorMismatch {
                expected: *self,
                observed,
            });
        }
        Ok(tail)
    }

    /// The raw bytes.
    #[must_use]
    pub const fn to_bytes(&self) -> [u8; DISCRIMINATOR_LENGTH] {
        self.0
    }
}

#[mutants::skip]
impl Display for Discriminator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

#[mutants::skip]
impl Debug for Discriminator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Discriminator({:?})", self.0)
    }
}

impl AsRef<[u8]> for Discriminator {
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
    fn namespaces_give_distinct_tags() {
        assert_eq!(
            Discriminator::for_account("TenantInfo").to_bytes(),
            [239, 62, 8, 238, 217, 205, 200, 193]
        );
        assert_eq!(
            Discriminator::for_event("WithdrawEvent").to_bytes(),
            [22, 9, 133, 26, 160, 44, 71, 192]
        );
        assert_ne!(
            Discriminator::for_account("TenantInfo"),
            Discriminator::for_event("TenantInfo")
        );
    }

    #[test]
    fn split_short_payloads() {
        // When
        let res = Discriminator::split(&[1, 2, 3]);

        // Then
        assert!(matches!(
            res,
            Err(Error::TruncatedInput { offset: 0, needed: 8, remaining: 3 })
        ));
    }

    #[test]
    fn strip_checks_the_tag() -> TestResult {
        // Given
        let expected = Discriminator::for_instruction("release");
        let other = Discriminator::for_instruction("releasable");
        let mut data = other.to_bytes().to_vec();
        data.push(42);

        // When
        let mismatch = expected.strip(&data);
        let tail = other.strip(&data)?;

        // Then
        assert!(matches!(
            mismatch,
            Err(Error::DiscriminatorMismatch { expected: e, observed: o }) if e == expected && o == other
        ));
        assert_eq!(tail, &[42]);

        Ok(())
    }
}
