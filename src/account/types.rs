// File: src/account/types.rs
// Project: Supernode Client
// Creation date: Monday 12 October 2026
// Author: Vincent Berthier <vincent.berthier@posteo.org>
// -----
// Last modified: Wednesday 14 October 2026 @ 13:42:14
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

/// Determines if an account is read-only or writable
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Writable {
    /// The account is writable
    Yes,
    /// The account is read-only.
    #[default]
    No,
}

impl From<Writable> for bool {
    fn from(value: Writable) -> Self {
        matches!(value, Writable::Yes)
    }
}

/// The two independent capabilities an account reference can carry.
///
/// Used both for what a reference *has* and for what a slot *requires*.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Capability {
    /// The account may be modified by the instruction.
    pub writable: bool,
    /// The account must sign the submission.
    pub signer: bool,
}

impl Capability {
    /// Read-only, non signing.
    pub const READONLY: Self = Self::new(false, false);
    /// Writable, non signing.
    pub const WRITABLE: Self = Self::new(true, false);
    /// Read-only signer.
    pub const SIGNER: Self = Self::new(false, true);
    /// Writable signer.
    pub const WRITABLE_SIGNER: Self = Self::new(true, true);

    /// Build a capability from its two flags.
    #[must_use]
    pub const fn new(writable: bool, signer: bool) -> Self {
        Self { writable, signer }
    }

    /// Checks that every flag set in `required` is also set here.
    ///
    /// # Example
    /// ```rust
    /// # use supernode_client::account::Capability;
    /// assert!(Capability::WRITABLE_SIGNER.covers(Capability::SIGNER));
    /// assert!(!Capability::SIGNER.covers(Capability::WRITABLE));
    /// ```
    #[must_use]
    pub const fn covers(self, required: Self) -> bool {
        (self.writable || !required.writable) && (self.signer || !required.signer)
    }

    /// Union of the two capabilities.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self::new(self.writable || other.writable, self.signer || other.signer)
    }
}

#[mutants::skip]
impl Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.writable, self.signer) {
            (true, true) => write!(f, "writable signer"),
            (true, false) => write!(f, "writable"),
            (false, true) => write!(f, "signer"),
            (false, false) => write!(f, "read-only"),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn coverage_of_requirements() {
        // Given
        let all = [
            Capability::READONLY,
            Capability::WRITABLE,
            Capability::SIGNER,
            Capability::WRITABLE_SIGNER,
        ];

        // Then
        for cap in all {
            assert!(cap.covers(Capability::READONLY));
            assert!(Capability::WRITABLE_SIGNER.covers(cap));
        }
        assert!(!Capability::WRITABLE.covers(Capability::SIGNER));
        assert!(!Capability::SIGNER.covers(Capability::WRITABLE));
        assert!(!Capability::WRITABLE.covers(Capability::WRITABLE_SIGNER));
    }

    #[test]
    fn union_keeps_every_flag() {
        assert_eq!(
            Capability::WRITABLE.union(Capability::SIGNER),
            Capability::WRITABLE_SIGNER
        );
        assert_eq!(
            Capability::READONLY.union(Capability::READONLY),
            Capability::READONLY
        );
    }
}
