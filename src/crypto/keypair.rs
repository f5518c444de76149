// File: src/crypto/keypair.rs
// Project: Supernode Client
// Creation date: Wednesday 14 October 2026
// Author: Vincent Berthier <vincent.berthier@posteo.org>
// -----
// Last modified: Friday 16 October 2026 @ 18:46:55
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
    fmt,
    sync::{Mutex, OnceLock},
};

use ed25519_dalek::{ed25519::signature::Signer, SecretKey, SigningKey};
use rand::SeedableRng as _;
use rand_chacha::ChaCha20Rng;
use tracing::{debug, info, instrument};

use super::{pubkey::Pubkey, Error, Result, Signature};

static RNG: OnceLock<Mutex<ChaCha20Rng>> = OnceLock::new();

/// A signing credential.
pub struct Keypair {
    key: SigningKey,
}

impl Keypair {
    /// Randomly generates a private key.
    ///
    /// # Returns
    /// A private key
    ///
    /// # Errors
    /// If the lock on the random engine could not be obtained.
    ///
    /// # Example
    /// ```rust
    /// # use supernode_client::crypto::{Keypair, Error};
    /// let key = Keypair::generate()?;
    /// # Ok::<(), Error>(())
    /// ```
    #[instrument]
    pub fn generate() -> Result<Self> {
        debug!("generating new keypair");
        let mut rng = RNG
            .get_or_init(init_rand_engine)
            .lock()
            .map_err(|_err| Error::RandomEnginePoisonedLock)?;
        Ok(Self {
            key: SigningKey::generate(&mut *rng),
        })
    }

    /// Rebuilds a credential from its 32 bytes secret.
    #[must_use]
    pub fn from_secret(secret: &SecretKey) -> Self {
        Self {
            key: SigningKey::from_bytes(secret),
        }
    }

    /// Get the public key associated with the private key.
    ///
    /// # Example
    /// ```rust
    /// # use supernode_client::crypto::{Keypair, Error};
    /// let private_key = Keypair::generate()?;
    /// let public_key = private_key.pubkey();
    ///
    /// # Ok::<(), Error>(())
    /// ```
    #[must_use]
    pub fn pubkey(&self) -> Pubkey {
        self.key.verifying_key().into()
    }

    /// Sign a message.
    ///
    /// # Parameters
    /// * `message` - The message to sign,
    ///
    /// # Returns
    /// The signature of the message
    #[instrument(skip_all, fields(key = %self.pubkey()))]
    pub fn sign<B>(&self, message: B) -> Signature
    where
        B: AsRef<[u8]>,
    {
        debug!("signing message");
        self.key.sign(message.as_ref()).into()
    }
}

#[mutants::skip]
impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Keypair {{ pubkey: {} }}", self.pubkey())
    }
}

#[cfg(test)]
fn init_rand_engine() -> Mutex<ChaCha20Rng> {
    info!("Initialized keypair random generator in TEST MODE");
    let seed = 0_u64;
    let rng = ChaCha20Rng::seed_from_u64(seed);

    Mutex::new(rng)
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(not(test))]
fn init_rand_engine() -> Mutex<ChaCha20Rng> {
    info!("Initialized keypair random generator");
    let rng = ChaCha20Rng::from_entropy();

    Mutex::new(rng)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use test_log::test;

    use super::*;
    type TestResult = core::result::Result<(), Box<dyn core::error::Error>>;

    #[test]
    fn generated_keys_are_on_curve() -> TestResult {
        // When
        let first = Keypair::generate()?.pubkey();
        let second = Keypair::generate()?.pubkey();

        // Then
        assert!(first.is_oncurve());
        assert!(second.is_oncurve());
        assert_ne!(first, second);

        Ok(())
    }

    #[test]
    fn secret_restores_the_same_key() {
        // Given
        let secret = [42_u8; 32];

        // When
        let first = Keypair::from_secret(&secret);
        let second = Keypair::from_secret(&secret);

        // Then
        assert_eq!(first.pubkey(), second.pubkey());
        assert_eq!(first.sign(b"msg"), second.sign(b"msg"));
    }
}
