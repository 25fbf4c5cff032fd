//! crypt(3)-compatible password hashing and verification routines.
//
// Copyright (c) 2016 Ivan Nejgebauer <inejge@gmail.com>
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>. This file may not be copied,
// modified, or distributed except according to the terms of this
// license.
//!
//! The crate implements the four hashes found in Unix password files and
//! Apache __htpasswd__ stores: [SHA-512](sha512_crypt), [SHA-256](sha256_crypt),
//! [Apache MD5](apr1_crypt) and [MD5](md5_crypt). The results are identical
//! to those of glibc __crypt__(3) and __htpasswd__, so hashes can be moved
//! freely between this crate and those tools.
//!
//! # Getting Started
//!
//! Add the following to the `[dependencies]` section of your `Cargo.toml`:
//!
//! ```toml
//! pwcrypt = "0.1"
//! ```
//!
//! # Examples
//!
//! To hash a password with a chosen algorithm, salt size and number of
//! rounds (zero selects the default):
//!
//! ```
//! use pwcrypt::{unix, Algorithm};
//!
//! let h = unix::create("password", 16, Algorithm::Sha512, 0).unwrap();
//! assert!(h.starts_with("$6$"));
//! assert!(unix::verify("password", &h));
//! ```
//!
//! To verify a password against a hash in any supported format:
//!
//! ```
//! use pwcrypt::unix;
//!
//! assert!(unix::verify("Test", "$1$SALT$iYTuv61EcPDadxVotGguH0"));
//! assert!(!unix::verify("Test", "$1$SALT$iYTuv61EcPDadxVotGguH1"));
//! ```
//!
//! # Algorithm Modules
//!
//! Each algorithm also has its own module, offering three functions:
//!
//! * `verify` checks whether the provided hash corresponds to a password.
//!
//! * `hash` hashes a password using a random salt of maximum length and the
//!   default number of rounds.
//!
//! * `hash_with` allows the caller to customize the hashing parameters, by
//!   passing either a `HashSetup` struct or an existing hash string.
//!
//! # Parameters
//!
//! * __Password length__: unlimited. Passwords are treated as raw bytes.
//!
//! * __Salt length__: 0 to 16 characters. Longer salts are truncated.
//!
//! * __Rounds__: 1000 (fixed) for the MD5 algorithms. 1000 to 999999999 for
//!   the SHA-2 algorithms, default 5000; out-of-range values are coerced to
//!   the nearest limit.

#![warn(missing_docs)]

mod enc_dec;
mod crypt_digest;
pub mod error;
pub mod algorithm;
pub mod hash_string;
pub mod md5_crypt;
pub mod apr1_crypt;
pub mod sha256_crypt;
pub mod sha512_crypt;

pub use algorithm::Algorithm;
pub use hash_string::CryptHash;
pub use enc_dec::CRYPT_HASH64;

/// Type alias for the Result type.
pub type Result<T> = std::result::Result<T, error::Error>;

/// Setup struct for basic hashing customization.
///
/// If `salt` is set to `None`, a random salt of maximum length will be
/// generated. If `rounds` is `None` or zero, the default number of rounds
/// will be used; the MD5 algorithms ignore `rounds` altogether.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HashSetup<'a> {
    /// Custom salt.
    pub salt: Option<&'a str>,
    /// Number of rounds.
    pub rounds: Option<u32>,
}

/// A trait for converting a type into a `HashSetup` struct.
pub trait IntoHashSetup<'a> {
    /// The conversion function.
    fn into_hash_setup(self, f: fn(&'a str) -> Result<HashSetup<'a>>) -> Result<HashSetup<'a>>;
}

impl<'a> IntoHashSetup<'a> for &'a str {
    fn into_hash_setup(self, f: fn(&'a str) -> Result<HashSetup<'a>>) -> Result<HashSetup<'a>> {
	f(self)
    }
}

impl<'a> IntoHashSetup<'a> for HashSetup<'a> {
    fn into_hash_setup(self, _f: fn(&'a str) -> Result<HashSetup<'a>>) -> Result<HashSetup<'a>> {
	Ok(self)
    }
}

fn consteq(hash: &str, calchash: &str) -> bool {
    if hash.len() != calchash.len() {
	return false;
    }
    0 == hash.bytes().zip(calchash.bytes()).fold(0, |xs, (h1, h2)| xs | h1 ^ h2)
}

fn verify_as(algorithm: Option<Algorithm>, pass: &[u8], hash: &str) -> bool {
    let parsed = match hash.parse::<CryptHash>() {
	Ok(parsed) => parsed,
	Err(e) => {
	    tracing::debug!(error = %e, "hash rejected");
	    return false;
	},
    };
    if algorithm.map_or(false, |alg| alg != parsed.algorithm) {
	tracing::debug!(found = %parsed.algorithm, "hash of another algorithm rejected");
	return false;
    }
    let ok = parsed.matches(pass);
    if !ok {
	tracing::trace!(algorithm = %parsed.algorithm, "password does not match");
    }
    ok
}

mod random {
    use rand::{CryptoRng, RngCore};
    use crate::algorithm::MAX_SALT_LEN;
    use crate::enc_dec::CRYPT_HASH64;
    use crate::error::Error;
    use super::Result;

    /// Generate a salt of `len` characters, clamped to the maximum salt length.
    pub fn gen_salt<R: RngCore + CryptoRng>(rng: &mut R, len: usize) -> Result<String> {
	if len > MAX_SALT_LEN {
	    tracing::debug!(requested = len, len = MAX_SALT_LEN, "salt size coerced into range");
	}
	let len = len.min(MAX_SALT_LEN);
	let mut buf = [0u8; MAX_SALT_LEN];
	rng.try_fill_bytes(&mut buf[..len]).map_err(|e| Error::RandomError(e.to_string()))?;
	Ok(buf[..len].iter().map(|&b| CRYPT_HASH64[(b & 0x3F) as usize] as char).collect())
    }

    #[cfg(test)]
    mod tests {
	use rand::SeedableRng;
	use rand_chacha::ChaCha20Rng;
	use crate::enc_dec::check_salt;
	use super::gen_salt;

	#[test]
	fn lengths_clamped() {
	    let mut rng = ChaCha20Rng::seed_from_u64(7);
	    assert_eq!(gen_salt(&mut rng, 0).unwrap(), "");
	    assert_eq!(gen_salt(&mut rng, 8).unwrap().len(), 8);
	    assert_eq!(gen_salt(&mut rng, 16).unwrap().len(), 16);
	    assert_eq!(gen_salt(&mut rng, 1000).unwrap().len(), 16);
	}

	#[test]
	fn alphabet_only() {
	    let mut rng = ChaCha20Rng::seed_from_u64(42);
	    for _ in 0..100 {
		assert!(check_salt(&gen_salt(&mut rng, 16).unwrap()).is_ok());
	    }
	}

	#[test]
	fn seeded_is_reproducible() {
	    let a = gen_salt(&mut ChaCha20Rng::seed_from_u64(1), 16).unwrap();
	    let b = gen_salt(&mut ChaCha20Rng::seed_from_u64(1), 16).unwrap();
	    let c = gen_salt(&mut ChaCha20Rng::seed_from_u64(2), 16).unwrap();
	    assert_eq!(a, b);
	    assert_ne!(a, c);
	}
    }
}

pub mod unix {
    //! Functions covering every supported algorithm.
    //!
    //! The algorithm is either chosen by the caller, when creating a hash,
    //! or recognized from the identifier of an existing hash.
    use rand::{CryptoRng, RngCore};
    use rand::rngs::OsRng;
    use super::{Result, Algorithm, CryptHash, verify_as};
    use crate::error::Error;
    use crate::hash_string::split_hash;
    use crate::random;

    /// Hash a password with a random salt of `salt_size` characters.
    ///
    /// The salt size is clamped to 0..=16. A `rounds` value of zero selects
    /// the default number of rounds, which is then not recorded in the
    /// hash; other values are coerced into the permitted range. The MD5
    /// algorithms always use the default.
    ///
    /// Salt characters are drawn from the operating system's random number
    /// generator; an error is returned if it fails.
    pub fn create<B: AsRef<[u8]>>(pass: B, salt_size: usize, algorithm: Algorithm, rounds: u32) -> Result<String> {
	create_with_rng(&mut OsRng, pass, salt_size, algorithm, rounds)
    }

    /// Like [`create`], with a caller-provided random number generator.
    pub fn create_with_rng<R, B>(rng: &mut R, pass: B, salt_size: usize, algorithm: Algorithm, rounds: u32) -> Result<String>
	where R: RngCore + CryptoRng, B: AsRef<[u8]>
    {
	let salt = random::gen_salt(rng, salt_size)?;
	Ok(CryptHash::compute(algorithm, pass.as_ref(), &salt, Some(rounds))?.to_string())
    }

    /// Hash a password with an explicit salt.
    ///
    /// The salt bytes must belong to the crypt alphabet, otherwise an
    /// error is returned; at most 16 are used. The result depends only on
    /// the arguments.
    pub fn create_with_salt<B: AsRef<[u8]>>(pass: B, salt: &[u8], algorithm: Algorithm, rounds: u32) -> Result<String> {
	let salt = std::str::from_utf8(salt).map_err(|_| Error::EncodingError)?;
	Ok(CryptHash::compute(algorithm, pass.as_ref(), salt, Some(rounds))?.to_string())
    }

    /// A Unix __crypt__(3) work-alike.
    ///
    /// The `setting` may be a complete hash or just its prefix up to and
    /// including the salt, e.g. `$5$rounds=10000$saltstring`.
    pub fn crypt<B: AsRef<[u8]>>(pass: B, setting: &str) -> Result<String> {
	let fields = split_hash(setting, false)?;
	Ok(CryptHash::compute(fields.algorithm, pass.as_ref(), fields.salt, fields.rounds)?.to_string())
    }

    /// Verify that the hash corresponds to a password, using hash format recognition.
    ///
    /// Malformed hashes and hashes of unknown algorithms never match.
    pub fn verify<B: AsRef<[u8]>>(pass: B, hash: &str) -> bool {
	verify_as(None, pass.as_ref(), hash)
    }

}
