//! Supported algorithms and their parameters.
//
// Copyright (c) 2016 Ivan Nejgebauer <inejge@gmail.com>
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>. This file may not be copied,
// modified, or distributed except according to the terms of this
// license.
//!
//! Every algorithm is described by a small, fixed table of parameters:
//! the identifier which appears between the first two `$` signs of a hash
//! string, the default and permitted number of rounds, the size of the
//! underlying digest, and the order in which the digest bytes are encoded.
//!
//! # Example
//!
//! ```
//! use pwcrypt::Algorithm;
//!
//! let alg: Algorithm = "sha512".parse().unwrap();
//! assert_eq!(alg, Algorithm::Sha512);
//! assert_eq!(alg.id(), "6");
//! assert_eq!(Algorithm::from_id("apr1").unwrap(), Algorithm::Md5Apache);
//! ```

use std::fmt;
use std::str::FromStr;
use md5::Md5;
use sha2::{Sha256, Sha512};
use crate::crypt_digest::{crypt_digest, Family};
use crate::enc_dec::{Transpose, MD5_TRANSPOSE, SHA256_TRANSPOSE, SHA512_TRANSPOSE};
use crate::error::Error;
use super::Result;

/// Minimum rounds for the SHA-2 algorithms.
pub const MIN_ROUNDS: u32 = 1000;
/// Maximum rounds for the SHA-2 algorithms.
pub const MAX_ROUNDS: u32 = 999_999_999;
/// Default number of rounds for the SHA-2 algorithms.
pub const DEFAULT_ROUNDS: u32 = 5000;
/// Maximum salt length, for all algorithms.
pub const MAX_SALT_LEN: usize = 16;

/// A crypt(3) hashing algorithm.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// FreeBSD MD5-crypt, `$1$`.
    Md5,
    /// Apache variant of MD5-crypt, `$apr1$`, as written by __htpasswd__.
    Md5Apache,
    /// SHA-256 crypt, `$5$`.
    Sha256,
    /// SHA-512 crypt, `$6$`.
    Sha512,
}

pub(crate) struct Params {
    id: &'static str,
    digest_magic: &'static str,
    default_rounds: u32,
    adjustable: bool,
    digest_size: usize,
    transpose: &'static Transpose,
    family: Family,
}

const MD5_PARAMS: Params = Params {
    id: "1",
    digest_magic: "$1$",
    default_rounds: 1000,
    adjustable: false,
    digest_size: 16,
    transpose: &MD5_TRANSPOSE,
    family: Family::Md5,
};

const APR1_PARAMS: Params = Params {
    id: "apr1",
    digest_magic: "$apr1$",
    ..MD5_PARAMS
};

const SHA256_PARAMS: Params = Params {
    id: "5",
    digest_magic: "",
    default_rounds: DEFAULT_ROUNDS,
    adjustable: true,
    digest_size: 32,
    transpose: &SHA256_TRANSPOSE,
    family: Family::Sha2,
};

const SHA512_PARAMS: Params = Params {
    id: "6",
    digest_size: 64,
    transpose: &SHA512_TRANSPOSE,
    ..SHA256_PARAMS
};

impl Algorithm {
    /// All algorithms, strongest first.
    pub const ALL: [Algorithm; 4] = [Algorithm::Sha512, Algorithm::Sha256, Algorithm::Md5Apache, Algorithm::Md5];

    fn params(self) -> &'static Params {
	match self {
	    Algorithm::Md5 => &MD5_PARAMS,
	    Algorithm::Md5Apache => &APR1_PARAMS,
	    Algorithm::Sha256 => &SHA256_PARAMS,
	    Algorithm::Sha512 => &SHA512_PARAMS,
	}
    }

    /// Look up an algorithm by its hash string identifier.
    pub fn from_id(id: &str) -> Result<Algorithm> {
	Algorithm::ALL.iter()
	    .copied()
	    .find(|alg| alg.id() == id)
	    .ok_or_else(|| Error::UnknownAlgorithm(id.to_owned()))
    }

    /// The identifier, without the surrounding `$` signs.
    pub fn id(self) -> &'static str {
	self.params().id
    }

    /// The default number of rounds.
    pub fn default_rounds(self) -> u32 {
	self.params().default_rounds
    }

    /// Whether the number of rounds can be changed.
    pub fn rounds_adjustable(self) -> bool {
	self.params().adjustable
    }

    /// Size of the raw digest, in bytes.
    pub fn digest_size(self) -> usize {
	self.params().digest_size
    }

    /// Length of the encoded checksum, in characters.
    pub fn encoded_len(self) -> usize {
	self.params().transpose.encoded_len()
    }

    /// Resolve a requested number of rounds.
    ///
    /// `None` or zero selects the default. Other values are clamped to
    /// the permitted range. The result is `None` if the number of rounds
    /// is the default one, which is then left out of the hash string.
    /// The MD5 algorithms always use the default.
    pub fn custom_rounds(self, rounds: Option<u32>) -> Option<u32> {
	let p = self.params();
	match rounds {
	    _ if !p.adjustable => None,
	    None | Some(0) => None,
	    Some(r) => {
		let clamped = r.max(MIN_ROUNDS).min(MAX_ROUNDS);
		if clamped != r {
		    tracing::debug!(requested = r, rounds = clamped, "rounds coerced into range");
		}
		if clamped == p.default_rounds { None } else { Some(clamped) }
	    },
	}
    }

    /// Compute the raw digest of a password.
    ///
    /// The salt is used as given. The number of rounds is resolved by
    /// [`custom_rounds`](Algorithm::custom_rounds).
    pub fn raw_digest(self, pass: &[u8], salt: &[u8], rounds: Option<u32>) -> Vec<u8> {
	let p = self.params();
	let rounds = self.custom_rounds(rounds).unwrap_or(p.default_rounds);
	let magic = p.digest_magic.as_bytes();
	match self {
	    Algorithm::Md5 | Algorithm::Md5Apache => crypt_digest::<Md5>(p.family, magic, pass, salt, rounds),
	    Algorithm::Sha256 => crypt_digest::<Sha256>(p.family, magic, pass, salt, rounds),
	    Algorithm::Sha512 => crypt_digest::<Sha512>(p.family, magic, pass, salt, rounds),
	}
    }

    /// Compute the encoded checksum of a password.
    pub fn checksum(self, pass: &[u8], salt: &[u8], rounds: Option<u32>) -> String {
	crate::enc_dec::md5_sha2_hash64_encode(&self.raw_digest(pass, salt, rounds), self.params().transpose)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
	let name = match *self {
	    Algorithm::Md5 => "md5",
	    Algorithm::Md5Apache => "apr1",
	    Algorithm::Sha256 => "sha256",
	    Algorithm::Sha512 => "sha512",
	};
	f.write_str(name)
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    /// Accepts an identifier (`1`, `apr1`, `5`, `6`) or a name (`md5`,
    /// `md5-apache`, `sha256`, `sha512`), ignoring case.
    fn from_str(s: &str) -> Result<Algorithm> {
	match s.to_ascii_lowercase().as_str() {
	    "md5" => Ok(Algorithm::Md5),
	    "md5-apache" | "md5apache" => Ok(Algorithm::Md5Apache),
	    "sha256" | "sha-256" => Ok(Algorithm::Sha256),
	    "sha512" | "sha-512" => Ok(Algorithm::Sha512),
	    lower => Algorithm::from_id(lower).map_err(|_| Error::UnknownAlgorithm(s.to_owned())),
	}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table() {
	let rows: Vec<_> = [Algorithm::Md5, Algorithm::Md5Apache, Algorithm::Sha256, Algorithm::Sha512].iter()
	    .map(|a| (a.id(), a.default_rounds(), a.digest_size(), a.encoded_len()))
	    .collect();
	assert_eq!(rows, vec![
	    ("1", 1000, 16, 22),
	    ("apr1", 1000, 16, 22),
	    ("5", 5000, 32, 43),
	    ("6", 5000, 64, 86),
	]);
    }

    #[test]
    fn lookup() {
	for &alg in Algorithm::ALL.iter() {
	    assert_eq!(Algorithm::from_id(alg.id()).unwrap(), alg);
	    assert_eq!(alg.to_string().parse::<Algorithm>().unwrap(), alg);
	}
	assert_eq!("SHA-256".parse::<Algorithm>().unwrap(), Algorithm::Sha256);
	assert_eq!("md5-apache".parse::<Algorithm>().unwrap(), Algorithm::Md5Apache);
	assert_eq!(Algorithm::from_id("XXX"), Err(Error::UnknownAlgorithm("XXX".into())));
	assert_eq!("2y".parse::<Algorithm>(), Err(Error::UnknownAlgorithm("2y".into())));
    }

    #[test]
    fn rounds_resolution() {
	let sha = Algorithm::Sha512;
	assert_eq!(sha.custom_rounds(None), None);
	assert_eq!(sha.custom_rounds(Some(0)), None);
	assert_eq!(sha.custom_rounds(Some(5000)), None);
	assert_eq!(sha.custom_rounds(Some(1)), Some(MIN_ROUNDS));
	assert_eq!(sha.custom_rounds(Some(7777)), Some(7777));
	assert_eq!(sha.custom_rounds(Some(u32::MAX)), Some(MAX_ROUNDS));
	assert_eq!(Algorithm::Md5.custom_rounds(Some(7777)), None);
	assert_eq!(Algorithm::Md5Apache.custom_rounds(Some(1)), None);
    }

    #[test]
    fn raw_digest_resolves_rounds() {
	let md5 = Algorithm::Md5.raw_digest(b"Test", b"", None);
	assert_eq!(Algorithm::Md5.raw_digest(b"Test", b"", Some(7777)), md5);
	assert_eq!(Algorithm::Md5.raw_digest(b"Test", b"", Some(0)), md5);
	let apr1 = Algorithm::Md5Apache.raw_digest(b"Test", b"", None);
	assert_eq!(Algorithm::Md5Apache.raw_digest(b"Test", b"", Some(1)), apr1);
	let sha = Algorithm::Sha256;
	assert_eq!(sha.raw_digest(b"Test", b"", Some(0)), sha.raw_digest(b"Test", b"", None));
	assert_eq!(sha.raw_digest(b"Test", b"", Some(5)), sha.raw_digest(b"Test", b"", Some(MIN_ROUNDS)));
	assert_ne!(sha.raw_digest(b"Test", b"", Some(5)), sha.raw_digest(b"Test", b"", None));
    }

    #[test]
    fn digest_sizes() {
	for &alg in Algorithm::ALL.iter() {
	    let raw = alg.raw_digest(b"Test", b"", None);
	    assert_eq!(raw.len(), alg.digest_size());
	}
    }
}
