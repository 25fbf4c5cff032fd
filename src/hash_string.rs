//! Hash string formatting and parsing.
//
// Copyright (c) 2016 Ivan Nejgebauer <inejge@gmail.com>
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>. This file may not be copied,
// modified, or distributed except according to the terms of this
// license.
//!
//! All supported algorithms share the modular hash format
//! __`$`__*`{id}`*__$__[__`rounds=`__*`{rounds}`*__$__]*`{salt}`*__$__*`{checksum}`*,
//! where:
//!
//! * *`{id}`* is `1`, `apr1`, `5` or `6`.
//!
//! * *`{rounds}`* is the number of rounds, encoded as a decimal number.
//!   It's present only for SHA-2 hashes with a non-default number of rounds.
//!
//! * *`{salt}`* is the salt string, at most 16 characters from the crypt
//!   alphabet `./0-9A-Za-z`.
//!
//! * *`{checksum}`* is the encoded digest.
//!
//! # Example
//!
//! ```
//! use pwcrypt::{Algorithm, CryptHash};
//!
//! let h: CryptHash = "$6$rounds=7777$$UNBSSrJ9WQTbHqvso9.yDg0XdJAraq1dZir/V3SPvApoa.\
//!                     E0ilnLP.803MJqIHjOtTvuhxGv/cAXJ0ccTpYBP1".parse().unwrap();
//! assert_eq!(h.algorithm, Algorithm::Sha512);
//! assert_eq!(h.rounds, Some(7777));
//! assert_eq!(h.salt, "");
//! assert!(h.matches("Test"));
//! ```

use std::fmt;
use std::num::IntErrorKind;
use std::str::FromStr;
use super::{Result, HashSetup, consteq};
use crate::algorithm::{Algorithm, MIN_ROUNDS, MAX_ROUNDS, MAX_SALT_LEN};
use crate::enc_dec::check_salt;
use crate::error::Error;

/// A parsed or freshly computed hash.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CryptHash {
    /// The algorithm.
    pub algorithm: Algorithm,
    /// Custom number of rounds, `None` if the default is used.
    pub rounds: Option<u32>,
    /// The salt string.
    pub salt: String,
    /// The encoded checksum.
    pub checksum: String,
}

/// Components of a hash or setting string, borrowed from it.
pub(crate) struct Fields<'a> {
    pub algorithm: Algorithm,
    pub rounds: Option<u32>,
    pub salt: &'a str,
    pub checksum: Option<&'a str>,
}

const ROUNDS_PREFIX: &str = "rounds=";

/// Split a hash string into its components.
///
/// If `require_checksum` is false, a setting string which stops after the
/// salt (e.g. `$5$rounds=1000$salt`) is also accepted. The salt is truncated
/// to the maximum length, but not validated.
pub(crate) fn split_hash(hash: &str, require_checksum: bool) -> Result<Fields<'_>> {
    let segs: Vec<&str> = hash.split('$').collect();
    let min_segs = if require_checksum { 4 } else { 3 };
    if segs.len() < min_segs || !segs[0].is_empty() {
	return Err(Error::InvalidHashString);
    }
    let algorithm = Algorithm::from_id(segs[1])?;
    let (rounds, rest) = match segs[2].strip_prefix(ROUNDS_PREFIX) {
	Some(r) if algorithm.rounds_adjustable() => {
	    let r = match r.parse::<u32>() {
		Ok(r) => r,
		Err(e) if *e.kind() == IntErrorKind::PosOverflow => MAX_ROUNDS,
		Err(_) => return Err(Error::InvalidRounds),
	    };
	    (Some(r.max(MIN_ROUNDS)), &segs[3..])
	},
	_ => (None, &segs[2..]),
    };
    let (salt, checksum) = match *rest {
	[salt] if !require_checksum => (salt, None),
	[salt, ""] if !require_checksum => (salt, None),
	[salt, checksum] => (salt, Some(checksum)),
	_ => return Err(Error::InvalidHashString),
    };
    let salt = if salt.len() <= MAX_SALT_LEN {
	salt
    } else {
	tracing::debug!(len = salt.len(), "salt truncated");
	salt.get(..MAX_SALT_LEN).ok_or(Error::EncodingError)?
    };
    Ok(Fields { algorithm, rounds, salt, checksum })
}

/// Extract the parameters of a hash string for a particular algorithm.
pub(crate) fn parse_setup(hash: &str, algorithm: Algorithm) -> Result<HashSetup<'_>> {
    let fields = split_hash(hash, false)?;
    if fields.algorithm != algorithm {
	return Err(Error::InvalidHashString);
    }
    Ok(HashSetup { salt: Some(fields.salt), rounds: fields.rounds })
}

/// Hash a password using the parameters from a `HashSetup`, generating
/// a random salt of maximum length if none is provided.
pub(crate) fn hash_with_setup(algorithm: Algorithm, setup: HashSetup, pass: &[u8]) -> Result<String> {
    let hash = match setup.salt {
	Some(salt) => CryptHash::compute(algorithm, pass, salt, setup.rounds)?,
	None => {
	    let salt = crate::random::gen_salt(&mut rand::rngs::OsRng, MAX_SALT_LEN)?;
	    CryptHash::compute(algorithm, pass, &salt, setup.rounds)?
	},
    };
    Ok(hash.to_string())
}

impl CryptHash {
    /// Hash a password.
    ///
    /// A salt longer than 16 characters is truncated; a salt with characters
    /// outside of the crypt alphabet is an error. The number of rounds is
    /// resolved by [`Algorithm::custom_rounds`].
    pub fn compute(algorithm: Algorithm, pass: &[u8], salt: &str, rounds: Option<u32>) -> Result<CryptHash> {
	let salt = salt.get(..salt.len().min(MAX_SALT_LEN)).ok_or(Error::EncodingError)?;
	check_salt(salt)?;
	let rounds = algorithm.custom_rounds(rounds);
	let checksum = algorithm.checksum(pass, salt.as_bytes(), rounds);
	Ok(CryptHash { algorithm, rounds, salt: salt.to_owned(), checksum })
    }

    /// Check whether a password hashes to this value.
    ///
    /// The checksums are compared in constant time.
    pub fn matches<B: AsRef<[u8]>>(&self, pass: B) -> bool {
	let calc = self.algorithm.checksum(pass.as_ref(), self.salt.as_bytes(), self.rounds);
	consteq(&self.checksum, &calc)
    }
}

impl fmt::Display for CryptHash {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
	write!(f, "${}$", self.algorithm.id())?;
	if let Some(rounds) = self.rounds {
	    write!(f, "{}{}$", ROUNDS_PREFIX, rounds)?;
	}
	write!(f, "{}${}", self.salt, self.checksum)
    }
}

impl FromStr for CryptHash {
    type Err = Error;

    fn from_str(hash: &str) -> Result<CryptHash> {
	let Fields { algorithm, rounds, salt, checksum } = split_hash(hash, true)?;
	check_salt(salt)?;
	let checksum = checksum.ok_or(Error::InvalidHashString)?;
	Ok(CryptHash {
	    algorithm,
	    rounds: algorithm.custom_rounds(rounds),
	    salt: salt.to_owned(),
	    checksum: checksum.to_owned(),
	})
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_default_rounds() {
	let h: CryptHash = "$1$SALT$iYTuv61EcPDadxVotGguH0".parse().unwrap();
	assert_eq!(h, CryptHash {
	    algorithm: Algorithm::Md5,
	    rounds: None,
	    salt: "SALT".into(),
	    checksum: "iYTuv61EcPDadxVotGguH0".into(),
	});
	assert_eq!(h.to_string(), "$1$SALT$iYTuv61EcPDadxVotGguH0");
    }

    #[test]
    fn parse_custom_rounds() {
	let h: CryptHash = "$5$rounds=11858$WH1ABM5sKhxbkgCK$aTQsjPkz0rBsH3lQlJxw9HDTDXPKBxC0LlVeV69P.t1"
	    .parse().unwrap();
	assert_eq!(h.algorithm, Algorithm::Sha256);
	assert_eq!(h.rounds, Some(11858));
	assert_eq!(h.salt, "WH1ABM5sKhxbkgCK");
	assert_eq!(h.to_string(), "$5$rounds=11858$WH1ABM5sKhxbkgCK$aTQsjPkz0rBsH3lQlJxw9HDTDXPKBxC0LlVeV69P.t1");
    }

    #[test]
    fn rounds_coerced() {
	let h: CryptHash = "$6$rounds=10$roundstoolow$x".parse().unwrap();
	assert_eq!(h.rounds, Some(1000));
	let h: CryptHash = "$6$rounds=0$s$x".parse().unwrap();
	assert_eq!(h.rounds, Some(1000));
	let h: CryptHash = "$6$rounds=5000$s$x".parse().unwrap();
	assert_eq!(h.rounds, None);
	let h: CryptHash = "$6$rounds=4294967295$s$x".parse().unwrap();
	assert_eq!(h.rounds, Some(999_999_999));
	let h: CryptHash = "$6$rounds=4294967296$salt$abc".parse().unwrap();
	assert_eq!(h.rounds, Some(999_999_999));
	let h: CryptHash = "$5$rounds=99999999999999999999999$salt$abc".parse().unwrap();
	assert_eq!(h.rounds, Some(999_999_999));
	assert_eq!("$5$rounds=-1$salt$abc".parse::<CryptHash>(), Err(Error::InvalidRounds));
	assert_eq!("$5$rounds=$salt$abc".parse::<CryptHash>(), Err(Error::InvalidRounds));
    }

    #[test]
    fn empty_salt() {
	let h: CryptHash = "$apr1$$zccNMO7jOau6cLaAIpdIp1".parse().unwrap();
	assert_eq!(h.algorithm, Algorithm::Md5Apache);
	assert_eq!(h.salt, "");
	let h: CryptHash = "$6$rounds=7777$$abc".parse().unwrap();
	assert_eq!(h.salt, "");
	assert_eq!(h.checksum, "abc");
    }

    #[test]
    fn long_salt_truncated() {
	let h: CryptHash = "$5$saltstringsaltstring$x".parse().unwrap();
	assert_eq!(h.salt, "saltstringsaltst");
    }

    #[test]
    fn malformed() {
	assert_eq!("".parse::<CryptHash>(), Err(Error::InvalidHashString));
	assert_eq!("$1$salt".parse::<CryptHash>(), Err(Error::InvalidHashString));
	assert_eq!("1$salt$hash$".parse::<CryptHash>(), Err(Error::InvalidHashString));
	assert_eq!("$1$salt$hash$extra".parse::<CryptHash>(), Err(Error::InvalidHashString));
	assert_eq!("$6$rounds=7777$salt".parse::<CryptHash>(), Err(Error::InvalidHashString));
	assert_eq!("$XXX$salt$hash".parse::<CryptHash>(), Err(Error::UnknownAlgorithm("XXX".into())));
	assert_eq!("$6$rounds=many$salt$hash".parse::<CryptHash>(), Err(Error::InvalidRounds));
	assert_eq!("$1$rounds=1000$salt$hash".parse::<CryptHash>(), Err(Error::InvalidHashString));
	assert_eq!("$1$sa:t$hash".parse::<CryptHash>(), Err(Error::EncodingError));
    }

    #[test]
    fn settings() {
	let f = split_hash("$5$saltstring", false).unwrap();
	assert_eq!((f.algorithm, f.rounds, f.salt, f.checksum), (Algorithm::Sha256, None, "saltstring", None));
	let f = split_hash("$5$rounds=1400$anotherlongsaltstring$", false).unwrap();
	assert_eq!((f.rounds, f.salt, f.checksum), (Some(1400), "anotherlongsalts", None));
	assert!(split_hash("$5$saltstring", true).is_err());
    }

    #[test]
    fn setup_for_algorithm() {
	let hs = parse_setup("$6$rounds=11531$G/gkPn17kHYo0gTF$xyz", Algorithm::Sha512).unwrap();
	assert_eq!(hs.salt, Some("G/gkPn17kHYo0gTF"));
	assert_eq!(hs.rounds, Some(11531));
	assert!(parse_setup("$5$G/gkPn17kHYo0gTF$xyz", Algorithm::Sha512).is_err());
    }
}
