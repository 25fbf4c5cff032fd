//! MD5 based hash.
//
// Copyright (c) 2016 Ivan Nejgebauer <inejge@gmail.com>
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>. This file may not be copied,
// modified, or distributed except according to the terms of this
// license.
//!
//! This algorithm was developed for FreeBSD to replace the
//! aging DES crypt. It was adopted in various Linux distributions
//! and saw wide use. Presently, it's considered weak.
//!
//! # Example
//!
//! ```
//! use pwcrypt::md5_crypt;
//!
//! assert_eq!(md5_crypt::hash_with(
//!     "$1$5pZSV9va$azfrPr6af3Fc7dLblQXVa0",
//!     "password").unwrap(),
//!     "$1$5pZSV9va$azfrPr6af3Fc7dLblQXVa0");
//! ```
//!
//! # Parameters
//!
//! * __Password length__: unlimited.
//!
//! * __Salt length__: 0 to 16 characters. Default is 16. Most other
//!   implementations use at most 8.
//!
//! * __Rounds__: 1000 (fixed.)
//!
//! # Hash Format
//!
//! The format of the hash is
//! __`$1$`__*`{salt}`*__$__*`{checksum}`*, where:
//!
//! * *`{salt}`* is the salt string.
//!
//! * *`{checksum}`* is a 22-character Base64 encoding of the checksum.

use super::{Result, HashSetup, IntoHashSetup, Algorithm, verify_as};
use crate::hash_string::{parse_setup, hash_with_setup};

pub use crate::algorithm::MAX_SALT_LEN;

const ALGORITHM: Algorithm = Algorithm::Md5;

/// Hash a password with a randomly generated salt.
///
/// An error is returned if the system random number generator cannot
/// be opened.
pub fn hash<B: AsRef<[u8]>>(pass: B) -> Result<String> {
    hash_with_setup(ALGORITHM, HashSetup::default(), pass.as_ref())
}

fn parse_md5_hash(hash: &str) -> Result<HashSetup<'_>> {
    parse_setup(hash, ALGORITHM)
}

/// Hash a password with user-provided parameters.
///
/// If the `param` argument is a `&str`, it must be in the final hash
/// format. The salt is parsed out of that value.
/// If the salt is too long, it is truncated to maximum length. If it contains
/// an invalid character, an error is returned.
pub fn hash_with<'a, IHS, B>(param: IHS, pass: B) -> Result<String>
    where IHS: IntoHashSetup<'a>, B: AsRef<[u8]>
{
    hash_with_setup(ALGORITHM, IHS::into_hash_setup(param, parse_md5_hash)?, pass.as_ref())
}

/// Verify that the hash corresponds to a password.
pub fn verify<B: AsRef<[u8]>>(pass: B, hash: &str) -> bool {
    verify_as(Some(ALGORITHM), pass.as_ref(), hash)
}

#[cfg(test)]
mod tests {
    use super::HashSetup;

    #[test]
    fn custom() {
	assert_eq!(super::hash_with("$1$5pZSV9va$azfrPr6af3Fc7dLblQXVa0", "password").unwrap(),
	    "$1$5pZSV9va$azfrPr6af3Fc7dLblQXVa0");
	assert_eq!(super::hash_with(HashSetup { salt: Some("5pZSV9va"), rounds: None }, "password").unwrap(),
	    "$1$5pZSV9va$azfrPr6af3Fc7dLblQXVa0");
	assert_eq!(super::hash_with(HashSetup { salt: Some("5pZSV9va"), rounds: Some(5000) }, "password").unwrap(),
	    "$1$5pZSV9va$azfrPr6af3Fc7dLblQXVa0");
    }

    #[test]
    fn random_salt() {
	let h = super::hash("password").unwrap();
	assert_eq!(h.len(), 3 + 16 + 1 + 22);
	assert!(super::verify("password", &h));
	assert!(!super::verify("Password", &h));
    }

    #[test]
    fn other_algorithm_rejected() {
	assert!(super::hash_with("$apr1$5pZSV9va$azfrPr6af3Fc7dLblQXVa0", "password").is_err());
	assert!(!super::verify("Test", "$apr1$$zccNMO7jOau6cLaAIpdIp1"));
    }
}
