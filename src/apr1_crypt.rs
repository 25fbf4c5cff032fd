//! Apache variant of the MD5 based hash.
//
// Copyright (c) 2016 Ivan Nejgebauer <inejge@gmail.com>
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>. This file may not be copied,
// modified, or distributed except according to the terms of this
// license.
//!
//! This is MD5-crypt with a different identifier, which is also mixed
//! into the digest. It's the default format of Apache __htpasswd__.
//!
//! # Example
//!
//! ```
//! use pwcrypt::apr1_crypt;
//!
//! assert!(apr1_crypt::verify("Test", "$apr1$$zccNMO7jOau6cLaAIpdIp1"));
//! ```
//!
//! # Parameters
//!
//! * __Password length__: unlimited.
//!
//! * __Salt length__: 0 to 16 characters. Default is 16. __htpasswd__
//!   generates 8.
//!
//! * __Rounds__: 1000 (fixed.)
//!
//! # Hash Format
//!
//! The format of the hash is
//! __`$apr1$`__*`{salt}`*__$__*`{checksum}`*, where:
//!
//! * *`{salt}`* is the salt string.
//!
//! * *`{checksum}`* is a 22-character Base64 encoding of the checksum.

use super::{Result, HashSetup, IntoHashSetup, Algorithm, verify_as};
use crate::hash_string::{parse_setup, hash_with_setup};

pub use crate::algorithm::MAX_SALT_LEN;

const ALGORITHM: Algorithm = Algorithm::Md5Apache;

/// Hash a password with a randomly generated salt.
///
/// An error is returned if the system random number generator cannot
/// be opened.
pub fn hash<B: AsRef<[u8]>>(pass: B) -> Result<String> {
    hash_with_setup(ALGORITHM, HashSetup::default(), pass.as_ref())
}

fn parse_apr1_hash(hash: &str) -> Result<HashSetup<'_>> {
    parse_setup(hash, ALGORITHM)
}

/// Hash a password with user-provided parameters.
///
/// If the `param` argument is a `&str`, it must be in the final hash
/// format. The salt is parsed out of that value.
pub fn hash_with<'a, IHS, B>(param: IHS, pass: B) -> Result<String>
    where IHS: IntoHashSetup<'a>, B: AsRef<[u8]>
{
    hash_with_setup(ALGORITHM, IHS::into_hash_setup(param, parse_apr1_hash)?, pass.as_ref())
}

/// Verify that the hash corresponds to a password.
pub fn verify<B: AsRef<[u8]>>(pass: B, hash: &str) -> bool {
    verify_as(Some(ALGORITHM), pass.as_ref(), hash)
}

#[cfg(test)]
mod tests {
    use super::HashSetup;

    #[test]
    fn htpasswd_compatible() {
	assert_eq!(super::hash_with("$apr1$r31.....$HqJZimcKQFAMYayBlzkrA/", "myPassword").unwrap(),
	    "$apr1$r31.....$HqJZimcKQFAMYayBlzkrA/");
	assert!(super::verify("myPassword", "$apr1$r31.....$HqJZimcKQFAMYayBlzkrA/"));
    }

    #[test]
    fn empty_salt() {
	assert_eq!(super::hash_with(HashSetup { salt: Some(""), rounds: None }, "Test").unwrap(),
	    "$apr1$$zccNMO7jOau6cLaAIpdIp1");
    }

    #[test]
    fn differs_from_md5() {
	let setup = HashSetup { salt: Some("SALT"), rounds: None };
	let apr1 = super::hash_with(setup, "Test").unwrap();
	let md5 = crate::md5_crypt::hash_with(setup, "Test").unwrap();
	assert_eq!(md5, "$1$SALT$iYTuv61EcPDadxVotGguH0");
	assert_ne!(&apr1[6..], &md5[3..]);
	assert!(!super::verify("Test", &md5));
    }
}
