// The iterated digest shared by MD5-crypt and SHA-crypt.
//
// Copyright (c) 2016 Ivan Nejgebauer <inejge@gmail.com>
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>. This file may not be copied,
// modified, or distributed except according to the terms of this
// license.

use sha2::Digest;

/// The two published variants of the construction.
///
/// They differ in how the password length is mixed into the initial
/// digest, and in what the rounds loop hashes in place of the password
/// and the salt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Family {
    Md5,
    Sha2,
}

impl Family {
    fn mix_length_bit<D: Digest>(self, dgst: &mut D, bit: usize, pass: &[u8], hash_b: &[u8]) {
	match (self, bit) {
	    (Family::Md5, 1) => dgst.update(&[0u8]),
	    (Family::Md5, _) => dgst.update(&pass[..1]),
	    (Family::Sha2, 1) => dgst.update(hash_b),
	    (Family::Sha2, _) => dgst.update(pass),
	}
    }

    fn sequences<D: Digest>(self, pass: &[u8], salt: &[u8], a0: u8) -> (Vec<u8>, Vec<u8>) {
	match self {
	    Family::Md5 => (pass.to_vec(), salt.to_vec()),
	    Family::Sha2 => {
		let mut dgst_p = D::new();
		for _ in 0..pass.len() {
		    dgst_p.update(pass);
		}
		let mut dgst_s = D::new();
		for _ in 0..16 + a0 as usize {
		    dgst_s.update(salt);
		}
		(cycled(&dgst_p.finalize(), pass.len()), cycled(&dgst_s.finalize(), salt.len()))
	    },
	}
    }
}

fn cycled(seq: &[u8], len: usize) -> Vec<u8> {
    seq.iter().cycle().take(len).copied().collect()
}

/// Compute the raw digest.
///
/// `magic` is hashed between the password and the salt when computing
/// the initial digest; it's `$1$` or `$apr1$` for MD5-crypt and empty
/// for SHA-crypt. The salt must already be truncated and validated, and
/// `rounds` must be non-zero.
pub fn crypt_digest<D: Digest>(family: Family, magic: &[u8], pass: &[u8], salt: &[u8], rounds: u32) -> Vec<u8> {
    let mut dgst_b = D::new();
    dgst_b.update(pass);
    dgst_b.update(salt);
    dgst_b.update(pass);
    let hash_b = dgst_b.finalize();

    let mut dgst_a = D::new();
    dgst_a.update(pass);
    dgst_a.update(magic);
    dgst_a.update(salt);
    dgst_a.update(cycled(&hash_b, pass.len()));

    let mut plen = pass.len();
    while plen > 0 {
	family.mix_length_bit(&mut dgst_a, plen & 1, pass, &hash_b);
	plen >>= 1;
    }
    let mut hash_a = dgst_a.finalize();

    let (seq_p, seq_s) = family.sequences::<D>(pass, salt, hash_a[0]);

    for r in 0..rounds {
	let mut dgst_c = D::new();
	if r % 2 == 1 {
	    dgst_c.update(&seq_p);
	} else {
	    dgst_c.update(&hash_a);
	}
	if r % 3 > 0 {
	    dgst_c.update(&seq_s);
	}
	if r % 7 > 0 {
	    dgst_c.update(&seq_p);
	}
	if r % 2 == 1 {
	    dgst_c.update(&hash_a);
	} else {
	    dgst_c.update(&seq_p);
	}
	hash_a = dgst_c.finalize();
    }
    hash_a.to_vec()
}
