// Encoding routines.
//
// Copyright (c) 2016 Ivan Nejgebauer <inejge@gmail.com>
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>. This file may not be copied,
// modified, or distributed except according to the terms of this
// license.

use crate::error::Error;
use super::Result;

/// The crypt alphabet, used both for salts and for encoding checksums.
pub const CRYPT_HASH64: &[u8; 64] = b"./0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Order in which raw digest bytes are fed to the encoder.
///
/// Every triple is `[b2, b1, b0]` of the reference `b64_from_24bit()`
/// calls: the 24-bit value `b2 << 16 | b1 << 8 | b0` is emitted as four
/// characters, least significant six bits first. The tail holds the one
/// or two leftover bytes in the same high-to-low order, and yields one
/// character more than its length.
pub struct Transpose {
    pub groups: &'static [[u8; 3]],
    pub tail: &'static [u8],
}

pub const MD5_TRANSPOSE: Transpose = Transpose {
    groups: &[
	[0, 6, 12], [1, 7, 13], [2, 8, 14], [3, 9, 15], [4, 10, 5],
    ],
    tail: &[11],
};

pub const SHA256_TRANSPOSE: Transpose = Transpose {
    groups: &[
	[0, 10, 20], [21, 1, 11], [12, 22, 2], [3, 13, 23], [24, 4, 14],
	[15, 25, 5], [6, 16, 26], [27, 7, 17], [18, 28, 8], [9, 19, 29],
    ],
    tail: &[31, 30],
};

pub const SHA512_TRANSPOSE: Transpose = Transpose {
    groups: &[
	[0, 21, 42], [22, 43, 1], [44, 2, 23], [3, 24, 45], [25, 46, 4],
	[47, 5, 26], [6, 27, 48], [28, 49, 7], [50, 8, 29], [9, 30, 51],
	[31, 52, 10], [53, 11, 32], [12, 33, 54], [34, 55, 13], [56, 14, 35],
	[15, 36, 57], [37, 58, 16], [59, 17, 38], [18, 39, 60], [40, 61, 19],
	[62, 20, 41],
    ],
    tail: &[63],
};

impl Transpose {
    /// Length of the encoded checksum.
    pub const fn encoded_len(&self) -> usize {
	self.groups.len() * 4 + self.tail.len() + 1
    }
}

pub fn is_hash64_char(b: u8) -> bool {
    matches!(b, b'.' | b'/' | b'0'..=b'9' | b'A'..=b'Z' | b'a'..=b'z')
}

/// Check that every salt character belongs to the crypt alphabet.
pub fn check_salt(salt: &str) -> Result<()> {
    if salt.bytes().all(is_hash64_char) {
	Ok(())
    } else {
	Err(Error::EncodingError)
    }
}

fn push_val(out: &mut String, mut val: u32, nchars: usize) {
    for _ in 0..nchars {
	out.push(CRYPT_HASH64[(val & 0x3F) as usize] as char);
	val >>= 6;
    }
}

/// Encode a raw digest, which must be long enough for every index in `tr`.
pub fn md5_sha2_hash64_encode(raw: &[u8], tr: &Transpose) -> String {
    let mut out = String::with_capacity(tr.encoded_len());
    for &[b2, b1, b0] in tr.groups {
	let val = (raw[b2 as usize] as u32) << 16 | (raw[b1 as usize] as u32) << 8 | raw[b0 as usize] as u32;
	push_val(&mut out, val, 4);
    }
    let val = tr.tail.iter().fold(0u32, |v, &i| v << 8 | raw[i as usize] as u32);
    push_val(&mut out, val, tr.tail.len() + 1);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn covers_every_byte(tr: &Transpose, dsize: usize) -> bool {
	let mut seen = vec![false; dsize];
	for &i in tr.groups.iter().flatten().chain(tr.tail) {
	    if seen[i as usize] {
		return false;
	    }
	    seen[i as usize] = true;
	}
	seen.into_iter().all(|s| s)
    }

    #[test]
    fn tables_are_permutations() {
	assert!(covers_every_byte(&MD5_TRANSPOSE, 16));
	assert!(covers_every_byte(&SHA256_TRANSPOSE, 32));
	assert!(covers_every_byte(&SHA512_TRANSPOSE, 64));
    }

    #[test]
    fn encoded_lengths() {
	assert_eq!(MD5_TRANSPOSE.encoded_len(), 22);
	assert_eq!(SHA256_TRANSPOSE.encoded_len(), 43);
	assert_eq!(SHA512_TRANSPOSE.encoded_len(), 86);
	assert_eq!(md5_sha2_hash64_encode(&[0u8; 64], &SHA512_TRANSPOSE).len(), 86);
    }

    #[test]
    fn low_bits_first() {
	let mut raw = [0u8; 16];
	raw[12] = 0x01;
	raw[11] = 0x3F;
	let enc = md5_sha2_hash64_encode(&raw, &MD5_TRANSPOSE);
	assert_eq!(&enc[..4], "/...");
	assert_eq!(&enc[20..], "z.");
    }

    #[test]
    fn salt_alphabet() {
	assert!(check_salt("./09AZaz").is_ok());
	assert!(check_salt("").is_ok());
	assert_eq!(check_salt("sa$lt"), Err(Error::EncodingError));
	assert_eq!(check_salt("salt="), Err(Error::EncodingError));
	assert!(CRYPT_HASH64.iter().all(|&b| is_hash64_char(b)));
    }
}
