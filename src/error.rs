//! Error values.
//
// Copyright (c) 2016 Ivan Nejgebauer <inejge@gmail.com>
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>. This file may not be copied,
// modified, or distributed except according to the terms of this
// license.
//!
//! There's no provision for recording the cause of any errors except
//! failures of the random number generator, and the offending identifier
//! of an unknown algorithm.
use thiserror::Error;

/// Possible errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Random value cannot be generated.
    #[error("{0}")]
    RandomError(String),
    /// The salt contains a character outside of the crypt alphabet.
    #[error("Invalid encoding")]
    EncodingError,
    /// The rounds field is not a decimal number.
    #[error("Invalid rounds value")]
    InvalidRounds,
    /// The hash string is not in the expected format.
    #[error("Invalid hash string")]
    InvalidHashString,
    /// The algorithm identifier or name is not recognized.
    #[error("Unknown algorithm: {0}")]
    UnknownAlgorithm(String),
}
