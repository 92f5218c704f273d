use std::io;

use thiserror::Error;

use crate::Version;

/// Error returned by the parsing and generating functions of this crate.
///
/// No operation yields a partially filled [`Uuid`](crate::Uuid) alongside an error; a failed call
/// returns nothing but the error.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed text or binary input: wrong length, non-hex digit, misplaced dash, or missing
    /// `urn:uuid:` prefix.
    #[error("invalid UUID representation")]
    InvalidFormat,

    /// The requested version cannot be generated through the called entry point.
    #[error("unsupported UUID version: {0}")]
    UnsupportedVersion(Version),

    /// No usable hardware address was found and a random node ID was not requested.
    #[error("no usable hardware address for node ID")]
    NodeIdUnavailable,

    /// The secure random source failed to supply bytes.
    #[error("entropy source unavailable")]
    EntropyUnavailable(#[source] rand::Error),

    /// Writing to the message digest failed.
    #[error("could not write to message digest")]
    Digest(#[source] io::Error),
}
