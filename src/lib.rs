//! An implementation of RFC 4122 UUIDs, versions 1 through 5
//!
//! ```rust
//! use rfc4122::{uuid4, uuid5, Uuid};
//!
//! let uuid = uuid4()?;
//! println!("{}", uuid); // e.g. "2ca4b2ce-6c13-40d4-bccf-37d222820f6f"
//! println!("{:?}", uuid.as_bytes()); // as 16-byte big-endian array
//!
//! let uuid = uuid5(&Uuid::NAMESPACE_DNS, "python.org")?;
//! assert_eq!(uuid.to_string(), "886313e1-3b8a-5372-9b90-0c9aee199e5d");
//! # Ok::<(), rfc4122::Error>(())
//! ```
//!
//! See [RFC 4122](https://www.rfc-editor.org/rfc/rfc4122).
//!
//! # Field and bit layout
//!
//! All versions share the following layout, with fields stored in big-endian order:
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                          time_low                             |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |       time_mid                |  ver  |       time_hi         |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |var|  clock_seq_hi |  clock_seq_low  |         node (0-1)      |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                         node (2-5)                            |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! Where:
//!
//! - The 4-bit `ver` field holds the version number, `0001` through `0101`.
//! - The `var` field is set at `10`.
//! - Version 1 fills `time_low`, `time_mid`, and `time_hi` with the 60-bit count of
//!   100-nanosecond intervals since 1582-10-15, `clock_seq` with random bits, and `node` with a
//!   hardware address or 48 random bits. Version 2 replaces `time_low` with a local identifier
//!   and `clock_seq_low` with a local domain.
//! - Versions 3 and 5 fill every field but `ver` and `var` with the MD5 or SHA-1 digest of a
//!   name space UUID followed by a name.
//! - Version 4 fills every field but `ver` and `var` with cryptographically strong random bits.
//!
//! # Crate features
//!
//! - `mac` (default): looks up the hardware address of the first network interface that is up,
//!   for the version 1 and 2 node ID.
//! - `serde`: implements `serde` traits, using the 36-character string for human-readable
//!   formats and the 16-byte array otherwise.
//! - `uuid`: converts to and from `uuid::Uuid`.
//! - `rusqlite`: implements `FromSql` (accepting a 16-byte blob or a string) and `ToSql` (as a
//!   36-character string).

#![cfg_attr(docsrs, feature(doc_cfg))]

mod error;
pub use error::Error;

mod id;
pub use id::Uuid;

mod fields;
pub use fields::{Variant, Version};

mod parser;

mod hashed;
pub use hashed::{uuid3, uuid5};

pub mod v1;
#[doc(inline)]
pub use v1::{uuid1, uuid2};

mod v4;
pub use v4::{uuid4, uuid4_with};

mod entry;
pub use entry::generate;
