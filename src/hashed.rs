//! Name-based UUIDs (versions 3 and 5)

use std::io;

use md5::{Digest, Md5};
use sha1::Sha1;

use crate::{Error, Uuid, Version};

impl Uuid {
    /// Name space for fully-qualified domain names.
    pub const NAMESPACE_DNS: Self = Self::parse_or_panic("6ba7b810-9dad-11d1-80b4-00c04fd430c8");

    /// Name space for URLs.
    pub const NAMESPACE_URL: Self = Self::parse_or_panic("6ba7b811-9dad-11d1-80b4-00c04fd430c8");

    /// Name space for ISO OIDs.
    pub const NAMESPACE_OID: Self = Self::parse_or_panic("6ba7b812-9dad-11d1-80b4-00c04fd430c8");

    /// Name space for X.500 DNs (in DER or a text output format).
    pub const NAMESPACE_X500: Self = Self::parse_or_panic("6ba7b814-9dad-11d1-80b4-00c04fd430c8");
}

/// Generates a UUIDv3 object from a name space and a name, using MD5.
///
/// The same pair of `namespace` and `name` always produces the same UUID.
///
/// # Examples
///
/// ```rust
/// use rfc4122::{uuid3, Uuid};
///
/// let uuid = uuid3(&Uuid::NAMESPACE_DNS, "python.org")?;
/// assert_eq!(uuid.to_string(), "6fa459ea-ee8a-3ca4-894e-db77e160355e");
/// # Ok::<(), rfc4122::Error>(())
/// ```
pub fn uuid3(namespace: &Uuid, name: impl AsRef<[u8]>) -> Result<Uuid, Error> {
    hash_uuid::<Md5>(namespace, name.as_ref(), Version::Md5)
}

/// Generates a UUIDv5 object from a name space and a name, using SHA-1.
///
/// Only the first 16 of the 20 digest bytes are used.
///
/// # Examples
///
/// ```rust
/// use rfc4122::{uuid5, Uuid};
///
/// let uuid = uuid5(&Uuid::NAMESPACE_DNS, "python.org")?;
/// assert_eq!(uuid.to_string(), "886313e1-3b8a-5372-9b90-0c9aee199e5d");
/// # Ok::<(), rfc4122::Error>(())
/// ```
pub fn uuid5(namespace: &Uuid, name: impl AsRef<[u8]>) -> Result<Uuid, Error> {
    hash_uuid::<Sha1>(namespace, name.as_ref(), Version::Sha1)
}

fn hash_uuid<D: Digest + io::Write>(
    namespace: &Uuid,
    name: &[u8],
    version: Version,
) -> Result<Uuid, Error> {
    let mut hasher = D::new();
    io::Write::write_all(&mut hasher, namespace.as_bytes()).map_err(Error::Digest)?;
    io::Write::write_all(&mut hasher, name).map_err(Error::Digest)?;

    let digest = hasher.finalize();
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&digest[..16]);
    Ok(Uuid::from(bytes).stamp(version))
}

impl Uuid {
    /// Generates a UUIDv3 object; see [`uuid3`].
    pub fn new_v3(namespace: &Uuid, name: impl AsRef<[u8]>) -> Result<Self, Error> {
        uuid3(namespace, name)
    }

    /// Generates a UUIDv5 object; see [`uuid5`].
    pub fn new_v5(namespace: &Uuid, name: impl AsRef<[u8]>) -> Result<Self, Error> {
        uuid5(namespace, name)
    }
}
