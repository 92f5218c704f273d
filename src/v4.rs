//! UUIDv4-related functionality

use rand::{rngs::OsRng, CryptoRng, RngCore};

use crate::{Error, Uuid, Version};

/// Generates a UUIDv4 object from the operating system's random number generator.
///
/// # Examples
///
/// ```rust
/// let uuid = rfc4122::uuid4()?;
/// println!("{uuid}"); // e.g., "2ca4b2ce-6c13-40d4-bccf-37d222820f6f"
/// println!("{:?}", uuid.as_bytes()); // as 16-byte big-endian array
/// # Ok::<(), rfc4122::Error>(())
/// ```
pub fn uuid4() -> Result<Uuid, Error> {
    uuid4_with(&mut OsRng)
}

/// Generates a UUIDv4 object from the specified random number generator.
///
/// # Examples
///
/// ```rust
/// use rand::SeedableRng;
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(42);
/// let uuid = rfc4122::uuid4_with(&mut rng)?;
/// assert_eq!(uuid.version_num(), 4);
/// # Ok::<(), rfc4122::Error>(())
/// ```
pub fn uuid4_with<R: RngCore + CryptoRng>(rng: &mut R) -> Result<Uuid, Error> {
    let mut bytes = [0u8; 16];
    rng.try_fill_bytes(&mut bytes).map_err(|e| {
        log::debug!("uuid4_with: random number generator failed: {e}");
        Error::EntropyUnavailable(e)
    })?;
    Ok(Uuid::from(bytes).stamp(Version::Random))
}

impl Uuid {
    /// Generates a UUIDv4 object; see [`uuid4`].
    pub fn new_v4() -> Result<Self, Error> {
        uuid4()
    }
}
