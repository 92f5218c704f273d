//! Version-dispatched entry point

use crate::{Error, Uuid, Version};

/// Generates a UUID of the specified version with the default sources.
///
/// Only the versions that need no further input are supported: [`Version::Mac`] (with the host's
/// hardware address) and [`Version::Random`]. The name-based and DCE security versions have their
/// own entry points that take the extra arguments.
///
/// # Errors
///
/// Returns [`Error::UnsupportedVersion`] for [`Version::Nil`], [`Version::Dce`],
/// [`Version::Md5`], and [`Version::Sha1`], in addition to the errors of the selected generator.
///
/// # Examples
///
/// ```rust
/// use rfc4122::{generate, Version};
///
/// let uuid = generate(Version::Random)?;
/// assert_eq!(uuid.version(), Some(Version::Random));
/// assert!(generate(Version::Sha1).is_err());
/// # Ok::<(), rfc4122::Error>(())
/// ```
pub fn generate(version: Version) -> Result<Uuid, Error> {
    match version {
        Version::Mac => crate::uuid1(false),
        Version::Random => crate::uuid4(),
        Version::Nil | Version::Dce | Version::Md5 | Version::Sha1 => {
            log::trace!("generate: version={version} requires a dedicated entry point");
            Err(Error::UnsupportedVersion(version))
        }
    }
}
