//! Version and variant fields
//!
//! The 4-bit version field occupies the most significant bits of byte 6, and the variant field
//! occupies the two or three most significant bits of byte 8. All bit masking against those two
//! bytes lives in this module.

use std::fmt;

use crate::Uuid;

const VERSION_BYTE: usize = 6;
const VARIANT_BYTE: usize = 8;

/// UUID version as stored in the version field.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum Version {
    /// The version field of the Nil UUID (`0000`).
    Nil,
    /// Version 1: Gregorian timestamp and node ID.
    Mac,
    /// Version 2: version 1 with DCE security identifiers.
    Dce,
    /// Version 3: name-based with MD5.
    Md5,
    /// Version 4: random.
    Random,
    /// Version 5: name-based with SHA-1.
    Sha1,
}

impl Version {
    /// Returns the version number (0 for [`Version::Nil`]).
    pub const fn number(self) -> u8 {
        match self {
            Self::Nil => 0,
            Self::Mac => 1,
            Self::Dce => 2,
            Self::Md5 => 3,
            Self::Random => 4,
            Self::Sha1 => 5,
        }
    }

    /// Returns the version number shifted into the high nibble of byte 6.
    pub const fn bits(self) -> u8 {
        self.number() << 4
    }

    /// Decodes a version number, returning `None` for numbers not defined by RFC 4122.
    pub const fn from_number(n: u8) -> Option<Self> {
        match n {
            0 => Some(Self::Nil),
            1 => Some(Self::Mac),
            2 => Some(Self::Dce),
            3 => Some(Self::Md5),
            4 => Some(Self::Random),
            5 => Some(Self::Sha1),
            _ => None,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => f.write_str("Nil"),
            _ => write!(f, "V{}", self.number()),
        }
    }
}

/// UUID variant as per RFC 4122, section 4.1.1.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum Variant {
    /// `0xx`: reserved for NCS backward compatibility.
    Ncs,
    /// `10x`: the layout specified by RFC 4122.
    Rfc4122,
    /// `110`: reserved for Microsoft backward compatibility.
    Microsoft,
    /// `111`: reserved for future definition.
    Undefined,
}

impl Variant {
    /// Returns the canonical bit pattern of the variant in the top bits of byte 8.
    pub const fn bits(self) -> u8 {
        match self {
            Self::Ncs => 0x00,
            Self::Rfc4122 => 0x80,
            Self::Microsoft => 0xc0,
            Self::Undefined => 0xe0,
        }
    }

    /// Classifies the top bits of `byte`, checking the longest patterns first.
    pub const fn from_byte(byte: u8) -> Self {
        let top = byte & 0xe0;
        if top == 0xe0 {
            Self::Undefined
        } else if top == 0xc0 {
            Self::Microsoft
        } else if top & 0x80 != 0 {
            Self::Rfc4122
        } else {
            Self::Ncs
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ncs => "NCS",
            Self::Rfc4122 => "RFC 4122",
            Self::Microsoft => "Microsoft",
            Self::Undefined => "Undefined",
        })
    }
}

impl Uuid {
    /// Returns the raw 4-bit version number.
    pub const fn version_num(&self) -> u8 {
        self.as_bytes()[VERSION_BYTE] >> 4
    }

    /// Returns the version, or `None` if the version field holds a number other than 0 through 5.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rfc4122::{Uuid, Version};
    ///
    /// let x = Uuid::parse_str("886313e1-3b8a-5372-9b90-0c9aee199e5d")?;
    /// assert_eq!(x.version(), Some(Version::Sha1));
    /// # Ok::<(), rfc4122::Error>(())
    /// ```
    pub const fn version(&self) -> Option<Version> {
        Version::from_number(self.version_num())
    }

    /// Returns the variant.
    pub const fn variant(&self) -> Variant {
        Variant::from_byte(self.as_bytes()[VARIANT_BYTE])
    }

    /// Returns a copy with the version field replaced.
    #[must_use]
    pub const fn with_version(self, version: Version) -> Self {
        let mut bytes = self.into_bytes();
        bytes[VERSION_BYTE] = (bytes[VERSION_BYTE] & 0x0f) | version.bits();
        Self::from_bytes(bytes)
    }

    /// Returns a copy with the variant field replaced.
    ///
    /// Only the two most significant bits of byte 8 are cleared before the pattern of `variant`
    /// is applied, so the third bit survives for [`Variant::Microsoft`] and
    /// [`Variant::Undefined`].
    #[must_use]
    pub const fn with_variant(self, variant: Variant) -> Self {
        let mut bytes = self.into_bytes();
        bytes[VARIANT_BYTE] = (bytes[VARIANT_BYTE] & 0x3f) | variant.bits();
        Self::from_bytes(bytes)
    }

    /// Sets `version` and the RFC 4122 variant; the last step of every generator.
    pub(crate) const fn stamp(self, version: Version) -> Self {
        self.with_version(version).with_variant(Variant::Rfc4122)
    }
}
