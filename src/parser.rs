//! Parser of the 8-4-4-4-12 and URN string representations

use crate::{Error, Uuid};

const URN_PREFIX: &[u8] = b"urn:uuid:";

impl Uuid {
    /// Creates an object from the 8-4-4-4-12 hexadecimal string representation, optionally
    /// preceded by the `urn:uuid:` prefix.
    ///
    /// Both lower-case and upper-case hexadecimal digits are accepted. The URN prefix is
    /// case-sensitive, and the four dashes must be present at their fixed positions.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rfc4122::Uuid;
    ///
    /// let x = Uuid::parse_str("6ba7b810-9dad-11d1-80b4-00c04fd430c8")?;
    /// let y = Uuid::parse_str("urn:uuid:6ba7b810-9dad-11d1-80b4-00c04fd430c8")?;
    /// assert_eq!(x, y);
    /// assert!(Uuid::parse_str("{6ba7b810-9dad-11d1-80b4-00c04fd430c8}").is_err());
    /// # Ok::<(), rfc4122::Error>(())
    /// ```
    pub fn parse_str(src: &str) -> Result<Self, Error> {
        match decode(src.as_bytes()) {
            Some(bytes) => Ok(Self::from_bytes(bytes)),
            None => Err(Error::InvalidFormat),
        }
    }

    /// Creates an object from a string representation known to be valid, panicking otherwise.
    ///
    /// This is a `const fn` so that literals are checked at compile time when used in a constant
    /// context. Use [`Uuid::parse_str`] for any input that may be malformed.
    ///
    /// # Panics
    ///
    /// Panics if `src` is not accepted by [`Uuid::parse_str`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rfc4122::Uuid;
    ///
    /// const ID: Uuid = Uuid::parse_or_panic("01234567-89ab-cdef-0123-456789abcdef");
    /// assert_eq!(ID.to_string(), "01234567-89ab-cdef-0123-456789abcdef");
    /// ```
    pub const fn parse_or_panic(src: &str) -> Self {
        match decode(src.as_bytes()) {
            Some(bytes) => Self::from_bytes(bytes),
            None => panic!("invalid UUID representation"),
        }
    }
}

const fn decode(src: &[u8]) -> Option<[u8; 16]> {
    let mut pos = match src.len() {
        36 => 0,
        45 if has_urn_prefix(src) => URN_PREFIX.len(),
        _ => return None,
    };

    let mut dst = [0u8; 16];
    let mut i = 0;
    while i < 16 {
        if i == 4 || i == 6 || i == 8 || i == 10 {
            if src[pos] != b'-' {
                return None;
            }
            pos += 1;
        }
        let (Some(hi), Some(lo)) = (hex_digit(src[pos]), hex_digit(src[pos + 1])) else {
            return None;
        };
        dst[i] = (hi << 4) | lo;
        pos += 2;
        i += 1;
    }
    Some(dst)
}

const fn has_urn_prefix(src: &[u8]) -> bool {
    let mut i = 0;
    while i < URN_PREFIX.len() {
        if src[i] != URN_PREFIX[i] {
            return false;
        }
        i += 1;
    }
    true
}

const fn hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}
