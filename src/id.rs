use std::{fmt, str};

use crate::Error;

/// Represents a Universally Unique IDentifier.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct Uuid([u8; 16]);

const DIGITS: &[u8; 16] = b"0123456789abcdef";

impl Uuid {
    /// Nil UUID (00000000-0000-0000-0000-000000000000)
    pub const NIL: Self = Self([0x00; 16]);

    /// Max UUID (ffffffff-ffff-ffff-ffff-ffffffffffff)
    pub const MAX: Self = Self([0xff; 16]);

    /// Creates an object from a 16-byte big-endian array.
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Creates an object from a byte slice, which must be exactly 16 bytes long.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rfc4122::Uuid;
    ///
    /// let x = Uuid::from_slice(&[0xff; 16])?;
    /// assert_eq!(x, Uuid::MAX);
    /// assert!(Uuid::from_slice(&[0xff; 15]).is_err());
    /// # Ok::<(), rfc4122::Error>(())
    /// ```
    pub fn from_slice(src: &[u8]) -> Result<Self, Error> {
        <[u8; 16]>::try_from(src)
            .map(Self)
            .map_err(|_| Error::InvalidFormat)
    }

    /// Returns a reference to the underlying byte array.
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Consumes the object and returns the underlying byte array.
    pub const fn into_bytes(self) -> [u8; 16] {
        self.0
    }

    /// Returns `true` if this is the Nil UUID.
    pub const fn is_nil(&self) -> bool {
        u128::from_be_bytes(self.0) == 0
    }

    /// Writes the 36-character 8-4-4-4-12 representation into `dst`.
    fn encode_into(&self, dst: &mut [u8; 36]) {
        let mut buf_iter = dst.iter_mut();
        for (i, e) in self.0.iter().enumerate() {
            for digit in [DIGITS[(e >> 4) as usize], DIGITS[(e & 15) as usize]] {
                if let Some(slot) = buf_iter.next() {
                    *slot = digit;
                }
            }
            if i == 3 || i == 5 || i == 7 || i == 9 {
                if let Some(slot) = buf_iter.next() {
                    *slot = b'-';
                }
            }
        }
    }

    /// Returns the Microsoft-style representation wrapped in curly braces.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rfc4122::Uuid;
    ///
    /// assert_eq!(
    ///     Uuid::NAMESPACE_URL.braced(),
    ///     "{6ba7b811-9dad-11d1-80b4-00c04fd430c8}"
    /// );
    /// ```
    pub fn braced(&self) -> String {
        let mut buffer = [0u8; 36];
        self.encode_into(&mut buffer);
        let mut dst = String::with_capacity(38);
        dst.push('{');
        dst.extend(buffer.iter().map(|&c| char::from(c)));
        dst.push('}');
        dst
    }

    /// Returns the URN representation as per RFC 4122, section 3.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rfc4122::Uuid;
    ///
    /// assert_eq!(
    ///     Uuid::NAMESPACE_OID.urn(),
    ///     "urn:uuid:6ba7b812-9dad-11d1-80b4-00c04fd430c8"
    /// );
    /// ```
    pub fn urn(&self) -> String {
        let mut buffer = [0u8; 36];
        self.encode_into(&mut buffer);
        let mut dst = String::with_capacity(45);
        dst.push_str("urn:uuid:");
        dst.extend(buffer.iter().map(|&c| char::from(c)));
        dst
    }

    /// Reads a value handed over by a database driver: either the 16 raw bytes or the textual
    /// representation in bytes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rfc4122::Uuid;
    ///
    /// let x = Uuid::NAMESPACE_X500;
    /// assert_eq!(Uuid::scan(x.as_bytes())?, x);
    /// assert_eq!(Uuid::scan(x.value().as_bytes())?, x);
    /// # Ok::<(), rfc4122::Error>(())
    /// ```
    pub fn scan(src: &[u8]) -> Result<Self, Error> {
        if src.len() == 16 {
            Self::from_slice(src)
        } else {
            str::from_utf8(src)
                .map_err(|_| Error::InvalidFormat)
                .and_then(Self::parse_str)
        }
    }

    /// Returns the representation handed over to a database driver for storage.
    pub fn value(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Uuid {
    /// Returns the 8-4-4-4-12 canonical hexadecimal string representation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buffer = [0u8; 36];
        self.encode_into(&mut buffer);
        f.write_str(str::from_utf8(&buffer).map_err(|_| fmt::Error)?)
    }
}

impl str::FromStr for Uuid {
    type Err = Error;

    /// Creates an object from the 8-4-4-4-12 or URN string representation.
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        Self::parse_str(src)
    }
}

impl From<Uuid> for [u8; 16] {
    fn from(src: Uuid) -> Self {
        src.0
    }
}

impl From<[u8; 16]> for Uuid {
    fn from(src: [u8; 16]) -> Self {
        Self(src)
    }
}

impl TryFrom<&[u8]> for Uuid {
    type Error = Error;

    fn try_from(src: &[u8]) -> Result<Self, Self::Error> {
        Self::from_slice(src)
    }
}

impl AsRef<[u8]> for Uuid {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl From<Uuid> for u128 {
    fn from(src: Uuid) -> Self {
        Self::from_be_bytes(src.0)
    }
}

impl From<u128> for Uuid {
    fn from(src: u128) -> Self {
        Self(src.to_be_bytes())
    }
}

impl From<Uuid> for String {
    fn from(src: Uuid) -> Self {
        src.to_string()
    }
}

impl TryFrom<String> for Uuid {
    type Error = Error;

    fn try_from(src: String) -> Result<Self, Self::Error> {
        src.parse()
    }
}

impl TryFrom<&str> for Uuid {
    type Error = Error;

    fn try_from(src: &str) -> Result<Self, Self::Error> {
        src.parse()
    }
}

#[cfg(feature = "uuid")]
#[cfg_attr(docsrs, doc(cfg(feature = "uuid")))]
mod uuid_support {
    use super::Uuid;

    impl From<Uuid> for uuid::Uuid {
        fn from(src: Uuid) -> Self {
            uuid::Uuid::from_bytes(src.0)
        }
    }

    impl From<uuid::Uuid> for Uuid {
        fn from(src: uuid::Uuid) -> Self {
            Self(src.into_bytes())
        }
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
mod serde_support {
    use super::{fmt, Uuid};
    use serde::{de, Deserializer, Serializer};

    impl serde::Serialize for Uuid {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            if serializer.is_human_readable() {
                serializer.collect_str(self)
            } else {
                serializer.serialize_bytes(self.as_bytes())
            }
        }
    }

    impl<'de> serde::Deserialize<'de> for Uuid {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            if deserializer.is_human_readable() {
                deserializer.deserialize_str(VisitorImpl)
            } else {
                deserializer.deserialize_bytes(VisitorImpl)
            }
        }
    }

    struct VisitorImpl;

    impl<'de> de::Visitor<'de> for VisitorImpl {
        type Value = Uuid;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(formatter, "a UUID representation")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            Self::Value::parse_str(value).map_err(de::Error::custom)
        }

        fn visit_bytes<E: de::Error>(self, value: &[u8]) -> Result<Self::Value, E> {
            Self::Value::from_slice(value).map_err(de::Error::custom)
        }
    }

}

#[cfg(feature = "rusqlite")]
#[cfg_attr(docsrs, doc(cfg(feature = "rusqlite")))]
mod rusqlite_support {
    use super::Uuid;
    use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};

    impl FromSql for Uuid {
        fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
            match value {
                ValueRef::Blob(src) | ValueRef::Text(src) => {
                    Uuid::scan(src).map_err(|e| FromSqlError::Other(Box::new(e)))
                }
                _ => Err(FromSqlError::InvalidType),
            }
        }
    }

    impl ToSql for Uuid {
        fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
            Ok(ToSqlOutput::from(self.value()))
        }
    }

}
