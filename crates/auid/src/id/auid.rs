use core::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use crate::{ID_LEN, ParseError, decode, encode_into};

/// A compact, sortable 63-bit identifier.
///
/// An `Auid` pairs the raw integer with its 11 character Base62 rendering,
/// computed once at construction. Equality, ordering and hashing only look at
/// the integer, and because the text form is fixed-width and uses an
/// ASCII-ordered alphabet, sorting the strings gives the same order as sorting
/// the integers.
///
/// Identifiers are minted by [`AuidFactory`] or parsed from text with
/// [`Auid::parse`]. [`Auid::EMPTY`] (integer `0`) is the "no identifier"
/// sentinel.
///
/// # Example
///
/// ```
/// use auid::Auid;
///
/// let id = Auid::parse("000004Zr3GJ")?;
/// assert_eq!(id.value(), (1_000 << 22) | (42 << 10) | 7);
/// assert_eq!(id.to_string(), "000004Zr3GJ");
/// assert_eq!(Auid::try_from(id.value())?, id);
/// # Ok::<(), auid::ParseError>(())
/// ```
///
/// [`AuidFactory`]: crate::AuidFactory
#[derive(Copy, Clone)]
pub struct Auid {
    value: u64,
    text: [u8; ID_LEN],
}

impl Auid {
    /// The sentinel for "no identifier", equal to the value built from `0`.
    pub const EMPTY: Self = Self {
        value: 0,
        text: [b'0'; ID_LEN],
    };

    /// Wraps a raw value and renders its text form.
    ///
    /// The sign bit must be clear; every caller inside the crate packs through
    /// a [`BitLayout`](crate::BitLayout) or checks beforehand.
    pub(crate) fn from_raw(value: u64) -> Self {
        debug_assert!(value <= i64::MAX as u64, "sign bit set");
        let mut text = [0; ID_LEN];
        encode_into(value, &mut text);
        Self { value, text }
    }

    /// Parses the 11 character text form.
    ///
    /// # Errors
    ///
    /// - [`ParseError::Empty`] for an empty string.
    /// - [`ParseError::InvalidLength`] unless the input is exactly 11 bytes.
    /// - [`ParseError::Base62`] for characters outside `0-9A-Za-z`.
    /// - [`ParseError::SignBit`] for values above `i64::MAX`.
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        if s.is_empty() {
            return Err(ParseError::Empty);
        }
        if s.len() != ID_LEN {
            return Err(ParseError::invalid_length(s.len()));
        }
        let value = decode(s)?;
        if value > i64::MAX as u64 {
            return Err(ParseError::SignBit { value });
        }
        // Every byte was validated by `decode`, and at a fixed width the
        // encoding is unique, so the input already is the canonical text.
        let mut text = [0; ID_LEN];
        text.copy_from_slice(s.as_bytes());
        Ok(Self { value, text })
    }

    /// Non-failing variant of [`Auid::parse`].
    #[must_use]
    pub fn try_parse(s: &str) -> Option<Self> {
        Self::parse(s).ok()
    }

    /// Parses `s`, falling back to [`Auid::EMPTY`] for malformed input.
    #[must_use]
    pub fn parse_or_empty(s: &str) -> Self {
        Self::try_parse(s).unwrap_or(Self::EMPTY)
    }

    /// Maps a nullable integer column to an identifier; `None` becomes
    /// [`Auid::EMPTY`].
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::SignBit`] for negative values.
    pub fn from_nullable(value: Option<i64>) -> Result<Self, ParseError> {
        value.map_or(Ok(Self::EMPTY), Self::try_from)
    }

    /// The raw integer.
    pub const fn value(&self) -> u64 {
        self.value
    }

    /// The raw integer as a signed value, for `BIGINT` style columns. Never
    /// negative.
    pub const fn to_i64(&self) -> i64 {
        self.value as i64
    }

    /// The cached 11 character text form.
    pub fn as_str(&self) -> &str {
        // SAFETY: `text` is written either by `encode_into`, which only emits
        // bytes from the ASCII alphabet, or copied from input that `decode`
        // accepted, which only accepts bytes from that same alphabet.
        unsafe { core::str::from_utf8_unchecked(&self.text) }
    }

    /// Returns `true` for the [`Auid::EMPTY`] sentinel.
    pub const fn is_empty(&self) -> bool {
        self.value == 0
    }
}

impl Default for Auid {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl PartialEq for Auid {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Auid {}

impl PartialOrd for Auid {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Auid {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl Hash for Auid {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl PartialEq<str> for Auid {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Auid {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl fmt::Display for Auid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Auid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Auid")
            .field("value", &self.value)
            .field("text", &self.as_str())
            .finish()
    }
}

impl AsRef<str> for Auid {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl FromStr for Auid {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Auid {
    type Error = ParseError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl TryFrom<u64> for Auid {
    type Error = ParseError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        if value > i64::MAX as u64 {
            return Err(ParseError::SignBit { value });
        }
        Ok(Self::from_raw(value))
    }
}

impl TryFrom<i64> for Auid {
    type Error = ParseError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::try_from(value as u64)
    }
}

impl From<Auid> for u64 {
    fn from(id: Auid) -> Self {
        id.value
    }
}

impl From<Auid> for i64 {
    fn from(id: Auid) -> Self {
        id.to_i64()
    }
}
