use crate::{Base62Error, ID_LEN};

/// Errors for turning untrusted text or integers into an [`Auid`].
///
/// [`Auid`]: crate::Auid
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum ParseError {
    /// The input string was empty.
    #[error("empty identifier")]
    Empty,

    /// The input string is not exactly [`ID_LEN`] bytes long.
    #[error("invalid identifier length {len}, expected {expected}")]
    InvalidLength { len: usize, expected: usize },

    /// The input string contains non-Base62 characters or overflows.
    #[error(transparent)]
    Base62(#[from] Base62Error),

    /// The value has the sign bit set and cannot be an identifier.
    #[error("identifier value {value:#x} has the sign bit set")]
    SignBit { value: u64 },
}

impl ParseError {
    pub(crate) const fn invalid_length(len: usize) -> Self {
        Self::InvalidLength {
            len,
            expected: ID_LEN,
        }
    }
}

/// Errors for decomposing an identifier into its fields.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum ExtractError {
    /// The identifier is larger than anything the current layout can produce.
    #[error("identifier {id} exceeds the layout maximum {max}")]
    IdOutOfRange { id: u64, max: u64 },

    /// The timestamp field does not map to a representable wall-clock time
    /// under the clock's epoch and tick size.
    #[error("timestamp of {ticks} ticks is out of range for this clock")]
    TimestampOutOfRange { ticks: u64 },
}
