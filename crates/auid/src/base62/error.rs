/// Errors raised while decoding Base62 text.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum Base62Error {
    /// A byte outside `0-9A-Za-z` was found.
    #[error("invalid base62 character {:?} at index {index}", as_char(.byte))]
    InvalidCharacter { byte: u8, index: usize },

    /// The decoded value does not fit in 64 bits.
    #[error("base62 decode overflow")]
    Overflow,
}

fn as_char(byte: &u8) -> char {
    char::from(*byte)
}
