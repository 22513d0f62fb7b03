use core::time::Duration;

use crate::{Base62Error, ExtractError, GeneratorError, ParseError};

/// A result type defaulting to the crate-wide [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All errors `auid` can produce.
///
/// Each concern has its own error type; this enum unifies them for callers
/// that just want to propagate with `?`.
///
/// - [`ConfigError`] and [`GeneratorError::ClockRegression`] are fatal: the
///   factory is misconfigured or its clock is broken, retrying will not help.
/// - [`ParseError`] and [`ExtractError`] are expected for malformed or foreign
///   input and are safe to surface as a client error.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Invalid construction parameters.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Minting failed.
    #[error(transparent)]
    Generator(#[from] GeneratorError),

    /// The input is not a valid identifier string or integer.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The identifier cannot be decomposed under the current layout.
    #[error(transparent)]
    Extract(#[from] ExtractError),
}

/// Construction-time failures. These are fatal: the factory cannot be built
/// safely and there is no fallback.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The three bit widths do not add up to 63.
    #[error(
        "bit layout {timestamp_bits}/{origin_bits}/{sequence_bits} sums to {}, expected 63",
        bit_sum(.timestamp_bits, .origin_bits, .sequence_bits)
    )]
    BitWidthSum {
        timestamp_bits: u8,
        origin_bits: u8,
        sequence_bits: u8,
    },

    /// The origin id does not fit in the layout's origin field.
    #[error("origin id {origin_id} exceeds the layout maximum {max}")]
    OriginIdOutOfRange { origin_id: u64, max: u64 },

    /// Only loopback or unspecified addresses were found.
    #[error("no non-loopback network address available to derive an origin id")]
    NoNetworkAddress,

    /// The local address could not be determined.
    #[error("network address lookup failed: {0}")]
    NetworkUnavailable(String),

    /// The clock epoch lies after the current system time.
    #[error("clock epoch {epoch:?} is ahead of the system clock")]
    EpochInFuture { epoch: Duration },

    /// A clock tick must have a non-zero duration.
    #[error("clock tick size must be non-zero")]
    ZeroTickSize,

    /// The clock's background ticker could not be started.
    #[error("clock unavailable: {0}")]
    ClockUnavailable(String),
}

fn bit_sum(timestamp_bits: &u8, origin_bits: &u8, sequence_bits: &u8) -> u16 {
    u16::from(*timestamp_bits) + u16::from(*origin_bits) + u16::from(*sequence_bits)
}

impl From<Base62Error> for Error {
    fn from(err: Base62Error) -> Self {
        Self::Parse(ParseError::Base62(err))
    }
}

impl Error {
    /// Returns `true` for errors that signal a broken deployment (bad layout,
    /// origin id, clock) rather than bad input.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Config(_) | Self::Generator(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fatal_classification() {
        let config: Error = ConfigError::ZeroTickSize.into();
        let regression: Error = GeneratorError::ClockRegression { last: 2, now: 1 }.into();
        let parse: Error = ParseError::Empty.into();
        let extract: Error = ExtractError::IdOutOfRange { id: 9, max: 1 }.into();

        assert!(config.is_fatal());
        assert!(regression.is_fatal());
        assert!(!parse.is_fatal());
        assert!(!extract.is_fatal());
    }

    #[test]
    fn base62_errors_surface_as_parse_errors() {
        let err: Error = Base62Error::Overflow.into();
        assert_eq!(err, Error::Parse(ParseError::Base62(Base62Error::Overflow)));
        assert_eq!(err.to_string(), "base62 decode overflow");
    }

    #[test]
    fn bit_width_sum_message_reports_total() {
        let err = ConfigError::BitWidthSum {
            timestamp_bits: 41,
            origin_bits: 12,
            sequence_bits: 11,
        };
        assert_eq!(err.to_string(), "bit layout 41/12/11 sums to 64, expected 63");
    }
}
