use crate::ConfigError;

/// Total number of usable bits in an identifier. The sign bit of the 64-bit
/// container is always zero.
pub const ID_BITS: u8 = 63;

/// Describes how the 63 identifier bits are split between timestamp, origin id
/// and sequence.
///
/// Fields are packed from **MSB to LSB**:
///
/// ```text
///  Bit Index:  63          63 62                         0
///              +-------------+-----------+--------+----------+
///  Field:      | sign (1, 0) | timestamp | origin | sequence |
///              +-------------+-----------+--------+----------+
///              |<---------- MSB ---- 64 bits ---- LSB ------>|
/// ```
///
/// The default layout is 41/12/10: 41 bits of milliseconds (~69 years), 4096
/// origins and 1024 ids per origin per tick.
///
/// # Example
///
/// ```
/// use auid::{BitLayout, ConfigError};
///
/// let layout = BitLayout::new(41, 12, 10)?;
/// assert_eq!(layout.max_origin_id(), 4095);
/// assert_eq!(layout.max_sequence(), 1023);
///
/// assert!(matches!(
///     BitLayout::new(41, 12, 11),
///     Err(ConfigError::BitWidthSum { .. })
/// ));
/// # Ok::<(), ConfigError>(())
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BitLayout {
    timestamp_bits: u8,
    origin_bits: u8,
    sequence_bits: u8,
}

impl Default for BitLayout {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl BitLayout {
    /// 41 bits timestamp, 12 bits origin id, 10 bits sequence.
    pub const DEFAULT: Self = Self {
        timestamp_bits: 41,
        origin_bits: 12,
        sequence_bits: 10,
    };

    /// Creates a layout from three field widths.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::BitWidthSum`] unless the widths add up to
    /// exactly [`ID_BITS`].
    pub const fn new(
        timestamp_bits: u8,
        origin_bits: u8,
        sequence_bits: u8,
    ) -> Result<Self, ConfigError> {
        let sum = timestamp_bits as u16 + origin_bits as u16 + sequence_bits as u16;
        if sum != ID_BITS as u16 {
            return Err(ConfigError::BitWidthSum {
                timestamp_bits,
                origin_bits,
                sequence_bits,
            });
        }
        Ok(Self {
            timestamp_bits,
            origin_bits,
            sequence_bits,
        })
    }

    pub const fn timestamp_bits(&self) -> u8 {
        self.timestamp_bits
    }

    pub const fn origin_bits(&self) -> u8 {
        self.origin_bits
    }

    pub const fn sequence_bits(&self) -> u8 {
        self.sequence_bits
    }

    /// `2^timestamp_bits - 1`
    pub const fn max_timestamp(&self) -> u64 {
        mask(self.timestamp_bits)
    }

    /// `2^origin_bits - 1`
    pub const fn max_origin_id(&self) -> u64 {
        mask(self.origin_bits)
    }

    /// `2^sequence_bits - 1`
    pub const fn max_sequence(&self) -> u64 {
        mask(self.sequence_bits)
    }

    /// Largest raw value any identifier under this layout can hold.
    pub const fn max_value(&self) -> u64 {
        mask(ID_BITS)
    }

    /// Number of bits to shift the timestamp to its position.
    pub const fn timestamp_shift(&self) -> u8 {
        self.origin_bits + self.sequence_bits
    }

    /// Number of bits to shift the origin id to its position.
    pub const fn origin_shift(&self) -> u8 {
        self.sequence_bits
    }

    /// Packs the three components into a raw identifier. Components wider than
    /// their field are truncated to it.
    pub const fn pack(&self, timestamp: u64, origin_id: u64, sequence: u64) -> u64 {
        let timestamp = (timestamp & self.max_timestamp()) << self.timestamp_shift();
        let origin_id = (origin_id & self.max_origin_id()) << self.origin_shift();
        let sequence = sequence & self.max_sequence();
        timestamp | origin_id | sequence
    }

    /// Extracts the timestamp field from a raw identifier.
    pub const fn timestamp_of(&self, raw: u64) -> u64 {
        (raw >> self.timestamp_shift()) & self.max_timestamp()
    }

    /// Extracts the origin id field from a raw identifier.
    pub const fn origin_id_of(&self, raw: u64) -> u64 {
        (raw >> self.origin_shift()) & self.max_origin_id()
    }

    /// Extracts the sequence field from a raw identifier.
    pub const fn sequence_of(&self, raw: u64) -> u64 {
        raw & self.max_sequence()
    }
}

/// Bitmask with the low `bits` bits set. `bits` never exceeds 63 here.
const fn mask(bits: u8) -> u64 {
    (1_u64 << bits) - 1
}
