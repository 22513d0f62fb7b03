use crate::Base62Error;

/// Digits, then upper case, then lower case. This matches ASCII order, so
/// equal-length strings sort the same way as the values they encode.
pub const ALPHABET: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Width of an identifier's text form. `62^11 > 2^63`, so 11 characters hold
/// every identifier.
pub const ID_LEN: usize = 11;

/// Width of the timestamp-only marker produced by `AuidFactory::timestamp`.
pub const MARKER_LEN: usize = 7;

/// Width of the extended marker produced by `AuidFactory::timestamp_ex`.
pub const MARKER_EX_LEN: usize = 9;

const BASE: u64 = 62;
const NO_VALUE: u8 = 255;

/// Lookup table for Base62 decoding
const LOOKUP: [u8; 256] = {
    let mut lut = [NO_VALUE; 256];
    let mut i = 0;
    while i < ALPHABET.len() {
        lut[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    lut
};

/// Number of value bits a Base62 string of `len` characters can always hold,
/// i.e. the largest `b` with `2^b <= 62^len`, capped at 64.
pub const fn capacity_bits(len: usize) -> u32 {
    let mut bits = 0;
    // floor(len * log2(62)) without floats: grow a power of 62 in u128 and
    // count how many doublings fit.
    let mut cap: u128 = 1;
    let mut i = 0;
    while i < len && cap <= u64::MAX as u128 {
        cap *= BASE as u128;
        i += 1;
    }
    while bits < 64 && (1_u128 << (bits + 1)) <= cap {
        bits += 1;
    }
    bits
}

/// Encodes `value` into `buf`, most significant character first, using the
/// whole buffer as the output width.
///
/// Unused high-order positions are padded with `'0'`. Values of `62^len` or
/// more do not fit and wrap: only the low `len` digits are written.
pub fn encode_into(mut value: u64, buf: &mut [u8]) {
    for slot in buf.iter_mut().rev() {
        *slot = ALPHABET[(value % BASE) as usize];
        value /= BASE;
    }
}

/// Encodes `value` as a Base62 string of exactly `len` characters.
///
/// See [`encode_into`] for padding and wrapping behaviour.
///
/// # Example
///
/// ```
/// assert_eq!(auid::encode(61, 3), "00z");
/// assert_eq!(auid::encode(62, 3), "010");
/// // 62 needs two digits; at width 1 it wraps
/// assert_eq!(auid::encode(62, 1), "0");
/// ```
pub fn encode(value: u64, len: usize) -> String {
    let mut buf = vec![b'0'; len];
    encode_into(value, &mut buf);
    buf.into_iter().map(char::from).collect()
}

/// Decodes a Base62 string of any length.
///
/// # Errors
///
/// - [`Base62Error::InvalidCharacter`] for bytes outside the alphabet.
/// - [`Base62Error::Overflow`] if the value does not fit in a `u64`.
pub fn decode(encoded: &str) -> Result<u64, Base62Error> {
    let mut acc: u64 = 0;
    for (index, byte) in encoded.bytes().enumerate() {
        let val = LOOKUP[byte as usize];
        if val == NO_VALUE {
            return Err(Base62Error::InvalidCharacter { byte, index });
        }
        acc = acc
            .checked_mul(BASE)
            .and_then(|acc| acc.checked_add(u64::from(val)))
            .ok_or(Base62Error::Overflow)?;
    }
    Ok(acc)
}
