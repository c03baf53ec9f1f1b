//! Lowercase Hex Encoding and Decoding
//!
//! Checksums are conventionally displayed as 32 lowercase hex characters. The encoder here never
//! allocates, and the decoder accepts either case.
use crate::error::InvalidSize;
use core::fmt;

/// The length of `len` bytes once hex encoded.
#[must_use]
#[inline]
pub const fn encode_len(len: usize) -> usize {
    len << 1
}

#[inline]
const fn encode_nibble(nibble: u8) -> u8 {
    // 0..=9 -> '0'..='9', 10..=15 -> 'a'..='f', without a branch.
    let n = nibble as u32;
    (48u32 + n + (9u32.wrapping_sub(n).wrapping_shr(8) & 39)) as u8
}

#[inline]
pub(crate) fn encode_byte(byte: u8, output: &mut [u8]) {
    output[0] = encode_nibble(byte >> 4);
    output[1] = encode_nibble(byte & 0xf);
}

/// Hex encode `input` into `output`.
///
/// # Returns
///
/// The number of bytes written to `output`, always `input.len() * 2`.
///
/// # Errors
///
/// If `output` is shorter than `input.len() * 2`.
///
/// # Example
///
/// ```
/// use nabhash::hex;
///
/// let mut output = [0u8; 8];
/// let len = hex::encode_into(&[0xde, 0xad, 0xbe, 0xef], &mut output).unwrap();
///
/// assert_eq!(&output[..len], b"deadbeef");
/// ```
pub fn encode_into(input: &[u8], output: &mut [u8]) -> Result<usize, InvalidSize> {
    let hex_len = encode_len(input.len());
    if output.len() < hex_len { return Err(InvalidSize) }

    for (byte, out) in input.iter().zip(output.chunks_exact_mut(2)) {
        encode_byte(*byte, out);
    }

    Ok(hex_len)
}

/// Hex encode `input` into `output`, returning the encoded region as a `&str`.
///
/// # Errors
///
/// If `output` is shorter than `input.len() * 2`.
///
/// # Example
///
/// ```
/// use nabhash::hex;
///
/// let mut output = [0u8; 22];
/// let repr = hex::encode_str(b"hello world", &mut output).unwrap();
///
/// assert_eq!(repr, "68656c6c6f20776f726c64");
/// ```
#[inline]
pub fn encode_str<'o>(input: &[u8], output: &'o mut [u8]) -> Result<&'o str, InvalidSize> {
    encode_into(input, output)
        // SAFETY: `encode_nibble` only ever produces ASCII digits and lowercase letters.
        .map(move |len| unsafe { core::str::from_utf8_unchecked(&output[..len]) })
}

alloc! {
    /// Hex encode `input` into a new `String`.
    ///
    /// # Example
    ///
    /// ```
    /// use nabhash::hex;
    ///
    /// assert_eq!(hex::encode(b"NABHash"), "4e414248617368");
    /// ```
    pub fn encode(input: &[u8]) -> alloc::string::String {
        let mut output = alloc::vec![0u8; encode_len(input.len())];
        let mut len = 0;
        if let Ok(written) = encode_into(input, output.as_mut_slice()) {
            len = written;
        }
        output.truncate(len);
        // SAFETY: `encode_nibble` only ever produces ASCII digits and lowercase letters.
        unsafe { alloc::string::String::from_utf8_unchecked(output) }
    }
}

#[inline]
const fn decode_nibble(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None
    }
}

/// Possible errors while decoding a hex string.
#[derive(Copy, Clone, PartialEq, Eq)]
pub enum HexError {
    /// An invalid character was encountered.
    Encoding,
    /// The input had an odd length, or the output was not large enough (or, when parsing a
    /// [`Checksum`], not exactly the checksum size).
    ///
    /// [`Checksum`]: crate::Checksum
    Size
}

impl From<InvalidSize> for HexError {
    fn from(_value: InvalidSize) -> Self {
        Self::Size
    }
}

impl From<HexError> for crate::Unspecified {
    fn from(_value: HexError) -> Self {
        Self
    }
}

impl fmt::Display for HexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Size => f.write_str("HexError::Size"),
            Self::Encoding => f.write_str("HexError::Encoding")
        }
    }
}

impl fmt::Debug for HexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        <Self as fmt::Display>::fmt(self, f)
    }
}

std! { impl std::error::Error for HexError {} }

/// Decode the hex encoded `input` into `output`.
///
/// # Returns
///
/// The number of bytes decoded, `input.len() / 2`.
///
/// # Errors
///
/// - [`HexError::Size`]: `input` has an odd length or `output` is too small.
/// - [`HexError::Encoding`]: a character outside `[0-9a-fA-F]` was encountered.
pub fn decode_into(input: &[u8], output: &mut [u8]) -> Result<usize, HexError> {
    let dec_len = input.len() >> 1;
    if input.len() & 1 != 0 || output.len() < dec_len { return Err(HexError::Size) }

    for (pair, out) in input.chunks_exact(2).zip(output.iter_mut()) {
        match (decode_nibble(pair[0]), decode_nibble(pair[1])) {
            (Some(hi), Some(lo)) => *out = (hi << 4) | lo,
            _ => return Err(HexError::Encoding)
        }
    }

    Ok(dec_len)
}

alloc! {
    /// Decode the hex encoded `input` into a new `Vec`.
    ///
    /// # Errors
    ///
    /// - [`HexError::Size`]: `input` has an odd length.
    /// - [`HexError::Encoding`]: a character outside `[0-9a-fA-F]` was encountered.
    pub fn decode(input: &[u8]) -> Result<alloc::vec::Vec<u8>, HexError> {
        let mut output = alloc::vec![0u8; input.len() >> 1];
        decode_into(input, output.as_mut_slice()).map(move |_| output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_nibble() {
        let expected = b"0123456789abcdef";
        for (n, c) in expected.iter().enumerate() {
            assert_eq!(encode_nibble(n as u8), *c);
            assert_eq!(decode_nibble(*c), Some(n as u8));
        }
        assert_eq!(decode_nibble(b'F'), Some(15));
        assert_eq!(decode_nibble(b'g'), None);
    }

    #[test]
    fn encode_works() {
        let mut out = [0u8; 22];
        let len = encode_into(b"hello world", &mut out).unwrap();
        assert_eq!(len, 22);
        assert_eq!(&out, b"68656c6c6f20776f726c64");
    }

    #[test]
    fn encode_short_output() {
        let mut out = [0u8; 21];
        assert_eq!(encode_into(b"hello world", &mut out), Err(InvalidSize));
    }

    #[test]
    fn decode_mixed_case() {
        let mut out = [0u8; 6];
        assert_eq!(decode_into(b"0000000FF1ce", &mut out), Ok(6));
        assert_eq!(out, [0, 0, 0, 0x0f, 0xf1, 0xce]);
    }

    #[test]
    fn invalid_hex() {
        let mut out = [0; 69];
        assert_eq!(decode_into(b"hello world I am not valid hex !!!", &mut out), Err(HexError::Encoding));
        assert_eq!(decode_into(b"abc", &mut out), Err(HexError::Size));
        assert_eq!(decode_into(b"abcd", &mut out[..1]), Err(HexError::Size));
    }
}
