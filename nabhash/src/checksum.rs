use crate::hex::{self, HexError};
use crate::SIZE;
use core::fmt;
use core::str::FromStr;

/// A finalized 128-bit NABHash checksum.
///
/// Displays as 32 lowercase hex characters.
///
/// # Example
///
/// ```
/// use nabhash::Checksum;
///
/// let sum = nabhash::hash(&[0x00, 0x01]);
/// assert_eq!(sum.to_string(), "95a85a5b60f29b9ec58569f92ebea60e");
///
/// let parsed: Checksum = "95A85A5B60F29B9EC58569F92EBEA60E".parse().unwrap();
/// assert_eq!(parsed, sum);
/// ```
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Checksum([u8; SIZE]);

impl Checksum {
    /// The length of the hex representation.
    pub const HEX_LEN: usize = SIZE * 2;

    /// Wrap raw checksum bytes.
    #[inline]
    pub const fn from_bytes(bytes: [u8; SIZE]) -> Self {
        Self(bytes)
    }

    /// Returns a reference to the raw checksum bytes.
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; SIZE] {
        &self.0
    }

    /// Returns the raw checksum bytes.
    #[inline]
    pub const fn to_bytes(self) -> [u8; SIZE] {
        self.0
    }

    /// Write the lowercase hex representation into `output`, returning it as a `&str`.
    ///
    /// # Example
    ///
    /// ```
    /// let sum = nabhash::hash(b"");
    ///
    /// let mut buf = [0u8; nabhash::Checksum::HEX_LEN];
    /// assert_eq!(sum.encode_hex(&mut buf), "e99722eb55b3df5f307c5e8e549dd44a");
    /// ```
    pub fn encode_hex<'o>(&self, output: &'o mut [u8; Self::HEX_LEN]) -> &'o str {
        for (byte, out) in self.0.iter().zip(output.chunks_exact_mut(2)) {
            hex::encode_byte(*byte, out);
        }
        // SAFETY: every byte of `output` was written by `encode_byte`, which only produces ASCII
        // digits and lowercase letters.
        unsafe { core::str::from_utf8_unchecked(output.as_slice()) }
    }

    /// Returns the lowercase hex representation.
    #[cfg(feature = "alloc")]
    #[cfg_attr(docsrs, doc(cfg(feature = "alloc")))]
    pub fn to_hex(&self) -> alloc::string::String {
        hex::encode(&self.0)
    }

    /// Parse a checksum from its hex representation (either case).
    ///
    /// # Errors
    ///
    /// - [`HexError::Size`]: `input` is not exactly 32 characters.
    /// - [`HexError::Encoding`]: `input` contains a non-hex character.
    pub fn from_hex(input: &[u8]) -> Result<Self, HexError> {
        if input.len() != Self::HEX_LEN { return Err(HexError::Size) }

        let mut bytes = [0u8; SIZE];
        hex::decode_into(input, &mut bytes).map(|_| Self(bytes))
    }
}

impl fmt::LowerHex for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = [0u8; Self::HEX_LEN];
        f.write_str(self.encode_hex(&mut buf))
    }
}

impl fmt::Display for Checksum {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        <Self as fmt::LowerHex>::fmt(self, f)
    }
}

impl fmt::Debug for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = [0u8; Self::HEX_LEN];
        f.debug_tuple("Checksum").field(&self.encode_hex(&mut buf)).finish()
    }
}

impl FromStr for Checksum {
    type Err = HexError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s.as_bytes())
    }
}

impl From<[u8; SIZE]> for Checksum {
    #[inline]
    fn from(value: [u8; SIZE]) -> Self {
        Self(value)
    }
}

impl From<Checksum> for [u8; SIZE] {
    #[inline]
    fn from(value: Checksum) -> Self {
        value.0
    }
}

impl AsRef<[u8]> for Checksum {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.0.as_slice()
    }
}

impl PartialEq<[u8; SIZE]> for Checksum {
    #[inline]
    fn eq(&self, other: &[u8; SIZE]) -> bool {
        self.0 == *other
    }
}
