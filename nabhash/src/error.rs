use core::fmt;

/// A generic error type representing an unspecified failure.
///
/// Hashing itself never fails. This is only returned at the edges of the API, such as when
/// parsing a [`Backend`] name or requesting a backend the host cannot run.
///
/// [`Backend`]: crate::Backend
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Unspecified;

impl fmt::Display for Unspecified {
    /// Writes "Unspecified" to the formatter.
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("Unspecified")
    }
}

std! { impl std::error::Error for Unspecified {} }

/// Error returned when the provided output buffer is too small for the checksum.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct InvalidSize;

impl fmt::Display for InvalidSize {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("InvalidSize")
    }
}

std! { impl std::error::Error for InvalidSize {} }
