use crate::backend::{self, Backend, Transform};
use crate::checksum::Checksum;
use crate::error::InvalidSize;
use crate::state::State;
use crate::{BLOCK_SIZE, SIZE};
use core::fmt;
use zeroize::Zeroize;

/// The streaming `NABHash` hasher.
///
/// Input may be fed in any number of [`update`] calls of any size, the checksum only depends on
/// the concatenation of everything written.
///
/// # Example
///
/// ```
/// use nabhash::NabHash;
///
/// let mut hasher = NabHash::new();
///
/// hasher.update(&[0xde, 0xad]);
/// hasher.update(&[0xbe, 0xef]);
///
/// let sum = hasher.finalize();
/// assert_eq!(sum.to_string(), "9041d0d440fe93f69515b771619aa54c");
///
/// // finalize does not consume or alter the stream.
/// assert_eq!(hasher.finalize(), sum);
/// ```
///
/// [`update`]: NabHash::update
#[derive(Clone)]
pub struct NabHash {
    state: State,
    buf: [u8; BLOCK_SIZE],
    len: u64,
    staged: usize,
    transform: &'static dyn Transform
}

impl NabHash {
    /// The size of the checksum in bytes.
    pub const OUTPUT_SIZE: usize = SIZE;
    /// The size of a block in bytes.
    pub const BLOCK_SIZE: usize = BLOCK_SIZE;

    #[inline]
    const fn with_transform(transform: &'static dyn Transform) -> Self {
        Self {
            state: State::INIT,
            buf: [0u8; BLOCK_SIZE],
            len: 0,
            staged: 0,
            transform
        }
    }

    /// Create a new `NabHash` instance using the process-wide active [`Backend`].
    ///
    /// The first call in a process selects the backend, see [`backend::active`].
    #[inline]
    pub fn new() -> Self {
        Self::with_transform(backend::active_transform())
    }

    /// Create a new `NabHash` instance using the provided `backend`.
    ///
    /// Every backend computes the same checksum, this exists for testing and benchmarking.
    ///
    /// # Returns
    ///
    /// `None` if the current host cannot run `backend`.
    ///
    /// # Example
    ///
    /// ```
    /// use nabhash::{NabHash, Backend};
    ///
    /// let mut portable = NabHash::with_backend(Backend::Portable).unwrap();
    /// let mut active = NabHash::new();
    ///
    /// portable.update(b"hello world");
    /// active.update(b"hello world");
    ///
    /// assert_eq!(portable.finalize(), active.finalize());
    /// ```
    #[inline]
    pub fn with_backend(backend: Backend) -> Option<Self> {
        backend.transform().map(Self::with_transform)
    }

    /// Compute the checksum of `data` in one shot.
    #[inline]
    pub fn digest(data: &[u8]) -> Checksum {
        let mut hasher = Self::new();
        hasher.update(data);
        hasher.finalize()
    }

    /// Feed `data` into the hasher.
    ///
    /// Whole blocks are transformed immediately, a trailing partial block is staged until more
    /// input arrives or the hasher is finalized.
    ///
    /// # Returns
    ///
    /// The number of bytes consumed, which is always `data.len()`.
    pub fn update(&mut self, data: &[u8]) -> usize {
        let consumed = data.len();
        self.len = self.len.wrapping_add(consumed as u64);

        let mut data = data;

        if self.staged != 0 {
            let take = (BLOCK_SIZE - self.staged).min(data.len());
            self.buf[self.staged..self.staged + take].copy_from_slice(&data[..take]);
            self.staged += take;
            data = &data[take..];

            if self.staged < BLOCK_SIZE { return consumed }

            self.transform.block(&mut self.state, &self.buf);
            self.staged = 0;
        }

        let whole = data.len() - data.len() % BLOCK_SIZE;
        if whole != 0 {
            self.transform.block(&mut self.state, &data[..whole]);
        }

        let rest = &data[whole..];
        self.buf[..rest.len()].copy_from_slice(rest);
        self.staged = rest.len();

        consumed
    }

    /// Compute the checksum of everything written so far.
    ///
    /// A staged partial block is zero padded and transformed on a copy of the state, so the
    /// hasher is left untouched: `finalize` may be called any number of times, and writing may
    /// continue afterwards.
    pub fn finalize(&self) -> Checksum {
        let mut state = self.state;

        if self.staged != 0 {
            let mut last = [0u8; BLOCK_SIZE];
            last[..self.staged].copy_from_slice(&self.buf[..self.staged]);
            self.transform.block(&mut state, &last);
        }

        self.transform.finalize(&mut state, self.len);
        Checksum::from_bytes(state.output())
    }

    /// Write the checksum into the first 16 bytes of `output`.
    ///
    /// # Errors
    ///
    /// If `output` is shorter than [`OUTPUT_SIZE`].
    ///
    /// [`OUTPUT_SIZE`]: Self::OUTPUT_SIZE
    #[inline]
    pub fn finalize_into(&self, output: &mut [u8]) -> Result<(), InvalidSize> {
        if output.len() < SIZE { return Err(InvalidSize) }
        output[..SIZE].copy_from_slice(self.finalize().as_bytes());
        Ok(())
    }

    /// Write the checksum into `output`, with the size check moved to the type system.
    #[inline]
    pub fn finalize_into_exact(&self, output: &mut [u8; SIZE]) {
        *output = self.finalize().to_bytes();
    }

    /// Compute the checksum and [`reset`] the hasher.
    ///
    /// [`reset`]: Self::reset
    #[inline]
    pub fn finalize_reset(&mut self) -> Checksum {
        let sum = self.finalize();
        self.reset();
        sum
    }

    /// Return the hasher to its initial state, as if it were just created.
    ///
    /// The backend is kept.
    #[inline]
    pub fn reset(&mut self) {
        self.state = State::INIT;
        self.buf.zeroize();
        self.len = 0;
        self.staged = 0;
    }

    /// The total number of bytes written since creation or the last reset (modulo `2^64`).
    #[inline]
    pub const fn len(&self) -> u64 {
        self.len
    }

    /// Returns `true` if nothing was written since creation or the last reset.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The backend this hasher runs on.
    #[inline]
    pub fn backend(&self) -> Backend {
        self.transform.backend()
    }
}

impl Default for NabHash {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for NabHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NabHash")
            .field("backend", &self.backend())
            .field("len", &self.len)
            .finish_non_exhaustive()
    }
}
