//! Block Transform Backends
//!
//! A [`Transform`] folds whole 64 byte blocks into the [`State`] and performs the final length
//! dependent mixing. Several implementations exist, a portable one which runs anywhere and
//! accelerated ones built on the host's AES round instructions. All of them must compute exactly
//! the same state for every input.
//!
//! The backend used by [`NabHash::new`] is selected once per process, on first use, and never
//! changes afterwards. Every accelerated candidate is checked against the portable backend
//! (see [`verify`]) before it may be selected, a candidate which disagrees is never used.
//!
//! [`NabHash::new`]: crate::NabHash::new
use crate::error::Unspecified;
use crate::state::State;
use crate::BLOCK_SIZE;
use core::fmt;
use core::str::FromStr;
use core::sync::atomic::{AtomicU8, Ordering};

mod detect;
mod portable;

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
mod x86;

#[cfg(all(target_arch = "aarch64", target_endian = "little"))]
mod aarch64;

/// The block transform and finalization pair behind every [`NabHash`].
///
/// # Contract
///
/// * [`block`] consumes `blocks.len() / 64` whole blocks, left to right, each block's output
///   state feeding the next. Trailing bytes which do not form a whole block are never read.
/// * [`finalize`] mixes the total input length into the state. The checksum is the first 16
///   bytes of the resulting state.
/// * For every input, the resulting state is bit for bit identical to that of
///   [`Backend::Portable`].
///
/// [`NabHash`]: crate::NabHash
/// [`block`]: Transform::block
/// [`finalize`]: Transform::finalize
pub trait Transform: Sync {
    /// Which [`Backend`] this is.
    fn backend(&self) -> Backend;

    /// Fold every whole block of `blocks` into `state`.
    fn block(&self, state: &mut State, blocks: &[u8]);

    /// Mix the total length of the input (in bytes, before padding) into `state`.
    fn finalize(&self, state: &mut State, len: u64);
}

impl fmt::Debug for dyn Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Transform").field(&self.backend()).finish()
    }
}

/// The available implementations of the [`Transform`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Backend {
    /// The portable reference implementation, table based AES rounds.
    Portable = 1,
    /// `x86` / `x86_64` `AESENC`.
    AesNi = 2,
    /// ARMv8 Cryptography Extension `AESE` / `AESMC`.
    Neon = 3
}

impl Backend {
    /// Every backend, in order of preference.
    pub const ALL: [Self; 3] = [Self::AesNi, Self::Neon, Self::Portable];

    /// The name of the backend.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Portable => "portable",
            Self::AesNi => "aes-ni",
            Self::Neon => "neon"
        }
    }

    #[inline]
    const fn from_u8(raw: u8) -> Option<Self> {
        match raw {
            1 => Some(Self::Portable),
            2 => Some(Self::AesNi),
            3 => Some(Self::Neon),
            _ => None
        }
    }

    /// Returns `true` if this backend can run on the current host.
    pub fn is_supported(self) -> bool {
        match self {
            Self::Portable => true,
            Self::AesNi => detect::aes_ni(),
            Self::Neon => detect::neon_aes()
        }
    }

    /// Returns the [`Transform`] of this backend, or `None` if the host cannot run it.
    pub fn transform(self) -> Option<&'static dyn Transform> {
        if !self.is_supported() { return None }

        match self {
            Self::Portable => Some(&portable::Portable),
            #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
            // SAFETY: We just checked that the host supports the required target features.
            Self::AesNi => Some(unsafe { x86::AesNi::new_unchecked() }),
            #[cfg(all(target_arch = "aarch64", target_endian = "little"))]
            // SAFETY: We just checked that the host supports the required target features.
            Self::Neon => Some(unsafe { aarch64::Neon::new_unchecked() }),
            #[allow(unreachable_patterns)]
            _ => None
        }
    }

    /// Iterate over the backends the current host can run, in order of preference.
    pub fn available() -> impl Iterator<Item = Self> {
        Self::ALL.into_iter().filter(|backend| backend.is_supported())
    }
}

impl fmt::Display for Backend {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Backend {
    type Err = Unspecified;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter()
            .find(|backend| backend.name().eq_ignore_ascii_case(s))
            .ok_or(Unspecified)
    }
}

/// A backend disagreed with the portable reference implementation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Mismatch {
    backend: Backend,
    len: usize
}

impl Mismatch {
    /// The backend which failed.
    pub const fn backend(&self) -> Backend {
        self.backend
    }

    /// The length of the input the backend got wrong.
    pub const fn input_len(&self) -> usize {
        self.len
    }
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f, "the {} backend disagrees with the portable backend for a {} byte input",
            self.backend, self.len
        )
    }
}

std! { impl std::error::Error for Mismatch {} }

/// Why [`verify`] rejected a backend.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum VerifyError {
    /// The host cannot run the backend, so it was never exercised.
    Unsupported(Backend),
    /// The backend ran but produced a different state than the portable backend.
    Mismatch(Mismatch)
}

impl VerifyError {
    /// The backend which was rejected.
    pub const fn backend(&self) -> Backend {
        match self {
            Self::Unsupported(backend) => *backend,
            Self::Mismatch(mismatch) => mismatch.backend
        }
    }
}

impl From<Mismatch> for VerifyError {
    #[inline]
    fn from(value: Mismatch) -> Self {
        Self::Mismatch(value)
    }
}

impl fmt::Display for VerifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsupported(backend) => write!(f, "the {backend} backend is not supported on this host"),
            Self::Mismatch(mismatch) => fmt::Display::fmt(mismatch, f)
        }
    }
}

std! {
    impl std::error::Error for VerifyError {
        fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
            match self {
                Self::Unsupported(_) => None,
                Self::Mismatch(mismatch) => Some(mismatch)
            }
        }
    }
}

const SELF_TEST_LENS: [usize; 15] = [
    0, 1, 15, 16, 17, 63, 64, 65, 127, 128, 129, 255, 256, 257, 1000
];

const PATTERN_LEN: usize = 1024 + 1;

const fn pattern() -> [u8; PATTERN_LEN] {
    // xorshift32, any byte soup without long zero runs will do.
    let mut out = [0u8; PATTERN_LEN];
    let mut x = 0x9e37_79b9u32;
    let mut i = 0;

    while i < PATTERN_LEN {
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        out[i] = x as u8;
        i += 1;
    }

    out
}

static PATTERN: [u8; PATTERN_LEN] = pattern();

/// Run `input` through `transform` the same way [`NabHash`] does, returning the whole final
/// state.
///
/// [`NabHash`]: crate::NabHash
fn run(transform: &dyn Transform, input: &[u8]) -> State {
    let mut state = State::INIT;
    let whole = input.len() - input.len() % BLOCK_SIZE;
    transform.block(&mut state, &input[..whole]);

    let tail = &input[whole..];
    if !tail.is_empty() {
        let mut last = [0u8; BLOCK_SIZE];
        last[..tail.len()].copy_from_slice(tail);
        transform.block(&mut state, &last);
    }

    transform.finalize(&mut state, input.len() as u64);
    state
}

/// Differentially test `backend` against [`Backend::Portable`].
///
/// Both backends hash a fixed pattern at a set of edge lengths (empty, around the lane and block
/// boundaries, multiple blocks), at an aligned and an unaligned offset. The whole 64 byte state
/// is compared, not only the checksum.
///
/// # Errors
///
/// - [`VerifyError::Unsupported`] if the host cannot run `backend`.
/// - [`VerifyError::Mismatch`] with the first input length for which the states differ.
pub fn verify(backend: Backend) -> Result<(), VerifyError> {
    let candidate = backend.transform().ok_or(VerifyError::Unsupported(backend))?;
    let reference = &portable::Portable;

    for offset in [0, 1] {
        for len in SELF_TEST_LENS {
            let input = &PATTERN[offset..offset + len];
            if run(candidate, input) != run(reference, input) {
                return Err(Mismatch { backend, len }.into());
            }
        }
    }

    Ok(())
}

const UNSELECTED: u8 = 0;

static ACTIVE: AtomicU8 = AtomicU8::new(UNSELECTED);

#[cold]
fn select() -> Backend {
    for candidate in Backend::available() {
        if candidate == Backend::Portable { break }

        match verify(candidate) {
            Ok(()) => return candidate,
            Err(VerifyError::Mismatch(_mismatch)) => {
                event!(
                    error,
                    backend = _mismatch.backend().name(),
                    len = _mismatch.input_len(),
                    "backend failed its self-test, it will not be used"
                );
            },
            Err(VerifyError::Unsupported(_backend)) => {
                event!(debug, backend = _backend.name(), "backend is not supported, skipping");
            }
        }
    }

    Backend::Portable
}

#[cold]
fn init() -> Backend {
    let chosen = select();

    // Racing initializers all pick the same backend, the first one to publish wins.
    match ACTIVE.compare_exchange(UNSELECTED, chosen as u8, Ordering::AcqRel, Ordering::Acquire) {
        Ok(_) => {
            event!(debug, backend = chosen.name(), "selected nabhash backend");
            chosen
        },
        Err(current) => Backend::from_u8(current).unwrap_or(chosen)
    }
}

/// Returns the process-wide active backend, selecting it if this is the first call.
///
/// Selection picks the most preferred backend the host supports and which passes [`verify`],
/// falling back to [`Backend::Portable`]. It never fails, and the result never changes for the
/// rest of the process.
#[inline]
pub fn active() -> Backend {
    match Backend::from_u8(ACTIVE.load(Ordering::Acquire)) {
        Some(backend) => backend,
        None => init()
    }
}

#[inline]
pub(crate) fn active_transform() -> &'static dyn Transform {
    active().transform().unwrap_or(&portable::Portable)
}

#[cfg(any(test, feature = "testing"))]
pub use self::testing::{override_scope, OverrideGuard};

#[cfg(any(test, feature = "testing"))]
mod testing {
    use super::{active, Backend, Ordering, ACTIVE};
    use crate::error::Unspecified;

    /// Restores the previously active backend when dropped.
    #[must_use = "The override is undone as soon as the guard is dropped"]
    #[derive(Debug)]
    pub struct OverrideGuard {
        previous: Backend
    }

    impl Drop for OverrideGuard {
        fn drop(&mut self) {
            ACTIVE.store(self.previous as u8, Ordering::Release);
            event!(trace, backend = self.previous.name(), "restored nabhash backend");
        }
    }

    /// Replace the active backend until the returned guard is dropped.
    ///
    /// This exists for test harnesses only. Overrides must not overlap across threads, the last
    /// guard to drop wins.
    ///
    /// # Errors
    ///
    /// If the host cannot run `backend`.
    pub fn override_scope(backend: Backend) -> Result<OverrideGuard, Unspecified> {
        if !backend.is_supported() { return Err(Unspecified) }

        let previous = active();
        ACTIVE.store(backend as u8, Ordering::Release);
        event!(trace, backend = backend.name(), "overrode nabhash backend");

        Ok(OverrideGuard { previous })
    }
}
