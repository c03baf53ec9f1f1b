//! Host capability detection.
//!
//! With `std` the features are detected at runtime (the standard library caches the result).
//! Without it, only the features the crate was compiled for are trusted.

#[cfg(all(feature = "std", any(target_arch = "x86", target_arch = "x86_64")))]
#[inline]
pub(super) fn aes_ni() -> bool {
    std::is_x86_feature_detected!("aes") && std::is_x86_feature_detected!("sse2")
}

#[cfg(all(not(feature = "std"), any(target_arch = "x86", target_arch = "x86_64")))]
#[inline]
pub(super) const fn aes_ni() -> bool {
    cfg!(all(target_feature = "aes", target_feature = "sse2"))
}

#[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
#[inline]
pub(super) const fn aes_ni() -> bool {
    false
}

#[cfg(all(feature = "std", target_arch = "aarch64", target_endian = "little"))]
#[inline]
pub(super) fn neon_aes() -> bool {
    std::arch::is_aarch64_feature_detected!("aes")
}

#[cfg(all(not(feature = "std"), target_arch = "aarch64", target_endian = "little"))]
#[inline]
pub(super) const fn neon_aes() -> bool {
    cfg!(target_feature = "aes")
}

#[cfg(not(all(target_arch = "aarch64", target_endian = "little")))]
#[inline]
pub(super) const fn neon_aes() -> bool {
    false
}
