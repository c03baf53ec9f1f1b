//! `AES-NI` backend.
//!
//! Each lane lives in one XMM register for the whole call. `AESENC` performs exactly the round
//! of [`crate::aes::round`] (with the block as round key), so no byte reordering is required.
use super::{Backend, Transform};
use crate::state::State;
use crate::BLOCK_SIZE;

#[cfg(target_arch = "x86")]
use core::arch::x86::{
    __m128i, _mm_aesenc_si128, _mm_load_si128, _mm_loadu_si128, _mm_set_epi64x,
    _mm_store_si128, _mm_xor_si128
};
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::{
    __m128i, _mm_aesenc_si128, _mm_load_si128, _mm_loadu_si128, _mm_set_epi64x,
    _mm_store_si128, _mm_xor_si128
};

/// The `AES-NI` [`Transform`].
///
/// Only reachable through [`AesNi::new_unchecked`], so holding a reference implies the host
/// supports the `aes` and `sse2` target features.
#[derive(Debug)]
pub(crate) struct AesNi {
    _private: ()
}

static AES_NI: AesNi = AesNi { _private: () };

impl AesNi {
    /// # Safety
    ///
    /// The host must support the `aes` and `sse2` target features.
    #[inline]
    pub(crate) unsafe fn new_unchecked() -> &'static Self {
        &AES_NI
    }
}

#[target_feature(enable = "aes,sse2")]
unsafe fn block(state: &mut State, blocks: &[u8]) {
    // `State` is 16 byte aligned and lanes are 16 bytes wide, so every lane is aligned.
    let lanes = state.lanes_mut().as_mut_ptr().cast::<__m128i>();

    let mut s0 = _mm_load_si128(lanes);
    let mut s1 = _mm_load_si128(lanes.add(1));
    let mut s2 = _mm_load_si128(lanes.add(2));
    let mut s3 = _mm_load_si128(lanes.add(3));

    for chunk in blocks.chunks_exact(BLOCK_SIZE) {
        let keys = chunk.as_ptr().cast::<__m128i>();
        s0 = _mm_aesenc_si128(s0, _mm_loadu_si128(keys));
        s1 = _mm_aesenc_si128(s1, _mm_loadu_si128(keys.add(1)));
        s2 = _mm_aesenc_si128(s2, _mm_loadu_si128(keys.add(2)));
        s3 = _mm_aesenc_si128(s3, _mm_loadu_si128(keys.add(3)));
    }

    _mm_store_si128(lanes, s0);
    _mm_store_si128(lanes.add(1), s1);
    _mm_store_si128(lanes.add(2), s2);
    _mm_store_si128(lanes.add(3), s3);
}

#[target_feature(enable = "aes,sse2")]
#[allow(clippy::cast_possible_wrap)]
unsafe fn finalize(state: &mut State, len: u64) {
    let lanes = state.lanes_mut().as_mut_ptr().cast::<__m128i>();
    let len = _mm_set_epi64x(0, len as i64);

    let mut s0 = _mm_xor_si128(_mm_load_si128(lanes), len);
    let mut s1 = _mm_xor_si128(_mm_load_si128(lanes.add(1)), len);
    let s2 = _mm_xor_si128(_mm_load_si128(lanes.add(2)), len);
    let s3 = _mm_xor_si128(_mm_load_si128(lanes.add(3)), len);

    s0 = _mm_aesenc_si128(s0, s1);
    s1 = _mm_aesenc_si128(s2, s3);
    s0 = _mm_aesenc_si128(s0, s1);

    for _ in 0..3 {
        s0 = _mm_aesenc_si128(s0, s0);
    }

    _mm_store_si128(lanes, s0);
    _mm_store_si128(lanes.add(1), s1);
    _mm_store_si128(lanes.add(2), s2);
    _mm_store_si128(lanes.add(3), s3);
}

impl Transform for AesNi {
    #[inline]
    fn backend(&self) -> Backend {
        Backend::AesNi
    }

    #[inline]
    fn block(&self, state: &mut State, blocks: &[u8]) {
        // SAFETY: An `AesNi` only exists once the host's support for `aes` and `sse2` has been
        // confirmed. Block loads are unaligned and stay within `chunks_exact`.
        unsafe { block(state, blocks) }
    }

    #[inline]
    fn finalize(&self, state: &mut State, len: u64) {
        // SAFETY: See `block`.
        unsafe { finalize(state, len) }
    }
}
