//! ARMv8 Cryptography Extension backend.
//!
//! `AESE` with a zero key followed by `AESMC` is the keyless part of an encryption round, the
//! round key is then applied with a plain XOR. This is exactly [`crate::aes::round`].
use super::{Backend, Transform};
use crate::state::State;
use crate::BLOCK_SIZE;
use core::arch::aarch64::{
    uint8x16_t, vaeseq_u8, vaesmcq_u8, vdupq_n_u8, veorq_u8, vld1q_u8, vst1q_u8
};

/// The ARMv8 AES [`Transform`].
///
/// Only reachable through [`Neon::new_unchecked`], so holding a reference implies the host
/// supports the `aes` target feature.
#[derive(Debug)]
pub(crate) struct Neon {
    _private: ()
}

static NEON: Neon = Neon { _private: () };

impl Neon {
    /// # Safety
    ///
    /// The host must support the `aes` target feature.
    #[inline]
    pub(crate) unsafe fn new_unchecked() -> &'static Self {
        &NEON
    }
}

#[target_feature(enable = "aes")]
#[inline]
unsafe fn aesenc(data: uint8x16_t, key: uint8x16_t) -> uint8x16_t {
    veorq_u8(vaesmcq_u8(vaeseq_u8(data, vdupq_n_u8(0))), key)
}

#[target_feature(enable = "aes")]
unsafe fn block(state: &mut State, blocks: &[u8]) {
    let lanes = state.lanes_mut().as_mut_ptr().cast::<u8>();

    let mut s0 = vld1q_u8(lanes);
    let mut s1 = vld1q_u8(lanes.add(16));
    let mut s2 = vld1q_u8(lanes.add(32));
    let mut s3 = vld1q_u8(lanes.add(48));

    for chunk in blocks.chunks_exact(BLOCK_SIZE) {
        let keys = chunk.as_ptr();
        s0 = aesenc(s0, vld1q_u8(keys));
        s1 = aesenc(s1, vld1q_u8(keys.add(16)));
        s2 = aesenc(s2, vld1q_u8(keys.add(32)));
        s3 = aesenc(s3, vld1q_u8(keys.add(48)));
    }

    vst1q_u8(lanes, s0);
    vst1q_u8(lanes.add(16), s1);
    vst1q_u8(lanes.add(32), s2);
    vst1q_u8(lanes.add(48), s3);
}

#[target_feature(enable = "aes")]
unsafe fn finalize(state: &mut State, len: u64) {
    let lanes = state.lanes_mut().as_mut_ptr().cast::<u8>();

    let mut len_block = [0u8; 16];
    len_block[..8].copy_from_slice(&len.to_le_bytes());
    let len = vld1q_u8(len_block.as_ptr());

    let mut s0 = veorq_u8(vld1q_u8(lanes), len);
    let mut s1 = veorq_u8(vld1q_u8(lanes.add(16)), len);
    let s2 = veorq_u8(vld1q_u8(lanes.add(32)), len);
    let s3 = veorq_u8(vld1q_u8(lanes.add(48)), len);

    s0 = aesenc(s0, s1);
    s1 = aesenc(s2, s3);
    s0 = aesenc(s0, s1);

    for _ in 0..3 {
        s0 = aesenc(s0, s0);
    }

    vst1q_u8(lanes, s0);
    vst1q_u8(lanes.add(16), s1);
    vst1q_u8(lanes.add(32), s2);
    vst1q_u8(lanes.add(48), s3);
}

impl Transform for Neon {
    #[inline]
    fn backend(&self) -> Backend {
        Backend::Neon
    }

    #[inline]
    fn block(&self, state: &mut State, blocks: &[u8]) {
        // SAFETY: A `Neon` only exists once the host's support for `aes` has been confirmed.
        // Every load and store stays within the 64 byte state or the current whole block.
        unsafe { block(state, blocks) }
    }

    #[inline]
    fn finalize(&self, state: &mut State, len: u64) {
        // SAFETY: See `block`.
        unsafe { finalize(state, len) }
    }
}
