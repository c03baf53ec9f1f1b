//! The running state of the checksum.
use crate::{BLOCK_SIZE, SIZE};
use core::fmt;

/// The size of a single lane in bytes, the width of one AES block.
pub(crate) const LANE: usize = 16;

/// The number of lanes in the state (and in every block).
pub(crate) const LANES: usize = BLOCK_SIZE / LANE;

const IV: [u8; LANE] = [
    0x5A, 0x82, 0x79, 0x99, 0x6E, 0xD9, 0xEB, 0xA1,
    0x8F, 0x1B, 0xBC, 0xDC, 0xCA, 0x62, 0xC1, 0xD6,
];

/// The 64 byte running state, viewed as four 16 byte lanes.
///
/// Each lane is fed through its own AES round for every block, so the state is aligned to 16
/// bytes to allow the accelerated backends to load lanes directly into vector registers.
#[derive(Copy, Clone, PartialEq, Eq)]
#[repr(C, align(16))]
pub struct State {
    lanes: [[u8; LANE]; LANES]
}

impl State {
    /// The initial state: the same public 16 byte constant in every lane.
    pub const INIT: Self = Self { lanes: [IV; LANES] };

    /// Create a state from its raw bytes.
    pub const fn from_bytes(bytes: [u8; BLOCK_SIZE]) -> Self {
        let mut lanes = [[0u8; LANE]; LANES];
        let mut i = 0;

        while i < BLOCK_SIZE {
            lanes[i / LANE][i % LANE] = bytes[i];
            i += 1;
        }

        Self { lanes }
    }

    /// Returns the raw bytes of the state.
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; BLOCK_SIZE] {
        // SAFETY: `State` is `repr(C)` over `[[u8; 16]; 4]`, which has exactly the same size and
        // layout as `[u8; 64]` (and a weaker alignment requirement).
        unsafe { &*core::ptr::addr_of!(self.lanes).cast::<[u8; BLOCK_SIZE]>() }
    }

    /// Returns the checksum held in the first lane.
    #[inline]
    pub const fn output(&self) -> [u8; SIZE] {
        self.lanes[0]
    }

    #[cfg(test)]
    #[inline]
    pub(crate) const fn lanes(&self) -> &[[u8; LANE]; LANES] {
        &self.lanes
    }

    #[inline]
    pub(crate) fn lanes_mut(&mut self) -> &mut [[u8; LANE]; LANES] {
        &mut self.lanes
    }

    /// XOR the 64 bit little endian `len` into the low half of every lane.
    #[inline]
    pub(crate) fn mix_len(&mut self, len: u64) {
        let len = len.to_le_bytes();
        for lane in &mut self.lanes {
            for (byte, l) in lane.iter_mut().zip(len) {
                *byte ^= l;
            }
        }
    }
}

impl Default for State {
    #[inline]
    fn default() -> Self {
        Self::INIT
    }
}

impl fmt::Debug for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = [0u8; BLOCK_SIZE * 2];
        // `buf` is exactly twice the state size.
        match crate::hex::encode_str(self.as_bytes(), &mut buf) {
            Ok(repr) => f.debug_tuple("State").field(&repr).finish(),
            Err(_) => f.write_str("State(..)")
        }
    }
}
