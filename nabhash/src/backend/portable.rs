use super::{Backend, Transform};
use crate::aes::round;
use crate::state::{State, LANE};
use crate::BLOCK_SIZE;

/// The reference [`Transform`], runs on every target.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Portable;

#[inline]
fn lane(chunk: &[u8]) -> [u8; LANE] {
    let mut out = [0u8; LANE];
    out.copy_from_slice(chunk);
    out
}

impl Transform for Portable {
    #[inline]
    fn backend(&self) -> Backend {
        Backend::Portable
    }

    fn block(&self, state: &mut State, blocks: &[u8]) {
        let lanes = state.lanes_mut();

        for block in blocks.chunks_exact(BLOCK_SIZE) {
            for (lane_state, key) in lanes.iter_mut().zip(block.chunks_exact(LANE)) {
                *lane_state = round(&lane(key), lane_state);
            }
        }
    }

    fn finalize(&self, state: &mut State, len: u64) {
        state.mix_len(len);
        let [l0, l1, l2, l3] = state.lanes_mut();

        *l0 = round(l1, l0);
        *l1 = round(l3, l2);
        *l0 = round(l1, l0);

        for _ in 0..3 {
            *l0 = round(l0, l0);
        }
    }
}
