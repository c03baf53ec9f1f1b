//! Cross-backend equivalence through the public API.
//!
//! The portable backend is the oracle, every other backend the host can run must agree with it
//! on every input and every way of splitting that input.
mod common;

use common::backends;
use nabhash::backend::{self, verify};
use nabhash::{Backend, NabHash, State, Transform, BLOCK_SIZE};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

fn hash_with(backend: Backend, data: &[u8]) -> nabhash::Checksum {
    let mut hasher = NabHash::with_backend(backend).unwrap();
    hasher.update(data);
    hasher.finalize()
}

#[test]
fn portable_is_last_resort() {
    let available = backends();
    assert_eq!(available.last(), Some(&Backend::Portable));
    assert!(available.contains(&backend::active()));
}

#[test]
fn self_test_passes() {
    for backend in backends() {
        assert_eq!(verify(backend), Ok(()), "{backend} failed its self-test");
    }
}

#[test]
fn edge_lengths() {
    let mut data = vec![0u8; 4 * BLOCK_SIZE + 1];
    StdRng::seed_from_u64(0x4e41_4248).fill_bytes(&mut data);

    for len in 0..=data.len() {
        let expected = hash_with(Backend::Portable, &data[..len]);

        for backend in backends() {
            assert_eq!(
                hash_with(backend, &data[..len]), expected,
                "{backend} disagrees at len {len}"
            );
        }
    }
}

#[test]
fn random_splits() {
    let mut rng = StdRng::seed_from_u64(0x4e41_4248);

    for _ in 0..256 {
        let len = rng.gen_range(0..2048);
        let mut data = vec![0u8; len];
        rng.fill_bytes(&mut data);

        let expected = hash_with(Backend::Portable, &data);

        for backend in backends() {
            let mut hasher = NabHash::with_backend(backend).unwrap();
            let mut rest = data.as_slice();

            while !rest.is_empty() {
                let take = rng.gen_range(0..=rest.len().min(200));
                hasher.update(&rest[..take]);
                rest = &rest[take..];
            }

            assert_eq!(hasher.finalize(), expected, "{backend} disagrees at len {len}");
        }
    }
}

#[test]
fn raw_transform_state_matches() {
    let mut data = [0u8; 8 * BLOCK_SIZE];
    StdRng::seed_from_u64(7).fill_bytes(&mut data);

    let portable = Backend::Portable.transform().unwrap();

    for backend in backends() {
        let transform = backend.transform().unwrap();
        assert_eq!(transform.backend(), backend);

        for blocks in 0..=8 {
            let mut expected = State::INIT;
            portable.block(&mut expected, &data[..blocks * BLOCK_SIZE]);
            portable.finalize(&mut expected, u64::MAX - blocks as u64);

            let mut state = State::INIT;
            transform.block(&mut state, &data[..blocks * BLOCK_SIZE]);
            transform.finalize(&mut state, u64::MAX - blocks as u64);

            assert_eq!(state, expected, "{backend} disagrees after {blocks} blocks");
        }
    }
}

#[test]
fn override_restores_selection() {
    let before = backend::active();

    for candidate in backends() {
        let guard = backend::override_scope(candidate).unwrap();
        assert_eq!(backend::active(), candidate);
        assert_eq!(NabHash::new().backend(), candidate);
        drop(guard);
    }

    assert_eq!(backend::active(), before);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1_000))]

    #[test]
    fn arbitrary_input(input in proptest::collection::vec(any::<u8>(), 0..=4096)) {
        let expected = hash_with(Backend::Portable, &input);

        for backend in backends() {
            prop_assert_eq!(hash_with(backend, &input), expected, "{}", backend);
        }
    }
}
