//! NABHash: a 128-bit, non-cryptographic, AES-round based checksum.
//!
//! The input is consumed in 64 byte blocks. Each block is folded into a 64 byte running state
//! with one AES encryption round per 16 byte lane, and the final state is mixed with the input
//! length before the first lane is emitted as the checksum.
//!
//! # Example
//!
//! ```
//! use nabhash::NabHash;
//!
//! let mut hasher = NabHash::new();
//! hasher.update(b"Meng Zhuo is the author of ");
//! hasher.update(b"NABHash");
//!
//! assert_eq!(
//!     hasher.finalize().to_string(),
//!     "be7b4ad42ddd356e7abd8755902961dd"
//! );
//! ```
//!
//! # Security
//!
//! This is **not** a cryptographic hash. It is designed for content identification and
//! integrity checks against accidental corruption, not against an adversary.
#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![warn(
    clippy::pedantic,
    clippy::nursery,
    clippy::all
)]
// stupid lint IMO
#![allow(clippy::module_name_repetitions)]
// this devalues things which actually require the must-use attribute
#![allow(clippy::must_use_candidate)]
// I don't need a linter lecturing me on performance
#![allow(clippy::inline_always)]
// lengths are bounded by the block size wherever this happens
#![allow(clippy::cast_possible_truncation)]

#[cfg(any(test, feature = "alloc"))]
extern crate alloc;

#[macro_use]
mod macros;

mod aes;
mod checksum;
mod error;
mod hasher;
mod io;
mod state;

#[cfg(feature = "digest")]
mod rust_crypto;

#[cfg(test)]
mod test_utils;

pub mod backend;
pub mod hex;

pub use backend::{Backend, Transform};
pub use checksum::Checksum;
pub use error::{InvalidSize, Unspecified};
pub use hasher::NabHash;
pub use state::State;

/// The size of the checksum in bytes.
pub const SIZE: usize = 16;

/// The size of a block consumed by the [`Transform`] in bytes.
pub const BLOCK_SIZE: usize = 64;

/// Compute the checksum of `data` in one shot, using the active [`Backend`].
///
/// # Example
///
/// ```
/// let sum = nabhash::hash(&[0xde, 0xad, 0xbe, 0xef]);
/// assert_eq!(sum.to_string(), "9041d0d440fe93f69515b771619aa54c");
/// ```
#[inline]
pub fn hash(data: &[u8]) -> Checksum {
    NabHash::digest(data)
}
