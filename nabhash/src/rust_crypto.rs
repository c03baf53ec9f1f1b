//! `RustCrypto` `digest` trait implementations, giving [`NabHash`] the blanket [`Digest`] impl.
//!
//! [`Digest`]: digest::Digest
use crate::NabHash;
use digest::consts::U16;
use digest::{FixedOutput, FixedOutputReset, HashMarker, Output, OutputSizeUser, Reset, Update};

impl HashMarker for NabHash {}

impl OutputSizeUser for NabHash {
    type OutputSize = U16;
}

impl Update for NabHash {
    #[inline]
    fn update(&mut self, data: &[u8]) {
        NabHash::update(self, data);
    }
}

impl FixedOutput for NabHash {
    #[inline]
    fn finalize_into(self, out: &mut Output<Self>) {
        out.copy_from_slice(NabHash::finalize(&self).as_bytes());
    }
}

impl Reset for NabHash {
    #[inline]
    fn reset(&mut self) {
        NabHash::reset(self);
    }
}

impl FixedOutputReset for NabHash {
    #[inline]
    fn finalize_into_reset(&mut self, out: &mut Output<Self>) {
        out.copy_from_slice(NabHash::finalize_reset(self).as_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use digest::Digest;
    use hex_literal::hex;

    #[test]
    fn digest_api() {
        let mut hasher = <NabHash as Digest>::new();
        Digest::update(&mut hasher, b"hello ");
        Digest::update(&mut hasher, b"world");

        let out = Digest::finalize_reset(&mut hasher);
        assert_eq!(out.as_slice(), hex!("8b53248a772b30fd143e55c110b66275"));

        let empty = Digest::finalize(hasher);
        assert_eq!(empty.as_slice(), hex!("e99722eb55b3df5f307c5e8e549dd44a"));
    }

    #[test]
    fn one_shot() {
        let out = <NabHash as Digest>::digest(hex!("deadbeef"));
        assert_eq!(out.as_slice(), hex!("9041d0d440fe93f69515b771619aa54c"));
        assert_eq!(<NabHash as Digest>::output_size(), 16);
    }
}
