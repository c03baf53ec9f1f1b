//! The first byte picks a write size, the checksum must not depend on it.
#![no_main]

use libfuzzer_sys::fuzz_target;
use nabhash::NabHash;

fuzz_target!(|data: &[u8]| {
    let Some((&step, data)) = data.split_first() else { return };
    let step = usize::from(step) + 1;

    let mut hasher = NabHash::new();
    for chunk in data.chunks(step) {
        assert_eq!(hasher.update(chunk), chunk.len());
    }

    let sum = hasher.finalize();
    assert_eq!(hasher.finalize(), sum, "finalize altered the hasher");
    assert_eq!(sum, NabHash::digest(data));
    assert_eq!(hasher.len(), data.len() as u64);
});
