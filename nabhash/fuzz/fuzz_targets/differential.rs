//! Every backend the host can run against the portable one.
#![no_main]

use libfuzzer_sys::fuzz_target;
use nabhash::{Backend, NabHash};

fuzz_target!(|data: &[u8]| {
    let mut reference = NabHash::with_backend(Backend::Portable).unwrap();
    reference.update(data);
    let expected = reference.finalize();

    for backend in Backend::available() {
        let mut hasher = NabHash::with_backend(backend).unwrap();
        hasher.update(data);

        assert_eq!(
            hasher.finalize(), expected,
            "{backend} disagrees with portable, len={}", data.len()
        );
    }

    assert_eq!(nabhash::hash(data), expected, "active backend disagrees with portable");
});
