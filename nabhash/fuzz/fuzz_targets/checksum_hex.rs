//! Checksums parsed from arbitrary text print back as the lowercased text, and every checksum
//! the hasher produces survives its own hex form.
#![no_main]

use libfuzzer_sys::fuzz_target;
use nabhash::{Checksum, NabHash};

fuzz_target!(|data: &[u8]| {
    let mut buf = [0u8; Checksum::HEX_LEN];

    if let Ok(parsed) = Checksum::from_hex(data) {
        assert_eq!(data.len(), Checksum::HEX_LEN);
        assert_eq!(parsed.encode_hex(&mut buf).as_bytes(), data.to_ascii_lowercase());
        assert_eq!(parsed.to_string().parse::<Checksum>(), Ok(parsed));
    }

    let sum = NabHash::digest(data);
    let text = sum.encode_hex(&mut buf);

    assert_eq!(text, format!("{sum:x}"));
    assert_eq!(Checksum::from_hex(text.as_bytes()), Ok(sum));
    assert_eq!(Checksum::from_hex(text.to_ascii_uppercase().as_bytes()), Ok(sum));
});
