#![no_main]

use base64_external::{engine::general_purpose::STANDARD, Engine};
use libfuzzer_sys::fuzz_target;
use nativebuf::{decode, encode, encoded_len, AllocatorKind};

fuzz_target!(|data: &[u8]| {
    let encoded = encode(data);
    assert_eq!(encoded.len(), encoded_len(data.len()));

    let decoded = decode(&encoded, &AllocatorKind::Temp).expect("own output must decode");
    assert_eq!(data, decoded.as_slice(), "Roundtrip failed");

    // Conformance with external crate
    assert_eq!(encoded, STANDARD.encode(data), "External crate encode mismatch");
});
