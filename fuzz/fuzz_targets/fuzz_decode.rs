#![no_main]

use base64_external::{engine::general_purpose::STANDARD, Engine};
use libfuzzer_sys::fuzz_target;
use nativebuf::{decode_to_vec, decoded_len};

fuzz_target!(|input: &str| {
    let result = decode_to_vec(input);
    assert_eq!(result.as_ref().map(Vec::len).ok(), decoded_len(input).ok());

    // The external crate rejects whitespace; anything else it accepts must match
    if !input.chars().any(char::is_whitespace) {
        if let Ok(expected) = STANDARD.decode(input) {
            assert_eq!(result.ok(), Some(expected), "External crate decode mismatch");
        }
    }
});
