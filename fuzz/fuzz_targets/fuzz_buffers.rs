#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use nativebuf::{copy_into, slice_from, AllocatorKind};

#[derive(Arbitrary, Debug)]
struct Input {
    store: Vec<u8>,
    dest_len: u16,
    start: usize,
    length: Option<usize>,
}

fuzz_target!(|input: Input| {
    if let Ok(slice) = slice_from(&input.store, input.start, input.length, &AllocatorKind::Temp) {
        let end = input.start + slice.len();
        assert_eq!(slice.as_slice(), &input.store[input.start..end]);
    }

    let length = input.length.unwrap_or(0);
    let mut dest = vec![0xA5u8; input.dest_len as usize];
    match copy_into(&mut dest, &input.store, input.start, length) {
        Ok(()) => {
            assert_eq!(&dest[..length], &input.store[input.start..input.start + length]);
            assert!(dest[length..].iter().all(|&b| b == 0xA5));
        }
        Err(_) => assert!(dest.iter().all(|&b| b == 0xA5)),
    }
});
