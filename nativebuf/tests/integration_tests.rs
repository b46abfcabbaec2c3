//! Integration tests for nativebuf.

use std::sync::{Arc, Barrier};
use std::thread;

use base64_external::{engine::general_purpose::STANDARD, Engine};
use nativebuf::{
    copy_into, decode, decode_to_vec, encode, encoded_len, slice_from, AllocatorKind, Arena,
    Config, Error, FormatError, RangeError,
};
use rand::{Rng, SeedableRng};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn random_bytes(rng: &mut impl Rng, len: usize) -> Vec<u8> {
    (0..len).map(|_| rng.gen()).collect()
}

#[test]
fn test_roundtrip_random() {
    init_tracing();
    let mut rng = rand::rngs::StdRng::seed_from_u64(0x6e61_7469_7665);

    for _ in 0..500 {
        let len = rng.gen_range(0..1024);
        let data = random_bytes(&mut rng, len);

        let encoded = encode(&data);
        assert_eq!(encoded.len(), 4 * len.div_ceil(3));
        assert_eq!(encoded.len(), encoded_len(len));

        let decoded = decode(&encoded, &AllocatorKind::Temp).unwrap();
        assert_eq!(decoded, data, "Roundtrip failed at len {}", len);
    }
}

#[test]
fn test_conformance_with_external_crate() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(42);

    for _ in 0..500 {
        let len = rng.gen_range(0..512);
        let data = random_bytes(&mut rng, len);

        let ours = encode(&data);
        let theirs = STANDARD.encode(&data);
        assert_eq!(ours, theirs, "Encode mismatch at len {}", len);

        assert_eq!(decode_to_vec(&theirs).unwrap(), STANDARD.decode(&ours).unwrap());
    }
}

#[test]
fn test_wrapped_input_decodes() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(7);
    let data = random_bytes(&mut rng, 1000);
    let encoded = encode(&data);

    let wrapped: String = encoded
        .as_bytes()
        .chunks(76)
        .map(|line| std::str::from_utf8(line).unwrap())
        .collect::<Vec<_>>()
        .join("\r\n");

    assert_eq!(decode_to_vec(&wrapped).unwrap(), data);
}

#[test]
fn test_classic_vectors() {
    assert_eq!(encode(&[0x66]), "Zg==");
    assert_eq!(encode(&[0x66, 0x6F]), "Zm8=");
    assert_eq!(encode(&[0x66, 0x6F, 0x6F]), "Zm9v");
    assert_eq!(encode(&[]), "");
    assert!(decode_to_vec("").unwrap().is_empty());
}

#[test]
fn test_whitespace_is_transparent() {
    assert_eq!(decode_to_vec("Zm9v").unwrap(), decode_to_vec("Zm 9v\n").unwrap());
}

#[test]
fn test_malformed_inputs_are_format_errors() {
    init_tracing();
    for input in ["Zm9!", "=m9v", "Z=9v", "Zm9", "Zm=v", "Zg==="] {
        let err = decode(input, &AllocatorKind::Temp).unwrap_err();
        assert!(
            matches!(Error::from(err), Error::Format(_)),
            "input {input:?}"
        );
    }
    assert_eq!(decode_to_vec("Zg==").unwrap(), b"f");
}

#[test]
fn test_slice_bounds() {
    let store: Vec<u8> = (0..10).collect();

    let slice = slice_from(&store, 5, Some(3), &AllocatorKind::Temp).unwrap();
    assert_eq!(slice.as_slice(), &store[5..8]);

    let err = slice_from(&store, 8, Some(5), &AllocatorKind::Temp).unwrap_err();
    assert!(matches!(err, RangeError::RangeExceedsStore { .. }));
    assert!(matches!(Error::from(err), Error::Range(_)));
}

#[test]
fn test_copy_atomicity() {
    let source: Vec<u8> = (0..32).collect();
    let mut dest = vec![0x5Au8; 16];
    let before = dest.clone();
    let too_long = dest.len() + 1;

    let err = copy_into(&mut dest, &source, 0, too_long).unwrap_err();
    assert!(matches!(err, RangeError::DestinationTooSmall { .. }));
    assert_eq!(dest, before);
}

#[test]
fn test_concurrent_first_use() {
    const THREADS: usize = 8;
    let barrier = Arc::new(Barrier::new(THREADS));
    let input = "SGVsbG8sIFdvcmxkIQ==";

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                decode_to_vec(input)
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap().unwrap(), b"Hello, World!");
    }
}

#[test]
fn test_shared_arena_across_threads() {
    let arena = Arc::new(Arena::new(AllocatorKind::TempJob));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let arena = Arc::clone(&arena);
            thread::spawn(move || {
                let data = vec![i as u8; 30];
                let decoded = decode(&encode(&data), &*arena).unwrap();
                assert_eq!(decoded, data);
                decoded.len()
            })
        })
        .collect();

    let total: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
    assert_eq!(total, 120);
    assert_eq!(arena.total_allocated(), 120);
    assert_eq!(arena.live_buffers(), 0);
}

#[test]
fn test_config_from_json() {
    let config: Config =
        serde_json::from_str(r#"{"allocator": "persistent", "max_buffer_len": 64}"#).unwrap();
    assert_eq!(config.allocator, AllocatorKind::Persistent);
    assert_eq!(config.max_buffer_len, 64);
    assert!(config.leak_warnings);

    let config: Config = serde_json::from_str("{}").unwrap();
    assert_eq!(config, Config::default());

    assert!(serde_json::from_str::<Config>(r#"{"allocator": "pool"}"#).is_err());
}

#[test]
fn test_arena_leak_is_reported_not_fatal() {
    init_tracing();
    let config = Config::new().allocator(AllocatorKind::Persistent);
    let arena = config.arena();
    let buffer = slice_from(b"leaked", 0, None, &arena).unwrap();
    assert_eq!(arena.live_buffers(), 1);

    drop(arena);
    assert_eq!(buffer.as_slice(), b"leaked");
    assert_eq!(buffer.kind(), AllocatorKind::Persistent);
}

#[test]
fn test_format_error_reason_is_diagnostic() {
    let err = decode_to_vec("Zm9v!").unwrap_err();
    assert_eq!(err, FormatError::InvalidCharacter { ch: '!', offset: 4 });
    assert!(err.to_string().contains("'!'"));
}
