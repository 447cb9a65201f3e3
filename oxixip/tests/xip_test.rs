//! Comprehensive XIP integration tests.

use oxixip::{
    AllocationPolicy, XipConfig, XipDecoder, XipEncoder, XipError, compress, compress_with,
    decompress, inspect,
};

/// Reproducible pseudo-random data over `alphabet` distinct values.
fn lcg_data(size: usize, alphabet: u16, seed: u64) -> Vec<u8> {
    let mut data = Vec::with_capacity(size);
    let mut state = seed;
    for _ in 0..size {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
        data.push(((state >> 32) % alphabet as u64) as u8);
    }
    data
}

#[test]
fn test_xip_worked_scenario() {
    let original = [0x41u8, 0x41, 0x41];
    let compressed = compress(&original);
    assert_eq!(compressed, [0x02, 0x01, 0x00, 0x41, 0x41, 0x01, 0x00, 0x41]);

    let info = inspect(&compressed).expect("inspect failed");
    assert_eq!(info.entry_count, 2);
    assert_eq!(info.payload_len, 1);
    assert_eq!(
        info.table.iter().collect::<Vec<_>>(),
        vec![(0x00, (0x41, 0x41)), (0x01, (0x00, 0x41))]
    );

    assert_eq!(decompress(&compressed).expect("decompression failed"), original);
}

#[test]
fn test_xip_known_artifacts() {
    // Ties resolve to the pair first seen latest; here all pairs occur once.
    assert_eq!(compress(b"AABB"), [0x01, b'A', b'A', 0x00, 0x00, b'B', b'B']);

    assert_eq!(compress(b"abab"), [0x02, 0x01, 0x00, b'a', b'b', 0x01, 0x00, 0x00]);

    // AB, BC and CD all occur twice: CD wins the tie.
    assert_eq!(
        compress(b"ABCDABCD"),
        [
            0x04, 0x03, // header, payload
            0x00, b'C', b'D', //
            0x01, b'B', 0x00, //
            0x02, b'A', 0x01, //
            0x03, 0x02, 0x02,
        ]
    );
}

#[test]
fn test_xip_degenerate_inputs() {
    for original in [&b""[..], &b"q"[..]] {
        let compressed = compress(original);
        assert_eq!(compressed[0], 0);
        assert_eq!(&compressed[1..], original);
        assert_eq!(decompress(&compressed).expect("decompression failed"), original);
    }
}

#[test]
fn test_xip_roundtrip_text() {
    let original = b"This is a test of compression! ".repeat(10);
    let compressed = compress(&original);

    println!("Original size: {} bytes", original.len());
    println!("Compressed size: {} bytes", compressed.len());

    assert!(compressed.len() < original.len());
    assert_eq!(decompress(&compressed).expect("decompression failed"), original);
}

#[test]
fn test_xip_roundtrip_pseudo_random() {
    for (i, alphabet) in [2u16, 4, 16, 64, 200, 255, 256].into_iter().enumerate() {
        for size in [2usize, 3, 17, 256, 1500] {
            let original = lcg_data(size, alphabet, i as u64 + size as u64);
            let compressed = compress(&original);
            let decompressed = decompress(&compressed).expect("decompression failed");
            assert_eq!(
                decompressed, original,
                "roundtrip failed for alphabet {alphabet}, size {size}"
            );
        }
    }
}

#[test]
fn test_xip_allocator_exclusion() {
    let original = lcg_data(2000, 40, 7);
    let compressed = compress(&original);
    let info = inspect(&compressed).expect("inspect failed");

    let mut present = [false; 256];
    for &byte in &original {
        present[byte as usize] = true;
    }

    let mut seen = [false; 256];
    for (code, _) in info.table.iter() {
        assert!(!present[code as usize], "code {code:#04x} is an input byte");
        assert!(!seen[code as usize], "code {code:#04x} used twice");
        seen[code as usize] = true;
    }
}

#[test]
fn test_xip_boundedness() {
    // A long run of one value has 255 codes available but needs far fewer.
    let compressed = compress(&vec![0u8; 100_000]);
    let info = inspect(&compressed).expect("inspect failed");
    assert!(info.entry_count <= 255);
    assert_eq!(info.decoded_len, 100_000);

    // Random data over 2 symbols can use many codes; the count still fits a byte.
    let original = lcg_data(20_000, 2, 3);
    let compressed = compress(&original);
    assert!(inspect(&compressed).expect("inspect failed").entry_count <= 254);
    assert_eq!(decompress(&compressed).expect("decompression failed"), original);
}

#[test]
fn test_xip_determinism() {
    let original = lcg_data(3000, 30, 11);
    assert_eq!(compress(&original), compress(&original));

    let config = XipConfig::new(AllocationPolicy::Random { seed: 0xC0FFEE });
    assert_eq!(compress_with(&original, config), compress_with(&original, config));
}

#[test]
fn test_xip_random_policy_roundtrip() {
    let original = lcg_data(3000, 30, 5);
    for seed in 0..4 {
        let config = XipConfig::new(AllocationPolicy::Random { seed });
        let compressed = compress_with(&original, config);
        assert_eq!(decompress(&compressed).expect("decompression failed"), original);
    }
}

#[test]
fn test_xip_compact_variant() {
    let original = b"how much wood would a woodchuck chuck".repeat(4);
    let compatible = compress_with(&original, XipConfig::COMPATIBLE);
    let compact = compress_with(&original, XipConfig::COMPACT);

    assert!(compact.len() < compatible.len());
    assert_eq!(decompress(&compact).expect("decompression failed"), original);
}

#[test]
fn test_xip_encoder_is_shareable() {
    let encoder = XipEncoder::default();
    let decoder = XipDecoder::new();
    let inputs: Vec<Vec<u8>> = (0..8).map(|i| lcg_data(500, 8, i)).collect();

    std::thread::scope(|scope| {
        for input in &inputs {
            scope.spawn(move || {
                let artifact = encoder.encode(input);
                assert_eq!(decoder.decode(&artifact).expect("decode failed"), *input);
            });
        }
    });
}

#[test]
fn test_xip_malformed_artifacts() {
    assert!(matches!(
        decompress(b""),
        Err(XipError::TruncatedArtifact { .. })
    ));
    assert!(matches!(
        decompress(&[0x05, 1, 2, 3]),
        Err(XipError::TruncatedArtifact {
            entry_count: 5,
            available: 4
        })
    ));
    assert!(matches!(
        decompress(&[0x02, 0x00, 0x00, 0x41, 0x41, 0x00, 0x42, 0x42]),
        Err(XipError::DuplicateCode { code: 0x00, index: 1 })
    ));
    assert!(matches!(
        decompress(&[0x01, 0x00, 0x00, 0x00, 0x00]),
        Err(XipError::ForwardReference { .. })
    ));
}
