//! LZ4 block integration tests.

use lzblock::{
    Acceleration, BlockCompressor, BlockDecompressor, CompressOptions, CompressState, Lz4BlockCodec,
    LzBlockError, compress, compress_bound, compress_to_vec, compress_with, decompress,
    decompress_partial, decompress_to_vec,
};

/// Seven little-endian integers; the last one is never needed by the partial decode.
const SCENARIO: [i64; 7] = [
    123123124, 334234, 454365346, 23123123, 3423423, 123123123, 5454552342,
];

fn int_bytes(values: &[i64]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

fn random_bytes(size: usize, mut seed: u64) -> Vec<u8> {
    let mut data = Vec::with_capacity(size);
    for _ in 0..size {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
        data.push((seed >> 32) as u8);
    }
    data
}

fn text_like(size: usize) -> Vec<u8> {
    let text = b"The quick brown fox jumps over the lazy dog. \
                 Pack my box with five dozen liquor jugs. \
                 How vexingly quick daft zebras jump! ";
    text.iter().copied().cycle().take(size).collect()
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing_subscriber::filter::LevelFilter::TRACE)
        .with_test_writer()
        .try_init();
}

#[test]
fn test_int64_scenario() {
    init_tracing();

    let src = int_bytes(&SCENARIO);
    assert_eq!(src.len(), 56);

    let max_dst_size = compress_bound(src.len()).expect("bound failed");
    let mut compressed = vec![0u8; max_dst_size];
    let compressed_size = compress(&src, &mut compressed).expect("compression failed");
    assert!(compressed_size > 0);
    assert!(compressed_size <= max_dst_size);
    compressed.truncate(compressed_size);

    println!(
        "src_size = {}, max_dst_size = {}, compressed_size = {}, ratio = {:.2}",
        src.len(),
        max_dst_size,
        compressed_size,
        compressed_size as f64 / src.len() as f64
    );

    let target_output_size = (SCENARIO.len() - 1) * 8;
    let mut regen = vec![0u8; src.len()];
    let produced = decompress_partial(&compressed, &mut regen, target_output_size)
        .expect("partial decompression failed");
    assert_eq!(produced, 48);

    // Only the regenerated prefix is meaningful
    assert_eq!(&regen[..target_output_size], &src[..target_output_size]);
    let regen_ints: Vec<i64> = regen[..produced]
        .chunks_exact(8)
        .map(|c| i64::from_le_bytes(c.try_into().expect("8-byte chunk")))
        .collect();
    assert_eq!(regen_ints, &SCENARIO[..6]);
}

#[test]
fn test_int64_scenario_last_value_irrelevant() {
    let mut values = SCENARIO;
    let expected = int_bytes(&SCENARIO)[..48].to_vec();

    for last in [0i64, -1, i64::MAX, 42, 5454552342] {
        values[6] = last;
        let compressed = compress_to_vec(&int_bytes(&values)).expect("compression failed");
        let mut regen = [0u8; 56];
        let produced = decompress_partial(&compressed, &mut regen, 48).expect("decompression failed");
        assert_eq!(produced, 48);
        assert_eq!(&regen[..48], &expected[..]);
    }
}

#[test]
fn test_int64_scenario_tolerates_bad_tail() {
    let compressed = compress_to_vec(&int_bytes(&SCENARIO)).expect("compression failed");
    let expected = &int_bytes(&SCENARIO)[..48];

    // Extra bytes after the block, as when the caller passes a larger size
    let mut padded = compressed.clone();
    padded.extend_from_slice(&[0xFF; 8]);
    let mut regen = [0u8; 56];
    assert_eq!(decompress_partial(&padded, &mut regen, 48).unwrap(), 48);
    assert_eq!(&regen[..48], expected);

    // Missing final byte
    let short = &compressed[..compressed.len() - 1];
    let mut regen = [0u8; 56];
    assert_eq!(decompress_partial(short, &mut regen, 48).unwrap(), 48);
    assert_eq!(&regen[..48], expected);
    assert!(decompress(short, &mut regen).is_err());
}

#[test]
fn test_full_roundtrip_scenario() {
    let src = int_bytes(&SCENARIO);
    let compressed = compress_to_vec(&src).expect("compression failed");
    let regen = decompress_to_vec(&compressed, src.len()).expect("decompression failed");
    assert_eq!(regen, src);
}

#[test]
fn test_roundtrip_patterns() {
    let inputs: Vec<(&str, Vec<u8>)> = vec![
        ("empty", Vec::new()),
        ("single", vec![0x42]),
        ("twelve", b"abcdefghijkl".to_vec()),
        ("thirteen", b"abcdefghijklm".to_vec()),
        ("zeros", vec![0u8; 10_000]),
        ("text", text_like(50_000)),
        ("random", random_bytes(20_000, 0x123456789ABCDEF0)),
        ("ramp", (0..70_000u32).map(|i| (i / 3) as u8).collect()),
    ];

    for (name, data) in inputs {
        let compressed = compress_to_vec(&data).expect("compression failed");
        assert!(
            compressed.len() <= compress_bound(data.len()).unwrap(),
            "{name}: bound exceeded"
        );
        let regen = decompress_to_vec(&compressed, data.len()).expect("decompression failed");
        assert_eq!(regen, data, "{name}: roundtrip mismatch");
    }
}

#[test]
fn test_repetitive_data_compresses() {
    let data = text_like(10_000);
    let compressed = compress_to_vec(&data).expect("compression failed");
    assert!(
        compressed.len() < data.len() / 10,
        "text should compress to less than 10%: {}",
        compressed.len()
    );
}

#[test]
fn test_matches_beyond_window() {
    // Repeat separated by more than the 64 KiB offset limit
    let chunk = random_bytes(4096, 7);
    let mut data = chunk.clone();
    data.extend(random_bytes(70_000, 99));
    data.extend_from_slice(&chunk);

    let compressed = compress_to_vec(&data).expect("compression failed");
    let regen = decompress_to_vec(&compressed, data.len()).expect("decompression failed");
    assert_eq!(regen, data);
}

#[test]
fn test_destination_too_small_never_overflows() {
    let data = text_like(2000);
    let needed = compress_to_vec(&data).unwrap().len();

    for capacity in 0..needed {
        let mut buffer = vec![0xA5u8; needed + 16];
        let err = compress(&data, &mut buffer[..capacity]).unwrap_err();
        assert!(matches!(err, LzBlockError::DestinationTooSmall { .. }));
        assert!(buffer[capacity..].iter().all(|&b| b == 0xA5), "wrote past capacity {capacity}");
    }
}

#[test]
fn test_incompressible_fits_bound() {
    let data = random_bytes(100_000, 3);
    let bound = compress_bound(data.len()).unwrap();
    let mut out = vec![0u8; bound];
    let n = compress(&data, &mut out).expect("compression failed");
    assert!(n <= bound);
    assert_eq!(decompress_to_vec(&out[..n], data.len()).unwrap(), data);
}

#[test]
fn test_acceleration_levels_roundtrip() {
    let data = text_like(30_000);
    for level in [1u32, 2, 8, 64, 65_537] {
        let options = CompressOptions::new().with_acceleration(Acceleration::new(level).unwrap());
        let mut out = vec![0u8; compress_bound(data.len()).unwrap()];
        let n = compress_with(&data, &mut out, &options).expect("compression failed");
        let regen = decompress_to_vec(&out[..n], data.len()).expect("decompression failed");
        assert_eq!(regen, data, "acceleration {level}");
    }
}

#[test]
fn test_state_reuse_across_blocks() {
    let mut state = CompressState::new();
    let options = CompressOptions::default();
    let blocks = [text_like(5000), random_bytes(5000, 11), vec![9u8; 5000]];

    for block in &blocks {
        let mut out = vec![0u8; compress_bound(block.len()).unwrap()];
        let n = state.compress(block, &mut out, &options).expect("compression failed");
        // each block stands alone
        let regen = decompress_to_vec(&out[..n], block.len()).expect("decompression failed");
        assert_eq!(&regen, block);
    }
}

#[test]
fn test_codec_traits() {
    let data = text_like(3000);
    let mut codec = Lz4BlockCodec::new();
    let compressed = codec.compress_to_vec(&data).expect("compression failed");
    let regen = codec
        .decompress_to_vec(&compressed, data.len())
        .expect("decompression failed");
    assert_eq!(regen, data);
}

#[test]
fn test_parallel_independent_blocks() {
    let blocks: Vec<Vec<u8>> = (0..8u64)
        .map(|i| {
            let mut block = text_like(8000);
            block.extend(random_bytes(500, i));
            block
        })
        .collect();

    let compressed: Vec<Vec<u8>> = std::thread::scope(|scope| {
        let handles: Vec<_> = blocks
            .iter()
            .map(|block| scope.spawn(move || compress_to_vec(block).expect("compression failed")))
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("thread panicked"))
            .collect()
    });

    for (block, packed) in blocks.iter().zip(&compressed) {
        assert_eq!(packed, &compress_to_vec(block).unwrap());
        assert_eq!(&decompress_to_vec(packed, block.len()).unwrap(), block);
    }
}
