//! Integration tests for the full codec.
//!
//! These exercise the public API end to end: input -> frequency model ->
//! tree -> code table -> bitstream -> decoder -> output, with verification
//! that output matches input.

mod common;

use huffpack_core::{
    bitstream::serialize,
    compress, decompress, Codec, CodecConfig, Decoder, Error, FrequencyModel, HuffmanTree,
    MalformedBitstream, SingleSymbolPolicy,
};

fn expect_malformed(result: huffpack_core::Result<Vec<u8>>) -> MalformedBitstream {
    match result {
        Err(Error::Malformed(m)) => m,
        other => panic!("expected malformed bitstream, got {:?}", other),
    }
}

/// Scenario: "aaab" builds a two-leaf tree and round-trips.
#[test]
fn test_two_leaf_scenario() {
    let freq = FrequencyModel::count(b"aaab").unwrap();
    assert_eq!(freq.get(b'a'), 3);
    assert_eq!(freq.get(b'b'), 1);

    let tree = HuffmanTree::build(&freq).unwrap();
    let codes = tree.derive_codes();
    let a = codes.get(b'a').unwrap();
    let b = codes.get(b'b').unwrap();
    assert_eq!(a.len(), 1);
    assert_eq!(b.len(), 1);
    assert_ne!(a, b);

    let bytes = serialize(&tree, b"aaab", &codes).unwrap();
    assert_eq!(bytes, vec![0x02, 0x46, 0x26, 0x11]);
    assert_eq!(decompress(&bytes).unwrap(), b"aaab");
}

/// Scenario: one distinct symbol repeated is encoded, not rejected, by default.
#[test]
fn test_single_symbol_scenario() {
    let tree = HuffmanTree::build(&FrequencyModel::count(b"zzzz").unwrap()).unwrap();
    assert!(tree.is_degenerate());
    assert!(tree.derive_codes().get(b'z').unwrap().is_empty());

    let compressed = compress(b"zzzz").unwrap();
    assert_eq!(compressed, vec![0x02, 0x47, 0xA7, 0xBF]);
    assert_eq!(decompress(&compressed).unwrap(), b"zzzz");

    // wrap-around filler
    let data = vec![0xFF; 17];
    assert_eq!(decompress(&compress(&data).unwrap()).unwrap(), data);

    let rejecting =
        Codec::new(CodecConfig::default().with_single_symbol(SingleSymbolPolicy::Reject)).unwrap();
    assert!(matches!(
        rejecting.compress(b"zzzz"),
        Err(Error::SingleSymbolRejected { symbol: b'z' })
    ));
}

/// Scenario: every byte value once gives 256 leaves with 8-bit codes.
#[test]
fn test_all_symbols() {
    let input_data: Vec<u8> = (0..=255).collect();

    let codes = Codec::default().code_table(&input_data).unwrap();
    assert_eq!(codes.len(), 256);
    assert!(codes.iter().all(|(_, code)| code.len() == 8));

    let compressed = compress(&input_data).unwrap();
    // 2 padding + 1022 shape + 2048 leaf symbol + 2048 payload bits
    assert_eq!(compressed.len(), 640);
    assert_eq!(decompress(&compressed).unwrap(), input_data);
}

/// Scenario: truncating a compressed stream fails instead of returning short output.
#[test]
fn test_truncated_mid_payload() {
    let compressed = compress(b"hello world").unwrap();
    assert_eq!(compressed.len(), 16);

    let truncated = &compressed[..compressed.len() - 1];
    assert_eq!(
        expect_malformed(decompress(truncated)),
        MalformedBitstream::IncompleteCode { position: 118 }
    );
}

#[test]
fn test_truncated_in_leaf_symbols() {
    let compressed = compress(b"aaab").unwrap();
    assert!(matches!(
        expect_malformed(decompress(&compressed[..3])),
        MalformedBitstream::TruncatedLeafSymbol { .. }
    ));
}

/// Known limit of the stream format, kept on purpose: there is no length or
/// symbol-count field, so a cut that lands exactly between two codes leaves a
/// well-formed shorter stream and decodes to a prefix. Only cuts inside a code
/// (`test_truncated_mid_payload`) or inside the header are reported.
#[test]
fn test_truncation_on_code_boundary_yields_prefix() {
    let compressed = compress(b"abracadabra").unwrap();
    let decoded = decompress(&compressed[..compressed.len() - 1]).unwrap();
    assert_eq!(decoded, b"abracad");
}

#[test]
fn test_empty_input_rejected() {
    assert!(matches!(compress(b""), Err(Error::EmptyInput)));
    assert!(matches!(FrequencyModel::count(b""), Err(Error::EmptyInput)));
}

#[test]
fn test_decoded_tree_matches_encoder_codes() {
    let data = b"the quick brown fox jumps over the lazy dog";
    let encoder_codes = Codec::default().code_table(data).unwrap();

    let compressed = compress(data).unwrap();
    let (tree, output) = Decoder::new(&compressed, true).unwrap().finish().unwrap();
    assert_eq!(output, data);

    let decoder_codes = tree.codes();
    for (symbol, code) in encoder_codes.iter() {
        assert_eq!(decoder_codes.get(symbol), Some(code), "symbol {symbol:#04x}");
    }
    assert_eq!(decoder_codes, &encoder_codes);
}

#[test]
fn test_sample_data_round_trip() {
    for seed in 0..8 {
        let input_data = common::generate_sample_data(seed, 20_000);
        let compressed = compress(&input_data).unwrap();
        assert_eq!(decompress(&compressed).unwrap(), input_data, "seed {seed}");
    }
}

#[test]
fn test_skewed_text_compresses() {
    let input_data = common::skewed_text(7, 50_000);
    let (compressed, stats) = Codec::default().compress_with_stats(&input_data).unwrap();

    assert!(stats.compression_ratio() < 0.7);
    assert!(stats.bits_per_symbol() < 5.0);
    assert_eq!(decompress(&compressed).unwrap(), input_data);
}

#[test]
fn test_large_single_run() {
    let input_data = vec![b'X'; 128 * 1024];
    let compressed = compress(&input_data).unwrap();

    // one bit per occurrence plus a few bytes of tree
    assert!(compressed.len() < input_data.len() / 7);
    assert_eq!(decompress(&compressed).unwrap(), input_data);
}

#[test]
fn test_binary_with_zero_bytes() {
    let input_data = vec![0u8, 0, 0, 1, 0, 0, 0, 0, 2, 0];
    let compressed = compress(&input_data).unwrap();
    assert_eq!(decompress(&compressed).unwrap(), input_data);
}

#[test]
fn test_render_after_decode() {
    let compressed = compress(b"aaab").unwrap();
    let (tree, _) = Decoder::new(&compressed, true).unwrap().finish().unwrap();
    // rebuilt trees carry no weights
    assert_eq!(tree.render(), "└── 0\n    ├── 'b',0\n    └── 'a',0\n");
}
