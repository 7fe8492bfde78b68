//! Property-based tests for the codec laws.

use huffpack_core::{compress, decompress, Codec, FrequencyModel, HuffmanTree};
use proptest::prelude::*;

/// Inputs over a small alphabet so codes get long and ties are common.
fn small_alphabet_input() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(prop::sample::select(b"abcdefgh".to_vec()), 1..1500)
}

/// Arbitrary bytes.
fn any_input() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 1..1500)
}

proptest! {
    #[test]
    fn prop_round_trip(input in any_input()) {
        let compressed = compress(&input).unwrap();
        prop_assert_eq!(decompress(&compressed).unwrap(), input);
    }

    #[test]
    fn prop_round_trip_small_alphabet(input in small_alphabet_input()) {
        let compressed = compress(&input).unwrap();
        prop_assert_eq!(decompress(&compressed).unwrap(), input);
    }

    #[test]
    fn prop_codes_prefix_free(input in small_alphabet_input()) {
        let codes = Codec::default().code_table(&input).unwrap();
        prop_assert!(codes.is_prefix_free());
    }

    #[test]
    fn prop_frequency_conservation(input in any_input()) {
        let freq = FrequencyModel::count(&input).unwrap();
        let tree = HuffmanTree::build(&freq).unwrap();

        let leaf_sum: u64 = tree
            .preorder()
            .map(|id| tree.node(id))
            .filter(|node| node.is_leaf())
            .map(|node| node.weight())
            .sum();

        prop_assert_eq!(tree.root_weight(), input.len() as u64);
        prop_assert_eq!(leaf_sum, input.len() as u64);
        prop_assert_eq!(freq.total(), input.len() as u64);
    }

    #[test]
    fn prop_code_length_monotone(input in small_alphabet_input()) {
        let freq = FrequencyModel::count(&input).unwrap();
        let codes = HuffmanTree::build(&freq).unwrap().derive_codes();

        for (x, fx) in freq.iter() {
            for (y, fy) in freq.iter() {
                if fx > fy {
                    let lx = codes.get(x).unwrap().len();
                    let ly = codes.get(y).unwrap().len();
                    prop_assert!(lx <= ly, "f({})={} len {} vs f({})={} len {}", x, fx, lx, y, fy, ly);
                }
            }
        }
    }

    #[test]
    fn prop_byte_aligned(input in any_input()) {
        let (bytes, stats) = Codec::default().compress_with_stats(&input).unwrap();

        prop_assert!((1..=8).contains(&stats.padding_bits));
        prop_assert_eq!(stats.overhead_bits() + stats.payload_bits, bytes.len() as u64 * 8);
    }

    #[test]
    fn prop_truncation_never_silently_complete(input in small_alphabet_input(), cut in 1usize..4) {
        let compressed = compress(&input).unwrap();
        prop_assume!(cut < compressed.len());

        match decompress(&compressed[..compressed.len() - cut]) {
            Ok(decoded) => {
                prop_assert!(decoded.len() < input.len());
                prop_assert_eq!(&input[..decoded.len()], &decoded[..]);
            }
            Err(_) => {}
        }
    }

    #[test]
    fn prop_garbage_does_not_panic(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        let _ = decompress(&bytes);
    }
}
