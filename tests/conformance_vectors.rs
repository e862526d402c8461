//! Reference compression examples for the VBA compressed container.
//!
//!   cargo test --test conformance_vectors

mod common;

use common::{copy_tokens, hex, windows_1252};
use ovba_compression::compression::CompressedContainer;
use ovba_compression::{compress, decompress};

// ===========================================================================
// No compression: every token is a literal
// ===========================================================================

mod no_compression {
    use super::*;

    const INPUT: &str = "abcdefghijklmnopqrstuv.";
    const COMPRESSED: &str =
        "01 19 B0 00 61 62 63 64 65 66 67 68 00 69 6A 6B 6C 6D 6E 6F 70 00 71 72 73 74 75 76 2E";
    const DECOMPRESSED: &str =
        "61 62 63 64 65 66 67 68 69 6A 6B 6C 6D 6E 6F 70 71 72 73 74 75 76 2E";

    #[test]
    fn test_input_matches_decompressed_vector() {
        assert_eq!(windows_1252(INPUT), hex(DECOMPRESSED));
    }

    #[test]
    fn test_compression_produces_expected_output() {
        let compressed = compress(&windows_1252(INPUT)).unwrap();
        assert_eq!(compressed, hex(COMPRESSED));
    }

    #[test]
    fn test_decompression_produces_expected_output() {
        let decompressed = decompress(&hex(COMPRESSED)).unwrap();
        assert_eq!(decompressed, hex(DECOMPRESSED));
    }

    #[test]
    fn test_single_chunk_of_literals() {
        let container = CompressedContainer::parse(&hex(COMPRESSED)).unwrap();
        assert_eq!(container.len(), 1);
        assert!(copy_tokens(&container).is_empty());
        assert_eq!(container.tokens().count(), INPUT.len());
    }
}

// ===========================================================================
// Normal compression: literals mixed with copy tokens
// ===========================================================================

mod normal_compression {
    use super::*;

    const INPUT: &str = "#aaabcdefaaaaghijaaaaaklaaamnopqaaaaaaaaaaaarstuvwxyzaaa";
    const COMPRESSED: &str = "01 2F B0 00 23 61 61 61 62 63 64 65 82 66 00 70 61 67 68 69 6A 01 38 08 61 6B 6C 00 30 6D 6E 6F \
                              70 06 71 02 70 04 10 72 73 74 75 76 10 77 78 79 7A 00 3C";
    const DECOMPRESSED: &str = "23 61 61 61 62 63 64 65 66 61 61 61 61 67 68 69 6a 61 61 61 61 61 6B 6C 61 61 61 6D 6E 6F 70 71 \
                                61 61 61 61 61 61 61 61 61 61 61 61 72 73 74 75 76 77 78 79 7A 61 61 61";

    #[test]
    fn test_input_matches_decompressed_vector() {
        assert_eq!(windows_1252(INPUT), hex(DECOMPRESSED));
    }

    #[test]
    fn test_decompression_produces_expected_output() {
        let decompressed = decompress(&hex(COMPRESSED)).unwrap();
        assert_eq!(decompressed, hex(DECOMPRESSED));
    }

    #[test]
    fn test_reference_container_reserializes_identically() {
        let container = CompressedContainer::parse(&hex(COMPRESSED)).unwrap();
        assert_eq!(container.to_bytes().unwrap(), hex(COMPRESSED));
    }

    #[test]
    fn test_copy_tokens_cover_same_runs() {
        // Equal-length candidates are resolved towards the closest one, so
        // offsets may differ from the reference; positions and lengths may not.
        let reference = CompressedContainer::parse(&hex(COMPRESSED)).unwrap();
        let ours = CompressedContainer::from_decompressed(&windows_1252(INPUT), false).unwrap();

        let expected: Vec<(usize, u16)> = copy_tokens(&reference)
            .iter()
            .map(|t| (t.position(), t.length()))
            .collect();
        let actual: Vec<(usize, u16)> = copy_tokens(&ours)
            .iter()
            .map(|t| (t.position(), t.length()))
            .collect();
        assert_eq!(actual, expected);
        assert_eq!(
            ours.to_bytes().unwrap().len(),
            reference.to_bytes().unwrap().len()
        );
    }

    #[test]
    fn test_round_trip() {
        let input = windows_1252(INPUT);
        assert_eq!(decompress(&compress(&input).unwrap()).unwrap(), input);
    }
}

// ===========================================================================
// Maximum compression: one literal and one long copy token
// ===========================================================================

mod maximum_compression {
    use super::*;

    const COMPRESSED: &str = "01 03 B0 02 61 45 00";

    fn input() -> Vec<u8> {
        windows_1252(&"a".repeat(73))
    }

    #[test]
    fn test_compression_produces_expected_output() {
        assert_eq!(compress(&input()).unwrap(), hex(COMPRESSED));
    }

    #[test]
    fn test_decompression_produces_expected_output() {
        assert_eq!(decompress(&hex(COMPRESSED)).unwrap(), input());
    }

    #[test]
    fn test_single_long_copy_token() {
        let container = CompressedContainer::parse(&hex(COMPRESSED)).unwrap();
        let copies = copy_tokens(&container);
        assert_eq!(copies.len(), 1);
        assert_eq!(copies[0].position(), 1);
        assert_eq!(copies[0].offset(), 1);
        assert_eq!(copies[0].length(), 72);
    }
}
