use quickcheck::quickcheck;
use rand::{Rng, SeedableRng, rngs::StdRng};

use super::*;
use super::huffman_decoder::{DecodeState, Step};
use crate::{encode, decode, encode_symbols, decode_symbols, error::HuffmanError};

fn bits(s: &str) -> BitString {
    s.parse().unwrap()
}

fn strict() -> CodecConfig {
    CodecConfig::new().set_decode_mode(DecodeMode::Strict)
}

#[test]
fn test_bird_sentence_roundtrip() {
    let sentence = "The bird is the word";
    let (encoded, tree) = encode(sentence).unwrap();

    assert_eq!(decode(&encoded, &tree).unwrap(), sentence);
}

#[test]
fn test_single_symbol_input() {
    let (encoded, tree) = encode("aaa").unwrap();

    assert_eq!(encoded.as_str(), "000");
    assert_eq!(decode(&encoded, &tree).unwrap(), "aaa");
}

#[test]
fn test_single_symbol_input_with_custom_bit() {
    let config = CodecConfig::new().set_single_symbol_bit(Bit::One);
    let input: Vec<char> = "aaaa".chars().collect();
    let out = encode_with(&input, &config).unwrap();

    assert_eq!(out.bits.as_str(), "1111");
    assert_eq!(decode_with(&out.bits, &out.tree, &config).unwrap(), input);
}

#[test]
fn test_single_character_input() {
    let (encoded, tree) = encode("x").unwrap();

    assert_eq!(encoded.as_str(), "0");
    assert_eq!(decode(&encoded, &tree).unwrap(), "x");
}

#[test]
fn test_empty_input_is_rejected() {
    assert!(matches!(encode(""), Err(HuffmanError::InvalidInput(_))));
}

#[test]
fn test_encode_uses_cached_codes() {
    let input: Vec<char> = "abracadabra".chars().collect();
    let out = encode_symbols(&input).unwrap();

    let mut expected = BitString::new();
    for c in input.iter() {
        let entry = out.frequencies.get(c).unwrap();
        expected.push_code(entry.code.as_ref().unwrap());
    }

    assert_eq!(out.bits, expected);
    assert_eq!(out.frequencies.total(), input.len());
}

#[test]
fn test_skewed_input_compresses() {
    let (encoded, _) = encode("aaaaaab").unwrap();

    assert!(encoded.len() < 8 * "aaaaaab".len());
    assert_eq!(encoded.len(), 7);
}

#[test]
fn test_encoding_twice_decodes_the_same() {
    let sentence = "she sells sea shells by the sea shore";
    let (a, tree_a) = encode(sentence).unwrap();
    let (b, tree_b) = encode(sentence).unwrap();

    assert_eq!(decode(&a, &tree_a).unwrap(), sentence);
    assert_eq!(decode(&b, &tree_b).unwrap(), sentence);
}

#[test]
fn test_byte_symbols_roundtrip() {
    let input: Vec<u8> = (0..=255u8).chain(0..16).collect();
    let out = encode_symbols(&input).unwrap();

    assert_eq!(decode_symbols(&out.bits, &out.tree).unwrap(), input);
}

#[test]
fn test_string_symbols_roundtrip() {
    let input: Vec<String> = "to be or not to be".split(' ').map(str::to_owned).collect();
    let out = encode_symbols(&input).unwrap();

    assert_eq!(decode_symbols(&out.bits, &out.tree).unwrap(), input);
}

#[test]
fn test_empty_bits_decode_to_nothing() {
    let (_, tree) = encode("hello").unwrap();

    assert_eq!(decode(&BitString::new(), &tree).unwrap(), "");

    let (_, single) = encode("zzz").unwrap();
    assert_eq!(decode(&BitString::new(), &single).unwrap(), "");
}

#[test]
fn test_permissive_single_leaf_ignores_bit_values() {
    let (_, tree) = encode("zzz").unwrap();

    assert_eq!(decode(&bits("0101"), &tree).unwrap(), "zzzz");
}

#[test]
fn test_strict_single_leaf_rejects_other_bit() {
    let (_, tree) = encode("zzz").unwrap();
    let err = decode_with(&bits("001"), &tree, &strict()).unwrap_err();

    assert!(matches!(err, HuffmanError::MalformedInput { position: 2, .. }));
}

#[test]
fn test_permissive_drops_truncated_code() {
    // a = 1, b = 01, c = 00
    let input: Vec<char> = "aaaabbc".chars().collect();
    let out = encode_symbols(&input).unwrap();
    assert_eq!(out.tree.code_for(&'c'), Some(bits("00")));

    let mut truncated = out.bits.clone();
    truncated.push(Bit::Zero);

    assert_eq!(decode_symbols(&truncated, &out.tree).unwrap(), input);
}

#[test]
fn test_strict_rejects_truncated_code() {
    let input: Vec<char> = "aaaabbc".chars().collect();
    let out = encode_symbols(&input).unwrap();

    let mut truncated = out.bits.clone();
    truncated.push(Bit::Zero);
    let err = decode_with(&truncated, &out.tree, &strict()).unwrap_err();

    assert!(matches!(err, HuffmanError::MalformedInput { position, .. } if position == out.bits.len()));
}

#[test]
fn test_strict_accepts_well_formed_bits() {
    let input: Vec<char> = "The bird is the word".chars().collect();
    let out = encode_with(&input, &strict()).unwrap();

    assert_eq!(decode_with(&out.bits, &out.tree, &strict()).unwrap(), input);
}

#[test]
fn test_decode_rejects_invalid_tree() {
    let (encoded, tree) = encode("abbb").unwrap();
    let mut json: serde_json::Value = serde_json::to_value(&tree).unwrap();
    json["root"]["label"] = serde_json::json!("One");
    let broken: HuffmanTree<char> = serde_json::from_value(json).unwrap();

    assert!(matches!(decode(&encoded, &broken), Err(HuffmanError::TypeMismatch(_))));
}

#[test]
fn test_decoder_state_machine() {
    // a = 1, b = 01, c = 00
    let input: Vec<char> = "aaaabbc".chars().collect();
    let out = encode_symbols(&input).unwrap();
    let stream = bits("011");
    let mut decoder = HuffmanDecoder::new(&out.tree, &stream, DecodeMode::Permissive).unwrap();

    assert_eq!(decoder.state(), DecodeState::AtRoot);
    assert_eq!(decoder.step().unwrap(), Step::Moved(Bit::Zero));
    assert!(matches!(decoder.state(), DecodeState::Descending(n) if !n.is_leaf()));
    assert_eq!(decoder.step().unwrap(), Step::Moved(Bit::One));
    assert_eq!(decoder.position(), 2);
    // Emitting does not consume a bit.
    assert_eq!(decoder.step().unwrap(), Step::Emitted(&'b'));
    assert_eq!(decoder.position(), 2);
    assert_eq!(decoder.state(), DecodeState::AtRoot);
    assert_eq!(decoder.step().unwrap(), Step::Moved(Bit::One));
    // The last leaf is still emitted when the bits end on it.
    assert_eq!(decoder.step().unwrap(), Step::Emitted(&'a'));
    assert_eq!(decoder.step().unwrap(), Step::Finished);
    assert_eq!(decoder.step().unwrap(), Step::Finished);
}

#[test]
fn test_decoder_iterator_stops_after_error() {
    let (_, tree) = encode("zzz").unwrap();
    let stream = bits("10");
    let mut decoder = HuffmanDecoder::new(&tree, &stream, DecodeMode::Strict).unwrap();

    assert!(matches!(decoder.next(), Some(Err(HuffmanError::MalformedInput { position: 0, .. }))));
    assert!(decoder.next().is_none());
}

#[test]
fn test_random_skewed_inputs_roundtrip() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let alphabet: Vec<char> = "etaoinshrdlu".chars().collect();

    for _ in 0..50 {
        let len = rng.gen_range(1..2000);
        let input: Vec<char> = (0..len)
            .map(|_| {
                // Squaring skews the picks towards the front of the alphabet.
                let x: f64 = rng.gen();
                alphabet[(x * x * alphabet.len() as f64) as usize]
            })
            .collect();
        let out = encode_symbols(&input).unwrap();

        assert_eq!(decode_with(&out.bits, &out.tree, &strict()).unwrap(), input);
    }
}

quickcheck! {
    fn roundtrip(input: String) -> bool {
        if input.is_empty() {
            return encode(&input).is_err();
        }
        let (encoded, tree) = encode(&input).unwrap();
        decode(&encoded, &tree).unwrap() == input
    }

    fn codes_are_prefix_free(input: Vec<u8>) -> bool {
        if input.is_empty() {
            return true;
        }
        let out = encode_symbols(&input).unwrap();
        let codes: Vec<&BitString> = out.frequencies.iter().map(|(_, e)| e.code.as_ref().unwrap()).collect();
        codes.iter().enumerate().all(|(i, a)| {
            codes.iter().enumerate().all(|(j, b)| i == j || !b.starts_with(a))
        })
    }

    fn encoded_length_is_sum_of_code_lengths(input: Vec<u8>) -> bool {
        if input.is_empty() {
            return true;
        }
        let out = encode_symbols(&input).unwrap();
        let expected: usize = out.frequencies.iter()
            .map(|(_, e)| e.count * e.code.as_ref().unwrap().len())
            .sum();
        out.bits.len() == expected
    }
}
