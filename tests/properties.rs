//! Property-based tests for the calculators
//!
//! Randomized checks of the round-trip and cover laws the calculators rely
//! on: radix rendering inverts parsing, two's complement encodes what it
//! decodes, bit reversal is an involution, and the K-map cover matches the
//! minterm set exactly.

use bitbench::core::bits::{PadSide, pad_binary, reverse_bits, xor_values};
use bitbench::core::boolean::{Assignment, BoolExpr};
use bitbench::core::kmap::{KarnaughMap, binary_to_gray, gray_to_binary};
use bitbench::core::radix::{parse_integer, render_integer};
use bitbench::core::twos::{decode_twos_complement, encode_twos_complement};
use bitbench::core::truth_table::build_truth_table;
use num_bigint::BigInt;
use proptest::prelude::*;

// ============================================================================
// Radix
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn prop_render_then_parse_is_identity(n in any::<i64>(), base in 2u32..=36) {
        let value = BigInt::from(n);
        let text = render_integer(&value, base);
        prop_assert_eq!(parse_integer(&text, base), Ok(value));
    }

    #[test]
    fn prop_uppercase_and_separators_do_not_matter(n in any::<u64>(), base in 2u32..=36) {
        let text = render_integer(&BigInt::from(n), base);
        let noisy: String = text
            .to_uppercase()
            .chars()
            .flat_map(|c| [c, '_'])
            .collect();
        prop_assert_eq!(parse_integer(&noisy, base), parse_integer(&text, base));
    }

    #[test]
    fn prop_conversion_through_any_base_agrees(n in any::<u64>(), via in 2u32..=36, to in 2u32..=36) {
        let value = BigInt::from(n);
        let intermediate = render_integer(&value, via);
        let reparsed = parse_integer(&intermediate, via).unwrap();
        prop_assert_eq!(render_integer(&reparsed, to), render_integer(&value, to));
    }
}

// ============================================================================
// Two's complement
// ============================================================================

proptest! {
    #[test]
    fn prop_twos_round_trip(width in 1usize..=64, raw in any::<i64>()) {
        // Fold raw into the representable range for `width`
        let modulus = BigInt::from(1) << width;
        let half = BigInt::from(1) << (width - 1);
        let value = ((BigInt::from(raw) % &modulus) + &modulus) % &modulus - &half;

        let bits = encode_twos_complement(&value, width).unwrap();
        prop_assert_eq!(bits.len(), width);
        let decoded = decode_twos_complement(&bits).unwrap();
        prop_assert_eq!(decoded.value, value);
        prop_assert_eq!(decoded.width, width);
    }
}

// ============================================================================
// Bits
// ============================================================================

proptest! {
    #[test]
    fn prop_reverse_is_an_involution(bits in "[01]{1,64}") {
        let once = reverse_bits(&bits, 2, None).unwrap();
        let twice = reverse_bits(&once.binary, 2, Some(once.width)).unwrap();
        prop_assert_eq!(twice.binary, bits);
    }

    #[test]
    fn prop_pad_never_truncates(bits in "[01]{0,40}", len in 0usize..48) {
        let left = pad_binary(&bits, len, PadSide::Left);
        let right = pad_binary(&bits, len, PadSide::Right);
        prop_assert_eq!(left.len(), bits.len().max(len));
        prop_assert!(left.ends_with(&bits));
        prop_assert!(right.starts_with(&bits));
    }

    #[test]
    fn prop_xor_is_self_inverse(a in any::<u32>(), b in any::<u32>()) {
        let a_hex = format!("{a:x}");
        let b_bin = format!("{b:b}");
        let x = xor_values((&a_hex, 16), (&b_bin, 2), 32).unwrap();
        prop_assert_eq!(x.result, BigInt::from(a ^ b));
        let back = xor_values((&x.readout.decimal, 10), (&b_bin, 2), 32).unwrap();
        prop_assert_eq!(back.result, BigInt::from(a));
    }
}

// ============================================================================
// K-map
// ============================================================================

proptest! {
    #[test]
    fn prop_gray_code_round_trip(n in 0usize..1 << 16) {
        prop_assert_eq!(gray_to_binary(binary_to_gray(n)), n);
    }

    #[test]
    fn prop_kmap_cover_is_exact(vars in 2usize..=4, mask in any::<u16>()) {
        let size = 1usize << vars;
        let minterms: Vec<usize> = (0..size).filter(|m| mask >> m & 1 == 1).collect();
        let map = KarnaughMap::new(vars, &minterms).unwrap();
        let implicants = map.implicants();
        for m in 0..size {
            let covered = implicants.iter().any(|imp| imp.covers(m));
            prop_assert_eq!(covered, minterms.contains(&m), "minterm {}", m);
        }
    }

    #[test]
    fn prop_truth_table_minterms_rebuild_the_function(vars in 2usize..=4, mask in any::<u16>()) {
        // Build a sum-of-products expression for the mask, then check the
        // truth table gives back the same minterms
        let names = ['a', 'b', 'c', 'd'];
        let size = 1usize << vars;
        let minterms: Vec<usize> = (0..size).filter(|m| mask >> m & 1 == 1).collect();
        let products: Vec<String> = minterms
            .iter()
            .map(|m| {
                let literals: Vec<String> = (0..vars)
                    .map(|i| {
                        let bit = (m >> (vars - 1 - i)) & 1 == 1;
                        if bit { names[i].to_string() } else { format!("~{}", names[i]) }
                    })
                    .collect();
                format!("({})", literals.join(" & "))
            })
            .collect();
        // Mention every variable so the table has all of them
        let all_vars: Vec<String> = names[..vars].iter().map(|n| format!("({n} & ~{n})")).collect();
        let expr = if products.is_empty() {
            all_vars.join(" | ")
        } else {
            format!("{} | {}", products.join(" | "), all_vars.join(" | "))
        };

        let table = build_truth_table(&expr).unwrap();
        prop_assert_eq!(table.minterms(), minterms.clone());

        let assignment: Assignment = names[..vars].iter().map(|n| (*n, true)).collect();
        let all_ones = size - 1;
        prop_assert_eq!(BoolExpr::new(&expr).evaluate(&assignment), minterms.contains(&all_ones));
    }
}
