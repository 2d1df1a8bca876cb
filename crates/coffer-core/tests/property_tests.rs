//! Property-based tests for coffer-core using proptest
//!
//! These tests verify invariants that should hold for all valid inputs.

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use coffer_core::{
    account::{format_balance, parse_balance},
    decode_record, encode_record,
    generator::{PinGenerator, PinLength, RngDigits},
    obfuscate::{Obfuscator, XorObfuscator},
    pattern, Account, BANNED_PINS,
};

// ============================================
// Strategies
// ============================================

fn arb_username() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_.-]{1,24}"
}

fn arb_pin() -> impl Strategy<Value = String> {
    prop_oneof!["[0-9]{4}", "[0-9]{6}"]
}

fn arb_account() -> impl Strategy<Value = Account> {
    (
        arb_username(),
        arb_pin(),
        0u64..=1_000_000_000,
        0u32..=3,
        prop::bool::ANY,
    )
        .prop_map(|(username, pin, balance_cents, wrong_attempts, locked)| Account {
            username,
            pin,
            balance_cents,
            wrong_attempts,
            locked,
        })
}

fn arb_key() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 1..32)
}

// ============================================
// Property Tests
// ============================================

proptest! {
    // ----------------------------------------
    // Pattern Detector Properties
    // ----------------------------------------

    #[test]
    fn ascending_runs_are_sequential(first in 0u8..=5, len in 3usize..=5) {
        let pin: String = (0..len).map(|i| char::from(b'0' + first + i as u8)).collect();
        prop_assert!(pattern::is_sequential(&pin));
    }

    #[test]
    fn descending_runs_are_sequential(first in 5u8..=9, len in 3usize..=5) {
        let pin: String = (0..len).map(|i| char::from(b'0' + first - i as u8)).collect();
        prop_assert!(pattern::is_sequential(&pin));
    }

    #[test]
    fn triple_runs_have_too_many_repeats(digit in 0u8..=9, prefix in "[0-9]{0,2}", suffix in "[0-9]{0,2}") {
        let run: String = std::iter::repeat(char::from(b'0' + digit)).take(3).collect();
        let pin = format!("{}{}{}", prefix, run, suffix);
        prop_assert!(pattern::has_too_many_repeats(&pin));
    }

    #[test]
    fn uniform_strings_have_too_many_repeats(digit in 0u8..=9, len in 1usize..=6) {
        let pin: String = std::iter::repeat(char::from(b'0' + digit)).take(len).collect();
        prop_assert!(pattern::has_too_many_repeats(&pin));
    }

    // ----------------------------------------
    // Obfuscator Properties
    // ----------------------------------------

    #[test]
    fn xor_is_self_inverse(key in arb_key(), input in prop::collection::vec(any::<u8>(), 0..256)) {
        let obfuscator = XorObfuscator::new(key).unwrap();
        prop_assert_eq!(obfuscator.apply(&obfuscator.apply(&input)), input);
    }

    #[test]
    fn xor_preserves_length(key in arb_key(), input in prop::collection::vec(any::<u8>(), 0..256)) {
        let obfuscator = XorObfuscator::new(key).unwrap();
        prop_assert_eq!(obfuscator.apply(&input).len(), input.len());
    }

    // ----------------------------------------
    // Record Codec Properties
    // ----------------------------------------

    #[test]
    fn record_roundtrip(account in arb_account(), key in arb_key()) {
        let obfuscator = XorObfuscator::new(key).unwrap();
        let line = encode_record(&account, &obfuscator);
        let decoded = decode_record(&line, &obfuscator).unwrap();
        prop_assert_eq!(decoded, account);
    }

    #[test]
    fn encoded_lines_never_contain_newlines(account in arb_account()) {
        let obfuscator = XorObfuscator::with_default_key();
        let line = encode_record(&account, &obfuscator);
        prop_assert!(!line.contains('\n'));
        prop_assert!(!line.contains('\r'));
    }

    #[test]
    fn decode_of_arbitrary_text_never_panics(line in "[ -~]{0,64}") {
        let obfuscator = XorObfuscator::with_default_key();
        let _ = decode_record(&line, &obfuscator);
    }

    // ----------------------------------------
    // Balance Rendering Properties
    // ----------------------------------------

    #[test]
    fn balance_roundtrip(cents in 0u64..=u64::MAX / 100) {
        prop_assert_eq!(parse_balance(&format_balance(cents)).unwrap(), cents);
    }

    // ----------------------------------------
    // Generator Properties
    // ----------------------------------------

    #[test]
    fn generated_pins_are_never_weak(seed in any::<u64>()) {
        let generator = PinGenerator::default();
        let mut source = RngDigits(ChaCha8Rng::seed_from_u64(seed));

        let pin = generator.generate(PinLength::Four, &mut source).unwrap();
        prop_assert_eq!(pin.len(), 4);
        prop_assert!(!pattern::is_sequential(&pin));
        prop_assert!(!pattern::has_too_many_repeats(&pin));
        prop_assert!(!BANNED_PINS.contains(&pin.as_str()));
    }
}
