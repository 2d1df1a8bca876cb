//! PIN generation with weakness rejection
//!
//! Draws uniformly random decimal digits and rejects candidates that are
//! sequential, repeat-heavy, or on the banned list. The digit source is
//! injected so tests can script the sequence.

use std::collections::HashSet;

use rand::Rng;

use crate::error::{CofferError, Result};
use crate::pattern;
use crate::MAX_GENERATION_ATTEMPTS;

/// Well-known weak PINs rejected outright during generation.
///
/// Not re-applied on manual PIN change, where only the pattern checks run.
pub const BANNED_PINS: &[&str] = &[
    "1234", "0000", "1111", "1212", "7777", "1004", "2000", "4321", "2580",
];

/// Supported PIN lengths
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PinLength {
    Four,
    Six,
}

impl PinLength {
    /// Number of digits for this length
    pub fn digits(self) -> usize {
        match self {
            PinLength::Four => 4,
            PinLength::Six => 6,
        }
    }

    /// Parse a digit count into a supported length
    pub fn from_digits(n: usize) -> Option<Self> {
        match n {
            4 => Some(PinLength::Four),
            6 => Some(PinLength::Six),
            _ => None,
        }
    }
}

/// Source of uniformly-random decimal digits
pub trait DigitSource {
    /// Next digit in 0..=9
    fn next_digit(&mut self) -> u8;
}

/// Digit source backed by any `rand` RNG
pub struct RngDigits<R: Rng>(pub R);

impl<R: Rng> DigitSource for RngDigits<R> {
    fn next_digit(&mut self) -> u8 {
        self.0.gen_range(0..10)
    }
}

/// Generates PINs that pass all rejection rules
pub struct PinGenerator {
    banned: HashSet<String>,
    max_attempts: u32,
}

impl Default for PinGenerator {
    fn default() -> Self {
        Self::new(std::iter::empty(), MAX_GENERATION_ATTEMPTS)
    }
}

impl PinGenerator {
    /// Create a generator with extra banned PINs on top of [`BANNED_PINS`]
    /// and a retry ceiling.
    pub fn new(extra_banned: impl IntoIterator<Item = String>, max_attempts: u32) -> Self {
        let mut banned: HashSet<String> = BANNED_PINS.iter().map(|p| p.to_string()).collect();
        banned.extend(extra_banned);
        Self {
            banned,
            max_attempts,
        }
    }

    /// Draw digits until a candidate passes every rejection rule.
    ///
    /// The ceiling guards against a banned set that covers the whole digit
    /// space; hitting it is reported as a typed error rather than looping
    /// forever.
    pub fn generate(&self, length: PinLength, digits: &mut dyn DigitSource) -> Result<String> {
        for _ in 0..self.max_attempts {
            let pin: String = (0..length.digits())
                .map(|_| char::from(b'0' + digits.next_digit()))
                .collect();
            if pattern::is_sequential(&pin) {
                continue;
            }
            if pattern::has_too_many_repeats(&pin) {
                continue;
            }
            if self.banned.contains(pin.as_str()) {
                continue;
            }
            return Ok(pin);
        }
        Err(CofferError::GenerationExhausted(self.max_attempts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    /// Replays a fixed digit sequence, cycling when exhausted.
    struct ScriptedDigits {
        digits: Vec<u8>,
        pos: usize,
    }

    impl ScriptedDigits {
        fn new(digits: &[u8]) -> Self {
            Self {
                digits: digits.to_vec(),
                pos: 0,
            }
        }
    }

    impl DigitSource for ScriptedDigits {
        fn next_digit(&mut self) -> u8 {
            let d = self.digits[self.pos % self.digits.len()];
            self.pos += 1;
            d
        }
    }

    #[test]
    fn test_generated_pins_pass_all_checks() {
        let generator = PinGenerator::default();
        let mut source = RngDigits(ChaCha8Rng::seed_from_u64(42));

        for _ in 0..10_000 {
            let pin = generator.generate(PinLength::Four, &mut source).unwrap();
            assert_eq!(pin.len(), 4);
            assert!(pin.bytes().all(|b| b.is_ascii_digit()));
            assert!(!pattern::is_sequential(&pin));
            assert!(!pattern::has_too_many_repeats(&pin));
            assert!(!BANNED_PINS.contains(&pin.as_str()));
        }
    }

    #[test]
    fn test_six_digit_generation() {
        let generator = PinGenerator::default();
        let mut source = RngDigits(ChaCha8Rng::seed_from_u64(7));

        let pin = generator.generate(PinLength::Six, &mut source).unwrap();
        assert_eq!(pin.len(), 6);
    }

    #[test]
    fn test_rejects_scripted_weak_candidates() {
        // First draw "1234" (sequential and banned), then "1112"
        // (repeat-heavy), then the acceptable "5867".
        let generator = PinGenerator::default();
        let mut source = ScriptedDigits::new(&[1, 2, 3, 4, 1, 1, 1, 2, 5, 8, 6, 7]);

        let pin = generator.generate(PinLength::Four, &mut source).unwrap();
        assert_eq!(pin, "5867");
        assert_eq!(source.pos, 12);
    }

    #[test]
    fn test_extra_banned_pins_are_rejected() {
        let generator = PinGenerator::new(["5867".to_string()], MAX_GENERATION_ATTEMPTS);
        let mut source = ScriptedDigits::new(&[5, 8, 6, 7, 9, 0, 2, 7]);

        let pin = generator.generate(PinLength::Four, &mut source).unwrap();
        assert_eq!(pin, "9027");
    }

    #[test]
    fn test_exhaustion_fails_loudly() {
        // Every draw is banned, so the ceiling must trip.
        let generator = PinGenerator::new(std::iter::empty(), 16);
        let mut source = ScriptedDigits::new(&[1, 2, 3, 4]);

        let err = generator
            .generate(PinLength::Four, &mut source)
            .unwrap_err();
        assert!(matches!(err, CofferError::GenerationExhausted(16)));
    }

    #[test]
    fn test_pin_length_digit_counts() {
        assert_eq!(PinLength::Four.digits(), 4);
        assert_eq!(PinLength::Six.digits(), 6);
        assert_eq!(PinLength::from_digits(4), Some(PinLength::Four));
        assert_eq!(PinLength::from_digits(6), Some(PinLength::Six));
        assert_eq!(PinLength::from_digits(5), None);
    }
}
