//! Coffer Core - PIN strength rules, generation, and record codecs
//!
//! This crate provides the foundational pieces of the Coffer PIN vault:
//! - digit-pattern weakness checks
//! - rejection-sampling PIN generation
//! - the reversible at-rest obfuscation transform
//! - the line-oriented account record codec

pub mod account;
pub mod error;
pub mod generator;
pub mod obfuscate;
pub mod pattern;
pub mod record;

pub use account::{Account, FIELD_DELIMITER};
pub use error::{CofferError, Result};
pub use generator::{DigitSource, PinGenerator, PinLength, RngDigits, BANNED_PINS};
pub use obfuscate::{Obfuscator, XorObfuscator, DEFAULT_OBFUSCATION_KEY};
pub use record::{decode_record, encode_record};

/// Consecutive failed authentications before an account locks
pub const MAX_WRONG_ATTEMPTS: u32 = 3;

/// Opening balance for newly created accounts, in cents
pub const DEFAULT_OPENING_BALANCE_CENTS: u64 = 100_000;

/// Retry ceiling for PIN generation
pub const MAX_GENERATION_ATTEMPTS: u32 = 10_000;
