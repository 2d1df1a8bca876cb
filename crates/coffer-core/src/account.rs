//! Account records
//!
//! The durable unit of identity and credential state. Balances are held
//! in minor units (cents) so the 2-decimal on-disk rendering round-trips
//! exactly.

use crate::error::{CofferError, Result};

/// Field delimiter used by the on-disk record format.
/// Usernames must not contain it.
pub const FIELD_DELIMITER: char = '|';

/// One account in the store
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Account {
    /// Unique key into the store
    pub username: String,
    /// Fixed-length digit string; cleartext in memory only
    pub pin: String,
    /// Balance in cents
    pub balance_cents: u64,
    /// Consecutive failed authentications since the last success or PIN change
    pub wrong_attempts: u32,
    /// Terminal within the core; no unlock operation exists
    pub locked: bool,
}

impl Account {
    /// Create a fresh, unlocked account
    pub fn new(username: String, pin: String, balance_cents: u64) -> Result<Self> {
        validate_username(&username)?;
        Ok(Self {
            username,
            pin,
            balance_cents,
            wrong_attempts: 0,
            locked: false,
        })
    }

    /// Digit count of this account's PIN, fixed at creation
    pub fn pin_length(&self) -> usize {
        self.pin.len()
    }
}

/// Check that a username is non-empty and free of the record delimiter
pub fn validate_username(username: &str) -> Result<()> {
    if username.is_empty() {
        return Err(CofferError::InvalidUsername("must not be empty".into()));
    }
    if username.contains(FIELD_DELIMITER) {
        return Err(CofferError::InvalidUsername(format!(
            "must not contain '{}'",
            FIELD_DELIMITER
        )));
    }
    Ok(())
}

/// Render cents as a 2-decimal amount string
pub fn format_balance(cents: u64) -> String {
    format!("{}.{:02}", cents / 100, cents % 100)
}

/// Parse a non-negative amount string ("1000", "1000.5", "1000.50") into cents
pub fn parse_balance(s: &str) -> Result<u64> {
    let invalid = || CofferError::InvalidAmount(s.to_string());

    let (whole, frac) = match s.split_once('.') {
        Some((w, f)) => (w, f),
        None => (s, ""),
    };
    if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    if frac.len() > 2 || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let whole: u64 = whole.parse().map_err(|_| invalid())?;
    let frac_cents = match frac.len() {
        0 => 0,
        1 => frac.parse::<u64>().map_err(|_| invalid())? * 10,
        _ => frac.parse::<u64>().map_err(|_| invalid())?,
    };

    whole
        .checked_mul(100)
        .and_then(|c| c.checked_add(frac_cents))
        .ok_or_else(invalid)
}
