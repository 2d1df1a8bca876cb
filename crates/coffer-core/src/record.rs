//! On-disk record codec
//!
//! One account per line. The pipe-delimited plaintext is passed through
//! the obfuscator as a whole, then hex-armored so the framing survives
//! transform output that happens to contain newline bytes.
//!
//! Plaintext layout, fixed field order:
//! `username|pin|balance(2-decimal)|wrong_attempts|locked(1-or-0)`

use crate::account::{self, Account, FIELD_DELIMITER};
use crate::error::{CofferError, Result};
use crate::obfuscate::Obfuscator;

/// Serialize an account into one obfuscated, hex-armored line
pub fn encode_record(account: &Account, obfuscator: &dyn Obfuscator) -> String {
    let plain = format!(
        "{}{d}{}{d}{}{d}{}{d}{}",
        account.username,
        account.pin,
        account::format_balance(account.balance_cents),
        account.wrong_attempts,
        if account.locked { "1" } else { "0" },
        d = FIELD_DELIMITER,
    );
    hex::encode(obfuscator.apply(plain.as_bytes()))
}

/// Decode one line back into an account.
///
/// Fails with [`CofferError::MalformedRecord`] rather than panicking;
/// bulk loads skip such lines individually.
pub fn decode_record(line: &str, obfuscator: &dyn Obfuscator) -> Result<Account> {
    let raw = hex::decode(line.trim())
        .map_err(|e| CofferError::MalformedRecord(format!("bad hex armor: {}", e)))?;
    let plain = String::from_utf8(obfuscator.apply(&raw))
        .map_err(|_| CofferError::MalformedRecord("record is not valid UTF-8".into()))?;

    let fields: Vec<&str> = plain.split(FIELD_DELIMITER).collect();
    if fields.len() < 5 {
        return Err(CofferError::MalformedRecord(format!(
            "expected 5 fields, found {}",
            fields.len()
        )));
    }

    account::validate_username(fields[0])
        .map_err(|e| CofferError::MalformedRecord(e.to_string()))?;
    let balance_cents = account::parse_balance(fields[2])
        .map_err(|_| CofferError::MalformedRecord(format!("bad balance field: {:?}", fields[2])))?;
    let wrong_attempts: u32 = fields[3].parse().map_err(|_| {
        CofferError::MalformedRecord(format!("bad attempts field: {:?}", fields[3]))
    })?;

    Ok(Account {
        username: fields[0].to_string(),
        pin: fields[1].to_string(),
        balance_cents,
        wrong_attempts,
        locked: fields[4] == "1",
    })
}
