//! Account store
//!
//! Owns the in-memory username → account map. The backing file is read
//! once at construction and rewritten in full after every mutation; there
//! is no append or partial-update path. A missing file means an empty
//! store.

use std::collections::HashMap;
use std::path::PathBuf;

use tracing::{debug, warn};

use coffer_core::{decode_record, encode_record, Account, Obfuscator};

use crate::error::{Result, TellerError};

/// File-backed account store
pub struct AccountStore {
    path: PathBuf,
    obfuscator: Box<dyn Obfuscator>,
    accounts: HashMap<String, Account>,
}

impl AccountStore {
    /// Open the store, loading every decodable record from the backing
    /// file. Malformed lines are logged and skipped individually; one bad
    /// line never aborts the load.
    pub fn open(path: PathBuf, obfuscator: Box<dyn Obfuscator>) -> Result<Self> {
        let mut accounts = HashMap::new();

        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            for (index, line) in content.lines().enumerate() {
                if line.trim().is_empty() {
                    continue;
                }
                match decode_record(line, obfuscator.as_ref()) {
                    Ok(account) => {
                        accounts.insert(account.username.clone(), account);
                    }
                    Err(err) => {
                        warn!(line = index + 1, %err, "skipping malformed record");
                    }
                }
            }
            debug!(count = accounts.len(), path = %path.display(), "loaded account store");
        } else {
            debug!(path = %path.display(), "no store file, starting empty");
        }

        Ok(Self {
            path,
            obfuscator,
            accounts,
        })
    }

    /// Membership test
    pub fn exists(&self, username: &str) -> bool {
        self.accounts.contains_key(username)
    }

    /// Current in-memory record for a username
    pub fn get(&self, username: &str) -> Result<&Account> {
        self.accounts
            .get(username)
            .ok_or_else(|| TellerError::AccountNotFound(username.to_string()))
    }

    /// Insert a new account and persist. Fails if the username is taken.
    pub fn add(&mut self, account: Account) -> Result<()> {
        if self.exists(&account.username) {
            return Err(TellerError::AccountExists(account.username));
        }
        self.accounts.insert(account.username.clone(), account);
        self.persist()
    }

    /// Replace an existing account and persist. Fails if the username is
    /// unknown.
    pub fn update(&mut self, account: Account) -> Result<()> {
        if !self.exists(&account.username) {
            return Err(TellerError::AccountNotFound(account.username));
        }
        self.accounts.insert(account.username.clone(), account);
        self.persist()
    }

    /// All accounts, iteration order unspecified
    pub fn list(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    /// Number of accounts in the store
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether the store holds no accounts
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Path of the backing file
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Rewrite the backing file from scratch, one record per line.
    ///
    /// Written to a temp file first, then renamed over the original, so a
    /// crash mid-write leaves the previous contents intact.
    pub fn persist(&self) -> Result<()> {
        let mut content = String::new();
        for account in self.accounts.values() {
            content.push_str(&encode_record(account, self.obfuscator.as_ref()));
            content.push('\n');
        }

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let temp_path = self.path.with_extension("db.tmp");
        std::fs::write(&temp_path, &content)?;
        std::fs::rename(&temp_path, &self.path)?;

        Ok(())
    }
}
