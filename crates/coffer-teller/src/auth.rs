//! Authentication and lockout
//!
//! Wraps the account store with the bounded-attempts state machine. Every
//! transition that touches `wrong_attempts`, `locked`, or `pin` goes
//! through the store unconditionally, failure paths included, so lockout
//! state survives a process restart.

use tracing::{info, warn};

use coffer_core::{
    account::validate_username, pattern, Account, CofferError, DigitSource, PinGenerator,
    PinLength,
};

use crate::error::{Result, TellerError};
use crate::lockout::LockoutPolicy;
use crate::store::AccountStore;

/// Read-only row for the admin listing
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccountSummary {
    pub username: String,
    pub balance_cents: u64,
    pub locked: bool,
}

/// The teller service: account issuance, authentication, and balance
/// operations over one account store
pub struct Teller {
    store: AccountStore,
    policy: LockoutPolicy,
    generator: PinGenerator,
    opening_balance_cents: u64,
}

impl Teller {
    /// Create a teller over an opened store
    pub fn new(
        store: AccountStore,
        policy: LockoutPolicy,
        generator: PinGenerator,
        opening_balance_cents: u64,
    ) -> Self {
        Self {
            store,
            policy,
            generator,
            opening_balance_cents,
        }
    }

    /// The underlying store
    pub fn store(&self) -> &AccountStore {
        &self.store
    }

    /// Create an account with a freshly generated PIN and the opening
    /// balance. The generated PIN is returned inside the account and is
    /// the only time it leaves the teller in cleartext.
    pub fn create_account(
        &mut self,
        username: &str,
        length: PinLength,
        digits: &mut dyn DigitSource,
    ) -> Result<Account> {
        validate_username(username).map_err(TellerError::Core)?;
        if self.store.exists(username) {
            return Err(TellerError::AccountExists(username.to_string()));
        }

        let pin = self.generator.generate(length, digits)?;
        let account = Account::new(username.to_string(), pin, self.opening_balance_cents)?;
        self.store.add(account.clone())?;
        info!(username, "account created");
        Ok(account)
    }

    /// Verify a candidate PIN.
    ///
    /// A locked account is rejected immediately: no comparison is made and
    /// no counter is touched, so retries cannot consume anything. A wrong
    /// PIN increments the counter and locks the account at the threshold;
    /// both outcomes are persisted before this returns.
    pub fn authenticate(&mut self, username: &str, candidate: &str) -> Result<()> {
        let mut account = self.store.get(username)?.clone();

        if account.locked {
            return Err(TellerError::Locked(username.to_string()));
        }

        if candidate == account.pin {
            account.wrong_attempts = 0;
            self.store.update(account)?;
            Ok(())
        } else {
            account.wrong_attempts += 1;
            let now_locked = self.policy.is_locked(account.wrong_attempts);
            account.locked = now_locked;
            let remaining = self.policy.attempts_remaining(account.wrong_attempts);
            self.store.update(account)?;

            if now_locked {
                warn!(username, "account locked after too many wrong attempts");
                Err(TellerError::Locked(username.to_string()))
            } else {
                Err(TellerError::IncorrectPin(remaining))
            }
        }
    }

    /// Change an account's PIN.
    ///
    /// Requires passing authentication with the current PIN first, so a
    /// locked account can never reach the change. The new PIN must keep
    /// the account's fixed length, be all digits, and pass both pattern
    /// checks. The banned set is not re-applied on manual change.
    pub fn change_pin(&mut self, username: &str, current_pin: &str, new_pin: &str) -> Result<()> {
        self.authenticate(username, current_pin)?;

        let mut account = self.store.get(username)?.clone();
        if new_pin.len() != account.pin_length() {
            return Err(CofferError::WrongPinLength {
                expected: account.pin_length(),
            }
            .into());
        }
        if !new_pin.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CofferError::InvalidPinFormat.into());
        }
        if let Some(reason) = pattern::weakness(new_pin) {
            return Err(CofferError::WeakPin(reason).into());
        }

        account.pin = new_pin.to_string();
        account.wrong_attempts = 0;
        self.store.update(account)?;
        info!(username, "PIN changed");
        Ok(())
    }

    /// Authenticate, then return the balance in cents
    pub fn balance(&mut self, username: &str, pin: &str) -> Result<u64> {
        self.authenticate(username, pin)?;
        Ok(self.store.get(username)?.balance_cents)
    }

    /// Authenticate, then add to the balance. Returns the new balance.
    pub fn deposit(&mut self, username: &str, pin: &str, amount_cents: u64) -> Result<u64> {
        self.authenticate(username, pin)?;
        if amount_cents == 0 {
            return Err(CofferError::InvalidAmount("0.00".into()).into());
        }

        let mut account = self.store.get(username)?.clone();
        account.balance_cents = account
            .balance_cents
            .checked_add(amount_cents)
            .ok_or_else(|| CofferError::InvalidAmount("balance overflow".into()))?;
        let new_balance = account.balance_cents;
        self.store.update(account)?;
        Ok(new_balance)
    }

    /// Authenticate, then withdraw from the balance. Returns the new
    /// balance. Overdrafts are rejected before any mutation.
    pub fn withdraw(&mut self, username: &str, pin: &str, amount_cents: u64) -> Result<u64> {
        self.authenticate(username, pin)?;
        if amount_cents == 0 {
            return Err(CofferError::InvalidAmount("0.00".into()).into());
        }

        let mut account = self.store.get(username)?.clone();
        if amount_cents > account.balance_cents {
            return Err(TellerError::InsufficientFunds);
        }
        account.balance_cents -= amount_cents;
        let new_balance = account.balance_cents;
        self.store.update(account)?;
        Ok(new_balance)
    }

    /// Admin view of every account, sorted by username. PINs never appear
    /// here.
    pub fn list_accounts(&self) -> Vec<AccountSummary> {
        let mut rows: Vec<AccountSummary> = self
            .store
            .list()
            .map(|a| AccountSummary {
                username: a.username.clone(),
                balance_cents: a.balance_cents,
                locked: a.locked,
            })
            .collect();
        rows.sort_by(|a, b| a.username.cmp(&b.username));
        rows
    }
}
