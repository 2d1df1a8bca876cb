//! Lockout policy for brute-force protection
//!
//! Counts consecutive failures per account; reaching the threshold locks
//! the account permanently within the core. There is no unlock path;
//! recovery is an external administrative concern.

use coffer_core::MAX_WRONG_ATTEMPTS;

/// Bounded-attempts lockout policy
#[derive(Clone, Debug)]
pub struct LockoutPolicy {
    /// Failures at which the account locks
    pub max_attempts: u32,
}

impl Default for LockoutPolicy {
    fn default() -> Self {
        Self {
            max_attempts: MAX_WRONG_ATTEMPTS,
        }
    }
}

impl LockoutPolicy {
    /// Create a policy with a custom threshold
    pub fn new(max_attempts: u32) -> Self {
        Self { max_attempts }
    }

    /// Check whether the given failure count locks the account
    pub fn is_locked(&self, failed_attempts: u32) -> bool {
        failed_attempts >= self.max_attempts
    }

    /// Attempts left before the account locks
    pub fn attempts_remaining(&self, failed_attempts: u32) -> u32 {
        self.max_attempts.saturating_sub(failed_attempts)
    }

    /// Human-readable description of the current state
    pub fn describe(&self, failed_attempts: u32) -> String {
        if self.is_locked(failed_attempts) {
            "Locked".to_string()
        } else {
            format!(
                "{} attempts remaining",
                self.attempts_remaining(failed_attempts)
            )
        }
    }
}
