//! Account-related types for the game store engine
//!
//! This module defines the Account structure representing a registered user
//! and their stored balance.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Account identifier
///
/// Opaque id assigned by the account store on registration.
pub type AccountId = u32;

/// A registered user account
///
/// Holds the identity fields and the spendable balance. The balance is the
/// only field mutated by the transaction core (via debit/credit); everything
/// else changes only through explicit profile edits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Store-assigned account id
    pub id: AccountId,

    /// Unique login name
    pub username: String,

    /// Unique contact email
    pub email: String,

    /// Opaque credential hash
    ///
    /// The hashing scheme is owned by the client; the engine only compares
    /// stored values for equality.
    pub password_hash: String,

    /// Spendable balance
    ///
    /// Invariant: never negative at any observable rest point.
    pub balance: Decimal,
}

impl Account {
    /// Create an account with a zero balance
    ///
    /// The id is left as 0 until the store assigns one on insert.
    pub fn new(username: &str, email: &str, password_hash: &str) -> Self {
        Account {
            id: 0,
            username: username.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            balance: Decimal::ZERO,
        }
    }

    /// Same as [`Account::new`] but with a starting balance
    pub fn with_balance(
        username: &str,
        email: &str,
        password_hash: &str,
        balance: Decimal,
    ) -> Self {
        Account {
            balance,
            ..Account::new(username, email, password_hash)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_new_account_has_zero_balance_and_no_id() {
        let account = Account::new("ada", "ada@example.com", "c0ffee");

        assert_eq!(account.id, 0);
        assert_eq!(account.username, "ada");
        assert_eq!(account.email, "ada@example.com");
        assert_eq!(account.password_hash, "c0ffee");
        assert_eq!(account.balance, Decimal::ZERO);
    }

    #[test]
    fn test_with_balance_sets_starting_balance() {
        let account = Account::with_balance("ada", "ada@example.com", "c0ffee", dec!(50.00));
        assert_eq!(account.balance, dec!(50.00));
    }
}
