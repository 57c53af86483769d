//! # Host Economy Interface
//!
//! The game server owns accounts, currencies and balances. Admin commands see
//! it only through [`EconomyHost`]: fresh listings per command plus balance
//! queries and a single mutation, `add_currency`.
//!
//! [`MemoryHost`] is an in-memory implementation seeded from a JSON
//! [`EconomySnapshot`]. It backs the CLI and the test suite and never writes
//! anything back to disk.
//!
//! ## Snapshot Format
//!
//! ```json
//! {
//!   "currencies": [{ "id": 1, "name": "Gold" }],
//!   "accounts": [
//!     { "id": 10, "name": "Player One", "holdings": { "1": 250.0 } }
//!   ]
//! }
//! ```

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::entity::{AccountRecord, CurrencyRecord};
use crate::error::EconAdminError;

/// Query/mutate operations the admin toolkit needs from the game server.
pub trait EconomyHost {
    /// All accounts in host listing order.
    fn accounts(&self) -> Vec<AccountRecord>;

    /// All currencies in host listing order.
    fn currencies(&self) -> Vec<CurrencyRecord>;

    /// Balance of one currency held by one account (0 when never held).
    fn balance(&self, account_id: i64, currency_id: i64) -> Result<f64, EconAdminError>;

    /// Every `(currency_id, amount)` held by an account, zero balances included.
    fn holdings(&self, account_id: i64) -> Result<Vec<(i64, f64)>, EconAdminError>;

    /// Add `amount` (negative to remove) of a currency to an account.
    fn add_currency(
        &mut self,
        account_id: i64,
        currency_id: i64,
        amount: f64,
    ) -> Result<(), EconAdminError>;
}

/// Serialized economy state used to seed a [`MemoryHost`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EconomySnapshot {
    #[serde(default)]
    pub currencies: Vec<CurrencyRecord>,
    #[serde(default)]
    pub accounts: Vec<AccountSnapshot>,
}

/// One account and its balances keyed by currency id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountSnapshot {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub holdings: BTreeMap<i64, f64>,
}

/// In-memory economy host.
#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    accounts: Vec<AccountRecord>,
    currencies: Vec<CurrencyRecord>,
    balances: HashMap<i64, BTreeMap<i64, f64>>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a host from a snapshot, keeping listing order.
    pub fn from_snapshot(snapshot: EconomySnapshot) -> Self {
        let mut host = MemoryHost {
            currencies: snapshot.currencies,
            ..Default::default()
        };
        for account in snapshot.accounts {
            host.accounts.push(AccountRecord {
                id: account.id,
                name: account.name,
            });
            host.balances.insert(account.id, account.holdings);
        }
        host
    }

    /// Load a JSON snapshot from disk.
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self, EconAdminError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).await?;
        let snapshot: EconomySnapshot = serde_json::from_str(&content)?;
        info!(
            "Loaded economy snapshot {} ({} accounts, {} currencies)",
            path.display(),
            snapshot.accounts.len(),
            snapshot.currencies.len()
        );
        Ok(Self::from_snapshot(snapshot))
    }

    /// Register a currency (test and seeding helper).
    pub fn with_currency(mut self, id: i64, name: &str) -> Self {
        self.currencies.push(CurrencyRecord::new(id, name));
        self
    }

    /// Register an account with no holdings (test and seeding helper).
    pub fn with_account(mut self, id: i64, name: &str) -> Self {
        self.accounts.push(AccountRecord::new(id, name));
        self.balances.entry(id).or_default();
        self
    }

    /// Seed a balance (test and seeding helper).
    pub fn with_balance(mut self, account_id: i64, currency_id: i64, amount: f64) -> Self {
        self.balances
            .entry(account_id)
            .or_default()
            .insert(currency_id, amount);
        self
    }

    fn ensure_account(&self, account_id: i64) -> Result<(), EconAdminError> {
        if self.accounts.iter().any(|a| a.id == account_id) {
            Ok(())
        } else {
            Err(EconAdminError::UnknownAccount(account_id))
        }
    }

    fn ensure_currency(&self, currency_id: i64) -> Result<(), EconAdminError> {
        if self.currencies.iter().any(|c| c.id == currency_id) {
            Ok(())
        } else {
            Err(EconAdminError::UnknownCurrency(currency_id))
        }
    }
}

impl EconomyHost for MemoryHost {
    fn accounts(&self) -> Vec<AccountRecord> {
        self.accounts.clone()
    }

    fn currencies(&self) -> Vec<CurrencyRecord> {
        self.currencies.clone()
    }

    fn balance(&self, account_id: i64, currency_id: i64) -> Result<f64, EconAdminError> {
        self.ensure_account(account_id)?;
        self.ensure_currency(currency_id)?;
        Ok(self
            .balances
            .get(&account_id)
            .and_then(|held| held.get(&currency_id))
            .copied()
            .unwrap_or(0.0))
    }

    fn holdings(&self, account_id: i64) -> Result<Vec<(i64, f64)>, EconAdminError> {
        self.ensure_account(account_id)?;
        Ok(self
            .balances
            .get(&account_id)
            .map(|held| held.iter().map(|(id, amount)| (*id, *amount)).collect())
            .unwrap_or_default())
    }

    fn add_currency(
        &mut self,
        account_id: i64,
        currency_id: i64,
        amount: f64,
    ) -> Result<(), EconAdminError> {
        self.ensure_account(account_id)?;
        self.ensure_currency(currency_id)?;
        if !amount.is_finite() {
            return Err(EconAdminError::InvalidAmount(amount.to_string()));
        }
        let slot = self
            .balances
            .entry(account_id)
            .or_default()
            .entry(currency_id)
            .or_insert(0.0);
        *slot += amount;
        debug!(
            "account {} currency {} adjusted by {:.2} to {:.2}",
            account_id, currency_id, amount, *slot
        );
        Ok(())
    }
}
