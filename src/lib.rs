//! # EconAdmin - Economy Admin Toolkit for Game Servers
//!
//! EconAdmin gives server administrators chat commands for inspecting and
//! repairing an in-game economy: listing accounts and currencies, adjusting or
//! wiping balances, purging whole families of currencies by wildcard, and
//! minting or gifting a server-wide global currency.
//!
//! ## Features
//!
//! - **Wildcard Selection**: `*Credit`, `Player*`, `Old*Coin`, `*Test*` with word-boundary aware prefix/suffix rules
//! - **Forgiving Lookups**: accounts and currencies resolve by id, exact name, or a unique name fragment
//! - **Explicit Ambiguity**: several matches produce a capped candidate list instead of a guess
//! - **Host Agnostic**: all economy state sits behind the [`host::EconomyHost`] trait
//! - **Global Currency**: status, gifts and treasury minting for one configured currency
//! - **Audit Logging**: every balance change is logged under the `audit` target
//!
//! ## Quick Start
//!
//! ```rust
//! use econadmin::commands::AdminProcessor;
//! use econadmin::config::AdminConfig;
//! use econadmin::host::MemoryHost;
//!
//! let mut host = MemoryHost::new()
//!     .with_currency(1, "Gold")
//!     .with_currency(2, "Old Credit")
//!     .with_account(10, "Player One")
//!     .with_balance(10, 2, 40.0);
//!
//! let processor = AdminProcessor::new(AdminConfig::default());
//! let lines = processor.handle_line(&mut host, "/ea-purge *Credit").unwrap();
//! assert!(lines.iter().any(|l| l.contains("Old Credit: 40.00 removed from 1 accounts")));
//! ```
//!
//! ## Module Organization
//!
//! - [`matcher`] - wildcard pattern classification and matching
//! - [`resolver`] - token to entity resolution (id, exact, substring)
//! - [`entity`] - account and currency records the core reads
//! - [`commands`] - admin command parsing and execution
//! - [`host`] - host economy trait and the in-memory host
//! - [`config`] - TOML configuration
//! - [`logutil`] - log sanitizing helpers
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │ Admin Commands  │ ← parsing, replies, audit logging
//! └─────────────────┘
//!          │
//! ┌─────────────────┐
//! │ Matcher /       │ ← pure name matching and resolution
//! │ Resolver        │
//! └─────────────────┘
//!          │
//! ┌─────────────────┐
//! │ Economy Host    │ ← accounts, currencies, balances
//! └─────────────────┘
//! ```

pub mod commands;
pub mod config;
pub mod entity;
pub mod error;
pub mod host;
pub mod logutil;
pub mod matcher;
pub mod resolver;

pub use commands::{AdminCommand, AdminProcessor};
pub use entity::{AccountRecord, CurrencyRecord, Entity};
pub use error::EconAdminError;
pub use host::{EconomyHost, EconomySnapshot, MemoryHost};
pub use matcher::{match_all, matches, select_by_pattern, PatternShape};
pub use resolver::{find_by_name, resolve, Resolution, AMBIGUOUS_PREVIEW_LIMIT};
