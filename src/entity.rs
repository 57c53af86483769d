//! Read-only views of host economy records.
//!
//! The matcher and resolver never own or mutate these; they only read the id
//! and display name from whatever snapshot the caller hands them.

use serde::{Deserialize, Serialize};

/// Anything the resolver can look up: a host-assigned id plus a display name.
pub trait Entity {
    /// Host-assigned, immutable identifier.
    fn id(&self) -> i64;

    /// Display name. `None` (or an empty string) means the host has no name
    /// for this record; such records only resolve by id.
    fn name(&self) -> Option<&str>;

    /// Name for chat output, falling back to the id.
    fn display_name(&self) -> String {
        match self.name() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("#{}", self.id()),
        }
    }
}

/// A bank account as listed by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountRecord {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
}

impl AccountRecord {
    pub fn new(id: i64, name: &str) -> Self {
        Self {
            id,
            name: Some(name.to_string()),
        }
    }
}

impl Entity for AccountRecord {
    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// A currency as listed by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyRecord {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
}

impl CurrencyRecord {
    pub fn new(id: i64, name: &str) -> Self {
        Self {
            id,
            name: Some(name.to_string()),
        }
    }
}

impl Entity for CurrencyRecord {
    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl<E: Entity + ?Sized> Entity for &E {
    fn id(&self) -> i64 {
        (**self).id()
    }

    fn name(&self) -> Option<&str> {
        (**self).name()
    }
}

/// Name of an entity if it is present and non-empty.
pub(crate) fn usable_name<E: Entity + ?Sized>(entity: &E) -> Option<&str> {
    entity.name().filter(|name| !name.is_empty())
}
