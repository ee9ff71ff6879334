//! Process-wide status registry
//!
//! Maps integer codes to [`Status`] instances. The registry starts with the
//! well-known statuses and grows monotonically as custom codes are requested.
//! Entries are never removed.

use std::sync::LazyLock;

use dashmap::DashMap;

use crate::error::{Error, Result};
use crate::status::Status;

static GLOBAL: LazyLock<StatusRegistry> = LazyLock::new(StatusRegistry::with_well_known);

/// Concurrent cache of statuses keyed by code
#[derive(Debug, Default)]
pub struct StatusRegistry {
    entries: DashMap<u32, Status>,
}

impl StatusRegistry {
    /// The process-wide registry
    pub fn global() -> &'static StatusRegistry {
        &GLOBAL
    }

    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry pre-populated with [`Status::WELL_KNOWN`]
    pub fn with_well_known() -> Self {
        let registry = Self::new();
        for status in Status::WELL_KNOWN {
            registry.entries.insert(status.code(), status.clone());
        }
        registry
    }

    /// Look up a status without registering anything
    pub fn get(&self, code: u32) -> Option<Status> {
        self.entries.get(&code).map(|entry| entry.value().clone())
    }

    /// Look up a status, registering a generic custom entry when the code is new.
    pub fn resolve(&self, code: u32) -> Result<Status> {
        self.get_or_register(code, || format!("Status {code}"))
    }

    /// Look up a status, registering one with the given description when the
    /// code is new.
    ///
    /// Insertion is atomic per code: concurrent first requests for the same
    /// code all observe the single entry that won.
    pub fn get_or_register<F, D>(&self, code: u32, description: F) -> Result<Status>
    where
        F: FnOnce() -> D,
        D: Into<std::borrow::Cow<'static, str>>,
    {
        if code == 0 {
            return Err(Error::InvalidStatusCode { code });
        }
        if let Some(existing) = self.get(code) {
            return Ok(existing);
        }
        let entry = self.entries.entry(code).or_insert_with(|| {
            log::trace!("registering custom status {code}");
            Status::custom(code, description()).unwrap_or(Status::ERROR)
        });
        Ok(entry.value().clone())
    }

    /// Number of registered statuses
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Snapshot of every registered status, sorted by code
    pub fn snapshot(&self) -> Vec<Status> {
        let mut statuses: Vec<Status> = self
            .entries
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        statuses.sort_by_key(Status::code);
        statuses
    }
}
