//! Hostname-keyed collection of extracted device records.
//!
//! Hostnames must be unique across the input set. A second record with a
//! known hostname is a named conflict, never a silent overwrite.

use std::collections::HashMap;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::extract::DeviceRecord;

/// Errors raised while assembling the inventory
#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    #[error("Duplicate hostname '{hostname}': already loaded from {existing_origin}, rejected {rejected_origin}")]
    DuplicateHostname {
        hostname: String,
        existing_origin: String,
        rejected_origin: String,
    },
}

/// What to do when two records resolve to the same hostname
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Stop at the first conflict
    #[default]
    Reject,
    /// Keep the first record, log and drop later ones
    KeepFirst,
}

/// Ordered device records keyed by hostname
#[derive(Debug, Clone, Default)]
pub struct DeviceInventory {
    records: Vec<DeviceRecord>,
    by_hostname: HashMap<String, usize>,
}

impl DeviceInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an inventory from records in order, applying the duplicate policy
    pub fn from_records<I>(records: I, policy: DuplicatePolicy) -> Result<Self, InventoryError>
    where
        I: IntoIterator<Item = DeviceRecord>,
    {
        let mut inventory = Self::new();

        for record in records {
            match inventory.insert(record) {
                Ok(()) => {}
                Err(err) if policy == DuplicatePolicy::KeepFirst => {
                    warn!("{}", err);
                }
                Err(err) => return Err(err),
            }
        }

        Ok(inventory)
    }

    /// Add a record; rejects a hostname that is already present
    pub fn insert(&mut self, record: DeviceRecord) -> Result<(), InventoryError> {
        if let Some(&position) = self.by_hostname.get(&record.hostname) {
            return Err(InventoryError::DuplicateHostname {
                hostname: record.hostname,
                existing_origin: self.records[position].origin.clone(),
                rejected_origin: record.origin,
            });
        }

        self.by_hostname.insert(record.hostname.clone(), self.records.len());
        self.records.push(record);
        Ok(())
    }

    pub fn get(&self, hostname: &str) -> Option<&DeviceRecord> {
        self.by_hostname.get(hostname).map(|&position| &self.records[position])
    }

    pub fn contains(&self, hostname: &str) -> bool {
        self.by_hostname.contains_key(hostname)
    }

    /// Records in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, DeviceRecord> {
        self.records.iter()
    }

    pub fn hostnames(&self) -> impl Iterator<Item = &str> + '_ {
        self.records.iter().map(|record| record.hostname.as_str())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a DeviceInventory {
    type Item = &'a DeviceRecord;
    type IntoIter = std::slice::Iter<'a, DeviceRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
