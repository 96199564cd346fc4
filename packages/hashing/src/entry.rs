//! Stateless entry-point table for host bindings
//!
//! A host runtime looks functions up by their historical names and receives
//! the value converted to its native signed integer, the same way the
//! original extension module surfaced them.

use crate::fnv1a::{get_hash, get_hash_beansdb, get_hash_bugfree, Variant};
use crate::{HashError, Result};

/// One named hash function as seen by a host runtime
#[derive(Debug, Clone, Copy)]
pub struct EntryPoint {
    /// Exposed name
    pub name: &'static str,
    /// Variant computed by `call`
    pub variant: Variant,
    /// Hash converted to the host's native integer
    pub call: fn(&[u8]) -> i64,
}

impl EntryPoint {
    /// Invoke the entry point
    #[must_use]
    pub fn invoke(&self, key: &[u8]) -> i64 {
        (self.call)(key)
    }
}

fn host_get_hash(key: &[u8]) -> i64 {
    i64::from(get_hash(key))
}

fn host_get_hash_bugfree(key: &[u8]) -> i64 {
    i64::from(get_hash_bugfree(key))
}

fn host_get_hash_beansdb(key: &[u8]) -> i64 {
    i64::from(get_hash_beansdb(key))
}

/// Every exposed entry point, in registration order
pub static ENTRY_POINTS: [EntryPoint; 3] = [
    EntryPoint {
        name: "get_hash",
        variant: Variant::LegacyTruncating,
        call: host_get_hash,
    },
    EntryPoint {
        name: "get_hash_bugfree",
        variant: Variant::Bugfree,
        call: host_get_hash_bugfree,
    },
    EntryPoint {
        name: "get_hash_beansdb",
        variant: Variant::Beansdb,
        call: host_get_hash_beansdb,
    },
];

/// Look an entry point up by its exposed name
#[must_use]
pub fn entry_point(name: &str) -> Option<&'static EntryPoint> {
    ENTRY_POINTS.iter().find(|entry| entry.name == name)
}

/// Call an entry point by name.
///
/// # Errors
///
/// Returns `HashError::UnknownEntryPoint` if no entry point has that name.
pub fn call_entry_point(name: &str, key: &[u8]) -> Result<i64> {
    let entry = entry_point(name).ok_or_else(|| HashError::UnknownEntryPoint(name.to_string()))?;
    tracing::trace!(entry = entry.name, len = key.len(), "calling hash entry point");
    Ok(entry.invoke(key))
}
