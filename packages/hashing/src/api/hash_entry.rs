//! Entry point for the fluent hashing API

use super::fnv1a_builder::Fnv1aBuilder;
use crate::fnv1a::Variant;

/// Entry point for hash operations
pub struct Hash;

impl Hash {
    /// FNV-1a, full length (`get_hash_bugfree`)
    #[must_use]
    pub fn fnv1a() -> Fnv1aBuilder {
        Fnv1aBuilder::new()
    }

    /// FNV-1a truncating at the first zero byte (`get_hash`)
    #[must_use]
    pub fn fnv1a_legacy() -> Fnv1aBuilder {
        Fnv1aBuilder::new().variant(Variant::LegacyTruncating)
    }

    /// FNV-1a as used for beansdb keys (`get_hash_beansdb`)
    #[must_use]
    pub fn fnv1a_beansdb() -> Fnv1aBuilder {
        Fnv1aBuilder::new().variant(Variant::Beansdb)
    }
}
