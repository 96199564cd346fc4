//! Hash result type with sign conventions and encodings

use crate::fnv1a::Variant;
use serde::{Deserialize, Serialize};

/// Result of a 32-bit hash operation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HashResult {
    value: u32,
    variant: Variant,
}

impl HashResult {
    /// Wrap a raw hash value computed by `variant`
    #[must_use]
    pub fn new(value: u32, variant: Variant) -> Self {
        Self { value, variant }
    }

    /// Unsigned value
    #[must_use]
    pub fn as_u32(&self) -> u32 {
        self.value
    }

    /// Same bits as a signed value
    #[must_use]
    pub fn as_i32(&self) -> i32 {
        self.value as i32
    }

    /// Variant that produced this hash
    #[must_use]
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Value as the variant's entry point hands it to a host runtime
    #[must_use]
    pub fn to_host_int(&self) -> i64 {
        match self.variant {
            Variant::LegacyTruncating | Variant::Bugfree => i64::from(self.as_i32()),
            Variant::Beansdb => i64::from(self.value),
        }
    }

    /// Big-endian bytes
    #[must_use]
    pub fn to_bytes(&self) -> [u8; 4] {
        self.value.to_be_bytes()
    }

    /// Eight lowercase hex digits
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }
}

impl From<HashResult> for u32 {
    fn from(result: HashResult) -> Self {
        result.value
    }
}

impl std::fmt::Display for HashResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
