//! FNV-1a 32-bit hash engine
//!
//! A single unsigned core, parameterised by a [`LengthPolicy`] and a
//! [`ByteWidening`], backs every variant. The three historical entry points
//! (`get_hash`, `get_hash_bugfree`, `get_hash_beansdb`) are thin wrappers that
//! pick the policy and the sign convention of the returned value.
//!
//! Outputs are persisted in shard maps, so every function here must stay
//! bit-for-bit stable.

use serde::{Deserialize, Serialize};
use std::hash::{BuildHasher, Hasher};

/// FNV-1a 32-bit offset basis
pub const FNV_32_INIT: u32 = 0x811c_9dc5;

/// FNV-1a 32-bit prime
pub const FNV_32_PRIME: u32 = 0x0100_0193;

/// How much of the input is fed to the accumulator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthPolicy {
    /// Hash every byte of the slice, zero bytes included
    #[default]
    HonorExplicitLength,
    /// Stop before the first zero byte, as a C-string scan would
    TruncateAtFirstZero,
}

impl LengthPolicy {
    /// The prefix of `bytes` that this policy hashes
    #[must_use]
    pub fn effective_input(self, bytes: &[u8]) -> &[u8] {
        match self {
            Self::HonorExplicitLength => bytes,
            Self::TruncateAtFirstZero => match bytes.iter().position(|&b| b == 0) {
                Some(end) => &bytes[..end],
                None => bytes,
            },
        }
    }
}

/// How a byte is widened to 32 bits before the XOR step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ByteWidening {
    /// `0x80` becomes `0x0000_0080`
    #[default]
    ZeroExtend,
    /// `0x80` becomes `0xffff_ff80`, matching builds where `char` is signed.
    ///
    /// Only differs from `ZeroExtend` on bytes `>= 0x80`.
    SignExtend,
}

impl ByteWidening {
    /// Widen one input byte
    #[inline]
    #[must_use]
    pub fn widen(self, byte: u8) -> u32 {
        match self {
            Self::ZeroExtend => u32::from(byte),
            Self::SignExtend => i32::from(byte as i8) as u32,
        }
    }
}

/// The three deployed hash profiles
///
/// `LegacyTruncating` reproduces a defect that is baked into persisted shard
/// assignments. It is kept as its own variant so that it can never be
/// "fixed" by toggling an option on the correct algorithm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// `get_hash`: truncates at the first zero byte, surfaced as `i32`
    LegacyTruncating,
    /// `get_hash_bugfree`: full length, surfaced as `i32`
    #[default]
    Bugfree,
    /// `get_hash_beansdb`: full length, surfaced as `u32`.
    ///
    /// Historically documented as buggy; the logic is identical to `Bugfree`.
    Beansdb,
}

impl Variant {
    /// All variants, in entry-point order
    pub const ALL: [Self; 3] = [Self::LegacyTruncating, Self::Bugfree, Self::Beansdb];

    /// Length policy used by this variant
    #[must_use]
    pub fn length_policy(self) -> LengthPolicy {
        match self {
            Self::LegacyTruncating => LengthPolicy::TruncateAtFirstZero,
            Self::Bugfree | Self::Beansdb => LengthPolicy::HonorExplicitLength,
        }
    }

    /// Name of the host-visible entry point for this variant
    #[must_use]
    pub fn entry_name(self) -> &'static str {
        match self {
            Self::LegacyTruncating => "get_hash",
            Self::Bugfree => "get_hash_bugfree",
            Self::Beansdb => "get_hash_beansdb",
        }
    }

    /// Raw unsigned hash of `bytes` under this variant
    #[must_use]
    pub fn hash(self, bytes: &[u8]) -> u32 {
        fnv1a32(bytes, self.length_policy())
    }
}

#[inline]
fn step(h: u32, widened: u32) -> u32 {
    (h ^ widened).wrapping_mul(FNV_32_PRIME)
}

/// FNV-1a over `bytes` with an explicit policy and widening
#[must_use]
pub fn fnv1a32_with(bytes: &[u8], policy: LengthPolicy, widening: ByteWidening) -> u32 {
    policy
        .effective_input(bytes)
        .iter()
        .fold(FNV_32_INIT, |h, &b| step(h, widening.widen(b)))
}

/// FNV-1a over `bytes` with zero-extended bytes
#[must_use]
pub fn fnv1a32(bytes: &[u8], policy: LengthPolicy) -> u32 {
    fnv1a32_with(bytes, policy, ByteWidening::ZeroExtend)
}

/// Legacy entry point. Ignores everything from the first zero byte on.
///
/// Kept for compatibility with existing shard maps; new callers want
/// [`get_hash_bugfree`].
#[must_use]
pub fn get_hash(key: &[u8]) -> i32 {
    Variant::LegacyTruncating.hash(key) as i32
}

/// FNV-1a over the full key, reinterpreted as `i32`
#[must_use]
pub fn get_hash_bugfree(key: &[u8]) -> i32 {
    Variant::Bugfree.hash(key) as i32
}

/// FNV-1a over the full key as used by beansdb for key hashing
#[must_use]
pub fn get_hash_beansdb(key: &[u8]) -> u32 {
    Variant::Beansdb.hash(key)
}

/// Reusable hashing configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Fnv1a {
    policy: LengthPolicy,
    widening: ByteWidening,
}

impl Fnv1a {
    /// Configuration matching one of the deployed variants
    #[must_use]
    pub fn new(variant: Variant) -> Self {
        Self {
            policy: variant.length_policy(),
            widening: ByteWidening::ZeroExtend,
        }
    }

    /// Override the byte widening
    #[must_use]
    pub fn with_widening(mut self, widening: ByteWidening) -> Self {
        self.widening = widening;
        self
    }

    /// Length policy in effect
    #[must_use]
    pub fn policy(&self) -> LengthPolicy {
        self.policy
    }

    /// Byte widening in effect
    #[must_use]
    pub fn widening(&self) -> ByteWidening {
        self.widening
    }

    /// One-shot hash
    #[must_use]
    pub fn hash(&self, bytes: &[u8]) -> u32 {
        fnv1a32_with(bytes, self.policy, self.widening)
    }

    /// Fresh incremental hasher using this configuration
    #[must_use]
    pub fn hasher(&self) -> Fnv1aHasher {
        Fnv1aHasher {
            config: *self,
            state: FNV_32_INIT,
            terminated: false,
            bytes_hashed: 0,
        }
    }
}

/// Incremental FNV-1a state.
///
/// Splitting the input across `write` calls gives the same value as hashing
/// the concatenation in one go. Under `TruncateAtFirstZero` the first zero
/// byte ends the input for good, later writes included.
#[derive(Debug, Clone)]
pub struct Fnv1aHasher {
    config: Fnv1a,
    state: u32,
    terminated: bool,
    bytes_hashed: u64,
}

impl Default for Fnv1aHasher {
    fn default() -> Self {
        Fnv1a::default().hasher()
    }
}

impl Fnv1aHasher {
    /// Hasher for one of the deployed variants
    #[must_use]
    pub fn new(variant: Variant) -> Self {
        Fnv1a::new(variant).hasher()
    }

    /// Feed more bytes
    pub fn update(&mut self, bytes: &[u8]) {
        if self.terminated {
            return;
        }
        let accepted = self.config.policy.effective_input(bytes);
        if accepted.len() < bytes.len() {
            self.terminated = true;
        }
        let widening = self.config.widening;
        self.state = accepted
            .iter()
            .fold(self.state, |h, &b| step(h, widening.widen(b)));
        self.bytes_hashed += accepted.len() as u64;
    }

    /// Current 32-bit hash value
    #[must_use]
    pub fn finish32(&self) -> u32 {
        self.state
    }

    /// Number of bytes that actually reached the accumulator
    #[must_use]
    pub fn bytes_hashed(&self) -> u64 {
        self.bytes_hashed
    }

    /// Whether a zero byte has ended a truncating input
    #[must_use]
    pub fn is_terminated(&self) -> bool {
        self.terminated
    }
}

impl Hasher for Fnv1aHasher {
    #[inline]
    fn finish(&self) -> u64 {
        u64::from(self.state)
    }

    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        self.update(bytes);
    }
}

/// `BuildHasher` producing [`Fnv1aHasher`]s, for use with `HashMap`
#[derive(Debug, Clone, Copy, Default)]
pub struct Fnv1aBuildHasher(Fnv1a);

impl Fnv1aBuildHasher {
    /// Build hashers for the given variant
    #[must_use]
    pub fn new(variant: Variant) -> Self {
        Self(Fnv1a::new(variant))
    }
}

impl BuildHasher for Fnv1aBuildHasher {
    type Hasher = Fnv1aHasher;

    fn build_hasher(&self) -> Self::Hasher {
        self.0.hasher()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn golden_vectors() {
        assert_eq!(fnv1a32(b"", LengthPolicy::HonorExplicitLength), 0x811c_9dc5);
        assert_eq!(fnv1a32(b"a", LengthPolicy::HonorExplicitLength), 0xe40c_292c);
        assert_eq!(
            fnv1a32(b"foobar", LengthPolicy::HonorExplicitLength),
            0xbf9c_f968
        );
    }

    #[test]
    fn empty_input_returns_offset_basis_for_every_variant() {
        assert_eq!(get_hash(b""), FNV_32_INIT as i32);
        assert_eq!(get_hash_bugfree(b""), FNV_32_INIT as i32);
        assert_eq!(get_hash_beansdb(b""), FNV_32_INIT);
    }

    #[test]
    fn legacy_truncates_at_first_zero() {
        assert_eq!(get_hash(b"a\0b"), get_hash(b"a"));
        assert_eq!(get_hash(b"\0anything"), FNV_32_INIT as i32);
        assert_eq!(get_hash(b"a"), 0xe40c_292c_u32 as i32);
    }

    #[test]
    fn bugfree_hashes_embedded_zero() {
        assert_ne!(get_hash_bugfree(b"a\0b"), get_hash_bugfree(b"a"));
        assert_ne!(get_hash_bugfree(b"a\0"), get_hash_bugfree(b"a"));
    }

    #[test]
    fn beansdb_matches_bugfree_bits() {
        let keys: [&[u8]; 5] = [b"", b"a", b"foobar", b"a\0b", b"\xff\x80\x00\x7f"];
        for key in keys {
            assert_eq!(get_hash_beansdb(key) as i32, get_hash_bugfree(key));
        }
        assert_eq!(get_hash_beansdb(b"foobar"), 0xbf9c_f968);
    }

    #[test]
    fn multiplication_wraps() {
        // Every multiply overflows 32 bits here; a widened accumulator would diverge.
        let mut wide: u64 = u64::from(FNV_32_INIT);
        for &b in b"foobar" {
            wide = (wide ^ u64::from(b)) * u64::from(FNV_32_PRIME);
            wide &= 0xffff_ffff;
        }
        assert_eq!(wide as u32, get_hash_beansdb(b"foobar"));
    }

    #[test]
    fn sign_extension_only_touches_high_bytes() {
        let signed = Fnv1a::new(Variant::Beansdb).with_widening(ByteWidening::SignExtend);
        assert_eq!(signed.hash(b"foobar"), get_hash_beansdb(b"foobar"));
        assert_ne!(signed.hash(&[0x80]), get_hash_beansdb(&[0x80]));
        assert_eq!(
            signed.hash(&[0x80]),
            (FNV_32_INIT ^ 0xffff_ff80).wrapping_mul(FNV_32_PRIME)
        );
        assert_eq!(ByteWidening::SignExtend.widen(0xff), 0xffff_ffff);
        assert_eq!(ByteWidening::ZeroExtend.widen(0xff), 0xff);
    }

    #[test]
    fn incremental_matches_one_shot() {
        let mut hasher = Fnv1aHasher::new(Variant::Bugfree);
        hasher.update(b"foo");
        hasher.update(b"");
        hasher.update(b"bar");
        assert_eq!(hasher.finish32(), 0xbf9c_f968);
        assert_eq!(hasher.finish(), 0xbf9c_f968);
        assert_eq!(hasher.bytes_hashed(), 6);
    }

    #[test]
    fn incremental_truncation_spans_writes() {
        let mut hasher = Fnv1aHasher::new(Variant::LegacyTruncating);
        hasher.update(b"fo");
        hasher.update(b"o\0ignored");
        hasher.update(b"bar");
        assert!(hasher.is_terminated());
        assert_eq!(hasher.finish32() as i32, get_hash(b"foo"));
        assert_eq!(hasher.bytes_hashed(), 3);
    }

    #[test]
    fn build_hasher_drives_hash_map() {
        use std::collections::HashMap;

        let mut map: HashMap<&str, u32, Fnv1aBuildHasher> =
            HashMap::with_hasher(Fnv1aBuildHasher::new(Variant::Beansdb));
        map.insert("shard-a", 1);
        map.insert("shard-b", 2);
        assert_eq!(map.get("shard-a"), Some(&1));
        assert_eq!(map.get("shard-b"), Some(&2));
    }

    #[test]
    fn variant_metadata() {
        let names: Vec<_> = Variant::ALL.iter().map(|v| v.entry_name()).collect();
        assert_eq!(names, ["get_hash", "get_hash_bugfree", "get_hash_beansdb"]);
        assert_eq!(Variant::default(), Variant::Bugfree);
        assert_eq!(
            Variant::LegacyTruncating.length_policy(),
            LengthPolicy::TruncateAtFirstZero
        );
    }
}
