//! Internal hash functions used by the builders

use crate::fnv1a::{Fnv1a, Variant};
use crate::{HashResult, Result};

/// FNV-1a over `data` with the given configuration.
///
/// # Errors
///
/// Infallible; the `Result` matches the builder plumbing.
pub async fn fnv1a_hash(data: &[u8], variant: Variant, config: Fnv1a) -> Result<HashResult> {
    let value = config.hash(data);
    tracing::trace!(?variant, len = data.len(), value, "computed fnv1a hash");

    // Let other tasks run between back-to-back hashes
    tokio::task::yield_now().await;

    Ok(HashResult::new(value, variant))
}
