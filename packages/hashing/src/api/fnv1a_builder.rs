//! FNV-1a hash builder

use super::hash_functions::fnv1a_hash;
use crate::fnv1a::{ByteWidening, Fnv1a, Variant};
use crate::{AsyncHashResult, AsyncHashResultWithError, HashError, HashResult, Result};
use tokio::sync::oneshot;

/// FNV-1a hash builder
#[derive(Debug, Clone, Copy, Default)]
pub struct Fnv1aBuilder {
    variant: Variant,
    widening: ByteWidening,
}

/// FNV-1a hash builder with result handler
pub struct Fnv1aBuilderWithHandler<F, T> {
    builder: Fnv1aBuilder,
    result_handler: F,
    _phantom: std::marker::PhantomData<T>,
}

/// FNV-1a hash builder with error handler
pub struct Fnv1aBuilderWithError<E> {
    builder: Fnv1aBuilder,
    error_handler: E,
}

/// FNV-1a hash builder with chunk handler
pub struct Fnv1aBuilderWithChunk<C> {
    builder: Fnv1aBuilder,
    chunk_handler: C,
}

impl Fnv1aBuilder {
    /// Create a builder for the full-length variant
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the variant
    #[must_use]
    pub fn variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    /// Select how bytes are widened before mixing
    #[must_use]
    pub fn with_widening(mut self, widening: ByteWidening) -> Self {
        self.widening = widening;
        self
    }

    fn config(&self) -> Fnv1a {
        Fnv1a::new(self.variant).with_widening(self.widening)
    }

    /// Add `on_result` handler
    #[must_use]
    pub fn on_result<F, T>(self, handler: F) -> Fnv1aBuilderWithHandler<F, T>
    where
        F: FnOnce(Result<HashResult>) -> T + Send + 'static,
        T: khash_common::NotResult + Send + 'static,
    {
        Fnv1aBuilderWithHandler {
            builder: self,
            result_handler: handler,
            _phantom: std::marker::PhantomData,
        }
    }

    /// Add `on_error` handler - transforms errors but passes through success
    #[must_use]
    pub fn on_error<E>(self, handler: E) -> Fnv1aBuilderWithError<E>
    where
        E: Fn(HashError) -> HashError + Send + Sync + 'static,
    {
        Fnv1aBuilderWithError {
            builder: self,
            error_handler: handler,
        }
    }

    /// Add `on_chunk` handler for streaming
    #[must_use]
    pub fn on_chunk<C>(self, handler: C) -> Fnv1aBuilderWithChunk<C>
    where
        C: Fn(Result<Vec<u8>>) -> Option<Vec<u8>> + Send + Sync + 'static,
    {
        Fnv1aBuilderWithChunk {
            builder: self,
            chunk_handler: handler,
        }
    }

    /// Compute the hash on a tokio task
    #[must_use]
    pub fn compute<T: Into<Vec<u8>>>(self, data: T) -> AsyncHashResult {
        AsyncHashResult::new(self.spawn(data.into()))
    }

    fn spawn(self, data: Vec<u8>) -> oneshot::Receiver<Result<HashResult>> {
        let (tx, rx) = oneshot::channel();
        let config = self.config();
        let variant = self.variant;

        tokio::spawn(async move {
            let result = fnv1a_hash(&data, variant, config).await;
            let _ = tx.send(result);
        });

        rx
    }
}

impl<F, T> Fnv1aBuilderWithHandler<F, T>
where
    F: FnOnce(Result<HashResult>) -> T + Send + 'static,
    T: khash_common::NotResult + Send + 'static,
{
    /// Compute the hash and hand the result to the handler
    pub async fn compute<D: Into<Vec<u8>>>(self, data: D) -> T {
        let data = data.into();
        let builder = self.builder;
        let handler = self.result_handler;

        let result = fnv1a_hash(&data, builder.variant, builder.config()).await;

        handler(result)
    }
}

impl<E> Fnv1aBuilderWithError<E>
where
    E: Fn(HashError) -> HashError + Send + Sync + 'static,
{
    /// Add `on_result` handler after error handler
    #[must_use]
    pub fn on_result<F, T>(self, handler: F) -> Fnv1aBuilderWithHandler<F, T>
    where
        F: FnOnce(Result<HashResult>) -> T + Send + 'static,
        T: khash_common::NotResult + Send + 'static,
    {
        self.builder.on_result(handler)
    }

    /// Compute with error handler - returns `AsyncHashResultWithError`
    #[must_use]
    pub fn compute<T: Into<Vec<u8>>>(self, data: T) -> AsyncHashResultWithError<E> {
        let receiver = self.builder.spawn(data.into());
        AsyncHashResultWithError::new(receiver, self.error_handler)
    }
}

impl<C> Fnv1aBuilderWithChunk<C>
where
    C: Fn(Result<Vec<u8>>) -> Option<Vec<u8>> + Send + Sync + 'static,
{
    /// Hash a stream of chunks. A handler returning `None` stops consumption,
    /// and the hash covers the chunks accepted so far.
    pub async fn compute_stream<S>(self, stream: S) -> HashResult
    where
        S: tokio_stream::Stream<Item = Vec<u8>> + Send + 'static,
    {
        use tokio_stream::StreamExt;

        let chunk_handler = self.chunk_handler;
        let mut hasher = self.builder.config().hasher();
        let mut stream = Box::pin(stream);

        while let Some(chunk) = stream.next().await {
            match (chunk_handler)(Ok(chunk)) {
                Some(data) => hasher.update(&data),
                None => {
                    tracing::debug!(
                        bytes = hasher.bytes_hashed(),
                        "chunk handler stopped the stream"
                    );
                    break;
                }
            }
        }

        HashResult::new(hasher.finish32(), self.builder.variant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fnv1a::{get_hash, get_hash_beansdb};

    #[tokio::test]
    async fn compute_matches_core() {
        let result = Fnv1aBuilder::new()
            .variant(Variant::Beansdb)
            .compute(b"foobar".to_vec())
            .await;
        let hash = result.expect("fnv1a should succeed");
        assert_eq!(hash.as_u32(), get_hash_beansdb(b"foobar"));
        assert_eq!(hash.variant(), Variant::Beansdb);
    }

    #[tokio::test]
    async fn handler_receives_result() {
        let signed = Fnv1aBuilder::new()
            .variant(Variant::LegacyTruncating)
            .on_result(|result| match result {
                Ok(hash) => hash.as_i32(),
                Err(_) => 0,
            })
            .compute(b"a\0b".to_vec())
            .await;
        assert_eq!(signed, get_hash(b"a"));
    }

    #[tokio::test]
    async fn chunk_handler_can_stop_early() {
        let chunks = vec![b"foo".to_vec(), b"bar".to_vec(), b"baz".to_vec()];
        let result = Fnv1aBuilder::new()
            .on_chunk(|chunk| chunk.ok().filter(|c| c.as_slice() != b"baz"))
            .compute_stream(futures::stream::iter(chunks))
            .await;
        assert_eq!(result.as_u32(), 0xbf9c_f968);
    }
}
