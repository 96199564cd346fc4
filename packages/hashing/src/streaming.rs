//! Streaming FNV-1a over chunked input
//!
//! Chunks are mixed into the accumulator as they arrive; nothing is buffered.

use crate::fnv1a::{Fnv1aHasher, Variant};
use crate::{HashError, HashResult, Result};
use futures::Stream;
use pin_project_lite::pin_project;
use std::pin::Pin;
use std::task::{Context, Poll};

pin_project! {
    /// Incremental hasher driven by a stream of byte chunks
    pub struct StreamingHasher<S> {
        #[pin]
        input: S,
        variant: Variant,
        hasher: Fnv1aHasher,
        finished: bool,
        total_bytes: u64,
    }
}

impl<S> StreamingHasher<S>
where
    S: Stream<Item = Vec<u8>>,
{
    /// Create a streaming hasher for `variant`
    pub fn new(input: S, variant: Variant) -> Self {
        Self {
            input,
            variant,
            hasher: Fnv1aHasher::new(variant),
            finished: false,
            total_bytes: 0,
        }
    }

    /// Bytes received so far, including any a truncating variant ignored
    pub fn total_bytes(&self) -> u64 {
        self.total_bytes
    }
}

/// Progress notification from a [`StreamingHasher`]
#[derive(Debug, Clone)]
pub struct StreamHashChunk {
    /// Bytes in this chunk
    pub bytes_processed: u64,
    /// Bytes received so far
    pub total_bytes: u64,
    /// Whether this is the final notification
    pub is_final: bool,
    /// Final hash, only on the final notification
    pub hash: Option<HashResult>,
}

/// Outcome of a completed stream
#[derive(Debug, Clone)]
pub struct StreamHashResult {
    /// The final hash
    pub hash: HashResult,
    /// Bytes received
    pub total_bytes: u64,
}

impl<S> Stream for StreamingHasher<S>
where
    S: Stream<Item = Vec<u8>>,
{
    type Item = Result<StreamHashChunk>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.project();

        if *this.finished {
            return Poll::Ready(None);
        }

        match this.input.poll_next(cx) {
            Poll::Ready(Some(chunk)) => {
                let chunk_size = chunk.len() as u64;
                *this.total_bytes += chunk_size;
                this.hasher.update(&chunk);

                Poll::Ready(Some(Ok(StreamHashChunk {
                    bytes_processed: chunk_size,
                    total_bytes: *this.total_bytes,
                    is_final: false,
                    hash: None,
                })))
            }
            Poll::Ready(None) => {
                *this.finished = true;
                let hash = HashResult::new(this.hasher.finish32(), *this.variant);
                tracing::trace!(total_bytes = *this.total_bytes, %hash, "stream hashed");

                Poll::Ready(Some(Ok(StreamHashChunk {
                    bytes_processed: 0,
                    total_bytes: *this.total_bytes,
                    is_final: true,
                    hash: Some(hash),
                })))
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

/// Streaming hasher for `variant` over any stream of byte chunks
pub fn stream_fnv1a<S>(input: S, variant: Variant) -> StreamingHasher<S>
where
    S: Stream<Item = Vec<u8>>,
{
    StreamingHasher::new(input, variant)
}

/// Drive a streaming hasher to completion.
///
/// # Errors
///
/// Returns `HashError::StreamProcessing` if the hasher stops without a final
/// notification.
pub async fn collect_hash<S>(mut hasher: StreamingHasher<S>) -> Result<StreamHashResult>
where
    S: Stream<Item = Vec<u8>> + Unpin,
{
    use futures::StreamExt;

    while let Some(chunk) = hasher.next().await {
        let chunk = chunk?;
        if chunk.is_final {
            if let Some(hash) = chunk.hash {
                return Ok(StreamHashResult {
                    hash,
                    total_bytes: chunk.total_bytes,
                });
            }
        }
    }

    Err(HashError::StreamProcessing(
        "stream ended without producing a final hash".to_string(),
    ))
}
