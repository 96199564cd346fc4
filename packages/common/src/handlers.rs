//! Default handler functions for result, chunk and error processing
//!
//! Builders accept any closure; these are the pass-through defaults that only log.

/// Pass a result through unchanged after logging completion
pub fn on_result<T>(result: T) -> T {
    tracing::debug!("hash operation completed");
    result
}

/// Pass a chunk through unchanged after logging it
pub fn on_chunk<T>(chunk: T) -> T {
    tracing::trace!("processing data chunk");
    chunk
}

/// Log an error at `warn` and hand it back unchanged
pub fn on_error<T: std::fmt::Debug>(error: T) -> T {
    tracing::warn!("hash operation failed: {error:?}");
    error
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handlers_pass_values_through() {
        assert_eq!(on_result(0x811c_9dc5u32), 0x811c_9dc5);
        assert_eq!(on_chunk(vec![0u8, 1]), vec![0, 1]);
        assert_eq!(on_error("bad bucket"), "bad bucket");
    }
}
