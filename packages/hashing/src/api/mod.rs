//! Fluent hashing API
//!
//! Actions take data as arguments:
//! `Hash::fnv1a().on_result(handler).compute(data).await`

pub mod fnv1a_builder;
pub mod hash_entry;
pub mod hash_functions;

pub use hash_entry::Hash;

pub use fnv1a_builder::{
    Fnv1aBuilder, Fnv1aBuilderWithChunk, Fnv1aBuilderWithError, Fnv1aBuilderWithHandler,
};
