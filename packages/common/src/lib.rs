//! Common infrastructure shared by the khash crates
//!
//! This crate provides:
//! - The `NotResult` marker used to keep `on_result` handlers honest
//! - Default `on_result` / `on_error` / `on_chunk` handlers that log through `tracing`
//! - Small macros for writing handlers as match arms

pub mod handlers;
#[doc(hidden)]
pub mod macros;
pub mod traits;

pub use handlers::{on_chunk, on_error, on_result};
pub use traits::NotResult;
