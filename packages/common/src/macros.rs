//! Macros for writing handlers as bare match arms

/// Build a result handler from match arms.
///
/// `on_result_handler!(|result| { Ok(h) => h.as_u32(), Err(_) => 0 })`
#[macro_export]
macro_rules! on_result_handler {
    (|$param:ident| { $($arms:tt)* }) => {
        |$param| match $param { $($arms)* }
    };
}

/// Build a chunk handler from match arms.
///
/// `on_chunk_handler!(|chunk| { Ok(data) => Some(data), Err(_) => None })`
#[macro_export]
macro_rules! on_chunk_handler {
    (|$param:ident| { $($arms:tt)* }) => {
        |$param| match $param { $($arms)* }
    };
}
