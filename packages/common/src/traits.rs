//! Marker traits used across the khash crates

/// Marks types that an `on_result` handler may return.
///
/// Handlers receive a `Result` and decide what an error means for the caller,
/// so they must hand back a plain value. `Result` itself is deliberately left
/// out of the implementor list.
pub trait NotResult {}

impl NotResult for bool {}
impl NotResult for () {}
impl<T> NotResult for Vec<T> {}
impl NotResult for String {}
impl<T> NotResult for Option<T> {}
impl NotResult for u8 {}
impl NotResult for u16 {}
impl NotResult for u32 {}
impl NotResult for u64 {}
impl NotResult for u128 {}
impl NotResult for usize {}
impl NotResult for i8 {}
impl NotResult for i16 {}
impl NotResult for i32 {}
impl NotResult for i64 {}
impl NotResult for i128 {}
impl NotResult for isize {}
impl NotResult for &str {}
impl<T> NotResult for &[T] {}
impl<T> NotResult for Box<T> {}
impl<T> NotResult for std::sync::Arc<T> {}

impl<T, U> NotResult for (T, U)
where
    T: NotResult,
    U: NotResult,
{
}
