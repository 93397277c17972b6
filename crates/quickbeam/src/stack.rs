//! Stack growth for deeply nested trees
//!
//! Both traversals recurse once per level of nesting. Each recursive step
//! runs through [`ensure_sufficient_stack`], which moves onto a freshly
//! allocated segment when the current one runs low, so the depth limit in
//! [`Context`](crate::Context) is the only bound on input nesting.

/// Headroom below which a new segment is allocated.
const MIN_HEADROOM: usize = 128 * 1024;

/// Size of each new segment.
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f` on the current stack, or on a new segment when headroom is low.
#[inline]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(MIN_HEADROOM, SEGMENT_SIZE, f)
}
