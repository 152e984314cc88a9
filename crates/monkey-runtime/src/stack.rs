//! Stack growth for deep recursion
//!
//! Parsing and evaluation recurse once per nesting level. Wrapping those
//! recursive entry points in [`ensure_sufficient_stack`] keeps deeply nested
//! input from overflowing the native stack.

/// Grow when less than this much stack remains
const RED_ZONE: usize = 100 * 1024;

/// Size of each newly allocated stack segment
const STACK_PER_RECURSION: usize = 1024 * 1024;

#[inline]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn depth(n: u32) -> u32 {
        ensure_sufficient_stack(|| if n == 0 { 0 } else { 1 + depth(n - 1) })
    }

    #[test]
    fn test_deep_recursion_grows_stack() {
        assert_eq!(depth(200_000), 200_000);
    }
}
