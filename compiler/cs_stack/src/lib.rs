//! Stack growth guard for deeply nested syntax.
//!
//! The parser descends once per nested expression or statement and the
//! reflower descends once per nested node, so source like `((((...))))` or a
//! long `else if` chain recurses proportionally to its nesting. Wrap those
//! recursive entry points in [`with_stack_guard`].
//!
//! On wasm the guard is a passthrough.

/// Remaining stack below which a new segment is allocated.
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment.
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn with_stack_guard<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn with_stack_guard<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nest_depth(open: &[u8]) -> usize {
        with_stack_guard(|| match open.split_first() {
            Some((b'(', rest)) => 1 + nest_depth(rest),
            _ => 0,
        })
    }

    #[test]
    fn measures_shallow_nesting() {
        assert_eq!(nest_depth(b"((("), 3);
    }

    #[test]
    fn survives_pathological_nesting() {
        let source = vec![b'('; 200_000];
        assert_eq!(nest_depth(&source), 200_000);
    }

    #[test]
    fn forwards_fallible_results() {
        let result: Result<u32, String> = with_stack_guard(|| Ok(7));
        assert_eq!(result, Ok(7));
    }
}
