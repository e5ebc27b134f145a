//! Stack growth for deep recursion.
//!
//! Directive parsing recurses once per nesting level of the input document,
//! and evaluation recurses through nested nodes, template calls (including
//! self-recursive templates) and `each` bodies. Both wrap their recursive
//! entry points in [`ensure_sufficient_stack`], which moves execution onto a
//! freshly allocated segment when the current one is nearly exhausted.
//!
//! On `wasm32` the helper is a plain call.

/// Remaining stack below which a new segment is allocated.
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated segment.
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if fewer than [`RED_ZONE`] bytes remain.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// Run `f` directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_template_depth() {
        // Mirrors a template calling itself once per level.
        fn countdown(n: u64) -> u64 {
            ensure_sufficient_stack(|| if n == 0 { 0 } else { countdown(n - 1) + 1 })
        }

        assert_eq!(countdown(200_000), 200_000);
    }

    #[test]
    fn test_result_passes_through() {
        let ok: Result<&str, ()> = ensure_sufficient_stack(|| Ok("done"));
        assert_eq!(ok, Ok("done"));
    }
}
