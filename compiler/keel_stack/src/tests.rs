use super::*;

#[test]
fn nested_list_depth() {
    // Models walking a list nested `n` levels deep.
    fn depth(n: u32) -> u32 {
        ensure_sufficient_stack(|| if n == 0 { 0 } else { depth(n - 1) + 1 })
    }

    assert_eq!(depth(16), 16);
}

#[test]
fn deep_recursion_does_not_overflow() {
    fn sum_to(n: u64) -> u64 {
        ensure_sufficient_stack(|| if n == 0 { 0 } else { n + sum_to(n - 1) })
    }

    // Far beyond what a default 8MB main-thread stack holds for this frame size
    assert_eq!(sum_to(200_000), 200_000 * 200_001 / 2);
}

#[test]
fn propagates_errors() {
    let result: Result<u8, String> = ensure_sufficient_stack(|| Err("bad".to_string()));
    assert_eq!(result, Err("bad".to_string()));
}
