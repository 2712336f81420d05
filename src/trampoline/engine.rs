//! Trampoline driver

use tracing::trace;

use super::types::Bounce;

/// Drive a continuation chain to its result.
///
/// ```
/// use lambdata::trampoline::{done, pending, run, Bounce};
///
/// fn count_down<'a>(n: u64) -> Bounce<'a, u64> {
///     if n == 0 { done(0) } else { pending(move || count_down(n - 1)) }
/// }
/// assert_eq!(run(count_down(1_000_000)), 0);
/// ```
pub fn run<T>(node: Bounce<'_, T>) -> T {
    run_counted(node).0
}

/// Drive a chain, also returning how many pending nodes were forced
pub fn run_counted<T>(mut node: Bounce<'_, T>) -> (T, u64) {
    let mut steps: u64 = 0;
    loop {
        match node {
            Bounce::Done(result) => {
                trace!(target: "lambdata::trampoline::run", steps, "chain finished");
                return (result, steps);
            }
            Bounce::Pending(thunk) => {
                steps += 1;
                node = thunk();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trampoline::{done, pending};

    fn sum_to<'a>(n: u64, acc: u64) -> Bounce<'a, u64> {
        if n == 0 {
            done(acc)
        } else {
            pending(move || sum_to(n - 1, acc + n))
        }
    }

    fn is_even<'a>(n: u64) -> Bounce<'a, bool> {
        if n == 0 {
            done(true)
        } else {
            pending(move || is_odd(n - 1))
        }
    }

    fn is_odd<'a>(n: u64) -> Bounce<'a, bool> {
        if n == 0 {
            done(false)
        } else {
            pending(move || is_even(n - 1))
        }
    }

    #[test]
    fn test_done_returns_immediately() {
        let (value, steps) = run_counted(done::<i32>(7));
        assert_eq!(value, 7);
        assert_eq!(steps, 0);
    }

    #[test]
    fn test_million_step_chain() {
        let (value, steps) = run_counted(sum_to(1_000_000, 0));
        assert_eq!(value, 500_000_500_000);
        assert_eq!(steps, 1_000_000);
    }

    #[test]
    fn test_mutual_recursion() {
        assert!(run(is_even(1_000_000)));
        assert!(run(is_odd(999_999)));
    }

    #[test]
    fn test_borrowing_thunks() {
        let items: Vec<i64> = (1..=100_000).collect();

        fn total<'a>(items: &'a [i64], acc: i64) -> Bounce<'a, i64> {
            match items.split_first() {
                None => done(acc),
                Some((x, rest)) => pending(move || total(rest, acc + x)),
            }
        }

        assert_eq!(run(total(&items, 0)), 5_000_050_000);
    }

    #[test]
    fn test_fallible_chain_short_circuits() {
        fn walk<'a>(n: u32) -> Bounce<'a, Result<u32, String>> {
            match n {
                0 => done(Ok(0)),
                13 => done(Err("unlucky".to_string())),
                _ => pending(move || walk(n - 1)),
            }
        }

        assert_eq!(run(walk(10)), Ok(0));
        assert_eq!(run(walk(500)), Err("unlucky".to_string()));
    }
}
