//! Inclusive index ranges between two boundary indices.

/// Whether `value` lies in the inclusive range spanned by `start` and `end`,
/// whichever order they come in.
pub fn in_range(value: usize, end: usize, start: usize) -> bool {
    if start < end {
        (start..=end).contains(&value)
    } else if start > end {
        (end..=start).contains(&value)
    } else {
        value == start
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn ascending_bounds() {
        assert!(in_range(2, 3, 1));
        assert!(in_range(1, 3, 1));
        assert!(in_range(3, 3, 1));
        assert!(!in_range(0, 3, 1));
        assert!(!in_range(4, 3, 1));
    }

    #[test]
    fn descending_bounds() {
        assert!(in_range(2, 1, 3));
        assert!(!in_range(4, 1, 3));
    }

    #[test]
    fn collapsed_range_is_a_point() {
        assert!(in_range(5, 5, 5));
        assert!(!in_range(4, 5, 5));
        assert!(!in_range(6, 5, 5));
    }

    proptest! {
        #[test]
        fn inside_either_order(a in 0usize..1000, b in 0usize..1000, t in 0.0f64..=1.0) {
            let (lo, hi) = (a.min(b), a.max(b));
            let v = lo + ((hi - lo) as f64 * t) as usize;
            prop_assert!(in_range(v, hi, lo));
            prop_assert!(in_range(v, lo, hi));
        }

        #[test]
        fn outside_never_matches(a in 0usize..1000, b in 0usize..1000, v in 0usize..2000) {
            prop_assume!(v < a.min(b) || v > a.max(b));
            prop_assert!(!in_range(v, a, b));
            prop_assert!(!in_range(v, b, a));
        }

        #[test]
        fn point_only_matches_itself(x in 0usize..1000, y in 0usize..1000) {
            prop_assert!(in_range(x, x, x));
            prop_assert_eq!(in_range(y, x, x), y == x);
        }
    }
}
