use std::cmp::Ordering;

/// Quadratic exchange sort, kept as a naive baseline for comparison.
///
/// Only strictly out-of-order neighbours are swapped, so it is stable.
pub fn bubble_sort_by<T, F>(items: &mut [T], cmp: F)
where
    F: Fn(&T, &T) -> Ordering,
{
    let n = items.len();
    for pass in 0..n.saturating_sub(1) {
        let mut swapped = false;
        for j in 0..n - pass - 1 {
            if cmp(&items[j], &items[j + 1]) == Ordering::Greater {
                items.swap(j, j + 1);
                swapped = true;
            }
        }
        if !swapped {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bubble_matches_std_stable_sort() {
        let mut v = vec![(1, 0), (5, 1), (3, 2), (5, 3), (1, 4), (2, 5)];
        let mut expected = v.clone();
        expected.sort_by(|a, b| b.0.cmp(&a.0));

        bubble_sort_by(&mut v, |a, b| b.0.cmp(&a.0));
        assert_eq!(v, expected);
    }
}
