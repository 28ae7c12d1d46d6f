use std::cmp::Ordering;

/// Top-down stable merge sort.
///
/// On equal keys the left run wins, so the relative order of ties is preserved.
pub fn merge_sort_by<T, F>(items: &mut [T], cmp: F)
where
    T: Copy,
    F: Fn(&T, &T) -> Ordering,
{
    if items.len() < 2 {
        return;
    }
    let mut scratch = items.to_vec();
    sort_run(items, &mut scratch, &cmp);
}

fn sort_run<T, F>(items: &mut [T], scratch: &mut [T], cmp: &F)
where
    T: Copy,
    F: Fn(&T, &T) -> Ordering,
{
    let n = items.len();
    if n < 2 {
        return;
    }

    let mid = n / 2;
    sort_run(&mut items[..mid], &mut scratch[..mid], cmp);
    sort_run(&mut items[mid..], &mut scratch[mid..], cmp);

    // Halves already in order
    if cmp(&items[mid - 1], &items[mid]) != Ordering::Greater {
        return;
    }

    scratch.copy_from_slice(items);
    let (left, right) = scratch.split_at(mid);
    let (mut i, mut j) = (0, 0);

    for slot in items.iter_mut() {
        let take_left =
            j >= right.len() || (i < left.len() && cmp(&left[i], &right[j]) != Ordering::Greater);
        if take_left {
            *slot = left[i];
            i += 1;
        } else {
            *slot = right[j];
            j += 1;
        }
    }
}
