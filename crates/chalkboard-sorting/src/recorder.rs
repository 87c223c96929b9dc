//! Pre-recorded step logs for insertion, selection, merge and quick sort.
//!
//! Every recorder copies its input and works on the copy. Each recorded
//! snapshot is a permutation of the input: values move by swaps or
//! rotations, never by overwriting, so a frame never shows a value twice.

use crate::step::{Algorithm, Highlight, Step};

/// Record the full step log for `algorithm`.
///
/// Returns `None` for [`Algorithm::Bubble`], which is stepped live
/// through [`BubbleState`](crate::BubbleState) and never pre-recorded.
pub fn record<T: Ord + Clone>(algorithm: Algorithm, input: &[T]) -> Option<Vec<Step<T>>> {
    let steps = match algorithm {
        Algorithm::Bubble => return None,
        Algorithm::Insertion => insertion_steps(input),
        Algorithm::Selection => selection_steps(input),
        Algorithm::Merge => merge_steps(input),
        Algorithm::Quick => quick_steps(input),
    };
    tracing::debug!(%algorithm, len = input.len(), steps = steps.len(), "recorded step log");
    Some(steps)
}

/// Insertion sort.
///
/// One step per position the key moves left (highlighting the pair it
/// crossed), then one step when the key comes to rest.
pub fn insertion_steps<T: Ord + Clone>(input: &[T]) -> Vec<Step<T>> {
    let mut a = input.to_vec();
    let mut steps = Vec::new();

    for i in 1..a.len() {
        let mut j = i;
        while j > 0 && a[j - 1] > a[j] {
            a.swap(j - 1, j);
            steps.push(Step::capture(&a, Highlight::Pair(j - 1, j)));
            j -= 1;
        }
        steps.push(Step::capture(&a, Highlight::One(j)));
    }

    steps
}

/// Selection sort.
///
/// A step is recorded only when the running minimum is swapped into place.
pub fn selection_steps<T: Ord + Clone>(input: &[T]) -> Vec<Step<T>> {
    let mut a = input.to_vec();
    let mut steps = Vec::new();
    let n = a.len();

    for i in 0..n {
        let mut min_idx = i;
        for j in (i + 1)..n {
            if a[j] < a[min_idx] {
                min_idx = j;
            }
        }

        if min_idx != i {
            a.swap(i, min_idx);
            steps.push(Step::capture(&a, Highlight::Pair(i, min_idx)));
        }
    }

    steps
}

/// Top-down merge sort.
///
/// One step per element placed by each merge, in the order the merges run.
pub fn merge_steps<T: Ord + Clone>(input: &[T]) -> Vec<Step<T>> {
    let mut a = input.to_vec();
    let mut steps = Vec::new();
    if a.len() > 1 {
        let hi = a.len() - 1;
        merge_sort_range(&mut a, 0, hi, &mut steps);
    }
    steps
}

fn merge_sort_range<T: Ord + Clone>(a: &mut [T], lo: usize, hi: usize, steps: &mut Vec<Step<T>>) {
    if lo >= hi {
        return;
    }
    let mid = lo + (hi - lo) / 2;
    merge_sort_range(a, lo, mid, steps);
    merge_sort_range(a, mid + 1, hi, steps);
    merge_runs(a, lo, mid, hi, steps);
}

/// Merge the sorted runs `[lo, mid]` and `[mid + 1, hi]` in place.
///
/// The left run always occupies `[k, right)`. Taking from the right run
/// rotates its head down to `k`, shifting the left run up by one.
/// Ties favour the left run.
fn merge_runs<T: Ord + Clone>(
    a: &mut [T],
    lo: usize,
    mid: usize,
    hi: usize,
    steps: &mut Vec<Step<T>>,
) {
    let mut k = lo;
    let mut right = mid + 1;

    while k < right && right <= hi {
        if a[k] > a[right] {
            a[k..=right].rotate_right(1);
            right += 1;
        }
        steps.push(Step::capture(a, Highlight::One(k)));
        k += 1;
    }

    // Whatever remains is already in its final slot for this merge.
    for idx in k..=hi {
        steps.push(Step::capture(a, Highlight::One(idx)));
    }
}

/// Quick sort with the Lomuto partition scheme.
///
/// The pivot is the last element of each subrange. One step per element
/// moved into the `<= pivot` region, plus one for the final pivot swap.
pub fn quick_steps<T: Ord + Clone>(input: &[T]) -> Vec<Step<T>> {
    let mut a = input.to_vec();
    let mut steps = Vec::new();
    if a.len() > 1 {
        let hi = a.len() - 1;
        quick_sort_range(&mut a, 0, hi, &mut steps);
    }
    steps
}

fn quick_sort_range<T: Ord + Clone>(a: &mut [T], low: usize, high: usize, steps: &mut Vec<Step<T>>) {
    if low >= high {
        return;
    }
    let p = partition(a, low, high, steps);
    if p > low {
        quick_sort_range(a, low, p - 1, steps);
    }
    quick_sort_range(a, p + 1, high, steps);
}

fn partition<T: Ord + Clone>(a: &mut [T], low: usize, high: usize, steps: &mut Vec<Step<T>>) -> usize {
    let pivot = a[high].clone();
    let mut i = low;

    for j in low..high {
        if a[j] <= pivot {
            a.swap(i, j);
            steps.push(Step::capture(a, Highlight::Pair(i, j)));
            i += 1;
        }
    }

    a.swap(i, high);
    steps.push(Step::capture(a, Highlight::Pair(i, high)));
    i
}
