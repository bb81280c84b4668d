//! In-place sorts over a slice of owned words (or anything else that is `Ord`
//! and has a cheap `Default` to leave behind while moving).
//!
//! All three algorithms put words in ascending byte order, the order of
//! `str`'s `Ord`. None of them promises stability. Descending output is a
//! separate `reverse` pass after sorting.
use std::mem;
use std::ops::Range;

use thiserror::Error;

/// Which sort to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Algorithm {
    /// Partition-exchange sort, Lomuto partition, last element as pivot
    #[default]
    Quick,
    /// Top-down merge sort
    Merge,
    /// Heap sort on a max-heap
    Heap,
}

/// The direction of the final output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Order {
    /// Smallest word first
    #[default]
    Ascending,
    /// Largest word first
    Descending,
}

/// Returned by `sort_range` for a range that doesn't fit the slice.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SortError {
    /// `start..end` isn't a valid range of a slice of `len` words
    #[error("can't sort words {start}..{end} of a list of {len} words")]
    RangeOutOfBounds {
        /// Start of the requested range
        start: usize,
        /// End (exclusive) of the requested range
        end: usize,
        /// Length of the slice
        len: usize,
    },
}

/// Sorts `words` in ascending order with `algorithm`.
pub fn sort<T: Ord + Default>(words: &mut [T], algorithm: Algorithm) {
    match algorithm {
        Algorithm::Quick => quick_sort(words),
        Algorithm::Merge => merge_sort(words),
        Algorithm::Heap => heap_sort(words),
    }
}

/// Sorts `words[range]` in ascending order, leaving the rest of `words` alone.
pub fn sort_range<T: Ord + Default>(
    words: &mut [T],
    range: Range<usize>,
    algorithm: Algorithm,
) -> Result<(), SortError> {
    let len = words.len();
    let Range { start, end } = range;
    let Some(part) = words.get_mut(start..end) else {
        return Err(SortError::RangeOutOfBounds { start, end, len });
    };
    sort(part, algorithm);
    Ok(())
}

/// Sorts `words`, then reverses them if `order` is `Order::Descending`.
pub fn sort_in_order<T: Ord + Default>(words: &mut [T], algorithm: Algorithm, order: Order) {
    sort(words, algorithm);
    if order == Order::Descending {
        reverse(words);
    }
}

/// Quicksort with the Lomuto partition. Words only ever move by swapping, so
/// a slice that's already sorted (and has no duplicates) is left untouched.
///
/// There's no pivot cleverness, so sorted or reverse-sorted input takes
/// quadratic time. Recursing only into the smaller side keeps the stack
/// depth logarithmic all the same.
pub fn quick_sort<T: Ord>(mut words: &mut [T]) {
    while words.len() > 1 {
        let pivot = partition(words);
        let (lower, upper) = mem::take(&mut words).split_at_mut(pivot);
        let upper = &mut upper[1..];
        if lower.len() < upper.len() {
            quick_sort(lower);
            words = upper;
        } else {
            quick_sort(upper);
            words = lower;
        }
    }
}

/// Moves everything strictly less than the last word to the front, puts the
/// last word right after them, and returns its new index.
fn partition<T: Ord>(words: &mut [T]) -> usize {
    let high = words.len() - 1;
    let mut boundary = 0;
    for j in 0..high {
        if words[j] < words[high] {
            words.swap(boundary, j);
            boundary += 1;
        }
    }
    words.swap(boundary, high);
    boundary
}

/// Merge sort, splitting at the midpoint (the left half gets the odd word).
pub fn merge_sort<T: Ord + Default>(words: &mut [T]) {
    if words.len() <= 1 {
        return;
    }
    let mid = words.len().div_ceil(2);
    merge_sort(&mut words[..mid]);
    merge_sort(&mut words[mid..]);
    merge(words, mid);
}

/// Merges the sorted runs `words[..mid]` and `words[mid..]`. The runs are
/// moved out into temporaries and moved back in order; no word is cloned.
fn merge<T: Ord + Default>(words: &mut [T], mid: usize) {
    let left: Vec<T> = words[..mid].iter_mut().map(mem::take).collect();
    let right: Vec<T> = words[mid..].iter_mut().map(mem::take).collect();
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();
    for slot in words.iter_mut() {
        let take_left = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => l <= r,
            (Some(_), None) => true,
            (None, _) => false,
        };
        let next = if take_left { left.next() } else { right.next() };
        if let Some(word) = next {
            *slot = word;
        }
    }
}

/// Heap sort: build a max-heap, then repeatedly swap its root to the end.
pub fn heap_sort<T: Ord>(words: &mut [T]) {
    let n = words.len();
    for root in (0..n / 2).rev() {
        sift_down(words, root, n);
    }
    for end in (1..n).rev() {
        words.swap(0, end);
        sift_down(words, 0, end);
    }
}

fn sift_down<T: Ord>(words: &mut [T], mut root: usize, len: usize) {
    loop {
        let left = 2 * root + 1;
        let right = left + 1;
        let mut biggest = root;
        if left < len && words[left] > words[biggest] {
            biggest = left;
        }
        if right < len && words[right] > words[biggest] {
            biggest = right;
        }
        if biggest == root {
            return;
        }
        words.swap(root, biggest);
        root = biggest;
    }
}

/// Reverses `words` in place by swapping `i` with `n - 1 - i` for each `i`
/// in the first half.
pub fn reverse<T>(words: &mut [T]) {
    let n = words.len();
    for i in 0..n / 2 {
        words.swap(i, n - 1 - i);
    }
}
