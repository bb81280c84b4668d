//! The hash function and the probe sequences used by `ProbeHashSet`.
//!
//! A probe sequence is an endless iterator of slot indices, each in
//! `0..capacity`. The set decides how many of them to look at.
//!
//! * `ProbeScheme::Checksum` is the fixed-stride walk: start at the additive
//!   checksum of the word, step by `STRIDE`, and restart lower down the table
//!   whenever the walk runs off the end. It does not promise to reach every
//!   slot, and for some capacities it gets stuck on a single slot.
//! * `ProbeScheme::DoubleHash` starts at the same place, but steps by an
//!   amount derived from a second hash and made coprime with the capacity, so
//!   the first `capacity` indices are a permutation of the table.

/// The step of the fixed-stride walk: the largest checksum the word reader
/// was expected to produce.
pub const STRIDE: i64 = 12_135;

/// Subtracted from the character sum, so that the one-letter word `"A"` hashes
/// to zero.
const OFFSET: i64 = 65;

/// Which probe sequence a `ProbeHashSet` uses to resolve collisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProbeScheme {
    /// The additive checksum with the fixed-stride walk
    #[default]
    Checksum,
    /// The additive checksum with a coprime stride taken from a second hash
    DoubleHash,
}

/// Returns the sum of the code points of `word`, minus 65. Anagrams collide,
/// and so do lots of other words; that's part of the contract.
#[must_use]
pub fn checksum(word: &str) -> i64 {
    word.chars().map(|c| i64::from(u32::from(c))).sum::<i64>() - OFFSET
}

/// An endless iterator over the slot indices to examine for a single word.
pub struct ProbeSequence {
    walk: Walk,
}

enum Walk {
    Stride(StrideWalk),
    Double(DoubleWalk),
}

impl ProbeSequence {
    /// The probe sequence for `word` in a table of `capacity` slots.
    /// `capacity` must be non-zero.
    #[must_use]
    pub fn new(scheme: ProbeScheme, word: &str, capacity: usize) -> ProbeSequence {
        debug_assert!(capacity > 0);
        let hash = checksum(word);
        let walk = match scheme {
            ProbeScheme::Checksum => Walk::Stride(StrideWalk::new(hash, capacity)),
            ProbeScheme::DoubleHash => Walk::Double(DoubleWalk::new(hash, word, capacity)),
        };
        ProbeSequence { walk }
    }
}

impl Iterator for ProbeSequence {
    type Item = usize;
    fn next(&mut self) -> Option<usize> {
        match &mut self.walk {
            Walk::Stride(walk) => Some(walk.next_slot()),
            Walk::Double(walk) => Some(walk.next_slot()),
        }
    }
}

/// The fixed-stride state machine. `next` is the raw (unfolded) position;
/// `wraparound` remembers the round in which the walk first went negative.
struct StrideWalk {
    hash: i64,
    capacity: i64,
    next: i64,
    rounds: i64,
    wraparound: Option<i64>,
}

impl StrideWalk {
    fn new(hash: i64, capacity: usize) -> StrideWalk {
        let capacity = i64::try_from(capacity).unwrap_or(i64::MAX);
        StrideWalk { hash, capacity, next: hash, rounds: 0, wraparound: None }
    }

    fn next_slot(&mut self) -> usize {
        let slot = fold(self.next, self.capacity);
        self.advance();
        slot
    }

    fn advance(&mut self) {
        self.next += STRIDE;
        if self.next > self.capacity {
            self.rounds += 1;
            self.next = STRIDE - self.rounds * self.hash;
        }
        if self.next < 0 {
            let wraparound = *self.wraparound.get_or_insert(self.rounds);
            self.next = STRIDE - (self.rounds - wraparound);
        }
    }
}

/// Folds a raw position into `0..capacity`. Positions already in range are
/// left alone.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn fold(raw: i64, capacity: i64) -> usize {
    // rem_euclid of a positive modulus is never negative
    raw.rem_euclid(capacity) as usize
}

struct DoubleWalk {
    next: usize,
    step: usize,
    capacity: usize,
}

impl DoubleWalk {
    fn new(hash: i64, word: &str, capacity: usize) -> DoubleWalk {
        let next = fold(hash, i64::try_from(capacity).unwrap_or(i64::MAX));
        let step = coprime_step(fxhash::hash64(word), capacity);
        DoubleWalk { next, step, capacity }
    }

    fn next_slot(&mut self) -> usize {
        let slot = self.next;
        self.next = (self.next + self.step) % self.capacity;
        slot
    }
}

/// Picks a step in `1..capacity` from `seed`, then moves it along until it
/// shares no factor with `capacity`. The loop always stops, since 1 is coprime
/// with everything.
#[allow(clippy::cast_possible_truncation)]
fn coprime_step(seed: u64, capacity: usize) -> usize {
    if capacity <= 2 {
        return 1;
    }
    let span = capacity - 1;
    let mut step = (seed % span as u64) as usize + 1;
    while gcd(step, capacity) != 1 {
        step = step % span + 1;
    }
    step
}

fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

#[allow(clippy::pedantic)]
#[cfg(test)]
mod test {
    use super::*;
    use std::collections::HashSet;

    fn first(scheme: ProbeScheme, word: &str, capacity: usize, n: usize) -> Vec<usize> {
        ProbeSequence::new(scheme, word, capacity).take(n).collect()
    }

    #[test]
    fn checksum_puts_capital_a_at_zero() {
        assert_eq!(checksum("A"), 0);
        assert_eq!(checksum("cat"), 247);
        assert_eq!(checksum("dog"), 249);
        assert_eq!(checksum("bird"), 352);
    }

    #[test]
    fn anagrams_share_a_checksum() {
        assert_eq!(checksum("abc"), checksum("cab"));
        assert_eq!(checksum("listen"), checksum("silent"));
    }

    #[test]
    fn stride_walk_in_a_large_table_steps_by_the_stride() {
        assert_eq!(
            first(ProbeScheme::Checksum, "abc", 100_000, 6),
            vec![229, 12364, 24499, 36634, 48769, 60904]
        );
    }

    #[test]
    fn stride_walk_restarts_lower_down_then_counts_down_after_going_negative() {
        let expected = vec![
            352, 783, 431, 79, 727, 375, 23, 671, 319, 967, 615, 263, 911, 559, 207, 855, 503,
            151, 799, 447, 95, 743, 391, 39, 687, 335, 983, 631, 279, 927, 575, 223, 871, 519,
            167, 135, 134, 133, 132, 131, 130,
        ];
        assert_eq!(first(ProbeScheme::Checksum, "bird", 1000, expected.len()), expected);
    }

    #[test]
    fn stride_walk_can_get_stuck_on_one_slot() {
        // 12135 = 7 (mod 16) and 352 = 0 (mod 16)
        assert_eq!(first(ProbeScheme::Checksum, "bird", 16, 6), vec![0, 7, 7, 7, 7, 7]);
    }

    #[test]
    fn every_index_is_inside_the_table() {
        for capacity in [1, 2, 3, 16, 17, 1000] {
            for scheme in [ProbeScheme::Checksum, ProbeScheme::DoubleHash] {
                for word in ["A", "zebra", "Supercalifragilistic", ""] {
                    assert!(first(scheme, word, capacity, 200).iter().all(|&i| i < capacity));
                }
            }
        }
    }

    #[test]
    fn double_hash_visits_every_slot_once_per_lap() {
        for capacity in [1, 2, 12, 16, 97, 100] {
            for word in ["bird", "brid", "A", "onomatopoeia"] {
                let lap: HashSet<usize> =
                    first(ProbeScheme::DoubleHash, word, capacity, capacity).into_iter().collect();
                assert_eq!(lap.len(), capacity, "{word} in {capacity} slots");
            }
        }
    }

    #[test]
    fn double_hash_starts_at_the_checksum() {
        assert_eq!(first(ProbeScheme::DoubleHash, "cat", 1000, 1), vec![247]);
    }

    #[test]
    fn coprime_steps_are_coprime() {
        for capacity in 3..200 {
            for seed in [0, 1, 7, 12135, u64::MAX] {
                let step = coprime_step(seed, capacity);
                assert!((1..capacity).contains(&step));
                assert_eq!(gcd(step, capacity), 1);
            }
        }
    }
}
