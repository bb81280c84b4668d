//! Houses the `run` function: optionally drop duplicate words, sort, optionally
//! reverse, and print one word per line.
use anyhow::{bail, Context, Result};
use log::{debug, info};
use std::io;

use crate::probe::ProbeScheme;
use crate::set::{Lookup, ProbeHashSet, ProbeSetError, RemovalPolicy};
use crate::sort::{sort_in_order, Algorithm, Order};
use crate::words::MAX_WORDS;

/// Everything `run` needs to know besides the words themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// The sort to use
    pub algorithm: Algorithm,
    /// Ascending or descending output
    pub order: Order,
    /// Drop duplicate words before sorting?
    pub uniq: bool,
    /// Sort on each word's rank in first-seen order instead of the word
    pub random: bool,
    /// The number of slots in the deduplicating set
    pub capacity: usize,
    /// How the deduplicating set resolves collisions
    pub probe: ProbeScheme,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            algorithm: Algorithm::default(),
            order: Order::default(),
            uniq: false,
            random: false,
            capacity: MAX_WORDS,
            probe: ProbeScheme::default(),
        }
    }
}

/// Arranges `words` as `options` asks, then writes them to `out`, one per line.
pub fn run(words: Vec<String>, options: &Options, out: impl io::Write) -> Result<()> {
    let words = arrange(words, options)?;
    output_to(&words, out)
}

/// Drops duplicates (if `options.uniq`), sorts, and reverses (if
/// `options.order` is `Order::Descending`). With `options.random` the sort is
/// a `rank_sort`.
///
/// Before sorting, the deduplicated words are in the order they were first
/// seen, but after sorting that order no longer shows.
pub fn arrange(words: Vec<String>, options: &Options) -> Result<Vec<String>> {
    debug!("arranging {} words with {options:?}", words.len());
    let mut words = if options.uniq {
        dedupe(&words, options.capacity, options.probe).context("Can't collect the unique words")?
    } else {
        words
    };
    if options.random {
        return rank_sort(words, options).context("Can't rank the words");
    }
    info!("sorting {} words with {:?} sort", words.len(), options.algorithm);
    sort_in_order(&mut words, options.algorithm, options.order);
    Ok(words)
}

/// Sorts `words` on their ranks rather than on the words themselves. A word's
/// rank is its position in a `ProbeHashSet` of the words, so equal words end
/// up next to each other, in the order they were first seen.
pub fn rank_sort(words: Vec<String>, options: &Options) -> Result<Vec<String>> {
    let mut set =
        ProbeHashSet::with_options(options.capacity, options.probe, RemovalPolicy::Vacate)?;
    for word in &words {
        set.insert(word)?;
    }
    let mut rank_of_slot = vec![0; set.capacity()];
    for (rank, (word, _)) in set.iter().enumerate() {
        if let Lookup::Found { slot, .. } = set.find(word)? {
            rank_of_slot[slot] = rank;
        }
    }
    let mut ranked = Vec::with_capacity(words.len());
    for word in words {
        let Lookup::Found { slot, .. } = set.find(&word)? else {
            bail!("{word:?} went missing from the word set");
        };
        ranked.push((rank_of_slot[slot], word));
    }
    let (count, ranks) = (ranked.len(), set.len());
    info!("sorting {count} words on {ranks} ranks with {:?} sort", options.algorithm);
    sort_in_order(&mut ranked, options.algorithm, options.order);
    Ok(ranked.into_iter().map(|(_, word)| word).collect())
}

/// Returns the distinct members of `words`, in the order they first appear,
/// using a `ProbeHashSet` with `capacity` slots.
pub fn dedupe(
    words: &[String],
    capacity: usize,
    probe: ProbeScheme,
) -> Result<Vec<String>, ProbeSetError> {
    let mut set = ProbeHashSet::with_options(capacity, probe, RemovalPolicy::Vacate)?;
    for word in words {
        set.insert(word)?;
    }
    info!("{} unique words among {}", set.len(), words.len());
    Ok(set.into_words())
}

/// Writes each word followed by a newline, then flushes.
fn output_to(words: &[String], mut out: impl io::Write) -> Result<()> {
    for word in words {
        out.write_all(word.as_bytes())?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}

#[allow(clippy::pedantic)]
#[cfg(test)]
mod test {
    use super::*;

    fn owned(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn calc(words: &[&str], options: Options) -> String {
        let mut answer = Vec::new();
        run(owned(words), &options, &mut answer).unwrap();
        String::from_utf8(answer).unwrap()
    }

    use self::Algorithm::*;

    #[test]
    fn dedupe_keeps_first_seen_order() {
        let unique = dedupe(&owned(&["cat", "dog", "cat", "bird"]), 16, ProbeScheme::Checksum);
        assert_eq!(unique.unwrap(), ["cat", "dog", "bird"]);
    }

    #[test]
    fn every_algorithm_gives_the_same_output() {
        let words = ["pear", "fig", "apple", "fig", "Kiwi", "date"];
        for algorithm in [Quick, Merge, Heap] {
            let options = Options { algorithm, ..Options::default() };
            let expected = "Kiwi\napple\ndate\nfig\nfig\npear\n";
            assert_eq!(calc(&words, options), expected, "for {algorithm:?}");
        }
    }

    #[test]
    fn uniq_and_desc_combine() {
        let words = ["pear", "fig", "apple", "fig", "Kiwi", "date", "pear"];
        for probe in [ProbeScheme::Checksum, ProbeScheme::DoubleHash] {
            let options =
                Options { uniq: true, order: Order::Descending, probe, ..Options::default() };
            assert_eq!(calc(&words, options), "pear\nfig\ndate\napple\nKiwi\n", "for {probe:?}");
        }
    }

    #[test]
    fn random_sort_groups_words_in_first_seen_order() {
        let words = ["pear", "fig", "apple", "fig", "Kiwi", "date", "pear"];
        for algorithm in [Quick, Merge, Heap] {
            let options = Options { algorithm, random: true, ..Options::default() };
            let expected = "pear\npear\nfig\nfig\napple\nKiwi\ndate\n";
            assert_eq!(calc(&words, options), expected, "for {algorithm:?}");
        }
        let options = Options { random: true, uniq: true, ..Options::default() };
        assert_eq!(calc(&words, options), "pear\nfig\napple\nKiwi\ndate\n");
        let options = Options { random: true, order: Order::Descending, ..Options::default() };
        assert_eq!(calc(&words, options), "date\nKiwi\napple\nfig\nfig\npear\npear\n");
    }

    #[test]
    fn random_sort_reports_a_set_that_is_too_small() {
        let options = Options { random: true, capacity: 2, ..Options::default() };
        let err = arrange(owned(&["a", "b", "c", "a"]), &options).unwrap_err();
        let cause = err.downcast_ref::<ProbeSetError>();
        assert!(matches!(cause, Some(ProbeSetError::CapacityExceeded { .. })), "{err:?}");
    }

    #[test]
    fn no_words_means_no_output() {
        assert_eq!(calc(&[], Options { uniq: true, ..Options::default() }), "");
    }

    #[test]
    fn a_set_that_is_too_small_is_an_error() {
        let options = Options { uniq: true, capacity: 2, ..Options::default() };
        let err = arrange(owned(&["a", "b", "c"]), &options).unwrap_err();
        let cause = err.downcast_ref::<ProbeSetError>();
        assert!(matches!(cause, Some(ProbeSetError::CapacityExceeded { .. })), "{err:?}");
    }

    #[test]
    fn zero_capacity_is_an_error_only_when_deduplicating() {
        let options = Options { capacity: 0, ..Options::default() };
        assert_eq!(arrange(owned(&["b", "a"]), &options).unwrap(), ["a", "b"]);
        let options = Options { uniq: true, ..options };
        assert!(arrange(owned(&["b", "a"]), &options).is_err());
    }
}
