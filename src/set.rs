//! Provides the `ProbeHashSet` structure, a fixed-capacity open-addressing
//! set of words used to drop duplicates before sorting.
//!
//! * Collisions are resolved by walking a `ProbeSequence` (see `crate::probe`).
//! * Each occupied slot carries a `visits` count: the number of times some
//!   other word's insertion walked past it. A lookup stops at the first
//!   non-matching slot whose count is zero, since no word was ever placed
//!   beyond such a slot on this walk. There are no tombstones by default.
//! * The set remembers the slots it filled, in order, so iteration yields
//!   words in insertion order rather than table order.
//! * The table never grows. Callers pick a capacity comfortably larger than
//!   the number of distinct words they expect.
use log::{debug, trace};
use thiserror::Error;

use crate::probe::{ProbeScheme, ProbeSequence};

/// What a slot in the table holds.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Slot {
    Empty,
    Occupied { value: String, visits: u32 },
    Tombstone,
}

/// What `remove` leaves behind.
///
/// `Vacate` empties the slot outright. Any word whose insertion walked past
/// that slot may then become unreachable, because lookups treat the now-empty
/// slot as the end of the walk. `Tombstone` marks the slot instead; lookups
/// and insertions walk past tombstones, and tombstones are never refilled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RemovalPolicy {
    /// Empty the slot (the historical behavior)
    #[default]
    Vacate,
    /// Leave a tombstone that keeps probe walks intact
    Tombstone,
}

/// The successful results of `ProbeHashSet::insert`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    /// The word was stored in a previously empty slot
    Inserted,
    /// An equal word was already in the set; nothing changed
    AlreadyPresent,
}

/// The result of `ProbeHashSet::find`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    /// The word is in `slot`, and other insertions have walked past it
    /// `visits` times
    Found {
        /// Index of the slot holding the word
        slot: usize,
        /// The slot's visit count
        visits: u32,
    },
    /// The walk ended without meeting the word
    NotFound,
}

/// The result of `ProbeHashSet::remove`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// The word was found and removed
    Removed,
    /// The walk ended without meeting the word
    NotFound,
}

/// Failures of `ProbeHashSet` operations. A word that isn't in the set is
/// not a failure; see `Lookup::NotFound` and `Removal::NotFound`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeSetError {
    /// Asked for a table with no slots
    #[error("a word set needs at least one slot")]
    ZeroCapacity,
    /// The table couldn't be allocated
    #[error("can't allocate a word set with {capacity} slots")]
    Allocation {
        /// The capacity that was asked for
        capacity: usize,
    },
    /// The set's storage was released by `destroy`
    #[error("the word set has already been released")]
    Released,
    /// The walk for `word` examined `probes` slots without reaching a free
    /// slot or the end of its chain
    #[error("word set capacity exceeded: gave up on {word:?} after {probes} probes")]
    CapacityExceeded {
        /// The word being inserted, looked up or removed
        word: String,
        /// How many slots were examined
        probes: usize,
    },
}

/// A fixed-capacity set of words with insertion-order iteration. See the
/// module documentation for the probing rules.
#[derive(Debug, Clone)]
pub struct ProbeHashSet {
    slots: Vec<Slot>,
    order: Vec<usize>,
    capacity: usize,
    scheme: ProbeScheme,
    removal: RemovalPolicy,
}

/// How the walk treats a slot it lands on.
enum Step {
    Vacant,
    Match,
    Skip { visits: u32 },
    Tombstone,
}

impl ProbeHashSet {
    /// A set with `capacity` slots, probing with `ProbeScheme::Checksum` and
    /// vacating slots on removal.
    pub fn new(capacity: usize) -> Result<ProbeHashSet, ProbeSetError> {
        ProbeHashSet::with_options(capacity, ProbeScheme::default(), RemovalPolicy::default())
    }

    /// A set with `capacity` slots and the given probe scheme and removal
    /// policy. Fails if `capacity` is zero or the table can't be allocated.
    pub fn with_options(
        capacity: usize,
        scheme: ProbeScheme,
        removal: RemovalPolicy,
    ) -> Result<ProbeHashSet, ProbeSetError> {
        if capacity == 0 {
            return Err(ProbeSetError::ZeroCapacity);
        }
        let mut slots: Vec<Slot> = Vec::new();
        let mut order: Vec<usize> = Vec::new();
        if slots.try_reserve_exact(capacity).is_err() {
            return Err(ProbeSetError::Allocation { capacity });
        }
        if order.try_reserve_exact(capacity).is_err() {
            return Err(ProbeSetError::Allocation { capacity });
        }
        slots.resize(capacity, Slot::Empty);
        debug!("word set created with {capacity} slots, {scheme:?} probing, {removal:?} removal");
        Ok(ProbeHashSet { slots, order, capacity, scheme, removal })
    }

    /// The number of slots, fixed when the set was created
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The number of words in the set
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Is the set empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Has `destroy` released the set's storage?
    #[must_use]
    pub fn is_released(&self) -> bool {
        self.slots.is_empty()
    }

    /// Adds `word` to the set.
    ///
    /// Every occupied, non-matching slot the walk passes has its visit count
    /// bumped, but only once a free slot has been found: if the walk runs out
    /// of probes the set is left exactly as it was.
    pub fn insert(&mut self, word: &str) -> Result<Insertion, ProbeSetError> {
        self.check_live()?;
        let mut passed = Vec::new();
        for slot in self.probe(word) {
            match self.step(slot, word) {
                Step::Match => {
                    trace!("{word:?} already present in slot {slot}");
                    return Ok(Insertion::AlreadyPresent);
                }
                Step::Skip { .. } => passed.push(slot),
                Step::Tombstone => {}
                Step::Vacant => {
                    for &skipped in &passed {
                        if let Slot::Occupied { visits, .. } = &mut self.slots[skipped] {
                            *visits = visits.saturating_add(1);
                        }
                    }
                    self.slots[slot] = Slot::Occupied { value: word.to_owned(), visits: 0 };
                    self.order.push(slot);
                    trace!("{word:?} inserted in slot {slot} after passing {} slots", passed.len());
                    return Ok(Insertion::Inserted);
                }
            }
        }
        Err(self.exhausted(word))
    }

    /// Looks for `word` without changing anything. The walk ends at an empty
    /// slot, at the word itself, or at a non-matching slot that no insertion
    /// has ever walked past.
    pub fn find(&self, word: &str) -> Result<Lookup, ProbeSetError> {
        Ok(match self.locate(word)? {
            Some(slot) => match &self.slots[slot] {
                Slot::Occupied { visits, .. } => Lookup::Found { slot, visits: *visits },
                Slot::Empty | Slot::Tombstone => Lookup::NotFound,
            },
            None => Lookup::NotFound,
        })
    }

    /// Removes `word`, walking the same way `find` does. What's left in the
    /// slot depends on the set's `RemovalPolicy`.
    pub fn remove(&mut self, word: &str) -> Result<Removal, ProbeSetError> {
        let Some(slot) = self.locate(word)? else {
            debug!("{word:?} not found for removal");
            return Ok(Removal::NotFound);
        };
        self.slots[slot] = match self.removal {
            RemovalPolicy::Vacate => Slot::Empty,
            RemovalPolicy::Tombstone => Slot::Tombstone,
        };
        // `order` must keep insertion order, so no swap_remove here
        if let Some(position) = self.order.iter().position(|&s| s == slot) {
            self.order.remove(position);
        }
        debug!("{word:?} removed from slot {slot}");
        Ok(Removal::Removed)
    }

    /// Returns `(word, visits)` for each word in the set, in insertion order.
    /// A released set yields nothing.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.order.iter().filter_map(move |&slot| match &self.slots[slot] {
            Slot::Occupied { value, visits } => Some((value.as_str(), *visits)),
            Slot::Empty | Slot::Tombstone => None,
        })
    }

    /// Moves the words out of the set, in insertion order.
    #[must_use]
    pub fn into_words(self) -> Vec<String> {
        let ProbeHashSet { mut slots, order, .. } = self;
        order
            .into_iter()
            .filter_map(|slot| match std::mem::replace(&mut slots[slot], Slot::Empty) {
                Slot::Occupied { value, .. } => Some(value),
                Slot::Empty | Slot::Tombstone => None,
            })
            .collect()
    }

    /// Releases the table and every word in it. Later operations fail with
    /// `ProbeSetError::Released`. Releasing twice does nothing.
    pub fn destroy(&mut self) {
        if self.is_released() {
            return;
        }
        debug!("releasing word set of {} slots holding {} words", self.capacity, self.len());
        self.slots = Vec::new();
        self.order = Vec::new();
    }

    /// The walk used by `find` and `remove`. `Ok(None)` means the walk ended
    /// without a match.
    fn locate(&self, word: &str) -> Result<Option<usize>, ProbeSetError> {
        self.check_live()?;
        for slot in self.probe(word) {
            match self.step(slot, word) {
                Step::Match => return Ok(Some(slot)),
                Step::Vacant | Step::Skip { visits: 0 } => return Ok(None),
                Step::Skip { .. } | Step::Tombstone => {}
            }
        }
        Err(self.exhausted(word))
    }

    /// At most `capacity` slots are examined for any one word
    fn probe(&self, word: &str) -> std::iter::Take<ProbeSequence> {
        ProbeSequence::new(self.scheme, word, self.capacity).take(self.capacity)
    }

    fn step(&self, slot: usize, word: &str) -> Step {
        match &self.slots[slot] {
            Slot::Empty => Step::Vacant,
            Slot::Tombstone => Step::Tombstone,
            Slot::Occupied { value, .. } if value == word => Step::Match,
            Slot::Occupied { visits, .. } => Step::Skip { visits: *visits },
        }
    }

    fn check_live(&self) -> Result<(), ProbeSetError> {
        if self.is_released() {
            return Err(ProbeSetError::Released);
        }
        Ok(())
    }

    fn exhausted(&self, word: &str) -> ProbeSetError {
        ProbeSetError::CapacityExceeded { word: word.to_owned(), probes: self.capacity }
    }
}
