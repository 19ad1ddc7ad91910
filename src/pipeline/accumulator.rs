//! Concurrent key → count accumulator.
//!
//! Workers call [`CountAccumulator::increment`] from any thread; the map is
//! split into independently locked shards so increments for different keys
//! rarely contend. Once every worker is done, [`CountAccumulator::into_tally`]
//! (or [`CountAccumulator::snapshot`]) produces an immutable [`Tally`].
//!
//! Counts are exact: each `increment` lands in exactly one shard under that
//! shard's lock, so the result does not depend on how work was scheduled.

use std::collections::hash_map::RandomState;
use std::collections::HashMap;
use std::hash::{BuildHasher, Hash, Hasher};
use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Shards per available core. Keeps lock contention low for skewed keys.
const SHARDS_PER_CORE: usize = 4;

/// Sharded, lock-protected counter map.
pub struct CountAccumulator<K> {
    shards: Box<[Mutex<HashMap<K, u64>>]>,
    hasher: RandomState,
}

impl<K: Hash + Eq> CountAccumulator<K> {
    /// Create an accumulator sized for the machine's available parallelism.
    pub fn new() -> Self {
        let cores = std::thread::available_parallelism().map_or(8, NonZeroUsize::get);
        Self::with_shards(cores * SHARDS_PER_CORE)
    }

    /// Create an accumulator with at least `count` shards (rounded up to a
    /// power of two, minimum one).
    pub fn with_shards(count: usize) -> Self {
        let count = count.max(1).next_power_of_two();
        let shards = (0..count).map(|_| Mutex::new(HashMap::new())).collect();
        Self {
            shards,
            hasher: RandomState::new(),
        }
    }

    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    /// Add one occurrence of `key`. Safe to call concurrently.
    pub fn increment(&self, key: K) {
        self.add(key, 1);
    }

    /// Add `n` occurrences of `key`, e.g. when merging a partial count.
    /// Adding zero is a no-op, so a key is never stored with a zero count.
    pub fn add(&self, key: K, n: u64) {
        if n == 0 {
            return;
        }
        let mut shard = self.lock_shard(&key);
        *shard.entry(key).or_insert(0) += n;
    }

    /// Merge every shard into an owned tally without consuming the
    /// accumulator.
    pub fn snapshot(&self) -> Tally<K>
    where
        K: Clone,
    {
        let mut counts = HashMap::new();
        for shard in self.shards.iter() {
            let shard = shard.lock().unwrap_or_else(PoisonError::into_inner);
            counts.extend(shard.iter().map(|(k, v)| (k.clone(), *v)));
        }
        Tally { counts }
    }

    /// Finish accumulation and take the counts.
    pub fn into_tally(self) -> Tally<K> {
        let mut counts = HashMap::new();
        for shard in self.shards.into_vec() {
            counts.extend(shard.into_inner().unwrap_or_else(PoisonError::into_inner));
        }
        Tally { counts }
    }

    fn lock_shard(&self, key: &K) -> MutexGuard<'_, HashMap<K, u64>> {
        let mut state = self.hasher.build_hasher();
        key.hash(&mut state);
        // shard count is a power of two
        let idx = (state.finish() as usize) & (self.shards.len() - 1);
        // a panicking worker cannot leave a half-applied increment behind,
        // so a poisoned shard still holds correct counts
        self.shards[idx]
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<K: Hash + Eq> Default for CountAccumulator<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Finalised counts from one batch run. Keys are unique and every count is
/// at least one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tally<K: Hash + Eq> {
    counts: HashMap<K, u64>,
}

impl<K: Hash + Eq> Tally<K> {
    /// Count for `key`, zero if it never occurred.
    pub fn get(&self, key: &K) -> u64 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Unordered iteration over `(key, count)`.
    pub fn iter(&self) -> impl Iterator<Item = (&K, u64)> + '_ {
        self.counts.iter().map(|(k, v)| (k, *v))
    }

    /// All entries in ascending key order.
    pub fn sorted(&self) -> Vec<(K, u64)>
    where
        K: Ord + Clone,
    {
        let mut entries: Vec<(K, u64)> = self.iter().map(|(k, v)| (k.clone(), v)).collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        entries
    }
}

impl<K: Hash + Eq> Default for Tally<K> {
    fn default() -> Self {
        Self {
            counts: HashMap::new(),
        }
    }
}
