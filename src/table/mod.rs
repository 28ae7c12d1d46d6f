pub mod hash;
pub mod types;

use crate::config::TableParams;
use crate::error::{BgResult, BigramError};
use std::hash::BuildHasher;
use tracing::debug;

pub use self::hash::HashKind;
pub use self::types::{Entry, GrowthPolicy, TableStats};

/// Separate-chaining hash table from canonical bigram text to its count.
///
/// Every distinct bigram lives in exactly one chain, so the table never holds
/// two entries with equal text. The sum of all frequencies always equals
/// [`total_observations`](Self::total_observations).
///
/// Chains are stored oldest-first and enumerated newest-first, which mirrors a
/// prepend-on-insert linked list.
pub struct BigramTable<S = HashKind> {
    buckets: Vec<Vec<Entry>>,
    len: usize,
    observations: u64,
    resizes: usize,
    growth: GrowthPolicy,
    hasher: S,
    scratch: String,
}

impl BigramTable<HashKind> {
    /// Fixed-capacity table using the djb2 hash.
    pub fn new(bucket_count: usize) -> BgResult<Self> {
        Self::with_hasher(bucket_count, HashKind::default())
    }

    pub fn from_params(params: &TableParams) -> BgResult<Self> {
        Self::with_hasher(params.bucket_count, params.hash)?.with_growth(params.growth())
    }
}

impl<S: BuildHasher> BigramTable<S> {
    pub fn with_hasher(bucket_count: usize, hasher: S) -> BgResult<Self> {
        if bucket_count == 0 {
            return Err(BigramError::Config(
                "bucket count must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            buckets: alloc_buckets(bucket_count)?,
            len: 0,
            observations: 0,
            resizes: 0,
            growth: GrowthPolicy::Fixed,
            hasher,
            scratch: String::new(),
        })
    }

    /// Rejects a load factor that is not a positive finite number; a factor
    /// of zero would double the bucket array on every insert.
    pub fn with_growth(mut self, growth: GrowthPolicy) -> BgResult<Self> {
        if let GrowthPolicy::LoadFactor(max) = growth {
            if !(max.is_finite() && max > 0.0) {
                return Err(BigramError::Config(format!(
                    "max load factor must be a positive number, got {}",
                    max
                )));
            }
        }
        self.growth = growth;
        Ok(self)
    }

    /// Counts one occurrence of `text`, returning its updated frequency.
    pub fn observe(&mut self, text: &str) -> BgResult<u64> {
        self.add(text, 1)
    }

    /// Counts the bigram `"<first> <second>"`.
    ///
    /// The key is assembled in a reused buffer; a new `String` is only
    /// allocated the first time a bigram is seen.
    pub fn observe_pair(&mut self, first: &str, second: &str) -> BgResult<u64> {
        let mut key = std::mem::take(&mut self.scratch);
        key.clear();
        key.push_str(first);
        key.push(' ');
        key.push_str(second);

        let result = self.add(&key, 1);
        self.scratch = key;
        result
    }

    /// Folds every entry of `other` into this table, summing counts of equal bigrams.
    pub fn merge<T: BuildHasher>(&mut self, other: BigramTable<T>) -> BgResult<()> {
        for entry in other.into_entries() {
            let idx = self.bucket_of(&entry.bigram);
            if let Some(existing) = self.buckets[idx]
                .iter_mut()
                .find(|e| e.bigram == entry.bigram)
            {
                existing.frequency += entry.frequency;
                self.observations += entry.frequency;
                continue;
            }
            self.push_entry(idx, entry)?;
        }
        Ok(())
    }

    pub fn get(&self, text: &str) -> Option<u64> {
        self.buckets[self.bucket_of(text)]
            .iter()
            .find(|e| e.bigram == text)
            .map(|e| e.frequency)
    }

    /// Bucket currently responsible for `text`.
    #[inline]
    pub fn bucket_of(&self, text: &str) -> usize {
        hash::bucket_index(&self.hasher, text, self.buckets.len())
    }

    /// Every entry, bucket by bucket, newest-first inside a bucket.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> + '_ {
        self.buckets.iter().flat_map(|chain| chain.iter().rev())
    }

    pub fn all_entries(&self) -> Vec<&Entry> {
        let mut out = Vec::with_capacity(self.len);
        out.extend(self.entries());
        out
    }

    pub fn into_entries(self) -> impl Iterator<Item = Entry> {
        self.buckets
            .into_iter()
            .flat_map(|chain| chain.into_iter().rev())
    }

    #[inline]
    pub fn entry_count(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn total_observations(&self) -> u64 {
        self.observations
    }

    #[inline]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn growth(&self) -> GrowthPolicy {
        self.growth
    }

    pub fn stats(&self) -> TableStats {
        let longest_chain = self.buckets.iter().map(Vec::len).max().unwrap_or(0);
        let empty_buckets = self.buckets.iter().filter(|c| c.is_empty()).count();

        TableStats {
            bucket_count: self.buckets.len(),
            entry_count: self.len,
            total_observations: self.observations,
            longest_chain,
            empty_buckets,
            load_factor: self.load_factor(),
            resizes: self.resizes,
        }
    }

    #[inline]
    fn load_factor(&self) -> f64 {
        self.len as f64 / self.buckets.len() as f64
    }

    fn add(&mut self, text: &str, count: u64) -> BgResult<u64> {
        let idx = self.bucket_of(text);

        if let Some(entry) = self.buckets[idx].iter_mut().find(|e| e.bigram == text) {
            entry.frequency += count;
            self.observations += count;
            return Ok(entry.frequency);
        }

        let mut bigram = String::new();
        bigram.try_reserve_exact(text.len()).map_err(|e| {
            BigramError::Allocation(format!("bigram text '{}': {}", text, e))
        })?;
        bigram.push_str(text);

        self.push_entry(
            idx,
            Entry {
                bigram,
                frequency: count,
            },
        )?;
        Ok(count)
    }

    fn push_entry(&mut self, idx: usize, entry: Entry) -> BgResult<()> {
        let chain = &mut self.buckets[idx];
        chain.try_reserve(1).map_err(|e| {
            BigramError::Allocation(format!("entry for '{}': {}", entry.bigram, e))
        })?;

        self.observations += entry.frequency;
        self.len += 1;
        chain.push(entry);

        self.maybe_grow()
    }

    fn maybe_grow(&mut self) -> BgResult<()> {
        if let GrowthPolicy::LoadFactor(max) = self.growth {
            if self.load_factor() > max {
                let target = self.buckets.len().checked_mul(2).ok_or_else(|| {
                    BigramError::Allocation("bucket count overflow".to_string())
                })?;
                self.rehash(target)?;
            }
        }
        Ok(())
    }

    /// Moves every entry into a fresh array of `bucket_count` chains.
    ///
    /// All memory is reserved up front; on failure the table is left untouched.
    fn rehash(&mut self, bucket_count: usize) -> BgResult<()> {
        let mut sizes: Vec<usize> = Vec::new();
        sizes
            .try_reserve_exact(bucket_count)
            .map_err(|e| BigramError::Allocation(format!("rehash scratch: {}", e)))?;
        sizes.resize(bucket_count, 0);

        for entry in self.buckets.iter().flatten() {
            sizes[hash::bucket_index(&self.hasher, &entry.bigram, bucket_count)] += 1;
        }

        let mut fresh = alloc_buckets(bucket_count)?;
        for (chain, &size) in fresh.iter_mut().zip(&sizes) {
            if size > 0 {
                chain
                    .try_reserve_exact(size)
                    .map_err(|e| BigramError::Allocation(format!("rehash chain: {}", e)))?;
            }
        }

        let old = std::mem::replace(&mut self.buckets, fresh);
        for entry in old.into_iter().flatten() {
            let idx = hash::bucket_index(&self.hasher, &entry.bigram, bucket_count);
            self.buckets[idx].push(entry);
        }
        self.resizes += 1;

        debug!(
            "Rehashed {} entries into {} buckets (resize #{})",
            self.len, bucket_count, self.resizes
        );
        Ok(())
    }
}

fn alloc_buckets(bucket_count: usize) -> BgResult<Vec<Vec<Entry>>> {
    let mut buckets: Vec<Vec<Entry>> = Vec::new();
    buckets.try_reserve_exact(bucket_count).map_err(|e| {
        BigramError::Allocation(format!("{} buckets: {}", bucket_count, e))
    })?;
    buckets.resize_with(bucket_count, Vec::new);
    Ok(buckets)
}
