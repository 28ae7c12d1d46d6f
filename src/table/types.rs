use serde::Serialize;

/// One distinct bigram and how many times it was observed.
///
/// Only the owning table mutates an entry; everyone else gets `&Entry`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub(crate) bigram: String,
    pub(crate) frequency: u64,
}

impl Entry {
    #[inline]
    pub fn bigram(&self) -> &str {
        &self.bigram
    }

    #[inline]
    pub fn frequency(&self) -> u64 {
        self.frequency
    }
}

/// When (if ever) the bucket array grows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GrowthPolicy {
    /// Bucket count chosen at construction is kept forever.
    Fixed,
    /// Double the bucket count once `entries / buckets` exceeds this value.
    LoadFactor(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableStats {
    pub bucket_count: usize,
    pub entry_count: usize,
    pub total_observations: u64,
    pub longest_chain: usize,
    pub empty_buckets: usize,
    pub load_factor: f64,
    pub resizes: usize,
}
