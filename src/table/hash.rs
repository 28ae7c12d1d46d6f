use clap::ValueEnum;
use fnv::FnvHasher;
use serde::{Deserialize, Serialize};
use std::hash::{BuildHasher, Hasher};
use strum_macros::{Display, EnumIter};

pub const DJB2_SEED: u64 = 5381;

/// Classic `hash * 33 + byte` string accumulator.
///
/// Streaming: `write(b"ab")` and `write(b"a"); write(b"b")` yield the same
/// state, so callers may feed a bigram in pieces.
#[derive(Debug, Clone, Copy)]
pub struct Djb2Hasher {
    state: u64,
}

impl Default for Djb2Hasher {
    fn default() -> Self {
        Self { state: DJB2_SEED }
    }
}

impl Hasher for Djb2Hasher {
    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.state = (self.state << 5)
                .wrapping_add(self.state)
                .wrapping_add(b as u64);
        }
    }

    #[inline]
    fn finish(&self) -> u64 {
        self.state
    }
}

pub fn djb2(bytes: &[u8]) -> u64 {
    let mut h = Djb2Hasher::default();
    h.write(bytes);
    h.finish()
}

/// Hash function used to pick a bucket. Selectable from the CLI and config file.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    ValueEnum,
    EnumIter,
    Display,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum HashKind {
    #[default]
    Djb2,
    Fnv,
}

pub enum BucketHasher {
    Djb2(Djb2Hasher),
    Fnv(FnvHasher),
}

impl Hasher for BucketHasher {
    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        match self {
            Self::Djb2(h) => h.write(bytes),
            Self::Fnv(h) => h.write(bytes),
        }
    }

    #[inline]
    fn finish(&self) -> u64 {
        match self {
            Self::Djb2(h) => h.finish(),
            Self::Fnv(h) => h.finish(),
        }
    }
}

impl BuildHasher for HashKind {
    type Hasher = BucketHasher;

    fn build_hasher(&self) -> BucketHasher {
        match self {
            Self::Djb2 => BucketHasher::Djb2(Djb2Hasher::default()),
            Self::Fnv => BucketHasher::Fnv(FnvHasher::default()),
        }
    }
}

/// Reduces the hash of `text` to a bucket index in `0..bucket_count`.
#[inline]
pub(crate) fn bucket_index<S: BuildHasher>(hasher: &S, text: &str, bucket_count: usize) -> usize {
    let mut h = hasher.build_hasher();
    h.write(text.as_bytes());
    (h.finish() % bucket_count as u64) as usize
}
