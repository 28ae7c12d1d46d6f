pub mod bubble;
pub mod merge;

use crate::config::RankParams;
use crate::table::{BigramTable, Entry};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::hash::BuildHasher;
use strum_macros::{Display, EnumIter};
use tracing::debug;

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
pub enum SortStrategy {
    /// O(n log n) stable merge sort.
    #[default]
    Merge,
    /// O(n^2) exchange sort.
    Bubble,
    /// `slice::sort_by` from the standard library.
    Std,
}

/// Ordering among entries with equal frequency.
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
pub enum TieBreak {
    /// Ties keep table enumeration order. Implementation-defined: it depends on
    /// the hash, the bucket count and the resize history.
    #[default]
    None,
    /// Ties are ordered by bigram text, ascending.
    Lexical,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Ranker {
    pub strategy: SortStrategy,
    pub tie_break: TieBreak,
}

impl Ranker {
    pub fn new(strategy: SortStrategy, tie_break: TieBreak) -> Self {
        Self {
            strategy,
            tie_break,
        }
    }

    pub fn from_params(params: &RankParams) -> Self {
        Self::new(params.sort, params.tie_break)
    }

    /// Orders borrowed entries by non-increasing frequency.
    pub fn rank<'a>(&self, mut entries: Vec<&'a Entry>) -> RankedList<'a> {
        let tie_break = self.tie_break;
        let cmp = |a: &&Entry, b: &&Entry| compare(a, b, tie_break);

        match self.strategy {
            SortStrategy::Merge => merge::merge_sort_by(&mut entries, cmp),
            SortStrategy::Bubble => bubble::bubble_sort_by(&mut entries, cmp),
            SortStrategy::Std => entries.sort_by(cmp),
        }

        debug!(
            "Ranked {} entries with {} sort ({} ties)",
            entries.len(),
            self.strategy,
            self.tie_break
        );
        RankedList { entries }
    }

    pub fn rank_table<'a, S: BuildHasher>(&self, table: &'a BigramTable<S>) -> RankedList<'a> {
        self.rank(table.all_entries())
    }
}

fn compare(a: &Entry, b: &Entry, tie_break: TieBreak) -> Ordering {
    b.frequency
        .cmp(&a.frequency)
        .then_with(|| match tie_break {
            TieBreak::None => Ordering::Equal,
            TieBreak::Lexical => a.bigram.cmp(&b.bigram),
        })
}

/// Read-only view of table entries in rank order.
#[derive(Debug, Clone)]
pub struct RankedList<'a> {
    entries: Vec<&'a Entry>,
}

impl<'a> RankedList<'a> {
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, rank: usize) -> Option<&'a Entry> {
        self.entries.get(rank).copied()
    }

    pub fn entries(&self) -> &[&'a Entry] {
        &self.entries
    }

    /// `(bigram, frequency)` pairs in rank order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, u64)> + '_ {
        self.entries.iter().map(|e| (e.bigram(), e.frequency()))
    }

    /// The first `n` entries (or all of them, if fewer).
    pub fn top(&self, n: usize) -> &[&'a Entry] {
        &self.entries[..n.min(self.entries.len())]
    }

    pub fn total_frequency(&self) -> u64 {
        self.entries.iter().map(|e| e.frequency()).sum()
    }
}
