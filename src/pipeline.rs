//! Stage composition: read → normalize → tokenize → count → rank → write.
//!
//! Each stage is a plain function over explicit data, so the stages can be
//! tested on their own and the CLI only wires them together.

use crate::config::{Config, RankParams, TableParams};
use crate::corpus;
use crate::error::{BgResult, BigramError};
use crate::ranker::{RankedList, Ranker};
use crate::table::{BigramTable, TableStats};
use crate::writer;
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// A counted corpus.
pub struct Analysis {
    pub table: BigramTable,
    pub tokens: usize,
}

impl Analysis {
    pub fn rank(&self, params: &RankParams) -> RankedList<'_> {
        Ranker::from_params(params).rank_table(&self.table)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub input: PathBuf,
    pub output: PathBuf,
    pub tokens: usize,
    pub distinct: usize,
    pub stats: TableStats,
}

/// Counts the adjacent pairs of `tokens` on the current thread, or across
/// `params.threads` workers when more than one is configured.
pub fn count_tokens(tokens: &[&str], params: &TableParams) -> BgResult<BigramTable> {
    if params.threads > 1 {
        return count_tokens_parallel(tokens, params);
    }

    let mut table = BigramTable::from_params(params)?;
    for (first, second) in corpus::pairs(tokens) {
        table.observe_pair(first, second)?;
    }
    Ok(table)
}

/// Splits the pair range into contiguous slices, counts each slice into a
/// private table and merges the partial tables by summing counts.
///
/// Slice `k` owns pairs `start..end`, which needs tokens `start..=end`, so
/// the boundary token is read by two workers but every pair is counted once.
pub fn count_tokens_parallel(tokens: &[&str], params: &TableParams) -> BgResult<BigramTable> {
    let pair_count = tokens.len().saturating_sub(1);
    let workers = params.threads.clamp(1, pair_count.max(1));
    let chunk = pair_count.div_ceil(workers).max(1);

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .map_err(|e| BigramError::Config(format!("thread pool: {}", e)))?;

    let partials = pool.install(|| {
        (0..workers)
            .into_par_iter()
            .map(|worker| -> BgResult<BigramTable> {
                let start = (worker * chunk).min(pair_count);
                let end = ((worker + 1) * chunk).min(pair_count);

                let mut table = BigramTable::from_params(params)?;
                if start < end {
                    for (first, second) in corpus::pairs(&tokens[start..=end]) {
                        table.observe_pair(first, second)?;
                    }
                }
                Ok(table)
            })
            .collect::<BgResult<Vec<_>>>()
    })?;

    debug!("Merging {} partial tables", partials.len());
    let mut partials = partials.into_iter();
    let mut merged = match partials.next() {
        Some(first) => first,
        None => BigramTable::from_params(params)?,
    };
    for partial in partials {
        merged.merge(partial)?;
    }
    Ok(merged)
}

/// Normalizes and tokenizes `text`, then counts its bigrams.
pub fn count_text(text: &str, params: &TableParams) -> BgResult<BigramTable> {
    let lowered = corpus::normalized(text);
    let tokens: Vec<&str> = corpus::tokenize(&lowered).collect();
    count_tokens(&tokens, params)
}

pub fn analyze_file(input: &Path, config: &Config) -> BgResult<Analysis> {
    config.validate()?;

    let mut text = corpus::read_corpus(input)?;
    corpus::normalize(&mut text);
    let tokens: Vec<&str> = corpus::tokenize(&text).collect();
    debug!("Tokenized {} words", tokens.len());

    let table = count_tokens(&tokens, &config.table)?;
    Ok(Analysis {
        table,
        tokens: tokens.len(),
    })
}

/// The whole batch job: one corpus in, one ranked report out.
pub fn run(config: &Config, input: &Path, output: &Path) -> BgResult<RunSummary> {
    let started = Instant::now();
    info!("📂 Loading corpus: {}", input.display());

    let analysis = analyze_file(input, config)?;
    let stats = analysis.table.stats();
    info!(
        "🔢 Counted {} pairs, {} distinct bigrams ({} buckets, longest chain {})",
        stats.total_observations, stats.entry_count, stats.bucket_count, stats.longest_chain
    );

    let ranked = analysis.rank(&config.rank);
    writer::write_report_file(&ranked, config.report.format, output)?;

    info!("✅ Done in {:.2?}", started.elapsed());
    Ok(RunSummary {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        tokens: analysis.tokens,
        distinct: stats.entry_count,
        stats,
    })
}
