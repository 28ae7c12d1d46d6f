use crate::error::{BgResult, BigramError};
use crate::ranker::{SortStrategy, TieBreak};
use crate::table::{GrowthPolicy, HashKind};
use crate::writer::ReportFormat;
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    #[command(flatten)]
    pub table: TableParams,
    #[command(flatten)]
    pub rank: RankParams,
    #[command(flatten)]
    pub report: ReportParams,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TableParams {
    /// Initial number of hash buckets
    #[arg(long, default_value_t = 100)]
    pub bucket_count: usize,

    /// Average chain length that triggers doubling the bucket array
    #[arg(long, default_value_t = 2.0)]
    pub max_load_factor: f64,

    /// Never resize the bucket array
    #[arg(long, default_value_t = false)]
    pub fixed_buckets: bool,

    #[arg(long, value_enum, default_value_t = HashKind::Djb2)]
    pub hash: HashKind,

    /// Worker threads used for counting (1 = sequential)
    #[arg(long, default_value_t = 1)]
    pub threads: usize,
}

impl Default for TableParams {
    fn default() -> Self {
        Self {
            bucket_count: 100,
            max_load_factor: 2.0,
            fixed_buckets: false,
            hash: HashKind::Djb2,
            threads: 1,
        }
    }
}

impl TableParams {
    pub fn growth(&self) -> GrowthPolicy {
        if self.fixed_buckets {
            GrowthPolicy::Fixed
        } else {
            GrowthPolicy::LoadFactor(self.max_load_factor)
        }
    }
}

#[derive(Args, Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RankParams {
    #[arg(long, value_enum, default_value_t = SortStrategy::Merge)]
    pub sort: SortStrategy,

    #[arg(long, value_enum, default_value_t = TieBreak::None)]
    pub tie_break: TieBreak,
}

#[derive(Args, Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReportParams {
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

impl Config {
    /// Reads a JSON config. Missing fields fall back to the defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> BgResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            BigramError::Config(format!("failed to read '{}': {}", path.display(), e))
        })?;

        Ok(serde_json::from_str(&content)?)
    }

    /// Copies every value that was typed on the command line from `cli` onto `self`.
    pub fn merge_from_cli(&mut self, cli: &Config, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($group:ident . $field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$group.$field = cli.$group.$field.clone();
                }
            };
        }

        update_if_present!(table.bucket_count);
        update_if_present!(table.max_load_factor);
        update_if_present!(table.fixed_buckets);
        update_if_present!(table.hash);
        update_if_present!(table.threads);

        update_if_present!(rank.sort);
        update_if_present!(rank.tie_break);

        update_if_present!(report.format);
    }

    pub fn validate(&self) -> BgResult<()> {
        if self.table.bucket_count == 0 {
            return Err(BigramError::Config(
                "bucket_count must be at least 1".to_string(),
            ));
        }
        if self.table.threads == 0 {
            return Err(BigramError::Config("threads must be at least 1".to_string()));
        }
        if !self.table.fixed_buckets
            && !(self.table.max_load_factor.is_finite() && self.table.max_load_factor > 0.0)
        {
            return Err(BigramError::Config(format!(
                "max_load_factor must be a positive number, got {}",
                self.table.max_load_factor
            )));
        }
        Ok(())
    }
}
