use crate::reports;
use bigramstat::config::Config;
use bigramstat::error::BgResult;
use bigramstat::pipeline;
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct TopArgs {
    #[command(flatten)]
    pub config: Config,

    /// Text corpus to analyze
    pub input: PathBuf,

    /// How many ranked bigrams to show
    #[arg(short = 'n', long, default_value_t = 20)]
    pub limit: usize,
}

pub fn run(args: TopArgs, config: &Config) -> BgResult<()> {
    let analysis = pipeline::analyze_file(&args.input, config)?;
    let ranked = analysis.rank(&config.rank);

    reports::print_ranking(&ranked, args.limit);
    reports::print_table_stats(&analysis.table.stats());
    Ok(())
}
