use crate::reports;
use bigramstat::config::Config;
use bigramstat::error::BgResult;
use bigramstat::pipeline;
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    #[command(flatten)]
    pub config: Config,

    /// Text corpus to analyze
    pub input: PathBuf,

    /// Report file, overwritten on every run
    #[arg(short, long, default_value = "output.txt")]
    pub output: PathBuf,
}

pub fn run(args: ReportArgs, config: &Config) -> BgResult<()> {
    let summary = pipeline::run(config, &args.input, &args.output)?;
    reports::print_run_summary(&summary);
    Ok(())
}
