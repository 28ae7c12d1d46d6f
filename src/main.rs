use bigramstat::config::Config;
use bigramstat::error::BgResult;
use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use std::process;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON file with table/rank/report settings; CLI flags override it
    #[arg(global = true, long = "config")]
    config_file: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Count bigrams in a corpus and write the ranked report file
    Report(cmd::report::ReportArgs),
    /// Print the most frequent bigrams without writing a file
    Top(cmd::top::TopArgs),
}

fn main() {
    // Raw matches tell user input apart from defaults
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    tracing_subscriber::fmt()
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    let cli_config = match &cli.command {
        Commands::Report(args) => &args.config,
        Commands::Top(args) => &args.config,
    };

    let config = match resolve_config(cli.config_file.as_deref(), cli_config, &matches) {
        Ok(c) => c,
        Err(e) => {
            error!("❌ {}", e);
            process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Report(args) => cmd::report::run(args, &config),
        Commands::Top(args) => cmd::top::run(args, &config),
    };

    if let Err(e) = result {
        error!("❌ FATAL: {}", e);
        process::exit(1);
    }
}

/// File config (if any) as the base, explicit CLI flags layered on top.
fn resolve_config(
    path: Option<&str>,
    cli_config: &Config,
    matches: &ArgMatches,
) -> BgResult<Config> {
    let config = match path {
        Some(path) => {
            info!("⚙️  Loading config from: {}", path);
            let mut file_config = Config::load_from_file(path)?;
            if let Some((_, sub_matches)) = matches.subcommand() {
                file_config.merge_from_cli(cli_config, sub_matches);
            }
            file_config
        }
        None => cli_config.clone(),
    };

    config.validate()?;
    Ok(config)
}
