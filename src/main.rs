//! LoCon rank rewriter CLI
//!
//! Entry point for the `locon-rank` command-line tool.

use clap::error::ErrorKind as ClapErrorKind;
use clap::Parser;
use locon_rank::{PlanSummary, RewritePlan};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "locon-rank")]
#[command(about = "Rewrite a LoCon training config for a new conv rank", version)]
struct Cli {
    /// New value for conv_dim and conv_alpha
    #[arg(allow_negative_numbers = true)]
    rank: i64,

    /// Path to the base training config (.json or .toml)
    config: PathBuf,

    /// Print the target path without creating directories or writing the config
    #[arg(long)]
    dry_run: bool,

    /// Output in JSON format
    #[arg(long)]
    json: bool,

    /// Enable debug logging on stderr
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[derive(serde::Serialize)]
struct JsonOutput {
    #[serde(flatten)]
    summary: PlanSummary,
    dry_run: bool,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion => e.exit(),
            // Usage errors and a non-integer rank exit 1, not clap's default 2.
            _ => {
                let _ = e.print();
                process::exit(1);
            }
        },
    };

    init_logging(cli.verbose);

    run_rewrite(&cli);
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("locon_rank={}", default_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn run_rewrite(cli: &Cli) {
    let plan = match RewritePlan::build(cli.rank, &cli.config) {
        Ok(plan) => plan,
        Err(e) => fail(&e),
    };

    if !cli.dry_run {
        if let Err(e) = plan.apply() {
            fail(&e);
        }
    }

    if cli.json {
        let output = JsonOutput {
            summary: plan.summary(),
            dry_run: cli.dry_run,
        };
        match serde_json::to_string_pretty(&output) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing output: {}", e);
                process::exit(1);
            }
        }
    } else {
        println!("{}", plan.config_path().display());
    }
}

fn fail(e: &locon_rank::RewriteError) -> ! {
    tracing::debug!(kind = e.kind().as_str(), "rewrite failed");
    eprintln!("An error occurred: {}", e);
    process::exit(1);
}
