use clap::Parser;
use std::path::PathBuf;
use worktree_reset_repro::scenario;

#[derive(Parser)]
#[command(name = "worktree-reset-repro")]
#[command(about = "Runs a hard-reset scenario against a deleted, ignore-listed file")]
struct Cli {
    /// Working directory for the scenario repository
    #[arg(long, default_value = "testRepo")]
    path: PathBuf,

    /// Print the report as JSON instead of human-readable text
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let report = scenario::run(&cli.path)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{report}");
    }

    // A dirty tree after reset is reported, not treated as a failure.
    Ok(())
}
