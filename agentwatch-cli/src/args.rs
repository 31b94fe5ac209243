use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "agentwatch", version, about = "Security dashboard for exposed chat-agent installations")]
pub struct Args {
    /// Listen address for the API server.
    #[arg(long, default_value = "127.0.0.1:5000")]
    pub listen: String,

    /// Path of the persisted findings file.
    #[arg(long, default_value = "data/results.json")]
    pub results_path: PathBuf,

    /// Re-run the search every N seconds while serving.
    #[arg(long, value_name = "SECONDS")]
    pub rescan_secs: Option<u64>,

    /// Run one search, persist the results, and exit.
    #[arg(long)]
    pub scan: bool,

    /// Fingerprint a single target and exit.
    #[arg(long, value_name = "HOST:PORT")]
    pub fingerprint: Option<String>,

    /// Print the intel report summary and exit.
    #[arg(long)]
    pub intel: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
