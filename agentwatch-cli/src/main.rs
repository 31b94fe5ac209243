mod args;

use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use agentwatch_intel::{build_discussions, build_report, BundledSource};
use agentwatch_probe::Fingerprinter;
use agentwatch_search::{Credentials, Scanner};
use agentwatch_store::FindingStore;
use args::Args;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing based on verbosity
    let filter = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .init();

    // Credentials are read from the environment exactly once, here, and
    // passed down explicitly.
    let credentials = credentials_from_env();

    // Handle --intel: print the report summary and exit
    if args.intel {
        return print_intel_summary();
    }

    // Handle --fingerprint: probe one target and exit
    if let Some(ref target) = args.fingerprint {
        return fingerprint_target(target).await;
    }

    // Handle --scan: one search pass, persist, exit
    if args.scan {
        return run_single_scan(credentials, &args).await;
    }

    // Default: serve
    let listen_addr: std::net::SocketAddr = args
        .listen
        .parse()
        .with_context(|| format!("invalid --listen address: {}", args.listen))?;

    eprintln!("agentwatch dashboard listening on http://{listen_addr}");
    if credentials.is_none() {
        eprintln!("  Search: disabled (set CENSYS_API_ID and CENSYS_API_SECRET to enable scans)");
    }

    let config = agentwatch_api::ApiConfig {
        listen_addr,
        results_path: args.results_path.clone(),
        credentials,
        rescan_interval: args.rescan_secs.map(Duration::from_secs),
    };
    agentwatch_api::start_server(config).await
}

fn credentials_from_env() -> Option<Credentials> {
    let api_id = std::env::var("CENSYS_API_ID").ok()?;
    let api_secret = std::env::var("CENSYS_API_SECRET").ok()?;
    if api_id.is_empty() || api_secret.is_empty() {
        return None;
    }
    Some(Credentials { api_id, api_secret })
}

fn print_intel_summary() -> Result<()> {
    let report = build_report(build_discussions(&BundledSource));

    println!("Discussions found: {}", report.summary.total_discussions);
    println!(
        "By severity: critical {} | high {} | medium {} | low {}",
        report.summary.critical_count,
        report.summary.high_count,
        report.summary.medium_count,
        report.summary.low_count,
    );
    println!("Average severity score: {:.1}", report.summary.average_severity);
    println!("Top concerns:");
    for (i, concern) in report.top_security_concerns.iter().take(5).enumerate() {
        println!("  {}. {} (mentioned {} times)", i + 1, concern.issue, concern.count);
        println!("     {}", concern.mitigation);
    }
    Ok(())
}

async fn fingerprint_target(target: &str) -> Result<()> {
    let (host, port) = target
        .rsplit_once(':')
        .with_context(|| format!("expected HOST:PORT, got '{target}'"))?;
    let port: u16 = port
        .parse()
        .with_context(|| format!("invalid port in '{target}'"))?;

    let fp = Fingerprinter::new().identify(host, port).await;
    println!("{}", serde_json::to_string_pretty(&fp)?);
    Ok(())
}

async fn run_single_scan(credentials: Option<Credentials>, args: &Args) -> Result<()> {
    if credentials.is_none() {
        bail!("no search credentials; set CENSYS_API_ID and CENSYS_API_SECRET");
    }

    let scanner = Scanner::new(credentials);
    let findings = scanner.search().await.context("search failed")?;

    let store = FindingStore::new(&args.results_path);
    store
        .save(&findings)
        .context("failed to save scan results")?;

    info!(count = findings.len(), "scan complete");
    println!(
        "Found {} verified installation(s); results saved to {}",
        findings.len(),
        args.results_path.display()
    );
    Ok(())
}
