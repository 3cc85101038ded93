use std::env;
use std::path::PathBuf;

use anyhow::{Context, bail};
use docsim::{DocsimConfig, PipelineReport, process_paths};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: docsim [--config FILE] [--seed N] [--parallel] [--json] [--log-json] PATH...";

#[derive(Debug, Default)]
struct CliArgs {
    config: Option<PathBuf>,
    seed: Option<u64>,
    parallel: bool,
    json: bool,
    log_json: bool,
    paths: Vec<PathBuf>,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> anyhow::Result<CliArgs> {
    let mut cli = CliArgs::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let path = args.next().context("--config needs a file argument")?;
                cli.config = Some(PathBuf::from(path));
            }
            "--seed" => {
                let raw = args.next().context("--seed needs a number")?;
                let seed = raw
                    .parse()
                    .with_context(|| format!("invalid seed {raw:?}"))?;
                cli.seed = Some(seed);
            }
            "--parallel" => cli.parallel = true,
            "--json" => cli.json = true,
            "--log-json" => cli.log_json = true,
            "-h" | "--help" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            flag if flag.starts_with("--") => bail!("unknown option {flag}\n{USAGE}"),
            _ => cli.paths.push(PathBuf::from(&arg)),
        }
    }
    if cli.paths.is_empty() {
        bail!("no input paths given\n{USAGE}");
    }
    Ok(cli)
}

fn init_tracing(json: bool) {
    // Logs go to stderr so stdout carries only the report.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn print_pairs(report: &PipelineReport) {
    for pair in &report.candidates {
        let band = pair.band.values();
        println!(
            "Candidate pair {} <-> {}: {:?} == {:?}",
            pair.left, pair.right, band, band
        );
    }
    for failure in &report.failures {
        eprintln!("Skipped {}: {}", failure.id, failure.reason);
    }
}

fn main() -> anyhow::Result<()> {
    let cli = parse_args(env::args().skip(1))?;
    init_tracing(cli.log_json);

    let mut config = match &cli.config {
        Some(path) => DocsimConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => DocsimConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.lsh.seed = Some(seed);
    }
    if cli.parallel {
        config.lsh.use_parallel = true;
    }

    let report = process_paths(&cli.paths, &config)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_pairs(&report);
    }

    tracing::info!(
        candidates = report.candidates.len(),
        seed = report.meta.seed,
        "docsim_done"
    );
    Ok(())
}
