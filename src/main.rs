use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use mirrorset::config::Config;
use mirrorset::normalizer::{extract_text, normalize};
use mirrorset::parser::{classify, parse_request};

#[derive(Parser)]
#[command(name = "mirrorset", about = "Build balanced attack/normal HTTP request datasets")]
struct Cli {
    /// Log at debug level (overridden by RUST_LOG).
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Standardize all sources, balance them and write train/val tables.
    Build {
        /// Configuration file (defaults to ~/.config/mirrorset/config.toml if present).
        #[arg(long)]
        config: Option<PathBuf>,
        /// Directory holding the source tables and category files.
        #[arg(long)]
        data_dir: Option<PathBuf>,
        /// Directory the train/val tables are written to.
        #[arg(long)]
        output_dir: Option<PathBuf>,
        /// Seed for sampling and splitting.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show how a raw payload is decomposed into request fields.
    Parse {
        /// Raw request line, body, query string or token.
        payload: String,
    },
    /// Write the default configuration file.
    InitConfig {
        /// Target path (defaults to ~/.config/mirrorset/config.toml).
        #[arg(long)]
        path: Option<PathBuf>,
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    match cli.command {
        Command::Build {
            config,
            data_dir,
            output_dir,
            seed,
        } => {
            let mut cfg = Config::load(config.as_deref()).context("loading configuration")?;
            if let Some(dir) = data_dir {
                cfg.paths.data_dir = dir;
            }
            if let Some(dir) = output_dir {
                cfg.paths.output_dir = dir;
            }
            if let Some(seed) = seed {
                cfg.balance.seed = seed;
            }

            let summary = mirrorset::pipeline::run(&cfg)?;
            if summary.dataset.is_empty() {
                tracing::warn!("no records sampled; check that both label sources are populated");
            }
            println!(
                "sampled {} per label: {} train rows -> {}, {} val rows -> {}",
                summary.dataset.per_label,
                summary.dataset.train.len(),
                summary.tables.train.display(),
                summary.dataset.val.len(),
                summary.tables.val.display(),
            );
        }
        Command::Parse { payload } => {
            let record = parse_request(payload.as_str());
            let combined = extract_text(&record);
            println!("--- Request Simulation ---");
            println!("Shape:    {:?}", classify(&payload));
            println!("Method:   {}", record.method);
            println!("Path:     {}", record.path);
            println!("Query:    {}", record.query);
            println!("Headers:  {}", record.headers);
            println!("Body:     {}", record.body);
            println!("Combined: {combined}");
            println!("Normalized: {}", normalize(combined.as_str()));
            println!("--------------------------");
        }
        Command::InitConfig { path, force } => {
            match Config::write_defaults(path.as_deref(), force)? {
                Some(written) => println!("wrote default configuration to {}", written.display()),
                None => println!("configuration already exists; pass --force to overwrite"),
            }
        }
    }

    Ok(())
}
