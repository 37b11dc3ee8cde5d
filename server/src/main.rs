use anyhow::Context;
use bridge::serve;
use chrono::Utc;
use clap::Parser;
use config::ServerConfig;
use generator::samples::build_sar_response;
use log::info;
use std::fs;
use std::net::IpAddr;
use std::path::PathBuf;
use tokio::runtime::Builder as TokioBuilder;

mod bridge;
mod config;
mod generator;

#[derive(Parser)]
#[command(author, version, about = "Sample SAR data backend for the globe dashboard")]
struct Args {
    /// Load a server config from YAML
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    host: Option<IpAddr>,
    #[arg(long)]
    port: Option<u16>,
    #[arg(long)]
    points_per_site: Option<usize>,
    /// Fix the sample RNG so every response is identical
    #[arg(long)]
    seed: Option<u64>,
    /// Emit a single /api/sar-data body and exit instead of serving
    #[arg(long, default_value_t = false)]
    offline: bool,
    /// Where the offline body is written; stdout when unset
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match args.config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };
    config.apply_overrides(args.host, args.port, args.points_per_site, args.seed);
    config.validate()?;

    if args.offline {
        let response = build_sar_response(&config.samples, Utc::now())?;
        let body = serde_json::to_string_pretty(&response)?;
        match args.output {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::write(&path, body)
                    .with_context(|| format!("writing {}", path.display()))?;
                info!("wrote {} points to {}", response.data.len(), path.display());
            }
            None => println!("{}", body),
        }
        return Ok(());
    }

    let runtime = TokioBuilder::new_multi_thread()
        .enable_all()
        .build()
        .context("creating server runtime")?;
    runtime.block_on(serve(config))
}
