use app::SarVisualizer;
use clap::Parser;
use config::VisualizerConfig;
use log::info;
use sarcore::source::HttpFetcher;
use std::path::PathBuf;

mod app;
mod config;
mod globe_view;
mod surface;

type Visualizer = SarVisualizer<HttpFetcher>;

#[derive(Parser)]
#[command(author, version, about = "Interactive SAR observation globe")]
struct Args {
    /// Load a visualizer config from YAML
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override the SAR data endpoint
    #[arg(long)]
    endpoint: Option<String>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match args.config {
        Some(path) => VisualizerConfig::load(path)?,
        None => VisualizerConfig::default(),
    };
    if let Some(endpoint) = args.endpoint {
        config.endpoint = endpoint;
    }

    let fetcher = HttpFetcher::new(config.endpoint.clone(), config.timeout())?;
    info!("loading SAR data from {}", fetcher.endpoint());

    iced::application(
        move || Visualizer::boot(config.clone(), fetcher.clone()),
        Visualizer::update,
        Visualizer::view,
    )
    .title(Visualizer::title)
    .subscription(Visualizer::subscription)
    .theme(Visualizer::theme)
    .run()?;
    Ok(())
}
