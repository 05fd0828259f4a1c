// File: crates/demo/src/main.rs
// Summary: Loads a weather dataset, replays a sequence of viewport sizes (and optionally a hover) against
// the scatter or line chart, then writes the settled scene as SVG (and PNG with the `png` feature).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use responsive_chart::{
    render_svg, ChartConfig, Encodings, FileProvider, LineChart, RecordKey, ScatterChart, Scene, Viewport,
};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "weather-demo", about = "Render the responsive weather charts headlessly.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Dew point vs humidity scatter plot.
    Scatter {
        #[command(flatten)]
        render: RenderArgs,
        /// Record key (YYYY-MM-DD) to hover after the last resize.
        #[arg(long, value_name = "KEY")]
        hover: Option<String>,
    },
    /// Daily value over time with a threshold band.
    Line {
        #[command(flatten)]
        render: RenderArgs,
    },
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Dataset (.json array of records or .csv with a date column).
    #[arg(long, value_name = "FILE", default_value = "data/weather.json")]
    data: PathBuf,
    /// TOML chart configuration; built-in defaults when omitted.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Viewport size; repeat to replay a sequence of window resizes.
    #[arg(long = "viewport", value_name = "WxH", default_value = "1024x640")]
    viewports: Vec<Viewport>,
    /// SVG output path.
    #[arg(long, value_name = "FILE", default_value = "target/demo_out/chart.svg")]
    out: PathBuf,
    /// PNG output path.
    #[cfg(feature = "png")]
    #[arg(long, value_name = "FILE")]
    png: Option<PathBuf>,
}

impl RenderArgs {
    fn config(&self, fallback: ChartConfig) -> Result<ChartConfig> {
        match &self.config {
            Some(path) => ChartConfig::load(path).with_context(|| format!("failed to load config '{}'", path.display())),
            None => Ok(fallback),
        }
    }

    fn source(&self) -> Result<&str> {
        self.data.to_str().context("dataset path is not valid UTF-8")
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Respects RUST_LOG; defaults to info.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Scatter { render, hover } => scatter(&render, hover.as_deref()).await,
        Commands::Line { render } => line(&render).await,
    }
}

async fn scatter(args: &RenderArgs, hover: Option<&str>) -> Result<()> {
    let config = args.config(ChartConfig::scatter())?;
    let mut scene = Scene::new();
    let mut chart = ScatterChart::load(&FileProvider, args.source()?, Encodings::default(), config, &mut scene)
        .await
        .with_context(|| format!("failed to load dataset '{}'", args.data.display()))?;

    for vp in &args.viewports {
        match chart.resize(&mut scene, *vp) {
            Ok(report) => info!(
                viewport = %format!("{}x{}", vp.width, vp.height),
                entered = report.entered,
                updated = report.updated,
                exited = report.exited,
                skipped = report.skipped,
                "resized"
            ),
            Err(e) => warn!(error = %e, "viewport skipped"),
        }
        scene.settle();
    }

    if let Some(key) = hover {
        if !chart.pointer_enter(&mut scene, &RecordKey::new(key)) {
            warn!(key, "no mark bound to hover key");
        }
    }

    write_outputs(args, &scene, chart.config()).await
}

async fn line(args: &RenderArgs) -> Result<()> {
    let config = args.config(ChartConfig::timeline())?;
    let mut scene = Scene::new();
    let mut chart = LineChart::load(&FileProvider, args.source()?, config.clone(), &mut scene)
        .await
        .with_context(|| format!("failed to load dataset '{}'", args.data.display()))?;

    for vp in &args.viewports {
        match chart.render(&mut scene, *vp) {
            Ok(report) => info!(points = report.points, segments = report.segments, "rendered"),
            Err(e) => warn!(error = %e, "viewport skipped"),
        }
    }
    scene.settle();

    write_outputs(args, &scene, &config).await
}

async fn write_outputs(args: &RenderArgs, scene: &Scene, config: &ChartConfig) -> Result<()> {
    let theme = config.theme();
    write_file(&args.out, render_svg(scene, &theme).into_bytes()).await?;
    println!("Wrote {}", args.out.display());

    #[cfg(feature = "png")]
    if let Some(path) = &args.png {
        let (w, h) = scene.size();
        let bytes = chart_render_skia::render_png(scene, &theme, w.round() as i32, h.round() as i32)?;
        write_file(path, bytes).await?;
        println!("Wrote {}", path.display());
    }
    Ok(())
}

async fn write_file(path: &Path, bytes: Vec<u8>) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, bytes)
        .await
        .with_context(|| format!("failed to write '{}'", path.display()))
}
