mod config;
mod output;
mod scenes;

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use softgpu_render::Gpu;
use tracing_subscriber::EnvFilter;

use crate::config::{OutputFormat, RenderConfig, SceneKind};

#[derive(Parser)]
#[command(name = "softgpu-cli", about = "Render demo scenes with the software GPU")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Render one frame of a built-in scene
    Render {
        /// Scene to draw
        #[arg(short, long, value_enum, default_value = "phong")]
        scene: SceneKind,
        /// Framebuffer width in pixels
        #[arg(long, default_value = "320")]
        width: u32,
        /// Framebuffer height in pixels
        #[arg(long, default_value = "240")]
        height: u32,
        /// Distance from the camera to the scene origin
        #[arg(long, default_value = "3.0")]
        distance: f32,
        /// Output format
        #[arg(short, long, value_enum, default_value = "ppm")]
        format: OutputFormat,
        /// Output file (standard output when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// JSON render config; replaces all other render options
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Write the effective render config as JSON to this path
        #[arg(long)]
        save_config: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Info => {
            println!("softgpu-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", softgpu_common::crate_info());
            println!("objects: {}", softgpu_objects::crate_info());
            println!("render: {}", softgpu_render::crate_info());
            println!(
                "limits: {} attributes, {} uniforms",
                softgpu_common::MAX_ATTRIBUTES,
                softgpu_common::MAX_UNIFORMS
            );
        }
        Commands::Render {
            scene,
            width,
            height,
            distance,
            format,
            output,
            config,
            save_config,
        } => {
            let config = match config {
                Some(path) => RenderConfig::load(&path)?,
                None => {
                    let config = RenderConfig {
                        scene,
                        width,
                        height,
                        camera_distance: distance,
                        format,
                        output,
                        ..RenderConfig::default()
                    };
                    config.validate()?;
                    config
                }
            };
            if let Some(path) = save_config {
                config.save(&path)?;
            }
            run_render(&config)?;
        }
    }

    Ok(())
}

fn run_render(config: &RenderConfig) -> anyhow::Result<()> {
    let mut gpu = Gpu::new();
    let stats = scenes::render(&mut gpu, config)?;
    tracing::debug!(?stats, "draw stats");

    let fb = gpu.framebuffer();
    match (config.format, &config.output) {
        (OutputFormat::Ppm, Some(path)) => output::save_ppm(fb, path)?,
        (OutputFormat::Ppm, None) => {
            let stdout = std::io::stdout();
            output::write_ppm(fb, stdout.lock()).context("writing PPM to stdout")?;
        }
        (OutputFormat::Ascii, Some(path)) => {
            std::fs::write(path, output::ascii_preview(fb, 80))
                .with_context(|| format!("writing {}", path.display()))?;
        }
        (OutputFormat::Ascii, None) => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(output::ascii_preview(fb, 80).as_bytes())?;
        }
    }
    Ok(())
}
