use crate::config::Config;
use crate::terminal::TerminalOptions;
use anyhow::Context;
use clap::Parser;
use std::io::IsTerminal;
use std::path::PathBuf;

mod capture;
mod config;
mod flower;
mod render;
mod terminal;

/// An animated rainbow flower for your terminal.
#[derive(Parser)]
#[command(author, version, about = "An animated rainbow flower for your terminal")]
struct Cli {
    /// Path to the config file.
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Render the fully bloomed flower into a PNG file and exit.
    #[clap(long, value_name = "PATH")]
    capture: Option<PathBuf>,

    /// Frames per second for the animation loop, overriding the config file.
    #[clap(long)]
    fps: Option<u32>,

    /// Begin growing immediately instead of waiting for the start key.
    #[clap(long)]
    autostart: bool,
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load(cli.config.as_deref()).context("loading configuration")?;
    let palette = config.resolve_palette()?;

    if let Some(path) = &cli.capture {
        capture::capture_bloom(path, palette)
            .with_context(|| format!("capturing bloom into {}", path.display()))?;
        return Ok(());
    }

    if !std::io::stdout().is_terminal() {
        anyhow::bail!("stdout is not a terminal; use --capture to render into a file");
    }
    let fps = cli.fps.unwrap_or(config.fps).clamp(1, 120);
    terminal::run(TerminalOptions { palette, fps, autostart: cli.autostart })?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("error: {error:#}");
        std::process::exit(1);
    }
}
