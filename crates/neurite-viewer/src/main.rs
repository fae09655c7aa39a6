use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use neurite_anim::{FrameDriver, NetworkConfig};
use neurite_render::{Recording, Scene, Viewport};

/// Animated neuron and synapse scenes, exported as a self-contained HTML replay.
#[derive(Parser)]
#[command(name = "neurite")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Built-in layout, used when no config file is given
    #[arg(short, long, value_enum, default_value = "neuron")]
    preset: Layout,

    /// JSON layout file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of ticks to record
    #[arg(short, long, default_value = "600")]
    frames: u64,

    /// Seed for start offsets and pulse jitter
    #[arg(short, long)]
    seed: Option<u64>,

    /// Viewport width in pixels
    #[arg(long, default_value = "1280")]
    width: u32,

    /// Viewport height in pixels
    #[arg(long, default_value = "720")]
    height: u32,

    /// Print the resolved layout as JSON and exit
    #[arg(long)]
    dump_config: bool,

    /// Output HTML file
    #[arg(short, long, default_value = "neurite.html")]
    output: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Layout {
    Neuron,
    Synapse,
}

fn resolve_config(cli: &Cli) -> anyhow::Result<NetworkConfig> {
    let mut config = match &cli.config {
        Some(path) => NetworkConfig::load(path)
            .with_context(|| format!("failed to load layout from {}", path.display()))?,
        None => match cli.preset {
            Layout::Neuron => NetworkConfig::neuron_default(),
            Layout::Synapse => NetworkConfig::synapse_default(),
        },
    };
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    Ok(config)
}

fn run(config: &NetworkConfig, frames: u64, viewport: Viewport, output: &Path) -> anyhow::Result<()> {
    let mut scene = Scene::new().with_sphere_segments(config.sphere_segments);
    scene.set_viewport(viewport);

    let mut driver = FrameDriver::start(config, &mut scene).context("failed to start animation")?;
    driver.resize(&mut scene);

    let mut recording = Recording::new();
    let mut failures = 0;
    for _ in 0..frames {
        failures += driver.tick(&mut scene).failures;
        recording.capture(&scene);
    }
    if failures > 0 {
        log::warn!("{} entity updates failed over {} frames", failures, frames);
    }

    scene
        .export_html(&recording, output)
        .with_context(|| format!("failed to write {}", output.display()))?;
    println!(
        "Recorded {} frames of {} meshes to {}",
        recording.len(),
        scene.nodes.len(),
        output.display()
    );
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = resolve_config(&cli)?;
    if cli.dump_config {
        println!("{}", config.to_json_pretty()?);
        return Ok(());
    }

    run(&config, cli.frames, Viewport::new(cli.width, cli.height), &cli.output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_with_defaults() {
        let cli = Cli::try_parse_from(["neurite"]).unwrap();
        assert_eq!(cli.preset, Layout::Neuron);
        assert_eq!(cli.frames, 600);
        assert_eq!(cli.output, PathBuf::from("neurite.html"));
        assert!(cli.config.is_none());
        assert!(!cli.dump_config);
    }

    #[test]
    fn cli_parses_synapse_with_seed() {
        let cli = Cli::try_parse_from([
            "neurite", "--preset", "synapse", "--seed", "7", "--frames", "10",
        ])
        .unwrap();
        assert_eq!(cli.preset, Layout::Synapse);
        let config = resolve_config(&cli).unwrap();
        assert_eq!(config.seed, Some(7));
        assert!(config.pulse.is_some());
    }

    #[test]
    fn cli_rejects_unknown_preset() {
        assert!(Cli::try_parse_from(["neurite", "--preset", "glia"]).is_err());
    }

    #[test]
    fn missing_config_file_reported() {
        let cli = Cli::try_parse_from(["neurite", "--config", "/nonexistent/layout.json"]).unwrap();
        let err = resolve_config(&cli).unwrap_err();
        assert!(err.to_string().contains("failed to load layout"));
    }
}
