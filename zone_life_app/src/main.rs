// main.rs - Zoned Game of Life: egui window or headless tokio run

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use eframe::egui;
use log::info;
use zone_life::LifeConfig;

mod driver;
mod ui;

use driver::HeadlessRun;
use ui::ZoneLifeApp;

#[derive(Parser, Debug)]
#[command(name = "zone-life", version, about = "Game of Life that flows around and through its own UI")]
struct Cli {
    /// YAML config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,
    /// Run without a window, logging each generation
    #[arg(long)]
    headless: bool,
    /// Generation limit for headless runs
    #[arg(long, default_value_t = 200)]
    generations: u32,
    /// Seed a headless run with a named pattern instead of random cells
    #[arg(long)]
    pattern: Option<String>,
    #[arg(long)]
    interval_ms: Option<u64>,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    cell_size: Option<u32>,
    #[arg(long)]
    density: Option<f64>,
    /// Picture to sample into the setup scene
    #[arg(long)]
    image: Option<PathBuf>,
}

impl Cli {
    fn load_config(&self) -> anyhow::Result<LifeConfig> {
        let mut config = match &self.config {
            Some(path) => LifeConfig::from_yaml(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => LifeConfig::default(),
        };
        if let Some(millis) = self.interval_ms {
            config.tick_interval_ms = millis;
        }
        if let Some(seed) = self.seed {
            config.rng_seed = Some(seed);
        }
        if let Some(cell_size) = self.cell_size {
            config.cell_size = cell_size;
        }
        if let Some(density) = self.density {
            config.random_density = density;
        }
        if let Some(image) = &self.image {
            config.image_path = Some(image.clone());
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    let config = cli.load_config()?;

    if cli.headless {
        let run = HeadlessRun {
            generations: cli.generations,
            pattern: cli.pattern.clone(),
        };
        let runtime = tokio::runtime::Runtime::new()?;
        let summary = runtime.block_on(driver::run_headless(&config, run))?;
        info!("{summary}");
        println!("{summary}");
        return Ok(());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.viewport.width, config.viewport.height]),
        ..Default::default()
    };

    eframe::run_native(
        "Zone Life",
        options,
        Box::new(move |_cc| Box::new(ZoneLifeApp::new(config))),
    )
    .map_err(|err| anyhow::anyhow!("window failed: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::parse_from(["zone-life", "--seed", "5", "--interval-ms", "250", "--density", "0.4"]);
        let config = cli.load_config().unwrap();
        assert_eq!(config.rng_seed, Some(5));
        assert_eq!(config.tick_interval_ms, 250);
        assert_eq!(config.random_density, 0.4);
        assert!(!cli.headless);
    }

    #[test]
    fn bad_override_fails_validation() {
        let cli = Cli::parse_from(["zone-life", "--cell-size", "0"]);
        assert!(cli.load_config().is_err());
    }

    #[test]
    fn headless_flags_parse() {
        let cli = Cli::parse_from(["zone-life", "--headless", "--generations", "12", "--pattern", "glider"]);
        assert!(cli.headless);
        assert_eq!(cli.generations, 12);
        assert_eq!(cli.pattern.as_deref(), Some("glider"));
    }

    #[test]
    fn image_flag_reaches_config() {
        let cli = Cli::parse_from(["zone-life", "--image", "seed.png"]);
        let config = cli.load_config().unwrap();
        assert_eq!(config.image_path, Some(PathBuf::from("seed.png")));
    }
}
