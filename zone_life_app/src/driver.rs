// driver.rs - Headless tick loop on a tokio interval

use std::fmt;

use anyhow::Context;
use log::{info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::time::MissedTickBehavior;
use zone_life::cells::merge;
use zone_life::image_seed::image_cells_from_path;
use zone_life::patterns::{body_center_origin, pattern_by_name, pattern_cells};
use zone_life::seed::{random_fill, setup_scene, SetupScene};
use zone_life::{compute_geometry, Geometry, LifeConfig, LifeEngine, LiveCellSet, Rgb};

/// What to run without a window.
#[derive(Debug, Clone)]
pub struct HeadlessRun {
    pub generations: u32,
    /// Seed with this named pattern instead of a random fill
    pub pattern: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Finished,
    Extinct,
    Cycle,
    Interrupted,
}

#[derive(Debug, Clone, Copy)]
pub struct RunSummary {
    pub generations: u32,
    pub population: usize,
    pub reason: StopReason,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self.reason {
            StopReason::Finished => "generation limit reached",
            StopReason::Extinct => "no live cells left",
            StopReason::Cycle => "board entered a cycle",
            StopReason::Interrupted => "interrupted",
        };
        write!(
            f,
            "stopped after {} generations with {} live cells: {}",
            self.generations, self.population, reason
        )
    }
}

/// Build the engine from `config`, seed it and step it on a fixed
/// interval until the generation limit, extinction, a cycle or Ctrl-C.
pub async fn run_headless(config: &LifeConfig, run: HeadlessRun) -> anyhow::Result<RunSummary> {
    let geometry = compute_geometry(config.viewport.width, config.viewport.height, config.cell_size);
    let mut rng = match config.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut engine = LifeEngine::with_rng(geometry, StdRng::from_rng(&mut rng));

    let scene = SetupScene {
        title: &config.title,
        clock: "",
        user_text: "",
        confirm_label: &config.confirm_label,
    };
    let mut cells = setup_scene(&geometry, &scene);
    merge(&mut cells, initial_cells(&geometry, config, &run, &mut rng)?);
    if let Some(path) = &config.image_path {
        let picture = image_cells_from_path(path, &geometry)?;
        info!("{} live cells from {}", picture.len(), path.display());
        merge(&mut cells, picture);
    }
    engine.seed(cells)?;

    info!(
        "headless run: {}x{} cells, {} live, every {:?}",
        geometry.grid_width,
        geometry.grid_height,
        engine.population(),
        config.tick_interval()
    );

    let mut ticker = tokio::time::interval(config.tick_interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker.tick().await;

    let interrupt = tokio::signal::ctrl_c();
    tokio::pin!(interrupt);

    let mut reason = StopReason::Finished;
    while engine.generation() < run.generations {
        tokio::select! {
            _ = ticker.tick() => {}
            signal = &mut interrupt => {
                if let Err(err) = signal {
                    warn!("could not listen for Ctrl-C: {err}");
                }
                reason = StopReason::Interrupted;
                break;
            }
        }

        let report = engine.step();
        info!(
            "generation {}: {} alive (+{} -{})",
            report.generation, report.population, report.births, report.deaths
        );
        if report.is_extinct() {
            reason = StopReason::Extinct;
            break;
        }
        if report.cycle_detected {
            reason = StopReason::Cycle;
            break;
        }
    }

    Ok(RunSummary {
        generations: engine.generation(),
        population: engine.population(),
        reason,
    })
}

fn initial_cells(
    geometry: &Geometry,
    config: &LifeConfig,
    run: &HeadlessRun,
    rng: &mut StdRng,
) -> anyhow::Result<LiveCellSet> {
    match &run.pattern {
        Some(name) => {
            let pattern = pattern_by_name(name).with_context(|| format!("unknown pattern {name:?}"))?;
            let color = Rgb::new(rng.random(), rng.random(), rng.random());
            let origin = body_center_origin(pattern, geometry);
            Ok(pattern_cells(pattern, origin, color, geometry))
        }
        None => Ok(random_fill(geometry, config.random_density, rng)),
    }
}
