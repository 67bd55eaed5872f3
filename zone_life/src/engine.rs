// engine.rs - Zone-aware Game of Life (B3/S23) with color inheritance

use std::collections::hash_map::DefaultHasher;
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::cells::{LiveCellSet, Pos, Rgb};
use crate::error::EngineError;
use crate::geometry::Geometry;
use crate::topology::neighbors;

/// How many past generations are remembered for cycle detection.
pub const HISTORY_LEN: usize = 10;

/// Summary of one `step()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepReport {
    pub generation: u32,
    pub population: usize,
    pub births: usize,
    pub deaths: usize,
    /// The new generation repeats one of the last `HISTORY_LEN` layouts.
    pub cycle_detected: bool,
}

impl StepReport {
    pub fn is_extinct(&self) -> bool {
        self.population == 0
    }
}

/// Owns the live cells and advances them one generation per `step()`.
///
/// Birth colors are drawn from `rng`, so a seeded generator makes every
/// run reproducible.
pub struct LifeEngine<R = StdRng> {
    cells: LiveCellSet,
    geometry: Geometry,
    rng: R,
    generation: u32,
    started: bool,

    history: [u64; HISTORY_LEN],
    history_count: usize,
}

impl LifeEngine<StdRng> {
    pub fn new(geometry: Geometry) -> Self {
        Self::with_rng(geometry, StdRng::from_os_rng())
    }

    pub fn seeded(geometry: Geometry, seed: u64) -> Self {
        Self::with_rng(geometry, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> LifeEngine<R> {
    pub fn with_rng(geometry: Geometry, rng: R) -> Self {
        Self {
            cells: LiveCellSet::new(),
            geometry,
            rng,
            generation: 0,
            started: false,
            history: [0; HISTORY_LEN],
            history_count: 0,
        }
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn grid_width(&self) -> i32 {
        self.geometry.grid_width
    }

    pub fn grid_height(&self) -> i32 {
        self.geometry.grid_height
    }

    /// The current generation. Only meaningful between calls to `step()`.
    pub fn current_cells(&self) -> &LiveCellSet {
        &self.cells
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn population(&self) -> usize {
        self.cells.len()
    }

    /// True from the first `step()` until `reset()`.
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Install an initial generation, replacing whatever was there.
    pub fn seed(&mut self, cells: LiveCellSet) -> Result<(), EngineError> {
        if self.started {
            warn!("rejected seed of {} cells: simulation running", cells.len());
            return Err(EngineError::Running { action: "seed" });
        }
        debug_assert!(
            cells.keys().all(|pos| self.geometry.in_bounds(*pos)),
            "seed cell outside the {}x{} grid",
            self.geometry.grid_width,
            self.geometry.grid_height,
        );

        info!("seeded {} live cells", cells.len());
        self.cells = cells;
        self.generation = 0;
        self.clear_history();
        self.check_for_cycle();
        Ok(())
    }

    pub fn update_geometry(&mut self, geometry: Geometry) -> Result<(), EngineError> {
        if self.started {
            warn!("rejected geometry change: simulation running");
            return Err(EngineError::Running { action: "change geometry" });
        }
        if geometry != self.geometry {
            info!(
                "geometry now {}x{} cells, body from row {}",
                geometry.grid_width,
                geometry.grid_height,
                geometry.body_top()
            );
            self.geometry = geometry;
        }
        Ok(())
    }

    /// Drop every live cell and return to the pre-run state.
    pub fn reset(&mut self) {
        info!("reset after {} generations", self.generation);
        self.cells.clear();
        self.generation = 0;
        self.started = false;
        self.clear_history();
    }

    /// Restart cycle detection from the current board, so a run paused
    /// on a repeat can be resumed.
    pub fn forget_history(&mut self) {
        self.clear_history();
        self.check_for_cycle();
    }

    /// Advance one generation.
    pub fn step(&mut self) -> StepReport {
        self.started = true;

        // Per target cell, one color entry for every live neighbor.
        let mut tallies: BTreeMap<Pos, Vec<Rgb>> = BTreeMap::new();
        for (&pos, &color) in &self.cells {
            for neighbor in neighbors(pos, &self.geometry) {
                tallies.entry(neighbor).or_default().push(color);
            }
        }

        let mut next = LiveCellSet::new();
        let mut births = 0;
        for (pos, colors) in tallies {
            match (self.cells.get(&pos), colors.len()) {
                (None, 3) => {
                    let pick = self.rng.random_range(0..colors.len());
                    next.insert(pos, colors[pick]);
                    births += 1;
                }
                (Some(&color), 2 | 3) => {
                    next.insert(pos, color);
                }
                _ => {} // Underpopulation, overcrowding, or stays dead
            }
        }

        let survivors = next.len() - births;
        let deaths = self.cells.len() - survivors;
        self.cells = next;
        self.generation += 1;
        let cycle_detected = self.check_for_cycle();

        let report = StepReport {
            generation: self.generation,
            population: self.cells.len(),
            births,
            deaths,
            cycle_detected,
        };
        debug!("{report:?}");
        report
    }

    /// Number of live cells that count `pos` among their wrapped neighbors.
    pub fn neighbor_count(&self, pos: Pos) -> usize {
        self.cells
            .keys()
            .map(|&live| neighbors(live, &self.geometry).iter().filter(|&&n| n == pos).count())
            .sum()
    }

    fn hash_cells(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        for pos in self.cells.keys() {
            pos.hash(&mut hasher);
        }
        hasher.finish()
    }

    fn check_for_cycle(&mut self) -> bool {
        let current_hash = self.hash_cells();
        let seen = self.history_count.min(HISTORY_LEN);
        if self.history[..seen].contains(&current_hash) {
            return true;
        }
        self.history[self.history_count % HISTORY_LEN] = current_hash;
        self.history_count += 1;
        false
    }

    fn clear_history(&mut self) {
        self.history = [0; HISTORY_LEN];
        self.history_count = 0;
    }
}
