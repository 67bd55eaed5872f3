// ui.rs - egui presentation of the zoned Game of Life
// Draws the engine's cells, the header strip and the two inner boxes,
// and drives one step per tick while running.

use std::time::{Duration, Instant};

use eframe::egui;
use egui::{Color32, Pos2, Rect, Stroke, Vec2};
use image::RgbaImage;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use zone_life::cells::merge;
use zone_life::config::{clamp_tick, MAX_TICK_MS, MIN_TICK_MS, SETUP_REFRESH_MS};
use zone_life::image_seed::{load_picture, rgba_cells};
use zone_life::patterns::{body_center_origin, pattern_cells, PATTERNS};
use zone_life::seed::{random_fill, setup_scene, SetupScene};
use zone_life::{compute_geometry, LifeConfig, LifeEngine, LiveCellSet, Pos, Rgb, StepReport};

/// Where the pre-run cells come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SetupMode {
    /// Rebuilt every refresh: title, clock, typed text, confirm label
    Scene,
    /// A pattern was applied on top of the scene; left alone until reset
    Custom,
}

pub struct ZoneLifeApp {
    engine: LifeEngine,
    config: LifeConfig,
    rng: StdRng,

    pub is_running: bool,
    pub last_update: Instant,
    pub update_interval: Duration,
    pub selected_pattern: usize,
    pub user_text: String,
    pub image_path: String,

    picture: Option<RgbaImage>,
    /// `picture` sampled for the current geometry
    picture_cells: LiveCellSet,
    image_error: Option<String>,
    setup_mode: SetupMode,
    last_scene: Option<Instant>,
    canvas_size: Vec2,
    text_edit_id: Option<egui::Id>,
    last_report: Option<StepReport>,
}

impl ZoneLifeApp {
    pub fn new(config: LifeConfig) -> Self {
        let mut rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let geometry = compute_geometry(config.viewport.width, config.viewport.height, config.cell_size);
        let engine = LifeEngine::with_rng(geometry, StdRng::from_rng(&mut rng));
        let image_path = config
            .image_path
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_default();

        let mut app = Self {
            engine,
            update_interval: config.tick_interval(),
            config,
            rng,
            is_running: false,
            last_update: Instant::now(),
            selected_pattern: 0,
            user_text: String::new(),
            image_path,
            picture: None,
            picture_cells: LiveCellSet::new(),
            image_error: None,
            setup_mode: SetupMode::Scene,
            last_scene: None,
            canvas_size: Vec2::ZERO,
            text_edit_id: None,
            last_report: None,
        };
        if !app.image_path.is_empty() {
            app.load_image();
        }
        app
    }

    fn scene_cells(&self) -> LiveCellSet {
        let clock = chrono::Local::now().format("%Y/%m/%d %H:%M:%S").to_string();
        let scene = SetupScene {
            title: &self.config.title,
            clock: &clock,
            user_text: &self.user_text,
            confirm_label: &self.config.confirm_label,
        };
        let mut cells = setup_scene(self.engine.geometry(), &scene);
        merge(&mut cells, self.picture_cells.clone());
        cells
    }

    /// Decode the picture named in the path field; an empty field removes it.
    fn load_image(&mut self) {
        let path = self.image_path.trim();
        if path.is_empty() {
            self.picture = None;
            self.image_error = None;
        } else {
            match load_picture(path) {
                Ok(picture) => {
                    info!("loaded {path}: {}x{}", picture.width(), picture.height());
                    self.picture = Some(picture);
                    self.image_error = None;
                }
                Err(err) => {
                    warn!("{err}");
                    self.image_error = Some(err.to_string());
                    return;
                }
            }
        }
        self.sample_picture();
        if !self.engine.is_started() {
            self.setup_mode = SetupMode::Scene;
            self.refresh_scene(true);
        }
    }

    fn sample_picture(&mut self) {
        self.picture_cells = match &self.picture {
            Some(picture) => rgba_cells(picture, self.engine.geometry()),
            None => LiveCellSet::new(),
        };
    }

    fn install(&mut self, cells: LiveCellSet) {
        if let Err(err) = self.engine.seed(cells) {
            debug!("{err}");
        }
    }

    /// Rebuild the pre-run frame when it is stale.
    fn refresh_scene(&mut self, force: bool) {
        if self.engine.is_started() || self.setup_mode != SetupMode::Scene {
            return;
        }
        let stale = self
            .last_scene
            .is_none_or(|at| at.elapsed() >= Duration::from_millis(SETUP_REFRESH_MS));
        if force || stale {
            let cells = self.scene_cells();
            self.install(cells);
            self.last_scene = Some(Instant::now());
        }
    }

    /// Track the canvas size; the grid follows it until the run starts.
    fn resize(&mut self, size: Vec2) {
        if size == self.canvas_size {
            return;
        }
        self.canvas_size = size;
        if self.engine.is_started() {
            return;
        }
        let geometry = compute_geometry(size.x, size.y, self.config.cell_size);
        if self.engine.update_geometry(geometry).is_ok() {
            self.sample_picture();
            self.setup_mode = SetupMode::Scene;
            self.refresh_scene(true);
        }
    }

    fn start(&mut self) {
        if self.engine.population() == 0 {
            self.refresh_scene(true);
        }
        // A pause on a repeating board would otherwise fire again next step
        if self.engine.is_started() {
            self.engine.forget_history();
        }
        info!("starting with {} live cells", self.engine.population());
        self.is_running = true;
        self.last_update = Instant::now();
    }

    fn random_start(&mut self) {
        if self.engine.is_started() {
            return;
        }
        let mut cells = match self.setup_mode {
            SetupMode::Scene => self.scene_cells(),
            SetupMode::Custom => self.engine.current_cells().clone(),
        };
        merge(&mut cells, random_fill(self.engine.geometry(), self.config.random_density, &mut self.rng));
        self.install(cells);
        self.setup_mode = SetupMode::Custom;
        self.start();
    }

    fn apply_selected_pattern(&mut self) {
        let Some(pattern) = PATTERNS.get(self.selected_pattern) else { return };
        if self.engine.is_started() {
            self.reset();
        }
        let geometry = *self.engine.geometry();
        let color = Rgb::new(self.rng.random(), self.rng.random(), self.rng.random());
        let mut cells = self.scene_cells();
        merge(&mut cells, pattern_cells(pattern, body_center_origin(pattern, &geometry), color, &geometry));
        self.install(cells);
        self.setup_mode = SetupMode::Custom;
    }

    fn reset(&mut self) {
        self.is_running = false;
        self.engine.reset();
        self.last_report = None;
        self.setup_mode = SetupMode::Scene;
        // The canvas may have changed size while running
        let size = std::mem::replace(&mut self.canvas_size, Vec2::ZERO);
        self.resize(size);
        self.refresh_scene(true);
    }

    fn tick(&mut self) {
        let report = self.engine.step();
        if report.cycle_detected || report.is_extinct() {
            info!("pausing at generation {}: {:?}", report.generation, report);
            self.is_running = false;
        }
        self.last_report = Some(report);
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let started = self.engine.is_started();
            let button_text = match (self.is_running, started) {
                (true, _) => "⏸ Pause",
                (false, false) => "▶ Start",
                (false, true) => "▶ Resume",
            };
            if ui.button(button_text).clicked() {
                if self.is_running {
                    self.is_running = false;
                } else {
                    self.start();
                }
            }

            if ui.add_enabled(!started, egui::Button::new("🎲 Random")).clicked() {
                self.random_start();
            }

            if ui.button("⏹ Reset").clicked() {
                self.reset();
            }

            ui.separator();

            ui.label("Pattern:");
            egui::ComboBox::from_id_source("pattern_selector")
                .selected_text(PATTERNS[self.selected_pattern].name)
                .show_ui(ui, |ui| {
                    for (i, pattern) in PATTERNS.iter().enumerate() {
                        ui.selectable_value(&mut self.selected_pattern, i, pattern.name);
                    }
                });
            if ui.button("Apply Pattern").clicked() {
                self.apply_selected_pattern();
            }
        });

        ui.horizontal(|ui| {
            ui.label("Text:");
            let response = ui.add_enabled(
                !self.engine.is_started(),
                egui::TextEdit::singleline(&mut self.user_text).desired_width(240.0),
            );
            self.text_edit_id = Some(response.id);
            if response.changed() {
                self.refresh_scene(true);
            }

            ui.separator();

            ui.label("Image:");
            let setup = !self.engine.is_started();
            let path_edit = ui.add_enabled(
                setup,
                egui::TextEdit::singleline(&mut self.image_path)
                    .hint_text("path to png/jpeg/webp")
                    .desired_width(200.0),
            );
            let submitted = path_edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if ui.add_enabled(setup, egui::Button::new("Load")).clicked() || submitted {
                self.load_image();
            }
            if let Some(err) = &self.image_error {
                ui.colored_label(Color32::RED, err);
            }

            ui.separator();

            // Changing the speed restarts the interval from now
            ui.label("Speed:");
            let mut millis = self.update_interval.as_millis() as u64;
            if ui
                .add(egui::Slider::new(&mut millis, MIN_TICK_MS..=MAX_TICK_MS).suffix(" ms"))
                .changed()
            {
                self.update_interval = clamp_tick(millis);
                self.last_update = Instant::now();
            }

            ui.separator();

            ui.label(format!("Generation: {}", self.engine.generation()));
            ui.label(format!("Live cells: {}", self.engine.population()));
            if let Some(report) = self.last_report.filter(|r| r.cycle_detected) {
                ui.label(format!("Cycle at generation {}", report.generation));
            }
        });
    }

    fn canvas(&mut self, ui: &mut egui::Ui) {
        let size = ui.available_size();
        let (response, painter) = ui.allocate_painter(size, egui::Sense::click());
        self.resize(response.rect.size());

        let origin = response.rect.min;
        let geometry = *self.engine.geometry();
        let cell = geometry.cell_size as f32;

        painter.rect_filled(response.rect, 0.0, Color32::WHITE);
        painter.rect_filled(grid_rect(origin, &geometry.header, cell), 0.0, Color32::BLACK);
        let outline = Stroke::new(cell, Color32::BLACK);
        painter.rect_stroke(grid_rect(origin, &geometry.inner_t, cell), 0.0, outline);
        painter.rect_stroke(grid_rect(origin, &geometry.inner_b, cell), 0.0, outline);

        for (pos, color) in self.engine.current_cells() {
            let min = origin + Vec2::new(pos.x as f32 * cell, pos.y as f32 * cell);
            painter.rect_filled(
                Rect::from_min_size(min, Vec2::splat(cell)),
                0.0,
                Color32::from_rgb(color.r, color.g, color.b),
            );
        }

        // Before the run, the boxes behave like the widgets they stand for
        if !self.engine.is_started() && response.clicked() {
            if let Some(pointer) = response.interact_pointer_pos() {
                let local = pointer - origin;
                let pos = Pos::new((local.x / cell) as i32, (local.y / cell) as i32);
                if geometry.inner_b.contains(pos) {
                    self.start();
                } else if geometry.inner_t.contains(pos) {
                    if let Some(id) = self.text_edit_id {
                        ui.ctx().memory_mut(|memory| memory.request_focus(id));
                    }
                }
            }
        }
    }
}

fn grid_rect(origin: Pos2, rect: &zone_life::Rect, cell: f32) -> Rect {
    Rect::from_min_size(
        origin + Vec2::new(rect.x as f32 * cell, rect.y as f32 * cell),
        Vec2::new(rect.width as f32 * cell, rect.height as f32 * cell),
    )
}

impl eframe::App for ZoneLifeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Step if running and the interval has elapsed
        if self.is_running && self.last_update.elapsed() >= self.update_interval {
            self.tick();
            self.last_update = Instant::now();
        }
        self.refresh_scene(false);

        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.heading("Zone Life");
            self.controls(ui);
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| self.canvas(ui));

        // Keep time moving: every frame while running, the clock otherwise
        if self.is_running {
            ctx.request_repaint();
        } else if !self.engine.is_started() {
            ctx.request_repaint_after(Duration::from_millis(SETUP_REFRESH_MS));
        }
    }
}
