//! Interactive viewer for a running simulation
//!
//! The frame update is the only clock: every frame polls the simulation,
//! draws the latest position and path, and asks egui to wake up again when
//! the next tick is due. The scenario file (if any) is watched so that field
//! edits on disk are applied to the running particle.

use eframe::egui;
use lorentz_core::glam::Vec3;
use lorentz_core::{
    build_simulation, FieldVector, PendingTick, Phase, ScenarioConfig, Simulation,
};
use notify::{Event, RecommendedWatcher, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Instant;

const FIELD_LABELS: [&str; 6] = ["Ex", "Ey", "Ez", "Bx", "By", "Bz"];

/// Open the viewer window and block until it is closed
pub fn run_viewer(scenario: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let scenario = scenario.map(|p| std::fs::canonicalize(&p).unwrap_or(p));
    let config = match &scenario {
        Some(path) => ScenarioConfig::load(path)?,
        None => ScenarioConfig::default(),
    };
    let sim = build_simulation(&config)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1000.0, 760.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Lorentz",
        options,
        Box::new(move |cc| Ok(Box::new(ViewerApp::new(config, sim, scenario, cc)))),
    )
    .map_err(|e| format!("viewer failed: {}", e))?;
    Ok(())
}

/// Viewer application state
pub struct ViewerApp {
    scenario_path: Option<PathBuf>,
    config: ScenarioConfig,
    sim: Simulation,
    field_inputs: [f32; 6],
    last_error: Option<String>,
    #[allow(dead_code)] // Kept alive to maintain file watching
    file_watcher: Option<RecommendedWatcher>,
    file_receiver: mpsc::Receiver<notify::Result<Event>>,
}

impl ViewerApp {
    pub fn new(
        config: ScenarioConfig,
        sim: Simulation,
        scenario_path: Option<PathBuf>,
        cc: &eframe::CreationContext<'_>,
    ) -> Self {
        let (tx, rx) = mpsc::channel();
        let mut watcher = None;

        if let Some(path) = &scenario_path {
            let repaint = cc.egui_ctx.clone();
            match notify::recommended_watcher(move |res: notify::Result<Event>| {
                let _ = tx.send(res);
                repaint.request_repaint();
            }) {
                Ok(mut w) => {
                    // Editors that save by rename replace the file, so watch its directory
                    let dir = path.parent().unwrap_or(path.as_path());
                    if let Err(e) = w.watch(dir, notify::RecursiveMode::NonRecursive) {
                        log::warn!("cannot watch {}: {}", dir.display(), e);
                    }
                    watcher = Some(w);
                }
                Err(e) => log::warn!("file watching unavailable: {}", e),
            }
        }

        Self {
            scenario_path,
            field_inputs: sim.fields().to_array(),
            config,
            sim,
            last_error: None,
            file_watcher: watcher,
            file_receiver: rx,
        }
    }

    /// Start a new run from the current scenario
    fn reset(&mut self) {
        match build_simulation(&self.config) {
            Ok(sim) => {
                self.field_inputs = sim.fields().to_array();
                self.sim = sim;
                self.last_error = None;
            }
            Err(e) => self.last_error = Some(e.to_string()),
        }
    }

    fn apply_field_inputs(&mut self) {
        match FieldVector::from_slice(&self.field_inputs) {
            Ok(fields) => self.sim.set_fields(fields),
            Err(e) => self.last_error = Some(e.to_string()),
        }
    }

    /// Reload fields from the scenario file when it changes on disk
    fn check_file_changes(&mut self) {
        let Some(path) = self.scenario_path.clone() else {
            return;
        };

        let mut changed = false;
        while let Ok(event) = self.file_receiver.try_recv() {
            match event {
                Ok(event) => changed |= is_scenario_change(&event, &path),
                Err(e) => log::warn!("file watcher error: {}", e),
            }
        }
        if !changed {
            return;
        }

        match reload_scenario_fields(&mut self.sim, &path) {
            Ok(config) => {
                self.field_inputs = config.field_vector().to_array();
                self.config = config;
                self.last_error = None;
            }
            Err(e) => self.last_error = Some(e.to_string()),
        }
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let phase = self.sim.phase();
            if ui
                .add_enabled(phase != Phase::Halted, egui::Button::new("▶ Start"))
                .clicked()
            {
                self.sim.start();
            }
            if ui.button("⏸ Pause").clicked() {
                self.sim.pause();
            }
            if ui.button("⏮ Reset").clicked() {
                self.reset();
            }

            ui.separator();

            ui.label(format!(
                "{:?}  Step: {} / {}",
                phase,
                self.sim.trajectory().len(),
                self.sim.trajectory().max_steps()
            ));
        });

        ui.horizontal(|ui| {
            for (label, value) in FIELD_LABELS.iter().zip(self.field_inputs.iter_mut()) {
                ui.label(*label);
                ui.add(egui::DragValue::new(value).speed(0.1));
            }
            if ui.button("Apply fields").clicked() {
                self.apply_field_inputs();
            }
        });
    }

    fn draw_scene(&self, ui: &mut egui::Ui) {
        let rect = ui.max_rect();
        let painter = ui.painter();
        let center = rect.center();

        // Fit the recorded path into view, never zooming past +-1 m
        let extent = self
            .sim
            .trajectory()
            .points()
            .iter()
            .chain(std::iter::once(&self.sim.position()))
            .filter(|p| p.is_finite())
            .fold(1.0_f32, |acc, p| acc.max(p.abs().max_element()));
        let scale = rect.width().min(rect.height()) / (extent * 3.0);
        let to_screen = |p: Vec3| center + project(p) * scale;

        let axes = [
            (Vec3::X, "X", egui::Color32::RED),
            (Vec3::Y, "Y", egui::Color32::GREEN),
            (Vec3::Z, "Z", egui::Color32::LIGHT_BLUE),
        ];
        for (dir, name, color) in axes {
            let tip = dir * extent * 1.2;
            painter.line_segment(
                [to_screen(Vec3::ZERO), to_screen(tip)],
                egui::Stroke::new(1.5, color),
            );
            painter.text(
                to_screen(tip),
                egui::Align2::LEFT_BOTTOM,
                name,
                egui::FontId::default(),
                color,
            );
        }

        let path: Vec<egui::Pos2> = std::iter::once(self.sim.initial_state().pos)
            .chain(self.sim.trajectory().points().iter().copied())
            .map(to_screen)
            .collect();
        if path.len() > 1 {
            painter.add(egui::Shape::line(
                path,
                egui::Stroke::new(2.0, egui::Color32::WHITE),
            ));
        }

        painter.circle_filled(to_screen(self.sim.position()), 6.0, egui::Color32::YELLOW);

        if let Some(ref error) = self.last_error {
            painter.text(
                rect.left_bottom() + egui::vec2(8.0, -8.0),
                egui::Align2::LEFT_BOTTOM,
                format!("Error: {}", error),
                egui::FontId::default(),
                egui::Color32::RED,
            );
        }
    }
}

/// True when a watcher event reports a write to the scenario file itself
fn is_scenario_change(event: &Event, path: &Path) -> bool {
    matches!(
        event.kind,
        notify::EventKind::Modify(_) | notify::EventKind::Create(_)
    ) && event.paths.iter().any(|p| p == path)
}

/// Load the scenario at `path` and apply its fields to the running simulation.
///
/// State and recorded trajectory are left alone; only the fields change.
fn reload_scenario_fields(
    sim: &mut Simulation,
    path: &Path,
) -> lorentz_core::Result<ScenarioConfig> {
    let config = ScenarioConfig::load(path)?;
    log::info!("reloaded fields from {}", path.display());
    sim.set_fields(config.field_vector());
    Ok(config)
}

/// Fixed oblique projection: x right-down, z left-down, y up
fn project(p: Vec3) -> egui::Vec2 {
    let (cos, sin) = (0.866_f32, 0.5_f32);
    egui::vec2((p.x - p.z) * cos, (p.x + p.z) * sin - p.y)
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_file_changes();

        let now = Instant::now();
        self.sim.poll(now);

        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            self.controls(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_scene(ui);
        });

        // Wake up for the next tick; buttons and file events repaint on their own
        match self.sim.next_tick_due() {
            Some(PendingTick::Immediately) => ctx.request_repaint(),
            Some(PendingTick::At(deadline)) => {
                ctx.request_repaint_after(deadline.saturating_duration_since(Instant::now()));
            }
            None => {}
        }
    }
}
