//! Interactive viewer for ballpit simulations
//!
//! Draws every particle, forwards pointer and keyboard input to the
//! simulation and ticks it once per repaint.

use ballpit_core::{
    trail_opacity, Frame, ParticleView, Rgb, SimConfig, Simulation, Variant, Vector2,
};
use eframe::egui;
use std::collections::VecDeque;

const COM_MARKER_SIZE: f32 = 10.0;
/// Frames kept for trails; older ones have faded below one colour step
const TRAIL_LENGTH: usize = 52;

/// Where a particle was drawn on an earlier frame
struct Ghost {
    position: Vector2,
    radius: f32,
    fill: Rgb,
}

pub fn run(config: SimConfig) -> Result<(), Box<dyn std::error::Error>> {
    let sim = Simulation::new(config.clone())?;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([
            config.viewport.width,
            config.viewport.height + 40.0,
        ]),
        ..Default::default()
    };
    eframe::run_native(
        "ballpit",
        options,
        Box::new(move |_cc| Ok(Box::new(ViewerApp::new(config, sim)))),
    )
    .map_err(|e| e.to_string())?;
    Ok(())
}

/// Viewer application state
pub struct ViewerApp {
    config: SimConfig,
    sim: Simulation,
    trail: VecDeque<Vec<Ghost>>,
    last_error: Option<String>,
}

impl ViewerApp {
    pub fn new(config: SimConfig, sim: Simulation) -> Self {
        Self {
            config,
            sim,
            trail: VecDeque::new(),
            last_error: None,
        }
    }

    fn is_gravity(&self) -> bool {
        matches!(self.config.variant, Variant::Gravity(_))
    }

    fn reset(&mut self) {
        let viewport = self.sim.viewport();
        match Simulation::new(self.config.clone().with_viewport(viewport)) {
            Ok(sim) => {
                self.sim = sim;
                self.trail.clear();
                self.last_error = None;
            }
            Err(e) => self.last_error = Some(e.to_string()),
        }
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui
                .button(if self.sim.is_running() { "⏸ Pause" } else { "▶ Play" })
                .clicked()
            {
                self.sim.toggle_pause();
            }

            if ui.button("⏭ Step").clicked() {
                if let Err(e) = self.sim.step() {
                    self.last_error = Some(e.to_string());
                }
            }

            if ui.button("⏮ Reset").clicked() {
                self.reset();
            }

            if ui.button("⏹ Stop").clicked() {
                self.sim.stop();
            }

            ui.separator();

            let mut toggles = self.sim.toggles();
            ui.checkbox(&mut toggles.use_color, "Colour");
            if self.is_gravity() {
                ui.checkbox(&mut toggles.recenter, "Recentre");
            } else {
                ui.checkbox(&mut toggles.damping, "Damping");
                ui.checkbox(&mut toggles.draw_collisions, "Show collisions");
            }
            if toggles != self.sim.toggles() {
                self.sim.set_toggles(toggles);
            }

            ui.separator();

            ui.label(format!(
                "Tick: {}  Particles: {}  KE: {:.1}",
                self.sim.tick_count(),
                self.sim.particles().len(),
                self.sim.kinetic_energy()
            ));
        });
    }

    fn handle_input(
        &mut self,
        ctx: &egui::Context,
        response: &egui::Response,
        origin: egui::Pos2,
    ) {
        match response.hover_pos() {
            Some(pos) => self.sim.pointer_moved(to_world(pos, origin)),
            None => {
                if self.sim.pointer().is_present() {
                    self.sim.pointer_left();
                }
            }
        }

        let (pressed, released) =
            ctx.input(|i| (i.pointer.primary_pressed(), i.pointer.primary_released()));
        if self.is_gravity() {
            if pressed && response.hovered() {
                if let Err(e) = self.sim.press_pointer() {
                    log::warn!("could not spawn particle: {e}");
                    self.last_error = Some(e.to_string());
                }
            }
            if released {
                self.sim.release_pointer();
            }
        } else if response.clicked() {
            self.sim.toggle_color();
        }

        if ctx.input(|i| i.key_pressed(egui::Key::P)) {
            self.sim.toggle_pause();
        }
        if !self.is_gravity() {
            return;
        }

        let step = self.sim.translate_step();
        ctx.input(|i| {
            if i.key_pressed(egui::Key::Space) {
                self.sim.recenter_now();
            }
            for (key, offset) in [
                (egui::Key::ArrowUp, Vector2::new(0.0, step)),
                (egui::Key::ArrowDown, Vector2::new(0.0, -step)),
                (egui::Key::ArrowLeft, Vector2::new(step, 0.0)),
                (egui::Key::ArrowRight, Vector2::new(-step, 0.0)),
            ] {
                if i.key_pressed(key) {
                    self.sim.translate_view(offset);
                }
            }
        });
    }

    /// Draw earlier frames fading out, then remember this one
    fn draw_trails(&mut self, painter: &egui::Painter, frame: &Frame, origin: egui::Pos2) {
        if !frame.trails {
            self.trail.clear();
            return;
        }
        for (age, ghosts) in self.trail.iter().enumerate() {
            let alpha = trail_opacity(age + 1);
            for g in ghosts {
                let center = to_screen(g.position, origin);
                painter.circle_filled(center, g.radius, color(g.fill, alpha));
            }
        }
        let current = frame
            .particles
            .iter()
            .map(|p| Ghost {
                position: p.position,
                radius: p.radius,
                fill: fill_color(frame, p),
            })
            .collect();
        self.trail.push_front(current);
        self.trail.truncate(TRAIL_LENGTH);
    }
}

fn to_world(pos: egui::Pos2, origin: egui::Pos2) -> Vector2 {
    Vector2::new(pos.x - origin.x, pos.y - origin.y)
}

fn to_screen(v: Vector2, origin: egui::Pos2) -> egui::Pos2 {
    origin + egui::vec2(v.x, v.y)
}

fn color(rgb: Rgb, alpha: f32) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(
        rgb.0 as u8,
        rgb.1 as u8,
        rgb.2 as u8,
        (alpha.clamp(0.0, 1.0) * 255.0) as u8,
    )
}

fn fill_color(frame: &Frame, p: &ParticleView) -> Rgb {
    if frame.toggles.use_color {
        p.fill
    } else if frame.toggles.draw_collisions && p.colliding {
        Rgb::RED
    } else {
        Rgb::WHITE
    }
}

fn draw_particle(painter: &egui::Painter, frame: &Frame, p: &ParticleView, origin: egui::Pos2) {
    let stroke = if frame.toggles.use_color { p.stroke } else { Rgb::WHITE };
    painter.circle(
        to_screen(p.position, origin),
        p.radius,
        color(fill_color(frame, p), 1.0),
        egui::Stroke::new(1.0, color(stroke, 1.0)),
    );
}

fn draw_tethers(painter: &egui::Painter, frame: &Frame, origin: egui::Pos2) {
    let Some(target) = frame.pointer.position() else {
        return;
    };
    for p in frame.tethered() {
        let rgb = if frame.toggles.use_color { p.stroke } else { Rgb::RED };
        painter.line_segment(
            [to_screen(p.position, origin), to_screen(target, origin)],
            egui::Stroke::new(1.0, color(rgb, p.tether_opacity)),
        );
    }
}

fn draw_center_of_mass(painter: &egui::Painter, com: Vector2, origin: egui::Pos2) {
    let c = to_screen(com, origin);
    let h = COM_MARKER_SIZE / 2.0;
    let stroke = egui::Stroke::new(1.0, egui::Color32::RED);
    painter.line_segment([c + egui::vec2(h, h), c - egui::vec2(h, h)], stroke);
    painter.line_segment([c + egui::vec2(-h, h), c + egui::vec2(h, -h)], stroke);
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            self.controls(ui);
        });

        if let Some(ref error) = self.last_error {
            egui::TopBottomPanel::bottom("errors").show(ctx, |ui| {
                ui.label(
                    egui::RichText::new(format!("Error: {}", error)).color(egui::Color32::RED),
                );
            });
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(egui::Color32::BLACK))
            .show(ctx, |ui| {
                let (response, painter) =
                    ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
                let rect = response.rect;

                let viewport = self.sim.viewport();
                if (rect.width() - viewport.width).abs() > 0.5
                    || (rect.height() - viewport.height).abs() > 0.5
                {
                    if let Err(e) = self.sim.resize(rect.width(), rect.height()) {
                        log::debug!("ignoring resize: {e}");
                    }
                }

                self.handle_input(ctx, &response, rect.min);
                self.sim.tick();

                let frame = self.sim.frame();
                self.draw_trails(&painter, &frame, rect.min);
                draw_tethers(&painter, &frame, rect.min);
                for p in &frame.particles {
                    draw_particle(&painter, &frame, p, rect.min);
                }
                if let Some(com) = frame.center_of_mass {
                    draw_center_of_mass(&painter, com, rect.min);
                }
            });

        if self.sim.is_running() {
            ctx.request_repaint();
        }
    }
}
