//! The simulation controller
//!
//! [`Simulation`] owns the particle set, the pointer slot, the viewport and the
//! ambient toggles, and drives one interaction engine. The host calls
//! [`Simulation::tick`] once per animation frame and [`Simulation::frame`] to
//! get something to draw; input events land in the pointer slot in between.

use crate::config::{SimConfig, Variant, Viewport};
use crate::error::{ConfigError, SimError};
use crate::frame::{Frame, ParticleView};
use crate::gravity;
use crate::interaction::{engine_for, Interaction, StepStats, TickEnv, Toggles};
use crate::particle::Particle;
use crate::pointer::Pointer;
use crate::registry::{ParticleId, ParticleSet};
use crate::spawn;
use crate::vector::Vector2;
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Paused,
    /// Terminal: no further ticks are accepted
    Stopped,
}

/// Summary of one tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub tick: u64,
    pub stats: StepStats,
    /// Particles found with non-finite state and re-initialised
    pub repaired: usize,
}

pub struct Simulation {
    config: SimConfig,
    engine: Box<dyn Interaction>,
    particles: ParticleSet,
    viewport: Viewport,
    pointer: Pointer,
    pointer_pressed: bool,
    growing: Option<ParticleId>,
    toggles: Toggles,
    center_of_mass: Option<Vector2>,
    run_state: RunState,
    rng: SmallRng,
    tick: u64,
}

impl Simulation {
    /// Validate `config` and build a simulation; the collision variant starts
    /// with its full random pool
    pub fn new(config: SimConfig) -> Result<Self, SimError> {
        let mut sim = Self::empty(config)?;
        if let Variant::Collisions(cfg) = &sim.config.variant {
            for _ in 0..cfg.particle_count {
                let ball = spawn::random_ball(&mut sim.rng, cfg, &sim.viewport)?;
                sim.particles.push(ball)?;
            }
        }
        log::info!(
            "created {} simulation with {} particles (seed {})",
            sim.engine.name(),
            sim.particles.len(),
            sim.config.seed
        );
        Ok(sim)
    }

    /// Build a simulation around a given set of particles instead of a random
    /// pool
    pub fn with_particles<I>(config: SimConfig, particles: I) -> Result<Self, SimError>
    where
        I: IntoIterator<Item = Particle>,
    {
        let mut sim = Self::empty(config)?;
        for p in particles {
            sim.add_particle(p)?;
        }
        Ok(sim)
    }

    fn empty(config: SimConfig) -> Result<Self, SimError> {
        config.validate()?;
        let engine = engine_for(&config.variant);
        let particles = match config.capacity {
            Some(capacity) => ParticleSet::with_capacity(capacity),
            None => ParticleSet::new(),
        };
        let toggles = Toggles {
            recenter: matches!(&config.variant, Variant::Gravity(g) if g.recenter),
            ..Toggles::default()
        };
        Ok(Self {
            viewport: config.viewport,
            rng: SmallRng::seed_from_u64(config.seed),
            config,
            engine,
            particles,
            pointer: Pointer::Absent,
            pointer_pressed: false,
            growing: None,
            toggles,
            center_of_mass: None,
            run_state: RunState::Running,
            tick: 0,
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn engine_name(&self) -> &'static str {
        self.engine.name()
    }

    pub fn particles(&self) -> &ParticleSet {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut ParticleSet {
        &mut self.particles
    }

    pub fn add_particle(&mut self, particle: Particle) -> Result<ParticleId, SimError> {
        if particle.mass_model() != self.engine.mass_model() {
            log::warn!(
                "adding a {:?} particle to a {} simulation",
                particle.mass_model(),
                self.engine.name()
            );
        }
        let id = self.particles.push(particle)?;
        log::debug!("added particle {id}");
        Ok(id)
    }

    pub fn remove_particle(&mut self, id: ParticleId) -> Result<Particle, SimError> {
        if self.growing == Some(id) {
            self.growing = None;
        }
        self.particles.remove(id)
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn center_of_mass(&self) -> Option<Vector2> {
        self.center_of_mass
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn kinetic_energy(&self) -> f32 {
        self.particles.iter().map(Particle::kinetic_energy).sum()
    }

    // ---- run control -------------------------------------------------------

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }

    pub fn pause(&mut self) {
        if self.run_state == RunState::Running {
            log::info!("paused at tick {}", self.tick);
            self.run_state = RunState::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.run_state == RunState::Paused {
            log::info!("resumed at tick {}", self.tick);
            self.run_state = RunState::Running;
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.run_state {
            RunState::Running => self.pause(),
            RunState::Paused => self.resume(),
            RunState::Stopped => {}
        }
    }

    pub fn stop(&mut self) {
        if self.run_state != RunState::Stopped {
            log::info!("stopped at tick {}", self.tick);
            self.run_state = RunState::Stopped;
        }
    }

    /// Advance one frame if running; `None` while paused or stopped
    pub fn tick(&mut self) -> Option<TickReport> {
        match self.run_state {
            RunState::Running => Some(self.advance()),
            RunState::Paused | RunState::Stopped => None,
        }
    }

    /// Advance exactly one frame, even while paused
    pub fn step(&mut self) -> Result<TickReport, SimError> {
        if self.run_state == RunState::Stopped {
            return Err(SimError::Stopped);
        }
        Ok(self.advance())
    }

    fn advance(&mut self) -> TickReport {
        self.apply_growth();

        let env = self.env();
        let stats = self.engine.step(&mut self.particles, &env);
        self.center_of_mass = stats.center_of_mass;
        let repaired = self.repair_non_finite();
        if repaired > 0 && self.center_of_mass.is_some() {
            self.center_of_mass = gravity::center_of_mass(&self.particles);
        }

        self.tick += 1;
        log::trace!(
            "tick {}: {} pairs, {} edge contacts, {} degenerate",
            self.tick,
            stats.interacting_pairs,
            stats.edge_contacts,
            stats.degenerate_pairs
        );
        TickReport {
            tick: self.tick,
            stats,
            repaired,
        }
    }

    fn env(&self) -> TickEnv {
        TickEnv {
            viewport: self.viewport,
            pointer: self.pointer,
            toggles: self.toggles,
        }
    }

    fn apply_growth(&mut self) {
        let Variant::Gravity(cfg) = &self.config.variant else {
            return;
        };
        if !self.pointer_pressed {
            return;
        }
        let (Some(id), Some(pos)) = (self.growing, self.pointer.position()) else {
            return;
        };
        if let Some(p) = self.particles.get_mut(id) {
            if let Err(e) = p.grow(cfg.growth_rate) {
                log::warn!("particle {id} cannot grow: {e}");
            }
            p.position = pos;
        }
    }

    fn repair_non_finite(&mut self) -> usize {
        let mut repaired = 0;
        let center = self.viewport.center();
        for (id, p) in self.particles.iter_mut_with_ids() {
            if p.is_finite() {
                continue;
            }
            log::warn!(
                "particle {id} has non-finite state (pos {}, vel {}), re-initialising",
                p.position,
                p.velocity
            );
            p.acceleration = Vector2::ZERO;
            match &self.config.variant {
                Variant::Gravity(_) => {
                    p.position = center;
                    p.velocity = Vector2::ZERO;
                }
                Variant::Collisions(cfg) => {
                    p.position = spawn::random_position(&mut self.rng, p.radius(), &self.viewport);
                    p.velocity = spawn::random_velocity(&mut self.rng, cfg.max_initial_speed);
                }
            }
            repaired += 1;
        }
        repaired
    }

    // ---- input -------------------------------------------------------------

    pub fn pointer(&self) -> Pointer {
        self.pointer
    }

    pub fn set_pointer(&mut self, pointer: Pointer) {
        match pointer {
            Pointer::Present(pos) => self.pointer_moved(pos),
            Pointer::Absent => self.pointer_left(),
        }
    }

    pub fn pointer_moved(&mut self, pos: Vector2) {
        if let Pointer::Present(current) = &mut self.pointer {
            current.set(pos.x, pos.y);
            return;
        }
        self.pointer = Pointer::Present(pos);
    }

    /// The pointer left the canvas; also releases any press
    pub fn pointer_left(&mut self) {
        log::debug!("pointer left");
        self.pointer = Pointer::Absent;
        self.release_pointer();
    }

    pub fn is_pointer_pressed(&self) -> bool {
        self.pointer_pressed
    }

    /// Pointer button down. In the gravity variant this drops a new particle
    /// under the pointer which grows until release.
    pub fn press_pointer(&mut self) -> Result<Option<ParticleId>, SimError> {
        let Variant::Gravity(cfg) = &self.config.variant else {
            return Ok(None);
        };
        let Some(pos) = self.pointer.position() else {
            log::debug!("press ignored, pointer is off the canvas");
            return Ok(None);
        };
        let body = spawn::seed_body(&mut self.rng, pos, cfg.spawn_radius)?;
        let id = self.particles.push(body)?;
        log::debug!("spawned particle {id} at {pos}");
        self.pointer_pressed = true;
        self.growing = Some(id);
        Ok(Some(id))
    }

    pub fn release_pointer(&mut self) {
        self.pointer_pressed = false;
        self.growing = None;
    }

    pub fn resize(&mut self, width: f32, height: f32) -> Result<(), ConfigError> {
        self.viewport = Viewport::new(width, height)?;
        log::debug!("viewport resized to {width}x{height}");
        Ok(())
    }

    // ---- toggles and view --------------------------------------------------

    pub fn toggles(&self) -> Toggles {
        self.toggles
    }

    pub fn set_toggles(&mut self, toggles: Toggles) {
        self.toggles = toggles;
    }

    pub fn toggle_color(&mut self) -> bool {
        self.toggles.use_color = !self.toggles.use_color;
        log::debug!("colour mode {}", self.toggles.use_color);
        self.toggles.use_color
    }

    pub fn toggle_damping(&mut self) -> bool {
        self.toggles.damping = !self.toggles.damping;
        log::debug!("damping {}", self.toggles.damping);
        self.toggles.damping
    }

    pub fn toggle_draw_collisions(&mut self) -> bool {
        self.toggles.draw_collisions = !self.toggles.draw_collisions;
        self.toggles.draw_collisions
    }

    pub fn toggle_recenter(&mut self) -> bool {
        self.toggles.recenter = !self.toggles.recenter;
        log::debug!("recentring {}", self.toggles.recenter);
        self.toggles.recenter
    }

    /// Shift the view by `offset` (moves every particle)
    pub fn translate_view(&mut self, offset: Vector2) {
        gravity::translate(&mut self.particles, offset);
        self.center_of_mass = self.center_of_mass.map(|c| c + offset);
    }

    /// Move the centre of mass to the middle of the view once
    pub fn recenter_now(&mut self) {
        self.center_of_mass = gravity::recenter(&mut self.particles, self.viewport.center());
    }

    /// Distance moved by one [`Simulation::translate_view`] key press
    pub fn translate_step(&self) -> f32 {
        match &self.config.variant {
            Variant::Gravity(cfg) => cfg.translate_step,
            Variant::Collisions(_) => crate::config::TRANSLATE_STEP,
        }
    }

    // ---- rendering ---------------------------------------------------------

    /// Snapshot for the renderer. Reading a frame clears every particle's
    /// collision flag.
    pub fn frame(&mut self) -> Frame {
        let env = self.env();
        let engine = &self.engine;
        let particles = self
            .particles
            .iter_mut_with_ids()
            .map(|(id, p)| ParticleView {
                id,
                position: p.position,
                radius: p.radius(),
                fill: p.fill,
                stroke: p.stroke,
                tether_opacity: engine.tether_opacity(p, &env),
                colliding: p.take_colliding(),
            })
            .collect();
        let (show_center_of_mass, trails) = match &self.config.variant {
            Variant::Gravity(cfg) => (cfg.show_center_of_mass, cfg.trails),
            Variant::Collisions(_) => (false, false),
        };
        Frame {
            tick: self.tick,
            particles,
            center_of_mass: self.center_of_mass.filter(|_| show_center_of_mass),
            trails,
            pointer: self.pointer,
            toggles: self.toggles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CollisionConfig, GravityConfig};

    fn small_pool() -> SimConfig {
        SimConfig::new(Variant::Collisions(
            CollisionConfig::default().with_particle_count(10),
        ))
        .with_viewport(Viewport::new(200.0, 150.0).unwrap())
    }

    #[test]
    fn collision_variant_starts_with_its_pool() {
        let sim = Simulation::new(small_pool()).unwrap();
        assert_eq!(sim.particles().len(), 10);
        assert_eq!(sim.engine_name(), "collisions");
    }

    #[test]
    fn gravity_variant_starts_empty() {
        let sim = Simulation::new(SimConfig::gravity()).unwrap();
        assert!(sim.particles().is_empty());
        assert_eq!(sim.engine_name(), "gravity");
    }

    #[test]
    fn invalid_config_is_rejected() {
        let cfg = SimConfig::new(Variant::Gravity(GravityConfig::default().with_g(-1.0)));
        assert!(matches!(
            Simulation::new(cfg),
            Err(SimError::Config(ConfigError::NonPositive { .. }))
        ));
    }

    #[test]
    fn pause_resume_stop() {
        let mut sim = Simulation::new(small_pool()).unwrap();
        assert!(sim.tick().is_some());
        sim.pause();
        assert!(sim.tick().is_none());
        assert_eq!(sim.tick_count(), 1);
        sim.step().unwrap();
        assert_eq!(sim.tick_count(), 2);
        sim.resume();
        assert!(sim.tick().is_some());
        sim.stop();
        sim.resume();
        assert_eq!(sim.run_state(), RunState::Stopped);
        assert!(sim.tick().is_none());
        assert_eq!(sim.step().unwrap_err(), SimError::Stopped);
    }

    #[test]
    fn press_without_pointer_spawns_nothing() {
        let mut sim = Simulation::new(SimConfig::gravity()).unwrap();
        assert_eq!(sim.press_pointer().unwrap(), None);
        assert!(sim.particles().is_empty());
    }

    #[test]
    fn pressed_particle_grows_and_follows_pointer() {
        let mut sim = Simulation::new(SimConfig::gravity()).unwrap();
        sim.pointer_moved(Vector2::new(100.0, 100.0));
        let id = sim.press_pointer().unwrap().unwrap();
        sim.pointer_moved(Vector2::new(120.0, 90.0));
        sim.tick();
        sim.tick();
        let p = sim.particles().get(id).unwrap();
        assert!((p.radius() - 1.6).abs() < 1e-5);
        assert!((p.mass() - 1.6 * 1.6).abs() < 1e-4);
        assert_eq!(p.position, Vector2::new(120.0, 90.0));

        sim.release_pointer();
        sim.tick();
        assert!((sim.particles().get(id).unwrap().radius() - 1.6).abs() < 1e-5);
    }

    #[test]
    fn leaving_the_canvas_releases_the_press() {
        let mut sim = Simulation::new(SimConfig::gravity()).unwrap();
        sim.pointer_moved(Vector2::new(10.0, 10.0));
        sim.press_pointer().unwrap();
        sim.pointer_left();
        assert!(!sim.is_pointer_pressed());
        assert_eq!(sim.pointer(), Pointer::Absent);
    }

    #[test]
    fn press_in_collision_variant_is_a_no_op() {
        let mut sim = Simulation::new(small_pool()).unwrap();
        sim.pointer_moved(Vector2::new(10.0, 10.0));
        assert_eq!(sim.press_pointer().unwrap(), None);
        assert_eq!(sim.particles().len(), 10);
    }

    #[test]
    fn capacity_limits_spawning() {
        let mut sim = Simulation::new(SimConfig::gravity().with_capacity(1)).unwrap();
        sim.pointer_moved(Vector2::new(10.0, 10.0));
        sim.press_pointer().unwrap();
        sim.release_pointer();
        assert_eq!(
            sim.press_pointer().unwrap_err(),
            SimError::CapacityExceeded { capacity: 1 }
        );
    }

    #[test]
    fn non_finite_particles_are_repaired() {
        let mut sim = Simulation::new(small_pool()).unwrap();
        let id = sim.particles().iter_with_ids().next().unwrap().0;
        sim.particles_mut().get_mut(id).unwrap().velocity = Vector2::new(f32::NAN, 0.0);
        let report = sim.tick().unwrap();
        assert_eq!(report.repaired, 1);
        assert!(sim.particles().iter().all(Particle::is_finite));
    }

    #[test]
    fn frame_clears_collision_flags() {
        let mut sim = Simulation::new(small_pool()).unwrap();
        for p in sim.particles_mut().iter_mut() {
            p.colliding = true;
        }
        assert!(sim.frame().particles.iter().all(|v| v.colliding));
        assert!(sim.frame().particles.iter().all(|v| !v.colliding));
    }

    #[test]
    fn center_of_mass_marker_follows_config() {
        let mut sim = Simulation::new(SimConfig::gravity()).unwrap();
        sim.add_particle(spawn_body(100.0, 100.0)).unwrap();
        sim.tick();
        assert_eq!(sim.frame().center_of_mass, Some(Vector2::new(100.0, 100.0)));

        let hidden = SimConfig::new(Variant::Gravity(
            GravityConfig::default().with_center_of_mass_marker(false),
        ));
        let mut sim = Simulation::new(hidden).unwrap();
        sim.add_particle(spawn_body(100.0, 100.0)).unwrap();
        sim.tick();
        assert!(sim.center_of_mass().is_some());
        assert_eq!(sim.frame().center_of_mass, None);
    }

    #[test]
    fn collision_frames_have_no_marker_or_trails() {
        let mut sim = Simulation::new(small_pool()).unwrap();
        sim.recenter_now();
        let frame = sim.frame();
        assert_eq!(frame.center_of_mass, None);
        assert!(!frame.trails);
        assert!(Simulation::new(SimConfig::gravity()).unwrap().frame().trails);
    }

    fn spawn_body(x: f32, y: f32) -> Particle {
        Particle::new(Vector2::new(x, y), 2.0, crate::particle::MassModel::RadiusSquared).unwrap()
    }

    #[test]
    fn resize_rejects_empty_viewport() {
        let mut sim = Simulation::new(small_pool()).unwrap();
        assert!(sim.resize(0.0, 10.0).is_err());
        sim.resize(400.0, 300.0).unwrap();
        assert_eq!(sim.viewport(), Viewport::new(400.0, 300.0).unwrap());
    }

    #[test]
    fn translate_view_moves_everything() {
        let mut sim = Simulation::new(small_pool()).unwrap();
        let before: Vec<_> = sim.particles().iter().map(|p| p.position).collect();
        sim.translate_view(Vector2::new(0.0, 15.0));
        for (b, p) in before.iter().zip(sim.particles().iter()) {
            assert_eq!(p.position, *b + Vector2::new(0.0, 15.0));
        }
    }
}
