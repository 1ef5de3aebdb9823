//! The interaction engine seam
//!
//! An [`Interaction`] owns one complete tick for its variant: it resets and
//! accumulates accelerations (or resolves contacts), integrates every particle
//! and reports what happened. The controller only supplies the environment.

use crate::config::{Variant, Viewport};
use crate::particle::MassModel;
use crate::pointer::Pointer;
use crate::registry::ParticleSet;
use crate::vector::Vector2;
use crate::{collision::ElasticCollisions, gravity::Gravitation};

/// Ambient toggles shared by both variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Toggles {
    /// Colour rendering; in the collision variant also picks attraction
    pub use_color: bool,
    pub damping: bool,
    pub draw_collisions: bool,
    /// Keep the centre of mass in the middle of the view (gravity only)
    pub recenter: bool,
}

impl Default for Toggles {
    fn default() -> Self {
        Self {
            use_color: true,
            damping: true,
            draw_collisions: true,
            recenter: false,
        }
    }
}

/// Read-only inputs to a tick
#[derive(Debug, Clone, Copy)]
pub struct TickEnv {
    pub viewport: Viewport,
    pub pointer: Pointer,
    pub toggles: Toggles,
}

/// What a single tick did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepStats {
    /// Pairs that exchanged a force or an impulse
    pub interacting_pairs: usize,
    /// Pairs skipped because their centres coincide
    pub degenerate_pairs: usize,
    pub edge_contacts: usize,
    pub center_of_mass: Option<Vector2>,
}

pub trait Interaction {
    fn name(&self) -> &'static str;

    /// Mass model for particles this engine simulates
    fn mass_model(&self) -> MassModel;

    fn step(&mut self, particles: &mut ParticleSet, env: &TickEnv) -> StepStats;

    /// Pointer tether opacity for rendering; engines without a pointer field
    /// report none
    fn tether_opacity(&self, _particle: &crate::Particle, _env: &TickEnv) -> f32 {
        0.0
    }
}

/// Build the engine for a configured variant
pub fn engine_for(variant: &Variant) -> Box<dyn Interaction> {
    match variant {
        Variant::Gravity(cfg) => Box::new(Gravitation::new(cfg.clone())),
        Variant::Collisions(cfg) => Box::new(ElasticCollisions::new(cfg.clone())),
    }
}
