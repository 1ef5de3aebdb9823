//! Newtonian N-body attraction
//!
//! Every unordered pair exchanges an inverse-square force. Pairs whose discs
//! overlap sit in a dead zone and exchange nothing, which keeps close
//! encounters from producing huge accelerations.

use crate::config::GravityConfig;
use crate::interaction::{Interaction, StepStats, TickEnv};
use crate::particle::{MassModel, Particle};
use crate::registry::ParticleSet;
use crate::vector::Vector2;

/// Outcome of evaluating gravity between two particles
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PairForce {
    /// Force on the first particle; the second receives its negation
    Force(Vector2),
    /// Discs overlap (or touch)
    DeadZone,
    /// Centres coincide, no direction exists
    Degenerate,
}

impl PairForce {
    pub fn vector(self) -> Vector2 {
        match self {
            PairForce::Force(f) => f,
            PairForce::DeadZone | PairForce::Degenerate => Vector2::ZERO,
        }
    }
}

/// Gravitational force of `b` on `a`
pub fn pair_force(a: &Particle, b: &Particle, g: f32, dead_zone: bool) -> PairForce {
    let v = b.position.subtract(a.position);
    let distance = v.magnitude();
    if dead_zone && distance <= a.radius() + b.radius() {
        return PairForce::DeadZone;
    }
    let Some(direction) = v.try_normalize() else {
        return PairForce::Degenerate;
    };
    let magnitude = g * a.mass() * b.mass() / (distance * distance);
    PairForce::Force(direction.multiply(magnitude))
}

/// Mass-weighted mean position, `None` when there is no mass at all
pub fn center_of_mass(particles: &ParticleSet) -> Option<Vector2> {
    let (total, weighted) = particles
        .iter()
        .fold((0.0f32, Vector2::ZERO), |(m, sum), p| {
            (m + p.mass(), sum + p.position.multiply(p.mass()))
        });
    (total > 0.0).then(|| weighted.multiply(1.0 / total))
}

/// Shift every particle by `offset`; velocities are untouched
pub fn translate(particles: &mut ParticleSet, offset: Vector2) {
    for p in particles.iter_mut() {
        p.position += offset;
    }
}

/// Move the whole system so its centre of mass lands on `target`
pub fn recenter(particles: &mut ParticleSet, target: Vector2) -> Option<Vector2> {
    let com = center_of_mass(particles)?;
    translate(particles, target.subtract(com));
    Some(target)
}

pub struct Gravitation {
    config: GravityConfig,
}

impl Gravitation {
    pub fn new(config: GravityConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GravityConfig {
        &self.config
    }

    fn accumulate(&self, particles: &mut ParticleSet, stats: &mut StepStats) {
        for p in particles.iter_mut() {
            p.acceleration = Vector2::ZERO;
        }
        let (g, dead_zone) = (self.config.g, self.config.dead_zone);
        particles.for_each_pair(|a, b| match pair_force(a, b, g, dead_zone) {
            PairForce::Force(f) => {
                a.acceleration += f.multiply(1.0 / a.mass());
                b.acceleration -= f.multiply(1.0 / b.mass());
                stats.interacting_pairs += 1;
            }
            PairForce::DeadZone => {}
            PairForce::Degenerate => stats.degenerate_pairs += 1,
        });
    }
}

impl Interaction for Gravitation {
    fn name(&self) -> &'static str {
        "gravity"
    }

    fn mass_model(&self) -> MassModel {
        MassModel::RadiusSquared
    }

    fn step(&mut self, particles: &mut ParticleSet, env: &TickEnv) -> StepStats {
        let mut stats = StepStats::default();
        self.accumulate(particles, &mut stats);

        for p in particles.iter_mut() {
            p.integrate(self.config.max_velocity, None);
        }

        stats.center_of_mass = if env.toggles.recenter {
            recenter(particles, env.viewport.center())
        } else {
            center_of_mass(particles)
        };
        stats
    }
}
