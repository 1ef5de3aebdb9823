//! Random particle generation
//!
//! All randomness flows through one seeded `SmallRng` owned by the
//! simulation, so a seed fully determines a run.

use crate::config::{CollisionConfig, Viewport};
use crate::error::ConfigError;
use crate::particle::{MassModel, Particle, Rgb};
use crate::vector::Vector2;
use rand::rngs::SmallRng;
use rand::Rng;

pub fn random_color(rng: &mut SmallRng) -> Rgb {
    Rgb(
        rng.gen::<f32>() * 255.0,
        rng.gen::<f32>() * 255.0,
        rng.gen::<f32>() * 255.0,
    )
}

/// Uniform in `[lo, hi)`, or `lo` when the interval is empty
fn uniform(rng: &mut SmallRng, lo: f32, hi: f32) -> f32 {
    lo + rng.gen::<f32>() * (hi - lo).max(0.0)
}

/// A point where a disc of `radius` fits entirely inside the viewport
pub fn random_position(rng: &mut SmallRng, radius: f32, viewport: &Viewport) -> Vector2 {
    let x = inset_coordinate(rng, radius, viewport.width);
    let y = inset_coordinate(rng, radius, viewport.height);
    Vector2::new(x, y)
}

fn inset_coordinate(rng: &mut SmallRng, radius: f32, extent: f32) -> f32 {
    if extent <= 2.0 * radius {
        extent / 2.0
    } else {
        uniform(rng, radius, extent - radius)
    }
}

/// Each component uniform in `[-max_speed, max_speed)`
pub fn random_velocity(rng: &mut SmallRng, max_speed: f32) -> Vector2 {
    Vector2::new(
        uniform(rng, -max_speed, max_speed),
        uniform(rng, -max_speed, max_speed),
    )
}

/// One pretty-balls particle: random size, placement, drift and colours
pub fn random_ball(
    rng: &mut SmallRng,
    config: &CollisionConfig,
    viewport: &Viewport,
) -> Result<Particle, ConfigError> {
    let radius = uniform(rng, config.min_radius, config.max_radius);
    let position = random_position(rng, radius, viewport);
    let velocity = random_velocity(rng, config.max_initial_speed);
    let fill = random_color(rng);
    let stroke = random_color(rng);
    Ok(Particle::new(position, radius, MassModel::Area)?
        .with_velocity(velocity)
        .with_colors(fill, stroke))
}

/// A freshly pressed N-body particle at rest under the pointer
pub fn seed_body(
    rng: &mut SmallRng,
    position: Vector2,
    radius: f32,
) -> Result<Particle, ConfigError> {
    let fill = random_color(rng);
    let stroke = random_color(rng);
    Ok(Particle::new(position, radius, MassModel::RadiusSquared)?.with_colors(fill, stroke))
}
