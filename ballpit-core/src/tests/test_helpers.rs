//! Test helper utilities for ballpit tests

use crate::config::{CollisionConfig, GravityConfig, SimConfig, Variant, Viewport};
use crate::particle::{MassModel, Particle};
use crate::simulation::Simulation;
use crate::vector::Vector2;

/// Check if two f32 values are approximately equal within tolerance
pub fn approx_eq_f32(a: f32, b: f32, tol: f32) -> bool {
    (a - b).abs() <= tol
}

/// Component-wise approximate equality for vectors
pub fn vec_approx_eq(a: Vector2, b: Vector2, tol: f32) -> bool {
    approx_eq_f32(a.x, b.x, tol) && approx_eq_f32(a.y, b.y, tol)
}

/// N-body particle at rest
pub fn body(x: f32, y: f32, radius: f32) -> Particle {
    Particle::new(Vector2::new(x, y), radius, MassModel::RadiusSquared)
        .expect("test radius must be positive")
}

/// Pretty-balls particle with a given velocity
pub fn ball(x: f32, y: f32, radius: f32, vx: f32, vy: f32) -> Particle {
    Particle::new(Vector2::new(x, y), radius, MassModel::Area)
        .expect("test radius must be positive")
        .with_velocity(Vector2::new(vx, vy))
}

/// Gravity config with no recentring, so positions stay in world space
pub fn gravity_config(g: f32) -> SimConfig {
    SimConfig::new(Variant::Gravity(GravityConfig::default().with_g(g)))
}

/// Collision config with an empty initial pool in a `width` x `height` box
pub fn collision_config(width: f32, height: f32) -> SimConfig {
    SimConfig::new(Variant::Collisions(
        CollisionConfig::default().with_particle_count(0),
    ))
    .with_viewport(Viewport::new(width, height).expect("test viewport must be valid"))
}

/// Run a seeded random pool for `ticks` ticks and return every position
pub fn run_pool(config: SimConfig, ticks: usize) -> Vec<Vector2> {
    let mut sim = Simulation::new(config).expect("test config must be valid");
    for _ in 0..ticks {
        sim.tick();
    }
    sim.particles().iter().map(|p| p.position).collect()
}
