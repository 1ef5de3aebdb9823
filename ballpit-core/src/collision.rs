//! Bouncing balls: wall reflection, pairwise contacts and the pointer field
//!
//! A tick runs in a fixed order: pointer field, damped integration, edge
//! handling, pairwise contacts, then a final clamp that puts back any particle
//! the contact separation pushed past a wall.
//!
//! Contacts exchange the normal component of the relative velocity without
//! weighting by mass. Two balls of different size therefore trade velocities
//! as if they weighed the same.

use crate::config::{CollisionConfig, Viewport};
use crate::interaction::{Interaction, StepStats, TickEnv};
use crate::particle::{MassModel, Particle};
use crate::pointer::{FieldMode, PointerField};
use crate::registry::ParticleSet;

/// Result of testing two particles for contact
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Contact {
    Separate,
    Resolved,
    /// Centres coincide, there is no line of centres to push along
    Degenerate,
}

/// Reflect `p` off any wall it is touching; returns whether it touched one
pub fn handle_edges(p: &mut Particle, viewport: &Viewport) -> bool {
    let r = p.radius();
    let mut hit = false;

    if p.position.x <= r {
        p.position.x = r;
        p.velocity.x = -p.velocity.x;
        hit = true;
    } else if p.position.x >= viewport.width - r {
        p.position.x = viewport.width - r;
        p.velocity.x = -p.velocity.x;
        hit = true;
    }

    if p.position.y <= r {
        p.position.y = r;
        p.velocity.y = -p.velocity.y;
        hit = true;
    } else if p.position.y >= viewport.height - r {
        p.position.y = viewport.height - r;
        p.velocity.y = -p.velocity.y;
        hit = true;
    }

    if hit {
        p.colliding = true;
    }
    hit
}

/// Clamp `p` into the region where its disc fits; velocity is left alone
pub fn contain(p: &mut Particle, viewport: &Viewport) {
    let r = p.radius();
    p.position.x = clamp_axis(p.position.x, r, viewport.width);
    p.position.y = clamp_axis(p.position.y, r, viewport.height);
}

fn clamp_axis(value: f32, r: f32, extent: f32) -> f32 {
    let (lo, hi) = (r, extent - r);
    if lo > hi {
        // disc wider than the viewport
        extent / 2.0
    } else {
        value.clamp(lo, hi)
    }
}

/// Resolve a contact between `a` and `b` if their discs overlap or touch
pub fn resolve_contact(a: &mut Particle, b: &mut Particle) -> Contact {
    let offset = b.position.subtract(a.position);
    let distance = offset.magnitude();
    let min_distance = a.radius() + b.radius();
    if !(distance <= min_distance) {
        return Contact::Separate;
    }
    let Some(normal) = offset.try_normalize() else {
        return Contact::Degenerate;
    };

    a.colliding = true;
    b.colliding = true;

    let relative_velocity = b.velocity.subtract(a.velocity);
    let impulse = normal.multiply(normal.dot(relative_velocity));
    a.velocity += impulse;
    b.velocity -= impulse;

    let push = normal.multiply((min_distance - distance) / 2.0);
    a.position -= push;
    b.position += push;
    Contact::Resolved
}

pub struct ElasticCollisions {
    config: CollisionConfig,
}

impl ElasticCollisions {
    pub fn new(config: CollisionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CollisionConfig {
        &self.config
    }

    pub fn field(&self, env: &TickEnv) -> PointerField {
        PointerField {
            threshold: self.config.pointer_threshold(&env.viewport),
            acceleration_factor: self.config.acceleration_factor,
            mode: FieldMode::from_color_mode(env.toggles.use_color),
        }
    }
}

impl Interaction for ElasticCollisions {
    fn name(&self) -> &'static str {
        "collisions"
    }

    fn mass_model(&self) -> MassModel {
        MassModel::Area
    }

    fn step(&mut self, particles: &mut ParticleSet, env: &TickEnv) -> StepStats {
        let mut stats = StepStats::default();
        let field = self.field(env);
        let damping = env.toggles.damping.then_some(self.config.damping_factor);

        for p in particles.iter_mut() {
            p.acceleration = field.acceleration(p, env.pointer);
            p.integrate(self.config.max_velocity, damping);
        }

        for p in particles.iter_mut() {
            if handle_edges(p, &env.viewport) {
                stats.edge_contacts += 1;
            }
        }

        particles.for_each_pair(|a, b| match resolve_contact(a, b) {
            Contact::Resolved => stats.interacting_pairs += 1,
            Contact::Degenerate => stats.degenerate_pairs += 1,
            Contact::Separate => {}
        });

        for p in particles.iter_mut() {
            contain(p, &env.viewport);
        }
        stats
    }

    fn tether_opacity(&self, particle: &Particle, env: &TickEnv) -> f32 {
        self.field(env).influence(particle, env.pointer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::Vector2;

    fn ball(x: f32, y: f32, vx: f32, vy: f32) -> Particle {
        Particle::new(Vector2::new(x, y), 5.0, MassModel::Area)
            .unwrap()
            .with_velocity(Vector2::new(vx, vy))
    }

    fn viewport() -> Viewport {
        Viewport::new(100.0, 80.0).unwrap()
    }

    #[test]
    fn left_wall_flips_x_only() {
        let mut p = ball(3.0, 40.0, -2.0, 1.0);
        assert!(handle_edges(&mut p, &viewport()));
        assert_eq!(p.position, Vector2::new(5.0, 40.0));
        assert_eq!(p.velocity, Vector2::new(2.0, 1.0));
        assert!(p.colliding);
    }

    #[test]
    fn bottom_wall_flips_y_only() {
        let mut p = ball(50.0, 79.0, 1.0, 3.0);
        assert!(handle_edges(&mut p, &viewport()));
        assert_eq!(p.position, Vector2::new(50.0, 75.0));
        assert_eq!(p.velocity, Vector2::new(1.0, -3.0));
    }

    #[test]
    fn corner_flips_both() {
        let mut p = ball(99.0, 1.0, 1.0, -1.0);
        handle_edges(&mut p, &viewport());
        assert_eq!(p.position, Vector2::new(95.0, 5.0));
        assert_eq!(p.velocity, Vector2::new(-1.0, 1.0));
    }

    #[test]
    fn interior_particle_untouched() {
        let mut p = ball(50.0, 40.0, 1.0, 1.0);
        assert!(!handle_edges(&mut p, &viewport()));
        assert!(!p.colliding);
        assert_eq!(p.velocity, Vector2::new(1.0, 1.0));
    }

    #[test]
    fn contain_centres_oversized_discs() {
        let mut p = Particle::new(Vector2::new(3.0, 3.0), 60.0, MassModel::Area).unwrap();
        contain(&mut p, &viewport());
        assert_eq!(p.position, Vector2::new(50.0, 40.0));
    }

    #[test]
    fn separated_pair_is_left_alone() {
        let mut a = ball(0.0, 0.0, 1.0, 0.0);
        let mut b = ball(20.0, 0.0, -1.0, 0.0);
        assert_eq!(resolve_contact(&mut a, &mut b), Contact::Separate);
        assert_eq!(a.velocity.x, 1.0);
        assert!(!a.colliding && !b.colliding);
    }

    #[test]
    fn coincident_pair_is_degenerate() {
        let mut a = ball(10.0, 10.0, 1.0, 0.0);
        let mut b = ball(10.0, 10.0, -1.0, 0.0);
        assert_eq!(resolve_contact(&mut a, &mut b), Contact::Degenerate);
        assert!(a.position.is_finite() && b.velocity.is_finite());
    }
}
