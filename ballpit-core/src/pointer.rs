//! Pointer tracking and the pointer force field
//!
//! Near the pointer every particle feels an acceleration scaled by a quadratic
//! falloff of its distance to the pointer. The same falloff doubles as the
//! opacity of the tether line the viewer draws to the pointer.

use crate::particle::Particle;
use crate::vector::Vector2;

/// Last known pointer position; `Absent` while the pointer is off the canvas
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Pointer {
    Present(Vector2),
    #[default]
    Absent,
}

impl Pointer {
    pub fn position(&self) -> Option<Vector2> {
        match self {
            Pointer::Present(pos) => Some(*pos),
            Pointer::Absent => None,
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Pointer::Present(_))
    }
}

impl From<Option<Vector2>> for Pointer {
    fn from(pos: Option<Vector2>) -> Self {
        pos.map_or(Pointer::Absent, Pointer::Present)
    }
}

/// Whether the field pulls particles in or pushes them away
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldMode {
    Attract,
    Repel,
}

impl FieldMode {
    /// Colour mode on attracts, colour mode off repels
    pub fn from_color_mode(use_color: bool) -> Self {
        if use_color {
            FieldMode::Attract
        } else {
            FieldMode::Repel
        }
    }

    fn sign(self) -> f32 {
        match self {
            FieldMode::Attract => 1.0,
            FieldMode::Repel => -1.0,
        }
    }
}

/// Influence of the pointer on a particle `distance` away
///
/// 1 inside the particle itself, 0 at or past `threshold`, and
/// `1 - (distance / threshold)²` in between.
pub fn falloff(distance: f32, radius: f32, threshold: f32) -> f32 {
    if distance <= radius {
        1.0
    } else if distance >= threshold {
        0.0
    } else {
        1.0 - (distance / threshold).powi(2)
    }
}

/// The pointer's pull (or push) on particles near it
#[derive(Debug, Clone, Copy)]
pub struct PointerField {
    pub threshold: f32,
    pub acceleration_factor: f32,
    pub mode: FieldMode,
}

impl PointerField {
    /// Falloff for `particle`; 0 when the pointer is absent
    pub fn influence(&self, particle: &Particle, pointer: Pointer) -> f32 {
        match pointer {
            Pointer::Present(pos) => falloff(
                particle.position.distance(pos),
                particle.radius(),
                self.threshold,
            ),
            Pointer::Absent => 0.0,
        }
    }

    /// Acceleration the field imparts on `particle` this tick
    pub fn acceleration(&self, particle: &Particle, pointer: Pointer) -> Vector2 {
        let Pointer::Present(pos) = pointer else {
            return Vector2::ZERO;
        };
        let influence = self.influence(particle, pointer);
        pos.subtract(particle.position)
            .multiply(influence * self.acceleration_factor * self.mode.sign())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::MassModel;

    fn field(mode: FieldMode) -> PointerField {
        PointerField {
            threshold: 100.0,
            acceleration_factor: 0.002,
            mode,
        }
    }

    fn particle_at(x: f32, y: f32) -> Particle {
        Particle::new(Vector2::new(x, y), 5.0, MassModel::Area).unwrap()
    }

    #[test]
    fn falloff_boundaries() {
        assert_eq!(falloff(5.0, 5.0, 100.0), 1.0);
        assert_eq!(falloff(0.0, 5.0, 100.0), 1.0);
        assert_eq!(falloff(100.0, 5.0, 100.0), 0.0);
        assert_eq!(falloff(250.0, 5.0, 100.0), 0.0);
        for d in [5.001, 20.0, 50.0, 99.9] {
            let f = falloff(d, 5.0, 100.0);
            assert!(f > 0.0 && f < 1.0, "falloff({d}) = {f}");
        }
        assert!((falloff(50.0, 5.0, 100.0) - 0.75).abs() < 1e-6);
    }

    #[test]
    fn absent_pointer_has_no_effect() {
        let p = particle_at(10.0, 10.0);
        let f = field(FieldMode::Attract);
        assert_eq!(f.influence(&p, Pointer::Absent), 0.0);
        assert_eq!(f.acceleration(&p, Pointer::Absent), Vector2::ZERO);
    }

    #[test]
    fn attract_points_toward_pointer() {
        let p = particle_at(0.0, 0.0);
        let pointer = Pointer::Present(Vector2::new(50.0, 0.0));
        let a = field(FieldMode::Attract).acceleration(&p, pointer);
        assert!((a.x - 50.0 * 0.75 * 0.002).abs() < 1e-6);
        assert_eq!(a.y, 0.0);
        let r = field(FieldMode::Repel).acceleration(&p, pointer);
        assert_eq!(r, -a);
    }

    #[test]
    fn color_mode_selects_direction() {
        assert_eq!(FieldMode::from_color_mode(true), FieldMode::Attract);
        assert_eq!(FieldMode::from_color_mode(false), FieldMode::Repel);
    }
}
