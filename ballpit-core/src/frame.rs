//! What the renderer gets to see each frame

use crate::config::TRAIL_FADE;
use crate::interaction::Toggles;
use crate::particle::Rgb;
use crate::pointer::Pointer;
use crate::registry::ParticleId;
use crate::vector::Vector2;

/// Render state of a single particle
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleView {
    pub id: ParticleId,
    pub position: Vector2,
    pub radius: f32,
    pub fill: Rgb,
    pub stroke: Rgb,
    /// Touched a wall or another particle since the previous frame
    pub colliding: bool,
    /// Opacity of the line to the pointer, 0 when none should be drawn
    pub tether_opacity: f32,
}

/// Snapshot of the simulation handed to the renderer
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub tick: u64,
    pub particles: Vec<ParticleView>,
    /// Where to draw the centre-of-mass marker, if one should be drawn
    pub center_of_mass: Option<Vector2>,
    /// Previous frames should fade out instead of being cleared
    pub trails: bool,
    pub pointer: Pointer,
    pub toggles: Toggles,
}

impl Frame {
    /// Views that should get a tether line drawn to the pointer
    pub fn tethered(&self) -> impl Iterator<Item = &ParticleView> {
        self.particles.iter().filter(|p| p.tether_opacity > 0.0)
    }
}

/// Opacity left of something drawn `age` frames ago when every frame fades
/// the canvas by [`TRAIL_FADE`]
pub fn trail_opacity(age: usize) -> f32 {
    (1.0 - TRAIL_FADE).powi(age.min(i32::MAX as usize) as i32)
}
