use crate::error::ConfigError;
use crate::vector::Vector2;
use std::f32::consts::PI;

/// An RGB colour with channels in `[0, 255)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb(pub f32, pub f32, pub f32);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255.0, 255.0, 255.0);
    pub const RED: Rgb = Rgb(255.0, 0.0, 0.0);
}

/// How a particle's mass follows from its radius
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MassModel {
    /// `mass = radius²` (N-body)
    RadiusSquared,
    /// `mass = π·radius²`, the area of the disc (pretty balls)
    Area,
}

impl MassModel {
    pub fn mass_for(self, radius: f32) -> f32 {
        match self {
            MassModel::RadiusSquared => radius * radius,
            MassModel::Area => PI * radius * radius,
        }
    }
}

/// A disc-shaped particle in the simulation
#[derive(Debug, Clone)]
pub struct Particle {
    pub position: Vector2,
    pub velocity: Vector2,
    pub acceleration: Vector2,
    radius: f32,
    mass: f32,
    mass_model: MassModel,
    /// Touched an edge or another particle since the renderer last looked
    pub colliding: bool,
    pub fill: Rgb,
    pub stroke: Rgb,
}

impl Particle {
    pub fn new(position: Vector2, radius: f32, mass_model: MassModel) -> Result<Self, ConfigError> {
        check_radius(radius)?;
        Ok(Self {
            position,
            velocity: Vector2::ZERO,
            acceleration: Vector2::ZERO,
            radius,
            mass: mass_model.mass_for(radius),
            mass_model,
            colliding: false,
            fill: Rgb::WHITE,
            stroke: Rgb::WHITE,
        })
    }

    pub fn with_velocity(mut self, velocity: Vector2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_colors(mut self, fill: Rgb, stroke: Rgb) -> Self {
        self.fill = fill;
        self.stroke = stroke;
        self
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub fn mass_model(&self) -> MassModel {
        self.mass_model
    }

    pub fn set_radius(&mut self, radius: f32) -> Result<(), ConfigError> {
        check_radius(radius)?;
        self.radius = radius;
        self.mass = self.mass_model.mass_for(radius);
        Ok(())
    }

    pub fn grow(&mut self, increment: f32) -> Result<(), ConfigError> {
        self.set_radius(self.radius + increment)
    }

    /// Semi-implicit Euler step: velocity from acceleration (then damping and
    /// the speed clamp), position from the new velocity
    pub fn integrate(&mut self, max_speed: f32, damping: Option<f32>) {
        self.velocity += self.acceleration;
        if let Some(factor) = damping {
            self.velocity = self.velocity.multiply(factor);
        }
        self.velocity = self.velocity.clamp_magnitude(max_speed);
        self.position += self.velocity;
    }

    /// Read the collision flag and clear it
    pub fn take_colliding(&mut self) -> bool {
        std::mem::take(&mut self.colliding)
    }

    pub fn kinetic_energy(&self) -> f32 {
        0.5 * self.mass * self.velocity.magnitude_squared()
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite() && self.acceleration.is_finite()
    }
}

fn check_radius(radius: f32) -> Result<(), ConfigError> {
    if radius.is_finite() && radius > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidRadius(radius))
    }
}
