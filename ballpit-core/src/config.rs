//! Compile-time constants and the configuration structs built from them
//!
//! Each variant gets its own config with `Default` taken from the constants
//! below. Builders exist for tests and the CLI; nothing is read from disk.

use crate::error::ConfigError;

// N-body
pub const G: f32 = 0.2;
pub const GRAVITY_MAX_VELOCITY: f32 = 10_000.0;
pub const MIN_SIZE_DEAD_ZONE: bool = true;
pub const GROWTH_RATE: f32 = 0.3;
pub const SPAWN_RADIUS: f32 = 1.0;
pub const TRANSLATE_STEP: f32 = 15.0;
pub const SHOW_CENTER_OF_MASS: bool = true;
pub const PARTICLE_TRAILS: bool = true;
/// Share of a trail's opacity lost every frame
pub const TRAIL_FADE: f32 = 0.1;

// Pretty balls
pub const NUM_PARTICLES: usize = 200;
pub const COLLISION_MAX_VELOCITY: f32 = 50.0;
pub const ACCELERATION_FACTOR: f32 = 0.002;
pub const DAMPING_FACTOR: f32 = 0.998;
pub const MIN_RADIUS: f32 = 2.0;
pub const MAX_RADIUS: f32 = 10.0;
pub const MAX_INITIAL_SPEED: f32 = 1.0;
/// Pointer influence threshold is `viewport.width / THRESHOLD_DIVISOR`
pub const THRESHOLD_DIVISOR: f32 = 6.0;

pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_VIEWPORT: Viewport = Viewport {
    width: 1280.0,
    height: 720.0,
};

/// Size of the drawable region; the origin is the top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Result<Self, ConfigError> {
        let viewport = Self { width, height };
        viewport.validate()?;
        Ok(viewport)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let ok = |v: f32| v.is_finite() && v > 0.0;
        if ok(self.width) && ok(self.height) {
            Ok(())
        } else {
            Err(ConfigError::InvalidViewport {
                width: self.width,
                height: self.height,
            })
        }
    }

    pub fn center(&self) -> crate::Vector2 {
        crate::Vector2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Constants for the gravitational (N-body) variant
#[derive(Debug, Clone, PartialEq)]
pub struct GravityConfig {
    pub g: f32,
    pub max_velocity: f32,
    /// Zero the force between overlapping particles
    pub dead_zone: bool,
    pub growth_rate: f32,
    pub spawn_radius: f32,
    pub translate_step: f32,
    /// Keep the centre of mass pinned to the middle of the view every tick
    pub recenter: bool,
    /// Hand the centre of mass to the renderer for its marker
    pub show_center_of_mass: bool,
    pub trails: bool,
}

impl Default for GravityConfig {
    fn default() -> Self {
        Self {
            g: G,
            max_velocity: GRAVITY_MAX_VELOCITY,
            dead_zone: MIN_SIZE_DEAD_ZONE,
            growth_rate: GROWTH_RATE,
            spawn_radius: SPAWN_RADIUS,
            translate_step: TRANSLATE_STEP,
            recenter: false,
            show_center_of_mass: SHOW_CENTER_OF_MASS,
            trails: PARTICLE_TRAILS,
        }
    }
}

impl GravityConfig {
    pub fn with_g(mut self, g: f32) -> Self {
        self.g = g;
        self
    }

    pub fn with_max_velocity(mut self, max_velocity: f32) -> Self {
        self.max_velocity = max_velocity;
        self
    }

    pub fn with_dead_zone(mut self, dead_zone: bool) -> Self {
        self.dead_zone = dead_zone;
        self
    }

    pub fn with_recenter(mut self, recenter: bool) -> Self {
        self.recenter = recenter;
        self
    }

    pub fn with_center_of_mass_marker(mut self, show: bool) -> Self {
        self.show_center_of_mass = show;
        self
    }

    pub fn with_trails(mut self, trails: bool) -> Self {
        self.trails = trails;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::require_positive("gravitational constant", self.g)?;
        ConfigError::require_positive("max velocity", self.max_velocity)?;
        ConfigError::require_positive("growth rate", self.growth_rate)?;
        ConfigError::require_positive("translate step", self.translate_step)?;
        if !(self.spawn_radius.is_finite() && self.spawn_radius > 0.0) {
            return Err(ConfigError::InvalidRadius(self.spawn_radius));
        }
        Ok(())
    }
}

/// Constants for the collision ("pretty balls") variant
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionConfig {
    pub particle_count: usize,
    pub max_velocity: f32,
    pub acceleration_factor: f32,
    pub damping_factor: f32,
    pub min_radius: f32,
    pub max_radius: f32,
    pub max_initial_speed: f32,
    pub threshold_divisor: f32,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            particle_count: NUM_PARTICLES,
            max_velocity: COLLISION_MAX_VELOCITY,
            acceleration_factor: ACCELERATION_FACTOR,
            damping_factor: DAMPING_FACTOR,
            min_radius: MIN_RADIUS,
            max_radius: MAX_RADIUS,
            max_initial_speed: MAX_INITIAL_SPEED,
            threshold_divisor: THRESHOLD_DIVISOR,
        }
    }
}

impl CollisionConfig {
    pub fn with_particle_count(mut self, particle_count: usize) -> Self {
        self.particle_count = particle_count;
        self
    }

    pub fn with_max_velocity(mut self, max_velocity: f32) -> Self {
        self.max_velocity = max_velocity;
        self
    }

    pub fn with_radius_range(mut self, min_radius: f32, max_radius: f32) -> Self {
        self.min_radius = min_radius;
        self.max_radius = max_radius;
        self
    }

    pub fn with_max_initial_speed(mut self, max_initial_speed: f32) -> Self {
        self.max_initial_speed = max_initial_speed;
        self
    }

    /// Pointer influence threshold for a viewport of the given width
    pub fn pointer_threshold(&self, viewport: &Viewport) -> f32 {
        viewport.width / self.threshold_divisor
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::require_positive("max velocity", self.max_velocity)?;
        ConfigError::require_positive("acceleration factor", self.acceleration_factor)?;
        ConfigError::require_positive("threshold divisor", self.threshold_divisor)?;
        if !(self.damping_factor > 0.0 && self.damping_factor <= 1.0) {
            return Err(ConfigError::InvalidDamping(self.damping_factor));
        }
        for radius in [self.min_radius, self.max_radius] {
            if !(radius.is_finite() && radius > 0.0) {
                return Err(ConfigError::InvalidRadius(radius));
            }
        }
        if self.min_radius > self.max_radius {
            return Err(ConfigError::InvalidRadiusRange {
                min: self.min_radius,
                max: self.max_radius,
            });
        }
        if !(self.max_initial_speed.is_finite() && self.max_initial_speed >= 0.0) {
            return Err(ConfigError::NonPositive {
                name: "max initial speed",
                value: self.max_initial_speed,
            });
        }
        Ok(())
    }
}

/// Which interaction strategy a simulation runs
#[derive(Debug, Clone, PartialEq)]
pub enum Variant {
    Gravity(GravityConfig),
    Collisions(CollisionConfig),
}

/// Everything needed to construct a [`crate::Simulation`]
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    pub variant: Variant,
    pub viewport: Viewport,
    pub seed: u64,
    /// Upper bound on the particle count; `None` means unbounded
    pub capacity: Option<usize>,
}

impl SimConfig {
    pub fn gravity() -> Self {
        Self::new(Variant::Gravity(GravityConfig::default()))
    }

    pub fn collisions() -> Self {
        Self::new(Variant::Collisions(CollisionConfig::default()))
    }

    pub fn new(variant: Variant) -> Self {
        Self {
            variant,
            viewport: DEFAULT_VIEWPORT,
            seed: DEFAULT_SEED,
            capacity: None,
        }
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.viewport.validate()?;
        match &self.variant {
            Variant::Gravity(cfg) => cfg.validate(),
            Variant::Collisions(cfg) => cfg.validate(),
        }
    }
}
