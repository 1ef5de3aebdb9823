pub mod collision;
pub mod config;
pub mod error;
pub mod frame;
pub mod gravity;
pub mod interaction;
pub mod particle;
pub mod pointer;
pub mod registry;
pub mod simulation;
pub mod spawn;
pub mod vector;

pub use collision::{handle_edges, resolve_contact, Contact, ElasticCollisions};
pub use config::{CollisionConfig, GravityConfig, SimConfig, Variant, Viewport};
pub use error::{ConfigError, SimError};
pub use frame::{trail_opacity, Frame, ParticleView};
pub use gravity::{center_of_mass, pair_force, Gravitation, PairForce};
pub use interaction::{engine_for, Interaction, StepStats, TickEnv, Toggles};
pub use particle::{MassModel, Particle, Rgb};
pub use pointer::{falloff, FieldMode, Pointer, PointerField};
pub use registry::{ParticleId, ParticleSet};
pub use simulation::{RunState, Simulation, TickReport};
pub use vector::Vector2;

// Test helpers module (public for integration tests)
// Always compiled - integration tests are separate crates and need access
pub mod tests;
