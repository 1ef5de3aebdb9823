//! Windowless runs: drive a simulation for a fixed number of ticks and print
//! what happened

use ballpit_core::spawn::random_position;
use ballpit_core::{SimConfig, Simulation, Variant, Vector2};
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Ticks a dropped body is held (and grows) before release
const HOLD_TICKS: usize = 20;

/// What a headless run reports
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub variant: &'static str,
    /// Ticks spent pressing and holding the pointer to drop bodies
    pub drop_ticks: u64,
    /// Ticks of the timed run that follows
    pub ticks: u64,
    pub particles: usize,
    pub kinetic_energy: f32,
    pub center_of_mass: Option<Vector2>,
    pub contacts: usize,
    pub edge_contacts: usize,
    pub repaired: usize,
}

impl RunSummary {
    fn print(&self) {
        let gravity = self.variant == "gravity";
        println!("variant = {}", self.variant);
        if gravity {
            println!("drop_ticks = {}", self.drop_ticks);
        }
        println!("ticks = {}", self.ticks);
        println!("particles = {}", self.particles);
        println!("kinetic_energy = {}", self.kinetic_energy);
        match self.center_of_mass {
            Some(com) => println!("center_of_mass = {}", com),
            None => println!("center_of_mass = none"),
        }
        if gravity {
            println!("interacting_pairs = {}", self.contacts);
        } else {
            println!("contacts = {}", self.contacts);
            println!("edge_contacts = {}", self.edge_contacts);
        }
        if self.repaired > 0 {
            println!("repaired = {}", self.repaired);
        }
    }
}

pub fn run(
    config: SimConfig,
    ticks: u64,
    bodies: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    simulate(config, ticks, bodies)?.print();
    Ok(())
}

fn simulate(
    config: SimConfig,
    ticks: u64,
    bodies: usize,
) -> Result<RunSummary, Box<dyn std::error::Error>> {
    let gravity = matches!(config.variant, Variant::Gravity(_));
    let seed = config.seed;
    let mut sim = Simulation::new(config)?;

    if gravity {
        drop_bodies(&mut sim, bodies, seed)?;
    }
    let drop_ticks = sim.tick_count();

    let mut summary = RunSummary {
        variant: sim.engine_name(),
        drop_ticks,
        ticks: 0,
        particles: 0,
        kinetic_energy: 0.0,
        center_of_mass: None,
        contacts: 0,
        edge_contacts: 0,
        repaired: 0,
    };
    for _ in 0..ticks {
        if let Some(report) = sim.tick() {
            summary.contacts += report.stats.interacting_pairs;
            summary.edge_contacts += report.stats.edge_contacts;
            summary.repaired += report.repaired;
        }
    }

    summary.ticks = sim.tick_count() - drop_ticks;
    summary.particles = sim.particles().len();
    summary.kinetic_energy = sim.kinetic_energy();
    summary.center_of_mass = sim.center_of_mass();
    Ok(summary)
}

/// Press, hold and release the pointer at random spots, the way a user would
/// seed the gravity variant
fn drop_bodies(
    sim: &mut Simulation,
    bodies: usize,
    seed: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let viewport = sim.viewport();
    for _ in 0..bodies {
        sim.pointer_moved(random_position(&mut rng, 0.0, &viewport));
        sim.press_pointer()?;
        for _ in 0..HOLD_TICKS {
            sim.tick();
        }
        sim.release_pointer();
    }
    sim.pointer_left();
    log::info!("dropped {} bodies", bodies);
    Ok(())
}
