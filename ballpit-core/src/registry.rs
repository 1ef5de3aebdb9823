//! Append-only particle storage with stable ids
//!
//! Slots are never reused: removing a particle leaves a hole, so a
//! [`ParticleId`] handed out once keeps naming the same particle (or nothing).

use crate::error::SimError;
use crate::particle::Particle;
use std::fmt;

/// Stable handle to a particle in a [`ParticleSet`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticleId(usize);

impl ParticleId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ParticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ParticleSet {
    slots: Vec<Option<Particle>>,
    live: usize,
    capacity: Option<usize>,
}

impl ParticleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// A set that refuses to hold more than `capacity` live particles
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            live: 0,
            capacity: Some(capacity),
        }
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn push(&mut self, particle: Particle) -> Result<ParticleId, SimError> {
        if let Some(capacity) = self.capacity {
            if self.live >= capacity {
                return Err(SimError::CapacityExceeded { capacity });
            }
        }
        let id = ParticleId(self.slots.len());
        self.slots.push(Some(particle));
        self.live += 1;
        Ok(id)
    }

    pub fn remove(&mut self, id: ParticleId) -> Result<Particle, SimError> {
        let particle = self
            .slots
            .get_mut(id.0)
            .and_then(Option::take)
            .ok_or(SimError::UnknownParticle(id))?;
        self.live -= 1;
        Ok(particle)
    }

    pub fn get(&self, id: ParticleId) -> Option<&Particle> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: ParticleId) -> Option<&mut Particle> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.slots.iter().flatten()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Particle> {
        self.slots.iter_mut().flatten()
    }

    pub fn iter_with_ids(&self) -> impl Iterator<Item = (ParticleId, &Particle)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|p| (ParticleId(i), p)))
    }

    pub fn iter_mut_with_ids(&mut self) -> impl Iterator<Item = (ParticleId, &mut Particle)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_mut().map(|p| (ParticleId(i), p)))
    }

    /// Visit every unordered pair of live particles exactly once, `i < j`
    pub fn for_each_pair<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut Particle, &mut Particle),
    {
        for j in 1..self.slots.len() {
            let (head, tail) = self.slots.split_at_mut(j);
            let Some(b) = tail[0].as_mut() else {
                continue;
            };
            for a in head.iter_mut().flatten() {
                f(a, b);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::MassModel;
    use crate::vector::Vector2;

    fn particle(x: f32) -> Particle {
        Particle::new(Vector2::new(x, 0.0), 1.0, MassModel::Area).unwrap()
    }

    #[test]
    fn ids_stay_stable_after_removal() {
        let mut set = ParticleSet::new();
        let a = set.push(particle(1.0)).unwrap();
        let b = set.push(particle(2.0)).unwrap();
        set.remove(a).unwrap();
        assert_eq!(set.len(), 1);
        assert!(set.get(a).is_none());
        assert_eq!(set.get(b).unwrap().position.x, 2.0);
        let c = set.push(particle(3.0)).unwrap();
        assert_ne!(c, a);
    }

    #[test]
    fn capacity_is_enforced() {
        let mut set = ParticleSet::with_capacity(1);
        set.push(particle(0.0)).unwrap();
        assert_eq!(
            set.push(particle(1.0)).unwrap_err(),
            SimError::CapacityExceeded { capacity: 1 }
        );
    }

    #[test]
    fn removing_twice_is_an_error() {
        let mut set = ParticleSet::new();
        let a = set.push(particle(0.0)).unwrap();
        set.remove(a).unwrap();
        assert_eq!(set.remove(a).unwrap_err(), SimError::UnknownParticle(a));
    }

    #[test]
    fn pairs_are_visited_once() {
        let mut set = ParticleSet::new();
        for x in 0..4 {
            set.push(particle(x as f32)).unwrap();
        }
        let hole = set.iter_with_ids().nth(1).map(|(id, _)| id).unwrap();
        set.remove(hole).unwrap();

        let mut pairs = Vec::new();
        set.for_each_pair(|a, b| pairs.push((a.position.x, b.position.x)));
        assert_eq!(pairs, vec![(0.0, 2.0), (0.0, 3.0), (2.0, 3.0)]);
    }
}
