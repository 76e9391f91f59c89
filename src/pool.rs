//! Fixed-capacity projectile pool.
//!
//! Slots are allocated once and recycled by flipping `active`.  When every
//! slot is busy a fire request is dropped: the pool never grows.

use tracing::trace;

use crate::entities::{Entity, Owner, Sprite, Visual};
use crate::geometry::{Rect, Vector2};

#[derive(Clone, Debug)]
pub struct Projectile {
    pub body: Entity,
    pub owner: Owner,
}

#[derive(Clone, Debug)]
pub struct ProjectilePool {
    slots: Vec<Projectile>,
}

impl ProjectilePool {
    pub fn new(capacity: usize) -> Self {
        let slots = (0..capacity)
            .map(|_| Projectile {
                body: Entity::new(Visual::new(Sprite::Projectile)),
                owner: Owner::Boss,
            })
            .collect();
        Self { slots }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|p| p.body.active).count()
    }

    pub fn get(&self, index: usize) -> Option<&Projectile> {
        self.slots.get(index)
    }

    /// Launch from the first free slot.  Returns the slot used, or `None` when
    /// the pool is saturated and the shot was dropped.
    pub fn fire(&mut self, owner: Owner, degrees: f64, speed: f64, origin: Vector2) -> Option<usize> {
        let Some(index) = self.slots.iter().position(|p| !p.body.active) else {
            trace!(?owner, degrees, "projectile pool saturated, shot dropped");
            return None;
        };

        let slot = &mut self.slots[index];
        slot.body.active = true;
        slot.body.place_at(origin);
        slot.body.set_velocity(degrees, speed);
        slot.owner = owner;
        Some(index)
    }

    pub fn deactivate(&mut self, index: usize) {
        if let Some(slot) = self.slots.get_mut(index) {
            slot.body.active = false;
        }
    }

    /// Active projectiles with their slot index.
    pub fn active(&self) -> impl Iterator<Item = (usize, &Projectile)> {
        self.slots.iter().enumerate().filter(|(_, p)| p.body.active)
    }

    pub fn active_mut(&mut self) -> impl Iterator<Item = (usize, &mut Projectile)> {
        self.slots.iter_mut().enumerate().filter(|(_, p)| p.body.active)
    }

    /// Move every active projectile and recycle those whose center left `bounds`.
    pub fn integrate(&mut self, dt: f64, bounds: &Rect) {
        for (_, projectile) in self.active_mut() {
            projectile.body.integrate(dt);
            if !bounds.contains(projectile.body.position) {
                projectile.body.active = false;
            }
        }
    }
}
