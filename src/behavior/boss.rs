//! Boss attack cycle: explosion → wait → laser → wait → explosion …

use crate::entities::{Entity, Owner};
use crate::pool::ProjectilePool;
use crate::timer::Timer;

use super::Behavior;

// ── Attack tables ─────────────────────────────────────────────────────────────

pub const EXPLOSION_COUNT: u32 = 15;
pub const EXPLOSION_SPEED: f64 = 15.0;
pub const LASER_SPEED: f64 = 30.0;
/// Sweep after which the laser stops.
pub const LASER_SWEEP_DEGREES: f64 = 355.0;
pub const WAIT_SECONDS: f64 = 3.0;
/// How long the boss holds its attack pose after firing.
pub const ATTACK_POSE_SECONDS: f64 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum BossPhase {
    Explosion = 0,
    Laser = 1,
    Wait = 2,
}

impl BossPhase {
    pub fn index(&self) -> u8 {
        *self as u8
    }
}

/// What the boss behavior may touch during one drive.
pub struct BossContext<'a> {
    pub boss: &'a mut Entity,
    pub projectiles: &'a mut ProjectilePool,
    pub pose: &'a mut Timer,
    pub rotation_speed: f64,
}

#[derive(Clone, Debug)]
pub struct BossBehavior {
    wait: Timer,
    /// Attack that preceded the current wait.
    waited_after: BossPhase,
    /// Degrees turned since the laser started.
    sweep: f64,
}

impl Default for BossBehavior {
    fn default() -> Self {
        Self {
            wait: Timer::new(WAIT_SECONDS),
            waited_after: BossPhase::Laser,
            sweep: 0.0,
        }
    }
}

impl BossBehavior {
    pub fn waited_after(&self) -> BossPhase {
        self.waited_after
    }

    pub fn sweep(&self) -> f64 {
        self.sweep
    }

    fn explosion(&mut self, ctx: &mut BossContext<'_>) -> Option<BossPhase> {
        let step = 360.0 / EXPLOSION_COUNT as f64;
        for i in 0..EXPLOSION_COUNT {
            ctx.projectiles
                .fire(Owner::Boss, step * i as f64, EXPLOSION_SPEED, ctx.boss.position);
        }
        *ctx.pose = Timer::new(ATTACK_POSE_SECONDS);
        Some(BossPhase::Wait)
    }

    fn laser(&mut self, ctx: &mut BossContext<'_>, dt: f64) -> Option<BossPhase> {
        let turn = ctx.rotation_speed * dt;
        ctx.boss.add_rotation(turn);
        self.sweep += turn;

        ctx.projectiles
            .fire(Owner::Boss, ctx.boss.rotation(), LASER_SPEED, ctx.boss.position);
        *ctx.pose = Timer::new(ATTACK_POSE_SECONDS);

        if self.sweep >= LASER_SWEEP_DEGREES {
            ctx.boss.set_rotation(0.0);
            self.sweep = 0.0;
            return Some(BossPhase::Wait);
        }
        None
    }

    fn wait(&mut self, dt: f64) -> Option<BossPhase> {
        if !self.wait.tick(dt) {
            return None;
        }
        match self.waited_after {
            BossPhase::Explosion => Some(BossPhase::Laser),
            _ => Some(BossPhase::Explosion),
        }
    }
}

impl<'a> Behavior<BossContext<'a>> for BossBehavior {
    type State = BossPhase;

    fn enter(&mut self, state: BossPhase, previous: Option<BossPhase>, _ctx: &mut BossContext<'a>, _dt: f64) {
        match state {
            BossPhase::Wait => {
                self.wait = Timer::new(WAIT_SECONDS);
                self.waited_after = previous.unwrap_or(BossPhase::Laser);
            }
            BossPhase::Laser => self.sweep = 0.0,
            BossPhase::Explosion => {}
        }
    }

    fn update(&mut self, state: BossPhase, ctx: &mut BossContext<'a>, dt: f64) -> Option<BossPhase> {
        match state {
            BossPhase::Explosion => self.explosion(ctx),
            BossPhase::Laser => self.laser(ctx, dt),
            BossPhase::Wait => self.wait(dt),
        }
    }
}
