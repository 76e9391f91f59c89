//! Game entity types and the battle aggregate.
//!
//! Everything that moves, collides or gets drawn is an `Entity`.  Mutation goes
//! through explicit methods so rotation and scale stay normalized at the single
//! point where they are written.

use crate::behavior::boss::{BossBehavior, BossPhase};
use crate::behavior::player::{PlayerBehavior, PlayerPhase};
use crate::behavior::StateMachine;
use crate::config::{ArenaConfig, Tunables};
use crate::geometry::{Rect, Vector2};
use crate::pool::ProjectilePool;
use crate::timer::Timer;

// ── Visuals ───────────────────────────────────────────────────────────────────

/// Which image an entity shows.  The renderer decides what that looks like.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sprite {
    /// Frame of the player walk sheet (0..=7: two walk frames per direction).
    PlayerWalk(u8),
    /// One of the three attack poses (1..=3).
    PlayerAttack(u8),
    BossIdle,
    BossAttack,
    Projectile,
    /// The player's sword reach; shares the projectile image.
    Hitbox,
}

impl Sprite {
    /// Unscaled, unrotated image extents in world units.
    pub fn size(&self) -> Vector2 {
        match self {
            Self::PlayerWalk(_) | Self::PlayerAttack(_) => Vector2::new(42.0, 48.0),
            Self::BossIdle | Self::BossAttack => Vector2::new(96.0, 96.0),
            Self::Projectile | Self::Hitbox => Vector2::new(16.0, 16.0),
        }
    }
}

/// Opaque visual handle: the sprite plus its animation clock.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Visual {
    pub sprite: Sprite,
    /// Seconds this visual has been animating.
    pub age: f64,
}

impl Visual {
    pub fn new(sprite: Sprite) -> Self {
        Self { sprite, age: 0.0 }
    }

    #[inline]
    pub fn size(&self) -> Vector2 {
        self.sprite.size()
    }

    pub fn advance(&mut self, dt: f64) {
        self.age += dt.max(0.0);
    }
}

/// Read-only placement handed to the visual sink.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vector2,
    pub rotation: f64,
    pub scale: f64,
}

/// Which sides of an entity touched the other box during the last collision test.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ContactFlags {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl ContactFlags {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn any(&self) -> bool {
        self.up || self.down || self.left || self.right
    }
}

// ── Entity ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Entity {
    pub position: Vector2,
    pub velocity: Vector2,
    rotation: f64,
    scale: f64,
    pub active: bool,
    pub visual: Visual,
    pub contact: ContactFlags,
}

/// Direction components smaller than this are treated as exactly zero.
const DIRECTION_EPSILON: f64 = 1.0e-15;

/// Wrap any angle into `[0, 360)`.
pub fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid of a tiny negative value can round up to exactly 360.
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Unit direction for an angle: 0° points up the screen.
fn heading(degrees: f64) -> Vector2 {
    let rad = (degrees - 90.0).to_radians();
    Vector2::new(-rad.cos(), rad.sin())
}

impl Entity {
    pub fn new(visual: Visual) -> Self {
        Self {
            position: Vector2::ZERO,
            velocity: Vector2::ZERO,
            rotation: 0.0,
            scale: 1.0,
            active: false,
            visual,
            contact: ContactFlags::default(),
        }
    }

    pub fn with_position(mut self, position: Vector2) -> Self {
        self.position = position;
        self
    }

    pub fn activated(mut self) -> Self {
        self.active = true;
        self
    }

    #[inline]
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn set_rotation(&mut self, degrees: f64) {
        self.rotation = normalize_degrees(degrees);
    }

    pub fn add_rotation(&mut self, delta: f64) {
        self.set_rotation(self.rotation + delta);
    }

    #[inline]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Negative scales are clamped to zero.
    pub fn set_scale(&mut self, scale: f64) {
        self.scale = scale.max(0.0);
    }

    pub fn set_visual(&mut self, sprite: Sprite) {
        if self.visual.sprite != sprite {
            self.visual = Visual::new(sprite);
        }
    }

    pub fn place_at(&mut self, position: Vector2) {
        self.position = position;
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.position += Vector2::new(dx, dy);
    }

    /// Replace the velocity with `speed` units/s along `degrees`.
    pub fn set_velocity(&mut self, degrees: f64, speed: f64) {
        self.velocity = heading(degrees).scale(speed);
    }

    /// Push along `degrees`, then cap the resulting speed at `max_speed`.
    pub fn add_velocity(&mut self, degrees: f64, speed: f64, max_speed: f64) {
        let mut dir = heading(degrees);
        if dir.x.abs() < DIRECTION_EPSILON {
            dir.x = 0.0;
        }
        if dir.y.abs() < DIRECTION_EPSILON {
            dir.y = 0.0;
        }

        self.velocity += dir.scale(speed);
        if self.velocity.length() > max_speed {
            self.velocity = self.velocity.normalize().scale(max_speed);
        }
    }

    pub fn integrate(&mut self, dt: f64) {
        self.position += self.velocity * dt;
        self.visual.advance(dt);
    }

    /// Box enclosing the sprite after rotation and scaling, centered on the entity.
    pub fn bounding_box(&self) -> Rect {
        let size = self.visual.size().scale(self.scale);
        let rad = self.rotation.to_radians();
        let (sin, cos) = (rad.sin().abs(), rad.cos().abs());
        let width = size.x * cos + size.y * sin;
        let height = size.x * sin + size.y * cos;
        Rect::from_center(self.position, width, height)
    }

    pub fn width(&self) -> f64 {
        self.bounding_box().width
    }

    pub fn height(&self) -> f64 {
        self.bounding_box().height
    }

    pub fn transform(&self) -> Transform {
        Transform {
            position: self.position,
            rotation: self.rotation,
            scale: self.scale,
        }
    }
}

// ── Tags & small enums ────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Owner {
    Player,
    Boss,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// First walk-sheet frame for this facing.
    pub fn sheet_offset(&self) -> u8 {
        match self {
            Self::Up => 0,
            Self::Right => 2,
            Self::Left => 4,
            Self::Down => 6,
        }
    }

    /// Where the attack hitbox sits relative to the player.
    pub fn hitbox_offset(&self) -> Vector2 {
        match self {
            Self::Up => Vector2::new(20.0, -20.0),
            Self::Down => Vector2::new(-10.0, 25.0),
            Self::Left => Vector2::new(-20.0, 0.0),
            Self::Right => Vector2::new(20.0, 0.0),
        }
    }
}

/// Per-frame result the scene layer acts on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Ongoing,
    PlayerWon,
    PlayerLost,
    QuitRequested,
}

impl Outcome {
    pub fn is_terminal(&self) -> bool {
        *self != Outcome::Ongoing
    }
}

// ── Health ────────────────────────────────────────────────────────────────────

/// Colour band of a health bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HealthBand {
    /// Above three quarters.
    High,
    /// Above half.
    Medium,
    Low,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Health {
    current: u32,
    max: u32,
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    #[inline]
    pub fn current(&self) -> u32 {
        self.current
    }

    #[inline]
    pub fn max(&self) -> u32 {
        self.max
    }

    /// Saturating decrement; health never goes below zero.
    pub fn damage(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }

    pub fn is_depleted(&self) -> bool {
        self.current == 0
    }

    pub fn fraction(&self) -> f64 {
        if self.max == 0 {
            0.0
        } else {
            self.current as f64 / self.max as f64
        }
    }

    pub fn band(&self) -> HealthBand {
        let current = self.current as f64;
        let max = self.max as f64;
        if current > max - max * 0.25 {
            HealthBand::High
        } else if current > max - max * 0.5 {
            HealthBand::Medium
        } else {
            HealthBand::Low
        }
    }
}

// ── Master battle state ───────────────────────────────────────────────────────

/// Everything one battle needs.  Owned by whoever runs the loop and passed by
/// `&mut` into every system; nothing here is global.
#[derive(Clone, Debug)]
pub struct BattleState {
    pub arena: ArenaConfig,
    pub tunables: Tunables,
    pub player: Entity,
    pub boss: Entity,
    pub player_health: Health,
    pub boss_health: Health,
    pub facing: Direction,
    /// Sword reach.  `active` means "can still score a hit this swing".
    pub hitbox: Entity,
    pub projectiles: ProjectilePool,
    pub boss_machine: StateMachine<BossPhase>,
    pub boss_brain: BossBehavior,
    pub player_machine: StateMachine<PlayerPhase>,
    pub player_brain: PlayerBehavior,
    /// Runs while the boss shows its attack pose.
    pub boss_pose: Timer,
    /// Hurt flashes; idle when expired.
    pub player_pain: Timer,
    pub boss_pain: Timer,
    pub outcome: Outcome,
    pub frame: u64,
}
