//! Arena dimensions and tunable gameplay constants.

use crate::error::ConfigError;
use crate::geometry::{Rect, Vector2};

/// Extra clearance kept between the player and the bottom wall.
pub const BOTTOM_MARGIN: f64 = 20.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArenaConfig {
    pub width: f64,
    pub height: f64,
    pub wall_thickness: f64,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self { width: 800.0, height: 608.0, wall_thickness: 32.0 }
    }
}

impl ArenaConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.wall_thickness < 0.0 {
            return Err(ConfigError::NegativeWall { wall: self.wall_thickness });
        }
        let inner_w = self.width - 2.0 * self.wall_thickness;
        let inner_h = self.height - 2.0 * self.wall_thickness - BOTTOM_MARGIN;
        if inner_w <= 0.0 || inner_h <= 0.0 {
            return Err(ConfigError::ArenaTooSmall {
                width: self.width,
                height: self.height,
                wall: self.wall_thickness,
            });
        }
        Ok(())
    }

    /// The whole screen; projectiles leaving it are recycled.
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    pub fn center(&self) -> Vector2 {
        Vector2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Keep a point inside the walls (with the extra bottom margin).
    pub fn clamp_to_interior(&self, p: Vector2) -> Vector2 {
        let wall = self.wall_thickness;
        Vector2::new(
            p.x.max(wall).min(self.width - wall),
            p.y.max(wall).min(self.height - (wall + BOTTOM_MARGIN)),
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tunables {
    /// Player walk speed, units/s.
    pub player_speed: f64,
    /// Boss spin during the laser sweep, degrees/s.
    pub boss_rotation_speed: f64,
    pub player_max_health: u32,
    pub boss_max_health: u32,
    pub projectile_capacity: usize,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            player_speed: 200.0,
            boss_rotation_speed: 180.0,
            player_max_health: 100,
            boss_max_health: 300,
            projectile_capacity: 100,
        }
    }
}

impl Tunables {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.player_speed <= 0.0 {
            return Err(ConfigError::NonPositiveSpeed { name: "player_speed", value: self.player_speed });
        }
        if self.boss_rotation_speed <= 0.0 {
            return Err(ConfigError::NonPositiveSpeed {
                name: "boss_rotation_speed",
                value: self.boss_rotation_speed,
            });
        }
        if self.player_max_health == 0 {
            return Err(ConfigError::ZeroHealth { who: "player" });
        }
        if self.boss_max_health == 0 {
            return Err(ConfigError::ZeroHealth { who: "boss" });
        }
        if self.projectile_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(())
    }
}
