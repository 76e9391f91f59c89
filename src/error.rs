//! Errors raised while validating battle configuration.

use std::error::Error;
use std::fmt;

#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Walls leave no room to stand in.
    ArenaTooSmall { width: f64, height: f64, wall: f64 },
    NegativeWall { wall: f64 },
    ZeroCapacity,
    ZeroHealth { who: &'static str },
    NonPositiveSpeed { name: &'static str, value: f64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ArenaTooSmall { width, height, wall } => write!(
                f,
                "arena {width}x{height} has no interior with wall thickness {wall}"
            ),
            Self::NegativeWall { wall } => write!(f, "wall thickness must be >= 0, got {wall}"),
            Self::ZeroCapacity => f.write_str("projectile pool capacity must be at least 1"),
            Self::ZeroHealth { who } => write!(f, "{who} max health must be at least 1"),
            Self::NonPositiveSpeed { name, value } => {
                write!(f, "{name} must be > 0, got {value}")
            }
        }
    }
}

impl Error for ConfigError {}
