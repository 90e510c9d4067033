//! Gem color model
//!
//! Four primitive colors combine as bit flags: Orange, Yellow, Black, Red.
//! Generic is the empty set. HitFarm, Mana and Kill are fixed unions that
//! only appear as base gems.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use serde::{Deserialize, Serialize};

use crate::error::GemError;

/// Leaf codes in their published enumeration order.
pub const LEAF_CODES: &str = "oykmgbrh";

/// A set of color flags. Ordering compares the raw flag value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct GemColor(u8);

impl GemColor {
    pub const GENERIC: GemColor = GemColor(0);
    pub const ORANGE: GemColor = GemColor(1);
    pub const YELLOW: GemColor = GemColor(1 << 1);
    pub const BLACK: GemColor = GemColor(1 << 2);
    pub const RED: GemColor = GemColor(1 << 3);
    pub const HIT_FARM: GemColor = GemColor(Self::BLACK.0 | Self::RED.0);
    pub const MANA: GemColor = GemColor(Self::ORANGE.0 | Self::BLACK.0 | Self::RED.0);
    pub const KILL: GemColor = GemColor(Self::YELLOW.0 | Self::BLACK.0 | Self::RED.0);

    /// Raw flag value
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Whether every flag of `other` is also set here. Generic is contained in every color.
    pub const fn contains(self, other: GemColor) -> bool {
        self.0 & other.0 == other.0
    }

    /// Union of two colors
    pub const fn union(self, other: GemColor) -> GemColor {
        GemColor(self.0 | other.0)
    }

    /// Display name; unnamed flag combinations are joined with `|`
    pub fn name(self) -> String {
        match self {
            Self::GENERIC => "Generic".to_string(),
            Self::HIT_FARM => "HitFarm".to_string(),
            Self::MANA => "Mana".to_string(),
            Self::KILL => "Kill".to_string(),
            _ => {
                let parts: Vec<&str> = [
                    (Self::ORANGE, "Orange"),
                    (Self::YELLOW, "Yellow"),
                    (Self::BLACK, "Black"),
                    (Self::RED, "Red"),
                ]
                .iter()
                .filter(|(flag, _)| self.contains(*flag))
                .map(|(_, name)| *name)
                .collect();
                parts.join("|")
            }
        }
    }
}

impl BitOr for GemColor {
    type Output = GemColor;

    fn bitor(self, rhs: GemColor) -> GemColor {
        self.union(rhs)
    }
}

impl BitOrAssign for GemColor {
    fn bitor_assign(&mut self, rhs: GemColor) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for GemColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// The eight base gem kinds, one per letter code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeafCode {
    Orange,
    Yellow,
    Kill,
    Mana,
    Generic,
    Black,
    Red,
    HitFarm,
}

impl LeafCode {
    /// Parse a single lowercase letter code
    pub fn from_char(code: char) -> Result<Self, GemError> {
        match code {
            'b' => Ok(Self::Black),
            'g' => Ok(Self::Generic),
            'h' => Ok(Self::HitFarm),
            'k' => Ok(Self::Kill),
            'm' => Ok(Self::Mana),
            'o' => Ok(Self::Orange),
            'r' => Ok(Self::Red),
            'y' => Ok(Self::Yellow),
            other => Err(GemError::InvalidCode(other)),
        }
    }

    /// Letter code
    pub fn as_char(self) -> char {
        match self {
            Self::Black => 'b',
            Self::Generic => 'g',
            Self::HitFarm => 'h',
            Self::Kill => 'k',
            Self::Mana => 'm',
            Self::Orange => 'o',
            Self::Red => 'r',
            Self::Yellow => 'y',
        }
    }

    pub fn color(self) -> GemColor {
        match self {
            Self::Black => GemColor::BLACK,
            Self::Generic => GemColor::GENERIC,
            Self::HitFarm => GemColor::HIT_FARM,
            Self::Kill => GemColor::KILL,
            Self::Mana => GemColor::MANA,
            Self::Orange => GemColor::ORANGE,
            Self::Red => GemColor::RED,
            Self::Yellow => GemColor::YELLOW,
        }
    }

    /// Damage as a fraction of a yellow base gem's damage
    pub fn base_damage(self) -> f64 {
        match self {
            Self::Black => 1.18181818181818,
            Self::Generic => 0.0,
            Self::HitFarm => 0.0,
            Self::Kill => 1.0,
            Self::Mana => 0.0,
            Self::Orange => 0.7272727272727272,
            Self::Red => 0.909090909090909,
            Self::Yellow => 1.0,
        }
    }

    /// Resource cost of the base gem (hit farm gems come pre-combined)
    pub fn cost(self) -> u64 {
        match self {
            Self::HitFarm => 2,
            _ => 1,
        }
    }

    /// All leaf codes in `LEAF_CODES` order
    pub fn all() -> &'static [LeafCode] {
        &[
            Self::Orange,
            Self::Yellow,
            Self::Kill,
            Self::Mana,
            Self::Generic,
            Self::Black,
            Self::Red,
            Self::HitFarm,
        ]
    }
}

impl TryFrom<char> for LeafCode {
    type Error = GemError;

    fn try_from(code: char) -> Result<Self, Self::Error> {
        Self::from_char(code)
    }
}

impl fmt::Display for LeafCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}
