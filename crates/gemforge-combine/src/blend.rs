//! Attribute blending tiers
//!
//! Each fusion blends the four attributes of its components with a pair of
//! (high, low) weights. The weights depend only on how far apart the two
//! component grades are.

use serde::{Deserialize, Serialize};

/// Weights applied to the larger and smaller input value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlendWeights {
    pub high: f64,
    pub low: f64,
}

impl BlendWeights {
    const fn new(high: f64, low: f64) -> Self {
        Self { high, low }
    }

    /// `high * max(v1, v2) + low * min(v1, v2)`
    pub fn apply(self, value1: f64, value2: f64) -> f64 {
        if value1 > value2 {
            self.high * value1 + self.low * value2
        } else {
            self.high * value2 + self.low * value1
        }
    }
}

/// Per-attribute weights for one tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlendCoefficients {
    pub damage: BlendWeights,
    pub blood: BlendWeights,
    pub critical_multiplier: BlendWeights,
    pub leech: BlendWeights,
}

/// Grade distance between the two components of a fusion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlendTier {
    /// Same grade: the result goes up one grade
    Even,
    /// Grades one apart
    Adjacent,
    /// Grades two or more apart
    Distant,
}

const EVEN: BlendCoefficients = BlendCoefficients {
    damage: BlendWeights::new(0.87, 0.71),
    blood: BlendWeights::new(0.78, 0.31),
    critical_multiplier: BlendWeights::new(0.88, 0.5),
    leech: BlendWeights::new(0.88, 0.5),
};

const ADJACENT: BlendCoefficients = BlendCoefficients {
    damage: BlendWeights::new(0.86, 0.7),
    blood: BlendWeights::new(0.79, 0.29),
    critical_multiplier: BlendWeights::new(0.88, 0.44),
    leech: BlendWeights::new(0.89, 0.44),
};

const DISTANT: BlendCoefficients = BlendCoefficients {
    damage: BlendWeights::new(0.85, 0.69),
    blood: BlendWeights::new(0.8, 0.27),
    critical_multiplier: BlendWeights::new(0.88, 0.44),
    leech: BlendWeights::new(0.9, 0.38),
};

impl BlendTier {
    /// Tier for a pair of component grades
    pub fn for_grades(grade1: u32, grade2: u32) -> Self {
        match grade1.abs_diff(grade2) {
            0 => Self::Even,
            1 => Self::Adjacent,
            _ => Self::Distant,
        }
    }

    pub fn coefficients(self) -> &'static BlendCoefficients {
        match self {
            Self::Even => &EVEN,
            Self::Adjacent => &ADJACENT,
            Self::Distant => &DISTANT,
        }
    }

    /// Grade of the fused gem
    pub fn result_grade(self, grade1: u32, grade2: u32) -> u32 {
        let top = grade1.max(grade2);
        match self {
            Self::Even => top + 1,
            Self::Adjacent | Self::Distant => top,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_selection() {
        assert_eq!(BlendTier::for_grades(3, 3), BlendTier::Even);
        assert_eq!(BlendTier::for_grades(2, 3), BlendTier::Adjacent);
        assert_eq!(BlendTier::for_grades(3, 2), BlendTier::Adjacent);
        assert_eq!(BlendTier::for_grades(0, 2), BlendTier::Distant);
        assert_eq!(BlendTier::for_grades(9, 1), BlendTier::Distant);
    }

    #[test]
    fn grade_only_rises_on_even_tier() {
        assert_eq!(BlendTier::Even.result_grade(2, 2), 3);
        assert_eq!(BlendTier::Adjacent.result_grade(1, 2), 2);
        assert_eq!(BlendTier::Distant.result_grade(5, 0), 5);
    }

    #[test]
    fn weights_favor_the_larger_value() {
        let w = BlendWeights::new(0.87, 0.71);
        assert_eq!(w.apply(2.0, 1.0), 0.87 * 2.0 + 0.71 * 1.0);
        assert_eq!(w.apply(1.0, 2.0), 0.87 * 2.0 + 0.71 * 1.0);
        assert_eq!(w.apply(0.0, 0.0), 0.0);
    }

    #[test]
    fn tier_table_values() {
        let even = BlendTier::Even.coefficients();
        assert_eq!(even.blood, BlendWeights::new(0.78, 0.31));
        let adjacent = BlendTier::Adjacent.coefficients();
        assert_eq!(adjacent.leech, BlendWeights::new(0.89, 0.44));
        let distant = BlendTier::Distant.coefficients();
        assert_eq!(distant.damage, BlendWeights::new(0.85, 0.69));
        assert_eq!(distant.critical_multiplier, BlendWeights::new(0.88, 0.44));
    }
}
