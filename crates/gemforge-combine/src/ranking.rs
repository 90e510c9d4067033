//! Power and growth ranking metric
//!
//! Power is the combat output of a gem. Growth normalizes power by cost so
//! recipes of different sizes can be compared.

use gemforge_core::GemColor;

use crate::gem::Attributes;

/// Cost elasticity for spec gems that carry orange (leech)
pub const LEECH_SPEC_EXPONENT: f64 = 0.627216;
/// Cost elasticity for every other spec gem
pub const SPEC_EXPONENT: f64 = 1.414061;

/// Combat output for a gem of the given color.
///
/// Pure red gems have no usable power. Blood counts twice when yellow and
/// black are both present; orange only matters when yellow is absent.
pub fn power(color: GemColor, attrs: &Attributes) -> f64 {
    if color == GemColor::RED {
        return 0.0;
    }

    let mut power = 1.0;
    if color.contains(GemColor::BLACK) {
        power *= attrs.blood;
    }

    if color.contains(GemColor::YELLOW) {
        power *= attrs.damage * attrs.critical_multiplier;
        if color.contains(GemColor::BLACK) {
            power *= attrs.blood;
        }
    } else if color.contains(GemColor::ORANGE) {
        power *= attrs.leech;
    }

    power
}

/// Cost exponent of the spec-gem growth formula
pub fn growth_exponent(color: GemColor) -> f64 {
    if color.contains(GemColor::ORANGE) {
        LEECH_SPEC_EXPONENT
    } else {
        SPEC_EXPONENT
    }
}

/// Growth of a fused gem: `power / cost^e` for spec gems, `log_cost(power)` otherwise
pub fn growth(power: f64, cost: u64, color: GemColor, is_spec: bool) -> f64 {
    let cost = cost as f64;
    if is_spec {
        power / cost.powf(growth_exponent(color))
    } else {
        power.log(cost)
    }
}
