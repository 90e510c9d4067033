//! Gem data model
//!
//! A gem is either a base gem built from a letter code or the fusion of two
//! earlier gems. All attributes are fixed when the gem is built; usage and
//! placement live in the pool's [`UsageLedger`](crate::UsageLedger).

use serde::{Deserialize, Serialize};

use gemforge_core::{GemColor, GemId, LeafCode};

use crate::blend::BlendTier;
use crate::ranking;

/// The four blended combat attributes
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Attributes {
    /// Max damage, as a fraction of a base yellow gem
    pub damage: f64,
    pub blood: f64,
    pub critical_multiplier: f64,
    pub leech: f64,
}

/// How a gem was made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GemKind {
    Leaf(LeafCode),
    /// `component1` has the higher cost, or the lower color value on a cost tie.
    Fusion { component1: GemId, component2: GemId },
}

/// An immutable node of a fusion tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gem {
    id: GemId,
    kind: GemKind,
    color: GemColor,
    cost: u64,
    grade: u32,
    attrs: Attributes,
    is_spec: bool,
    /// Base gem at the root of a pure self-fusion chain
    pure_leaf: Option<LeafCode>,
    power: f64,
    growth: Option<f64>,
}

impl Gem {
    /// Build a base gem.
    pub fn leaf(id: GemId, code: LeafCode) -> Self {
        let color = code.color();
        let cost = code.cost();
        let indicator = |flag: GemColor| if color.contains(flag) { 1.0 } else { 0.0 };
        let attrs = Attributes {
            damage: code.base_damage(),
            blood: indicator(GemColor::BLACK),
            critical_multiplier: indicator(GemColor::YELLOW),
            leech: indicator(GemColor::ORANGE),
        };

        Self {
            id,
            kind: GemKind::Leaf(code),
            color,
            cost,
            grade: (cost - 1) as u32,
            attrs,
            is_spec: false,
            pure_leaf: Some(code),
            power: ranking::power(color, &attrs),
            growth: None,
        }
    }

    /// Fuse two gems. Argument order does not matter: the components are
    /// put in canonical order before anything is computed.
    pub fn fuse(id: GemId, gem1: &Gem, gem2: &Gem) -> Self {
        let (c1, c2) = canonical_order(gem1, gem2);

        let color = c1.color | c2.color;
        let is_spec = (c1.is_spec || c1.color != color) || (c2.is_spec || c2.color != color);

        let tier = BlendTier::for_grades(c1.grade, c2.grade);
        let k = tier.coefficients();
        let mut attrs = Attributes {
            damage: k.damage.apply(c1.attrs.damage, c2.attrs.damage),
            blood: k.blood.apply(c1.attrs.blood, c2.attrs.blood),
            critical_multiplier: k
                .critical_multiplier
                .apply(c1.attrs.critical_multiplier, c2.attrs.critical_multiplier),
            leech: k.leech.apply(c1.attrs.leech, c2.attrs.leech),
        };
        // damage never drops below either input
        attrs.damage = attrs.damage.max(c1.attrs.damage.max(c2.attrs.damage));

        let cost = c1.cost + c2.cost;
        let power = ranking::power(color, &attrs);
        let growth = ranking::growth(power, cost, color, is_spec);

        let pure_leaf = if c1.id == c2.id { c1.pure_leaf } else { None };

        Self {
            id,
            kind: GemKind::Fusion {
                component1: c1.id,
                component2: c2.id,
            },
            color,
            cost,
            grade: tier.result_grade(c1.grade, c2.grade),
            attrs,
            is_spec,
            pure_leaf,
            power,
            growth: Some(growth),
        }
    }

    pub fn id(&self) -> GemId {
        self.id
    }

    pub fn kind(&self) -> GemKind {
        self.kind
    }

    /// Component ids in canonical order, or `None` for a base gem
    pub fn components(&self) -> Option<(GemId, GemId)> {
        match self.kind {
            GemKind::Leaf(_) => None,
            GemKind::Fusion {
                component1,
                component2,
            } => Some((component1, component2)),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, GemKind::Leaf(_))
    }

    pub fn color(&self) -> GemColor {
        self.color
    }

    pub fn cost(&self) -> u64 {
        self.cost
    }

    pub fn grade(&self) -> u32 {
        self.grade
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attrs
    }

    pub fn damage(&self) -> f64 {
        self.attrs.damage
    }

    pub fn blood(&self) -> f64 {
        self.attrs.blood
    }

    pub fn critical_multiplier(&self) -> f64 {
        self.attrs.critical_multiplier
    }

    pub fn leech(&self) -> f64 {
        self.attrs.leech
    }

    /// Whether this fusion blended differing colors somewhere in its history
    pub fn is_spec(&self) -> bool {
        self.is_spec
    }

    /// "Spec" or "Combine", as shown in recipe listings
    pub fn spec_word(&self) -> &'static str {
        if self.is_spec {
            "Spec"
        } else {
            "Combine"
        }
    }

    /// Whether this gem is a fusion of one gem with itself
    pub fn is_upgrade(&self) -> bool {
        match self.kind {
            GemKind::Leaf(_) => false,
            GemKind::Fusion {
                component1,
                component2,
            } => component1 == component2,
        }
    }

    /// Whether this gem is a chain of self-fusions rooted at a single base gem.
    /// Base gems are trivially pure.
    pub fn is_pure_upgrade(&self) -> bool {
        self.pure_leaf.is_some()
    }

    /// Compact `<grade+1><code>` form for pure chains; the bare code for base gems
    pub fn pure_recipe(&self) -> Option<String> {
        let leaf = self.pure_leaf?;
        Some(match self.kind {
            GemKind::Leaf(code) => code.as_char().to_string(),
            GemKind::Fusion { .. } => format!("{}{}", self.grade + 1, leaf.as_char()),
        })
    }

    pub fn power(&self) -> f64 {
        self.power
    }

    /// Ranking value of a fused gem. Base gems have no growth.
    pub fn growth(&self) -> Option<f64> {
        self.growth
    }

    /// Cost exponent of the spec-gem growth formula, `None` when growth is logarithmic
    pub fn growth_exponent(&self) -> Option<f64> {
        (self.is_spec && !self.is_leaf()).then(|| ranking::growth_exponent(self.color))
    }
}

/// Higher cost first; on a cost tie the lower color value goes first.
/// Distinct gems that tie on both go in id order.
fn canonical_order<'a>(a: &'a Gem, b: &'a Gem) -> (&'a Gem, &'a Gem) {
    let swap = b.cost > a.cost
        || (b.cost == a.cost && (b.color < a.color || (b.color == a.color && b.id < a.id)));
    if swap {
        (b, a)
    } else {
        (a, b)
    }
}
