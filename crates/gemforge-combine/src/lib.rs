//! GemForge Combine - Gem fusion and ranking
//!
//! Builds fusion trees of gems inside a [`GemPool`], blends their attributes
//! tier by tier, ranks them by power and growth, and renders or parses
//! canonical recipe strings.

pub mod blend;
pub mod gem;
pub mod ledger;
pub mod pool;
pub mod ranking;
pub mod recipe;
pub mod summary;

pub use blend::{BlendCoefficients, BlendTier, BlendWeights};
pub use gem::{Attributes, Gem, GemKind};
pub use ledger::{Usage, UsageLedger};
pub use pool::GemPool;
pub use ranking::{growth, growth_exponent, power, LEECH_SPEC_EXPONENT, SPEC_EXPONENT};
pub use recipe::{MAX_RECIPE_DEPTH, MAX_RECIPE_GRADE};
pub use summary::GemSummary;

pub use gemforge_core::{GemColor, GemError, GemId, LeafCode, SlotIndex, LEAF_CODES};
