//! GemForge Core - Shared types for the gem combiner
//!
//! This crate provides the foundational types used by every other crate:
//! - Color flags and the base gem letter alphabet
//! - Gem identity and slot placement handles
//! - The common error type

pub mod color;
pub mod error;
pub mod types;

pub use color::{GemColor, LeafCode, LEAF_CODES};
pub use error::GemError;
pub use types::{GemId, SlotIndex};
