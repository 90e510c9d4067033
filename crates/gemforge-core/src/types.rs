//! Identity and placement types shared by every gem consumer

use std::fmt;

use serde::{Deserialize, Serialize};

/// Handle to a gem stored in a pool. Equal ids mean the same gem instance.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GemId(pub(crate) u32);

impl GemId {
    /// Create an id from a raw pool index (mainly for testing).
    pub fn from_raw(index: u32) -> Self {
        Self(index)
    }

    /// The pool index of this gem.
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for GemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Gem#{}", self.0)
    }
}

impl fmt::Display for GemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Placement assigned by the slot planner. "Not slotted" is `None` wherever a slot is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotIndex(pub u32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_formatting() {
        let id = GemId::from_raw(7);
        assert_eq!(id.index(), 7);
        assert_eq!(format!("{id:?}"), "Gem#7");
        assert_eq!(id.to_string(), "#7");
    }
}
