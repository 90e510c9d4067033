use thiserror::Error;

use crate::types::GemId;

/// Errors raised while building gems or reading recipes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GemError {
    #[error("invalid letter value for gem: '{0}'")]
    InvalidCode(char),

    #[error("gem {0} does not exist in this pool")]
    MissingGem(GemId),

    #[error("malformed recipe at position {position}: {reason}")]
    MalformedRecipe { position: usize, reason: String },
}
