//! Results returned by every engine's apply operation.

use crate::error::Error;

/// Why an action was refused, together with the untouched input state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    /// The state string exactly as the caller supplied it.
    pub state: String,
    /// What went wrong.
    pub error: Error,
}

/// The result of applying one action to a serialized state.
///
/// `T` is the game's transition summary carrying the new state string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// The action was legal and produced a new state.
    Applied(T),
    /// The action was refused; nothing changed.
    Rejected(Rejection),
}

impl<T> Outcome<T> {
    /// Builds a rejection that echoes `state` back unchanged.
    pub fn rejected(state: &str, error: impl Into<Error>) -> Self {
        Self::Rejected(Rejection {
            state: state.to_owned(),
            error: error.into(),
        })
    }

    /// Returns whether the action was applied.
    #[must_use]
    pub const fn is_legal(&self) -> bool {
        matches!(self, Self::Applied(_))
    }

    /// Returns the applied transition, if any.
    #[must_use]
    pub const fn applied(&self) -> Option<&T> {
        match self {
            Self::Applied(turn) => Some(turn),
            Self::Rejected(_) => None,
        }
    }

    /// Returns the rejection, if any.
    #[must_use]
    pub const fn rejection(&self) -> Option<&Rejection> {
        match self {
            Self::Applied(_) => None,
            Self::Rejected(rejection) => Some(rejection),
        }
    }

    /// Converts into a `Result`, useful with `?` in callers.
    ///
    /// # Errors
    ///
    /// Returns the rejection when the action was refused.
    pub fn into_result(self) -> Result<T, Rejection> {
        match self {
            Self::Applied(turn) => Ok(turn),
            Self::Rejected(rejection) => Err(rejection),
        }
    }
}
