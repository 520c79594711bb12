/// Typed rule violations surfaced to the transport layer.
///
/// Every rejected operation is an expected, recoverable condition returned
/// as a value. The transport layer owns the mapping to status codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Referenced game id does not exist.
    NotFound,
    /// Caller lacks the role the operation requires.
    Forbidden(&'static str),
    /// Operation is valid in general but not in the game's current state.
    Conflict(&'static str),
    /// Move payload fails game-specific structural validation.
    InvalidMove(String),
    /// No caller identity could be resolved.
    Unauthenticated,
}

impl std::fmt::Display for GameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => write!(f, "game not found"),
            Self::Forbidden(s) => write!(f, "forbidden: {}", s),
            Self::Conflict(s) => write!(f, "conflict: {}", s),
            Self::InvalidMove(s) => write!(f, "invalid move: {}", s),
            Self::Unauthenticated => write!(f, "no caller identity"),
        }
    }
}

impl std::error::Error for GameError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_reason() {
        let e = GameError::Conflict("game already full");
        assert_eq!(e.to_string(), "conflict: game already full");
        let e = GameError::InvalidMove("ship overlaps another".to_string());
        assert_eq!(e.to_string(), "invalid move: ship overlaps another");
    }
}
