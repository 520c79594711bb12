use parlor_engine::GameError;
use parlor_engine::GameView;
use parlor_store::StoreError;

/// A rejected operation: the typed reason plus, when the record exists,
/// its current concealed state for the caller.
///
/// Shipping the state with the error lets a client re-render immediately
/// instead of issuing a follow-up fetch after every rejection.
#[derive(Debug)]
pub struct Rejection {
    reason: GameError,
    game: Option<GameView>,
}

impl Rejection {
    pub fn new(reason: GameError, game: GameView) -> Self {
        Self {
            reason,
            game: Some(game),
        }
    }
    /// Rejection with no state to show (missing record, no identity).
    pub fn bare(reason: GameError) -> Self {
        Self {
            reason,
            game: None,
        }
    }
    pub fn reason(&self) -> &GameError {
        &self.reason
    }
    pub fn game(&self) -> Option<&GameView> {
        self.game.as_ref()
    }
}

impl From<GameError> for Rejection {
    fn from(reason: GameError) -> Self {
        Self::bare(reason)
    }
}

impl From<StoreError> for Rejection {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound => Self::bare(GameError::NotFound),
            StoreError::VersionConflict => Self::bare(GameError::Conflict("stale game state")),
        }
    }
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.reason, f)
    }
}

impl std::error::Error for Rejection {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.reason)
    }
}
