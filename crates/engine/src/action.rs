use crate::*;

/// A proposed move, one payload shape per rule set.
///
/// Actions arrive from the transport layer already deserialized; nothing
/// here is persisted on its own — accepted moves fold into the record's
/// play state.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", content = "move", rename_all = "snake_case")]
pub enum Action {
    /// Tic-tac-toe: claim one empty cell.
    Place(Cell),
    /// Rock-paper-scissors: submit this round's hidden hand sign.
    Throw(Choice),
    /// Battleships setup: submit a full private layout.
    Deploy(Vec<Placement>),
    /// Battleships combat: shoot a square on the opposing grid.
    Fire(Square),
}

impl Action {
    /// The rule set this payload belongs to.
    pub fn kind(&self) -> Kind {
        match self {
            Self::Place(_) => Kind::TicTacToe,
            Self::Throw(_) => Kind::RockPaperScissors,
            Self::Deploy(_) | Self::Fire(_) => Kind::Battleships,
        }
    }
    pub fn label(&self) -> &'static str {
        match self {
            Self::Place(_) => "place",
            Self::Throw(_) => "throw",
            Self::Deploy(_) => "deploy",
            Self::Fire(_) => "fire",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Place(cell) => write!(f, "place {}", cell),
            Self::Throw(_) => write!(f, "throw"), // never echo a hidden choice
            Self::Deploy(_) => write!(f, "deploy"),
            Self::Fire(square) => write!(f, "fire {}", square),
        }
    }
}
