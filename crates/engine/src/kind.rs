use crate::*;
use parlor_core::Turns;

/// Which rule set a game record follows.
///
/// The registry is a closed enum: adding a game means adding a variant
/// here plus its play-state module, resolver arm, and concealment arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    TicTacToe,
    RockPaperScissors,
    Battleships,
}

impl Kind {
    /// Default play state for a freshly created game of this kind.
    pub fn setup(&self) -> State {
        self.setup_with(None)
    }
    /// Play state with a round limit override. Rock-paper-scissors is the
    /// only kind with a knob; the override is ignored elsewhere.
    pub fn setup_with(&self, rounds: Option<Turns>) -> State {
        match self {
            Self::TicTacToe => State::TicTacToe(TicTacToe::default()),
            Self::RockPaperScissors => State::RockPaperScissors(
                rounds.map(RockPaperScissors::new).unwrap_or_default(),
            ),
            Self::Battleships => State::Battleships(Battleships::default()),
        }
    }
    pub fn label(&self) -> &'static str {
        match self {
            Self::TicTacToe => "tictactoe",
            Self::RockPaperScissors => "rockpaperscissors",
            Self::Battleships => "battleships",
        }
    }
}

impl TryFrom<&str> for Kind {
    type Error = &'static str;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "tictactoe" => Ok(Self::TicTacToe),
            "rockpaperscissors" => Ok(Self::RockPaperScissors),
            "battleships" => Ok(Self::Battleships),
            _ => Err("unknown game type"),
        }
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Per-kind play state behind a tagged variant.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(tag = "game", rename_all = "lowercase")]
pub enum State {
    TicTacToe(TicTacToe),
    RockPaperScissors(RockPaperScissors),
    Battleships(Battleships),
}

impl State {
    pub fn kind(&self) -> Kind {
        match self {
            Self::TicTacToe(_) => Kind::TicTacToe,
            Self::RockPaperScissors(_) => Kind::RockPaperScissors,
            Self::Battleships(_) => Kind::Battleships,
        }
    }
}
