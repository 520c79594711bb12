use parlor_core::Arbitrary;
use parlor_core::Turns;

/// Which of the two seats a participant occupies.
///
/// Seat one always belongs to the host. For alternating games the seat to
/// move is derived from turn parity: even turns are seat one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Seat {
    One,
    Two,
}

impl Seat {
    /// The other seat.
    pub fn opponent(&self) -> Self {
        match self {
            Self::One => Self::Two,
            Self::Two => Self::One,
        }
    }
    /// Seat to move at the given turn counter.
    pub fn to_move(turn: Turns) -> Self {
        if turn % 2 == 0 { Self::One } else { Self::Two }
    }
    /// 1-indexed seat number for display.
    pub fn display(&self) -> usize {
        match self {
            Self::One => 1,
            Self::Two => 2,
        }
    }
}

impl Arbitrary for Seat {
    fn random() -> Self {
        if rand::random::<bool>() { Self::One } else { Self::Two }
    }
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "P{}", self.display())
    }
}
