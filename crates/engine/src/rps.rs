use crate::*;
use parlor_core::Arbitrary;
use parlor_core::Turns;

/// Rounds played before the tally decides the game, unless one side
/// builds an uncatchable lead first.
pub const DEFAULT_ROUNDS: Turns = 3;

/// A hand sign thrown in one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Choice {
    Rock,
    Paper,
    Scissors,
}

impl Choice {
    /// The standard cyclic rule: rock beats scissors, scissors beats
    /// paper, paper beats rock.
    pub fn beats(&self, other: Choice) -> bool {
        matches!(
            (self, other),
            (Self::Rock, Self::Scissors) | (Self::Scissors, Self::Paper) | (Self::Paper, Self::Rock)
        )
    }
}

impl Arbitrary for Choice {
    fn random() -> Self {
        match rand::random_range(0..3) {
            0 => Self::Rock,
            1 => Self::Paper,
            _ => Self::Scissors,
        }
    }
}

impl TryFrom<&str> for Choice {
    type Error = &'static str;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.to_uppercase().as_str() {
            "R" | "ROCK" => Ok(Self::Rock),
            "P" | "PAPER" => Ok(Self::Paper),
            "S" | "SCISSORS" => Ok(Self::Scissors),
            _ => Err("invalid hand sign"),
        }
    }
}

impl std::fmt::Display for Choice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rock => write!(f, "R"),
            Self::Paper => write!(f, "P"),
            Self::Scissors => write!(f, "S"),
        }
    }
}

/// Pending choices for the round in play. Slots stay hidden from the
/// opposing seat until both are filled.
#[derive(Debug, Clone, Copy, Default, serde::Serialize, serde::Deserialize)]
pub struct Round {
    one: Option<Choice>,
    two: Option<Choice>,
}

impl Round {
    pub fn choice(&self, seat: Seat) -> Option<Choice> {
        match seat {
            Seat::One => self.one,
            Seat::Two => self.two,
        }
    }
}

/// A resolved round: both choices plus the round winner, if any.
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct Resolved {
    one: Choice,
    two: Choice,
    winner: Option<Seat>,
}

impl Resolved {
    fn new(one: Choice, two: Choice) -> Self {
        let winner = if one.beats(two) {
            Some(Seat::One)
        } else if two.beats(one) {
            Some(Seat::Two)
        } else {
            None
        };
        Self { one, two, winner }
    }
    pub fn choice(&self, seat: Seat) -> Choice {
        match seat {
            Seat::One => self.one,
            Seat::Two => self.two,
        }
    }
    pub fn winner(&self) -> Option<Seat> {
        self.winner
    }
}

/// Play state for a rock-paper-scissors record.
///
/// There is no turn order: each seat submits once per round and the round
/// resolves on the second submission. The turn counter on the record
/// counts resolved rounds.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RockPaperScissors {
    current: Round,
    resolved: Vec<Resolved>,
    limit: Turns,
}

impl Default for RockPaperScissors {
    fn default() -> Self {
        Self::new(DEFAULT_ROUNDS)
    }
}

impl RockPaperScissors {
    pub fn new(limit: Turns) -> Self {
        Self {
            current: Round::default(),
            resolved: Vec::new(),
            limit: limit.max(1),
        }
    }
    pub fn current(&self) -> Round {
        self.current
    }
    pub fn resolved(&self) -> &[Resolved] {
        &self.resolved
    }
    pub fn limit(&self) -> Turns {
        self.limit
    }
    /// Round wins for a seat so far.
    pub fn tally(&self, seat: Seat) -> Turns {
        self.resolved.iter().filter(|r| r.winner() == Some(seat)).count() as Turns
    }
    /// Validates and folds one choice into the current round, resolving
    /// the round when it completes.
    pub(crate) fn submit(&mut self, seat: Seat, choice: Choice) -> Result<Progress, GameError> {
        if self.current.choice(seat).is_some() {
            return Err(GameError::Conflict("choice already submitted this round"));
        }
        match seat {
            Seat::One => self.current.one = Some(choice),
            Seat::Two => self.current.two = Some(choice),
        }
        match (self.current.one, self.current.two) {
            (Some(one), Some(two)) => {
                self.resolved.push(Resolved::new(one, two));
                self.current = Round::default();
                Ok(self.standing())
            }
            _ => Ok(Progress::Pending),
        }
    }
    /// Terminal check after a resolved round: the game ends when one
    /// tally is out of reach or the round limit is hit.
    fn standing(&self) -> Progress {
        let one = self.tally(Seat::One);
        let two = self.tally(Seat::Two);
        let played = self.resolved.len() as Turns;
        let remaining = self.limit.saturating_sub(played);
        if one > two + remaining {
            Progress::Won(Seat::One)
        } else if two > one + remaining {
            Progress::Won(Seat::Two)
        } else if played >= self.limit {
            match one.cmp(&two) {
                std::cmp::Ordering::Greater => Progress::Won(Seat::One),
                std::cmp::Ordering::Less => Progress::Won(Seat::Two),
                std::cmp::Ordering::Equal => Progress::Drawn,
            }
        } else {
            Progress::Advanced
        }
    }
}
