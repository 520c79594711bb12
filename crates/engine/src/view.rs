use crate::*;
use parlor_core::ID;
use parlor_core::Player;
use parlor_core::Turns;
use parlor_core::Unique;

/// Relationship between a viewer and a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    One,
    Two,
    Observer,
}

impl Role {
    /// Resolves a viewer identity against the record's seats. Anyone not
    /// seated — including a valid caller in someone else's game — is an
    /// observer.
    pub fn of(game: &Game, viewer: Option<ID<Player>>) -> Self {
        match viewer.and_then(|v| game.seat_of(v)) {
            Some(Seat::One) => Self::One,
            Some(Seat::Two) => Self::Two,
            None => Self::Observer,
        }
    }
    /// True if this viewer owns the seat's private state.
    fn owns(&self, seat: Seat) -> bool {
        matches!((self, seat), (Self::One, Seat::One) | (Self::Two, Seat::Two))
    }
}

/// One seat's pending choice as seen by a viewer: the owner sees the
/// sign, everyone else sees only that something was submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    Empty,
    Submitted,
    Thrown(Choice),
}

impl Slot {
    fn conceal(choice: Option<Choice>, visible: bool) -> Self {
        match (choice, visible) {
            (None, _) => Self::Empty,
            (Some(c), true) => Self::Thrown(c),
            (Some(_), false) => Self::Submitted,
        }
    }
}

/// How much of a layout a viewer gets: nothing yet, an opaque marker, or
/// the ship coordinates themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutView {
    Unset,
    Submitted,
    Revealed,
}

/// A deployed ship as seen by a viewer. Unit counts, damage, and sunk
/// flags are public; coordinates stay with the owner until game end.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ShipView {
    pub class: Class,
    pub length: u8,
    pub hits: u8,
    pub sunk: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placement: Option<Placement>,
}

/// One player's side of a battleships record as seen by a viewer.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SideView {
    pub layout: LayoutView,
    pub ships: Vec<ShipView>,
    pub shots: Vec<Shot>,
}

impl SideView {
    fn conceal(fleet: &Fleet, visible: bool) -> Self {
        let layout = match (fleet.deployed(), visible) {
            (false, _) => LayoutView::Unset,
            (true, false) => LayoutView::Submitted,
            (true, true) => LayoutView::Revealed,
        };
        Self {
            layout,
            ships: fleet
                .ships()
                .iter()
                .map(|ship| ShipView {
                    class: ship.class(),
                    length: ship.class().length(),
                    hits: ship.hits(),
                    sunk: ship.sunk(),
                    placement: visible.then(|| ship.placement()),
                })
                .collect(),
            shots: fleet.shots().to_vec(),
        }
    }
}

/// Viewer-specific play state. Derived from the record, never stored.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(tag = "game", rename_all = "lowercase")]
pub enum StateView {
    TicTacToe {
        crosses: Vec<Cell>,
        noughts: Vec<Cell>,
    },
    RockPaperScissors {
        one: Slot,
        two: Slot,
        resolved: Vec<Resolved>,
        tallies: (Turns, Turns),
        limit: Turns,
    },
    Battleships {
        phase: Phase,
        one: SideView,
        two: SideView,
    },
}

/// The concealed projection of a record returned to callers.
///
/// Building a view never mutates the record. Player snapshots start as
/// placeholders; the lobby swaps in directory snapshots before the view
/// leaves the process.
#[derive(Debug, Clone, serde::Serialize)]
pub struct GameView {
    pub id: ID<Game>,
    pub kind: Kind,
    pub player_one: Player,
    pub player_two: Option<Player>,
    pub turn: Turns,
    pub finished: bool,
    pub winners: Vec<ID<Player>>,
    pub state: StateView,
}

impl GameView {
    /// Produces the redacted view of a record for one viewer.
    ///
    /// A seated viewer always sees their own private state in full;
    /// opponents and observers get markers and public damage only. A
    /// finished battleships game reveals both layouts to everyone.
    pub fn conceal(game: &Game, viewer: Option<ID<Player>>) -> Self {
        let role = Role::of(game, viewer);
        let state = match game.state() {
            State::TicTacToe(board) => StateView::TicTacToe {
                crosses: board.placements(Seat::One).to_vec(),
                noughts: board.placements(Seat::Two).to_vec(),
            },
            State::RockPaperScissors(rounds) => StateView::RockPaperScissors {
                one: Slot::conceal(rounds.current().choice(Seat::One), role.owns(Seat::One)),
                two: Slot::conceal(rounds.current().choice(Seat::Two), role.owns(Seat::Two)),
                resolved: rounds.resolved().to_vec(),
                tallies: (rounds.tally(Seat::One), rounds.tally(Seat::Two)),
                limit: rounds.limit(),
            },
            State::Battleships(boards) => StateView::Battleships {
                phase: boards.phase(),
                one: SideView::conceal(
                    boards.fleet(Seat::One),
                    game.finished() || role.owns(Seat::One),
                ),
                two: SideView::conceal(
                    boards.fleet(Seat::Two),
                    game.finished() || role.owns(Seat::Two),
                ),
            },
        };
        Self {
            id: game.id(),
            kind: game.kind(),
            player_one: Player::unknown(game.player_one()),
            player_two: game.player_two().map(Player::unknown),
            turn: game.turn(),
            finished: game.finished(),
            winners: game.winners().to_vec(),
            state,
        }
    }
    /// Attaches directory snapshots in place of the placeholders.
    pub fn with_players(mut self, one: Player, two: Option<Player>) -> Self {
        self.player_one = one;
        self.player_two = two;
        self
    }
}

/// Index projection: enough to render a game list, no board state.
#[derive(Debug, Clone, serde::Serialize)]
pub struct GameSummary {
    pub id: ID<Game>,
    pub kind: Kind,
    pub player_one: Player,
    pub player_two: Option<Player>,
    pub turn: Turns,
    pub finished: bool,
    pub winners: Vec<ID<Player>>,
}

impl GameSummary {
    pub fn of(game: &Game) -> Self {
        Self {
            id: game.id(),
            kind: game.kind(),
            player_one: Player::unknown(game.player_one()),
            player_two: game.player_two().map(Player::unknown),
            turn: game.turn(),
            finished: game.finished(),
            winners: game.winners().to_vec(),
        }
    }
    /// Attaches directory snapshots in place of the placeholders.
    pub fn with_players(mut self, one: Player, two: Option<Player>) -> Self {
        self.player_one = one;
        self.player_two = two;
        self
    }
}
