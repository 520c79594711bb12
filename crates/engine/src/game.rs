use crate::*;
use parlor_core::ID;
use parlor_core::Player;
use parlor_core::Turns;
use parlor_core::Unique;

/// What an accepted move did to the flow of the game.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Progress {
    /// Folded in without advancing the turn (one side of a simultaneous
    /// submission).
    Pending,
    /// Turn advances, game continues.
    Advanced,
    /// Terminal: the acting seat won.
    Won(Seat),
    /// Terminal: both seats share the result.
    Drawn,
}

/// The persisted record of one game instance.
///
/// Invariants maintained by the methods below:
/// - `finished` is set exactly when the game reached a terminal state
///   (win, draw, or forfeit), and `winners` is non-empty only then.
/// - An open game (no second seat) has a zero turn counter and accepts
///   no moves.
/// - Rejected operations leave the record byte-for-byte unchanged.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Game {
    id: ID<Game>,
    player_one: ID<Player>,
    player_two: Option<ID<Player>>,
    turn: Turns,
    finished: bool,
    winners: Vec<ID<Player>>,
    version: u64,
    state: State,
}

impl Unique for Game {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

impl Game {
    /// Creates an open game hosted by the caller, awaiting a second seat.
    pub fn open(host: ID<Player>, kind: Kind) -> Self {
        Self::open_with(host, kind, None)
    }
    /// As [`open`](Self::open), with a round limit override for kinds
    /// that have one.
    pub fn open_with(host: ID<Player>, kind: Kind, rounds: Option<Turns>) -> Self {
        Self {
            id: ID::default(),
            player_one: host,
            player_two: None,
            turn: 0,
            finished: false,
            winners: Vec::new(),
            version: 0,
            state: kind.setup_with(rounds),
        }
    }
    pub fn kind(&self) -> Kind {
        self.state.kind()
    }
    pub fn state(&self) -> &State {
        &self.state
    }
    pub fn turn(&self) -> Turns {
        self.turn
    }
    pub fn finished(&self) -> bool {
        self.finished
    }
    pub fn winners(&self) -> &[ID<Player>] {
        &self.winners
    }
    pub fn version(&self) -> u64 {
        self.version
    }
    /// Storage bookkeeping: advance the compare-and-swap token.
    pub fn bump(&mut self) {
        self.version += 1;
    }
    pub fn player_one(&self) -> ID<Player> {
        self.player_one
    }
    pub fn player_two(&self) -> Option<ID<Player>> {
        self.player_two
    }
    /// True while the game awaits a second player.
    pub fn is_open(&self) -> bool {
        self.player_two.is_none()
    }
    pub fn is_host(&self, caller: ID<Player>) -> bool {
        self.player_one == caller
    }
    pub fn is_participant(&self, caller: ID<Player>) -> bool {
        self.seat_of(caller).is_some()
    }
    /// The seat a caller occupies, if any.
    pub fn seat_of(&self, caller: ID<Player>) -> Option<Seat> {
        if self.player_one == caller {
            Some(Seat::One)
        } else if self.player_two == Some(caller) {
            Some(Seat::Two)
        } else {
            None
        }
    }
    /// The player occupying a seat, if filled.
    pub fn player(&self, seat: Seat) -> Option<ID<Player>> {
        match seat {
            Seat::One => Some(self.player_one),
            Seat::Two => self.player_two,
        }
    }
}

impl Game {
    /// Seats the caller as player two.
    pub fn join(&mut self, caller: ID<Player>) -> Result<(), GameError> {
        if self.is_participant(caller) {
            return Err(GameError::Conflict("already in this game"));
        }
        if self.player_two.is_some() {
            return Err(GameError::Conflict("game already full"));
        }
        self.player_two = Some(caller);
        log::info!("[game {}] {} joined as P2", self.id, caller);
        Ok(())
    }
    /// Concedes on behalf of the caller; the opponent becomes sole winner.
    pub fn forfeit(&mut self, caller: ID<Player>) -> Result<(), GameError> {
        if self.finished {
            return Err(GameError::Conflict("game already finished"));
        }
        if self.player_two.is_none() {
            return Err(GameError::Conflict("awaiting player two; delete instead"));
        }
        let seat = self
            .seat_of(caller)
            .ok_or(GameError::Forbidden("only players can forfeit"))?;
        let winner = self
            .player(seat.opponent())
            .expect("both seats filled past the open check");
        log::info!("[game {}] {} forfeits", self.id, seat);
        self.conclude(vec![winner]);
        Ok(())
    }
    /// Checks the caller may withdraw this game entirely.
    pub fn deletable(&self, caller: ID<Player>) -> Result<(), GameError> {
        if !self.is_host(caller) {
            return Err(GameError::Forbidden("only the host can delete"));
        }
        if self.player_two.is_some() {
            return Err(GameError::Conflict("only open games can be deleted"));
        }
        Ok(())
    }
    /// Validates and applies one move.
    ///
    /// Shared preconditions run first — terminal check, both seats
    /// filled, caller is a participant, payload matches the rule set —
    /// then the per-kind resolver enforces turn order (or per-round
    /// submission) and structural legality. Any rejection leaves the
    /// record unchanged.
    pub fn apply(&mut self, caller: ID<Player>, action: Action) -> Result<(), GameError> {
        if self.finished {
            return Err(GameError::Conflict("game already finished"));
        }
        if self.player_two.is_none() {
            return Err(GameError::Conflict("awaiting player two"));
        }
        if action.kind() != self.kind() {
            return Err(GameError::InvalidMove(format!(
                "{} move sent to a {} game",
                action.kind(),
                self.kind()
            )));
        }
        let seat = self
            .seat_of(caller)
            .ok_or(GameError::Forbidden("only players can move"))?;
        let turn = self.turn;
        let progress = match (&mut self.state, action) {
            (State::TicTacToe(board), Action::Place(cell)) => board.place(seat, cell, turn),
            (State::RockPaperScissors(rounds), Action::Throw(choice)) => rounds.submit(seat, choice),
            (State::Battleships(boards), Action::Deploy(layout)) => boards.station(seat, layout),
            (State::Battleships(boards), Action::Fire(square)) => boards.fire(seat, square, turn),
            _ => unreachable!("payload kind checked above"),
        }?;
        match progress {
            Progress::Pending => {}
            Progress::Advanced => self.turn += 1,
            Progress::Won(winner) => {
                self.turn += 1;
                let winner = self
                    .player(winner)
                    .expect("both seats filled past the open check");
                self.conclude(vec![winner]);
            }
            Progress::Drawn => {
                self.turn += 1;
                let two = self.player_two.expect("both seats filled past the open check");
                self.conclude(vec![self.player_one, two]);
            }
        }
        Ok(())
    }
    /// Records the terminal result. One winner for a win or forfeit,
    /// both players for a draw.
    fn conclude(&mut self, winners: Vec<ID<Player>>) {
        self.winners = winners;
        self.finished = true;
        log::info!(
            "[game {}] finished after {} turns, winners: {:?}",
            self.id,
            self.turn,
            self.winners
        );
    }
}
