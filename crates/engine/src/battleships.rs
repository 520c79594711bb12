use crate::*;
use parlor_core::Arbitrary;
use parlor_core::Turns;
use std::collections::HashSet;

/// Side length of each player's grid.
pub const GRID: u8 = 10;

/// Ship classes in a full fleet, largest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Class {
    Carrier,
    Battleship,
    Cruiser,
    Submarine,
    Destroyer,
}

impl Class {
    pub const FLEET: [Class; 5] = [
        Class::Carrier,
        Class::Battleship,
        Class::Cruiser,
        Class::Submarine,
        Class::Destroyer,
    ];
    /// Ship length in grid units.
    pub fn length(&self) -> u8 {
        match self {
            Self::Carrier => 5,
            Self::Battleship => 4,
            Self::Cruiser => 3,
            Self::Submarine => 3,
            Self::Destroyer => 2,
        }
    }
}

impl std::fmt::Display for Class {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Carrier => write!(f, "carrier"),
            Self::Battleship => write!(f, "battleship"),
            Self::Cruiser => write!(f, "cruiser"),
            Self::Submarine => write!(f, "submarine"),
            Self::Destroyer => write!(f, "destroyer"),
        }
    }
}

/// Coordinate on a 10×10 grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "Coordinate")]
pub struct Square {
    row: u8,
    col: u8,
}

/// Raw wire shape; bounds are enforced in the conversion.
#[derive(serde::Deserialize)]
struct Coordinate {
    row: u8,
    col: u8,
}

impl TryFrom<Coordinate> for Square {
    type Error = &'static str;
    fn try_from(raw: Coordinate) -> Result<Self, Self::Error> {
        Self::new(raw.row, raw.col).ok_or("square is off the grid")
    }
}

impl Square {
    pub fn new(row: u8, col: u8) -> Option<Self> {
        (row < GRID && col < GRID).then_some(Self { row, col })
    }
    pub fn row(&self) -> u8 {
        self.row
    }
    pub fn col(&self) -> u8 {
        self.col
    }
}

impl Arbitrary for Square {
    fn random() -> Self {
        Self {
            row: rand::random_range(0..GRID),
            col: rand::random_range(0..GRID),
        }
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", (b'A' + self.row) as char, self.col + 1)
    }
}

/// One ship in a layout: class, bow square, and heading.
///
/// A ship occupies `class.length()` contiguous squares running rightward
/// (across) or downward from the bow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Placement {
    class: Class,
    row: u8,
    col: u8,
    across: bool,
}

impl Placement {
    pub fn new(class: Class, row: u8, col: u8, across: bool) -> Self {
        Self {
            class,
            row,
            col,
            across,
        }
    }
    pub fn class(&self) -> Class {
        self.class
    }
    /// Squares the ship would occupy, or None if any run off the grid.
    pub fn squares(&self) -> Option<Vec<Square>> {
        (0..self.class.length())
            .map(|i| match self.across {
                true => self.col.checked_add(i).and_then(|c| Square::new(self.row, c)),
                false => self.row.checked_add(i).and_then(|r| Square::new(r, self.col)),
            })
            .collect()
    }
}

/// A deployed ship: its placement plus the squares shot out of it.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Ship {
    placement: Placement,
    hits: u8,
}

impl Ship {
    fn new(placement: Placement) -> Self {
        Self { placement, hits: 0 }
    }
    pub fn class(&self) -> Class {
        self.placement.class()
    }
    pub fn placement(&self) -> Placement {
        self.placement
    }
    pub fn hits(&self) -> u8 {
        self.hits
    }
    pub fn sunk(&self) -> bool {
        self.hits >= self.class().length()
    }
    fn covers(&self, square: Square) -> bool {
        self.placement
            .squares()
            .map(|squares| squares.contains(&square))
            .unwrap_or(false)
    }
}

/// A shot received on a board, hit or miss. Public to all viewers.
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct Shot {
    square: Square,
    hit: bool,
}

impl Shot {
    pub fn square(&self) -> Square {
        self.square
    }
    pub fn hit(&self) -> bool {
        self.hit
    }
}

/// One player's side of the board: their deployed fleet and the shots
/// their grid has taken. Empty ships means the layout is not in yet.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Fleet {
    ships: Vec<Ship>,
    shots: Vec<Shot>,
}

impl Fleet {
    pub fn deployed(&self) -> bool {
        !self.ships.is_empty()
    }
    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }
    pub fn shots(&self) -> &[Shot] {
        &self.shots
    }
    pub fn defeated(&self) -> bool {
        self.deployed() && self.ships.iter().all(Ship::sunk)
    }
    fn shot_at(&self, square: Square) -> bool {
        self.shots.iter().any(|s| s.square() == square)
    }
    /// Validates a full layout: one ship per class, on the grid, no overlap.
    fn deploy(&mut self, layout: Vec<Placement>) -> Result<(), GameError> {
        // FLEET lists classes in declaration order, so a sort lines any
        // permutation up against it.
        let mut classes = layout.iter().map(Placement::class).collect::<Vec<_>>();
        classes.sort();
        if classes != Class::FLEET {
            return Err(GameError::InvalidMove(
                "layout must place exactly one ship of each class".to_string(),
            ));
        }
        let mut taken = HashSet::new();
        for placement in &layout {
            let squares = placement.squares().ok_or_else(|| {
                GameError::InvalidMove(format!("{} runs off the grid", placement.class()))
            })?;
            for square in squares {
                if !taken.insert(square) {
                    return Err(GameError::InvalidMove(format!(
                        "{} overlaps another ship at {}",
                        placement.class(),
                        square
                    )));
                }
            }
        }
        self.ships = layout.into_iter().map(Ship::new).collect();
        Ok(())
    }
    /// Resolves a shot against this board.
    fn receive(&mut self, square: Square) -> bool {
        let hit = self.ships.iter_mut().find(|s| s.covers(square));
        let hit = match hit {
            Some(ship) => {
                ship.hits += 1;
                true
            }
            None => false,
        };
        self.shots.push(Shot { square, hit });
        hit
    }
}

/// Which stage a battleships record is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Setup,
    Combat,
}

/// Play state for a battleships record.
///
/// Phase one: both seats independently submit a private layout. Phase two:
/// alternating shots at the opposing grid until one fleet is sunk.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Battleships {
    one: Fleet,
    two: Fleet,
}

impl Battleships {
    pub fn fleet(&self, seat: Seat) -> &Fleet {
        match seat {
            Seat::One => &self.one,
            Seat::Two => &self.two,
        }
    }
    fn fleet_mut(&mut self, seat: Seat) -> &mut Fleet {
        match seat {
            Seat::One => &mut self.one,
            Seat::Two => &mut self.two,
        }
    }
    pub fn phase(&self) -> Phase {
        if self.one.deployed() && self.two.deployed() {
            Phase::Combat
        } else {
            Phase::Setup
        }
    }
    /// Folds in a seat's layout during setup. No turn order here.
    pub(crate) fn station(&mut self, seat: Seat, layout: Vec<Placement>) -> Result<Progress, GameError> {
        if self.fleet(seat).deployed() {
            return Err(GameError::Conflict("layout already submitted"));
        }
        self.fleet_mut(seat).deploy(layout)?;
        Ok(Progress::Pending)
    }
    /// Resolves a shot at the opposing grid during combat.
    pub(crate) fn fire(&mut self, seat: Seat, square: Square, turn: Turns) -> Result<Progress, GameError> {
        if self.phase() == Phase::Setup {
            return Err(GameError::Conflict("both fleets must deploy first"));
        }
        if seat != Seat::to_move(turn) {
            return Err(GameError::Conflict("not your turn"));
        }
        let target = self.fleet_mut(seat.opponent());
        if target.shot_at(square) {
            return Err(GameError::Conflict("square already targeted"));
        }
        target.receive(square);
        if target.defeated() {
            Ok(Progress::Won(seat))
        } else {
            Ok(Progress::Advanced)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> Vec<Placement> {
        // One ship per row, all across, no contact.
        Class::FLEET
            .iter()
            .enumerate()
            .map(|(row, class)| Placement::new(*class, row as u8, 0, true))
            .collect()
    }

    fn combat() -> Battleships {
        let mut game = Battleships::default();
        game.station(Seat::One, layout()).unwrap();
        game.station(Seat::Two, layout()).unwrap();
        game
    }

    fn square(row: u8, col: u8) -> Square {
        Square::new(row, col).unwrap()
    }

    #[test]
    fn layout_must_cover_the_whole_fleet() {
        let mut game = Battleships::default();
        let short = layout().into_iter().skip(1).collect::<Vec<_>>();
        assert!(matches!(
            game.station(Seat::One, short),
            Err(GameError::InvalidMove(_))
        ));
        let doubled = layout()
            .into_iter()
            .map(|_| Placement::new(Class::Destroyer, 9, 0, true))
            .collect::<Vec<_>>();
        assert!(matches!(
            game.station(Seat::One, doubled),
            Err(GameError::InvalidMove(_))
        ));
    }

    #[test]
    fn layout_accepted_in_any_order() {
        let mut game = Battleships::default();
        // Submarine listed before the cruiser: same length, still one of each.
        let mut shuffled = layout();
        shuffled.swap(2, 3);
        game.station(Seat::One, shuffled).unwrap();
        assert!(game.fleet(Seat::One).deployed());
        let mut reversed = layout();
        reversed.reverse();
        game.station(Seat::Two, reversed).unwrap();
        assert_eq!(game.phase(), Phase::Combat);
    }

    #[test]
    fn off_grid_wire_square_rejected() {
        assert!(serde_json::from_str::<Square>(r#"{"row":10,"col":0}"#).is_err());
        assert!(serde_json::from_str::<Square>(r#"{"row":3,"col":255}"#).is_err());
        let corner: Square = serde_json::from_str(r#"{"row":9,"col":9}"#).unwrap();
        assert_eq!(corner, square(9, 9));
    }

    #[test]
    fn out_of_bounds_ship_rejected() {
        let mut game = Battleships::default();
        let mut bad = layout();
        bad[0] = Placement::new(Class::Carrier, 0, 7, true); // cols 7..12
        assert!(matches!(
            game.station(Seat::One, bad),
            Err(GameError::InvalidMove(_))
        ));
        assert!(!game.fleet(Seat::One).deployed());
    }

    #[test]
    fn overlapping_ships_rejected() {
        let mut game = Battleships::default();
        let mut bad = layout();
        bad[4] = Placement::new(Class::Destroyer, 0, 1, false); // crosses the carrier
        assert!(matches!(
            game.station(Seat::One, bad),
            Err(GameError::InvalidMove(_))
        ));
    }

    #[test]
    fn no_firing_during_setup() {
        let mut game = Battleships::default();
        game.station(Seat::One, layout()).unwrap();
        assert_eq!(
            game.fire(Seat::One, square(0, 0), 0).unwrap_err(),
            GameError::Conflict("both fleets must deploy first")
        );
    }

    #[test]
    fn repeat_target_rejected() {
        let mut game = combat();
        assert!(matches!(game.fire(Seat::One, square(9, 9), 0), Ok(Progress::Advanced)));
        assert_eq!(
            game.fire(Seat::One, square(9, 9), 2).unwrap_err(),
            GameError::Conflict("square already targeted")
        );
    }

    #[test]
    fn destroyer_sinks_after_two_hits() {
        let mut game = combat();
        // Destroyer sits at row 4, cols 0-1 on seat two's grid.
        game.fire(Seat::One, square(4, 0), 0).unwrap();
        game.fire(Seat::Two, square(9, 9), 1).unwrap();
        game.fire(Seat::One, square(4, 1), 2).unwrap();
        let destroyer = game
            .fleet(Seat::Two)
            .ships()
            .iter()
            .find(|s| s.class() == Class::Destroyer)
            .unwrap();
        assert_eq!(destroyer.hits(), 2);
        assert!(destroyer.sunk());
        assert!(!game.fleet(Seat::Two).defeated());
    }

    #[test]
    fn sinking_the_whole_fleet_wins() {
        let mut game = combat();
        let mut turn = 0;
        // Seat one sweeps the occupied rows; seat two burns misses.
        let targets: Vec<Square> = Class::FLEET
            .iter()
            .enumerate()
            .flat_map(|(row, class)| {
                (0..class.length()).map(move |col| square(row as u8, col))
            })
            .collect();
        let (last, rest) = targets.split_last().unwrap();
        for (k, target) in rest.iter().enumerate() {
            assert!(matches!(game.fire(Seat::One, *target, turn), Ok(Progress::Advanced)));
            turn += 1;
            // Seat two burns shots into seat one's empty rows.
            game.fire(Seat::Two, square(5 + (k as u8 / GRID), k as u8 % GRID), turn)
                .unwrap();
            turn += 1;
        }
        assert!(matches!(game.fire(Seat::One, *last, turn), Ok(Progress::Won(Seat::One))));
        assert!(game.fleet(Seat::Two).defeated());
    }
}
