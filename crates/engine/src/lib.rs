//! Turn-based game engine: records, move resolution, and concealment.
//!
//! This crate implements the rules shared by every game on the platform:
//! lifecycle transitions on the game record, whose-turn computation, move
//! legality, win and draw detection, and the per-viewer redaction of
//! private state.
//!
//! ## State Representation
//!
//! - [`Game`] — The persisted record: seats, turn counter, winners, play state
//! - [`State`] — Per-kind play state behind a tagged variant
//! - [`Kind`] — Which rule set a record follows
//!
//! ## Moves
//!
//! - [`Action`] — A proposed move: place a mark, throw a hand sign,
//!   deploy a fleet, or fire a shot
//! - [`Seat`] — Which of the two seats is acting, derived from turn parity
//!
//! ## Resolution
//!
//! - [`tictactoe`](TicTacToe) — 3×3 grid, eight winning triples
//! - [`rps`](RockPaperScissors) — hidden simultaneous rounds with a tally limit
//! - [`battleships`](Battleships) — private layouts, alternating salvos,
//!   sunk-fleet win
//!
//! ## Output
//!
//! - [`GameView`] — Concealed, viewer-specific projection of a record
//! - [`GameSummary`] — Index projection with no board state
//! - [`GameError`] — Typed rule violations, never panics
mod action;
mod battleships;
mod error;
mod game;
mod kind;
mod rps;
mod seat;
mod tictactoe;
mod view;

pub use action::*;
pub use battleships::*;
pub use error::*;
pub use game::*;
pub use kind::*;
pub use rps::*;
pub use seat::*;
pub use tictactoe::*;
pub use view::*;
