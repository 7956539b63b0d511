// This file is part of the chesscore library.
// Copyright (C) 2026 The chesscore developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.

//! Chess rules: board representation, legal move generation, move
//! application and game status.
//!
//! # Examples
//!
//! Generate legal moves in the starting position:
//!
//! ```
//! use chesscore::Chess;
//!
//! let pos = Chess::default();
//! let legals = pos.legal_moves();
//! assert_eq!(legals.len(), 20);
//! ```
//!
//! Play moves:
//!
//! ```
//! use chesscore::{Chess, Move, MoveKind, Square};
//!
//! let pos = Chess::default();
//!
//! // 1. e4
//! let pos = pos.play(Move::new(Square::E2, Square::E4, MoveKind::DoublePawnPush))?;
//! # Ok::<_, chesscore::IllegalMoveError>(())
//! ```
//!
//! Detect game end conditions:
//!
//! ```
//! use chesscore::{Chess, GameStatus};
//!
//! let pos = Chess::default();
//! assert!(!pos.is_checkmate());
//! assert!(!pos.is_stalemate());
//! assert_eq!(pos.status(), GameStatus::Ongoing);
//! assert_eq!(pos.outcome(), None); // no winner yet
//! ```
//!
//! Also supports [FEN](fen) and [UCI](uci) notation for positions and
//! moves, a [`Game`] session with undo, and automated [policies](Policy).
//!
//! # Feature flags
//!
//! * `serde`: Implements [`serde::Serialize`](https://docs.rs/serde/1/serde/trait.Serialize.html)
//!   and [`serde::Deserialize`](https://docs.rs/serde/1/serde/trait.Deserialize.html) for
//!   types with unique natural representations.
//! * `cli`: Builds the `chesscore` command line tool.

#![forbid(unsafe_code)]
#![warn(missing_debug_implementations)]

mod castling_side;
mod color;
mod m;
mod position;
mod role;
mod setup;
mod square;
mod types;

pub mod attacks;
pub mod bitboard;
pub mod board;
pub mod fen;
pub mod game;
pub mod perft;
pub mod policy;
pub mod uci;

pub use bitboard::Bitboard;
pub use board::Board;
pub use castling_side::{Castles, CastlingSide};
pub use color::{ByColor, Color, ParseColorError};
pub use game::Game;
pub use m::{Move, MoveKind, MoveList};
pub use perft::perft;
pub use policy::{FirstMovePolicy, Policy, RandomPolicy};
pub use position::{
    Chess, GameStatus, IllegalMoveError, Outcome, ParseOutcomeError, PositionError,
    PositionErrorKinds,
};
pub use role::{ByRole, Role};
pub use setup::Setup;
pub use square::{File, MalformedSquareError, Rank, Square};
pub use types::Piece;
