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

use std::num::NonZeroU32;

use crate::{Board, Castles, Color, Square};

/// A not necessarily legal position.
///
/// This is what [FEN](crate::fen) parses into. Validate it with
/// [`Chess::from_setup()`](crate::Chess::from_setup) before playing moves.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Setup {
    /// Piece positions on the board.
    pub board: Board,

    /// Side to move.
    pub turn: Color,

    /// Castling rights.
    pub castles: Castles,

    /// En passant target square: the square a pawn skipped over with a
    /// double push on the previous move. Valid target squares are on the
    /// third or sixth rank.
    pub ep_square: Option<Square>,

    /// Number of half-moves since the last capture or pawn move.
    ///
    /// # Examples
    ///
    /// ```
    /// use chesscore::Setup;
    ///
    /// let setup = Setup::default();
    /// assert_eq!(setup.halfmoves, 0);
    /// ```
    pub halfmoves: u32,

    /// Current move number.
    ///
    /// Starts at 1 and is increased after every black move.
    pub fullmoves: NonZeroU32,
}

impl Setup {
    pub const fn empty() -> Setup {
        Setup {
            board: Board::empty(),
            turn: Color::White,
            castles: Castles::empty(),
            ep_square: None,
            halfmoves: 0,
            fullmoves: NonZeroU32::MIN,
        }
    }
}

impl Default for Setup {
    /// The standard starting position.
    fn default() -> Setup {
        Setup {
            board: Board::new(),
            castles: Castles::all(),
            ..Setup::empty()
        }
    }
}
