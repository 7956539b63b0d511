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

use std::{fmt, fmt::Write as _};

use arrayvec::ArrayVec;

use crate::{CastlingSide, Role, Square};

/// How a move affects the board beyond moving one piece from `from` to `to`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveKind {
    /// A plain move or capture.
    Normal,
    /// A pawn advancing two squares from its starting rank.
    DoublePawnPush,
    /// A pawn capturing a pawn that just double-pushed past it. The captured
    /// pawn is not on `to`.
    EnPassant,
    /// `O-O`. The rook moves from the h-file to the f-file.
    CastleKingSide,
    /// `O-O-O`. The rook moves from the a-file to the d-file.
    CastleQueenSide,
    /// A pawn reaching the last rank, replaced by the given role. May also
    /// be a capture.
    Promotion(Role),
}

impl MoveKind {
    pub const fn castle(side: CastlingSide) -> MoveKind {
        match side {
            CastlingSide::KingSide => MoveKind::CastleKingSide,
            CastlingSide::QueenSide => MoveKind::CastleQueenSide,
        }
    }
}

/// A proposed move.
///
/// Whether a move is legal depends on the position it is played in. For
/// castling moves, `from` and `to` are the origin and destination of the
/// king.
///
/// # Display
///
/// `Move` implements [`Display`](fmt::Display) using the long algebraic
/// notation of the [UCI](crate::uci) protocol, e.g. `e2e4` or `e7e8q`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub kind: MoveKind,
}

impl Move {
    #[inline]
    pub const fn new(from: Square, to: Square, kind: MoveKind) -> Move {
        Move { from, to, kind }
    }

    #[inline]
    pub const fn normal(from: Square, to: Square) -> Move {
        Move::new(from, to, MoveKind::Normal)
    }

    /// Gets the castling side.
    pub const fn castling_side(self) -> Option<CastlingSide> {
        match self.kind {
            MoveKind::CastleKingSide => Some(CastlingSide::KingSide),
            MoveKind::CastleQueenSide => Some(CastlingSide::QueenSide),
            _ => None,
        }
    }

    /// Checks if the move is a castling move.
    pub const fn is_castle(self) -> bool {
        matches!(
            self.kind,
            MoveKind::CastleKingSide | MoveKind::CastleQueenSide
        )
    }

    /// Checks if the move is en passant.
    pub const fn is_en_passant(self) -> bool {
        matches!(self.kind, MoveKind::EnPassant)
    }

    /// Gets the promotion role.
    pub const fn promotion(self) -> Option<Role> {
        match self.kind {
            MoveKind::Promotion(role) => Some(role),
            _ => None,
        }
    }

    /// Checks if the move is a promotion.
    pub const fn is_promotion(self) -> bool {
        matches!(self.kind, MoveKind::Promotion(_))
    }

    /// The square of the piece captured by this move, if it is played as an
    /// en passant capture. For all other moves a capture, if any, happens on
    /// `to`.
    pub const fn en_passant_victim(self) -> Option<Square> {
        match self.kind {
            MoveKind::EnPassant => Some(self.to.with_rank_of(self.from)),
            _ => None,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(role) = self.promotion() {
            f.write_char(role.char())?;
        }
        Ok(())
    }
}

/// A container for moves that can be stored inline on the stack.
///
/// The capacity is limited, but there is enough space to hold the
/// pseudo-legal moves of any position accepted by
/// [`Chess::from_setup()`](crate::Chess::from_setup).
///
/// # Example
///
/// ```
/// use chesscore::{Chess, Square};
///
/// let pos = Chess::default();
/// let mut moves = pos.legal_moves();
/// moves.retain(|m| m.from == Square::G1);
/// assert_eq!(moves.len(), 2);
/// ```
pub type MoveList = ArrayVec<Move, 512>;
