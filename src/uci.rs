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

//! Parse and write moves in the long algebraic notation of the Universal
//! Chess Interface, like `e2e4` or `e7e8q`.
//!
//! # Examples
//!
//! Parsing and converting to a legal move in the context of a position:
//!
//! ```
//! use chesscore::{uci::UciMove, Chess, Color, MoveKind, Square};
//!
//! let uci: UciMove = "g1f3".parse()?;
//! assert_eq!(uci, UciMove { from: Square::G1, to: Square::F3, promotion: None });
//!
//! let mut pos = Chess::default();
//! let m = uci.to_move(&pos)?;
//! assert_eq!(m.kind, MoveKind::Normal);
//!
//! pos.play_unchecked(m);
//! assert_eq!(pos.board().piece_at(Square::F3), Some(Color::White.knight()));
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```
//!
//! The notation does not say what kind of move is meant, so `e1g1` is
//! resolved to castling and `e5d6` to en passant when the position allows
//! it.

use std::{error::Error, fmt, fmt::Write as _, str::FromStr};

use crate::{Chess, Move, Role, Square};

/// Error when parsing an invalid UCI move.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseUciMoveError;

impl fmt::Display for ParseUciMoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid uci move")
    }
}

impl Error for ParseUciMoveError {}

/// Error when a UCI move does not name a legal move.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IllegalUciMoveError {
    pub uci: UciMove,
}

impl fmt::Display for IllegalUciMoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "illegal uci move {}", self.uci)
    }
}

impl Error for IllegalUciMoveError {}

/// A move as written in UCI: two squares and an optional promotion role.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct UciMove {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<Role>,
}

impl UciMove {
    /// Parses a move like `g1f3` or `a7a8q`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseUciMoveError`] if the syntax is not valid. The
    /// promotion role must be lowercase and one of `q`, `r`, `b`, `n`.
    pub fn from_ascii(s: &[u8]) -> Result<UciMove, ParseUciMoveError> {
        if s.len() != 4 && s.len() != 5 {
            return Err(ParseUciMoveError);
        }

        let from = Square::from_ascii(&s[0..2]).map_err(|_| ParseUciMoveError)?;
        let to = Square::from_ascii(&s[2..4]).map_err(|_| ParseUciMoveError)?;

        let promotion = match s.get(4) {
            Some(&ch) if ch.is_ascii_lowercase() => Some(
                Role::from_char(char::from(ch))
                    .filter(|role| role.is_promotable())
                    .ok_or(ParseUciMoveError)?,
            ),
            Some(_) => return Err(ParseUciMoveError),
            None => None,
        };

        Ok(UciMove {
            from,
            to,
            promotion,
        })
    }

    /// Finds the legal move in `pos` that this UCI move describes.
    ///
    /// # Errors
    ///
    /// Returns [`IllegalUciMoveError`] if there is no such move.
    pub fn to_move(&self, pos: &Chess) -> Result<Move, IllegalUciMoveError> {
        pos.legal_moves_from(self.from)
            .into_iter()
            .find(|m| m.to == self.to && m.promotion() == self.promotion)
            .ok_or(IllegalUciMoveError { uci: *self })
    }
}

impl FromStr for UciMove {
    type Err = ParseUciMoveError;

    fn from_str(s: &str) -> Result<UciMove, ParseUciMoveError> {
        UciMove::from_ascii(s.as_bytes())
    }
}

impl From<Move> for UciMove {
    fn from(m: Move) -> UciMove {
        UciMove {
            from: m.from,
            to: m.to,
            promotion: m.promotion(),
        }
    }
}

impl fmt::Display for UciMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(role) = self.promotion {
            f.write_char(role.char())?;
        }
        Ok(())
    }
}

impl Move {
    /// Converts to the UCI representation.
    pub fn to_uci(self) -> UciMove {
        UciMove::from(self)
    }
}
