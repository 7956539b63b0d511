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

//! Parse and write Forsyth-Edwards-Notation.
//!
//! # Examples
//!
//! Parse a FEN:
//!
//! ```
//! use chesscore::{fen::Fen, Chess, Color, Square};
//!
//! let fen: Fen = "r1bqkbnr/ppp2Qpp/2np4/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4".parse()?;
//! let pos = fen.into_position()?;
//! assert!(pos.is_checkmate());
//! assert_eq!(pos.board().piece_at(Square::F7), Some(Color::White.queen()));
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```
//!
//! Write a FEN:
//!
//! ```
//! use chesscore::{fen::Fen, Chess};
//!
//! let pos = Chess::default();
//! assert_eq!(
//!     Fen::from_position(&pos).to_string(),
//!     "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
//! );
//! ```
//!
//! The last four fields are optional when parsing and default to `-`, `-`,
//! `0` and `1`. The side to move defaults to white.

use std::{error::Error, fmt, fmt::Write as _, num::NonZeroU32, str::FromStr};

use crate::{
    Board, Castles, CastlingSide, Chess, Color, File, Piece, PositionError, Rank, Setup, Square,
};

/// Errors that can occur when parsing a FEN.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseFenError {
    InvalidFen,
    InvalidBoard,
    InvalidTurn,
    InvalidCastling,
    InvalidEpSquare,
    InvalidHalfmoveClock,
    InvalidFullmoves,
}

impl fmt::Display for ParseFenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match *self {
            ParseFenError::InvalidFen => "invalid fen",
            ParseFenError::InvalidBoard => "invalid board part in fen",
            ParseFenError::InvalidTurn => "invalid turn part in fen",
            ParseFenError::InvalidCastling => "invalid castling part in fen",
            ParseFenError::InvalidEpSquare => "invalid ep square in fen",
            ParseFenError::InvalidHalfmoveClock => "invalid halfmove clock in fen",
            ParseFenError::InvalidFullmoves => "invalid fullmoves in fen",
        })
    }
}

impl Error for ParseFenError {}

fn parse_board_fen(board_fen: &[u8]) -> Result<Board, ParseFenError> {
    let mut board = Board::empty();

    let mut rank = 7i32;
    let mut file = 0i32;

    for &ch in board_fen {
        if ch == b'/' {
            if file != 8 || rank == 0 {
                return Err(ParseFenError::InvalidBoard);
            }
            file = 0;
            rank -= 1;
        } else if (b'1'..=b'8').contains(&ch) {
            file += i32::from(ch - b'0');
            if file > 8 {
                return Err(ParseFenError::InvalidBoard);
            }
        } else {
            let piece = Piece::from_char(char::from(ch)).ok_or(ParseFenError::InvalidBoard)?;
            let sq =
                Square::try_from_coords(file, rank).map_err(|_| ParseFenError::InvalidBoard)?;
            board.set_piece_at(sq, piece);
            file += 1;
        }
    }

    if rank != 0 || file != 8 {
        return Err(ParseFenError::InvalidBoard);
    }

    Ok(board)
}

fn parse_castling(castling: &[u8]) -> Result<Castles, ParseFenError> {
    if castling == b"-" {
        return Ok(Castles::empty());
    }

    let mut castles = Castles::empty();
    for &ch in castling {
        let color = Color::from_white(ch.is_ascii_uppercase());
        let side = match ch.to_ascii_lowercase() {
            b'k' => CastlingSide::KingSide,
            b'q' => CastlingSide::QueenSide,
            _ => return Err(ParseFenError::InvalidCastling),
        };
        let flag = Castles::flag(color, side);
        if castles.contains(flag) {
            return Err(ParseFenError::InvalidCastling);
        }
        castles |= flag;
    }

    if castles.is_empty() {
        Err(ParseFenError::InvalidCastling)
    } else {
        Ok(castles)
    }
}

/// A FEN like `rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1`.
///
/// Parsing only checks syntax. Use [`Fen::into_position()`] to validate the
/// position itself.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Default)]
pub struct Fen(pub Setup);

impl Fen {
    pub const fn empty() -> Fen {
        Fen(Setup::empty())
    }

    pub fn from_position(pos: &Chess) -> Fen {
        Fen(pos.to_setup())
    }

    pub fn as_setup(&self) -> &Setup {
        &self.0
    }

    pub fn into_setup(self) -> Setup {
        self.0
    }

    /// Validates the setup.
    ///
    /// # Errors
    ///
    /// See [`Chess::from_setup()`].
    pub fn into_position(self) -> Result<Chess, PositionError> {
        Chess::from_setup(self.0)
    }

    /// Parses a FEN from bytes.
    ///
    /// # Errors
    ///
    /// Names the first field that could not be parsed.
    pub fn from_ascii(fen: &[u8]) -> Result<Fen, ParseFenError> {
        let mut result = Setup::empty();
        let mut parts = fen.split(|ch| *ch == b' ').filter(|part| !part.is_empty());

        let board_part = parts.next().ok_or(ParseFenError::InvalidFen)?;
        result.board = parse_board_fen(board_part)?;

        result.turn = match parts.next() {
            Some(b"w") | None => Color::White,
            Some(b"b") => Color::Black,
            Some(_) => return Err(ParseFenError::InvalidTurn),
        };

        if let Some(castling_part) = parts.next() {
            result.castles = parse_castling(castling_part)?;
        }

        match parts.next() {
            Some(b"-") | None => (),
            Some(ep_part) => {
                let sq = Square::from_ascii(ep_part).map_err(|_| ParseFenError::InvalidEpSquare)?;
                if sq.rank() != Rank::Third && sq.rank() != Rank::Sixth {
                    return Err(ParseFenError::InvalidEpSquare);
                }
                result.ep_square = Some(sq);
            }
        }

        if let Some(halfmoves_part) = parts.next() {
            result.halfmoves =
                btoi::btou(halfmoves_part).map_err(|_| ParseFenError::InvalidHalfmoveClock)?;
        }

        if let Some(fullmoves_part) = parts.next() {
            let fullmoves: u32 =
                btoi::btou(fullmoves_part).map_err(|_| ParseFenError::InvalidFullmoves)?;
            result.fullmoves = NonZeroU32::new(fullmoves).ok_or(ParseFenError::InvalidFullmoves)?;
        }

        if parts.next().is_some() {
            return Err(ParseFenError::InvalidFen);
        }

        Ok(Fen(result))
    }
}

impl FromStr for Fen {
    type Err = ParseFenError;

    fn from_str(fen: &str) -> Result<Fen, ParseFenError> {
        Fen::from_ascii(fen.as_bytes())
    }
}

impl From<Setup> for Fen {
    fn from(setup: Setup) -> Fen {
        Fen(setup)
    }
}

fn write_board_fen(f: &mut fmt::Formatter<'_>, board: &Board) -> fmt::Result {
    for rank in Rank::ALL.into_iter().rev() {
        let mut empty = 0;

        for file in File::ALL {
            match board.piece_at(Square::from_coords(file, rank)) {
                Some(piece) => {
                    if empty > 0 {
                        write!(f, "{empty}")?;
                        empty = 0;
                    }
                    f.write_char(piece.char())?;
                }
                None => empty += 1,
            }
        }

        if empty > 0 {
            write!(f, "{empty}")?;
        }

        if rank > Rank::First {
            f.write_char('/')?;
        }
    }

    Ok(())
}

impl fmt::Display for Fen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let setup = &self.0;
        write_board_fen(f, &setup.board)?;
        write!(f, " {} {} ", setup.turn.char(), setup.castles)?;
        match setup.ep_square {
            Some(sq) => write!(f, "{sq}")?,
            None => f.write_char('-')?,
        }
        write!(f, " {} {}", setup.halfmoves, setup.fullmoves)
    }
}

/// Error when a FEN could not be turned into a position.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FenError {
    Parse(ParseFenError),
    Position(PositionError),
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenError::Parse(err) => fmt::Display::fmt(err, f),
            FenError::Position(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl Error for FenError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            FenError::Parse(err) => Some(err),
            FenError::Position(err) => Some(err),
        }
    }
}

impl From<ParseFenError> for FenError {
    fn from(err: ParseFenError) -> FenError {
        FenError::Parse(err)
    }
}

impl From<PositionError> for FenError {
    fn from(err: PositionError) -> FenError {
        FenError::Position(err)
    }
}

impl Chess {
    /// Parses and validates a FEN.
    ///
    /// # Errors
    ///
    /// Returns [`FenError`] if the FEN is malformed or does not describe a
    /// playable position.
    pub fn from_fen(fen: &str) -> Result<Chess, FenError> {
        Ok(fen.parse::<Fen>()?.into_position()?)
    }

    /// Renders the position as a FEN.
    pub fn to_fen(&self) -> String {
        Fen::from_position(self).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Role;

    #[test]
    fn test_start_position() {
        let fen: Fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
            .parse()
            .expect("valid fen");
        assert_eq!(fen.0, Setup::default());
        assert_eq!(fen.into_position(), Ok(Chess::default()));
    }

    #[test]
    fn test_from_fen() {
        assert!(matches!(
            Chess::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0"),
            Ok(pos) if pos.turn() == Color::White
        ));
        assert_eq!(
            Chess::from_fen("4k3/8/8/8/8/8/8/8 w - - 0 1").map_err(|err| err.to_string()),
            Err("illegal position: missing king".to_owned())
        );
        assert_eq!(
            Chess::from_fen("4k3 w - - 0 1"),
            Err(FenError::Parse(ParseFenError::InvalidBoard))
        );
    }

    #[test]
    fn test_optional_fields() {
        let fen: Fen = "4k3/8/8/8/8/8/8/4K3".parse().expect("board only");
        assert_eq!(fen.0.turn, Color::White);
        assert_eq!(fen.0.castles, Castles::empty());
        assert_eq!(fen.0.ep_square, None);
        assert_eq!(fen.0.halfmoves, 0);
        assert_eq!(fen.0.fullmoves.get(), 1);
        assert_eq!(fen.to_string(), "4k3/8/8/8/8/8/8/4K3 w - - 0 1");

        let fen: Fen = "4k3/8/8/8/8/8/8/4K3 b".parse().expect("board and turn");
        assert_eq!(fen.0.turn, Color::Black);
    }

    #[test]
    fn test_write_after_moves() {
        let mut pos = Chess::default();
        let e4 = pos
            .legal_moves()
            .into_iter()
            .find(|m| m.to_string() == "e2e4")
            .expect("e2e4 is legal");
        pos.play_unchecked(e4);
        assert_eq!(
            pos.to_fen(),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
        );
    }

    #[test]
    fn test_parse_pieces_and_counters() {
        let fen: Fen = "r3k2r/8/8/8/8/8/8/R3K2R b Kq - 12 40".parse().expect("valid fen");
        let setup = fen.as_setup();
        assert_eq!(setup.board.piece_at(Square::H8).map(|p| p.role), Some(Role::Rook));
        assert_eq!(setup.castles, Castles::WHITE_KING_SIDE | Castles::BLACK_QUEEN_SIDE);
        assert_eq!(setup.halfmoves, 12);
        assert_eq!(setup.fullmoves.get(), 40);
        assert_eq!(fen.to_string(), "r3k2r/8/8/8/8/8/8/R3K2R b Kq - 12 40");
    }

    #[test]
    fn test_invalid_fen() {
        let cases = [
            ("", ParseFenError::InvalidFen),
            ("8/8/8/8/8/8/8 w - - 0 1", ParseFenError::InvalidBoard),
            ("9/8/8/8/8/8/8/8 w - - 0 1", ParseFenError::InvalidBoard),
            ("4k3/8/8/8/8/8/8/4K2X w - - 0 1", ParseFenError::InvalidBoard),
            ("4k3/8/8/8/8/8/8/4K3 x - - 0 1", ParseFenError::InvalidTurn),
            ("4k3/8/8/8/8/8/8/4K3 w KA - 0 1", ParseFenError::InvalidCastling),
            ("4k3/8/8/8/8/8/8/4K3 w KK - 0 1", ParseFenError::InvalidCastling),
            ("4k3/8/8/8/8/8/8/4K3 w - e4 0 1", ParseFenError::InvalidEpSquare),
            ("4k3/8/8/8/8/8/8/4K3 w - - x 1", ParseFenError::InvalidHalfmoveClock),
            ("4k3/8/8/8/8/8/8/4K3 w - - 0 0", ParseFenError::InvalidFullmoves),
            ("4k3/8/8/8/8/8/8/4K3 w - - 0 1 extra", ParseFenError::InvalidFen),
        ];
        for (fen, err) in cases {
            assert_eq!(fen.parse::<Fen>(), Err(err), "{fen}");
        }
    }
}
