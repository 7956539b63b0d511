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

//! Piece positions on a board.

use std::fmt::{self, Write as _};

use crate::{
    attacks,
    bitboard::Bitboard,
    color::{ByColor, Color},
    role::{ByRole, Role},
    square::{File, Rank, Square},
    types::Piece,
};

/// [`Piece`] positions on a board.
///
/// The board is a plain store: it performs no validation and knows nothing
/// about the side to move, castling or en passant.
///
/// # Examples
///
/// ```
/// use chesscore::{Board, Color, Square};
///
/// let board = Board::new();
/// // r n b q k b n r
/// // p p p p p p p p
/// // . . . . . . . .
/// // . . . . . . . .
/// // . . . . . . . .
/// // . . . . . . . .
/// // P P P P P P P P
/// // R N B Q K B N R
///
/// assert_eq!(board.piece_at(Square::E8), Some(Color::Black.king()));
/// assert_eq!(board.piece_at(Square::E4), None);
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Board {
    by_role: ByRole<Bitboard>,
    by_color: ByColor<Bitboard>,
    occupied: Bitboard,
}

impl Board {
    /// The standard starting position.
    pub const fn new() -> Board {
        Board {
            by_role: ByRole {
                pawn: Bitboard(0x00ff_0000_0000_ff00),
                knight: Bitboard(0x4200_0000_0000_0042),
                bishop: Bitboard(0x2400_0000_0000_0024),
                rook: Bitboard::CORNERS,
                queen: Bitboard(0x0800_0000_0000_0008),
                king: Bitboard(0x1000_0000_0000_0010),
            },
            by_color: ByColor {
                white: Bitboard(0xffff),
                black: Bitboard(0xffff_0000_0000_0000),
            },
            occupied: Bitboard(0xffff_0000_0000_ffff),
        }
    }

    pub const fn empty() -> Board {
        Board {
            by_role: ByRole {
                pawn: Bitboard::EMPTY,
                knight: Bitboard::EMPTY,
                bishop: Bitboard::EMPTY,
                rook: Bitboard::EMPTY,
                queen: Bitboard::EMPTY,
                king: Bitboard::EMPTY,
            },
            by_color: ByColor {
                white: Bitboard::EMPTY,
                black: Bitboard::EMPTY,
            },
            occupied: Bitboard::EMPTY,
        }
    }

    #[inline]
    pub const fn occupied(&self) -> Bitboard {
        self.occupied
    }

    #[inline]
    pub const fn by_color(&self, color: Color) -> Bitboard {
        *self.by_color.get(color)
    }

    #[inline]
    pub const fn by_role(&self, role: Role) -> Bitboard {
        *self.by_role.get(role)
    }

    #[inline]
    pub const fn by_piece(&self, piece: Piece) -> Bitboard {
        Bitboard(self.by_color(piece.color).0 & self.by_role(piece.role).0)
    }

    #[inline]
    pub const fn pawns(&self) -> Bitboard {
        self.by_role.pawn
    }

    #[inline]
    pub const fn kings(&self) -> Bitboard {
        self.by_role.king
    }

    /// Rooks and queens: pieces that attack along ranks and files.
    #[inline]
    pub const fn rooks_and_queens(&self) -> Bitboard {
        Bitboard(self.by_role.rook.0 | self.by_role.queen.0)
    }

    /// Bishops and queens: pieces that attack along diagonals.
    #[inline]
    pub const fn bishops_and_queens(&self) -> Bitboard {
        Bitboard(self.by_role.bishop.0 | self.by_role.queen.0)
    }

    /// The (unique) king of the given color.
    #[inline]
    pub fn king_of(&self, color: Color) -> Option<Square> {
        (self.kings() & self.by_color(color)).single_square()
    }

    #[inline]
    pub fn color_at(&self, sq: Square) -> Option<Color> {
        self.by_color.find(|bb| bb.contains(sq))
    }

    #[inline]
    pub fn role_at(&self, sq: Square) -> Option<Role> {
        if self.occupied.contains(sq) {
            self.by_role.find(|bb| bb.contains(sq))
        } else {
            None
        }
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        let role = self.role_at(sq)?;
        let color = self.color_at(sq)?;
        Some(Piece { color, role })
    }

    /// Removes and returns the piece at `sq`, if any.
    pub fn remove_piece_at(&mut self, sq: Square) -> Option<Piece> {
        let piece = self.piece_at(sq)?;
        self.discard_piece_at(sq, piece);
        Some(piece)
    }

    /// Puts `piece` on `sq`, replacing any previous occupant.
    pub fn set_piece_at(&mut self, sq: Square, piece: Piece) {
        self.remove_piece_at(sq);
        self.occupied.toggle(sq);
        self.by_color.get_mut(piece.color).toggle(sq);
        self.by_role.get_mut(piece.role).toggle(sq);
    }

    fn discard_piece_at(&mut self, sq: Square, piece: Piece) {
        self.occupied.toggle(sq);
        self.by_color.get_mut(piece.color).toggle(sq);
        self.by_role.get_mut(piece.role).toggle(sq);
    }

    /// Squares attacked by the piece on `sq`, or an empty set.
    pub fn attacks_from(&self, sq: Square) -> Bitboard {
        self.piece_at(sq)
            .map_or(Bitboard::EMPTY, |piece| {
                attacks::attacks(sq, piece, self.occupied)
            })
    }

    /// Pieces of `attacker` that attack `sq`, given the occupancy
    /// `occupied`.
    ///
    /// Each capture pattern is cast outward from `sq` and intersected with
    /// the matching attackers. A pawn of `attacker` attacks `sq` exactly if
    /// a pawn of the other color on `sq` would attack the pawn's square.
    pub fn attacks_to(&self, sq: Square, attacker: Color, occupied: Bitboard) -> Bitboard {
        self.by_color(attacker)
            & ((attacks::rook_attacks(sq, occupied) & self.rooks_and_queens())
                | (attacks::bishop_attacks(sq, occupied) & self.bishops_and_queens())
                | (attacks::knight_attacks(sq) & self.by_role.knight)
                | (attacks::king_attacks(sq) & self.by_role.king)
                | (attacks::pawn_attacks(!attacker, sq) & self.by_role.pawn))
    }

    /// Iterates over all pieces, in ascending square order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.occupied
            .into_iter()
            .filter_map(move |sq| self.piece_at(sq).map(|piece| (sq, piece)))
    }
}

impl Default for Board {
    fn default() -> Board {
        Board::new()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::ALL.into_iter().rev() {
            for file in File::ALL {
                let square = Square::from_coords(file, rank);
                f.write_char(self.piece_at(square).map_or('.', Piece::char))?;
                f.write_char(if file < File::H { ' ' } else { '\n' })?;
            }
        }

        Ok(())
    }
}

/// Renders a diagram with coordinates, White at the bottom.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::ALL.into_iter().rev() {
            write!(f, "{} ", rank.char())?;
            for file in File::ALL {
                let square = Square::from_coords(file, rank);
                write!(f, " {}", self.piece_at(square).map_or('.', Piece::char))?;
            }
            f.write_char('\n')?;
        }
        f.write_str("  ")?;
        for file in File::ALL {
            write!(f, " {}", file.char())?;
        }
        f.write_char('\n')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_position() {
        let board = Board::new();
        assert_eq!(board.occupied().count(), 32);
        assert_eq!(board.king_of(Color::White), Some(Square::E1));
        assert_eq!(board.king_of(Color::Black), Some(Square::E8));
        assert_eq!(board.piece_at(Square::D1), Some(Color::White.queen()));
        assert_eq!(board.piece_at(Square::B8), Some(Color::Black.knight()));
        assert_eq!(board.pieces().count(), 32);
    }

    #[test]
    fn test_set_and_remove() {
        let mut board = Board::empty();
        board.set_piece_at(Square::D4, Color::White.queen());
        board.set_piece_at(Square::D4, Color::Black.rook());
        assert_eq!(board.piece_at(Square::D4), Some(Color::Black.rook()));
        assert_eq!(board.occupied().count(), 1);
        assert!(board.by_role(Role::Queen).is_empty());
        assert_eq!(board.remove_piece_at(Square::D4), Some(Color::Black.rook()));
        assert_eq!(board, Board::empty());
        assert_eq!(board.remove_piece_at(Square::D4), None);
    }

    #[test]
    fn test_attacks_to() {
        let board = Board::new();
        let attackers = board.attacks_to(Square::F3, Color::White, board.occupied());
        // e2 and g2 pawns, g1 knight
        assert_eq!(attackers.count(), 3);
        assert!(attackers.contains(Square::G1));
        assert!(board
            .attacks_to(Square::E4, Color::White, board.occupied())
            .is_empty());
        assert_eq!(
            board.attacks_to(Square::F6, Color::Black, board.occupied()).count(),
            3
        );
    }

    #[test]
    fn test_display() {
        let diagram = Board::new().to_string();
        assert!(diagram.starts_with("8  r n b q k b n r\n"));
        assert!(diagram.ends_with("   a b c d e f g h\n"));
    }
}
