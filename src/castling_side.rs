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

use std::fmt;

use bitflags::bitflags;

use crate::{Bitboard, Color, File, Square};

/// `KingSide` (O-O) or `QueenSide` (O-O-O).
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum CastlingSide {
    KingSide,
    QueenSide,
}

impl CastlingSide {
    /// File of the rook before castling.
    pub const fn rook_from_file(self) -> File {
        match self {
            CastlingSide::KingSide => File::H,
            CastlingSide::QueenSide => File::A,
        }
    }

    pub const fn king_to_file(self) -> File {
        match self {
            CastlingSide::KingSide => File::G,
            CastlingSide::QueenSide => File::C,
        }
    }

    pub const fn rook_to_file(self) -> File {
        match self {
            CastlingSide::KingSide => File::F,
            CastlingSide::QueenSide => File::D,
        }
    }

    /// Home square of the king, `e1` or `e8`.
    pub const fn king_from(color: Color) -> Square {
        Square::from_coords(File::E, color.backrank())
    }

    pub const fn rook_from(self, color: Color) -> Square {
        Square::from_coords(self.rook_from_file(), color.backrank())
    }

    pub const fn king_to(self, color: Color) -> Square {
        Square::from_coords(self.king_to_file(), color.backrank())
    }

    pub const fn rook_to(self, color: Color) -> Square {
        Square::from_coords(self.rook_to_file(), color.backrank())
    }

    /// Squares strictly between king and rook, which must be empty.
    pub fn path(self, color: Color) -> Bitboard {
        let rank = Bitboard::backrank(color);
        let files = match self {
            CastlingSide::KingSide => Bitboard::from(File::F) | Bitboard::from(File::G),
            CastlingSide::QueenSide => {
                Bitboard::from(File::B) | Bitboard::from(File::C) | Bitboard::from(File::D)
            }
        };
        rank & files
    }

    /// `KingSide` and `QueenSide`, in this order.
    pub const ALL: [CastlingSide; 2] = [CastlingSide::KingSide, CastlingSide::QueenSide];
}

bitflags! {
    /// Castling rights: one independent flag per color and side.
    ///
    /// Rights are only ever removed during a game.
    ///
    /// # Examples
    ///
    /// ```
    /// use chesscore::{Castles, CastlingSide, Color};
    ///
    /// let mut castles = Castles::all();
    /// castles.discard_color(Color::White);
    /// assert!(!castles.has(Color::White, CastlingSide::QueenSide));
    /// assert!(castles.has(Color::Black, CastlingSide::KingSide));
    /// assert_eq!(castles.to_string(), "kq");
    /// ```
    #[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
    pub struct Castles: u8 {
        const WHITE_KING_SIDE = 1;
        const WHITE_QUEEN_SIDE = 1 << 1;
        const BLACK_KING_SIDE = 1 << 2;
        const BLACK_QUEEN_SIDE = 1 << 3;
    }
}

impl Castles {
    pub const fn flag(color: Color, side: CastlingSide) -> Castles {
        match (color, side) {
            (Color::White, CastlingSide::KingSide) => Castles::WHITE_KING_SIDE,
            (Color::White, CastlingSide::QueenSide) => Castles::WHITE_QUEEN_SIDE,
            (Color::Black, CastlingSide::KingSide) => Castles::BLACK_KING_SIDE,
            (Color::Black, CastlingSide::QueenSide) => Castles::BLACK_QUEEN_SIDE,
        }
    }

    pub const fn color_flags(color: Color) -> Castles {
        match color {
            Color::White => Castles::WHITE_KING_SIDE.union(Castles::WHITE_QUEEN_SIDE),
            Color::Black => Castles::BLACK_KING_SIDE.union(Castles::BLACK_QUEEN_SIDE),
        }
    }

    #[inline]
    pub const fn has(self, color: Color, side: CastlingSide) -> bool {
        self.contains(Castles::flag(color, side))
    }

    #[inline]
    pub const fn has_color(self, color: Color) -> bool {
        self.intersects(Castles::color_flags(color))
    }

    pub fn discard_color(&mut self, color: Color) {
        self.remove(Castles::color_flags(color));
    }

    /// Discards the right tied to a rook home square, if `sq` is one.
    /// Called with both origin and destination of every move, which covers
    /// the rook moving away and the rook being captured.
    pub fn discard_rook(&mut self, sq: Square) {
        for color in Color::ALL {
            for side in CastlingSide::ALL {
                if side.rook_from(color) == sq {
                    self.remove(Castles::flag(color, side));
                }
            }
        }
    }

    /// Iterates over the rights held, white before black, king side first.
    pub fn iter_rights(self) -> impl Iterator<Item = (Color, CastlingSide)> {
        Color::ALL
            .into_iter()
            .flat_map(|color| CastlingSide::ALL.into_iter().map(move |side| (color, side)))
            .filter(move |&(color, side)| self.has(color, side))
    }
}

impl fmt::Display for Castles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("-");
        }
        for (color, side) in self.iter_rights() {
            let ch = match side {
                CastlingSide::KingSide => 'k',
                CastlingSide::QueenSide => 'q',
            };
            write!(f, "{}", color.fold_wb(ch.to_ascii_uppercase(), ch))?;
        }
        Ok(())
    }
}
