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

use std::{error::Error, fmt, str::FromStr};

/// Error when a square is referenced by out of range coordinates or by an
/// unparsable name.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MalformedSquareError;

impl fmt::Display for MalformedSquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("malformed square")
    }
}

impl Error for MalformedSquareError {}

macro_rules! coord_enum {
    ($(#[$meta:meta])* $name:ident, $offset:expr, [$($variant:ident = $value:expr),+ $(,)?]) => {
        $(#[$meta])*
        #[allow(missing_docs)]
        #[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
        #[repr(u8)]
        pub enum $name {
            $($variant = $value),+
        }

        impl $name {
            /// Gets the coordinate from its zero-based index.
            ///
            /// # Panics
            ///
            /// Panics if the index is not in the range `0..=7`.
            #[track_caller]
            pub const fn new(index: u32) -> $name {
                match $name::try_new(index) {
                    Some(coord) => coord,
                    None => panic!("coordinate out of range"),
                }
            }

            pub const fn try_new(index: u32) -> Option<$name> {
                match index {
                    $($value => Some($name::$variant),)+
                    _ => None,
                }
            }

            pub const fn from_char(ch: char) -> Option<$name> {
                if ch as u32 >= $offset as u32 {
                    $name::try_new(ch as u32 - $offset as u32)
                } else {
                    None
                }
            }

            pub const fn char(self) -> char {
                (self as u8 + $offset as u8) as char
            }

            #[inline]
            pub const fn to_u32(self) -> u32 {
                self as u32
            }

            /// Moves by `delta`, or `None` when leaving the board.
            #[inline]
            pub const fn offset(self, delta: i32) -> Option<$name> {
                let index = self as i32 + delta;
                if index < 0 {
                    None
                } else {
                    $name::try_new(index as u32)
                }
            }

            pub const ALL: [$name; 8] = [$($name::$variant),+];
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.char())
            }
        }

        impl TryFrom<u32> for $name {
            type Error = MalformedSquareError;

            fn try_from(index: u32) -> Result<$name, MalformedSquareError> {
                $name::try_new(index).ok_or(MalformedSquareError)
            }
        }
    }
}

coord_enum! {
    /// A file of the chessboard, `a` to `h`.
    File, 'a', [A = 0, B = 1, C = 2, D = 3, E = 4, F = 5, G = 6, H = 7]
}

coord_enum! {
    /// A rank of the chessboard, `1` to `8`.
    Rank, '1', [First = 0, Second = 1, Third = 2, Fourth = 3, Fifth = 4, Sixth = 5, Seventh = 6, Eighth = 7]
}

/// A square of the chessboard, indexed from `A1 = 0` to `H8 = 63`.
///
/// # Examples
///
/// ```
/// use chesscore::{File, Rank, Square};
///
/// let sq: Square = "e4".parse()?;
/// assert_eq!(sq, Square::E4);
/// assert_eq!(sq.file(), File::E);
/// assert_eq!(sq.rank(), Rank::Fourth);
/// assert_eq!(u32::from(sq), 28);
/// # Ok::<_, chesscore::MalformedSquareError>(())
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Square(u8);

impl Square {
    /// Gets the square from its index.
    ///
    /// # Panics
    ///
    /// Panics if the index is not in the range `0..=63`.
    #[track_caller]
    pub const fn new(index: u32) -> Square {
        assert!(index < 64, "square index out of range");
        Square(index as u8)
    }

    pub const fn try_new(index: u32) -> Option<Square> {
        if index < 64 {
            Some(Square(index as u8))
        } else {
            None
        }
    }

    #[inline]
    pub const fn from_coords(file: File, rank: Rank) -> Square {
        Square(file as u8 | (rank as u8) << 3)
    }

    /// Gets the square at zero-based file and rank coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedSquareError`] if either coordinate is outside
    /// `0..=7`.
    ///
    /// # Examples
    ///
    /// ```
    /// use chesscore::Square;
    ///
    /// assert_eq!(Square::try_from_coords(4, 3), Ok(Square::E4));
    /// assert!(Square::try_from_coords(8, 0).is_err());
    /// assert!(Square::try_from_coords(0, -1).is_err());
    /// ```
    pub fn try_from_coords(file: i32, rank: i32) -> Result<Square, MalformedSquareError> {
        let file = u32::try_from(file)
            .ok()
            .and_then(File::try_new)
            .ok_or(MalformedSquareError)?;
        let rank = u32::try_from(rank)
            .ok()
            .and_then(Rank::try_new)
            .ok_or(MalformedSquareError)?;
        Ok(Square::from_coords(file, rank))
    }

    /// Parses a square name like `e4`.
    pub fn from_ascii(s: &[u8]) -> Result<Square, MalformedSquareError> {
        match *s {
            [file, rank] => match (
                File::from_char(char::from(file)),
                Rank::from_char(char::from(rank)),
            ) {
                (Some(file), Some(rank)) => Ok(Square::from_coords(file, rank)),
                _ => Err(MalformedSquareError),
            },
            _ => Err(MalformedSquareError),
        }
    }

    #[inline]
    pub const fn file(self) -> File {
        File::new((self.0 & 7) as u32)
    }

    #[inline]
    pub const fn rank(self) -> Rank {
        Rank::new((self.0 >> 3) as u32)
    }

    #[inline]
    pub const fn to_u32(self) -> u32 {
        self.0 as u32
    }

    #[inline]
    pub const fn to_usize(self) -> usize {
        self.0 as usize
    }

    /// Moves by a raw index delta, or `None` when leaving `0..=63`. Does
    /// not detect wrapping around the board edge.
    #[inline]
    pub const fn offset(self, delta: i32) -> Option<Square> {
        let index = self.0 as i32 + delta;
        if index < 0 {
            None
        } else {
            Square::try_new(index as u32)
        }
    }

    /// Combines the file of this square with the rank of another.
    #[must_use]
    #[inline]
    pub const fn with_rank_of(self, other: Square) -> Square {
        Square::from_coords(self.file(), other.rank())
    }

    /// All 64 squares, `A1` to `H8`.
    pub fn all() -> impl DoubleEndedIterator<Item = Square> + ExactSizeIterator {
        (0..64).map(Square::new)
    }
}

macro_rules! square_consts {
    ($($name:ident = $index:expr),+ $(,)?) => {
        impl Square {
            $(pub const $name: Square = Square($index);)+
        }
    }
}

square_consts! {
    A1 = 0, B1 = 1, C1 = 2, D1 = 3, E1 = 4, F1 = 5, G1 = 6, H1 = 7,
    A2 = 8, B2 = 9, C2 = 10, D2 = 11, E2 = 12, F2 = 13, G2 = 14, H2 = 15,
    A3 = 16, B3 = 17, C3 = 18, D3 = 19, E3 = 20, F3 = 21, G3 = 22, H3 = 23,
    A4 = 24, B4 = 25, C4 = 26, D4 = 27, E4 = 28, F4 = 29, G4 = 30, H4 = 31,
    A5 = 32, B5 = 33, C5 = 34, D5 = 35, E5 = 36, F5 = 37, G5 = 38, H5 = 39,
    A6 = 40, B6 = 41, C6 = 42, D6 = 43, E6 = 44, F6 = 45, G6 = 46, H6 = 47,
    A7 = 48, B7 = 49, C7 = 50, D7 = 51, E7 = 52, F7 = 53, G7 = 54, H7 = 55,
    A8 = 56, B8 = 57, C8 = 58, D8 = 59, E8 = 60, F8 = 61, G8 = 62, H8 = 63,
}

impl From<Square> for u32 {
    #[inline]
    fn from(sq: Square) -> u32 {
        sq.to_u32()
    }
}

impl From<Square> for usize {
    #[inline]
    fn from(sq: Square) -> usize {
        sq.to_usize()
    }
}

impl TryFrom<u32> for Square {
    type Error = MalformedSquareError;

    fn try_from(index: u32) -> Result<Square, MalformedSquareError> {
        Square::try_new(index).ok_or(MalformedSquareError)
    }
}

impl FromStr for Square {
    type Err = MalformedSquareError;

    fn from_str(s: &str) -> Result<Square, MalformedSquareError> {
        Square::from_ascii(s.as_bytes())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file().char(), self.rank().char())
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            self.file().char().to_ascii_uppercase(),
            self.rank().char()
        )
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Square {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Square {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Square, D::Error> {
        let name = <&str>::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square() {
        for file in File::ALL {
            for rank in Rank::ALL {
                let square = Square::from_coords(file, rank);
                assert_eq!(square.file(), file);
                assert_eq!(square.rank(), rank);
            }
        }
    }

    #[test]
    fn test_parse() {
        assert_eq!("a1".parse::<Square>(), Ok(Square::A1));
        assert_eq!("h8".parse::<Square>(), Ok(Square::H8));
        assert_eq!("i1".parse::<Square>(), Err(MalformedSquareError));
        assert_eq!("a9".parse::<Square>(), Err(MalformedSquareError));
        assert_eq!("a".parse::<Square>(), Err(MalformedSquareError));
        assert_eq!("a1 ".parse::<Square>(), Err(MalformedSquareError));
        assert_eq!(Square::G7.to_string(), "g7");
    }

    #[test]
    fn test_malformed_coords() {
        assert_eq!(Square::try_from_coords(7, 7), Ok(Square::H8));
        assert_eq!(Square::try_from_coords(-1, 0), Err(MalformedSquareError));
        assert_eq!(Square::try_from_coords(0, 8), Err(MalformedSquareError));
        assert_eq!(Square::try_from(64), Err(MalformedSquareError));
    }

    #[test]
    fn test_offset() {
        assert_eq!(Square::E2.offset(16), Some(Square::E4));
        assert_eq!(Square::H8.offset(8), None);
        assert_eq!(Square::A1.offset(-1), None);
    }
}
