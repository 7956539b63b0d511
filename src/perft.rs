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

//! Count leaf nodes of the legal move tree, to validate move generation
//! against known results.

use log::trace;

use crate::{Chess, Move};

/// Counts legal move paths of exactly `depth` plies.
///
/// # Examples
///
/// ```
/// use chesscore::{perft, Chess};
///
/// let pos = Chess::default();
/// assert_eq!(perft(&pos, 1), 20);
/// assert_eq!(perft(&pos, 2), 400);
/// ```
pub fn perft(pos: &Chess, depth: u32) -> u64 {
    if depth < 1 {
        1
    } else {
        let moves = pos.legal_moves();

        if depth == 1 {
            moves.len() as u64
        } else {
            moves
                .iter()
                .map(|m| {
                    let mut child = *pos;
                    child.play_unchecked(*m);
                    perft(&child, depth - 1)
                })
                .sum()
        }
    }
}

/// Like [`perft()`], but also returns the node count below each root move,
/// in generation order.
pub fn divide(pos: &Chess, depth: u32) -> Vec<(Move, u64)> {
    if depth < 1 {
        return Vec::new();
    }

    pos.legal_moves()
        .iter()
        .map(|m| {
            let mut child = *pos;
            child.play_unchecked(*m);
            let nodes = perft(&child, depth - 1);
            trace!("{m}: {nodes}");
            (*m, nodes)
        })
        .collect()
}
