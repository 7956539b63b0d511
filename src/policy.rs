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

//! Move selection for automated players.

use rand::Rng;

use crate::{Chess, Move};

/// Chooses a move for the side to move.
pub trait Policy {
    /// Returns one of `pos.legal_moves()`, or `None` if and only if there
    /// are no legal moves.
    fn choose(&mut self, pos: &Chess) -> Option<Move>;
}

impl<P: Policy + ?Sized> Policy for &mut P {
    fn choose(&mut self, pos: &Chess) -> Option<Move> {
        (**self).choose(pos)
    }
}

/// Picks a legal move uniformly at random.
///
/// Moves are drawn from the deterministic generation order, so a seeded
/// generator replays the same game.
///
/// # Examples
///
/// ```
/// use chesscore::{Chess, Policy, RandomPolicy};
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let pos = Chess::default();
/// let mut a = RandomPolicy::new(StdRng::seed_from_u64(7));
/// let mut b = RandomPolicy::new(StdRng::seed_from_u64(7));
/// assert_eq!(a.choose(&pos), b.choose(&pos));
/// ```
#[derive(Debug, Clone)]
pub struct RandomPolicy<R> {
    rng: R,
}

impl<R: Rng> RandomPolicy<R> {
    pub fn new(rng: R) -> RandomPolicy<R> {
        RandomPolicy { rng }
    }

    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl<R: Rng> Policy for RandomPolicy<R> {
    fn choose(&mut self, pos: &Chess) -> Option<Move> {
        let moves = pos.legal_moves();
        if moves.is_empty() {
            None
        } else {
            Some(moves[self.rng.random_range(0..moves.len())])
        }
    }
}

/// Always plays the first legal move in generation order.
#[derive(Debug, Clone, Default)]
pub struct FirstMovePolicy;

impl Policy for FirstMovePolicy {
    fn choose(&mut self, pos: &Chess) -> Option<Move> {
        pos.legal_moves().first().copied()
    }
}
