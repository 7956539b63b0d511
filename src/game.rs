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

//! A game session: the current position, the moves that led to it, and
//! helpers to let [policies](crate::Policy) play.
//!
//! # Examples
//!
//! ```
//! use chesscore::{game::Game, uci::UciMove, Color, GameStatus, Outcome};
//!
//! let mut game = Game::new();
//! for uci in ["f2f3", "e7e5", "g2g4", "d8h4"] {
//!     let m = uci.parse::<UciMove>()?.to_move(game.position())?;
//!     game.play(m)?;
//! }
//! assert_eq!(game.status(), GameStatus::Checkmate { winner: Color::Black });
//! assert_eq!(game.outcome().map(|o| o.to_string()).as_deref(), Some("0-1"));
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```

use std::{error::Error, fmt};

use log::{debug, info};

use crate::{
    Chess, Color, GameStatus, IllegalMoveError, Move, MoveList, Outcome, Policy, Square,
};

/// Error when a policy could not make a move.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PlayPolicyError {
    /// The game was already over. The policy was not asked.
    GameOver(Outcome),
    /// The policy declined to choose although legal moves exist.
    NoMove,
    /// The policy chose an illegal move.
    IllegalMove(IllegalMoveError),
}

impl fmt::Display for PlayPolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayPolicyError::GameOver(outcome) => write!(f, "game is already over ({outcome})"),
            PlayPolicyError::NoMove => f.write_str("policy did not choose a move"),
            PlayPolicyError::IllegalMove(err) => write!(f, "policy chose an {err}"),
        }
    }
}

impl Error for PlayPolicyError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PlayPolicyError::IllegalMove(err) => Some(err),
            _ => None,
        }
    }
}

/// How [`Game::play_out()`] ended.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Termination {
    /// Checkmate or stalemate was reached.
    Finished(Outcome),
    /// The ply limit was reached with the game still undecided.
    PlyLimit,
}

impl Termination {
    pub const fn outcome(self) -> Option<Outcome> {
        match self {
            Termination::Finished(outcome) => Some(outcome),
            Termination::PlyLimit => None,
        }
    }
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::Finished(outcome) => fmt::Display::fmt(outcome, f),
            Termination::PlyLimit => f.write_str("*"),
        }
    }
}

/// A game in progress.
#[derive(Clone, Debug, Default)]
pub struct Game {
    pos: Chess,
    history: Vec<(Chess, Move)>,
}

impl Game {
    /// Starts a game from the standard starting position.
    pub fn new() -> Game {
        Game::from_position(Chess::new())
    }

    pub fn from_position(pos: Chess) -> Game {
        Game {
            pos,
            history: Vec::new(),
        }
    }

    #[inline]
    pub fn position(&self) -> &Chess {
        &self.pos
    }

    /// The position the game started from.
    pub fn initial_position(&self) -> &Chess {
        self.history.first().map_or(&self.pos, |(before, _)| before)
    }

    pub fn turn(&self) -> Color {
        self.pos.turn()
    }

    pub fn legal_moves(&self) -> MoveList {
        self.pos.legal_moves()
    }

    pub fn legal_moves_from(&self, sq: Square) -> MoveList {
        self.pos.legal_moves_from(sq)
    }

    pub fn is_in_check(&self, color: Color) -> bool {
        self.pos.is_in_check(color)
    }

    pub fn status(&self) -> GameStatus {
        self.pos.status()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.pos.outcome()
    }

    /// Moves played so far, in order.
    pub fn moves(&self) -> impl ExactSizeIterator<Item = Move> + '_ {
        self.history.iter().map(|(_, m)| *m)
    }

    /// Number of half-moves played.
    pub fn ply(&self) -> usize {
        self.history.len()
    }

    /// Plays a legal move and returns the status of the resulting position.
    ///
    /// # Errors
    ///
    /// Returns [`IllegalMoveError`] if `m` is not legal, which includes
    /// every move once the game is over. The game is unchanged in that case.
    pub fn play(&mut self, m: Move) -> Result<GameStatus, IllegalMoveError> {
        let after = self.pos.play(m)?;
        self.history.push((self.pos, m));
        self.pos = after;

        let status = self.pos.status();
        debug!("{}. {} ({})", self.history.len(), m, status);
        if let Some(outcome) = status.outcome() {
            info!("game over after {} plies: {}", self.history.len(), outcome);
        }
        Ok(status)
    }

    /// Takes back the last move.
    pub fn undo(&mut self) -> Option<Move> {
        let (before, m) = self.history.pop()?;
        self.pos = before;
        debug!("undo {m}");
        Some(m)
    }

    /// Lets `policy` choose and play a move for the side to move.
    ///
    /// # Errors
    ///
    /// See [`PlayPolicyError`].
    pub fn play_policy<P: Policy + ?Sized>(
        &mut self,
        policy: &mut P,
    ) -> Result<Move, PlayPolicyError> {
        if let Some(outcome) = self.outcome() {
            return Err(PlayPolicyError::GameOver(outcome));
        }

        let m = policy.choose(&self.pos).ok_or(PlayPolicyError::NoMove)?;
        self.play(m).map_err(PlayPolicyError::IllegalMove)?;
        Ok(m)
    }

    /// Alternates `white` and `black` until the game ends or `max_plies`
    /// more moves have been made.
    ///
    /// # Errors
    ///
    /// Fails if a policy misbehaves, see [`PlayPolicyError`]. A game that is
    /// already over is not an error, it finishes immediately.
    pub fn play_out<W, B>(
        &mut self,
        white: &mut W,
        black: &mut B,
        max_plies: usize,
    ) -> Result<Termination, PlayPolicyError>
    where
        W: Policy + ?Sized,
        B: Policy + ?Sized,
    {
        for _ in 0..max_plies {
            if let Some(outcome) = self.outcome() {
                return Ok(Termination::Finished(outcome));
            }
            match self.turn() {
                Color::White => self.play_policy(white)?,
                Color::Black => self.play_policy(black)?,
            };
        }

        Ok(match self.outcome() {
            Some(outcome) => Termination::Finished(outcome),
            None => {
                info!("stopped after {max_plies} plies without a result");
                Termination::PlyLimit
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{policy::FirstMovePolicy, uci::UciMove};

    fn uci(game: &Game, s: &str) -> Move {
        s.parse::<UciMove>()
            .expect("valid uci")
            .to_move(game.position())
            .expect("legal move")
    }

    #[test]
    fn test_play_and_undo() {
        let mut game = Game::new();
        let e4 = uci(&game, "e2e4");
        assert_eq!(game.play(e4), Ok(GameStatus::Ongoing));
        let e5 = uci(&game, "e7e5");
        game.play(e5).expect("legal");
        assert_eq!(game.ply(), 2);
        assert_eq!(game.moves().collect::<Vec<_>>(), [e4, e5]);

        assert_eq!(game.undo(), Some(e5));
        assert_eq!(game.undo(), Some(e4));
        assert_eq!(game.undo(), None);
        assert_eq!(*game.position(), Chess::default());
    }

    #[test]
    fn test_illegal_move_leaves_game_unchanged() {
        let mut game = Game::new();
        let m = Move::normal(Square::E1, Square::E2);
        assert_eq!(game.play(m), Err(IllegalMoveError { m }));
        assert_eq!(game.ply(), 0);
        assert_eq!(*game.position(), Chess::default());
    }

    #[test]
    fn test_no_moves_after_game_over() {
        let mut game = Game::new();
        for s in ["f2f3", "e7e5", "g2g4", "d8h4"] {
            let m = uci(&game, s);
            game.play(m).expect("legal");
        }
        let any = Move::normal(Square::A2, Square::A3);
        assert!(game.play(any).is_err());
        assert_eq!(
            game.play_policy(&mut FirstMovePolicy),
            Err(PlayPolicyError::GameOver(Outcome::Decisive {
                winner: Color::Black
            }))
        );
        assert_eq!(game.initial_position(), &Chess::default());
    }

    #[test]
    fn test_play_out_ply_limit() {
        let mut game = Game::new();
        let termination = game
            .play_out(&mut FirstMovePolicy, &mut FirstMovePolicy, 6)
            .expect("well behaved policies");
        assert_eq!(termination, Termination::PlyLimit);
        assert_eq!(game.ply(), 6);
        assert_eq!(termination.to_string(), "*");
    }
}
