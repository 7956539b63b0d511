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

use std::{error::Error, fmt, num::NonZeroU32, str::FromStr};

use bitflags::bitflags;

use crate::{
    attacks, Bitboard, Board, Castles, CastlingSide, Color, Move, MoveKind, MoveList, Rank,
    Role, Setup, Square,
};

/// Outcome of a finished game.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Outcome {
    Decisive { winner: Color },
    Draw,
}

impl Outcome {
    pub const fn winner(self) -> Option<Color> {
        match self {
            Outcome::Decisive { winner } => Some(winner),
            Outcome::Draw => None,
        }
    }

    pub const fn from_winner(winner: Option<Color>) -> Outcome {
        match winner {
            Some(winner) => Outcome::Decisive { winner },
            None => Outcome::Draw,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Outcome::Decisive {
                winner: Color::White,
            } => "1-0",
            Outcome::Decisive {
                winner: Color::Black,
            } => "0-1",
            Outcome::Draw => "1/2-1/2",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when parsing an [`Outcome`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseOutcomeError;

impl fmt::Display for ParseOutcomeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid outcome")
    }
}

impl Error for ParseOutcomeError {}

impl FromStr for Outcome {
    type Err = ParseOutcomeError;

    fn from_str(s: &str) -> Result<Outcome, ParseOutcomeError> {
        Ok(match s {
            "1-0" => Outcome::Decisive {
                winner: Color::White,
            },
            "0-1" => Outcome::Decisive {
                winner: Color::Black,
            },
            "1/2-1/2" => Outcome::Draw,
            _ => return Err(ParseOutcomeError),
        })
    }
}

/// Classification of a position from the point of view of the side to move.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum GameStatus {
    /// The side to move has legal moves and is not in check.
    Ongoing,
    /// The given side (to move) is in check and has legal moves.
    Check(Color),
    /// The side to move is in check without a legal move.
    Checkmate { winner: Color },
    /// The side to move is not in check, but has no legal move.
    Stalemate,
}

impl GameStatus {
    /// Checkmate and stalemate end the game.
    pub const fn is_terminal(self) -> bool {
        matches!(self, GameStatus::Checkmate { .. } | GameStatus::Stalemate)
    }

    pub const fn outcome(self) -> Option<Outcome> {
        match self {
            GameStatus::Checkmate { winner } => Some(Outcome::Decisive { winner }),
            GameStatus::Stalemate => Some(Outcome::Draw),
            GameStatus::Ongoing | GameStatus::Check(_) => None,
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            GameStatus::Ongoing => f.write_str("ongoing"),
            GameStatus::Check(color) => write!(f, "{color} is in check"),
            GameStatus::Checkmate { winner } => write!(f, "checkmate, {winner} wins"),
            GameStatus::Stalemate => f.write_str("stalemate"),
        }
    }
}

/// Error when trying to play an illegal move.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IllegalMoveError {
    pub m: Move,
}

impl fmt::Display for IllegalMoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "illegal move {}", self.m)
    }
}

impl Error for IllegalMoveError {}

bitflags! {
    /// Reasons for a [`Setup`] to be rejected.
    #[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
    pub struct PositionErrorKinds: u32 {
        /// There are no pieces on the board.
        const EMPTY_BOARD = 1 << 0;
        /// A king is missing.
        const MISSING_KING = 1 << 1;
        /// A side has more than one king.
        const TOO_MANY_KINGS = 1 << 2;
        /// A side has more than 16 pieces or more than 8 pawns.
        const TOO_MUCH_MATERIAL = 1 << 3;
        /// There are pawns on the first or eighth rank.
        const PAWNS_ON_BACKRANK = 1 << 4;
        /// A castling right is held without the king and rook on their
        /// home squares.
        const INVALID_CASTLING_RIGHTS = 1 << 5;
        /// The en passant square cannot follow a double pawn push.
        const INVALID_EP_SQUARE = 1 << 6;
        /// The side not to move is in check.
        const OPPOSITE_CHECK = 1 << 7;
    }
}

/// Error when trying to create a [`Chess`] position from an invalid
/// [`Setup`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PositionError {
    errors: PositionErrorKinds,
}

impl PositionError {
    pub const fn kinds(&self) -> PositionErrorKinds {
        self.errors
    }
}

impl fmt::Display for PositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("illegal position: ")?;

        let mut reasons = Vec::new();
        if self.errors.contains(PositionErrorKinds::EMPTY_BOARD) {
            reasons.push("empty board");
        }
        if self.errors.contains(PositionErrorKinds::MISSING_KING) {
            reasons.push("missing king");
        }
        if self.errors.contains(PositionErrorKinds::TOO_MANY_KINGS) {
            reasons.push("too many kings");
        }
        if self.errors.contains(PositionErrorKinds::TOO_MUCH_MATERIAL) {
            reasons.push("too much material");
        }
        if self.errors.contains(PositionErrorKinds::PAWNS_ON_BACKRANK) {
            reasons.push("pawns on backrank");
        }
        if self.errors.contains(PositionErrorKinds::INVALID_CASTLING_RIGHTS) {
            reasons.push("invalid castling rights");
        }
        if self.errors.contains(PositionErrorKinds::INVALID_EP_SQUARE) {
            reasons.push("invalid en passant square");
        }
        if self.errors.contains(PositionErrorKinds::OPPOSITE_CHECK) {
            reasons.push("opposite check");
        }

        f.write_str(&reasons.join(", "))
    }
}

impl Error for PositionError {}

/// A standard chess position: piece placement plus side to move, castling
/// rights, en passant square and move counters.
///
/// Positions are small `Copy` values. Legality of a candidate move is
/// decided by playing it on a copy and checking whether the mover's king is
/// attacked afterwards.
///
/// Castling is generated whenever the right is held and the squares between
/// king and rook are empty. Only the king's destination is tested for
/// attacks (by the legality filter), so castling out of or through check is
/// accepted.
///
/// # Examples
///
/// ```
/// use chesscore::{Chess, GameStatus, Move, MoveKind, Square};
///
/// let mut pos = Chess::default();
/// assert_eq!(pos.legal_moves().len(), 20);
///
/// let e4 = Move::new(Square::E2, Square::E4, MoveKind::DoublePawnPush);
/// assert!(pos.is_legal(e4));
/// pos.play_unchecked(e4);
/// assert_eq!(pos.ep_square(), Some(Square::E3));
/// assert_eq!(pos.status(), GameStatus::Ongoing);
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Chess {
    board: Board,
    turn: Color,
    castles: Castles,
    ep_square: Option<Square>,
    halfmoves: u32,
    fullmoves: NonZeroU32,
}

impl Default for Chess {
    fn default() -> Chess {
        Chess::new()
    }
}

impl Chess {
    /// The standard starting position.
    pub const fn new() -> Chess {
        Chess {
            board: Board::new(),
            turn: Color::White,
            castles: Castles::all(),
            ep_square: None,
            halfmoves: 0,
            fullmoves: NonZeroU32::MIN,
        }
    }

    /// Validates a [`Setup`] and constructs a position.
    ///
    /// # Errors
    ///
    /// Returns [`PositionError`] listing every reason the setup is not a
    /// playable position.
    pub fn from_setup(setup: Setup) -> Result<Chess, PositionError> {
        let pos = Chess {
            board: setup.board,
            turn: setup.turn,
            castles: setup.castles,
            ep_square: setup.ep_square,
            halfmoves: setup.halfmoves,
            fullmoves: setup.fullmoves,
        };

        let errors = pos.validate();
        if errors.is_empty() {
            Ok(pos)
        } else {
            Err(PositionError { errors })
        }
    }

    pub fn to_setup(&self) -> Setup {
        Setup {
            board: self.board,
            turn: self.turn,
            castles: self.castles,
            ep_square: self.ep_square,
            halfmoves: self.halfmoves,
            fullmoves: self.fullmoves,
        }
    }

    #[inline]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Side to move.
    #[inline]
    pub const fn turn(&self) -> Color {
        self.turn
    }

    #[inline]
    pub const fn castles(&self) -> Castles {
        self.castles
    }

    /// En passant target square, set only directly after a double pawn
    /// push.
    #[inline]
    pub const fn ep_square(&self) -> Option<Square> {
        self.ep_square
    }

    /// Half-moves since the last capture or pawn move.
    #[inline]
    pub const fn halfmoves(&self) -> u32 {
        self.halfmoves
    }

    #[inline]
    pub const fn fullmoves(&self) -> NonZeroU32 {
        self.fullmoves
    }

    #[inline]
    pub fn us(&self) -> Bitboard {
        self.board.by_color(self.turn)
    }

    #[inline]
    pub fn them(&self) -> Bitboard {
        self.board.by_color(!self.turn)
    }

    #[inline]
    pub fn our(&self, role: Role) -> Bitboard {
        self.us() & self.board.by_role(role)
    }

    #[inline]
    pub fn their(&self, role: Role) -> Bitboard {
        self.them() & self.board.by_role(role)
    }

    /// Tests if any piece of `by` could capture on `sq`, ignoring pins and
    /// checks.
    pub fn is_attacked(&self, sq: Square, by: Color) -> bool {
        self.board
            .attacks_to(sq, by, self.board.occupied())
            .any()
    }

    /// Tests if the king of `color` is attacked.
    pub fn is_in_check(&self, color: Color) -> bool {
        self.board
            .king_of(color)
            .is_some_and(|king| self.is_attacked(king, !color))
    }

    /// Tests if the side to move is in check.
    pub fn is_check(&self) -> bool {
        self.is_in_check(self.turn)
    }

    /// Pieces giving check to the side to move.
    pub fn checkers(&self) -> Bitboard {
        self.board
            .king_of(self.turn)
            .map_or(Bitboard::EMPTY, |king| {
                self.board
                    .attacks_to(king, !self.turn, self.board.occupied())
            })
    }

    /// Generates moves that obey piece geometry and occupancy, but may leave
    /// the own king in check.
    ///
    /// Pieces are visited in ascending square order, and the targets of each
    /// piece in ascending square order as well.
    pub fn pseudo_legal_moves(&self) -> MoveList {
        let mut moves = MoveList::new();

        for from in self.us() {
            let Some(role) = self.board.role_at(from) else {
                continue;
            };

            let occupied = self.board.occupied();
            match role {
                Role::Pawn => self.gen_pawn_moves(from, &mut moves),
                Role::Knight => self.push_targets(from, attacks::knight_attacks(from), &mut moves),
                Role::Bishop => {
                    self.push_targets(from, attacks::bishop_attacks(from, occupied), &mut moves)
                }
                Role::Rook => {
                    self.push_targets(from, attacks::rook_attacks(from, occupied), &mut moves)
                }
                Role::Queen => {
                    self.push_targets(from, attacks::queen_attacks(from, occupied), &mut moves)
                }
                Role::King => {
                    self.push_targets(from, attacks::king_attacks(from), &mut moves);
                    self.gen_castling_moves(from, &mut moves);
                }
            }
        }

        moves
    }

    /// Generates all legal moves.
    pub fn legal_moves(&self) -> MoveList {
        let mut moves = self.pseudo_legal_moves();
        moves.retain(|m| self.is_safe(*m));
        moves
    }

    /// Generates the legal moves of the piece on `from`. Empty if there is
    /// no piece of the side to move.
    pub fn legal_moves_from(&self, from: Square) -> MoveList {
        let mut moves = self.legal_moves();
        moves.retain(|m| m.from == from);
        moves
    }

    /// Tests a move for legality.
    pub fn is_legal(&self, m: Move) -> bool {
        self.legal_moves().contains(&m)
    }

    /// Validates and plays a move.
    ///
    /// # Errors
    ///
    /// Returns [`IllegalMoveError`] if `m` is not one of
    /// [`Chess::legal_moves()`]. The position is left untouched in that
    /// case.
    pub fn play(mut self, m: Move) -> Result<Chess, IllegalMoveError> {
        if self.is_legal(m) {
            self.play_unchecked(m);
            Ok(self)
        } else {
            Err(IllegalMoveError { m })
        }
    }

    /// Plays a move without checking legality.
    ///
    /// The move must be one of [`Chess::legal_moves()`] for this position.
    /// Playing any other move leaves the position in an unspecified (but
    /// memory safe) state.
    pub fn play_unchecked(&mut self, m: Move) {
        let color = self.turn;

        let Some(piece) = self.board.remove_piece_at(m.from) else {
            return;
        };
        let capture = self.board.remove_piece_at(m.to);

        self.ep_square = None;

        match m.kind {
            MoveKind::Normal => self.board.set_piece_at(m.to, piece),
            MoveKind::DoublePawnPush => {
                self.board.set_piece_at(m.to, piece);
                self.ep_square = m.from.offset(color.forward());
            }
            MoveKind::EnPassant => {
                if let Some(victim) = m.en_passant_victim() {
                    self.board.remove_piece_at(victim);
                }
                self.board.set_piece_at(m.to, piece);
            }
            MoveKind::CastleKingSide | MoveKind::CastleQueenSide => {
                self.board.set_piece_at(m.to, piece);
                if let Some(side) = m.castling_side() {
                    if let Some(rook) = self.board.remove_piece_at(side.rook_from(color)) {
                        self.board.set_piece_at(side.rook_to(color), rook);
                    }
                }
            }
            MoveKind::Promotion(role) => self.board.set_piece_at(m.to, role.of(color)),
        }

        if piece.role == Role::King {
            self.castles.discard_color(color);
        }
        self.castles.discard_rook(m.from);
        self.castles.discard_rook(m.to);

        if piece.role == Role::Pawn || capture.is_some() {
            self.halfmoves = 0;
        } else {
            self.halfmoves = self.halfmoves.saturating_add(1);
        }

        if color.is_black() {
            self.fullmoves = self.fullmoves.saturating_add(1);
        }

        self.turn = !color;
    }

    /// Classifies the position for the side to move.
    pub fn status(&self) -> GameStatus {
        let has_moves = !self.legal_moves().is_empty();
        match (has_moves, self.is_check()) {
            (true, false) => GameStatus::Ongoing,
            (true, true) => GameStatus::Check(self.turn),
            (false, true) => GameStatus::Checkmate { winner: !self.turn },
            (false, false) => GameStatus::Stalemate,
        }
    }

    /// The outcome if the game is over, `None` otherwise.
    pub fn outcome(&self) -> Option<Outcome> {
        self.status().outcome()
    }

    pub fn is_checkmate(&self) -> bool {
        matches!(self.status(), GameStatus::Checkmate { .. })
    }

    pub fn is_stalemate(&self) -> bool {
        self.status() == GameStatus::Stalemate
    }

    pub fn is_game_over(&self) -> bool {
        self.legal_moves().is_empty()
    }

    fn is_safe(&self, m: Move) -> bool {
        let mut after = *self;
        after.play_unchecked(m);
        !after.is_in_check(self.turn)
    }

    fn push_targets(&self, from: Square, targets: Bitboard, moves: &mut MoveList) {
        for to in targets & !self.us() {
            moves.push(Move::normal(from, to));
        }
    }

    fn gen_pawn_moves(&self, from: Square, moves: &mut MoveList) {
        let forward = self.turn.forward();
        let occupied = self.board.occupied();

        if let Some(to) = from.offset(forward).filter(|to| !occupied.contains(*to)) {
            push_pawn_moves(moves, self.turn, from, to);

            if from.rank() == self.turn.pawn_start_rank() {
                if let Some(double) = to.offset(forward).filter(|sq| !occupied.contains(*sq)) {
                    moves.push(Move::new(from, double, MoveKind::DoublePawnPush));
                }
            }
        }

        for to in attacks::pawn_attacks(self.turn, from) {
            if self.them().contains(to) {
                push_pawn_moves(moves, self.turn, from, to);
            } else if self.ep_square == Some(to) {
                moves.push(Move::new(from, to, MoveKind::EnPassant));
            }
        }
    }

    fn gen_castling_moves(&self, king: Square, moves: &mut MoveList) {
        if king != CastlingSide::king_from(self.turn) {
            return;
        }

        for side in CastlingSide::ALL {
            if !self.castles.has(self.turn, side)
                || self.board.piece_at(side.rook_from(self.turn)) != Some(self.turn.rook())
                || (self.board.occupied() & side.path(self.turn)).any()
            {
                continue;
            }

            moves.push(Move::new(
                king,
                side.king_to(self.turn),
                MoveKind::castle(side),
            ));
        }
    }

    fn validate(&self) -> PositionErrorKinds {
        let mut errors = PositionErrorKinds::empty();

        if self.board.occupied().is_empty() {
            errors |= PositionErrorKinds::EMPTY_BOARD;
        }

        for color in Color::ALL {
            let kings = self.board.by_piece(color.king());
            if kings.is_empty() {
                errors |= PositionErrorKinds::MISSING_KING;
            } else if kings.more_than_one() {
                errors |= PositionErrorKinds::TOO_MANY_KINGS;
            }

            if self.board.by_color(color).count() > 16
                || self.board.by_piece(color.pawn()).count() > 8
            {
                errors |= PositionErrorKinds::TOO_MUCH_MATERIAL;
            }
        }

        let backranks = Bitboard::from(Rank::First) | Bitboard::from(Rank::Eighth);
        if (self.board.pawns() & backranks).any() {
            errors |= PositionErrorKinds::PAWNS_ON_BACKRANK;
        }

        for (color, side) in self.castles.iter_rights() {
            if self.board.king_of(color) != Some(CastlingSide::king_from(color))
                || self.board.piece_at(side.rook_from(color)) != Some(color.rook())
            {
                errors |= PositionErrorKinds::INVALID_CASTLING_RIGHTS;
            }
        }

        if let Some(ep_square) = self.ep_square {
            if !self.is_valid_ep_square(ep_square) {
                errors |= PositionErrorKinds::INVALID_EP_SQUARE;
            }
        }

        if !errors.intersects(PositionErrorKinds::MISSING_KING | PositionErrorKinds::TOO_MANY_KINGS)
            && self.is_in_check(!self.turn)
        {
            errors |= PositionErrorKinds::OPPOSITE_CHECK;
        }

        errors
    }

    /// The last move must have been a double push of an opponent pawn over
    /// `ep_square`.
    fn is_valid_ep_square(&self, ep_square: Square) -> bool {
        if ep_square.rank() != self.turn.fold_wb(Rank::Sixth, Rank::Third) {
            return false;
        }

        let them = !self.turn;

        let (Some(pushed_to), Some(pushed_from)) = (
            ep_square.offset(them.forward()),
            ep_square.offset(-them.forward()),
        ) else {
            return false;
        };

        self.board.piece_at(pushed_to) == Some(them.pawn())
            && !self.board.occupied().contains(ep_square)
            && !self.board.occupied().contains(pushed_from)
    }
}

fn push_pawn_moves(moves: &mut MoveList, color: Color, from: Square, to: Square) {
    if to.rank() == color.promotion_rank() {
        for role in Role::PROMOTIONS {
            moves.push(Move::new(from, to, MoveKind::Promotion(role)));
        }
    } else {
        moves.push(Move::normal(from, to));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::Fen;

    fn setup_fen(fen: &str) -> Chess {
        fen.parse::<Fen>()
            .expect("valid fen")
            .into_position()
            .expect("legal position")
    }

    fn play_uci(pos: &mut Chess, uci: &str) {
        let m = pos
            .legal_moves()
            .into_iter()
            .find(|m| m.to_string() == uci)
            .unwrap_or_else(|| panic!("{uci} is not legal"));
        pos.play_unchecked(m);
    }

    #[test]
    fn test_initial_mobility() {
        let pos = Chess::default();
        assert_eq!(pos.pseudo_legal_moves().len(), 20);
        assert_eq!(pos.legal_moves().len(), 20);
        assert_eq!(pos.status(), GameStatus::Ongoing);
        assert!(!pos.is_game_over());
    }

    #[test]
    fn test_generation_order_is_stable() {
        let pos = Chess::default();
        let moves = pos.legal_moves();
        assert_eq!(moves[0], Move::normal(Square::B1, Square::A3));
        assert_eq!(moves[1], Move::normal(Square::B1, Square::C3));
        assert_eq!(moves[2], Move::normal(Square::G1, Square::F3));
        assert_eq!(moves[3], Move::normal(Square::G1, Square::H3));
        assert_eq!(moves[4], Move::normal(Square::A2, Square::A3));
        assert_eq!(
            moves[5],
            Move::new(Square::A2, Square::A4, MoveKind::DoublePawnPush)
        );
        assert_eq!(moves, Chess::default().legal_moves());
    }

    #[test]
    fn test_fools_mate() {
        let mut pos = Chess::default();
        for uci in ["f2f3", "e7e5", "g2g4", "d8h4"] {
            play_uci(&mut pos, uci);
        }
        assert!(pos.legal_moves().is_empty());
        assert!(pos.is_check());
        assert!(pos.is_game_over());
        assert!(pos.is_checkmate());
        assert_eq!(
            pos.status(),
            GameStatus::Checkmate {
                winner: Color::Black
            }
        );
        assert_eq!(pos.outcome().map(|o| o.to_string()).as_deref(), Some("0-1"));
    }

    #[test]
    fn test_stalemate() {
        let pos = setup_fen("8/8/8/8/8/kq6/8/K7 w - - 0 1");
        assert!(pos.legal_moves().is_empty());
        assert!(!pos.is_check());
        assert_eq!(pos.status(), GameStatus::Stalemate);
        assert!(pos.is_game_over());
        assert!(pos.is_stalemate());
        assert_eq!(pos.outcome(), Some(Outcome::Draw));
    }

    #[test]
    fn test_check_status() {
        let mut pos = Chess::default();
        for uci in ["e2e4", "f7f6", "d1h5"] {
            play_uci(&mut pos, uci);
        }
        assert_eq!(pos.status(), GameStatus::Check(Color::Black));
        assert_eq!(pos.checkers(), Bitboard::from(Square::H5));
        assert_eq!(
            pos.legal_moves().into_iter().map(|m| m.to_string()).collect::<Vec<_>>(),
            ["g7g6"]
        );
    }

    #[test]
    fn test_en_passant_window() {
        let mut pos = Chess::default();
        for uci in ["e2e4", "a7a6", "e4e5"] {
            play_uci(&mut pos, uci);
        }
        let ep = Move::new(Square::E5, Square::D6, MoveKind::EnPassant);
        assert_eq!(pos.ep_square(), None);
        assert!(!pos.is_legal(ep));

        play_uci(&mut pos, "d7d5");
        assert_eq!(pos.ep_square(), Some(Square::D6));
        assert!(pos.is_legal(ep));

        let mut taken = pos;
        taken.play_unchecked(ep);
        assert_eq!(taken.board().piece_at(Square::D5), None);
        assert_eq!(taken.board().piece_at(Square::D6), Some(Color::White.pawn()));
        assert_eq!(taken.halfmoves(), 0);

        // Window closes after any other move.
        play_uci(&mut pos, "h2h3");
        play_uci(&mut pos, "h7h6");
        assert_eq!(pos.ep_square(), None);
        assert!(!pos.is_legal(ep));
        assert!(!pos.legal_moves().iter().any(|m| m.is_en_passant()));
    }

    #[test]
    fn test_en_passant_not_after_single_steps() {
        let mut pos = Chess::default();
        for uci in ["e2e4", "d7d6", "e4e5", "d6d5"] {
            play_uci(&mut pos, uci);
        }
        assert_eq!(pos.ep_square(), None);
        assert!(!pos.legal_moves().iter().any(|m| m.is_en_passant()));
    }

    #[test]
    fn test_en_passant_discovered_check() {
        // Capturing en passant would expose the king on the fifth rank.
        let pos = setup_fen("8/8/8/K2pP2r/8/8/8/7k w - d6 0 2");
        assert!(pos
            .pseudo_legal_moves()
            .iter()
            .any(|m| m.is_en_passant()));
        assert!(!pos.legal_moves().iter().any(|m| m.is_en_passant()));
    }

    #[test]
    fn test_promotion_completeness() {
        let pos = setup_fen("8/4P3/8/8/8/k7/8/K7 w - - 0 1");
        let moves = pos.legal_moves_from(Square::E7);
        assert_eq!(moves.len(), 4);
        for role in Role::PROMOTIONS {
            assert!(moves.contains(&Move::new(Square::E7, Square::E8, MoveKind::Promotion(role))));
        }

        let mut after = pos;
        after.play_unchecked(Move::new(
            Square::E7,
            Square::E8,
            MoveKind::Promotion(Role::Knight),
        ));
        assert_eq!(after.board().piece_at(Square::E8), Some(Color::White.knight()));
    }

    #[test]
    fn test_promotion_with_capture() {
        let pos = setup_fen("3rr3/4P3/8/8/8/k7/8/K7 w - - 0 1");
        let moves = pos.legal_moves_from(Square::E7);
        // Push blocked, capture on d8 only.
        assert_eq!(moves.len(), 4);
        assert!(moves.iter().all(|m| m.to == Square::D8 && m.is_promotion()));
    }

    #[test]
    fn test_castling_moves_rook() {
        let mut pos = setup_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let castles: Vec<Move> = pos
            .legal_moves()
            .into_iter()
            .filter(|m| m.is_castle())
            .collect();
        assert_eq!(castles.len(), 2);

        pos.play_unchecked(Move::new(Square::E1, Square::C1, MoveKind::CastleQueenSide));
        assert_eq!(pos.board().piece_at(Square::C1), Some(Color::White.king()));
        assert_eq!(pos.board().piece_at(Square::D1), Some(Color::White.rook()));
        assert_eq!(pos.board().piece_at(Square::A1), None);
        assert!(!pos.castles().has_color(Color::White));
        assert!(pos.castles().has_color(Color::Black));

        pos.play_unchecked(Move::new(Square::E8, Square::G8, MoveKind::CastleKingSide));
        assert_eq!(pos.board().piece_at(Square::G8), Some(Color::Black.king()));
        assert_eq!(pos.board().piece_at(Square::F8), Some(Color::Black.rook()));
        assert_eq!(pos.castles(), Castles::empty());
    }

    #[test]
    fn test_castling_blocked() {
        let pos = setup_fen("r3k2r/8/8/8/8/8/8/RN2K1NR w KQkq - 0 1");
        assert!(!pos.legal_moves().iter().any(|m| m.is_castle()));
    }

    #[test]
    fn test_castling_through_attacked_square_is_accepted() {
        // The black rook on f8 attacks f1, which the king passes over.
        // Only the destination is tested, so O-O is still generated.
        let pos = setup_fen("4kr2/8/8/8/8/8/8/4K2R w K - 0 1");
        assert!(pos.is_attacked(Square::F1, Color::Black));
        assert!(!pos.is_attacked(Square::G1, Color::Black));
        assert!(pos.is_legal(Move::new(Square::E1, Square::G1, MoveKind::CastleKingSide)));
    }

    #[test]
    fn test_castling_out_of_check_is_accepted() {
        let pos = setup_fen("4k3/8/8/4r3/8/8/8/4K2R w K - 0 1");
        assert_eq!(pos.status(), GameStatus::Check(Color::White));
        let castle = Move::new(Square::E1, Square::G1, MoveKind::CastleKingSide);
        assert!(pos.is_legal(castle));

        let after = pos.play(castle).expect("castling is legal");
        assert_eq!(after.board().piece_at(Square::G1), Some(Color::White.king()));
        assert_eq!(after.board().piece_at(Square::F1), Some(Color::White.rook()));
        assert!(!after.is_in_check(Color::White));
    }

    #[test]
    fn test_castling_into_check_is_rejected() {
        let pos = setup_fen("4k1r1/8/8/8/8/8/8/4K2R w K - 0 1");
        let castle = Move::new(Square::E1, Square::G1, MoveKind::CastleKingSide);
        assert!(pos.pseudo_legal_moves().contains(&castle));
        assert!(!pos.is_legal(castle));
    }

    #[test]
    fn test_castling_rights_lost_for_good() {
        let mut pos = setup_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        play_uci(&mut pos, "h1h2");
        assert!(!pos.castles().has(Color::White, CastlingSide::KingSide));
        play_uci(&mut pos, "a8a7");
        assert!(!pos.castles().has(Color::Black, CastlingSide::QueenSide));
        play_uci(&mut pos, "h2h1");
        play_uci(&mut pos, "a7a8");
        // Rooks are back home, rights stay lost.
        assert!(!pos.castles().has(Color::White, CastlingSide::KingSide));
        assert!(!pos.castles().has(Color::Black, CastlingSide::QueenSide));
        assert!(!pos
            .legal_moves()
            .iter()
            .any(|m| m.kind == MoveKind::CastleKingSide));
    }

    #[test]
    fn test_castling_right_lost_when_rook_captured() {
        let mut pos = setup_fen("r3k2r/8/8/8/8/8/6B1/R3K2R w KQkq - 0 1");
        play_uci(&mut pos, "g2a8");
        assert!(!pos.castles().has(Color::Black, CastlingSide::QueenSide));
        assert!(pos.castles().has(Color::Black, CastlingSide::KingSide));
    }

    #[test]
    fn test_adjacent_kings() {
        // Not reachable in play, but the oracle must still answer.
        let mut board = Board::empty();
        board.set_piece_at(Square::E4, Color::White.king());
        board.set_piece_at(Square::E5, Color::Black.king());
        let pos = Chess {
            board,
            turn: Color::White,
            castles: Castles::empty(),
            ep_square: None,
            halfmoves: 0,
            fullmoves: NonZeroU32::MIN,
        };
        assert!(pos.is_attacked(Square::E5, Color::White));
        assert!(pos.is_attacked(Square::E4, Color::Black));
        assert!(pos.is_in_check(Color::White));
        assert!(pos.is_in_check(Color::Black));
        for _ in 0..2 {
            assert_eq!(pos.status(), GameStatus::Check(Color::White));
        }
        // Stepping next to the other king stays illegal.
        assert!(!pos.is_legal(Move::normal(Square::E4, Square::D5)));
        assert!(pos.is_legal(Move::normal(Square::E4, Square::E3)));
    }

    #[test]
    fn test_attack_oracle_matches_brute_force() {
        let fens = [
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10",
        ];
        for fen in fens {
            let pos = setup_fen(fen);
            for by in Color::ALL {
                let mut brute = Bitboard::EMPTY;
                for (sq, piece) in pos.board().pieces() {
                    if piece.color == by {
                        brute |= pos.board().attacks_from(sq);
                    }
                }
                for sq in Square::all() {
                    assert_eq!(
                        pos.is_attacked(sq, by),
                        brute.contains(sq),
                        "{fen}: {sq} attacked by {by}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_play_rejects_illegal() {
        let pos = Chess::default();
        let m = Move::normal(Square::E2, Square::E5);
        assert_eq!(pos.play(m), Err(IllegalMoveError { m }));
        // Right squares, wrong kind.
        assert!(pos.play(Move::normal(Square::E2, Square::E4)).is_err());
    }

    #[test]
    fn test_move_counters() {
        let mut pos = Chess::default();
        play_uci(&mut pos, "g1f3");
        assert_eq!(pos.halfmoves(), 1);
        assert_eq!(pos.fullmoves().get(), 1);
        play_uci(&mut pos, "g8f6");
        assert_eq!(pos.halfmoves(), 2);
        assert_eq!(pos.fullmoves().get(), 2);
        play_uci(&mut pos, "e2e4");
        assert_eq!(pos.halfmoves(), 0);
    }

    #[test]
    fn test_from_setup_errors() {
        let err = "8/8/8/8/8/8/8/8 w - - 0 1"
            .parse::<Fen>()
            .expect("valid fen")
            .into_position()
            .expect_err("empty board");
        assert!(err.kinds().contains(PositionErrorKinds::EMPTY_BOARD));
        assert!(err.kinds().contains(PositionErrorKinds::MISSING_KING));

        let err = "4k3/8/8/8/8/8/8/4K2R w KQ - 0 1"
            .parse::<Fen>()
            .expect("valid fen")
            .into_position()
            .expect_err("no queen side rook");
        assert_eq!(err.kinds(), PositionErrorKinds::INVALID_CASTLING_RIGHTS);

        let err = "4k3/8/8/8/8/8/8/R3K3 b - - 0 1"
            .parse::<Fen>()
            .expect("valid fen")
            .into_position();
        assert!(err.is_ok());

        let err = "4k3/4R3/8/8/8/8/8/4K3 w - - 0 1"
            .parse::<Fen>()
            .expect("valid fen")
            .into_position()
            .expect_err("black in check with white to move");
        assert_eq!(err.kinds(), PositionErrorKinds::OPPOSITE_CHECK);

        let err = "4k3/8/8/8/8/8/8/P3K3 w - e6 0 1"
            .parse::<Fen>()
            .expect("valid fen")
            .into_position()
            .expect_err("pawn on backrank and bogus ep square");
        assert!(err.kinds().contains(PositionErrorKinds::PAWNS_ON_BACKRANK));
        assert!(err.kinds().contains(PositionErrorKinds::INVALID_EP_SQUARE));
        assert_eq!(
            err.to_string(),
            "illegal position: pawns on backrank, invalid en passant square"
        );
    }

    #[test]
    fn test_valid_ep_square() {
        let pos = setup_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1");
        assert_eq!(pos.ep_square(), Some(Square::D6));
        let black_to_move = setup_fen("4k3/8/8/8/4P3/8/8/4K3 b - e3 0 1");
        assert_eq!(black_to_move.ep_square(), Some(Square::E3));
    }

    #[test]
    fn test_outcome_str() {
        for s in ["1-0", "0-1", "1/2-1/2"] {
            assert_eq!(s.parse::<Outcome>().map(|o| o.to_string()).as_deref(), Ok(s));
        }
        assert_eq!("*".parse::<Outcome>(), Err(ParseOutcomeError));
        assert_eq!(
            Outcome::from_winner(Some(Color::White)).winner(),
            Some(Color::White)
        );
    }
}
