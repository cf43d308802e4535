use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::error::{BoardError, MoveError};
use crate::moves::Move;
use crate::piece::{Color, Piece};
use crate::position::Position;
use crate::validator;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    Ongoing,
    /// The given color's king is attacked but it has a way out.
    Check(Color),
    /// The game is won by the given color.
    Checkmate(Color),
    Stalemate,
}

impl GameState {
    pub fn is_terminal(self) -> bool {
        matches!(self, GameState::Checkmate(_) | GameState::Stalemate)
    }

    pub fn winner(self) -> Option<Color> {
        match self {
            GameState::Checkmate(winner) => Some(winner),
            _ => None,
        }
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameState::Ongoing => write!(f, "ongoing"),
            GameState::Check(color) => write!(f, "{color} is in check"),
            GameState::Checkmate(winner) => write!(f, "checkmate, {winner} wins"),
            GameState::Stalemate => write!(f, "stalemate"),
        }
    }
}

/// Hooks the controller calls as a game progresses. The rules themselves
/// never report anything; an observer is how a front end or a log hears
/// about moves.
pub trait GameObserver {
    fn on_move(&self, _side: Color, _mv: Move, _captured: Option<Piece>) {}
    fn on_rejected(&self, _from: Position, _to: Position, _error: &MoveError) {}
    fn on_state_change(&self, _state: GameState) {}
}

/// Forwards game events to the `log` facade.
pub struct LogObserver;

impl GameObserver for LogObserver {
    fn on_move(&self, side: Color, mv: Move, captured: Option<Piece>) {
        match captured {
            Some(victim) => log::info!("{side} played {mv}, capturing {:?}", victim.kind),
            None => log::info!("{side} played {mv}"),
        }
    }

    fn on_rejected(&self, from: Position, to: Position, error: &MoveError) {
        log::warn!("rejected {from}{to}: {error}");
    }

    fn on_state_change(&self, state: GameState) {
        if state.is_terminal() {
            log::info!("game over: {state}");
        } else {
            log::debug!("{state}");
        }
    }
}

pub struct NullObserver;

impl GameObserver for NullObserver {}

/// Sequences a two-player game: whose turn it is, the current state, and
/// the only path by which the board changes.
pub struct GameController {
    board: Board,
    turn: Color,
    state: GameState,
    history: Vec<Move>,
    observer: Box<dyn GameObserver>,
}

impl Default for GameController {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for GameController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameController")
            .field("board", &self.board)
            .field("turn", &self.turn)
            .field("state", &self.state)
            .field("history", &self.history)
            .finish_non_exhaustive()
    }
}

impl GameController {
    /// A new game from the starting position, logging through `log`.
    pub fn new() -> Self {
        Self::with_observer(Box::new(LogObserver))
    }

    pub fn with_observer(observer: Box<dyn GameObserver>) -> Self {
        GameController {
            board: Board::new(),
            turn: Color::White,
            state: GameState::Ongoing,
            history: Vec::new(),
            observer,
        }
    }

    /// Start from an arbitrary position with `to_move` on move. The board must
    /// hold exactly one king per color.
    pub fn from_board(
        board: Board,
        to_move: Color,
        observer: Box<dyn GameObserver>,
    ) -> Result<Self, BoardError> {
        board.validate()?;
        let state = validator::game_state(to_move, &board);
        Ok(GameController {
            board,
            turn: to_move,
            state,
            history: Vec::new(),
            observer,
        })
    }

    /// Validate and play `from` -> `to` for the side to move. On error nothing
    /// about the game changes.
    pub fn apply_player_move(&mut self, from: Position, to: Position) -> Result<(), MoveError> {
        let result = self.try_move(from, to);
        if let Err(error) = &result {
            self.observer.on_rejected(from, to, error);
        }
        result
    }

    fn try_move(&mut self, from: Position, to: Position) -> Result<(), MoveError> {
        if self.state.is_terminal() {
            return Err(MoveError::GameOver(self.state));
        }
        let piece = self.board.piece_at(from).ok_or(MoveError::EmptySource(from))?;
        if piece.color != self.turn {
            return Err(MoveError::WrongSideToMove { from, side: self.turn });
        }
        if !validator::is_legal(&piece, to, &self.board) {
            return Err(MoveError::IllegalDestination { from, to });
        }

        let mut next = self.board.clone();
        let captured = next.apply_move(from, to);
        if next.king_position(Color::White).is_none() || next.king_position(Color::Black).is_none() {
            return Err(MoveError::UnreachableState("a king left the board"));
        }

        let mover = self.turn;
        let mv = Move::new(from, to);
        self.board = next;
        self.history.push(mv);
        self.turn = mover.opposite();
        self.observer.on_move(mover, mv, captured);

        let state = validator::game_state(self.turn, &self.board);
        if state != self.state {
            self.observer.on_state_change(state);
        }
        self.state = state;
        Ok(())
    }

    /// [`apply_player_move`](Self::apply_player_move) for a parsed [`Move`].
    pub fn apply_move(&mut self, mv: Move) -> Result<(), MoveError> {
        self.apply_player_move(mv.from, mv.to)
    }

    pub fn current_board_snapshot(&self) -> &Board {
        &self.board
    }

    pub fn current_turn(&self) -> Color {
        self.turn
    }

    pub fn current_game_state(&self) -> GameState {
        self.state
    }

    pub fn last_move(&self) -> Option<Move> {
        self.history.last().copied()
    }

    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Legal targets for the piece on `from`, provided it belongs to the side
    /// to move. Empty otherwise, and empty once the game is over.
    pub fn legal_destinations(&self, from: Position) -> Vec<Position> {
        if self.state.is_terminal() {
            return Vec::new();
        }
        match self.board.piece_at(from) {
            Some(piece) if piece.color == self.turn => {
                validator::legal_destinations(&piece, &self.board)
            }
            _ => Vec::new(),
        }
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        if self.state.is_terminal() {
            return Vec::new();
        }
        validator::legal_moves(self.turn, &self.board)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::piece::PieceKind;

    fn sq(s: &str) -> Position {
        s.parse().unwrap()
    }

    fn play(game: &mut GameController, moves: &[&str]) {
        for m in moves {
            let mv = Move::from_uci(m).unwrap();
            game.apply_move(mv).unwrap_or_else(|e| panic!("{m} rejected: {e}"));
        }
    }

    #[derive(Default)]
    struct Recorder {
        events: Rc<RefCell<Vec<String>>>,
    }

    impl GameObserver for Recorder {
        fn on_move(&self, side: Color, mv: Move, _captured: Option<Piece>) {
            self.events.borrow_mut().push(format!("{side} {mv}"));
        }

        fn on_rejected(&self, from: Position, to: Position, _error: &MoveError) {
            self.events.borrow_mut().push(format!("rejected {from}{to}"));
        }

        fn on_state_change(&self, state: GameState) {
            self.events.borrow_mut().push(state.to_string());
        }
    }

    #[test]
    fn turns_alternate() {
        let mut game = GameController::with_observer(Box::new(NullObserver));
        assert_eq!(game.current_turn(), Color::White);
        play(&mut game, &["e2e4"]);
        assert_eq!(game.current_turn(), Color::Black);
        assert_eq!(game.last_move(), Some(Move::new(sq("e2"), sq("e4"))));
        play(&mut game, &["e7e5"]);
        assert_eq!(game.current_turn(), Color::White);
        assert_eq!(game.history().len(), 2);
    }

    #[test]
    fn rejections_leave_everything_untouched() {
        let mut game = GameController::with_observer(Box::new(NullObserver));
        let before = game.current_board_snapshot().clone();

        assert_eq!(
            game.apply_player_move(sq("e4"), sq("e5")),
            Err(MoveError::EmptySource(sq("e4")))
        );
        assert_eq!(
            game.apply_player_move(sq("e7"), sq("e5")),
            Err(MoveError::WrongSideToMove { from: sq("e7"), side: Color::White })
        );
        assert_eq!(
            game.apply_player_move(sq("e2"), sq("e5")),
            Err(MoveError::IllegalDestination { from: sq("e2"), to: sq("e5") })
        );

        assert_eq!(game.current_board_snapshot(), &before);
        assert_eq!(game.current_turn(), Color::White);
        assert_eq!(game.current_game_state(), GameState::Ongoing);
        assert!(game.history().is_empty());
    }

    #[test]
    fn check_is_reported_for_the_side_to_move() {
        let mut game = GameController::with_observer(Box::new(NullObserver));
        play(&mut game, &["e2e4", "f7f6", "d1h5"]);
        assert_eq!(game.current_game_state(), GameState::Check(Color::Black));
        assert_eq!(
            game.apply_player_move(sq("a7"), sq("a6")),
            Err(MoveError::IllegalDestination { from: sq("a7"), to: sq("a6") })
        );
        play(&mut game, &["g7g6"]);
        assert_eq!(game.current_game_state(), GameState::Ongoing);
    }

    #[test]
    fn fools_mate_ends_the_game() {
        let mut game = GameController::with_observer(Box::new(NullObserver));
        play(&mut game, &["f2f3", "e7e5", "g2g4", "d8h4"]);
        assert_eq!(game.current_game_state(), GameState::Checkmate(Color::Black));
        assert_eq!(game.current_game_state().winner(), Some(Color::Black));
        assert!(game.legal_moves().is_empty());
        assert_eq!(
            game.apply_player_move(sq("a2"), sq("a3")),
            Err(MoveError::GameOver(GameState::Checkmate(Color::Black)))
        );
    }

    #[test]
    fn from_board_requires_both_kings() {
        let mut board = Board::empty();
        board.place(sq("e1"), PieceKind::King, Color::White).unwrap();
        let err = GameController::from_board(board, Color::White, Box::new(NullObserver)).unwrap_err();
        assert_eq!(err, BoardError::MissingKing(Color::Black));
    }

    #[test]
    fn from_board_computes_initial_state() {
        let mut board = Board::empty();
        board.place(sq("a1"), PieceKind::King, Color::White).unwrap();
        board.place(sq("b3"), PieceKind::Queen, Color::Black).unwrap();
        board.place(sq("c2"), PieceKind::King, Color::Black).unwrap();
        let game = GameController::from_board(board, Color::White, Box::new(NullObserver)).unwrap();
        assert_eq!(game.current_game_state(), GameState::Stalemate);
        assert!(game.legal_destinations(sq("a1")).is_empty());
    }

    #[test]
    fn capturing_a_king_is_refused_and_changes_nothing() {
        // Black is left in check with White on move, so the rook can take the king.
        let mut board = Board::empty();
        board.place(sq("a1"), PieceKind::King, Color::White).unwrap();
        board.place(sq("e1"), PieceKind::Rook, Color::White).unwrap();
        board.place(sq("e8"), PieceKind::King, Color::Black).unwrap();
        let mut game = GameController::from_board(board, Color::White, Box::new(NullObserver)).unwrap();
        let before = game.current_board_snapshot().clone();

        assert!(matches!(
            game.apply_player_move(sq("e1"), sq("e8")),
            Err(MoveError::UnreachableState(_))
        ));
        assert_eq!(game.current_board_snapshot(), &before);
        assert_eq!(game.current_turn(), Color::White);
        assert!(game.history().is_empty());
    }

    #[test]
    fn legal_destinations_only_for_side_to_move() {
        let game = GameController::with_observer(Box::new(NullObserver));
        let mut knight = game.legal_destinations(sq("g1"));
        knight.sort();
        assert_eq!(knight, vec![sq("f3"), sq("h3")]);
        assert!(game.legal_destinations(sq("g8")).is_empty());
        assert!(game.legal_destinations(sq("e4")).is_empty());
    }

    #[test]
    fn observer_hears_moves_rejections_and_state() {
        let recorder = Recorder::default();
        let events = Rc::clone(&recorder.events);
        let mut game = GameController::with_observer(Box::new(recorder));

        play(&mut game, &["e2e4", "f7f6"]);
        let _ = game.apply_player_move(sq("e4"), sq("e6"));
        play(&mut game, &["d1h5"]);

        assert_eq!(
            *events.borrow(),
            vec![
                "White e2e4".to_string(),
                "Black f7f6".to_string(),
                "rejected e4e6".to_string(),
                "White d1h5".to_string(),
                "Black is in check".to_string(),
            ]
        );
    }
}
