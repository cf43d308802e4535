use chess_rules::validator::{has_any_legal_move, is_checkmate, is_legal, is_stalemate};
use chess_rules::{
    Board, Color, GameController, GameState, MoveError, NullObserver, PieceKind, Position,
};

fn sq(s: &str) -> Position {
    s.parse().unwrap()
}

fn new_game() -> GameController {
    GameController::with_observer(Box::new(NullObserver))
}

fn play(game: &mut GameController, moves: &[&str]) {
    for m in moves {
        let (from, to) = m.split_at(2);
        game.apply_player_move(sq(from), sq(to))
            .unwrap_or_else(|e| panic!("{m} rejected: {e}"));
    }
}

fn setup(pieces: &[(&str, PieceKind, Color)], to_move: Color) -> GameController {
    let mut board = Board::empty();
    for &(at, kind, color) in pieces {
        board.place(sq(at), kind, color).unwrap();
    }
    GameController::from_board(board, to_move, Box::new(NullObserver)).unwrap()
}

#[test]
fn starting_position() {
    let game = new_game();
    let board = game.current_board_snapshot();
    assert_eq!(board.piece_count(Color::White), 16);
    assert_eq!(board.piece_count(Color::Black), 16);
    assert_eq!(board.king_position(Color::White), Some(sq("e1")));
    assert_eq!(board.king_position(Color::Black), Some(sq("e8")));
    assert!(has_any_legal_move(Color::White, board));
    assert_eq!(game.current_turn(), Color::White);
    assert_eq!(game.current_game_state(), GameState::Ongoing);
}

#[test]
fn fools_mate() {
    let mut game = new_game();
    play(&mut game, &["f2f3", "e7e5", "g2g4", "d8h4"]);
    let board = game.current_board_snapshot();
    assert!(is_checkmate(Color::White, board));
    assert_eq!(game.current_game_state(), GameState::Checkmate(Color::Black));
    assert_eq!(game.current_turn(), Color::White);
}

#[test]
fn scholars_mate() {
    let mut game = new_game();
    play(&mut game, &["e2e4", "e7e5", "f1c4", "b8c6", "d1h5", "g8f6", "h5f7"]);
    assert_eq!(game.current_game_state(), GameState::Checkmate(Color::White));
}

#[test]
fn constructed_stalemate() {
    let game = setup(
        &[
            ("h8", PieceKind::King, Color::Black),
            ("f7", PieceKind::Queen, Color::White),
            ("g6", PieceKind::King, Color::White),
        ],
        Color::Black,
    );
    let board = game.current_board_snapshot();
    assert!(!board.is_king_in_check(Color::Black));
    assert!(is_stalemate(Color::Black, board));
    assert!(!is_checkmate(Color::Black, board));
    assert_eq!(game.current_game_state(), GameState::Stalemate);
}

#[test]
fn stalemate_reached_by_a_move() {
    let mut game = setup(
        &[
            ("h8", PieceKind::King, Color::Black),
            ("f1", PieceKind::Queen, Color::White),
            ("g6", PieceKind::King, Color::White),
        ],
        Color::White,
    );
    play(&mut game, &["f1f7"]);
    assert_eq!(game.current_game_state(), GameState::Stalemate);
    assert_eq!(
        game.apply_player_move(sq("h8"), sq("g8")),
        Err(MoveError::GameOver(GameState::Stalemate))
    );
}

#[test]
fn en_passant_captures_the_double_stepped_pawn() {
    let mut game = new_game();
    play(&mut game, &["e2e4", "a7a6", "e4e5", "d7d5"]);
    let board = game.current_board_snapshot();
    assert_eq!(board.en_passant_target(), Some(sq("d6")));
    assert!(board.is_empty(sq("d6")));

    play(&mut game, &["e5d6"]);
    let board = game.current_board_snapshot();
    assert!(board.is_empty(sq("d5")), "the pawn that double-stepped is gone");
    let capturer = board.piece_at(sq("d6")).unwrap();
    assert_eq!((capturer.kind, capturer.color), (PieceKind::Pawn, Color::White));
    assert_eq!(board.piece_count(Color::Black), 15);
}

#[test]
fn black_captures_en_passant() {
    let mut game = new_game();
    play(&mut game, &["a2a3", "d7d5", "a3a4", "d5d4", "e2e4"]);
    assert_eq!(game.current_board_snapshot().en_passant_target(), Some(sq("e3")));
    play(&mut game, &["d4e3"]);
    let board = game.current_board_snapshot();
    assert!(board.is_empty(sq("e4")));
    assert_eq!(board.piece_at(sq("e3")).map(|p| p.color), Some(Color::Black));
    assert_eq!(board.piece_count(Color::White), 15);
}

#[test]
fn en_passant_right_expires_after_one_ply() {
    let mut game = new_game();
    play(&mut game, &["e2e4", "a7a6", "e4e5", "d7d5", "h2h3", "h7h6"]);
    assert_eq!(game.current_board_snapshot().en_passant_target(), None);
    assert_eq!(
        game.apply_player_move(sq("e5"), sq("d6")),
        Err(MoveError::IllegalDestination { from: sq("e5"), to: sq("d6") })
    );
}

#[test]
fn en_passant_is_illegal_when_it_exposes_the_king() {
    // Removing both pawns from the fifth rank opens the rook onto the king.
    let mut game = setup(
        &[
            ("a5", PieceKind::King, Color::White),
            ("e5", PieceKind::Pawn, Color::White),
            ("h5", PieceKind::Rook, Color::Black),
            ("d7", PieceKind::Pawn, Color::Black),
            ("e8", PieceKind::King, Color::Black),
        ],
        Color::Black,
    );
    play(&mut game, &["d7d5"]);
    assert_eq!(
        game.apply_player_move(sq("e5"), sq("d6")),
        Err(MoveError::IllegalDestination { from: sq("e5"), to: sq("d6") })
    );
}

fn castling_position() -> Vec<(&'static str, PieceKind, Color)> {
    vec![
        ("e1", PieceKind::King, Color::White),
        ("a1", PieceKind::Rook, Color::White),
        ("h1", PieceKind::Rook, Color::White),
        ("e8", PieceKind::King, Color::Black),
        ("a8", PieceKind::Rook, Color::Black),
        ("h8", PieceKind::Rook, Color::Black),
    ]
}

#[test]
fn castling_both_sides() {
    let mut game = setup(&castling_position(), Color::White);
    play(&mut game, &["e1g1", "e8c8"]);
    let board = game.current_board_snapshot();
    assert_eq!(board.king_position(Color::White), Some(sq("g1")));
    assert_eq!(board.piece_at(sq("f1")).map(|p| p.kind), Some(PieceKind::Rook));
    assert_eq!(board.king_position(Color::Black), Some(sq("c8")));
    assert_eq!(board.piece_at(sq("d8")).map(|p| p.kind), Some(PieceKind::Rook));
    assert!(board.is_empty(sq("a8")));
}

#[test]
fn castling_rejected_after_king_moved() {
    let mut game = setup(&castling_position(), Color::White);
    play(&mut game, &["e1f1", "e8f8", "f1e1", "f8e8"]);
    assert!(game.apply_player_move(sq("e1"), sq("g1")).is_err());
    assert!(game.apply_player_move(sq("e1"), sq("c1")).is_err());
}

#[test]
fn castling_rejected_after_rook_moved() {
    let mut game = setup(&castling_position(), Color::White);
    play(&mut game, &["h1h2", "a8a7", "h2h1", "a7a8"]);
    assert!(game.apply_player_move(sq("e1"), sq("g1")).is_err());
    play(&mut game, &["e1c1"]);
    assert!(game.apply_player_move(sq("e8"), sq("c8")).is_err());
    play(&mut game, &["e8g8"]);
}

#[test]
fn castling_rejected_through_attacked_square() {
    let mut pieces = castling_position();
    pieces.push(("d4", PieceKind::Bishop, Color::Black));
    let game = setup(&pieces, Color::White);
    let board = game.current_board_snapshot();
    let king = board.piece_at(sq("e1")).unwrap();
    // d4 bishop covers g1 (landing) but nothing on the queen side
    assert!(!is_legal(&king, sq("g1"), board));
    assert!(is_legal(&king, sq("c1"), board));
}

#[test]
fn castling_rejected_in_check() {
    let mut pieces = castling_position();
    pieces.push(("b4", PieceKind::Bishop, Color::Black));
    let game = setup(&pieces, Color::White);
    assert_eq!(game.current_game_state(), GameState::Check(Color::White));
    let targets = game.legal_destinations(sq("e1"));
    assert!(!targets.contains(&sq("g1")));
    assert!(!targets.contains(&sq("c1")));
}

#[test]
fn promotion_is_always_to_a_queen() {
    let mut game = setup(
        &[
            ("a1", PieceKind::King, Color::White),
            ("b7", PieceKind::Pawn, Color::White),
            ("h8", PieceKind::King, Color::Black),
        ],
        Color::White,
    );
    play(&mut game, &["b7b8"]);
    let queen = game.current_board_snapshot().piece_at(sq("b8")).unwrap();
    assert_eq!((queen.kind, queen.color), (PieceKind::Queen, Color::White));
    assert_eq!(game.current_game_state(), GameState::Check(Color::Black));
}

#[test]
fn black_promotes_by_capture_with_check() {
    let mut game = setup(
        &[
            ("h1", PieceKind::King, Color::White),
            ("a1", PieceKind::Rook, Color::White),
            ("b2", PieceKind::Pawn, Color::Black),
            ("h8", PieceKind::King, Color::Black),
        ],
        Color::Black,
    );
    play(&mut game, &["b2a1"]);
    let queen = game.current_board_snapshot().piece_at(sq("a1")).unwrap();
    assert_eq!((queen.kind, queen.color), (PieceKind::Queen, Color::Black));
    assert_eq!(game.current_board_snapshot().piece_count(Color::White), 1);
    assert_eq!(game.current_game_state(), GameState::Check(Color::White));
}

#[test]
fn pinned_piece_cannot_move() {
    let mut game = new_game();
    play(&mut game, &["e2e4", "d7d6", "d2d4", "e8d7", "d1g4"]);
    assert_eq!(game.current_game_state(), GameState::Check(Color::Black));
    assert!(game.apply_player_move(sq("a7"), sq("a6")).is_err());
    play(&mut game, &["e7e6", "a2a3"]);
    // now e6 is pinned against the king on d7
    assert_eq!(
        game.apply_player_move(sq("e6"), sq("e5")),
        Err(MoveError::IllegalDestination { from: sq("e6"), to: sq("e5") })
    );
}

#[test]
fn rejected_moves_change_nothing() {
    let mut game = new_game();
    play(&mut game, &["e2e4"]);
    let before = game.current_board_snapshot().clone();
    let history = game.history().to_vec();

    assert!(game.apply_player_move(sq("e4"), sq("e5")).is_err());
    assert!(game.apply_player_move(sq("d2"), sq("d4")).is_err());
    assert!(game.apply_player_move(sq("e8"), sq("e7")).is_err());

    assert_eq!(game.current_board_snapshot(), &before);
    assert_eq!(game.history(), history.as_slice());
    assert_eq!(game.current_turn(), Color::Black);
}
