use botinator::board::Position;
use cozy_chess::Color;
use pretty_assertions::assert_eq;

#[test]
fn apply_startpos_moves_sequence() {
    let moves = vec!["e2e4".to_string(), "e7e5".to_string(), "g1f3".to_string()];
    let pos = Position::set_from_start_and_moves(&moves).expect("legal move sequence");
    assert_eq!(pos.side_to_move(), Color::Black, "expected black to move after 3 plies");
}

#[test]
fn illegal_move_errors_and_leaves_position_intact() {
    let mut pos = Position::startpos();
    let before = format!("{}", pos.board());
    assert!(pos.make_move_uci("e2e5").is_err());
    assert!(pos.make_move_uci("zzzz").is_err());
    assert_eq!(format!("{}", pos.board()), before);
}

#[test]
fn bad_token_is_skipped_and_rest_applies() {
    let mut pos = Position::startpos();
    let moves = vec!["e2e4".to_string(), "zzzz".to_string(), "e7e5".to_string()];
    pos.apply_moves(&moves);

    let expected =
        Position::set_from_start_and_moves(&["e2e4".to_string(), "e7e5".to_string()])
            .expect("legal move sequence");
    assert_eq!(format!("{}", pos.board()), format!("{}", expected.board()));
}

#[test]
fn standard_castle_tokens_are_accepted() {
    // Controllers send king-two-squares castle tokens; cozy-chess encodes
    // castling as king-takes-rook.
    let mut pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("valid fen");
    pos.make_move_uci("e1g1").expect("white short castle");
    assert_eq!(format!("{}", pos.board()), "r3k2r/8/8/8/8/8/8/R4RK1 b kq - 1 1");

    let mut pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1").expect("valid fen");
    pos.make_move_uci("e8c8").expect("black long castle");
    assert_eq!(format!("{}", pos.board()), "2kr3r/8/8/8/8/8/8/R3K2R w KQ - 1 2");
}

#[test]
fn king_takes_rook_castle_tokens_still_work() {
    let mut pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("valid fen");
    pos.make_move_uci("e1h1").expect("white short castle, native form");
    assert_eq!(format!("{}", pos.board()), "r3k2r/8/8/8/8/8/8/R4RK1 b kq - 1 1");
}

#[test]
fn castle_alias_does_not_shadow_a_real_move() {
    // Queen on e1 can play e1g1 as an ordinary move; the token must not be
    // rewritten into a castle.
    let mut pos = Position::from_fen("k7/8/8/8/8/8/8/4Q2K w - - 0 1").expect("valid fen");
    pos.make_move_uci("e1g1").expect("queen move");
    assert_eq!(format!("{}", pos.board()), "k7/8/8/8/8/8/8/6QK b - - 1 1");
}

#[test]
fn from_fen_roundtrip() {
    let fen = "k7/8/8/8/8/8/3qQ3/7K w - - 0 1";
    let pos = Position::from_fen(fen).expect("valid fen");
    assert_eq!(format!("{}", pos.board()), fen);
    assert!(Position::from_fen("not a fen").is_err());
}
