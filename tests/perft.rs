use botinator::perft::perft;
use cozy_chess::Board;

#[test]
fn perft_startpos_small_depths() {
    let b = Board::default();
    assert_eq!(perft(&b, 1), 20);
    assert_eq!(perft(&b, 2), 400);
    assert_eq!(perft(&b, 3), 8902);
    assert_eq!(perft(&b, 4), 197281);
}

#[test]
fn perft_leaves_root_unchanged() {
    let b = Board::default();
    let before = format!("{b}");
    let _ = perft(&b, 3);
    assert_eq!(format!("{b}"), before);
}
