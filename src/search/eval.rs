use cozy_chess::{Board, Color, Piece};

const PAWN: i32 = 100;
const KNIGHT: i32 = 320;
const BISHOP: i32 = 330;
const ROOK: i32 = 500;
const QUEEN: i32 = 900;
// Kings are never captured; a value is kept only so no piece type needs a
// special case. It cancels out in any reachable position.
const KING: i32 = 20_000;

/// Conceptual infinity for alpha/beta bounds. Far beyond any reachable
/// material sum, so it can never collide with a real evaluation.
pub const SCORE_INF: i32 = 1_000_000;

fn count_piece(board: &Board, color: Color, piece: Piece) -> i32 {
    let bb = board.colors(color) & board.pieces(piece);
    bb.into_iter().count() as i32
}

fn side_material(board: &Board, color: Color) -> i32 {
    count_piece(board, color, Piece::Pawn) * PAWN
        + count_piece(board, color, Piece::Knight) * KNIGHT
        + count_piece(board, color, Piece::Bishop) * BISHOP
        + count_piece(board, color, Piece::Rook) * ROOK
        + count_piece(board, color, Piece::Queen) * QUEEN
        + count_piece(board, color, Piece::King) * KING
}

/// Material balance in centipawns from the side to move's perspective
/// (positive = the player whose turn it is stands better). Pure and
/// deterministic; any richer evaluator must keep this contract.
pub fn material_cp(board: &Board) -> i32 {
    let score = side_material(board, Color::White) - side_material(board, Color::Black);
    if board.side_to_move() == Color::White {
        score
    } else {
        -score
    }
}
