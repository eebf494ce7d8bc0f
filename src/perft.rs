/// Count leaf nodes of the legal-move tree to `depth`, copy-make style.
/// Used to validate the move-generation collaborator.
pub fn perft(board: &cozy_chess::Board, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let mut nodes = 0u64;
    board.generate_moves(|moves| {
        for m in moves {
            let mut child = board.clone();
            child.play(m);
            nodes += perft(&child, depth - 1);
        }
        false
    });
    nodes
}
