use cozy_chess::{Board as CozyBoard, Color, Move};
use log::warn;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PositionError {
    #[error("invalid FEN: {0}")]
    InvalidFen(String),
    #[error("illegal or unparsable move: {0}")]
    IllegalMove(String),
}

#[derive(Clone, Debug)]
pub struct Position {
    board: CozyBoard,
}

impl Position {
    pub fn startpos() -> Self {
        Self { board: CozyBoard::default() }
    }

    pub fn from_fen(fen: &str) -> Result<Self, PositionError> {
        CozyBoard::from_fen(fen, false)
            .map(|b| Self { board: b })
            .map_err(|e| PositionError::InvalidFen(format!("{e:?}")))
    }

    pub fn board(&self) -> &CozyBoard {
        &self.board
    }

    pub fn side_to_move(&self) -> Color {
        self.board.side_to_move()
    }

    /// Apply a single move given in UCI notation. The token is matched
    /// against the formatted legal moves of the current board, so anything
    /// that does not name a legal move (including garbage) is rejected.
    /// Standard castle tokens are retried in the king-takes-rook form that
    /// cozy-chess uses.
    pub fn make_move_uci(&mut self, mv_uci: &str) -> Result<(), PositionError> {
        let found = self
            .find_legal(mv_uci)
            .or_else(|| castle_alias(mv_uci).and_then(|alt| self.find_legal(alt)));
        match found {
            Some(m) => {
                self.board.play(m);
                Ok(())
            }
            None => Err(PositionError::IllegalMove(mv_uci.to_string())),
        }
    }

    fn find_legal(&self, token: &str) -> Option<Move> {
        let mut found: Option<Move> = None;
        self.board.generate_moves(|moves| {
            for m in moves {
                if format!("{}", m) == token {
                    found = Some(m);
                    break;
                }
            }
            found.is_some()
        });
        found
    }

    /// Replay a move list onto the current position. A bad token is
    /// reported and skipped; the remaining tokens are still applied.
    pub fn apply_moves(&mut self, moves: &[String]) {
        for mv in moves {
            if let Err(e) = self.make_move_uci(mv) {
                warn!("ignoring move token: {e}");
            }
        }
    }

    pub fn set_from_start_and_moves(moves: &[String]) -> Result<Self, PositionError> {
        let mut pos = Self::startpos();
        for m in moves {
            pos.make_move_uci(m)?;
        }
        Ok(pos)
    }
}

// cozy-chess encodes castling as king-takes-rook ("e1h1"), while
// controllers send the standard king-two-squares form ("e1g1"). The alias
// is only tried after a direct match fails, so a genuine e1g1 queen or
// rook move is never rewritten.
fn castle_alias(token: &str) -> Option<&'static str> {
    match token {
        "e1g1" => Some("e1h1"),
        "e1c1" => Some("e1a1"),
        "e8g8" => Some("e8h8"),
        "e8c8" => Some("e8a8"),
        _ => None,
    }
}
