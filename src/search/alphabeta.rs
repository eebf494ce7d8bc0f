use crate::search::eval::{material_cp, SCORE_INF};
use cozy_chess::{Board, GameStatus, Move};
use log::debug;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Depth cap applied when a search is started without an explicit depth,
/// bounding worst-case runtime.
pub const DEFAULT_MAX_DEPTH: u32 = 4;

/// Internal unwind signal for deadline/stop. Raised at the polling points
/// inside the tree and caught at the iterative-deepening depth boundary;
/// it never escapes `find_best_move`.
struct Aborted;

#[derive(Default, Debug, Clone)]
pub struct SearchResult {
    pub bestmove: Option<Move>,
    pub score_cp: i32,
    pub nodes: u64,
}

#[derive(Default)]
pub struct Searcher {
    nodes: u64,
    deadline: Option<Instant>,
    stop: Option<Arc<AtomicBool>>,
}

impl Searcher {
    /// Iterative deepening up to `max_depth` (or the safety default) within
    /// `budget`. Each completed depth supersedes the previous best move; on
    /// deadline or stop the last best found is returned. `None` only when
    /// no depth produced a move (terminal root).
    pub fn find_best_move(
        &mut self,
        board: &Board,
        budget: Duration,
        max_depth: Option<u32>,
        stop: Option<Arc<AtomicBool>>,
    ) -> Option<Move> {
        let start = Instant::now();
        self.nodes = 0;
        self.deadline = Some(start + budget);
        self.stop = stop;
        let max_depth = max_depth.unwrap_or(DEFAULT_MAX_DEPTH);

        let mut best: Option<Move> = None;
        for depth in 1..=max_depth {
            match self.root_iter(board, depth) {
                Ok((score, Some(m))) => {
                    best = Some(m);
                    debug!("depth {depth} score cp {score} nodes {}", self.nodes);
                }
                // Terminal root: no legal moves at any depth.
                Ok((_, None)) => break,
                Err(Aborted) => break,
            }
            if self.stop_requested() {
                break;
            }
            if start.elapsed() > budget {
                break;
            }
        }
        self.deadline = None;
        self.stop = None;
        best
    }

    /// Fixed-depth search with no deadline and no stop flag.
    pub fn search_depth(&mut self, board: &Board, depth: u32) -> SearchResult {
        self.nodes = 0;
        self.deadline = None;
        self.stop = None;
        match self.root_iter(board, depth.max(1)) {
            Ok((score, bestmove)) => SearchResult { bestmove, score_cp: score, nodes: self.nodes },
            // Unreachable without a deadline or stop flag installed.
            Err(Aborted) => SearchResult { bestmove: None, score_cp: 0, nodes: self.nodes },
        }
    }

    fn root_iter(&mut self, board: &Board, depth: u32) -> Result<(i32, Option<Move>), Aborted> {
        let mut alpha = -SCORE_INF;
        let beta = SCORE_INF;
        let mut best_score = -SCORE_INF;
        let mut bestmove: Option<Move> = None;

        let mut moves: Vec<Move> = Vec::with_capacity(64);
        board.generate_moves(|ml| {
            for m in ml {
                moves.push(m);
            }
            false
        });

        for m in moves {
            if self.stop_requested() {
                return Err(Aborted);
            }
            let mut child = board.clone();
            child.play(m);
            let score = -self.negamax(&child, depth.saturating_sub(1), -beta, -alpha)?;
            // Strict '>': the first move seen wins ties.
            if score > best_score {
                best_score = score;
                bestmove = Some(m);
            }
            if score > alpha {
                alpha = score;
            }
            self.check_deadline()?;
        }
        Ok((best_score, bestmove))
    }

    fn negamax(&mut self, board: &Board, depth: u32, mut alpha: i32, beta: i32) -> Result<i32, Aborted> {
        if self.stop_requested() {
            return Err(Aborted);
        }
        self.nodes += 1;
        if depth == 0 || board.status() != GameStatus::Ongoing {
            return Ok(material_cp(board));
        }

        let mut moves: Vec<Move> = Vec::with_capacity(64);
        board.generate_moves(|ml| {
            for m in ml {
                moves.push(m);
            }
            false
        });

        let mut best = -SCORE_INF;
        for m in moves {
            self.check_deadline()?;
            let mut child = board.clone();
            child.play(m);
            let val = -self.negamax(&child, depth - 1, -beta, -alpha)?;
            if val > best {
                best = val;
            }
            if val > alpha {
                alpha = val;
            }
            // Beta cutoff, checked after the child's value is folded in.
            if alpha >= beta {
                break;
            }
        }
        Ok(best)
    }

    fn stop_requested(&self) -> bool {
        self.stop.as_ref().is_some_and(|f| f.load(Ordering::Relaxed))
    }

    fn check_deadline(&self) -> Result<(), Aborted> {
        match self.deadline {
            Some(dl) if Instant::now() >= dl => Err(Aborted),
            _ => Ok(()),
        }
    }
}
