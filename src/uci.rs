use crate::board::Position;
use crate::search::alphabeta::{Searcher, DEFAULT_MAX_DEPTH};
use cozy_chess::{Board, Color, Move};
use log::error;
use std::io::{self, BufRead, Write};
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

// Time budget heuristic when only the clocks are known.
const MIN_BUDGET_SECS: f64 = 0.05;
const CLOCK_FRACTION: f64 = 0.005;
const FALLBACK_BUDGET: Duration = Duration::from_millis(100);

pub struct UciEngine {
    pos: Position,
    stop: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
    default_depth: u32,
}

impl UciEngine {
    pub fn new() -> Self {
        Self::with_default_depth(DEFAULT_MAX_DEPTH)
    }

    pub fn with_default_depth(default_depth: u32) -> Self {
        Self {
            pos: Position::startpos(),
            stop: Arc::new(AtomicBool::new(false)),
            worker: None,
            default_depth,
        }
    }

    fn cmd_uci(&self) {
        println!("id name Botinator 0.1");
        println!("id author Botinator Team");
        println!("uciok");
    }

    fn cmd_isready(&self) {
        println!("readyok");
    }

    fn cmd_ucinewgame(&mut self) {
        // Interrupt any in-flight search before joining, otherwise the
        // reset would block for the rest of the search budget.
        self.stop.store(true, Ordering::Relaxed);
        self.finish_search();
        self.pos = Position::startpos();
    }

    fn cmd_position(&mut self, args: &str) {
        // 'position startpos [moves ...]' and 'position fen <fen> [moves ...]'
        let mut tokens = args.split_whitespace();
        match tokens.next() {
            Some("startpos") => {
                self.pos = Position::startpos();
            }
            Some("fen") => {
                // FEN is 6 fields; collect them
                let fen_fields: Vec<&str> = tokens.by_ref().take(6).collect();
                if fen_fields.len() != 6 {
                    return;
                }
                let fen = fen_fields.join(" ");
                match Position::from_fen(&fen) {
                    Ok(p) => self.pos = p,
                    Err(e) => {
                        error!("{e}");
                        return;
                    }
                }
            }
            _ => return,
        }
        if let Some("moves") = tokens.next() {
            let moves: Vec<String> = tokens.map(|s| s.to_string()).collect();
            self.pos.apply_moves(&moves);
        }
    }

    fn cmd_go(&mut self, args: &str) {
        let mut movetime: Option<u64> = None;
        let mut wtime: Option<i64> = None;
        let mut btime: Option<i64> = None;
        let mut depth: Option<u32> = None;

        let mut tokens = args.split_whitespace();
        while let Some(tok) = tokens.next() {
            match tok {
                "movetime" => movetime = tokens.next().and_then(|s| s.parse().ok()),
                "wtime" => wtime = tokens.next().and_then(|s| s.parse().ok()),
                "btime" => btime = tokens.next().and_then(|s| s.parse().ok()),
                "depth" => depth = tokens.next().and_then(|s| s.parse().ok()),
                _ => {}
            }
        }

        let budget = match movetime {
            Some(ms) => Duration::from_millis(ms),
            None => {
                let remaining = match self.pos.side_to_move() {
                    Color::White => wtime,
                    Color::Black => btime,
                };
                match remaining {
                    Some(ms) => {
                        let secs = (ms.max(0) as f64 / 1000.0) * CLOCK_FRACTION;
                        Duration::from_secs_f64(secs.max(MIN_BUDGET_SECS))
                    }
                    None => FALLBACK_BUDGET,
                }
            }
        };

        // One search at a time; a joined worker has already printed its
        // bestmove line.
        self.finish_search();
        self.stop.store(false, Ordering::Relaxed);

        let board = self.pos.board().clone();
        let stop = Arc::clone(&self.stop);
        let max_depth = depth.or(Some(self.default_depth));
        self.worker = Some(thread::spawn(move || {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                Searcher::default().find_best_move(&board, budget, max_depth, Some(stop))
            }));
            let best = match outcome {
                Ok(best) => best,
                Err(_) => {
                    error!("search failed, falling back to any legal move");
                    None
                }
            };
            // Always answer: chosen move, any legal move, or the null move.
            match best.or_else(|| fallback_move(&board)) {
                Some(m) => println!("bestmove {}", m),
                None => println!("bestmove 0000"),
            }
            let _ = io::stdout().flush();
        }));
    }

    fn cmd_stop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        self.finish_search();
    }

    fn finish_search(&mut self) {
        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }
    }

    /// Dispatch one protocol line. Returns `false` when the loop should
    /// exit.
    pub fn handle_command(&mut self, line: &str) -> bool {
        let line = line.trim();
        if line.is_empty() {
            return true;
        }
        match line {
            "uci" => self.cmd_uci(),
            "isready" => self.cmd_isready(),
            "ucinewgame" => self.cmd_ucinewgame(),
            "stop" => self.cmd_stop(),
            "d" => println!("{}", self.pos.board()),
            "go" => self.cmd_go(""),
            "quit" | "exit" => return false,
            _ => {
                if let Some(rest) = line.strip_prefix("position ") {
                    self.cmd_position(rest);
                } else if let Some(rest) = line.strip_prefix("go ") {
                    self.cmd_go(rest);
                }
                // unknown commands are ignored without crashing
            }
        }
        true
    }

    pub fn run_loop(&mut self) -> anyhow::Result<()> {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = line?;
            if !self.handle_command(&line) {
                break;
            }
        }
        self.stop.store(true, Ordering::Relaxed);
        self.finish_search();
        Ok(())
    }
}

impl Default for UciEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// First legal move in enumeration order, used when the search reports no
/// move. `None` only on terminal positions, where `bestmove 0000` goes out.
pub fn fallback_move(board: &Board) -> Option<Move> {
    let mut first = None;
    board.generate_moves(|moves| {
        first = moves.into_iter().next();
        true
    });
    first
}
