use anyhow::Result;
use botinator::search::alphabeta::DEFAULT_MAX_DEPTH;
use botinator::uci::UciEngine;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about = "A minimal UCI chess engine", long_about = None)]
struct Args {
    /// Depth cap used when a 'go' command gives no explicit depth
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: u32,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let mut engine = UciEngine::with_default_depth(args.max_depth);
    engine.run_loop()
}
