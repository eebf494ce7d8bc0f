use botinator::uci::UciEngine;
use std::thread;
use std::time::{Duration, Instant};

#[test]
fn ucinewgame_interrupts_running_search() {
    let mut engine = UciEngine::new();
    assert!(engine.handle_command("position startpos"));
    // Huge budget and depth so the search is still running when the reset
    // arrives.
    assert!(engine.handle_command("go depth 64 movetime 600000"));
    thread::sleep(Duration::from_millis(50));
    let start = Instant::now();
    assert!(engine.handle_command("ucinewgame"));
    assert!(
        start.elapsed() < Duration::from_secs(30),
        "ucinewgame blocked on the in-flight search"
    );
}

#[test]
fn stop_interrupts_running_search() {
    let mut engine = UciEngine::new();
    assert!(engine.handle_command("go depth 64 movetime 600000"));
    thread::sleep(Duration::from_millis(50));
    let start = Instant::now();
    assert!(engine.handle_command("stop"));
    assert!(
        start.elapsed() < Duration::from_secs(30),
        "stop did not interrupt the in-flight search"
    );
}

#[test]
fn quit_ends_the_loop() {
    let mut engine = UciEngine::new();
    assert!(!engine.handle_command("quit"));
    let mut engine = UciEngine::new();
    assert!(!engine.handle_command("exit"));
}

#[test]
fn unknown_commands_are_ignored() {
    let mut engine = UciEngine::new();
    assert!(engine.handle_command("xyzzy"));
    assert!(engine.handle_command(""));
}
