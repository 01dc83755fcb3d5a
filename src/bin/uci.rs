//! A thin UCI (Universal Chess Interface) text loop over [`Engine`].
//!
//! Reads commands from stdin, drives one [`Engine`], and writes `info`/
//! `bestmove` lines to stdout. All search logic lives in the library; this
//! binary only translates UCI text to and from engine calls.

use std::io::{self, BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use chess_engine::engine::Engine;
use chess_engine::time_manager::compute_budget_ms;

const DEFAULT_DEPTH: u32 = 64;

struct Session {
    engine: Arc<Engine>,
    fen: Mutex<String>,
    searching: Arc<AtomicBool>,
}

impl Session {
    fn new() -> Self {
        Session {
            engine: Arc::new(Engine::initialize()),
            fen: Mutex::new(
                "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1".to_string(),
            ),
            searching: Arc::new(AtomicBool::new(false)),
        }
    }

    fn handle_position(&self, parts: &[&str]) {
        let mut idx = 1;
        let mut fen = if parts.get(idx) == Some(&"startpos") {
            idx += 1;
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1".to_string()
        } else if parts.get(idx) == Some(&"fen") {
            idx += 1;
            let start = idx;
            while idx < parts.len() && parts[idx] != "moves" {
                idx += 1;
            }
            parts[start..idx].join(" ")
        } else {
            return;
        };

        if parts.get(idx) == Some(&"moves") {
            idx += 1;
            while idx < parts.len() {
                fen = self.engine.apply_uci_move(&fen, parts[idx]);
                idx += 1;
            }
        }

        *self.fen.lock().unwrap() = fen;
    }

    fn handle_go(&self, parts: &[&str], stdout: &mut impl Write) {
        let mut movetime_ms: Option<u64> = None;
        let mut depth = DEFAULT_DEPTH;
        let mut wtime_ms = 0u64;
        let mut btime_ms = 0u64;
        let mut winc_ms = 0u64;
        let mut binc_ms = 0u64;

        let mut i = 1;
        while i < parts.len() {
            match parts[i] {
                "movetime" => {
                    movetime_ms = parts.get(i + 1).and_then(|s| s.parse().ok());
                    i += 2;
                }
                "depth" => {
                    depth = parts
                        .get(i + 1)
                        .and_then(|s| s.parse().ok())
                        .unwrap_or(DEFAULT_DEPTH);
                    i += 2;
                }
                "wtime" => {
                    wtime_ms = parts.get(i + 1).and_then(|s| s.parse().ok()).unwrap_or(0);
                    i += 2;
                }
                "btime" => {
                    btime_ms = parts.get(i + 1).and_then(|s| s.parse().ok()).unwrap_or(0);
                    i += 2;
                }
                "winc" => {
                    winc_ms = parts.get(i + 1).and_then(|s| s.parse().ok()).unwrap_or(0);
                    i += 2;
                }
                "binc" => {
                    binc_ms = parts.get(i + 1).and_then(|s| s.parse().ok()).unwrap_or(0);
                    i += 2;
                }
                _ => i += 1,
            }
        }

        let fen = self.fen.lock().unwrap().clone();
        let white_to_move = fen.split_whitespace().nth(1) == Some("w");
        let max_time_ms = movetime_ms.unwrap_or_else(|| {
            let (clock_ms, inc_ms) = if white_to_move {
                (wtime_ms, winc_ms)
            } else {
                (btime_ms, binc_ms)
            };
            if clock_ms == 0 {
                5_000
            } else {
                compute_budget_ms(Duration::from_millis(clock_ms), Duration::from_millis(inc_ms), 0)
            }
        });

        self.searching.store(true, Ordering::Relaxed);
        let engine = Arc::clone(&self.engine);
        let searching = Arc::clone(&self.searching);
        let start = Instant::now();
        let handle = thread::spawn(move || {
            let result = engine.search(&fen, max_time_ms, depth);
            searching.store(false, Ordering::Relaxed);
            (result, start.elapsed())
        });

        let (result, elapsed) = handle.join().expect("search thread should not panic");
        let pv: Vec<String> = result.pv.iter().map(std::string::ToString::to_string).collect();
        writeln!(
            stdout,
            "info depth {} score cp {} nodes {} time {} pv {}",
            result.depth,
            result.score,
            result.nodes,
            elapsed.as_millis(),
            pv.join(" ")
        )
        .ok();
        match result.best_move {
            Some(mv) => writeln!(stdout, "bestmove {mv}").ok(),
            None => writeln!(stdout, "bestmove 0000").ok(),
        };
        stdout.flush().ok();
    }
}

fn main() {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let session = Session::new();

    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some(&command) = parts.first() else {
            continue;
        };

        match command {
            "uci" => {
                writeln!(stdout, "id name chess_engine").ok();
                writeln!(stdout, "id author the engine team").ok();
                writeln!(stdout, "uciok").ok();
                stdout.flush().ok();
            }
            "isready" => {
                writeln!(stdout, "readyok").ok();
                stdout.flush().ok();
            }
            "ucinewgame" => {
                session.engine.reset_game_history();
                *session.fen.lock().unwrap() =
                    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1".to_string();
            }
            "position" => session.handle_position(&parts),
            "go" => session.handle_go(&parts, &mut stdout),
            "stop" => session.engine.stop(),
            "quit" => break,
            "setoption" => {
                // Name/value parsing for hash size is the only option wired
                // up for now; unrecognized options are accepted and ignored.
                if let Some(name_idx) = parts.iter().position(|&p| p == "name") {
                    if parts.get(name_idx + 1) == Some(&"Hash") {
                        if let Some(value_idx) = parts.iter().position(|&p| p == "value") {
                            if let Some(mb) = parts.get(value_idx + 1).and_then(|s| s.parse().ok()) {
                                session.engine.set_hash_size(mb);
                            }
                        }
                    }
                }
            }
            _ => {}
        }
    }
}
