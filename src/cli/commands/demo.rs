//! Spinner plus concurrent workers on one terminal. The spinner redraws its line
//! with raw writes to stderr, the way a progress renderer would; every log line
//! from the workers still starts on a wiped line.

use crate::level::Level;
use crate::logger::Logger;
use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

const FRAMES: &[&str] = &["-", "\\", "|", "/"];

#[must_use]
pub fn cmd_demo(logger: &Logger, workers: usize, steps: usize) -> ExitCode {
    let done = AtomicBool::new(false);
    let completed = AtomicUsize::new(0);
    let total = progress_total(workers, steps);
    // A spinner on a pipe is just noise in the captured output
    let draw = io::stderr().is_terminal();

    logger
        .event(Level::Info, "DEMO")
        .field("workers", workers)
        .field("steps", steps)
        .send("Starting");

    thread::scope(|s| {
        if draw {
            s.spawn(|| spin(&done, &completed, total));
        }

        let handles: Vec<_> = (0..workers)
            .map(|id| {
                let completed = &completed;
                s.spawn(move || {
                    for step in 1..=steps {
                        thread::sleep(step_delay(id, step));
                        if step % 2 == 0 {
                            logger
                                .event(Level::Debug, "WORKER")
                                .field("worker", id)
                                .field("step", step)
                                .send("Checkpoint");
                        }
                        logger
                            .event(Level::Info, "WORKER")
                            .field("worker", id)
                            .field("step", step)
                            .send("Step complete");
                        completed.fetch_add(1, Ordering::Relaxed);
                    }
                })
            })
            .collect();

        for handle in handles {
            let _ = handle.join();
        }
        done.store(true, Ordering::Relaxed);
    });

    if draw {
        let _ = io::stderr().write_all(crate::output::CLEAR_LINE);
    }
    logger.info("DEMO", "All workers finished");

    match logger.flush() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("linelog: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Steps the spinner counts toward; caps instead of overflowing on absurd flag values.
const fn progress_total(workers: usize, steps: usize) -> usize {
    workers.saturating_mul(steps)
}

/// Staggered so workers finish steps at different moments.
fn step_delay(worker: usize, step: usize) -> Duration {
    let millis = 120 + ((worker * 37 + step * 53) % 180);
    Duration::from_millis(u64::try_from(millis).unwrap_or(120))
}

fn spin(done: &AtomicBool, completed: &AtomicUsize, total: usize) {
    let mut stderr = io::stderr();
    for frame in FRAMES.iter().cycle() {
        if done.load(Ordering::Relaxed) {
            break;
        }
        let count = completed.load(Ordering::Relaxed);
        // No newline: the next draw, or the next log line, replaces this one
        let _ = write!(stderr, "\r{frame} working... {count}/{total}");
        let _ = stderr.flush();
        thread::sleep(Duration::from_millis(80));
    }
}
