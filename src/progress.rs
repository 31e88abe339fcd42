// src/progress.rs
/// Lightweight progress reporting used by long-running operations (sourcing/export).
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the total number of items (if known).
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called when one logical unit completes (e.g., a team's game log was read).
    fn item_done(&mut self, _team: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// Prints status lines to stdout, counting finished items.
#[derive(Default)]
pub struct PrintProgress {
    total: usize,
    done: usize,
}

impl Progress for PrintProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        self.done = 0;
    }

    fn log(&mut self, msg: &str) {
        println!("{msg}");
    }

    fn item_done(&mut self, team: &str) {
        self.done += 1;
        if self.total > 1 {
            println!("  [{}/{}] {team}", self.done, self.total);
        }
    }
}

/// Collects every message; handy in tests.
#[derive(Default, Debug)]
pub struct RecordProgress {
    pub lines: Vec<String>,
    pub done: Vec<String>,
    pub finished: bool,
}

impl Progress for RecordProgress {
    fn log(&mut self, msg: &str) {
        self.lines.push(s!(msg));
    }

    fn item_done(&mut self, team: &str) {
        self.done.push(s!(team));
    }

    fn finish(&mut self) {
        self.finished = true;
    }
}
