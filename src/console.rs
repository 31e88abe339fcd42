// src/console.rs
// Line-oriented terminal dialogue. Generic over reader/writer so the query
// dialogue can be driven from a script in tests.

use std::io::{self, BufRead, Write};

use crate::error::{Result, VizError};

pub struct Console<R, W> {
    input: R,
    pub out: W,
}

impl Console<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Console::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, out: W) -> Self {
        Self { input, out }
    }

    /// Print `prompt` (no newline) and read one line, trimmed.
    /// End of input is `InputClosed`.
    pub fn ask(&mut self, prompt: &str) -> Result<String> {
        self.ask_line(prompt).map(|line| s!(line.trim()))
    }

    /// Like [`ask`](Self::ask) but only the line terminator is dropped.
    pub fn ask_line(&mut self, prompt: &str) -> Result<String> {
        write!(self.out, "{prompt}")?;
        self.out.flush()?;

        let mut line = s!();
        if self.input.read_line(&mut line)? == 0 {
            return Err(VizError::InputClosed);
        }
        let kept = line.strip_suffix('\n').unwrap_or(&line);
        Ok(s!(kept.strip_suffix('\r').unwrap_or(kept)))
    }

    /// Print `prompt` followed by an answer that was given up front.
    pub fn echo(&mut self, prompt: &str, answer: &str) -> Result<()> {
        say!(self.out, "{prompt}{answer}")
    }

    pub fn say(&mut self, msg: &str) -> Result<()> {
        say!(self.out, "{msg}")
    }

    pub fn into_output(self) -> W {
        self.out
    }
}
