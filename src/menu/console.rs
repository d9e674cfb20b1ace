use std::collections::VecDeque;
use std::fmt::Display;
use std::io::{self, BufRead, Write};

const CLEAR_SCREEN: &str = "\x1B[2J\x1B[1;1H";

/// Line-oriented console that hands out whitespace-separated tokens.
///
/// Tokens left over on a line are kept for the next prompt and blank lines
/// are skipped, the way stream extraction behaves on a terminal.
pub struct Console<R: BufRead, W: Write> {
    input: R,
    output: W,
    pending: VecDeque<String>,
    clear_screen: bool
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, clear_screen: bool) -> Self {
        Self {
            input,
            output,
            pending: VecDeque::new(),
            clear_screen
        }
    }

    pub fn say(&mut self, message: impl Display) -> io::Result<()> {
        writeln!(self.output, "{message}")
    }

    /// Writes `message` without a newline and waits for the next token.
    /// Returns `None` once input is exhausted.
    pub fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.output, "{message}")?;
        self.output.flush()?;
        self.next_token()
    }

    pub fn clear(&mut self) -> io::Result<()> {
        if self.clear_screen {
            write!(self.output, "{CLEAR_SCREEN}")?;
        }

        Ok(())
    }

    fn next_token(&mut self) -> io::Result<Option<String>> {
        while self.pending.is_empty() {
            let mut line = String::new();

            if self.input.read_line(&mut line)? == 0 {
                return Ok(None)
            }

            self.pending.extend(line.split_whitespace().map(str::to_string));
        }

        Ok(self.pending.pop_front())
    }
}
