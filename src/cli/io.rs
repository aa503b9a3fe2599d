use std::fmt;
use std::io::{self, BufRead, StdinLock, Stdout, Write};

/// Line-oriented console a menu renders to and reads selections from.
pub struct Console<R, W> {
    reader: R,
    writer: W,
}

impl Console<StdinLock<'static>, Stdout> {
    /// Console bound to the process standard input and output.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Print a line of text followed by a newline.
    pub fn println_text(&mut self, text: impl fmt::Display) -> io::Result<()> {
        writeln!(self.writer, "{text}")
    }

    pub fn blank_line(&mut self) -> io::Result<()> {
        writeln!(self.writer)
    }

    /// Write `prompt` without a newline and read one line of input.
    ///
    /// Returns `Ok(None)` once the reader is exhausted. Trailing line
    /// terminators are stripped; everything else is returned untouched.
    pub fn read_selection(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.writer, "{prompt}")?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn into_parts(self) -> (R, W) {
        (self.reader, self.writer)
    }
}
