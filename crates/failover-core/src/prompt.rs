//! Line-oriented operator prompt

use std::io::{BufRead, BufReader, Stdin, Stdout, Write};
use std::sync::Mutex;

use crate::error::{Error, Result};
use crate::traits::OperatorPrompt;

/// Prompt that writes a challenge and reads one line of input
///
/// Only the line terminator is stripped from the answer. End of input reads
/// as an empty answer. Bytes that are not UTF-8 are replaced, so such an
/// answer never matches a literal.
pub struct LinePrompt<R, W> {
    io: Mutex<(R, W)>,
}

impl LinePrompt<BufReader<Stdin>, Stdout> {
    /// Prompt on the controlling terminal
    pub fn stdio() -> Self {
        Self::new(BufReader::new(std::io::stdin()), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    /// Prompt using an explicit reader and writer
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            io: Mutex::new((reader, writer)),
        }
    }

    /// Recover the reader and writer
    pub fn into_inner(self) -> Result<(R, W)> {
        self.io
            .into_inner()
            .map_err(|_| Error::prompt("prompt lock poisoned"))
    }
}

impl<R, W> OperatorPrompt for LinePrompt<R, W>
where
    R: BufRead + Send,
    W: Write + Send,
{
    fn prompt(&self, message: &str) -> Result<String> {
        let mut guard = self
            .io
            .lock()
            .map_err(|_| Error::prompt("prompt lock poisoned"))?;
        let (reader, writer) = &mut *guard;

        write!(writer, "{}: ", message)?;
        writer.flush()?;

        let mut line = Vec::new();
        reader.read_until(b'\n', &mut line)?;

        let line = String::from_utf8_lossy(&line);
        Ok(strip_line_terminator(&line).to_string())
    }
}

fn strip_line_terminator(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}
