//! Line-oriented prompt helpers over generic input/output, so the shell can
//! be scripted in tests.

use std::io::{self, BufRead, Write};

pub struct Console<R, W> {
    input: R,
    pub output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `prompt` and read one trimmed line. `None` means end of input.
    pub fn line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(buf.trim().to_string()))
    }

    /// Prompt until the answer parses as an integer. `None` on end of input.
    pub fn integer(&mut self, prompt: &str) -> io::Result<Option<i64>> {
        loop {
            let Some(line) = self.line(prompt)? else {
                return Ok(None);
            };
            match line.parse::<i64>() {
                Ok(n) => return Ok(Some(n)),
                Err(_) => writeln!(self.output, "please enter a whole number")?,
            }
        }
    }

    /// Prompt until the answer parses as a number. `None` on end of input.
    pub fn decimal(&mut self, prompt: &str) -> io::Result<Option<f32>> {
        loop {
            let Some(line) = self.line(prompt)? else {
                return Ok(None);
            };
            match line.parse::<f32>() {
                Ok(n) => return Ok(Some(n)),
                Err(_) => writeln!(self.output, "please enter a number")?,
            }
        }
    }

    /// Menu selection in `0..=max`. `None` on end of input.
    pub fn choice(&mut self, prompt: &str, max: i64) -> io::Result<Option<i64>> {
        loop {
            let Some(n) = self.integer(prompt)? else {
                return Ok(None);
            };
            if (0..=max).contains(&n) {
                return Ok(Some(n));
            }
            writeln!(self.output, "please choose between 0 and {max}")?;
        }
    }
}
