//! Line-aware whitespace tokenizer.

use std::collections::VecDeque;
use std::io::BufRead;

use nalgebra::Vector3;

use crate::error::{StlError, StlResult};

/// Pulls whitespace-delimited tokens from a buffered reader.
///
/// Input is read one line at a time, so the tokenizer knows which line
/// each token came from and what is left on the current line.
///
/// # Example
///
/// ```
/// use mesh_stl::Tokenizer;
///
/// let mut tkn = Tokenizer::from_text("vertex 1 2.5 -3e1\n");
/// tkn.expect("vertex").unwrap();
/// let v = tkn.read_vec3("vertex").unwrap();
/// assert_eq!((v.x, v.y, v.z), (1.0, 2.5, -30.0));
/// assert_eq!(tkn.next_token().unwrap(), None);
/// ```
#[derive(Debug)]
pub struct Tokenizer<R> {
    reader: R,
    pending: VecDeque<String>,
    buf: String,
    line: usize,
}

impl<'a> Tokenizer<&'a [u8]> {
    /// Tokenize an in-memory string.
    #[must_use]
    pub const fn from_text(text: &'a str) -> Self {
        Self::new(text.as_bytes())
    }
}

impl<R: BufRead> Tokenizer<R> {
    /// Create a tokenizer over `reader`.
    #[must_use]
    pub const fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
            buf: String::new(),
            line: 0,
        }
    }

    /// 1-based line of the most recently read token, 0 before any input.
    #[inline]
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    /// Read lines until at least one token is pending.
    ///
    /// Returns `false` at end of input.
    fn fill(&mut self) -> StlResult<bool> {
        while self.pending.is_empty() {
            self.buf.clear();
            if self.reader.read_line(&mut self.buf)? == 0 {
                return Ok(false);
            }
            self.line += 1;
            self.pending
                .extend(self.buf.split_whitespace().map(str::to_owned));
        }
        Ok(true)
    }

    /// Next token, or `None` at end of input.
    ///
    /// # Errors
    ///
    /// Returns [`StlError::Io`] if the underlying reader fails.
    pub fn next_token(&mut self) -> StlResult<Option<String>> {
        if !self.fill()? {
            return Ok(None);
        }
        Ok(self.pending.pop_front())
    }

    /// Look at the next token without consuming it.
    ///
    /// # Errors
    ///
    /// Returns [`StlError::Io`] if the underlying reader fails.
    pub fn peek_token(&mut self) -> StlResult<Option<&str>> {
        if !self.fill()? {
            return Ok(None);
        }
        Ok(self.pending.front().map(String::as_str))
    }

    /// Next token, treating end of input as an error.
    ///
    /// `expected` describes what the caller was looking for.
    ///
    /// # Errors
    ///
    /// Returns [`StlError::UnexpectedEof`] at end of input.
    pub fn require_token(&mut self, expected: &str) -> StlResult<String> {
        self.next_token()?.ok_or_else(|| StlError::UnexpectedEof {
            expected: expected.to_string(),
            line: self.line,
        })
    }

    /// Consume the next token and check that it equals `literal`.
    ///
    /// # Errors
    ///
    /// Returns [`StlError::UnexpectedToken`] on any other token, or
    /// [`StlError::UnexpectedEof`] at end of input.
    pub fn expect(&mut self, literal: &str) -> StlResult<()> {
        let expected = quoted(literal);
        let token = self.require_token(&expected)?;
        if token == literal {
            Ok(())
        } else {
            Err(self.unexpected(expected, token))
        }
    }

    /// Consume the next token as a finite `f64`.
    ///
    /// # Errors
    ///
    /// Returns [`StlError::InvalidNumber`] if the token is not a finite
    /// number, or [`StlError::UnexpectedEof`] at end of input.
    pub fn read_f64(&mut self, what: &'static str) -> StlResult<f64> {
        let token = self.require_token(&format!("number for {what}"))?;
        match token.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(StlError::InvalidNumber {
                what,
                found: token,
                line: self.line,
            }),
        }
    }

    /// Consume the next three tokens as a vector.
    ///
    /// # Errors
    ///
    /// Same as [`read_f64`](Self::read_f64).
    pub fn read_vec3(&mut self, what: &'static str) -> StlResult<Vector3<f64>> {
        let x = self.read_f64(what)?;
        let y = self.read_f64(what)?;
        let z = self.read_f64(what)?;
        Ok(Vector3::new(x, y, z))
    }

    /// Drain the tokens left on the current line, joined by single spaces.
    ///
    /// Draining stops before the first token that equals one of `stops`;
    /// that token stays queued for [`next_token`](Self::next_token).
    /// Returns an empty string when the last token ended its line.
    pub fn rest_of_line_until(&mut self, stops: &[&str]) -> String {
        let keep = self
            .pending
            .iter()
            .position(|token| stops.contains(&token.as_str()))
            .unwrap_or(self.pending.len());
        let rest: Vec<String> = self.pending.drain(..keep).collect();
        rest.join(" ")
    }

    /// Build an [`StlError::UnexpectedToken`] at the current line.
    pub(crate) fn unexpected(&self, expected: String, found: String) -> StlError {
        StlError::UnexpectedToken {
            expected,
            found,
            line: self.line,
        }
    }
}

/// Wrap a keyword in double quotes for diagnostics.
pub(crate) fn quoted(literal: &str) -> String {
    format!("\"{literal}\"")
}
