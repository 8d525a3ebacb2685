//! Logical line reading for OBJ and MTL files
//!
//! Both formats share the same physical layout:
//! - A trailing `\` joins a line with the next one
//! - `#` starts a comment that runs to the end of the line
//! - The leading run of blank and comment lines forms the file header
//! - Statements are whitespace separated tokens, the first being the keyword

use std::io::BufRead;
use wavecrate_core::{Error, IndexOutOfRange, Result};

/// A single comment-stripped, continuation-joined statement
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    line_number: usize,
    text: String,
    spans: Vec<(usize, usize)>,
    keyword: String,
}

impl Statement {
    /// Tokenize a logical line. Returns `None` when the line holds no tokens.
    pub fn parse(line_number: usize, text: &str) -> Option<Self> {
        let text = text.trim().to_string();
        let mut spans = Vec::new();
        let mut start = None;

        for (i, c) in text.char_indices() {
            if c == ' ' || c == '\t' {
                if let Some(s) = start.take() {
                    spans.push((s, i));
                }
            } else if start.is_none() {
                start = Some(i);
            }
        }
        if let Some(s) = start {
            spans.push((s, text.len()));
        }

        let (first_start, first_end) = *spans.first()?;
        let keyword = text[first_start..first_end].to_ascii_lowercase();

        Some(Self {
            line_number,
            text,
            spans,
            keyword,
        })
    }

    /// 1-based line number where the statement started
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// The statement keyword, lower-cased
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// Number of tokens including the keyword
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// The token at `index`, 0 being the keyword as written
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`. Use [`Statement::get`] when the token
    /// count has not been checked.
    pub fn token(&self, index: usize) -> &str {
        let (start, end) = self.spans[index];
        &self.text[start..end]
    }

    /// The token at `index`, or `None` past the end of the statement
    pub fn get(&self, index: usize) -> Option<&str> {
        self.spans.get(index).map(|&(start, end)| &self.text[start..end])
    }

    /// Tokens from `start` onwards
    pub fn tokens_from(&self, start: usize) -> impl Iterator<Item = &str> + '_ {
        self.spans[start.min(self.spans.len())..]
            .iter()
            .map(move |&(s, e)| &self.text[s..e])
    }

    /// Raw text from token `index` to the end of the statement, original spacing kept
    pub fn remainder(&self, index: usize) -> &str {
        match self.spans.get(index) {
            Some(&(start, _)) => &self.text[start..],
            None => "",
        }
    }

    /// Tokens from `start` onwards joined with single spaces
    pub fn joined_from(&self, start: usize) -> String {
        self.tokens_from(start).collect::<Vec<_>>().join(" ")
    }

    /// The whole statement text after comment stripping
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Build a malformed statement error for this statement
    pub fn malformed<S: Into<String>>(&self, message: S) -> Error {
        Error::MalformedStatement {
            line: self.line_number,
            keyword: self.token(0).to_string(),
            message: message.into(),
        }
    }

    /// Build an obsolete statement error for this statement
    pub fn unsupported(&self) -> Error {
        Error::UnsupportedStatement {
            line: self.line_number,
            keyword: self.token(0).to_string(),
        }
    }

    /// Build a dangling reference error for this statement
    pub fn dangling(&self, err: IndexOutOfRange, target: &'static str) -> Error {
        Error::DanglingReference {
            line: self.line_number,
            keyword: self.token(0).to_string(),
            index: err.index,
            count: err.count,
            target,
        }
    }

    /// Require a token count (including the keyword) within `min..=max`
    pub fn expect_len(&self, min: usize, max: usize) -> Result<()> {
        let len = self.len();
        if len < min || len > max {
            let expected = if min == max {
                format!("{}", min - 1)
            } else if max == usize::MAX {
                format!("at least {}", min - 1)
            } else {
                format!("{} to {}", min - 1, max - 1)
            };
            return Err(self.malformed(format!("expected {} values, found {}", expected, len - 1)));
        }
        Ok(())
    }

    /// Require at least `min` tokens (including the keyword)
    pub fn expect_min_len(&self, min: usize) -> Result<()> {
        self.expect_len(min, usize::MAX)
    }

    /// Parse the token at `index` as a float
    pub fn parse_f32(&self, index: usize) -> Result<f32> {
        let token = self.token(index);
        token
            .parse::<f32>()
            .map_err(|_| self.malformed(format!("invalid number '{}'", token)))
    }

    /// Parse the token at `index` as an integer
    pub fn parse_i32(&self, index: usize) -> Result<i32> {
        let token = self.token(index);
        token
            .parse::<i32>()
            .map_err(|_| self.malformed(format!("invalid integer '{}'", token)))
    }

    /// Parse the token at `index` as a raw (possibly negative) index
    pub fn parse_index(&self, index: usize) -> Result<i64> {
        let token = self.token(index);
        token
            .parse::<i64>()
            .map_err(|_| self.malformed(format!("invalid index '{}'", token)))
    }

    /// Parse an `on` / `off` switch
    pub fn parse_switch(&self, index: usize) -> Result<bool> {
        let token = self.token(index);
        match token.to_ascii_lowercase().as_str() {
            "on" => Ok(true),
            "off" => Ok(false),
            _ => Err(self.malformed(format!("expected 'on' or 'off', found '{}'", token))),
        }
    }

    /// Parse a `u` / `v` direction, returning true for `u`
    pub fn parse_direction(&self, index: usize) -> Result<bool> {
        let token = self.token(index);
        match token.to_ascii_lowercase().as_str() {
            "u" => Ok(true),
            "v" => Ok(false),
            _ => Err(self.malformed(format!("unknown direction '{}'", token))),
        }
    }

    /// Parse all tokens from `start` as floats
    pub fn parse_floats_from(&self, start: usize) -> Result<Vec<f32>> {
        (start..self.len()).map(|i| self.parse_f32(i)).collect()
    }
}

/// Reader that turns physical lines into logical [`Statement`]s
pub struct LineReader<R> {
    reader: R,
    line_number: usize,
    header: Vec<String>,
    in_header: bool,
    buffer: String,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_number: 0,
            header: Vec::new(),
            in_header: true,
            buffer: String::new(),
        }
    }

    /// Read one physical line, trimmed. `None` at end of input.
    fn read_physical_line(&mut self) -> Result<Option<String>> {
        self.buffer.clear();
        let bytes_read = self.reader.read_line(&mut self.buffer)?;
        if bytes_read == 0 {
            return Ok(None);
        }
        self.line_number += 1;
        Ok(Some(self.buffer.trim().to_string()))
    }

    /// Read the next statement, skipping blank and comment lines
    pub fn next_statement(&mut self) -> Result<Option<Statement>> {
        loop {
            let mut line = match self.read_physical_line()? {
                Some(line) => line,
                None => return Ok(None),
            };
            let line_number = self.line_number;

            while line.ends_with('\\') {
                line.pop();
                match self.read_physical_line()? {
                    Some(next) => {
                        line.push_str(&next);
                        line = line.trim().to_string();
                    }
                    None => break,
                }
            }
            let line = line.trim();

            if line.is_empty() {
                if self.in_header {
                    self.header.push(String::new());
                }
                continue;
            }

            if let Some(comment) = line.strip_prefix('#') {
                if self.in_header {
                    self.header.push(comment.to_string());
                }
                continue;
            }

            self.in_header = false;

            let content = match line.find('#') {
                Some(pos) => &line[..pos],
                None => line,
            };

            if let Some(statement) = Statement::parse(line_number, content) {
                return Ok(Some(statement));
            }
        }
    }

    /// Header lines collected so far, without their leading `#`
    pub fn header_lines(&self) -> &[String] {
        &self.header
    }

    /// Header lines joined with `\n`
    pub fn header_text(&self) -> String {
        self.header.join("\n")
    }
}

impl<R: BufRead> Iterator for LineReader<R> {
    type Item = Result<Statement>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_statement().transpose()
    }
}
