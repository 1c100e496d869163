// Parsing Utilities - line-oriented cursor shared by backend grammars
//
// Backend tools report one fact per line, so grammars are written as a walk
// over lines: consume a line, consume a labeled line, or discard a line.

pub mod ip;
pub mod nmcli;

use crate::domain::error::ParseError;

/// Cursor over the lines of a backend's captured output
#[derive(Debug, Clone)]
pub struct LineCursor<'a> {
    source_name: &'static str,
    rest: &'a str,
    line: usize,
}

impl<'a> LineCursor<'a> {
    /// # Arguments
    /// * `source_name` - Name reported in parse errors (e.g. "nmcli device show")
    /// * `input` - Captured text
    pub fn new(source_name: &'static str, input: &'a str) -> Self {
        Self {
            source_name,
            rest: input,
            line: 0,
        }
    }

    pub fn is_eof(&self) -> bool {
        self.rest.is_empty()
    }

    /// 1-based number of the line the cursor is about to read
    pub fn line_number(&self) -> usize {
        self.line + 1
    }

    /// Next line without consuming it
    pub fn peek(&self) -> Option<&'a str> {
        if self.is_eof() {
            return None;
        }
        Some(split_line(self.rest).0)
    }

    /// Consume to end of line, returning the line without its terminator
    pub fn rest_of_line(&mut self) -> Option<&'a str> {
        if self.is_eof() {
            return None;
        }
        let (line, rest) = split_line(self.rest);
        self.rest = rest;
        self.line += 1;
        Some(line)
    }

    /// Consume a line that must start with `label`, returning what follows it
    ///
    /// # Errors
    /// ParseError if input is exhausted or the line has another label. The
    /// cursor does not move on error.
    pub fn labeled(&mut self, label: &str) -> Result<&'a str, ParseError> {
        match self.peek() {
            Some(line) => match line.strip_prefix(label) {
                Some(value) => {
                    self.rest_of_line();
                    Ok(value)
                }
                None => Err(self.error(format!("expected `{}`", label))),
            },
            None => Err(self.error(format!("expected `{}`, found end of input", label))),
        }
    }

    /// Discard to end of line. Returns false at end of input.
    pub fn skip_line(&mut self) -> bool {
        self.rest_of_line().is_some()
    }

    /// Consume a `KEY:value` line, returning the key and the trimmed value
    ///
    /// # Errors
    /// ParseError if input is exhausted or the line has no colon.
    pub fn key_value(&mut self) -> Result<(&'a str, &'a str), ParseError> {
        let line = self
            .peek()
            .ok_or_else(|| self.error("expected `KEY:value`, found end of input"))?;
        let (key, value) = line
            .split_once(':')
            .ok_or_else(|| self.error(format!("expected `KEY:value`, found `{}`", line)))?;
        self.skip_line();
        Ok((key.trim(), value.trim()))
    }

    /// Build a ParseError pointing at the current line
    pub fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError {
            source_name: self.source_name.to_string(),
            line: self.line_number(),
            message: message.into(),
        }
    }
}

fn split_line(input: &str) -> (&str, &str) {
    match input.find('\n') {
        Some(idx) => {
            let line = &input[..idx];
            (line.strip_suffix('\r').unwrap_or(line), &input[idx + 1..])
        }
        None => (input, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rest_of_line_walks_lines() {
        let mut cursor = LineCursor::new("test", "one\r\ntwo\nthree");

        assert_eq!(cursor.rest_of_line(), Some("one"));
        assert_eq!(cursor.rest_of_line(), Some("two"));
        assert_eq!(cursor.line_number(), 3);
        assert_eq!(cursor.rest_of_line(), Some("three"));
        assert_eq!(cursor.rest_of_line(), None);
        assert!(cursor.is_eof());
    }

    #[test]
    fn test_trailing_newline_does_not_yield_empty_line() {
        let mut cursor = LineCursor::new("test", "only\n");

        assert_eq!(cursor.rest_of_line(), Some("only"));
        assert!(cursor.is_eof());
    }

    #[test]
    fn test_labeled_returns_remainder() {
        let mut cursor = LineCursor::new("test", "state: UP\nnext");

        assert_eq!(cursor.labeled("state:").unwrap(), " UP");
        assert_eq!(cursor.peek(), Some("next"));
    }

    #[test]
    fn test_labeled_mismatch_does_not_consume() {
        let mut cursor = LineCursor::new("tool", "foo\nbar");
        cursor.skip_line();

        let err = cursor.labeled("baz").unwrap_err();

        assert_eq!(err.source_name, "tool");
        assert_eq!(err.line, 2);
        assert_eq!(cursor.peek(), Some("bar"));
    }

    #[test]
    fn test_labeled_at_eof_fails() {
        let mut cursor = LineCursor::new("test", "");

        assert!(cursor.labeled("x").is_err());
    }

    #[test]
    fn test_skip_line() {
        let mut cursor = LineCursor::new("test", "a\nb");

        assert!(cursor.skip_line());
        assert!(cursor.skip_line());
        assert!(!cursor.skip_line());
    }

    #[test]
    fn test_key_value_trims_padding() {
        let mut cursor = LineCursor::new("test", "GENERAL.DEVICE:      wlan0\nIP6.GATEWAY:  fe80::1");

        assert_eq!(cursor.key_value().unwrap(), ("GENERAL.DEVICE", "wlan0"));
        assert_eq!(cursor.key_value().unwrap(), ("IP6.GATEWAY", "fe80::1"));
    }

    #[test]
    fn test_key_value_without_colon_fails() {
        let mut cursor = LineCursor::new("test", "garbage line");

        let err = cursor.key_value().unwrap_err();

        assert_eq!(err.line, 1);
        assert!(err.message.contains("garbage line"));
    }
}
