//! The walker: single-pass tokenization with path-tagged callbacks (§4.1).
//!
//! THE CORE of this crate. Every other operation (scanf, printf's `%M`
//! sub-parsers, setf, the neighbor-finder, the pretty-printer) is built on
//! top of [`walk`] and shares the path vocabulary it produces.

use crate::error::{JRResult, JsonError, JsonErrorKind};
use crate::options::WalkOptions;
use crate::path::PathBuf;
use crate::token::{Token, TokenType};

/// One callback invocation: a token plus the path/name context it was found at.
#[derive(Clone, Copy, Debug)]
pub struct WalkEvent<'a> {
    pub token: Token,
    /// NUL-free view of the current path buffer (§3).
    pub path: &'a str,
    /// Raw key bytes for an object member (unescaped quotes stripped, escapes
    /// left as-is); empty for array elements and the root value (§4.1
    /// "Callback contract").
    pub name: &'a str,
}

/// A notable, non-fatal event recorded during a walk when the `logging`
/// feature is enabled: path-buffer truncation, unquoted keys, and similar
/// leniency decisions a caller may want visibility into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkLogEntry {
    pub position: usize,
    pub message: &'static str,
    pub context: String,
    pub path: Option<String>,
}

#[derive(Default)]
struct Logger {
    enable: bool,
    track_path: bool,
    ctx_window: usize,
    entries: Vec<WalkLogEntry>,
}

impl Logger {
    fn log(&mut self, message: &'static str, position: usize, input: &str, path: &str) {
        if !self.enable {
            return;
        }
        let lo = floor_char_boundary(input, position.saturating_sub(self.ctx_window));
        let hi = ceil_char_boundary(input, (position + self.ctx_window).min(input.len()));
        self.entries.push(WalkLogEntry {
            position,
            message,
            context: input[lo..hi].to_string(),
            path: if self.track_path {
                Some(path.to_string())
            } else {
                None
            },
        });
    }
}

fn floor_char_boundary(s: &str, mut i: usize) -> usize {
    while i > 0 && !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

fn ceil_char_boundary(s: &str, mut i: usize) -> usize {
    while i < s.len() && !s.is_char_boundary(i) {
        i += 1;
    }
    i
}

/// Tokenize `input` as a single lenient JSON value, invoking `cb` once per
/// token. Returns the number of bytes consumed on success.
pub fn walk<F>(input: &str, opts: &WalkOptions, cb: F) -> JRResult<usize>
where
    F: FnMut(&WalkEvent<'_>),
{
    let (n, _log) = walk_inner(input, opts, cb, false);
    n
}

/// Same contract as [`walk`], additionally returning the diagnostic log
/// (always empty when the `logging` feature is not compiled in).
pub fn walk_with_log<F>(
    input: &str,
    opts: &WalkOptions,
    cb: F,
) -> (JRResult<usize>, Vec<WalkLogEntry>)
where
    F: FnMut(&WalkEvent<'_>),
{
    walk_inner(input, opts, cb, true)
}

fn walk_inner<F>(
    input: &str,
    opts: &WalkOptions,
    mut cb: F,
    want_log: bool,
) -> (JRResult<usize>, Vec<WalkLogEntry>)
where
    F: FnMut(&WalkEvent<'_>),
{
    #[cfg(feature = "logging")]
    let enable = want_log;
    #[cfg(not(feature = "logging"))]
    let enable = {
        let _ = want_log;
        false
    };

    let mut w = Walker {
        input,
        pos: 0,
        path: PathBuf::new(opts.path_capacity),
        opts,
        cb: &mut cb,
        logger: Logger {
            enable,
            track_path: opts.log_json_path,
            ctx_window: opts.log_context_window,
            entries: Vec::new(),
        },
    };
    let result = w.run();
    (result, w.logger.entries)
}

struct Walker<'i, 'o, F> {
    input: &'i str,
    pos: usize,
    path: PathBuf,
    opts: &'o WalkOptions,
    cb: &'o mut F,
    logger: Logger,
}

impl<'i, 'o, F> Walker<'i, 'o, F>
where
    F: FnMut(&WalkEvent<'_>),
{
    fn run(&mut self) -> JRResult<usize> {
        self.skip_ws();
        if self.input[self.pos..].is_empty() {
            return Err(JsonError::incomplete(self.pos));
        }
        self.parse_value("")?;
        self.skip_ws();
        if self.pos != self.input.len() {
            let c = self.input[self.pos..].chars().next().unwrap();
            return Err(JsonError::new(JsonErrorKind::UnexpectedChar(c), self.pos));
        }
        Ok(self.pos)
    }

    #[inline]
    fn rest(&self) -> &'i str {
        &self.input[self.pos..]
    }

    #[inline]
    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn skip_ws(&mut self) {
        let bytes = self.input.as_bytes();
        while self.pos < bytes.len() {
            match bytes[self.pos] {
                b' ' | b'\t' | b'\n' | b'\r' => self.pos += 1,
                _ => break,
            }
        }
    }

    fn emit(&mut self, token: Token, name: &str) {
        if self.path.ends_with_dot() {
            // Guard rail (§4.1): suppresses the phantom emission between
            // pushing '.' on object entry and appending the first key.
            return;
        }
        let path = self.path.as_str();
        (self.cb)(&WalkEvent { token, path, name });
    }

    fn expect_byte(&mut self, b: u8) -> JRResult<()> {
        if self.input.as_bytes().get(self.pos) == Some(&b) {
            self.pos += 1;
            Ok(())
        } else if self.pos >= self.input.len() {
            Err(JsonError::incomplete(self.pos))
        } else {
            let c = self.peek().unwrap();
            let kind = if b == b':' {
                JsonErrorKind::ColonExpected
            } else {
                JsonErrorKind::UnexpectedChar(c)
            };
            Err(JsonError::new(kind, self.pos))
        }
    }

    fn parse_value(&mut self, name: &str) -> JRResult<()> {
        self.skip_ws();
        match self.peek() {
            Some('{') => self.parse_object(name),
            Some('[') => self.parse_array(name),
            Some('"') => self.parse_string_value(name),
            Some(c) if c == '-' || c.is_ascii_digit() => self.parse_number(name),
            Some('t') => self.parse_literal("true", TokenType::True, name),
            Some('f') => self.parse_literal("false", TokenType::False, name),
            Some('n') => self.parse_literal("null", TokenType::Null, name),
            Some(c) => Err(JsonError::new(JsonErrorKind::UnexpectedChar(c), self.pos)),
            None => Err(JsonError::incomplete(self.pos)),
        }
    }

    fn parse_literal(&mut self, word: &'static str, ty: TokenType, name: &str) -> JRResult<()> {
        if self.rest().starts_with(word) {
            let start = self.pos;
            self.pos += word.len();
            self.emit(Token::scalar(ty, start, word.len()), name);
            Ok(())
        } else if self.rest().len() < word.len() && word.starts_with(self.rest()) {
            Err(JsonError::incomplete(self.pos))
        } else {
            Err(JsonError::new(
                JsonErrorKind::UnexpectedChar(self.peek().unwrap()),
                self.pos,
            ))
        }
    }

    fn parse_object(&mut self, name: &str) -> JRResult<()> {
        let start = self.pos;
        self.emit(Token::container_start(TokenType::ObjectStart), name);
        self.pos += 1; // '{'
        let entry_cp = self.path.checkpoint();
        self.path.push_raw(".");
        self.skip_ws();
        if self.peek() == Some('}') {
            self.pos += 1;
        } else {
            loop {
                self.skip_ws();
                let key = self.parse_key()?;
                self.skip_ws();
                self.expect_byte(b':')?;
                let key_cp = self.path.checkpoint();
                self.path.push_raw(key);
                if self.path.overflowed() {
                    self.logger
                        .log("path buffer truncated", self.pos, self.input, self.path.as_str());
                }
                self.parse_value(key)?;
                self.path.truncate_to(key_cp);
                self.skip_ws();
                match self.peek() {
                    Some(',') => {
                        self.pos += 1;
                        self.skip_ws();
                        if self.peek() == Some('}') {
                            self.pos += 1;
                            break;
                        }
                    }
                    Some('}') => {
                        self.pos += 1;
                        break;
                    }
                    Some(c) => return Err(JsonError::new(JsonErrorKind::UnexpectedChar(c), self.pos)),
                    None => return Err(JsonError::incomplete(self.pos)),
                }
            }
        }
        self.path.truncate_to(entry_cp);
        let end = self.pos;
        self.emit(
            Token::container_end(TokenType::ObjectEnd, start, end - start),
            name,
        );
        Ok(())
    }

    fn parse_array(&mut self, name: &str) -> JRResult<()> {
        let start = self.pos;
        self.emit(Token::container_start(TokenType::ArrayStart), name);
        self.pos += 1; // '['
        self.skip_ws();
        if self.peek() == Some(']') {
            self.pos += 1;
        } else {
            let mut idx = 0usize;
            loop {
                self.skip_ws();
                let cp = self.path.checkpoint();
                self.path.push_index(idx);
                self.parse_value("")?;
                self.path.truncate_to(cp);
                idx += 1;
                self.skip_ws();
                match self.peek() {
                    Some(',') => {
                        self.pos += 1;
                        self.skip_ws();
                        if self.peek() == Some(']') {
                            self.pos += 1;
                            break;
                        }
                    }
                    Some(']') => {
                        self.pos += 1;
                        break;
                    }
                    Some(c) => return Err(JsonError::new(JsonErrorKind::UnexpectedChar(c), self.pos)),
                    None => return Err(JsonError::incomplete(self.pos)),
                }
            }
        }
        let end = self.pos;
        self.emit(
            Token::container_end(TokenType::ArrayEnd, start, end - start),
            name,
        );
        Ok(())
    }

    /// `key = identifier | string` (§4.1 grammar). Returns a zero-copy slice
    /// of the raw key bytes (quotes stripped, escapes left as written).
    fn parse_key(&mut self) -> JRResult<&'i str> {
        match self.peek() {
            Some('"') => self.scan_string().map(|(s, e)| &self.input[s..e]),
            Some(c) if crate::classify::is_ident_start(c) => {
                if !self.opts.allow_unquoted_keys {
                    return Err(JsonError::new(JsonErrorKind::ObjectKeyExpected, self.pos));
                }
                let start = self.pos;
                let mut chars = self.rest().char_indices();
                chars.next(); // already validated as ident_start
                let mut end = start + c.len_utf8();
                for (i, ch) in chars {
                    if crate::classify::is_ident_cont(ch) {
                        end = start + i + ch.len_utf8();
                    } else {
                        break;
                    }
                }
                self.pos = end;
                self.logger
                    .log("unquoted object key", start, self.input, self.path.as_str());
                Ok(&self.input[start..end])
            }
            Some(_) => Err(JsonError::new(JsonErrorKind::ObjectKeyExpected, self.pos)),
            None => Err(JsonError::incomplete(self.pos)),
        }
    }

    fn parse_string_value(&mut self, name: &str) -> JRResult<()> {
        let (content_start, content_end) = self.scan_string()?;
        self.emit(
            Token::scalar(
                TokenType::String,
                content_start,
                content_end - content_start,
            ),
            name,
        );
        Ok(())
    }

    /// Scans a `"..."` literal starting at the current position, honoring
    /// backslash escapes so an escaped quote does not end the string early.
    /// Returns the byte range of the content, excluding the quotes, and
    /// leaves `self.pos` just past the closing quote.
    fn scan_string(&mut self) -> JRResult<(usize, usize)> {
        debug_assert_eq!(self.peek(), Some('"'));
        let quote_start = self.pos;
        self.pos += 1;
        let content_start = self.pos;
        loop {
            let Some(c) = self.peek() else {
                return Err(JsonError::incomplete(quote_start));
            };
            match c {
                '"' => {
                    let content_end = self.pos;
                    self.pos += 1;
                    return Ok((content_start, content_end));
                }
                '\\' => {
                    let esc = &self.input[self.pos + 1..];
                    let elen = crate::classify::escape_len(esc);
                    if elen == 0 {
                        return Err(JsonError::new(
                            JsonErrorKind::InvalidUnicodeEscape,
                            self.pos,
                        ));
                    }
                    self.pos += 1 + elen;
                }
                c if (c as u32) < 0x20 => {
                    return Err(JsonError::new(JsonErrorKind::UnexpectedChar(c), self.pos));
                }
                c => self.pos += c.len_utf8(),
            }
        }
    }

    fn parse_number(&mut self, name: &str) -> JRResult<()> {
        let start = self.pos;
        let bytes = self.input.as_bytes();
        if bytes.get(self.pos) == Some(&b'-') {
            self.pos += 1;
        }
        let int_start = self.pos;
        while self.pos < bytes.len() && bytes[self.pos].is_ascii_digit() {
            self.pos += 1;
        }
        if self.pos == int_start {
            return Err(self.number_error(start));
        }
        if bytes.get(self.pos) == Some(&b'.') {
            self.pos += 1;
            let frac_start = self.pos;
            while self.pos < bytes.len() && bytes[self.pos].is_ascii_digit() {
                self.pos += 1;
            }
            if self.pos == frac_start {
                return Err(self.number_error(start));
            }
        }
        if matches!(bytes.get(self.pos), Some(b'e') | Some(b'E')) {
            self.pos += 1;
            if matches!(bytes.get(self.pos), Some(b'+') | Some(b'-')) {
                self.pos += 1;
            }
            let exp_start = self.pos;
            while self.pos < bytes.len() && bytes[self.pos].is_ascii_digit() {
                self.pos += 1;
            }
            if self.pos == exp_start {
                return Err(self.number_error(start));
            }
        }
        self.emit(
            Token::scalar(TokenType::Number, start, self.pos - start),
            name,
        );
        Ok(())
    }

    fn number_error(&self, _start: usize) -> JsonError {
        if self.pos >= self.input.len() {
            JsonError::incomplete(self.pos)
        } else {
            JsonError::new(JsonErrorKind::UnexpectedChar(self.peek().unwrap()), self.pos)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(input: &str) -> JRResult<Vec<(TokenType, String, String)>> {
        let mut out = Vec::new();
        let opts = WalkOptions::default();
        walk(input, &opts, |ev| {
            out.push((ev.token.ty, ev.path.to_string(), ev.name.to_string()));
        })?;
        Ok(out)
    }

    #[test]
    fn nested_array_sequence_matches_spec_scenario_7() {
        let events = collect("[1,[2,3],4]").unwrap();
        let types: Vec<_> = events.iter().map(|(t, p, _)| (*t, p.clone())).collect();
        assert_eq!(
            types,
            vec![
                (TokenType::ArrayStart, "".into()),
                (TokenType::Number, "[0]".into()),
                (TokenType::ArrayStart, "[1]".into()),
                (TokenType::Number, "[1][0]".into()),
                (TokenType::Number, "[1][1]".into()),
                (TokenType::ArrayEnd, "[1]".into()),
                (TokenType::Number, "[2]".into()),
                (TokenType::ArrayEnd, "".into()),
            ]
        );
    }

    #[test]
    fn object_start_uses_pre_dot_path_and_end_mirrors_it() {
        let events = collect(r#"{"a":{"b":1}}"#).unwrap();
        assert_eq!(events[0], (TokenType::ObjectStart, "".into(), "".into()));
        assert_eq!(
            events[1],
            (TokenType::ObjectStart, ".a".into(), "a".into())
        );
        assert_eq!(events[2], (TokenType::Number, ".a.b".into(), "b".into()));
        assert_eq!(events[3], (TokenType::ObjectEnd, ".a".into(), "a".into()));
        assert_eq!(events[4], (TokenType::ObjectEnd, "".into(), "".into()));
    }

    #[test]
    fn empty_object_emits_no_phantom_scalar() {
        let events = collect("{}").unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].0, TokenType::ObjectStart);
        assert_eq!(events[1].0, TokenType::ObjectEnd);
    }

    #[test]
    fn unquoted_identifier_keys_are_accepted() {
        let events = collect("{a:1, b_2:true}").unwrap();
        assert_eq!(events[1], (TokenType::Number, ".a".into(), "a".into()));
        assert_eq!(events[2], (TokenType::True, ".b_2".into(), "b_2".into()));
    }

    #[test]
    fn escaped_quote_inside_string_does_not_end_it_early() {
        let events = collect(r#""a\"b""#).unwrap();
        assert_eq!(events[0].0, TokenType::String);
    }

    #[test]
    fn truncated_object_is_incomplete() {
        let err = collect(r#"{"a":1"#).unwrap_err();
        assert!(err.is_incomplete());
    }

    #[test]
    fn bad_structural_character_is_invalid() {
        let err = collect("[1, }").unwrap_err();
        assert!(!err.is_incomplete());
    }

    #[test]
    fn path_uniqueness_over_a_representative_document() {
        let events = collect(r#"{"a":[1,2,{"b":3}],"c":{"d":null}}"#).unwrap();
        let mut paths: Vec<_> = events
            .iter()
            .filter(|(t, ..)| {
                matches!(
                    t,
                    TokenType::Number | TokenType::Null | TokenType::True | TokenType::False
                )
            })
            .map(|(_, p, _)| p.clone())
            .collect();
        let before = paths.len();
        paths.sort();
        paths.dedup();
        assert_eq!(paths.len(), before);
    }
}
