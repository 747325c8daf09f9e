//! The extractor: compiles a format string into `(path, converter)` pairs
//! and drives the walker once per pair (§4.2).

use crate::codec;
use crate::error::{JRResult, JsonError, JsonErrorKind};
use crate::escape::unescape;
use crate::options::WalkOptions;
use crate::token::{Token, TokenType};
use crate::walker::walk;

/// One conversion target, standing in for a C-style variadic argument
/// list: callers build a slice of these and `vscanf` fills each one in
/// place as its placeholder is matched.
pub enum ScanfArg<'a> {
    /// `%B`: set to the token's truthiness (`TRUE` → true, else false).
    Bool(&'a mut bool),
    /// `%Q`: unescaped string copy; `None` when the token is `NULL` or the
    /// path never matched.
    Str(&'a mut Option<String>),
    /// `%T`: the raw token descriptor, verbatim.
    Token(&'a mut Option<Token>),
    /// `%M`: invoked with the token's raw span and the original input.
    Func(&'a mut dyn FnMut(&str)),
    /// `%H`: hex-decoded bytes.
    Hex(&'a mut Option<Vec<u8>>),
    /// `%V`: base64-decoded bytes.
    Base64(&'a mut Option<Vec<u8>>),
    /// Any other `%` specifier: delegates to the host numeric/string parser
    /// over a bounded stack-sized copy of the token's raw text (§4.2 "other").
    Int(&'a mut Option<i64>),
    UInt(&'a mut Option<u64>),
    Float(&'a mut Option<f64>),
}

/// Parses `fmt` against `input`, filling `args` left to right. Returns the
/// number of conversions that actually wrote a result (§4.2: allocator
/// failures and absent matches do not count).
pub fn vscanf(input: &str, fmt: &str, args: &mut [ScanfArg<'_>]) -> JRResult<usize> {
    let mut cursor = String::new();
    let mut ai = 0usize;
    let mut conversions = 0usize;
    let bytes = fmt.as_bytes();
    let mut i = 0usize;
    while i < bytes.len() {
        let c = fmt[i..].chars().next().unwrap();
        match c {
            '{' => {
                cursor.push('.');
                i += 1;
            }
            '}' => {
                if let Some(dot) = cursor.rfind('.') {
                    cursor.truncate(dot);
                }
                i += 1;
            }
            ':' | ',' | ' ' | '\t' | '\r' | '\n' => {
                i += 1;
            }
            '[' => {
                let digits_end = fmt[i + 1..]
                    .find(']')
                    .map(|n| i + 1 + n)
                    .ok_or_else(|| JsonError::new(JsonErrorKind::Incomplete, i))?;
                cursor.push('[');
                cursor.push_str(&fmt[i + 1..digits_end]);
                cursor.push(']');
                i = digits_end + 1;
            }
            ']' => {
                i += 1;
            }
            '%' => {
                let (consumed, matched) = apply_conversion(input, &fmt[i..], &cursor, args, &mut ai)?;
                if matched {
                    conversions += 1;
                }
                i += consumed;
            }
            c if crate::classify::is_ident_start(c) || c == '"' => {
                let (key, consumed) = read_key(&fmt[i..])?;
                if let Some(dot) = cursor.rfind('.') {
                    cursor.truncate(dot + 1);
                } else {
                    cursor.push('.');
                }
                cursor.push_str(&key);
                i += consumed;
            }
            _ => {
                i += c.len_utf8();
            }
        }
    }
    Ok(conversions)
}

/// Sugar that forwards to [`vscanf`] unchanged, mirroring the C
/// `scanf`/`vscanf` split (§6).
pub fn scanf(input: &str, fmt: &str, args: &mut [ScanfArg<'_>]) -> JRResult<usize> {
    vscanf(input, fmt, args)
}

/// Reads one bareword or quoted key from the scanf format string, returning
/// its raw text (unescaped if quoted) and the number of bytes consumed.
fn read_key(rest: &str) -> JRResult<(String, usize)> {
    if rest.starts_with('"') {
        let body = &rest[1..];
        let end = body
            .find('"')
            .ok_or_else(|| JsonError::new(JsonErrorKind::Incomplete, 0))?;
        Ok((unescape(&body[..end])?, end + 2))
    } else {
        let mut end = 0usize;
        for ch in rest.chars() {
            if crate::classify::is_ident_cont(ch) {
                end += ch.len_utf8();
            } else {
                break;
            }
        }
        Ok((rest[..end].to_string(), end))
    }
}

/// Runs one walker pass, matching `target` exactly, feeding the matched
/// token into the conversion named by the placeholder at `rest[0..]`.
/// Returns `(bytes of placeholder consumed, did a conversion happen)`.
fn apply_conversion(
    input: &str,
    rest: &str,
    target: &str,
    args: &mut [ScanfArg<'_>],
    ai: &mut usize,
) -> JRResult<(usize, bool)> {
    debug_assert!(rest.starts_with('%'));
    let (kind, consumed) = classify_placeholder(rest)?;
    let arg = args
        .get_mut(*ai)
        .ok_or_else(|| JsonError::new(JsonErrorKind::Message("scanf: not enough arguments".into()), 0))?;
    *ai += 1;

    let mut found: Option<Token> = None;
    let opts = WalkOptions::default();
    walk(input, &opts, |ev| {
        if found.is_none() && ev.path == target {
            found = Some(ev.token);
        }
    })?;
    let Some(token) = found else {
        return Ok((consumed, false));
    };

    let matched = match (kind, arg) {
        (Placeholder::Bool, ScanfArg::Bool(out)) => {
            **out = token.ty == TokenType::True;
            true
        }
        (Placeholder::Quoted, ScanfArg::Str(out)) => {
            if token.ty == TokenType::Null {
                **out = None;
                true
            } else {
                **out = Some(unescape(token.text(input))?);
                true
            }
        }
        (Placeholder::TokenCopy, ScanfArg::Token(out)) => {
            **out = Some(token);
            true
        }
        (Placeholder::Func, ScanfArg::Func(f)) => {
            f(token.text(input));
            true
        }
        (Placeholder::Hex, ScanfArg::Hex(out)) => match codec::hex_decode(token.text(input)) {
            Some(bytes) => {
                **out = Some(bytes);
                true
            }
            None => false,
        },
        (Placeholder::Base64, ScanfArg::Base64(out)) => {
            match codec::base64_decode(token.text(input)) {
                Some(bytes) => {
                    **out = Some(bytes);
                    true
                }
                None => false,
            }
        }
        (Placeholder::Other, ScanfArg::Int(out)) => match token.text(input).parse::<i64>() {
            Ok(v) => {
                **out = Some(v);
                true
            }
            Err(_) => false,
        },
        (Placeholder::Other, ScanfArg::UInt(out)) => match token.text(input).parse::<u64>() {
            Ok(v) => {
                **out = Some(v);
                true
            }
            Err(_) => false,
        },
        (Placeholder::Other, ScanfArg::Float(out)) => match token.text(input).parse::<f64>() {
            Ok(v) => {
                **out = Some(v);
                true
            }
            Err(_) => false,
        },
        _ => {
            return Err(JsonError::new(
                JsonErrorKind::Message("scanf: argument type does not match placeholder".into()),
                0,
            ))
        }
    };
    Ok((consumed, matched))
}

enum Placeholder {
    Bool,
    Quoted,
    TokenCopy,
    Func,
    Hex,
    Base64,
    Other,
}

fn classify_placeholder(rest: &str) -> JRResult<(Placeholder, usize)> {
    if rest.starts_with("%B") {
        Ok((Placeholder::Bool, 2))
    } else if rest.starts_with("%Q") {
        Ok((Placeholder::Quoted, 2))
    } else if rest.starts_with("%T") {
        Ok((Placeholder::TokenCopy, 2))
    } else if rest.starts_with("%M") {
        Ok((Placeholder::Func, 2))
    } else if rest.starts_with("%H") {
        Ok((Placeholder::Hex, 2))
    } else if rest.starts_with("%V") {
        Ok((Placeholder::Base64, 2))
    } else {
        // Generic conversion: skip flags/width/precision/length, stop at specifier.
        let mut i = 1usize;
        let bytes = rest.as_bytes();
        while bytes.get(i).is_some_and(|b| matches!(b, b'-' | b'+' | b'0'..=b'9' | b'.' | b'*')) {
            i += 1;
        }
        for modifier in ["I32", "I64", "hh", "ll", "h", "l", "L", "z", "j", "t"] {
            if rest[i..].starts_with(modifier) {
                i += modifier.len();
                break;
            }
        }
        let Some(c) = rest[i..].chars().next() else {
            return Err(JsonError::new(JsonErrorKind::Message("truncated scanf placeholder".into()), 0));
        };
        Ok((Placeholder::Other, i + c.len_utf8()))
    }
}

/// `scanf_array_elem`: fetches the token at `path[idx]` directly, without a
/// conversion (§6).
pub fn scanf_array_elem(input: &str, path: &str, idx: usize) -> JRResult<Option<Token>> {
    let target = format!("{path}[{idx}]");
    let mut found = None;
    let opts = WalkOptions::default();
    walk(input, &opts, |ev| {
        if found.is_none() && ev.path == target {
            found = Some(ev.token);
        }
    })?;
    Ok(found)
}
