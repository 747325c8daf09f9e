//! The emitter: a printf-style format string that mixes literal JSON
//! punctuation, bareword→quoted-key shorthand, and `%`-placeholders (§4.3).

use std::cell::Cell;

use crate::classify::{is_ident_cont, is_ident_start};
use crate::codec;
use crate::error::{JRResult, JsonError, JsonErrorKind};
use crate::escape::escape_into;
use crate::sink::{Sink, VecSink};

/// One variadic argument consumed by a placeholder, standing in for a
/// C-style varargs list: callers build a slice and placeholders consume a
/// prefix of it left to right.
pub enum PrintfArg<'a> {
    Bool(bool),
    /// `%H`: raw bytes, hex-encoded on emission.
    Hex(&'a [u8]),
    /// `%V`: raw bytes, base64-encoded on emission.
    Base64(&'a [u8]),
    /// `%Q` / `%.*Q`: `None` emits `null`.
    Quoted(Option<&'a str>),
    /// `%M`: a sub-emitter invoked with the output sink directly.
    Func(&'a dyn Fn(&mut dyn Sink)),
    Int(i64),
    UInt(u64),
    Float(f64),
    /// Raw (unquoted) string, used by the generic `%s` fallback.
    Str(&'a str),
    Char(char),
    /// `%n`: receives the output byte count observed at this point.
    CountOut(&'a Cell<i64>),
}

/// Writes `fmt` to `out`, consuming `args` left to right. Returns the total
/// number of bytes written (or that would have been written to a bounded
/// sink — see [`crate::sink::BufSink`]).
pub fn vprintf(out: &mut dyn Sink, fmt: &str, args: &[PrintfArg<'_>]) -> JRResult<usize> {
    let mut ai = 0usize;
    let mut written = 0usize;
    let mut i = 0usize;
    while i < fmt.len() {
        let c = fmt[i..].chars().next().unwrap();
        match c {
            ':' | ',' | '\r' | '\n' | '\t' | ' ' | '[' | ']' | '{' | '}' | '"' => {
                written += out.write_char(c);
                i += c.len_utf8();
            }
            c if is_ident_start(c) => {
                let start = i;
                let mut end = i + c.len_utf8();
                for ch in fmt[end..].chars() {
                    if is_ident_cont(ch) {
                        end += ch.len_utf8();
                    } else {
                        break;
                    }
                }
                written += out.write_char('"');
                written += out.write_str(&fmt[start..end]);
                written += out.write_char('"');
                i = end;
            }
            '%' => {
                let (consumed, w) = dispatch(out, &fmt[i..], args, &mut ai, written)?;
                written += w;
                i += consumed;
            }
            other => {
                written += out.write_char(other);
                i += other.len_utf8();
            }
        }
    }
    Ok(written)
}

/// Sugar that forwards to [`vprintf`] unchanged, mirroring the C
/// `printf`/`vprintf` split (§6) the same way `scanf` forwards to `vscanf`.
pub fn printf(out: &mut dyn Sink, fmt: &str, args: &[PrintfArg<'_>]) -> JRResult<usize> {
    vprintf(out, fmt, args)
}

/// Convenience wrapper that allocates a fresh buffer.
pub fn printf_to_string(fmt: &str, args: &[PrintfArg<'_>]) -> JRResult<String> {
    let mut sink = VecSink::new();
    vprintf(&mut sink, fmt, args)?;
    Ok(sink.into_string())
}

/// Opens `path`, writes `fmt`/`args`, appends a trailing newline, and closes
/// the file (§6 `fprintf`).
pub fn fprintf(path: impl AsRef<std::path::Path>, fmt: &str, args: &[PrintfArg<'_>]) -> JRResult<usize> {
    use crate::sink::FileSink;
    let mut sink = FileSink::create(path).map_err(io_err)?;
    let n = vprintf(&mut sink, fmt, args)?;
    sink.write_str("\n");
    sink.finish().map_err(io_err)?;
    Ok(n + 1)
}

fn io_err(e: std::io::Error) -> JsonError {
    JsonError::new(JsonErrorKind::Message(e.to_string()), 0)
}

/// Emits a JSON array whose elements are formatted by `elem_fmt`, a
/// closure-based stand-in for a C-style `(arr, arr_size, elem_size,
/// elem_fmt)` signature (§6 `printf_array`): it avoids `unsafe`
/// element-size arithmetic by letting Rust's type system carry the element
/// type instead of a raw pointer/stride pair.
pub fn printf_array<T>(
    out: &mut dyn Sink,
    items: &[T],
    elem_fmt: impl Fn(&T, &mut dyn Sink) -> JRResult<()>,
) -> JRResult<usize> {
    let mut written = out.write_char('[');
    for (idx, item) in items.iter().enumerate() {
        if idx > 0 {
            written += out.write_char(',');
        }
        elem_fmt(item, out)?;
    }
    written += out.write_char(']');
    Ok(written)
}

fn next_arg<'a, 'b>(args: &'b [PrintfArg<'a>], ai: &mut usize) -> JRResult<&'b PrintfArg<'a>> {
    let a = args.get(*ai).ok_or_else(|| {
        JsonError::new(
            JsonErrorKind::Message("printf: not enough arguments for format string".into()),
            0,
        )
    })?;
    *ai += 1;
    Ok(a)
}

fn dispatch(
    out: &mut dyn Sink,
    rest: &str,
    args: &[PrintfArg<'_>],
    ai: &mut usize,
    written_so_far: usize,
) -> JRResult<(usize, usize)> {
    debug_assert!(rest.starts_with('%'));
    if rest.starts_with("%%") {
        return Ok((2, out.write_char('%')));
    }
    if rest.starts_with("%M") {
        let a = next_arg(args, ai)?;
        let PrintfArg::Func(f) = a else {
            return Err(bad_arg("%M expects a Func argument"));
        };
        f(out);
        return Ok((2, 0));
    }
    if rest.starts_with("%B") {
        let a = next_arg(args, ai)?;
        let PrintfArg::Bool(b) = a else {
            return Err(bad_arg("%B expects a Bool argument"));
        };
        let w = out.write_str(if *b { "true" } else { "false" });
        return Ok((2, w));
    }
    if rest.starts_with("%H") {
        let a = next_arg(args, ai)?;
        let PrintfArg::Hex(bytes) = a else {
            return Err(bad_arg("%H expects a Hex argument"));
        };
        let mut w = out.write_char('"');
        w += out.write_str(&codec::hex_encode(bytes, false));
        w += out.write_char('"');
        return Ok((2, w));
    }
    if rest.starts_with("%V") {
        let a = next_arg(args, ai)?;
        let PrintfArg::Base64(bytes) = a else {
            return Err(bad_arg("%V expects a Base64 argument"));
        };
        let mut w = out.write_char('"');
        w += out.write_str(&codec::base64_encode(bytes));
        w += out.write_char('"');
        return Ok((2, w));
    }
    if rest.starts_with("%.*Q") || rest.starts_with("%Q") {
        let consumed = if rest.starts_with("%.*Q") { 4 } else { 2 };
        let a = next_arg(args, ai)?;
        let PrintfArg::Quoted(s) = a else {
            return Err(bad_arg("%Q expects a Quoted argument"));
        };
        let w = match s {
            None => out.write_str("null"),
            Some(s) => {
                let mut w = out.write_char('"');
                w += escape_into(s, false, out);
                w += out.write_char('"');
                w
            }
        };
        return Ok((consumed, w));
    }
    if rest.starts_with("%n") {
        let a = next_arg(args, ai)?;
        let PrintfArg::CountOut(cell) = a else {
            return Err(bad_arg("%n expects a CountOut argument"));
        };
        cell.set(written_so_far as i64);
        return Ok((2, 0));
    }
    generic_conversion(out, rest, args, ai)
}

fn bad_arg(msg: &'static str) -> JsonError {
    JsonError::new(JsonErrorKind::Message(msg.into()), 0)
}

struct ConversionSpec {
    left_align: bool,
    zero_pad: bool,
    plus_sign: bool,
    width: Option<usize>,
    precision: Option<usize>,
    specifier: char,
    len: usize,
}

/// Parses `% flags width .precision length specifier`, skipping length
/// modifiers (`hh`, `h`, `l`, `ll`, `L`, `z`, `j`, `t`, `I32`, `I64`) since
/// Rust values already carry their own width.
fn parse_spec(rest: &str) -> JRResult<ConversionSpec> {
    let bytes = rest.as_bytes();
    let mut i = 1usize; // skip '%'
    let mut left_align = false;
    let mut zero_pad = false;
    let mut plus_sign = false;
    while let Some(&b) = bytes.get(i) {
        match b {
            b'-' => left_align = true,
            b'0' => zero_pad = true,
            b'+' | b' ' | b'#' => plus_sign = plus_sign || b == b'+',
            _ => break,
        }
        i += 1;
    }
    let mut width = None;
    if bytes.get(i) == Some(&b'*') {
        i += 1;
        width = Some(0); // dynamic width unsupported without an extra arg slot; treated as unset
    } else {
        let start = i;
        while bytes.get(i).is_some_and(u8::is_ascii_digit) {
            i += 1;
        }
        if i > start {
            width = rest[start..i].parse().ok();
        }
    }
    let mut precision = None;
    if bytes.get(i) == Some(&b'.') {
        i += 1;
        if bytes.get(i) == Some(&b'*') {
            i += 1;
            precision = Some(0);
        } else {
            let start = i;
            while bytes.get(i).is_some_and(u8::is_ascii_digit) {
                i += 1;
            }
            precision = Some(rest[start..i].parse().unwrap_or(0));
        }
    }
    for modifier in ["I32", "I64", "hh", "ll", "h", "l", "L", "z", "j", "t"] {
        if rest[i..].starts_with(modifier) {
            i += modifier.len();
            break;
        }
    }
    let specifier = rest[i..]
        .chars()
        .next()
        .ok_or_else(|| bad_arg("truncated conversion spec"))?;
    i += specifier.len_utf8();
    Ok(ConversionSpec {
        left_align,
        zero_pad,
        plus_sign,
        width,
        precision,
        specifier,
        len: i,
    })
}

fn pad(s: String, spec: &ConversionSpec) -> String {
    let width = spec.width.unwrap_or(0);
    if s.len() >= width {
        return s;
    }
    let fill = if spec.zero_pad && !spec.left_align { '0' } else { ' ' };
    let mut padding: String = std::iter::repeat(fill).take(width - s.len()).collect();
    if spec.left_align {
        let mut out = s;
        out.push_str(&" ".repeat(width - out.len()));
        out
    } else {
        padding.push_str(&s);
        padding
    }
}

fn generic_conversion(
    out: &mut dyn Sink,
    rest: &str,
    args: &[PrintfArg<'_>],
    ai: &mut usize,
) -> JRResult<(usize, usize)> {
    let spec = parse_spec(rest)?;
    let arg = next_arg(args, ai)?;
    let rendered = match (spec.specifier, arg) {
        ('d' | 'i', PrintfArg::Int(v)) => {
            if spec.plus_sign && *v >= 0 {
                format!("+{v}")
            } else {
                v.to_string()
            }
        }
        ('u', PrintfArg::UInt(v)) => v.to_string(),
        ('x', PrintfArg::UInt(v)) => format!("{v:x}"),
        ('X', PrintfArg::UInt(v)) => format!("{v:X}"),
        ('o', PrintfArg::UInt(v)) => format!("{v:o}"),
        ('f' | 'F', PrintfArg::Float(v)) => match spec.precision {
            Some(p) => format!("{v:.p$}"),
            None => format!("{v:.6}"),
        },
        ('e', PrintfArg::Float(v)) => format!("{v:e}"),
        ('E', PrintfArg::Float(v)) => format!("{v:E}"),
        ('g' | 'G', PrintfArg::Float(v)) => format!("{v}"),
        ('c', PrintfArg::Char(c)) => c.to_string(),
        ('s', PrintfArg::Str(s)) => match spec.precision {
            Some(p) => s.chars().take(p).collect(),
            None => s.to_string(),
        },
        ('p', PrintfArg::UInt(v)) => format!("{v:#x}"),
        _ => return Err(bad_arg("printf: argument type does not match conversion specifier")),
    };
    let w = out.write_str(&pad(rendered, &spec));
    Ok((spec.len, w))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_six_object_literal_with_conversions() {
        let s = printf_to_string(
            "{a:%d, b:%Q}",
            &[PrintfArg::Int(1), PrintfArg::Quoted(Some("hi"))],
        )
        .unwrap();
        assert_eq!(s, r#"{"a":1, "b":"hi"}"#);
    }

    #[test]
    fn bareword_becomes_quoted_key() {
        let s = printf_to_string("foo", &[]).unwrap();
        assert_eq!(s, "\"foo\"");
    }

    #[test]
    fn printf_forwards_to_vprintf_unchanged() {
        let mut sink = VecSink::new();
        printf(&mut sink, "{a:%d}", &[PrintfArg::Int(7)]).unwrap();
        assert_eq!(sink.into_string(), r#"{"a":7}"#);
    }

    #[test]
    fn bool_emits_unquoted_literal() {
        let s = printf_to_string("%B", &[PrintfArg::Bool(true)]).unwrap();
        assert_eq!(s, "true");
    }

    #[test]
    fn quoted_null_argument_emits_null() {
        let s = printf_to_string("%Q", &[PrintfArg::Quoted(None)]).unwrap();
        assert_eq!(s, "null");
    }

    #[test]
    fn hex_and_base64_placeholders() {
        let bytes = [0xDEu8, 0xAD];
        let s = printf_to_string("%H", &[PrintfArg::Hex(&bytes)]).unwrap();
        assert_eq!(s, "\"dead\"");
        let s = printf_to_string("%V", &[PrintfArg::Base64(b"hi")]).unwrap();
        assert_eq!(s, "\"aGk=\"");
    }

    #[test]
    fn generic_float_precision() {
        let s = printf_to_string("%.2f", &[PrintfArg::Float(3.14159)]).unwrap();
        assert_eq!(s, "3.14");
    }

    #[test]
    fn count_out_reports_bytes_written_so_far() {
        let cell = Cell::new(-1i64);
        let s = printf_to_string("abc%n", &[PrintfArg::CountOut(&cell)]).unwrap();
        assert_eq!(s, "abc");
        assert_eq!(cell.get(), 3);
    }
}
