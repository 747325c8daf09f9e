//! Pretty-printer: a thin walker callback (§6 "Pretty-print layout").
//!
//! Two-space indent, one container level per line, `"key": value` members,
//! commas between siblings, no trailing commas, and a newline between
//! container entries and before the closing bracket when the container is
//! non-empty.

use crate::error::JRResult;
use crate::options::WalkOptions;
use crate::sink::Sink;
use crate::token::TokenType;
use crate::walker::walk;

const INDENT: &str = "  ";

pub fn prettify(input: &str, out: &mut dyn Sink) -> JRResult<usize> {
    let opts = WalkOptions::default();
    let mut depth = 0usize;
    let mut first_at_depth = vec![true];
    let mut written = 0usize;
    let mut emitted_any = false;

    walk(input, &opts, |ev| {
        let is_close = matches!(ev.token.ty, TokenType::ObjectEnd | TokenType::ArrayEnd);
        if is_close {
            depth -= 1;
            let was_empty = first_at_depth.pop().unwrap_or(true);
            if !was_empty {
                written += out.write_char('\n');
                written += out.write_str(&INDENT.repeat(depth));
            }
        } else {
            let first = first_at_depth.last_mut().unwrap();
            if !*first {
                written += out.write_char(',');
            }
            if emitted_any {
                written += out.write_char('\n');
                written += out.write_str(&INDENT.repeat(depth));
            }
            *first = false;
            emitted_any = true;
        }

        if !ev.name.is_empty() {
            written += out.write_char('"');
            written += out.write_str(ev.name);
            written += out.write_str("\": ");
        }

        match ev.token.ty {
            TokenType::ObjectStart => {
                written += out.write_char('{');
                depth += 1;
                first_at_depth.push(true);
            }
            TokenType::ArrayStart => {
                written += out.write_char('[');
                depth += 1;
                first_at_depth.push(true);
            }
            TokenType::ObjectEnd => written += out.write_char('}'),
            TokenType::ArrayEnd => written += out.write_char(']'),
            TokenType::String => {
                written += out.write_char('"');
                written += out.write_str(ev.token.text(input));
                written += out.write_char('"');
            }
            TokenType::Number | TokenType::True | TokenType::False | TokenType::Null => {
                written += out.write_str(ev.token.text(input));
            }
            TokenType::Invalid => {}
        }
    })?;
    Ok(written)
}

pub fn prettify_to_string(input: &str) -> JRResult<String> {
    let mut sink = crate::sink::VecSink::new();
    prettify(input, &mut sink)?;
    Ok(sink.into_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pretty_prints_nested_structure() {
        let out = prettify_to_string(r#"{"a":1,"b":[2,3]}"#).unwrap();
        assert_eq!(
            out,
            "{\n  \"a\": 1,\n  \"b\": [\n    2,\n    3\n  ]\n}"
        );
    }

    #[test]
    fn empty_containers_stay_on_one_line() {
        assert_eq!(prettify_to_string("{}").unwrap(), "{}");
        assert_eq!(prettify_to_string("[]").unwrap(), "[]");
    }

    #[test]
    fn round_trip_preserves_token_sequence() {
        let compact = r#"{"a":1,"b":[2,3],"c":null}"#;
        let pretty = prettify_to_string(compact).unwrap();

        let collect = |s: &str| -> Vec<TokenType> {
            let mut types = Vec::new();
            walk(s, &WalkOptions::default(), |ev| types.push(ev.token.ty)).unwrap();
            types
        };
        assert_eq!(collect(compact), collect(&pretty));
    }
}
