//! The mutator: produces a modified copy of a document with one value at a
//! given path inserted, replaced, or deleted, synthesizing intermediate
//! containers as needed (§4.4).

use crate::error::JRResult;
use crate::options::WalkOptions;
use crate::printf::{vprintf, PrintfArg};
use crate::sink::Sink;
use crate::token::TokenType;
use crate::walker::{walk, WalkLogEntry};

/// What to do at `path`: replace/insert a value rendered by the printf
/// engine, or delete the existing member.
pub enum Mutation<'a> {
    Delete,
    Set {
        fmt: &'a str,
        args: &'a [PrintfArg<'a>],
    },
}

/// `json_path` uses the walker's own path syntax (`.foo.bar`, `.a[0].b`).
/// Returns `true` if an exact pre-existing span was found and replaced or
/// deleted — `false` for a pure insertion, even though the emitted document
/// differs from `input` in that case too (§4.4 concrete scenario 1).
pub fn vsetf(input: &str, json_path: &str, mutation: Mutation<'_>, out: &mut dyn Sink) -> JRResult<bool> {
    vsetf_inner(input, json_path, mutation, out, None)
}

/// Sugar that forwards to [`vsetf`] unchanged, mirroring the C
/// `setf`/`vsetf` split (§6) the same way `scanf` forwards to `vscanf`.
pub fn setf(input: &str, json_path: &str, mutation: Mutation<'_>, out: &mut dyn Sink) -> JRResult<bool> {
    vsetf(input, json_path, mutation, out)
}

/// Same contract as [`vsetf`], additionally returning a diagnostic log entry
/// whenever the mutation synthesizes one or more missing containers instead
/// of replacing/deleting an exact pre-existing span — mirrors
/// [`crate::walker::walk_with_log`]'s always-empty-under-`cfg` degradation
/// when the `logging` feature is off.
pub fn vsetf_with_log(
    input: &str,
    json_path: &str,
    mutation: Mutation<'_>,
    out: &mut dyn Sink,
) -> (JRResult<bool>, Vec<WalkLogEntry>) {
    let mut log = Vec::new();
    let result = vsetf_inner(input, json_path, mutation, out, Some(&mut log));
    (result, log)
}

fn locate(input: &str, json_path: &str) -> JRResult<(Option<(usize, usize)>, Option<(String, usize, usize)>)> {
    let opts = WalkOptions::default();
    let mut exact: Option<(usize, usize)> = None;
    let mut deepest: Option<(String, usize, usize)> = None;

    walk(input, &opts, |ev| {
        if ev.path == json_path {
            if let Some(span) = ev.token.span() {
                exact = Some(span);
            }
        } else if json_path.starts_with(ev.path)
            && ev.path.len() < json_path.len()
            && matches!(ev.token.ty, TokenType::ObjectEnd | TokenType::ArrayEnd)
        {
            let is_deeper = deepest.as_ref().is_none_or(|(p, ..)| ev.path.len() > p.len());
            if is_deeper {
                if let Some((start, end)) = ev.token.span() {
                    deepest = Some((ev.path.to_string(), start, end));
                }
            }
        }
    })?;
    Ok((exact, deepest))
}

fn vsetf_inner(
    input: &str,
    json_path: &str,
    mutation: Mutation<'_>,
    out: &mut dyn Sink,
    log: Option<&mut Vec<WalkLogEntry>>,
) -> JRResult<bool> {
    let (exact, deepest) = locate(input, json_path)?;

    match (exact, mutation) {
        (Some((pos, end)), Mutation::Delete) => {
            emit_deletion(input, pos, end, out);
            Ok(true)
        }
        (Some((pos, end)), Mutation::Set { fmt, args }) => {
            out.write_str(&input[..pos]);
            vprintf(out, fmt, args)?;
            out.write_str(&input[end..]);
            Ok(true)
        }
        (None, Mutation::Delete) => {
            out.write_str(input);
            Ok(false)
        }
        (None, Mutation::Set { fmt, args }) => {
            match deepest {
                None => {
                    out.write_str(input);
                    Ok(false)
                }
                Some((ancestor_path, open, after)) => {
                    let close = after - 1;
                    let content_is_empty = input[open + 1..close].trim().is_empty();
                    out.write_str(&input[..close]);
                    if !content_is_empty {
                        out.write_char(',');
                    }
                    let remaining = &json_path[ancestor_path.len()..];
                    if let Some(log) = log {
                        record_synthesis(log, close, &ancestor_path, json_path);
                    }
                    emit_synthesized(out, remaining, fmt, args)?;
                    out.write_str(&input[close..]);
                    Ok(false)
                }
            }
        }
    }
}

/// Records a "setf synthesized missing containers" log entry (only under
/// the `logging` feature, mirroring [`crate::walker::Logger::log`]'s own
/// cfg-gated no-op degradation).
#[cfg_attr(not(feature = "logging"), allow(unused_variables))]
fn record_synthesis(log: &mut Vec<WalkLogEntry>, position: usize, ancestor_path: &str, json_path: &str) {
    #[cfg(feature = "logging")]
    log.push(WalkLogEntry {
        position,
        message: "setf synthesized missing containers",
        context: json_path.to_string(),
        path: Some(ancestor_path.to_string()),
    });
}

/// Removes the member spanning `[pos, end)` from `input`, including the
/// delimiter that separates it from its siblings, writing the result to
/// `out`. Leaves any preceding `{`/`[` (first-child case) or following
/// `,`/`}`/`]` intact so the document stays well-formed.
fn emit_deletion(input: &str, pos: usize, end: usize, out: &mut dyn Sink) {
    let bytes = input.as_bytes();
    let mut left = pos;
    while left > 0 && !matches!(bytes[left - 1], b',' | b'{' | b'[') {
        left -= 1;
    }
    if left == 0 {
        out.write_str(input);
        return;
    }
    match bytes[left - 1] {
        b'{' | b'[' => {
            let mut right = end;
            while right < bytes.len() && bytes[right].is_ascii_whitespace() {
                right += 1;
            }
            out.write_str(&input[..left]);
            if right < bytes.len() && bytes[right] == b',' {
                out.write_str(&input[right + 1..]);
            } else {
                out.write_str(&input[right..]);
            }
        }
        _ => {
            let comma_pos = left - 1;
            out.write_str(&input[..comma_pos]);
            out.write_str(&input[end..]);
        }
    }
}

enum Segment<'a> {
    Key(&'a str),
    Index(usize),
}

/// Splits a remaining path suffix (e.g. `.b[0]`) into its `.key`/`[idx]`
/// steps.
fn parse_segments(path: &str) -> Vec<Segment<'_>> {
    let bytes = path.as_bytes();
    let mut segs = Vec::new();
    let mut i = 0usize;
    while i < bytes.len() {
        match bytes[i] {
            b'.' => {
                let start = i + 1;
                let mut end = start;
                while end < bytes.len() && bytes[end] != b'.' && bytes[end] != b'[' {
                    end += 1;
                }
                segs.push(Segment::Key(&path[start..end]));
                i = end;
            }
            b'[' => {
                let start = i + 1;
                let end = path[start..]
                    .find(']')
                    .map(|n| start + n)
                    .unwrap_or(bytes.len());
                let idx = path[start..end].parse().unwrap_or(0);
                segs.push(Segment::Index(idx));
                i = end + 1;
            }
            _ => i += 1,
        }
    }
    segs
}

/// Emits the missing key/index steps between an existing ancestor
/// container and `remaining`'s leaf, then the new value via printf, then
/// closes every container it opened, in reverse order (§4.4 step 2–4).
fn emit_synthesized(
    out: &mut dyn Sink,
    remaining: &str,
    fmt: &str,
    args: &[PrintfArg<'_>],
) -> JRResult<()> {
    let segs = parse_segments(remaining);
    let mut closers: Vec<char> = Vec::new();
    for (idx, seg) in segs.iter().enumerate() {
        if let Segment::Key(k) = seg {
            out.write_char('"');
            out.write_str(k);
            out.write_char('"');
            out.write_char(':');
        }
        let is_last = idx + 1 == segs.len();
        if is_last {
            vprintf(out, fmt, args)?;
        } else {
            match segs[idx + 1] {
                Segment::Key(_) => {
                    out.write_char('{');
                    closers.push('}');
                }
                Segment::Index(_) => {
                    out.write_char('[');
                    closers.push(']');
                }
            }
        }
    }
    while let Some(c) = closers.pop() {
        out.write_char(c);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::VecSink;

    fn run(input: &str, path: &str, mutation: Mutation<'_>) -> (String, bool) {
        let mut sink = VecSink::new();
        let changed = vsetf(input, path, mutation, &mut sink).unwrap();
        (sink.into_string(), changed)
    }

    #[test]
    fn scenario_one_insert_into_empty_object() {
        let (s, changed) = run("{}", ".bar", Mutation::Set { fmt: "456", args: &[] });
        assert_eq!(s, r#"{"bar":456}"#);
        assert!(!changed);
    }

    #[test]
    fn scenario_two_insert_new_array_sibling() {
        let (s, changed) = run(
            r#"{"a":1}"#,
            ".b[0]",
            Mutation::Set { fmt: "2", args: &[] },
        );
        assert_eq!(s, r#"{"a":1,"b":[2]}"#);
        assert!(!changed);
    }

    #[test]
    fn scenario_three_delete_only_nested_child() {
        let (s, changed) = run(r#"{"a":{"b":1}}"#, ".a.b", Mutation::Delete);
        assert_eq!(s, r#"{"a":{}}"#);
        assert!(changed);
    }

    #[test]
    fn scenario_four_delete_first_of_two_members() {
        let (s, changed) = run(r#"{"a":1,"b":2}"#, ".a", Mutation::Delete);
        assert_eq!(s, r#"{"b":2}"#);
        assert!(changed);
    }

    #[test]
    fn delete_second_of_two_members() {
        let (s, changed) = run(r#"{"a":1,"b":2}"#, ".b", Mutation::Delete);
        assert_eq!(s, r#"{"a":1}"#);
        assert!(changed);
    }

    #[test]
    fn delete_missing_path_is_a_no_op() {
        let (s, changed) = run(r#"{"a":1}"#, ".z", Mutation::Delete);
        assert_eq!(s, r#"{"a":1}"#);
        assert!(!changed);
    }

    #[test]
    fn replace_existing_scalar_preserves_surroundings() {
        let (s, changed) = run(
            r#"{"a": 1 , "b":2}"#,
            ".a",
            Mutation::Set { fmt: "99", args: &[] },
        );
        assert_eq!(s, r#"{"a": 99 , "b":2}"#);
        assert!(changed);
    }

    #[test]
    fn setf_idempotent_under_re_set() {
        let (first, _) = run(r#"{"a":1}"#, ".b[0]", Mutation::Set { fmt: "2", args: &[] });
        let (second, _) = run(&first, ".b[0]", Mutation::Set { fmt: "2", args: &[] });
        assert_eq!(first, second);
    }

    #[test]
    fn setf_forwards_to_vsetf_unchanged() {
        let mut sink = VecSink::new();
        let changed = setf(r#"{"a":1}"#, ".a", Mutation::Set { fmt: "2", args: &[] }, &mut sink).unwrap();
        assert!(changed);
        assert_eq!(sink.into_string(), r#"{"a":2}"#);
    }

    #[test]
    fn with_log_records_synthesis_only_on_insertion() {
        let mut sink = VecSink::new();
        let (changed, log) = vsetf_with_log(
            r#"{"a":1}"#,
            ".b[0]",
            Mutation::Set { fmt: "2", args: &[] },
            &mut sink,
        );
        assert!(!changed.unwrap());
        #[cfg(feature = "logging")]
        assert_eq!(log.len(), 1);
        #[cfg(not(feature = "logging"))]
        assert!(log.is_empty());

        let mut sink = VecSink::new();
        let (changed, log) = vsetf_with_log(
            r#"{"a": 1 , "b":2}"#,
            ".a",
            Mutation::Set { fmt: "99", args: &[] },
            &mut sink,
        );
        assert!(changed.unwrap());
        assert!(log.is_empty());
    }
}
