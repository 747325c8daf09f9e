use crate::{escape::unescape, walk, TokenType, WalkOptions};

fn string_text<'a>(input: &'a str) -> &'a str {
    let mut span = None;
    walk(input, &WalkOptions::default(), |ev| {
        if ev.token.ty == TokenType::String && span.is_none() {
            span = ev.token.span();
        }
    })
    .unwrap();
    let (s, e) = span.unwrap();
    &input[s..e]
}

#[test]
fn string_token_span_excludes_quotes() {
    assert_eq!(string_text(r#""hello""#), "hello");
}

#[test]
fn escaped_quote_and_backslash_stay_in_raw_span() {
    let raw = string_text(r#""a\"\\b""#);
    assert_eq!(raw, r#"a\"\\b"#);
    assert_eq!(unescape(raw).unwrap(), "a\"\\b");
}

#[test]
fn control_character_inside_string_is_rejected() {
    let input = "\"a\u{0001}b\"";
    let err = walk(input, &WalkOptions::default(), |_| {}).unwrap_err();
    assert!(!err.is_incomplete());
}

#[test]
fn unterminated_string_is_incomplete() {
    let err = walk("\"abc", &WalkOptions::default(), |_| {}).unwrap_err();
    assert!(err.is_incomplete());
}

#[test]
fn unicode_escape_round_trips_through_unescape() {
    let raw = string_text(r#""café""#);
    assert_eq!(unescape(raw).unwrap(), "café");
}

#[test]
fn multibyte_utf8_inside_string_is_preserved_verbatim() {
    assert_eq!(string_text(r#""héllo""#), "héllo");
}
