use crate::{walk, TokenType, WalkOptions};

fn paths_of(ty: TokenType, input: &str) -> Vec<String> {
    let mut out = Vec::new();
    walk(input, &WalkOptions::default(), |ev| {
        if ev.token.ty == ty {
            out.push(ev.path.to_string());
        }
    })
    .unwrap();
    out
}

#[test]
fn deeply_nested_objects_and_arrays_build_combined_paths() {
    let input = r#"{"a":[{"b":[1,2]},{"c":3}]}"#;
    let nums = paths_of(TokenType::Number, input);
    assert_eq!(nums, vec![".a[0].b[0]", ".a[0].b[1]", ".a[1].c"]);
}

#[test]
fn object_inside_array_reports_container_path_on_start_and_end() {
    let input = r#"[{"x":1}]"#;
    let mut starts = Vec::new();
    let mut ends = Vec::new();
    walk(input, &WalkOptions::default(), |ev| match ev.token.ty {
        TokenType::ObjectStart => starts.push(ev.path.to_string()),
        TokenType::ObjectEnd => ends.push(ev.path.to_string()),
        _ => {}
    })
    .unwrap();
    assert_eq!(starts, vec!["[0]"]);
    assert_eq!(ends, vec!["[0]"]);
}

#[test]
fn empty_array_emits_no_phantom_element() {
    let input = "[]";
    let mut count = 0;
    walk(input, &WalkOptions::default(), |_| count += 1).unwrap();
    assert_eq!(count, 2); // ArrayStart, ArrayEnd only
}

#[test]
fn mixed_sibling_keys_do_not_collide() {
    let input = r#"{"a":{"a":1},"b":{"a":2}}"#;
    let nums = paths_of(TokenType::Number, input);
    assert_eq!(nums, vec![".a.a", ".b.a"]);
}

#[test]
fn container_end_span_covers_full_delimited_text() {
    let input = r#"{"a":1}"#;
    let mut span = None;
    walk(input, &WalkOptions::default(), |ev| {
        if ev.token.ty == TokenType::ObjectEnd {
            span = ev.token.span();
        }
    })
    .unwrap();
    let (s, e) = span.unwrap();
    assert_eq!(&input[s..e], input);
}
