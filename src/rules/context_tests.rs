use super::*;
use crate::lexer::tokenize;

#[test]
fn line_index_splits_on_newlines() {
    let lines = LineIndex::new("a\r\nb\n\nc");
    let texts: Vec<_> = lines.iter().map(|l| (l.number, l.text, l.terminated)).collect();
    assert_eq!(
        texts,
        vec![(1, "a", true), (2, "b", true), (3, "", true), (4, "c", false)]
    );
}

#[test]
fn final_newline_does_not_open_a_line() {
    assert_eq!(LineIndex::new("a\n").len(), 1);
    assert!(LineIndex::new("").is_empty());
    assert_eq!(LineIndex::new("\n\n").len(), 2);
}

#[test]
fn lines_inside_block_comments_are_not_blank() {
    let source = "/* a\n\n*/\n\nx;\n";
    let tokens = tokenize(source).unwrap();
    let settings = LintSettings::default();
    let ctx = LintContext::new(source, &tokens, &[], &settings);

    assert!(!ctx.in_block_comment(1));
    assert!(ctx.in_block_comment(2));
    assert!(ctx.in_block_comment(3));
    assert!(!ctx.is_blank_line(2));
    assert!(ctx.is_blank_line(4));
}

#[test]
fn unary_position_follows_previous_significant_token() {
    let source = "a - -b; return -c; (x) -d; this -e;";
    let tokens = tokenize(source).unwrap();
    let settings = LintSettings::default();
    let ctx = LintContext::new(source, &tokens, &[], &settings);

    let minus: Vec<_> = tokens
        .iter()
        .enumerate()
        .filter(|(_, t)| t.is_operator("-"))
        .map(|(i, _)| ctx.is_unary_position(i))
        .collect();
    assert_eq!(minus, vec![false, true, true, false, false]);
}

#[test]
fn indentation_and_trailing_whitespace_are_recognised() {
    let source = "\tx \n";
    let tokens = tokenize(source).unwrap();
    let settings = LintSettings::default();
    let ctx = LintContext::new(source, &tokens, &[], &settings);

    assert!(ctx.is_indentation(0));
    assert!(!ctx.is_trailing(0));
    assert!(ctx.is_trailing(2));
    assert!(!ctx.is_indentation(2));
}

#[test]
fn token_index_locates_copied_tokens() {
    let source = "var x = 1;";
    let tokens = tokenize(source).unwrap();
    let settings = LintSettings::default();
    let ctx = LintContext::new(source, &tokens, &[], &settings);

    let x = tokens[2];
    assert_eq!(ctx.token_index(&x), Some(2));
    assert_eq!(ctx.next_significant(0).map(|(i, _)| i), Some(2));
    assert_eq!(ctx.prev_significant(2).map(|(i, _)| i), Some(0));
}
