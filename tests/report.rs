//! Rendering of engine events by the command-line printer.

use lexdfa::{
    grammar::while_loop,
    lexer::analyze_with,
    report::{Printer, describe_expected, line_col},
};

fn render(src: &str, trace: bool) -> String {
    let table = while_loop::build_table();
    let symbols: Vec<char> = src.chars().collect();
    let mut printer = Printer::new(Vec::new(), &symbols, while_loop::END_MARKER);
    analyze_with(&table, &symbols, &while_loop::delimiters(), trace, &mut printer);
    String::from_utf8(printer.finish().unwrap()).unwrap()
}

#[test]
fn line_and_column_are_one_based() {
    let src: Vec<char> = "ab\ncd".chars().collect();
    assert_eq!(line_col(&src, 0), (1, 1));
    assert_eq!(line_col(&src, 1), (1, 2));
    assert_eq!(line_col(&src, 3), (2, 1));
    assert_eq!(line_col(&src, 5), (2, 3));
}

#[test]
fn valid_input_lists_tokens_then_echoes_source() {
    let out = render("while x < y:\n  x = x + 1", false);
    assert_eq!(
        out,
        "token 1:1  while\ntoken 1:7  x<y:\ntoken 2:3  x=x+1\nvalid!\nwhile x < y:\n  x = x + 1\n"
    );
}

#[test]
fn echo_drops_an_explicit_end_marker() {
    let out = render("while x < y:\n#", false);
    assert!(out.ends_with("valid!\nwhile x < y:\n\n"), "{out:?}");
}

#[test]
fn rejection_points_at_the_symbol() {
    let out = render("while x < y:\n  x = x $ 1", false);
    let expected = format!("invalid: '$' at 2:9\n    x = x $ 1\n  {}^\n", " ".repeat(8));
    assert!(out.contains(&expected), "{out:?}");
}

#[test]
fn incomplete_input_is_reported() {
    let out = render("while x <", false);
    assert!(out.contains("input ended before the statement was complete"), "{out:?}");
    assert!(out.contains("Cmp"), "{out:?}");
}

#[test]
fn trace_prints_one_step_per_symbol() {
    let out = render("while x < y:\n", true);
    let steps = out.lines().filter(|l| l.trim_start().starts_with('[')).count();
    // 13 chars plus the appended end marker.
    assert_eq!(steps, 14);
}

#[test]
fn expected_symbols_are_sorted() {
    let table = while_loop::build_table();
    assert_eq!(describe_expected(&table, &while_loop::State::KwW), "h");
    assert_eq!(describe_expected(&table, &while_loop::State::Slash), "/");
    assert_eq!(describe_expected(&table, &while_loop::State::Accept), "nothing (dead end)");
    assert_eq!(describe_expected(&table, &while_loop::State::Star), "*");
}
