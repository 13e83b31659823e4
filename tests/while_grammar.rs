//! The built-in while grammar: accepted programs, token boundaries, and the
//! two failure kinds.

use lexdfa::{
    dev::generator::gen_valid_while,
    grammar::while_loop::{self, State},
    lexer::{Outcome, analyze_batch_str, analyze_str},
};
use rand::{Rng, SeedableRng, rngs::StdRng};

fn run(src: &str) -> lexdfa::lexer::Analysis<State, char> {
    analyze_str(&while_loop::build_table(), src, &while_loop::delimiters())
}

#[test]
fn header_and_one_body_line() {
    let a = run("while x < y:\n    x = x + 1");
    assert_eq!(a.outcome, Outcome::Accepted);
    assert_eq!(a.token_texts(), vec!["while", "x<y:", "x=x+1"]);
    let starts: Vec<usize> = a.tokens.iter().map(|t| t.start).collect();
    assert_eq!(starts, vec![0, 6, 17]);
}

#[test]
fn several_body_lines_and_operators() {
    let src = "\nwhile count != limit :\n\tcount = count + 1\n\n\ttotal = total ** 2\n\tq = total // d\n";
    let a = run(src);
    assert_eq!(a.outcome, Outcome::Accepted, "{src:?}");
    assert_eq!(
        a.token_texts(),
        vec![
            "while",
            "count!=limit:",
            "count=count+1",
            "total=total**2",
            "q=total//d"
        ]
    );
}

#[test]
fn explicit_end_marker() {
    assert!(run("while a >= b:\n  a = a - b#").is_accepted());
}

#[test]
fn doubled_end_marker_is_rejected() {
    let a = run("while x < y:\n##");
    assert!(!a.is_accepted());
    assert_eq!(
        a.outcome,
        Outcome::Rejected {
            position: 14,
            offending_symbol: '#',
            state: State::Accept,
        }
    );
}

#[test]
fn header_without_body_is_accepted() {
    assert!(run("while a == b:\n").is_accepted());
}

#[test]
fn digit_in_condition_is_rejected() {
    let a = run("while 1 < y:\n    x = x + 1");
    assert_eq!(
        a.outcome,
        Outcome::Rejected {
            position: 6,
            offending_symbol: '1',
            state: State::Keyword,
        }
    );
    assert_eq!(a.token_texts(), vec!["while"]);
}

#[test]
fn single_star_is_rejected() {
    let a = run("while a < b:\n  a = a * 2");
    assert!(matches!(
        a.outcome,
        Outcome::Rejected {
            offending_symbol: ' ',
            state: State::Star,
            ..
        }
    ));
}

#[test]
fn missing_colon_newline_is_incomplete() {
    let a = run("while x < y:");
    assert_eq!(a.outcome, Outcome::NotAccepted { state: State::Colon });
    assert_eq!(a.token_texts(), vec!["while", "x<y:"]);
}

#[test]
fn dangling_operator_is_incomplete() {
    let a = run("while x < y:\n  x = x +");
    assert_eq!(a.outcome, Outcome::NotAccepted { state: State::Operator });
}

#[test]
fn misspelled_keyword_is_rejected() {
    let a = run("whale x < y:\n");
    assert!(matches!(
        a.outcome,
        Outcome::Rejected {
            position: 2,
            offending_symbol: 'a',
            ..
        }
    ));
    assert!(a.tokens.is_empty());
}

#[test]
fn generated_programs_are_accepted() {
    let table = while_loop::build_table();
    let delims = while_loop::delimiters();
    let mut rng = StdRng::seed_from_u64(7);
    for case in 0..500 {
        let lines = rng.random_range(0..8);
        let src = gen_valid_while(&mut rng, lines);
        let a = analyze_str(&table, &src, &delims);
        assert!(a.is_accepted(), "case {case}: {:?}\n{src:?}", a.outcome);
        for tok in &a.tokens {
            assert!(!tok.symbols.iter().any(|c| while_loop::BOUNDARY.contains(*c)));
        }
    }
}

#[test]
fn batch_over_generated_programs_matches_sequential() {
    let table = while_loop::build_table();
    let delims = while_loop::delimiters();
    let mut rng = StdRng::seed_from_u64(99);
    let mut srcs: Vec<String> = (0..200).map(|_| gen_valid_while(&mut rng, 3)).collect();
    srcs.push("while 9 < y:\n".into());
    srcs.push("while x < y".into());

    let batch = analyze_batch_str(&table, &srcs, &delims);
    for (src, got) in srcs.iter().zip(&batch) {
        assert_eq!(got, &analyze_str(&table, src, &delims));
    }
    assert!(!batch[200].is_accepted());
    assert!(!batch[201].is_accepted());
}
