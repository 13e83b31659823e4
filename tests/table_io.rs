//! JSON table files: round trip through disk and load-time validation.

use std::path::PathBuf;

use lexdfa::{
    grammar::while_loop,
    lexer::{
        TransitionTable, analyze_str,
        tables::{load_table_json, load_table_json_bytes, save_table_json},
    },
};

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!("lexdfa-test-{}", std::process::id()))
        .join(name)
}

#[test]
fn while_table_behaves_the_same_after_reload() {
    let path = temp_path("while_loop.json");
    let built = while_loop::build_table();
    save_table_json(&path, &built).expect("save table");

    // Enum states come back as their variant names.
    let loaded: TransitionTable<String, char> = load_table_json(&path).expect("load table");
    assert_eq!(loaded.len(), built.len());
    assert_eq!(loaded.start().map(String::as_str), Some("Start"));
    assert_eq!(loaded.accept().map(String::as_str), Some("Accept"));

    let delims = while_loop::delimiters();
    for src in [
        "while x < y:\n    x = x + 1",
        "while 1 < y:\n",
        "while x < y:",
        "\n\nwhile a!=b :\n\tb = b ** 2\n",
    ] {
        let a = analyze_str(&built, src, &delims);
        let b = analyze_str(&loaded, src, &delims);
        assert_eq!(a.tokens, b.tokens, "{src:?}");
        assert_eq!(a.is_accepted(), b.is_accepted(), "{src:?}");
    }

    let _ = std::fs::remove_file(&path);
}

#[test]
fn saving_twice_writes_identical_bytes() {
    let p1 = temp_path("a.json");
    let p2 = temp_path("b.json");
    let t = while_loop::build_table();
    save_table_json(&p1, &t).expect("save a");
    save_table_json(&p2, &t).expect("save b");
    assert_eq!(std::fs::read(&p1).unwrap(), std::fs::read(&p2).unwrap());
    let _ = std::fs::remove_file(&p1);
    let _ = std::fs::remove_file(&p2);
}

#[test]
fn loads_hand_written_json() {
    let json = br##"{
        "start": "q0",
        "accept": "done",
        "accepting": ["q1"],
        "transitions": [
            {"from": "q0", "symbol": "a", "to": "q1"},
            {"from": "q1", "symbol": "#", "to": "done"}
        ]
    }"##;
    let t: TransitionTable<String, char> = load_table_json_bytes(json).expect("parse");
    assert!(t.is_accepting(&"q1".to_string()));
    let a = analyze_str(&t, "a", &while_loop::delimiters());
    assert!(a.is_accepted());
    assert_eq!(a.token_texts(), vec!["a"]);
}

#[test]
fn missing_start_state_is_an_error() {
    let json = br#"{"start": null, "accept": "done", "accepting": [], "transitions": []}"#;
    let err = load_table_json_bytes::<String, char>(json).unwrap_err();
    assert!(err.to_string().contains("start"), "{err}");
}

#[test]
fn malformed_json_is_an_error() {
    assert!(load_table_json_bytes::<String, char>(b"{not json").is_err());
}
