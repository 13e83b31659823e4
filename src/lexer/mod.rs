// src/lexer/mod.rs
pub mod engine;
pub mod tables;

pub use engine::{
    Analysis, Delimiters, Discard, Event, Observer, Outcome, Token, analyze, analyze_batch,
    analyze_batch_str, analyze_str, analyze_with,
};
pub use tables::TransitionTable;
