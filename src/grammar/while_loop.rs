// src/grammar/while_loop.rs
// DFA for a single Python-style `while` statement:
//
//   while <ident> <cmp> <ident>:
//       <ident> = <ident> <op> <ident|int>
//       ...
//
// <cmp> is one of `< > = !` optionally followed by `=`, <op> is one of
// `+ - // **`. Blank lines may precede `while` and separate body lines.

use serde::{Deserialize, Serialize};

use crate::lexer::{Delimiters, TransitionTable};

pub const END_MARKER: char = '#';
pub const BOUNDARY: &str = " \t\n";

const WS: &str = " \t";
const LETTERS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &str = "0123456789";

fn ident_head() -> impl Iterator<Item = char> {
    LETTERS.chars().chain(['_'])
}

fn ident_tail() -> impl Iterator<Item = char> {
    LETTERS.chars().chain(DIGITS.chars()).chain(['_'])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum State {
    Start,

    // keyword
    KwW,
    KwWh,
    KwWhi,
    KwWhil,
    Keyword, // accepting

    // condition
    Lhs,
    Cmp,
    CmpEq,
    Rhs,
    RhsWs, // accepting
    Colon, // accepting

    // body lines
    Line,
    Target,
    TargetWs,
    AssignOp,
    Source,
    Slash,
    Star,
    Operator,
    Operand, // accepting
    Number,  // accepting

    Accept,
}

pub fn delimiters() -> Delimiters<char> {
    Delimiters::new(BOUNDARY.chars(), END_MARKER)
}

pub fn build_table() -> TransitionTable<State, char> {
    use State::*;

    let mut t = TransitionTable::new();
    t.set_start(Start);
    t.set_accept(Accept);

    // Leading blank lines, then the keyword.
    t.add_transition(Start, ['\n'], Start);
    t.add_transition(Start, ['w'], KwW);
    t.add_transition(KwW, ['h'], KwWh);
    t.add_transition(KwWh, ['i'], KwWhi);
    t.add_transition(KwWhi, ['l'], KwWhil);
    t.add_transition(KwWhil, ['e'], Keyword);
    t.add_transition(Keyword, WS.chars(), Keyword);
    t.mark_accepting(Keyword);

    // Condition: <ident> <cmp> <ident>
    t.add_transition(Keyword, ident_head(), Lhs);
    t.add_transition(Lhs, ident_tail(), Lhs);
    t.add_transition(Lhs, WS.chars(), Lhs);
    t.add_transition(Lhs, "<>=!".chars(), Cmp);
    t.add_transition(Cmp, WS.chars(), Cmp);
    t.add_transition(Cmp, ['='], CmpEq);
    t.add_transition(CmpEq, WS.chars(), CmpEq);
    t.add_transition(Cmp, ident_head(), Rhs);
    t.add_transition(CmpEq, ident_head(), Rhs);
    t.add_transition(Rhs, ident_tail(), Rhs);
    t.add_transition(Rhs, WS.chars(), RhsWs);
    t.add_transition(RhsWs, WS.chars(), RhsWs);
    t.mark_accepting(RhsWs);

    t.add_transition(Rhs, [':'], Colon);
    t.add_transition(RhsWs, [':'], Colon);
    t.add_transition(Colon, WS.chars(), Colon);
    t.mark_accepting(Colon);
    t.add_transition(Colon, ['\n'], Line);

    // Body: blank or indented lines, or the end of input.
    t.add_transition(Line, ['\n'], Line);
    t.add_transition(Line, WS.chars(), Line);
    t.add_transition(Line, [END_MARKER], Accept);

    // <ident> = <ident>
    t.add_transition(Line, ident_head(), Target);
    t.add_transition(Target, ident_tail(), Target);
    t.add_transition(Target, WS.chars(), TargetWs);
    t.add_transition(TargetWs, WS.chars(), TargetWs);
    t.add_transition(TargetWs, ['='], AssignOp);
    t.add_transition(AssignOp, WS.chars(), AssignOp);
    t.add_transition(AssignOp, ident_head(), Source);
    t.add_transition(Source, ident_tail(), Source);
    t.add_transition(Source, WS.chars(), Source);

    // + - // **
    t.add_transition(Source, "+-".chars(), Operator);
    t.add_transition(Source, ['/'], Slash);
    t.add_transition(Slash, ['/'], Operator);
    t.add_transition(Source, ['*'], Star);
    t.add_transition(Star, ['*'], Operator);
    t.add_transition(Operator, WS.chars(), Operator);

    // Right operand: identifier or integer literal.
    t.add_transition(Operator, ident_head(), Operand);
    t.add_transition(Operand, ident_tail(), Operand);
    t.add_transition(Operand, WS.chars(), Operand);
    t.add_transition(Operand, ['\n'], Line);
    t.add_transition(Operand, [END_MARKER], Accept);
    t.mark_accepting(Operand);

    t.add_transition(Operator, DIGITS.chars(), Number);
    t.add_transition(Number, DIGITS.chars(), Number);
    t.add_transition(Number, WS.chars(), Number);
    t.add_transition(Number, ['\n'], Line);
    t.add_transition(Number, [END_MARKER], Accept);
    t.mark_accepting(Number);

    log::debug!("while grammar: {} transitions", t.len());
    t
}
