// src/report.rs
// Text rendering of engine events for the command-line front end.

use std::{fmt::Debug, io::Write};

use crate::lexer::{
    Event, Observer,
    tables::{StateId, TransitionTable},
};

/// 1-based (line, column) of char `position` in `src`.
pub fn line_col(src: &[char], position: usize) -> (usize, usize) {
    let mut line = 1;
    let mut col = 1;
    for &c in src.iter().take(position) {
        if c == '\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }
    (line, col)
}

/// The line containing `position` and a caret line pointing at it.
fn context(src: &[char], position: usize) -> (String, String) {
    let pos = position.min(src.len());
    let lo = src[..pos]
        .iter()
        .rposition(|&c| c == '\n')
        .map_or(0, |i| i + 1);
    let hi = src[pos..]
        .iter()
        .position(|&c| c == '\n')
        .map_or(src.len(), |i| pos + i);
    let line: String = src[lo..hi].iter().collect();
    let caret: String = src[lo..pos]
        .iter()
        .map(|&c| if c == '\t' { '\t' } else { ' ' })
        .chain(['^'])
        .collect();
    (line, caret)
}

/// Sorted, printable list of the symbols `state` has transitions on.
pub fn describe_expected<S: StateId>(table: &TransitionTable<S, char>, state: &S) -> String {
    let mut syms = table.expected(state);
    if syms.is_empty() {
        return "nothing (dead end)".to_string();
    }
    syms.sort_unstable();
    syms.iter()
        .map(|c| format!("{}", c.escape_debug()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Observer writing one line per event to `out`.
///
/// Write errors do not interrupt the run; the first one is kept and
/// returned by [`Printer::finish`].
pub struct Printer<'a, W: Write> {
    out: W,
    src: &'a [char],
    end_marker: char,
    err: Option<std::io::Error>,
}

impl<'a, W: Write> Printer<'a, W> {
    pub fn new(out: W, src: &'a [char], end_marker: char) -> Self {
        Self {
            out,
            src,
            end_marker,
            err: None,
        }
    }

    pub fn finish(self) -> std::io::Result<W> {
        match self.err {
            Some(e) => Err(e),
            None => Ok(self.out),
        }
    }

    fn emit(&mut self, text: std::fmt::Arguments<'_>) {
        if self.err.is_none() {
            if let Err(e) = self.out.write_fmt(text).and_then(|_| self.out.write_all(b"\n")) {
                self.err = Some(e);
            }
        }
    }

    fn source_without_marker(&self) -> String {
        let body = match self.src.last() {
            Some(&c) if c == self.end_marker => &self.src[..self.src.len() - 1],
            _ => self.src,
        };
        body.iter().collect()
    }
}

impl<W: Write, S: Debug> Observer<S, char> for Printer<'_, W> {
    fn on_event(&mut self, event: &Event<'_, S, char>) {
        match event {
            Event::Step {
                position,
                state,
                buffer,
                symbol,
                was_accepting,
            } => {
                let buffer: String = buffer.iter().collect();
                self.emit(format_args!(
                    "  [{position:>4}] state={state:?} buffer={buffer:?} input={symbol:?} accepting={was_accepting}"
                ));
            }
            Event::TokenEmitted(tok) => {
                let (line, col) = line_col(self.src, tok.start);
                self.emit(format_args!("token {line}:{col}  {}", tok.text()));
            }
            Event::Rejected { position, symbol } => {
                let (line, col) = line_col(self.src, *position);
                let (text, caret) = context(self.src, *position);
                self.emit(format_args!(
                    "invalid: {:?} at {line}:{col}\n  {text}\n  {caret}",
                    symbol
                ));
            }
            Event::NotAccepted { state } => {
                self.emit(format_args!(
                    "invalid: input ended before the statement was complete (in state {state:?})"
                ));
            }
            Event::Accepted => {
                let body = self.source_without_marker();
                self.emit(format_args!("valid!\n{body}"));
            }
        }
    }
}
