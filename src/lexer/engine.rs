// src/lexer/engine.rs
// Table-driven DFA run loop: validates an input and splits it into tokens at
// boundary symbols reached while in an accepting state.

use hashbrown::HashSet;
use rayon::prelude::*;

use crate::lexer::tables::{StateId, Symbol, TransitionTable};

/// Symbols that end a token, plus the marker that ends the input.
#[derive(Debug, Clone)]
pub struct Delimiters<Y: Symbol> {
    pub boundary: HashSet<Y>,
    pub end_marker: Y,
}

impl<Y: Symbol> Delimiters<Y> {
    pub fn new<I: IntoIterator<Item = Y>>(boundary: I, end_marker: Y) -> Self {
        Self {
            boundary: boundary.into_iter().collect(),
            end_marker,
        }
    }

    #[inline]
    pub fn is_boundary(&self, y: Y) -> bool {
        self.boundary.contains(&y)
    }

    #[inline]
    fn closes_token(&self, y: Y) -> bool {
        y == self.end_marker || self.is_boundary(y)
    }
}

/// A run of non-boundary symbols closed at an accepting state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<Y> {
    /// Input position of the first symbol.
    pub start: usize,
    pub symbols: Vec<Y>,
}

impl<Y> Token<Y> {
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl Token<char> {
    pub fn text(&self) -> String {
        self.symbols.iter().collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<S, Y> {
    /// Input exhausted in the terminal accept state.
    Accepted,
    /// No transition for `offending_symbol` out of `state`.
    Rejected {
        position: usize,
        offending_symbol: Y,
        state: S,
    },
    /// Input ran out (or only the end marker was refused) before the
    /// terminal accept state was reached.
    NotAccepted { state: S },
}

/// Result of one run. `tokens` holds everything emitted before the run
/// ended, whether or not it was accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis<S, Y> {
    pub outcome: Outcome<S, Y>,
    pub tokens: Vec<Token<Y>>,
}

impl<S, Y> Analysis<S, Y> {
    pub fn is_accepted(&self) -> bool {
        matches!(self.outcome, Outcome::Accepted)
    }
}

impl<S> Analysis<S, char> {
    pub fn token_texts(&self) -> Vec<String> {
        self.tokens.iter().map(Token::text).collect()
    }
}

/// Events reported while a run progresses.
#[derive(Debug)]
pub enum Event<'a, S, Y> {
    /// One per symbol, only when tracing. `state` and `buffer` are taken
    /// before `symbol` is consumed.
    Step {
        position: usize,
        state: &'a S,
        buffer: &'a [Y],
        symbol: Y,
        was_accepting: bool,
    },
    TokenEmitted(&'a Token<Y>),
    Rejected { position: usize, symbol: Y },
    NotAccepted { state: &'a S },
    Accepted,
}

pub trait Observer<S, Y> {
    fn on_event(&mut self, event: &Event<'_, S, Y>);
}

impl<S, Y, F> Observer<S, Y> for F
where
    F: FnMut(&Event<'_, S, Y>),
{
    fn on_event(&mut self, event: &Event<'_, S, Y>) {
        self(event)
    }
}

/// Observer that drops every event.
pub struct Discard;

impl<S, Y> Observer<S, Y> for Discard {
    fn on_event(&mut self, _: &Event<'_, S, Y>) {}
}

struct RunState<'t, S, Y> {
    state: &'t S,
    buffer: Vec<Y>,
    token_start: usize,
    tokens: Vec<Token<Y>>,
}

impl<'t, S: StateId, Y: Symbol> RunState<'t, S, Y> {
    fn new(start: &'t S) -> Self {
        Self {
            state: start,
            buffer: Vec::new(),
            token_start: 0,
            tokens: Vec::new(),
        }
    }

    fn push(&mut self, position: usize, y: Y) {
        if self.buffer.is_empty() {
            self.token_start = position;
        }
        self.buffer.push(y);
    }

    /// Moves a non-empty buffer into `tokens`; returns the new token.
    fn flush(&mut self) -> Option<&Token<Y>> {
        if self.buffer.is_empty() {
            return None;
        }
        self.tokens.push(Token {
            start: self.token_start,
            symbols: std::mem::take(&mut self.buffer),
        });
        self.tokens.last()
    }

    fn finish<O>(self, outcome: Outcome<S, Y>, observer: &mut O) -> Analysis<S, Y>
    where
        O: Observer<S, Y> + ?Sized,
    {
        match &outcome {
            Outcome::Accepted => observer.on_event(&Event::Accepted),
            Outcome::Rejected {
                position,
                offending_symbol,
                ..
            } => observer.on_event(&Event::Rejected {
                position: *position,
                symbol: *offending_symbol,
            }),
            Outcome::NotAccepted { state } => observer.on_event(&Event::NotAccepted { state }),
        }
        log::debug!("run finished: {outcome:?} ({} tokens)", self.tokens.len());
        Analysis {
            outcome,
            tokens: self.tokens,
        }
    }
}

/// Runs `input` through `table`, reporting events to `observer`.
///
/// The end marker is appended logically when `input` does not already end
/// with it. A symbol closes the buffered token when the automaton is in an
/// accepting state *before* consuming it and the symbol is a boundary or the
/// end marker. Boundary symbols advance the automaton but never enter a
/// token. The terminal accept state absorbs a logically appended end marker
/// when it has no explicit transition on it, so a table whose start state is
/// the accept state accepts empty input. A marker the caller wrote gets no
/// such treatment: an extra marker after reaching the accept state rejects.
///
/// # Panics
/// If `table` has no start state or no terminal accept state.
pub fn analyze_with<S, Y, O>(
    table: &TransitionTable<S, Y>,
    input: &[Y],
    delims: &Delimiters<Y>,
    trace: bool,
    observer: &mut O,
) -> Analysis<S, Y>
where
    S: StateId,
    Y: Symbol,
    O: Observer<S, Y> + ?Sized,
{
    let Some(start) = table.start() else {
        panic!("analyze called on a table without a start state");
    };
    let Some(accept) = table.accept() else {
        panic!("analyze called on a table without a terminal accept state");
    };

    let end = delims.end_marker;
    let appended = input.last() != Some(&end);
    let last = input.len() + usize::from(appended) - 1;
    let symbols = input.iter().copied().chain(appended.then_some(end));

    let mut run = RunState::new(start);

    for (position, y) in symbols.enumerate() {
        let was_accepting = table.is_accepting(run.state);

        log::trace!(
            "pos={position} state={:?} buffer={:?} sym={y:?} accepting={was_accepting}",
            run.state,
            run.buffer
        );
        if trace {
            observer.on_event(&Event::Step {
                position,
                state: run.state,
                buffer: &run.buffer,
                symbol: y,
                was_accepting,
            });
        }

        if was_accepting && delims.closes_token(y) {
            if let Some(tok) = run.flush() {
                log::debug!("token at {}: {:?}", tok.start, tok.symbols);
                observer.on_event(&Event::TokenEmitted(tok));
            }
        }

        if !delims.is_boundary(y) {
            run.push(position, y);
        }

        let final_marker = position == last && y == end;
        let next = table
            .lookup(run.state, y)
            .or_else(|| {
                (final_marker && appended && run.state == accept).then_some(accept)
            });

        match next {
            Some(next) => run.state = next,
            None if final_marker && run.state != accept => {
                let state = run.state.clone();
                return run.finish(Outcome::NotAccepted { state }, observer);
            }
            None => {
                let state = run.state.clone();
                let outcome = Outcome::Rejected {
                    position,
                    offending_symbol: y,
                    state,
                };
                return run.finish(outcome, observer);
            }
        }
    }

    let outcome = if run.state == accept {
        Outcome::Accepted
    } else {
        Outcome::NotAccepted {
            state: run.state.clone(),
        }
    };
    run.finish(outcome, observer)
}

pub fn analyze<S: StateId, Y: Symbol>(
    table: &TransitionTable<S, Y>,
    input: &[Y],
    delims: &Delimiters<Y>,
) -> Analysis<S, Y> {
    analyze_with(table, input, delims, false, &mut Discard)
}

/// `analyze` over the chars of `input`; positions count chars, not bytes.
pub fn analyze_str<S: StateId>(
    table: &TransitionTable<S, char>,
    input: &str,
    delims: &Delimiters<char>,
) -> Analysis<S, char> {
    let symbols: Vec<char> = input.chars().collect();
    analyze(table, &symbols, delims)
}

/// Analyzes every input against the same table in parallel. Results are in
/// input order.
pub fn analyze_batch<S, Y, I>(
    table: &TransitionTable<S, Y>,
    inputs: &[I],
    delims: &Delimiters<Y>,
) -> Vec<Analysis<S, Y>>
where
    S: StateId + Send + Sync,
    Y: Symbol + Send + Sync,
    I: AsRef<[Y]> + Sync,
{
    inputs
        .par_iter()
        .map(|input| analyze(table, input.as_ref(), delims))
        .collect()
}

pub fn analyze_batch_str<S, T>(
    table: &TransitionTable<S, char>,
    inputs: &[T],
    delims: &Delimiters<char>,
) -> Vec<Analysis<S, char>>
where
    S: StateId + Send + Sync,
    T: AsRef<str> + Sync,
{
    inputs
        .par_iter()
        .map(|input| analyze_str(table, input.as_ref(), delims))
        .collect()
}
