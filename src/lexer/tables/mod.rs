// src/lexer/tables/mod.rs
pub mod io;

pub use io::{load_table_json, load_table_json_bytes, save_table_json};

use std::{fmt::Debug, hash::Hash};

use hashbrown::{Equivalent, HashMap, HashSet};

/// Bounds for anything used as an automaton state.
pub trait StateId: Clone + Eq + Hash + Debug {}
impl<T: Clone + Eq + Hash + Debug> StateId for T {}

/// Bounds for anything used as an input symbol.
pub trait Symbol: Copy + Eq + Hash + Debug {}
impl<T: Copy + Eq + Hash + Debug> Symbol for T {}

/// Transition function of a DFA keyed on `(state, symbol)`.
///
/// Built incrementally: `set_start` first, then any mix of `add_transition`
/// and `mark_accepting`, plus `set_accept` for the terminal state. Nothing is
/// ever removed; re-adding a `(state, symbol)` pair overwrites its target.
/// Once built the table is only read, so one table can back any number of
/// concurrent runs.
#[derive(Debug, Clone)]
pub struct TransitionTable<S: StateId, Y: Symbol> {
    next: HashMap<(S, Y), S>,
    accepting: HashSet<S>,
    start: Option<S>,
    accept: Option<S>,
}

/// Borrowed `(state, symbol)` key. Hashes exactly like the owned tuple.
struct KeyRef<'a, S, Y>(&'a S, Y);

impl<S: Hash, Y: Hash> Hash for KeyRef<'_, S, Y> {
    fn hash<H: std::hash::Hasher>(&self, h: &mut H) {
        self.0.hash(h);
        self.1.hash(h);
    }
}

impl<S: Eq, Y: Eq> Equivalent<(S, Y)> for KeyRef<'_, S, Y> {
    fn equivalent(&self, key: &(S, Y)) -> bool {
        *self.0 == key.0 && self.1 == key.1
    }
}

impl<S: StateId, Y: Symbol> Default for TransitionTable<S, Y> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: StateId, Y: Symbol> TransitionTable<S, Y> {
    pub fn new() -> Self {
        Self {
            next: HashMap::new(),
            accepting: HashSet::new(),
            start: None,
            accept: None,
        }
    }

    /// Records the start state. A second call replaces the first; grammars
    /// should only ever call this once.
    pub fn set_start(&mut self, state: S) {
        if let Some(prev) = &self.start {
            log::warn!("start state reset from {prev:?} to {state:?}");
        }
        self.start = Some(state);
    }

    /// Records the terminal accept state that marks the whole input as valid.
    pub fn set_accept(&mut self, state: S) {
        self.accept = Some(state);
    }

    /// Maps `(state, y) -> target` for every `y` in `symbols`, so a whole
    /// character class shares one rule.
    ///
    /// # Panics
    /// If the start state has not been set yet.
    pub fn add_transition<I>(&mut self, state: S, symbols: I, target: S)
    where
        I: IntoIterator<Item = Y>,
    {
        assert!(
            self.start.is_some(),
            "add_transition({state:?}) called before set_start"
        );
        for y in symbols {
            self.next.insert((state.clone(), y), target.clone());
        }
    }

    /// Adds `state` to the accepting set. Marking twice is a no-op.
    ///
    /// # Panics
    /// If the start state has not been set yet.
    pub fn mark_accepting(&mut self, state: S) {
        assert!(
            self.start.is_some(),
            "mark_accepting({state:?}) called before set_start"
        );
        self.accepting.insert(state);
    }

    #[inline]
    pub fn lookup(&self, state: &S, symbol: Y) -> Option<&S> {
        self.next.get(&KeyRef(state, symbol))
    }

    #[inline]
    pub fn is_accepting(&self, state: &S) -> bool {
        self.accepting.contains(state)
    }

    pub fn start(&self) -> Option<&S> {
        self.start.as_ref()
    }

    pub fn accept(&self) -> Option<&S> {
        self.accept.as_ref()
    }

    pub fn accepting(&self) -> impl Iterator<Item = &S> {
        self.accepting.iter()
    }

    /// Number of `(state, symbol)` entries.
    pub fn len(&self) -> usize {
        self.next.len()
    }

    pub fn is_empty(&self) -> bool {
        self.next.is_empty()
    }

    pub fn transitions(&self) -> impl Iterator<Item = (&S, Y, &S)> {
        self.next.iter().map(|((from, y), to)| (from, *y, to))
    }

    /// Symbols with a defined transition out of `state` (unordered).
    pub fn expected(&self, state: &S) -> Vec<Y> {
        self.next
            .keys()
            .filter(|(from, _)| from == state)
            .map(|(_, y)| *y)
            .collect()
    }
}
