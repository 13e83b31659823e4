// src/lexer/tables/io.rs
use std::{
    fs,
    io::{BufWriter, Write},
    path::Path,
};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use super::{StateId, Symbol, TransitionTable};

// -------------------- JSON (de)serialization --------------------

#[derive(Serialize, Deserialize)]
struct EdgeDisk<S, Y> {
    from: S,
    symbol: Y,
    to: S,
}

#[derive(Serialize, Deserialize)]
struct TableDisk<S, Y> {
    start: Option<S>,
    accept: Option<S>,
    accepting: Vec<S>,
    transitions: Vec<EdgeDisk<S, Y>>,
}

impl<S: StateId + Ord, Y: Symbol + Ord> From<&TransitionTable<S, Y>> for TableDisk<S, Y> {
    fn from(t: &TransitionTable<S, Y>) -> Self {
        let mut accepting: Vec<S> = t.accepting().cloned().collect();
        accepting.sort();

        // Sorted so the same table always writes the same bytes.
        let mut transitions: Vec<EdgeDisk<S, Y>> = t
            .transitions()
            .map(|(from, symbol, to)| EdgeDisk {
                from: from.clone(),
                symbol,
                to: to.clone(),
            })
            .collect();
        transitions.sort_by(|a, b| (&a.from, a.symbol).cmp(&(&b.from, b.symbol)));

        Self {
            start: t.start().cloned(),
            accept: t.accept().cloned(),
            accepting,
            transitions,
        }
    }
}

impl<S: StateId, Y: Symbol> TableDisk<S, Y> {
    fn into_table(self) -> Result<TransitionTable<S, Y>> {
        let start = self.start.ok_or_else(|| anyhow!("table has no start state"))?;
        let accept = self
            .accept
            .ok_or_else(|| anyhow!("table has no terminal accept state"))?;

        let mut t = TransitionTable::new();
        t.set_start(start);
        t.set_accept(accept);
        for s in self.accepting {
            t.mark_accepting(s);
        }
        for e in self.transitions {
            t.add_transition(e.from, [e.symbol], e.to);
        }
        Ok(t)
    }
}

pub fn save_table_json<S, Y>(path: &Path, t: &TransitionTable<S, Y>) -> Result<()>
where
    S: StateId + Ord + Serialize,
    Y: Symbol + Ord + Serialize,
{
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    let f = fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut w = BufWriter::new(f);
    serde_json::to_writer_pretty(&mut w, &TableDisk::from(t))?;
    w.flush()?;
    log::debug!("saved {} transitions to {}", t.len(), path.display());
    Ok(())
}

pub fn load_table_json_bytes<S, Y>(data: &[u8]) -> Result<TransitionTable<S, Y>>
where
    S: StateId + DeserializeOwned,
    Y: Symbol + DeserializeOwned,
{
    serde_json::from_slice::<TableDisk<S, Y>>(data)
        .context("failed to parse table JSON")?
        .into_table()
}

pub fn load_table_json<S, Y>(path: &Path) -> Result<TransitionTable<S, Y>>
where
    S: StateId + DeserializeOwned,
    Y: Symbol + DeserializeOwned,
{
    let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let t = load_table_json_bytes(&data).with_context(|| format!("loading {}", path.display()))?;
    log::debug!("loaded {} transitions from {}", t.len(), path.display());
    Ok(t)
}
