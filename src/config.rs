// src/config.rs
// Environment-driven settings for the binaries:
//   LEXDFA_TABLE=<path>       JSON table to load instead of the built-in while grammar
//   LEXDFA_TRACE=1            report one step event per symbol
//   LEXDFA_BOUNDARY=<chars>   boundary symbols (default: space, tab, newline)
//   LEXDFA_END_MARKER=<char>  end-of-input marker (default: '#')

use std::{env, path::PathBuf};

use anyhow::{Result, bail};

use crate::{grammar::while_loop, lexer::Delimiters};

pub fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(default)
}

pub fn env_usize(name: &str, default: usize) -> usize {
    env::var(name)
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(default)
}

pub fn parse_bool(name: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => bail!("{name}: expected a boolean, got {other:?}"),
    }
}

pub fn parse_char(name: &str, raw: &str) -> Result<char> {
    let mut it = raw.chars();
    match (it.next(), it.next()) {
        (Some(c), None) => Ok(c),
        _ => bail!("{name}: expected exactly one character, got {raw:?}"),
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub table_path: Option<PathBuf>,
    pub trace: bool,
    pub boundary: String,
    pub end_marker: char,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            table_path: None,
            trace: false,
            boundary: while_loop::BOUNDARY.to_string(),
            end_marker: while_loop::END_MARKER,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|k| env::var(k).ok())
    }

    /// Same as `from_env`, reading variables through `get`.
    pub fn from_lookup<F>(get: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(p) = get("LEXDFA_TABLE").filter(|p| !p.is_empty()) {
            cfg.table_path = Some(PathBuf::from(p));
        }
        if let Some(v) = get("LEXDFA_TRACE") {
            cfg.trace = parse_bool("LEXDFA_TRACE", &v)?;
        }
        if let Some(v) = get("LEXDFA_BOUNDARY") {
            cfg.boundary = v;
        }
        if let Some(v) = get("LEXDFA_END_MARKER") {
            cfg.end_marker = parse_char("LEXDFA_END_MARKER", &v)?;
        }
        if cfg.boundary.contains(cfg.end_marker) {
            bail!(
                "end marker {:?} must not also be a boundary symbol",
                cfg.end_marker
            );
        }
        Ok(cfg)
    }

    pub fn delimiters(&self) -> Delimiters<char> {
        Delimiters::new(self.boundary.chars(), self.end_marker)
    }
}
