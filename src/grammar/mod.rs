// src/grammar/mod.rs
pub mod while_loop;
