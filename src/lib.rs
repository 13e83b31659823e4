// src/lib.rs
pub mod config;
pub mod dev;
pub mod grammar;
pub mod lexer;
pub mod report;
