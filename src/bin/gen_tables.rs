// src/bin/gen_tables.rs
// Writes the built-in while grammar to a JSON table usable via LEXDFA_TABLE.

use std::path::PathBuf;

use anyhow::Result;
use lexdfa::{grammar::while_loop, lexer::tables::save_table_json};

fn main() -> Result<()> {
    env_logger::init();

    let out_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("tables/while_loop.json"));

    println!("[gen_tables] building while grammar...");
    let table = while_loop::build_table();
    save_table_json(&out_path, &table)?;
    println!(
        "[gen_tables] wrote {} transitions → {}",
        table.len(),
        out_path.display()
    );
    Ok(())
}
