//! Command-line entry point of the physics object ID selector table
//!
//! The usual workflow is to run `physics-ids build` once, which writes the
//! selector table to `data/ids.json`, and to let the analysis code load it.
//! The `list` and `apply` actions are there to inspect a persisted table and
//! try its selectors on candidate columns stored as JSON.

mod config;
mod output;

use crate::config::{Command, Configuration};

use physics_ids::{Inputs, SelectorTable};

use eyre::WrapErr;

use std::{fs::File, io::BufReader, path::Path, time::Instant};

/// We'll use eyre's type-erased result type throughout the application
type Result<T> = eyre::Result<T>;

/// This will act as our main function, with suitable error handling
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // The work of parsing and checking the configuration has been offloaded
    // to a dedicated struct
    let cfg = Configuration::load();

    match cfg.command {
        Command::Build { output } => {
            let saved_time = Instant::now();
            let table = SelectorTable::build_and_persist(&output)
                .wrap_err_with(|| format!("Failed to persist the selector table to {}", output.display()))?;
            log::info!(
                "Built {} selectors in {:?}",
                table.len(),
                saved_time.elapsed()
            );
        }
        Command::List { table } => {
            let table = load_table(&table)?;
            output::print_table(&table);
        }
        Command::Apply {
            table,
            selector,
            year,
            inputs,
        } => {
            let table = load_table(&table)?;
            let schema = table.get(&selector)?.inputs();
            let inputs = {
                let file = File::open(&inputs)
                    .wrap_err_with(|| format!("Failed to open {}", inputs.display()))?;
                let json: serde_json::Value = serde_json::from_reader(BufReader::new(file))
                    .wrap_err_with(|| format!("Failed to parse {}", inputs.display()))?;
                Inputs::from_json(&json, schema).wrap_err("Failed to decode the candidate columns")?
            };
            let mask = table
                .evaluate(&selector, &inputs, year.as_deref())
                .wrap_err_with(|| format!("Failed to evaluate {selector}"))?;
            output::print_mask(&mask).wrap_err("Failed to output the selection mask")?;
        }
    }

    // ...and we're done
    Ok(())
}

/// Load a persisted selector table
fn load_table(path: &Path) -> Result<SelectorTable> {
    SelectorTable::load(path)
        .wrap_err_with(|| format!("Failed to load the selector table from {}", path.display()))
}
