//! Mechanism for loading the command-line configuration

use physics_ids::DEFAULT_TABLE_PATH;

use clap::{Parser, Subcommand};
use log::info;

use std::path::PathBuf;

/// Build, inspect and apply the physics object ID selector table
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// What to do (defaults to building the table)
    #[command(subcommand)]
    command: Option<Command>,
}

/// Actions of the command-line tool
#[derive(Clone, Debug, Subcommand)]
pub enum Command {
    /// Build the selector table and persist it, overwriting any previous one
    Build {
        /// Where the table should be written
        #[arg(long, default_value = DEFAULT_TABLE_PATH)]
        output: PathBuf,
    },

    /// Load a persisted selector table and describe its contents
    List {
        /// Persisted table
        #[arg(long, default_value = DEFAULT_TABLE_PATH)]
        table: PathBuf,
    },

    /// Evaluate one selector of a persisted table on candidate columns
    Apply {
        /// Persisted table
        #[arg(long, default_value = DEFAULT_TABLE_PATH)]
        table: PathBuf,

        /// Selector name (e.g. isLooseElectron)
        #[arg(long)]
        selector: String,

        /// Data-taking year tag, for year-dependent selectors
        #[arg(long)]
        year: Option<String>,

        /// JSON file of named candidate columns
        #[arg(long)]
        inputs: PathBuf,
    },
}

/// Tool configuration
pub struct Configuration {
    /// Requested action
    pub command: Command,
}
//
impl Configuration {
    /// Load the configuration from the command line and print it out
    pub fn load() -> Self {
        let cli = Cli::parse();
        let config = Configuration {
            command: cli.command.unwrap_or(Command::Build {
                output: PathBuf::from(DEFAULT_TABLE_PATH),
            }),
        };
        config.print();
        config
    }

    /// Log the configuration
    pub fn print(&self) {
        match &self.command {
            Command::Build { output } => {
                info!("Action         : build");
                info!("Output         : {}", output.display());
            }
            Command::List { table } => {
                info!("Action         : list");
                info!("Table          : {}", table.display());
            }
            Command::Apply {
                table,
                selector,
                year,
                inputs,
            } => {
                info!("Action         : apply");
                info!("Table          : {}", table.display());
                info!("Selector       : {}", selector);
                info!("Year           : {}", year.as_deref().unwrap_or("-"));
                info!("Inputs         : {}", inputs.display());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn default_paths() {
        let cli = Cli::try_parse_from(["physics-ids", "list"]).unwrap();
        match cli.command {
            Some(Command::List { table }) => assert_eq!(table, PathBuf::from(DEFAULT_TABLE_PATH)),
            other => panic!("unexpected command {other:?}"),
        }
        let cli = Cli::try_parse_from(["physics-ids"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn apply_arguments() {
        let cli = Cli::try_parse_from([
            "physics-ids",
            "apply",
            "--selector",
            "isTightPhoton",
            "--year",
            "2017",
            "--inputs",
            "photons.json",
        ])
        .unwrap();
        match cli.command {
            Some(Command::Apply {
                selector,
                year,
                inputs,
                ..
            }) => {
                assert_eq!(selector, "isTightPhoton");
                assert_eq!(year.as_deref(), Some("2017"));
                assert_eq!(inputs, PathBuf::from("photons.json"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
