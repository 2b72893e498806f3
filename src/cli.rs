//! Command-line interface definitions.

use clap::{Parser, Subcommand};

/// Hobbyist - collect names and hobbies through a web form.
#[derive(Parser, Debug)]
#[command(name = "hobbyist")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Defaults to `serve`
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Run the HTTP server
    Serve,

    /// Create or drop the `people` table
    #[command(subcommand)]
    Migrate(MigrateCommand),
}

/// Subcommands for `hobbyist migrate`
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrateCommand {
    /// Create the `people` table
    Up,
    /// Drop the `people` table
    Down,
}

impl Cli {
    pub fn command(&self) -> Commands {
        self.command.unwrap_or(Commands::Serve)
    }
}
