//! Command implementations for the accident processor CLI
//!
//! Each command lives in its own module:
//! - `commune`: person reports for one commune (`commune` and `injured`)
//! - `years`: supported years and file availability
//! - `shared`: logging setup, configuration loading and run statistics

pub mod commune;
pub mod shared;
pub mod years;

// Re-export main types for easy access
pub use shared::RunStats;

use crate::Result;
use crate::cli::args::Commands;

/// Dispatch to the handler of `command`
pub fn run(command: &Commands) -> Result<RunStats> {
    match command {
        Commands::Commune(args) => commune::run_commune(args),
        Commands::Injured(args) => commune::run_injured(args),
        Commands::Years(args) => years::run_years(args),
    }
}
