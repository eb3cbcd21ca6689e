//! Command dispatch: bridges CLI args -> catalog calls -> output formatting.

pub mod browse;
pub mod characters;
pub mod config_cmd;
pub mod episodes;
pub mod locations;
pub mod session_cmd;
pub mod util;

use rickdex_core::Catalog;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a catalog-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, catalog: &Catalog, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Characters(args) => characters::handle(catalog, args, global).await,
        Command::Episodes(args) => episodes::handle(catalog, args, global).await,
        Command::Locations(args) => locations::handle(catalog, args, global).await,
        Command::Browse(args) => browse::handle(catalog, args, global).await,
        // Session, Config and Completions are handled before dispatch
        Command::Session(_) | Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
