//! Command handlers, one module per top-level subcommand.

pub mod config_cmd;
pub mod keys;
pub mod mappings;
pub mod util;

use lispmap_core::MappingService;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Route a service-backed command to its handler.
pub async fn dispatch(
    cmd: Command,
    service: &MappingService,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Mappings(args) => mappings::handle(service, args, global).await,
        Command::Keys(args) => keys::handle(service, args, global).await,
        Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}
