//! Command dispatch: bridges CLI args -> core operations -> output formatting.

pub mod cities;
pub mod config_cmd;
pub mod countries;
pub mod login;
pub mod map;
pub mod util;

use worldwise_core::{CitiesClient, CollectionStore, ServiceConfig};

use crate::cli::{Command, GlobalOpts, OutputFormat};
use crate::error::CliError;

/// Everything a service-bound handler needs, resolved once per run.
pub struct Session<'a> {
    pub global: &'a GlobalOpts,
    pub service: ServiceConfig,
    pub output: OutputFormat,
    pub color: bool,
}

impl Session<'_> {
    /// A store over the configured cities service, nothing loaded.
    pub fn store(&self) -> Result<CollectionStore<CitiesClient>, CliError> {
        Ok(CollectionStore::new(self.service.cities_client()?))
    }

    /// A store with the whole collection loaded.
    pub async fn mounted_store(&self) -> Result<CollectionStore<CitiesClient>, CliError> {
        let store = self.store()?;
        let outcome = util::with_spinner("Loading cities", self.global.quiet, store.load_all()).await;
        outcome.into_result()?;
        Ok(store)
    }
}

/// Dispatch a service-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, session: &Session<'_>) -> Result<(), CliError> {
    match cmd {
        Command::Cities(args) => cities::handle(args, session).await,
        Command::Countries(args) => countries::handle(args, session).await,
        Command::Map(args) => map::handle(args, session).await,
        Command::Login(args) => login::handle(args, session),
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}
