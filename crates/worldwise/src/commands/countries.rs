//! Country list command handler.

use tabled::Tabled;

use worldwise_core::{CountrySummary, countries, flag_emoji};

use crate::cli::{CountriesArgs, CountriesCommand};
use crate::error::CliError;
use crate::output;

use super::Session;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct CountryRow {
    #[tabled(rename = "Flag")]
    flag: String,
    #[tabled(rename = "Country")]
    country: String,
    #[tabled(rename = "Cities")]
    cities: usize,
}

impl From<&CountrySummary> for CountryRow {
    fn from(c: &CountrySummary) -> Self {
        Self {
            flag: flag_emoji(&c.emoji),
            country: c.country.clone(),
            cities: c.cities,
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(args: CountriesArgs, session: &Session<'_>) -> Result<(), CliError> {
    match args.command {
        CountriesCommand::List => {
            let store = session.mounted_store().await?;
            let list = countries(&store.snapshot().cities);
            let out = output::render_list(
                session.output,
                &list,
                |c| CountryRow::from(c),
                |c| c.country.clone(),
            );
            output::print_output(&out, session.global.quiet);
            Ok(())
        }
    }
}
