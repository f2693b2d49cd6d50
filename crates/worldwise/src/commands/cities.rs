//! City command handlers.

use tabled::Tabled;
use tracing::debug;

use worldwise_core::{
    City, CityForm, MemoryNavigator, Navigator, Position, PositionReconciler, flag_emoji,
    format_visit_date, wikipedia_url,
};

use crate::cli::{CitiesArgs, CitiesCommand, CreateCityArgs};
use crate::error::CliError;
use crate::output;

use super::{Session, util};

/// Route the city list lives at; relative links resolve under `/app/`.
const CITIES_ROUTE: &str = "/app/cities";
const APP_BASE: &str = "/app/";

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct CityRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "City")]
    name: String,
    #[tabled(rename = "Country")]
    country: String,
    #[tabled(rename = "Visited")]
    visited: String,
    #[tabled(rename = "Position")]
    position: String,
}

impl From<&City> for CityRow {
    fn from(c: &City) -> Self {
        Self {
            id: c.id.map(|id| id.to_string()).unwrap_or_default(),
            name: c.city_name.clone(),
            country: format!("{} {}", flag_emoji(&c.emoji), c.country)
                .trim()
                .to_owned(),
            visited: format_visit_date(&c.date),
            position: c.position.to_string(),
        }
    }
}

fn city_id(c: &City) -> String {
    c.id.map(|id| id.to_string()).unwrap_or_default()
}

// ── Detail view ─────────────────────────────────────────────────────

fn detail(c: &City, color: bool) -> String {
    let mut lines = vec![
        output::heading(
            format!("{} {}", flag_emoji(&c.emoji), c.city_name).trim(),
            color,
        ),
        format!("  {}{}", output::label("Country", color), c.country),
        format!(
            "  {}{}",
            output::label("Visited", color),
            format_visit_date(&c.date)
        ),
        format!("  {}{}", output::label("Position", color), c.position),
    ];
    if !c.notes.is_empty() {
        lines.push(format!("  {}{}", output::label("Notes", color), c.notes));
    }
    if let Some(link) = c.detail_link() {
        lines.push(format!("  {}{link}", output::label("Link", color)));
    }
    lines.push(format!(
        "  {}{}",
        output::label("Learn more", color),
        output::link(&wikipedia_url(&c.city_name), color)
    ));
    lines.join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(args: CitiesArgs, session: &Session<'_>) -> Result<(), CliError> {
    let global = session.global;
    match args.command {
        CitiesCommand::List => {
            let store = session.mounted_store().await?;
            let state = store.snapshot();
            let out = output::render_list(
                session.output,
                &state.cities,
                |c| CityRow::from(c),
                city_id,
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        CitiesCommand::Get { id } => {
            let store = session.mounted_store().await?;
            let id = util::require_city(&store.snapshot(), id)?;
            let outcome = util::with_spinner("Loading city", global.quiet, store.load_one(id)).await;
            outcome.into_result()?;

            let state = store.snapshot();
            let Some(city) = state.current_city else {
                return Err(CliError::NotFound {
                    resource_type: "city".into(),
                    identifier: id.to_string(),
                    list_command: "cities list".into(),
                });
            };
            let out = output::render_single(
                session.output,
                &city,
                |c| detail(c, session.color),
                city_id,
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        CitiesCommand::Create(create) => create_city(create, session).await,

        CitiesCommand::Delete { id } => {
            let store = session.mounted_store().await?;
            let state = store.snapshot();
            let id = util::require_city(&state, id)?;
            let name = state
                .city(id)
                .map(|c| c.city_name.clone())
                .unwrap_or_default();

            if !util::confirm(&format!("Delete city '{name}'?"), global.yes)? {
                return Ok(());
            }
            let outcome = util::with_spinner("Deleting city", global.quiet, store.delete(id)).await;
            outcome.into_result()?;
            if !global.quiet {
                eprintln!("City '{name}' deleted");
            }
            Ok(())
        }
    }
}

/// Click-to-create: the position travels through the URL exactly as a
/// map click would, then the form reads it back.
async fn create_city(args: CreateCityArgs, session: &Session<'_>) -> Result<(), CliError> {
    let global = session.global;
    let start = args.link.as_deref().unwrap_or(CITIES_ROUTE);
    let mut navigator = MemoryNavigator::new(start)?.with_base(APP_BASE)?;
    let mut reconciler =
        PositionReconciler::mount(session.service.default_map_position, navigator.location());

    if let (Some(lat), Some(lng)) = (args.lat, args.lng) {
        reconciler.map_click(Position::new(lat, lng), &mut navigator)?;
    }
    debug!(location = %navigator.location(), "form opened");

    let position = reconciler.form_position();
    let mut form = if args.no_geocode {
        CityForm::new(position)
    } else {
        let geocoder = session.service.geocoding_client()?;
        util::with_spinner(
            "Looking up the place",
            global.quiet,
            CityForm::prefill(position, &geocoder),
        )
        .await?
    };

    if let Some(name) = args.name {
        form.city_name = name;
    }
    if let Some(ref raw) = args.date {
        form.date = util::parse_visit_date(raw)?;
    }
    form.notes = args.notes;

    let store = session.store()?;
    let created =
        util::with_spinner("Saving city", global.quiet, form.submit(&store, &mut navigator)).await?;
    debug!(location = %navigator.location(), "form submitted");

    let out = output::render_single(
        session.output,
        &created,
        |c| detail(c, session.color),
        city_id,
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
