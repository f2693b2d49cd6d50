//! Map command handler: where the map and the form are focused.

use serde::Serialize;
use tracing::warn;

use worldwise_core::{
    City, CityId, FixedGeolocator, MemoryNavigator, Navigator, Position, PositionReconciler,
    UnavailableGeolocator,
};

use crate::cli::MapArgs;
use crate::error::CliError;
use crate::output;

use super::Session;

const CITIES_ROUTE: &str = "/app/cities";
const APP_BASE: &str = "/app/";

#[derive(Debug, Serialize)]
struct Marker {
    id: Option<CityId>,
    city_name: String,
    emoji: String,
    position: Position,
}

impl From<&City> for Marker {
    fn from(c: &City) -> Self {
        Self {
            id: c.id,
            city_name: c.city_name.clone(),
            emoji: c.emoji.clone(),
            position: c.position,
        }
    }
}

#[derive(Debug, Serialize)]
struct MapView {
    location: String,
    map_position: Position,
    form_position: Option<Position>,
    geolocation_error: Option<String>,
    markers: Vec<Marker>,
}

fn detail(view: &MapView, color: bool) -> String {
    let mut lines = vec![
        output::heading("Map", color),
        format!("  {}{}", output::label("Location", color), view.location),
        format!("  {}{}", output::label("Focus", color), view.map_position),
        format!(
            "  {}{}",
            output::label("Form", color),
            view.form_position
                .map_or_else(|| "(unset)".to_owned(), |p| p.to_string())
        ),
    ];
    if let Some(ref err) = view.geolocation_error {
        lines.push(format!(
            "  {}{}",
            output::label("Geolocation", color),
            output::warning(err, color)
        ));
    }
    lines.push(format!("  {}{}", output::label("Markers", color), view.markers.len()));
    for m in &view.markers {
        lines.push(format!("    {} {}", m.city_name, m.position));
    }
    lines.join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(args: MapArgs, session: &Session<'_>) -> Result<(), CliError> {
    let store = session.mounted_store().await?;
    let start = args.link.as_deref().unwrap_or(CITIES_ROUTE);
    let navigator = MemoryNavigator::new(start)?.with_base(APP_BASE)?;
    let mut reconciler =
        PositionReconciler::mount(session.service.default_map_position, navigator.location());

    if args.use_my_position {
        match session.service.device_position {
            Some(position) => reconciler.request_geolocation(&FixedGeolocator(position)).await,
            None => reconciler.request_geolocation(&UnavailableGeolocator).await,
        };
        if let Some(ref err) = reconciler.geolocation().error {
            warn!(error = %err, "using the previous map focus");
        }
    }

    let view = MapView {
        location: navigator.location().href(),
        map_position: reconciler.map_position(),
        form_position: reconciler.form_position(),
        geolocation_error: reconciler.geolocation().error.clone(),
        markers: store.snapshot().cities.iter().map(Marker::from).collect(),
    };
    let out = output::render_single(
        session.output,
        &view,
        |v| detail(v, session.color),
        |v| v.map_position.to_string(),
    );
    output::print_output(&out, session.global.quiet);
    Ok(())
}
