//! Place suggestion command

use crate::context::Context;
use anyhow::Result;
use owo_colors::OwoColorize;
use thelewale_cli::output::Status;
use thelewale_geo::format_place_coordinate;

pub async fn run(ctx: &Context, query: &str) -> Result<()> {
    let service = ctx.service()?;
    let suggestions = service.place_suggestions(query).await?;

    if ctx.json() {
        return ctx.print_json(&suggestions);
    }

    if suggestions.is_empty() {
        Status::info(&format!("No places match \"{query}\""));
        return Ok(());
    }
    for suggestion in &suggestions {
        println!(
            "{}  {}",
            suggestion.display_name,
            format_place_coordinate(&suggestion.coordinate).dimmed()
        );
    }
    Ok(())
}
