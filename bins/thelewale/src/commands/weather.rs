//! Weather banner command

use crate::context::Context;
use anyhow::Result;
use owo_colors::OwoColorize;
use thelewale_cli::progress;
use thelewale_geo::Coordinate;
use thelewale_vendors::weather::banner;

pub async fn run(ctx: &Context, position: Option<Coordinate>) -> Result<()> {
    let service = ctx.service()?;
    let at = service.resolve_location(position);

    let pb = ctx.spinner("Checking the weather...");
    let banner = match banner(service.backend(), &at).await {
        Ok(banner) => {
            pb.finish_and_clear();
            banner
        }
        Err(e) => {
            progress::finish_error(&pb, "Weather unavailable");
            return Err(e.into());
        }
    };

    if ctx.json() {
        return ctx.print_json(&banner);
    }

    println!("{}", banner.to_string().bold());
    println!("Try: {}", banner.mood.dishes().join(", ").cyan());
    Ok(())
}
