//! Commands that need no backend

use crate::context::Context;
use anyhow::Result;
use serde_json::json;
use thelewale_cli::output::{format_badge, format_distance};
use thelewale_geo::{Coordinate, DistanceLabel, RadiusFilter};

/// Badge for a points balance
pub fn badge(ctx: &Context, points: Option<i64>) -> Result<()> {
    let table = ctx.badges()?;
    let badge = table.badge_for(points);
    let next = table.next_badge(points);

    if ctx.json() {
        return ctx.print_json(&json!({
            "points": points,
            "badge": badge,
            "next": next.map(|n| json!({ "badge": n.badge, "pointsNeeded": n.points_needed })),
        }));
    }

    println!("{}", format_badge(badge));
    if let Some(next) = next {
        println!("{} more points to {}", next.points_needed, next.badge.name);
    }
    Ok(())
}

/// Haversine distance between two positions
pub fn distance(ctx: &Context, from: (f64, f64), to: (f64, f64)) -> Result<()> {
    let from = Coordinate::try_new(from.0, from.1)?;
    let to = Coordinate::try_new(to.0, to.1)?;
    let search = &ctx.config.schema.search;
    let radius = search.radius_km;
    let km = RadiusFilter::new(radius)
        .with_earth_radius(search.earth_radius_km)
        .distance(&from, &to);
    let label = DistanceLabel::Known(km);
    let within = km <= radius;

    if ctx.json() {
        return ctx.print_json(&json!({
            "km": km,
            "radiusKm": radius,
            "withinRadius": within,
        }));
    }

    let verdict = if within { "within" } else { "outside" };
    println!("{} ({verdict} the {radius} km search radius)", format_distance(&label));
    Ok(())
}
