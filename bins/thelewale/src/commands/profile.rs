//! Profile command

use crate::context::Context;
use anyhow::Result;
use owo_colors::OwoColorize;
use thelewale_cli::output::{format_badge, format_count, format_status, Status};
use thelewale_cli::progress;
use thelewale_vendors::ProfileView;

pub async fn run(ctx: &Context) -> Result<()> {
    let service = ctx.service()?;

    let pb = ctx.spinner("Loading profile...");
    let view = match service.profile(ctx.identity()).await {
        Ok(view) => {
            pb.finish_and_clear();
            view
        }
        Err(e) => {
            progress::finish_error(&pb, "Profile not available");
            return Err(e.into());
        }
    };

    if ctx.json() {
        return ctx.print_json(&view);
    }

    print_profile(&view);
    Ok(())
}

fn print_profile(view: &ProfileView) {
    let profile = &view.profile;
    let title = if profile.name.is_empty() { profile.id.as_str() } else { profile.name.as_str() };

    Status::header(title);
    println!("  Badge:    {}", format_badge(&view.badge));
    println!("  Points:   {}", profile.points.to_string().bold());
    if let Some((next, needed)) = &view.next_badge {
        println!("  Next:     {} in {} points", format_badge(next), needed);
    }
    println!(
        "  Added {}, wrote {}",
        format_count(profile.vendors_added as usize, "vendor", "vendors"),
        format_count(profile.reviews_given as usize, "review", "reviews")
    );

    Status::subheader("Your vendors");
    if view.vendors.is_empty() {
        println!("  {}", "Nothing submitted yet".dimmed());
    }
    for vendor in &view.vendors {
        println!("  {}  {}  {}", format_status(vendor.status), vendor.name, vendor.id.dimmed());
    }
}
