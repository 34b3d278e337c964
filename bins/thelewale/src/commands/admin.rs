//! Moderation commands

use crate::context::Context;
use anyhow::Result;
use owo_colors::OwoColorize;
use thelewale_cli::output::{format_count, format_status, Status};
use thelewale_cli::progress;
use thelewale_vendors::Vendor;

/// List vendors awaiting approval, oldest first
pub async fn pending(ctx: &Context) -> Result<()> {
    let service = ctx.service()?;

    let pb = ctx.spinner("Loading pending vendors...");
    let mut vendors = match service.pending_vendors(ctx.identity()).await {
        Ok(vendors) => {
            pb.finish_and_clear();
            vendors
        }
        Err(e) => {
            progress::finish_error(&pb, "Cannot list pending vendors");
            return Err(e.into());
        }
    };
    vendors.sort_by_key(|v| v.created_at);

    if ctx.json() {
        return ctx.print_json(&vendors);
    }

    Status::header(&format!("{} awaiting approval", format_count(vendors.len(), "vendor", "vendors")));
    for vendor in &vendors {
        println!(
            "  {}  {}  {}",
            vendor.id.dimmed(),
            vendor.name.bold(),
            vendor.created_at.format("%d %b %Y %H:%M").to_string().dimmed()
        );
        if let Some(by) = &vendor.submitted_by {
            println!("      submitted by {by}");
        }
    }
    Ok(())
}

pub async fn approve(ctx: &Context, id: &str) -> Result<()> {
    let service = ctx.service()?;
    let vendor = service.approve(ctx.identity(), id).await?;
    report(ctx, &vendor)
}

pub async fn reject(ctx: &Context, id: &str) -> Result<()> {
    let service = ctx.service()?;
    let vendor = service.reject(ctx.identity(), id).await?;
    report(ctx, &vendor)
}

fn report(ctx: &Context, vendor: &Vendor) -> Result<()> {
    if ctx.json() {
        return ctx.print_json(vendor);
    }
    Status::success(&format!("{} is now {}", vendor.name.bold(), format_status(vendor.status)));
    Ok(())
}
