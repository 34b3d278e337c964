//! Vendor details command

use crate::context::Context;
use anyhow::Result;
use owo_colors::OwoColorize;
use thelewale_cli::output::{format_dish, format_rating, format_status, Status};
use thelewale_cli::progress;
use thelewale_vendors::{ModerationStatus, VendorDetails};

pub async fn run(ctx: &Context, id: &str) -> Result<()> {
    let service = ctx.service()?;

    let pb = ctx.spinner("Loading vendor...");
    let details = match service.vendor_details(id, ctx.identity()).await {
        Ok(details) => {
            pb.finish_and_clear();
            details
        }
        Err(e) => {
            progress::finish_error(&pb, "Vendor not available");
            return Err(e.into());
        }
    };

    if ctx.json() {
        return ctx.print_json(&details);
    }

    print_details(&details);
    Ok(())
}

fn print_details(details: &VendorDetails) {
    let vendor = &details.vendor;

    Status::header(&vendor.name);
    if vendor.status != ModerationStatus::Approved {
        println!("  Status:   {}", format_status(vendor.status));
    }
    if !vendor.cuisine.is_empty() {
        println!("  Cuisine:  {}", vendor.cuisine);
    }
    println!("  Rating:   {}", format_rating(&details.rating));
    if !vendor.working_hours.is_empty() {
        println!("  Hours:    {}", vendor.working_hours);
    }
    if !vendor.payment_methods.is_empty() {
        println!("  Payment:  {}", vendor.payment_methods);
    }
    if let Some(location) = &vendor.location {
        println!("  Location: {:.5}, {:.5}", location.latitude, location.longitude);
    }
    if !vendor.description.is_empty() {
        println!();
        println!("  {}", vendor.description);
    }

    if !vendor.dishes.is_empty() {
        Status::subheader("Menu");
        for dish in &vendor.dishes {
            println!("  • {}", format_dish(dish));
        }
    }

    Status::subheader("Reviews");
    if details.reviews.is_empty() {
        println!("  {}", "No reviews yet. Be the first!".dimmed());
    }
    for review in &details.reviews {
        let stars = review.rating.map_or_else(String::new, |r| "★".repeat(usize::from(r)));
        println!(
            "  {} {}  {}",
            review.author.bold(),
            stars.yellow(),
            review.created_at.format("%d %b %Y").to_string().dimmed()
        );
        println!("    {}", review.content);
    }
}
