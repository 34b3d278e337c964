//! Review and vendor submission commands

use crate::context::Context;
use anyhow::{Context as _, Result};
use owo_colors::OwoColorize;
use std::path::Path;
use thelewale_cli::output::{format_rating, Status};
use thelewale_cli::progress;
use thelewale_vendors::{NewVendor, ReviewDraft};

/// Post a review, then show the vendor's recomputed rating
pub async fn review(ctx: &Context, vendor_id: &str, rating: u8, content: String) -> Result<()> {
    let draft = ReviewDraft::new(rating, content);
    draft.validate()?;
    let service = ctx.service()?;

    let pb = ctx.spinner("Posting review...");
    let review = match service.submit_review(ctx.identity(), vendor_id, draft).await {
        Ok(review) => {
            progress::finish_success(&pb, "Review posted");
            review
        }
        Err(e) => {
            progress::finish_error(&pb, "Review not posted");
            return Err(e.into());
        }
    };

    let summary = service.vendor_details(vendor_id, ctx.identity()).await?.rating;

    if ctx.json() {
        return ctx.print_json(&serde_json::json!({
            "review": review,
            "rating": summary,
            "pointsAwarded": service.rewards().review,
        }));
    }

    Status::success(&format!(
        "Thanks {}! +{} points",
        review.author.bold(),
        service.rewards().review
    ));
    println!("  Rating now: {}", format_rating(&summary));
    Ok(())
}

/// Submit a listing read from a JSON file
pub async fn submit(ctx: &Context, file: &Path) -> Result<()> {
    let text = std::fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))?;
    let listing: NewVendor =
        serde_json::from_str(&text).with_context(|| format!("Invalid vendor listing in {}", file.display()))?;
    listing.validate()?;

    let service = ctx.service()?;

    let pb = ctx.spinner("Submitting vendor...");
    let vendor = match service.submit_vendor(ctx.identity(), listing).await {
        Ok(vendor) => {
            progress::finish_success(&pb, "Vendor submitted");
            vendor
        }
        Err(e) => {
            progress::finish_error(&pb, "Vendor not submitted");
            return Err(e.into());
        }
    };

    if ctx.json() {
        return ctx.print_json(&vendor);
    }

    Status::success(&format!(
        "{} is awaiting approval. +{} points",
        vendor.name.bold(),
        service.rewards().vendor_submission
    ));
    println!("  Vendor id: {}", vendor.id.dimmed());
    Ok(())
}
