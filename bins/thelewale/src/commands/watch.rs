//! Live rating command

use crate::context::Context;
use anyhow::Result;
use owo_colors::OwoColorize;
use thelewale_cli::output::{format_count, format_rating, Status};

/// Print the rating on every review change until Ctrl-C
pub async fn run(ctx: &Context, vendor_id: &str) -> Result<()> {
    let service = ctx.service()?;
    let mut watch = service.watch_ratings(vendor_id).await?;

    if !ctx.json() {
        Status::info(&format!("Watching {vendor_id}, press Ctrl-C to stop"));
    }

    loop {
        tokio::select! {
            update = watch.next() => {
                let Some((reviews, summary)) = update else {
                    tracing::debug!(vendor_id, "Review feed closed");
                    break;
                };
                if ctx.json() {
                    println!("{}", serde_json::to_string(&summary)?);
                    continue;
                }
                let latest = reviews
                    .first()
                    .map(|r| format!("  latest by {}", r.author))
                    .unwrap_or_default();
                println!(
                    "{}  {}{}",
                    format_rating(&summary),
                    format_count(reviews.len(), "review", "reviews").dimmed(),
                    latest.dimmed()
                );
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::debug!(vendor_id, "Interrupted");
                break;
            }
        }
    }

    watch.unsubscribe();
    Ok(())
}
