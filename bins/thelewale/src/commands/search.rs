//! Vendor search command

use crate::context::Context;
use anyhow::Result;
use owo_colors::OwoColorize;
use thelewale_cli::output::{format_count, format_distance, Status};
use thelewale_cli::progress;
use thelewale_geo::{Coordinate, PlaceQuery};
use thelewale_vendors::{RankedResultList, SearchMode, SearchRequest};

/// What to search for
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    Request(SearchRequest),
    NearMe,
}

impl Target {
    /// Resolve the mutually exclusive search flags
    pub fn from_args(dish: Option<String>, place: Option<String>, near_me: bool, query: Option<String>) -> Result<Self> {
        if near_me {
            return Ok(Target::NearMe);
        }
        let request = match (dish, place, query) {
            (Some(dish), _, _) => SearchRequest::Dish(dish),
            (None, Some(place), _) => SearchRequest::Place(PlaceQuery::parse(&place)?),
            (None, None, Some(query)) => SearchRequest::from_query_string(&query)?,
            (None, None, None) => SearchRequest::Browse,
        };
        Ok(Target::Request(request))
    }

    fn describe(&self, origin: Option<&Coordinate>) -> String {
        match (self, origin) {
            (Target::NearMe, Some(origin)) => format!("near {:.4}, {:.4}", origin.latitude, origin.longitude),
            (Target::NearMe, None) => "near you".to_string(),
            (Target::Request(SearchRequest::Browse), _) => "all vendors".to_string(),
            (Target::Request(request), _) => format!("for \"{}\"", request.seed_text()),
        }
    }
}

/// Run a search and print the ranked list
pub async fn run(ctx: &Context, target: Target, position: Option<Coordinate>) -> Result<()> {
    let service = ctx.service()?;

    let pb = ctx.spinner("Fetching vendors...");
    let (results, origin) = match &target {
        Target::NearMe => {
            let origin = service.resolve_location(position);
            if position.is_none() {
                tracing::info!(lat = origin.latitude, lng = origin.longitude, "No position given, using default location");
            }
            let results = service.search(&SearchMode::Near(origin), Some(&origin)).await;
            (results, Some(origin))
        }
        Target::Request(request) => (service.search_request(request, position.as_ref()).await, position),
    };

    let results = match results {
        Ok(results) => {
            progress::finish_success(&pb, &format_count(results.len(), "vendor", "vendors"));
            results
        }
        Err(e) => {
            progress::finish_error(&pb, "Search failed");
            return Err(e.into());
        }
    };

    if ctx.json() {
        return ctx.print_json(&results);
    }

    print_results(&target.describe(origin.as_ref()), &results);
    Ok(())
}

fn print_results(title: &str, results: &RankedResultList) {
    Status::header(&format!("{} {title}", format_count(results.len(), "vendor", "vendors")));

    if results.is_empty() {
        Status::info("No vendors found. Try a different dish or a nearby area.");
        return;
    }

    for (i, ranked) in results.iter().enumerate() {
        let vendor = &ranked.vendor;
        println!("{:>3}. {}  {}", i + 1, vendor.name.bold(), vendor.cuisine.dimmed());
        println!("     {}  {}", format_distance(&ranked.distance), vendor.id.dimmed());
        if let Some(matched) = &ranked.matched {
            println!("     matched {}", matched.cyan());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dish_flag_wins() {
        let target = Target::from_args(Some("momos".into()), None, false, None).unwrap();
        assert_eq!(target, Target::Request(SearchRequest::Dish("momos".into())));
    }

    #[test]
    fn test_place_coordinate() {
        let target = Target::from_args(None, Some("Lat: 28.7041, Lng: 77.1025".into()), false, None).unwrap();
        assert_eq!(
            target,
            Target::Request(SearchRequest::Place(PlaceQuery::Coordinate(Coordinate::new(28.7041, 77.1025))))
        );
    }

    #[test]
    fn test_legacy_query_string() {
        let target = Target::from_args(None, None, false, Some("search=chole%20bhature".into())).unwrap();
        assert_eq!(target, Target::Request(SearchRequest::Dish("chole bhature".into())));
    }

    #[test]
    fn test_no_flags_browses() {
        assert_eq!(
            Target::from_args(None, None, false, None).unwrap(),
            Target::Request(SearchRequest::Browse)
        );
        assert_eq!(Target::from_args(None, None, true, None).unwrap(), Target::NearMe);
    }
}
