//! Thelewale CLI
//!
//! Find street-food vendors by dish or place, add listings and reviews, and moderate
//! submissions against the hosted backend. `badge` and `distance` work offline.

mod commands;
mod context;

use clap::{Parser, Subcommand, ValueEnum};
use context::Context;
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::process::ExitCode;
use thelewale_api_client::ApiError;
use thelewale_cli::logging::{init_with_config, LoggingConfig};
use thelewale_core::{Error as CodedError, ErrorCode};
use thelewale_geo::GeoError;
use thelewale_vendors::VendorError;

#[derive(Parser)]
#[command(name = "thelewale")]
#[command(author, version, about = "Find street-food vendors by dish or place")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    log_json: bool,

    /// Configuration file (defaults to thelewale.toml lookup)
    #[arg(long, global = true, env = "THELEWALE_CONFIG")]
    config: Option<PathBuf>,

    /// Signed-in user id
    #[arg(short, long, global = true, env = "THELEWALE_USER")]
    user: Option<String>,

    /// Display name shown on your reviews
    #[arg(long, global = true, env = "THELEWALE_NAME")]
    name: Option<String>,
}

/// How command results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Search approved vendors by dish, place or your position
    Search {
        /// Dish, cuisine or vendor name
        #[arg(short, long, conflicts_with_all = ["place", "near_me", "query"])]
        dish: Option<String>,

        /// Place name, or "Lat: <lat>, Lng: <lng>"
        #[arg(short, long, conflicts_with_all = ["near_me", "query"])]
        place: Option<String>,

        /// Vendors within the search radius of --lat/--lng (or the default location)
        #[arg(long, conflicts_with = "query")]
        near_me: bool,

        /// Results-page query string, e.g. "dish=pani%20puri"
        #[arg(long)]
        query: Option<String>,

        /// Your latitude
        #[arg(long, allow_negative_numbers = true, requires = "lng")]
        lat: Option<f64>,

        /// Your longitude
        #[arg(long, allow_negative_numbers = true, requires = "lat")]
        lng: Option<f64>,
    },

    /// Show a vendor with its reviews and rating
    Vendor {
        /// Vendor id
        id: String,
    },

    /// Rate and review a vendor
    Review {
        /// Vendor id
        vendor_id: String,

        /// Stars, 1 to 5
        #[arg(short, long)]
        rating: u8,

        /// Review text
        #[arg(short, long)]
        content: String,
    },

    /// Submit a new vendor listing for approval
    Submit {
        /// JSON file with the listing
        #[arg(long)]
        file: PathBuf,
    },

    /// Show your points, badge and submitted vendors
    Profile,

    /// Moderate submitted vendors (admins only)
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },

    /// Show the badge earned with a points balance
    Badge {
        /// Points balance (missing means none)
        #[arg(allow_negative_numbers = true)]
        points: Option<i64>,
    },

    /// Great-circle distance between two positions
    Distance {
        #[arg(allow_negative_numbers = true)]
        lat1: f64,
        #[arg(allow_negative_numbers = true)]
        lng1: f64,
        #[arg(allow_negative_numbers = true)]
        lat2: f64,
        #[arg(allow_negative_numbers = true)]
        lng2: f64,
    },

    /// Weather-based food suggestion for a position
    Weather {
        #[arg(long, allow_negative_numbers = true, requires = "lng")]
        lat: Option<f64>,
        #[arg(long, allow_negative_numbers = true, requires = "lat")]
        lng: Option<f64>,
    },

    /// Place name suggestions
    Places {
        /// Partial place name
        query: String,
    },

    /// Follow a vendor's reviews and rating until Ctrl-C
    Watch {
        /// Vendor id
        vendor_id: String,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// List vendors awaiting approval
    Pending,
    /// Publish a pending vendor
    Approve { id: String },
    /// Reject a pending vendor
    Reject { id: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let logging = if cli.verbose {
        LoggingConfig::verbose()
    } else {
        LoggingConfig::default()
    };
    if let Err(e) = init_with_config(&logging.with_json(cli.log_json)) {
        eprintln!("{} {e}", "Warning:".yellow().bold());
    }

    let result = match Context::load(cli.config.as_deref(), cli.user, cli.name, cli.format) {
        Ok(ctx) => run(cli.command, &ctx).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let coded = classify(&e);
            if cli.format == Format::Json {
                if let Ok(json) = serde_json::to_string_pretty(&coded.to_report()) {
                    println!("{json}");
                }
            }
            eprintln!("{} {coded}", "Error:".red().bold());
            ExitCode::from(u8::try_from(coded.code.exit_code()).unwrap_or(1))
        }
    }
}

async fn run(command: Commands, ctx: &Context) -> anyhow::Result<()> {
    use commands::{admin, contribute, offline, places, profile, search, vendor, watch, weather};

    match command {
        Commands::Search {
            dish,
            place,
            near_me,
            query,
            lat,
            lng,
        } => {
            let target = search::Target::from_args(dish, place, near_me, query)?;
            search::run(ctx, target, context::position(lat, lng)).await
        }
        Commands::Vendor { id } => vendor::run(ctx, &id).await,
        Commands::Review {
            vendor_id,
            rating,
            content,
        } => contribute::review(ctx, &vendor_id, rating, content).await,
        Commands::Submit { file } => contribute::submit(ctx, &file).await,
        Commands::Profile => profile::run(ctx).await,
        Commands::Admin { action } => match action {
            AdminAction::Pending => admin::pending(ctx).await,
            AdminAction::Approve { id } => admin::approve(ctx, &id).await,
            AdminAction::Reject { id } => admin::reject(ctx, &id).await,
        },
        Commands::Badge { points } => offline::badge(ctx, points),
        Commands::Distance { lat1, lng1, lat2, lng2 } => offline::distance(ctx, (lat1, lng1), (lat2, lng2)),
        Commands::Weather { lat, lng } => weather::run(ctx, context::position(lat, lng)).await,
        Commands::Places { query } => places::run(ctx, &query).await,
        Commands::Watch { vendor_id } => watch::run(ctx, &vendor_id).await,
    }
}

/// Attach an error code and a suggestion to a command failure
fn classify(err: &anyhow::Error) -> CodedError {
    if let Some(e) = err.downcast_ref::<CodedError>() {
        let mut coded = CodedError::new(e.code, e.message.clone());
        coded.context = e.context.clone();
        coded.suggestion = e.suggestion.clone();
        return coded;
    }

    let (code, suggestion) = if let Some(e) = err.downcast_ref::<VendorError>() {
        (e.code(), e.suggestion())
    } else if err.downcast_ref::<GeoError>().is_some() {
        (ErrorCode::InvalidCoordinate, Some("Latitude goes from -90 to 90, longitude from -180 to 180"))
    } else if let Some(e) = err.downcast_ref::<ApiError>() {
        let code = if e.is_not_found() { ErrorCode::NotFound } else { ErrorCode::BackendError };
        (code, Some("Check THELEWALE_API_URL and your connection"))
    } else if err.downcast_ref::<serde_json::Error>().is_some() {
        (ErrorCode::InvalidInput, None)
    } else if err.downcast_ref::<std::io::Error>().is_some() {
        (ErrorCode::IoError, None)
    } else {
        (ErrorCode::Unknown, None)
    };

    let coded = CodedError::new(code, format!("{err:#}"));
    match suggestion {
        Some(suggestion) => coded.with_suggestion(suggestion),
        None => coded,
    }
}
