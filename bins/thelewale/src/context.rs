//! Per-invocation state shared by the commands

use crate::Format;
use anyhow::Context as _;
use serde::Serialize;
use std::path::Path;
use thelewale_api_client::ThelewaleClient;
use thelewale_cli::progress::{self, ProgressBar};
use thelewale_core::config::Config;
use thelewale_geo::Coordinate;
use thelewale_vendors::{BadgeTable, Identity, VendorService};

pub struct Context {
    pub config: Config,
    pub identity: Option<Identity>,
    pub format: Format,
}

impl Context {
    pub fn load(path: Option<&Path>, user: Option<String>, name: Option<String>, format: Format) -> anyhow::Result<Self> {
        let config = Config::load(path)?;
        if let Some(p) = &config.path {
            tracing::debug!(path = %p.display(), "Loaded configuration");
        }

        let identity = user.filter(|id| !id.trim().is_empty()).map(|id| {
            let identity = Identity::new(id);
            match name {
                Some(name) => identity.with_name(name),
                None => identity,
            }
        });

        Ok(Self {
            config,
            identity,
            format,
        })
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn json(&self) -> bool {
        self.format == Format::Json
    }

    /// Service over the hosted backend, configured from the environment
    pub fn service(&self) -> anyhow::Result<VendorService<ThelewaleClient>> {
        let client = ThelewaleClient::new().context("Failed to create backend client")?;
        Ok(VendorService::from_config(client, &self.config.schema)?)
    }

    pub fn badges(&self) -> anyhow::Result<BadgeTable> {
        Ok(BadgeTable::from_config(&self.config.schema.badges)?)
    }

    /// Spinner for a backend round trip; hidden for JSON output
    pub fn spinner(&self, message: &str) -> ProgressBar {
        if self.json() {
            progress::hidden()
        } else {
            progress::spinner(message)
        }
    }

    /// Print a value as pretty JSON on stdout
    pub fn print_json<T: Serialize>(&self, value: &T) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }
}

/// A position from optional `--lat`/`--lng` flags
pub fn position(lat: Option<f64>, lng: Option<f64>) -> Option<Coordinate> {
    match (lat, lng) {
        (Some(lat), Some(lng)) => Some(Coordinate::new(lat, lng)),
        _ => None,
    }
}
