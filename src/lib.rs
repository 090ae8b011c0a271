//! NEIS — National Energy Insights API.
//!
//! Serves aggregated national and regional energy-generation and
//! carbon-emissions figures, gated by short-lived API keys. Callers may
//! substitute manually entered emissions figures for calculated ones.

use std::collections::HashMap;
use std::sync::Arc;

pub mod aggregate;
pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod errors;
pub mod overrides;
pub mod resolve;

use aggregate::{Aggregator, RegionAggregate};
use auth::TokenAuthority;
use dataset::Dataset;
use overrides::OverrideStore;

/// Shared application state passed to handlers and middleware.
pub struct AppState {
    pub config: config::Config,
    pub aggregator: Aggregator,
    /// Per-region generation aggregates, built once at startup. The
    /// dataset tables never change for the process lifetime, so this map
    /// never goes stale.
    pub regions: HashMap<String, RegionAggregate>,
    pub tokens: TokenAuthority,
    pub overrides: OverrideStore,
}

impl AppState {
    pub fn new(config: config::Config, dataset: Dataset) -> Self {
        let aggregator = Aggregator::new(Arc::new(dataset));
        let regions = aggregator.region_map();
        Self {
            config,
            aggregator,
            regions,
            tokens: TokenAuthority::new(),
            overrides: OverrideStore::new(),
        }
    }
}
