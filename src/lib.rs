pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;
pub mod web;

pub use adapters::{NasaClient, SystemClock};
pub use config::ServerConfig;
pub use crate::core::aggregator::{FeedAggregator, APOD_ERROR, NEO_ERROR};
pub use domain::model::{AggregateResult, FeedDate};
pub use utils::error::{AstroError, Result};
pub use web::{create_router, serve, AppState};
