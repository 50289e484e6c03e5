//! The single page endpoint.
//!
//! `GET /` renders today's page, `POST /` renders it for the `date` form
//! field. Upstream trouble never turns into an error response; it shows up
//! as missing sections and the error banner.

pub mod page;

use std::sync::Arc;

use axum::{
    extract::{rejection::FormRejection, State},
    response::Html,
    routing::get,
    Form, Router,
};
use serde::Deserialize;
use tokio::net::TcpListener;

use crate::adapters::{NasaClient, SystemClock};
use crate::config::ServerConfig;
use crate::core::{FeedAggregator, FeedDate};
use crate::utils::error::{AstroError, Result};

pub type PageAggregator = FeedAggregator<NasaClient, SystemClock>;

#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<PageAggregator>,
}

impl AppState {
    pub fn new(aggregator: PageAggregator) -> Self {
        Self {
            aggregator: Arc::new(aggregator),
        }
    }

    pub fn from_config(config: &ServerConfig) -> Result<Self> {
        let client = NasaClient::new(config)?;
        Ok(Self::new(FeedAggregator::new(client, SystemClock)))
    }
}

#[derive(Debug, Deserialize)]
pub struct DateForm {
    pub date: Option<String>,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler).post(date_handler))
        .with_state(state)
}

/// Bind `host:port` and serve until the process is stopped.
pub async fn serve(config: &ServerConfig) -> Result<()> {
    let state = AppState::from_config(config)?;
    let app = create_router(state);

    let address = config.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| AstroError::BindError {
            address: address.clone(),
            source,
        })?;
    tracing::info!("🚀 Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}

/// GET / — no date override
async fn index_handler(State(state): State<AppState>) -> Html<String> {
    tracing::info!("GET / without date");
    render(&state, None, None).await
}

/// POST / — date from the form; blank means none, malformed is echoed back with a notice
async fn date_handler(
    State(state): State<AppState>,
    form: std::result::Result<Form<DateForm>, FormRejection>,
) -> Html<String> {
    let raw = match &form {
        Ok(Form(form)) => form.date.as_deref(),
        Err(rejection) => {
            tracing::warn!("Unreadable form body: {}", rejection);
            None
        }
    };

    let (date, rejected) = match FeedDate::parse_optional(raw) {
        Ok(date) => (date, None),
        Err(e) => {
            tracing::warn!("Ignoring date {:?}: {}", raw.unwrap_or_default(), e);
            (None, raw.map(str::trim))
        }
    };

    tracing::info!("POST / with date {:?}", date.map(|d| d.to_string()));
    render(&state, date, rejected).await
}

async fn render(state: &AppState, date: Option<FeedDate>, rejected: Option<&str>) -> Html<String> {
    let result = state.aggregator.aggregate(date).await;
    if let Some(error) = &result.error {
        tracing::warn!("Page rendered with error: {}", error);
    }
    Html(page::render_index(&result, date, rejected))
}
