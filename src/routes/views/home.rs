use std::sync::Arc;

use askama::Template;
use axum::{Router, extract::State, response::IntoResponse, routing::get};
use tracing::warn;

use crate::{
    error::AppError,
    routes::response::{HtmlResult, render},
    services::{ServiceContext, listing::RecentListing},
    state::AppState,
};

const RECENT_LIMIT: u64 = 10;

#[derive(Template)]
#[template(path = "pages/home.html")]
struct HomePage {
    flash: Option<String>,
    venues: Vec<RecentListing>,
    artists: Vec<RecentListing>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new().route("/", get(index)).with_state(state)
}

async fn index(State(state): State<Arc<AppState>>) -> HtmlResult {
    let services = ServiceContext::from_state(state.as_ref());
    let (venues, artists) = recent_listings(&services).await?;
    Ok(render(&HomePage {
        flash: None,
        venues,
        artists,
    })?
    .into_response())
}

/// The home page topped by the outcome of a submission that already
/// committed. Failing to load the recent columns leaves them empty.
pub(crate) async fn flash_page(services: &ServiceContext, flash: String) -> HtmlResult {
    let (venues, artists) = match recent_listings(services).await {
        Ok(listings) => listings,
        Err(err) => {
            warn!(error = %err, "recent listings unavailable after a successful submission");
            (Vec::new(), Vec::new())
        }
    };
    Ok(render(&HomePage {
        flash: Some(flash),
        venues,
        artists,
    })?
    .into_response())
}

async fn recent_listings(
    services: &ServiceContext,
) -> Result<(Vec<RecentListing>, Vec<RecentListing>), AppError> {
    let venues = services.venue().recent(RECENT_LIMIT).await?;
    let artists = services.artist().recent(RECENT_LIMIT).await?;
    Ok((
        venues.iter().map(RecentListing::from).collect(),
        artists.iter().map(RecentListing::from).collect(),
    ))
}
