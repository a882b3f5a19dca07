use std::sync::Arc;

use askama::Template;
use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect},
    routing::{get, post},
};
use axum_extra::extract::Form;
use chrono::Utc;

use crate::{
    db::entities::venue,
    error::AppError,
    forms::{STATES, SearchForm, VenueForm},
    routes::{
        extract::RecordId,
        response::{HtmlResult, page, render},
        views::home::flash_page,
    },
    services::{
        ServiceContext,
        listing::{ArtistAppearance, SearchResults, ShowSplit, VenueArea},
        venue_service::VenueService,
    },
    state::AppState,
};

#[derive(Template)]
#[template(path = "pages/venues.html")]
struct VenuesPage {
    areas: Vec<VenueArea>,
}

#[derive(Template)]
#[template(path = "pages/search_venues.html")]
struct SearchVenuesPage {
    search_term: String,
    results: SearchResults,
}

#[derive(Template)]
#[template(path = "pages/show_venue.html")]
struct VenuePage {
    venue: venue::Model,
    shows: ShowSplit<ArtistAppearance>,
}

#[derive(Template)]
#[template(path = "forms/venue.html")]
struct VenueFormPage {
    heading: String,
    action: String,
    form: VenueForm,
    errors: Vec<String>,
    states: &'static [&'static str],
}

impl VenueFormPage {
    fn create(form: VenueForm, errors: Vec<String>) -> Self {
        Self {
            heading: "List a new venue".to_string(),
            action: "/venues/create".to_string(),
            form,
            errors,
            states: STATES,
        }
    }

    fn edit(venue: &venue::Model, form: VenueForm, errors: Vec<String>) -> Self {
        Self {
            heading: format!("Edit venue {}", venue.name),
            action: format!("/venues/{}/edit", venue.id),
            form,
            errors,
            states: STATES,
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/venues", get(list_venues))
        .route("/venues/search", post(search_venues))
        .route("/venues/create", get(create_venue_form).post(create_venue))
        .route("/venues/{id}", get(show_venue).delete(delete_venue))
        .route("/venues/{id}/edit", get(edit_venue_form).post(edit_venue))
        .with_state(state)
}

async fn list_venues(State(state): State<Arc<AppState>>) -> HtmlResult {
    let service = venue_service_from_state(state.as_ref());
    let areas = service.list_by_area(Utc::now().fixed_offset()).await?;
    Ok(render(&VenuesPage { areas })?.into_response())
}

async fn search_venues(
    State(state): State<Arc<AppState>>,
    Form(form): Form<SearchForm>,
) -> HtmlResult {
    let service = venue_service_from_state(state.as_ref());
    let results = service
        .search(&form.search_term, Utc::now().fixed_offset())
        .await?;
    Ok(render(&SearchVenuesPage {
        search_term: form.search_term,
        results,
    })?
    .into_response())
}

async fn show_venue(State(state): State<Arc<AppState>>, RecordId(id): RecordId) -> HtmlResult {
    let service = venue_service_from_state(state.as_ref());
    let detail = service.detail(id, Utc::now().fixed_offset()).await?;
    Ok(render(&VenuePage {
        venue: detail.venue,
        shows: detail.shows,
    })?
    .into_response())
}

async fn create_venue_form() -> HtmlResult {
    Ok(render(&VenueFormPage::create(VenueForm::default(), Vec::new()))?.into_response())
}

async fn create_venue(
    State(state): State<Arc<AppState>>,
    Form(form): Form<VenueForm>,
) -> HtmlResult {
    let input = match form.validate() {
        Ok(input) => input,
        Err(err) => {
            return page(
                StatusCode::BAD_REQUEST,
                &VenueFormPage::create(form, err.messages()),
            );
        }
    };

    let services = ServiceContext::from_state(state.as_ref());
    let venue = services.venue().create(input).await?;
    let flash = format!("Venue {} was successfully listed!", venue.name);
    flash_page(&services, flash).await
}

async fn edit_venue_form(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> HtmlResult {
    let service = venue_service_from_state(state.as_ref());
    let venue = service.require(id).await?;
    let form = VenueForm::from(&venue);
    Ok(render(&VenueFormPage::edit(&venue, form, Vec::new()))?.into_response())
}

async fn edit_venue(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
    Form(form): Form<VenueForm>,
) -> HtmlResult {
    let service = venue_service_from_state(state.as_ref());
    let input = match form.validate() {
        Ok(input) => input,
        Err(err) => {
            let venue = service.require(id).await?;
            return page(
                StatusCode::BAD_REQUEST,
                &VenueFormPage::edit(&venue, form, err.messages()),
            );
        }
    };

    let venue = service.update(id, input).await?;
    tracing::info!("You have updated venue, {} successfully.", venue.name);
    Ok(Redirect::to(&format!("/venues/{}", venue.id)).into_response())
}

async fn delete_venue(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<Redirect, AppError> {
    let service = venue_service_from_state(state.as_ref());
    service.delete(id).await?;
    Ok(Redirect::to("/venues"))
}

fn venue_service_from_state(state: &AppState) -> VenueService {
    ServiceContext::from_state(state).venue()
}
