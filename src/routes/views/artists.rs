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
    db::entities::artist,
    forms::{ArtistForm, GENRES, STATES, SearchForm},
    routes::{
        extract::RecordId,
        response::{HtmlResult, page, render},
        views::home::flash_page,
    },
    services::{
        ServiceContext,
        artist_service::ArtistService,
        listing::{ArtistSummary, SearchResults, ShowSplit, VenueBooking},
    },
    state::AppState,
};

#[derive(Template)]
#[template(path = "pages/artists.html")]
struct ArtistsPage {
    artists: Vec<ArtistSummary>,
}

#[derive(Template)]
#[template(path = "pages/search_artists.html")]
struct SearchArtistsPage {
    search_term: String,
    results: SearchResults,
}

#[derive(Template)]
#[template(path = "pages/show_artist.html")]
struct ArtistPage {
    artist: artist::Model,
    genres: Vec<String>,
    shows: ShowSplit<VenueBooking>,
}

#[derive(Template)]
#[template(path = "forms/artist.html")]
struct ArtistFormPage {
    heading: String,
    action: String,
    form: ArtistForm,
    errors: Vec<String>,
    states: &'static [&'static str],
    genres: &'static [&'static str],
}

impl ArtistFormPage {
    fn create(form: ArtistForm, errors: Vec<String>) -> Self {
        Self {
            heading: "List a new artist".to_string(),
            action: "/artists/create".to_string(),
            form,
            errors,
            states: STATES,
            genres: GENRES,
        }
    }

    fn edit(artist: &artist::Model, form: ArtistForm, errors: Vec<String>) -> Self {
        Self {
            heading: format!("Edit artist {}", artist.name),
            action: format!("/artists/{}/edit", artist.id),
            form,
            errors,
            states: STATES,
            genres: GENRES,
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/artists", get(list_artists))
        .route("/artists/search", post(search_artists))
        .route("/artists/create", get(create_artist_form).post(create_artist))
        .route("/artists/{id}", get(show_artist))
        .route("/artists/{id}/edit", get(edit_artist_form).post(edit_artist))
        .with_state(state)
}

async fn list_artists(State(state): State<Arc<AppState>>) -> HtmlResult {
    let artists = artist_service_from_state(state.as_ref()).list().await?;
    Ok(render(&ArtistsPage { artists })?.into_response())
}

async fn search_artists(
    State(state): State<Arc<AppState>>,
    Form(form): Form<SearchForm>,
) -> HtmlResult {
    let service = artist_service_from_state(state.as_ref());
    let results = service
        .search(&form.search_term, Utc::now().fixed_offset())
        .await?;
    Ok(render(&SearchArtistsPage {
        search_term: form.search_term,
        results,
    })?
    .into_response())
}

async fn show_artist(State(state): State<Arc<AppState>>, RecordId(id): RecordId) -> HtmlResult {
    let service = artist_service_from_state(state.as_ref());
    let detail = service.detail(id, Utc::now().fixed_offset()).await?;
    Ok(render(&ArtistPage {
        artist: detail.artist,
        genres: detail.genres,
        shows: detail.shows,
    })?
    .into_response())
}

async fn create_artist_form() -> HtmlResult {
    Ok(render(&ArtistFormPage::create(ArtistForm::default(), Vec::new()))?.into_response())
}

async fn create_artist(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ArtistForm>,
) -> HtmlResult {
    let input = match form.validate() {
        Ok(input) => input,
        Err(err) => {
            return page(
                StatusCode::BAD_REQUEST,
                &ArtistFormPage::create(form, err.messages()),
            );
        }
    };

    let services = ServiceContext::from_state(state.as_ref());
    let artist = services.artist().create(input).await?;
    let flash = format!("Artist {} was successfully listed!", artist.name);
    flash_page(&services, flash).await
}

async fn edit_artist_form(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> HtmlResult {
    let service = artist_service_from_state(state.as_ref());
    let artist = service.require(id).await?;
    let form = ArtistForm::from(&artist);
    Ok(render(&ArtistFormPage::edit(&artist, form, Vec::new()))?.into_response())
}

async fn edit_artist(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
    Form(form): Form<ArtistForm>,
) -> HtmlResult {
    let service = artist_service_from_state(state.as_ref());
    let input = match form.validate() {
        Ok(input) => input,
        Err(err) => {
            let artist = service.require(id).await?;
            return page(
                StatusCode::BAD_REQUEST,
                &ArtistFormPage::edit(&artist, form, err.messages()),
            );
        }
    };

    let artist = service.update(id, input).await?;
    tracing::info!("You have updated artist, {} successfully.", artist.name);
    Ok(Redirect::to(&format!("/artists/{}", artist.id)).into_response())
}

fn artist_service_from_state(state: &AppState) -> ArtistService {
    ServiceContext::from_state(state).artist()
}
